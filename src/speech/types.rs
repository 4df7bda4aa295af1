/// Outcome of a recognition attempt. Failed recognition is not an error:
/// the text is empty and the success flag is false.
#[derive(Debug, Clone, PartialEq)]
pub struct VoiceTranscription {
    pub text: String,
    pub confidence: Option<f32>,
    pub success: bool,
}

impl VoiceTranscription {
    pub fn recognized(text: impl Into<String>, confidence: Option<f32>) -> Self {
        Self {
            text: text.into(),
            confidence,
            success: true,
        }
    }

    pub fn empty() -> Self {
        Self {
            text: String::new(),
            confidence: None,
            success: false,
        }
    }
}

const NAVIGATION_KEYWORDS: [&str; 8] = [
    "what",
    "nearby",
    "around",
    "surroundings",
    "detect",
    "find",
    "locate",
    "where",
];

/// Whether recognized text asks about the surroundings.
pub fn is_navigation_command(text: &str) -> bool {
    let text = text.to_lowercase();
    NAVIGATION_KEYWORDS
        .iter()
        .any(|keyword| text.contains(keyword))
}

/// Compose a spoken answer naming the detected objects.
pub fn navigation_response(objects: &[String]) -> String {
    if objects.is_empty() {
        return "I don't detect any objects nearby.".to_string();
    }

    let listing = if objects.len() == 1 {
        objects[0].clone()
    } else {
        format!(
            "{} and {}",
            objects[..objects.len() - 1].join(", "),
            objects[objects.len() - 1]
        )
    };

    format!("I detect {} nearby.", listing)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_navigation_command_detection() {
        assert!(is_navigation_command("What is around me?"));
        assert!(is_navigation_command("detect objects"));
        assert!(is_navigation_command("WHERE am I"));
        assert!(!is_navigation_command("play some music"));
        assert!(!is_navigation_command(""));
    }

    #[test]
    fn test_navigation_response_empty() {
        assert_eq!(
            navigation_response(&[]),
            "I don't detect any objects nearby."
        );
    }

    #[test]
    fn test_navigation_response_single() {
        assert_eq!(
            navigation_response(&["chair".to_string()]),
            "I detect chair nearby."
        );
    }

    #[test]
    fn test_navigation_response_listing() {
        let objects = vec![
            "chair".to_string(),
            "table".to_string(),
            "dog".to_string(),
        ];
        assert_eq!(
            navigation_response(&objects),
            "I detect chair, table and dog nearby."
        );
    }
}
