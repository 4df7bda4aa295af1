use crate::{Error, Result, config::SpeechConfig};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// The translate_tts endpoint caps the `q` parameter; longer text is
/// fetched in pieces and the MP3 payloads concatenated.
const MAX_CHUNK_CHARS: usize = 100;

#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    /// Render text as MP3 audio.
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>>;
}

/// Client for the Google Translate-style `translate_tts` endpoint.
pub struct GoogleTranslateTts {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleTranslateTts {
    pub fn new(config: &SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.synthesizer_url.clone(),
        }
    }
}

#[async_trait]
impl SpeechSynthesizer for GoogleTranslateTts {
    async fn synthesize(&self, text: &str, language: &str) -> Result<Vec<u8>> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::speech("no text to synthesize"));
        }

        let chunks = split_text(text);
        debug!("Synthesizing {} characters in {} chunks", text.len(), chunks.len());

        let url = format!("{}/translate_tts", self.base_url);
        let mut audio = Vec::new();

        for chunk in &chunks {
            let response = self
                .client
                .get(&url)
                .query(&[
                    ("ie", "UTF-8"),
                    ("q", chunk.as_str()),
                    ("tl", language),
                    ("client", "tw-ob"),
                ])
                .send()
                .await?
                .error_for_status()?;

            audio.extend_from_slice(&response.bytes().await?);
        }

        Ok(audio)
    }
}

/// Break text into whitespace-bounded chunks of at most MAX_CHUNK_CHARS
/// characters. A single word over the limit becomes its own chunk rather
/// than being split mid-word.
fn split_text(text: &str) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if current.is_empty() {
            current.push_str(word);
        } else if current.chars().count() + 1 + word.chars().count() <= MAX_CHUNK_CHARS {
            current.push(' ');
            current.push_str(word);
        } else {
            chunks.push(std::mem::take(&mut current));
            current.push_str(word);
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }

    chunks
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_short_text_is_one_chunk() {
        assert_eq!(split_text("hello there"), vec!["hello there"]);
    }

    #[test]
    fn test_long_text_splits_on_whitespace() {
        let text = "word ".repeat(50);
        let chunks = split_text(&text);

        assert!(chunks.len() > 1);
        for chunk in &chunks {
            assert!(chunk.chars().count() <= MAX_CHUNK_CHARS);
            assert!(!chunk.starts_with(' '));
            assert!(!chunk.ends_with(' '));
        }
        assert_eq!(chunks.join(" "), text.trim());
    }

    #[test]
    fn test_oversized_word_stays_whole() {
        let word = "a".repeat(150);
        let chunks = split_text(&word);

        assert_eq!(chunks, vec![word]);
    }
}
