use super::types::VoiceTranscription;
use super::wav::parse_wav;
use crate::{Result, config::SpeechConfig};
use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use std::time::Duration;
use tracing::{error, warn};

#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Transcribe a WAV upload. Service failures and unintelligible audio
    /// both come back as an unsuccessful transcription, not an error;
    /// only a malformed audio container is.
    async fn recognize(&self, audio: &[u8], language: &str) -> Result<VoiceTranscription>;
}

/// Client for the Google-style `speech-api/v2/recognize` endpoint.
pub struct GoogleSpeechClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl GoogleSpeechClient {
    pub fn new(config: &SpeechConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(15))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: config.recognizer_url.clone(),
            api_key: config.recognizer_key.clone(),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for GoogleSpeechClient {
    async fn recognize(&self, audio: &[u8], language: &str) -> Result<VoiceTranscription> {
        let wav = parse_wav(audio)?;

        let url = format!("{}/speech-api/v2/recognize", self.base_url);
        let response = self
            .client
            .post(&url)
            .query(&[
                ("client", "chromium"),
                ("lang", language),
                ("key", self.api_key.as_str()),
            ])
            .header(CONTENT_TYPE, format!("audio/l16; rate={}", wav.sample_rate))
            .body(wav.data.to_vec())
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                error!("Could not reach speech recognition service: {}", e);
                return Ok(VoiceTranscription::empty());
            }
        };

        if !response.status().is_success() {
            error!(
                "Speech recognition service returned status {}",
                response.status()
            );
            return Ok(VoiceTranscription::empty());
        }

        let body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                error!("Could not read speech recognition response: {}", e);
                return Ok(VoiceTranscription::empty());
            }
        };

        match parse_recognize_response(&body) {
            Some((transcript, confidence)) => {
                Ok(VoiceTranscription::recognized(transcript, confidence))
            }
            None => {
                warn!("Speech recognition could not understand audio");
                Ok(VoiceTranscription::empty())
            }
        }
    }
}

/// The recognize endpoint answers with one JSON document per line, the
/// first of which is usually an empty `{"result":[]}` placeholder. The
/// transcript is the top alternative of the first non-empty result.
fn parse_recognize_response(body: &str) -> Option<(String, Option<f32>)> {
    for line in body.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let Ok(value) = serde_json::from_str::<serde_json::Value>(line) else {
            continue;
        };

        let Some(results) = value.get("result").and_then(|r| r.as_array()) else {
            continue;
        };

        for result in results {
            let Some(alternatives) = result.get("alternative").and_then(|a| a.as_array()) else {
                continue;
            };

            if let Some(best) = alternatives.first() {
                let transcript = best.get("transcript").and_then(|t| t.as_str())?;
                if transcript.is_empty() {
                    return None;
                }
                let confidence = best
                    .get("confidence")
                    .and_then(|c| c.as_f64())
                    .map(|c| c as f32);
                return Some((transcript.to_string(), confidence));
            }
        }
    }

    None
}
