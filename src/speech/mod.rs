mod recognizer;
mod synthesizer;
mod types;
mod wav;

pub use recognizer::{GoogleSpeechClient, SpeechRecognizer};
pub use synthesizer::{GoogleTranslateTts, SpeechSynthesizer};
pub use types::{VoiceTranscription, is_navigation_command, navigation_response};
pub use wav::{WavAudio, parse_wav};
