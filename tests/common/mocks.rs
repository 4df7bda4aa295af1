use async_trait::async_trait;
use image::RgbImage;
use std::sync::{Arc, Mutex};
use visionmate_rust::{
    Error, Result,
    detector::{DetectionEngine, RawDetection},
    location::{GeocodedPlace, ReverseGeocoder},
    speech::{SpeechRecognizer, SpeechSynthesizer, VoiceTranscription},
};

/// Detection engine that replays a fixed set of predictions
pub struct StubEngine {
    pub raw: Vec<RawDetection>,
}

impl DetectionEngine for StubEngine {
    fn infer(&mut self, _image: &RgbImage) -> Result<Vec<RawDetection>> {
        Ok(self.raw.clone())
    }
}

/// Recognizer that replays a fixed transcription and records the
/// languages it was asked for
pub struct MockRecognizer {
    pub transcription: VoiceTranscription,
    pub languages: Arc<Mutex<Vec<String>>>,
}

impl MockRecognizer {
    pub fn new(transcription: VoiceTranscription) -> Self {
        Self {
            transcription,
            languages: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

#[async_trait]
impl SpeechRecognizer for MockRecognizer {
    async fn recognize(&self, _audio: &[u8], language: &str) -> Result<VoiceTranscription> {
        self.languages.lock().unwrap().push(language.to_string());
        Ok(self.transcription.clone())
    }
}

/// Synthesizer that returns fixed audio, with the real client's
/// empty-text rejection
pub struct MockSynthesizer {
    pub audio: Vec<u8>,
}

#[async_trait]
impl SpeechSynthesizer for MockSynthesizer {
    async fn synthesize(&self, text: &str, _language: &str) -> Result<Vec<u8>> {
        if text.trim().is_empty() {
            return Err(Error::speech("no text to synthesize"));
        }
        Ok(self.audio.clone())
    }
}

/// Geocoder that replays a fixed place (or no result)
pub struct MockGeocoder {
    pub place: Option<GeocodedPlace>,
}

#[async_trait]
impl ReverseGeocoder for MockGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<GeocodedPlace>> {
        Ok(self.place.clone())
    }
}

/// Geocoder whose lookups always fail
pub struct FailingGeocoder;

#[async_trait]
impl ReverseGeocoder for FailingGeocoder {
    async fn reverse(&self, _latitude: f64, _longitude: f64) -> Result<Option<GeocodedPlace>> {
        Err(Error::geocoding("provider unavailable"))
    }
}
