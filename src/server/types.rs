use crate::detector::Detection;
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize)]
pub struct ObjectDetectionResponse {
    pub objects: Vec<String>,
    pub confidence: Vec<f32>,
    pub distances: Vec<f32>,
}

impl ObjectDetectionResponse {
    pub fn from_detections(detections: &[Detection]) -> Self {
        Self {
            objects: detections.iter().map(|d| d.class_name.clone()).collect(),
            confidence: detections.iter().map(|d| d.confidence).collect(),
            distances: detections.iter().map(|d| d.distance).collect(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VoiceCommandResponse {
    pub text: String,
    pub language: String,
    pub success: bool,
}

#[derive(Debug, Deserialize)]
pub struct LocationQuery {
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Debug, Deserialize)]
pub struct TextToSpeechRequest {
    pub text: String,
    #[serde(default)]
    pub language: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TextToSpeechResponse {
    pub audio: String,
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
