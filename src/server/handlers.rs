use super::types::{
    ErrorResponse, LocationQuery, ObjectDetectionResponse, TextToSpeechRequest,
    TextToSpeechResponse, VoiceCommandResponse,
};
use crate::{
    Error,
    detector::{ObjectDetector, decode_image_bytes},
    location::{LocationContext, LocationService},
    speech::{SpeechRecognizer, SpeechSynthesizer},
};
use axum::{
    extract::{Multipart, Query, State},
    http::StatusCode,
    response::Json,
};
use base64::{Engine as _, engine::general_purpose::STANDARD};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};

#[derive(Clone)]
pub struct AppState {
    pub detector: Arc<Mutex<ObjectDetector>>,
    pub recognizer: Arc<dyn SpeechRecognizer>,
    pub synthesizer: Arc<dyn SpeechSynthesizer>,
    pub locations: Arc<LocationService>,
    pub default_language: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

fn internal_error(e: Error) -> HandlerError {
    error!("Request failed: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

pub async fn detect_objects(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ObjectDetectionResponse>, HandlerError> {
    let mut file = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| internal_error(e.into()))?
    {
        let name = field.name().map(|n| n.to_string());
        if name.as_deref() == Some("file") {
            file = Some(field.bytes().await.map_err(|e| internal_error(e.into()))?);
        }
    }

    let Some(file) = file else {
        return Err(internal_error(Error::detection(
            "missing multipart field: file",
        )));
    };

    let image = decode_image_bytes(&file).map_err(internal_error)?;

    let mut detector = state.detector.lock().await;
    let detections = detector.detect(&image).map_err(internal_error)?;

    info!("Detected {} objects in uploaded frame", detections.len());

    Ok(Json(ObjectDetectionResponse::from_detections(&detections)))
}

pub async fn process_voice_command(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<VoiceCommandResponse>, HandlerError> {
    let mut file = None;
    let mut language = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| internal_error(e.into()))?
    {
        let name = field.name().map(|n| n.to_string());
        match name.as_deref() {
            Some("file") => {
                file = Some(field.bytes().await.map_err(|e| internal_error(e.into()))?);
            }
            Some("language") => {
                language = Some(field.text().await.map_err(|e| internal_error(e.into()))?);
            }
            _ => {}
        }
    }

    let Some(file) = file else {
        return Err(internal_error(Error::speech(
            "missing multipart field: file",
        )));
    };

    let language = language.unwrap_or_else(|| state.default_language.clone());
    let transcription = state
        .recognizer
        .recognize(&file, &language)
        .await
        .map_err(internal_error)?;

    info!(
        "Voice command recognized: {} (success: {})",
        transcription.text, transcription.success
    );

    Ok(Json(VoiceCommandResponse {
        text: transcription.text,
        language,
        success: transcription.success,
    }))
}

pub async fn location_context(
    State(state): State<AppState>,
    Query(query): Query<LocationQuery>,
) -> Json<LocationContext> {
    Json(state.locations.context(query.latitude, query.longitude).await)
}

pub async fn text_to_speech(
    State(state): State<AppState>,
    Json(request): Json<TextToSpeechRequest>,
) -> Result<Json<TextToSpeechResponse>, HandlerError> {
    let language = request
        .language
        .unwrap_or_else(|| state.default_language.clone());

    let audio = state
        .synthesizer
        .synthesize(&request.text, &language)
        .await
        .map_err(internal_error)?;

    Ok(Json(TextToSpeechResponse {
        audio: STANDARD.encode(audio),
    }))
}
