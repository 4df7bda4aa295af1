pub mod handlers;
mod types;

pub use types::*;

use crate::{
    Result,
    config::Config,
    detector::ObjectDetector,
    location::{LocationService, NominatimClient},
    speech::{GoogleSpeechClient, GoogleTranslateTts},
};
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use handlers::AppState;
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

/// Uploads are capped slightly above the 10MB image limit so the decoder
/// gets to report its own error.
const MAX_BODY_BYTES: usize = 12 * 1024 * 1024;

pub fn router(state: AppState) -> Router {
    // The frontend is served from a different origin
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/detect-objects", post(handlers::detect_objects))
        .route("/process-voice-command", post(handlers::process_voice_command))
        .route("/location-context", get(handlers::location_context))
        .route("/text-to-speech", post(handlers::text_to_speech))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run(config: Config) -> Result<()> {
    // Initialize the detection model and the outbound service clients
    let detector = ObjectDetector::from_config(&config.detector)?;
    let recognizer = GoogleSpeechClient::new(&config.speech);
    let synthesizer = GoogleTranslateTts::new(&config.speech);
    let locations = LocationService::new(Box::new(NominatimClient::new(&config.geocoder)));

    // Create application state
    let state = AppState {
        detector: Arc::new(Mutex::new(detector)),
        recognizer: Arc::new(recognizer),
        synthesizer: Arc::new(synthesizer),
        locations: Arc::new(locations),
        default_language: config.speech.default_language.clone(),
    };

    let app = router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
