use image::DynamicImage;
use visionmate_rust::config::{
    Config, DetectorConfig, GeocoderConfig, LogsConfig, ServerConfig, SpeechConfig,
};

/// Create a test configuration with sensible defaults
pub fn create_test_config() -> Config {
    Config {
        server: ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 8000,
            logs: LogsConfig {
                level: "debug".to_string(),
            },
        },
        detector: DetectorConfig::default(),
        speech: SpeechConfig {
            recognizer_url: "http://localhost:9000".to_string(),
            recognizer_key: "test-key".to_string(),
            synthesizer_url: "http://localhost:9001".to_string(),
            default_language: "en".to_string(),
        },
        geocoder: GeocoderConfig {
            base_url: "http://localhost:9002".to_string(),
            user_agent: "visionmate-test".to_string(),
        },
    }
}

/// A minimal mono 16-bit PCM WAV container around the given payload
pub fn wav_bytes(sample_rate: u32, pcm: &[u8]) -> Vec<u8> {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"RIFF");
    bytes.extend_from_slice(&(36 + pcm.len() as u32).to_le_bytes());
    bytes.extend_from_slice(b"WAVE");
    bytes.extend_from_slice(b"fmt ");
    bytes.extend_from_slice(&16u32.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&1u16.to_le_bytes());
    bytes.extend_from_slice(&sample_rate.to_le_bytes());
    bytes.extend_from_slice(&(sample_rate * 2).to_le_bytes());
    bytes.extend_from_slice(&2u16.to_le_bytes());
    bytes.extend_from_slice(&16u16.to_le_bytes());
    bytes.extend_from_slice(b"data");
    bytes.extend_from_slice(&(pcm.len() as u32).to_le_bytes());
    bytes.extend_from_slice(pcm);
    bytes
}

/// A small valid PNG frame for upload tests
pub fn png_bytes() -> Vec<u8> {
    let mut buf = std::io::Cursor::new(Vec::new());
    DynamicImage::new_rgb8(8, 8)
        .write_to(&mut buf, image::ImageFormat::Png)
        .unwrap();
    buf.into_inner()
}

/// Assemble a multipart/form-data body. `filename` distinguishes file
/// parts from plain text fields.
pub fn multipart_body(boundary: &str, parts: &[(&str, Option<&str>, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, data) in parts {
        body.extend_from_slice(format!("--{boundary}\r\n").as_bytes());
        match filename {
            Some(filename) => body.extend_from_slice(
                format!(
                    "Content-Disposition: form-data; name=\"{name}\"; filename=\"{filename}\"\r\n\r\n"
                )
                .as_bytes(),
            ),
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{name}\"\r\n\r\n").as_bytes(),
            ),
        }
        body.extend_from_slice(data);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());
    body
}
