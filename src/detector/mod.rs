mod decode;
mod engine;
mod types;

pub use decode::decode_image_bytes;
pub use engine::{DetectionEngine, OnnxYoloEngine};
pub use types::{BoundingBox, COCO_CLASSES, Detection, RawDetection};

use crate::{Result, config::DetectorConfig};
use image::DynamicImage;
use tracing::debug;

/// Object detection service: runs the engine over a decoded frame and
/// attaches class labels and the monocular distance estimate.
pub struct ObjectDetector {
    engine: Box<dyn DetectionEngine>,
    focal_length: f32,
    average_object_size: f32,
}

impl ObjectDetector {
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        let engine = OnnxYoloEngine::load(config)?;
        Ok(Self::with_engine(Box::new(engine), config))
    }

    pub fn with_engine(engine: Box<dyn DetectionEngine>, config: &DetectorConfig) -> Self {
        Self {
            engine,
            focal_length: config.focal_length,
            average_object_size: config.average_object_size,
        }
    }

    pub fn detect(&mut self, image: &DynamicImage) -> Result<Vec<Detection>> {
        let rgb = image.to_rgb8();
        let raw = self.engine.infer(&rgb)?;

        debug!("Detected {} objects", raw.len());

        Ok(raw
            .into_iter()
            .map(|r| {
                let distance = self.estimate_distance(r.bbox.width(), r.bbox.height());
                Detection {
                    class_name: COCO_CLASSES.get(r.class_id).copied().unwrap_or("object").to_string(),
                    confidence: r.score,
                    center: r.bbox.center(),
                    bbox: r.bbox,
                    distance,
                }
            })
            .collect())
    }

    /// Similar-triangles estimate from an assumed real-world object size and
    /// a fixed focal length. Uncalibrated, so meters are rough at best.
    fn estimate_distance(&self, width: f32, height: f32) -> f32 {
        let pixel_size = width.max(height);
        if pixel_size <= f32::EPSILON {
            return 0.0;
        }
        self.average_object_size * self.focal_length / pixel_size
    }
}

/// Natural-language summaries of detections, one per object.
pub fn describe_detections(detections: &[Detection]) -> Vec<String> {
    detections
        .iter()
        .map(|det| {
            if det.distance > 0.0 {
                format!(
                    "{} ({:.0}% confidence) {:.1} meters away",
                    det.class_name,
                    det.confidence * 100.0,
                    det.distance
                )
            } else {
                format!(
                    "{} ({:.0}% confidence) nearby",
                    det.class_name,
                    det.confidence * 100.0
                )
            }
        })
        .collect()
}
