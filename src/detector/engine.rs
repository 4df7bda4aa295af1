use super::types::{BoundingBox, RawDetection};
use crate::{Result, config::DetectorConfig};
use image::{RgbImage, imageops::FilterType};
use ndarray::{Array4, ArrayViewD, Axis, IxDyn, s};
use ort::session::Session;
use ort::value::Value;
use tracing::info;

/// Model inference seam. Implementations turn an RGB frame into raw
/// class-id/score/box predictions in source-image coordinates.
pub trait DetectionEngine: Send {
    fn infer(&mut self, image: &RgbImage) -> Result<Vec<RawDetection>>;
}

/// YOLOv8 ONNX engine.
pub struct OnnxYoloEngine {
    session: Session,
    input_size: u32,
    confidence_threshold: f32,
    max_detections: usize,
}

impl OnnxYoloEngine {
    pub fn load(config: &DetectorConfig) -> Result<Self> {
        let builder = Session::builder()?.with_intra_threads(4)?;

        // CUDA is optional: register it when built with the `cuda` feature,
        // otherwise stay on CPU.
        #[cfg(feature = "cuda")]
        let builder = {
            use ort::execution_providers::CUDAExecutionProvider;
            match builder
                .clone()
                .with_execution_providers([CUDAExecutionProvider::default().build()])
            {
                Ok(with_cuda) => with_cuda,
                Err(_) => builder,
            }
        };

        let model_bytes = std::fs::read(&config.model_path)?;
        let session = builder.commit_from_memory(&model_bytes)?;

        info!("Loaded detection model from {}", config.model_path);

        Ok(Self {
            session,
            input_size: config.input_size,
            confidence_threshold: config.confidence_threshold,
            max_detections: config.max_detections,
        })
    }
}

impl DetectionEngine for OnnxYoloEngine {
    fn infer(&mut self, rgb: &RgbImage) -> Result<Vec<RawDetection>> {
        let imgsz = self.input_size as usize;
        let resized = image::imageops::resize(rgb, imgsz as u32, imgsz as u32, FilterType::Nearest);

        let mut input = Array4::<f32>::zeros((1, 3, imgsz, imgsz));
        for (x, y, pixel) in resized.enumerate_pixels() {
            input[[0, 0, y as usize, x as usize]] = pixel[0] as f32 / 255.0;
            input[[0, 1, y as usize, x as usize]] = pixel[1] as f32 / 255.0;
            input[[0, 2, y as usize, x as usize]] = pixel[2] as f32 / 255.0;
        }

        let input_shape = vec![1, 3, imgsz as i64, imgsz as i64];
        let input_tensor = Value::from_array((input_shape, input.into_raw_vec()))?;

        let outputs = self.session.run(ort::inputs![input_tensor])?;
        let (shape_out, data_out) = outputs[0].try_extract_tensor::<f32>()?;

        // YOLOv8 output layout: [1, 4 + classes, candidates].
        let dims: Vec<usize> = shape_out.into_iter().map(|&x| x as usize).collect();
        let array_view = ArrayViewD::from_shape(IxDyn(&dims), data_out)
            .map_err(|e| crate::Error::detection(format!("unexpected model output: {}", e)))?;
        let view = array_view.index_axis(Axis(0), 0);

        let num_candidates = view.shape()[1];
        let sx = rgb.width() as f32 / imgsz as f32;
        let sy = rgb.height() as f32 / imgsz as f32;

        let mut detections = Vec::new();

        for i in 0..num_candidates {
            let scores = view.slice(s![4.., i]);

            let mut class_id = 0usize;
            let mut max_score = f32::NEG_INFINITY;
            for (idx, &score) in scores.indexed_iter() {
                if score > max_score {
                    class_id = idx;
                    max_score = score;
                }
            }

            if max_score > self.confidence_threshold {
                let cx = view[[0, i]];
                let cy = view[[1, i]];
                let w = view[[2, i]];
                let h = view[[3, i]];

                detections.push(RawDetection {
                    class_id,
                    score: max_score,
                    bbox: BoundingBox {
                        x1: (cx - w / 2.0) * sx,
                        y1: (cy - h / 2.0) * sy,
                        x2: (cx + w / 2.0) * sx,
                        y2: (cy + h / 2.0) * sy,
                    },
                });
            }
        }

        detections.sort_unstable_by(|a, b| b.score.total_cmp(&a.score));
        detections.truncate(self.max_detections);
        Ok(detections)
    }
}
