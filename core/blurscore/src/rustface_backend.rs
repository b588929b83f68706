use std::io::Read;
use std::path::Path;

use crate::config::DetectorConfig;
use crate::error::BlurScoreError;
use crate::face_detector::{Detection, FaceDetector};

/// Face detector backed by the `rustface` crate (SeetaFace engine).
///
/// The model file is parsed once on construction and kept read-only; each
/// [`FaceDetector::detect`] call runs on its own engine built from a clone of
/// the model, so one detector can serve concurrent requests.
pub struct RustfaceDetector {
    model: rustface::Model,
    params: DetectorConfig,
}

impl RustfaceDetector {
    /// Load the model file named by `config.model_path`.
    ///
    /// Detector settings are checked first, so a bad configuration fails here
    /// with [`BlurScoreError::Config`] rather than inside `detect`.
    pub fn from_config(config: &DetectorConfig) -> Result<Self, BlurScoreError> {
        config.validate().map_err(BlurScoreError::Config)?;
        let path: &Path = config.model_path.as_ref();
        let file = std::fs::File::open(path)
            .map_err(|e| BlurScoreError::ModelLoad(format!("{}: {}", path.display(), e)))?;
        let detector = Self::from_reader(std::io::BufReader::new(file), config.clone())?;
        log::info!("Loaded face model from {:?}", path);
        Ok(detector)
    }

    /// Parse a SeetaFace model from any reader.
    pub fn from_reader<R: Read>(reader: R, params: DetectorConfig) -> Result<Self, BlurScoreError> {
        params.validate().map_err(BlurScoreError::Config)?;
        let model =
            rustface::read_model(reader).map_err(|e| BlurScoreError::ModelLoad(e.to_string()))?;
        Ok(Self { model, params })
    }
}

impl FaceDetector for RustfaceDetector {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Detection> {
        let mut detector = rustface::create_detector_with_model(self.model.clone());
        detector.set_min_face_size(self.params.min_face_size);
        detector.set_max_face_size(self.params.max_face_size);
        detector.set_score_thresh(self.params.score_threshold);
        detector.set_pyramid_scale_factor(self.params.pyramid_scale_factor);
        detector.set_slide_window_step(
            self.params.slide_window_step,
            self.params.slide_window_step,
        );

        let faces = detector.detect(&rustface::ImageData::new(gray, width, height));

        faces
            .iter()
            .map(|face| {
                let bbox = face.bbox();
                Detection::from_bbox(bbox.x(), bbox.y(), bbox.width(), bbox.height(), face.score())
            })
            .collect()
    }
}
