use std::sync::Arc;

uniffi::setup_scaffolding!();

#[derive(Debug, thiserror::Error, uniffi::Error)]
pub enum BlurScoreError {
    #[error("image data is empty")]
    EmptyInput,
    #[error("failed to decode image: {message}")]
    DecodeError { message: String },
    #[error("image dimensions are zero")]
    ZeroDimensions,
    #[error("no face detected")]
    NoFaceDetected,
    #[error("no face of usable size detected")]
    NoQualifyingFace,
    #[error("failed to encode image: {message}")]
    EncodeError { message: String },
    #[error("failed to load face model: {message}")]
    ModelLoad { message: String },
    #[error("invalid configuration: {message}")]
    Config { message: String },
}

impl From<blurscore::BlurScoreError> for BlurScoreError {
    fn from(e: blurscore::BlurScoreError) -> Self {
        match e {
            blurscore::BlurScoreError::EmptyInput => BlurScoreError::EmptyInput,
            blurscore::BlurScoreError::DecodeError(msg) => {
                BlurScoreError::DecodeError { message: msg }
            }
            blurscore::BlurScoreError::ZeroDimensions => BlurScoreError::ZeroDimensions,
            blurscore::BlurScoreError::NoFaceDetected => BlurScoreError::NoFaceDetected,
            blurscore::BlurScoreError::NoQualifyingFace => BlurScoreError::NoQualifyingFace,
            blurscore::BlurScoreError::EncodeError(msg) => {
                BlurScoreError::EncodeError { message: msg }
            }
            blurscore::BlurScoreError::ModelLoad(msg) => BlurScoreError::ModelLoad { message: msg },
            blurscore::BlurScoreError::Config(msg) => BlurScoreError::Config { message: msg },
        }
    }
}

/// Face detector and selection settings shared by the face operations.
#[derive(uniffi::Record)]
pub struct FaceOptions {
    pub model_path: String,
    pub min_face_scale: i32,
    pub thickness: u32,
}

#[derive(uniffi::Record)]
pub struct FaceScore {
    pub row: i32,
    pub col: i32,
    pub scale: i32,
    pub confidence: f64,
    pub score: f64,
}

/// Default options for the SeetaFace model at `model_path`.
#[uniffi::export]
pub fn default_face_options(model_path: String) -> FaceOptions {
    let config = blurscore::BlurScoreConfig::default();
    FaceOptions {
        model_path,
        min_face_scale: config.selection.min_face_scale,
        thickness: config.annotation.thickness,
    }
}

/// Sharpness of the whole image.
#[uniffi::export]
pub fn score_whole_image(input: Vec<u8>) -> Result<f64, BlurScoreError> {
    Ok(blurscore::score_whole_image(&input)?)
}

/// Face-aware analyzer. The face model is loaded once by the constructor and
/// reused by every call; instances are safe to share across threads.
#[derive(uniffi::Object)]
pub struct Analyzer {
    inner: blurscore::SharpnessAnalyzer,
}

#[uniffi::export]
impl Analyzer {
    #[uniffi::constructor]
    pub fn new(options: FaceOptions) -> Result<Arc<Self>, BlurScoreError> {
        let mut config = blurscore::BlurScoreConfig::default();
        config.detector.model_path = options.model_path.into();
        config.selection.min_face_scale = options.min_face_scale;
        config.annotation.thickness = options.thickness;
        let inner = blurscore::SharpnessAnalyzer::from_config(&config)?;
        Ok(Arc::new(Self { inner }))
    }

    /// Sharpness of the sharpest usable face.
    pub fn score_face_region(&self, input: Vec<u8>) -> Result<f64, BlurScoreError> {
        Ok(self.inner.score_face_region(&input)?)
    }

    /// Per-face sharpness in detector order.
    pub fn analyze_faces(&self, input: Vec<u8>) -> Result<Vec<FaceScore>, BlurScoreError> {
        let faces = self.inner.analyze_faces(&input)?;
        Ok(faces
            .iter()
            .map(|face| FaceScore {
                row: face.region.detection.row,
                col: face.region.detection.col,
                scale: face.region.detection.scale,
                confidence: face.region.detection.confidence,
                score: face.score,
            })
            .collect())
    }

    /// PNG crop of the largest usable face.
    pub fn crop_largest_face(&self, input: Vec<u8>) -> Result<Vec<u8>, BlurScoreError> {
        Ok(self.inner.crop_largest_face(&input)?)
    }

    /// PNG of the image with every usable face outlined.
    pub fn draw_face_rectangles(&self, input: Vec<u8>) -> Result<Vec<u8>, BlurScoreError> {
        Ok(self.inner.draw_face_rectangles(&input)?)
    }
}
