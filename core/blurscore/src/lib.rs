//! Photo sharpness scoring: Laplacian variance over the whole image or over
//! detected faces.
//!
//! # Example
//!
//! ```no_run
//! let raw_bytes = std::fs::read("photo.jpg").unwrap();
//! let score = blurscore::score_whole_image(&raw_bytes).unwrap();
//! println!("sharpness: {score:.2}");
//! ```
#![warn(missing_docs)]

mod analyze;
mod codec;
mod compose;
/// TOML configuration for detector, face policy and annotation.
pub mod config;
mod error;
/// Face detection traits and data types.
pub mod face_detector;
mod laplacian;
mod luminance;
mod region;
#[cfg(feature = "rustface")]
/// Built-in SeetaFace-based face detector backend.
pub mod rustface_backend;

use image::Rgba;

/// Crop and outline operations on RGBA buffers.
pub use compose::{crop_region, draw_rect, draw_rects, OUTLINE_COLOR};
/// Service configuration.
pub use config::BlurScoreConfig;
/// Error type returned by blurscore operations.
pub use error::BlurScoreError;
/// Face detection trait and detection type.
pub use face_detector::{Detection, FaceDetector};
/// Laplacian variance scorer.
pub use laplacian::laplacian_variance;
/// Grayscale reduction.
pub use luminance::{to_luminance, LuminanceField};
/// Face region selection.
pub use region::{
    select_largest, select_qualifying, FaceRegion, Rect, SelectionPolicy, MIN_FACE_SCALE,
};
#[cfg(feature = "rustface")]
/// Built-in detector that loads a SeetaFace model file.
pub use rustface_backend::RustfaceDetector;

/// Sharpness of one qualifying face.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceScore {
    /// The face the score was measured on.
    pub region: FaceRegion,

    /// Laplacian variance of the face's visible rectangle.
    pub score: f64,
}

/// Score the sharpness of an encoded image (JPEG, PNG, WebP, BMP or GIF).
///
/// Higher is sharper. A perfectly uniform image scores exactly 0; that is a
/// valid result, not an error.
pub fn score_whole_image(input: &[u8]) -> Result<f64, BlurScoreError> {
    analyze::whole_image_pipeline(input)
}

/// Face-aware sharpness analysis.
///
/// Holds a face detector plus the selection and annotation settings. All
/// state is immutable after construction, so one analyzer can be shared
/// across threads and serve requests concurrently.
///
/// ```no_run
/// use blurscore::{Detection, FaceDetector, SharpnessAnalyzer};
///
/// struct MyDetector;
/// impl FaceDetector for MyDetector {
///     fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Detection> {
///         // Your detection logic here
///         vec![]
///     }
/// }
///
/// let bytes = std::fs::read("portrait.jpg").unwrap();
/// let analyzer = SharpnessAnalyzer::new(Box::new(MyDetector));
/// let score = analyzer.score_face_region(&bytes);
/// ```
pub struct SharpnessAnalyzer {
    detector: Box<dyn FaceDetector>,
    policy: SelectionPolicy,
    thickness: u32,
    color: Rgba<u8>,
}

impl SharpnessAnalyzer {
    /// Create an analyzer around a face detector with default settings:
    /// faces must exceed [`MIN_FACE_SCALE`], outlines are 1px red.
    pub fn new(detector: Box<dyn FaceDetector>) -> Self {
        Self {
            detector,
            policy: SelectionPolicy::default(),
            thickness: 1,
            color: OUTLINE_COLOR,
        }
    }

    /// Create an analyzer around `detector`, taking selection and
    /// annotation settings from `config`.
    pub fn with_config(detector: Box<dyn FaceDetector>, config: &BlurScoreConfig) -> Self {
        Self::new(detector)
            .selection_policy(config.selection.policy())
            .thickness(config.annotation.thickness)
            .color(Rgba(config.annotation.color))
    }

    /// Build the analyzer with the built-in SeetaFace detector, loading the
    /// model file named in `config.detector.model_path`.
    #[cfg(feature = "rustface")]
    pub fn from_config(config: &BlurScoreConfig) -> Result<Self, BlurScoreError> {
        config.validate().map_err(BlurScoreError::Config)?;
        let detector = RustfaceDetector::from_config(&config.detector)?;
        Ok(Self::with_config(Box::new(detector), config))
    }

    /// Set the minimum-size policy for faces.
    pub fn selection_policy(mut self, policy: SelectionPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Set the outline thickness for [`Self::draw_face_rectangles`]
    /// (default: 1). Values below 1 are treated as 1.
    pub fn thickness(mut self, thickness: u32) -> Self {
        self.thickness = thickness.max(1);
        self
    }

    /// Set the outline color for [`Self::draw_face_rectangles`]
    /// (default: opaque red).
    pub fn color(mut self, color: Rgba<u8>) -> Self {
        self.color = color;
        self
    }

    /// Whole-image sharpness; the detector is not consulted.
    pub fn score_whole_image(&self, input: &[u8]) -> Result<f64, BlurScoreError> {
        score_whole_image(input)
    }

    /// Highest sharpness among the qualifying faces.
    ///
    /// Fails with [`BlurScoreError::NoFaceDetected`] when the detector finds
    /// nothing and [`BlurScoreError::NoQualifyingFace`] when every face is
    /// too small or lies outside the image.
    pub fn score_face_region(&self, input: &[u8]) -> Result<f64, BlurScoreError> {
        analyze::face_region_pipeline(input, self.detector.as_ref(), &self.policy)
    }

    /// Per-face sharpness for every qualifying face, in detector order.
    pub fn analyze_faces(&self, input: &[u8]) -> Result<Vec<FaceScore>, BlurScoreError> {
        let (image, regions) = analyze::detect_faces(input, self.detector.as_ref(), &self.policy)?;
        Ok(analyze::face_scores(&image, &regions))
    }

    /// PNG of the largest qualifying face, clamped to the image.
    pub fn crop_largest_face(&self, input: &[u8]) -> Result<Vec<u8>, BlurScoreError> {
        analyze::crop_largest_pipeline(input, self.detector.as_ref(), &self.policy)
    }

    /// PNG of the source image with every qualifying face outlined.
    ///
    /// Outlines are clipped to the canvas; faces partly outside the image
    /// only show their visible edges.
    pub fn draw_face_rectangles(&self, input: &[u8]) -> Result<Vec<u8>, BlurScoreError> {
        analyze::draw_faces_pipeline(
            input,
            self.detector.as_ref(),
            &self.policy,
            self.thickness,
            self.color,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_png(width: u32, height: u32) -> Vec<u8> {
        use image::codecs::png::PngEncoder;
        use image::ImageEncoder;
        use image::RgbImage;

        let mut img = RgbImage::new(width, height);
        for (x, y, pixel) in img.enumerate_pixels_mut() {
            *pixel = image::Rgb([
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                128,
            ]);
        }
        let mut buffer = Vec::new();
        let encoder = PngEncoder::new(&mut buffer);
        encoder
            .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
            .unwrap();
        buffer
    }

    struct NoFaces;

    impl FaceDetector for NoFaces {
        fn detect(&self, _gray: &[u8], _width: u32, _height: u32) -> Vec<Detection> {
            vec![]
        }
    }

    #[test]
    fn analyzer_defaults() {
        let analyzer = SharpnessAnalyzer::new(Box::new(NoFaces));
        assert_eq!(analyzer.policy.min_scale, MIN_FACE_SCALE);
        assert_eq!(analyzer.thickness, 1);
        assert_eq!(analyzer.color, OUTLINE_COLOR);
    }

    #[test]
    fn analyzer_takes_settings_from_config() {
        let mut config = BlurScoreConfig::default();
        config.selection.min_face_scale = 10;
        config.annotation.thickness = 5;
        config.annotation.color = [0, 255, 0, 255];
        let analyzer = SharpnessAnalyzer::with_config(Box::new(NoFaces), &config);
        assert_eq!(analyzer.policy.min_scale, 10);
        assert_eq!(analyzer.thickness, 5);
        assert_eq!(analyzer.color, Rgba([0, 255, 0, 255]));
    }

    #[test]
    fn zero_thickness_is_raised_to_one() {
        let analyzer = SharpnessAnalyzer::new(Box::new(NoFaces)).thickness(0);
        assert_eq!(analyzer.thickness, 1);
    }

    #[test]
    fn whole_image_ignores_detector() {
        let png = make_test_png(64, 48);
        let analyzer = SharpnessAnalyzer::new(Box::new(NoFaces));
        let via_analyzer = analyzer.score_whole_image(&png).unwrap();
        assert_eq!(via_analyzer, score_whole_image(&png).unwrap());
    }

    #[test]
    fn face_flows_report_no_face() {
        let png = make_test_png(64, 48);
        let analyzer = SharpnessAnalyzer::new(Box::new(NoFaces));
        assert!(matches!(
            analyzer.score_face_region(&png),
            Err(BlurScoreError::NoFaceDetected)
        ));
        assert!(matches!(
            analyzer.crop_largest_face(&png),
            Err(BlurScoreError::NoFaceDetected)
        ));
        assert!(matches!(
            analyzer.draw_face_rectangles(&png),
            Err(BlurScoreError::NoFaceDetected)
        ));
        assert!(matches!(
            analyzer.analyze_faces(&png),
            Err(BlurScoreError::NoFaceDetected)
        ));
    }

    #[test]
    fn decode_failure_precedes_detection() {
        let analyzer = SharpnessAnalyzer::new(Box::new(NoFaces));
        assert!(matches!(
            analyzer.score_face_region(b"not an image"),
            Err(BlurScoreError::DecodeError(_))
        ));
        assert!(matches!(
            analyzer.score_face_region(&[]),
            Err(BlurScoreError::EmptyInput)
        ));
    }

    #[test]
    fn analyzer_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SharpnessAnalyzer>();
    }

    #[cfg(feature = "rustface")]
    #[test]
    fn from_config_reports_missing_model() {
        let mut config = BlurScoreConfig::default();
        config.detector.model_path = "/nonexistent/model.bin".into();
        assert!(matches!(
            SharpnessAnalyzer::from_config(&config),
            Err(BlurScoreError::ModelLoad(_))
        ));
    }
}
