/// A candidate face reported by a detector.
///
/// Position is the center of the face in pixel coordinates; `scale` is the
/// diameter-like side length of the square the detector matched.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Detection {
    /// Row (y) of the face center.
    pub row: i32,
    /// Column (x) of the face center.
    pub col: i32,
    /// Side length of the detected face square (pixels).
    pub scale: i32,
    /// Detector-specific confidence. Carried through, never used for selection.
    pub confidence: f64,
}

impl Detection {
    /// Build a detection from a top-left anchored bounding box.
    pub fn from_bbox(x: i32, y: i32, width: u32, height: u32, confidence: f64) -> Self {
        Self {
            row: y + (height / 2) as i32,
            col: x + (width / 2) as i32,
            scale: width.max(height) as i32,
            confidence,
        }
    }
}

/// Pluggable face detection backend.
///
/// Implement this trait to provide a custom face detector (cascade, ONNX,
/// dlib, etc.) and pass it to [`crate::SharpnessAnalyzer::new`]. Any model
/// state must be read-only after construction: the analyzer calls `detect`
/// from whichever thread serves the request.
pub trait FaceDetector: Send + Sync {
    /// Detect faces in a row-major grayscale buffer of `width` × `height` bytes.
    ///
    /// Output order is preserved by the region selector when breaking ties.
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Detection>;
}

/// A shared detector, so one loaded model can back several analyzers.
impl<T: FaceDetector + ?Sized> FaceDetector for std::sync::Arc<T> {
    fn detect(&self, gray: &[u8], width: u32, height: u32) -> Vec<Detection> {
        (**self).detect(gray, width, height)
    }
}
