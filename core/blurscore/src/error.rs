use thiserror::Error;

#[derive(Debug, Error)]
pub enum BlurScoreError {
    #[error("image data is empty")]
    EmptyInput,

    #[error("failed to decode image: {0}")]
    DecodeError(String),

    #[error("image dimensions are zero")]
    ZeroDimensions,

    #[error("no face detected")]
    NoFaceDetected,

    #[error("no face of usable size detected")]
    NoQualifyingFace,

    #[error("failed to encode image: {0}")]
    EncodeError(String),

    #[error("failed to load face model: {0}")]
    ModelLoad(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}

impl BlurScoreError {
    /// Stable machine-readable code for this error kind, for host bindings.
    pub fn code(&self) -> &'static str {
        match self {
            BlurScoreError::EmptyInput => "EMPTY_INPUT",
            BlurScoreError::DecodeError(_) => "DECODE_ERROR",
            BlurScoreError::ZeroDimensions => "ZERO_DIMENSIONS",
            BlurScoreError::NoFaceDetected => "NO_FACE_DETECTED",
            BlurScoreError::NoQualifyingFace => "NO_QUALIFYING_FACE",
            BlurScoreError::EncodeError(_) => "ENCODE_ERROR",
            BlurScoreError::ModelLoad(_) => "MODEL_LOAD",
            BlurScoreError::Config(_) => "CONFIG",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_distinguish_face_and_decode_failures() {
        assert_eq!(BlurScoreError::NoFaceDetected.code(), "NO_FACE_DETECTED");
        assert_eq!(BlurScoreError::NoQualifyingFace.code(), "NO_QUALIFYING_FACE");
        assert_eq!(
            BlurScoreError::DecodeError("bad header".into()).code(),
            "DECODE_ERROR"
        );
        assert_eq!(BlurScoreError::EmptyInput.code(), "EMPTY_INPUT");
    }

    #[test]
    fn decode_failure_from_library_carries_code() {
        let err = crate::score_whole_image(b"not an image").unwrap_err();
        assert_eq!(err.code(), "DECODE_ERROR");
    }
}
