use image::codecs::png::PngEncoder;
use image::{DynamicImage, ImageEncoder, ImageFormat, RgbaImage};

use crate::error::BlurScoreError;

/// Detect the input image format from the raw bytes.
pub(crate) fn detect_format(input: &[u8]) -> Result<ImageFormat, BlurScoreError> {
    if input.is_empty() {
        return Err(BlurScoreError::EmptyInput);
    }
    image::guess_format(input).map_err(|e| BlurScoreError::DecodeError(e.to_string()))
}

/// Decode input bytes (JPEG, PNG, WebP, BMP or GIF) into an 8-bit RGBA buffer.
///
/// Higher bit depths are scaled down to 0–255 per channel.
pub(crate) fn decode_image(input: &[u8]) -> Result<RgbaImage, BlurScoreError> {
    let format = detect_format(input)?;
    let decoded: DynamicImage = image::load_from_memory_with_format(input, format)
        .map_err(|e| BlurScoreError::DecodeError(e.to_string()))?;

    if decoded.width() == 0 || decoded.height() == 0 {
        return Err(BlurScoreError::ZeroDimensions);
    }

    log::debug!(
        "decoded {:?} image {}x{} ({} bytes)",
        format,
        decoded.width(),
        decoded.height(),
        input.len()
    );
    Ok(decoded.to_rgba8())
}

/// 8-bit grayscale rendition handed to face detectors.
pub(crate) fn detector_input(image: &RgbaImage) -> image::GrayImage {
    image::imageops::grayscale(image)
}

/// Encode an RGBA buffer as PNG.
pub(crate) fn encode_png(image: &RgbaImage) -> Result<Vec<u8>, BlurScoreError> {
    let mut buffer = Vec::new();
    PngEncoder::new(&mut buffer)
        .write_image(
            image.as_raw(),
            image.width(),
            image.height(),
            image::ExtendedColorType::Rgba8,
        )
        .map_err(|e| BlurScoreError::EncodeError(e.to_string()))?;
    Ok(buffer)
}
