use image::{Rgba, RgbaImage};

use crate::codec::{decode_image, detector_input, encode_png};
use crate::compose::{crop_region, draw_rects};
use crate::error::BlurScoreError;
use crate::face_detector::FaceDetector;
use crate::laplacian::laplacian_variance;
use crate::luminance::to_luminance;
use crate::region::{select_largest, select_qualifying, FaceRegion, Rect, SelectionPolicy};
use crate::FaceScore;

/// Sharpness of an already decoded buffer.
pub(crate) fn score_pixels(image: &RgbaImage) -> f64 {
    laplacian_variance(&to_luminance(image))
}

/// Sharpness of the pixels inside `rect` only.
pub(crate) fn score_rect(image: &RgbaImage, rect: Rect) -> f64 {
    score_pixels(&crop_region(image, rect))
}

/// Whole-image pipeline: decode → luminance → Laplacian variance.
pub(crate) fn whole_image_pipeline(input: &[u8]) -> Result<f64, BlurScoreError> {
    let image = decode_image(input)?;
    let score = score_pixels(&image);
    log::debug!(
        "whole-image sharpness {:.3} for {}x{}",
        score,
        image.width(),
        image.height()
    );
    Ok(score)
}

/// Decode and run the detector, returning the image with its raw detections
/// filtered down to every qualifying face.
pub(crate) fn detect_faces(
    input: &[u8],
    detector: &dyn FaceDetector,
    policy: &SelectionPolicy,
) -> Result<(RgbaImage, Vec<FaceRegion>), BlurScoreError> {
    let image = decode_image(input)?;
    let gray = detector_input(&image);
    let detections = detector.detect(gray.as_raw(), gray.width(), gray.height());
    log::debug!("detector returned {} face(s)", detections.len());

    let regions = select_qualifying(&detections, image.width(), image.height(), policy)?;
    Ok((image, regions))
}

/// Score each qualifying face on its clamped rectangle.
pub(crate) fn face_scores(image: &RgbaImage, regions: &[FaceRegion]) -> Vec<FaceScore> {
    regions
        .iter()
        .map(|region| {
            let score = score_rect(image, region.visible);
            log::debug!("face {:?} sharpness {:.3}", region.visible, score);
            FaceScore {
                region: *region,
                score,
            }
        })
        .collect()
}

/// Face-restricted pipeline: the best score among qualifying faces.
pub(crate) fn face_region_pipeline(
    input: &[u8],
    detector: &dyn FaceDetector,
    policy: &SelectionPolicy,
) -> Result<f64, BlurScoreError> {
    let (image, regions) = detect_faces(input, detector, policy)?;
    let best = face_scores(&image, &regions)
        .iter()
        .map(|face| face.score)
        .fold(0.0_f64, f64::max);
    Ok(best)
}

/// Crop the largest qualifying face and encode it as PNG.
pub(crate) fn crop_largest_pipeline(
    input: &[u8],
    detector: &dyn FaceDetector,
    policy: &SelectionPolicy,
) -> Result<Vec<u8>, BlurScoreError> {
    let image = decode_image(input)?;
    let gray = detector_input(&image);
    let detections = detector.detect(gray.as_raw(), gray.width(), gray.height());
    log::debug!("detector returned {} face(s)", detections.len());

    let largest = select_largest(&detections, image.width(), image.height(), policy)?;
    log::debug!("cropping largest face {:?}", largest.visible);
    encode_png(&crop_region(&image, largest.visible))
}

/// Outline every qualifying face and encode the annotated image as PNG.
pub(crate) fn draw_faces_pipeline(
    input: &[u8],
    detector: &dyn FaceDetector,
    policy: &SelectionPolicy,
    thickness: u32,
    color: Rgba<u8>,
) -> Result<Vec<u8>, BlurScoreError> {
    let (image, regions) = detect_faces(input, detector, policy)?;
    let frames: Vec<Rect> = regions.iter().map(|region| region.frame).collect();
    encode_png(&draw_rects(&image, &frames, thickness, color))
}
