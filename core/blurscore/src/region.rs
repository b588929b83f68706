use crate::error::BlurScoreError;
use crate::face_detector::Detection;

/// Detections with a scale at or below this are too small to be a usable
/// face crop.
pub const MIN_FACE_SCALE: i32 = 50;

/// Half-open pixel rectangle `[min_x, max_x) × [min_y, max_y)`.
///
/// An unclamped rectangle may extend past the image; clamp with
/// [`Rect::clamp_to`] before reading pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Leftmost column (inclusive).
    pub min_x: i32,
    /// Top row (inclusive).
    pub min_y: i32,
    /// Right edge (exclusive).
    pub max_x: i32,
    /// Bottom edge (exclusive).
    pub max_y: i32,
}

impl Rect {
    /// Rectangle from its corner coordinates.
    pub fn new(min_x: i32, min_y: i32, max_x: i32, max_y: i32) -> Self {
        Self {
            min_x,
            min_y,
            max_x,
            max_y,
        }
    }

    /// Square frame centered on the detection, side `scale` (floor-halved).
    pub fn around(detection: &Detection) -> Self {
        let half = detection.scale / 2;
        Self {
            min_x: detection.col - half,
            min_y: detection.row - half,
            max_x: detection.col + half,
            max_y: detection.row + half,
        }
    }

    /// Horizontal extent; negative if the rectangle is inverted.
    pub fn width(&self) -> i32 {
        self.max_x - self.min_x
    }

    /// Vertical extent; negative if the rectangle is inverted.
    pub fn height(&self) -> i32 {
        self.max_y - self.min_y
    }

    /// True if the rectangle covers no pixels.
    pub fn is_empty(&self) -> bool {
        self.width() <= 0 || self.height() <= 0
    }

    /// Intersection with the image extent `[0, width) × [0, height)`.
    /// `None` if nothing is left.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        let clamped = Rect {
            min_x: self.min_x.max(0),
            min_y: self.min_y.max(0),
            max_x: self.max_x.min(width.min(i32::MAX as u32) as i32),
            max_y: self.max_y.min(height.min(i32::MAX as u32) as i32),
        };
        if clamped.is_empty() {
            None
        } else {
            Some(clamped)
        }
    }

    /// True if pixel (`x`, `y`) lies inside.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.min_x && x < self.max_x && y >= self.min_y && y < self.max_y
    }
}

/// A qualifying face: the detection, its full frame, and the part of that
/// frame inside the image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FaceRegion {
    /// The detection this region was derived from.
    pub detection: Detection,
    /// Frame derived from the detection, possibly extending past the image.
    pub frame: Rect,
    /// `frame` clamped to the image bounds. Never empty.
    pub visible: Rect,
}

/// Minimum-size policy applied before any region is selected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SelectionPolicy {
    /// A detection qualifies only if its scale is strictly greater than this.
    pub min_scale: i32,
}

impl Default for SelectionPolicy {
    fn default() -> Self {
        Self {
            min_scale: MIN_FACE_SCALE,
        }
    }
}

impl SelectionPolicy {
    fn qualify(&self, detection: &Detection, width: u32, height: u32) -> Option<FaceRegion> {
        if detection.scale <= self.min_scale {
            return None;
        }
        let frame = Rect::around(detection);
        let visible = frame.clamp_to(width, height)?;
        Some(FaceRegion {
            detection: *detection,
            frame,
            visible,
        })
    }
}

/// Every qualifying detection, in detector order.
pub fn select_qualifying(
    detections: &[Detection],
    width: u32,
    height: u32,
    policy: &SelectionPolicy,
) -> Result<Vec<FaceRegion>, BlurScoreError> {
    if detections.is_empty() {
        return Err(BlurScoreError::NoFaceDetected);
    }

    let regions: Vec<FaceRegion> = detections
        .iter()
        .filter_map(|det| policy.qualify(det, width, height))
        .collect();

    if regions.is_empty() {
        log::warn!(
            "{} detection(s) discarded, none larger than scale {} inside {}x{}",
            detections.len(),
            policy.min_scale,
            width,
            height
        );
        return Err(BlurScoreError::NoQualifyingFace);
    }
    if regions.len() < detections.len() {
        log::debug!(
            "{} of {} detection(s) qualify",
            regions.len(),
            detections.len()
        );
    }

    Ok(regions)
}

/// The qualifying detection with the greatest scale. Ties keep the earliest.
pub fn select_largest(
    detections: &[Detection],
    width: u32,
    height: u32,
    policy: &SelectionPolicy,
) -> Result<FaceRegion, BlurScoreError> {
    let regions = select_qualifying(detections, width, height, policy)?;
    let mut largest = regions[0];
    for region in &regions[1..] {
        if region.detection.scale > largest.detection.scale {
            largest = *region;
        }
    }
    Ok(largest)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn det(row: i32, col: i32, scale: i32) -> Detection {
        Detection {
            row,
            col,
            scale,
            confidence: 1.0,
        }
    }

    #[test]
    fn frame_uses_floor_half_scale() {
        let rect = Rect::around(&det(100, 80, 61));
        assert_eq!(rect, Rect::new(50, 70, 110, 130));
    }

    #[test]
    fn clamp_keeps_inside_rect() {
        let rect = Rect::new(10, 10, 50, 60);
        assert_eq!(rect.clamp_to(100, 100), Some(rect));
    }

    #[test]
    fn clamp_trims_to_bounds() {
        let rect = Rect::new(-20, -5, 130, 90);
        assert_eq!(rect.clamp_to(100, 80), Some(Rect::new(0, 0, 100, 80)));
    }

    #[test]
    fn clamp_outside_is_none() {
        assert_eq!(Rect::new(120, 0, 180, 60).clamp_to(100, 100), None);
        assert_eq!(Rect::new(-60, -60, 0, 0).clamp_to(100, 100), None);
    }

    #[test]
    fn empty_detections_is_no_face() {
        let err = select_qualifying(&[], 100, 100, &SelectionPolicy::default()).unwrap_err();
        assert!(matches!(err, BlurScoreError::NoFaceDetected));
    }

    #[test]
    fn threshold_is_exclusive() {
        let dets = [det(50, 50, 50), det(50, 50, 20)];
        let err = select_qualifying(&dets, 100, 100, &SelectionPolicy::default()).unwrap_err();
        assert!(matches!(err, BlurScoreError::NoQualifyingFace));

        let ok = select_qualifying(&[det(50, 50, 51)], 100, 100, &SelectionPolicy::default());
        assert_eq!(ok.unwrap().len(), 1);
    }

    #[test]
    fn detection_fully_outside_does_not_qualify() {
        let dets = [det(-200, -200, 80)];
        let err = select_largest(&dets, 100, 100, &SelectionPolicy::default()).unwrap_err();
        assert!(matches!(err, BlurScoreError::NoQualifyingFace));
    }

    #[test]
    fn largest_wins() {
        let dets = [det(40, 40, 60), det(100, 100, 90), det(150, 150, 70)];
        let region = select_largest(&dets, 300, 300, &SelectionPolicy::default()).unwrap();
        assert_eq!(region.detection.scale, 90);
        assert_eq!(region.visible, Rect::new(55, 55, 145, 145));
    }

    #[test]
    fn tie_keeps_first_in_detector_order() {
        let dets = [det(40, 40, 70), det(200, 200, 70)];
        let region = select_largest(&dets, 300, 300, &SelectionPolicy::default()).unwrap();
        assert_eq!(region.detection.col, 40);
    }

    #[test]
    fn small_faces_ignored_when_choosing_largest() {
        // The largest qualifying face is chosen among those above the floor only.
        let dets = [det(40, 40, 30), det(150, 150, 55)];
        let region = select_largest(&dets, 300, 300, &SelectionPolicy::default()).unwrap();
        assert_eq!(region.detection.scale, 55);
    }

    #[test]
    fn qualifying_preserves_order() {
        let dets = [det(200, 200, 80), det(10, 10, 10), det(60, 60, 100)];
        let regions = select_qualifying(&dets, 300, 300, &SelectionPolicy::default()).unwrap();
        let scales: Vec<i32> = regions.iter().map(|r| r.detection.scale).collect();
        assert_eq!(scales, vec![80, 100]);
    }

    #[test]
    fn edge_face_keeps_unclamped_frame() {
        let dets = [det(10, 10, 60)];
        let region = select_largest(&dets, 100, 100, &SelectionPolicy::default()).unwrap();
        assert_eq!(region.frame, Rect::new(-20, -20, 40, 40));
        assert_eq!(region.visible, Rect::new(0, 0, 40, 40));
    }

    #[test]
    fn custom_policy_lowers_floor() {
        let dets = [det(50, 50, 30)];
        let policy = SelectionPolicy { min_scale: 20 };
        assert!(select_largest(&dets, 100, 100, &policy).is_ok());
    }
}
