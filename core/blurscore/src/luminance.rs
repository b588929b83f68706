use image::RgbaImage;

/// ITU-R BT.601 luma weights.
const RED_WEIGHT: f64 = 0.299;
const GREEN_WEIGHT: f64 = 0.587;
const BLUE_WEIGHT: f64 = 0.114;

/// Floating-point intensity grid, one value per source pixel.
///
/// Values are stored row-major and keep full precision (no rounding or
/// clamping) for the variance computation downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceField {
    width: usize,
    height: usize,
    values: Vec<f64>,
}

impl LuminanceField {
    /// Build a field from row-major values. Returns `None` if the value count
    /// does not match `width * height`.
    pub fn from_values(width: usize, height: usize, values: Vec<f64>) -> Option<Self> {
        if values.len() != width * height {
            return None;
        }
        Some(Self {
            width,
            height,
            values,
        })
    }

    /// Number of columns.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Number of rows.
    pub fn height(&self) -> usize {
        self.height
    }

    /// True for a 0×0 (or zero-width/height) field.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Intensity at column `x`, row `y`.
    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 {
        self.values[y * self.width + x]
    }
}

/// Reduce an RGBA buffer to BT.601 luminance. Alpha is ignored.
///
/// A 0×0 buffer yields an empty field; callers decide whether that is an error.
pub fn to_luminance(image: &RgbaImage) -> LuminanceField {
    let (width, height) = (image.width() as usize, image.height() as usize);
    let values = image
        .pixels()
        .map(|pixel| {
            let [r, g, b, _] = pixel.0;
            RED_WEIGHT * r as f64 + GREEN_WEIGHT * g as f64 + BLUE_WEIGHT * b as f64
        })
        .collect();

    LuminanceField {
        width,
        height,
        values,
    }
}
