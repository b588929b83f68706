use crate::luminance::LuminanceField;

/// Variance of the 4-neighbour Laplacian over the interior of `field`.
///
/// Kernel (unnormalized):
///
/// ```text
///  0  1  0
///  1 -4  1
///  0  1  0
/// ```
///
/// Fields with width or height ≤ 2 have no interior and score 0. Higher
/// values mean more high-frequency edge energy, i.e. a sharper image.
pub fn laplacian_variance(field: &LuminanceField) -> f64 {
    let (width, height) = (field.width(), field.height());
    if width <= 2 || height <= 2 {
        return 0.0;
    }

    let mut responses = Vec::with_capacity((width - 2) * (height - 2));
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let response = field.get(x, y) * -4.0
                + field.get(x, y - 1)
                + field.get(x, y + 1)
                + field.get(x - 1, y)
                + field.get(x + 1, y);
            responses.push(response);
        }
    }

    let count = responses.len() as f64;
    let mean = responses.iter().sum::<f64>() / count;
    let variance = responses
        .iter()
        .map(|&r| {
            let diff = r - mean;
            diff * diff
        })
        .sum::<f64>()
        / count;

    // Clears a possible negative zero.
    variance.abs()
}
