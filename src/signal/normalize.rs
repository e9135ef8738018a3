/// Rescale to `[0, 1]`. `None` for empty or constant input, where there is
/// no range to scale by.
pub fn min_max(values: &[f64]) -> Option<Vec<f64>> {
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let range = max - min;
    if !range.is_finite() || range.abs() < f64::EPSILON {
        return None;
    }
    Some(values.iter().map(|&v| (v - min) / range).collect())
}
