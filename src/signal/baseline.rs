use super::polyfit::Polynomial;
use crate::error::ProcessError;

/// Subtract a least-squares polynomial of degree `order`, fitted against the
/// sample index, from `y`.
///
/// Needs more than `order + 1` points; shorter input is an
/// [`ProcessError::InsufficientSeriesLength`].
pub fn fit(y: &[f64], order: usize) -> Result<Vec<f64>, ProcessError> {
    let too_short = ProcessError::InsufficientSeriesLength {
        len: y.len(),
        required: order + 1,
    };
    if y.len() <= order + 1 {
        return Err(too_short);
    }

    let x: Vec<f64> = (0..y.len()).map(|i| i as f64).collect();
    let poly = Polynomial::fit(&x, y, order).ok_or(too_short)?;
    Ok(x.iter().zip(y).map(|(&xi, &yi)| yi - poly.eval(xi)).collect())
}

/// Like [`fit`], but a series too short to correct is returned unchanged.
pub fn correct(y: &[f64], order: usize) -> Vec<f64> {
    fit(y, order).unwrap_or_else(|e| {
        log::debug!("baseline correction skipped: {e}");
        y.to_vec()
    })
}
