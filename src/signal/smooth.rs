use nalgebra::DMatrix;

use super::polyfit::Polynomial;

/// Fit the requested window to a series of `len` samples.
///
/// 1. A window at least as long as the series shrinks to `len - 1`.
/// 2. An even window grows by one.
/// 3. A window no larger than `order` cannot hold the polynomial: `None`.
pub fn adjust_window(len: usize, window: usize, order: usize) -> Option<usize> {
    let mut window = window;
    if window >= len {
        window = len.saturating_sub(1);
    }
    if window % 2 == 0 {
        window += 1;
    }
    if window <= order || window > len {
        return None;
    }
    Some(window)
}

/// Savitzky–Golay smoothing.
///
/// Interior samples are convolved with the least-squares coefficients of the
/// window; the first and last half-window are taken from a polynomial fitted
/// to the first and last full window. When the window cannot be fitted
/// (see [`adjust_window`]) the input is returned unchanged.
pub fn savitzky_golay(y: &[f64], window: usize, order: usize) -> Vec<f64> {
    let Some(window) = adjust_window(y.len(), window, order) else {
        log::debug!(
            "smoothing skipped: window {window} too small for order {order} on {} points",
            y.len()
        );
        return y.to_vec();
    };
    let Some(coeffs) = coefficients(window, order) else {
        log::warn!("smoothing skipped: singular Savitzky-Golay system (window {window}, order {order})");
        return y.to_vec();
    };

    let n = y.len();
    let half = window / 2;
    let mut out = vec![0.0; n];

    for i in half..n - half {
        out[i] = coeffs
            .iter()
            .zip(&y[i - half..=i + half])
            .map(|(c, v)| c * v)
            .sum();
    }

    let x: Vec<f64> = (0..window).map(|i| i as f64).collect();
    let edges = Polynomial::fit(&x, &y[..window], order)
        .zip(Polynomial::fit(&x, &y[n - window..], order));
    let Some((left, right)) = edges else {
        return y.to_vec();
    };
    for i in 0..half {
        out[i] = left.eval(i as f64);
        out[n - half + i] = right.eval((window - half + i) as f64);
    }

    out
}

/// Weights that, applied to a window, give the value at its centre of the
/// least-squares polynomial through it.
fn coefficients(window: usize, order: usize) -> Option<Vec<f64>> {
    let half = (window / 2) as f64;
    let vander = DMatrix::from_fn(window, order + 1, |i, j| (i as f64 - half).powi(j as i32));
    let pinv = vander.pseudo_inverse(1e-12).ok()?;
    Some(pinv.row(0).iter().copied().collect())
}
