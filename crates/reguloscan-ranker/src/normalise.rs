//! Score normalisation functions.

/// Min-max normalisation into [0, 1].
///
/// Missing or non-finite input maps to 0.0, as does an empty or inverted
/// range (`max_val <= min_val`).
pub fn minmax_normalise(value: Option<f64>, min_val: f64, max_val: f64) -> f64 {
    let Some(value) = value else {
        return 0.0;
    };
    let span = max_val - min_val;
    if !value.is_finite() || !span.is_finite() || span < 1e-12 {
        return 0.0;
    }
    let normed = ((value - min_val) / span).clamp(0.0, 1.0);
    if normed.is_nan() { 0.0 } else { normed }
}
