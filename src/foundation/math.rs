pub(crate) const EPSILON: f64 = 1e-9;

/// Map `t` from the full `[0, 1]` range into the local parameter of the fragment
/// `[min_t, max_t]`.
pub(crate) fn map_t_to_fragment(min_t: f64, max_t: f64, t: f64) -> f64 {
    let span = max_t - min_t;
    if span.abs() < EPSILON {
        return 0.0;
    }
    (t - min_t) / span
}

/// Inverse of [`map_t_to_fragment`]: local fragment parameter back to the full range.
pub(crate) fn map_t_from_fragment(min_t: f64, max_t: f64, t: f64) -> f64 {
    min_t + (max_t - min_t) * t
}
