//! Derived series, ready to be plotted

/// Minutes between consecutive timestamps (expressed in seconds).
/// First element is 0 by definition, empty input gives an empty output.
pub fn intervals_minutes(t: &[f64]) -> Vec<f64> {
    if t.is_empty() {
        return Vec::new();
    }
    let mut ret = Vec::with_capacity(t.len());
    ret.push(0.0);
    ret.extend(t.windows(2).map(|w| (w[1] - w[0]) / 60.0));
    ret
}

/// Constant serie, used to draw pings at a fixed height
pub fn constant(len: usize, value: f64) -> Vec<f64> {
    vec![value; len]
}
