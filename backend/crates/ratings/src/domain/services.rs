//! Domain Services
//!
//! Pure computations over ratings.

/// Arithmetic mean of rating values, rounded to one decimal.
///
/// Returns None for an empty slice; a store with no ratings has no
/// average, it is never reported as 0.
pub fn average_rating(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sum: i64 = values.iter().map(|&v| v as i64).sum();
    Some(round_one_decimal(sum as f64 / values.len() as f64))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
