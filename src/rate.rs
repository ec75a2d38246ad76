//! External gold price values
//!
//! Fetching is the host's job; this module only interprets what the feed
//! returns and derives how much a golden bug is worth.

use thiserror::Error;

/// Rate assumed before the first feed update arrives
pub const DEFAULT_RATE: f64 = 5000.0;
/// Rate the feed collaborator reports when it has nothing recent
pub const FALLBACK_RATE: f64 = 10500.0;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum RateError {
    #[error("empty rate value")]
    Empty,
    #[error("malformed rate value: {0:?}")]
    Malformed(String),
    #[error("rate must be positive, got {0}")]
    NonPositive(f64),
}

/// Parse a feed price such as `"5123,45"` or `"10 500,00"`
pub fn parse_rate(raw: &str) -> Result<f64, RateError> {
    let cleaned: String = raw
        .trim()
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return Err(RateError::Empty);
    }
    let rate: f64 = cleaned
        .parse()
        .map_err(|_| RateError::Malformed(raw.to_string()))?;
    if !rate.is_finite() {
        return Err(RateError::Malformed(raw.to_string()));
    }
    if rate <= 0.0 {
        return Err(RateError::NonPositive(rate));
    }
    Ok(rate)
}

/// Golden bug value: one point per started hundred, never below 1
pub fn points_per_golden(rate: f64) -> u32 {
    let points = (rate / 100.0).ceil();
    if points.is_finite() && points >= 1.0 {
        points as u32
    } else {
        1
    }
}
