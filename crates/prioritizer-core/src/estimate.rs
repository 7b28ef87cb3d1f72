//! Duration estimation.
//!
//! When a task carries no `{pH:MM}` tag its duration is estimated from the
//! raw Complexity, Risk and Surprise ratings:
//!
//! ```text
//! estimated = BASE_TIME[complexity] × (1 + risk × 0.3) × (1 + surprise × 0.2)
//! ```
//!
//! The formula takes the raw 0-3 ratings, not their normalized values.

use crate::config::TimeThresholds;
use crate::error::EngineError;
use crate::rating::Rating;

/// Base minutes per complexity rating.
pub const BASE_TIME: [u32; 4] = [15, 45, 90, 180];

const RISK_FACTOR: f64 = 0.3;
const SURPRISE_FACTOR: f64 = 0.2;

/// Estimate a task duration in whole minutes.
///
/// # Errors
///
/// Returns `IncompleteEstimationInput` if any input is outside 0-3.
pub fn estimate_minutes(complexity: u8, risk: u8, surprise: u8) -> Result<u32, EngineError> {
    let check = |value: u8, field: &'static str| {
        if value <= 3 {
            Ok(value)
        } else {
            Err(EngineError::IncompleteEstimationInput { field })
        }
    };
    let complexity = check(complexity, "complexity")?;
    let risk = check(risk, "risk")?;
    let surprise = check(surprise, "surprise")?;

    let base = f64::from(BASE_TIME[usize::from(complexity)]);
    let estimated = base
        * (1.0 + f64::from(risk) * RISK_FACTOR)
        * (1.0 + f64::from(surprise) * SURPRISE_FACTOR);
    Ok(estimated.round() as u32)
}

/// Time rating for a duration: each threshold is an inclusive upper bound.
pub fn time_rating_for(minutes: u32, thresholds: &TimeThresholds) -> Rating {
    if minutes <= thresholds.low {
        Rating::NONE
    } else if minutes <= thresholds.med {
        Rating::LOW
    } else if minutes <= thresholds.high {
        Rating::MEDIUM
    } else {
        Rating::HIGH
    }
}

/// Minutes after which work should pause for a check-in.
pub fn stop_rule_minutes(minutes: u32, factor: f64) -> u32 {
    (f64::from(minutes) * factor.max(0.0)).round() as u32
}
