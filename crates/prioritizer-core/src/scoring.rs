//! Weighted category scoring.
//!
//! Each category score is the weighted mean of its normalized ratings:
//!
//! ```text
//! score = Σ(weight_i × rating_i) / Σ(weight_i)
//! ```
//!
//! Only the relative weights matter. Clarity is not scored here; its two
//! ratings map straight to symbols.

use serde::{Deserialize, Serialize};

use crate::config::WeightConfig;
use crate::error::EngineError;
use crate::rating::NormalizedRatings;

/// Weighted mean of `ratings`, clamped to [0, 1].
pub fn score_category(ratings: &[f64], weights: &[f64]) -> Result<f64, EngineError> {
    weighted_mean("category", ratings, weights)
}

fn weighted_mean(category: &str, ratings: &[f64], weights: &[f64]) -> Result<f64, EngineError> {
    if ratings.len() != weights.len() {
        return Err(EngineError::config(
            category,
            format!("{} ratings but {} weights", ratings.len(), weights.len()),
        ));
    }

    if let Some(bad) = weights.iter().find(|w| !w.is_finite()) {
        return Err(EngineError::config(
            category,
            format!("weights must be finite, got {bad}"),
        ));
    }

    let total: f64 = weights.iter().sum();
    if !(total > 0.0 && total.is_finite()) {
        return Err(EngineError::config(
            category,
            format!("weights must sum to a finite value above 0, got {total}"),
        ));
    }

    let weighted: f64 = ratings.iter().zip(weights).map(|(r, w)| r * w).sum();
    let mean = weighted / total;
    if !mean.is_finite() {
        return Err(EngineError::config(category, "weighted mean is not a number"));
    }
    Ok(mean.clamp(0.0, 1.0))
}

/// Scores for the three weighted categories, each in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreSet {
    pub impact: f64,
    pub urgency: f64,
    pub execution: f64,
}

impl ScoreSet {
    /// Score all three categories.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` naming the first category whose weights sum
    /// to zero or less.
    pub fn compute(ratings: &NormalizedRatings, weights: &WeightConfig) -> Result<Self, EngineError> {
        let w = weights;
        Ok(Self {
            impact: weighted_mean(
                "impact",
                &ratings.impact(),
                &[w.impact.leverage, w.impact.confidence, w.impact.goals],
            )?,
            urgency: weighted_mean(
                "urgency",
                &ratings.urgency(),
                &[w.urgency.priority, w.urgency.deadline],
            )?,
            execution: weighted_mean(
                "execution",
                &ratings.execution(),
                &[
                    w.execution.complexity,
                    w.execution.time,
                    w.execution.risk,
                    w.execution.fun,
                ],
            )?,
        })
    }
}
