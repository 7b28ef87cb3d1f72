//! Ratings and their normalized form.
//!
//! Every factor is rated on a 0-3 scale. Scoring works on the normalized
//! value from a fixed table; the duration formula works on the raw rating.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::EngineError;

/// Normalized value for each rating, indexed by the rating.
///
/// `1` maps to 0.3, not 1/3: the table is the contract.
pub const RATING_TABLE: [f64; 4] = [0.0, 0.3, 0.6, 1.0];

/// Number of values in the inline ratings form.
pub const RATING_FIELDS: usize = 11;

/// Position of the Time slot in the inline ratings form.
const TIME_SLOT: usize = 6;

/// Token that requests an automatic Time rating.
pub const AUTO_TOKEN: &str = "_";

/// Map a raw rating to its normalized score.
pub fn normalize_rating(r: u8) -> Result<f64, EngineError> {
    RATING_TABLE
        .get(usize::from(r))
        .copied()
        .ok_or_else(|| EngineError::InvalidRating {
            value: r.to_string(),
        })
}

/// A validated rating on the 0-3 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Rating(u8);

impl Rating {
    pub const NONE: Rating = Rating(0);
    pub const LOW: Rating = Rating(1);
    pub const MEDIUM: Rating = Rating(2);
    pub const HIGH: Rating = Rating(3);

    pub fn new(value: u8) -> Result<Self, EngineError> {
        if value <= 3 {
            Ok(Rating(value))
        } else {
            Err(EngineError::InvalidRating {
                value: value.to_string(),
            })
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn normalized(self) -> f64 {
        RATING_TABLE[usize::from(self.0)]
    }

    /// Parse a single rating token such as `"2"`.
    pub fn parse(token: &str) -> Result<Self, EngineError> {
        let invalid = || EngineError::InvalidRating {
            value: token.to_string(),
        };
        let value: u8 = token.trim().parse().map_err(|_| invalid())?;
        Rating::new(value).map_err(|_| invalid())
    }
}

impl TryFrom<u8> for Rating {
    type Error = EngineError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Rating::new(value)
    }
}

impl From<Rating> for u8 {
    fn from(rating: Rating) -> Self {
        rating.0
    }
}

impl fmt::Display for Rating {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The Time rating, which alone may be left to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeRating {
    Explicit(Rating),
    /// Derived from the planned or estimated duration
    Auto,
}

impl TimeRating {
    pub fn parse(token: &str) -> Result<Self, EngineError> {
        if token.trim() == AUTO_TOKEN {
            Ok(TimeRating::Auto)
        } else {
            Rating::parse(token).map(TimeRating::Explicit)
        }
    }
}

/// The eleven raw ratings of one task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingSet {
    // Impact
    pub leverage: Rating,
    pub confidence: Rating,
    pub goals: Rating,
    // Urgency
    pub priority: Rating,
    pub deadline: Rating,
    // Execution
    pub complexity: Rating,
    pub time: TimeRating,
    pub risk: Rating,
    pub fun: Rating,
    // Clarity
    pub surprise: Rating,
    pub planned: Rating,
}

impl RatingSet {
    /// Normalize every rating, using `time` for the Time slot.
    ///
    /// `time` is the resolved Time rating; the caller settles `Auto` first.
    pub fn normalize(&self, time: Rating) -> NormalizedRatings {
        NormalizedRatings {
            leverage: self.leverage.normalized(),
            confidence: self.confidence.normalized(),
            goals: self.goals.normalized(),
            priority: self.priority.normalized(),
            deadline: self.deadline.normalized(),
            complexity: self.complexity.normalized(),
            time: time.normalized(),
            risk: self.risk.normalized(),
            fun: self.fun.normalized(),
            surprise: self.surprise.normalized(),
            planned: self.planned.normalized(),
        }
    }
}

/// Parse the inline form `L,Conf,G,P,D,C,T,R,F,S,Pl`.
///
/// Spaces are ignored. `_` is accepted in the Time slot only.
pub fn parse_ratings(input: &str) -> Result<RatingSet, EngineError> {
    let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
    let parts: Vec<&str> = compact.split(',').collect();
    if parts.len() != RATING_FIELDS {
        return Err(EngineError::RatingCount { found: parts.len() });
    }

    let r = |i: usize| Rating::parse(parts[i]);
    Ok(RatingSet {
        leverage: r(0)?,
        confidence: r(1)?,
        goals: r(2)?,
        priority: r(3)?,
        deadline: r(4)?,
        complexity: r(5)?,
        time: TimeRating::parse(parts[TIME_SLOT])?,
        risk: r(7)?,
        fun: r(8)?,
        surprise: r(9)?,
        planned: r(10)?,
    })
}

/// All eleven ratings after normalization, as written to the task log.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NormalizedRatings {
    pub leverage: f64,
    pub confidence: f64,
    pub goals: f64,
    pub priority: f64,
    pub deadline: f64,
    pub complexity: f64,
    pub time: f64,
    pub risk: f64,
    pub fun: f64,
    pub surprise: f64,
    pub planned: f64,
}

impl NormalizedRatings {
    pub fn impact(&self) -> [f64; 3] {
        [self.leverage, self.confidence, self.goals]
    }

    pub fn urgency(&self) -> [f64; 2] {
        [self.priority, self.deadline]
    }

    pub fn execution(&self) -> [f64; 4] {
        [self.complexity, self.time, self.risk, self.fun]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_uses_fixed_table() {
        assert_eq!(normalize_rating(0).unwrap(), 0.0);
        assert_eq!(normalize_rating(1).unwrap(), 0.3);
        assert_eq!(normalize_rating(2).unwrap(), 0.6);
        assert_eq!(normalize_rating(3).unwrap(), 1.0);
    }

    #[test]
    fn normalize_rejects_out_of_range() {
        for r in [4u8, 5, 10, 255] {
            assert_eq!(
                normalize_rating(r),
                Err(EngineError::InvalidRating {
                    value: r.to_string()
                })
            );
        }
    }

    #[test]
    fn rating_parse_accepts_only_scale_values() {
        assert_eq!(Rating::parse("2").unwrap(), Rating::MEDIUM);
        assert_eq!(Rating::parse(" 3 ").unwrap(), Rating::HIGH);
        assert!(Rating::parse("4").is_err());
        assert!(Rating::parse("-1").is_err());
        assert!(Rating::parse("x").is_err());
        assert!(Rating::parse("").is_err());
        assert!(Rating::parse("_").is_err());
    }

    #[test]
    fn rating_serde_rejects_out_of_range() {
        assert!(serde_json::from_str::<Rating>("3").is_ok());
        assert!(serde_json::from_str::<Rating>("4").is_err());
    }

    #[test]
    fn parse_ratings_reads_all_fields_in_order() {
        let set = parse_ratings("3,2,1,1,2,1,0,1,0,2,3").unwrap();
        assert_eq!(set.leverage, Rating::HIGH);
        assert_eq!(set.confidence, Rating::MEDIUM);
        assert_eq!(set.goals, Rating::LOW);
        assert_eq!(set.priority, Rating::LOW);
        assert_eq!(set.deadline, Rating::MEDIUM);
        assert_eq!(set.complexity, Rating::LOW);
        assert_eq!(set.time, TimeRating::Explicit(Rating::NONE));
        assert_eq!(set.risk, Rating::LOW);
        assert_eq!(set.fun, Rating::NONE);
        assert_eq!(set.surprise, Rating::MEDIUM);
        assert_eq!(set.planned, Rating::HIGH);
    }

    #[test]
    fn parse_ratings_ignores_spaces() {
        let set = parse_ratings("3, 2, 1, 1, 2, 1, _, 1, 0, 2, 2").unwrap();
        assert_eq!(set.time, TimeRating::Auto);
    }

    #[test]
    fn parse_ratings_rejects_wrong_count() {
        assert_eq!(
            parse_ratings("1,2,3"),
            Err(EngineError::RatingCount { found: 3 })
        );
        assert_eq!(
            parse_ratings("1,1,1,1,1,1,1,1,1,1,1,1"),
            Err(EngineError::RatingCount { found: 12 })
        );
    }

    #[test]
    fn parse_ratings_rejects_auto_outside_time_slot() {
        let err = parse_ratings("_,2,1,1,2,1,1,1,0,2,2").unwrap_err();
        assert_eq!(err, EngineError::InvalidRating { value: "_".into() });
    }

    #[test]
    fn parse_ratings_rejects_out_of_scale_value() {
        let err = parse_ratings("3,2,1,1,2,1,1,1,0,2,4").unwrap_err();
        assert_eq!(err, EngineError::InvalidRating { value: "4".into() });
    }

    #[test]
    fn normalize_set_uses_resolved_time() {
        let set = parse_ratings("3,2,1,1,2,1,_,1,0,2,2").unwrap();
        let n = set.normalize(Rating::HIGH);
        assert_eq!(n.time, 1.0);
        assert_eq!(n.impact(), [1.0, 0.6, 0.3]);
        assert_eq!(n.urgency(), [0.3, 0.6]);
        assert_eq!(n.execution(), [0.3, 1.0, 0.3, 0.0]);
    }
}
