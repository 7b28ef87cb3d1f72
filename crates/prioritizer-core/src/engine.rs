//! The scoring pipeline.
//!
//! `evaluate` runs one task through every stage:
//!
//! ```text
//! raw ─▶ tags ─▶ estimate ─▶ normalize ─▶ score ─▶ symbols ─▶ compose
//! ```
//!
//! It is pure: no I/O, no clock. The caller stamps the [`LogRecord`] and
//! hands it to the task log.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::analysis::analysis_text;
use crate::compose::{build_log_record, compose_output, LogRecord, Mode};
use crate::config::{EngineConfig, TimeThresholds};
use crate::error::EngineError;
use crate::estimate::{estimate_minutes, stop_rule_minutes, time_rating_for};
use crate::rating::{NormalizedRatings, Rating, RatingSet, TimeRating};
use crate::scoring::ScoreSet;
use crate::symbols::{map_symbols, SymbolSet};
use crate::tags::{parse_tags_with_symbols, ParsedTask};

/// Everything derived from one task and its ratings.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Evaluation {
    pub raw_input: String,
    pub task: ParsedTask,
    pub ratings: RatingSet,
    /// Time rating after resolving `Auto`
    pub time_rating: Rating,
    pub normalized: NormalizedRatings,
    pub scores: ScoreSet,
    pub symbols: SymbolSet,
    /// Formula estimate; `None` when the task has a planned time
    pub estimated_minutes: Option<u32>,
    pub output: String,
}

impl Evaluation {
    /// Planned minutes if given, otherwise the estimate.
    pub fn minutes(&self) -> Option<u32> {
        self.task.planned_minutes.or(self.estimated_minutes)
    }

    pub fn is_planned(&self) -> bool {
        self.task.planned_minutes.is_some()
    }

    pub fn stop_rule_minutes(&self, config: &EngineConfig) -> Option<u32> {
        self.minutes()
            .map(|m| stop_rule_minutes(m, config.stop_rule_factor))
    }

    pub fn analysis(&self, config: &EngineConfig) -> String {
        analysis_text(&self.scores, self.ratings.surprise, config)
    }

    pub fn has_surprise(&self) -> bool {
        !self.symbols.surprise.is_empty()
    }

    /// Freeze this evaluation into a log record.
    pub fn log_record(&self, timestamp: DateTime<Utc>, mode: Mode, profile: Option<&str>) -> LogRecord {
        build_log_record(
            timestamp,
            &self.raw_input,
            self.normalized,
            self.scores,
            self.symbols.clone(),
            &self.output,
            self.estimated_minutes,
            self.task.planned_minutes,
            mode,
            profile,
        )
    }
}

/// Parse a task line the way `evaluate` does, symbols stripped.
pub fn parse_task(raw: &str, config: &EngineConfig) -> Result<ParsedTask, EngineError> {
    parse_tags_with_symbols(raw, &config.symbols)
}

/// Settle the Time rating.
///
/// `Auto` follows the planned duration when there is one, otherwise the
/// formula estimate.
pub fn resolve_time_rating(
    time: TimeRating,
    planned_minutes: Option<u32>,
    estimated_minutes: Option<u32>,
    thresholds: &TimeThresholds,
) -> Result<Rating, EngineError> {
    match time {
        TimeRating::Explicit(rating) => Ok(rating),
        TimeRating::Auto => planned_minutes
            .or(estimated_minutes)
            .map(|minutes| time_rating_for(minutes, thresholds))
            .ok_or(EngineError::IncompleteEstimationInput { field: "time" }),
    }
}

/// Run the full pipeline for one task.
///
/// # Errors
///
/// `MalformedTimeTag` for a bad `{pH:MM}` tag and `ConfigError` for unusable
/// weights.
pub fn evaluate(raw: &str, ratings: &RatingSet, config: &EngineConfig) -> Result<Evaluation, EngineError> {
    let task = parse_task(raw, config)?;

    let estimated_minutes = match task.planned_minutes {
        Some(_) => None,
        None => Some(estimate_minutes(
            ratings.complexity.value(),
            ratings.risk.value(),
            ratings.surprise.value(),
        )?),
    };

    let time_rating = resolve_time_rating(
        ratings.time,
        task.planned_minutes,
        estimated_minutes,
        &config.time_thresholds,
    )?;

    let normalized = ratings.normalize(time_rating);
    let scores = ScoreSet::compute(&normalized, &config.weights)?;
    let symbols = map_symbols(&scores, ratings.surprise, ratings.planned, config);
    let output = compose_output(&symbols, task.planned_minutes, &task.tags, &task.description);

    tracing::debug!(
        impact = scores.impact,
        urgency = scores.urgency,
        execution = scores.execution,
        ?estimated_minutes,
        planned_minutes = ?task.planned_minutes,
        "evaluated task"
    );

    Ok(Evaluation {
        raw_input: raw.to_string(),
        task,
        ratings: *ratings,
        time_rating,
        normalized,
        scores,
        symbols,
        estimated_minutes,
        output,
    })
}
