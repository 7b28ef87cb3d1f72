//! Output composition and log records.
//!
//! The annotated line is laid out as:
//!
//! ```text
//! <impact><urgency><execution><surprise><planned>[{pH:MM}][{k:v}...][ <description>]
//! ```
//!
//! Symbols and tags are concatenated without separators; a single space
//! precedes a non-empty description. Identical inputs give identical bytes,
//! and re-parsing the line yields the same planned time, tags and
//! description.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::rating::NormalizedRatings;
use crate::scoring::ScoreSet;
use crate::symbols::SymbolSet;
use crate::tags::{format_planned_time, Tag};

/// How the ratings for a task were collected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    /// One prompt per rating
    Interactive,
    /// All ratings on one prompted line
    Batch,
    /// Ratings passed on the command line
    Inline,
    /// Configured demo task and ratings
    Demo,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Mode::Interactive => "interactive",
            Mode::Batch => "batch",
            Mode::Inline => "inline",
            Mode::Demo => "demo",
        };
        f.write_str(name)
    }
}

/// Assemble the annotated task line.
///
/// Only a planned duration becomes a `{pH:MM}` tag; estimates are left out
/// so they are not mistaken for a plan when the line is parsed again.
pub fn compose_output(
    symbols: &SymbolSet,
    planned_minutes: Option<u32>,
    tags: &[Tag],
    description: &str,
) -> String {
    let mut out = String::new();
    out.push_str(&symbols.impact);
    out.push_str(&symbols.urgency);
    out.push_str(&symbols.execution);
    out.push_str(&symbols.surprise);
    out.push_str(&symbols.planned);

    if let Some(minutes) = planned_minutes {
        out.push_str(&format_planned_time(minutes));
    }
    for tag in tags {
        out.push_str(&tag.to_string());
    }

    if !description.is_empty() {
        out.push(' ');
        out.push_str(description);
    }
    out
}

/// One completed evaluation, as appended to the task log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogRecord {
    pub timestamp: DateTime<Utc>,
    pub raw_input: String,
    pub ratings: NormalizedRatings,
    pub scores: ScoreSet,
    pub symbols: SymbolSet,
    pub output: String,
    pub estimated_minutes: Option<u32>,
    pub planned_minutes: Option<u32>,
    pub mode: Mode,
    pub profile: Option<String>,
}

impl LogRecord {
    /// Serialize as a single JSON line (no trailing newline).
    pub fn to_json_line(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Snapshot all intermediate values of an evaluation.
#[allow(clippy::too_many_arguments)]
pub fn build_log_record(
    timestamp: DateTime<Utc>,
    raw_input: &str,
    ratings: NormalizedRatings,
    scores: ScoreSet,
    symbols: SymbolSet,
    output: &str,
    estimated_minutes: Option<u32>,
    planned_minutes: Option<u32>,
    mode: Mode,
    profile: Option<&str>,
) -> LogRecord {
    LogRecord {
        timestamp,
        raw_input: raw_input.to_string(),
        ratings,
        scores,
        symbols,
        output: output.to_string(),
        estimated_minutes,
        planned_minutes,
        mode,
        profile: profile.map(str::to_string),
    }
}
