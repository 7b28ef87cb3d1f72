//! # Task Prioritizer Core Library
//!
//! Scores a free-text task against a fixed rubric (Impact, Urgency,
//! Execution, Clarity) and annotates it with symbols. The `tp` CLI is a thin
//! shell over this crate: it prompts, prints and logs, while everything that
//! decides a score lives here.
//!
//! ## Architecture
//!
//! - **Tags**: `{key:value}` extraction, including the `{pH:MM}` planned time
//! - **Ratings**: 0-3 ratings and their fixed normalization table
//! - **Scoring**: weighted category means
//! - **Estimate**: duration formula, automatic Time rating and stop-rule
//! - **Symbols**: threshold tables from scores to display tokens
//! - **Compose**: the annotated line and the [`LogRecord`]
//! - **Storage**: dotenv profiles, the JSONL task log, first-run marker
//!
//! Every engine function is pure and takes its [`EngineConfig`] explicitly.
//!
//! ## Key Components
//!
//! - [`evaluate`]: the full pipeline for one task
//! - [`EngineConfig`]: weights, thresholds and symbols
//! - [`ProfileLoader`]: builds an `EngineConfig` from profile files
//! - [`TaskLog`]: append-only record of evaluations

pub mod analysis;
pub mod compose;
pub mod config;
pub mod engine;
pub mod error;
pub mod estimate;
pub mod rating;
pub mod scoring;
pub mod storage;
pub mod symbols;
pub mod tags;

pub use analysis::{analysis_text, Archetype};
pub use compose::{build_log_record, compose_output, LogRecord, Mode};
pub use config::{ConfigReport, EngineConfig, SymbolTable, Thresholds, TimeThresholds, WeightConfig};
pub use engine::{evaluate, parse_task, Evaluation};
pub use error::{CoreError, EngineError, ProfileError};
pub use estimate::{estimate_minutes, stop_rule_minutes, time_rating_for};
pub use rating::{normalize_rating, parse_ratings, NormalizedRatings, Rating, RatingSet, TimeRating};
pub use scoring::{score_category, ScoreSet};
pub use storage::{LoadedProfile, ProfileLoader, TaskLog, WelcomeMarker};
pub use symbols::{map_symbols, SymbolSet};
pub use tags::{parse_tags, ParsedTask, Tag};
