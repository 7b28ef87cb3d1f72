//! Archetype analysis.
//!
//! Places a task in one of four quadrants of impact versus execution
//! friction and describes it in one sentence, with optional notes for an
//! unclear scope and a critical urgency.

use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::rating::Rating;
use crate::scoring::ScoreSet;

/// Impact/execution quadrant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Archetype {
    /// High impact, low friction
    QuickWin,
    /// High impact, high friction
    BigBet,
    /// Low impact, low friction
    Filler,
    /// Low impact, high friction
    Slog,
}

impl Archetype {
    /// Impact counts as high above the two-star threshold; execution counts
    /// as hard at or above its threshold.
    pub fn classify(scores: &ScoreSet, config: &EngineConfig) -> Self {
        let high_impact = scores.impact > config.thresholds.impact_2star;
        let hard = scores.execution >= config.thresholds.execution_high;
        match (high_impact, hard) {
            (true, false) => Archetype::QuickWin,
            (true, true) => Archetype::BigBet,
            (false, false) => Archetype::Filler,
            (false, true) => Archetype::Slog,
        }
    }

    pub fn description<'a>(&self, config: &'a EngineConfig) -> &'a str {
        let a = &config.archetypes;
        match self {
            Archetype::QuickWin => &a.quick_win,
            Archetype::BigBet => &a.big_bet,
            Archetype::Filler => &a.filler,
            Archetype::Slog => &a.slog,
        }
    }
}

/// One-paragraph reading of a scored task.
pub fn analysis_text(scores: &ScoreSet, surprise: Rating, config: &EngineConfig) -> String {
    let archetype = Archetype::classify(scores, config);
    let mut text = String::new();

    if surprise.normalized() >= config.thresholds.surprise {
        text.push_str(&format!("Scope is unclear ({}). ", config.symbols.surprise));
    }
    text.push_str(archetype.description(config));
    if scores.urgency >= config.thresholds.urgency_high {
        text.push_str(" Critical priority.");
    }
    text
}
