//! Score-to-symbol threshold tables.
//!
//! | Category  | Rule (first match wins)                         |
//! |-----------|-------------------------------------------------|
//! | Impact    | `> 3star` → ★★★, `> 2star` → ★★, `> 1star` → ★  |
//! | Urgency   | `>= urgency_high` → urgent, else calm           |
//! | Execution | `>= execution_high` → hard, else easy           |
//! | Surprise  | normalized `>= surprise` → surprise, else none  |
//! | Planned   | normalized `>= planned` → planned, else spontaneous |

use serde::{Deserialize, Serialize};

use crate::config::{EngineConfig, SymbolTable, Thresholds};
use crate::rating::Rating;
use crate::scoring::ScoreSet;

/// Symbols for one evaluated task. Empty strings mean "no symbol".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SymbolSet {
    pub impact: String,
    pub urgency: String,
    pub execution: String,
    pub surprise: String,
    pub planned: String,
}

/// Number of impact stars for a score.
pub fn impact_stars(score: f64, thresholds: &Thresholds) -> usize {
    if score > thresholds.impact_3star {
        3
    } else if score > thresholds.impact_2star {
        2
    } else if score > thresholds.impact_1star {
        1
    } else {
        0
    }
}

pub fn impact_symbol(score: f64, thresholds: &Thresholds, symbols: &SymbolTable) -> String {
    symbols.star.repeat(impact_stars(score, thresholds))
}

pub fn urgency_symbol(score: f64, thresholds: &Thresholds, symbols: &SymbolTable) -> String {
    if score >= thresholds.urgency_high {
        symbols.urgent.clone()
    } else {
        symbols.calm.clone()
    }
}

pub fn execution_symbol(score: f64, thresholds: &Thresholds, symbols: &SymbolTable) -> String {
    if score >= thresholds.execution_high {
        symbols.hard.clone()
    } else {
        symbols.easy.clone()
    }
}

pub fn surprise_symbol(rating: Rating, thresholds: &Thresholds, symbols: &SymbolTable) -> String {
    if rating.normalized() >= thresholds.surprise {
        symbols.surprise.clone()
    } else {
        String::new()
    }
}

pub fn planned_symbol(rating: Rating, thresholds: &Thresholds, symbols: &SymbolTable) -> String {
    if rating.normalized() >= thresholds.planned {
        symbols.planned.clone()
    } else {
        symbols.spontaneous.clone()
    }
}

/// Map category scores and the two clarity ratings to symbols.
pub fn map_symbols(
    scores: &ScoreSet,
    surprise: Rating,
    planned: Rating,
    config: &EngineConfig,
) -> SymbolSet {
    let t = &config.thresholds;
    let s = &config.symbols;
    SymbolSet {
        impact: impact_symbol(scores.impact, t, s),
        urgency: urgency_symbol(scores.urgency, t, s),
        execution: execution_symbol(scores.execution, t, s),
        surprise: surprise_symbol(surprise, t, s),
        planned: planned_symbol(planned, t, s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scores(impact: f64, urgency: f64, execution: f64) -> ScoreSet {
        ScoreSet {
            impact,
            urgency,
            execution,
        }
    }

    #[test]
    fn impact_boundaries_are_strict() {
        let t = Thresholds::default();
        assert_eq!(impact_stars(0.76, &t), 3);
        assert_eq!(impact_stars(0.75, &t), 2);
        assert_eq!(impact_stars(0.51, &t), 2);
        assert_eq!(impact_stars(0.50, &t), 1);
        assert_eq!(impact_stars(0.26, &t), 1);
        assert_eq!(impact_stars(0.25, &t), 0);
        assert_eq!(impact_stars(0.0, &t), 0);
        assert_eq!(impact_stars(1.0, &t), 3);
    }

    #[test]
    fn impact_symbol_repeats_star() {
        let t = Thresholds::default();
        let s = SymbolTable::default();
        assert_eq!(impact_symbol(0.9, &t, &s), s.star.repeat(3));
        assert_eq!(impact_symbol(0.3, &t, &s), s.star);
        assert_eq!(impact_symbol(0.1, &t, &s), "");
    }

    #[test]
    fn urgency_boundary_is_inclusive() {
        let t = Thresholds::default();
        let s = SymbolTable::default();
        assert_eq!(urgency_symbol(0.50, &t, &s), s.urgent);
        assert_eq!(urgency_symbol(0.49, &t, &s), s.calm);
        assert_eq!(urgency_symbol(1.0, &t, &s), s.urgent);
    }

    #[test]
    fn execution_boundary_is_inclusive() {
        let t = Thresholds::default();
        let s = SymbolTable::default();
        assert_eq!(execution_symbol(0.50, &t, &s), s.hard);
        assert_eq!(execution_symbol(0.49, &t, &s), s.easy);
    }

    #[test]
    fn clarity_symbols_use_normalized_rating() {
        let t = Thresholds::default();
        let s = SymbolTable::default();
        // 1 -> 0.3, 2 -> 0.6
        assert_eq!(surprise_symbol(Rating::LOW, &t, &s), "");
        assert_eq!(surprise_symbol(Rating::MEDIUM, &t, &s), s.surprise);
        assert_eq!(planned_symbol(Rating::LOW, &t, &s), s.spontaneous);
        assert_eq!(planned_symbol(Rating::MEDIUM, &t, &s), s.planned);
        assert_eq!(planned_symbol(Rating::NONE, &t, &s), s.spontaneous);
    }

    #[test]
    fn clarity_threshold_equal_to_normalized_value_matches() {
        let mut t = Thresholds::default();
        t.surprise = 0.6;
        t.planned = 0.6;
        let s = SymbolTable::default();
        assert_eq!(surprise_symbol(Rating::MEDIUM, &t, &s), s.surprise);
        assert_eq!(planned_symbol(Rating::MEDIUM, &t, &s), s.planned);
    }

    #[test]
    fn map_symbols_fills_every_slot() {
        let config = EngineConfig::default();
        let set = map_symbols(
            &scores(0.8, 0.5, 0.2),
            Rating::HIGH,
            Rating::NONE,
            &config,
        );
        let s = &config.symbols;
        assert_eq!(set.impact, s.star.repeat(3));
        assert_eq!(set.urgency, s.urgent);
        assert_eq!(set.execution, s.easy);
        assert_eq!(set.surprise, s.surprise);
        assert_eq!(set.planned, s.spontaneous);
    }

    #[test]
    fn reachable_boundary_scores() {
        // Weighted means that land exactly on a threshold
        let config = EngineConfig::default();
        // urgency: priority 3, deadline 0 with 0.5/0.5 -> 0.5
        let set = map_symbols(&scores(0.25, 0.5, 0.5), Rating::NONE, Rating::NONE, &config);
        assert_eq!(set.impact, "");
        assert_eq!(set.urgency, config.symbols.urgent);
        assert_eq!(set.execution, config.symbols.hard);
    }
}
