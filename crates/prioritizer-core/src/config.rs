//! Engine configuration.
//!
//! Holds everything the scoring pipeline can be tuned with:
//! - Category weights
//! - Symbol thresholds
//! - Time thresholds for the automatic Time rating
//! - The symbol table and archetype texts
//! - Stop-rule factor and demo inputs
//!
//! The engine never reads configuration on its own; callers build an
//! [`EngineConfig`] (usually through [`EngineConfig::from_vars`] over a loaded
//! profile) and pass it into each function.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Impact factor weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactWeights {
    #[serde(default = "default_half")]
    pub leverage: f64,
    #[serde(default = "default_quarter")]
    pub confidence: f64,
    #[serde(default = "default_quarter")]
    pub goals: f64,
}

/// Urgency factor weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyWeights {
    #[serde(default = "default_half")]
    pub priority: f64,
    #[serde(default = "default_half")]
    pub deadline: f64,
}

/// Execution factor weights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ExecutionWeights {
    #[serde(default = "default_execution_complexity")]
    pub complexity: f64,
    #[serde(default = "default_execution_time")]
    pub time: f64,
    #[serde(default = "default_execution_risk")]
    pub risk: f64,
    #[serde(default = "default_execution_fun")]
    pub fun: f64,
}

/// Per-category weights. Each category is normalized by its own sum.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct WeightConfig {
    #[serde(default)]
    pub impact: ImpactWeights,
    #[serde(default)]
    pub urgency: UrgencyWeights,
    #[serde(default)]
    pub execution: ExecutionWeights,
}

impl WeightConfig {
    /// Equal weight for every factor.
    pub fn equal() -> Self {
        Self {
            impact: ImpactWeights {
                leverage: 1.0,
                confidence: 1.0,
                goals: 1.0,
            },
            urgency: UrgencyWeights {
                priority: 1.0,
                deadline: 1.0,
            },
            execution: ExecutionWeights {
                complexity: 1.0,
                time: 1.0,
                risk: 1.0,
                fun: 1.0,
            },
        }
    }

    /// Weights per category, named, in rating order.
    pub fn categories(&self) -> [(&'static str, Vec<(&'static str, f64)>); 3] {
        [
            (
                "impact",
                vec![
                    ("leverage", self.impact.leverage),
                    ("confidence", self.impact.confidence),
                    ("goals", self.impact.goals),
                ],
            ),
            (
                "urgency",
                vec![
                    ("priority", self.urgency.priority),
                    ("deadline", self.urgency.deadline),
                ],
            ),
            (
                "execution",
                vec![
                    ("complexity", self.execution.complexity),
                    ("time", self.execution.time),
                    ("risk", self.execution.risk),
                    ("fun", self.execution.fun),
                ],
            ),
        ]
    }
}

/// Score thresholds for the symbol tables.
///
/// Impact thresholds compare with `>`; all others with `>=`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    #[serde(default = "default_impact_3star")]
    pub impact_3star: f64,
    #[serde(default = "default_half")]
    pub impact_2star: f64,
    #[serde(default = "default_quarter")]
    pub impact_1star: f64,
    #[serde(default = "default_half")]
    pub urgency_high: f64,
    #[serde(default = "default_half")]
    pub execution_high: f64,
    #[serde(default = "default_half")]
    pub surprise: f64,
    #[serde(default = "default_half")]
    pub planned: f64,
}

/// Upper bounds (inclusive, minutes) for Time ratings 0, 1 and 2.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeThresholds {
    #[serde(default = "default_time_low")]
    pub low: u32,
    #[serde(default = "default_time_med")]
    pub med: u32,
    #[serde(default = "default_time_high")]
    pub high: u32,
}

/// Display tokens used in the annotated output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolTable {
    pub star: String,
    pub urgent: String,
    pub calm: String,
    pub hard: String,
    pub easy: String,
    pub surprise: String,
    pub planned: String,
    pub spontaneous: String,
}

impl SymbolTable {
    /// Tokens that may lead an already annotated task line.
    ///
    /// Longer tokens come first so a symbol with a variation selector is
    /// consumed whole.
    pub fn leading_tokens(&self) -> Vec<&str> {
        let mut tokens = vec![
            self.star.as_str(),
            self.urgent.as_str(),
            self.calm.as_str(),
            self.hard.as_str(),
            self.easy.as_str(),
            self.surprise.as_str(),
            self.planned.as_str(),
            self.spontaneous.as_str(),
            // Without the variation selector, as some terminals paste them
            "\u{2b50}",
            "\u{1f5d3}",
            "\u{fe0f}",
        ];
        tokens.retain(|t| !t.is_empty());
        tokens.sort_by_key(|t| std::cmp::Reverse(t.len()));
        tokens
    }
}

/// Archetype descriptions for the four impact/execution quadrants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Archetypes {
    pub quick_win: String,
    pub big_bet: String,
    pub filler: String,
    pub slog: String,
}

/// Inputs for the non-interactive demo run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DemoConfig {
    pub task: String,
    /// Inline ratings in `L,Conf,G,P,D,C,T,R,F,S,Pl` order
    pub ratings: String,
}

/// Complete engine configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Multiple of the planned duration at which to stop and reflect
    #[serde(default = "default_stop_rule_factor")]
    pub stop_rule_factor: f64,
    /// Task log location; `None` means the default in the data directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub log_file: Option<PathBuf>,
    #[serde(default)]
    pub weights: WeightConfig,
    #[serde(default)]
    pub thresholds: Thresholds,
    #[serde(default)]
    pub time_thresholds: TimeThresholds,
    #[serde(default)]
    pub symbols: SymbolTable,
    #[serde(default)]
    pub archetypes: Archetypes,
    #[serde(default)]
    pub demo: DemoConfig,
}

// Default functions
fn default_half() -> f64 {
    0.5
}
fn default_quarter() -> f64 {
    0.25
}
fn default_impact_3star() -> f64 {
    0.75
}
fn default_execution_complexity() -> f64 {
    0.4
}
fn default_execution_time() -> f64 {
    0.3
}
fn default_execution_risk() -> f64 {
    0.2
}
fn default_execution_fun() -> f64 {
    0.1
}
fn default_time_low() -> u32 {
    30
}
fn default_time_med() -> u32 {
    90
}
fn default_time_high() -> u32 {
    150
}
fn default_stop_rule_factor() -> f64 {
    1.5
}

impl Default for ImpactWeights {
    fn default() -> Self {
        Self {
            leverage: default_half(),
            confidence: default_quarter(),
            goals: default_quarter(),
        }
    }
}

impl Default for UrgencyWeights {
    fn default() -> Self {
        Self {
            priority: default_half(),
            deadline: default_half(),
        }
    }
}

impl Default for ExecutionWeights {
    fn default() -> Self {
        Self {
            complexity: default_execution_complexity(),
            time: default_execution_time(),
            risk: default_execution_risk(),
            fun: default_execution_fun(),
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            impact_3star: default_impact_3star(),
            impact_2star: default_half(),
            impact_1star: default_quarter(),
            urgency_high: default_half(),
            execution_high: default_half(),
            surprise: default_half(),
            planned: default_half(),
        }
    }
}

impl Default for TimeThresholds {
    fn default() -> Self {
        Self {
            low: default_time_low(),
            med: default_time_med(),
            high: default_time_high(),
        }
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self {
            star: "\u{2b50}\u{fe0f}".into(),
            urgent: "\u{1f6a8}".into(),
            calm: "\u{1f422}".into(),
            hard: "\u{1f975}".into(),
            easy: "\u{1f36d}".into(),
            surprise: "\u{1f381}".into(),
            planned: "\u{1f5d3}\u{fe0f}".into(),
            spontaneous: "\u{1f3b2}".into(),
        }
    }
}

impl Default for Archetypes {
    fn default() -> Self {
        Self {
            quick_win: "High leverage for low friction: a pure Quick Win.".into(),
            big_bet: "High value, but demanding. Schedule deep work for this.".into(),
            filler: "Easy, but low leverage. Good for low-energy blocks.".into(),
            slog: "Hard work for little return. Can you eliminate or automate?".into(),
        }
    }
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            task: "Demo task for automated testing".into(),
            ratings: "2,2,2,1,1,1,1,1,2,1,2".into(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stop_rule_factor: default_stop_rule_factor(),
            log_file: None,
            weights: WeightConfig::default(),
            thresholds: Thresholds::default(),
            time_thresholds: TimeThresholds::default(),
            symbols: SymbolTable::default(),
            archetypes: Archetypes::default(),
            demo: DemoConfig::default(),
        }
    }
}

/// Outcome of [`EngineConfig::validate`].
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ConfigReport {
    /// Problems that make scoring fail or misbehave
    pub errors: Vec<String>,
    /// Settings that work but are probably unintended
    pub warnings: Vec<String>,
}

impl ConfigReport {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

impl EngineConfig {
    /// Build a configuration from `KEY=value` pairs.
    ///
    /// Unknown keys are ignored. Values that do not parse keep the default
    /// and emit a warning.
    pub fn from_vars<I, K, V>(vars: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars: HashMap<String, String> = vars
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        let mut cfg = Self::default();

        let w = &mut cfg.weights;
        read_f64(&vars, "WEIGHT_IMPACT_LEVERAGE", &mut w.impact.leverage);
        read_f64(&vars, "WEIGHT_IMPACT_CONFIDENCE", &mut w.impact.confidence);
        read_f64(&vars, "WEIGHT_IMPACT_GOALS", &mut w.impact.goals);
        read_f64(&vars, "WEIGHT_URGENCY_PRIORITY", &mut w.urgency.priority);
        read_f64(&vars, "WEIGHT_URGENCY_DEADLINE", &mut w.urgency.deadline);
        read_f64(&vars, "WEIGHT_EXECUTION_COMPLEX", &mut w.execution.complexity);
        read_f64(&vars, "WEIGHT_EXECUTION_TIME", &mut w.execution.time);
        read_f64(&vars, "WEIGHT_EXECUTION_RISK", &mut w.execution.risk);
        read_f64(&vars, "WEIGHT_EXECUTION_FUN", &mut w.execution.fun);

        let t = &mut cfg.thresholds;
        read_f64(&vars, "THRESHOLD_IMPACT_3STAR", &mut t.impact_3star);
        read_f64(&vars, "THRESHOLD_IMPACT_2STAR", &mut t.impact_2star);
        read_f64(&vars, "THRESHOLD_IMPACT_1STAR", &mut t.impact_1star);
        read_f64(&vars, "THRESHOLD_URGENCY_HIGH", &mut t.urgency_high);
        read_f64(&vars, "THRESHOLD_EXECUTION_HIGH", &mut t.execution_high);
        read_f64(&vars, "THRESHOLD_SURPRISE", &mut t.surprise);
        read_f64(&vars, "THRESHOLD_PLANNED", &mut t.planned);

        let tt = &mut cfg.time_thresholds;
        read_u32(&vars, "TIME_THRESHOLD_LOW", &mut tt.low);
        read_u32(&vars, "TIME_THRESHOLD_MED", &mut tt.med);
        read_u32(&vars, "TIME_THRESHOLD_HIGH", &mut tt.high);

        read_f64(&vars, "STOP_RULE_FACTOR", &mut cfg.stop_rule_factor);

        let a = &mut cfg.archetypes;
        read_string(&vars, "ARCHETYPE_QUICK_WIN", &mut a.quick_win);
        read_string(&vars, "ARCHETYPE_BIG_BET", &mut a.big_bet);
        read_string(&vars, "ARCHETYPE_FILLER", &mut a.filler);
        read_string(&vars, "ARCHETYPE_SLOG", &mut a.slog);

        read_string(&vars, "DEMO_TASK", &mut cfg.demo.task);
        read_string(&vars, "DEMO_RATINGS", &mut cfg.demo.ratings);

        if let Some(path) = vars.get("LOG_FILE").filter(|p| !p.trim().is_empty()) {
            cfg.log_file = Some(PathBuf::from(path.trim()));
        }

        cfg
    }

    /// Check the configuration for settings the engine cannot use.
    pub fn validate(&self) -> ConfigReport {
        let mut report = ConfigReport::default();

        for (category, weights) in self.weights.categories() {
            for (factor, weight) in &weights {
                if *weight < 0.0 || !weight.is_finite() {
                    report
                        .errors
                        .push(format!("{category}.{factor} weight must be >= 0, got {weight}"));
                }
            }
            let sum: f64 = weights.iter().map(|(_, w)| w).sum();
            if !(sum > 0.0) {
                report.errors.push(format!(
                    "{category} weights must sum to more than 0, got {sum:.2}"
                ));
            } else if (sum - 1.0).abs() > 0.01 {
                report.warnings.push(format!(
                    "{category} weights sum to {sum:.2}; they will be normalized to 1.0"
                ));
            }
        }

        let t = &self.thresholds;
        if !(t.impact_3star >= t.impact_2star && t.impact_2star >= t.impact_1star) {
            report.errors.push(format!(
                "impact thresholds must descend (3star >= 2star >= 1star), got {} / {} / {}",
                t.impact_3star, t.impact_2star, t.impact_1star
            ));
        }

        let tt = &self.time_thresholds;
        if !(tt.low < tt.med && tt.med < tt.high) {
            report.errors.push(format!(
                "time thresholds must ascend (low < med < high), got {} / {} / {}",
                tt.low, tt.med, tt.high
            ));
        }

        if !(self.stop_rule_factor >= 1.0) {
            report.warnings.push(format!(
                "stop rule factor {} is below 1.0; the stop point comes before the plan ends",
                self.stop_rule_factor
            ));
        }

        report
    }
}

fn read_f64(vars: &HashMap<String, String>, key: &str, slot: &mut f64) {
    if let Some(raw) = vars.get(key) {
        match raw.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => *slot = value,
            _ => tracing::warn!("ignoring {key}={raw:?}: not a finite number, keeping {slot}"),
        }
    }
}

fn read_u32(vars: &HashMap<String, String>, key: &str, slot: &mut u32) {
    if let Some(raw) = vars.get(key) {
        match raw.trim().parse::<u32>() {
            Ok(value) => *slot = value,
            Err(_) => tracing::warn!("ignoring {key}={raw:?}: not a whole number, keeping {slot}"),
        }
    }
}

fn read_string(vars: &HashMap<String, String>, key: &str, slot: &mut String) {
    if let Some(raw) = vars.get(key) {
        *slot = raw.clone();
    }
}
