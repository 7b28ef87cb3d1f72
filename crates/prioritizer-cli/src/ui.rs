//! Terminal rendering.
//!
//! Colors only ever wrap symbols and chrome; the plain annotated line (what
//! is copied and logged) is never colored.

use colored::Colorize;
use indoc::indoc;
use std::io::IsTerminal;

use task_prioritizer_core::{EngineConfig, Evaluation, SymbolTable};

pub const HELP_EPILOG: &str = indoc! {r#"
    ╭─────────────────────────────────────────────────────────────╮
    │  "calculations" = choosing what to work on                  │
    │  "stop-rule"    = knowing when to stop, when good enough is │
    │                   good enough                               │
    ╰─────────────────────────────────────────────────────────────╯

    Phase 1: Capture tasks roughly. Uncertainty (🎁) is expected.
    Phase 2: Refine estimates. Remove 🎁 as clarity emerges.

    Stop-Rule: If actual time exceeds 1.5× your estimate, pause.
               Reflect on why, then adjust your next estimate.

    Ratings order for --ratings: L,Conf,G,P,D,C,T,R,F,S,Pl
      L=Leverage, Conf=Confidence, G=Goals, P=Priority, D=Deadline,
      C=Complex, T=Time, R=Risk, F=Fun, S=Surprise, Pl=Planned
      Use _ for T to derive it from {pH:MM} or the estimate.

    This tool trusts you. You're doing fine.
"#};

const SURPRISE_REMINDER: &str = indoc! {"
    ┌─────────────────────────────────────────────────────────────┐
    │  🎁 appears when clarity is low.                            │
    │     In phase 1, this is natural.                            │
    │     As you learn, 🎁 fades.                                 │
    │     Trust the process.                                      │
    └─────────────────────────────────────────────────────────────┘
"};

const WELCOME_MESSAGE: &str = indoc! {"
    ╭─────────────────────────────────────────────────────────────╮
    │                                                             │
    │   Welcome to Task Prioritizer 🌱                            │
    │                                                             │
    │   This tool helps you:                                      │
    │   • Choose what to work on (by scoring impact & effort)     │
    │   • Know when to stop (the 1.5× stop-rule)                  │
    │                                                             │
    │   How it works:                                             │
    │   1. You'll rate each factor from 0 to 3                    │
    │   2. The tool calculates priority and shows symbols         │
    │   3. Copy the result to your task list                      │
    │                                                             │
    │   Scale: 0=none, 1=low, 2=medium, 3=high                    │
    │                                                             │
    │   When 🎁 appears, that's okay: it means the task is        │
    │   still unclear. Clarity comes with time.                   │
    │                                                             │
    ╰─────────────────────────────────────────────────────────────╯
"};

const RULE_WIDTH: usize = 42;

/// Turn colors off for `--no-color`, `NO_COLOR` or a non-terminal stdout.
pub fn configure_color(no_color: bool) {
    let disabled = no_color || std::env::var_os("NO_COLOR").is_some() || !std::io::stdout().is_terminal();
    if disabled {
        colored::control::set_override(false);
    }
}

/// Wrap every known symbol in its color.
pub fn colorize(line: &str, symbols: &SymbolTable) -> String {
    let pairs = [
        (&symbols.star, symbols.star.yellow()),
        (&symbols.urgent, symbols.urgent.red()),
        (&symbols.calm, symbols.calm.green()),
        (&symbols.hard, symbols.hard.red()),
        (&symbols.easy, symbols.easy.green()),
        (&symbols.surprise, symbols.surprise.magenta()),
        (&symbols.planned, symbols.planned.cyan()),
        (&symbols.spontaneous, symbols.spontaneous.bright_black()),
    ];

    let mut out = line.to_string();
    for (plain, painted) in pairs {
        if !plain.is_empty() {
            out = out.replace(plain.as_str(), &painted.to_string());
        }
    }
    out
}

pub fn rule(ch: char) -> String {
    ch.to_string().repeat(RULE_WIDTH).dimmed().to_string()
}

pub fn hint(text: &str) -> String {
    text.bright_black().to_string()
}

pub fn print_welcome() {
    println!("{}", WELCOME_MESSAGE.cyan());
}

pub fn print_scale() {
    println!("{}", hint("Scale: 0=0.0 │ 1=0.3 │ 2=0.6 │ 3=1.0"));
}

pub fn print_batch_legend(planned_minutes: Option<u32>) {
    print_scale();
    println!("{}", hint("Impact    - (L)everage, (Conf)idence, (G)oals"));
    println!("{}", hint("Urgency   - (P)riority, (D)eadline"));
    println!("{}", hint("Execution - (C)omplex, (T)ime, (R)isk, (F)un"));
    println!("{}", hint("Clarity   - (S)urprise, (Pl)anned"));
    println!("{}", hint("Input as single list in order L,Conf,G,P,D,C,T,R,F,S,Pl"));
    match planned_minutes {
        Some(m) => println!("{}", hint(&format!("Use _ for Time (T) to auto-fill from {m}m"))),
        None => println!("{}", hint("Use _ for Time (T) to auto-fill from the estimate")),
    }
}

/// Show what was understood from the task line before prompting.
pub fn print_task_header(description: &str, tags: &[String], planned_minutes: Option<u32>) {
    println!();
    println!("{} {}", "Task:".bold(), description);
    if !tags.is_empty() {
        println!("{}", hint(&format!("Tags: {}", tags.join(""))));
    }
    if let Some(m) = planned_minutes {
        println!("{}", hint(&format!("Planned: {m}m")));
    }
    println!("{}", rule('─'));
}

fn duration_line(eval: &Evaluation, config: &EngineConfig) -> Option<String> {
    let minutes = eval.minutes()?;
    let stop = eval.stop_rule_minutes(config)?;
    let kind = if eval.is_planned() { "planned" } else { "estimated" };
    Some(format!("time: {minutes}m {kind} · stop-rule at {stop}m"))
}

/// Print a finished evaluation.
pub fn print_result(eval: &Evaluation, config: &EngineConfig, quiet: bool) {
    let symbols = &config.symbols;
    if quiet {
        println!("{}", colorize(&eval.output, symbols));
        return;
    }

    println!();
    println!("{}", rule('═'));
    println!("{}", colorize(&eval.output, symbols));
    println!(
        "{} {} & {}",
        hint("category:"),
        colorize(&eval.symbols.urgency, symbols),
        colorize(&eval.symbols.execution, symbols)
    );
    println!("{}", hint(&eval.analysis(config)));
    if let Some(line) = duration_line(eval, config) {
        println!("{}", hint(&line));
    }
    println!("{}", rule('═'));

    if eval.has_surprise() {
        println!("{}", SURPRISE_REMINDER.magenta());
    }
}

pub fn print_copied(ok: bool) {
    if ok {
        println!("{}", "✓ Copied to clipboard".green());
    } else {
        println!("{}", "✗ Could not copy to clipboard".red());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn colorize_without_color_is_identity() {
        colored::control::set_override(false);
        let symbols = SymbolTable::default();
        let line = format!("{}{} x", symbols.star, symbols.calm);
        assert_eq!(colorize(&line, &symbols), line);
    }
}
