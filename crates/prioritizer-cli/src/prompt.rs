//! Line-based prompting.
//!
//! Reads from any `BufRead` so the prompt loops can be driven by tests.
//! Invalid input is reported and asked again; EOF ends the session.

use std::io::{self, BufRead, Write};

use colored::Colorize;
use task_prioritizer_core::{parse_ratings, Rating, RatingSet, TimeRating};

use crate::ui;

/// Input ended before a complete answer was given.
#[derive(Debug)]
pub struct Cancelled;

impl std::fmt::Display for Cancelled {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("input ended")
    }
}

impl std::error::Error for Cancelled {}

pub struct Prompter<R> {
    input: R,
}

impl Prompter<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Prompter<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }

    /// Print `label` and read one line, without the line ending.
    ///
    /// Returns `None` on EOF.
    pub fn ask(&mut self, label: &str) -> io::Result<Option<String>> {
        print!("{}", format!("{label}: ").white());
        io::stdout().flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            println!();
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn ask_until<T>(
        &mut self,
        label: &str,
        retry_hint: &str,
        mut parse: impl FnMut(&str) -> Option<T>,
    ) -> Result<T, Box<dyn std::error::Error>> {
        loop {
            let answer = self.ask(label)?.ok_or(Cancelled)?;
            if let Some(value) = parse(answer.trim()) {
                return Ok(value);
            }
            println!("  {}", ui::hint(retry_hint));
        }
    }

    fn rating(&mut self, label: &str) -> Result<Rating, Box<dyn std::error::Error>> {
        self.ask_until(label, "→ Use 0, 1, 2, or 3.", |s| Rating::parse(s).ok())
    }

    /// One prompt per rating, in `L,Conf,G,P,D,C,T,R,F,S,Pl` order.
    ///
    /// With a planned time the Time rating is not asked; otherwise `_`
    /// derives it from the estimate.
    pub fn ratings_interactive(
        &mut self,
        planned_minutes: Option<u32>,
    ) -> Result<RatingSet, Box<dyn std::error::Error>> {
        ui::print_scale();
        println!("{}", ui::rule('─'));

        let leverage = self.rating("Impact  → Leverage   (L)")?;
        let confidence = self.rating("Impact  → Confidence (Conf)")?;
        let goals = self.rating("Impact  → Goals      (G)")?;
        let priority = self.rating("Urgency → Priority (P)")?;
        let deadline = self.rating("Urgency → Deadline (D)")?;
        let complexity = self.rating("Execution → Complex  (C)")?;

        let time = match planned_minutes {
            Some(m) => {
                println!("{}", ui::hint(&format!("Execution → Time     (T): [AUTO] from {m}m")));
                TimeRating::Auto
            }
            None => self.ask_until(
                "Execution → Time     (T) [_ = auto]",
                "→ Use 0, 1, 2, 3, or _ for auto.",
                |s| TimeRating::parse(s).ok(),
            )?,
        };

        let risk = self.rating("Execution → Risk     (R)")?;
        let fun = self.rating("Execution → Fun      (F)")?;
        let surprise = self.rating("Clarity → Surprise (S)")?;
        let planned = self.rating("Clarity → Planned  (Pl)")?;

        Ok(RatingSet {
            leverage,
            confidence,
            goals,
            priority,
            deadline,
            complexity,
            time,
            risk,
            fun,
            surprise,
            planned,
        })
    }

    /// All eleven ratings on one line.
    pub fn ratings_batch(
        &mut self,
        planned_minutes: Option<u32>,
    ) -> Result<RatingSet, Box<dyn std::error::Error>> {
        ui::print_batch_legend(planned_minutes);
        loop {
            let answer = self.ask("Ratings")?.ok_or(Cancelled)?;
            match parse_ratings(&answer) {
                Ok(set) => return Ok(set),
                Err(e) => {
                    println!("  {}", ui::hint(&format!("→ {e}")));
                }
            }
        }
    }
}
