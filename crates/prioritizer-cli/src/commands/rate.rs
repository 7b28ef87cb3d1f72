use chrono::Utc;
use clap::Args;
use colored::Colorize;
use std::io::BufRead;

use task_prioritizer_core::{
    evaluate, parse_ratings, parse_task, EngineError, Evaluation, Mode, ParsedTask, RatingSet,
};

use crate::clipboard;
use crate::context::AppContext;
use crate::prompt::{Cancelled, Prompter};
use crate::ui;

type CliResult<T = ()> = Result<T, Box<dyn std::error::Error>>;

#[derive(Args)]
pub struct RateArgs {
    /// Task text, optionally with {pH:MM} and {key:value} tags (prompted if omitted)
    pub task: Option<String>,

    /// All 11 ratings inline, in L,Conf,G,P,D,C,T,R,F,S,Pl order
    #[arg(short, long, value_name = "LIST", conflicts_with = "batch", allow_hyphen_values = true)]
    pub ratings: Option<String>,

    /// Enter all ratings on one line instead of one prompt each
    #[arg(short, long)]
    pub batch: bool,

    /// Copy the annotated task to the clipboard
    #[arg(short, long)]
    pub copy: bool,

    /// Minimal output (just the annotated task)
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not append to the task log
    #[arg(long)]
    pub no_log: bool,
}

#[derive(Args)]
pub struct LoopArgs {
    /// Enter all ratings on one line instead of one prompt each
    #[arg(short, long)]
    pub batch: bool,

    /// Minimal output (just the annotated task)
    #[arg(short, long)]
    pub quiet: bool,

    /// Do not append to the task log
    #[arg(long)]
    pub no_log: bool,
}

/// Output and logging switches shared by every mode.
#[derive(Clone, Copy)]
struct Output {
    quiet: bool,
    copy: bool,
    log: bool,
}

pub fn run(args: RateArgs, profile: Option<&str>) -> CliResult {
    let ctx = AppContext::load(profile)?;
    let mode = match (&args.ratings, args.batch) {
        (Some(_), _) => Mode::Inline,
        (None, true) => Mode::Batch,
        (None, false) => Mode::Interactive,
    };
    let output = Output {
        quiet: args.quiet,
        copy: args.copy,
        log: !args.no_log,
    };

    if let Some(list) = args.ratings.as_deref() {
        let raw = args.task.as_deref().ok_or("a task is required with --ratings")?;
        let ratings = parse_ratings(list)?;
        let eval = evaluate(raw, &ratings, ctx.config())?;
        return finish(&ctx, &eval, mode, output);
    }

    if !args.quiet {
        greet(&ctx);
    }

    let mut prompter = Prompter::stdin();
    let first = args.task.filter(|t| !t.trim().is_empty());
    let Some((raw, task)) = read_task(&ctx, &mut prompter, first, "Task")? else {
        return Ok(());
    };
    ended_by_eof(rate_prompted(&ctx, &mut prompter, &raw, &task, mode, output)).map(|_| ())
}

pub fn run_loop(args: LoopArgs, profile: Option<&str>) -> CliResult {
    let ctx = AppContext::load(profile)?;
    let mode = if args.batch { Mode::Batch } else { Mode::Interactive };
    let output = Output {
        quiet: args.quiet,
        copy: false,
        log: !args.no_log,
    };

    if !args.quiet {
        greet(&ctx);
    }

    let mut prompter = Prompter::stdin();
    let mut count = 0usize;
    while let Some((raw, task)) = read_task(&ctx, &mut prompter, None, "Task (empty to finish)")? {
        if !ended_by_eof(rate_prompted(&ctx, &mut prompter, &raw, &task, mode, output))? {
            break;
        }
        count += 1;
    }

    if !args.quiet {
        println!("{}", ui::hint(&format!("{count} task(s) rated.")));
    }
    Ok(())
}

pub fn run_demo(quiet: bool, no_log: bool, profile: Option<&str>) -> CliResult {
    let ctx = AppContext::load(profile)?;
    let demo = &ctx.config().demo;
    let ratings = parse_ratings(&demo.ratings)?;
    let eval = evaluate(&demo.task, &ratings, ctx.config())?;
    let output = Output {
        quiet,
        copy: false,
        log: !no_log,
    };
    finish(&ctx, &eval, Mode::Demo, output)
}

/// Input running out mid-task ends the session normally.
///
/// Returns `Ok(false)` when the task was abandoned at EOF.
fn ended_by_eof(result: CliResult) -> CliResult<bool> {
    match result {
        Ok(()) => Ok(true),
        Err(e) if e.is::<Cancelled>() => Ok(false),
        Err(e) => Err(e),
    }
}

fn greet(ctx: &AppContext) {
    if !ctx.welcome.is_first_run() {
        return;
    }
    ui::print_welcome();
    if let Err(e) = ctx.welcome.mark_welcomed() {
        tracing::warn!("could not record first run: {e}");
    }
}

/// Ask for a task line until it parses.
///
/// A malformed time tag is explained and asked again. Returns `None` on an
/// empty line or EOF.
fn read_task<R: BufRead>(
    ctx: &AppContext,
    prompter: &mut Prompter<R>,
    mut given: Option<String>,
    label: &str,
) -> CliResult<Option<(String, ParsedTask)>> {
    loop {
        let raw = match given.take() {
            Some(raw) => raw,
            None => match prompter.ask(label)? {
                Some(line) if !line.trim().is_empty() => line,
                _ => return Ok(None),
            },
        };

        match parse_task(&raw, ctx.config()) {
            Ok(task) => return Ok(Some((raw, task))),
            Err(e @ EngineError::MalformedTimeTag { .. }) => {
                println!("  {}", format!("→ {e}").yellow());
            }
            Err(e) => return Err(e.into()),
        }
    }
}

fn rate_prompted<R: BufRead>(
    ctx: &AppContext,
    prompter: &mut Prompter<R>,
    raw: &str,
    task: &ParsedTask,
    mode: Mode,
    output: Output,
) -> CliResult {
    if !output.quiet {
        let tags: Vec<String> = task.tags.iter().map(ToString::to_string).collect();
        ui::print_task_header(&task.description, &tags, task.planned_minutes);
    }

    let ratings: RatingSet = match mode {
        Mode::Batch => prompter.ratings_batch(task.planned_minutes)?,
        _ => prompter.ratings_interactive(task.planned_minutes)?,
    };
    let eval = evaluate(raw, &ratings, ctx.config())?;
    finish(ctx, &eval, mode, output)
}

fn finish(ctx: &AppContext, eval: &Evaluation, mode: Mode, output: Output) -> CliResult {
    ui::print_result(eval, ctx.config(), output.quiet);

    if output.copy {
        ui::print_copied(clipboard::copy(&eval.output));
    }

    if output.log {
        if let Err(e) = append_log(ctx, eval, mode) {
            eprintln!("{} could not write task log: {e}", "warning:".yellow());
        }
    }
    Ok(())
}

fn append_log(ctx: &AppContext, eval: &Evaluation, mode: Mode) -> CliResult {
    let log = ctx.task_log()?;
    log.append(&eval.log_record(Utc::now(), mode, ctx.profile_name()))?;
    tracing::debug!("logged to {}", log.path().display());
    Ok(())
}
