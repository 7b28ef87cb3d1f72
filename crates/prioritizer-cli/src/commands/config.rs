use clap::{Subcommand, ValueEnum};
use colored::Colorize;

use crate::context::AppContext;

#[derive(Clone, Copy, ValueEnum)]
pub enum Format {
    Json,
    Toml,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration for the selected profile
    Show {
        /// Output format
        #[arg(long, value_enum, default_value_t = Format::Json)]
        format: Format,
    },
    /// Check weights and thresholds; exits non-zero on errors
    Validate,
    /// Print the profile file and task log in use
    Path,
}

pub fn run(action: ConfigAction, profile: Option<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let ctx = AppContext::load(profile)?;
    match action {
        ConfigAction::Show { format } => {
            let rendered = match format {
                Format::Toml => toml::to_string_pretty(ctx.config())?,
                Format::Json => serde_json::to_string_pretty(ctx.config())?,
            };
            println!("{}", rendered.trim_end());
        }
        ConfigAction::Validate => {
            let report = ctx.config().validate();
            for warning in &report.warnings {
                println!("{} {warning}", "warning:".yellow());
            }
            for error in &report.errors {
                println!("{} {error}", "error:".red());
            }
            if !report.is_valid() {
                return Err(format!("configuration has {} error(s)", report.errors.len()).into());
            }
            println!("ok");
        }
        ConfigAction::Path => {
            match &ctx.profile.path {
                Some(path) => println!("profile: {}", path.display()),
                None => println!("profile: (none, using defaults)"),
            }
            println!("log: {}", ctx.task_log()?.path().display());
        }
    }
    Ok(())
}
