use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod clipboard;
mod commands;
mod context;
mod prompt;
mod ui;

#[derive(Parser)]
#[command(
    name = "tp",
    version,
    about = "Task Prioritizer: a calm tool for choosing what to work on and knowing when to stop",
    after_help = ui::HELP_EPILOG
)]
struct Cli {
    /// Load the .env.NAME profile (falls back to the default if not found)
    #[arg(short, long, global = true, value_name = "NAME")]
    profile: Option<String>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score and annotate one task
    Rate(commands::rate::RateArgs),
    /// Score tasks one after another until an empty line or EOF
    Loop(commands::rate::LoopArgs),
    /// Score the configured demo task without prompting
    Demo {
        /// Minimal output (just the annotated task)
        #[arg(short, long)]
        quiet: bool,
        /// Do not append to the task log
        #[arg(long)]
        no_log: bool,
    },
    /// Configuration inspection
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        /// Target shell
        shell: clap_complete::Shell,
    },
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() {
    init_tracing();
    let cli = Cli::parse();
    ui::configure_color(cli.no_color);

    let profile = cli.profile.as_deref();
    let result = match cli.command {
        Commands::Rate(args) => commands::rate::run(args, profile),
        Commands::Loop(args) => commands::rate::run_loop(args, profile),
        Commands::Demo { quiet, no_log } => commands::rate::run_demo(quiet, no_log, profile),
        Commands::Config { action } => commands::config::run(action, profile),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "tp", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}
