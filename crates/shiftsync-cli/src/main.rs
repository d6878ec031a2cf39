#![forbid(unsafe_code)]

mod client;
mod cmd;
mod output;

use clap::{Parser, Subcommand};
use output::OutputMode;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "shiftsync: ERP-to-shopfloor schedule reconciliation",
    long_about = None
)]
struct Cli {
    /// Enable verbose logging.
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON output instead of human-readable text.
    #[arg(long, global = true)]
    json: bool,

    /// Path to a shiftsync.toml configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Derive the output mode from flags.
    fn output_mode(&self) -> OutputMode {
        if self.json {
            OutputMode::Json
        } else {
            OutputMode::Human
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(
        about = "Analyze a workday and show the pending change sets",
        long_about = "Fetch the ERP schedule for one workday + shift, diff it against the \
                      local assignment snapshot, and show the resulting ADD/UPDATE/DELETE sets.",
        after_help = "EXAMPLES:\n    # Analyze the day shift\n    ssy plan --date 2026-01-17 --shift day\n\n    # Offline, from exported JSON\n    ssy plan --date 2026-01-17 --shift day --from-files export/\n\n    # Emit machine-readable output\n    ssy plan --date 2026-01-17 --shift day --json"
    )]
    Plan(cmd::plan::PlanArgs),

    #[command(
        about = "Apply selected changes to the event-group store",
        long_about = "Run the analysis pass, filter it down to the selected change ids, and \
                      submit everything as one combined batch request.",
        after_help = "EXAMPLES:\n    # Apply every detected change\n    ssy apply --date 2026-01-17 --shift day\n\n    # Apply everything except one change\n    ssy apply --date 2026-01-17 --shift day --skip WC-9-P-100-WO-55\n\n    # Inspect the batch body without submitting\n    ssy apply --date 2026-01-17 --shift day --dry-run --json"
    )]
    Apply(cmd::apply::ApplyArgs),

    #[command(
        about = "List the device directory",
        after_help = "EXAMPLES:\n    # Devices of the configured cluster\n    ssy devices\n\n    # Another cluster, as JSON\n    ssy devices --cluster plant-9 --json"
    )]
    Devices(cmd::devices::DevicesArgs),

    #[command(
        about = "Show shift windows for a workday",
        after_help = "EXAMPLES:\n    # All three windows as UTC instants\n    ssy shifts --date 2026-01-17"
    )]
    Shifts(cmd::shifts::ShiftsArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let output = cli.output_mode();

    match run(&cli, output) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            output::render_error(output, &format!("{err:#}"));
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, output: OutputMode) -> anyhow::Result<()> {
    let config = match &cli.config {
        Some(path) => shiftsync_core::config::load_config(path)?,
        None => shiftsync_core::config::resolve_config()?,
    };

    match &cli.command {
        Commands::Plan(args) => cmd::plan::run_plan(args, &config, output),
        Commands::Apply(args) => cmd::apply::run_apply(args, &config, output),
        Commands::Devices(args) => cmd::devices::run_devices(args, &config, output),
        Commands::Shifts(args) => cmd::shifts::run_shifts(args, output),
    }
}

/// Initialize tracing to stderr, honoring `SHIFTSYNC_LOG` over `--verbose`.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("SHIFTSYNC_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}
