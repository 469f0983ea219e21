mod check;
mod replay;
mod scaffold;
mod tui;

use std::path::Path;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{Result, WrapErr};
use ruleviz_core::AnalysisSheet;
use tracing_subscriber::EnvFilter;

/// Check, replay and browse translation analysis sheets
#[derive(Parser, Debug)]
#[command(version, about)]
struct Arguments {
    /// Log debug output to stderr (ignored by `view`)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    New(scaffold::NewArgs),
    Check(check::CheckArgs),
    Replay(replay::ReplayArgs),
    View(tui::ViewArgs),
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Arguments::parse();

    match args.command {
        Command::New(new_args) => scaffold::new_project(new_args),
        Command::Check(check_args) => {
            init_logging(args.verbose);
            check::run(check_args)
        }
        Command::Replay(replay_args) => {
            init_logging(args.verbose);
            replay::run(replay_args)
        }
        // the terminal belongs to the TUI, so no log output here
        Command::View(view_args) => tui::run(view_args),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default)),
        )
        .init();
}

pub fn load_sheet(path: &Path) -> Result<AnalysisSheet> {
    let json = std::fs::read_to_string(path)
        .wrap_err_with(|| format!("failed to read sheet {}", path.display()))?;
    AnalysisSheet::load(&json).wrap_err_with(|| format!("failed to parse sheet {}", path.display()))
}
