/// Matshelf terminal front-end
///
/// Parses a sign matrix and a transform, prints where every shelf box moves
/// and, given an expected answer, whether it matches.
///
/// Example:
///   matshelf -z "0 0 0; 0 0 0; 0 0 1" -m "[0, 1, 0; 1, 0, 0; 0, 0, 1]" -e "1.2 -1.2 0"
use clap::Parser;
use std::io::stdout;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

use matshelf_terminal::{Cli, TerminalApp};

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut app = TerminalApp::from_cli(&cli)?;
    let passed = app.run(&mut stdout().lock(), &cli)?;

    Ok(if passed {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
