/// Terminal front-end: apply a transform to the sign shelf and check an answer
use anyhow::{Context, Result};
use clap::Parser;
use crossterm::tty::IsTty;
use matshelf_core::{Report, ShelfConfig, ShelfSession};
use std::io::{stdout, Write};
use std::path::PathBuf;

pub mod renderer;

pub use renderer::ReportRenderer;

/// Sign matrix used when none is given: every slot but the centre
pub const DEFAULT_SIGNS: &str = "1 1 1; 1 0 1; 1 1 1";

/// Move shelf boxes with a 3×3 matrix and compare against an expected answer
#[derive(Debug, Parser)]
#[command(name = "matshelf", version)]
pub struct Cli {
    /// Sign matrix Z (entries -1, 0 or 1): JSON, expression or rows
    #[arg(short = 'z', long, default_value = DEFAULT_SIGNS, allow_hyphen_values = true)]
    pub signs: String,

    /// Transform matrix M (3×3)
    #[arg(short, long, allow_hyphen_values = true)]
    pub matrix: String,

    /// Expected N×3 positions after the transform
    #[arg(short, long, allow_hyphen_values = true)]
    pub expected: Option<String>,

    /// JSON config file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Disable coloured output
    #[arg(long)]
    pub no_color: bool,
}

/// Main application struct for terminal output
pub struct TerminalApp {
    session: ShelfSession,
    renderer: ReportRenderer,
}

impl TerminalApp {
    pub fn new(config: ShelfConfig, color: bool) -> Self {
        let renderer = ReportRenderer::new(color, config.matrix_precision, config.table_precision);
        Self {
            session: ShelfSession::new(config),
            renderer,
        }
    }

    /// Build from command line arguments, loading the config file if given
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = match &cli.config {
            Some(path) => ShelfConfig::load(path)
                .with_context(|| format!("failed to load config {}", path.display()))?,
            None => ShelfConfig::default(),
        };
        let color = !cli.no_color && stdout().is_tty();
        Ok(Self::new(config, color))
    }

    /// Apply, render and optionally compare.
    ///
    /// Returns whether the comparison passed (`true` when nothing was compared).
    pub fn run<W: Write>(&mut self, writer: &mut W, cli: &Cli) -> Result<bool> {
        let applied = self
            .session
            .apply(&cli.signs, &cli.matrix)
            .context("could not apply matrix")?;
        self.renderer.draw_applied(writer, applied)?;

        let mut passed = true;
        if let Some(expected) = &cli.expected {
            let outcome = self.session.compare(expected);
            let report = Report::from_outcome(&outcome, self.session.config().mismatch_preview);
            tracing::info!(ok = report.ok, "compared expected positions");
            writer.write_all(b"\n")?;
            self.renderer.draw_report(writer, &report)?;
            passed = report.ok;
        }

        writer.flush()?;
        Ok(passed)
    }
}
