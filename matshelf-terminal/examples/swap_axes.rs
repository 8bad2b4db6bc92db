/// Example: swap the x and y axes of every box on a full shelf
///
/// Usage: cargo run --example swap_axes -- [expected-positions]

use std::env;
use std::io::{self, Write};
use matshelf_core::{Report, ShelfConfig, ShelfSession};
use matshelf_terminal::ReportRenderer;

fn main() -> anyhow::Result<()> {
    let config = ShelfConfig::default();
    let renderer = ReportRenderer::new(true, config.matrix_precision, config.table_precision);
    let mut session = ShelfSession::new(config);

    let applied = session.apply("1 1 1; 1 0 1; 1 1 1", "[0, 1, 0; 1, 0, 0; 0, 0, 1]")?;

    let mut out = io::stdout().lock();
    renderer.draw_applied(&mut out, applied)?;

    if let Some(expected) = env::args().nth(1) {
        let outcome = session.compare(&expected);
        let report = Report::from_outcome(&outcome, session.config().mismatch_preview);
        writeln!(out)?;
        renderer.draw_report(&mut out, &report)?;
    }

    out.flush()?;
    Ok(())
}
