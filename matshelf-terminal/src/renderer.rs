/// Coloured text rendering of shelf results for the terminal
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    QueueableCommand,
};
use matshelf_core::format::{format_matrix, format_number, round};
use matshelf_core::shelf::Rgb;
use matshelf_core::{Applied, Report, ShelfBox, Tone};
use std::io::Write;

/// Glyphs for an empty slot, a positive box and a negative box
const EMPTY_SLOT: &str = "[ ]";
const POSITIVE_BOX: &str = "[■]";
const NEGATIVE_BOX: &str = "[□]";

/// Writes results as plain or ANSI-coloured text
pub struct ReportRenderer {
    color: bool,
    matrix_precision: i32,
    table_precision: i32,
}

impl ReportRenderer {
    pub fn new(color: bool, matrix_precision: i32, table_precision: i32) -> Self {
        Self {
            color,
            matrix_precision,
            table_precision,
        }
    }

    fn paint<W: Write>(&self, writer: &mut W, color: Color, text: &str) -> std::io::Result<()> {
        if self.color {
            writer.queue(SetForegroundColor(color))?;
            writer.queue(Print(text))?;
            writer.queue(ResetColor)?;
        } else {
            writer.queue(Print(text))?;
        }
        Ok(())
    }

    pub fn draw_applied<W: Write>(&self, writer: &mut W, applied: &Applied) -> std::io::Result<()> {
        self.paint(writer, Color::Yellow, "Matrix (R³→R³):\n")?;
        writer.queue(Print(format_matrix(&applied.transform, self.matrix_precision)))?;
        writer.queue(Print("\n\n"))?;

        self.paint(writer, Color::Yellow, "Sign shelf:\n")?;
        self.draw_shelf(writer, &applied.boxes)?;
        writer.queue(Print("\n"))?;

        self.paint(writer, Color::Yellow, "Positions:\n")?;
        self.draw_positions(writer, applied)?;
        Ok(())
    }

    /// Draw the 3×3 slot grid, colouring each box
    pub fn draw_shelf<W: Write>(&self, writer: &mut W, boxes: &[ShelfBox]) -> std::io::Result<()> {
        for row in 0..3 {
            for col in 0..3 {
                let slot = row * 3 + col;
                match boxes.iter().find(|b| b.slot == slot) {
                    Some(b) => {
                        let glyph = if b.sign < 0 { NEGATIVE_BOX } else { POSITIVE_BOX };
                        self.paint(writer, rgb(b.color), glyph)?;
                    }
                    None => {
                        self.paint(writer, Color::DarkGrey, EMPTY_SLOT)?;
                    }
                }
            }
            writer.queue(Print('\n'))?;
        }
        Ok(())
    }

    pub fn draw_positions<W: Write>(&self, writer: &mut W, applied: &Applied) -> std::io::Result<()> {
        let fmt = |p: &nalgebra::Vector3<f64>| {
            let cells: Vec<String> = p
                .iter()
                .map(|v| format_number(round(*v, self.table_precision)))
                .collect();
            format!("[{}]", cells.join(", "))
        };

        for (i, ((before, after), b)) in applied
            .before
            .iter()
            .zip(applied.after.iter())
            .zip(&applied.boxes)
            .enumerate()
        {
            self.paint(writer, rgb(b.color), &format!("{:>2}", i))?;
            writer.queue(Print(format!("  {:<24} → {}\n", fmt(before), fmt(after))))?;
        }
        Ok(())
    }

    pub fn draw_report<W: Write>(&self, writer: &mut W, report: &Report) -> std::io::Result<()> {
        let color = match report.tone {
            Tone::Success => Color::Green,
            Tone::Mismatch => Color::Red,
            Tone::Warning => Color::Yellow,
        };
        self.paint(writer, color, &report.message)?;
        writer.queue(Print('\n'))?;
        Ok(())
    }
}

fn rgb(c: Rgb) -> Color {
    Color::Rgb {
        r: c.r,
        g: c.g,
        b: c.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use matshelf_core::{Comparison, ShelfSession};

    fn render<F>(draw: F) -> String
    where
        F: FnOnce(&ReportRenderer, &mut Vec<u8>) -> std::io::Result<()>,
    {
        let renderer = ReportRenderer::new(false, 3, 2);
        let mut out = Vec::new();
        draw(&renderer, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_draw_shelf() {
        let mut session = ShelfSession::default();
        let applied = session
            .apply("0 0 0; 0 0 0; -1 0 1", "identity(3)")
            .unwrap()
            .clone();
        let text = render(|r, out| r.draw_shelf(out, &applied.boxes));
        assert_eq!(text, "[■][ ][□]\n[ ][ ][ ]\n[ ][ ][ ]\n");
    }

    #[test]
    fn test_draw_applied() {
        let mut session = ShelfSession::default();
        let applied = session
            .apply("0 0 0; 0 0 0; 0 0 1", "2 0 0; 0 1 0; 0 0 1")
            .unwrap()
            .clone();
        let text = render(|r, out| r.draw_applied(out, &applied));
        assert!(text.contains("     2      0      0"));
        assert!(text.contains("[-1.2, 1.2, 0]"));
        assert!(text.contains("→ [-2.4, 1.2, 0]"));
    }

    #[test]
    fn test_draw_report() {
        let report = Report::from_outcome(&Ok(Comparison::Match { tolerance: 0.01 }), 3);
        let text = render(|r, out| r.draw_report(out, &report));
        assert_eq!(text, "Match! (tol=0.01)\n");
    }

    #[test]
    fn test_colored_output_has_escapes() {
        let renderer = ReportRenderer::new(true, 3, 2);
        let mut out = Vec::new();
        renderer.paint(&mut out, Color::Green, "ok").unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\u{1b}["));
        assert!(text.contains("ok"));
    }
}
