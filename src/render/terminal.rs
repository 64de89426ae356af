//! Terminal animation of the activator field

use super::{Frame, Normalizer, Renderer};
use crate::config::ColorScale;
use anyhow::{Context, Result};
use std::io::{self, Stdout, Write};

/// Intensity ramp from low to high `v`
const RAMP: &[char] = &[' ', '.', ':', '-', '=', '+', '*', '#', '%', '@'];

/// Redraws the field in place using an ASCII intensity ramp
pub struct TerminalRenderer<W: Write = Stdout> {
    writer: W,
    normalizer: Normalizer,
    max_columns: usize,
    clear_screen: bool,
}

impl TerminalRenderer<Stdout> {
    pub fn new(color_scale: ColorScale, max_columns: usize) -> Self {
        Self::with_writer(io::stdout(), color_scale, max_columns, true)
    }
}

impl<W: Write> TerminalRenderer<W> {
    pub fn with_writer(
        writer: W,
        color_scale: ColorScale,
        max_columns: usize,
        clear_screen: bool,
    ) -> Self {
        Self {
            writer,
            normalizer: Normalizer::new(color_scale),
            max_columns: max_columns.max(1),
            clear_screen,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Character for a normalized intensity in `[0, 1]`
    pub fn shade(intensity: f64) -> char {
        let last = RAMP.len() - 1;
        let idx = (intensity.clamp(0.0, 1.0) * last as f64).round() as usize;
        RAMP[idx.min(last)]
    }

    /// Render a frame to text, sampling every `stride` columns and every
    /// `2 * stride` rows so cells stay roughly square on screen
    pub fn format_frame(frame: &Frame<'_>, range: (f64, f64), max_columns: usize) -> String {
        let stride = frame.width.div_ceil(max_columns.max(1)).max(1);
        let row_stride = stride * 2;

        let mut output = String::with_capacity((frame.width / stride + 1) * (frame.height / row_stride + 1));
        for y in (0..frame.height).step_by(row_stride) {
            for x in (0..frame.width).step_by(stride) {
                let intensity = Normalizer::normalize(frame.value(x, y), range);
                output.push(Self::shade(intensity));
            }
            output.push('\n');
        }
        output
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let range = self.normalizer.range_for(frame);
        let body = Self::format_frame(frame, range, self.max_columns);

        if self.clear_screen {
            write!(self.writer, "\x1b[H\x1b[2J")?;
        }
        write!(self.writer, "{}", body)?;
        writeln!(
            self.writer,
            "frame {:4}  step {:6}  t = {:.2}  v ∈ [{:.3}, {:.3}]",
            frame.index, frame.step, frame.time, range.0, range.1
        )?;
        self.writer.flush().context("Failed to flush terminal output")?;
        Ok(())
    }
}
