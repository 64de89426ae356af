//! Frame sinks for the activator concentration
//!
//! Renderers only ever see an immutable borrow of `v`; they cannot affect the
//! simulation state.

pub mod image;
pub mod terminal;

pub use self::image::ImageRenderer;
pub use self::terminal::TerminalRenderer;

use crate::config::{ColorScale, OutputFormat, Settings};
use anyhow::Result;

/// One rendered snapshot of the `v` channel
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    pub index: usize,
    pub step: usize,
    pub time: f64,
    pub width: usize,
    pub height: usize,
    pub v: &'a [f64],
}

impl Frame<'_> {
    pub fn value(&self, x: usize, y: usize) -> f64 {
        self.v[y * self.width + x]
    }

    /// Min and max over finite values, `None` if there are none
    pub fn range(&self) -> Option<(f64, f64)> {
        self.v
            .iter()
            .copied()
            .filter(|value| value.is_finite())
            .fold(None, |acc, value| match acc {
                None => Some((value, value)),
                Some((min, max)) => Some((min.min(value), max.max(value))),
            })
    }
}

/// Consumer of simulation frames
pub trait Renderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()>;

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

/// Discards every frame
#[derive(Debug, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _frame: &Frame<'_>) -> Result<()> {
        Ok(())
    }
}

/// Maps raw concentrations to `[0, 1]` according to a [`ColorScale`]
#[derive(Debug, Clone)]
pub struct Normalizer {
    scale: ColorScale,
    latched: Option<(f64, f64)>,
}

impl Normalizer {
    pub fn new(scale: ColorScale) -> Self {
        Self {
            scale,
            latched: None,
        }
    }

    /// Resolve the value range to use for this frame
    pub fn range_for(&mut self, frame: &Frame<'_>) -> (f64, f64) {
        match self.scale {
            ColorScale::Fixed { min, max } => (min, max),
            ColorScale::Frame => frame.range().unwrap_or((0.0, 1.0)),
            ColorScale::Initial => *self
                .latched
                .get_or_insert_with(|| frame.range().unwrap_or((0.0, 1.0))),
        }
    }

    /// Position of `value` inside `range`, clamped to `[0, 1]`.
    /// Degenerate ranges map to the lower end; NaN maps to 0.
    pub fn normalize(value: f64, (min, max): (f64, f64)) -> f64 {
        if !value.is_finite() {
            return if value == f64::INFINITY { 1.0 } else { 0.0 };
        }
        if max > min {
            ((value - min) / (max - min)).clamp(0.0, 1.0)
        } else {
            0.0
        }
    }
}

/// Build the renderer selected by the settings
pub fn create_renderer(settings: &Settings) -> Result<Box<dyn Renderer>> {
    let output = &settings.output;
    let renderer: Box<dyn Renderer> = match output.format {
        OutputFormat::Terminal => Box::new(TerminalRenderer::new(
            output.color_scale,
            output.max_columns,
        )),
        OutputFormat::Png => Box::new(ImageRenderer::new(
            &output.output_directory,
            output.scale,
            output.color_scale,
        )?),
        OutputFormat::None => Box::new(NullRenderer),
    };
    Ok(renderer)
}
