//! PNG frame output through the inferno colour map

use super::{Frame, Normalizer, Renderer};
use crate::config::ColorScale;
use anyhow::{anyhow, Context, Result};
use colorgrad::Gradient;
use plotters::prelude::*;
use std::path::{Path, PathBuf};

/// Writes one `v_NNNNNN.png` per frame
pub struct ImageRenderer {
    output_dir: PathBuf,
    scale: u32,
    normalizer: Normalizer,
    gradient: Box<dyn Gradient>,
    written: Vec<PathBuf>,
}

impl ImageRenderer {
    pub fn new<P: AsRef<Path>>(output_dir: P, scale: u32, color_scale: ColorScale) -> Result<Self> {
        let output_dir = output_dir.as_ref().to_path_buf();
        std::fs::create_dir_all(&output_dir)
            .with_context(|| format!("Failed to create directory: {}", output_dir.display()))?;

        Ok(Self {
            output_dir,
            scale: scale.max(1),
            normalizer: Normalizer::new(color_scale),
            gradient: Box::new(colorgrad::preset::inferno()),
            written: Vec::new(),
        })
    }

    pub fn frame_path(&self, index: usize) -> PathBuf {
        self.output_dir.join(format!("v_{:06}.png", index))
    }

    /// Paths of all frames written so far
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }

    fn value_to_color(&self, value: f64, range: (f64, f64)) -> RGBColor {
        let normalized = Normalizer::normalize(value, range);
        let rgba = self.gradient.at(normalized as f32).to_rgba8();
        RGBColor(rgba[0], rgba[1], rgba[2])
    }
}

impl Renderer for ImageRenderer {
    fn render(&mut self, frame: &Frame<'_>) -> Result<()> {
        let range = self.normalizer.range_for(frame);
        let path = self.frame_path(frame.index);
        let size = (
            frame.width as u32 * self.scale,
            frame.height as u32 * self.scale,
        );

        {
            let root = BitMapBackend::new(&path, size).into_drawing_area();
            let scale = self.scale as i32;
            for y in 0..frame.height {
                for x in 0..frame.width {
                    let color = self.value_to_color(frame.value(x, y), range);
                    let x0 = x as i32 * scale;
                    let y0 = y as i32 * scale;
                    root.draw(&Rectangle::new(
                        [(x0, y0), (x0 + scale - 1, y0 + scale - 1)],
                        color.filled(),
                    ))
                    .map_err(|e| anyhow!("Failed to draw frame {}: {}", frame.index, e))?;
                }
            }
            root.present()
                .map_err(|e| anyhow!("Failed to write {}: {}", path.display(), e))?;
        }

        tracing::debug!(path = %path.display(), "saved frame");
        self.written.push(path);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        tracing::info!(
            frames = self.written.len(),
            directory = %self.output_dir.display(),
            "image frames written"
        );
        Ok(())
    }
}
