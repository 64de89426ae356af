//! Console output helpers

use crate::model::{Field, Parameters, Preset};
use std::io::Write;
use std::time::Instant;

/// Formatting of simulation state for console output
pub struct FieldFormatter;

impl FieldFormatter {
    /// Describe the parameters and their stability margin
    pub fn format_parameters(params: &Parameters) -> String {
        let mut output = String::new();
        output.push_str("Model Parameters:\n");
        output.push_str(&format!("  Du = {}, Dv = {}\n", params.du, params.dv));
        output.push_str(&format!("  F  = {}, k  = {}\n", params.feed, params.kill));
        output.push_str(&format!("  dt = {}\n", params.dt));
        output.push_str(&format!(
            "  Stability limit: dt <= {:.4} ({})\n",
            params.stability_limit(),
            if params.is_stable() { "stable" } else { "UNSTABLE" }
        ));
        output
    }

    /// One-line description of a field's extent and seed
    pub fn format_field_summary(field: &Field) -> String {
        format!(
            "Field {}x{} ({} cells, {} seeded)",
            field.width(),
            field.height(),
            field.len(),
            field.seeded_count()
        )
    }

    /// Table of the available presets
    pub fn format_presets() -> String {
        let mut output = String::new();
        output.push_str("Presets:\n");
        for preset in Preset::ALL {
            output.push_str(&format!("  {}\n", preset));
        }
        output
    }
}

/// Progress indicator for long-running operations
pub struct ProgressIndicator {
    total: usize,
    current: usize,
    last_update: Instant,
    start_time: Instant,
}

impl ProgressIndicator {
    pub fn new(total: usize) -> Self {
        let now = Instant::now();
        Self {
            total,
            current: 0,
            last_update: now,
            start_time: now,
        }
    }

    /// Update progress, redrawing at most every 100ms
    pub fn update(&mut self, current: usize) {
        self.current = current.min(self.total);
        let now = Instant::now();

        if now.duration_since(self.last_update).as_millis() > 100 {
            self.display();
            self.last_update = now;
        }
    }

    pub fn percentage(&self) -> f64 {
        if self.total > 0 {
            (self.current as f64 / self.total as f64) * 100.0
        } else {
            100.0
        }
    }

    pub fn display(&self) {
        let elapsed = self.start_time.elapsed();
        let eta = if self.current > 0 {
            let rate = self.current as f64 / elapsed.as_secs_f64();
            let remaining = (self.total - self.current) as f64 / rate;
            format!("ETA: {:.1}s", remaining)
        } else {
            "ETA: --".to_string()
        };

        print!(
            "\rProgress: {}/{} ({:.1}%) - {}",
            self.current,
            self.total,
            self.percentage(),
            eta
        );
        std::io::stdout().flush().ok();
    }

    /// Finish and clear the progress line
    pub fn finish(&self) {
        println!(
            "\rCompleted: {}/{} (100.0%) - Total time: {:.1}s",
            self.current,
            self.total,
            self.start_time.elapsed().as_secs_f64()
        );
    }
}

/// Color output utilities
pub struct ColorOutput;

impl ColorOutput {
    /// Format text with color (if terminal supports it)
    pub fn colored(text: &str, color: Color) -> String {
        if Self::supports_color() {
            format!("\x1b[{}m{}\x1b[0m", color.code(), text)
        } else {
            text.to_string()
        }
    }

    fn supports_color() -> bool {
        std::env::var("NO_COLOR").is_err()
            && (std::env::var("TERM").unwrap_or_default() != "dumb")
    }

    pub fn success(text: &str) -> String {
        Self::colored(text, Color::Green)
    }

    pub fn error(text: &str) -> String {
        Self::colored(text, Color::Red)
    }

    pub fn warning(text: &str) -> String {
        Self::colored(text, Color::Yellow)
    }

    pub fn info(text: &str) -> String {
        Self::colored(text, Color::Blue)
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Color {
    Red,
    Green,
    Yellow,
    Blue,
}

impl Color {
    fn code(self) -> u8 {
        match self {
            Color::Red => 31,
            Color::Green => 32,
            Color::Yellow => 33,
            Color::Blue => 34,
        }
    }
}
