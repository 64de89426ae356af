//! Report describing a finished run

use crate::model::{FieldStats, Parameters};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Outcome of [`Simulation::run`](super::Simulation::run).
///
/// This is a report only; runs never resume from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub width: usize,
    pub height: usize,
    pub parameters: Parameters,
    /// Includes the initial frame
    pub frames_rendered: usize,
    pub steps: usize,
    pub simulated_time: f64,
    pub elapsed_ms: u64,
    pub stopped_early: bool,
    pub final_stats: FieldStats,
}

impl RunSummary {
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(self).context("Failed to serialize run summary")
    }

    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }
        std::fs::write(path, self.to_json()?)
            .with_context(|| format!("Failed to write run summary: {}", path.display()))?;
        Ok(())
    }

    /// Average wall-clock cost of one step
    pub fn ms_per_step(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.elapsed_ms as f64 / self.steps as f64
        }
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run Summary:")?;
        writeln!(f, "  Grid: {}x{}", self.width, self.height)?;
        writeln!(
            f,
            "  Parameters: Du={} Dv={} F={} k={} dt={}",
            self.parameters.du,
            self.parameters.dv,
            self.parameters.feed,
            self.parameters.kill,
            self.parameters.dt
        )?;
        writeln!(f, "  Frames rendered: {}", self.frames_rendered)?;
        writeln!(
            f,
            "  Steps: {} (t = {:.2})",
            self.steps, self.simulated_time
        )?;
        writeln!(
            f,
            "  Elapsed: {} ms ({:.3} ms/step)",
            self.elapsed_ms,
            self.ms_per_step()
        )?;
        if self.stopped_early {
            writeln!(f, "  Stopped early on request")?;
        }
        write!(f, "{}", self.final_stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Field, Seed};
    use tempfile::tempdir;

    fn summary() -> RunSummary {
        let field = Field::initialize(10, 10, Seed::new((5, 5), 2.0)).unwrap();
        RunSummary {
            width: 10,
            height: 10,
            parameters: Parameters::default(),
            frames_rendered: 3,
            steps: 4,
            simulated_time: 4.0,
            elapsed_ms: 8,
            stopped_early: false,
            final_stats: field.stats(),
        }
    }

    #[test]
    fn test_save_summary() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("out/run_summary.json");
        summary().save_to_file(&path).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(value["steps"], 4);
        assert_eq!(value["parameters"]["du"], 0.16);
        assert_eq!(value["final_stats"]["non_finite"], 0);
    }

    #[test]
    fn test_display_and_rate() {
        let summary = summary();
        assert_eq!(summary.ms_per_step(), 2.0);
        let text = summary.to_string();
        assert!(text.contains("Grid: 10x10"));
        assert!(text.contains("Frames rendered: 3"));
    }
}
