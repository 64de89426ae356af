//! Configuration settings for Gray-Scott simulation runs

use crate::model::{Field, Parameters, Preset, Seed};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub grid: GridConfig,
    pub model: ModelConfig,
    pub seed: SeedConfig,
    pub animation: AnimationConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridConfig {
    pub width: usize,
    pub height: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub du: f64,
    pub dv: f64,
    pub feed: f64,
    pub kill: f64,
    pub dt: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeedConfig {
    /// Seed center as `[x, y]`; the grid center when omitted
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub center: Option<[usize; 2]>,
    pub radius: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimationConfig {
    pub frames: usize,
    pub frame_delay_ms: u64,
    pub steps_per_frame: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
    pub output_directory: PathBuf,
    pub color_scale: ColorScale,
    /// Pixels per cell edge in image output
    pub scale: u32,
    /// Maximum character columns for terminal output
    pub max_columns: usize,
    pub check_finite: bool,
    pub write_summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Terminal,
    Png,
    None,
}

/// How `v` values are mapped onto the colour range
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorScale {
    /// Rescale to the min/max of every frame
    Frame,
    /// Latch the min/max of the first rendered frame
    Initial,
    Fixed { min: f64, max: f64 },
}

impl Default for Settings {
    fn default() -> Self {
        let params = Parameters::default();
        Self {
            grid: GridConfig {
                width: 100,
                height: 100,
            },
            model: ModelConfig {
                du: params.du,
                dv: params.dv,
                feed: params.feed,
                kill: params.kill,
                dt: params.dt,
            },
            seed: SeedConfig {
                center: None,
                radius: 20.0,
            },
            animation: AnimationConfig {
                frames: 200,
                frame_delay_ms: 50,
                steps_per_frame: 1,
            },
            output: OutputConfig {
                format: OutputFormat::Terminal,
                output_directory: PathBuf::from("output/frames"),
                color_scale: ColorScale::Initial,
                scale: 4,
                max_columns: 100,
                check_finite: true,
                write_summary: false,
            },
        }
    }
}

impl Settings {
    /// Load settings from a YAML file
    pub fn from_file(path: &PathBuf) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let settings: Settings = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        settings.validate()?;
        Ok(settings)
    }

    /// Save settings to a YAML file
    pub fn to_file(&self, path: &PathBuf) -> Result<()> {
        let content = serde_yaml::to_string(self).context("Failed to serialize settings")?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
        }

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Validate the settings
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            anyhow::bail!(
                "Grid dimensions must be positive (width={}, height={})",
                self.grid.width,
                self.grid.height
            );
        }

        if !self.seed.radius.is_finite() || self.seed.radius < 0.0 {
            anyhow::bail!("Seed radius must be non-negative (radius={})", self.seed.radius);
        }

        let (cx, cy) = self.seed_center();
        if cx >= self.grid.width || cy >= self.grid.height {
            anyhow::bail!(
                "Seed center ({}, {}) lies outside the {}x{} grid",
                cx,
                cy,
                self.grid.width,
                self.grid.height
            );
        }

        self.parameters()
            .validate()
            .context("Invalid model parameters")?;

        if self.animation.steps_per_frame == 0 {
            anyhow::bail!("Steps per frame must be positive");
        }

        if self.output.scale == 0 {
            anyhow::bail!("Image scale must be positive");
        }

        if self.output.max_columns == 0 {
            anyhow::bail!("Terminal column limit must be positive");
        }

        if let ColorScale::Fixed { min, max } = self.output.color_scale {
            if !(min.is_finite() && max.is_finite() && min < max) {
                anyhow::bail!("Fixed color scale needs finite min < max (min={}, max={})", min, max);
            }
        }

        Ok(())
    }

    pub fn parameters(&self) -> Parameters {
        Parameters::new(
            self.model.du,
            self.model.dv,
            self.model.feed,
            self.model.kill,
            self.model.dt,
        )
    }

    pub fn seed_center(&self) -> (usize, usize) {
        match self.seed.center {
            Some([x, y]) => (x, y),
            None => (self.grid.width / 2, self.grid.height / 2),
        }
    }

    pub fn seed(&self) -> Seed {
        Seed::new(self.seed_center(), self.seed.radius)
    }

    /// Build the initial field described by these settings
    pub fn initial_field(&self) -> Result<Field> {
        Field::initialize(self.grid.width, self.grid.height, self.seed())
            .context("Failed to initialize field")
    }

    pub fn frame_delay(&self) -> Duration {
        Duration::from_millis(self.animation.frame_delay_ms)
    }

    pub fn apply_preset(&mut self, preset: Preset) {
        let (feed, kill) = preset.rates();
        self.model.feed = feed;
        self.model.kill = kill;
    }

    /// Merge settings with command line overrides
    pub fn merge_with_cli(&mut self, cli_overrides: &CliOverrides) {
        if let Some(width) = cli_overrides.width {
            self.grid.width = width;
        }
        if let Some(height) = cli_overrides.height {
            self.grid.height = height;
        }
        if let Some(preset) = cli_overrides.preset {
            self.apply_preset(preset);
        }
        // Explicit rates win over a preset
        if let Some(feed) = cli_overrides.feed {
            self.model.feed = feed;
        }
        if let Some(kill) = cli_overrides.kill {
            self.model.kill = kill;
        }
        if let Some(dt) = cli_overrides.dt {
            self.model.dt = dt;
        }
        if let Some(frames) = cli_overrides.frames {
            self.animation.frames = frames;
        }
        if let Some(format) = cli_overrides.format {
            self.output.format = format;
        }
        if let Some(ref output_dir) = cli_overrides.output_dir {
            self.output.output_directory = output_dir.clone();
        }
    }
}

/// Command line overrides for settings
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub preset: Option<Preset>,
    pub feed: Option<f64>,
    pub kill: Option<f64>,
    pub dt: Option<f64>,
    pub frames: Option<usize>,
    pub format: Option<OutputFormat>,
    pub output_dir: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_default_settings_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.seed_center(), (50, 50));
        assert_eq!(settings.parameters(), Parameters::default());
        assert_eq!(settings.frame_delay(), Duration::from_millis(50));
    }

    #[test]
    fn test_default_initial_field() {
        let field = Settings::default().initial_field().unwrap();
        assert_eq!(field.width(), 100);
        assert_eq!(field.height(), 100);
        assert_eq!(field.seeded_count(), 1257);
    }

    #[test]
    fn test_file_round_trip() {
        let temp_dir = tempdir().unwrap();
        let path = temp_dir.path().join("config/test.yaml");

        let mut settings = Settings::default();
        settings.seed.center = Some([10, 20]);
        settings.output.color_scale = ColorScale::Fixed { min: 0.0, max: 0.5 };
        settings.to_file(&path).unwrap();

        let loaded = Settings::from_file(&path).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_parse_minimal_yaml() {
        let yaml = r#"
grid: { width: 64, height: 32 }
model: { du: 0.2, dv: 0.1, feed: 0.029, kill: 0.057, dt: 1.0 }
seed: { radius: 5 }
animation: { frames: 10, frame_delay_ms: 0, steps_per_frame: 4 }
output:
  format: png
  output_directory: out
  color_scale: frame
  scale: 2
  max_columns: 80
  check_finite: false
  write_summary: true
"#;
        let settings: Settings = serde_yaml::from_str(yaml).unwrap();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.seed_center(), (32, 16));
        assert_eq!(settings.output.format, OutputFormat::Png);
        assert_eq!(settings.output.color_scale, ColorScale::Frame);
        assert_eq!(settings.animation.steps_per_frame, 4);
    }

    #[test]
    fn test_validation_failures() {
        let mut settings = Settings::default();
        settings.grid.width = 0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.radius = -1.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.seed.center = Some([100, 0]);
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.model.dt = 0.0;
        assert!(settings.validate().is_err());

        let mut settings = Settings::default();
        settings.output.color_scale = ColorScale::Fixed { min: 1.0, max: 0.0 };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_merge_with_cli() {
        let mut settings = Settings::default();
        let overrides = CliOverrides {
            width: Some(64),
            preset: Some(Preset::Coral),
            kill: Some(0.061),
            frames: Some(5),
            format: Some(OutputFormat::None),
            ..Default::default()
        };
        settings.merge_with_cli(&overrides);

        assert_eq!(settings.grid.width, 64);
        assert_eq!(settings.grid.height, 100);
        assert_eq!(settings.model.feed, 0.037);
        assert_eq!(settings.model.kill, 0.061);
        assert_eq!(settings.animation.frames, 5);
        assert_eq!(settings.output.format, OutputFormat::None);
    }
}
