//! Configuration management for Gray-Scott runs

pub mod settings;

pub use settings::{
    AnimationConfig, CliOverrides, ColorScale, GridConfig, ModelConfig, OutputConfig,
    OutputFormat, SeedConfig, Settings,
};
