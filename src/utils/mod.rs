//! Utility helpers

pub mod display;

pub use display::{Color, ColorOutput, FieldFormatter, ProgressIndicator};
