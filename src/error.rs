//! Error types for field construction and numerical diagnostics

use thiserror::Error;

/// Errors raised by the simulation core.
///
/// Construction errors are reported before any stepping begins. `NonFinite`
/// is only produced by explicit diagnostics; `step` itself never fails.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FieldError {
    #[error("Grid dimensions must be positive (width={width}, height={height})")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Seed radius must be finite and non-negative (radius={0})")]
    InvalidRadius(f64),

    #[error("Seed center ({x}, {y}) lies outside the {width}x{height} grid")]
    CenterOutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("Channel '{channel}' has {actual} cells, expected {expected}")]
    ShapeMismatch {
        channel: &'static str,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid model parameters: {0}")]
    InvalidParameters(String),

    #[error("Field contains {count} non-finite value(s); the explicit Euler scheme has diverged")]
    NonFinite { count: usize },
}

pub type Result<T> = std::result::Result<T, FieldError>;
