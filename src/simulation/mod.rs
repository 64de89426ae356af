//! Simulation driver and run reporting

pub mod driver;
pub mod summary;

pub use driver::{RunOptions, Simulation, StopSignal};
pub use summary::RunSummary;
