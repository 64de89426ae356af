//! Gray-Scott reaction-diffusion simulator
//!
//! Simulates the two-species Gray-Scott model on a periodic 2D grid with an
//! explicit Euler scheme and renders the activator concentration as an
//! animation.

pub mod config;
pub mod error;
pub mod model;
pub mod render;
pub mod simulation;
pub mod utils;

pub use config::Settings;
pub use error::FieldError;
pub use model::{Field, GrayScottStepper, Parameters, Seed};
pub use simulation::{RunOptions, RunSummary, Simulation, StopSignal};

use anyhow::Result;

/// Run a full simulation as described by `settings` with its configured renderer
pub fn run_simulation(settings: &Settings) -> Result<RunSummary> {
    let mut simulation = Simulation::from_settings(settings)?;
    let mut renderer = render::create_renderer(settings)?;
    simulation.run(
        &RunOptions::from_settings(settings),
        renderer.as_mut(),
        &StopSignal::new(),
    )
}
