//! Gray-Scott simulation core

pub mod field;
pub mod parameters;
pub mod presets;
pub mod stepper;

pub use field::{
    ChannelStats, Field, FieldStats, Seed, BACKGROUND_U, BACKGROUND_V, SEED_U, SEED_V,
};
pub use parameters::Parameters;
pub use presets::Preset;
pub use stepper::GrayScottStepper;
