//! Named feed/kill regimes

use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known (F, k) pairs producing recognisable patterns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum Preset {
    /// F = 0.035, k = 0.065
    Default,
    Mitosis,
    Coral,
    Maze,
    Solitons,
    Worms,
    Fingerprint,
    Spots,
    Chaos,
    MovingSpots,
}

impl Preset {
    pub const ALL: [Preset; 10] = [
        Preset::Default,
        Preset::Mitosis,
        Preset::Coral,
        Preset::Maze,
        Preset::Solitons,
        Preset::Worms,
        Preset::Fingerprint,
        Preset::Spots,
        Preset::Chaos,
        Preset::MovingSpots,
    ];

    /// Returns `(feed, kill)` for this preset
    pub fn rates(self) -> (f64, f64) {
        match self {
            Preset::Default => (0.035, 0.065),
            Preset::Mitosis => (0.028, 0.062),
            Preset::Coral => (0.037, 0.060),
            Preset::Maze => (0.029, 0.057),
            Preset::Solitons => (0.030, 0.062),
            Preset::Worms => (0.078, 0.061),
            Preset::Fingerprint => (0.037, 0.060),
            Preset::Spots => (0.035, 0.065),
            Preset::Chaos => (0.026, 0.051),
            Preset::MovingSpots => (0.014, 0.054),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Preset::Default => "default",
            Preset::Mitosis => "mitosis",
            Preset::Coral => "coral",
            Preset::Maze => "maze",
            Preset::Solitons => "solitons",
            Preset::Worms => "worms",
            Preset::Fingerprint => "fingerprint",
            Preset::Spots => "spots",
            Preset::Chaos => "chaos",
            Preset::MovingSpots => "moving_spots",
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (feed, kill) = self.rates();
        write!(f, "{:<13} F={:.3} k={:.3}", self.name(), feed, kill)
    }
}
