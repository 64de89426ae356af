//! Physical parameters of the Gray-Scott model

use crate::error::{FieldError, Result};
use serde::{Deserialize, Serialize};

/// Immutable parameter bundle for a simulation run.
///
/// Grid spacing is fixed at 1, so the diffusion rates are expressed in
/// cells² per unit time.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Diffusion rate of the substrate `u`
    pub du: f64,
    /// Diffusion rate of the activator `v`
    pub dv: f64,
    /// Feed rate `F`
    pub feed: f64,
    /// Kill rate `k`
    pub kill: f64,
    /// Time step
    pub dt: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            du: 0.16,
            dv: 0.08,
            feed: 0.035,
            kill: 0.065,
            dt: 1.0,
        }
    }
}

impl Parameters {
    pub fn new(du: f64, dv: f64, feed: f64, kill: f64, dt: f64) -> Self {
        Self { du, dv, feed, kill, dt }
    }

    /// Check that the parameters describe a meaningful run.
    ///
    /// Exceeding the stability limit is not an error here; see
    /// [`Parameters::is_stable`].
    pub fn validate(&self) -> Result<()> {
        let all = [self.du, self.dv, self.feed, self.kill, self.dt];
        if all.iter().any(|value| !value.is_finite()) {
            return Err(FieldError::InvalidParameters(
                "all parameters must be finite".to_string(),
            ));
        }
        if self.du <= 0.0 || self.dv <= 0.0 {
            return Err(FieldError::InvalidParameters(format!(
                "diffusion rates must be > 0 (du={}, dv={})",
                self.du, self.dv
            )));
        }
        if self.feed < 0.0 || self.kill < 0.0 {
            return Err(FieldError::InvalidParameters(format!(
                "feed and kill rates must be >= 0 (feed={}, kill={})",
                self.feed, self.kill
            )));
        }
        if self.dt <= 0.0 {
            return Err(FieldError::InvalidParameters(format!(
                "time step must be > 0 (dt={})",
                self.dt
            )));
        }
        Ok(())
    }

    /// Largest time step for which the diffusion part of the explicit Euler
    /// update on the 5-point stencil stays bounded.
    pub fn stability_limit(&self) -> f64 {
        let d_max = self.du.max(self.dv);
        if d_max <= 0.0 {
            f64::INFINITY
        } else {
            0.25 / d_max
        }
    }

    pub fn is_stable(&self) -> bool {
        self.dt <= self.stability_limit()
    }

    /// Replace feed and kill rates, keeping diffusion and time step.
    pub fn with_rates(self, feed: f64, kill: f64) -> Self {
        Self { feed, kill, ..self }
    }
}
