//! Explicit Euler time stepping for the Gray-Scott equations
//!
//! ```text
//! u' = u + dt * (Du * ∇²u - u v² + F (1 - u))
//! v' = v + dt * (Dv * ∇²v + u v² - (F + k) v)
//! ```
//!
//! The Laplacian uses the 5-point stencil with periodic (toroidal) wrapping.
//! Every step reads only the previous field and writes fresh buffers, so all
//! cells are updated from one consistent snapshot.
//!
//! The scheme is conditionally stable: a `dt` above
//! [`Parameters::stability_limit`] makes the field grow without bound and
//! eventually become NaN. Values are never clamped.

use super::{Field, Parameters};

/// Gray-Scott update engine
pub struct GrayScottStepper;

impl GrayScottStepper {
    /// Advance the field by one time step of `params.dt`
    pub fn step(current: &Field, params: &Parameters) -> Field {
        let width = current.width();
        let height = current.height();
        let u = current.u();
        let v = current.v();

        let lap_u = Self::laplacian(u, width, height);
        let lap_v = Self::laplacian(v, width, height);
        let reaction = Self::reaction(u, v);

        let mut next_u = Vec::with_capacity(u.len());
        let mut next_v = Vec::with_capacity(v.len());
        for idx in 0..u.len() {
            let du_dt = params.du * lap_u[idx] - reaction[idx] + params.feed * (1.0 - u[idx]);
            let dv_dt =
                params.dv * lap_v[idx] + reaction[idx] - (params.feed + params.kill) * v[idx];
            next_u.push(u[idx] + params.dt * du_dt);
            next_v.push(v[idx] + params.dt * dv_dt);
        }

        current.with_channels(next_u, next_v)
    }

    /// Advance the field by `steps` time steps
    pub fn step_n(mut field: Field, params: &Parameters, steps: usize) -> Field {
        for _ in 0..steps {
            field = Self::step(&field, params);
        }
        field
    }

    /// Discrete Laplacian of a row-major channel with wrap-around indexing
    pub fn laplacian(values: &[f64], width: usize, height: usize) -> Vec<f64> {
        let mut result = Vec::with_capacity(values.len());
        for y in 0..height {
            let up = if y == 0 { height - 1 } else { y - 1 };
            let down = if y + 1 == height { 0 } else { y + 1 };
            for x in 0..width {
                let left = if x == 0 { width - 1 } else { x - 1 };
                let right = if x + 1 == width { 0 } else { x + 1 };

                let center = values[y * width + x];
                let neighbors = values[y * width + left]
                    + values[y * width + right]
                    + values[up * width + x]
                    + values[down * width + x];
                result.push(neighbors - 4.0 * center);
            }
        }
        result
    }

    /// Reaction term `u * v²`, elementwise
    pub fn reaction(u: &[f64], v: &[f64]) -> Vec<f64> {
        u.iter().zip(v).map(|(&u, &v)| u * v * v).collect()
    }
}
