//! Concentration field on a periodic grid

use crate::error::{FieldError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Background substrate concentration
pub const BACKGROUND_U: f64 = 1.0;
/// Background activator concentration
pub const BACKGROUND_V: f64 = 0.0;
/// Substrate concentration inside the seed disturbance
pub const SEED_U: f64 = 0.5;
/// Activator concentration inside the seed disturbance
pub const SEED_V: f64 = 0.25;

/// Circular disturbance applied once before the first step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Seed {
    pub center: (usize, usize),
    pub radius: f64,
}

impl Seed {
    pub fn new(center: (usize, usize), radius: f64) -> Self {
        Self { center, radius }
    }

    /// Inclusive membership test, `(x-cx)² + (y-cy)² <= r²`
    pub fn contains(&self, x: usize, y: usize) -> bool {
        let dx = x as f64 - self.center.0 as f64;
        let dy = y as f64 - self.center.1 as f64;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// The two concentration channels of a Gray-Scott simulation.
///
/// Both channels are stored row-major with `index = y * width + x`. The shape
/// is fixed at construction; stepping produces a new `Field` of the same shape.
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    width: usize,
    height: usize,
    u: Vec<f64>,
    v: Vec<f64>,
}

impl Field {
    /// Background field (`u = 1`, `v = 0`) with a circular seed disturbance.
    pub fn initialize(width: usize, height: usize, seed: Seed) -> Result<Self> {
        let mut field = Self::uniform(width, height)?;

        if !seed.radius.is_finite() || seed.radius < 0.0 {
            return Err(FieldError::InvalidRadius(seed.radius));
        }
        let (cx, cy) = seed.center;
        if cx >= width || cy >= height {
            return Err(FieldError::CenterOutOfBounds {
                x: cx,
                y: cy,
                width,
                height,
            });
        }

        for y in 0..height {
            for x in 0..width {
                if seed.contains(x, y) {
                    let idx = field.index(x, y);
                    field.u[idx] = SEED_U;
                    field.v[idx] = SEED_V;
                }
            }
        }

        tracing::debug!(
            width,
            height,
            cx,
            cy,
            radius = seed.radius,
            seeded = field.seeded_count(),
            "initialized field"
        );
        Ok(field)
    }

    /// Background field without any disturbance
    pub fn uniform(width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions { width, height });
        }
        let size = width * height;
        Ok(Self {
            width,
            height,
            u: vec![BACKGROUND_U; size],
            v: vec![BACKGROUND_V; size],
        })
    }

    /// Build a field from explicit row-major channel data
    pub fn from_channels(width: usize, height: usize, u: Vec<f64>, v: Vec<f64>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(FieldError::InvalidDimensions { width, height });
        }
        let expected = width * height;
        if u.len() != expected {
            return Err(FieldError::ShapeMismatch {
                channel: "u",
                expected,
                actual: u.len(),
            });
        }
        if v.len() != expected {
            return Err(FieldError::ShapeMismatch {
                channel: "v",
                expected,
                actual: v.len(),
            });
        }
        Ok(Self { width, height, u, v })
    }

    /// Same-shaped field holding new channel data
    pub(crate) fn with_channels(&self, u: Vec<f64>, v: Vec<f64>) -> Self {
        debug_assert_eq!(u.len(), self.u.len());
        debug_assert_eq!(v.len(), self.v.len());
        Self {
            width: self.width,
            height: self.height,
            u,
            v,
        }
    }

    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn len(&self) -> usize {
        self.u.len()
    }

    pub fn is_empty(&self) -> bool {
        self.u.is_empty()
    }

    pub fn u(&self) -> &[f64] {
        &self.u
    }

    pub fn v(&self) -> &[f64] {
        &self.v
    }

    pub fn u_at(&self, x: usize, y: usize) -> f64 {
        self.u[self.index(x, y)]
    }

    pub fn v_at(&self, x: usize, y: usize) -> f64 {
        self.v[self.index(x, y)]
    }

    /// Split into raw `(u, v)` channels
    pub fn into_channels(self) -> (Vec<f64>, Vec<f64>) {
        (self.u, self.v)
    }

    /// Number of cells holding the seed disturbance values
    pub fn seeded_count(&self) -> usize {
        self.u
            .iter()
            .zip(&self.v)
            .filter(|&(&u, &v)| u == SEED_U && v == SEED_V)
            .count()
    }

    pub fn stats(&self) -> FieldStats {
        FieldStats::from_field(self)
    }

    /// Fail if any concentration is NaN or infinite
    pub fn check_finite(&self) -> Result<()> {
        let count = self.non_finite_count();
        if count > 0 {
            return Err(FieldError::NonFinite { count });
        }
        Ok(())
    }

    fn non_finite_count(&self) -> usize {
        self.u
            .iter()
            .chain(&self.v)
            .filter(|value| !value.is_finite())
            .count()
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field {}x{}", self.width, self.height)?;
        for y in 0..self.height {
            for x in 0..self.width {
                write!(f, "{:6.3}/{:<6.3} ", self.u_at(x, y), self.v_at(x, y))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

/// Summary statistics for one channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChannelStats {
    pub min: f64,
    pub max: f64,
    pub mean: f64,
}

impl ChannelStats {
    /// Statistics over the finite entries of a channel
    pub fn from_values(values: &[f64]) -> Self {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        let mut sum = 0.0;
        let mut finite = 0usize;
        for &value in values.iter().filter(|value| value.is_finite()) {
            min = min.min(value);
            max = max.max(value);
            sum += value;
            finite += 1;
        }
        if finite == 0 {
            return Self {
                min: f64::NAN,
                max: f64::NAN,
                mean: f64::NAN,
            };
        }
        Self {
            min,
            max,
            mean: sum / finite as f64,
        }
    }
}

/// Diagnostic snapshot of a field
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FieldStats {
    pub u: ChannelStats,
    pub v: ChannelStats,
    pub non_finite: usize,
}

impl FieldStats {
    pub fn from_field(field: &Field) -> Self {
        Self {
            u: ChannelStats::from_values(field.u()),
            v: ChannelStats::from_values(field.v()),
            non_finite: field.non_finite_count(),
        }
    }
}

impl fmt::Display for FieldStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Field Statistics:")?;
        writeln!(
            f,
            "  u: min {:.4}, max {:.4}, mean {:.4}",
            self.u.min, self.u.max, self.u.mean
        )?;
        writeln!(
            f,
            "  v: min {:.4}, max {:.4}, mean {:.4}",
            self.v.min, self.v.max, self.v.mean
        )?;
        write!(f, "  Non-finite values: {}", self.non_finite)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_field() {
        let field = Field::uniform(4, 3).unwrap();
        assert_eq!(field.width(), 4);
        assert_eq!(field.height(), 3);
        assert_eq!(field.u().len(), 12);
        assert_eq!(field.v().len(), 12);
        assert!(field.u().iter().all(|&u| u == BACKGROUND_U));
        assert!(field.v().iter().all(|&v| v == BACKGROUND_V));
        assert_eq!(field.seeded_count(), 0);
    }

    #[test]
    fn test_seed_containment() {
        let field = Field::initialize(100, 100, Seed::new((50, 50), 20.0)).unwrap();

        let mut inside = 0;
        for y in 0..100 {
            for x in 0..100 {
                let dx = x as i64 - 50;
                let dy = y as i64 - 50;
                if dx * dx + dy * dy <= 400 {
                    inside += 1;
                    assert_eq!(field.u_at(x, y), SEED_U);
                    assert_eq!(field.v_at(x, y), SEED_V);
                } else {
                    assert_eq!(field.u_at(x, y), BACKGROUND_U);
                    assert_eq!(field.v_at(x, y), BACKGROUND_V);
                }
            }
        }

        // Lattice points within a radius-20 disk
        assert_eq!(inside, 1257);
        assert_eq!(field.seeded_count(), 1257);
    }

    #[test]
    fn test_seed_boundary_is_inclusive() {
        let field = Field::initialize(100, 100, Seed::new((50, 50), 20.0)).unwrap();

        // Distance exactly 20
        assert_eq!(field.v_at(70, 50), SEED_V);
        assert_eq!(field.v_at(30, 50), SEED_V);
        assert_eq!(field.v_at(50, 70), SEED_V);
        assert_eq!(field.v_at(62, 66), SEED_V); // 12² + 16² = 400

        // Distance 21
        assert_eq!(field.v_at(71, 50), BACKGROUND_V);
        assert_eq!(field.v_at(50, 29), BACKGROUND_V);
        assert_eq!(field.u_at(29, 50), BACKGROUND_U);
    }

    #[test]
    fn test_seed_is_not_wrapped() {
        let field = Field::initialize(10, 10, Seed::new((0, 0), 1.0)).unwrap();
        assert_eq!(field.seeded_count(), 3);
        assert_eq!(field.v_at(9, 0), BACKGROUND_V);
        assert_eq!(field.v_at(0, 9), BACKGROUND_V);
    }

    #[test]
    fn test_zero_radius_seeds_center_only() {
        let field = Field::initialize(5, 5, Seed::new((2, 3), 0.0)).unwrap();
        assert_eq!(field.seeded_count(), 1);
        assert_eq!(field.u_at(2, 3), SEED_U);
    }

    #[test]
    fn test_invalid_construction() {
        assert_eq!(
            Field::initialize(0, 10, Seed::new((0, 0), 1.0)),
            Err(FieldError::InvalidDimensions { width: 0, height: 10 })
        );
        assert_eq!(
            Field::initialize(10, 10, Seed::new((5, 5), -1.0)),
            Err(FieldError::InvalidRadius(-1.0))
        );
        assert!(matches!(
            Field::initialize(10, 10, Seed::new((5, 5), f64::NAN)),
            Err(FieldError::InvalidRadius(_))
        ));
        assert_eq!(
            Field::initialize(10, 8, Seed::new((3, 8), 1.0)),
            Err(FieldError::CenterOutOfBounds {
                x: 3,
                y: 8,
                width: 10,
                height: 8
            })
        );
    }

    #[test]
    fn test_from_channels_checks_shape() {
        assert!(Field::from_channels(2, 2, vec![1.0; 4], vec![0.0; 4]).is_ok());
        assert_eq!(
            Field::from_channels(2, 2, vec![1.0; 4], vec![0.0; 3]),
            Err(FieldError::ShapeMismatch {
                channel: "v",
                expected: 4,
                actual: 3
            })
        );
    }

    #[test]
    fn test_row_major_layout() {
        let u = vec![0.0, 1.0, 2.0, 3.0, 4.0, 5.0];
        let field = Field::from_channels(3, 2, u, vec![0.0; 6]).unwrap();
        assert_eq!(field.u_at(2, 0), 2.0);
        assert_eq!(field.u_at(0, 1), 3.0);
        assert_eq!(field.index(1, 1), 4);
    }

    #[test]
    fn test_check_finite_and_stats() {
        let field = Field::initialize(10, 10, Seed::new((5, 5), 2.0)).unwrap();
        assert!(field.check_finite().is_ok());

        let stats = field.stats();
        assert_eq!(stats.u.min, SEED_U);
        assert_eq!(stats.u.max, BACKGROUND_U);
        assert_eq!(stats.v.max, SEED_V);
        assert_eq!(stats.non_finite, 0);

        let broken = Field::from_channels(
            2,
            1,
            vec![f64::NAN, 1.0],
            vec![0.0, f64::INFINITY],
        )
        .unwrap();
        assert_eq!(broken.check_finite(), Err(FieldError::NonFinite { count: 2 }));
        assert_eq!(broken.stats().u.min, 1.0);
    }
}
