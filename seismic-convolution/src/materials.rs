use ndarray::Array2;

use crate::error::{check_same_shape, ConvError, Result};
use crate::grid::{check_not_empty, Grid};

/// Density used when none is supplied
pub const DEFAULT_DENSITY: f64 = 1.0;

/// Velocity and density sampled on the same grid.
///
/// Construction is the only place where a missing density is broadcast to
/// the velocity shape, so every consumer sees two grids of equal shape.
#[derive(Debug, Clone, PartialEq)]
pub struct RockProperties {
    pub velocity: Grid,
    pub density: Grid,
}

impl RockProperties {
    pub fn new(velocity: Grid, density: Option<Grid>) -> Result<Self> {
        check_not_empty(&velocity)?;
        let density = match density {
            Some(density) => {
                check_same_shape(velocity.dim(), density.dim())?;
                density
            }
            None => Array2::from_elem(velocity.dim(), DEFAULT_DENSITY),
        };
        Ok(Self { velocity, density })
    }

    /// Same as [`RockProperties::new`] but borrowing the inputs.
    pub fn from_views(velocity: &Grid, density: Option<&Grid>) -> Result<Self> {
        Self::new(velocity.clone(), density.cloned())
    }

    pub fn dim(&self) -> (usize, usize) {
        self.velocity.dim()
    }

    /// Acoustic impedance (velocity × density) at every sample
    pub fn impedance(&self) -> Grid {
        &self.velocity * &self.density
    }

    /// Reject velocities that cannot be integrated into travel time
    pub fn check_velocity(&self) -> Result<()> {
        let (n_samples, n_traces) = self.dim();
        for k in 0..n_traces {
            for i in 0..n_samples {
                let v = self.velocity[[i, k]];
                if !v.is_finite() || v <= 0.0 {
                    return Err(ConvError::InvalidVelocity {
                        value: v,
                        sample: i,
                        trace: k,
                    });
                }
            }
        }
        Ok(())
    }
}
