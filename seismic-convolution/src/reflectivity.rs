use ndarray::Array2;

use crate::error::{check_same_shape, ConvError, Result};
use crate::grid::{check_not_empty, Grid};
use crate::materials::RockProperties;

/// Normal-incidence reflection coefficients between vertically adjacent
/// samples: `R = (Z2 - Z1) / (Z2 + Z1)` with `Z = velocity * density`.
///
/// The result has one row fewer than the inputs; row `i` is the interface
/// between samples `i` and `i + 1`.
pub fn reflectivity(velocity: &Grid, density: &Grid) -> Result<Grid> {
    check_not_empty(velocity)?;
    check_same_shape(velocity.dim(), density.dim())?;
    impedance_contrasts(&(velocity * density))
}

/// [`reflectivity`] of a velocity/density pair already held together
pub fn reflectivity_of(rock: &RockProperties) -> Result<Grid> {
    check_not_empty(&rock.velocity)?;
    check_same_shape(rock.velocity.dim(), rock.density.dim())?;
    impedance_contrasts(&rock.impedance())
}

fn impedance_contrasts(z: &Grid) -> Result<Grid> {
    let (n_samples, n_traces) = z.dim();

    let mut rc = Array2::<f64>::zeros((n_samples - 1, n_traces));
    for k in 0..n_traces {
        for i in 0..n_samples - 1 {
            let z1 = z[[i, k]];
            let z2 = z[[i + 1, k]];
            let sum = z1 + z2;
            if sum == 0.0 {
                return Err(ConvError::DegenerateImpedance {
                    sample: i,
                    trace: k,
                });
            }
            rc[[i, k]] = (z2 - z1) / sum;
        }
    }
    Ok(rc)
}
