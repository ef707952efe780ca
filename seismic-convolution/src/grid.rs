use ndarray::Array2;

use crate::error::{ConvError, Result};

/// Samples along axis 0 (depth or time), traces along axis 1.
pub type Grid = Array2<f64>;

/// Uniform time axis of a time-domain grid
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeAxis {
    pub n_samples: usize, // Number of time samples
    pub dt: f64,          // Sampling interval (seconds)
}

impl TimeAxis {
    pub fn new(n_samples: usize, dt: f64) -> Self {
        TimeAxis { n_samples, dt }
    }

    pub fn time(&self, k: usize) -> f64 {
        // Two-way time of sample k
        self.dt * (k as f64)
    }

    pub fn duration(&self) -> f64 {
        // Time of the last sample
        self.n_samples.saturating_sub(1) as f64 * self.dt
    }
}

/// Largest number of samples any output grid or wavelet may hold
pub const MAX_SAMPLES: usize = 1 << 30;

/// Convert a sample count computed in floating point to `usize`, rejecting
/// counts whose grid (`count` rows by `n_traces` columns) would exceed
/// [`MAX_SAMPLES`].
pub(crate) fn checked_count(count: f64, n_traces: usize) -> Result<usize> {
    let samples = count * n_traces.max(1) as f64;
    if !samples.is_finite() || samples > MAX_SAMPLES as f64 {
        return Err(ConvError::GridTooLarge {
            samples,
            limit: MAX_SAMPLES,
        });
    }
    Ok(count.max(0.0) as usize)
}

pub(crate) fn check_not_empty(grid: &Grid) -> Result<()> {
    let (n_samples, n_traces) = grid.dim();
    if n_samples == 0 || n_traces == 0 {
        return Err(ConvError::EmptyGrid((n_samples, n_traces)));
    }
    Ok(())
}
