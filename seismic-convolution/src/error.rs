//! Error types for the convolutional modelling pipeline

use thiserror::Error;

/// Result type for modelling operations
pub type Result<T> = std::result::Result<T, ConvError>;

/// Errors raised by the numerical operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConvError {
    /// Paired velocity and density grids differ in shape
    #[error("shape mismatch: velocity is {velocity:?}, density is {density:?}")]
    ShapeMismatch {
        velocity: (usize, usize),
        density: (usize, usize),
    },

    /// Peak frequency too high for the sampling interval
    #[error("wavelet undersampled: frequency {frequency} Hz must be below {limit} Hz for dt = {dt} s")]
    Undersampled { frequency: f64, dt: f64, limit: f64 },

    /// A sampling interval (dt, dz) is not finite and positive
    #[error("sampling interval {name} must be finite and positive, got {value}")]
    InvalidInterval { name: &'static str, value: f64 },

    #[error("frequency must be finite and positive, got {0}")]
    InvalidFrequency(f64),

    #[error("velocity must be finite and positive, got {value} at sample {sample}, trace {trace}")]
    InvalidVelocity {
        value: f64,
        sample: usize,
        trace: usize,
    },

    /// Grid has no samples or no traces
    #[error("grid is empty: shape {0:?}")]
    EmptyGrid((usize, usize)),

    /// Requested output would exceed the sample limit
    #[error("requested {samples} samples, limit is {limit}")]
    GridTooLarge { samples: f64, limit: usize },

    #[error("wavelet generator returned no samples")]
    EmptyWavelet,

    /// Impedances of two adjacent samples sum to zero
    #[error("impedance sum is zero between samples {sample} and {} of trace {trace}", .sample + 1)]
    DegenerateImpedance { sample: usize, trace: usize },
}

/// Check that two grids share a shape
pub(crate) fn check_same_shape(velocity: (usize, usize), density: (usize, usize)) -> Result<()> {
    if velocity != density {
        return Err(ConvError::ShapeMismatch { velocity, density });
    }
    Ok(())
}

/// Check a sampling interval is usable
pub(crate) fn check_interval(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(ConvError::InvalidInterval { name, value });
    }
    Ok(())
}
