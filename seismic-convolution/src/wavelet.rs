//! Source wavelets.
//!
//! A wavelet is produced on demand from a peak frequency and a sampling
//! interval by a [`WaveletGenerator`]. The Ricker wavelet is the default;
//! any `Fn(f64, f64) -> Result<Wavelet>` is accepted as well.

use ndarray::Array1;
use std::f64::consts::PI;

use crate::error::{check_interval, ConvError, Result};
use crate::grid::checked_count;

/// Amplitude against time offset, centred at `len / 2`
pub type Wavelet = Array1<f64>;

/// Highest usable peak frequency as a fraction of Nyquist
pub const NYQUIST_FRACTION: f64 = 0.2;

/// Wavelet support, in dominant periods
const RICKER_PERIODS: f64 = 2.2;

/// Produces a wavelet for a peak frequency `f` (Hz) and sampling interval `dt` (s)
pub trait WaveletGenerator {
    fn generate(&self, f: f64, dt: f64) -> Result<Wavelet>;
}

/// Zero-phase Ricker (Mexican hat) wavelet
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Ricker;

impl WaveletGenerator for Ricker {
    fn generate(&self, f: f64, dt: f64) -> Result<Wavelet> {
        rickerwave(f, dt)
    }
}

impl<F> WaveletGenerator for F
where
    F: Fn(f64, f64) -> Result<Wavelet>,
{
    fn generate(&self, f: f64, dt: f64) -> Result<Wavelet> {
        self(f, dt)
    }
}

/// Check that a peak frequency is faithfully sampled at `dt`.
///
/// The frequency must lie strictly below [`NYQUIST_FRACTION`] of the
/// Nyquist frequency `1 / (2 dt)`.
pub fn check_sampling(f: f64, dt: f64) -> Result<()> {
    if !f.is_finite() || f <= 0.0 {
        return Err(ConvError::InvalidFrequency(f));
    }
    check_interval("dt", dt)?;
    let limit = NYQUIST_FRACTION / (2.0 * dt);
    if f >= limit {
        return Err(ConvError::Undersampled {
            frequency: f,
            dt,
            limit,
        });
    }
    Ok(())
}

/// Generate a Ricker wavelet with peak frequency `f` sampled every `dt`.
///
/// The wavelet spans about 2.2 dominant periods, always has an odd number of
/// samples and peaks with amplitude 1 at index `len / 2`:
///
/// `w(t) = (1 - 2 (pi f t)^2) exp(-(pi f t)^2)`
///
/// Fails with [`ConvError::Undersampled`] when `f` is too high for `dt`, and
/// with [`ConvError::GridTooLarge`] when `f * dt` is so small that the
/// wavelet would exceed the sample limit.
pub fn rickerwave(f: f64, dt: f64) -> Result<Wavelet> {
    check_sampling(f, dt)?;

    let half = (RICKER_PERIODS / (f * dt) / 2.0).floor();
    let nw = checked_count(2.0 * half + 1.0, 1)?;
    let half = nw / 2;

    let wavelet = Array1::from_shape_fn(nw, |i| {
        let alpha = (half as f64 - i as f64) * f * dt * PI;
        let beta = alpha * alpha;
        (1.0 - 2.0 * beta) * (-beta).exp()
    });
    Ok(wavelet)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn test_ricker_length_30hz() {
        // 2.2 / (30 * 0.002) = 36.7 -> 37 samples
        let w = rickerwave(30.0, 2e-3).unwrap();
        assert_eq!(w.len(), 37);
    }

    #[test]
    fn test_ricker_peak_at_center() {
        let w = rickerwave(30.0, 2e-3).unwrap();
        let center = w.len() / 2;
        assert_abs_diff_eq!(w[center], 1.0);
        assert!(w.iter().all(|&x| x <= w[center]));
    }

    #[test]
    fn test_ricker_side_lobes_negative() {
        let w = rickerwave(25.0, 1e-3).unwrap();
        let center = w.len() / 2;
        // First zero crossing at t = 1 / (pi f sqrt(2)), about 9 ms
        assert!(w[center + 12] < 0.0);
        assert!(w[center - 12] < 0.0);
    }

    #[test]
    fn test_undersampled_rejected() {
        let err = rickerwave(50.0, 2e-3).unwrap_err();
        assert!(matches!(err, ConvError::Undersampled { .. }));
        if let ConvError::Undersampled { limit, .. } = err {
            assert_abs_diff_eq!(limit, 50.0, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_non_positive_inputs_rejected() {
        assert_eq!(rickerwave(0.0, 2e-3), Err(ConvError::InvalidFrequency(0.0)));
        assert!(matches!(
            rickerwave(30.0, -2e-3),
            Err(ConvError::InvalidInterval { name: "dt", .. })
        ));
    }

    #[test]
    fn test_vanishing_frequency_is_too_long() {
        // Passes the sampling check but would need ~1e23 samples
        assert!(matches!(
            rickerwave(1e-20, 1e-3),
            Err(ConvError::GridTooLarge { .. })
        ));
    }

    #[test]
    fn test_struct_and_function_generators_agree() {
        let from_struct = Ricker.generate(30.0, 2e-3).unwrap();
        let from_fn = rickerwave.generate(30.0, 2e-3).unwrap();
        assert_eq!(from_struct, from_fn);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn prop_ricker_odd_and_symmetric(
            f in 1.0f64..40.0,
            dt in 1e-4f64..2e-3,
        ) {
            prop_assume!(check_sampling(f, dt).is_ok());
            let w = rickerwave(f, dt).unwrap();
            let n = w.len();
            prop_assert_eq!(n % 2, 1);
            for i in 0..n / 2 {
                prop_assert!((w[i] - w[n - 1 - i]).abs() < 1e-12, "asymmetric at {}", i);
            }
        }
    }
}
