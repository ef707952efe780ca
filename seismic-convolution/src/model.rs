use tracing::{debug, warn};

use crate::config::ModelConfig;
use crate::convolution::convolve_with;
use crate::error::Result;
use crate::grid::{Grid, TimeAxis};
use crate::materials::RockProperties;
use crate::reflectivity::reflectivity_of;
use crate::wavelet::{Ricker, Wavelet, WaveletGenerator};

/// Every product of one modelling run
#[derive(Debug, Clone, PartialEq)]
pub struct Synthetic {
    pub time_axis: TimeAxis,
    pub velocity: Grid,     // Velocity in time
    pub density: Grid,      // Density in time
    pub reflectivity: Grid, // One row shorter than velocity
    pub wavelet: Wavelet,
    pub traces: Grid, // Same shape as reflectivity
}

/// Depth model to synthetic seismogram, driven by a [`ModelConfig`]
pub struct SyntheticSeismogram {
    config: ModelConfig,
}

impl SyntheticSeismogram {
    pub fn new(config: ModelConfig) -> anyhow::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    /// Run with the Ricker wavelet
    pub fn run(&self, velocity: &Grid, density: Option<&Grid>) -> Result<Synthetic> {
        self.run_with(velocity, density, &Ricker)
    }

    pub fn run_with<W>(
        &self,
        velocity: &Grid,
        density: Option<&Grid>,
        generator: &W,
    ) -> Result<Synthetic>
    where
        W: WaveletGenerator + ?Sized,
    {
        let config = &self.config;

        // 1. Depth to time
        let rock = RockProperties::from_views(velocity, density)?;
        let (velocity, density, time_axis) = config.time_conversion().convert_rock(&rock)?;
        let rock = RockProperties { velocity, density };

        // 2. Reflection coefficients
        let reflectivity = reflectivity_of(&rock)?;

        // 3. Wavelet, generated once and kept alongside the traces
        let wavelet = generator.generate(config.frequency, config.dt)?;
        if reflectivity.nrows() < wavelet.len() {
            warn!(
                rc_samples = reflectivity.nrows(),
                wavelet_len = wavelet.len(),
                "reflectivity shorter than wavelet, traces will hold a cropped wavelet"
            );
        }

        // 4. Convolve with that same wavelet
        let traces = convolve_with(&reflectivity, &wavelet)?;

        debug!(
            n_time = time_axis.n_samples,
            n_traces = traces.ncols(),
            duration = time_axis.duration(),
            "synthetic complete"
        );

        Ok(Synthetic {
            time_axis,
            velocity: rock.velocity,
            density: rock.density,
            reflectivity,
            wavelet,
            traces,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ConvError;
    use ndarray::Array2;

    fn config() -> ModelConfig {
        ModelConfig::new(2e-3, 30.0)
    }

    #[test]
    fn test_invalid_config_rejected() {
        assert!(SyntheticSeismogram::new(ModelConfig::new(2e-3, 50.0)).is_err());
    }

    #[test]
    fn test_products_have_consistent_shapes() {
        let mut vel = Array2::from_elem((200, 4), 2000.0);
        vel.slice_mut(ndarray::s![100.., ..]).fill(3000.0);
        let model = SyntheticSeismogram::new(config()).unwrap();
        let out = model.run(&vel, None).unwrap();

        assert_eq!(out.velocity.dim(), (out.time_axis.n_samples, 4));
        assert_eq!(out.density.dim(), out.velocity.dim());
        assert_eq!(out.reflectivity.nrows(), out.velocity.nrows() - 1);
        assert_eq!(out.traces.dim(), out.reflectivity.dim());
        assert_eq!(out.wavelet.len(), 37);
        assert!(out.traces.iter().any(|&x| x > 0.1));
    }

    #[test]
    fn test_density_shape_checked() {
        let vel = Array2::from_elem((20, 2), 2000.0);
        let rho = Array2::ones((20, 3));
        let model = SyntheticSeismogram::new(config()).unwrap();
        assert!(matches!(
            model.run(&vel, Some(&rho)),
            Err(ConvError::ShapeMismatch { .. })
        ));
    }

    #[test]
    fn test_generator_called_once_per_run() {
        use crate::wavelet::rickerwave;
        use std::cell::Cell;

        // Each call returns a differently scaled wavelet
        let calls = Cell::new(0);
        let drifting = |f: f64, dt: f64| -> Result<Wavelet> {
            calls.set(calls.get() + 1);
            Ok(rickerwave(f, dt)? * calls.get() as f64)
        };

        let mut vel = Array2::from_elem((200, 2), 2000.0);
        vel.slice_mut(ndarray::s![100.., ..]).fill(3000.0);
        let model = SyntheticSeismogram::new(config()).unwrap();
        let out = model.run_with(&vel, None, &drifting).unwrap();

        assert_eq!(calls.get(), 1);
        assert_eq!(out.traces, convolve_with(&out.reflectivity, &out.wavelet).unwrap());
    }

    #[test]
    fn test_homogeneous_model_is_silent() {
        let vel = Array2::from_elem((100, 3), 1800.0);
        let model = SyntheticSeismogram::new(config()).unwrap();
        let out = model.run(&vel, None).unwrap();
        assert!(out.traces.iter().all(|&x| x == 0.0));
    }
}
