//! Convolutional seismic modelling
//!
//! Turns a depth-sampled rock model (velocity, optionally density) into
//! synthetic seismic traces:
//!
//! 1. [`depth_2_time`] resamples the model onto a uniform two-way-time axis;
//! 2. [`reflectivity`] computes normal-incidence reflection coefficients;
//! 3. [`rickerwave`] (or any [`WaveletGenerator`]) builds the source wavelet;
//! 4. [`convolutional_model`] convolves every trace with the wavelet.
//!
//! # Example
//!
//! ```
//! use ndarray::{s, Array2};
//! use seismic_convolution::{convolutional_model, depth_2_time, reflectivity, Ricker};
//!
//! let mut rock = Array2::from_elem((600, 10), 1500.0);
//! rock.slice_mut(s![300.., ..]).fill(2500.0);
//!
//! let (vel, rho) = depth_2_time(&rock, 2e-3, 1.0, None).unwrap();
//! let rc = reflectivity(&vel, &rho).unwrap();
//! let synth = convolutional_model(&rc, 30.0, 2e-3, &Ricker).unwrap();
//!
//! assert_eq!(synth.dim(), rc.dim());
//! ```

pub mod config;
pub mod convolution;
pub mod depth_time;
pub mod error;
pub mod grid;
pub mod materials;
pub mod model;
pub mod reflectivity;
pub mod wavelet;

pub use config::ModelConfig;
pub use convolution::{convolutional_model, convolve_with};
pub use depth_time::{depth_2_time, Interpolation, TimeConversion, DEFAULT_DZ};
pub use error::{ConvError, Result};
pub use grid::{Grid, TimeAxis, MAX_SAMPLES};
pub use materials::RockProperties;
pub use model::{Synthetic, SyntheticSeismogram};
pub use reflectivity::{reflectivity, reflectivity_of};
pub use wavelet::{rickerwave, Ricker, Wavelet, WaveletGenerator};
