//! Depth-to-time conversion.
//!
//! Each trace is converted independently: reciprocal velocity is integrated
//! down the trace to get the two-way time at the base of every depth cell,
//! then the rock properties are read back on a uniform time axis.

use ndarray::{Array2, ArrayView1, ArrayViewMut1, Zip};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{check_interval, check_same_shape, Result};
use crate::grid::{check_not_empty, checked_count, Grid, TimeAxis};
use crate::materials::RockProperties;

/// Depth step used when none is given (metres)
pub const DEFAULT_DZ: f64 = 1.0;

/// How properties are read between depth cells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    /// Value of the depth cell whose travel-time interval holds the sample
    #[default]
    Nearest,
    /// Linear in travel time between cell centres
    Linear,
}

/// Parameters of a depth-to-time conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeConversion {
    pub dt: f64, // Output time step (seconds)
    pub dz: f64, // Input depth step (metres)
    pub interpolation: Interpolation,
}

impl TimeConversion {
    pub fn new(dt: f64, dz: f64) -> Self {
        Self {
            dt,
            dz,
            interpolation: Interpolation::Nearest,
        }
    }

    pub fn with_interpolation(mut self, interpolation: Interpolation) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Convert velocity and density (default 1.0) from depth to time.
    pub fn convert(&self, velocity: &Grid, density: Option<&Grid>) -> Result<(Grid, Grid)> {
        let rock = RockProperties::from_views(velocity, density)?;
        let (velocity, density, _) = self.convert_rock(&rock)?;
        Ok((velocity, density))
    }

    /// Convert validated rock properties, also returning the output time axis.
    pub fn convert_rock(&self, rock: &RockProperties) -> Result<(Grid, Grid, TimeAxis)> {
        check_interval("dt", self.dt)?;
        check_interval("dz", self.dz)?;
        check_not_empty(&rock.velocity)?;
        check_same_shape(rock.velocity.dim(), rock.density.dim())?;
        rock.check_velocity()?;

        let (n_depth, n_traces) = rock.dim();
        let dz = self.dz;

        // Two-way time at the base of each depth cell, one column per trace
        let twt: Vec<Vec<f64>> = (0..n_traces)
            .into_par_iter()
            .map(|k| two_way_times(rock.velocity.column(k), dz))
            .collect();

        let t_max = twt
            .iter()
            .filter_map(|t| t.last().copied())
            .fold(0.0_f64, f64::max);
        let n_time = sample_count(t_max, self.dt, n_traces)?;
        let axis = TimeAxis::new(n_time, self.dt);

        debug!(
            n_depth,
            n_traces,
            n_time,
            dt = self.dt,
            dz,
            t_max,
            interpolation = ?self.interpolation,
            "depth to time"
        );

        let mut vel_t = Array2::<f64>::zeros((n_time, n_traces));
        let mut rho_t = Array2::<f64>::zeros((n_time, n_traces));

        let interpolation = self.interpolation;
        Zip::indexed(vel_t.columns_mut())
            .and(rho_t.columns_mut())
            .par_for_each(|k, vel_out, rho_out| {
                let trace = TraceInDepth {
                    times: &twt[k],
                    velocity: rock.velocity.column(k),
                    density: rock.density.column(k),
                };
                match interpolation {
                    Interpolation::Nearest => trace.nearest(&axis, vel_out, rho_out),
                    Interpolation::Linear => trace.linear(&axis, dz, vel_out, rho_out),
                }
            });

        Ok((vel_t, rho_t, axis))
    }
}

/// Resample a depth-domain velocity grid, and an optional density grid of
/// the same shape, onto a uniform time axis with step `dt`.
///
/// Returns `(velocity, density)` in time. A missing density is taken as 1.0
/// everywhere.
pub fn depth_2_time(
    velocity: &Grid,
    dt: f64,
    dz: f64,
    density: Option<&Grid>,
) -> Result<(Grid, Grid)> {
    TimeConversion::new(dt, dz).convert(velocity, density)
}

/// One depth trace with the two-way time at the base of each cell
struct TraceInDepth<'a> {
    times: &'a [f64],
    velocity: ArrayView1<'a, f64>,
    density: ArrayView1<'a, f64>,
}

impl TraceInDepth<'_> {
    fn nearest(
        &self,
        axis: &TimeAxis,
        mut vel_out: ArrayViewMut1<f64>,
        mut rho_out: ArrayViewMut1<f64>,
    ) {
        let n_depth = self.times.len();
        let mut j = 0;
        for i in 0..axis.n_samples {
            let t = axis.time(i);
            // Advance to the cell whose interval [T[j-1], T[j]) holds t
            while j + 1 < n_depth && t >= self.times[j] {
                j += 1;
            }
            vel_out[i] = self.velocity[j];
            rho_out[i] = self.density[j];
        }
    }

    fn linear(
        &self,
        axis: &TimeAxis,
        dz: f64,
        mut vel_out: ArrayViewMut1<f64>,
        mut rho_out: ArrayViewMut1<f64>,
    ) {
        let centres: Vec<f64> = self
            .times
            .iter()
            .zip(self.velocity.iter())
            .map(|(&t, &v)| t - dz / v)
            .collect();
        for i in 0..axis.n_samples {
            let t = axis.time(i);
            vel_out[i] = interpolate(&centres, self.velocity, t);
            rho_out[i] = interpolate(&centres, self.density, t);
        }
    }
}

/// Cumulative two-way time to the base of each cell
fn two_way_times(velocity: ArrayView1<f64>, dz: f64) -> Vec<f64> {
    velocity
        .iter()
        .scan(0.0, |t, &v| {
            *t += 2.0 * dz / v;
            Some(*t)
        })
        .collect()
}

fn interpolate(times: &[f64], values: ArrayView1<f64>, t: f64) -> f64 {
    let n = times.len();
    if t <= times[0] {
        return values[0];
    }
    if t >= times[n - 1] {
        return values[n - 1];
    }
    // First centre strictly after t; times are increasing
    let hi = times.partition_point(|&c| c <= t);
    let lo = hi - 1;
    let w = (t - times[lo]) / (times[hi] - times[lo]);
    values[lo] + w * (values[hi] - values[lo])
}

/// Samples on [0, t_max) at step dt, at least one
fn sample_count(t_max: f64, dt: f64, n_traces: usize) -> Result<usize> {
    // Ratios within SNAP of an integer are treated as that integer
    const SNAP: f64 = 1e-9;
    let count = (t_max / dt - SNAP).ceil().max(1.0);
    checked_count(count, n_traces)
}
