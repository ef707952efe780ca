//! Convolutional model: synthetic trace = reflectivity * wavelet.

use ndarray::{Array2, ArrayView1, ArrayViewMut1, Zip};
use tracing::debug;

use crate::error::{ConvError, Result};
use crate::grid::Grid;
use crate::wavelet::{Wavelet, WaveletGenerator};

/// Convolve every trace of `rc` with the wavelet `generator` builds for
/// peak frequency `f` and sampling interval `dt`.
///
/// The output has the shape of `rc`: the full convolution is cropped so that
/// the wavelet centre lines up with each reflection, whatever the relative
/// lengths of trace and wavelet.
pub fn convolutional_model<W>(rc: &Grid, f: f64, dt: f64, generator: &W) -> Result<Grid>
where
    W: WaveletGenerator + ?Sized,
{
    let wavelet = generator.generate(f, dt)?;
    debug!(f, dt, wavelet_len = wavelet.len(), "wavelet generated");
    convolve_with(rc, &wavelet)
}

/// Convolve every trace of `rc` with an existing wavelet, cropped and
/// centred as in [`convolutional_model`].
pub fn convolve_with(rc: &Grid, wavelet: &Wavelet) -> Result<Grid> {
    if wavelet.is_empty() {
        return Err(ConvError::EmptyWavelet);
    }
    let wavelet = wavelet.view();

    let (n_samples, n_traces) = rc.dim();
    debug!(
        n_samples,
        n_traces,
        wavelet_len = wavelet.len(),
        "convolutional model"
    );

    let mut synth = Array2::<f64>::zeros((n_samples, n_traces));
    Zip::from(synth.columns_mut())
        .and(rc.columns())
        .par_for_each(|out, trace| convolve_centred(trace, wavelet, out));
    Ok(synth)
}

/// `out[i] = sum_k trace[k] * w[i + h - k]` with `h = (len(w) - 1) / 2`
fn convolve_centred(trace: ArrayView1<f64>, w: ArrayView1<f64>, mut out: ArrayViewMut1<f64>) {
    let n = trace.len();
    let m = w.len();
    let h = (m - 1) / 2;
    for i in 0..n {
        // k must keep i + h - k inside the wavelet
        let lo = (i + h + 1).saturating_sub(m);
        let hi = (i + h).min(n - 1);
        let mut acc = 0.0;
        for k in lo..=hi {
            acc += trace[k] * w[i + h - k];
        }
        out[i] = acc;
    }
}
