//! Linear-interpolation sample rate conversion
//!
//! Algorithm:
//! 1. `new_length = round(len * target_rate / sample_rate)` (ties to even)
//! 2. Place `new_length` query positions evenly over `[0, len - 1]`, both
//!    endpoints included (a single query sits at 0)
//! 3. Linearly interpolate between the two samples bracketing each position;
//!    positions that land on a sample index return that sample exactly
//!
//! Amplitude scale is untouched, so resampling can run before or after
//! normalization.
//!
//! # Example
//!
//! ```
//! use stratum_pcm::io::waveform::Waveform;
//! use stratum_pcm::preprocessing::resample::resample;
//!
//! let w = Waveform::new(8000, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
//! let up = resample(w, 16000)?;
//! assert_eq!(up.len(), 10);
//! assert_eq!(up.samples[9], 1.0);
//! # Ok::<(), stratum_pcm::ConversionError>(())
//! ```

use crate::error::ConversionError;
use crate::io::waveform::Waveform;

/// Number of output samples for a rate change
///
/// `round(len * target_rate / source_rate)`, rounding half to even.
pub fn resampled_len(len: usize, source_rate: u32, target_rate: u32) -> usize {
    let ratio = target_rate as f64 / source_rate as f64;
    (len as f64 * ratio).round_ties_even() as usize
}

/// Resample a waveform to `target_rate` using linear interpolation
///
/// # Errors
///
/// Returns `ConversionError::ResampleError` if `target_rate` is zero, the
/// waveform holds fewer than 2 samples (and the rate actually changes), or an
/// interpolation position falls outside the source range.
pub fn resample(waveform: Waveform, target_rate: u32) -> Result<Waveform, ConversionError> {
    if target_rate == 0 {
        return Err(ConversionError::ResampleError(
            "Target sample rate must be > 0".to_string(),
        ));
    }

    if target_rate == waveform.sample_rate {
        return Ok(waveform);
    }

    if waveform.sample_rate == 0 {
        return Err(ConversionError::ResampleError(
            "Source sample rate must be > 0".to_string(),
        ));
    }

    let len = waveform.samples.len();
    if len < 2 {
        return Err(ConversionError::ResampleError(format!(
            "Need at least 2 samples to interpolate, got {}",
            len
        )));
    }

    let new_len = resampled_len(len, waveform.sample_rate, target_rate);
    log::debug!(
        "Resampling {} samples {} Hz -> {} Hz ({} samples)",
        len,
        waveform.sample_rate,
        target_rate,
        new_len
    );

    let last = (len - 1) as f64;
    let step = if new_len > 1 {
        last / (new_len - 1) as f64
    } else {
        0.0
    };

    let mut out = Vec::with_capacity(new_len);
    for i in 0..new_len {
        let x = if i + 1 == new_len && new_len > 1 {
            last
        } else {
            i as f64 * step
        };
        out.push(interpolate(&waveform.samples, x)?);
    }

    Ok(Waveform::new(target_rate, out))
}

/// Linearly interpolate `samples` at fractional index `x`
fn interpolate(samples: &[f64], x: f64) -> Result<f64, ConversionError> {
    let last = samples.len().saturating_sub(1) as f64;
    if !x.is_finite() || x < 0.0 || x > last {
        return Err(ConversionError::ResampleError(format!(
            "Interpolation position {} outside [0, {}]",
            x, last
        )));
    }

    let i0 = x.floor() as usize;
    let frac = x - i0 as f64;
    if frac == 0.0 {
        return Ok(samples[i0]);
    }

    let s0 = samples[i0];
    let s1 = samples[i0 + 1];
    Ok(s0 + (s1 - s0) * frac)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upsample_ramp_endpoints() {
        let w = Waveform::new(8000, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        let up = resample(w, 16000).unwrap();

        assert_eq!(up.sample_rate, 16000);
        assert_eq!(up.len(), 10);
        assert_eq!(up.samples[0], -1.0);
        assert_eq!(up.samples[9], 1.0);
        // A linear ramp stays linear under linear interpolation.
        for (i, &s) in up.samples.iter().enumerate() {
            let expected = -1.0 + 2.0 * i as f64 / 9.0;
            assert!((s - expected).abs() < 1e-12, "sample {}: {} vs {}", i, s, expected);
        }
    }

    #[test]
    fn test_identity_rate() {
        let w = Waveform::new(22050, vec![0.1, -0.3, 0.7, 0.2]);
        assert_eq!(resample(w.clone(), 22050).unwrap(), w);
    }

    #[test]
    fn test_downsample_hits_original_indices() {
        // 9 samples -> 5 samples: positions 0, 2, 4, 6, 8 are exact.
        let w = Waveform::new(18, (0..9).map(|i| (i * i) as f64).collect());
        let down = resample(w, 10).unwrap();
        assert_eq!(down.samples, vec![0.0, 4.0, 16.0, 36.0, 64.0]);
    }

    #[test]
    fn test_midpoint_interpolation() {
        let w = Waveform::new(2, vec![0.0, 1.0]);
        let up = resample(w, 3).unwrap();
        assert_eq!(up.samples, vec![0.0, 0.5, 1.0]);

        let w = Waveform::new(3, vec![0.0, 1.0, 0.0]);
        let up = resample(w, 5).unwrap();
        assert_eq!(up.len(), 5);
        assert_eq!(up.samples, vec![0.0, 0.5, 1.0, 0.5, 0.0]);
    }

    #[test]
    fn test_single_output_sample_is_first() {
        let w = Waveform::new(40, vec![0.25, 0.5, 0.75]);
        let down = resample(w, 16).unwrap();
        assert_eq!(down.len(), 1);
        assert_eq!(down.samples, vec![0.25]);
    }

    #[test]
    fn test_ratio_rounding_to_zero() {
        let w = Waveform::new(1000, vec![0.25, 0.5]);
        let down = resample(w, 1).unwrap();
        assert!(down.is_empty());
    }

    #[test]
    fn test_amplitude_scale_preserved() {
        let w = Waveform::new(100, vec![3.0, -5.0, 3.0]);
        let up = resample(w, 200).unwrap();
        assert!(up.samples.iter().all(|&s| (-5.0..=3.0).contains(&s)));
        assert_eq!(up.samples[0], 3.0);
    }

    #[test]
    fn test_resampled_len_ties_to_even() {
        assert_eq!(resampled_len(5, 2, 1), 2); // 2.5 -> 2
        assert_eq!(resampled_len(7, 2, 1), 4); // 3.5 -> 4
        assert_eq!(resampled_len(44100, 44100, 22050), 22050);
    }

    #[test]
    fn test_errors() {
        let w = Waveform::new(8000, vec![0.5]);
        assert!(matches!(resample(w, 16000), Err(ConversionError::ResampleError(_))));

        let w = Waveform::new(8000, vec![0.5, 0.25]);
        assert!(matches!(resample(w, 0), Err(ConversionError::ResampleError(_))));

        assert!(matches!(
            interpolate(&[0.0, 1.0], 1.5),
            Err(ConversionError::ResampleError(_))
        ));
        assert!(interpolate(&[0.0, 1.0], f64::NAN).is_err());
    }
}
