//! Amplitude statistics and gain for normalization
//!
//! Supports the two scaling rules used before fixed-point conversion:
//! - Peak attenuation (symmetric): bring samples into [-1, 1] only when they
//!   exceed it, never scale up
//! - Min-max: map the observed `[lo, hi]` range onto a target span

use crate::error::ConversionError;

/// Amplitude statistics over a sample sequence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AmplitudeStats {
    /// Largest absolute sample value
    pub peak: f64,
    /// Smallest sample value
    pub min: f64,
    /// Largest sample value
    pub max: f64,
}

impl AmplitudeStats {
    /// Measure a non-empty sequence of finite samples
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::QuantizeError` if `samples` is empty or holds
    /// NaN/infinite values.
    pub fn measure(samples: &[f64]) -> Result<Self, ConversionError> {
        if samples.is_empty() {
            return Err(ConversionError::QuantizeError(
                "Empty sample sequence".to_string(),
            ));
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for (i, &s) in samples.iter().enumerate() {
            if !s.is_finite() {
                return Err(ConversionError::QuantizeError(format!(
                    "Non-finite sample {} at index {}",
                    s, i
                )));
            }
            min = min.min(s);
            max = max.max(s);
        }

        Ok(Self {
            peak: min.abs().max(max.abs()),
            min,
            max,
        })
    }

    /// Gain that brings the peak into [-1, 1]
    ///
    /// `1 / peak` when the peak exceeds 1.0, otherwise 1.0.
    pub fn symmetric_gain(&self) -> f64 {
        if self.peak > 1.0 {
            1.0 / self.peak
        } else {
            1.0
        }
    }

    /// Whether min-max mapping would divide by zero
    pub fn is_constant(&self) -> bool {
        self.max == self.min
    }
}
