//! Sample-rate-tagged mono sample sequences

use serde::{Deserialize, Serialize};

/// Mono audio samples tagged with their sample rate
///
/// Samples are canonical `f64` amplitudes, nominally in [-1.0, 1.0]. Pipeline
/// stages take a `Waveform` by value and hand back a new one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Waveform {
    /// Sample rate in Hz
    pub sample_rate: u32,
    /// Mono samples in time order
    pub samples: Vec<f64>,
}

impl Waveform {
    /// Create a waveform from a rate and its samples
    pub fn new(sample_rate: u32, samples: Vec<f64>) -> Self {
        Self {
            sample_rate,
            samples,
        }
    }

    /// Number of samples
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    /// Whether the waveform holds no samples
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Duration in seconds (0.0 when the rate is zero)
    pub fn duration_seconds(&self) -> f64 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f64 / self.sample_rate as f64
    }
}
