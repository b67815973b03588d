//! Emission metadata

use serde::{Deserialize, Serialize};

/// Facts written alongside an emitted sample array
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmissionMetadata {
    /// Generated array identifier
    pub array_name: String,
    /// Sample rate of the emitted samples in Hz
    pub sample_rate: u32,
    /// Number of emitted samples
    pub sample_count: usize,
    /// `sample_count / sample_rate`
    pub duration_seconds: f64,
}

impl EmissionMetadata {
    /// Derive metadata for `sample_count` samples at `sample_rate`
    pub fn new(array_name: impl Into<String>, sample_rate: u32, sample_count: usize) -> Self {
        let duration_seconds = if sample_rate == 0 {
            0.0
        } else {
            sample_count as f64 / sample_rate as f64
        };
        Self {
            array_name: array_name.into(),
            sample_rate,
            sample_count,
            duration_seconds,
        }
    }
}
