//! Conversion result types

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::emit::metadata::EmissionMetadata;
use crate::emit::OutputFormat;
use crate::io::decoder::SourceFormat;
use crate::preprocessing::quantize::{QuantizePolicy, QuantizedSamples};

/// Quantized samples tagged with the rate they play back at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedWaveform {
    /// Playback sample rate in Hz
    pub sample_rate: u32,
    /// Fixed-point samples
    pub samples: QuantizedSamples,
}

impl QuantizedWaveform {
    /// Emission metadata for this waveform under `array_name`
    pub fn metadata(&self, array_name: &str) -> EmissionMetadata {
        EmissionMetadata::new(array_name, self.sample_rate, self.samples.len())
    }
}

/// Summary of one completed file conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversionReport {
    /// Input file
    pub input: PathBuf,
    /// Output file
    pub output: PathBuf,
    /// Sample rate declared by the input
    pub source_sample_rate: u32,
    /// Channel count of the input before downmixing
    pub source_channels: u16,
    /// Bits per stored input sample
    pub source_bits_per_sample: u16,
    /// Stored input sample encoding
    pub source_format: SourceFormat,
    /// What was emitted
    pub metadata: EmissionMetadata,
    /// Bits per emitted sample
    pub bit_depth: u32,
    /// Quantization policy used
    pub policy: QuantizePolicy,
    /// Output format written
    pub format: OutputFormat,
    /// Wall time for decode through write in milliseconds
    pub processing_time_ms: f32,
}
