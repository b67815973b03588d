//! Configuration parameters for waveform conversion

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::emit::{validate_identifier, OutputFormat};
use crate::error::ConversionError;
use crate::preprocessing::quantize::{check_bit_depth, QuantizePolicy};

/// Sample-processing parameters (everything between decode and emission)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Output sample rate in Hz (default: None, keep the source rate)
    pub target_sample_rate: Option<u32>,

    /// Keep at most this many seconds of audio (default: None, no limit)
    /// Trimming happens at the source rate, before resampling
    pub max_duration_secs: Option<f64>,

    /// Bits per quantized sample, 1-32 (default: 16)
    pub bit_depth: u32,

    /// Quantization policy (default: Symmetric)
    pub policy: QuantizePolicy,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_sample_rate: None,
            max_duration_secs: None,
            bit_depth: 16,
            policy: QuantizePolicy::Symmetric,
        }
    }
}

impl PipelineConfig {
    /// Check parameters before any audio is touched
    ///
    /// # Errors
    ///
    /// - `ResampleError` for a target rate of 0
    /// - `QuantizeError` for a bit depth outside 1-32
    ///
    /// A non-positive or NaN max duration is not rejected here: trimming
    /// then keeps nothing and the run fails in the stage that needs samples.
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.target_sample_rate == Some(0) {
            return Err(ConversionError::ResampleError(
                "Target sample rate must be > 0".to_string(),
            ));
        }

        check_bit_depth(self.bit_depth)
    }
}

/// One conversion job: input, output and how to get from one to the other
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConversionConfig {
    /// Input WAV file
    pub input: PathBuf,

    /// Output file, replaced atomically
    pub output: PathBuf,

    /// Generated array identifier (default: "audio_data")
    pub array_name: String,

    /// Output format (default: Header)
    pub format: OutputFormat,

    /// Sample-processing parameters
    #[serde(flatten)]
    pub pipeline: PipelineConfig,
}

impl Default for ConversionConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::new(),
            output: PathBuf::new(),
            array_name: "audio_data".to_string(),
            format: OutputFormat::Header,
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ConversionConfig {
    /// Load a configuration from a JSON file
    ///
    /// Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// Returns `ConversionError::InvalidInput` if the file cannot be read or
    /// parsed.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self, ConversionError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|e| {
            ConversionError::InvalidInput(format!("Cannot read config {}: {}", path.display(), e))
        })?;
        Self::from_json_str(&text)
    }

    /// Parse a configuration from JSON text
    pub fn from_json_str(text: &str) -> Result<Self, ConversionError> {
        serde_json::from_str(text)
            .map_err(|e| ConversionError::InvalidInput(format!("Invalid config: {}", e)))
    }

    /// Check the whole job before decoding
    pub fn validate(&self) -> Result<(), ConversionError> {
        if self.input.as_os_str().is_empty() {
            return Err(ConversionError::InvalidInput(
                "No input file given".to_string(),
            ));
        }
        if self.output.as_os_str().is_empty() {
            return Err(ConversionError::InvalidInput(
                "No output file given".to_string(),
            ));
        }
        validate_identifier(&self.array_name)?;
        self.pipeline.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_validate() {
        assert!(PipelineConfig::default().validate().is_ok());

        let config = ConversionConfig {
            input: "in.wav".into(),
            output: "out.h".into(),
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_pipeline_errors_are_stage_specific() {
        let zero_rate = PipelineConfig {
            target_sample_rate: Some(0),
            ..Default::default()
        };
        assert!(matches!(zero_rate.validate(), Err(ConversionError::ResampleError(_))));

        let bad_depth = PipelineConfig {
            bit_depth: 40,
            ..Default::default()
        };
        assert!(matches!(bad_depth.validate(), Err(ConversionError::QuantizeError(_))));

        let no_time = PipelineConfig {
            max_duration_secs: Some(0.0),
            ..Default::default()
        };
        assert!(no_time.validate().is_ok());
    }

    #[test]
    fn test_bad_array_name() {
        let config = ConversionConfig {
            input: "in.wav".into(),
            output: "out.h".into(),
            array_name: "kick drum".to_string(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(ConversionError::EmitError(_))));
    }

    #[test]
    fn test_json_partial_config() {
        let config = ConversionConfig::from_json_str(
            r#"{
                "input": "blk_enter_dragon.wav",
                "output": "blk_enter_dragon.h",
                "array_name": "blk_enter_dragon_audio",
                "target_sample_rate": 22050,
                "max_duration_secs": 4.0,
                "policy": "minmax",
                "format": "hex"
            }"#,
        )
        .unwrap();

        assert_eq!(config.array_name, "blk_enter_dragon_audio");
        assert_eq!(config.pipeline.target_sample_rate, Some(22050));
        assert_eq!(config.pipeline.max_duration_secs, Some(4.0));
        assert_eq!(config.pipeline.bit_depth, 16);
        assert_eq!(config.pipeline.policy, QuantizePolicy::MinMax);
        assert_eq!(config.format, OutputFormat::Hex);
    }

    #[test]
    fn test_json_errors() {
        assert!(matches!(
            ConversionConfig::from_json_str("{ not json"),
            Err(ConversionError::InvalidInput(_))
        ));
        assert!(ConversionConfig::from_json_file("/nonexistent/stratum-pcm.json").is_err());
    }
}
