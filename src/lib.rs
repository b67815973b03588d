//! # Stratum PCM
//!
//! Converts recorded WAV audio into fixed-point sample arrays for playback on
//! resource-constrained hardware (PWM or DAC output on a microcontroller).
//!
//! ## Features
//!
//! - **Decoding**: integer or float WAV, any channel count, downmixed to mono
//! - **Trimming**: keep at most N seconds
//! - **Resampling**: linear interpolation to a target rate
//! - **Quantization**: symmetric signed or min-max unsigned, 1-32 bits
//! - **Emission**: C header, or decimal/hex/binary/CSV text, written atomically
//!
//! ## Quick Start
//!
//! ```no_run
//! use stratum_pcm::{convert_file, ConversionConfig, PipelineConfig};
//!
//! let config = ConversionConfig {
//!     input: "blk_enter_dragon.wav".into(),
//!     output: "blk_enter_dragon.h".into(),
//!     array_name: "blk_enter_dragon_audio".to_string(),
//!     pipeline: PipelineConfig {
//!         target_sample_rate: Some(22050),
//!         max_duration_secs: Some(4.0),
//!         ..Default::default()
//!     },
//!     ..Default::default()
//! };
//!
//! let report = convert_file(&config)?;
//! println!("{} samples, {:.3} s", report.metadata.sample_count, report.metadata.duration_seconds);
//! # Ok::<(), stratum_pcm::ConversionError>(())
//! ```
//!
//! ## Architecture
//!
//! ```text
//! Decode → Trim → Resample → Normalize/Quantize → Emit
//! ```
//!
//! Every stage is a pure function over an owned [`Waveform`]; configuration
//! is passed explicitly into each run.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod emit;
pub mod error;
pub mod io;
pub mod preprocessing;
pub mod report;

// Re-export main types
pub use batch::{convert_batch, BatchOutcome};
pub use config::{ConversionConfig, PipelineConfig};
pub use emit::metadata::EmissionMetadata;
pub use emit::OutputFormat;
pub use error::ConversionError;
pub use io::waveform::Waveform;
pub use preprocessing::quantize::{QuantizePolicy, QuantizedSamples};
pub use report::{ConversionReport, QuantizedWaveform};

/// Run the sample-processing stages on a decoded waveform
///
/// Trims to `max_duration_secs` (at the source rate), resamples when a
/// target rate is set and differs from the source, then quantizes.
///
/// # Arguments
///
/// * `waveform` - Mono canonical samples, consumed
/// * `config` - Pipeline parameters
///
/// # Errors
///
/// Returns the first stage error: `ResampleError` / `QuantizeError` from
/// parameter validation, `InvalidInput` for a waveform with a 0 Hz rate,
/// `ResampleError` for waveforms too short to interpolate, `QuantizeError`
/// for empty or non-finite samples (including a trim that kept nothing).
///
/// # Example
///
/// ```
/// use stratum_pcm::{convert_waveform, PipelineConfig, Waveform};
///
/// let w = Waveform::new(8000, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
/// let config = PipelineConfig {
///     target_sample_rate: Some(16000),
///     ..Default::default()
/// };
/// let q = convert_waveform(w, &config)?;
/// assert_eq!(q.sample_rate, 16000);
/// assert_eq!(q.samples.values.len(), 10);
/// # Ok::<(), stratum_pcm::ConversionError>(())
/// ```
pub fn convert_waveform(
    mut waveform: Waveform,
    config: &PipelineConfig,
) -> Result<QuantizedWaveform, ConversionError> {
    config.validate()?;

    if waveform.sample_rate == 0 {
        return Err(ConversionError::InvalidInput(
            "Waveform sample rate must be > 0".to_string(),
        ));
    }

    if let Some(max_secs) = config.max_duration_secs {
        waveform = preprocessing::trim::trim(waveform, max_secs);
    }

    if let Some(target) = config.target_sample_rate {
        if target != waveform.sample_rate {
            waveform = preprocessing::resample::resample(waveform, target)?;
        }
    }

    let samples =
        preprocessing::quantize::quantize(&waveform.samples, config.bit_depth, config.policy)?;

    Ok(QuantizedWaveform {
        sample_rate: waveform.sample_rate,
        samples,
    })
}

/// Convert one WAV file and write the result
///
/// The output is fully rendered in memory before anything touches the
/// destination, and then written atomically: a failed job leaves no partial
/// output behind.
///
/// # Errors
///
/// Returns the first error of any stage (see [`ConversionError`]).
pub fn convert_file(config: &ConversionConfig) -> Result<ConversionReport, ConversionError> {
    use std::time::Instant;
    let start_time = Instant::now();

    config.validate()?;
    log::info!(
        "Converting {} -> {} ({}, {} bits, {})",
        config.input.display(),
        config.output.display(),
        config.pipeline.policy,
        config.pipeline.bit_depth,
        config.format
    );

    let decoded = io::decoder::decode_wav_file(&config.input)?;
    let source_sample_rate = decoded.waveform.sample_rate;
    let source_channels = decoded.channels;
    let source_bits_per_sample = decoded.bits_per_sample;
    let source_format = decoded.sample_format;

    let quantized = convert_waveform(decoded.waveform, &config.pipeline)?;
    let metadata = quantized.metadata(&config.array_name);
    let text = emit::render(&quantized.samples, &metadata, config.format)?;
    emit::write_atomic(&config.output, &text)?;

    let processing_time_ms = start_time.elapsed().as_secs_f32() * 1000.0;
    log::debug!(
        "Converted {} samples in {:.2} ms",
        metadata.sample_count,
        processing_time_ms
    );

    Ok(ConversionReport {
        input: config.input.clone(),
        output: config.output.clone(),
        source_sample_rate,
        source_channels,
        source_bits_per_sample,
        source_format,
        metadata,
        bit_depth: quantized.samples.bit_depth,
        policy: quantized.samples.policy,
        format: config.format,
        processing_time_ms,
    })
}
