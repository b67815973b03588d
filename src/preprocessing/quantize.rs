//! Fixed-point quantization
//!
//! Maps canonical `f64` samples to integers of a given bit depth under one of
//! two policies:
//!
//! - [`QuantizePolicy::Symmetric`]: signed two's-complement output. Signals
//!   peaking above 1.0 are attenuated to unit range first, then scaled by
//!   `2^(b-1) - 1`, so 1.0 maps to the positive maximum and -1.0 to its
//!   negation (the most negative code is only reached by clamping).
//! - [`QuantizePolicy::MinMax`]: unsigned output. The observed `[lo, hi]`
//!   range is stretched onto `[0, 2^b - 1]`; a constant signal maps to the
//!   midpoint.
//!
//! Rounding is half-to-even throughout.
//!
//! # Example
//!
//! ```
//! use stratum_pcm::preprocessing::quantize::{quantize, QuantizePolicy};
//!
//! let q = quantize(&[-1.0, 0.0, 1.0], 16, QuantizePolicy::Symmetric)?;
//! assert_eq!(q.values, vec![-32767, 0, 32767]);
//!
//! let q = quantize(&[-1.0, 0.0, 1.0], 12, QuantizePolicy::MinMax)?;
//! assert_eq!(q.values, vec![0, 2048, 4095]);
//! # Ok::<(), stratum_pcm::ConversionError>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::normalization::AmplitudeStats;
use crate::error::ConversionError;

/// Smallest supported bit depth
pub const MIN_BIT_DEPTH: u32 = 1;

/// Largest supported bit depth
pub const MAX_BIT_DEPTH: u32 = 32;

/// Quantization policy
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuantizePolicy {
    /// Zero-centred signed output, peak-attenuated only when above unit range
    #[default]
    Symmetric,
    /// Observed range stretched onto the full unsigned range
    MinMax,
}

impl QuantizePolicy {
    /// Inclusive integer range this policy produces at `bit_depth`
    ///
    /// Callers must pass a depth in `MIN_BIT_DEPTH..=MAX_BIT_DEPTH`.
    pub fn range(self, bit_depth: u32) -> (i64, i64) {
        match self {
            QuantizePolicy::Symmetric => {
                let half = 1i64 << (bit_depth - 1);
                (-half, half - 1)
            }
            QuantizePolicy::MinMax => (0, (1i64 << bit_depth) - 1),
        }
    }

    /// Whether output values are signed
    pub fn is_signed(self) -> bool {
        matches!(self, QuantizePolicy::Symmetric)
    }
}

impl fmt::Display for QuantizePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QuantizePolicy::Symmetric => write!(f, "symmetric"),
            QuantizePolicy::MinMax => write!(f, "minmax"),
        }
    }
}

impl FromStr for QuantizePolicy {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "symmetric" | "signed" => Ok(QuantizePolicy::Symmetric),
            "minmax" | "min-max" | "unsigned" => Ok(QuantizePolicy::MinMax),
            other => Err(ConversionError::InvalidInput(format!(
                "Unknown quantize policy '{}' (expected symmetric or minmax)",
                other
            ))),
        }
    }
}

/// Quantized samples with the format they were produced in
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedSamples {
    /// Policy used
    pub policy: QuantizePolicy,
    /// Bits per sample
    pub bit_depth: u32,
    /// One value per input sample, within `policy.range(bit_depth)`
    pub values: Vec<i64>,
}

impl QuantizedSamples {
    /// Number of samples
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether there are no samples
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Inclusive integer range of the format
    pub fn range(&self) -> (i64, i64) {
        self.policy.range(self.bit_depth)
    }
}

/// Validate a bit depth against the supported range
pub fn check_bit_depth(bit_depth: u32) -> Result<(), ConversionError> {
    if !(MIN_BIT_DEPTH..=MAX_BIT_DEPTH).contains(&bit_depth) {
        return Err(ConversionError::QuantizeError(format!(
            "Unsupported bit depth {} (expected {}-{})",
            bit_depth, MIN_BIT_DEPTH, MAX_BIT_DEPTH
        )));
    }
    Ok(())
}

/// Quantize canonical samples to `bit_depth`-bit integers
///
/// # Errors
///
/// Returns `ConversionError::QuantizeError` if `samples` is empty, contains
/// non-finite values, or `bit_depth` is outside 1-32.
pub fn quantize(
    samples: &[f64],
    bit_depth: u32,
    policy: QuantizePolicy,
) -> Result<QuantizedSamples, ConversionError> {
    check_bit_depth(bit_depth)?;
    let stats = AmplitudeStats::measure(samples)?;
    let (lo, hi) = policy.range(bit_depth);

    log::debug!(
        "Quantizing {} samples: {} policy, {} bits, peak={:.4}",
        samples.len(),
        policy,
        bit_depth,
        stats.peak
    );

    let values = match policy {
        QuantizePolicy::Symmetric => {
            let gain = stats.symmetric_gain();
            if gain != 1.0 {
                log::info!("Peak {:.4} exceeds unit range, attenuating by {:.6}", stats.peak, gain);
            }
            let scale = gain * hi as f64;
            samples
                .iter()
                .map(|&s| to_code(s * scale, lo, hi))
                .collect()
        }
        QuantizePolicy::MinMax => {
            if stats.is_constant() {
                log::warn!("Constant signal ({}), emitting midpoint code", stats.min);
                let mid = to_code(hi as f64 / 2.0, lo, hi);
                vec![mid; samples.len()]
            } else {
                let span = stats.max - stats.min;
                let full = hi as f64;
                samples
                    .iter()
                    .map(|&s| to_code((s - stats.min) / span * full, lo, hi))
                    .collect()
            }
        }
    };

    Ok(QuantizedSamples {
        policy,
        bit_depth,
        values,
    })
}

/// Round half-to-even and clamp into `[lo, hi]`
fn to_code(x: f64, lo: i64, hi: i64) -> i64 {
    x.round_ties_even().clamp(lo as f64, hi as f64) as i64
}
