//! Error types for the conversion pipeline

use std::fmt;

/// Errors that can occur while converting a waveform
///
/// Each pipeline stage fails with its own kind so callers can tell where a
/// conversion stopped.
#[derive(Debug, Clone, PartialEq)]
pub enum ConversionError {
    /// Invalid configuration or caller-supplied parameters
    InvalidInput(String),

    /// Malformed or unsupported input container
    DecodeError(String),

    /// Rate conversion could not be performed
    ResampleError(String),

    /// Fixed-point conversion could not be performed
    QuantizeError(String),

    /// Output could not be rendered or written
    EmitError(String),
}

impl fmt::Display for ConversionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            ConversionError::DecodeError(msg) => write!(f, "Decode error: {}", msg),
            ConversionError::ResampleError(msg) => write!(f, "Resample error: {}", msg),
            ConversionError::QuantizeError(msg) => write!(f, "Quantize error: {}", msg),
            ConversionError::EmitError(msg) => write!(f, "Emit error: {}", msg),
        }
    }
}

impl std::error::Error for ConversionError {}

impl From<symphonia::core::errors::Error> for ConversionError {
    fn from(err: symphonia::core::errors::Error) -> Self {
        ConversionError::DecodeError(err.to_string())
    }
}

impl From<std::io::Error> for ConversionError {
    fn from(err: std::io::Error) -> Self {
        ConversionError::EmitError(err.to_string())
    }
}
