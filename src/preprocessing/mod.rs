//! Sample preprocessing modules
//!
//! This module contains the pure transformations of the conversion pipeline:
//! - Channel mixing (interleaved multi-channel to mono)
//! - Duration trimming
//! - Linear-interpolation resampling
//! - Normalization statistics and fixed-point quantization

pub mod channel_mixer;
pub mod normalization;
pub mod quantize;
pub mod resample;
pub mod trim;
