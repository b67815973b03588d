//! Audio I/O modules
//!
//! WAV decoding using Symphonia and the waveform type it produces.

pub mod decoder;
pub mod waveform;
