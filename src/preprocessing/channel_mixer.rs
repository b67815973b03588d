//! Channel mixing utilities (interleaved multi-channel to mono)

use crate::error::ConversionError;

/// Reduce interleaved frames to mono by averaging the channels of each frame
///
/// # Arguments
///
/// * `interleaved` - Samples laid out frame by frame (`L R L R ...` for stereo)
/// * `channels` - Number of channels per frame
///
/// # Returns
///
/// One sample per frame, the arithmetic mean of that frame's channels.
/// Mono input is returned as-is.
///
/// # Errors
///
/// Returns `ConversionError::DecodeError` if `channels` is zero or the buffer
/// ends with a partial frame.
pub fn downmix_interleaved(
    interleaved: Vec<f64>,
    channels: usize,
) -> Result<Vec<f64>, ConversionError> {
    if channels == 0 {
        return Err(ConversionError::DecodeError(
            "Container declares zero channels".to_string(),
        ));
    }

    if interleaved.len() % channels != 0 {
        return Err(ConversionError::DecodeError(format!(
            "Sample count {} is not a whole number of {}-channel frames",
            interleaved.len(),
            channels
        )));
    }

    if channels == 1 {
        return Ok(interleaved);
    }

    log::debug!(
        "Downmixing {} frames of {} channels to mono",
        interleaved.len() / channels,
        channels
    );

    let divisor = channels as f64;
    Ok(interleaved
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f64>() / divisor)
        .collect())
}
