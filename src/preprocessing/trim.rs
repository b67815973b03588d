//! Duration trimming

use crate::io::waveform::Waveform;

/// Truncate a waveform to at most `max_seconds` of audio
///
/// Keeps the first `floor(max_seconds * sample_rate)` samples. Waveforms that
/// are already short enough come back unchanged; `max_seconds <= 0` (or NaN)
/// yields an empty waveform. The sample rate is never changed.
pub fn trim(mut waveform: Waveform, max_seconds: f64) -> Waveform {
    // Float-to-int casts saturate: NaN and negatives give 0, +inf gives usize::MAX.
    let max_samples = (max_seconds * waveform.sample_rate as f64).floor() as usize;

    if max_samples < waveform.samples.len() {
        log::debug!(
            "Trimming {} samples to {} ({:.3} s at {} Hz)",
            waveform.samples.len(),
            max_samples,
            max_seconds,
            waveform.sample_rate
        );
        waveform.samples.truncate(max_samples);
    }

    waveform
}
