//! WAV decoding using Symphonia
//!
//! Decodes an uncompressed WAV container into a mono [`Waveform`] of
//! canonical `f64` samples:
//!
//! - Integer PCM is divided by `max(|min|, |max|)` of its stored type.
//!   Signed widths divide by `2^(bits-1)`, so full-scale negative is exactly
//!   -1.0 and full-scale positive lands just below +1.0. Unsigned 8-bit
//!   samples divide by 255 and are not re-centred, so they land in [0, 1].
//! - IEEE float samples (32 or 64 bit) pass through unchanged (no range
//!   assumption).
//! - Multi-channel input is averaged down to mono.
//!
//! # Example
//!
//! ```no_run
//! use stratum_pcm::io::decoder::decode_wav_file;
//!
//! let decoded = decode_wav_file("kick-16bit.wav")?;
//! println!("{} samples at {} Hz", decoded.waveform.len(), decoded.waveform.sample_rate);
//! # Ok::<(), stratum_pcm::ConversionError>(())
//! ```

use std::io::{Cursor, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};
use symphonia::core::audio::{AudioBuffer, AudioBufferRef, Signal};
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;
use symphonia::core::sample::Sample;
use symphonia::default::{get_codecs, get_probe};

use super::waveform::Waveform;
use crate::error::ConversionError;
use crate::preprocessing::channel_mixer::downmix_interleaved;

const WAVE_FORMAT_PCM: u16 = 0x0001;
const WAVE_FORMAT_IEEE_FLOAT: u16 = 0x0003;
const WAVE_FORMAT_EXTENSIBLE: u16 = 0xFFFE;

/// Sample encoding declared by the source container
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceFormat {
    /// Signed integer PCM
    Int,
    /// Unsigned integer PCM (8-bit WAV)
    UInt,
    /// IEEE floating point
    Float,
}

/// Decoded audio plus the facts the container declared about it
#[derive(Debug, Clone)]
pub struct DecodedAudio {
    /// Mono canonical waveform
    pub waveform: Waveform,
    /// Channel count before downmixing
    pub channels: u16,
    /// Bits per stored sample
    pub bits_per_sample: u16,
    /// Stored sample encoding
    pub sample_format: SourceFormat,
}

/// Fields of the `fmt ` chunk the decoder relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct FormatChunk {
    format_tag: u16,
    channels: u16,
    sample_rate: u32,
    bits_per_sample: u16,
}

impl FormatChunk {
    fn source_format(&self) -> Result<SourceFormat, ConversionError> {
        match self.format_tag {
            WAVE_FORMAT_PCM if self.bits_per_sample == 8 => Ok(SourceFormat::UInt),
            WAVE_FORMAT_PCM => Ok(SourceFormat::Int),
            WAVE_FORMAT_IEEE_FLOAT => Ok(SourceFormat::Float),
            tag => Err(ConversionError::DecodeError(format!(
                "Unsupported WAV format tag 0x{:04X} (only PCM and IEEE float)",
                tag
            ))),
        }
    }
}

/// Decode a WAV file from disk
///
/// # Errors
///
/// Returns `ConversionError::DecodeError` if the file cannot be opened, the
/// container is malformed or unsupported, declares zero channels, or declares
/// a sample rate of zero.
pub fn decode_wav_file<P: AsRef<Path>>(path: P) -> Result<DecodedAudio, ConversionError> {
    let path = path.as_ref();
    log::debug!("Decoding WAV file: {}", path.display());

    let file = std::fs::File::open(path).map_err(|e| {
        ConversionError::DecodeError(format!("Cannot open {}: {}", path.display(), e))
    })?;
    decode_wav(std::io::BufReader::new(file))
}

/// Decode a WAV container from any byte source
///
/// The source is read to the end before decoding starts.
///
/// # Errors
///
/// Same as [`decode_wav_file`].
pub fn decode_wav<R: Read>(mut source: R) -> Result<DecodedAudio, ConversionError> {
    let mut bytes = Vec::new();
    source
        .read_to_end(&mut bytes)
        .map_err(|e| ConversionError::DecodeError(format!("Cannot read WAV data: {}", e)))?;

    let fmt = read_format_chunk(&bytes)?;

    if fmt.channels == 0 {
        return Err(ConversionError::DecodeError(
            "Container declares zero channels".to_string(),
        ));
    }

    if fmt.sample_rate == 0 {
        return Err(ConversionError::DecodeError(
            "Container declares a sample rate of 0 Hz".to_string(),
        ));
    }

    let sample_format = fmt.source_format()?;

    log::debug!(
        "WAV format: {} Hz, {} channel(s), {} bits, {:?}",
        fmt.sample_rate,
        fmt.channels,
        fmt.bits_per_sample,
        sample_format
    );

    let interleaved = decode_interleaved(bytes)?;
    let mono = downmix_interleaved(interleaved, fmt.channels as usize)?;

    Ok(DecodedAudio {
        waveform: Waveform::new(fmt.sample_rate, mono),
        channels: fmt.channels,
        bits_per_sample: fmt.bits_per_sample,
        sample_format,
    })
}

/// Walk the RIFF chunks and read the `fmt ` chunk
///
/// For `WAVE_FORMAT_EXTENSIBLE` the tag is taken from the sub-format GUID.
fn read_format_chunk(bytes: &[u8]) -> Result<FormatChunk, ConversionError> {
    if bytes.len() < 12 || &bytes[0..4] != b"RIFF" || &bytes[8..12] != b"WAVE" {
        return Err(ConversionError::DecodeError(
            "Not a RIFF/WAVE container".to_string(),
        ));
    }

    let mut pos = 12;
    while bytes.len().saturating_sub(pos) >= 8 {
        let chunk_id = &bytes[pos..pos + 4];
        let chunk_size = read_u32(bytes, pos + 4) as usize;
        let body = pos + 8;

        if chunk_id == b"fmt " {
            if chunk_size < 16 || body + 16 > bytes.len() {
                return Err(ConversionError::DecodeError(
                    "Truncated fmt chunk".to_string(),
                ));
            }

            let mut format_tag = read_u16(bytes, body);
            if format_tag == WAVE_FORMAT_EXTENSIBLE {
                if chunk_size < 40 || body + 26 > bytes.len() {
                    return Err(ConversionError::DecodeError(
                        "Truncated extensible fmt chunk".to_string(),
                    ));
                }
                format_tag = read_u16(bytes, body + 24);
            }

            return Ok(FormatChunk {
                format_tag,
                channels: read_u16(bytes, body + 2),
                sample_rate: read_u32(bytes, body + 4),
                bits_per_sample: read_u16(bytes, body + 14),
            });
        }

        // Chunk bodies are padded to an even length.
        pos = body
            .saturating_add(chunk_size)
            .saturating_add(chunk_size & 1);
    }

    Err(ConversionError::DecodeError(
        "No fmt chunk in WAV container".to_string(),
    ))
}

fn read_u16(bytes: &[u8], at: usize) -> u16 {
    u16::from_le_bytes([bytes[at], bytes[at + 1]])
}

fn read_u32(bytes: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([bytes[at], bytes[at + 1], bytes[at + 2], bytes[at + 3]])
}

/// Decode every packet of the first audio track into interleaved `f64`
fn decode_interleaved(bytes: Vec<u8>) -> Result<Vec<f64>, ConversionError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes)), Default::default());

    let mut hint = Hint::new();
    hint.with_extension("wav");

    let meta_opts: MetadataOptions = Default::default();
    let fmt_opts: FormatOptions = Default::default();

    let probed = get_probe().format(&hint, mss, &fmt_opts, &meta_opts)?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or_else(|| ConversionError::DecodeError("No audio track found".to_string()))?;

    let track_id = track.id;
    let mut decoder = get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut interleaved: Vec<f64> = Vec::new();

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e)) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                break
            }
            Err(e) => return Err(e.into()),
        };

        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet)? {
            AudioBufferRef::U8(buf) => append_frames(&*buf, &mut interleaved, |s: u8| {
                f64::from(s) / f64::from(u8::MAX)
            }),
            AudioBufferRef::U16(buf) => append_frames(&*buf, &mut interleaved, |s: u16| {
                f64::from(s) / f64::from(u16::MAX)
            }),
            AudioBufferRef::U24(buf) => append_frames(&*buf, &mut interleaved, |s| {
                f64::from(s.inner()) / 16_777_215.0
            }),
            AudioBufferRef::U32(buf) => append_frames(&*buf, &mut interleaved, |s: u32| {
                f64::from(s) / f64::from(u32::MAX)
            }),
            AudioBufferRef::S8(buf) => {
                append_frames(&*buf, &mut interleaved, |s: i8| f64::from(s) / 128.0)
            }
            AudioBufferRef::S16(buf) => {
                append_frames(&*buf, &mut interleaved, |s: i16| f64::from(s) / 32_768.0)
            }
            AudioBufferRef::S24(buf) => append_frames(&*buf, &mut interleaved, |s| {
                f64::from(s.inner()) / 8_388_608.0
            }),
            AudioBufferRef::S32(buf) => append_frames(&*buf, &mut interleaved, |s: i32| {
                f64::from(s) / 2_147_483_648.0
            }),
            AudioBufferRef::F32(buf) => append_frames(&*buf, &mut interleaved, f64::from),
            AudioBufferRef::F64(buf) => append_frames(&*buf, &mut interleaved, |s: f64| s),
        }
    }

    Ok(interleaved)
}

/// Append a planar buffer to `out` frame by frame
fn append_frames<S: Sample>(buf: &AudioBuffer<S>, out: &mut Vec<f64>, to_f64: impl Fn(S) -> f64) {
    let channels = buf.spec().channels.count();
    out.reserve(buf.frames() * channels);
    for i in 0..buf.frames() {
        for ch in 0..channels {
            out.push(to_f64(buf.chan(ch)[i]));
        }
    }
}
