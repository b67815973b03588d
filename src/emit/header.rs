//! C header emission
//!
//! Produces a self-contained header with an include guard, a `<name>_length`
//! constant and a `const` array of the narrowest `stdint.h` type that holds
//! the quantized range:
//!
//! ```text
//! // audio data for: kick
//! // sample rate: 22050 hz
//! // duration: 0.250 seconds
//! // length: 5513 samples
//!
//! #ifndef AUDIO_DATA_H_KICK
//! #define AUDIO_DATA_H_KICK
//! ...
//! const int16_t kick[5513] = {
//!     0, 12, -40, ...
//! };
//!
//! #endif // AUDIO_DATA_H_KICK
//! ```

use std::fmt::{self, Write};

use super::metadata::EmissionMetadata;
use crate::error::ConversionError;
use crate::preprocessing::quantize::QuantizedSamples;

/// Values written per array line
pub const VALUES_PER_LINE: usize = 12;

/// Narrowest `stdint.h` type for the quantized format
pub fn c_type(quantized: &QuantizedSamples) -> &'static str {
    match (quantized.policy.is_signed(), quantized.bit_depth) {
        (true, 0..=8) => "int8_t",
        (true, 9..=16) => "int16_t",
        (true, _) => "int32_t",
        (false, 0..=8) => "uint8_t",
        (false, 9..=16) => "uint16_t",
        (false, _) => "uint32_t",
    }
}

/// Render a C header for `quantized`
///
/// # Errors
///
/// Returns `ConversionError::EmitError` for an empty sample sequence (C has
/// no zero-length arrays).
pub fn render_header(
    quantized: &QuantizedSamples,
    meta: &EmissionMetadata,
) -> Result<String, ConversionError> {
    if quantized.is_empty() {
        return Err(ConversionError::EmitError(
            "Cannot emit a zero-length C array".to_string(),
        ));
    }

    let mut out = String::with_capacity(256 + quantized.len() * 8);
    write_header(&mut out, quantized, meta)
        .map_err(|e| ConversionError::EmitError(format!("Cannot format C header: {}", e)))?;
    Ok(out)
}

fn write_header(
    out: &mut String,
    quantized: &QuantizedSamples,
    meta: &EmissionMetadata,
) -> fmt::Result {
    let name = &meta.array_name;
    let guard = format!("AUDIO_DATA_H_{}", name.to_ascii_uppercase());
    let count = quantized.len();

    writeln!(out, "// audio data for: {}", name)?;
    writeln!(out, "// sample rate: {} hz", meta.sample_rate)?;
    writeln!(out, "// duration: {:.3} seconds", meta.duration_seconds)?;
    writeln!(out, "// length: {} samples", count)?;
    writeln!(out)?;
    writeln!(out, "#ifndef {}", guard)?;
    writeln!(out, "#define {}", guard)?;
    writeln!(out)?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out, "#include <stddef.h>")?;
    writeln!(out)?;
    writeln!(out, "const size_t {}_length = {};", name, count)?;
    writeln!(out)?;
    write!(out, "const {} {}[{}] = {{\n    ", c_type(quantized), name, count)?;

    for (i, v) in quantized.values.iter().enumerate() {
        write!(out, "{}", v)?;
        if i + 1 < count {
            out.push(',');
            if (i + 1) % VALUES_PER_LINE == 0 {
                out.push_str("\n    ");
            } else {
                out.push(' ');
            }
        } else {
            out.push('\n');
        }
    }

    writeln!(out, "}};")?;
    writeln!(out)?;
    writeln!(out, "#endif // {}", guard)
}
