//! Flat text encodings of quantized samples
//!
//! One value per line in decimal, hexadecimal or binary, or a single
//! comma-joined line. Hex and binary values are fixed width for the bit depth
//! and show negative values as their two's-complement bit pattern. No format
//! writes a separator after the last value.

use crate::preprocessing::quantize::QuantizedSamples;

/// Bit pattern of `value` truncated to `bit_depth` bits
fn bit_pattern(value: i64, bit_depth: u32) -> u64 {
    let mask = if bit_depth >= 64 {
        u64::MAX
    } else {
        (1u64 << bit_depth) - 1
    };
    (value as u64) & mask
}

/// Decimal, one value per line
pub fn render_decimal(quantized: &QuantizedSamples) -> String {
    join(quantized.values.iter().map(|v| v.to_string()), "\n")
}

/// `0x`-prefixed uppercase hex, zero-padded to `ceil(bit_depth / 4)` digits
pub fn render_hex(quantized: &QuantizedSamples) -> String {
    let digits = quantized.bit_depth.div_ceil(4) as usize;
    join(
        quantized
            .values
            .iter()
            .map(|&v| format!("0x{:0width$X}", bit_pattern(v, quantized.bit_depth), width = digits)),
        "\n",
    )
}

/// Binary, zero-padded to `bit_depth` digits
pub fn render_binary(quantized: &QuantizedSamples) -> String {
    let digits = quantized.bit_depth as usize;
    join(
        quantized
            .values
            .iter()
            .map(|&v| format!("{:0width$b}", bit_pattern(v, quantized.bit_depth), width = digits)),
        "\n",
    )
}

/// All values on one comma-separated line
pub fn render_csv(quantized: &QuantizedSamples) -> String {
    join(quantized.values.iter().map(|v| v.to_string()), ",")
}

fn join<I: Iterator<Item = String>>(items: I, sep: &str) -> String {
    items.collect::<Vec<_>>().join(sep)
}
