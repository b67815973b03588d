//! Output emission
//!
//! Renders quantized samples as a C header or a flat text encoding, and
//! writes the result so the destination either holds a complete output or is
//! left untouched.

pub mod flat;
pub mod header;
pub mod metadata;

use std::fmt;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConversionError;
use crate::preprocessing::quantize::QuantizedSamples;
use metadata::EmissionMetadata;

/// Output format selector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// C header with include guard, length constant and array
    #[default]
    Header,
    /// Decimal, one value per line
    Decimal,
    /// Fixed-width uppercase hex, one value per line
    Hex,
    /// Fixed-width binary, one value per line
    Binary,
    /// Single comma-joined line
    Csv,
}

impl OutputFormat {
    /// Conventional file extension for the format
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Header => "h",
            OutputFormat::Decimal => "dec",
            OutputFormat::Hex => "hex",
            OutputFormat::Binary => "bin",
            OutputFormat::Csv => "csv",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Header => "header",
            OutputFormat::Decimal => "decimal",
            OutputFormat::Hex => "hex",
            OutputFormat::Binary => "binary",
            OutputFormat::Csv => "csv",
        };
        write!(f, "{}", name)
    }
}

impl FromStr for OutputFormat {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "header" | "h" => Ok(OutputFormat::Header),
            "decimal" | "dec" => Ok(OutputFormat::Decimal),
            "hex" | "hexadecimal" => Ok(OutputFormat::Hex),
            "binary" | "bin" => Ok(OutputFormat::Binary),
            "csv" | "comma" => Ok(OutputFormat::Csv),
            other => Err(ConversionError::EmitError(format!(
                "Unsupported output format '{}' (expected header, dec, hex, bin or csv)",
                other
            ))),
        }
    }
}

/// Check that `name` is usable as a C identifier
pub fn validate_identifier(name: &str) -> Result<(), ConversionError> {
    let mut chars = name.chars();
    let valid = match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {
            chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
        }
        _ => false,
    };

    if !valid {
        return Err(ConversionError::EmitError(format!(
            "'{}' is not a valid C identifier",
            name
        )));
    }
    Ok(())
}

/// Turn an arbitrary label (e.g. a file stem) into a C identifier
///
/// Invalid characters become `_`; a leading digit gets a `_` prefix.
pub fn sanitize_identifier(label: &str) -> String {
    let mut ident: String = label
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    if ident.is_empty() || ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }
    ident
}

/// Render quantized samples in `format`
///
/// # Errors
///
/// Returns `ConversionError::EmitError` if the array name is not a C
/// identifier or the header format is asked for an empty sequence.
pub fn render(
    quantized: &QuantizedSamples,
    meta: &EmissionMetadata,
    format: OutputFormat,
) -> Result<String, ConversionError> {
    validate_identifier(&meta.array_name)?;
    log::debug!(
        "Rendering {} samples as {} ({})",
        quantized.len(),
        format,
        meta.array_name
    );

    Ok(match format {
        OutputFormat::Header => header::render_header(quantized, meta)?,
        OutputFormat::Decimal => flat::render_decimal(quantized),
        OutputFormat::Hex => flat::render_hex(quantized),
        OutputFormat::Binary => flat::render_binary(quantized),
        OutputFormat::Csv => flat::render_csv(quantized),
    })
}

/// Write `contents` to `path` atomically
///
/// The text goes to a temporary file in the destination directory which is
/// then renamed over `path`. On failure the destination is not modified.
///
/// # Errors
///
/// Returns `ConversionError::EmitError` on any I/O failure.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), ConversionError> {
    let path = path.as_ref();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| {
        ConversionError::EmitError(format!(
            "Cannot create temporary file in {}: {}",
            dir.display(),
            e
        ))
    })?;
    tmp.write_all(contents.as_bytes())?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|e| {
        ConversionError::EmitError(format!("Cannot write {}: {}", path.display(), e.error))
    })?;

    log::info!("Wrote {} bytes to {}", contents.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preprocessing::quantize::QuantizePolicy;

    fn q(values: Vec<i64>) -> QuantizedSamples {
        QuantizedSamples {
            policy: QuantizePolicy::Symmetric,
            bit_depth: 16,
            values,
        }
    }

    #[test]
    fn test_format_selectors() {
        assert_eq!("header".parse::<OutputFormat>().unwrap(), OutputFormat::Header);
        assert_eq!("HEX".parse::<OutputFormat>().unwrap(), OutputFormat::Hex);
        assert_eq!("bin".parse::<OutputFormat>().unwrap(), OutputFormat::Binary);
        assert_eq!("comma".parse::<OutputFormat>().unwrap(), OutputFormat::Csv);
        assert!(matches!(
            "mp3".parse::<OutputFormat>(),
            Err(ConversionError::EmitError(_))
        ));
    }

    #[test]
    fn test_identifiers() {
        assert!(validate_identifier("blk_enter_dragon_audio").is_ok());
        assert!(validate_identifier("_x9").is_ok());
        assert!(validate_identifier("").is_err());
        assert!(validate_identifier("9lives").is_err());
        assert!(validate_identifier("kick-16bit").is_err());

        assert_eq!(sanitize_identifier("kick-16bit"), "kick_16bit");
        assert_eq!(sanitize_identifier("808 snare"), "_808_snare");
        assert_eq!(sanitize_identifier(""), "_");
    }

    #[test]
    fn test_render_dispatch() {
        let meta = EmissionMetadata::new("tone", 8000, 3);
        assert_eq!(render(&q(vec![0, 1, -1]), &meta, OutputFormat::Hex).unwrap(), "0x0000\n0x0001\n0xFFFF");
        assert_eq!(render(&q(vec![0, 1, -1]), &meta, OutputFormat::Csv).unwrap(), "0,1,-1");

        let bad = EmissionMetadata::new("not valid", 8000, 3);
        assert!(render(&q(vec![0]), &bad, OutputFormat::Decimal).is_err());
    }

    #[test]
    fn test_write_atomic_replaces_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.h");
        std::fs::write(&path, "old").unwrap();

        write_atomic(&path, "new contents").unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new contents");

        let leftovers = std::fs::read_dir(dir.path()).unwrap().count();
        assert_eq!(leftovers, 1, "temporary file should be renamed away");
    }

    #[test]
    fn test_write_atomic_missing_dir() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("out.h");
        assert!(matches!(
            write_atomic(&path, "x"),
            Err(ConversionError::EmitError(_))
        ));
        assert!(!path.exists());
    }
}
