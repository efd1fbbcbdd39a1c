//! QR Code Model 2 grid decoding.

pub mod codewords;
pub mod format;
pub mod function_mask;
pub mod masks;
pub mod segments;
pub mod shift_jis;
pub mod tables;

use log::trace;

use crate::models::{BitMatrix, EcLevel, Failure, StructuredAppend};
use function_mask::FunctionMask;
use segments::ParsedPayload;

/// A decoded QR symbol with correction statistics for scoring.
pub struct QrDecoded {
    /// Symbol version (1-40)
    pub version: u8,
    /// Error correction level from format info
    pub ec_level: EcLevel,
    /// Data mask id that was reversed
    pub mask: u8,
    /// Decoded text
    pub text: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
    /// Structured-append header when present
    pub structured_append: Option<StructuredAppend>,
    /// Codeword errors corrected by Reed-Solomon
    pub errors_corrected: usize,
    /// Total parity codewords (capacity is half)
    pub ec_capacity: usize,
    /// Hamming distance of the best-matching format pattern
    pub format_distance: u32,
}

/// Decode a QR symbol from an exact module grid (no quiet zone).
pub fn decode(modules: &BitMatrix) -> Result<QrDecoded, Failure> {
    if modules.width() == 0 || !modules.is_square() {
        return Err(Failure::InvalidInput);
    }
    let size = modules.width();
    if size < 21 || (size - 17) % 4 != 0 {
        return Err(Failure::InvalidSize);
    }
    let version = ((size - 17) / 4) as u8;
    if version > 40 {
        return Err(Failure::InvalidSize);
    }
    // Large symbols carry redundant version blocks; they must agree with
    // the measured size.
    if version >= 7 && format::resolve_version(modules) != Some(version) {
        return Err(Failure::FormatInfoCorrupt);
    }

    let (bits_a, bits_b) = format::read_format_bits(modules);
    let candidates = format::resolve_format(bits_a, bits_b);
    if candidates.is_empty() {
        return Err(Failure::FormatInfoCorrupt);
    }

    let func = FunctionMask::new(version);
    let mut saw_segment_failure = false;

    for candidate in &candidates {
        let unmasked = codewords::unmask(modules, &func, candidate.mask);
        let raw = codewords::extract_raw_codewords(&unmasked, &func, version);
        let Some(corrected) = codewords::correct_codewords(&raw, version, candidate.ec_level)
        else {
            trace!(
                "qr: rs failed for v{} {:?} mask {}",
                version, candidate.ec_level, candidate.mask
            );
            continue;
        };
        let Some(payload) = segments::parse(&corrected.data, version) else {
            saw_segment_failure = true;
            continue;
        };

        let ParsedPayload {
            bytes,
            text,
            structured_append,
            ..
        } = payload;
        return Ok(QrDecoded {
            version,
            ec_level: candidate.ec_level,
            mask: candidate.mask,
            text,
            bytes,
            structured_append,
            errors_corrected: corrected.errors_corrected,
            ec_capacity: corrected.ec_capacity,
            format_distance: candidate.distance,
        });
    }

    Err(if saw_segment_failure {
        Failure::SegmentDecodeError
    } else {
        Failure::ErrorCorrectionFailed
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejects_non_square() {
        let modules = BitMatrix::new(21, 25);
        assert!(matches!(decode(&modules), Err(Failure::InvalidInput)));
    }

    #[test]
    fn test_rejects_bad_size() {
        let modules = BitMatrix::new(22, 22);
        assert!(matches!(decode(&modules), Err(Failure::InvalidSize)));
    }

    #[test]
    fn test_blank_grid_has_no_format() {
        // All-white 21x21: format area reads zero on both copies, which is
        // not within distance 3 of any valid pattern... unless it is; the
        // decoder must fail either way since the data region is empty.
        let modules = BitMatrix::new(21, 21);
        assert!(decode(&modules).is_err());
    }
}
