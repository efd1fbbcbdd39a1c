//! PDF417 grid decoding.

pub mod bitstream;
pub mod tables;

use log::trace;

use crate::decoder::modulus;
use tables::CODEWORD_WIDTH;
use crate::models::{BitMatrix, Failure};

/// A decoded PDF417 symbol.
pub struct Pdf417Decoded {
    /// Symbol rows
    pub rows: usize,
    /// Data columns per row
    pub cols: usize,
    /// Error correction level (0-8) the stream validated at
    pub ec_level: u8,
    /// Decoded text
    pub text: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
    /// Codewords corrected
    pub errors_corrected: usize,
    /// Parity codeword count
    pub ec_capacity: usize,
}

/// Candidate data-column counts for a symbol width.
/// Normal symbols: start + left indicator + data + right indicator + stop
/// = 17c + 69; compact symbols drop the right indicator and shorten the
/// stop pattern: 17c + 35. A width can be consistent with both layouts, so
/// both are offered and the row reader disambiguates.
fn dimensions(width: usize) -> Vec<(usize, bool)> {
    let mut candidates = Vec::with_capacity(2);
    if width >= 86 && (width - 69) % 17 == 0 {
        candidates.push(((width - 69) / 17, false));
    }
    if width >= 52 && (width - 35) % 17 == 0 {
        candidates.push(((width - 35) / 17, true));
    }
    candidates
}

fn read_bits(modules: &BitMatrix, y: usize, offset: usize, len: usize) -> u32 {
    let mut bits = 0u32;
    for i in 0..len {
        bits <<= 1;
        if modules.get(offset + i, y) {
            bits |= 1;
        }
    }
    bits
}

/// Decode a PDF417 symbol from an exact module grid (rows top-down).
pub fn decode(modules: &BitMatrix) -> Result<Pdf417Decoded, Failure> {
    if modules.width() == 0 || modules.height() == 0 {
        return Err(Failure::InvalidInput);
    }
    let width = modules.width();
    let height = modules.height();
    if !(3..=90).contains(&height) {
        return Err(Failure::InvalidSize);
    }
    let candidates = dimensions(width);
    if candidates.is_empty() {
        return Err(Failure::InvalidSize);
    }

    let mut best_failure = Failure::SamplingFailed;
    for (cols, compact) in candidates {
        let outcome = match read_rows(modules, cols, compact) {
            Ok(received) => decode_codewords(received, height, cols),
            Err(failure) => Err(failure),
        };
        match outcome {
            Ok(decoded) => return Ok(decoded),
            Err(failure) => {
                if failure.progress_rank() > best_failure.progress_rank() {
                    best_failure = failure;
                }
            }
        }
    }
    Err(best_failure)
}

fn read_rows(modules: &BitMatrix, cols: usize, compact: bool) -> Result<Vec<i32>, Failure> {
    let width = modules.width();
    let height = modules.height();
    let mut received = Vec::with_capacity(cols * height);
    for y in 0..height {
        let cluster = y % 3;
        let mut offset = 0usize;

        let start = read_bits(modules, y, offset, CODEWORD_WIDTH);
        if (start ^ tables::START_PATTERN).count_ones() > 2 {
            return Err(Failure::SamplingFailed);
        }
        offset += CODEWORD_WIDTH;

        // Left row indicator: must be a valid codeword of the row cluster.
        if tables::codeword(cluster, read_bits(modules, y, offset, CODEWORD_WIDTH)).is_none() {
            return Err(Failure::SamplingFailed);
        }
        offset += CODEWORD_WIDTH;

        for _ in 0..cols {
            let Some(cw) = tables::codeword(cluster, read_bits(modules, y, offset, CODEWORD_WIDTH))
            else {
                return Err(Failure::SamplingFailed);
            };
            received.push(cw as i32);
            offset += CODEWORD_WIDTH;
        }

        if !compact {
            if tables::codeword(cluster, read_bits(modules, y, offset, CODEWORD_WIDTH)).is_none() {
                return Err(Failure::SamplingFailed);
            }
            offset += CODEWORD_WIDTH;
            let stop = read_bits(modules, y, offset, 18);
            if (stop ^ tables::STOP_PATTERN).count_ones() > 2 {
                return Err(Failure::SamplingFailed);
            }
            offset += 18;
        } else {
            // Compact stop: a single bar module
            if !modules.get(offset, y) {
                return Err(Failure::SamplingFailed);
            }
            offset += 1;
        }

        if offset != width {
            return Err(Failure::SamplingFailed);
        }
    }

    Ok(received)
}

fn decode_codewords(
    mut received: Vec<i32>,
    rows: usize,
    cols: usize,
) -> Result<Pdf417Decoded, Failure> {
    let total = received.len();
    if total == 0 {
        return Err(Failure::InvalidSize);
    }

    // The EC level is not carried in the data region; search the eight
    // levels and accept the one whose corrected stream is self-consistent.
    let mut ec_count = 0usize;
    let mut ec_level = 0u8;
    let mut errors_corrected = 0usize;
    let mut corrected = false;
    for level in 0..=8u8 {
        let k = 1usize << (level + 1);
        if total <= k {
            continue;
        }
        let expected_length = (total - k) as i32;
        let mut candidate = received.clone();
        let Some(fixed) = modulus::correct_in_place(&mut candidate, k) else {
            continue;
        };
        if candidate[0] != expected_length {
            continue;
        }
        received = candidate;
        ec_count = k;
        ec_level = level;
        errors_corrected = fixed;
        corrected = true;
        break;
    }

    let mut length_descriptor = received[0];
    if length_descriptor <= 0 || length_descriptor as usize > total {
        return Err(Failure::ErrorCorrectionFailed);
    }
    if !corrected {
        // Trust the length descriptor when it implies a plausible parity
        // count.
        let implied = total - length_descriptor as usize;
        if implied.is_power_of_two() && (2..=512).contains(&implied) {
            let mut candidate = received.clone();
            if let Some(fixed) = modulus::correct_in_place(&mut candidate, implied) {
                received = candidate;
                length_descriptor = received[0];
                ec_count = implied;
                ec_level = (implied.trailing_zeros() - 1) as u8;
                errors_corrected = fixed;
                corrected = true;
            }
        }
    }
    if !corrected {
        trace!("pdf417: no ec level produced a consistent stream");
        return Err(Failure::ErrorCorrectionFailed);
    }
    if length_descriptor as usize > total - ec_count {
        return Err(Failure::ErrorCorrectionFailed);
    }

    let data = &received[1..length_descriptor as usize];
    let data_u16: Vec<u16> = data.iter().map(|&c| c as u16).collect();
    let text = bitstream::decode(&data_u16).ok_or(Failure::SegmentDecodeError)?;

    let bytes = text
        .chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect();
    Ok(Pdf417Decoded {
        rows,
        cols,
        ec_level,
        text,
        bytes,
        errors_corrected,
        ec_capacity: ec_count,
    })
}
