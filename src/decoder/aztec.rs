//! Aztec grid decoding (compact and full-range).
//!
//! The symbol size fixes the layer count; the mode message around the
//! bullseye is corrected over GF(16) and yields the data word count; data
//! bits spiral around the bullseye in 2-module-thick layers, with a
//! reference grid interleaved in full-range symbols.

use log::trace;

use super::galois::{
    GaloisField, aztec_data6_field, aztec_data10_field, aztec_data12_field, aztec_param_field,
    data_matrix_field,
};
use super::reed_solomon::ReedSolomon;
use crate::models::{BitMatrix, Failure};

/// A decoded Aztec symbol.
pub struct AztecDecoded {
    /// Data layer count
    pub layers: u8,
    /// Whether the symbol is the compact form
    pub compact: bool,
    /// Decoded text
    pub text: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
    /// Codeword errors corrected
    pub errors_corrected: usize,
    /// Parity codeword count
    pub ec_capacity: usize,
}

const MAX_COMPACT_LAYERS: usize = 4;
const MAX_LAYERS: usize = 32;

/// Matrix side for a layer count.
pub fn matrix_size(layers: usize, compact: bool) -> usize {
    if compact {
        11 + layers * 4
    } else {
        let base = 14 + layers * 4;
        base + 1 + 2 * ((base / 2 - 1) / 15)
    }
}

/// Data word size in bits for a layer count.
pub fn word_size(layers: usize) -> usize {
    match layers {
        1..=2 => 6,
        3..=8 => 8,
        9..=22 => 10,
        _ => 12,
    }
}

fn field_for_word_size(bits: usize) -> &'static GaloisField {
    match bits {
        6 => aztec_data6_field(),
        8 => data_matrix_field(),
        10 => aztec_data10_field(),
        _ => aztec_data12_field(),
    }
}

/// Total data bits held by `layers` layers.
pub fn total_bits(layers: usize, compact: bool) -> usize {
    ((if compact { 88 } else { 112 }) + 16 * layers) * layers
}

fn layers_for_size(size: usize) -> Option<(usize, bool)> {
    for layers in 1..=MAX_COMPACT_LAYERS {
        if matrix_size(layers, true) == size {
            return Some((layers, true));
        }
    }
    for layers in 1..=MAX_LAYERS {
        if matrix_size(layers, false) == size {
            return Some((layers, false));
        }
    }
    None
}

/// Decode an Aztec symbol from an exact module grid, trying the four
/// rotations.
pub fn decode(modules: &BitMatrix) -> Result<AztecDecoded, Failure> {
    if modules.width() == 0 {
        return Err(Failure::InvalidInput);
    }
    if !modules.is_square() || layers_for_size(modules.width()).is_none() {
        return Err(Failure::InvalidSize);
    }

    let mut best_failure = Failure::LocatorNotFound;
    let mut current = modules.clone();
    for rotation in 0..4 {
        if rotation > 0 {
            current = current.rotate90();
        }
        match decode_oriented(&current) {
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

fn decode_oriented(modules: &BitMatrix) -> Result<AztecDecoded, Failure> {
    let size = modules.width();
    let (layers, compact) = layers_for_size(size).ok_or(Failure::InvalidSize)?;

    if !check_bullseye(modules, compact) {
        return Err(Failure::LocatorNotFound);
    }

    let (mode_layers, data_words) =
        read_mode_message(modules, compact).ok_or(Failure::FormatInfoCorrupt)?;
    if mode_layers != layers {
        return Err(Failure::FormatInfoCorrupt);
    }

    let raw_bits = extract_bits(modules, compact, layers);
    let (corrected_bits, errors_corrected, ec_capacity) =
        correct_bits(&raw_bits, layers, data_words).ok_or(Failure::ErrorCorrectionFailed)?;

    let (bytes, text) = decode_chars(&corrected_bits).ok_or(Failure::SegmentDecodeError)?;
    Ok(AztecDecoded {
        layers: layers as u8,
        compact,
        text,
        bytes,
        errors_corrected,
        ec_capacity,
    })
}

/// The concentric bullseye: alternating square rings around a dark center.
fn check_bullseye(modules: &BitMatrix, compact: bool) -> bool {
    let center = modules.width() / 2;
    let rings = if compact { 5 } else { 7 };
    let mut mismatches = 0usize;
    let mut total = 0usize;

    for ring in 0..rings {
        let expected = ring % 2 == 0; // dark center, dark odd-radius rings
        let r = ring as i32;
        for d in -r..=r {
            for &(dx, dy) in &[(d, -r), (d, r), (-r, d), (r, d)] {
                let x = center as i32 + dx;
                let y = center as i32 + dy;
                total += 1;
                if modules.get(x as usize, y as usize) != expected {
                    mismatches += 1;
                }
            }
        }
    }

    mismatches * 10 <= total
}

/// Read and correct the mode message; returns (layers, data words).
fn read_mode_message(modules: &BitMatrix, compact: bool) -> Option<(usize, usize)> {
    let center = modules.width() / 2;

    let bits = if compact {
        let mut mode = vec![false; 28];
        for i in 0..7 {
            let offset = center - 3 + i;
            mode[i] = modules.get(offset, center - 5);
            mode[i + 7] = modules.get(center + 5, offset);
            mode[20 - i] = modules.get(offset, center + 5);
            mode[27 - i] = modules.get(center - 5, offset);
        }
        mode
    } else {
        let mut mode = vec![false; 40];
        for i in 0..10 {
            let offset = center - 5 + i + i / 5;
            mode[i] = modules.get(offset, center - 7);
            mode[i + 10] = modules.get(center + 7, offset);
            mode[29 - i] = modules.get(offset, center + 7);
            mode[39 - i] = modules.get(center - 7, offset);
        }
        mode
    };

    let nb_words = if compact { 7 } else { 10 };
    let nb_data_words = if compact { 2 } else { 4 };
    let mut words = vec![0u16; nb_words];
    for (i, chunk) in bits.chunks(4).enumerate().take(nb_words) {
        let mut w = 0u16;
        for &bit in chunk {
            w = (w << 1) | bit as u16;
        }
        words[i] = w;
    }

    let rs = ReedSolomon::new(aztec_param_field());
    rs.correct_in_place(&mut words, nb_words - nb_data_words)?;

    if compact {
        let layers = (words[0] >> 2) as usize + 1;
        let data_words = (((words[0] & 0x3) << 4) + words[1]) as usize + 1;
        Some((layers, data_words))
    } else {
        let layers = ((words[0] << 1) + (words[1] >> 3)) as usize + 1;
        let data_words =
            (((words[1] & 0x7) as usize) << 8) + ((words[2] as usize) << 4) + words[3] as usize + 1;
        Some((layers, data_words))
    }
}

/// Collect the raw data bits, layer by layer from the outside in. Full
/// symbols route around the reference grid via an alignment map.
fn extract_bits(modules: &BitMatrix, compact: bool, layers: usize) -> Vec<bool> {
    let base_matrix_size = (if compact { 11 } else { 14 }) + layers * 4;
    let mut alignment_map = vec![0usize; base_matrix_size];
    let mut raw_bits = vec![false; total_bits(layers, compact)];

    if compact {
        for (i, slot) in alignment_map.iter_mut().enumerate() {
            *slot = i;
        }
    } else {
        let matrix_size = base_matrix_size + 1 + 2 * ((base_matrix_size / 2 - 1) / 15);
        let orig_center = base_matrix_size / 2;
        let center = matrix_size / 2;
        for i in 0..orig_center {
            let new_offset = i + i / 15;
            alignment_map[orig_center - i - 1] = center - new_offset - 1;
            alignment_map[orig_center + i] = center + new_offset + 1;
        }
    }

    let mut raw_bits_offset = 0usize;
    for layer in 0..layers {
        let row_size = (layers - layer) * 4 + (if compact { 9 } else { 12 });
        let low = layer * 2;
        let high = base_matrix_size - 1 - low;

        for i in 0..row_size {
            let column_offset = i * 2;
            for j in 0..2 {
                raw_bits[raw_bits_offset + column_offset + j] =
                    modules.get(alignment_map[low + j], alignment_map[low + i]);
                raw_bits[raw_bits_offset + 2 * row_size + column_offset + j] =
                    modules.get(alignment_map[low + i], alignment_map[high - j]);
                raw_bits[raw_bits_offset + 4 * row_size + column_offset + j] =
                    modules.get(alignment_map[high - j], alignment_map[high - i]);
                raw_bits[raw_bits_offset + 6 * row_size + column_offset + j] =
                    modules.get(alignment_map[high - i], alignment_map[low + j]);
            }
        }
        raw_bits_offset += row_size * 8;
    }

    raw_bits
}

/// Correct the codewords and unstuff the data bits.
fn correct_bits(
    raw_bits: &[bool],
    layers: usize,
    data_words: usize,
) -> Option<(Vec<bool>, usize, usize)> {
    let codeword_size = word_size(layers);
    let num_codewords = raw_bits.len() / codeword_size;
    if num_codewords < data_words {
        return None;
    }
    let num_ec_words = num_codewords - data_words;

    let mut words = Vec::with_capacity(num_codewords);
    let mut offset = raw_bits.len() % codeword_size;
    for _ in 0..num_codewords {
        let mut w = 0u16;
        for i in 0..codeword_size {
            w = (w << 1) | raw_bits[offset + i] as u16;
        }
        words.push(w);
        offset += codeword_size;
    }

    let rs = ReedSolomon::new(field_for_word_size(codeword_size));
    let errors_corrected = rs.correct_in_place(&mut words, num_ec_words)?;

    // Bit unstuffing: all-zero and all-one words are invalid; words of the
    // form 0..01 / 1..10 contribute codeword_size-1 fill bits.
    let mask = (1u16 << codeword_size) - 1;
    let mut corrected = Vec::with_capacity(data_words * codeword_size);
    for &word in words.iter().take(data_words) {
        if word == 0 || word == mask {
            trace!("aztec: invalid stuffed word");
            return None;
        }
        if word == 1 || word == mask - 1 {
            let fill = word > 1;
            corrected.extend(std::iter::repeat_n(fill, codeword_size - 1));
        } else {
            for i in (0..codeword_size).rev() {
                corrected.push((word >> i) & 1 == 1);
            }
        }
    }

    Some((corrected, errors_corrected, num_ec_words))
}

// ---- character tables --------------------------------------------------

#[derive(Clone, Copy, PartialEq)]
enum Table {
    Upper,
    Lower,
    Mixed,
    Digit,
    Punct,
    Binary,
}

enum Entry {
    Char(char),
    Str(&'static str),
    Latch(Table),
    Shift(Table),
    Flg,
}

fn lookup(table: Table, code: usize) -> Entry {
    use Entry::*;
    match table {
        Table::Upper => match code {
            0 => Shift(Table::Punct),
            1 => Char(' '),
            2..=27 => Char((b'A' + code as u8 - 2) as char),
            28 => Latch(Table::Lower),
            29 => Latch(Table::Mixed),
            30 => Latch(Table::Digit),
            _ => Shift(Table::Binary),
        },
        Table::Lower => match code {
            0 => Shift(Table::Punct),
            1 => Char(' '),
            2..=27 => Char((b'a' + code as u8 - 2) as char),
            28 => Shift(Table::Upper),
            29 => Latch(Table::Mixed),
            30 => Latch(Table::Digit),
            _ => Shift(Table::Binary),
        },
        Table::Mixed => match code {
            0 => Shift(Table::Punct),
            1 => Char(' '),
            2..=14 => Char(char::from_u32(code as u32 - 1).unwrap()),
            15..=19 => Char(char::from_u32(code as u32 + 12).unwrap()),
            20 => Char('@'),
            21 => Char('\\'),
            22 => Char('^'),
            23 => Char('_'),
            24 => Char('`'),
            25 => Char('|'),
            26 => Char('~'),
            27 => Char('\u{7F}'),
            28 => Latch(Table::Lower),
            29 => Latch(Table::Upper),
            30 => Latch(Table::Punct),
            _ => Shift(Table::Binary),
        },
        Table::Digit => match code {
            0 => Shift(Table::Punct),
            1 => Char(' '),
            2..=11 => Char((b'0' + code as u8 - 2) as char),
            12 => Char(','),
            13 => Char('.'),
            14 => Latch(Table::Upper),
            _ => Shift(Table::Upper),
        },
        Table::Punct => match code {
            0 => Flg,
            1 => Char('\r'),
            2 => Str("\r\n"),
            3 => Str(". "),
            4 => Str(", "),
            5 => Str(": "),
            6 => Char('!'),
            7 => Char('"'),
            8 => Char('#'),
            9 => Char('$'),
            10 => Char('%'),
            11 => Char('&'),
            12 => Char('\''),
            13 => Char('('),
            14 => Char(')'),
            15 => Char('*'),
            16 => Char('+'),
            17 => Char(','),
            18 => Char('-'),
            19 => Char('.'),
            20 => Char('/'),
            21 => Char(':'),
            22 => Char(';'),
            23 => Char('<'),
            24 => Char('='),
            25 => Char('>'),
            26 => Char('?'),
            27 => Char('['),
            28 => Char(']'),
            29 => Char('{'),
            30 => Char('}'),
            _ => Latch(Table::Upper),
        },
        Table::Binary => Entry::Char('?'), // handled separately
    }
}

fn read_code(bits: &[bool], index: usize, length: usize) -> usize {
    let mut result = 0usize;
    for i in index..index + length {
        result = (result << 1) | bits[i] as usize;
    }
    result
}

/// Decode corrected data bits to text via the five-table state machine.
fn decode_chars(bits: &[bool]) -> Option<(Vec<u8>, String)> {
    let end = bits.len();
    let mut latch = Table::Upper;
    let mut shift = Table::Upper;
    let mut text = String::with_capacity(end / 5);
    let mut index = 0usize;

    while index < end {
        if shift == Table::Binary {
            if end - index < 5 {
                break;
            }
            let mut length = read_code(bits, index, 5);
            index += 5;
            if length == 0 {
                if end - index < 11 {
                    break;
                }
                length = read_code(bits, index, 11) + 31;
                index += 11;
            }
            for _ in 0..length {
                if end - index < 8 {
                    index = end;
                    break;
                }
                text.push(read_code(bits, index, 8) as u8 as char);
                index += 8;
            }
            shift = latch;
            continue;
        }

        let size = if shift == Table::Digit { 4 } else { 5 };
        if end - index < size {
            break;
        }
        let code = read_code(bits, index, size);
        index += size;

        match lookup(shift, code) {
            Entry::Char(c) => {
                text.push(c);
                shift = latch;
            }
            Entry::Str(s) => {
                text.push_str(s);
                shift = latch;
            }
            Entry::Latch(t) => {
                latch = t;
                shift = t;
            }
            Entry::Shift(t) => {
                shift = t;
            }
            Entry::Flg => {
                if end - index < 3 {
                    return None;
                }
                let n = read_code(bits, index, 3);
                index += 3;
                match n {
                    0 => text.push('\u{1D}'), // FNC1 -> GS
                    7 => return None,         // reserved
                    _ => {
                        // ECI digits; charset stays Latin-1, best effort
                        if end - index < 4 * n {
                            break;
                        }
                        let mut eci = 0usize;
                        for _ in 0..n {
                            let digit = read_code(bits, index, 4);
                            index += 4;
                            if !(2..=11).contains(&digit) {
                                return None;
                            }
                            eci = eci * 10 + (digit - 2);
                        }
                        trace!("aztec: eci {eci} ignored");
                    }
                }
                shift = latch;
            }
        }
    }

    let bytes = text
        .chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect();
    Some((bytes, text))
}
