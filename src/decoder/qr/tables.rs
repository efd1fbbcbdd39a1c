//! QR Code Model 2 capacity and layout tables.

use crate::models::EcLevel;

const TABLE_STRIDE: usize = 41; // [ecc][version], version 0 is padding

#[rustfmt::skip]
static ECC_CODEWORDS_PER_BLOCK: [i8; 164] = [
    // Low (L)
    -1, 7, 10, 15, 20, 26, 18, 20, 24, 30, 18, 20, 24, 26, 30, 22, 24, 28, 30, 28, 28, 28, 28, 30, 30, 26, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    // Medium (M)
    -1, 10, 16, 26, 18, 24, 16, 18, 22, 22, 26, 30, 22, 22, 24, 24, 28, 28, 26, 26, 26, 26, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28, 28,
    // Quartile (Q)
    -1, 13, 22, 18, 26, 18, 24, 18, 22, 20, 24, 28, 26, 24, 20, 30, 24, 28, 28, 26, 30, 28, 30, 30, 30, 30, 28, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
    // High (H)
    -1, 17, 28, 22, 16, 22, 28, 26, 26, 24, 28, 24, 28, 22, 24, 24, 30, 28, 28, 26, 28, 30, 24, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30, 30,
];

#[rustfmt::skip]
static NUM_ERROR_CORRECTION_BLOCKS: [i8; 164] = [
    // Low (L)
    -1, 1, 1, 1, 1, 1, 2, 2, 2, 2, 4, 4, 4, 4, 4, 6, 6, 6, 6, 7, 8, 8, 9, 9, 10, 12, 12, 12, 13, 14, 15, 16, 17, 18, 19, 19, 20, 21, 22, 24, 25,
    // Medium (M)
    -1, 1, 1, 1, 2, 2, 4, 4, 4, 5, 5, 5, 8, 9, 9, 10, 10, 11, 13, 14, 16, 17, 17, 18, 20, 21, 23, 25, 26, 28, 29, 31, 33, 35, 37, 38, 40, 43, 45, 47, 49,
    // Quartile (Q)
    -1, 1, 1, 2, 2, 4, 4, 6, 6, 8, 8, 8, 10, 12, 16, 12, 17, 16, 18, 21, 20, 23, 23, 25, 27, 29, 34, 34, 35, 38, 40, 43, 45, 48, 51, 53, 56, 59, 62, 65, 68,
    // High (H)
    -1, 1, 1, 2, 4, 4, 4, 5, 6, 8, 8, 11, 11, 16, 16, 18, 16, 19, 21, 25, 25, 25, 34, 30, 32, 35, 37, 40, 42, 45, 48, 51, 54, 57, 60, 63, 66, 70, 74, 77, 81,
];

/// Total modules available for codewords in a version, after removing every
/// function pattern.
pub fn num_raw_data_modules(version: u8) -> usize {
    debug_assert!((1..=40).contains(&version));
    let v = version as usize;
    let mut result = (16 * v + 128) * v + 64;
    if v >= 2 {
        let num_align = (v / 7) + 2;
        result -= (25 * num_align - 10) * num_align - 55;
        if v >= 7 {
            result -= 36;
        }
    }
    result
}

/// Error-correction block count for a version/level.
pub fn num_blocks(version: u8, ecc: EcLevel) -> usize {
    NUM_ERROR_CORRECTION_BLOCKS[ecc as usize * TABLE_STRIDE + version as usize] as usize
}

/// Parity codewords per block for a version/level.
pub fn ecc_codewords_per_block(version: u8, ecc: EcLevel) -> usize {
    ECC_CODEWORDS_PER_BLOCK[ecc as usize * TABLE_STRIDE + version as usize] as usize
}

/// Data codeword capacity for a version/level.
pub fn num_data_codewords(version: u8, ecc: EcLevel) -> usize {
    let raw_codewords = num_raw_data_modules(version) / 8;
    raw_codewords - num_blocks(version, ecc) * ecc_codewords_per_block(version, ecc)
}

/// Width of the numeric-mode character count field.
pub fn numeric_count_bits(version: u8) -> usize {
    match version {
        1..=9 => 10,
        10..=26 => 12,
        _ => 14,
    }
}

/// Width of the alphanumeric-mode character count field.
pub fn alphanumeric_count_bits(version: u8) -> usize {
    match version {
        1..=9 => 9,
        10..=26 => 11,
        _ => 13,
    }
}

/// Width of the byte-mode character count field.
pub fn byte_count_bits(version: u8) -> usize {
    if version < 10 { 8 } else { 16 }
}

/// Width of the Kanji-mode character count field.
pub fn kanji_count_bits(version: u8) -> usize {
    match version {
        1..=9 => 8,
        10..=26 => 10,
        _ => 12,
    }
}

/// Alignment pattern center coordinates for a version.
pub fn alignment_pattern_positions(version: u8) -> Vec<usize> {
    debug_assert!((1..=40).contains(&version));
    if version == 1 {
        return Vec::new();
    }
    let v = version as usize;
    let num_align = (v / 7) + 2;
    let size = v * 4 + 17;
    let step = if v == 32 {
        26
    } else {
        ((v * 4 + num_align * 2 + 1) / (2 * num_align - 2)) * 2
    };

    let mut result = vec![0usize; num_align];
    result[0] = 6;
    result[num_align - 1] = size - 7;
    for i in 1..num_align - 1 {
        result[i] = result[num_align - 1] - step * (num_align - 1 - i);
    }
    result
}
