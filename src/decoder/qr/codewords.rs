//! Unmasking, zigzag codeword extraction and per-block error correction.

use super::function_mask::FunctionMask;
use super::masks;
use super::tables;
use crate::decoder::galois::qr_field;
use crate::decoder::reed_solomon::ReedSolomon;
use crate::models::{BitMatrix, EcLevel};

/// Reverse a data mask over the non-function modules.
pub fn unmask(modules: &BitMatrix, func: &FunctionMask, mask: u8) -> BitMatrix {
    let size = modules.width();
    let mut unmasked = modules.clone();
    for y in 0..size {
        for x in 0..size {
            if func.is_function(x, y) {
                continue;
            }
            if masks::should_invert(mask, x, y) {
                unmasked.toggle(x, y);
            }
        }
    }
    unmasked
}

/// Walk the zigzag placement order and collect raw codewords.
///
/// Columns are consumed in pairs from the right edge, alternating upward
/// and downward, skipping the vertical timing column.
pub fn extract_raw_codewords(unmasked: &BitMatrix, func: &FunctionMask, version: u8) -> Vec<u16> {
    let size = unmasked.width();
    let raw_len = tables::num_raw_data_modules(version) / 8;
    let mut codewords = vec![0u16; raw_len];

    let mut bit_index = 0usize;
    let mut upward = true;
    let mut right = size as i32 - 1;
    while right >= 1 {
        if right == 6 {
            right = 5;
        }
        for vert in 0..size {
            let y = if upward { size - 1 - vert } else { vert };
            for j in 0..2 {
                let x = (right - j) as usize;
                if func.is_function(x, y) {
                    continue;
                }
                if bit_index < raw_len * 8 && unmasked.get(x, y) {
                    codewords[bit_index >> 3] |= 1 << (7 - (bit_index & 7));
                }
                bit_index += 1;
            }
        }
        upward = !upward;
        right -= 2;
    }

    codewords
}

/// Outcome of block-level error correction.
pub struct CorrectedData {
    /// Concatenated data codewords of every block
    pub data: Vec<u8>,
    /// Total codeword errors corrected across blocks
    pub errors_corrected: usize,
    /// Total parity codewords (correction capacity is half this)
    pub ec_capacity: usize,
}

/// Deinterleave the raw codeword stream into blocks, correct each with
/// Reed-Solomon, and concatenate the data parts.
pub fn correct_codewords(
    raw: &[u16],
    version: u8,
    ec_level: EcLevel,
) -> Option<CorrectedData> {
    let num_blocks = tables::num_blocks(version, ec_level);
    let block_ecc_len = tables::ecc_codewords_per_block(version, ec_level);
    let raw_codewords = tables::num_raw_data_modules(version) / 8;
    let data_len = tables::num_data_codewords(version, ec_level);
    if raw.len() != raw_codewords {
        return None;
    }

    let num_short_blocks = num_blocks - (raw_codewords % num_blocks);
    let short_block_len = raw_codewords / num_blocks;
    let short_data_len = short_block_len - block_ecc_len;

    let mut blocks: Vec<Vec<u16>> = Vec::with_capacity(num_blocks);
    let mut data_lens = Vec::with_capacity(num_blocks);
    for i in 0..num_blocks {
        let data_words = if i < num_short_blocks {
            short_data_len
        } else {
            short_data_len + 1
        };
        data_lens.push(data_words);
        blocks.push(vec![0u16; data_words + block_ecc_len]);
    }

    // Deinterleave: data codewords round-robin across blocks, then parity.
    let mut k = 0usize;
    let max_data_len = data_lens[num_blocks - 1];
    for i in 0..max_data_len {
        for (j, block) in blocks.iter_mut().enumerate() {
            if i < data_lens[j] {
                block[i] = raw[k];
                k += 1;
            }
        }
    }
    for i in 0..block_ecc_len {
        for (j, block) in blocks.iter_mut().enumerate() {
            block[data_lens[j] + i] = raw[k];
            k += 1;
        }
    }
    if k != raw.len() {
        return None;
    }

    let rs = ReedSolomon::new(qr_field());
    let mut data = Vec::with_capacity(data_len);
    let mut errors_corrected = 0usize;
    for (block, &part_len) in blocks.iter_mut().zip(&data_lens) {
        errors_corrected += rs.correct_in_place(block, block_ecc_len)?;
        data.extend(block[..part_len].iter().map(|&w| w as u8));
    }
    if data.len() != data_len {
        return None;
    }

    Some(CorrectedData {
        data,
        errors_corrected,
        ec_capacity: num_blocks * block_ecc_len,
    })
}

/// Interleave per-block codewords back into transmission order. Shared
/// with the grid builders used by tests.
pub fn interleave_codewords(data: &[u8], version: u8, ec_level: EcLevel) -> Vec<u16> {
    let num_blocks = tables::num_blocks(version, ec_level);
    let block_ecc_len = tables::ecc_codewords_per_block(version, ec_level);
    let raw_codewords = tables::num_raw_data_modules(version) / 8;
    let num_short_blocks = num_blocks - (raw_codewords % num_blocks);
    let short_data_len = raw_codewords / num_blocks - block_ecc_len;

    let rs = ReedSolomon::new(qr_field());
    let mut blocks: Vec<Vec<u16>> = Vec::with_capacity(num_blocks);
    let mut offset = 0usize;
    for i in 0..num_blocks {
        let data_words = if i < num_short_blocks {
            short_data_len
        } else {
            short_data_len + 1
        };
        let part: Vec<u16> = data[offset..offset + data_words]
            .iter()
            .map(|&b| b as u16)
            .collect();
        offset += data_words;
        blocks.push(rs.encode(&part, block_ecc_len));
    }

    let mut result = Vec::with_capacity(raw_codewords);
    let max_data_len = short_data_len + 1;
    for i in 0..max_data_len {
        for block in &blocks {
            let data_words = block.len() - block_ecc_len;
            if i < data_words {
                result.push(block[i]);
            }
        }
    }
    for i in 0..block_ecc_len {
        for block in &blocks {
            let data_words = block.len() - block_ecc_len;
            result.push(block[data_words + i]);
        }
    }
    result
}
