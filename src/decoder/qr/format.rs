//! QR format and version information recovery.
//!
//! Format info is a 15-bit BCH(15,5) codeword XOR-masked with 0x5412,
//! stored twice. Rather than running a BCH corrector, both copies are
//! matched against all 32 valid patterns by Hamming distance, accepting up
//! to 3 flipped bits per copy.

use std::sync::OnceLock;

use crate::models::{BitMatrix, EcLevel};

/// A plausible (ec level, mask) reading of the format info, ordered
/// best-first.
#[derive(Debug, Clone, Copy)]
pub struct FormatCandidate {
    pub ec_level: EcLevel,
    pub mask: u8,
    /// Hamming distance of the closer copy
    pub distance: u32,
    max_distance: u32,
    sum_distance: u32,
    both_within: bool,
}

const FORMAT_XOR_MASK: u16 = 0x5412;
const MAX_FORMAT_DISTANCE: u32 = 3;

static FORMAT_ECC_ORDER: [EcLevel; 4] = [EcLevel::L, EcLevel::M, EcLevel::Q, EcLevel::H];

fn format_patterns() -> &'static [u16; 32] {
    static PATTERNS: OnceLock<[u16; 32]> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        let mut patterns = [0u16; 32];
        let mut idx = 0;
        for ecc in FORMAT_ECC_ORDER {
            for mask in 0..8u16 {
                let data = ((ecc.format_bits() as u16) << 3) | mask;
                let mut rem = data;
                for _ in 0..10 {
                    rem = (rem << 1) ^ (((rem >> 9) & 1) * 0x537);
                }
                patterns[idx] = ((data << 10) | rem) ^ FORMAT_XOR_MASK;
                idx += 1;
            }
        }
        patterns
    })
}

/// Read both format-info copies from a QR matrix.
pub fn read_format_bits(modules: &BitMatrix) -> (u16, u16) {
    let size = modules.width();

    let mut bits_a = 0u16;
    for i in 0..=5 {
        if modules.get(8, i) {
            bits_a |= 1 << i;
        }
    }
    if modules.get(8, 7) {
        bits_a |= 1 << 6;
    }
    if modules.get(8, 8) {
        bits_a |= 1 << 7;
    }
    if modules.get(7, 8) {
        bits_a |= 1 << 8;
    }
    for i in 9..15 {
        if modules.get(14 - i, 8) {
            bits_a |= 1 << i;
        }
    }

    let mut bits_b = 0u16;
    for i in 0..8 {
        if modules.get(size - 1 - i, 8) {
            bits_b |= 1 << i;
        }
    }
    for i in 8..15 {
        if modules.get(8, size - 15 + i) {
            bits_b |= 1 << i;
        }
    }

    (bits_a, bits_b)
}

/// Match both copies against the 32 valid patterns. Returns candidates
/// ordered best-first, or an empty vector when nothing is within tolerance.
pub fn resolve_format(bits_a: u16, bits_b: u16) -> Vec<FormatCandidate> {
    let mut candidates = Vec::new();
    for (i, &pattern) in format_patterns().iter().enumerate() {
        let dist_a = (bits_a ^ pattern).count_ones();
        let dist_b = (bits_b ^ pattern).count_ones();
        let min_dist = dist_a.min(dist_b);
        if min_dist <= MAX_FORMAT_DISTANCE {
            candidates.push(FormatCandidate {
                ec_level: FORMAT_ECC_ORDER[i / 8],
                mask: (i % 8) as u8,
                distance: min_dist,
                max_distance: dist_a.max(dist_b),
                sum_distance: dist_a + dist_b,
                both_within: dist_a.max(dist_b) <= MAX_FORMAT_DISTANCE,
            });
        }
    }

    candidates.sort_by(|a, b| {
        b.both_within
            .cmp(&a.both_within)
            .then(a.sum_distance.cmp(&b.sum_distance))
            .then(a.max_distance.cmp(&b.max_distance))
            .then(a.distance.cmp(&b.distance))
    });
    candidates
}

/// Resolve the version of a large symbol (v7+) from its two 18-bit version
/// blocks, each BCH(18,6)-protected. Falls back to single-bit correction.
pub fn resolve_version(modules: &BitMatrix) -> Option<u8> {
    let size = modules.width();
    if size < 45 {
        // v1-6 carry no version blocks; the size is authoritative.
        return Some(((size - 17) / 4) as u8);
    }

    let mut top_right = 0u32;
    let mut bottom_left = 0u32;
    for i in 0..18 {
        let a = size - 11 + (i % 3);
        let b = i / 3;
        if modules.get(a, b) {
            top_right |= 1 << i;
        }
        if modules.get(b, a) {
            bottom_left |= 1 << i;
        }
    }

    decode_version_bits(top_right)
        .or_else(|| decode_version_bits(bottom_left))
        .filter(|&v| (v as usize) * 4 + 17 == size)
}

fn decode_version_bits(bits: u32) -> Option<u8> {
    if check_version(bits) {
        return version_from(bits);
    }
    for i in 0..18 {
        let test = bits ^ (1 << i);
        if check_version(test) {
            return version_from(test);
        }
    }
    None
}

fn version_from(bits: u32) -> Option<u8> {
    let version = (bits >> 12) as u8;
    (7..=40).contains(&version).then_some(version)
}

fn check_version(codeword: u32) -> bool {
    // BCH(18,6) generator: x^12 + x^11 + x^10 + x^9 + x^8 + x^5 + x^2 + 1
    const GENERATOR: u32 = 0x1F25;
    let mut remainder = codeword;
    for i in (12..18).rev() {
        if remainder & (1 << i) != 0 {
            remainder ^= GENERATOR << (i - 12);
        }
    }
    remainder == 0
}

/// Encode the 18-bit version block for a version (used by grid builders in
/// tests and by the resolver's self-checks).
pub fn encode_version_bits(version: u8) -> u32 {
    let data = version as u32;
    let mut rem = data;
    for _ in 0..12 {
        rem = (rem << 1) ^ (((rem >> 11) & 1) * 0x1F25);
    }
    (data << 12) | (rem & 0xFFF)
}

/// The 15-bit masked format pattern for (ec level, mask); shared with grid
/// builders.
pub fn encode_format_bits(ec_level: EcLevel, mask: u8) -> u16 {
    let idx = FORMAT_ECC_ORDER
        .iter()
        .position(|&e| e == ec_level)
        .unwrap();
    format_patterns()[idx * 8 + mask as usize]
}
