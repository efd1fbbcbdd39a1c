//! Micro QR (M1-M4) grid decoding.
//!
//! Micro QR shares the QR Reed-Solomon field but has its own format table,
//! a single finder pattern, version-dependent mode widths and four data
//! masks.

use super::galois::qr_field;
use super::qr::segments::{ALPHANUMERIC_TABLE, TextEncoding, decode_text};
use super::reed_solomon::ReedSolomon;
use crate::models::{BitMatrix, EcLevel, Failure};

/// A decoded Micro QR symbol.
pub struct MicroQrDecoded {
    /// Micro QR version (1-4)
    pub version: u8,
    /// Error correction level from format info
    pub ec_level: EcLevel,
    /// Data mask id (0-3) that was reversed
    pub mask: u8,
    /// Decoded text
    pub text: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
    /// Codeword errors corrected
    pub errors_corrected: usize,
    /// Parity codeword count
    pub ec_capacity: usize,
    /// Hamming distance of the accepted format pattern
    pub format_distance: u32,
}

/// Symbol width for a Micro QR version (M1=11 .. M4=17).
pub fn width(version: u8) -> usize {
    9 + 2 * version as usize
}

/// Parity codeword count per version and level; 0 = unsupported combination.
pub fn ecc_len(version: u8, ec_level: EcLevel) -> usize {
    const TABLE: [[usize; 4]; 5] = [
        [0, 0, 0, 0],
        [2, 0, 0, 0],
        [5, 6, 0, 0],
        [6, 8, 0, 0],
        [8, 10, 14, 0],
    ];
    if !(1..=4).contains(&version) {
        return 0;
    }
    TABLE[version as usize][ec_level as usize]
}

/// Data bits available for a version/level.
pub fn data_bits(version: u8, ec_level: EcLevel) -> usize {
    let ecc = ecc_len(version, ec_level);
    if ecc == 0 {
        return 0;
    }
    let w = width(version) - 1;
    w * w - 64 - ecc * 8
}

fn data_len_bytes(version: u8, ec_level: EcLevel) -> usize {
    (data_bits(version, ec_level) + 4) / 8
}

/// Mode/length field widths; M1 carries numeric only with no indicator.
fn mode_indicator_bits(version: u8) -> usize {
    version as usize - 1
}

fn terminator_bits(version: u8) -> usize {
    version as usize * 2 + 1
}

fn length_bits(mode: usize, version: u8) -> usize {
    const TABLE: [[usize; 4]; 4] = [
        [3, 4, 5, 6], // Numeric
        [0, 3, 4, 5], // Alphanumeric
        [0, 0, 4, 5], // Byte
        [0, 0, 3, 4], // Kanji
    ];
    TABLE[mode][version as usize - 1]
}

/// 15-bit format patterns indexed [mask][symbol type].
#[rustfmt::skip]
static FORMAT_INFO: [[u16; 8]; 4] = [
    [0x4445, 0x55AE, 0x6793, 0x7678, 0x06DE, 0x1735, 0x2508, 0x34E3],
    [0x4172, 0x5099, 0x62A4, 0x734F, 0x03E9, 0x1202, 0x203F, 0x31D4],
    [0x4E2B, 0x5FC0, 0x6DFD, 0x7C16, 0x0CB0, 0x1D5B, 0x2F66, 0x3E8D],
    [0x4B1C, 0x5AF7, 0x68CA, 0x7921, 0x0987, 0x186C, 0x2A51, 0x3BBA],
];

/// Symbol-type index for (version, level); -1 = unsupported.
static TYPE_TABLE: [[i8; 3]; 5] = [
    [-1, -1, -1],
    [0, -1, -1],
    [1, 2, -1],
    [3, 4, -1],
    [5, 6, 7],
];

/// Format pattern for (mask, version, level); `None` when unsupported.
pub fn format_info(mask: u8, version: u8, ec_level: EcLevel) -> Option<u16> {
    if mask > 3 || !(1..=4).contains(&version) || ec_level == EcLevel::H {
        return None;
    }
    let t = TYPE_TABLE[version as usize][ec_level as usize];
    if t < 0 {
        return None;
    }
    Some(FORMAT_INFO[mask as usize][t as usize])
}

/// Micro QR data mask predicates (masks 0-3).
pub fn should_invert(mask: u8, x: usize, y: usize) -> bool {
    match mask {
        0 => y % 2 == 0,
        1 => (y / 2 + x / 3) % 2 == 0,
        2 => ((x * y) % 2 + (x * y) % 3) % 2 == 0,
        3 => ((x + y) % 2 + (x * y) % 3) % 2 == 0,
        _ => unreachable!("micro mask id out of range"),
    }
}

/// Function-module map: finder + separator + format area + timing tracks.
pub fn function_map(version: u8) -> BitMatrix {
    let size = width(version);
    let mut func = BitMatrix::new(size, size);
    // Finder + separator occupy the full 9x9 corner (format area included)
    for y in 0..9 {
        for x in 0..9 {
            func.set(x, y, true);
        }
    }
    // Timing tracks along row 0 and column 0
    for i in 8..size {
        func.set(i, 0, true);
        func.set(0, i, true);
    }
    func
}

/// Zigzag frame walker over the data region, starting bottom-right, two
/// modules wide, with no timing column to straddle.
struct FrameFiller<'m> {
    width: usize,
    func: &'m BitMatrix,
    x: i32,
    y: i32,
    dir: i32,
    bit: i32,
}

impl<'m> FrameFiller<'m> {
    fn new(width: usize, func: &'m BitMatrix) -> Self {
        Self {
            width,
            func,
            x: width as i32 - 1,
            y: width as i32 - 1,
            dir: -1,
            bit: -1,
        }
    }

    fn next(&mut self) -> Option<(usize, usize)> {
        if self.bit == -1 {
            self.bit = 0;
            return Some((self.x as usize, self.y as usize));
        }

        let mut x = self.x;
        let mut y = self.y;

        if self.bit == 0 {
            x -= 1;
            self.bit += 1;
        } else {
            x += 1;
            y += self.dir;
            self.bit -= 1;
        }

        if self.dir < 0 {
            if y < 0 {
                y = 0;
                x -= 2;
                self.dir = 1;
            }
        } else if y == self.width as i32 {
            y = self.width as i32 - 1;
            x -= 2;
            self.dir = -1;
        }

        if x < 0 || y < 0 {
            return None;
        }

        self.x = x;
        self.y = y;

        if self.func.get(x as usize, y as usize) {
            return self.next();
        }
        Some((x as usize, y as usize))
    }
}

fn read_format_bits(modules: &BitMatrix) -> u16 {
    let mut v = 0u16;
    for i in 0..8 {
        if modules.get(8, i + 1) {
            v |= 1 << i;
        }
    }
    for i in 0..7 {
        if modules.get(7 - i, 8) {
            v |= 1 << (8 + i);
        }
    }
    v
}

fn resolve_format(modules: &BitMatrix, version: u8) -> Option<(EcLevel, u8, u32)> {
    let raw = read_format_bits(modules);
    let mut best: Option<(EcLevel, u8, u32)> = None;

    for level in [EcLevel::L, EcLevel::M, EcLevel::Q] {
        for mask in 0..4u8 {
            let Some(expected) = format_info(mask, version, level) else {
                continue;
            };
            let dist = (raw ^ expected).count_ones();
            if best.map(|(_, _, d)| dist < d).unwrap_or(true) {
                best = Some((level, mask, dist));
            }
        }
    }

    best.filter(|&(_, _, dist)| dist <= 3)
}

/// Decode a Micro QR symbol from an exact module grid.
pub fn decode(modules: &BitMatrix) -> Result<MicroQrDecoded, Failure> {
    if modules.width() == 0 || !modules.is_square() {
        return Err(Failure::InvalidInput);
    }
    let size = modules.width();
    if !(11..=17).contains(&size) || (size - 9) % 2 != 0 {
        return Err(Failure::InvalidSize);
    }
    let version = ((size - 9) / 2) as u8;

    let Some((ec_level, mask, format_distance)) = resolve_format(modules, version) else {
        return Err(Failure::FormatInfoCorrupt);
    };

    let bits = data_bits(version, ec_level);
    let data_len = data_len_bytes(version, ec_level);
    let ecc = ecc_len(version, ec_level);
    if bits == 0 || data_len == 0 || ecc == 0 {
        return Err(Failure::FormatInfoCorrupt);
    }

    let func = function_map(version);
    let mut unmasked = modules.clone();
    for y in 0..size {
        for x in 0..size {
            if !func.get(x, y) && should_invert(mask, x, y) {
                unmasked.toggle(x, y);
            }
        }
    }

    let mut filler = FrameFiller::new(size, &func);
    let mut codewords = vec![0u16; data_len + ecc];
    for i in 0..bits {
        let (x, y) = filler.next().ok_or(Failure::SamplingFailed)?;
        if unmasked.get(x, y) {
            codewords[i >> 3] |= 1 << (7 - (i & 7));
        }
    }
    for i in 0..ecc * 8 {
        let (x, y) = filler.next().ok_or(Failure::SamplingFailed)?;
        if unmasked.get(x, y) {
            codewords[data_len + (i >> 3)] |= 1 << (7 - (i & 7));
        }
    }

    let rs = ReedSolomon::new(qr_field());
    let errors_corrected = rs
        .correct_in_place(&mut codewords, ecc)
        .ok_or(Failure::ErrorCorrectionFailed)?;

    let data: Vec<u8> = codewords[..data_len].iter().map(|&w| w as u8).collect();
    let (bytes, text) =
        parse_payload(&data, bits, version).ok_or(Failure::SegmentDecodeError)?;

    Ok(MicroQrDecoded {
        version,
        ec_level,
        mask,
        text,
        bytes,
        errors_corrected,
        ec_capacity: ecc,
        format_distance,
    })
}

fn parse_payload(data: &[u8], data_bits: usize, version: u8) -> Option<(Vec<u8>, String)> {
    let mut pos = 0usize;
    let limit = data_bits.min(data.len() * 8);

    let mut read = |n: usize, pos: &mut usize| -> Option<u32> {
        if n == 0 {
            return Some(0);
        }
        if *pos + n > limit {
            return None;
        }
        let mut v = 0u32;
        for i in 0..n {
            let b = (data[(*pos + i) >> 3] >> (7 - ((*pos + i) & 7))) & 1;
            v = (v << 1) | b as u32;
        }
        *pos += n;
        Some(v)
    };

    let rest_is_zero = |from: usize| -> bool {
        (from..limit).all(|i| (data[i >> 3] >> (7 - (i & 7))) & 1 == 0)
    };

    let mode_bits = mode_indicator_bits(version);
    let term_bits = terminator_bits(version);
    let mut bytes = Vec::new();
    let mut text = String::new();

    loop {
        let remaining = limit - pos;
        if remaining == 0 {
            break;
        }
        if remaining < mode_bits {
            if rest_is_zero(pos) {
                break;
            }
            return None;
        }
        if remaining >= term_bits {
            let mut all_zero = true;
            for i in 0..term_bits {
                let idx = pos + i;
                if (data[idx >> 3] >> (7 - (idx & 7))) & 1 == 1 {
                    all_zero = false;
                    break;
                }
            }
            if all_zero {
                break;
            }
        } else if rest_is_zero(pos) {
            break;
        }

        let mode = if mode_bits == 0 {
            0 // M1 is numeric-only
        } else {
            read(mode_bits, &mut pos)? as usize
        };
        if mode > 3 {
            return None;
        }

        let count_bits = length_bits(mode, version);
        if count_bits == 0 {
            return None;
        }
        let count = read(count_bits, &mut pos)? as usize;
        let run_start = bytes.len();

        match mode {
            0 => {
                let mut remaining = count;
                while remaining >= 3 {
                    let v = read(10, &mut pos)?;
                    if v > 999 {
                        return None;
                    }
                    bytes.push(b'0' + (v / 100) as u8);
                    bytes.push(b'0' + ((v / 10) % 10) as u8);
                    bytes.push(b'0' + (v % 10) as u8);
                    remaining -= 3;
                }
                if remaining == 2 {
                    let v = read(7, &mut pos)?;
                    if v > 99 {
                        return None;
                    }
                    bytes.push(b'0' + (v / 10) as u8);
                    bytes.push(b'0' + (v % 10) as u8);
                } else if remaining == 1 {
                    let v = read(4, &mut pos)?;
                    if v > 9 {
                        return None;
                    }
                    bytes.push(b'0' + v as u8);
                }
            }
            1 => {
                let mut remaining = count;
                while remaining >= 2 {
                    let v = read(11, &mut pos)? as usize;
                    if v >= 45 * 45 {
                        return None;
                    }
                    bytes.push(ALPHANUMERIC_TABLE[v / 45]);
                    bytes.push(ALPHANUMERIC_TABLE[v % 45]);
                    remaining -= 2;
                }
                if remaining == 1 {
                    let v = read(6, &mut pos)? as usize;
                    if v >= 45 {
                        return None;
                    }
                    bytes.push(ALPHANUMERIC_TABLE[v]);
                }
            }
            2 => {
                for _ in 0..count {
                    bytes.push(read(8, &mut pos)? as u8);
                }
            }
            3 => {
                let mut sjis_run = Vec::with_capacity(count * 2);
                for _ in 0..count {
                    let v = read(13, &mut pos)?;
                    let assembled = ((v / 0xC0) << 8) | (v % 0xC0);
                    let sjis = if assembled < 0x1F00 {
                        assembled + 0x8140
                    } else {
                        assembled + 0xC140
                    };
                    sjis_run.push((sjis >> 8) as u8);
                    sjis_run.push(sjis as u8);
                }
                text.push_str(&decode_text(TextEncoding::ShiftJis, &sjis_run));
                bytes.extend_from_slice(&sjis_run);
                continue;
            }
            _ => return None,
        }

        // Modes 0-2 decode as Latin-1 text directly.
        text.push_str(&decode_text(TextEncoding::Latin1, &bytes[run_start..]));
    }

    Some((bytes, text))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_widths() {
        assert_eq!(width(1), 11);
        assert_eq!(width(4), 17);
    }

    #[test]
    fn test_capacity_m2_l() {
        // M2-L: 13x13, 5 parity codewords, 40 data bits
        assert_eq!(ecc_len(2, EcLevel::L), 5);
        assert_eq!(data_bits(2, EcLevel::L), 40);
        assert_eq!(data_len_bytes(2, EcLevel::L), 5);
    }

    #[test]
    fn test_format_table_unsupported() {
        assert!(format_info(0, 1, EcLevel::M).is_none()); // M1 is L-only
        assert!(format_info(0, 4, EcLevel::H).is_none()); // no H anywhere
        assert!(format_info(0, 4, EcLevel::Q).is_some()); // M4-Q exists
    }

    #[test]
    fn test_function_map_counts() {
        // Data modules = (w-1)^2 - 64
        for version in 1..=4u8 {
            let func = function_map(version);
            let size = width(version);
            let mut data = 0;
            for y in 0..size {
                for x in 0..size {
                    if !func.get(x, y) {
                        data += 1;
                    }
                }
            }
            assert_eq!(data, (size - 1) * (size - 1) - 64, "M{version}");
        }
    }

    #[test]
    fn test_rejects_wrong_size() {
        assert!(matches!(
            decode(&BitMatrix::new(12, 12)),
            Err(Failure::InvalidSize)
        ));
        assert!(matches!(
            decode(&BitMatrix::new(10, 12)),
            Err(Failure::InvalidSize) | Err(Failure::InvalidInput)
        ));
    }
}
