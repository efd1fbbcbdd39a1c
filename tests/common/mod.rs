//! Grid builders for round-trip tests.
//!
//! The library is decode-only; these helpers construct valid symbols the
//! way an external encoder would, reusing the crate's public tables so the
//! round-trip exercises the decode path end to end.

#![allow(dead_code)]

use glyphscan::decoder::datamatrix;
use glyphscan::decoder::galois::{
    aztec_data6_field, aztec_param_field, data_matrix_field, qr_field,
};
use glyphscan::decoder::micro_qr;
use glyphscan::decoder::modulus;
use glyphscan::decoder::pdf417::tables as pdf417_tables;
use glyphscan::decoder::qr::codewords::interleave_codewords;
use glyphscan::decoder::qr::format::{encode_format_bits, encode_version_bits};
use glyphscan::decoder::qr::function_mask::FunctionMask;
use glyphscan::decoder::qr::masks;
use glyphscan::decoder::qr::tables as qr_tables;
use glyphscan::decoder::reed_solomon::ReedSolomon;
use glyphscan::decoder::{aztec, databar};
use glyphscan::{BitMatrix, EcLevel, PixelBuffer, PixelFormat};

// ---- bit stream helper -------------------------------------------------

#[derive(Default)]
pub struct BitWriter {
    pub bits: Vec<bool>,
}

impl BitWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, value: u32, count: usize) {
        for i in (0..count).rev() {
            self.bits.push((value >> i) & 1 == 1);
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = vec![0u8; self.bits.len().div_ceil(8)];
        for (i, &bit) in self.bits.iter().enumerate() {
            if bit {
                bytes[i >> 3] |= 1 << (7 - (i & 7));
            }
        }
        bytes
    }
}

// ---- QR ----------------------------------------------------------------

const ALPHANUMERIC: &[u8; 45] = b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZ $%*+-./:";

/// Segment content for the QR builder.
pub enum QrSegment<'a> {
    Numeric(&'a str),
    Alphanumeric(&'a str),
    Bytes(&'a [u8]),
    Kanji(&'a str),
}

/// Build a QR symbol grid for the given segments.
pub fn encode_qr(
    segments: &[QrSegment<'_>],
    version: u8,
    ec_level: EcLevel,
    mask: u8,
) -> BitMatrix {
    let mut writer = BitWriter::new();
    for segment in segments {
        match segment {
            QrSegment::Numeric(text) => {
                writer.push(0b0001, 4);
                writer.push(text.len() as u32, qr_tables::numeric_count_bits(version));
                let digits: Vec<u32> =
                    text.bytes().map(|b| (b - b'0') as u32).collect();
                for chunk in digits.chunks(3) {
                    match chunk {
                        [a, b, c] => writer.push(a * 100 + b * 10 + c, 10),
                        [a, b] => writer.push(a * 10 + b, 7),
                        [a] => writer.push(*a, 4),
                        _ => unreachable!(),
                    }
                }
            }
            QrSegment::Alphanumeric(text) => {
                writer.push(0b0010, 4);
                writer.push(
                    text.len() as u32,
                    qr_tables::alphanumeric_count_bits(version),
                );
                let values: Vec<u32> = text
                    .bytes()
                    .map(|b| {
                        ALPHANUMERIC
                            .iter()
                            .position(|&c| c == b)
                            .expect("alphanumeric charset") as u32
                    })
                    .collect();
                for chunk in values.chunks(2) {
                    match chunk {
                        [a, b] => writer.push(a * 45 + b, 11),
                        [a] => writer.push(*a, 6),
                        _ => unreachable!(),
                    }
                }
            }
            QrSegment::Bytes(data) => {
                writer.push(0b0100, 4);
                writer.push(data.len() as u32, qr_tables::byte_count_bits(version));
                for &b in *data {
                    writer.push(b as u32, 8);
                }
            }
            QrSegment::Kanji(text) => {
                let values: Vec<u32> = text.chars().map(kanji_value).collect();
                writer.push(0b1000, 4);
                writer.push(values.len() as u32, qr_tables::kanji_count_bits(version));
                for v in values {
                    writer.push(v, 13);
                }
            }
        }
    }

    let data_len = qr_tables::num_data_codewords(version, ec_level);
    finish_qr_bits(&mut writer, data_len * 8, 4);
    let data = pad_to_codewords(writer, data_len);

    let raw = interleave_codewords(&data, version, ec_level);
    qr_matrix_from_raw(&raw, version, ec_level, mask)
}

/// Map a kana character to its 13-bit Kanji-mode value.
fn kanji_value(c: char) -> u32 {
    let (row, cell) = match c as u32 {
        u @ 0x3041..=0x3093 => (4u32, u - 0x3041 + 1),
        u @ 0x30A1..=0x30F6 => (5u32, u - 0x30A1 + 1),
        _ => panic!("test kanji corpus is kana only"),
    };
    let lead = 0x81 + (row - 1) / 2;
    let trail = if row % 2 == 0 {
        0x9E + cell
    } else if cell <= 63 {
        0x3F + cell
    } else {
        0x40 + cell
    };
    let sjis = (lead << 8) | trail;
    let assembled = sjis - 0x8140;
    ((assembled >> 8) * 0xC0) + (assembled & 0xFF)
}

fn finish_qr_bits(writer: &mut BitWriter, capacity_bits: usize, terminator: usize) {
    let remaining = capacity_bits - writer.bits.len();
    writer.push(0, remaining.min(terminator));
    while writer.bits.len() % 8 != 0 {
        writer.bits.push(false);
    }
}

fn pad_to_codewords(writer: BitWriter, data_len: usize) -> Vec<u8> {
    let mut data = writer.into_bytes();
    let mut toggle = true;
    while data.len() < data_len {
        data.push(if toggle { 0xEC } else { 0x11 });
        toggle = !toggle;
    }
    assert!(data.len() == data_len, "payload exceeds version capacity");
    data
}

/// Assemble a QR symbol from interleaved raw codewords (for corruption
/// tests).
pub fn qr_matrix_from_raw(raw: &[u16], version: u8, ec_level: EcLevel, mask: u8) -> BitMatrix {
    let size = 17 + 4 * version as usize;
    let mut modules = BitMatrix::new(size, size);
    let func = FunctionMask::new(version);

    draw_qr_function_patterns(&mut modules, version);
    draw_qr_format(&mut modules, ec_level, mask);
    if version >= 7 {
        draw_qr_version(&mut modules, version);
    }

    // Zigzag fill, the inverse of the extraction walk.
    let mut bit_index = 0usize;
    let total_bits = raw.len() * 8;
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
                let bit = if bit_index < total_bits {
                    (raw[bit_index >> 3] >> (7 - (bit_index & 7))) & 1 == 1
                } else {
                    false
                };
                bit_index += 1;
                let masked = bit ^ masks::should_invert(mask, x, y);
                modules.set(x, y, masked);
            }
        }
        upward = !upward;
        right -= 2;
    }

    modules
}

fn draw_qr_function_patterns(modules: &mut BitMatrix, version: u8) {
    let size = modules.width();
    for &(fx, fy) in &[(0usize, 0usize), (size - 7, 0), (0, size - 7)] {
        for y in 0..7 {
            for x in 0..7 {
                let dark = x == 0
                    || x == 6
                    || y == 0
                    || y == 6
                    || ((2..=4).contains(&x) && (2..=4).contains(&y));
                modules.set(fx + x, fy + y, dark);
            }
        }
    }

    // Timing tracks run between the separators only
    for i in 8..size - 8 {
        let dark = i % 2 == 0;
        modules.set(6, i, dark);
        modules.set(i, 6, dark);
    }

    let align = qr_tables::alignment_pattern_positions(version);
    for (i, &ax) in align.iter().enumerate() {
        for (j, &ay) in align.iter().enumerate() {
            let skip = (i == 0 && j == 0)
                || (i == 0 && j == align.len() - 1)
                || (i == align.len() - 1 && j == 0);
            if skip {
                continue;
            }
            for dy in -2i32..=2 {
                for dx in -2i32..=2 {
                    let dark = dx.abs() == 2 || dy.abs() == 2 || (dx == 0 && dy == 0);
                    modules.set(
                        (ax as i32 + dx) as usize,
                        (ay as i32 + dy) as usize,
                        dark,
                    );
                }
            }
        }
    }

    // Dark module
    modules.set(8, size - 8, true);
}

fn draw_qr_format(modules: &mut BitMatrix, ec_level: EcLevel, mask: u8) {
    let size = modules.width();
    let bits = encode_format_bits(ec_level, mask);
    let bit = |i: usize| (bits >> i) & 1 == 1;

    // Copy A around the top-left finder
    for i in 0..=5 {
        modules.set(8, i, bit(i));
    }
    modules.set(8, 7, bit(6));
    modules.set(8, 8, bit(7));
    modules.set(7, 8, bit(8));
    for i in 9..15 {
        modules.set(14 - i, 8, bit(i));
    }

    // Copy B split between the other two finders
    for i in 0..8 {
        modules.set(size - 1 - i, 8, bit(i));
    }
    for i in 8..15 {
        modules.set(8, size - 15 + i, bit(i));
    }
}

fn draw_qr_version(modules: &mut BitMatrix, version: u8) {
    let size = modules.width();
    let bits = encode_version_bits(version);
    for i in 0..18 {
        let a = size - 11 + (i % 3);
        let b = i / 3;
        let dark = (bits >> i) & 1 == 1;
        modules.set(a, b, dark);
        modules.set(b, a, dark);
    }
}

// ---- Micro QR ----------------------------------------------------------

/// Build a Micro QR symbol (numeric or alphanumeric payload).
pub fn encode_micro_qr(text: &str, version: u8, ec_level: EcLevel, mask: u8) -> BitMatrix {
    let numeric = text.bytes().all(|b| b.is_ascii_digit());
    let mode: usize = if numeric { 0 } else { 1 };

    let mode_bits = version as usize - 1;
    let count_bits = micro_length_bits(mode, version);
    let mut writer = BitWriter::new();
    if mode_bits > 0 {
        writer.push(mode as u32, mode_bits);
    } else {
        assert_eq!(mode, 0, "M1 carries numeric data only");
    }
    writer.push(text.len() as u32, count_bits);

    if numeric {
        let digits: Vec<u32> = text.bytes().map(|b| (b - b'0') as u32).collect();
        for chunk in digits.chunks(3) {
            match chunk {
                [a, b, c] => writer.push(a * 100 + b * 10 + c, 10),
                [a, b] => writer.push(a * 10 + b, 7),
                [a] => writer.push(*a, 4),
                _ => unreachable!(),
            }
        }
    } else {
        let values: Vec<u32> = text
            .bytes()
            .map(|b| {
                ALPHANUMERIC
                    .iter()
                    .position(|&c| c == b)
                    .expect("alphanumeric charset") as u32
            })
            .collect();
        for chunk in values.chunks(2) {
            match chunk {
                [a, b] => writer.push(a * 45 + b, 11),
                [a] => writer.push(*a, 6),
                _ => unreachable!(),
            }
        }
    }

    let data_bits = micro_qr::data_bits(version, ec_level);
    let ecc_len = micro_qr::ecc_len(version, ec_level);
    assert!(ecc_len > 0, "unsupported version/level");
    assert!(writer.bits.len() <= data_bits, "payload too long");

    let terminator = version as usize * 2 + 1;
    let remaining = data_bits - writer.bits.len();
    writer.push(0, remaining.min(terminator));
    while writer.bits.len() < data_bits {
        writer.bits.push(false);
    }

    let data_len = (data_bits + 4) / 8;
    let mut data = writer.into_bytes();
    data.truncate(data_len);
    while data.len() < data_len {
        data.push(0);
    }

    let rs = ReedSolomon::new(qr_field());
    let words: Vec<u16> = data.iter().map(|&b| b as u16).collect();
    let codewords = rs.encode(&words, ecc_len);

    build_micro_matrix(&codewords, data_bits, version, ec_level, mask)
}

fn micro_length_bits(mode: usize, version: u8) -> usize {
    const TABLE: [[usize; 4]; 2] = [[3, 4, 5, 6], [0, 3, 4, 5]];
    TABLE[mode][version as usize - 1]
}

fn build_micro_matrix(
    codewords: &[u16],
    data_bits: usize,
    version: u8,
    ec_level: EcLevel,
    mask: u8,
) -> BitMatrix {
    let size = micro_qr::width(version);
    let data_len = (data_bits + 4) / 8;
    let ecc_len = codewords.len() - data_len;
    let mut modules = BitMatrix::new(size, size);
    let func = micro_qr::function_map(version);

    // Finder + timing
    for y in 0..7 {
        for x in 0..7 {
            let dark = x == 0
                || x == 6
                || y == 0
                || y == 6
                || ((2..=4).contains(&x) && (2..=4).contains(&y));
            modules.set(x, y, dark);
        }
    }
    for i in 8..size {
        let dark = i % 2 == 0;
        modules.set(i, 0, dark);
        modules.set(0, i, dark);
    }

    // Format info
    let format = micro_qr::format_info(mask, version, ec_level).expect("format combination");
    for i in 0..8 {
        modules.set(8, i + 1, (format >> i) & 1 == 1);
    }
    for i in 0..7 {
        modules.set(7 - i, 8, (format >> (8 + i)) & 1 == 1);
    }

    // Data fill via the zigzag walk, masked on write
    let mut filler = MicroFiller::new(size, &func);
    let mut place = |bit: bool, filler: &mut MicroFiller| {
        let (x, y) = filler.next().expect("frame capacity");
        let masked = bit ^ micro_qr::should_invert(mask, x, y);
        modules.set(x, y, masked);
    };
    for i in 0..data_bits {
        let bit = (codewords[i >> 3] >> (7 - (i & 7))) & 1 == 1;
        place(bit, &mut filler);
    }
    for i in 0..ecc_len * 8 {
        let cw = codewords[data_len + (i >> 3)];
        let bit = (cw >> (7 - (i & 7))) & 1 == 1;
        place(bit, &mut filler);
    }

    modules
}

/// The Micro QR zigzag walk (two modules wide, bottom-right start).
struct MicroFiller<'m> {
    width: usize,
    func: &'m BitMatrix,
    x: i32,
    y: i32,
    dir: i32,
    bit: i32,
}

impl<'m> MicroFiller<'m> {
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

// ---- Data Matrix -------------------------------------------------------

/// Build a Data Matrix symbol with ASCII encodation.
pub fn encode_data_matrix(text: &str) -> BitMatrix {
    let mut data: Vec<u16> = Vec::new();
    let bytes = text.as_bytes();
    let mut i = 0usize;
    while i < bytes.len() {
        if i + 1 < bytes.len() && bytes[i].is_ascii_digit() && bytes[i + 1].is_ascii_digit() {
            let pair = (bytes[i] - b'0') * 10 + (bytes[i + 1] - b'0');
            data.push(130 + pair as u16);
            i += 2;
        } else {
            assert!(bytes[i] < 128, "ASCII encodation only");
            data.push(bytes[i] as u16 + 1);
            i += 1;
        }
    }

    let symbol = datamatrix::symbol_for_data(data.len()).expect("payload fits a square symbol");
    // Padding: explicit 129, then 253-state randomized fillers
    if data.len() < symbol.data_codewords {
        data.push(129);
    }
    while data.len() < symbol.data_codewords {
        let position = data.len() + 1;
        let pseudo = ((149 * position) % 253) + 1;
        let mut pad = 129 + pseudo;
        if pad > 254 {
            pad -= 254;
        }
        data.push(pad as u16);
    }

    encode_data_matrix_codewords(&data, symbol)
}

/// Assemble a symbol from prepared data codewords (for corruption tests).
pub fn encode_data_matrix_codewords(
    data: &[u16],
    symbol: &'static datamatrix::SymbolInfo,
) -> BitMatrix {
    let codewords = data_matrix_stream(data, symbol);
    data_matrix_symbol_from_stream(&codewords, symbol)
}

/// Full transmission-order codeword stream (data + parity) for a payload.
pub fn data_matrix_stream(data: &[u16], symbol: &'static datamatrix::SymbolInfo) -> Vec<u16> {
    assert_eq!(data.len(), symbol.data_codewords);
    let rs = ReedSolomon::new(data_matrix_field());
    let blocks = symbol.block_count();
    let mut data_blocks: Vec<Vec<u16>> = vec![Vec::new(); blocks];
    for (i, &cw) in data.iter().enumerate() {
        data_blocks[i % blocks].push(cw);
    }
    let encoded: Vec<Vec<u16>> = data_blocks
        .iter()
        .map(|block| rs.encode(block, symbol.ecc_block_size))
        .collect();

    let mut codewords = Vec::with_capacity(symbol.codeword_count());
    let max_data = *symbol.data_block_sizes.iter().max().unwrap();
    for i in 0..max_data {
        for (b, block) in encoded.iter().enumerate() {
            if i < symbol.data_block_sizes[b] {
                codewords.push(block[i]);
            }
        }
    }
    for i in 0..symbol.ecc_block_size {
        for (b, block) in encoded.iter().enumerate() {
            codewords.push(block[symbol.data_block_sizes[b] + i]);
        }
    }
    codewords
}

/// Render a full (data + parity) codeword stream as a bordered symbol.
pub fn data_matrix_symbol_from_stream(
    codewords: &[u16],
    symbol: &'static datamatrix::SymbolInfo,
) -> BitMatrix {
    assert_eq!(codewords.len(), symbol.codeword_count());
    // Place into the data region, then wrap each region with its borders
    let data_region = datamatrix::place_codewords(
        codewords,
        symbol.data_region_rows(),
        symbol.data_region_cols(),
    );

    let mut modules = BitMatrix::new(symbol.symbol_cols, symbol.symbol_rows);
    let region_total_rows = symbol.symbol_rows / symbol.region_rows;
    let region_total_cols = symbol.symbol_cols / symbol.region_cols;
    let region_data_rows = region_total_rows - 2;
    let region_data_cols = region_total_cols - 2;

    for rr in 0..symbol.region_rows {
        for rc in 0..symbol.region_cols {
            let top = rr * region_total_rows;
            let left = rc * region_total_cols;

            // Solid L: left column and bottom row
            for i in 0..region_total_rows {
                modules.set(left, top + i, true);
            }
            for i in 0..region_total_cols {
                modules.set(left + i, top + region_total_rows - 1, true);
            }
            // Clock track: top row dark at even offsets, right column dark
            // at odd offsets
            for i in 0..region_total_cols {
                modules.set(left + i, top, i % 2 == 0);
            }
            for i in 0..region_total_rows {
                modules.set(left + region_total_cols - 1, top + i, i % 2 == 1);
            }
            // Keep the solid corners consistent
            modules.set(left, top, true);
            modules.set(
                left + region_total_cols - 1,
                top + region_total_rows - 1,
                true,
            );

            for y in 0..region_data_rows {
                for x in 0..region_data_cols {
                    let data_row = rr * region_data_rows + y;
                    let data_col = rc * region_data_cols + x;
                    modules.set(
                        left + 1 + x,
                        top + 1 + y,
                        data_region.get(data_col, data_row),
                    );
                }
            }
        }
    }

    modules
}

// ---- PDF417 ------------------------------------------------------------

/// Build a PDF417 symbol carrying the text in byte compaction.
pub fn encode_pdf417(text: &str, cols: usize, ec_level: u8) -> BitMatrix {
    let bytes = text.as_bytes();
    let mut data: Vec<i32> = Vec::with_capacity(bytes.len() + 2);
    data.push(if bytes.len() % 6 == 0 { 924 } else { 901 });
    let mut idx = 0usize;
    while idx + 6 <= bytes.len() {
        let mut t = 0u64;
        for i in 0..6 {
            t = (t << 8) + bytes[idx + i] as u64;
        }
        idx += 6;
        let mut group = [0i32; 5];
        for slot in group.iter_mut().rev() {
            *slot = (t % 900) as i32;
            t /= 900;
        }
        data.extend_from_slice(&group);
    }
    for &b in &bytes[idx..] {
        data.push(b as i32);
    }

    encode_pdf417_codewords(&data, cols, ec_level)
}

/// Assemble a PDF417 symbol from prepared data codewords.
pub fn encode_pdf417_codewords(data: &[i32], cols: usize, ec_level: u8) -> BitMatrix {
    let (stream, rows) = pdf417_stream(data, cols, ec_level);
    pdf417_symbol_from_stream(&stream, cols, rows, ec_level)
}

/// Full transmission-order codeword stream plus row count for a payload.
pub fn pdf417_stream(data: &[i32], cols: usize, ec_level: u8) -> (Vec<i32>, usize) {
    let ec_count = 1usize << (ec_level + 1);
    let body = data.len() + 1 + ec_count;
    let rows = body.div_ceil(cols).max(3);
    assert!(rows <= 90, "symbol too tall");

    let pad = rows * cols - body;
    let length_descriptor = (data.len() + pad + 1) as i32;

    let mut stream: Vec<i32> = Vec::with_capacity(rows * cols);
    stream.push(length_descriptor);
    stream.extend_from_slice(data);
    stream.extend(std::iter::repeat_n(900, pad));
    let parity = modulus::generate_parity(&stream, ec_count);
    stream.extend_from_slice(&parity);
    assert_eq!(stream.len(), rows * cols);
    (stream, rows)
}

/// Render a codeword stream as a symbol grid.
pub fn pdf417_symbol_from_stream(stream: &[i32], cols: usize, rows: usize, ec_level: u8) -> BitMatrix {
    assert_eq!(stream.len(), rows * cols);
    let width = 17 * cols + 69;
    let mut modules = BitMatrix::new(width, rows);
    let mut cw_iter = stream.iter();

    for y in 0..rows {
        let cluster = y % 3;
        let band = 30 * (y / 3) as i32;
        let (left, right) = match cluster {
            0 => (
                band + (rows as i32 - 1) / 3,
                band + cols as i32 - 1,
            ),
            1 => (
                band + ec_level as i32 * 3 + (rows as i32 - 1) % 3,
                band + (rows as i32 - 1) / 3,
            ),
            _ => (
                band + cols as i32 - 1,
                band + ec_level as i32 * 3 + (rows as i32 - 1) % 3,
            ),
        };

        let mut x = 0usize;
        let mut put = |bits: u32, len: usize, x: &mut usize| {
            for i in (0..len).rev() {
                modules.set(*x, y, (bits >> i) & 1 == 1);
                *x += 1;
            }
        };

        put(pdf417_tables::START_PATTERN, 17, &mut x);
        put(pdf417_tables::pattern(cluster, left as usize), 17, &mut x);
        for _ in 0..cols {
            let &cw = cw_iter.next().expect("stream sized to the grid");
            put(pdf417_tables::pattern(cluster, cw as usize), 17, &mut x);
        }
        put(pdf417_tables::pattern(cluster, right as usize), 17, &mut x);
        put(pdf417_tables::STOP_PATTERN, 18, &mut x);
        assert_eq!(x, width);
    }

    modules
}

// ---- Aztec -------------------------------------------------------------

/// Build a compact Aztec symbol (uppercase text, digits, space and basic
/// punctuation).
pub fn encode_aztec(text: &str) -> BitMatrix {
    let bits = aztec_highlevel_encode(text);

    // Pick the smallest compact layer count that fits after stuffing.
    for layers in 1..=4usize {
        let word_bits = aztec::word_size(layers);
        let capacity = aztec::total_bits(layers, true);
        let stuffed = stuff_bits(&bits, word_bits);
        let data_words = stuffed.len().div_ceil(word_bits);
        let total_words = capacity / word_bits;
        if data_words + 3 > total_words {
            continue; // leave parity room
        }
        return build_aztec_matrix(&stuffed, layers, data_words, total_words);
    }
    panic!("payload too long for a compact Aztec test symbol");
}

fn aztec_highlevel_encode(text: &str) -> Vec<bool> {
    #[derive(PartialEq, Clone, Copy)]
    enum Mode {
        Upper,
        Digit,
    }
    let mut writer = BitWriter::new();
    let mut mode = Mode::Upper;

    for c in text.chars() {
        match c {
            'A'..='Z' => {
                if mode == Mode::Digit {
                    writer.push(14, 4); // U/L latch from digit
                    mode = Mode::Upper;
                }
                writer.push(c as u32 - 'A' as u32 + 2, 5);
            }
            '0'..='9' => {
                if mode == Mode::Upper {
                    writer.push(30, 5); // D/L latch
                    mode = Mode::Digit;
                }
                writer.push(c as u32 - '0' as u32 + 2, 4);
            }
            ' ' => {
                let width = if mode == Mode::Digit { 4 } else { 5 };
                writer.push(1, width);
            }
            '-' | '.' | ',' => {
                // P/S shift exists in both tables at code 0
                let width = if mode == Mode::Digit { 4 } else { 5 };
                writer.push(0, width);
                let punct = match c {
                    '-' => 18,
                    '.' => 19,
                    _ => 17,
                };
                writer.push(punct, 5);
            }
            _ => panic!("test Aztec corpus is uppercase/digits/punctuation"),
        }
    }
    writer.bits
}

/// Insert anti-runlength stuffing bits for the given word size.
fn stuff_bits(bits: &[bool], word_size: usize) -> Vec<bool> {
    let mask = (1u32 << word_size) - 2;
    let mut out: Vec<bool> = Vec::with_capacity(bits.len() + bits.len() / word_size + 1);
    let mut i = 0usize;
    while i < bits.len() {
        let mut word = 0u32;
        for j in 0..word_size {
            if i + j >= bits.len() || bits[i + j] {
                word |= 1 << (word_size - 1 - j);
            }
        }
        if word & mask == mask {
            for j in (1..word_size).rev() {
                out.push((mask >> j) & 1 == 1);
            }
            out.push(false);
            i += word_size - 1;
        } else if word & mask == 0 {
            for _ in 1..word_size {
                out.push(false);
            }
            out.push(true);
            i += word_size - 1;
        } else {
            for j in (0..word_size).rev() {
                out.push((word >> j) & 1 == 1);
            }
            i += word_size;
        }
    }
    out
}

fn build_aztec_matrix(
    stuffed: &[bool],
    layers: usize,
    data_words: usize,
    total_words: usize,
) -> BitMatrix {
    let word_bits = aztec::word_size(layers);
    let capacity = aztec::total_bits(layers, true);

    // Pack data words, padding the tail of the last word with ones; the
    // stuffing pass already guarantees no word comes out all-ones.
    let mut words: Vec<u16> = Vec::with_capacity(total_words);
    for w in 0..data_words {
        let mut word = 0u16;
        for j in 0..word_bits {
            let idx = w * word_bits + j;
            let bit = idx >= stuffed.len() || stuffed[idx];
            word = (word << 1) | bit as u16;
        }
        words.push(word);
    }

    let rs = ReedSolomon::new(match word_bits {
        6 => aztec_data6_field(),
        _ => data_matrix_field(),
    });
    let full = rs.encode(&words, total_words - data_words);

    // Serialize words back to the raw bit layer, leading remainder first
    let mut raw_bits = vec![false; capacity];
    let offset = capacity % word_bits;
    for (w, &word) in full.iter().enumerate() {
        for j in 0..word_bits {
            raw_bits[offset + w * word_bits + j] = (word >> (word_bits - 1 - j)) & 1 == 1;
        }
    }

    let size = aztec::matrix_size(layers, true);
    let mut modules = BitMatrix::new(size, size);
    draw_aztec_bullseye(&mut modules);
    draw_aztec_mode_message(&mut modules, layers, data_words);
    draw_aztec_data(&mut modules, &raw_bits, layers);
    modules
}

fn draw_aztec_bullseye(modules: &mut BitMatrix) {
    let center = (modules.width() / 2) as i32;
    for ring in 0..=4i32 {
        let dark = ring % 2 == 0;
        for d in -ring..=ring {
            for &(dx, dy) in &[(d, -ring), (d, ring), (-ring, d), (ring, d)] {
                modules.set((center + dx) as usize, (center + dy) as usize, dark);
            }
        }
    }
    // Orientation marks in the corners of the mode-message ring
    let r = 5i32;
    for &(dx, dy) in &[(-r, -r), (-r + 1, -r), (-r, -r + 1), (r, -r), (r, -r + 1)] {
        modules.set((center + dx) as usize, (center + dy) as usize, true);
    }
    modules.set((center + r - 1) as usize, (center + r) as usize, true);
}

fn draw_aztec_mode_message(modules: &mut BitMatrix, layers: usize, data_words: usize) {
    let mut words = [0u16; 7];
    let value = (((layers - 1) as u16) << 6) | ((data_words - 1) as u16);
    // 8 data bits split into two 4-bit words, five parity words
    words[0] = (value >> 4) & 0xF;
    words[1] = value & 0xF;
    let rs = ReedSolomon::new(aztec_param_field());
    let full = rs.encode(&words[..2], 5);

    let mut bits = [false; 28];
    for (i, &word) in full.iter().enumerate() {
        for j in 0..4 {
            bits[i * 4 + j] = (word >> (3 - j)) & 1 == 1;
        }
    }

    let center = modules.width() / 2;
    for i in 0..7 {
        let offset = center - 3 + i;
        modules.set(offset, center - 5, bits[i]);
        modules.set(center + 5, offset, bits[i + 7]);
        modules.set(offset, center + 5, bits[20 - i]);
        modules.set(center - 5, offset, bits[27 - i]);
    }
}

fn draw_aztec_data(modules: &mut BitMatrix, raw_bits: &[bool], layers: usize) {
    let base_matrix_size = 11 + layers * 4;
    let mut raw_offset = 0usize;
    for layer in 0..layers {
        let row_size = (layers - layer) * 4 + 9;
        let low = layer * 2;
        let high = base_matrix_size - 1 - low;

        for i in 0..row_size {
            let column_offset = i * 2;
            for j in 0..2 {
                modules.set(low + j, low + i, raw_bits[raw_offset + column_offset + j]);
                modules.set(
                    low + i,
                    high - j,
                    raw_bits[raw_offset + 2 * row_size + column_offset + j],
                );
                modules.set(
                    high - j,
                    high - i,
                    raw_bits[raw_offset + 4 * row_size + column_offset + j],
                );
                modules.set(
                    high - i,
                    low + j,
                    raw_bits[raw_offset + 6 * row_size + column_offset + j],
                );
            }
        }
        raw_offset += row_size * 8;
    }
}

// ---- DataBar -----------------------------------------------------------

const DATABAR_MODULES_ODD: [i32; 9] = [12, 10, 8, 6, 4, 5, 7, 9, 11];
const DATABAR_MODULES_EVEN: [i32; 9] = [4, 6, 8, 10, 12, 10, 8, 6, 4];
const DATABAR_WIDEST_ODD: [i32; 9] = [8, 6, 4, 3, 1, 2, 4, 6, 8];
const DATABAR_WIDEST_EVEN: [i32; 9] = [1, 3, 5, 6, 8, 7, 5, 3, 1];
const DATABAR_T: [i32; 9] = [1, 10, 34, 70, 126, 4, 20, 48, 81];
const DATABAR_G_SUM: [i32; 9] = [0, 161, 961, 2015, 2715, 0, 336, 1036, 1516];
#[rustfmt::skip]
const DATABAR_CHECKSUM_WEIGHT: [i32; 32] = [
    1, 3, 9, 27, 2, 6, 18, 54, 4, 12, 36, 29, 8, 24, 72, 58,
    16, 48, 65, 37, 32, 17, 51, 74, 64, 34, 23, 69, 49, 68, 46, 59,
];
#[rustfmt::skip]
const DATABAR_FINDERS: [i32; 45] = [
    3, 8, 2, 1, 1,
    3, 5, 5, 1, 1,
    3, 3, 7, 1, 1,
    3, 1, 9, 1, 1,
    2, 7, 4, 1, 1,
    2, 5, 6, 1, 1,
    2, 3, 8, 1, 1,
    1, 5, 7, 1, 1,
    1, 3, 9, 1, 1,
];

fn databar_outer_group(value: i32) -> usize {
    match value {
        0..=160 => 0,
        161..=960 => 1,
        961..=2014 => 2,
        2015..=2714 => 3,
        _ => 4,
    }
}

fn databar_inner_group(value: i32) -> usize {
    match value {
        0..=335 => 5,
        336..=1035 => 6,
        1036..=1515 => 7,
        _ => 8,
    }
}

fn databar_character_widths(value: i32, outer: bool) -> ([i32; 4], [i32; 4]) {
    let group = if outer {
        databar_outer_group(value)
    } else {
        databar_inner_group(value)
    };
    let rem = value - DATABAR_G_SUM[group];
    let (v_odd, v_even) = if outer {
        (rem / DATABAR_T[group], rem % DATABAR_T[group])
    } else {
        (rem % DATABAR_T[group], rem / DATABAR_T[group])
    };

    let odd = databar::get_widths(
        v_odd,
        DATABAR_MODULES_ODD[group],
        4,
        DATABAR_WIDEST_ODD[group],
        if outer { 1 } else { 0 },
    );
    let even = databar::get_widths(
        v_even,
        DATABAR_MODULES_EVEN[group],
        4,
        DATABAR_WIDEST_EVEN[group],
        if outer { 0 } else { 1 },
    );
    (
        [odd[0], odd[1], odd[2], odd[3]],
        [even[0], even[1], even[2], even[3]],
    )
}

/// Element widths (46 entries) of a DataBar-14 symbol for a 13-digit value.
pub fn databar_widths(value: u64) -> [i32; 46] {
    assert!(value <= 9_999_999_999_999);
    let left = (value / 4_537_077) as i32;
    let right = (value % 4_537_077) as i32;
    let chars = [left / 1597, left % 1597, right / 1597, right % 1597];

    let mut data_widths = [[0i32; 4]; 8];
    for (index, &char_value) in chars.iter().enumerate() {
        let outer = index == 0 || index == 2;
        let (odd, even) = databar_character_widths(char_value, outer);
        for e in 0..4 {
            data_widths[e * 2][index] = odd[e];
            data_widths[e * 2 + 1][index] = even[e];
        }
    }

    let mut checksum = 0i32;
    for i in 0..8 {
        checksum += DATABAR_CHECKSUM_WEIGHT[i] * data_widths[i][0];
        checksum += DATABAR_CHECKSUM_WEIGHT[i + 8] * data_widths[i][1];
        checksum += DATABAR_CHECKSUM_WEIGHT[i + 16] * data_widths[i][2];
        checksum += DATABAR_CHECKSUM_WEIGHT[i + 24] * data_widths[i][3];
    }
    checksum %= 79;
    if checksum >= 8 {
        checksum += 1;
    }
    if checksum >= 72 {
        checksum += 1;
    }
    let c_left = (checksum / 9) as usize;
    let c_right = (checksum % 9) as usize;

    let mut widths = [0i32; 46];
    widths[0] = 1;
    widths[1] = 1;
    for i in 0..8 {
        widths[i + 2] = data_widths[i][0];
        widths[15 + (7 - i)] = data_widths[i][1];
        widths[i + 23] = data_widths[i][3];
        widths[36 + (7 - i)] = data_widths[i][2];
    }
    for i in 0..5 {
        widths[10 + i] = DATABAR_FINDERS[5 * c_left + i];
        widths[31 + i] = DATABAR_FINDERS[5 * c_right + (4 - i)];
    }
    widths[44] = 1;
    widths[45] = 1;
    widths
}

/// Render widths as a single-row module sequence starting with a space.
pub fn databar_row(widths: &[i32]) -> Vec<bool> {
    let mut row = Vec::new();
    let mut dark = false;
    for &w in widths {
        for _ in 0..w {
            row.push(dark);
        }
        dark = !dark;
    }
    row
}

/// Render the stacked (3-row) matrix form.
pub fn databar_stacked(value: u64) -> BitMatrix {
    let widths = databar_widths(value);
    // Top row: guard + left half + 2 pad runs; bottom row: 2 pad runs +
    // right half + guard. Pads keep both rows at 25 runs and equal width.
    let mut top_widths: Vec<i32> = widths[..23].to_vec();
    top_widths.push(1);
    top_widths.push(1);
    let mut bottom_widths: Vec<i32> = vec![1, 1];
    bottom_widths.extend_from_slice(&widths[23..]);

    let top = databar_row(&top_widths);
    let bottom = databar_row(&bottom_widths);
    assert_eq!(top.len(), bottom.len());

    let width = top.len();
    let mut modules = BitMatrix::new(width, 3);
    for (x, &m) in top.iter().enumerate() {
        modules.set(x, 0, m);
    }
    // Separator row: alternating texture, ignored by the decoder
    for x in 0..width {
        modules.set(x, 1, x % 2 == 0);
    }
    for (x, &m) in bottom.iter().enumerate() {
        modules.set(x, 2, m);
    }
    modules
}

// ---- pixel rendering ---------------------------------------------------

/// Render a module grid to a grayscale pixel image.
pub fn render_gray(modules: &BitMatrix, pitch: usize, quiet_zone: usize) -> (Vec<u8>, usize, usize) {
    let width = (modules.width() + 2 * quiet_zone) * pitch;
    let height = (modules.height() + 2 * quiet_zone) * pitch;
    let mut gray = vec![255u8; width * height];
    for my in 0..modules.height() {
        for mx in 0..modules.width() {
            if !modules.get(mx, my) {
                continue;
            }
            for dy in 0..pitch {
                for dx in 0..pitch {
                    let x = (mx + quiet_zone) * pitch + dx;
                    let y = (my + quiet_zone) * pitch + dy;
                    gray[y * width + x] = 0;
                }
            }
        }
    }
    (gray, width, height)
}

/// Wrap a grayscale plane in a `PixelBuffer`.
pub fn gray_buffer(gray: &[u8], width: usize, height: usize) -> PixelBuffer<'_> {
    PixelBuffer::packed(gray, width, height, PixelFormat::Gray8).expect("consistent buffer")
}
