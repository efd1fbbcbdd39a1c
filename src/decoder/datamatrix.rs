//! Data Matrix ECC200 grid decoding.
//!
//! Square-symbol support: finder/clock borders are stripped per data
//! region, codewords are read with the standard placement walk, blocks are
//! corrected over GF(256)/0x12D, and the codeword stream is interpreted as
//! ASCII / C40 / Text / X12 / EDIFACT / Base256 encodations.

use log::trace;

use super::galois::data_matrix_field;
use super::reed_solomon::ReedSolomon;
use crate::models::{BitMatrix, Failure};

/// Geometry and block structure of one ECC200 symbol size.
#[derive(Clone, Copy)]
pub struct SymbolInfo {
    /// Symbol height in modules
    pub symbol_rows: usize,
    /// Symbol width in modules
    pub symbol_cols: usize,
    /// Data codeword capacity
    pub data_codewords: usize,
    /// Total parity codewords
    pub ecc_codewords: usize,
    /// Data regions vertically
    pub region_rows: usize,
    /// Data regions horizontally
    pub region_cols: usize,
    /// Data codewords per interleaved block
    pub data_block_sizes: &'static [usize],
    /// Parity codewords per block
    pub ecc_block_size: usize,
}

impl SymbolInfo {
    /// Total codewords (data + parity) the symbol carries.
    pub fn codeword_count(&self) -> usize {
        self.data_codewords + self.ecc_codewords
    }

    /// Number of interleaved Reed-Solomon blocks.
    pub fn block_count(&self) -> usize {
        self.data_block_sizes.len()
    }

    fn region_total_rows(&self) -> usize {
        self.symbol_rows / self.region_rows
    }

    fn region_total_cols(&self) -> usize {
        self.symbol_cols / self.region_cols
    }

    fn region_data_rows(&self) -> usize {
        self.region_total_rows() - 2
    }

    fn region_data_cols(&self) -> usize {
        self.region_total_cols() - 2
    }

    /// Size of the stitched data region (borders removed).
    pub fn data_region_rows(&self) -> usize {
        self.region_data_rows() * self.region_rows
    }

    /// Size of the stitched data region (borders removed).
    pub fn data_region_cols(&self) -> usize {
        self.region_data_cols() * self.region_cols
    }
}

macro_rules! symbol {
    ($rows:expr, $cols:expr, $data:expr, $ecc:expr, $rr:expr, $rc:expr, $blocks:expr, $ecb:expr) => {
        SymbolInfo {
            symbol_rows: $rows,
            symbol_cols: $cols,
            data_codewords: $data,
            ecc_codewords: $ecc,
            region_rows: $rr,
            region_cols: $rc,
            data_block_sizes: $blocks,
            ecc_block_size: $ecb,
        }
    };
}

/// Square ECC200 symbols.
static SYMBOLS: [SymbolInfo; 24] = [
    symbol!(10, 10, 3, 5, 1, 1, &[3], 5),
    symbol!(12, 12, 5, 7, 1, 1, &[5], 7),
    symbol!(14, 14, 8, 10, 1, 1, &[8], 10),
    symbol!(16, 16, 12, 12, 1, 1, &[12], 12),
    symbol!(18, 18, 18, 14, 1, 1, &[18], 14),
    symbol!(20, 20, 22, 18, 1, 1, &[22], 18),
    symbol!(22, 22, 30, 20, 1, 1, &[30], 20),
    symbol!(24, 24, 36, 24, 1, 1, &[36], 24),
    symbol!(26, 26, 44, 28, 1, 1, &[44], 28),
    symbol!(32, 32, 62, 36, 2, 2, &[62], 36),
    symbol!(36, 36, 86, 42, 2, 2, &[86], 42),
    symbol!(40, 40, 114, 48, 2, 2, &[114], 48),
    symbol!(44, 44, 144, 56, 2, 2, &[144], 56),
    symbol!(48, 48, 174, 68, 2, 2, &[174], 68),
    symbol!(52, 52, 204, 84, 2, 2, &[102, 102], 42),
    symbol!(64, 64, 280, 112, 4, 4, &[140, 140], 56),
    symbol!(72, 72, 368, 144, 4, 4, &[92, 92, 92, 92], 36),
    symbol!(80, 80, 456, 192, 4, 4, &[114, 114, 114, 114], 48),
    symbol!(88, 88, 576, 224, 4, 4, &[144, 144, 144, 144], 56),
    symbol!(96, 96, 696, 272, 4, 4, &[174, 174, 174, 174], 68),
    symbol!(104, 104, 816, 336, 4, 4, &[136, 136, 136, 136, 136, 136], 56),
    symbol!(120, 120, 1050, 408, 6, 6, &[175, 175, 175, 175, 175, 175], 68),
    symbol!(132, 132, 1304, 496, 6, 6, &[163, 163, 163, 163, 163, 163, 163, 163], 62),
    symbol!(
        144, 144, 1558, 620, 6, 6,
        &[156, 156, 156, 156, 156, 156, 156, 156, 155, 155], 62
    ),
];

/// Look up the symbol table entry for a grid size.
pub fn symbol_for_size(rows: usize, cols: usize) -> Option<&'static SymbolInfo> {
    SYMBOLS
        .iter()
        .find(|s| s.symbol_rows == rows && s.symbol_cols == cols)
}

/// Smallest symbol holding `data_codewords` data codewords.
pub fn symbol_for_data(data_codewords: usize) -> Option<&'static SymbolInfo> {
    SYMBOLS.iter().find(|s| data_codewords <= s.data_codewords)
}

/// A decoded Data Matrix symbol.
pub struct DataMatrixDecoded {
    /// Symbol height in modules
    pub rows: usize,
    /// Decoded text
    pub text: String,
    /// Raw payload bytes
    pub bytes: Vec<u8>,
    /// Codeword errors corrected across blocks
    pub errors_corrected: usize,
    /// Total parity codewords
    pub ec_capacity: usize,
}

/// Decode an ECC200 symbol from an exact module grid, trying the four
/// rotations and the mirror image.
pub fn decode(modules: &BitMatrix) -> Result<DataMatrixDecoded, Failure> {
    if modules.width() == 0 || modules.height() == 0 {
        return Err(Failure::InvalidInput);
    }
    if symbol_for_size(modules.height(), modules.width()).is_none() {
        return Err(Failure::InvalidSize);
    }

    let mut best_failure = Failure::SamplingFailed;
    for candidate in orientation_candidates(modules) {
        match decode_oriented(&candidate) {
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

fn orientation_candidates(modules: &BitMatrix) -> Vec<BitMatrix> {
    let mut candidates = vec![
        modules.clone(),
        modules.rotate90(),
        modules.rotate180(),
        modules.rotate270(),
    ];
    let mirror = modules.mirror_x();
    candidates.push(mirror.rotate90());
    candidates.push(mirror.rotate180());
    candidates.push(mirror.rotate270());
    candidates.push(mirror);
    candidates
}

fn decode_oriented(modules: &BitMatrix) -> Result<DataMatrixDecoded, Failure> {
    let symbol = symbol_for_size(modules.height(), modules.width())
        .ok_or(Failure::InvalidSize)?;

    if !check_finder_border(modules, symbol) {
        return Err(Failure::SamplingFailed);
    }

    let data_region = extract_data_region(modules, symbol);
    let codewords = read_codewords(&data_region, symbol.codeword_count());
    let (data, errors_corrected) =
        correct_blocks(&codewords, symbol).ok_or(Failure::ErrorCorrectionFailed)?;

    let (bytes, text) = decode_stream(&data).ok_or(Failure::SegmentDecodeError)?;
    Ok(DataMatrixDecoded {
        rows: symbol.symbol_rows,
        text,
        bytes,
        errors_corrected,
        ec_capacity: symbol.ecc_codewords,
    })
}

/// Validate the solid L border (left column + bottom row dark) and the
/// alternating clock track (top row + right column) of every region.
fn check_finder_border(modules: &BitMatrix, symbol: &SymbolInfo) -> bool {
    let region_rows = symbol.region_total_rows();
    let region_cols = symbol.region_total_cols();
    let mut mismatches = 0usize;
    let mut total = 0usize;

    for ry in 0..symbol.region_rows {
        for rx in 0..symbol.region_cols {
            let top = ry * region_rows;
            let left = rx * region_cols;
            for i in 0..region_rows {
                total += 2;
                // Solid left column
                if !modules.get(left, top + i) {
                    mismatches += 1;
                }
                // Alternating right column: light at the top, dark at the
                // solid bottom row
                if modules.get(left + region_cols - 1, top + i) != (i % 2 == 1) {
                    mismatches += 1;
                }
            }
            for i in 0..region_cols {
                total += 2;
                // Solid bottom row
                if !modules.get(left + i, top + region_rows - 1) {
                    mismatches += 1;
                }
                // Alternating top row: dark on even columns
                if modules.get(left + i, top) != (i % 2 == 0) {
                    mismatches += 1;
                }
            }
        }
    }

    // Tolerate a few damaged border modules.
    mismatches * 20 <= total
}

fn extract_data_region(modules: &BitMatrix, symbol: &SymbolInfo) -> BitMatrix {
    let mut data_region = BitMatrix::new(symbol.data_region_cols(), symbol.data_region_rows());
    let region_total_rows = symbol.region_total_rows();
    let region_total_cols = symbol.region_total_cols();
    let region_data_rows = symbol.region_data_rows();
    let region_data_cols = symbol.region_data_cols();

    for region_row in 0..symbol.region_rows {
        for region_col in 0..symbol.region_cols {
            let start_row = region_row * region_total_rows;
            let start_col = region_col * region_total_cols;
            for y in 0..region_data_rows {
                for x in 0..region_data_cols {
                    let data_row = region_row * region_data_rows + y;
                    let data_col = region_col * region_data_cols + x;
                    data_region.set(
                        data_col,
                        data_row,
                        modules.get(start_col + 1 + x, start_row + 1 + y),
                    );
                }
            }
        }
    }
    data_region
}

// ---- codeword placement ------------------------------------------------

struct Placement {
    rows: usize,
    cols: usize,
    assigned: Vec<bool>,
}

impl Placement {
    fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            assigned: vec![false; rows * cols],
        }
    }

    fn wrap(&self, row: i32, col: i32) -> (usize, usize) {
        let mut row = row;
        let mut col = col;
        if row < 0 {
            row += self.rows as i32;
            col += 4 - ((self.rows as i32 + 4) % 8);
        }
        if col < 0 {
            col += self.cols as i32;
            row += 4 - ((self.cols as i32 + 4) % 8);
        }
        (row as usize, col as usize)
    }

    fn read_module(&mut self, matrix: &BitMatrix, row: i32, col: i32) -> bool {
        let (row, col) = self.wrap(row, col);
        let idx = row * self.cols + col;
        if self.assigned[idx] {
            return false;
        }
        self.assigned[idx] = true;
        matrix.get(col, row)
    }

    fn write_module(&mut self, matrix: &mut BitMatrix, row: i32, col: i32, value: bool) {
        let (row, col) = self.wrap(row, col);
        let idx = row * self.cols + col;
        if self.assigned[idx] {
            return;
        }
        self.assigned[idx] = true;
        matrix.set(col, row, value);
    }

    fn is_assigned(&self, row: usize, col: usize) -> bool {
        self.assigned[row * self.cols + col]
    }
}

/// Module offsets of the standard "utah" L-shape, bit 0 (MSB) first.
const UTAH: [(i32, i32); 8] = [
    (-2, -2),
    (-2, -1),
    (-1, -2),
    (-1, -1),
    (-1, 0),
    (0, -2),
    (0, -1),
    (0, 0),
];

fn corner_offsets(which: u8, rows: i32, cols: i32) -> [(i32, i32); 8] {
    match which {
        1 => [
            (rows - 1, 0),
            (rows - 1, 1),
            (rows - 1, 2),
            (0, cols - 2),
            (0, cols - 1),
            (1, cols - 1),
            (2, cols - 1),
            (3, cols - 1),
        ],
        2 => [
            (rows - 3, 0),
            (rows - 2, 0),
            (rows - 1, 0),
            (0, cols - 4),
            (0, cols - 3),
            (0, cols - 2),
            (0, cols - 1),
            (1, cols - 1),
        ],
        3 => [
            (rows - 3, 0),
            (rows - 2, 0),
            (rows - 1, 0),
            (0, cols - 2),
            (0, cols - 1),
            (1, cols - 1),
            (2, cols - 1),
            (3, cols - 1),
        ],
        _ => [
            (rows - 1, 0),
            (rows - 1, cols - 1),
            (0, cols - 3),
            (0, cols - 2),
            (0, cols - 1),
            (1, cols - 3),
            (1, cols - 2),
            (1, cols - 1),
        ],
    }
}

/// Read codewords out of a data region following the ECC200 placement.
pub fn read_codewords(data_region: &BitMatrix, codeword_count: usize) -> Vec<u16> {
    let rows = data_region.height();
    let cols = data_region.width();
    let mut placement = Placement::new(rows, cols);
    let mut codewords = Vec::with_capacity(codeword_count);

    place_walk(rows, cols, &mut placement, |placement, offsets| {
        if codewords.len() >= codeword_count {
            return;
        }
        let mut cw = 0u16;
        for &(r, c) in offsets {
            cw <<= 1;
            if placement.read_module(data_region, r, c) {
                cw |= 1;
            }
        }
        codewords.push(cw);
    });

    codewords
}

/// Place codewords into a data region following the ECC200 placement.
/// The inverse of [`read_codewords`]; exercised by grid builders in tests.
pub fn place_codewords(codewords: &[u16], rows: usize, cols: usize) -> BitMatrix {
    let mut matrix = BitMatrix::new(cols, rows);
    let mut placement = Placement::new(rows, cols);
    let mut index = 0usize;

    place_walk(rows, cols, &mut placement, |placement, offsets| {
        if index >= codewords.len() {
            return;
        }
        let cw = codewords[index];
        index += 1;
        for (bit, &(r, c)) in offsets.iter().enumerate() {
            placement.write_module(&mut matrix, r, c, (cw >> (7 - bit)) & 1 == 1);
        }
    });

    // Unfilled corner: fixed 2x2 checker in the bottom-right
    if !placement.is_assigned(rows - 1, cols - 1) {
        matrix.set(cols - 1, rows - 1, true);
        matrix.set(cols - 2, rows - 2, true);
    }
    matrix
}

/// The shared placement walk: corner cases plus alternating diagonals.
fn place_walk(
    rows: usize,
    cols: usize,
    placement: &mut Placement,
    mut visit: impl FnMut(&mut Placement, &[(i32, i32); 8]),
) {
    let rows_i = rows as i32;
    let cols_i = cols as i32;

    let mut row = 4i32;
    let mut col = 0i32;
    loop {
        if row == rows_i && col == 0 {
            visit(placement, &corner_offsets(1, rows_i, cols_i));
        }
        if row == rows_i - 2 && col == 0 && cols % 4 != 0 {
            visit(placement, &corner_offsets(2, rows_i, cols_i));
        }
        if row == rows_i - 2 && col == 0 && cols % 8 == 4 {
            visit(placement, &corner_offsets(3, rows_i, cols_i));
        }
        if row == rows_i + 4 && col == 2 && cols % 8 == 0 {
            visit(placement, &corner_offsets(4, rows_i, cols_i));
        }

        loop {
            if row < rows_i && col >= 0 && !placement.is_assigned(row as usize, col as usize) {
                let offsets: [(i32, i32); 8] =
                    std::array::from_fn(|i| (row + UTAH[i].0, col + UTAH[i].1));
                visit(placement, &offsets);
            }
            row -= 2;
            col += 2;
            if !(row >= 0 && col < cols_i) {
                break;
            }
        }
        row += 1;
        col += 3;

        loop {
            if row >= 0 && col < cols_i && !placement.is_assigned(row as usize, col as usize) {
                let offsets: [(i32, i32); 8] =
                    std::array::from_fn(|i| (row + UTAH[i].0, col + UTAH[i].1));
                visit(placement, &offsets);
            }
            row += 2;
            col -= 2;
            if !(row < rows_i && col >= 0) {
                break;
            }
        }
        row += 3;
        col += 1;

        if !(row < rows_i || col < cols_i) {
            break;
        }
    }
}

// ---- block correction --------------------------------------------------

fn correct_blocks(codewords: &[u16], symbol: &SymbolInfo) -> Option<(Vec<u8>, usize)> {
    let blocks = symbol.block_count();
    let max_data_block = *symbol.data_block_sizes.iter().max()?;

    let mut data_blocks: Vec<Vec<u16>> = symbol
        .data_block_sizes
        .iter()
        .map(|&len| Vec::with_capacity(len + symbol.ecc_block_size))
        .collect();

    let mut offset = 0usize;
    for i in 0..max_data_block {
        for (b, block) in data_blocks.iter_mut().enumerate() {
            if i >= symbol.data_block_sizes[b] {
                continue;
            }
            block.push(*codewords.get(offset)?);
            offset += 1;
        }
    }
    for _ in 0..symbol.ecc_block_size {
        for block in data_blocks.iter_mut() {
            block.push(*codewords.get(offset)?);
            offset += 1;
        }
    }

    let rs = ReedSolomon::new(data_matrix_field());
    let mut data = Vec::with_capacity(symbol.data_codewords);
    let mut errors_corrected = 0usize;
    for (b, block) in data_blocks.iter_mut().enumerate() {
        match rs.correct_in_place(block, symbol.ecc_block_size) {
            Some(count) => errors_corrected += count,
            None => {
                trace!("datamatrix: rs failed in block {b}");
                return None;
            }
        }
        data.extend(
            block[..symbol.data_block_sizes[b]]
                .iter()
                .map(|&w| w as u8),
        );
    }
    Some((data, errors_corrected))
}

// ---- encodation stream -------------------------------------------------

const C40_SHIFT2: &[u8] = b"!\"#$%&'()*+,-./:;<=>?@[\\]^_";

#[derive(Clone, Copy, PartialEq)]
enum Encodation {
    Ascii,
    C40,
    Text,
    X12,
    Edifact,
    Base256,
}

/// Decode the corrected data codewords into payload bytes and text.
pub fn decode_stream(data: &[u8]) -> Option<(Vec<u8>, String)> {
    let mut text = String::with_capacity(data.len());
    let mut mode = Encodation::Ascii;
    let mut index = 0usize;
    let mut upper_shift = false;
    let mut macro_trailer: Option<&'static str> = None;

    while index < data.len() {
        mode = match mode {
            Encodation::Ascii => {
                decode_ascii(data, &mut index, &mut text, &mut upper_shift, &mut macro_trailer)?
            }
            Encodation::C40 => decode_c40_text(data, &mut index, &mut text, false, &mut upper_shift),
            Encodation::Text => decode_c40_text(data, &mut index, &mut text, true, &mut upper_shift),
            Encodation::X12 => decode_x12(data, &mut index, &mut text),
            Encodation::Edifact => decode_edifact(data, &mut index, &mut text),
            Encodation::Base256 => {
                decode_base256(data, &mut index, &mut text);
                Encodation::Ascii
            }
        };
    }

    if let Some(trailer) = macro_trailer {
        text.push_str(trailer);
    }
    // Raw bytes mirror the text, Latin-1 where representable.
    let bytes = text
        .chars()
        .map(|c| if (c as u32) < 256 { c as u8 } else { b'?' })
        .collect();
    Some((bytes, text))
}

fn append_char(text: &mut String, c: char, upper_shift: &mut bool) {
    if *upper_shift {
        text.push(char::from_u32(c as u32 + 128).unwrap_or('?'));
        *upper_shift = false;
    } else {
        text.push(c);
    }
}

fn decode_ascii(
    data: &[u8],
    index: &mut usize,
    text: &mut String,
    upper_shift: &mut bool,
    macro_trailer: &mut Option<&'static str>,
) -> Option<Encodation> {
    let cw = data[*index];
    *index += 1;

    match cw {
        0 => return None, // reserved
        129 => {
            // Explicit padding: consume the rest
            *index = data.len();
            Some(Encodation::Ascii)
        }
        1..=128 => {
            append_char(text, (cw - 1) as char, upper_shift);
            Some(Encodation::Ascii)
        }
        130..=229 => {
            let val = cw - 130;
            append_char(text, (b'0' + val / 10) as char, upper_shift);
            append_char(text, (b'0' + val % 10) as char, upper_shift);
            Some(Encodation::Ascii)
        }
        230 => Some(Encodation::C40),
        231 => Some(Encodation::Base256),
        232 => {
            text.push('\u{1D}'); // FNC1 -> GS
            Some(Encodation::Ascii)
        }
        233 => {
            // Structured append header: skip the two parameter codewords
            if *index + 1 < data.len() {
                *index += 2;
            }
            Some(Encodation::Ascii)
        }
        234 => Some(Encodation::Ascii), // reader programming
        235 => {
            *upper_shift = true;
            Some(Encodation::Ascii)
        }
        236 => {
            text.push_str("[)>\u{1E}05\u{1D}");
            macro_trailer.get_or_insert("\u{1E}\u{4}");
            Some(Encodation::Ascii)
        }
        237 => {
            text.push_str("[)>\u{1E}06\u{1D}");
            macro_trailer.get_or_insert("\u{1E}\u{4}");
            Some(Encodation::Ascii)
        }
        238 => Some(Encodation::X12),
        239 => Some(Encodation::Text),
        240 => Some(Encodation::Edifact),
        241 => {
            // ECI: skip the assignment codeword, best effort
            if *index < data.len() {
                *index += 1;
            }
            Some(Encodation::Ascii)
        }
        _ => Some(Encodation::Ascii),
    }
}

fn parse_two_bytes(cw1: u8, cw2: u8) -> (usize, usize, usize) {
    let full = ((cw1 as usize) << 8) + cw2 as usize - 1;
    let c1 = full / 1600;
    let rem = full % 1600;
    (c1, rem / 40, rem % 40)
}

fn decode_c40_text(
    data: &[u8],
    index: &mut usize,
    text: &mut String,
    is_text: bool,
    upper_shift: &mut bool,
) -> Encodation {
    let mut shift = 0usize;
    while *index < data.len() {
        let cw1 = data[*index];
        if cw1 == 254 {
            *index += 1;
            return Encodation::Ascii;
        }
        if *index + 1 >= data.len() {
            *index = data.len();
            return Encodation::Ascii;
        }
        let cw2 = data[*index + 1];
        *index += 2;

        let (c1, c2, c3) = parse_two_bytes(cw1, cw2);
        for value in [c1, c2, c3] {
            decode_c40_value(value, text, is_text, &mut shift, upper_shift);
        }
    }
    Encodation::Ascii
}

fn decode_c40_value(
    value: usize,
    text: &mut String,
    is_text: bool,
    shift: &mut usize,
    upper_shift: &mut bool,
) {
    match *shift {
        0 => {
            if value <= 2 {
                *shift = value + 1;
            } else if value == 3 {
                append_char(text, ' ', upper_shift);
            } else if value <= 13 {
                append_char(text, (b'0' + (value as u8 - 4)) as char, upper_shift);
            } else if value <= 39 {
                let base = if is_text { b'a' } else { b'A' };
                append_char(text, (base + (value as u8 - 14)) as char, upper_shift);
            }
        }
        1 => {
            append_char(text, value as u8 as char, upper_shift);
            *shift = 0;
        }
        2 => {
            if value < C40_SHIFT2.len() {
                append_char(text, C40_SHIFT2[value] as char, upper_shift);
            } else if value == 27 {
                text.push('\u{1D}'); // FNC1
            } else if value == 30 {
                *upper_shift = true;
            }
            *shift = 0;
        }
        _ => {
            // Shift 3: lowercase set (or uppercase for Text mode)
            let c = if is_text {
                match value {
                    0 => '`',
                    1..=26 => (b'A' + value as u8 - 1) as char,
                    27..=31 => (b'{' + value as u8 - 27) as char,
                    _ => '?',
                }
            } else {
                match value {
                    0 => '`',
                    1..=26 => (b'a' + value as u8 - 1) as char,
                    27..=31 => (b'{' + value as u8 - 27) as char,
                    _ => '?',
                }
            };
            append_char(text, c, upper_shift);
            *shift = 0;
        }
    }
}

fn decode_x12(data: &[u8], index: &mut usize, text: &mut String) -> Encodation {
    while *index < data.len() {
        let cw1 = data[*index];
        if cw1 == 254 {
            *index += 1;
            return Encodation::Ascii;
        }
        if *index + 1 >= data.len() {
            *index = data.len();
            return Encodation::Ascii;
        }
        let cw2 = data[*index + 1];
        *index += 2;

        let (c1, c2, c3) = parse_two_bytes(cw1, cw2);
        for value in [c1, c2, c3] {
            match value {
                0 => text.push('\r'),
                1 => text.push('*'),
                2 => text.push('>'),
                3 => text.push(' '),
                4..=13 => text.push((b'0' + value as u8 - 4) as char),
                14..=39 => text.push((b'A' + value as u8 - 14) as char),
                _ => {}
            }
        }
    }
    Encodation::Ascii
}

fn decode_edifact(data: &[u8], index: &mut usize, text: &mut String) -> Encodation {
    while *index + 2 < data.len() {
        let bits = ((data[*index] as u32) << 16)
            | ((data[*index + 1] as u32) << 8)
            | data[*index + 2] as u32;
        *index += 3;

        for i in 0..4 {
            let value = (bits >> (18 - 6 * i)) & 0x3F;
            if value == 0x1F {
                return Encodation::Ascii;
            }
            text.push((value as u8 + 32) as char);
        }
    }
    *index = data.len();
    Encodation::Ascii
}

fn unrandomize_255(value: u8, position: usize) -> u8 {
    let pseudo = ((149 * position) % 255) + 1;
    let temp = value as i32 - pseudo as i32;
    if temp < 0 { (temp + 256) as u8 } else { temp as u8 }
}

fn decode_base256(data: &[u8], index: &mut usize, text: &mut String) {
    if *index >= data.len() {
        return;
    }
    let len_codeword = unrandomize_255(data[*index], *index + 1) as usize;
    *index += 1;
    let length = if len_codeword >= 250 {
        if *index >= data.len() {
            return;
        }
        let len2 = unrandomize_255(data[*index], *index + 1) as usize;
        *index += 1;
        (len_codeword - 249) * 250 + len2
    } else {
        len_codeword
    };

    let mut raw = Vec::with_capacity(length);
    for _ in 0..length {
        if *index >= data.len() {
            break;
        }
        raw.push(unrandomize_255(data[*index], *index + 1));
        *index += 1;
    }
    match std::str::from_utf8(&raw) {
        Ok(s) => text.push_str(s),
        Err(_) => text.extend(raw.iter().map(|&b| b as char)),
    }
}
