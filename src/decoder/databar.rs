//! GS1 DataBar-14 decoding (truncated, omnidirectional, stacked).
//!
//! A symbol is 46 elements: guards, two finder patterns and four (16,4)
//! data characters whose values are recovered with the modular
//! combinatorial decomposition and validated by the mod-79 checksum carried
//! in the finder patterns.

use crate::models::{BitMatrix, Failure};

/// Characteristics of the nine (16,4) character groups: odd/even module
/// totals, widest element widths, group value offsets and sizes.
static MODULES_ODD: [i32; 9] = [12, 10, 8, 6, 4, 5, 7, 9, 11];
static MODULES_EVEN: [i32; 9] = [4, 6, 8, 10, 12, 10, 8, 6, 4];
static WIDEST_ODD: [i32; 9] = [8, 6, 4, 3, 1, 2, 4, 6, 8];
static WIDEST_EVEN: [i32; 9] = [1, 3, 5, 6, 8, 7, 5, 3, 1];
static T_TABLE: [i32; 9] = [1, 10, 34, 70, 126, 4, 20, 48, 81];
static G_SUM_TABLE: [i32; 9] = [0, 161, 961, 2015, 2715, 0, 336, 1036, 1516];

#[rustfmt::skip]
static CHECKSUM_WEIGHT: [i32; 32] = [
    1, 3, 9, 27, 2, 6, 18, 54, 4, 12, 36, 29, 8, 24, 72, 58,
    16, 48, 65, 37, 32, 17, 51, 74, 64, 34, 23, 69, 49, 68, 46, 59,
];

#[rustfmt::skip]
static FINDER_PATTERN: [i32; 45] = [
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

fn group_min(group: usize) -> i32 {
    [0, 161, 961, 2015, 2715, 0, 336, 1036, 1516][group]
}

fn group_max(group: usize) -> i32 {
    [160, 960, 2014, 2714, 2840, 335, 1035, 1515, 1596][group]
}

fn combinations(n: i32, r: i32) -> i32 {
    let (min_denom, max_denom) = if n - r > r { (r, n - r) } else { (n - r, r) };

    let mut val = 1i64;
    let mut j = 1i64;
    let mut i = n as i64;
    while i > max_denom as i64 {
        val *= i;
        if j <= min_denom as i64 {
            val /= j;
            j += 1;
        }
        i -= 1;
    }
    while j <= min_denom as i64 {
        val /= j;
        j += 1;
    }
    val as i32
}

/// Element widths for a character value (encode direction; exercised by
/// symbol builders in tests).
pub fn get_widths(mut value: i32, mut n: i32, elements: i32, max_width: i32, no_narrow: i32) -> Vec<i32> {
    let mut widths = vec![0i32; elements as usize];
    let mut narrow_mask = 0i32;

    let mut bar = 0usize;
    while (bar as i32) < elements - 1 {
        let mut elm_width = 1i32;
        let mut mask = narrow_mask | (1 << bar);
        loop {
            let mut sub_val = combinations(n - elm_width - 1, elements - bar as i32 - 2);
            if no_narrow == 0
                && mask == 0
                && n - elm_width - (elements - bar as i32 - 1) >= elements - bar as i32 - 1
            {
                sub_val -= combinations(n - elm_width - (elements - bar as i32), elements - bar as i32 - 2);
            }
            if elements - bar as i32 - 1 > 1 {
                let mut less_val = 0;
                let mut mxw_element = n - elm_width - (elements - bar as i32 - 2);
                while mxw_element > max_width {
                    less_val += combinations(n - elm_width - mxw_element - 1, elements - bar as i32 - 3);
                    mxw_element -= 1;
                }
                sub_val -= less_val * (elements - 1 - bar as i32);
            } else if n - elm_width > max_width {
                sub_val -= 1;
            }

            value -= sub_val;
            if value < 0 {
                value += sub_val;
                break;
            }
            elm_width += 1;
            mask &= !(1 << bar);
        }
        widths[bar] = elm_width;
        n -= elm_width;
        narrow_mask = mask;
        bar += 1;
    }

    widths[bar] = n;
    widths
}

/// Character value from element widths (decode direction). Returns -1 for
/// an impossible width sequence.
pub fn get_value(widths: &[i32], n: i32, elements: i32, max_width: i32, no_narrow: i32) -> i32 {
    if widths.len() < elements as usize {
        return -1;
    }
    let mut total = 0;
    for &w in widths.iter().take(elements as usize) {
        if w < 1 || w > max_width {
            return -1;
        }
        total += w;
    }
    if total != n {
        return -1;
    }

    let mut value = 0i32;
    let mut narrow_mask = 0i32;
    let mut remaining = n;

    for bar in 0..(elements as usize - 1) {
        let current = widths[bar];
        for elm_width in 1..current {
            let mask = if elm_width == 1 {
                narrow_mask | (1 << bar)
            } else {
                narrow_mask
            };
            let mut sub_val = combinations(remaining - elm_width - 1, elements - bar as i32 - 2);
            if no_narrow == 0
                && mask == 0
                && remaining - elm_width - (elements - bar as i32 - 1) >= elements - bar as i32 - 1
            {
                sub_val -= combinations(
                    remaining - elm_width - (elements - bar as i32),
                    elements - bar as i32 - 2,
                );
            }
            if elements - bar as i32 - 1 > 1 {
                let mut less_val = 0;
                let mut mxw_element = remaining - elm_width - (elements - bar as i32 - 2);
                while mxw_element > max_width {
                    less_val += combinations(remaining - elm_width - mxw_element - 1, elements - bar as i32 - 3);
                    mxw_element -= 1;
                }
                sub_val -= less_val * (elements - 1 - bar as i32);
            } else if remaining - elm_width > max_width {
                sub_val -= 1;
            }
            value += sub_val;
        }

        remaining -= current;
        if current == 1 {
            narrow_mask |= 1 << bar;
        } else {
            narrow_mask &= !(1 << bar);
        }
    }

    value
}

/// A decoded DataBar-14 symbol: the 13 digits plus implied check digit
/// position is the caller's concern; we return the full 13-digit value.
pub struct DataBarDecoded {
    /// The 13-digit item number
    pub text: String,
    /// ASCII digits of the item number
    pub bytes: Vec<u8>,
}

/// Decode from a single row of modules (truncated/limited-height form).
pub fn decode_row(modules: &[bool]) -> Result<DataBarDecoded, Failure> {
    if modules.is_empty() {
        return Err(Failure::InvalidInput);
    }
    let mut widths = run_lengths(modules);
    // A row beginning with a bar is missing its leading space guard.
    if widths.len() == 45 && modules[0] {
        widths.insert(0, 1);
    }
    if widths.len() != 46 {
        return Err(Failure::InvalidSize);
    }
    decode_widths(&widths)
}

/// Decode the omnidirectional (5-row) or stacked (3-row) matrix forms,
/// where the top and bottom rows carry the two symbol halves.
pub fn decode_matrix(modules: &BitMatrix) -> Result<DataBarDecoded, Failure> {
    if modules.width() == 0 || modules.height() == 0 {
        return Err(Failure::InvalidInput);
    }
    let (top_row, bottom_row) = match modules.height() {
        1 => {
            let row = extract_row(modules, 0);
            return decode_row(&row);
        }
        3 => (0usize, 2usize),
        5 => (0usize, 4usize),
        _ => return Err(Failure::InvalidSize),
    };

    let top = run_lengths(&extract_row(modules, top_row));
    let bottom = run_lengths(&extract_row(modules, bottom_row));
    if top.len() != 25 || bottom.len() != 25 {
        return Err(Failure::SamplingFailed);
    }

    // Top row: guard + left half (23 runs); bottom row: right half + guard.
    let mut widths = [0i32; 46];
    widths[..23].copy_from_slice(&top[..23]);
    widths[23..].copy_from_slice(&bottom[2..25]);
    decode_widths(&widths)
}

fn decode_widths(total_widths: &[i32]) -> Result<DataBarDecoded, Failure> {
    if total_widths.len() != 46 {
        return Err(Failure::InvalidSize);
    }
    if total_widths[0] != 1
        || total_widths[1] != 1
        || total_widths[44] != 1
        || total_widths[45] != 1
    {
        return Err(Failure::LocatorNotFound);
    }

    let (c_left, c_right) = find_finder(total_widths).ok_or(Failure::LocatorNotFound)?;

    // Interleave the 8 element columns of the four data characters.
    let mut data_widths = [[0i32; 4]; 8];
    for i in 0..8 {
        data_widths[i][0] = total_widths[i + 2];
        data_widths[i][1] = total_widths[15 + (7 - i)];
        data_widths[i][3] = total_widths[i + 23];
        data_widths[i][2] = total_widths[36 + (7 - i)];
    }

    let mut checksum = 0i32;
    for i in 0..8 {
        checksum += CHECKSUM_WEIGHT[i] * data_widths[i][0];
        checksum += CHECKSUM_WEIGHT[i + 8] * data_widths[i][1];
        checksum += CHECKSUM_WEIGHT[i + 16] * data_widths[i][2];
        checksum += CHECKSUM_WEIGHT[i + 24] * data_widths[i][3];
    }
    checksum %= 79;
    if checksum >= 8 {
        checksum += 1;
    }
    if checksum >= 72 {
        checksum += 1;
    }
    if checksum / 9 != c_left || checksum % 9 != c_right {
        return Err(Failure::ErrorCorrectionFailed);
    }

    let mut data_characters = [0i32; 4];
    for (index, slot) in data_characters.iter_mut().enumerate() {
        *slot = decode_data_character(index, &data_widths).ok_or(Failure::SegmentDecodeError)?;
    }

    let left_reg = data_characters[0] as i64 * 1597 + data_characters[1] as i64;
    let right_reg = data_characters[2] as i64 * 1597 + data_characters[3] as i64;
    let accum = left_reg * 4_537_077 + right_reg;
    if !(0..=9_999_999_999_999).contains(&accum) {
        return Err(Failure::SegmentDecodeError);
    }

    let text = format!("{accum:013}");
    let bytes = text.clone().into_bytes();
    Ok(DataBarDecoded { text, bytes })
}

fn decode_data_character(index: usize, data_widths: &[[i32; 4]; 8]) -> Option<i32> {
    let odd = [
        data_widths[0][index],
        data_widths[2][index],
        data_widths[4][index],
        data_widths[6][index],
    ];
    let even = [
        data_widths[1][index],
        data_widths[3][index],
        data_widths[5][index],
        data_widths[7][index],
    ];

    // Outer characters (16 modules) use groups 0-4; inner characters
    // (15 modules) use groups 5-8 with the roles of odd/even swapped.
    if index == 0 || index == 2 {
        for group in 0..=4usize {
            let v_odd = get_value(&odd, MODULES_ODD[group], 4, WIDEST_ODD[group], 1);
            let v_even = get_value(&even, MODULES_EVEN[group], 4, WIDEST_EVEN[group], 0);
            if v_odd < 0 || v_even < 0 {
                continue;
            }
            let candidate = v_odd * T_TABLE[group] + v_even + G_SUM_TABLE[group];
            if candidate >= group_min(group) && candidate <= group_max(group) {
                return Some(candidate);
            }
        }
    } else {
        for group in 5..=8usize {
            let v_odd = get_value(&odd, MODULES_ODD[group], 4, WIDEST_ODD[group], 0);
            let v_even = get_value(&even, MODULES_EVEN[group], 4, WIDEST_EVEN[group], 1);
            if v_odd < 0 || v_even < 0 {
                continue;
            }
            let candidate = v_even * T_TABLE[group] + v_odd + G_SUM_TABLE[group];
            if candidate >= group_min(group) && candidate <= group_max(group) {
                return Some(candidate);
            }
        }
    }
    None
}

fn find_finder(total_widths: &[i32]) -> Option<(i32, i32)> {
    let mut c_left = None;
    let mut c_right = None;
    for c in 0..9usize {
        if (0..5).all(|i| total_widths[10 + i] == FINDER_PATTERN[5 * c + i]) {
            c_left = Some(c as i32);
            break;
        }
    }
    for c in 0..9usize {
        if (0..5).all(|i| total_widths[31 + i] == FINDER_PATTERN[5 * c + (4 - i)]) {
            c_right = Some(c as i32);
            break;
        }
    }
    Some((c_left?, c_right?))
}

fn extract_row(modules: &BitMatrix, row: usize) -> Vec<bool> {
    (0..modules.width()).map(|x| modules.get(x, row)).collect()
}

fn run_lengths(row: &[bool]) -> Vec<i32> {
    let mut runs = Vec::with_capacity(row.len() / 2);
    let mut current = row[0];
    let mut count = 1i32;
    for &m in &row[1..] {
        if m == current {
            count += 1;
        } else {
            runs.push(count);
            current = m;
            count = 1;
        }
    }
    runs.push(count);
    runs
}
