//! PDF417 high-level bitstream parsing: Text, Byte and Numeric compaction.

const TEXT_COMPACTION_LATCH: u16 = 900;
const BYTE_COMPACTION_LATCH: u16 = 901;
const NUMERIC_COMPACTION_LATCH: u16 = 902;
const BYTE_COMPACTION_LATCH_6: u16 = 924;
const MODE_SHIFT_TO_BYTE: u16 = 913;

const PL: u16 = 25;
const LL: u16 = 27;
const AS: u16 = 27;
const ML: u16 = 28;
const AL: u16 = 28;
const PS: u16 = 29;
const PAL: u16 = 29;

const PUNCT_CHARS: &[u8] = b";<>@[\\]_`~!\r\t,:\n-.$/\"|*()?{}'";
const MIXED_CHARS: &[u8] = b"0123456789&\r\t,:#-.$/+%*=^";

#[derive(Clone, Copy, PartialEq)]
enum TextMode {
    Alpha,
    Lower,
    Mixed,
    Punct,
    AlphaShift,
    PunctShift,
}

/// Decode the data codewords (length descriptor removed) into text.
pub fn decode(codewords: &[u16]) -> Option<String> {
    let mut out = String::with_capacity(codewords.len() * 2);
    let mut index = 0usize;

    while index < codewords.len() {
        let code = codewords[index];
        index += 1;
        match code {
            TEXT_COMPACTION_LATCH => {
                index = decode_text_compaction(codewords, index, &mut out);
            }
            BYTE_COMPACTION_LATCH | BYTE_COMPACTION_LATCH_6 => {
                index = decode_byte_compaction(code, codewords, index, &mut out);
            }
            NUMERIC_COMPACTION_LATCH => {
                index = decode_numeric_compaction(codewords, index, &mut out)?;
            }
            MODE_SHIFT_TO_BYTE => {
                if index >= codewords.len() {
                    break;
                }
                out.push(codewords[index] as u8 as char);
                index += 1;
            }
            _ if code < TEXT_COMPACTION_LATCH => {
                // Implicit text compaction from the start of the stream
                index = decode_text_compaction(codewords, index - 1, &mut out);
            }
            _ => return None,
        }
    }

    Some(out)
}

fn decode_text_compaction(codewords: &[u16], mut index: usize, out: &mut String) -> usize {
    let mut text_values: Vec<u16> = Vec::new();
    let mut byte_values: Vec<u16> = Vec::new();

    while index < codewords.len() {
        let code = codewords[index];
        index += 1;
        if code < TEXT_COMPACTION_LATCH {
            text_values.push(code / 30);
            text_values.push(code % 30);
            continue;
        }
        if code == TEXT_COMPACTION_LATCH {
            text_values.push(TEXT_COMPACTION_LATCH);
            continue;
        }
        if code == MODE_SHIFT_TO_BYTE {
            if index >= codewords.len() {
                break;
            }
            text_values.push(MODE_SHIFT_TO_BYTE);
            byte_values.push(codewords[index]);
            index += 1;
            continue;
        }
        // Mode switch: hand the codeword back
        index -= 1;
        break;
    }

    decode_text_values(&text_values, &byte_values, out);
    index
}

fn decode_text_values(text_values: &[u16], byte_values: &[u16], out: &mut String) {
    let mut sub_mode = TextMode::Alpha;
    let mut prior_to_shift = TextMode::Alpha;
    let mut byte_index = 0usize;

    for &value in text_values {
        let mut ch: Option<char> = None;
        match sub_mode {
            TextMode::Alpha => {
                if value < 26 {
                    ch = Some((b'A' + value as u8) as char);
                } else {
                    match value {
                        26 => ch = Some(' '),
                        LL => sub_mode = TextMode::Lower,
                        ML => sub_mode = TextMode::Mixed,
                        PS => {
                            prior_to_shift = sub_mode;
                            sub_mode = TextMode::PunctShift;
                        }
                        MODE_SHIFT_TO_BYTE => {
                            if byte_index < byte_values.len() {
                                out.push(byte_values[byte_index] as u8 as char);
                                byte_index += 1;
                            }
                        }
                        TEXT_COMPACTION_LATCH => sub_mode = TextMode::Alpha,
                        _ => {}
                    }
                }
            }
            TextMode::Lower => {
                if value < 26 {
                    ch = Some((b'a' + value as u8) as char);
                } else {
                    match value {
                        26 => ch = Some(' '),
                        AS => {
                            prior_to_shift = sub_mode;
                            sub_mode = TextMode::AlphaShift;
                        }
                        ML => sub_mode = TextMode::Mixed,
                        PS => {
                            prior_to_shift = sub_mode;
                            sub_mode = TextMode::PunctShift;
                        }
                        MODE_SHIFT_TO_BYTE => {
                            if byte_index < byte_values.len() {
                                out.push(byte_values[byte_index] as u8 as char);
                                byte_index += 1;
                            }
                        }
                        TEXT_COMPACTION_LATCH => sub_mode = TextMode::Alpha,
                        _ => {}
                    }
                }
            }
            TextMode::Mixed => {
                if value < PL {
                    ch = Some(MIXED_CHARS[value as usize] as char);
                } else {
                    match value {
                        PL => sub_mode = TextMode::Punct,
                        26 => ch = Some(' '),
                        LL => sub_mode = TextMode::Lower,
                        AL | TEXT_COMPACTION_LATCH => sub_mode = TextMode::Alpha,
                        PS => {
                            prior_to_shift = sub_mode;
                            sub_mode = TextMode::PunctShift;
                        }
                        MODE_SHIFT_TO_BYTE => {
                            if byte_index < byte_values.len() {
                                out.push(byte_values[byte_index] as u8 as char);
                                byte_index += 1;
                            }
                        }
                        _ => {}
                    }
                }
            }
            TextMode::Punct => {
                if value < PAL {
                    ch = Some(PUNCT_CHARS[value as usize] as char);
                } else {
                    match value {
                        PAL | TEXT_COMPACTION_LATCH => sub_mode = TextMode::Alpha,
                        MODE_SHIFT_TO_BYTE => {
                            if byte_index < byte_values.len() {
                                out.push(byte_values[byte_index] as u8 as char);
                                byte_index += 1;
                            }
                        }
                        _ => {}
                    }
                }
            }
            TextMode::AlphaShift => {
                sub_mode = prior_to_shift;
                if value < 26 {
                    ch = Some((b'A' + value as u8) as char);
                } else if value == 26 {
                    ch = Some(' ');
                } else if value == TEXT_COMPACTION_LATCH {
                    sub_mode = TextMode::Alpha;
                }
            }
            TextMode::PunctShift => {
                sub_mode = prior_to_shift;
                if value < PAL {
                    ch = Some(PUNCT_CHARS[value as usize] as char);
                } else {
                    match value {
                        PAL | TEXT_COMPACTION_LATCH => sub_mode = TextMode::Alpha,
                        MODE_SHIFT_TO_BYTE => {
                            if byte_index < byte_values.len() {
                                out.push(byte_values[byte_index] as u8 as char);
                                byte_index += 1;
                            }
                        }
                        _ => {}
                    }
                }
            }
        }

        if let Some(c) = ch {
            out.push(c);
        }
    }
}

fn decode_byte_compaction(mode: u16, codewords: &[u16], mut index: usize, out: &mut String) -> usize {
    while index < codewords.len() {
        if codewords[index] >= TEXT_COMPACTION_LATCH {
            break;
        }

        // Groups of five codewords expand to six bytes; a trailing short
        // group is copied through directly.
        let mut value = 0u64;
        let mut count = 0usize;
        let group_start = index;
        while count < 5 && index < codewords.len() && codewords[index] < TEXT_COMPACTION_LATCH {
            value = 900 * value + codewords[index] as u64;
            index += 1;
            count += 1;
        }

        let full_group = count == 5
            && (mode == BYTE_COMPACTION_LATCH_6
                || (index < codewords.len() && codewords[index] < TEXT_COMPACTION_LATCH));
        if full_group {
            for i in 0..6 {
                out.push(((value >> (8 * (5 - i))) & 0xFF) as u8 as char);
            }
        } else {
            // Not a full 6-byte group: raw byte per codeword
            index = group_start;
            while index < codewords.len() && codewords[index] < TEXT_COMPACTION_LATCH {
                out.push(codewords[index] as u8 as char);
                index += 1;
            }
        }
    }
    index
}

fn decode_numeric_compaction(
    codewords: &[u16],
    mut index: usize,
    out: &mut String,
) -> Option<usize> {
    let mut group: Vec<u16> = Vec::with_capacity(15);

    while index < codewords.len() {
        let code = codewords[index];
        index += 1;
        let mut end = index == codewords.len();

        if code < TEXT_COMPACTION_LATCH {
            group.push(code);
        } else {
            index -= 1;
            end = true;
        }

        if (group.len() == 15 || end) && !group.is_empty() {
            out.push_str(&decode_base900(&group)?);
            group.clear();
        }
        if end {
            break;
        }
    }
    Some(index)
}

/// Convert a base-900 group to its decimal digits; the encoded value
/// carries a leading 1 that is stripped.
fn decode_base900(group: &[u16]) -> Option<String> {
    // Accumulate into little-endian decimal digits.
    let mut digits = vec![0u8];
    for &cw in group {
        // digits = digits * 900 + cw
        let mut carry = cw as u32;
        for d in digits.iter_mut() {
            let v = *d as u32 * 900 + carry;
            *d = (v % 10) as u8;
            carry = v / 10;
        }
        while carry > 0 {
            digits.push((carry % 10) as u8);
            carry /= 10;
        }
    }

    // Strip the leading sentinel digit 1.
    let last = digits.pop()?;
    if last != 1 {
        return None;
    }
    Some(digits.iter().rev().map(|&d| (b'0' + d) as char).collect())
}
