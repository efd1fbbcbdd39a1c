//! Round-trip tests for the non-QR symbologies, decoded from exact grids.

mod common;

use common::{
    data_matrix_stream, data_matrix_symbol_from_stream, databar_row, databar_stacked,
    databar_widths, encode_aztec, encode_data_matrix, encode_micro_qr, encode_pdf417,
    pdf417_stream, pdf417_symbol_from_stream,
};
use glyphscan::decoder::{databar, datamatrix, pdf417};
use glyphscan::{DecodeOptions, EcLevel, Failure, Symbology, decode_matrix};

// ---- Data Matrix -------------------------------------------------------

/// Scenario: "HELLO-123" as a Data Matrix at default settings.
#[test]
fn test_data_matrix_hello_scenario() {
    let modules = encode_data_matrix("HELLO-123");
    let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
    let symbol = symbol.unwrap_or_else(|| panic!("failed: {:?}", info.failure));
    assert_eq!(symbol.symbology, Symbology::DataMatrix);
    assert_eq!(symbol.text, "HELLO-123");
    assert!(info.confidence > 0.5);
}

#[test]
fn test_data_matrix_rotations_and_mirror() {
    let modules = encode_data_matrix("ORIENT");
    for variant in [
        modules.rotate90(),
        modules.rotate180(),
        modules.rotate270(),
        modules.mirror_x(),
    ] {
        let decoded = datamatrix::decode(&variant).expect("orientation variant");
        assert_eq!(decoded.text, "ORIENT");
    }
}

#[test]
fn test_data_matrix_sizes() {
    // Payload lengths that land in different square symbols
    for text in ["A", "DATAMATRIX", "THE QUICK BROWN FOX JUMPS OVER THE LAZY DOG 0123456789"] {
        let modules = encode_data_matrix(text);
        let decoded = datamatrix::decode(&modules).expect("roundtrip");
        assert_eq!(decoded.text, text);
    }
}

#[test]
fn test_data_matrix_correction_capacity() {
    // 14x14: 8 data + 10 parity codewords, 5 correctable errors.
    let symbol = datamatrix::symbol_for_size(14, 14).unwrap();
    let data: Vec<u16> = [b'C', b'O', b'R', b'R', b'E', b'C', b'T']
        .iter()
        .map(|&b| b as u16 + 1)
        .chain([129u16])
        .collect();
    let stream = data_matrix_stream(&data, symbol);

    // Within capacity
    let mut corrupted = stream.clone();
    for i in [0usize, 4, 8, 12, 16] {
        corrupted[i] ^= 0x55;
    }
    let modules = data_matrix_symbol_from_stream(&corrupted, symbol);
    let decoded = datamatrix::decode(&modules).expect("5 errors within capacity");
    assert_eq!(decoded.text, "CORRECT");
    assert_eq!(decoded.errors_corrected, 5);

    // Beyond capacity
    let mut broken = stream.clone();
    for i in [0usize, 3, 6, 9, 12, 15] {
        broken[i] ^= 0x55;
    }
    let modules = data_matrix_symbol_from_stream(&broken, symbol);
    assert!(matches!(
        datamatrix::decode(&modules),
        Err(Failure::ErrorCorrectionFailed)
    ));
}

#[test]
fn test_data_matrix_digit_pairs() {
    let modules = encode_data_matrix("0049123456789");
    let decoded = datamatrix::decode(&modules).expect("numeric payload");
    assert_eq!(decoded.text, "0049123456789");
}

// ---- Micro QR ----------------------------------------------------------

#[test]
fn test_micro_qr_numeric_roundtrip() {
    for mask in 0..4u8 {
        let modules = encode_micro_qr("12345", 2, EcLevel::L, mask);
        let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
        let symbol =
            symbol.unwrap_or_else(|| panic!("mask {mask} failed: {:?}", info.failure));
        assert_eq!(symbol.symbology, Symbology::MicroQr);
        assert_eq!(symbol.version, 2);
        assert_eq!(symbol.mask, Some(mask));
        assert_eq!(symbol.text, "12345");
    }
}

#[test]
fn test_micro_qr_alphanumeric_roundtrip() {
    let modules = encode_micro_qr("MICRO-4", 3, EcLevel::L, 1);
    let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
    let symbol = symbol.unwrap_or_else(|| panic!("failed: {:?}", info.failure));
    assert_eq!(symbol.text, "MICRO-4");
    assert_eq!(symbol.version, 3);
}

#[test]
fn test_micro_qr_m4_levels() {
    for ec_level in [EcLevel::L, EcLevel::M, EcLevel::Q] {
        let modules = encode_micro_qr("998877665544", 4, ec_level, 2);
        let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
        let symbol =
            symbol.unwrap_or_else(|| panic!("{ec_level:?} failed: {:?}", info.failure));
        assert_eq!(symbol.ec_level, Some(ec_level));
        assert_eq!(symbol.text, "998877665544");
    }
}

// ---- Aztec -------------------------------------------------------------

#[test]
fn test_aztec_roundtrip() {
    for text in ["AZTEC", "RING 42", "COMPACT SYMBOL 2024"] {
        let modules = encode_aztec(text);
        let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
        let symbol = symbol.unwrap_or_else(|| panic!("{text:?} failed: {:?}", info.failure));
        assert_eq!(symbol.symbology, Symbology::Aztec);
        assert_eq!(symbol.text, text);
    }
}

#[test]
fn test_aztec_punctuation() {
    let modules = encode_aztec("A-B.C");
    let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
    let symbol = symbol.unwrap_or_else(|| panic!("failed: {:?}", info.failure));
    assert_eq!(symbol.text, "A-B.C");
}

#[test]
fn test_aztec_rotation() {
    let modules = encode_aztec("TURNED");
    for variant in [modules.rotate90(), modules.rotate180(), modules.rotate270()] {
        let (symbol, info) = decode_matrix(&variant, &DecodeOptions::default());
        let symbol = symbol.unwrap_or_else(|| panic!("failed: {:?}", info.failure));
        assert_eq!(symbol.text, "TURNED");
    }
}

#[test]
fn test_aztec_tolerates_data_damage() {
    // Layer-1 compact holds 17 six-bit words; with a short payload most
    // are parity, so a couple of flipped modules must correct cleanly.
    let mut modules = encode_aztec("OK");
    modules.toggle(0, 0);
    modules.toggle(2, 1);
    let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
    let symbol = symbol.unwrap_or_else(|| panic!("failed: {:?}", info.failure));
    assert_eq!(symbol.text, "OK");
    assert!(info.confidence > 0.0);
}

// ---- PDF417 ------------------------------------------------------------

#[test]
fn test_pdf417_roundtrip() {
    for text in ["PDF417", "Mixed Case payload 123", "abcdefghijklmnopqrstuvwxyz"] {
        let modules = encode_pdf417(text, 2, 2);
        let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
        let symbol = symbol.unwrap_or_else(|| panic!("{text:?} failed: {:?}", info.failure));
        assert_eq!(symbol.symbology, Symbology::Pdf417);
        assert_eq!(symbol.text, text);
    }
}

#[test]
fn test_pdf417_correction_within_capacity() {
    // Level 2: 8 parity codewords, 4 correctable errors.
    let data: Vec<i32> = vec![901, 72, 101, 108, 108, 111];
    let (stream, rows) = pdf417_stream(&data, 2, 2);
    let mut corrupted = stream.clone();
    corrupted[1] = (corrupted[1] + 7) % 929;
    corrupted[4] = (corrupted[4] + 100) % 929;
    let modules = pdf417_symbol_from_stream(&corrupted, 2, rows, 2);
    let decoded = pdf417::decode(&modules).expect("2 errors within capacity");
    assert_eq!(decoded.text, "Hello");
    assert_eq!(decoded.errors_corrected, 2);
}

/// Scenario: corrupting past the correction capacity must yield
/// ErrorCorrectionFailed, never a garbled text result.
#[test]
fn test_pdf417_correction_beyond_capacity() {
    let data: Vec<i32> = vec![901, 72, 101, 108, 108, 111];
    let (stream, rows) = pdf417_stream(&data, 2, 1); // 4 parity, 2 correctable
    let mut broken = stream.clone();
    broken[1] = (broken[1] + 11) % 929;
    broken[2] = (broken[2] + 23) % 929;
    broken[3] = (broken[3] + 47) % 929;
    let modules = pdf417_symbol_from_stream(&broken, 2, rows, 1);
    assert!(matches!(
        pdf417::decode(&modules),
        Err(Failure::ErrorCorrectionFailed)
    ));
}

#[test]
fn test_pdf417_ec_levels() {
    for level in [0u8, 1, 3, 4] {
        let modules = encode_pdf417("LEVELS", 3, level);
        let decoded = pdf417::decode(&modules).expect("roundtrip");
        assert_eq!(decoded.text, "LEVELS");
        assert_eq!(decoded.ec_level, level);
    }
}

// ---- DataBar -----------------------------------------------------------

#[test]
fn test_databar_row_roundtrip() {
    for value in [1u64, 4_512_345_678_906, 9_999_999_999_999] {
        let widths = databar_widths(value);
        let row = databar_row(&widths);
        let decoded = databar::decode_row(&row).expect("roundtrip");
        assert_eq!(decoded.text, format!("{value:013}"));
    }
}

#[test]
fn test_databar_stacked_roundtrip() {
    let value = 614_141_234_567u64;
    let modules = databar_stacked(value);
    let (symbol, info) = decode_matrix(&modules, &DecodeOptions::default());
    let symbol = symbol.unwrap_or_else(|| panic!("failed: {:?}", info.failure));
    assert_eq!(symbol.symbology, Symbology::DataBar);
    assert_eq!(symbol.text, format!("{value:013}"));
}

#[test]
fn test_databar_checksum_rejects_tampering() {
    let mut widths = databar_widths(5_012_345_678_900);
    // Swap one module between two adjacent data elements: totals stay
    // plausible but the finder checksum no longer matches.
    widths[2] += 1;
    widths[3] -= 1;
    let row = databar_row(&widths);
    assert!(databar::decode_row(&row).is_err());
}

#[test]
fn test_expected_filter_on_matrix_symbols() {
    let modules = encode_data_matrix("FILTER");
    let options = DecodeOptions {
        expected: Some(Symbology::DataMatrix),
        ..DecodeOptions::default()
    };
    let (symbol, _) = decode_matrix(&modules, &options);
    assert_eq!(symbol.unwrap().text, "FILTER");

    let options = DecodeOptions {
        expected: Some(Symbology::Aztec),
        ..DecodeOptions::default()
    };
    let (symbol, info) = decode_matrix(&modules, &options);
    assert!(symbol.is_none());
    assert_eq!(info.failure, Some(Failure::ExpectedMismatch));
}
