//! glyphscan - matrix-code decoding engine
//!
//! Recovers text/byte payloads from pixel images or module grids carrying
//! QR, Micro QR, Aztec, Data Matrix, PDF417 or GS1 DataBar symbols.
//!
//! The pixel pipeline binarizes the image, locates candidate geometry,
//! samples it into a module grid and hands the grid to the per-symbology
//! decoders; an orchestration layer retries with different scales,
//! thresholds and crops under a wall-clock budget. Callers that already
//! hold a module grid skip straight to grid decoding.
//!
//! ```
//! use glyphscan::{BitMatrix, DecodeOptions};
//!
//! // A caller-built grid (here: empty, which fails cleanly)
//! let grid = BitMatrix::new(21, 21);
//! let (symbol, info) = glyphscan::decode_matrix(&grid, &DecodeOptions::default());
//! assert!(symbol.is_none());
//! assert_eq!(info.confidence, 0.0);
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Per-symbology grid decoders and error-correction engines
pub mod decoder;
/// Localization: finder patterns, regions, grid sampling
pub mod detector;
/// Core data structures (BitMatrix, DecodedSymbol, options, diagnostics)
pub mod models;
/// Orchestration: retry variants, budget, tile scan, confidence
mod pipeline;
/// Grayscale, binarization and geometry utilities
pub mod utils;

pub use models::{
    BitMatrix, DecodeInfo, DecodeOptions, DecodedSymbol, EcLevel, Failure, ImageLimits,
    PixelBuffer, PixelFormat, Point, Profile, StructuredAppend, Symbology,
};

/// Decode one symbol from raw pixels.
///
/// Returns the decoded symbol (or `None`) plus diagnostics that are always
/// populated: failure reason, confidence, scale, attempt count and elapsed
/// time.
pub fn decode(pixels: &PixelBuffer<'_>, options: &DecodeOptions) -> (Option<DecodedSymbol>, DecodeInfo) {
    pipeline::decode_pixels(pixels, options)
}

/// Decode every symbol found in an image, deduplicated by payload.
pub fn decode_all(pixels: &PixelBuffer<'_>, options: &DecodeOptions) -> Vec<DecodedSymbol> {
    pipeline::decode_pixels_all(pixels, options)
}

/// Decode one symbol from a caller-supplied module grid, bypassing
/// binarization, localization and sampling.
pub fn decode_matrix(
    modules: &BitMatrix,
    options: &DecodeOptions,
) -> (Option<DecodedSymbol>, DecodeInfo) {
    pipeline::decode_grid(modules, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_matrix_fails_cleanly() {
        let (symbol, info) = decode_matrix(&BitMatrix::new(0, 0), &DecodeOptions::default());
        assert!(symbol.is_none());
        assert_eq!(info.failure, Some(Failure::InvalidInput));
        assert_eq!(info.confidence, 0.0);
    }

    #[test]
    fn test_tiny_image_reports_locator_not_found() {
        let bytes = vec![255u8; 30 * 30];
        let buf = PixelBuffer::packed(&bytes, 30, 30, PixelFormat::Gray8).unwrap();
        let (symbol, info) = decode(&buf, &DecodeOptions::fast());
        assert!(symbol.is_none());
        assert!(info.failure.is_some());
        assert_eq!(info.confidence, 0.0);
    }

    #[test]
    fn test_limit_violation() {
        ImageLimits::set_max_pixels(100);
        let bytes = vec![0u8; 40 * 40];
        let buf = PixelBuffer::packed(&bytes, 40, 40, PixelFormat::Gray8).unwrap();
        let (symbol, info) = decode(&buf, &DecodeOptions::default());
        assert!(symbol.is_none());
        assert_eq!(info.failure, Some(Failure::LimitExceeded));
        ImageLimits::set_max_pixels(0);
    }
}
