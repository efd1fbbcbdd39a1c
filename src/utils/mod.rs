/// Binarization (Otsu, adaptive, fixed thresholds)
pub mod binarization;
/// Perspective transforms and linear algebra helpers
pub mod geometry;
/// Luminance extraction, decimation, contrast stretch
pub mod grayscale;
