//! Per-symbology grid decoders and the shared error-correction engine.

/// Aztec (compact and full-range)
pub mod aztec;
/// GS1 DataBar-14 family
pub mod databar;
/// Data Matrix ECC200
pub mod datamatrix;
/// Binary-extension Galois fields
pub mod galois;
/// Micro QR (M1-M4)
pub mod micro_qr;
/// GF(929) arithmetic and PDF417 error correction
pub mod modulus;
/// PDF417
pub mod pdf417;
/// QR Code Model 2
pub mod qr;
/// Syndrome-based Reed-Solomon over any binary-extension field
pub mod reed_solomon;
