pub mod info;
pub mod matrix;
pub mod options;
pub mod pixels;
pub mod point;
pub mod symbol;

pub use info::{DecodeInfo, Failure};
pub use matrix::BitMatrix;
pub use options::{DecodeOptions, ImageLimits, Profile};
pub use pixels::{PixelBuffer, PixelFormat};
pub use point::Point;
pub use symbol::{DecodedSymbol, EcLevel, StructuredAppend, Symbology};
