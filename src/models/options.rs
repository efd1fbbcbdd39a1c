use std::sync::atomic::{AtomicU64, Ordering};

use super::Symbology;

/// Speed/recall trade-off for pixel decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Profile {
    /// Single scale, single crop, strict sampling. Lowest latency.
    Fast,
    /// A small number of scale and threshold variants.
    Balanced,
    /// Full variant set: scale ladder, threshold fallbacks, tile scan.
    #[default]
    Robust,
}

/// Options for a single decode call.
#[derive(Debug, Clone)]
pub struct DecodeOptions {
    /// Retry-variant breadth
    pub profile: Profile,
    /// Images with a longer side above this are downscaled before
    /// localization. 0 disables.
    pub max_dimension: u32,
    /// Wall-clock ceiling for the whole call, in milliseconds. 0 disables.
    pub max_milliseconds: u32,
    /// Crop to the symbol's dark bounding region before full-resolution
    /// sampling.
    pub auto_crop: bool,
    /// Try extra binarization thresholds and sampling passes (slower).
    pub aggressive_sampling: bool,
    /// Relax locator ratio tolerances for non-standard module rendering.
    pub stylized_sampling: bool,
    /// Partition the image into an overlapping tile grid and attempt each
    /// tile independently.
    pub enable_tile_scan: bool,
    /// Tile grid size (NxN). 0 picks a default from the image size.
    pub tile_grid: u32,
    /// Restrict decoding to one symbology and reject others.
    pub expected: Option<Symbology>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            profile: Profile::Robust,
            max_dimension: 0,
            max_milliseconds: 0,
            auto_crop: false,
            aggressive_sampling: false,
            stylized_sampling: false,
            enable_tile_scan: false,
            tile_grid: 0,
            expected: None,
        }
    }
}

impl DecodeOptions {
    /// Fast preset: lower accuracy, fewest variants.
    pub fn fast() -> Self {
        Self {
            profile: Profile::Fast,
            ..Self::default()
        }
    }

    /// Balanced preset: good default for most images.
    pub fn balanced() -> Self {
        Self {
            profile: Profile::Balanced,
            ..Self::default()
        }
    }

    /// Robust preset: best accuracy, slower.
    pub fn robust() -> Self {
        Self::default()
    }

    /// Screen-capture preset: budgeted decode with tile scan, for symbols
    /// occupying part of a screenshot.
    pub fn screen(max_milliseconds: u32, max_dimension: u32) -> Self {
        Self {
            max_milliseconds,
            max_dimension,
            enable_tile_scan: true,
            ..Self::default()
        }
    }
}

// Zero means "use the built-in default".
static MAX_PIXELS: AtomicU64 = AtomicU64::new(0);
static MAX_BYTES: AtomicU64 = AtomicU64::new(0);

const DEFAULT_MAX_PIXELS: u64 = 64 * 1024 * 1024;
const DEFAULT_MAX_BYTES: u64 = 512 * 1024 * 1024;

/// Process-wide limits applied to every image handed to the decode path.
///
/// These are read, never written, during decoding; violations surface as
/// [`Failure::LimitExceeded`](super::Failure::LimitExceeded) before the
/// pipeline runs.
pub struct ImageLimits;

impl ImageLimits {
    /// Maximum accepted pixel count. 0 restores the built-in default.
    pub fn set_max_pixels(pixels: u64) {
        MAX_PIXELS.store(pixels, Ordering::Relaxed);
    }

    /// Maximum accepted byte size. 0 restores the built-in default.
    pub fn set_max_bytes(bytes: u64) {
        MAX_BYTES.store(bytes, Ordering::Relaxed);
    }

    /// Effective pixel-count limit.
    pub fn max_pixels() -> u64 {
        match MAX_PIXELS.load(Ordering::Relaxed) {
            0 => DEFAULT_MAX_PIXELS,
            v => v,
        }
    }

    /// Effective byte-size limit.
    pub fn max_bytes() -> u64 {
        match MAX_BYTES.load(Ordering::Relaxed) {
            0 => DEFAULT_MAX_BYTES,
            v => v,
        }
    }
}
