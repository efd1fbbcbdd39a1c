//! Decode orchestration: retry variants, budget enforcement, tile scan and
//! confidence scoring.
//!
//! Every attempt is a pure function of an immutable luminance plane; the
//! tile scan fans attempts out across worker threads and keeps the first
//! success. The wall-clock budget is checked cooperatively at stage
//! boundaries, never mid-stage.

use std::time::{Duration, Instant};

use log::debug;
use rayon::prelude::*;

use crate::decoder::{aztec, databar, datamatrix, micro_qr, pdf417, qr};
use crate::detector::{self, LocatorCandidate, finder, grouping, region, sampler};
use crate::models::{
    BitMatrix, DecodeInfo, DecodeOptions, DecodedSymbol, Failure, ImageLimits, PixelBuffer,
    Profile, Symbology,
};
use crate::utils::{binarization, grayscale};

/// Cooperative wall-clock budget, checked at stage boundaries.
#[derive(Clone, Copy)]
pub(crate) struct DecodeBudget {
    deadline: Option<Instant>,
}

impl DecodeBudget {
    fn new(max_milliseconds: u32) -> Self {
        Self {
            deadline: (max_milliseconds > 0)
                .then(|| Instant::now() + Duration::from_millis(max_milliseconds as u64)),
        }
    }

    fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|d| Instant::now() > d)
    }
}

/// Variant breadth derived from the profile and image size.
#[derive(Clone, Copy)]
struct ProfileSettings {
    max_scale: u32,
    allow_adaptive_threshold: bool,
    allow_contrast_stretch: bool,
    allow_extra_thresholds: bool,
    allow_tile_scan: bool,
}

fn profile_settings(profile: Profile, min_dim: usize) -> ProfileSettings {
    match profile {
        Profile::Fast => ProfileSettings {
            max_scale: 1,
            allow_adaptive_threshold: false,
            allow_contrast_stretch: false,
            allow_extra_thresholds: false,
            allow_tile_scan: false,
        },
        Profile::Balanced => ProfileSettings {
            max_scale: if min_dim >= 160 { 2 } else { 1 },
            allow_adaptive_threshold: true,
            allow_contrast_stretch: true,
            allow_extra_thresholds: true,
            allow_tile_scan: false,
        },
        Profile::Robust => {
            let mut max_scale = 1;
            if min_dim >= 160 {
                max_scale = 2;
            }
            if min_dim >= 320 {
                max_scale = 3;
            }
            if min_dim >= 640 {
                max_scale = 4;
            }
            ProfileSettings {
                max_scale,
                allow_adaptive_threshold: true,
                allow_contrast_stretch: true,
                allow_extra_thresholds: true,
                allow_tile_scan: true,
            }
        }
    }
}

/// A tight budget demotes the profile, mirroring the latency envelopes the
/// presets promise.
fn effective_profile(options: &DecodeOptions) -> Profile {
    let mut profile = options.profile;
    if options.max_milliseconds > 0 {
        if options.max_milliseconds <= 800 {
            profile = Profile::Fast;
        } else if options.max_milliseconds <= 1600 && profile == Profile::Robust {
            profile = Profile::Balanced;
        }
    }
    profile
}

fn scale_start(options: &DecodeOptions, width: usize, height: usize) -> u32 {
    if options.max_dimension == 0 {
        return 1;
    }
    let max_dim = width.max(height) as u32;
    if max_dim <= options.max_dimension {
        return 1;
    }
    max_dim.div_ceil(options.max_dimension).clamp(1, 8)
}

/// One decode outcome with its scoring inputs.
struct Attempt {
    symbol: DecodedSymbol,
    geometry: f32,
    errors_corrected: usize,
    ec_capacity: usize,
    format_distance: u32,
}

impl Attempt {
    fn confidence(&self) -> f32 {
        let correctable = (self.ec_capacity / 2).max(1) as f32;
        let margin = 1.0 - (self.errors_corrected as f32 / correctable).min(1.0);
        let format_agreement = 1.0 - (self.format_distance as f32 / 3.0).min(1.0);
        (0.35 * self.geometry + 0.45 * margin + 0.20 * format_agreement).clamp(0.0, 1.0)
    }
}

struct FailureTracker {
    best: Failure,
}

impl FailureTracker {
    fn new(initial: Failure) -> Self {
        Self { best: initial }
    }

    fn record(&mut self, failure: Failure) {
        if failure.progress_rank() > self.best.progress_rank() {
            self.best = failure;
        }
    }
}

// ---- grid dispatch -----------------------------------------------------

static ALL_SYMBOLOGIES: [Symbology; 6] = [
    Symbology::Qr,
    Symbology::MicroQr,
    Symbology::DataMatrix,
    Symbology::Aztec,
    Symbology::Pdf417,
    Symbology::DataBar,
];

fn grid_orientations(modules: &BitMatrix) -> Vec<BitMatrix> {
    vec![
        modules.clone(),
        modules.rotate90(),
        modules.rotate180(),
        modules.rotate270(),
    ]
}

fn try_symbology(
    modules: &BitMatrix,
    symbology: Symbology,
    geometry: f32,
) -> Result<Attempt, Failure> {
    match symbology {
        Symbology::Qr => qr::decode(modules).map(|d| {
            let mut symbol =
                DecodedSymbol::new(Symbology::Qr, d.version, d.text, d.bytes);
            symbol.ec_level = Some(d.ec_level);
            symbol.mask = Some(d.mask);
            symbol.structured_append = d.structured_append;
            Attempt {
                symbol,
                geometry,
                errors_corrected: d.errors_corrected,
                ec_capacity: d.ec_capacity,
                format_distance: d.format_distance,
            }
        }),
        Symbology::MicroQr => micro_qr::decode(modules).map(|d| {
            let mut symbol =
                DecodedSymbol::new(Symbology::MicroQr, d.version, d.text, d.bytes);
            symbol.ec_level = Some(d.ec_level);
            symbol.mask = Some(d.mask);
            Attempt {
                symbol,
                geometry,
                errors_corrected: d.errors_corrected,
                ec_capacity: d.ec_capacity,
                format_distance: d.format_distance,
            }
        }),
        Symbology::DataMatrix => datamatrix::decode(modules).map(|d| Attempt {
            symbol: DecodedSymbol::new(
                Symbology::DataMatrix,
                d.rows as u8,
                d.text,
                d.bytes,
            ),
            geometry,
            errors_corrected: d.errors_corrected,
            ec_capacity: d.ec_capacity,
            format_distance: 0,
        }),
        Symbology::Aztec => aztec::decode(modules).map(|d| Attempt {
            symbol: DecodedSymbol::new(Symbology::Aztec, d.layers, d.text, d.bytes),
            geometry,
            errors_corrected: d.errors_corrected,
            ec_capacity: d.ec_capacity,
            format_distance: 0,
        }),
        Symbology::Pdf417 => pdf417::decode(modules).map(|d| Attempt {
            symbol: DecodedSymbol::new(Symbology::Pdf417, d.rows as u8, d.text, d.bytes),
            geometry,
            errors_corrected: d.errors_corrected,
            ec_capacity: d.ec_capacity,
            format_distance: 0,
        }),
        Symbology::DataBar => databar::decode_matrix(modules).map(|d| Attempt {
            symbol: DecodedSymbol::new(Symbology::DataBar, 0, d.text, d.bytes),
            geometry,
            errors_corrected: 0,
            ec_capacity: 2,
            format_distance: 0,
        }),
    }
}

fn dispatch_grid(
    modules: &BitMatrix,
    expected: Option<Symbology>,
    geometry: f32,
    failures: &mut FailureTracker,
) -> Option<Attempt> {
    // The expected symbology is tried first; the rest still run so a valid
    // decode of the wrong kind surfaces as ExpectedMismatch rather than a
    // generic failure.
    let mut symbologies: Vec<Symbology> = ALL_SYMBOLOGIES.to_vec();
    if let Some(expected) = expected {
        symbologies.retain(|&s| s != expected);
        symbologies.insert(0, expected);
    }

    for oriented in grid_orientations(modules) {
        for &symbology in &symbologies {
            match try_symbology(&oriented, symbology, geometry) {
                Ok(attempt) => return Some(attempt),
                Err(failure) => failures.record(failure),
            }
        }
    }
    None
}

// ---- grid entry point --------------------------------------------------

/// Decode a caller-supplied module grid, bypassing binarization,
/// localization and sampling entirely.
pub(crate) fn decode_grid(
    modules: &BitMatrix,
    options: &DecodeOptions,
) -> (Option<DecodedSymbol>, DecodeInfo) {
    let started = Instant::now();
    if modules.width() == 0 || modules.height() == 0 {
        return (None, DecodeInfo::failed(Failure::InvalidInput));
    }

    let mut failures = FailureTracker::new(Failure::InvalidSize);
    let result = dispatch_grid(modules, options.expected, 1.0, &mut failures);

    finish(result, failures, started, 1, 1, options)
}

fn finish(
    result: Option<Attempt>,
    failures: FailureTracker,
    started: Instant,
    attempts: u32,
    scale: u32,
    options: &DecodeOptions,
) -> (Option<DecodedSymbol>, DecodeInfo) {
    match result {
        Some(attempt) => {
            if let Some(expected) = options.expected
                && attempt.symbol.symbology != expected
            {
                let mut info = DecodeInfo::failed(Failure::ExpectedMismatch);
                info.scale = scale;
                info.attempts = attempts;
                info.elapsed = started.elapsed();
                return (None, info);
            }
            let mut info = DecodeInfo::success(attempt.confidence());
            info.scale = scale;
            info.attempts = attempts;
            info.elapsed = started.elapsed();
            (Some(attempt.symbol), info)
        }
        None => {
            let mut info = DecodeInfo::failed(failures.best);
            info.scale = scale;
            info.attempts = attempts;
            info.elapsed = started.elapsed();
            (None, info)
        }
    }
}

// ---- pixel entry point -------------------------------------------------

struct PlaneAttemptContext<'a> {
    options: &'a DecodeOptions,
    budget: DecodeBudget,
}

/// Decode from raw pixels with the full retry ladder.
pub(crate) fn decode_pixels(
    pixels: &PixelBuffer<'_>,
    options: &DecodeOptions,
) -> (Option<DecodedSymbol>, DecodeInfo) {
    let started = Instant::now();

    if pixels.pixel_count() as u64 > ImageLimits::max_pixels()
        || pixels.bytes().len() as u64 > ImageLimits::max_bytes()
    {
        return (None, DecodeInfo::failed(Failure::LimitExceeded));
    }

    let profile = effective_profile(options);
    let settings = profile_settings(profile, pixels.width().min(pixels.height()));
    let budget = DecodeBudget::new(options.max_milliseconds);
    let ctx = PlaneAttemptContext { options, budget };

    let gray = grayscale::luminance_plane(pixels);
    let width = pixels.width();
    let height = pixels.height();

    let first_scale = scale_start(options, width, height);
    let mut failures = FailureTracker::new(Failure::LocatorNotFound);
    let mut attempts = 0u32;
    let mut used_scale = first_scale;

    for scale in first_scale..=first_scale.max(settings.max_scale) {
        if ctx.budget.is_expired() {
            failures.record(Failure::BudgetExceeded);
            break;
        }
        let (plane, w, h) = grayscale::downscale(&gray, width, height, scale as usize);

        if let Some(attempt) =
            decode_plane(&plane, w, h, &settings, &ctx, &mut failures, &mut attempts)
        {
            used_scale = scale;
            return finish(Some(attempt), failures, started, attempts, used_scale, options);
        }

        // Low-contrast retry
        if settings.allow_contrast_stretch && !ctx.budget.is_expired() {
            let (min, max) = grayscale::luminance_range(&plane);
            if max - min < 48 {
                let stretched = grayscale::contrast_stretch(&plane);
                if let Some(attempt) = decode_plane(
                    &stretched,
                    w,
                    h,
                    &settings,
                    &ctx,
                    &mut failures,
                    &mut attempts,
                ) {
                    used_scale = scale;
                    return finish(
                        Some(attempt),
                        failures,
                        started,
                        attempts,
                        used_scale,
                        options,
                    );
                }
            }
        }
    }

    // Auto-crop: find the symbol's bounding region and retry on the crop
    // at full resolution, recovering detail a downscaled pass lost.
    if options.auto_crop && !ctx.budget.is_expired() {
        let binary = binarization::otsu_binarize(&gray, width, height);
        if let Some(bbox) = region::find_bounding_box(&binary) {
            let margin = (bbox.width().max(bbox.height()) / 10).max(4);
            let x0 = bbox.left.saturating_sub(margin);
            let y0 = bbox.top.saturating_sub(margin);
            let x1 = (bbox.right + margin + 1).min(width);
            let y1 = (bbox.bottom + margin + 1).min(height);
            let (cw, ch) = (x1 - x0, y1 - y0);
            if cw < width || ch < height {
                let mut crop = Vec::with_capacity(cw * ch);
                for y in y0..y1 {
                    crop.extend_from_slice(&gray[y * width + x0..y * width + x1]);
                }
                if let Some(attempt) =
                    decode_plane(&crop, cw, ch, &settings, &ctx, &mut failures, &mut attempts)
                {
                    return finish(Some(attempt), failures, started, attempts, 1, options);
                }
            }
        }
    }

    // Tile scan: partition into overlapping regions and attempt each tile
    // independently, in parallel.
    let tile_enabled = options.enable_tile_scan
        || (settings.allow_tile_scan && options.tile_grid > 0);
    if tile_enabled && !ctx.budget.is_expired() {
        if let Some(attempt) =
            tile_scan(&gray, width, height, options, ctx.budget, &mut attempts)
        {
            return finish(Some(attempt), failures, started, attempts, used_scale, options);
        }
    }

    if ctx.budget.is_expired() {
        failures.record(Failure::BudgetExceeded);
    }
    finish(None, failures, started, attempts, used_scale, options)
}

/// One full localization + sampling pass over a luminance plane.
fn decode_plane(
    gray: &[u8],
    width: usize,
    height: usize,
    settings: &ProfileSettings,
    ctx: &PlaneAttemptContext<'_>,
    failures: &mut FailureTracker,
    attempts: &mut u32,
) -> Option<Attempt> {
    if width == 0 || height == 0 {
        return None;
    }

    let mut binaries = Vec::with_capacity(4);
    binaries.push(binarization::otsu_binarize(gray, width, height));
    if settings.allow_adaptive_threshold && width.min(height) >= 64 {
        binaries.push(binarization::adaptive_binarize(gray, width, height, 31));
    }
    if settings.allow_extra_thresholds && ctx.options.aggressive_sampling {
        for threshold in binarization::aggressive_thresholds(gray) {
            binaries.push(binarization::threshold_binarize(gray, width, height, threshold));
        }
    }

    for binary in &binaries {
        if ctx.budget.is_expired() {
            return None;
        }
        *attempts += 1;

        for candidate in locate(binary, ctx) {
            if ctx.budget.is_expired() {
                return None;
            }
            if let Some(attempt) = decode_candidate(binary, &candidate, ctx, failures) {
                return Some(attempt);
            }
        }
    }
    None
}

/// Locate symbol candidates in a binary bitmap: QR finder triples first,
/// then dark-region boxes for the bordered symbologies. Failure is an
/// empty sequence, never an error.
fn locate(binary: &BitMatrix, ctx: &PlaneAttemptContext<'_>) -> Vec<LocatorCandidate> {
    let mut candidates = Vec::new();

    let qr_allowed = ctx
        .options
        .expected
        .is_none_or(|expected| expected == Symbology::Qr);
    if qr_allowed {
        let mut tolerances = vec![finder::FinderTolerance::strict()];
        if ctx.options.stylized_sampling {
            tolerances.push(finder::FinderTolerance::stylized());
        }
        for tolerance in tolerances {
            let patterns = finder::detect(binary, tolerance);
            if patterns.len() < 3 {
                continue;
            }
            debug!("pipeline: {} finder patterns", patterns.len());
            for group in grouping::group_patterns(&patterns) {
                if let Some(triple) = grouping::order_triple(
                    &patterns[group[0]],
                    &patterns[group[1]],
                    &patterns[group[2]],
                ) {
                    candidates.push(LocatorCandidate::QrTriple(triple));
                }
            }
        }
    }

    candidates.extend(detector::locate_regions(binary));
    candidates
}

/// Sample one candidate's geometry and run the matching grid decoders.
fn decode_candidate(
    binary: &BitMatrix,
    candidate: &LocatorCandidate,
    ctx: &PlaneAttemptContext<'_>,
    failures: &mut FailureTracker,
) -> Option<Attempt> {
    match candidate {
        LocatorCandidate::QrTriple(triple) => {
            let Some(transform) = sampler::build_transform(triple) else {
                failures.record(Failure::SamplingFailed);
                return None;
            };
            let transform = sampler::refine_with_alignment(binary, &transform, triple)
                .unwrap_or(transform);

            let sampled = if triple.module_size >= 2.5 {
                sampler::sample_grid(binary, &transform, triple.dimension)
            } else {
                sampler::sample_grid_centers(binary, &transform, triple.dimension)
            };

            match qr::decode(&sampled) {
                Ok(d) => {
                    let mut symbol =
                        DecodedSymbol::new(Symbology::Qr, d.version, d.text, d.bytes);
                    symbol.ec_level = Some(d.ec_level);
                    symbol.mask = Some(d.mask);
                    symbol.structured_append = d.structured_append;
                    let bottom_right = crate::models::Point::new(
                        triple.top_right.x + triple.bottom_left.x - triple.top_left.x,
                        triple.top_right.y + triple.bottom_left.y - triple.top_left.y,
                    );
                    symbol.corners = Some([
                        triple.top_left,
                        triple.top_right,
                        bottom_right,
                        triple.bottom_left,
                    ]);
                    Some(Attempt {
                        symbol,
                        geometry: triple.regularity,
                        errors_corrected: d.errors_corrected,
                        ec_capacity: d.ec_capacity,
                        format_distance: d.format_distance,
                    })
                }
                Err(failure) => {
                    failures.record(failure);
                    None
                }
            }
        }
        LocatorCandidate::Region {
            bbox,
            module_size,
            inverted,
        } => {
            let view;
            let binary = if *inverted {
                view = binary.invert();
                &view
            } else {
                binary
            };

            // The pitch estimate can be off by one pixel on noisy input.
            for delta in [0i32, -1, 1] {
                let pitch = *module_size as i32 + delta;
                if pitch < 1 {
                    continue;
                }
                let Some(modules) = region::sample_region(binary, bbox, pitch as usize)
                else {
                    failures.record(Failure::SamplingFailed);
                    continue;
                };
                if ctx.budget.is_expired() {
                    return None;
                }
                if let Some(attempt) =
                    dispatch_grid(&modules, ctx.options.expected, 0.85, failures)
                {
                    return Some(attempt);
                }
            }
            None
        }
    }
}

fn tile_scan(
    gray: &[u8],
    width: usize,
    height: usize,
    options: &DecodeOptions,
    budget: DecodeBudget,
    attempts: &mut u32,
) -> Option<Attempt> {
    let grid = match options.tile_grid {
        0 => {
            if width.max(height) >= 900 {
                3
            } else {
                2
            }
        }
        g => g.clamp(2, 4),
    } as usize;

    let pad = (width.min(height) / 40).max(8);
    let tile_w = width / grid;
    let tile_h = height / grid;

    let mut tiles = Vec::with_capacity(grid * grid);
    for ty in 0..grid {
        for tx in 0..grid {
            let x0 = (tx * tile_w).saturating_sub(pad);
            let y0 = (ty * tile_h).saturating_sub(pad);
            let x1 = (if tx == grid - 1 { width } else { (tx + 1) * tile_w } + pad).min(width);
            let y1 = (if ty == grid - 1 { height } else { (ty + 1) * tile_h } + pad).min(height);
            if x1 - x0 < 48 || y1 - y0 < 48 {
                continue;
            }
            tiles.push((x0, y0, x1, y1));
        }
    }
    *attempts += tiles.len() as u32;
    debug!("pipeline: tile scan over {} tiles", tiles.len());

    // Tiles share nothing mutable; evaluate them in parallel and keep the
    // first success.
    let tile_options = DecodeOptions {
        profile: Profile::Balanced,
        enable_tile_scan: false,
        tile_grid: 0,
        ..options.clone()
    };
    let settings = profile_settings(Profile::Balanced, tile_w.min(tile_h));

    tiles.par_iter().find_map_any(|&(x0, y0, x1, y1)| {
        if budget.is_expired() {
            return None;
        }
        let tw = x1 - x0;
        let th = y1 - y0;
        let mut tile = Vec::with_capacity(tw * th);
        for y in y0..y1 {
            tile.extend_from_slice(&gray[y * width + x0..y * width + x1]);
        }
        let ctx = PlaneAttemptContext {
            options: &tile_options,
            budget,
        };
        let mut tile_failures = FailureTracker::new(Failure::LocatorNotFound);
        let mut tile_attempts = 0u32;
        decode_plane(
            &tile,
            tw,
            th,
            &settings,
            &ctx,
            &mut tile_failures,
            &mut tile_attempts,
        )
    })
}

/// Decode every symbol found in an image (tile scan always on, results
/// deduplicated by payload).
pub(crate) fn decode_pixels_all(
    pixels: &PixelBuffer<'_>,
    options: &DecodeOptions,
) -> Vec<DecodedSymbol> {
    let mut results: Vec<DecodedSymbol> = Vec::new();

    let (first, _) = decode_pixels(pixels, options);
    if let Some(symbol) = first {
        results.push(symbol);
    }

    // Sweep the tiles for further symbols.
    let gray = grayscale::luminance_plane(pixels);
    let width = pixels.width();
    let height = pixels.height();
    let budget = DecodeBudget::new(options.max_milliseconds);
    let grid = if options.tile_grid > 0 {
        options.tile_grid.clamp(2, 4) as usize
    } else {
        2
    };
    let tile_w = width / grid;
    let tile_h = height / grid;
    if tile_w < 48 || tile_h < 48 {
        return results;
    }
    let settings = profile_settings(Profile::Balanced, tile_w.min(tile_h));
    let pad = (width.min(height) / 40).max(8);

    let mut tile_results: Vec<DecodedSymbol> = (0..grid * grid)
        .into_par_iter()
        .filter_map(|idx| {
            if budget.is_expired() {
                return None;
            }
            let tx = idx % grid;
            let ty = idx / grid;
            let x0 = (tx * tile_w).saturating_sub(pad);
            let y0 = (ty * tile_h).saturating_sub(pad);
            let x1 = (if tx == grid - 1 { width } else { (tx + 1) * tile_w } + pad).min(width);
            let y1 = (if ty == grid - 1 { height } else { (ty + 1) * tile_h } + pad).min(height);

            let tw = x1 - x0;
            let th = y1 - y0;
            let mut tile = Vec::with_capacity(tw * th);
            for y in y0..y1 {
                tile.extend_from_slice(&gray[y * width + x0..y * width + x1]);
            }
            let ctx = PlaneAttemptContext { options, budget };
            let mut failures = FailureTracker::new(Failure::LocatorNotFound);
            let mut attempts = 0u32;
            decode_plane(&tile, tw, th, &settings, &ctx, &mut failures, &mut attempts)
                .map(|attempt| attempt.symbol)
        })
        .collect();

    for symbol in tile_results.drain(..) {
        if !results
            .iter()
            .any(|r| r.symbology == symbol.symbology && r.bytes == symbol.bytes)
        {
            results.push(symbol);
        }
    }
    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_demotion() {
        let mut options = DecodeOptions::robust();
        options.max_milliseconds = 500;
        assert_eq!(effective_profile(&options), Profile::Fast);
        options.max_milliseconds = 1200;
        assert_eq!(effective_profile(&options), Profile::Balanced);
        options.max_milliseconds = 0;
        assert_eq!(effective_profile(&options), Profile::Robust);
    }

    #[test]
    fn test_scale_start() {
        let mut options = DecodeOptions::default();
        assert_eq!(scale_start(&options, 4000, 3000), 1);
        options.max_dimension = 1000;
        assert_eq!(scale_start(&options, 4000, 3000), 4);
        assert_eq!(scale_start(&options, 800, 600), 1);
    }

    #[test]
    fn test_failure_ranking() {
        let mut tracker = FailureTracker::new(Failure::LocatorNotFound);
        tracker.record(Failure::InvalidSize);
        assert_eq!(tracker.best, Failure::LocatorNotFound);
        tracker.record(Failure::ErrorCorrectionFailed);
        assert_eq!(tracker.best, Failure::ErrorCorrectionFailed);
        tracker.record(Failure::FormatInfoCorrupt);
        assert_eq!(tracker.best, Failure::ErrorCorrectionFailed);
    }

    #[test]
    fn test_confidence_monotonicity() {
        let base = Attempt {
            symbol: DecodedSymbol::new(Symbology::Qr, 1, String::new(), Vec::new()),
            geometry: 1.0,
            errors_corrected: 0,
            ec_capacity: 10,
            format_distance: 0,
        };
        let clean = base.confidence();
        assert!(clean > 0.5);

        let worn = Attempt {
            errors_corrected: 5,
            format_distance: 2,
            symbol: DecodedSymbol::new(Symbology::Qr, 1, String::new(), Vec::new()),
            ..base
        };
        assert!(worn.confidence() < clean);
        assert!(worn.confidence() > 0.0);
    }
}
