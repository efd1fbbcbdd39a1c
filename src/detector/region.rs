//! Dark-region localization for bordered symbologies.
//!
//! Data Matrix, Aztec, PDF417 and DataBar have no three-corner finder; the
//! symbol is located as the bounding box of dark pixels and the module
//! pitch is estimated from the narrowest run through the box center.

use crate::models::BitMatrix;

/// Inclusive pixel-space bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundingBox {
    pub left: usize,
    pub top: usize,
    pub right: usize,
    pub bottom: usize,
}

impl BoundingBox {
    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }
}

/// Bounding box of set modules; `None` for an all-clear bitmap.
pub fn find_bounding_box(binary: &BitMatrix) -> Option<BoundingBox> {
    let mut left = binary.width();
    let mut right = 0usize;
    let mut top = binary.height();
    let mut bottom = 0usize;
    let mut any = false;

    for y in 0..binary.height() {
        for x in 0..binary.width() {
            if !binary.get(x, y) {
                continue;
            }
            any = true;
            left = left.min(x);
            right = right.max(x);
            top = top.min(y);
            bottom = bottom.max(y);
        }
    }

    any.then_some(BoundingBox {
        left,
        top,
        right,
        bottom,
    })
}

/// Estimate the module pitch as the smallest run length across a spread of
/// rows and columns through the box. The edge lines matter: clock tracks
/// and timing patterns alternate every module, guaranteeing a run of
/// exactly one pitch.
pub fn estimate_module_size(binary: &BitMatrix, bbox: &BoundingBox) -> Option<usize> {
    let h = bbox.height();
    let w = bbox.width();
    let rows = [
        bbox.top,
        bbox.top + h / 4,
        bbox.top + h / 2,
        bbox.top + (3 * h) / 4,
        bbox.bottom,
    ];
    let cols = [
        bbox.left,
        bbox.left + w / 4,
        bbox.left + w / 2,
        bbox.left + (3 * w) / 4,
        bbox.right,
    ];

    let mut size = usize::MAX;
    for &y in &rows {
        if let Some(run) = min_run(binary, bbox.left, bbox.right, y, true) {
            size = size.min(run);
        }
    }
    for &x in &cols {
        if let Some(run) = min_run(binary, bbox.top, bbox.bottom, x, false) {
            size = size.min(run);
        }
    }
    (size != usize::MAX && size > 0).then_some(size)
}

fn min_run(binary: &BitMatrix, start: usize, end: usize, fixed: usize, horizontal: bool) -> Option<usize> {
    let mut min_run = usize::MAX;
    let mut prev = false;
    let mut run = 0usize;
    let mut saw_any = false;

    for i in start..=end {
        let (x, y) = if horizontal { (i, fixed) } else { (fixed, i) };
        let bit = binary.get(x, y);
        if !saw_any {
            prev = bit;
            run = 1;
            saw_any = true;
            continue;
        }
        if bit == prev {
            run += 1;
        } else {
            min_run = min_run.min(run);
            prev = bit;
            run = 1;
        }
    }
    min_run = min_run.min(run);
    (min_run != usize::MAX).then_some(min_run)
}

/// Sample the boxed region into a module grid of the given pitch, taking
/// the center pixel of each cell.
pub fn sample_region(binary: &BitMatrix, bbox: &BoundingBox, module_size: usize) -> Option<BitMatrix> {
    if module_size == 0 {
        return None;
    }
    let cols = (bbox.width() as f64 / module_size as f64).round() as usize;
    let rows = (bbox.height() as f64 / module_size as f64).round() as usize;
    if cols == 0 || rows == 0 {
        return None;
    }

    let half = module_size as f64 / 2.0;
    let mut modules = BitMatrix::new(cols, rows);
    for y in 0..rows {
        let sy = (bbox.top as f64 + y as f64 * module_size as f64 + half).round() as usize;
        let sy = sy.min(binary.height().saturating_sub(1));
        for x in 0..cols {
            let sx = (bbox.left as f64 + x as f64 * module_size as f64 + half).round() as usize;
            let sx = sx.min(binary.width().saturating_sub(1));
            modules.set(x, y, binary.get(sx, sy));
        }
    }
    Some(modules)
}
