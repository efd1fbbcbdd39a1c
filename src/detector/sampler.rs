//! Perspective grid sampling from ordered finder geometry.

use super::grouping::OrderedTriple;
use crate::decoder::qr::tables::alignment_pattern_positions;
use crate::models::{BitMatrix, Point};
use crate::utils::geometry::PerspectiveTransform;

/// Build the grid-to-image transform for a QR candidate.
pub fn build_transform(triple: &OrderedTriple) -> Option<PerspectiveTransform> {
    let dimension = triple.dimension as f32;
    // In an undistorted symbol the fourth corner closes the parallelogram.
    let bottom_right = Point::new(
        triple.top_right.x + triple.bottom_left.x - triple.top_left.x,
        triple.top_right.y + triple.bottom_left.y - triple.top_left.y,
    );

    let src = [
        Point::new(3.5, 3.5),
        Point::new(dimension - 3.5, 3.5),
        Point::new(3.5, dimension - 3.5),
        Point::new(dimension - 3.5, dimension - 3.5),
    ];
    let dst = [
        triple.top_left,
        triple.top_right,
        triple.bottom_left,
        bottom_right,
    ];
    PerspectiveTransform::from_points(&src, &dst)
}

/// Refine the transform against the bottom-right alignment pattern when the
/// version has one.
pub fn refine_with_alignment(
    binary: &BitMatrix,
    transform: &PerspectiveTransform,
    triple: &OrderedTriple,
) -> Option<PerspectiveTransform> {
    let dimension = triple.dimension;
    let version = ((dimension - 17) / 4) as u8;
    if version < 2 || triple.module_size < 1.0 {
        return None;
    }

    let positions = alignment_pattern_positions(version);
    let centers: Vec<(usize, usize)> = positions
        .iter()
        .flat_map(|&cx| positions.iter().map(move |&cy| (cx, cy)))
        .filter(|&(cx, cy)| {
            let in_tl = cx <= 8 && cy <= 8;
            let in_tr = cx >= dimension - 9 && cy <= 8;
            let in_bl = cx <= 8 && cy >= dimension - 9;
            !(in_tl || in_tr || in_bl)
        })
        .collect();
    let (ax, ay) = centers.iter().max_by_key(|(x, y)| x + y)?;

    let align_src = Point::new(*ax as f32 + 0.5, *ay as f32 + 0.5);
    let predicted = transform.transform(&align_src);
    let found = find_alignment_center(binary, predicted, triple.module_size)?;

    let src = [
        Point::new(3.5, 3.5),
        Point::new(dimension as f32 - 3.5, 3.5),
        Point::new(3.5, dimension as f32 - 3.5),
        align_src,
    ];
    let dst = [triple.top_left, triple.top_right, triple.bottom_left, found];
    PerspectiveTransform::from_points(&src, &dst)
}

fn find_alignment_center(binary: &BitMatrix, predicted: Point, module_size: f32) -> Option<Point> {
    if !predicted.x.is_finite() || !predicted.y.is_finite() {
        return None;
    }

    let radius = (module_size * 4.0).max(4.0);
    let min_x = (predicted.x - radius).floor().max(0.0) as isize;
    let max_x = (predicted.x + radius)
        .ceil()
        .min(binary.width().saturating_sub(1) as f32) as isize;
    let min_y = (predicted.y - radius).floor().max(0.0) as isize;
    let max_y = (predicted.y + radius)
        .ceil()
        .min(binary.height().saturating_sub(1) as f32) as isize;

    let mut best: Option<(Point, usize)> = None;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let center = Point::new(x as f32, y as f32);
            let Some(mismatch) = alignment_mismatch(binary, &center, module_size) else {
                continue;
            };
            match best {
                Some((_, best_mismatch)) if mismatch >= best_mismatch => {}
                _ => best = Some((center, mismatch)),
            }
        }
    }

    match best {
        Some((center, mismatch)) if mismatch <= 8 => Some(center),
        _ => None,
    }
}

/// Count of mismatching modules against the ideal 5x5 alignment pattern.
fn alignment_mismatch(binary: &BitMatrix, center: &Point, module_size: f32) -> Option<usize> {
    let mut mismatches = 0usize;
    for dy in -2i32..=2 {
        for dx in -2i32..=2 {
            let expected_black = dx.abs() == 2 || dy.abs() == 2 || (dx == 0 && dy == 0);
            let sx = center.x + dx as f32 * module_size;
            let sy = center.y + dy as f32 * module_size;
            let ix = sx.round() as isize;
            let iy = sy.round() as isize;
            if ix < 0
                || iy < 0
                || ix as usize >= binary.width()
                || iy as usize >= binary.height()
            {
                return None;
            }
            if binary.get(ix as usize, iy as usize) != expected_black {
                mismatches += 1;
            }
        }
    }
    Some(mismatches)
}

/// Sample the transform into a dimension x dimension grid. Each module is
/// the majority of a 3x3 pixel neighbourhood around its mapped center.
pub fn sample_grid(
    binary: &BitMatrix,
    transform: &PerspectiveTransform,
    dimension: usize,
) -> BitMatrix {
    let mut result = BitMatrix::new(dimension, dimension);

    for y in 0..dimension {
        for x in 0..dimension {
            let module_center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let img_point = transform.transform(&module_center);

            let img_x = img_point.x.round() as isize;
            let img_y = img_point.y.round() as isize;

            let mut black = 0;
            let mut total = 0;
            for dy in -1isize..=1 {
                for dx in -1isize..=1 {
                    let sx = img_x + dx;
                    let sy = img_y + dy;
                    if sx >= 0
                        && sy >= 0
                        && (sx as usize) < binary.width()
                        && (sy as usize) < binary.height()
                    {
                        total += 1;
                        if binary.get(sx as usize, sy as usize) {
                            black += 1;
                        }
                    }
                }
            }
            if total > 0 {
                result.set(x, y, black * 2 >= total);
            }
        }
    }

    result
}

/// Sample module centers only, without neighbourhood averaging. Used for
/// small module pitches where the 3x3 window would bleed across modules.
pub fn sample_grid_centers(
    binary: &BitMatrix,
    transform: &PerspectiveTransform,
    dimension: usize,
) -> BitMatrix {
    let mut result = BitMatrix::new(dimension, dimension);
    for y in 0..dimension {
        for x in 0..dimension {
            let module_center = Point::new(x as f32 + 0.5, y as f32 + 0.5);
            let img_point = transform.transform(&module_center);
            let img_x = img_point.x.round() as isize;
            let img_y = img_point.y.round() as isize;
            if img_x >= 0
                && img_y >= 0
                && (img_x as usize) < binary.width()
                && (img_y as usize) < binary.height()
            {
                result.set(x, y, binary.get(img_x as usize, img_y as usize));
            }
        }
    }
    result
}
