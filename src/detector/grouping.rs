//! Grouping finder patterns into QR candidate triples and ordering them
//! into (top-left, top-right, bottom-left).

use super::finder::FinderPattern;
use crate::models::Point;

/// An ordered finder triple ready for transform building.
#[derive(Debug, Clone, Copy)]
pub struct OrderedTriple {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_left: Point,
    pub module_size: f32,
    pub dimension: usize,
    /// Geometric regularity in [0, 1]: right angle quality and size
    /// consistency of the triple.
    pub regularity: f32,
}

/// Form candidate triples from detected patterns, best-scoring first.
pub fn group_patterns(patterns: &[FinderPattern]) -> Vec<[usize; 3]> {
    if patterns.len() < 3 {
        return Vec::new();
    }

    let mut groups = Vec::new();
    for i in 0..patterns.len() {
        for j in (i + 1)..patterns.len() {
            for k in (j + 1)..patterns.len() {
                if plausible_triple(&patterns[i], &patterns[j], &patterns[k]) {
                    groups.push([i, j, k]);
                }
            }
        }
    }

    groups.sort_by(|a, b| {
        let sa = group_score(patterns, a);
        let sb = group_score(patterns, b);
        sa.partial_cmp(&sb).unwrap_or(std::cmp::Ordering::Equal)
    });
    groups.truncate(40);
    groups
}

fn plausible_triple(pi: &FinderPattern, pj: &FinderPattern, pk: &FinderPattern) -> bool {
    let sizes = [pi.module_size, pj.module_size, pk.module_size];
    let min_size = sizes.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_size = sizes.iter().fold(0.0f32, |a, &b| a.max(b));
    if max_size / min_size > 2.0 {
        return false;
    }

    let d_ij = pi.center.distance(&pj.center);
    let d_ik = pi.center.distance(&pk.center);
    let d_jk = pj.center.distance(&pk.center);

    let distances = [d_ij, d_ik, d_jk];
    let min_d = distances.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_d = distances.iter().fold(0.0f32, |a, &b| a.max(b));

    let avg_module = (pi.module_size + pj.module_size + pk.module_size) / 3.0;
    if min_d < avg_module * 2.5 {
        return false;
    }
    if max_d / min_d > 5.0 {
        return false;
    }

    // One corner must be near a right angle
    let a2 = d_ij * d_ij;
    let b2 = d_ik * d_ik;
    let c2 = d_jk * d_jk;
    let cos_i = (a2 + b2 - c2) / (2.0 * d_ij * d_ik);
    let cos_j = (a2 + c2 - b2) / (2.0 * d_ij * d_jk);
    let cos_k = (b2 + c2 - a2) / (2.0 * d_ik * d_jk);
    cos_i.abs() < 0.4 || cos_j.abs() < 0.4 || cos_k.abs() < 0.4
}

fn group_score(patterns: &[FinderPattern], group: &[usize; 3]) -> f32 {
    let p0 = &patterns[group[0]];
    let p1 = &patterns[group[1]];
    let p2 = &patterns[group[2]];

    let sizes = [p0.module_size, p1.module_size, p2.module_size];
    let min_size = sizes.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_size = sizes.iter().fold(0.0f32, |a, &b| a.max(b));
    let size_ratio = max_size / min_size;

    let d01 = p0.center.distance(&p1.center);
    let d02 = p0.center.distance(&p2.center);
    let d12 = p1.center.distance(&p2.center);
    let distances = [d01, d02, d12];
    let min_d = distances.iter().fold(f32::INFINITY, |a, &b| a.min(b));
    let max_d = distances.iter().fold(0.0f32, |a, &b| a.max(b));
    let distortion = max_d / min_d;

    // Prefer near-right angle (small cosine) and size consistency
    let a2 = d01 * d01;
    let b2 = d02 * d02;
    let c2 = d12 * d12;
    let cos_i = ((a2 + b2 - c2) / (2.0 * d01 * d02)).abs();
    let cos_j = ((a2 + c2 - b2) / (2.0 * d01 * d12)).abs();
    let cos_k = ((b2 + c2 - a2) / (2.0 * d02 * d12)).abs();
    let best_cos = cos_i.min(cos_j).min(cos_k);

    size_ratio * 2.0 + distortion + best_cos
}

/// Order a triple into (top-left, top-right, bottom-left) and estimate the
/// module size and symbol dimension.
pub fn order_triple(
    a: &FinderPattern,
    b: &FinderPattern,
    c: &FinderPattern,
) -> Option<OrderedTriple> {
    let patterns = [a, b, c];
    if patterns.iter().any(|p| p.module_size < 1.0) {
        return None;
    }

    // The right-angle corner is the top-left
    let mut best_idx = 0usize;
    let mut best_cos = f32::INFINITY;
    for i in 0..3 {
        let p = &patterns[i].center;
        let p1 = &patterns[(i + 1) % 3].center;
        let p2 = &patterns[(i + 2) % 3].center;

        let v1x = p1.x - p.x;
        let v1y = p1.y - p.y;
        let v2x = p2.x - p.x;
        let v2y = p2.y - p.y;
        let dot = v1x * v2x + v1y * v2y;
        let denom = (v1x * v1x + v1y * v1y).sqrt() * (v2x * v2x + v2y * v2y).sqrt();
        if denom == 0.0 {
            continue;
        }
        let cos = (dot / denom).abs();
        if cos < best_cos {
            best_cos = cos;
            best_idx = i;
        }
    }

    let tl = patterns[best_idx];
    let p1 = patterns[(best_idx + 1) % 3];
    let p2 = patterns[(best_idx + 2) % 3];

    // Cross product sign separates top-right from bottom-left
    let v1x = p1.center.x - tl.center.x;
    let v1y = p1.center.y - tl.center.y;
    let v2x = p2.center.x - tl.center.x;
    let v2y = p2.center.y - tl.center.y;
    let cross = v1x * v2y - v1y * v2x;
    let (tr, bl) = if cross > 0.0 { (p1, p2) } else { (p2, p1) };

    let avg_module = (tl.module_size + tr.module_size + bl.module_size) / 3.0;
    let d_tr = tl.center.distance(&tr.center);
    let d_bl = tl.center.distance(&bl.center);

    let dim1 = estimate_dimension(d_tr, avg_module)?;
    let dim2 = estimate_dimension(d_bl, avg_module)?;
    let dimension = if dim1 == dim2 {
        dim1
    } else if (dim1 as isize - dim2 as isize).unsigned_abs() <= 4 {
        ((dim1 + dim2) / 2).max(21)
    } else {
        return None;
    };

    let module_size = (d_tr + d_bl) / 2.0 / (dimension as f32 - 7.0);
    let module_ratio = module_size / avg_module;
    if !(0.7..=1.3).contains(&module_ratio) {
        return None;
    }

    let regularity = (1.0 - best_cos).clamp(0.0, 1.0)
        * (1.0 - (module_ratio - 1.0).abs() / 0.3).clamp(0.0, 1.0);

    Some(OrderedTriple {
        top_left: tl.center,
        top_right: tr.center,
        bottom_left: bl.center,
        module_size,
        dimension,
        regularity,
    })
}

fn estimate_dimension(distance: f32, module_size: f32) -> Option<usize> {
    if module_size <= 0.0 {
        return None;
    }
    let raw_dim = distance / module_size + 7.0;
    if raw_dim < 19.0 {
        return None;
    }
    let version = ((raw_dim - 17.0) / 4.0).round() as i32;
    if !(1..=40).contains(&version) {
        return None;
    }
    Some(17 + 4 * version as usize)
}
