//! QR finder pattern detection using 1:1:3:1:1 run-ratio scanning.

use crate::models::{BitMatrix, Point};

/// One detected finder pattern candidate.
#[derive(Debug, Clone, Copy)]
pub struct FinderPattern {
    pub center: Point,
    pub module_size: f32,
}

impl FinderPattern {
    pub fn new(x: f32, y: f32, module_size: f32) -> Self {
        Self {
            center: Point::new(x, y),
            module_size,
        }
    }
}

/// Ratio tolerance around the ideal 1:1:3:1:1 profile.
#[derive(Debug, Clone, Copy)]
pub struct FinderTolerance {
    unit: f32,
    center: f32,
}

impl FinderTolerance {
    /// Standard tolerance for crisp modules.
    pub fn strict() -> Self {
        Self {
            unit: 0.5,
            center: 0.5,
        }
    }

    /// Relaxed tolerance for stylized rendering (rounded dots, gradients).
    pub fn stylized() -> Self {
        Self {
            unit: 0.8,
            center: 1.2,
        }
    }
}

/// Scan a binary bitmap for finder patterns.
pub fn detect(matrix: &BitMatrix, tolerance: FinderTolerance) -> Vec<FinderPattern> {
    let width = matrix.width();
    let height = matrix.height();
    let mut candidates = Vec::new();

    for y in 0..height {
        if !has_significant_edges(matrix, y, width) {
            continue;
        }
        scan_row(matrix, y, width, tolerance, &mut candidates);
    }

    merge_candidates(candidates)
}

/// Check if a row has enough transitions to potentially hold a pattern.
fn has_significant_edges(matrix: &BitMatrix, y: usize, width: usize) -> bool {
    let mut transitions = 0;
    let sample_step = 4;
    let mut prev_color = matrix.get(0, y);

    for x in (sample_step..width).step_by(sample_step) {
        let color = matrix.get(x, y);
        if color != prev_color {
            transitions += 1;
            prev_color = color;
            if transitions >= 3 {
                return true;
            }
        }
    }
    transitions >= 2
}

fn scan_row(
    matrix: &BitMatrix,
    y: usize,
    width: usize,
    tolerance: FinderTolerance,
    candidates: &mut Vec<FinderPattern>,
) {
    const MAX_PATTERNS_PER_ROW: usize = 5;

    let mut run_lengths: Vec<usize> = Vec::new();
    let mut run_colors: Vec<bool> = Vec::new();
    let mut run_start = 0usize;
    let mut current_color = matrix.get(0, y);
    let mut found_in_row = 0usize;

    let mut flush = |x: usize,
                     run_lengths: &mut Vec<usize>,
                     run_colors: &mut Vec<bool>,
                     run_start: &mut usize,
                     current_color: &mut bool,
                     color: bool,
                     candidates: &mut Vec<FinderPattern>,
                     found_in_row: &mut usize| {
        let run_len = x - *run_start;
        run_lengths.push(run_len);
        run_colors.push(*current_color);
        *run_start = x;
        *current_color = color;

        if run_colors.len() >= 5 {
            let end = run_colors.len();
            let colors = &run_colors[end - 5..end];
            let lengths = &run_lengths[end - 5..end];
            if colors[0] && !colors[1] && colors[2] && !colors[3] && colors[4]
                && quick_ratio_check(lengths)
                && let Some(pattern) = check_pattern(lengths, x, y, tolerance)
            {
                candidates.push(pattern);
                *found_in_row += 1;
            }
        }
    };

    for x in 1..width {
        let color = matrix.get(x, y);
        if color != current_color {
            flush(
                x,
                &mut run_lengths,
                &mut run_colors,
                &mut run_start,
                &mut current_color,
                color,
                candidates,
                &mut found_in_row,
            );
            if found_in_row >= MAX_PATTERNS_PER_ROW {
                return;
            }
        }
    }
    // Closing run: a pattern may end at the row boundary.
    flush(
        width,
        &mut run_lengths,
        &mut run_colors,
        &mut run_start,
        &mut current_color,
        false,
        candidates,
        &mut found_in_row,
    );
}

/// Rough integer pre-check before the floating-point ratio test.
fn quick_ratio_check(lengths: &[usize]) -> bool {
    let b1 = lengths[0];
    let w1 = lengths[1];
    let b2 = lengths[2];
    let w2 = lengths[3];
    let b3 = lengths[4];

    let total = b1 + w1 + b2 + w2 + b3;
    if total < 7 {
        return false;
    }

    // Center black should be roughly 3x the outer blacks
    let b2_min = b1.min(b3).max(1);
    if b2 < b2_min * 2 || b2 > b2_min * 5 {
        return false;
    }

    let outer_avg = ((b1 + b3 + w1 + w2) / 4).max(1);
    let w1_ok = w1 >= outer_avg / 2 && w1 <= outer_avg * 2;
    let w2_ok = w2 >= outer_avg / 2 && w2 <= outer_avg * 2;
    w1_ok && w2_ok
}

fn check_pattern(
    lengths: &[usize],
    end_x: usize,
    y: usize,
    tolerance: FinderTolerance,
) -> Option<FinderPattern> {
    let b1 = lengths[0];
    let w1 = lengths[1];
    let b2 = lengths[2];
    let w2 = lengths[3];
    let b3 = lengths[4];

    let total = (b1 + w1 + b2 + w2 + b3) as f32;
    let unit = total / 7.0;

    let within = |run: usize, ideal: f32, tol: f32| (run as f32 / unit - ideal).abs() <= tol;
    if within(b1, 1.0, tolerance.unit)
        && within(w1, 1.0, tolerance.unit)
        && within(b2, 3.0, tolerance.center)
        && within(w2, 1.0, tolerance.unit)
        && within(b3, 1.0, tolerance.unit)
    {
        let center_x = end_x as f32 - b3 as f32 - w2 as f32 - b2 as f32 / 2.0;
        return Some(FinderPattern::new(center_x, y as f32, unit));
    }
    None
}

/// Merge per-row hits into distinct patterns. Clustering is by proximity
/// to the cluster's first hit; the reported center is the unweighted mean
/// of every merged hit, so a tall stack of rows does not drag the center.
fn merge_candidates(candidates: Vec<FinderPattern>) -> Vec<FinderPattern> {
    struct Cluster {
        anchor: Point,
        sum_x: f32,
        sum_y: f32,
        sum_module: f32,
        count: f32,
    }

    let mut clusters: Vec<Cluster> = Vec::new();
    for candidate in candidates {
        let merge_dist = (candidate.module_size * 3.5).max(5.0);
        let mut found = false;
        for cluster in &mut clusters {
            let dx = candidate.center.x - cluster.anchor.x;
            let dy = candidate.center.y - cluster.anchor.y;
            if dx * dx + dy * dy < merge_dist * merge_dist {
                cluster.sum_x += candidate.center.x;
                cluster.sum_y += candidate.center.y;
                cluster.sum_module += candidate.module_size;
                cluster.count += 1.0;
                found = true;
                break;
            }
        }
        if !found {
            clusters.push(Cluster {
                anchor: candidate.center,
                sum_x: candidate.center.x,
                sum_y: candidate.center.y,
                sum_module: candidate.module_size,
                count: 1.0,
            });
        }
    }

    clusters
        .iter()
        .map(|c| FinderPattern::new(c.sum_x / c.count, c.sum_y / c.count, c.sum_module / c.count))
        .collect()
}
