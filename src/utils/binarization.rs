//! Luminance thresholding into binary bitmaps.

use crate::models::BitMatrix;

/// Convert a grayscale plane to binary using Otsu's thresholding method.
/// Returns a BitMatrix where true = black, false = white.
pub fn otsu_binarize(gray: &[u8], width: usize, height: usize) -> BitMatrix {
    let threshold = otsu_threshold(gray);
    threshold_binarize(gray, width, height, threshold)
}

/// Calculate Otsu's optimal threshold over a luminance histogram.
pub fn otsu_threshold(gray: &[u8]) -> u8 {
    let mut histogram = [0u32; 256];
    for &pixel in gray {
        histogram[pixel as usize] += 1;
    }

    let total_pixels = gray.len() as f64;
    let mut max_variance = 0.0;
    let mut optimal_threshold = 128u8;

    for threshold in 0..=255u8 {
        let mut class1_pixels = 0u32;
        let mut class1_sum = 0u64;
        let mut class2_pixels = 0u32;
        let mut class2_sum = 0u64;

        for intensity in 0..=255u32 {
            let count = histogram[intensity as usize];
            if intensity < threshold as u32 {
                class1_pixels += count;
                class1_sum += (count * intensity) as u64;
            } else {
                class2_pixels += count;
                class2_sum += (count * intensity) as u64;
            }
        }

        if class1_pixels == 0 || class2_pixels == 0 {
            continue;
        }

        let class1_mean = class1_sum as f64 / class1_pixels as f64;
        let class2_mean = class2_sum as f64 / class2_pixels as f64;

        let weight1 = class1_pixels as f64 / total_pixels;
        let weight2 = class2_pixels as f64 / total_pixels;

        let variance = weight1 * weight2 * (class1_mean - class2_mean).powi(2);
        if variance > max_variance {
            max_variance = variance;
            optimal_threshold = threshold;
        }
    }

    optimal_threshold
}

/// Simple global threshold binarization.
pub fn threshold_binarize(gray: &[u8], width: usize, height: usize, threshold: u8) -> BitMatrix {
    let mut binary = BitMatrix::new(width, height);
    for y in 0..height {
        for x in 0..width {
            if gray[y * width + x] < threshold {
                binary.set(x, y, true);
            }
        }
    }
    binary
}

/// Adaptive mean-window binarization backed by an integral image.
///
/// `window` is the square neighbourhood side; a pixel is black when it is
/// darker than the local mean minus a small bias.
pub fn adaptive_binarize(gray: &[u8], width: usize, height: usize, window: usize) -> BitMatrix {
    let window = window.max(3) | 1;
    let half = window / 2;

    // Integral image, one extra row/column of zeros.
    let iw = width + 1;
    let mut integral = vec![0u64; iw * (height + 1)];
    for y in 0..height {
        let mut row_sum = 0u64;
        for x in 0..width {
            row_sum += gray[y * width + x] as u64;
            integral[(y + 1) * iw + x + 1] = integral[y * iw + x + 1] + row_sum;
        }
    }

    const BIAS: i64 = 7;
    let mut binary = BitMatrix::new(width, height);
    for y in 0..height {
        let y0 = y.saturating_sub(half);
        let y1 = (y + half + 1).min(height);
        for x in 0..width {
            let x0 = x.saturating_sub(half);
            let x1 = (x + half + 1).min(width);
            let area = ((x1 - x0) * (y1 - y0)) as i64;
            let sum = (integral[y1 * iw + x1] + integral[y0 * iw + x0]
                - integral[y0 * iw + x1]
                - integral[y1 * iw + x0]) as i64;
            let mean = sum / area;
            if (gray[y * width + x] as i64) < mean - BIAS {
                binary.set(x, y, true);
            }
        }
    }
    binary
}

/// Candidate global thresholds for aggressive retry passes: the midpoint of
/// the observed luminance range plus fixed offsets around it.
pub fn aggressive_thresholds(gray: &[u8]) -> Vec<u8> {
    let (min, max) = super::grayscale::luminance_range(gray);
    let mid = (min as u16 + max as u16) / 2;
    let mut out = Vec::with_capacity(5);
    for delta in [0i16, -32, 32, -64, 64] {
        let t = mid as i16 + delta;
        if (1..=254).contains(&t) {
            let t = t as u8;
            if !out.contains(&t) {
                out.push(t);
            }
        }
    }
    out
}
