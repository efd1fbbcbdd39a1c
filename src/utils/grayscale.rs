//! Luminance plane extraction and decimation.

use crate::models::PixelBuffer;

/// Convert a pixel buffer to a tightly packed luminance plane.
pub fn luminance_plane(pixels: &PixelBuffer<'_>) -> Vec<u8> {
    let width = pixels.width();
    let height = pixels.height();
    let mut gray = Vec::with_capacity(width * height);
    for y in 0..height {
        for x in 0..width {
            gray.push(pixels.luminance(x, y));
        }
    }
    gray
}

/// Decimate a luminance plane by an integer factor, averaging each
/// factor x factor block. Returns the plane untouched for factor <= 1.
pub fn downscale(gray: &[u8], width: usize, height: usize, factor: usize) -> (Vec<u8>, usize, usize) {
    if factor <= 1 {
        return (gray.to_vec(), width, height);
    }
    let out_w = (width / factor).max(1);
    let out_h = (height / factor).max(1);
    let mut out = Vec::with_capacity(out_w * out_h);
    for oy in 0..out_h {
        for ox in 0..out_w {
            let mut sum = 0u32;
            let mut count = 0u32;
            for dy in 0..factor {
                for dx in 0..factor {
                    let x = ox * factor + dx;
                    let y = oy * factor + dy;
                    if x < width && y < height {
                        sum += gray[y * width + x] as u32;
                        count += 1;
                    }
                }
            }
            out.push((sum / count.max(1)) as u8);
        }
    }
    (out, out_w, out_h)
}

/// Stretch luminance so the observed [min, max] range maps onto [0, 255].
/// Used as a retry pass for low-contrast captures.
pub fn contrast_stretch(gray: &[u8]) -> Vec<u8> {
    let mut min = 255u8;
    let mut max = 0u8;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
    }
    if max <= min {
        return gray.to_vec();
    }
    let range = (max - min) as u32;
    gray.iter()
        .map(|&v| (((v - min) as u32 * 255) / range) as u8)
        .collect()
}

/// Observed luminance range of a plane.
pub fn luminance_range(gray: &[u8]) -> (u8, u8) {
    let mut min = 255u8;
    let mut max = 0u8;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
    }
    (min, max)
}
