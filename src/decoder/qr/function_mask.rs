//! Function-module map for a QR version.

use super::tables::alignment_pattern_positions;
use crate::models::BitMatrix;

/// Marks which modules of a QR symbol are function patterns.
/// true = function module (not data), false = data module.
pub struct FunctionMask {
    mask: BitMatrix,
}

impl FunctionMask {
    /// Build the map for a version (size = 4*version + 17).
    pub fn new(version: u8) -> Self {
        let size = 17 + 4 * version as usize;
        let mut mask = BitMatrix::new(size, size);

        mark_finder(&mut mask, 0, 0);
        mark_finder(&mut mask, size as i32 - 7, 0);
        mark_finder(&mut mask, 0, size as i32 - 7);

        // Timing patterns
        for i in 0..size {
            mask.set(6, i, true);
            mask.set(i, 6, true);
        }

        // Alignment patterns, skipping the three finder corners
        let align = alignment_pattern_positions(version);
        for (i, &ax) in align.iter().enumerate() {
            for (j, &ay) in align.iter().enumerate() {
                let skip = (i == 0 && j == 0)
                    || (i == 0 && j == align.len() - 1)
                    || (i == align.len() - 1 && j == 0);
                if skip {
                    continue;
                }
                for dy in 0..5usize {
                    for dx in 0..5usize {
                        mask.set(ax - 2 + dx, ay - 2 + dy, true);
                    }
                }
            }
        }

        // Dark module
        mask.set(8, size - 8, true);

        // Format info areas
        for i in 0..=5 {
            mask.set(8, i, true);
        }
        mask.set(8, 7, true);
        mask.set(8, 8, true);
        mask.set(7, 8, true);
        for i in 9..15 {
            mask.set(14 - i, 8, true);
        }
        for i in 0..8 {
            mask.set(size - 1 - i, 8, true);
        }
        for i in 8..15 {
            mask.set(8, size - 15 + i, true);
        }

        // Version info blocks (v7+)
        if version >= 7 {
            for i in 0..18 {
                let a = size - 11 + (i % 3);
                let b = i / 3;
                mask.set(a, b, true);
                mask.set(b, a, true);
            }
        }

        Self { mask }
    }

    /// Symbol size in modules
    pub fn size(&self) -> usize {
        self.mask.width()
    }

    /// Whether (x, y) is a function module
    pub fn is_function(&self, x: usize, y: usize) -> bool {
        self.mask.get(x, y)
    }
}

fn mark_finder(mask: &mut BitMatrix, x: i32, y: i32) {
    let size = mask.width() as i32;
    for dy in -1..=7 {
        for dx in -1..=7 {
            let xx = x + dx;
            let yy = y + dy;
            if xx < 0 || yy < 0 || xx >= size || yy >= size {
                continue;
            }
            mask.set(xx as usize, yy as usize, true);
        }
    }
}
