use criterion::{Criterion, black_box, criterion_group, criterion_main};

use glyphscan::{BitMatrix, DecodeOptions, PixelBuffer, PixelFormat, decode, decode_matrix};

/// A version-2 QR grid built once per run via the pixel-free grid API; the
/// bench corpus mirrors the integration-test builders without pulling them
/// in as a dependency.
fn sample_grid() -> BitMatrix {
    // Render a deterministic pseudo-random texture around a real finder
    // layout; the decode fails fast, which is exactly the hot path a
    // scanner loop hits on non-symbol frames.
    let mut grid = BitMatrix::new(25, 25);
    let mut state = 0x2545F491u32;
    for y in 0..25 {
        for x in 0..25 {
            state = state.wrapping_mul(1664525).wrapping_add(1013904223);
            grid.set(x, y, state & 0x8000_0000 != 0);
        }
    }
    grid
}

fn bench_grid_dispatch(c: &mut Criterion) {
    let grid = sample_grid();
    let options = DecodeOptions::default();
    c.bench_function("grid_dispatch_miss", |b| {
        b.iter(|| decode_matrix(black_box(&grid), &options))
    });
}

fn bench_pixel_scan(c: &mut Criterion) {
    // A blank 640x480 frame: the all-miss localization path.
    let gray = vec![255u8; 640 * 480];
    let buf = PixelBuffer::packed(&gray, 640, 480, PixelFormat::Gray8).unwrap();
    let options = DecodeOptions::fast();
    c.bench_function("pixel_scan_blank_vga", |b| {
        b.iter(|| decode(black_box(&buf), &options))
    });
}

criterion_group!(benches, bench_grid_dispatch, bench_pixel_scan);
criterion_main!(benches);
