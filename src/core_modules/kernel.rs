// THEORY:
// The convolution engine computes, for every interior pixel, the weighted sum
// of its 3x3 neighborhood and writes the clamped result into a separate
// destination picture.
//
// Key architectural principles:
// 1.  **Read source, write destination**: Neighbors are always read from the
//     untouched source. No destination pixel depends on another destination
//     pixel, so the interior can be processed in any order, or in parallel.
// 2.  **Clamp once**: Each channel is accumulated over all nine terms first and
//     only then clamped to 0..=255. Clamping per term would change the result
//     for kernels with negative weights, so the order is fixed.
// 3.  **Border ring untouched**: The destination starts as a copy of the source
//     and the outer 1-pixel ring is never visited, so the border of the result
//     is exactly the border of the input. There is no padding or replication.
// 4.  **No normalization**: The kernel weights are used as given. Callers pick
//     weights whose sum produces the scaling they want.
//
// `convolve_parallel` splits the interior rows of the destination buffer into
// disjoint bands and hands each band to a scoped thread. Every band only reads
// the shared, immutable source, so the output is identical to `convolve`.

use crate::core_modules::color::color::{Channel, Color};
use crate::core_modules::picture::Picture;
use crate::error::{Error, Result};
use std::thread;

pub type Weight = i32;

/// A 3x3 grid of integer weights, indexed `[dy + 1][dx + 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Kernel {
    weights: [[Weight; 3]; 3],
}

impl Kernel {
    pub const fn new(weights: [[Weight; 3]; 3]) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &[[Weight; 3]; 3] {
        &self.weights
    }

    /// Sum of all nine weights.
    pub fn sum(&self) -> Weight {
        self.weights.iter().flatten().sum()
    }
}

impl From<[[Weight; 3]; 3]> for Kernel {
    fn from(weights: [[Weight; 3]; 3]) -> Self {
        Self::new(weights)
    }
}

/// Leaves every pixel as it is.
pub const IDENTITY_KERNEL: Kernel = Kernel::new([[0, 0, 0], [0, 1, 0], [0, 0, 0]]);

/// Laplacian-style edge detector: flat regions go to black.
pub const EDGE_DETECT_KERNEL: Kernel = Kernel::new([[-1, -1, -1], [-1, 8, -1], [-1, -1, -1]]);

/// Clamps an accumulated channel sum into 0..=255.
#[inline]
pub fn clamp_channel(sum: i64) -> Channel {
    sum.clamp(0, Channel::MAX as i64) as Channel
}

fn is_interior(picture: &Picture, x: usize, y: usize) -> bool {
    x >= 1 && y >= 1 && x + 1 < picture.width() && y + 1 < picture.height()
}

/// Weighted sum of the 3x3 neighborhood of (x, y) in `source`.
/// Callers guarantee (x, y) is interior.
#[inline]
fn weighted_sum(source: &Picture, x: usize, y: usize, kernel: &Kernel) -> Color {
    let colors = source.colors();
    let width = source.width();
    let mut red_sum = 0i64;
    let mut green_sum = 0i64;
    let mut blue_sum = 0i64;

    for (row_offset, row) in kernel.weights.iter().enumerate() {
        let start = (y + row_offset - 1) * width + x - 1;
        for (neighbor, &weight) in colors[start..start + 3].iter().zip(row) {
            let weight = weight as i64;
            red_sum += neighbor.red() as i64 * weight;
            green_sum += neighbor.green() as i64 * weight;
            blue_sum += neighbor.blue() as i64 * weight;
        }
    }

    Color::from_rgb(
        clamp_channel(red_sum),
        clamp_channel(green_sum),
        clamp_channel(blue_sum),
    )
}

/// Applies `kernel` to the interior pixel (x, y) of `source` and stores the
/// clamped result at (x, y) in `destination`.
pub fn apply_kernel(
    source: &Picture,
    destination: &mut Picture,
    x: usize,
    y: usize,
    kernel: &Kernel,
) -> Result<()> {
    if !is_interior(source, x, y) {
        return Err(Error::OutOfBounds {
            x,
            y,
            width: source.width(),
            height: source.height(),
        });
    }
    destination.set(x, y, weighted_sum(source, x, y, kernel))
}

/// Convolves every interior pixel of `source`. The border ring of the result
/// is a copy of the source's border. `source` is not modified.
pub fn convolve(source: &Picture, kernel: &Kernel) -> Picture {
    let mut destination = source.copy();
    let (width, height) = source.dimensions();
    if width < 3 || height < 3 {
        return destination;
    }

    let colors = destination.colors_mut();
    for y in 1..height - 1 {
        for x in 1..width - 1 {
            colors[y * width + x] = weighted_sum(source, x, y, kernel);
        }
    }
    destination
}

/// Same result as [`convolve`], with the interior rows split into up to
/// `workers` bands processed on scoped threads.
pub fn convolve_parallel(source: &Picture, kernel: &Kernel, workers: usize) -> Picture {
    let mut destination = source.copy();
    let (width, height) = source.dimensions();
    if width < 3 || height < 3 {
        return destination;
    }

    let interior_rows = height - 2;
    let workers = workers.clamp(1, interior_rows);
    if workers == 1 {
        return convolve(source, kernel);
    }
    let band_rows = interior_rows.div_ceil(workers);

    let interior = &mut destination.colors_mut()[width..(height - 1) * width];
    thread::scope(|scope| {
        for (band_index, band) in interior.chunks_mut(band_rows * width).enumerate() {
            let first_row = 1 + band_index * band_rows;
            scope.spawn(move || {
                for (offset, row) in band.chunks_mut(width).enumerate() {
                    let y = first_row + offset;
                    for x in 1..width - 1 {
                        row[x] = weighted_sum(source, x, y, kernel);
                    }
                }
            });
        }
    });

    destination
}
