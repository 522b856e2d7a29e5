// THEORY:
// A single error enum covers every failure the engine can report. The core
// never recovers from any of them: a bad channel value, an out-of-range
// coordinate or mismatched tile sizes all end the operation and travel back
// to the caller through `?`.
//
// The variants fall into three groups:
// 1.  **Value errors**: `ChannelOutOfRange` is raised by `Color` constructors
//     and setters. Clamping only ever happens inside the filters, on computed
//     sums, never on raw inputs.
// 2.  **Access errors**: `OutOfBounds` is raised by the grid accessor, the one
//     place where coordinates are validated.
// 3.  **Preconditions**: zero dimensions, zero strides, tiles of different
//     sizes and raw buffers of the wrong length are programmer errors and are
//     reported as soon as they are detected, with no partial result.
//
// Adapter failures (decoding, encoding, worker pool) wrap their source errors.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("channel value {value} is outside 0..=255")]
    ChannelOutOfRange { value: i32 },

    #[error("pixel ({x}, {y}) is outside a {width}x{height} picture")]
    OutOfBounds {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
    },

    #[error("{} has unsupported color mode {mode}", path.display())]
    UnsupportedColorMode { path: PathBuf, mode: String },

    #[error("invalid picture dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("invalid downsample stride {stride}")]
    InvalidStride { stride: usize },

    #[error("tile {index} is {actual:?} but tile 0 is {expected:?}")]
    DimensionMismatch {
        index: usize,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("raw buffer holds {actual} bytes, expected {expected}")]
    BufferSizeMismatch { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("image codec error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("worker failed: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, Error>;
