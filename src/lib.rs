// THEORY:
// This file is the entry point for the `collage_vision` library crate.
//
// The engine is built in layers, leaves first:
// - `core_modules::color` / `pixel`: validated RGB values and located pixels.
// - `core_modules::picture`: the bounds-checked pixel grid.
// - `core_modules::kernel`: the 3x3 convolution engine.
// - `core_modules::filters`, `scaling`, `collage`: the filter catalog, the
//   nearest-neighbor downsampler and the six-tile assembler.
// - `pipeline` / `parallel_pipeline`: the top-level sequences a driver calls.
//
// File I/O lives in `core_modules::utils::image_helper` and is only a thin
// adapter around the `image` crate; the core never touches the filesystem.

pub mod core_modules;
pub mod error;
pub mod parallel_pipeline;
pub mod pipeline;

pub use core_modules::color::color::{Channel, Color};
pub use core_modules::picture::Picture;
pub use core_modules::pixel::pixel::Pixel;
pub use error::{Error, Result};
pub use parallel_pipeline::ParallelPipeline;
pub use pipeline::{CollagePipeline, PipelineConfig};
