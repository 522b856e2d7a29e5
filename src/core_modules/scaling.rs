// THEORY:
// Downsampling keeps a collage within the size the caller asked for. It is
// plain nearest-neighbor subsampling: output (x, y) takes the color of source
// (x * stride, y * stride). There is no averaging, so every output color is a
// color that exists in the source.
//
// `shrink_factor` picks the stride. It is the smallest integer that brings
// both ceil(width / stride) and ceil(height / stride) under the requested
// maximums, with 1 as the floor. A stride of 1 is an exact copy.

use crate::core_modules::picture::Picture;
use crate::error::{Error, Result};

/// Nearest-neighbor subsampling at a fixed stride. The result is
/// `(width / stride, height / stride)`, rounded down.
pub fn downsample(source: &Picture, stride: usize) -> Result<Picture> {
    if stride == 0 {
        return Err(Error::InvalidStride { stride });
    }
    let (width, height) = source.dimensions();
    let mut result = Picture::new(width / stride, height / stride)?;
    if let Some(title) = source.title() {
        result.set_title(title);
    }

    let out_width = result.width();
    let colors = source.colors();
    for (index, color) in result.colors_mut().iter_mut().enumerate() {
        let x = (index % out_width) * stride;
        let y = (index / out_width) * stride;
        *color = colors[y * width + x];
    }
    Ok(result)
}

/// Smallest stride that fits a `width`x`height` picture into
/// `max_width`x`max_height`.
pub fn shrink_factor(width: usize, height: usize, max_width: usize, max_height: usize) -> Result<usize> {
    if max_width == 0 || max_height == 0 {
        return Err(Error::InvalidDimensions {
            width: max_width,
            height: max_height,
        });
    }
    let factor = width.div_ceil(max_width).max(height.div_ceil(max_height));
    Ok(factor.max(1))
}

/// [`shrink_factor`] for an existing picture.
pub fn shrink_factor_for(picture: &Picture, max_width: usize, max_height: usize) -> Result<usize> {
    shrink_factor(picture.width(), picture.height(), max_width, max_height)
}
