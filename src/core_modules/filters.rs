// THEORY:
// The filter catalog is the set of whole-picture transforms a collage is made
// from. Every filter has the same shape: borrow a source picture, copy it,
// rewrite the copy, return the copy. The source is never touched, which is
// the contract that lets the parallel pipeline run all of them against one
// shared picture.
//
// Two families live here:
// 1.  **Per-pixel filters** (`brighten`, `grayscale`, `negative`): each output
//     pixel depends only on the same input pixel. Brighten is the only one
//     whose result can leave the channel range, so it clamps before truncating.
// 2.  **Geometric filters** (`mirror_horizontal`, `mirror_vertical`, `double`):
//     pixels move but their colors do not change. The mirrors swap pairs of
//     cells across the middle column or row, leaving the centre line in place
//     when the dimension is odd.
//
// `edge_detect` delegates to the convolution engine. `flip` is kept as a name
// for the vertical mirror; both resolve to the same code.
//
// The `Filter` enum names catalog entries so callers can schedule them as
// data (the collage layout, the worker pool) instead of as function pointers.

use crate::core_modules::color::color::{Channel, Color};
use crate::core_modules::kernel::{EDGE_DETECT_KERNEL, convolve, convolve_parallel};
use crate::core_modules::picture::Picture;
use crate::error::Result;
use std::fmt;

pub const DEFAULT_BRIGHTEN_FACTOR: f64 = 1.5;

/// Scales every channel by `factor`, clamps to 0..=255 and truncates.
pub fn brighten(source: &Picture, factor: f64) -> Picture {
    let scale = |channel: Channel| (channel as f64 * factor).clamp(0.0, 255.0) as Channel;

    let mut result = source.copy();
    for color in result.colors_mut() {
        *color = Color::from_rgb(scale(color.red()), scale(color.green()), scale(color.blue()));
    }
    result
}

/// Replaces every pixel with the floor of its channel mean.
pub fn grayscale(source: &Picture) -> Picture {
    let mut result = source.copy();
    for color in result.colors_mut() {
        *color = Color::gray(color.average());
    }
    result
}

/// Inverts every channel.
pub fn negative(source: &Picture) -> Picture {
    let mut result = source.copy();
    for color in result.colors_mut() {
        *color = Color::from_rgb(255 - color.red(), 255 - color.green(), 255 - color.blue());
    }
    result
}

/// Left-right flip: reflects across the vertical axis.
pub fn mirror_horizontal(source: &Picture) -> Picture {
    let mut result = source.copy();
    let (width, height) = source.dimensions();
    let colors = result.colors_mut();
    for y in 0..height {
        let row = y * width;
        for x in 0..width / 2 {
            colors.swap(row + x, row + width - 1 - x);
        }
    }
    result
}

/// Top-bottom flip: reflects across the horizontal axis.
pub fn mirror_vertical(source: &Picture) -> Picture {
    let mut result = source.copy();
    let (width, height) = source.dimensions();
    let colors = result.colors_mut();
    for y in 0..height / 2 {
        let (top, bottom) = colors.split_at_mut((height - 1 - y) * width);
        top[y * width..(y + 1) * width].swap_with_slice(&mut bottom[..width]);
    }
    result
}

/// Alias of [`mirror_vertical`].
pub fn flip(source: &Picture) -> Picture {
    mirror_vertical(source)
}

/// Edge detection through the convolution engine.
pub fn edge_detect(source: &Picture) -> Picture {
    convolve(source, &EDGE_DETECT_KERNEL)
}

/// Doubles both dimensions; output (x, y) takes source (x / 2, y / 2).
pub fn double(source: &Picture) -> Result<Picture> {
    let (width, height) = source.dimensions();
    let mut result = Picture::new(width * 2, height * 2)?;
    let colors = source.colors();
    for (index, color) in result.colors_mut().iter_mut().enumerate() {
        let x = (index % (width * 2)) / 2;
        let y = (index / (width * 2)) / 2;
        *color = colors[y * width + x];
    }
    Ok(result)
}

/// One entry of the filter catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Filter {
    Brighten,
    EdgeDetect,
    Flip,
    MirrorHorizontal,
    MirrorVertical,
    Grayscale,
    Negative,
}

/// The six filters of a collage, in tile order.
pub const COLLAGE_FILTERS: [Filter; 6] = [
    Filter::Brighten,
    Filter::EdgeDetect,
    Filter::Flip,
    Filter::MirrorHorizontal,
    Filter::MirrorVertical,
    Filter::Grayscale,
];

/// Tunables shared by the catalog filters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FilterSettings {
    pub brighten_factor: f64,
    /// Row bands used by edge detection; 1 keeps it on the calling thread.
    pub workers: usize,
}

impl Default for FilterSettings {
    fn default() -> Self {
        Self {
            brighten_factor: DEFAULT_BRIGHTEN_FACTOR,
            workers: 1,
        }
    }
}

impl Filter {
    /// Applies the filter with default settings.
    pub fn apply(&self, source: &Picture) -> Picture {
        self.apply_with(source, &FilterSettings::default())
    }

    pub fn apply_with(&self, source: &Picture, settings: &FilterSettings) -> Picture {
        match self {
            Filter::Brighten => brighten(source, settings.brighten_factor),
            Filter::EdgeDetect if settings.workers > 1 => {
                convolve_parallel(source, &EDGE_DETECT_KERNEL, settings.workers)
            }
            Filter::EdgeDetect => edge_detect(source),
            Filter::Flip => flip(source),
            Filter::MirrorHorizontal => mirror_horizontal(source),
            Filter::MirrorVertical => mirror_vertical(source),
            Filter::Grayscale => grayscale(source),
            Filter::Negative => negative(source),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Filter::Brighten => "brighten",
            Filter::EdgeDetect => "edge-detect",
            Filter::Flip => "flip",
            Filter::MirrorHorizontal => "mirror-horizontal",
            Filter::MirrorVertical => "mirror-vertical",
            Filter::Grayscale => "grayscale",
            Filter::Negative => "negative",
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Runs every collage filter over `source`, in tile order.
pub fn create_filtered_pics(source: &Picture) -> [Picture; 6] {
    create_filtered_pics_with(source, &FilterSettings::default())
}

pub fn create_filtered_pics_with(source: &Picture, settings: &FilterSettings) -> [Picture; 6] {
    COLLAGE_FILTERS.map(|filter| filter.apply_with(source, settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::color::{BLUE, RED, WHITE};
    use pretty_assertions::assert_eq;

    fn sample(width: usize, height: usize) -> Picture {
        let mut picture = Picture::new(width, height).unwrap();
        for y in 0..height {
            for x in 0..width {
                let color = Color::from_rgb((x * 50 % 256) as u8, (y * 70 % 256) as u8, ((x * y * 11) % 256) as u8);
                picture.set(x, y, color).unwrap();
            }
        }
        picture
    }

    #[test]
    fn grayscale_of_red_is_85() {
        let red = Picture::filled(4, 4, RED).unwrap();
        assert_eq!(grayscale(&red), Picture::filled(4, 4, Color::gray(85)).unwrap());
    }

    #[test]
    fn grayscale_is_idempotent() {
        for (w, h) in [(1, 1), (3, 5), (6, 2)] {
            let once = grayscale(&sample(w, h));
            assert_eq!(grayscale(&once), once);
        }
    }

    #[test]
    fn brighten_scales_and_clamps() {
        let mut source = Picture::new(2, 1).unwrap();
        source.set(0, 0, Color::gray(100)).unwrap();
        source.set(1, 0, Color::gray(200)).unwrap();
        let result = brighten(&source, DEFAULT_BRIGHTEN_FACTOR);
        assert_eq!(result.get(0, 0).unwrap(), Color::gray(150));
        assert_eq!(result.get(1, 0).unwrap(), WHITE);
    }

    #[test]
    fn brighten_truncates_toward_zero() {
        let source = Picture::filled(1, 1, Color::from_rgb(1, 3, 5)).unwrap();
        let result = brighten(&source, 1.5);
        assert_eq!(result.get(0, 0).unwrap(), Color::from_rgb(1, 4, 7));

        let dimmed = brighten(&source, -2.0);
        assert_eq!(dimmed.get(0, 0).unwrap(), Color::gray(0));
    }

    #[test]
    fn negative_inverts_channels() {
        let source = Picture::filled(2, 2, Color::from_rgb(0, 100, 255)).unwrap();
        assert_eq!(
            negative(&source).get(1, 1).unwrap(),
            Color::from_rgb(255, 155, 0)
        );
    }

    #[test]
    fn mirror_horizontal_swaps_columns() {
        let mut source = Picture::new(3, 2).unwrap();
        source.set(0, 1, BLUE).unwrap();
        let result = mirror_horizontal(&source);
        assert_eq!(result.get(2, 1).unwrap(), BLUE);
        assert_eq!(result.get(0, 1).unwrap(), source.get(2, 1).unwrap());
        assert_eq!(result.get(1, 0).unwrap(), source.get(1, 0).unwrap());
    }

    #[test]
    fn mirror_vertical_swaps_rows() {
        let mut source = Picture::new(2, 3).unwrap();
        source.set(1, 0, RED).unwrap();
        let result = mirror_vertical(&source);
        assert_eq!(result.get(1, 2).unwrap(), RED);
        assert_eq!(result.get(1, 0).unwrap(), source.get(1, 2).unwrap());
    }

    #[test]
    fn mirrors_are_involutions() {
        for (w, h) in [(1, 1), (1, 4), (4, 1), (5, 3), (6, 6)] {
            let source = sample(w, h);
            assert_eq!(mirror_horizontal(&mirror_horizontal(&source)), source);
            assert_eq!(mirror_vertical(&mirror_vertical(&source)), source);
        }
    }

    #[test]
    fn flip_and_mirror_vertical_agree() {
        for (w, h) in [(1, 1), (2, 7), (5, 4), (3, 3)] {
            let source = sample(w, h);
            assert_eq!(flip(&source), mirror_vertical(&source));
        }
    }

    #[test]
    fn mirror_vertical_matches_pixelwise_definition() {
        let source = sample(4, 5);
        let result = mirror_vertical(&source);
        for pixel in &source {
            assert_eq!(
                result.get(pixel.x(), source.height() - 1 - pixel.y()).unwrap(),
                pixel.color()
            );
        }
    }

    #[test]
    fn double_repeats_each_pixel() {
        let source = sample(3, 2);
        let result = double(&source).unwrap();
        assert_eq!(result.dimensions(), (6, 4));
        for pixel in &result {
            assert_eq!(pixel.color(), source.get(pixel.x() / 2, pixel.y() / 2).unwrap());
        }
    }

    #[test]
    fn filters_leave_source_untouched() {
        let source = sample(5, 5);
        let before = source.copy();
        for filter in COLLAGE_FILTERS {
            let _ = filter.apply(&source);
        }
        let _ = negative(&source);
        assert_eq!(source, before);
    }

    #[test]
    fn collage_filters_follow_tile_order() {
        let source = sample(4, 3);
        let pics = create_filtered_pics(&source);
        assert_eq!(pics[0], brighten(&source, DEFAULT_BRIGHTEN_FACTOR));
        assert_eq!(pics[1], edge_detect(&source));
        assert_eq!(pics[2], flip(&source));
        assert_eq!(pics[3], mirror_horizontal(&source));
        assert_eq!(pics[4], mirror_vertical(&source));
        assert_eq!(pics[5], grayscale(&source));
    }

    #[test]
    fn banded_edge_detect_matches_sequential() {
        let source = sample(9, 8);
        let settings = FilterSettings {
            workers: 3,
            ..FilterSettings::default()
        };
        assert_eq!(
            Filter::EdgeDetect.apply_with(&source, &settings),
            edge_detect(&source)
        );
    }
}
