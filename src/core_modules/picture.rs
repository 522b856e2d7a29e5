// THEORY:
// The `Picture` is the pixel grid every other module operates on. It owns a
// single contiguous buffer of `Color`s laid out row-major (`y * width + x`),
// so a whole picture is one allocation and a copy is one `memcpy`.
//
// Key architectural principles:
// 1.  **One bounds check**: All coordinate access funnels through `index`,
//     which turns an out-of-range (x, y) into `Error::OutOfBounds`. Nothing
//     else in the crate computes buffer offsets from user coordinates.
// 2.  **Independent copies**: `copy` (and `Clone`) duplicate the buffer. A
//     filter always works on its own copy, which is what makes it safe for
//     many filters to read the same source picture at once.
// 3.  **No clamping**: `set` stores whatever valid `Color` it is given. Values
//     that were computed and may overflow are clamped by the filter that
//     computed them, before they ever become a `Color`.
// 4.  **Equality by content**: Two pictures are equal when their dimensions
//     and every cell color match. The title is metadata and does not count.

use crate::core_modules::color::color::{BLACK, Color};
use crate::core_modules::pixel::pixel::Pixel;
use crate::error::{Error, Result};
use std::fmt;

/// Bytes per pixel in the raw RGB layout used by `from_rgb_bytes`/`to_rgb_bytes`.
pub const RGB_CHANNELS: usize = 3;

/// A rectangular grid of colors with fixed dimensions.
#[derive(Debug, Clone)]
pub struct Picture {
    width: usize,
    height: usize,
    title: Option<String>,
    pixels: Vec<Color>,
}

impl Picture {
    /// Creates an all-black picture.
    pub fn new(width: usize, height: usize) -> Result<Self> {
        Self::filled(width, height, BLACK)
    }

    /// Creates a picture with every cell set to `color`.
    pub fn filled(width: usize, height: usize, color: Color) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            title: None,
            pixels: vec![color; len],
        })
    }

    /// Builds a picture from decoded R,G,B bytes, row-major, top to bottom.
    pub fn from_rgb_bytes(width: usize, height: usize, bytes: &[u8]) -> Result<Self> {
        let len = Self::checked_len(width, height)?;
        let expected = len * RGB_CHANNELS;
        if bytes.len() != expected {
            return Err(Error::BufferSizeMismatch {
                expected,
                actual: bytes.len(),
            });
        }

        let pixels = bytes
            .chunks_exact(RGB_CHANNELS)
            .map(|rgb| Color::from_rgb(rgb[0], rgb[1], rgb[2]))
            .collect();

        Ok(Self {
            width,
            height,
            title: None,
            pixels,
        })
    }

    fn checked_len(width: usize, height: usize) -> Result<usize> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        width
            .checked_mul(height)
            .ok_or(Error::InvalidDimensions { width, height })
    }

    /// Returns the picture with its title replaced.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Encodes the picture as R,G,B bytes, row-major, top to bottom.
    pub fn to_rgb_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.pixels.len() * RGB_CHANNELS);
        for color in &self.pixels {
            bytes.extend_from_slice(&<[u8; 3]>::from(*color));
        }
        bytes
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// `(width, height)`
    pub fn dimensions(&self) -> (usize, usize) {
        (self.width, self.height)
    }

    pub fn title(&self) -> Option<&str> {
        self.title.as_deref()
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Buffer offset of (x, y), or `OutOfBounds`.
    #[inline]
    fn index(&self, x: usize, y: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::OutOfBounds {
                x,
                y,
                width: self.width,
                height: self.height,
            });
        }
        Ok(y * self.width + x)
    }

    /// The color stored at (x, y).
    pub fn get(&self, x: usize, y: usize) -> Result<Color> {
        let index = self.index(x, y)?;
        Ok(self.pixels[index])
    }

    /// The pixel at (x, y), tagged with its coordinate.
    pub fn pixel(&self, x: usize, y: usize) -> Result<Pixel> {
        Ok(Pixel::new(self.get(x, y)?, x, y))
    }

    /// Replaces the color at (x, y). The value is stored as-is.
    pub fn set(&mut self, x: usize, y: usize, color: impl Into<Color>) -> Result<()> {
        let index = self.index(x, y)?;
        self.pixels[index] = color.into();
        Ok(())
    }

    /// Alias of [`Picture::pixel`].
    pub fn get_pixel(&self, x: usize, y: usize) -> Result<Pixel> {
        self.pixel(x, y)
    }

    /// Alias of [`Picture::set`].
    pub fn set_color(&mut self, x: usize, y: usize, color: impl Into<Color>) -> Result<()> {
        self.set(x, y, color)
    }

    /// Alias of [`Picture::set`].
    pub fn set_pixel(&mut self, x: usize, y: usize, color: impl Into<Color>) -> Result<()> {
        self.set(x, y, color)
    }

    /// Exchanges the colors at two coordinates.
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) -> Result<()> {
        let first = self.index(a.0, a.1)?;
        let second = self.index(b.0, b.1)?;
        self.pixels.swap(first, second);
        Ok(())
    }

    /// An independent deep copy, title included.
    pub fn copy(&self) -> Self {
        self.clone()
    }

    /// Pixels in row-major order, starting at (0, 0) on every call.
    pub fn iter(&self) -> Pixels<'_> {
        Pixels {
            picture: self,
            next: 0,
        }
    }

    /// One row of colors, left to right.
    pub fn row(&self, y: usize) -> Result<&[Color]> {
        let start = self.index(0, y)?;
        Ok(&self.pixels[start..start + self.width])
    }

    /// The whole buffer, row-major.
    pub fn colors(&self) -> &[Color] {
        &self.pixels
    }

    /// Mutable access to the whole buffer, row-major.
    pub(crate) fn colors_mut(&mut self) -> &mut [Color] {
        &mut self.pixels
    }
}

impl PartialEq for Picture {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.pixels == other.pixels
    }
}

impl Eq for Picture {}

impl fmt::Display for Picture {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "A picture with width = {} and height = {}",
            self.width, self.height
        )
    }
}

/// Row-major pixel iterator returned by [`Picture::iter`].
pub struct Pixels<'a> {
    picture: &'a Picture,
    next: usize,
}

impl Iterator for Pixels<'_> {
    type Item = Pixel;

    fn next(&mut self) -> Option<Pixel> {
        let color = *self.picture.pixels.get(self.next)?;
        let x = self.next % self.picture.width;
        let y = self.next / self.picture.width;
        self.next += 1;
        Some(Pixel::new(color, x, y))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.picture.pixels.len() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Pixels<'_> {}

impl<'a> IntoIterator for &'a Picture {
    type Item = Pixel;
    type IntoIter = Pixels<'a>;

    fn into_iter(self) -> Pixels<'a> {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_modules::color::color::{BLUE, RED, WHITE};
    use pretty_assertions::assert_eq;

    fn gradient(width: usize, height: usize) -> Picture {
        let mut picture = Picture::new(width, height).expect("valid dimensions");
        for y in 0..height {
            for x in 0..width {
                let color = Color::from_rgb((x * 40) as u8, (y * 40) as u8, ((x + y) * 10) as u8);
                picture.set(x, y, color).expect("in bounds");
            }
        }
        picture
    }

    #[test]
    fn new_picture_is_black() {
        let picture = Picture::new(3, 2).expect("valid dimensions");
        assert_eq!(picture.dimensions(), (3, 2));
        assert!(picture.iter().all(|p| p.color() == BLACK));
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        assert!(matches!(
            Picture::new(0, 4),
            Err(Error::InvalidDimensions { width: 0, height: 4 })
        ));
        assert!(Picture::new(4, 0).is_err());
    }

    #[test]
    fn out_of_range_access_is_an_error() {
        let mut picture = Picture::new(2, 2).expect("valid dimensions");
        assert!(matches!(
            picture.get(2, 0),
            Err(Error::OutOfBounds { x: 2, y: 0, width: 2, height: 2 })
        ));
        assert!(picture.get(0, 2).is_err());
        assert!(picture.set(5, 5, RED).is_err());
        assert!(picture.row(2).is_err());
    }

    #[test]
    fn copy_is_equal_and_independent() {
        let original = gradient(4, 3);
        let mut copy = original.copy();
        assert_eq!(copy, original);

        copy.set(1, 1, WHITE).expect("in bounds");
        assert_ne!(copy, original);
        assert_eq!(original, gradient(4, 3));
    }

    #[test]
    fn equality_ignores_title() {
        let a = gradient(2, 2).with_title("left");
        let b = gradient(2, 2).with_title("right");
        assert_eq!(a, b);
        assert_ne!(gradient(2, 3), gradient(3, 2));
    }

    #[test]
    fn iteration_is_row_major_and_restartable() {
        let picture = gradient(3, 2);
        let coords: Vec<_> = picture.iter().map(|p| (p.x(), p.y())).collect();
        assert_eq!(
            coords,
            vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]
        );

        let first_pass: Vec<_> = picture.iter().collect();
        let second_pass: Vec<_> = (&picture).into_iter().collect();
        assert_eq!(first_pass, second_pass);
        assert_eq!(picture.iter().len(), 6);
    }

    #[test]
    fn rgb_bytes_follow_row_major_order() {
        let mut picture = Picture::new(2, 1).expect("valid dimensions");
        picture.set(1, 0, BLUE).expect("in bounds");
        assert_eq!(picture.to_rgb_bytes(), vec![0, 0, 0, 0, 0, 255]);

        let decoded = Picture::from_rgb_bytes(2, 1, &picture.to_rgb_bytes()).expect("valid bytes");
        assert_eq!(decoded, picture);
    }

    #[test]
    fn short_rgb_buffer_is_rejected() {
        assert!(matches!(
            Picture::from_rgb_bytes(2, 2, &[0; 11]),
            Err(Error::BufferSizeMismatch { expected: 12, actual: 11 })
        ));
    }

    #[test]
    fn swap_exchanges_two_cells() {
        let mut picture = Picture::new(2, 2).expect("valid dimensions");
        picture.set(0, 0, RED).expect("in bounds");
        picture.swap((0, 0), (1, 1)).expect("in bounds");
        assert_eq!(picture.get(1, 1).expect("in bounds"), RED);
        assert_eq!(picture.get(0, 0).expect("in bounds"), BLACK);
    }

    #[test]
    fn display_reports_dimensions() {
        let picture = Picture::new(5, 7).expect("valid dimensions");
        assert_eq!(picture.to_string(), "A picture with width = 5 and height = 7");
    }
}
