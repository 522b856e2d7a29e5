// THEORY:
// A `Pixel` is what a caller sees when it walks a picture: a color together
// with the coordinate it was read from. The grid itself stores bare colors
// in a flat buffer; pixels are built on demand by the accessor and the
// iterator, so they carry no ownership link back to the grid. Mutating a
// `Pixel` value never changes the picture it came from; writes go through
// `Picture::set`.
//
// The coordinate is informational (iteration order, diagnostics, `Display`).
// It is never used as an access key and is excluded from picture equality.

pub mod pixel {
    use crate::core_modules::color::color::{Channel, Color};
    use crate::error::Result;
    use std::fmt;

    /// A color read from a picture, tagged with its location.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Pixel {
        color: Color,
        x: usize,
        y: usize,
    }

    impl Pixel {
        pub fn new(color: Color, x: usize, y: usize) -> Self {
            Self { color, x, y }
        }

        pub fn color(&self) -> Color {
            self.color
        }

        pub fn x(&self) -> usize {
            self.x
        }

        pub fn y(&self) -> usize {
            self.y
        }

        pub fn red(&self) -> Channel {
            self.color.red()
        }

        pub fn green(&self) -> Channel {
            self.color.green()
        }

        pub fn blue(&self) -> Channel {
            self.color.blue()
        }

        pub fn rgb(&self) -> (Channel, Channel, Channel) {
            self.color.channels()
        }

        pub fn set_color(&mut self, color: impl Into<Color>) {
            self.color = color.into();
        }

        pub fn set_red(&mut self, value: i32) -> Result<()> {
            self.color.set_red(value)
        }

        pub fn set_green(&mut self, value: i32) -> Result<()> {
            self.color.set_green(value)
        }

        pub fn set_blue(&mut self, value: i32) -> Result<()> {
            self.color.set_blue(value)
        }
    }

    impl From<Pixel> for Color {
        fn from(pixel: Pixel) -> Self {
            pixel.color
        }
    }

    impl fmt::Display for Pixel {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            let (red, green, blue) = self.rgb();
            write!(
                f,
                "Pixel at ({}, {}) with red={}, green={}, blue={}",
                self.x, self.y, red, green, blue
            )
        }
    }
}
