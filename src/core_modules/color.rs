// THEORY:
// The `Color` module is the leaf of the whole engine. A `Color` is a "dumb"
// value type: three 8-bit channels and nothing else. Every other layer (the
// pixel grid, the filters, the collage) is built out of copies of it.
//
// Key principles:
// 1.  **Validated at the boundary**: Constructors and setters that accept wide
//     integers check the range and fail with `ChannelOutOfRange`. Nothing in
//     this module clamps; clamping is a deliberate step taken by the filters on
//     values they computed themselves.
// 2.  **Value semantics**: `Color` is `Copy`. Handing a color to a grid copies
//     it, so no two cells can ever alias the same color.
// 3.  **Constants, not singletons**: The named colors are `const` items. They
//     live for the whole process and can never be mutated through a shared
//     reference.

pub mod color {
    use crate::error::{Error, Result};
    use std::fmt;

    pub type Channel = u8;

    /// A single RGB color with 8 bits per channel.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Color {
        red: Channel,
        green: Channel,
        blue: Channel,
    }

    /// Returns the value as a channel, or `ChannelOutOfRange` if it does not fit.
    pub fn check_channel(value: i32) -> Result<Channel> {
        Channel::try_from(value).map_err(|_| Error::ChannelOutOfRange { value })
    }

    impl Color {
        /// Builds a color from wide integers, rejecting anything outside 0..=255.
        pub fn new(red: i32, green: i32, blue: i32) -> Result<Self> {
            Ok(Self {
                red: check_channel(red)?,
                green: check_channel(green)?,
                blue: check_channel(blue)?,
            })
        }

        /// Infallible constructor for values that are already channels.
        pub const fn from_rgb(red: Channel, green: Channel, blue: Channel) -> Self {
            Self { red, green, blue }
        }

        /// A gray with all three channels set to `value`.
        pub const fn gray(value: Channel) -> Self {
            Self::from_rgb(value, value, value)
        }

        pub fn red(&self) -> Channel {
            self.red
        }

        pub fn green(&self) -> Channel {
            self.green
        }

        pub fn blue(&self) -> Channel {
            self.blue
        }

        /// The three channels as an `(r, g, b)` tuple.
        pub fn channels(&self) -> (Channel, Channel, Channel) {
            (self.red, self.green, self.blue)
        }

        /// Alias of [`Color::channels`].
        pub fn rgb(&self) -> (Channel, Channel, Channel) {
            self.channels()
        }

        /// Integer mean of the three channels, rounded down.
        pub fn average(&self) -> Channel {
            ((self.red as u16 + self.green as u16 + self.blue as u16) / 3) as Channel
        }

        pub fn set_red(&mut self, value: i32) -> Result<()> {
            self.red = check_channel(value)?;
            Ok(())
        }

        pub fn set_green(&mut self, value: i32) -> Result<()> {
            self.green = check_channel(value)?;
            Ok(())
        }

        pub fn set_blue(&mut self, value: i32) -> Result<()> {
            self.blue = check_channel(value)?;
            Ok(())
        }

        /// Replaces all three channels. On error the color is left untouched.
        pub fn set_rgb(&mut self, red: i32, green: i32, blue: i32) -> Result<()> {
            *self = Self::new(red, green, blue)?;
            Ok(())
        }
    }

    impl From<(Channel, Channel, Channel)> for Color {
        fn from((red, green, blue): (Channel, Channel, Channel)) -> Self {
            Self::from_rgb(red, green, blue)
        }
    }

    impl From<[Channel; 3]> for Color {
        fn from(bytes: [Channel; 3]) -> Self {
            Self::from_rgb(bytes[0], bytes[1], bytes[2])
        }
    }

    impl TryFrom<(i32, i32, i32)> for Color {
        type Error = Error;

        fn try_from((red, green, blue): (i32, i32, i32)) -> Result<Self> {
            Self::new(red, green, blue)
        }
    }

    impl From<Color> for [Channel; 3] {
        fn from(color: Color) -> Self {
            [color.red, color.green, color.blue]
        }
    }

    impl fmt::Display for Color {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(
                f,
                "Color: red = {}, green = {}, blue = {}",
                self.red, self.green, self.blue
            )
        }
    }

    pub const BLACK: Color = Color::from_rgb(0, 0, 0);
    pub const WHITE: Color = Color::from_rgb(255, 255, 255);
    pub const GRAY: Color = Color::from_rgb(128, 128, 128);
    pub const RED: Color = Color::from_rgb(255, 0, 0);
    pub const LIME: Color = Color::from_rgb(0, 255, 0);
    pub const BLUE: Color = Color::from_rgb(0, 0, 255);
    pub const YELLOW: Color = Color::from_rgb(255, 255, 0);
    pub const CYAN: Color = Color::from_rgb(0, 255, 255);
    pub const MAGENTA: Color = Color::from_rgb(255, 0, 255);
    pub const SILVER: Color = Color::from_rgb(192, 192, 192);
    pub const MAROON: Color = Color::from_rgb(128, 0, 0);
    pub const GREEN: Color = Color::from_rgb(0, 128, 0);
    pub const NAVY: Color = Color::from_rgb(0, 0, 128);
    pub const LAVENDER: Color = Color::from_rgb(230, 230, 250);
}
