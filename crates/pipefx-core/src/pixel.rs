//! 8-bit RGB pixel type.
//!
//! [`Rgb`] is the element type of [`ImageBuffer`](crate::ImageBuffer) and
//! also the value carried by color-typed filter parameters.
//!
//! ```
//! use pipefx_core::Rgb;
//!
//! let px = Rgb::new(10, 20, 30);
//! assert_eq!(px.to_array(), [10, 20, 30]);
//! assert_eq!(px.to_string(), "10,20,30");
//! ```

use std::fmt;

/// RGB pixel with one byte per channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[repr(C)]
pub struct Rgb {
    /// Red channel
    pub r: u8,
    /// Green channel
    pub g: u8,
    /// Blue channel
    pub b: u8,
}

impl Rgb {
    /// Black (all channels zero).
    pub const BLACK: Self = Self::new(0, 0, 0);

    /// White (all channels 255).
    pub const WHITE: Self = Self::new(255, 255, 255);

    /// Creates a pixel from its three channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Returns channels as `[r, g, b]`.
    #[inline]
    pub const fn to_array(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    /// Creates a pixel from `[r, g, b]`.
    #[inline]
    pub const fn from_array(c: [u8; 3]) -> Self {
        Self::new(c[0], c[1], c[2])
    }
}

impl From<[u8; 3]> for Rgb {
    #[inline]
    fn from(c: [u8; 3]) -> Self {
        Self::from_array(c)
    }
}

impl From<Rgb> for [u8; 3] {
    #[inline]
    fn from(px: Rgb) -> Self {
        px.to_array()
    }
}

/// Formats as `r,g,b`, the same shape the color parameter parser accepts.
impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.r, self.g, self.b)
    }
}
