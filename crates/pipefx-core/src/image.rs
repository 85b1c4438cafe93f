//! Image buffer type handed to filters.
//!
//! [`ImageBuffer`] stores [`Rgb`] pixels in **row-major** order,
//! top-to-bottom:
//!
//! ```text
//! data: [px(0,0) px(1,0) ... px(w-1,0)]  <- Row 0
//!       [px(0,1) px(1,1) ... px(w-1,1)]  <- Row 1
//!       ...
//! ```
//!
//! Besides the pixel grid the buffer carries a `translucent` flag: the
//! source format had partial alpha. Filters that only support opaque
//! images check it in their applicability predicate.
//!
//! # Ownership
//!
//! Pixel data lives in a plain `Vec<Rgb>`, so [`Clone`] is a deep copy.
//! A filter that returns a new buffer never shares storage with its input.
//!
//! # Usage
//!
//! ```rust
//! use pipefx_core::{ImageBuffer, Rgb};
//!
//! let mut img = ImageBuffer::new(4, 3);
//! img.set_pixel(1, 2, Rgb::new(255, 0, 0));
//! assert_eq!(img.pixel(1, 2), Rgb::new(255, 0, 0));
//! assert_eq!(img.get_pixel(4, 0), None);
//! ```

use crate::{Error, Result, Rgb};

/// Owned RGB image buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageBuffer {
    data: Vec<Rgb>,
    width: u32,
    height: u32,
    translucent: bool,
}

impl ImageBuffer {
    /// Creates a black, opaque image.
    pub fn new(width: u32, height: u32) -> Self {
        Self::filled(width, height, Rgb::BLACK)
    }

    /// Creates an opaque image filled with one color.
    ///
    /// ```rust
    /// use pipefx_core::{ImageBuffer, Rgb};
    ///
    /// let img = ImageBuffer::filled(3, 3, Rgb::new(1, 2, 3));
    /// assert!(img.data().iter().all(|&px| px == Rgb::new(1, 2, 3)));
    /// ```
    pub fn filled(width: u32, height: u32, pixel: Rgb) -> Self {
        Self {
            data: vec![pixel; width as usize * height as usize],
            width,
            height,
            translucent: false,
        }
    }

    /// Creates an image from existing row-major pixel data.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidDimensions`] if `data.len() != width * height`.
    pub fn from_pixels(width: u32, height: u32, data: Vec<Rgb>) -> Result<Self> {
        let expected = width as usize * height as usize;
        if data.len() != expected {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("expected {} pixels, got {}", expected, data.len()),
            ));
        }
        Ok(Self {
            data,
            width,
            height,
            translucent: false,
        })
    }

    /// Returns the same image with the translucency flag set to `translucent`.
    pub fn with_translucent(mut self, translucent: bool) -> Self {
        self.translucent = translucent;
        self
    }

    /// Sets the translucency flag.
    #[inline]
    pub fn set_translucent(&mut self, translucent: bool) {
        self.translucent = translucent;
    }

    /// Returns `true` if the source format carried partial alpha.
    #[inline]
    pub fn is_translucent(&self) -> bool {
        self.translucent
    }

    /// Returns the image width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the image height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the image dimensions as (width, height).
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Returns the total number of pixels.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.data.len()
    }

    /// Returns `true` if the image has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the raw row-major pixel data.
    #[inline]
    pub fn data(&self) -> &[Rgb] {
        &self.data
    }

    /// Returns the raw row-major pixel data mutably.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [Rgb] {
        &mut self.data
    }

    /// Consumes the image and returns its pixel data.
    pub fn into_data(self) -> Vec<Rgb> {
        self.data
    }

    #[inline]
    fn offset(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Returns the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn pixel(&self, x: u32, y: u32) -> Rgb {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        self.data[self.offset(x, y)]
    }

    /// Returns the pixel at (x, y), or `None` if out of bounds.
    #[inline]
    pub fn get_pixel(&self, x: u32, y: u32) -> Option<Rgb> {
        if x < self.width && y < self.height {
            Some(self.pixel(x, y))
        } else {
            None
        }
    }

    /// Sets the pixel at (x, y).
    ///
    /// # Panics
    ///
    /// Panics if (x, y) is out of bounds.
    #[inline]
    pub fn set_pixel(&mut self, x: u32, y: u32, pixel: Rgb) {
        debug_assert!(x < self.width && y < self.height, "pixel out of bounds");
        let offset = self.offset(x, y);
        self.data[offset] = pixel;
    }

    /// Sets the pixel at (x, y), failing instead of panicking.
    pub fn try_set_pixel(&mut self, x: u32, y: u32, pixel: Rgb) -> Result<()> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x, y, self.width, self.height));
        }
        self.set_pixel(x, y, pixel);
        Ok(())
    }

    /// Returns row `y` as a slice.
    #[inline]
    pub fn row(&self, y: u32) -> &[Rgb] {
        debug_assert!(y < self.height, "row out of bounds");
        let start = y as usize * self.width as usize;
        &self.data[start..start + self.width as usize]
    }

    /// Applies `f` to every pixel in place.
    pub fn map_pixels<F>(&mut self, f: F)
    where
        F: Fn(Rgb) -> Rgb,
    {
        for px in &mut self.data {
            *px = f(*px);
        }
    }

    /// Iterates over all pixels with their coordinates.
    pub fn pixels(&self) -> impl Iterator<Item = (u32, u32, Rgb)> + '_ {
        let width = self.width.max(1);
        self.data
            .iter()
            .enumerate()
            .map(move |(i, &px)| ((i as u32) % width, (i as u32) / width, px))
    }
}
