//! Weighted box blur (copy filter).
//!
//! Every output pixel is the per-channel mean of the `(2r+1)²` square
//! neighborhood around it. The center sample counts `weight` times, every
//! other sample once. Samples falling outside the image count as black:
//! they add nothing to the sum but still count in the denominator, so the
//! border of the output is darker than the interior.
//!
//! Means are rounded to nearest, ties to even, in exact integer arithmetic.
//!
//! Cost is `O(w * h * (2r+1)²)`; the neighborhood is summed directly.
//!
//! # Parameters
//!
//! | name     | type | default |
//! |----------|------|---------|
//! | `radius` | Int  | 1       |
//! | `weight` | Int  | 1       |
//!
//! # Example
//!
//! ```rust
//! use pipefx_core::{ImageBuffer, Rgb};
//! use pipefx_filters::{BlurFilter, FilterInstance};
//!
//! let mut blur = FilterInstance::copy(BlurFilter).unwrap();
//! blur.set_parameter("radius", 0).unwrap();
//!
//! let src = ImageBuffer::filled(3, 3, Rgb::new(10, 20, 30));
//! assert_eq!(blur.process(&src).unwrap(), src);
//! ```

use crate::filter::{CopyFilter, Filter};
use crate::param::{ParamSpec, ParamType, ParamValue};
use crate::parameters::Parameters;
use crate::{FilterError, FilterResult};
use pipefx_core::{ImageBuffer, Rgb};
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Neighborhood-mean blur producing a new buffer.
#[derive(Debug, Clone, Copy, Default)]
pub struct BlurFilter;

impl BlurFilter {
    /// Declared parameters.
    pub const PARAMETERS: &'static [ParamSpec] = &[
        ParamSpec::new("radius", ParamType::Int).with_default(ParamValue::Int(1)),
        ParamSpec::new("weight", ParamType::Int).with_default(ParamValue::Int(1)),
    ];
}

impl Filter for BlurFilter {
    fn name(&self) -> &'static str {
        "Blur"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        Self::PARAMETERS
    }
}

impl CopyFilter for BlurFilter {
    fn apply(&self, params: &Parameters, image: &ImageBuffer) -> FilterResult<ImageBuffer> {
        let radius = params.get::<i32>("radius")?;
        let weight = params.get::<i32>("weight")?;
        let kernel = Kernel::new(radius, weight)?;

        let (width, height) = image.dimensions();
        debug!(radius, weight, width, height, "blur");

        let mut out = vec![Rgb::BLACK; image.pixel_count()];
        if !image.is_empty() {
            fill_rows(&mut out, image, &kernel);
        }

        Ok(ImageBuffer::from_pixels(width, height, out)?.with_translucent(image.is_translucent()))
    }
}

/// Validated blur parameters.
#[derive(Debug, Clone, Copy)]
struct Kernel {
    radius: i64,
    weight: u64,
    /// Total sample weight of a full neighborhood.
    denominator: u64,
}

impl Kernel {
    fn new(radius: i32, weight: i32) -> FilterResult<Self> {
        if radius < 0 {
            return Err(FilterError::InvalidParameter {
                name: "radius".into(),
                reason: format!("must be >= 0, got {radius}"),
            });
        }
        if weight < 0 {
            return Err(FilterError::InvalidParameter {
                name: "weight".into(),
                reason: format!("must be >= 0, got {weight}"),
            });
        }

        let side = (radius as u64) * 2 + 1;
        let denominator = side
            .checked_mul(side)
            .and_then(|n| n.checked_add(weight as u64))
            .map(|n| n - 1)
            .ok_or_else(|| FilterError::InvalidParameter {
                name: "radius".into(),
                reason: "neighborhood too large".into(),
            })?;
        if denominator == 0 {
            return Err(FilterError::InvalidParameter {
                name: "weight".into(),
                reason: "must be >= 1 when radius is 0".into(),
            });
        }

        Ok(Self {
            radius: radius as i64,
            weight: weight as u64,
            denominator,
        })
    }

    /// Blurred value of the pixel at (x, y).
    fn sample(&self, src: &ImageBuffer, x: i64, y: i64) -> Rgb {
        let w = src.width() as i64;
        let h = src.height() as i64;
        let mut sum = [0u64; 3];

        // Out-of-bounds samples are zero, so only the clipped window is summed.
        for sy in (y - self.radius).max(0)..=(y + self.radius).min(h - 1) {
            let row = src.row(sy as u32);
            for sx in (x - self.radius).max(0)..=(x + self.radius).min(w - 1) {
                let px = row[sx as usize];
                let k = if sx == x && sy == y { self.weight } else { 1 };
                sum[0] += px.r as u64 * k;
                sum[1] += px.g as u64 * k;
                sum[2] += px.b as u64 * k;
            }
        }

        Rgb::new(
            round_div(sum[0], self.denominator),
            round_div(sum[1], self.denominator),
            round_div(sum[2], self.denominator),
        )
    }
}

#[cfg(not(feature = "parallel"))]
fn fill_rows(out: &mut [Rgb], src: &ImageBuffer, kernel: &Kernel) {
    let width = src.width() as usize;
    for (y, row) in out.chunks_mut(width).enumerate() {
        for (x, px) in row.iter_mut().enumerate() {
            *px = kernel.sample(src, x as i64, y as i64);
        }
    }
}

#[cfg(feature = "parallel")]
fn fill_rows(out: &mut [Rgb], src: &ImageBuffer, kernel: &Kernel) {
    use rayon::prelude::*;

    let width = src.width() as usize;
    out.par_chunks_mut(width).enumerate().for_each(|(y, row)| {
        for (x, px) in row.iter_mut().enumerate() {
            *px = kernel.sample(src, x as i64, y as i64);
        }
    });
}

/// `num / den` rounded to nearest, ties to even.
#[inline]
fn round_div(num: u64, den: u64) -> u8 {
    let q = num / den;
    let twice_rem = (num % den) * 2;
    let q = if twice_rem > den || (twice_rem == den && q % 2 == 1) {
        q + 1
    } else {
        q
    };
    q.min(u8::MAX as u64) as u8
}
