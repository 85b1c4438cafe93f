//! Single-channel color decomposition (in-place filter).
//!
//! Keeps one channel of every pixel and zeroes the other two. Only opaque
//! images are accepted.

use crate::filter::{Filter, InPlaceFilter};
use crate::param::{ChannelOption, ParamSpec, ParamType};
use crate::parameters::Parameters;
use crate::FilterResult;
use pipefx_core::ImageBuffer;
use tracing::debug;

/// Reduces an image to one of its color channels, in place.
///
/// The `channel` parameter has no default and must be set before use.
#[derive(Debug, Clone, Copy, Default)]
pub struct RgbSplitFilter;

impl RgbSplitFilter {
    /// Declared parameters.
    pub const PARAMETERS: &'static [ParamSpec] = &[ParamSpec::new("channel", ParamType::Channel)];
}

impl Filter for RgbSplitFilter {
    fn name(&self) -> &'static str {
        "Rgb split"
    }

    fn parameters(&self) -> &'static [ParamSpec] {
        Self::PARAMETERS
    }

    fn is_applicable(&self, image: &ImageBuffer) -> bool {
        !image.is_translucent()
    }
}

impl InPlaceFilter for RgbSplitFilter {
    fn apply(&self, params: &Parameters, image: &mut ImageBuffer) -> FilterResult<()> {
        let channel = params.get::<ChannelOption>("channel")?;
        debug!(%channel, width = image.width(), height = image.height(), "rgb split");
        image.map_pixels(|px| channel.isolate(px));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Execution, FilterError, FilterInstance};
    use pipefx_core::Rgb;

    fn split(channel: ChannelOption) -> FilterInstance {
        let mut f = FilterInstance::in_place(RgbSplitFilter).unwrap();
        f.set_parameter("channel", channel).unwrap();
        f
    }

    fn run_in_place(f: &FilterInstance, image: &mut ImageBuffer) -> FilterResult<()> {
        match f.execution() {
            Execution::InPlace(x) => x.apply(f.params(), image),
            Execution::Copy(_) => unreachable!("rgb split is in-place"),
        }
    }

    #[test]
    fn test_unset_channel() {
        let f = FilterInstance::in_place(RgbSplitFilter).unwrap();
        let mut img = ImageBuffer::new(100, 100);
        let err = run_in_place(&f, &mut img).unwrap_err();
        assert!(matches!(err, FilterError::MissingValue { .. }));
    }

    #[test]
    fn test_channels() {
        let src = ImageBuffer::filled(3, 2, Rgb::new(10, 20, 30));

        let mut img = src.clone();
        run_in_place(&split(ChannelOption::Red), &mut img).unwrap();
        assert!(img.data().iter().all(|&px| px == Rgb::new(10, 0, 0)));

        let mut img = src.clone();
        run_in_place(&split(ChannelOption::Green), &mut img).unwrap();
        assert_eq!(img.pixel(2, 1), Rgb::new(0, 20, 0));

        let mut img = src;
        run_in_place(&split(ChannelOption::Blue), &mut img).unwrap();
        assert_eq!(img.pixel(0, 0), Rgb::new(0, 0, 30));
    }

    #[test]
    fn test_not_applicable_to_translucent() {
        let f = FilterInstance::in_place(RgbSplitFilter).unwrap();
        assert!(f.is_applicable(&ImageBuffer::new(4, 4)));
        assert!(!f.is_applicable(&ImageBuffer::new(4, 4).with_translucent(true)));
    }
}
