//! Built-in filters.
//!
//! - [`BlurFilter`] - weighted neighborhood blur (copy)
//! - [`RgbSplitFilter`] - single-channel decomposition (in-place)

pub mod blur;
pub mod rgb_split;

pub use blur::BlurFilter;
pub use rgb_split::RgbSplitFilter;
