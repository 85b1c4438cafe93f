//! # pipefx-core
//!
//! Core types for the pipefx image-filter pipeline.
//!
//! This crate provides the foundational types shared by the rest of the
//! workspace:
//!
//! - [`Rgb`] - 8-bit RGB pixel
//! - [`ImageBuffer`] - Owned, row-major pixel grid with a translucency flag
//! - [`Error`], [`Result`] - Buffer construction and access errors
//!
//! ## Crate Structure
//!
//! ```text
//! pipefx-core (this crate)
//!    ^
//!    |
//!    +-- pipefx-filters (parameter contract, registry, filters)
//!    +-- pipefx-io (PNG read/write)
//!    +-- pipefx-cli (interactive shell)
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod image;
pub mod pixel;

pub use error::{Error, Result};
pub use image::ImageBuffer;
pub use pixel::Rgb;

/// Prelude module for convenient imports.
///
/// ```
/// use pipefx_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::image::ImageBuffer;
    pub use crate::pixel::Rgb;
}
