//! # pipefx-filters
//!
//! Filter contract and execution engine for the pipefx pipeline.
//!
//! # Modules
//!
//! - [`param`] - Parameter types, values and declarations
//! - [`parameters`] - Per-instance store validated against the declared schema
//! - [`filter`] - Filter traits, the in-place/copy [`Execution`] variants and [`FilterInstance`]
//! - [`registry`] - Name-to-factory [`FilterCatalog`] and the id-numbered [`FilterRegistry`]
//! - [`parse`] - Text to [`ParamValue`](param::ParamValue) conversion
//! - [`filters`] - Built-in [`BlurFilter`] and [`RgbSplitFilter`]
//!
//! # Flow
//!
//! ```text
//! filter names -> FilterRegistry::load -> applicable(image) -> set_parameter -> process
//! ```
//!
//! # Example
//!
//! ```rust
//! use pipefx_core::{ImageBuffer, Rgb};
//! use pipefx_filters::param::ParamType;
//! use pipefx_filters::{parse_value, FilterRegistry};
//!
//! let mut registry = FilterRegistry::from_list("BlurFilter, RgbSplitFilter").unwrap();
//! let image = ImageBuffer::filled(4, 4, Rgb::new(10, 20, 30));
//!
//! let split = registry.get_mut(2).unwrap();
//! let channel = parse_value(ParamType::Channel, "Red").unwrap();
//! split.set_parameter("channel", channel).unwrap();
//!
//! let out = split.process(&image).unwrap();
//! assert_eq!(out.pixel(0, 0), Rgb::new(10, 0, 0));
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod filter;
pub mod filters;
pub mod param;
pub mod parameters;
pub mod parse;
pub mod registry;

pub use error::{FilterError, FilterId, FilterResult};
pub use filter::{CopyFilter, Execution, Filter, FilterInstance, InPlaceFilter};
pub use filters::{BlurFilter, RgbSplitFilter};
pub use param::{ChannelOption, ParamKind, ParamSpec, ParamType, ParamValue};
pub use parameters::Parameters;
pub use parse::parse_value;
pub use registry::{FilterCatalog, FilterRegistry};
