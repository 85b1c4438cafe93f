//! Filter contract and execution variants.
//!
//! Every filter implements [`Filter`] (name, declared parameters,
//! applicability) plus exactly one of the two execution traits:
//!
//! - [`InPlaceFilter`] - mutates the buffer it is given
//! - [`CopyFilter`] - returns a new buffer and leaves its input alone
//!
//! A loaded filter is a [`FilterInstance`]: the implementation wrapped in
//! the closed [`Execution`] enum, plus its own [`Parameters`]. Callers
//! pick the execution shape with an exhaustive `match`:
//!
//! ```rust
//! use pipefx_core::{ImageBuffer, Rgb};
//! use pipefx_filters::{BlurFilter, Execution, FilterInstance};
//!
//! let blur = FilterInstance::copy(BlurFilter).unwrap();
//! let mut image = ImageBuffer::filled(4, 4, Rgb::new(50, 50, 50));
//!
//! match blur.execution() {
//!     Execution::InPlace(f) => f.apply(blur.params(), &mut image).unwrap(),
//!     Execution::Copy(f) => image = f.apply(blur.params(), &image).unwrap(),
//! }
//! assert_eq!(image.pixel(1, 1), Rgb::new(50, 50, 50));
//! ```

use crate::param::{ParamKind, ParamSpec, ParamType, ParamValue};
use crate::parameters::Parameters;
use crate::FilterResult;
use pipefx_core::ImageBuffer;
use std::fmt;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Capabilities shared by all filters.
pub trait Filter: Send + Sync {
    /// Display name.
    fn name(&self) -> &'static str;

    /// Declared parameters; the same static slice for every instance of a type.
    fn parameters(&self) -> &'static [ParamSpec];

    /// Whether `image` is a valid input. Must not mutate anything.
    fn is_applicable(&self, image: &ImageBuffer) -> bool {
        let _ = image;
        true
    }
}

/// Filter that mutates its input buffer.
pub trait InPlaceFilter: Filter {
    /// Processes `image` in place, reading parameters from `params`.
    fn apply(&self, params: &Parameters, image: &mut ImageBuffer) -> FilterResult<()>;
}

/// Filter that produces a new buffer of the same dimensions.
pub trait CopyFilter: Filter {
    /// Processes `image` into a new buffer, reading parameters from `params`.
    fn apply(&self, params: &Parameters, image: &ImageBuffer) -> FilterResult<ImageBuffer>;
}

/// Execution shape of a filter, fixed per filter type.
pub enum Execution {
    /// Mutates the given buffer.
    InPlace(Box<dyn InPlaceFilter>),
    /// Produces a new buffer.
    Copy(Box<dyn CopyFilter>),
}

impl Execution {
    /// Display name of the wrapped filter.
    pub fn name(&self) -> &'static str {
        match self {
            Self::InPlace(f) => f.name(),
            Self::Copy(f) => f.name(),
        }
    }

    /// Declared parameters of the wrapped filter.
    pub fn parameters(&self) -> &'static [ParamSpec] {
        match self {
            Self::InPlace(f) => f.parameters(),
            Self::Copy(f) => f.parameters(),
        }
    }

    /// Applicability predicate of the wrapped filter.
    pub fn is_applicable(&self, image: &ImageBuffer) -> bool {
        match self {
            Self::InPlace(f) => f.is_applicable(image),
            Self::Copy(f) => f.is_applicable(image),
        }
    }

    /// Returns `true` for [`Execution::InPlace`].
    pub fn is_in_place(&self) -> bool {
        matches!(self, Self::InPlace(_))
    }
}

impl fmt::Debug for Execution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InPlace(x) => f.debug_tuple("InPlace").field(&x.name()).finish(),
            Self::Copy(x) => f.debug_tuple("Copy").field(&x.name()).finish(),
        }
    }
}

/// A filter implementation together with its parameter values.
#[derive(Debug)]
pub struct FilterInstance {
    execution: Execution,
    params: Parameters,
}

impl FilterInstance {
    /// Wraps an execution variant; the parameter store starts empty.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidSchema`](crate::FilterError::InvalidSchema) if
    /// the filter declares an inconsistent schema.
    pub fn new(execution: Execution) -> FilterResult<Self> {
        let params = Parameters::new(execution.parameters())?;
        Ok(Self { execution, params })
    }

    /// Creates an instance of an in-place filter.
    pub fn in_place<F: InPlaceFilter + 'static>(filter: F) -> FilterResult<Self> {
        Self::new(Execution::InPlace(Box::new(filter)))
    }

    /// Creates an instance of a copy filter.
    pub fn copy<F: CopyFilter + 'static>(filter: F) -> FilterResult<Self> {
        Self::new(Execution::Copy(Box::new(filter)))
    }

    /// Display name.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.execution.name()
    }

    /// Whether this filter accepts `image`.
    #[inline]
    pub fn is_applicable(&self, image: &ImageBuffer) -> bool {
        self.execution.is_applicable(image)
    }

    /// The wrapped implementation.
    #[inline]
    pub fn execution(&self) -> &Execution {
        &self.execution
    }

    /// Parameter store handed to the implementation.
    #[inline]
    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Declared `(name, type)` pairs.
    pub fn parameters(&self) -> impl Iterator<Item = (&'static str, ParamType)> + '_ {
        self.params.declared()
    }

    /// Declared parameter specs.
    #[inline]
    pub fn schema(&self) -> &'static [ParamSpec] {
        self.params.schema()
    }

    /// See [`Parameters::get`].
    pub fn get_parameter<T: ParamKind>(&self, name: &str) -> FilterResult<T> {
        self.params.get(name)
    }

    /// See [`Parameters::set`].
    pub fn set_parameter(&mut self, name: &str, value: impl Into<ParamValue>) -> FilterResult<()> {
        self.params.set(name, value)
    }

    /// See [`Parameters::clear`].
    pub fn clear_parameter(&mut self, name: &str) -> FilterResult<Option<ParamValue>> {
        self.params.clear(name)
    }

    /// Runs the filter and returns the result, leaving `image` untouched.
    ///
    /// Copy filters run directly; in-place filters run on a working copy.
    pub fn process(&self, image: &ImageBuffer) -> FilterResult<ImageBuffer> {
        debug!(
            filter = self.name(),
            in_place = self.execution.is_in_place(),
            width = image.width(),
            height = image.height(),
            "processing image"
        );
        match &self.execution {
            Execution::Copy(f) => f.apply(&self.params, image),
            Execution::InPlace(f) => {
                let mut out = image.clone();
                f.apply(&self.params, &mut out)?;
                Ok(out)
            }
        }
    }
}

impl fmt::Display for FilterInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
