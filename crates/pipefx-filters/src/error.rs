//! Error types for the filter engine.
//!
//! Registry and configuration errors ([`FilterNotFound`](FilterError::FilterNotFound),
//! [`InvalidSchema`](FilterError::InvalidSchema)) abort a load. The rest are
//! recoverable by the caller: re-prompt for an id, supply a missing value,
//! or fix the parameter name/type it used.

use crate::param::ParamType;
use thiserror::Error;

/// Identifier assigned to a loaded filter, starting at 1.
pub type FilterId = usize;

/// Error type for filter loading, parameter access and execution.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FilterError {
    /// Configured identifier does not name a known filter type.
    #[error("filter not found: '{name}'")]
    FilterNotFound {
        /// Identifier as it appeared in the configuration.
        name: String,
    },

    /// No filter with this id in the current load.
    #[error("filter id not found: {id}")]
    FilterIdNotFound {
        /// Requested id.
        id: FilterId,
    },

    /// Parameter name is not declared by the filter.
    #[error("parameter '{name}' not found")]
    ParameterName {
        /// The undeclared name.
        name: String,
    },

    /// Parameter accessed with a type other than the declared one.
    #[error("parameter '{name}' type is not '{requested}' ({declared} found)")]
    ParameterType {
        /// Parameter name.
        name: String,
        /// Type used by the caller.
        requested: ParamType,
        /// Type declared in the schema.
        declared: ParamType,
    },

    /// Parameter has no stored value and no default.
    #[error("filter parameter value '{name}' of type '{value_type}' not set")]
    MissingValue {
        /// Parameter name.
        name: String,
        /// Declared type.
        value_type: ParamType,
    },

    /// A filter type declares an inconsistent parameter schema.
    #[error("invalid parameter schema: {0}")]
    InvalidSchema(String),

    /// Parameter value is well-typed but outside the range a filter accepts.
    #[error("invalid value for parameter '{name}': {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Why the value was rejected.
        reason: String,
    },

    /// Image buffer error.
    #[error(transparent)]
    Core(#[from] pipefx_core::Error),
}

impl FilterError {
    /// Returns `true` if the caller can recover by re-prompting and retrying.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::FilterIdNotFound { .. } | Self::MissingValue { .. } | Self::InvalidParameter { .. }
        )
    }

    /// Returns `true` for errors caused by the filter configuration.
    pub fn is_configuration_error(&self) -> bool {
        matches!(self, Self::FilterNotFound { .. } | Self::InvalidSchema(_))
    }
}

/// Result type for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
