//! Per-instance parameter store validated against a static schema.
//!
//! [`Parameters`] pairs the filter type's declared [`ParamSpec`] list with
//! the values a caller assigned to one instance. The schema is shared and
//! read-only; the store is owned by the instance.
//!
//! # Example
//!
//! ```rust
//! use pipefx_filters::parameters::Parameters;
//! use pipefx_filters::param::{ParamSpec, ParamType, ParamValue};
//!
//! const SCHEMA: &[ParamSpec] = &[
//!     ParamSpec::new("radius", ParamType::Int).with_default(ParamValue::Int(1)),
//! ];
//!
//! let mut params = Parameters::new(SCHEMA).unwrap();
//! assert_eq!(params.get::<i32>("radius").unwrap(), 1);
//!
//! params.set("radius", 4).unwrap();
//! assert_eq!(params.get::<i32>("radius").unwrap(), 4);
//! assert!(params.set("radius", 4.0f32).is_err());
//! ```

use crate::param::{ParamKind, ParamSpec, ParamType, ParamValue};
use crate::{FilterError, FilterResult};
use std::collections::HashMap;
#[allow(unused_imports)]
use tracing::{debug, trace};

/// Schema plus assigned values for one filter instance.
#[derive(Debug, Clone)]
pub struct Parameters {
    schema: &'static [ParamSpec],
    values: HashMap<&'static str, ParamValue>,
}

impl Parameters {
    /// Creates an empty store for `schema`.
    ///
    /// # Errors
    ///
    /// [`FilterError::InvalidSchema`] if two specs share a name or a default
    /// value's type differs from the declared type.
    pub fn new(schema: &'static [ParamSpec]) -> FilterResult<Self> {
        validate_schema(schema)?;
        Ok(Self {
            schema,
            values: HashMap::new(),
        })
    }

    /// Declared parameters, in declaration order.
    #[inline]
    pub fn schema(&self) -> &'static [ParamSpec] {
        self.schema
    }

    /// Iterates `(name, type)` pairs of the declared parameters.
    pub fn declared(&self) -> impl Iterator<Item = (&'static str, ParamType)> + '_ {
        self.schema.iter().map(|p| (p.name, p.value_type))
    }

    fn spec(&self, name: &str) -> FilterResult<&'static ParamSpec> {
        self.schema
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| FilterError::ParameterName {
                name: name.to_string(),
            })
    }

    /// Reads a parameter as `T`.
    ///
    /// Falls back to the declared default when nothing was assigned.
    ///
    /// # Errors
    ///
    /// - [`FilterError::ParameterName`] if `name` is not declared
    /// - [`FilterError::ParameterType`] if `T` is not the declared type
    /// - [`FilterError::MissingValue`] if unset and without default
    pub fn get<T: ParamKind>(&self, name: &str) -> FilterResult<T> {
        let spec = self.spec(name)?;
        if spec.value_type != T::TYPE {
            return Err(FilterError::ParameterType {
                name: name.to_string(),
                requested: T::TYPE,
                declared: spec.value_type,
            });
        }

        let value = match self.values.get(spec.name) {
            Some(v) => v,
            None => match &spec.default {
                Some(d) => {
                    trace!(name, default = %d, "parameter default");
                    d
                }
                None => {
                    return Err(FilterError::MissingValue {
                        name: name.to_string(),
                        value_type: spec.value_type,
                    });
                }
            },
        };

        T::from_value(value).ok_or_else(|| {
            FilterError::InvalidSchema(format!(
                "parameter '{}' holds a {} value, declared {}",
                name,
                value.param_type(),
                spec.value_type
            ))
        })
    }

    /// Returns the stored value, ignoring defaults.
    pub fn stored(&self, name: &str) -> Option<&ParamValue> {
        self.values.get(name)
    }

    /// Assigns a parameter value.
    ///
    /// # Errors
    ///
    /// - [`FilterError::ParameterName`] if `name` is not declared
    /// - [`FilterError::ParameterType`] if the value's type is not the
    ///   declared type; the store is left unchanged
    pub fn set(&mut self, name: &str, value: impl Into<ParamValue>) -> FilterResult<()> {
        let value = value.into();
        let spec = self.spec(name)?;
        if value.param_type() != spec.value_type {
            return Err(FilterError::ParameterType {
                name: name.to_string(),
                requested: value.param_type(),
                declared: spec.value_type,
            });
        }
        trace!(name, %value, "set parameter");
        self.values.insert(spec.name, value);
        Ok(())
    }

    /// Removes an assigned value so the default applies again.
    ///
    /// Returns the removed value, if any.
    pub fn clear(&mut self, name: &str) -> FilterResult<Option<ParamValue>> {
        let spec = self.spec(name)?;
        Ok(self.values.remove(spec.name))
    }

    /// Removes every assigned value.
    pub fn reset(&mut self) {
        self.values.clear();
    }
}

fn validate_schema(schema: &[ParamSpec]) -> FilterResult<()> {
    for (i, spec) in schema.iter().enumerate() {
        if schema[..i].iter().any(|p| p.name == spec.name) {
            return Err(FilterError::InvalidSchema(format!(
                "parameter '{}' declared twice",
                spec.name
            )));
        }
        if let Some(default) = &spec.default {
            if default.param_type() != spec.value_type {
                return Err(FilterError::InvalidSchema(format!(
                    "parameter '{}' has a default value of a wrong type ({}, declared {})",
                    spec.name,
                    default.param_type(),
                    spec.value_type
                )));
            }
        }
    }
    debug!(count = schema.len(), "parameter schema validated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::param::ChannelOption;
    use approx::assert_relative_eq;
    use pipefx_core::Rgb;

    const SCHEMA: &[ParamSpec] = &[
        ParamSpec::new("a", ParamType::Float),
        ParamSpec::new("size", ParamType::Int).with_default(ParamValue::Int(3)),
        ParamSpec::new("tint", ParamType::Color),
        ParamSpec::new("channel", ParamType::Channel),
    ];

    fn params() -> Parameters {
        Parameters::new(SCHEMA).unwrap()
    }

    #[test]
    fn test_default_when_unset() {
        assert_eq!(params().get::<i32>("size").unwrap(), 3);
    }

    #[test]
    fn test_missing_value() {
        let err = params().get::<f32>("a").unwrap_err();
        assert_eq!(
            err,
            FilterError::MissingValue {
                name: "a".into(),
                value_type: ParamType::Float
            }
        );
    }

    #[test]
    fn test_wrong_name_access() {
        let mut p = params();
        p.set("a", 1.0f32).unwrap();
        assert!(matches!(p.get::<f32>("b"), Err(FilterError::ParameterName { .. })));
    }

    #[test]
    fn test_wrong_type_access() {
        let p = params();
        let err = p.get::<i32>("a").unwrap_err();
        assert!(matches!(
            err,
            FilterError::ParameterType {
                requested: ParamType::Int,
                declared: ParamType::Float,
                ..
            }
        ));
    }

    #[test]
    fn test_wrong_name_assignment() {
        let mut p = params();
        assert!(matches!(p.set("b", 1), Err(FilterError::ParameterName { .. })));
    }

    #[test]
    fn test_wrong_type_assignment_leaves_store() {
        let mut p = params();
        p.set("a", 0.25f32).unwrap();
        assert!(matches!(p.set("a", 1), Err(FilterError::ParameterType { .. })));
        assert_relative_eq!(p.get::<f32>("a").unwrap(), 0.25);
    }

    #[test]
    fn test_roundtrip_each_type() {
        let mut p = params();
        p.set("size", 9).unwrap();
        p.set("tint", Rgb::new(1, 2, 3)).unwrap();
        p.set("channel", ChannelOption::Green).unwrap();
        assert_eq!(p.get::<i32>("size").unwrap(), 9);
        assert_eq!(p.get::<Rgb>("tint").unwrap(), Rgb::new(1, 2, 3));
        assert_eq!(p.get::<ChannelOption>("channel").unwrap(), ChannelOption::Green);
    }

    #[test]
    fn test_overwrite_and_clear() {
        let mut p = params();
        p.set("size", 5).unwrap();
        p.set("size", 5).unwrap();
        p.set("size", 7).unwrap();
        assert_eq!(p.get::<i32>("size").unwrap(), 7);
        assert_eq!(p.clear("size").unwrap(), Some(ParamValue::Int(7)));
        assert_eq!(p.get::<i32>("size").unwrap(), 3);
        assert!(p.clear("nope").is_err());
    }

    #[test]
    fn test_duplicate_name_rejected() {
        const DUP: &[ParamSpec] = &[
            ParamSpec::new("x", ParamType::Int),
            ParamSpec::new("x", ParamType::Float),
        ];
        assert!(matches!(Parameters::new(DUP), Err(FilterError::InvalidSchema(_))));
    }

    #[test]
    fn test_default_of_wrong_type_rejected() {
        const BAD: &[ParamSpec] =
            &[ParamSpec::new("x", ParamType::Int).with_default(ParamValue::Float(1.0))];
        assert!(matches!(Parameters::new(BAD), Err(FilterError::InvalidSchema(_))));
    }

    #[test]
    fn test_declared_order() {
        let names: Vec<_> = params().declared().map(|(n, _)| n).collect();
        assert_eq!(names, ["a", "size", "tint", "channel"]);
    }
}
