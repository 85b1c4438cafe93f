//! Parameter types and declarations.
//!
//! A filter type declares its parameters once, as a static slice of
//! [`ParamSpec`]. Values travel as the tagged union [`ParamValue`]; typed
//! reads go through [`ParamKind`], which ties a Rust type to its
//! [`ParamType`] tag.
//!
//! # Example
//!
//! ```rust
//! use pipefx_filters::param::{ParamSpec, ParamType, ParamValue};
//!
//! const PARAMS: &[ParamSpec] = &[
//!     ParamSpec::new("radius", ParamType::Int).with_default(ParamValue::Int(1)),
//!     ParamSpec::new("tint", ParamType::Color),
//! ];
//!
//! assert_eq!(PARAMS[0].default, Some(ParamValue::Int(1)));
//! assert!(PARAMS[1].default.is_none());
//! ```

use pipefx_core::Rgb;
use std::fmt;
use std::str::FromStr;

/// Closed set of parameter types a filter can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParamType {
    /// 32-bit signed integer.
    Int,
    /// 32-bit float.
    Float,
    /// 8-bit RGB color.
    Color,
    /// One of the [`ChannelOption`] labels.
    Channel,
}

impl ParamType {
    /// Sample input shown to a user when prompting for this type.
    pub fn example(self) -> &'static str {
        match self {
            Self::Int => "1",
            Self::Float => "1.0",
            Self::Color => "100,200,100",
            Self::Channel => "Red",
        }
    }

    /// Type name used in messages.
    pub fn name(self) -> &'static str {
        match self {
            Self::Int => "Int",
            Self::Float => "Float",
            Self::Color => "Color",
            Self::Channel => "Channel",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Single color channel selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChannelOption {
    /// Red channel.
    Red,
    /// Green channel.
    Green,
    /// Blue channel.
    Blue,
}

impl ChannelOption {
    /// All options in declaration order.
    pub const ALL: [ChannelOption; 3] = [Self::Red, Self::Green, Self::Blue];

    /// Label accepted by the parser.
    pub fn label(self) -> &'static str {
        match self {
            Self::Red => "Red",
            Self::Green => "Green",
            Self::Blue => "Blue",
        }
    }

    /// Keeps only this channel of `px`.
    #[inline]
    pub fn isolate(self, px: Rgb) -> Rgb {
        match self {
            Self::Red => Rgb::new(px.r, 0, 0),
            Self::Green => Rgb::new(0, px.g, 0),
            Self::Blue => Rgb::new(0, 0, px.b),
        }
    }
}

impl fmt::Display for ChannelOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when a label is not one of [`ChannelOption::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownChannel(pub String);

impl fmt::Display for UnknownChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown channel '{}'", self.0)
    }
}

impl std::error::Error for UnknownChannel {}

/// Case-sensitive match against the channel labels.
impl FromStr for ChannelOption {
    type Err = UnknownChannel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.label() == s)
            .ok_or_else(|| UnknownChannel(s.to_string()))
    }
}

/// A parameter value of one of the supported types.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    /// Integer value.
    Int(i32),
    /// Float value.
    Float(f32),
    /// Color value.
    Color(Rgb),
    /// Channel selector.
    Channel(ChannelOption),
}

impl ParamValue {
    /// Returns the runtime type tag.
    pub fn param_type(&self) -> ParamType {
        match self {
            Self::Int(_) => ParamType::Int,
            Self::Float(_) => ParamType::Float,
            Self::Color(_) => ParamType::Color,
            Self::Channel(_) => ParamType::Channel,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Color(v) => write!(f, "{v}"),
            Self::Channel(v) => write!(f, "{v}"),
        }
    }
}

/// Declaration of one filter parameter.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamSpec {
    /// Parameter name, unique within one schema.
    pub name: &'static str,
    /// Declared type.
    pub value_type: ParamType,
    /// Value used when none was assigned.
    pub default: Option<ParamValue>,
}

impl ParamSpec {
    /// Declares a parameter without a default.
    pub const fn new(name: &'static str, value_type: ParamType) -> Self {
        Self {
            name,
            value_type,
            default: None,
        }
    }

    /// Attaches a default value.
    pub const fn with_default(self, default: ParamValue) -> Self {
        Self {
            name: self.name,
            value_type: self.value_type,
            default: Some(default),
        }
    }
}

/// Rust types that can be read out of a [`ParamValue`].
///
/// The tag must match exactly: an `Int` parameter cannot be read as `f32`.
pub trait ParamKind: Sized {
    /// Tag this type corresponds to.
    const TYPE: ParamType;

    /// Extracts the value if the tag matches.
    fn from_value(value: &ParamValue) -> Option<Self>;
}

macro_rules! param_kind {
    ($ty:ty, $variant:ident) => {
        impl ParamKind for $ty {
            const TYPE: ParamType = ParamType::$variant;

            #[inline]
            fn from_value(value: &ParamValue) -> Option<Self> {
                match value {
                    ParamValue::$variant(v) => Some(*v),
                    _ => None,
                }
            }
        }

        impl From<$ty> for ParamValue {
            #[inline]
            fn from(v: $ty) -> Self {
                ParamValue::$variant(v)
            }
        }
    };
}

param_kind!(i32, Int);
param_kind!(f32, Float);
param_kind!(Rgb, Color);
param_kind!(ChannelOption, Channel);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_tags() {
        assert_eq!(ParamValue::from(3).param_type(), ParamType::Int);
        assert_eq!(ParamValue::from(0.5f32).param_type(), ParamType::Float);
        assert_eq!(ParamValue::from(Rgb::WHITE).param_type(), ParamType::Color);
        assert_eq!(ParamValue::from(ChannelOption::Blue).param_type(), ParamType::Channel);
    }

    #[test]
    fn test_kind_requires_exact_tag() {
        assert_eq!(i32::from_value(&ParamValue::Int(4)), Some(4));
        assert_eq!(f32::from_value(&ParamValue::Int(4)), None);
        assert_eq!(i32::from_value(&ParamValue::Float(4.0)), None);
    }

    #[test]
    fn test_channel_from_str() {
        assert_eq!("Green".parse::<ChannelOption>(), Ok(ChannelOption::Green));
        assert!("green".parse::<ChannelOption>().is_err());
        assert!("Alpha".parse::<ChannelOption>().is_err());
    }

    #[test]
    fn test_channel_isolate() {
        let px = Rgb::new(10, 20, 30);
        assert_eq!(ChannelOption::Red.isolate(px), Rgb::new(10, 0, 0));
        assert_eq!(ChannelOption::Green.isolate(px), Rgb::new(0, 20, 0));
        assert_eq!(ChannelOption::Blue.isolate(px), Rgb::new(0, 0, 30));
    }

    #[test]
    fn test_display() {
        assert_eq!(ParamValue::Color(Rgb::new(1, 2, 3)).to_string(), "1,2,3");
        assert_eq!(ParamValue::Channel(ChannelOption::Red).to_string(), "Red");
        assert_eq!(ParamType::Color.example(), "100,200,100");
    }
}
