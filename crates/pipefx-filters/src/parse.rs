//! Text to parameter value conversion.
//!
//! [`parse_value`] turns user input into a [`ParamValue`] of the requested
//! type. `None` means the text could not be parsed; an empty input meaning
//! "leave unset" is the caller's concern and must be checked before calling.
//!
//! | type    | accepted                                   |
//! |---------|--------------------------------------------|
//! | Int     | base-10 `i32`, e.g. `-3`                   |
//! | Float   | base-10 `f32` with `.` decimal point       |
//! | Color   | three `0..=255` components, `100,200,100`  |
//! | Channel | `Red`, `Green` or `Blue` (case-sensitive)  |
//!
//! ```rust
//! use pipefx_core::Rgb;
//! use pipefx_filters::param::{ParamType, ParamValue};
//! use pipefx_filters::parse_value;
//!
//! assert_eq!(parse_value(ParamType::Color, "100,200,100"), Some(ParamValue::Color(Rgb::new(100, 200, 100))));
//! assert_eq!(parse_value(ParamType::Color, "256,0,0"), None);
//! assert_eq!(parse_value(ParamType::Int, "abc"), None);
//! ```

use crate::param::{ChannelOption, ParamType, ParamValue};
use pipefx_core::Rgb;
use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

/// Component: 0-199, 200-249 or 250-255 as a 1-3 digit group.
const COMPONENT: &str = r"([01]?\d\d?|2[0-4]\d|25[0-5])";

// `r,g,b` with optional whitespace after each comma
static COLOR_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"^{c},\s*{c},\s*{c}$", c = COMPONENT))
        .expect("Failed to compile COLOR_REGEX")
});

/// Parses `text` as a value of type `ty`.
pub fn parse_value(ty: ParamType, text: &str) -> Option<ParamValue> {
    let text = text.trim();
    let value = match ty {
        ParamType::Int => text.parse::<i32>().ok().map(ParamValue::Int),
        ParamType::Float => text.parse::<f32>().ok().map(ParamValue::Float),
        ParamType::Color => parse_color(text).map(ParamValue::Color),
        ParamType::Channel => text.parse::<ChannelOption>().ok().map(ParamValue::Channel),
    };
    trace!(%ty, text, parsed = value.is_some(), "parse_value");
    value
}

/// Parses `r,g,b` with optional whitespace after each comma.
pub fn parse_color(text: &str) -> Option<Rgb> {
    let caps = COLOR_REGEX.captures(text)?;
    let component = |i: usize| caps.get(i)?.as_str().parse::<u8>().ok();
    Some(Rgb::new(component(1)?, component(2)?, component(3)?))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_int() {
        assert_eq!(parse_value(ParamType::Int, "42"), Some(ParamValue::Int(42)));
        assert_eq!(parse_value(ParamType::Int, " -7 "), Some(ParamValue::Int(-7)));
        assert_eq!(parse_value(ParamType::Int, "abc"), None);
        assert_eq!(parse_value(ParamType::Int, "1.5"), None);
        assert_eq!(parse_value(ParamType::Int, "99999999999"), None);
    }

    #[test]
    fn test_float() {
        match parse_value(ParamType::Float, "1.25") {
            Some(ParamValue::Float(v)) => assert_relative_eq!(v, 1.25),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(parse_value(ParamType::Float, "1,25"), None);
        assert_eq!(parse_value(ParamType::Float, "x"), None);
    }

    #[test]
    fn test_color() {
        assert_eq!(parse_color("100,200,100"), Some(Rgb::new(100, 200, 100)));
        assert_eq!(parse_color("0, 9, 255"), Some(Rgb::new(0, 9, 255)));
        assert_eq!(parse_color("249,250,199"), Some(Rgb::new(249, 250, 199)));
        assert_eq!(parse_color("256,0,0"), None);
        assert_eq!(parse_color("1,2"), None);
        assert_eq!(parse_color("1,2,3,4"), None);
        assert_eq!(parse_color("1;2;3"), None);
        assert_eq!(parse_color("1 ,2,3"), None);
        assert_eq!(parse_color(""), None);
    }

    #[test]
    fn test_channel() {
        assert_eq!(
            parse_value(ParamType::Channel, "Blue"),
            Some(ParamValue::Channel(ChannelOption::Blue))
        );
        assert_eq!(parse_value(ParamType::Channel, "blue"), None);
        assert_eq!(parse_value(ParamType::Channel, "Alpha"), None);
    }

    #[test]
    fn test_parsed_type_matches_request() {
        for ty in [ParamType::Int, ParamType::Float, ParamType::Color, ParamType::Channel] {
            let v = parse_value(ty, ty.example()).unwrap();
            assert_eq!(v.param_type(), ty);
        }
    }
}
