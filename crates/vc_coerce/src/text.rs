use vc_reflect::Reflect;

use crate::duration::format_duration;
use crate::scalar::{Scalar, classify};
use crate::time::format_time;

/// Renders a value as text. Never fails.
///
/// Numbers use their shortest exact decimal form, without exponent.
/// Durations read like `1h2m3.5s` and times like RFC 3339 in UTC, so both
/// cast back. Containers and records fall back to their reflective debug
/// rendering.
pub fn to_string(value: &dyn Reflect) -> String {
    match classify(value) {
        Scalar::Nil => String::new(),
        Scalar::Bool(flag) => flag.to_string(),
        Scalar::Int(number) => number.to_string(),
        Scalar::Uint(number) => number.to_string(),
        Scalar::Single(number) => number.to_string(),
        Scalar::Float(number) => number.to_string(),
        Scalar::Char(c) => c.to_string(),
        Scalar::Str(text) => text.to_owned(),
        Scalar::Duration(duration) => format_duration(duration),
        Scalar::Time(time) => format_time(time),
        Scalar::Other(other) => format!("{other:?}"),
    }
}
