//! Boolean and numeric casts.

use vc_reflect::Reflect;

use crate::CastError;
use crate::scalar::{Scalar, classify, unsupported};

// -----------------------------------------------------------------------------
// Bool

/// Casts to `bool`.
///
/// Numbers are `true` when non-zero. Text accepts `1 t T TRUE true True` and
/// `0 f F FALSE false False`.
pub fn to_bool(value: &dyn Reflect) -> Result<bool, CastError> {
    match classify(value).widen() {
        Scalar::Nil => Ok(false),
        Scalar::Bool(flag) => Ok(flag),
        Scalar::Int(number) => Ok(number != 0),
        Scalar::Uint(number) => Ok(number != 0),
        Scalar::Float(number) => Ok(number != 0.0),
        Scalar::Str(text) => parse_bool(text),
        _ => Err(unsupported(value, "bool")),
    }
}

fn parse_bool(text: &str) -> Result<bool, CastError> {
    match text {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(false),
        _ => Err(CastError::ParseBool(text.to_owned())),
    }
}

// -----------------------------------------------------------------------------
// Integers

/// Casts to `i64`.
///
/// Unsigned values wrap, floats truncate toward zero and `bool` reads as
/// `0`/`1`. Text may carry a sign and a `0x`, `0o`, `0b` or leading `0`
/// radix prefix.
pub fn to_i64(value: &dyn Reflect) -> Result<i64, CastError> {
    match classify(value).widen() {
        Scalar::Nil => Ok(0),
        Scalar::Bool(flag) => Ok(i64::from(flag)),
        Scalar::Int(number) => Ok(number),
        Scalar::Uint(number) => Ok(number as i64),
        Scalar::Float(number) => Ok(number as i64),
        Scalar::Str(text) => {
            let (negative, magnitude) = parse_magnitude(text, "i64")?;
            let signed = if negative {
                0_i64.checked_sub_unsigned(magnitude)
            } else {
                i64::try_from(magnitude).ok()
            };
            signed.ok_or_else(|| CastError::overflow(text, "i64"))
        }
        _ => Err(unsupported(value, "i64")),
    }
}

/// Casts to `u64`.
///
/// Like [`to_i64`], except that negative numbers and text are an
/// [`Overflow`](CastError::Overflow).
pub fn to_u64(value: &dyn Reflect) -> Result<u64, CastError> {
    match classify(value).widen() {
        Scalar::Nil => Ok(0),
        Scalar::Bool(flag) => Ok(u64::from(flag)),
        Scalar::Int(number) => u64::try_from(number).map_err(|_| CastError::overflow(number, "u64")),
        Scalar::Uint(number) => Ok(number),
        Scalar::Float(number) if number < 0.0 => Err(CastError::overflow(number, "u64")),
        Scalar::Float(number) => Ok(number as u64),
        Scalar::Str(text) => match parse_magnitude(text, "u64")? {
            (true, 0) => Ok(0),
            (true, _) => Err(CastError::overflow(text, "u64")),
            (false, magnitude) => Ok(magnitude),
        },
        _ => Err(unsupported(value, "u64")),
    }
}

/// Splits sign and radix prefix, then reads the digits as a magnitude.
fn parse_magnitude(text: &str, to: &'static str) -> Result<(bool, u64), CastError> {
    let (negative, unsigned) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('+').unwrap_or(text)),
    };

    let (radix, digits) = match unsigned.as_bytes() {
        [b'0', b'x' | b'X', ..] => (16, &unsigned[2..]),
        [b'0', b'o' | b'O', ..] => (8, &unsigned[2..]),
        [b'0', b'b' | b'B', ..] => (2, &unsigned[2..]),
        [b'0', _, ..] => (8, &unsigned[1..]),
        _ => (10, unsigned),
    };

    if digits.is_empty() || !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(CastError::ParseInt(text.to_owned()));
    }
    // Digits are valid, so only overflow remains.
    let magnitude = u64::from_str_radix(digits, radix).map_err(|_| CastError::overflow(text, to))?;
    Ok((negative, magnitude))
}

// -----------------------------------------------------------------------------
// Floats

/// Casts to `f64`.
pub fn to_f64(value: &dyn Reflect) -> Result<f64, CastError> {
    match classify(value).widen() {
        Scalar::Nil => Ok(0.0),
        Scalar::Bool(flag) => Ok(f64::from(u8::from(flag))),
        Scalar::Int(number) => Ok(number as f64),
        Scalar::Uint(number) => Ok(number as f64),
        Scalar::Float(number) => Ok(number),
        Scalar::Str(text) => text.parse().map_err(|source| CastError::ParseFloat {
            input: text.to_owned(),
            source,
        }),
        _ => Err(unsupported(value, "f64")),
    }
}

/// Casts to `f32`. Finite values beyond the `f32` range are an overflow.
pub fn to_f32(value: &dyn Reflect) -> Result<f32, CastError> {
    let wide = to_f64(value)?;
    if wide.is_finite() && wide.abs() > f64::from(f32::MAX) {
        return Err(CastError::overflow(wide, "f32"));
    }
    Ok(wide as f32)
}

// -----------------------------------------------------------------------------
// Narrowing

macro_rules! narrowing {
    ($($name:ident: $wide:ident => $ty:ident;)*) => {$(
        #[doc = concat!("Casts to `", stringify!($ty), "`, failing if the value does not fit.")]
        pub fn $name(value: &dyn Reflect) -> Result<$ty, CastError> {
            let wide = $wide(value)?;
            $ty::try_from(wide).map_err(|_| CastError::overflow(wide, stringify!($ty)))
        }
    )*};
}

narrowing! {
    to_i8: to_i64 => i8;
    to_i16: to_i64 => i16;
    to_i32: to_i64 => i32;
    to_isize: to_i64 => isize;
    to_u8: to_u64 => u8;
    to_u16: to_u64 => u16;
    to_u32: to_u64 => u32;
    to_usize: to_u64 => usize;
}
