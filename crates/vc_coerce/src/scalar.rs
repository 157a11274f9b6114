//! Classification of a reflected value into the scalar shapes the casts know.

use core::time::Duration;
use std::time::SystemTime;

use vc_reflect::Reflect;
use vc_reflect::ops::ReflectRef;

use crate::CastError;

/// A reflected value seen as a scalar.
///
/// Integers are widened to 64 bits. `f32` keeps its own variant so that text
/// renders the shortest form of the narrow value.
#[derive(Debug, Clone, Copy)]
pub(crate) enum Scalar<'a> {
    /// An empty `Option` or a null `Dynamic` on the way down.
    Nil,
    Bool(bool),
    Int(i64),
    Uint(u64),
    Single(f32),
    Float(f64),
    Char(char),
    Str(&'a str),
    Duration(Duration),
    Time(SystemTime),
    Other(&'a dyn Reflect),
}

impl Scalar<'_> {
    /// Folds `Single` into `Float`.
    #[inline]
    pub(crate) fn widen(self) -> Self {
        match self {
            Self::Single(value) => Self::Float(f64::from(value)),
            other => other,
        }
    }
}

macro_rules! downcast_as {
    ($value:ident => $($variant:ident $conv:tt: $($ty:ty),+;)*) => {$(
        downcast_as!(@one $value, $variant, $conv, $($ty),+);
    )*};
    (@one $value:ident, $variant:ident, $conv:tt, $($ty:ty),+) => {$(
        if let Some(&inner) = $value.downcast_ref::<$ty>() {
            return Scalar::$variant(downcast_as!(@conv inner $conv));
        }
    )+};
    (@conv $inner:ident ($($wide:tt)*)) => {
        $inner $($wide)*
    };
}

/// Looks through `Option`, `Box` and `Dynamic` layers, then classifies the
/// innermost value.
pub(crate) fn classify(value: &dyn Reflect) -> Scalar<'_> {
    let mut current = value;
    loop {
        let next = match current.reflect_ref() {
            ReflectRef::Pointer(pointer) => pointer.target(),
            ReflectRef::Dynamic(slot) => slot.get(),
            ReflectRef::Opaque(leaf) => return leaf_scalar(leaf),
            other => return Scalar::Other(other.into_reflect()),
        };
        match next {
            Some(inner) => current = inner,
            None => return Scalar::Nil,
        }
    }
}

fn leaf_scalar(value: &dyn Reflect) -> Scalar<'_> {
    downcast_as! { value =>
        Int(as i64): i8, i16, i32, i64, isize;
        Uint(as u64): u8, u16, u32, u64, usize;
        Bool(): bool;
        Single(): f32;
        Float(): f64;
        Char(): char;
        Duration(): Duration;
        Time(): SystemTime;
    }
    if let Some(text) = value.downcast_ref::<String>() {
        return Scalar::Str(text);
    }
    if let Some(&text) = value.downcast_ref::<&'static str>() {
        return Scalar::Str(text);
    }
    Scalar::Other(value)
}

pub(crate) fn unsupported(value: &dyn Reflect, to: &'static str) -> CastError {
    CastError::Unsupported {
        type_path: value.reflect_type_path(),
        to,
    }
}
