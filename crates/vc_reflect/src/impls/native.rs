use alloc::string::String;
use core::time::Duration;
use std::time::SystemTime;

/// Implements the reflection traits for leaf types.
///
/// A leaf is cloned as a whole and only accepts values of its own type. Its
/// default value is `Default::default()` unless a `(expr)` producing an
/// `Option<Self>` follows the names.
macro_rules! impl_reflect_opaque {
    (@default) => {
        ::core::option::Option::Some(::core::default::Default::default())
    };
    (@default $default:expr) => {
        $default
    };
    ($($ty:ty => $path:literal as $name:literal $(($default:expr))?),* $(,)?) => {$(
        impl $crate::info::TypePath for $ty {
            #[inline]
            fn type_path() -> &'static str {
                $path
            }

            #[inline]
            fn type_name() -> &'static str {
                $name
            }
        }

        impl $crate::info::Typed for $ty {
            fn type_info() -> &'static $crate::info::TypeInfo {
                static CELL: $crate::impls::NonGenericTypeInfoCell =
                    $crate::impls::NonGenericTypeInfoCell::new();
                CELL.get_or_init(|| {
                    $crate::info::TypeInfo::Opaque($crate::info::OpaqueInfo::new::<Self>())
                })
            }

            #[inline]
            fn default_value() -> ::core::option::Option<Self> {
                impl_reflect_opaque!(@default $($default)?)
            }
        }

        impl $crate::Reflect for $ty {
            #[inline]
            fn reflect_kind(&self) -> $crate::info::ReflectKind {
                $crate::info::ReflectKind::Opaque
            }

            #[inline]
            fn reflect_ref(&self) -> $crate::ops::ReflectRef<'_> {
                $crate::ops::ReflectRef::Opaque(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> $crate::ops::ReflectMut<'_> {
                $crate::ops::ReflectMut::Opaque(self)
            }

            #[inline]
            fn reflect_clone(
                &self,
            ) -> ::core::option::Option<::alloc::boxed::Box<dyn $crate::Reflect>> {
                ::core::option::Option::Some(::alloc::boxed::Box::new(self.clone()))
            }

            fn try_apply(
                &mut self,
                value: &dyn $crate::Reflect,
            ) -> ::core::result::Result<(), $crate::ops::ApplyError> {
                match value.downcast_ref::<Self>() {
                    ::core::option::Option::Some(value) => {
                        self.clone_from(value);
                        ::core::result::Result::Ok(())
                    }
                    ::core::option::Option::None => {
                        ::core::result::Result::Err($crate::ops::ApplyError::MismatchedTypes {
                            from_type: value.reflect_type_path(),
                            to_type: <Self as $crate::info::TypePath>::type_path(),
                        })
                    }
                }
            }

            #[inline]
            fn reflect_debug(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                ::core::fmt::Debug::fmt(self, f)
            }
        }
    )*};
}

#[cfg(test)]
pub(crate) use impl_reflect_opaque;

impl_reflect_opaque! {
    bool => "bool" as "bool",
    char => "char" as "char",
    i8 => "i8" as "i8",
    i16 => "i16" as "i16",
    i32 => "i32" as "i32",
    i64 => "i64" as "i64",
    i128 => "i128" as "i128",
    isize => "isize" as "isize",
    u8 => "u8" as "u8",
    u16 => "u16" as "u16",
    u32 => "u32" as "u32",
    u64 => "u64" as "u64",
    u128 => "u128" as "u128",
    usize => "usize" as "usize",
    f32 => "f32" as "f32",
    f64 => "f64" as "f64",
    String => "alloc::string::String" as "String",
    &'static str => "&str" as "&str",
    Duration => "core::time::Duration" as "Duration",
    SystemTime => "std::time::SystemTime" as "SystemTime" (Some(SystemTime::UNIX_EPOCH)),
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;
    use std::time::SystemTime;

    use crate::Reflect;
    use crate::info::{ReflectKind, TypePath, Typed};
    use crate::ops::ApplyError;

    #[test]
    fn apply_requires_same_type() {
        let mut value = 1_i32;
        value.try_apply(&5_i32).unwrap();
        assert_eq!(value, 5);

        let err = value.try_apply(&5_i64).unwrap_err();
        assert!(matches!(
            err,
            ApplyError::MismatchedTypes { from_type: "i64", to_type: "i32" }
        ));
        assert_eq!(value, 5);

        assert!(value.try_apply(&vec![1_i32]).is_err());
    }

    #[test]
    fn clone_and_downcast() {
        let text = String::from("leaf");
        let cloned = text.reflect_clone().unwrap();
        assert_eq!(cloned.downcast_ref::<String>(), Some(&text));
        assert!(cloned.is::<String>());
        assert!(!cloned.is::<&'static str>());
    }

    #[test]
    fn names_and_kinds() {
        assert_eq!(String::type_name(), "String");
        assert_eq!(<&'static str>::type_path(), "&str");
        assert_eq!(f64::type_info().kind(), ReflectKind::Opaque);
        assert_eq!(true.reflect_kind(), ReflectKind::Opaque);
        assert_eq!(alloc::format!("{:?}", &'x' as &dyn Reflect), "'x'");
    }

    #[test]
    fn default_values() {
        assert_eq!(u8::default_value(), Some(0));
        assert_eq!(String::default_value(), Some(String::new()));
        assert_eq!(SystemTime::default_value(), Some(SystemTime::UNIX_EPOCH));
    }
}
