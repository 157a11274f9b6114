use crate::info::{TypeInfo, TypePath};

// -----------------------------------------------------------------------------
// Typed

/// Access to the static [`TypeInfo`] of a type.
///
/// Implementations keep the info in a `static` cell, see
/// [`NonGenericTypeInfoCell`](crate::impls::NonGenericTypeInfoCell) and
/// [`GenericTypeInfoCell`](crate::impls::GenericTypeInfoCell).
pub trait Typed: TypePath {
    /// Returns the type's info.
    fn type_info() -> &'static TypeInfo;

    /// A fresh value used to fill an empty pointer, a new list slot or a
    /// map entry.
    ///
    /// `None` if the type has no such value, in which case the slot is left
    /// as it is.
    #[inline]
    fn default_value() -> Option<Self>
    where
        Self: Sized,
    {
        None
    }
}

// -----------------------------------------------------------------------------
// DynamicTyped

/// Object-safe mirror of [`Typed`], implemented for every `Typed` type.
pub trait DynamicTyped {
    /// See [`Typed::type_info`].
    fn reflect_type_info(&self) -> &'static TypeInfo;
}

impl<T: Typed> DynamicTyped for T {
    #[inline]
    fn reflect_type_info(&self) -> &'static TypeInfo {
        Self::type_info()
    }
}
