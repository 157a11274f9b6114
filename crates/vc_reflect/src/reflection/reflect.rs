use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::fmt;

use crate::info::{DynamicTypePath, DynamicTyped, ReflectKind};
use crate::ops::{ApplyError, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Reflect

/// A value whose structure can be inspected and written at runtime.
///
/// Implemented for scalars and the std containers by this crate, and for
/// records through `#[derive(Reflect)]`. Implementations for other kinds go
/// through the kind traits in [`ops`](crate::ops).
pub trait Reflect: DynamicTypePath + DynamicTyped + Send + Sync + Any {
    /// The [`TypeId`] of the concrete type.
    #[inline]
    fn ty_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    /// The kind of this value. Must agree with [`reflect_ref`](Self::reflect_ref).
    fn reflect_kind(&self) -> ReflectKind;

    /// Shared access by kind.
    fn reflect_ref(&self) -> ReflectRef<'_>;

    /// Exclusive access by kind.
    fn reflect_mut(&mut self) -> ReflectMut<'_>;

    /// Clones the value into a box, if the type supports it.
    ///
    /// Leaf types always do; composite types return `None`.
    #[inline]
    fn reflect_clone(&self) -> Option<Box<dyn Reflect>> {
        None
    }

    /// Overwrites `self` with `value`.
    ///
    /// Leaf types accept a value of exactly the same type. Everything else is
    /// rejected with an [`ApplyError`] and `self` is left unchanged.
    fn try_apply(&mut self, value: &dyn Reflect) -> Result<(), ApplyError> {
        Err(ApplyError::MismatchedKinds {
            from_kind: value.reflect_kind(),
            to_kind: self.reflect_kind(),
        })
    }

    /// Debug formatting by kind, used by `impl Debug for dyn Reflect`.
    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use crate::impls;
        match self.reflect_ref() {
            ReflectRef::Struct(data) => impls::struct_debug(data, f),
            ReflectRef::List(data) => impls::list_debug(data, f),
            ReflectRef::Array(data) => impls::array_debug(data, f),
            ReflectRef::Map(data) => impls::map_debug(data, f),
            ReflectRef::Pointer(data) => impls::pointer_debug(data, f),
            ReflectRef::Dynamic(data) => fmt::Debug::fmt(data, f),
            ReflectRef::Opaque(_) => write!(f, "Opaque({})", self.reflect_type_path()),
        }
    }
}

impl dyn Reflect {
    /// Returns `true` if the concrete type is `T`.
    #[inline(always)]
    pub fn is<T: Any>(&self) -> bool {
        self.ty_id() == TypeId::of::<T>()
    }

    /// Downcasts to the concrete type.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        <dyn Any>::downcast_ref(self)
    }

    /// Downcasts to the concrete type.
    #[inline]
    pub fn downcast_mut<T: Any>(&mut self) -> Option<&mut T> {
        <dyn Any>::downcast_mut(self)
    }
}

impl fmt::Debug for dyn Reflect {
    #[inline]
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.reflect_debug(f)
    }
}
