use crate::Reflect;
use crate::info::ReflectKind;
use crate::ops::{Array, Dynamic, List, Map, Pointer, Struct};

// -----------------------------------------------------------------------------
// ReflectRef

/// Shared access to a reflected value by kind.
pub enum ReflectRef<'a> {
    Struct(&'a dyn Struct),
    List(&'a dyn List),
    Array(&'a dyn Array),
    Map(&'a dyn Map),
    Pointer(&'a dyn Pointer),
    Dynamic(&'a Dynamic),
    Opaque(&'a dyn Reflect),
}

impl<'a> ReflectRef<'a> {
    /// The kind of the wrapped value.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Gives back the value as a plain `&dyn Reflect`.
    pub fn into_reflect(self) -> &'a dyn Reflect {
        match self {
            Self::Struct(value) => value,
            Self::List(value) => value,
            Self::Array(value) => value,
            Self::Map(value) => value,
            Self::Pointer(value) => value,
            Self::Dynamic(value) => value,
            Self::Opaque(value) => value,
        }
    }
}

// -----------------------------------------------------------------------------
// ReflectMut

/// Exclusive access to a reflected value by kind.
pub enum ReflectMut<'a> {
    Struct(&'a mut dyn Struct),
    List(&'a mut dyn List),
    Array(&'a mut dyn Array),
    Map(&'a mut dyn Map),
    Pointer(&'a mut dyn Pointer),
    Dynamic(&'a mut Dynamic),
    Opaque(&'a mut dyn Reflect),
}

impl<'a> ReflectMut<'a> {
    /// The kind of the wrapped value.
    pub fn kind(&self) -> ReflectKind {
        match self {
            Self::Struct(_) => ReflectKind::Struct,
            Self::List(_) => ReflectKind::List,
            Self::Array(_) => ReflectKind::Array,
            Self::Map(_) => ReflectKind::Map,
            Self::Pointer(_) => ReflectKind::Pointer,
            Self::Dynamic(_) => ReflectKind::Dynamic,
            Self::Opaque(_) => ReflectKind::Opaque,
        }
    }

    /// Gives back the value as a plain `&mut dyn Reflect`.
    pub fn into_reflect(self) -> &'a mut dyn Reflect {
        match self {
            Self::Struct(value) => value,
            Self::List(value) => value,
            Self::Array(value) => value,
            Self::Map(value) => value,
            Self::Pointer(value) => value,
            Self::Dynamic(value) => value,
            Self::Opaque(value) => value,
        }
    }
}
