use core::any::TypeId;
use core::fmt;

use thiserror::Error;

use crate::info::{ArrayInfo, ListInfo, MapInfo, StructInfo, Type};
use crate::info::{DynamicInfo, OpaqueInfo, PointerInfo};

// -----------------------------------------------------------------------------
// ReflectKind

/// The shape of a reflected value.
///
/// Every [`TypeInfo`], [`ReflectRef`](crate::ops::ReflectRef) and
/// [`ReflectMut`](crate::ops::ReflectMut) variant maps to one kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReflectKind {
    /// A record with named fields, see [`Struct`](crate::ops::Struct).
    Struct,
    /// A growable sequence, see [`List`](crate::ops::List).
    List,
    /// A fixed-length sequence, see [`Array`](crate::ops::Array).
    Array,
    /// A key-value mapping, see [`Map`](crate::ops::Map).
    Map,
    /// An optional or owning indirection, see [`Pointer`](crate::ops::Pointer).
    Pointer,
    /// A slot holding a value of any type, see [`Dynamic`](crate::ops::Dynamic).
    Dynamic,
    /// A leaf value only reachable as a whole.
    Opaque,
}

impl fmt::Display for ReflectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Struct => f.pad("Struct"),
            Self::List => f.pad("List"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Pointer => f.pad("Pointer"),
            Self::Dynamic => f.pad("Dynamic"),
            Self::Opaque => f.pad("Opaque"),
        }
    }
}

/// Returned by the `as_*` accessors of [`TypeInfo`] on a kind mismatch.
#[derive(Debug, Error)]
#[error("reflect kind mismatch: expected {expected}, received {received}")]
pub struct ReflectKindError {
    pub expected: ReflectKind,
    pub received: ReflectKind,
}

// -----------------------------------------------------------------------------
// TypeInfo

/// Static description of a reflected type.
#[derive(Debug)]
pub enum TypeInfo {
    Struct(StructInfo),
    List(ListInfo),
    Array(ArrayInfo),
    Map(MapInfo),
    Pointer(PointerInfo),
    Dynamic(DynamicInfo),
    Opaque(OpaqueInfo),
}

macro_rules! impl_cast_method {
    ($name:ident : $kind:ident => $info:ident) => {
        #[doc = concat!("Returns the [`", stringify!($info), "`] or a kind mismatch.")]
        pub const fn $name(&self) -> Result<&$info, ReflectKindError> {
            match self {
                Self::$kind(info) => Ok(info),
                _ => Err(ReflectKindError {
                    expected: ReflectKind::$kind,
                    received: self.kind(),
                }),
            }
        }
    };
}

impl TypeInfo {
    impl_cast_method!(as_struct: Struct => StructInfo);
    impl_cast_method!(as_list: List => ListInfo);
    impl_cast_method!(as_array: Array => ArrayInfo);
    impl_cast_method!(as_map: Map => MapInfo);
    impl_cast_method!(as_pointer: Pointer => PointerInfo);
    impl_cast_method!(as_opaque: Opaque => OpaqueInfo);

    /// Returns the described [`Type`].
    pub const fn ty(&self) -> &Type {
        match self {
            Self::Struct(info) => info.ty(),
            Self::List(info) => info.ty(),
            Self::Array(info) => info.ty(),
            Self::Map(info) => info.ty(),
            Self::Pointer(info) => info.ty(),
            Self::Dynamic(info) => info.ty(),
            Self::Opaque(info) => info.ty(),
        }
    }

    /// Shorthand for `self.ty().id()`.
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty().id()
    }

    /// Shorthand for `self.ty().path()`.
    #[inline]
    pub fn type_path(&self) -> &'static str {
        self.ty().path()
    }

    /// Returns the kind of the described type.
    pub const fn kind(&self) -> ReflectKind {
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

    /// Returns `true` for [`TypeInfo::Struct`].
    #[inline]
    pub const fn is_struct(&self) -> bool {
        matches!(self, Self::Struct(_))
    }

    /// Follows [`Pointer`](TypeInfo::Pointer) targets until a non-pointer
    /// type is reached.
    ///
    /// ```
    /// use vc_reflect::info::{ReflectKind, Typed};
    ///
    /// let info = <Option<Box<u8>>>::type_info().deref_pointers();
    /// assert_eq!(info.kind(), ReflectKind::Opaque);
    /// assert!(info.ty().is::<u8>());
    /// ```
    pub fn deref_pointers(&'static self) -> &'static TypeInfo {
        let mut info = self;
        while let Self::Pointer(pointer) = info {
            info = pointer.target_info();
        }
        info
    }
}
