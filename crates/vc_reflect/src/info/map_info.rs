use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Static description of a key-value mapping.
#[derive(Debug)]
pub struct MapInfo {
    ty: Type,
    key_ty: Type,
    key_info: fn() -> &'static TypeInfo,
    value_ty: Type,
    value_info: fn() -> &'static TypeInfo,
}

impl MapInfo {
    /// Creates the info of map type `TMap` from `TKey` to `TValue`.
    pub fn new<TMap: TypePath, TKey: Typed, TValue: Typed>() -> Self {
        Self {
            ty: Type::of::<TMap>(),
            key_ty: Type::of::<TKey>(),
            key_info: TKey::type_info,
            value_ty: Type::of::<TValue>(),
            value_info: TValue::type_info,
        }
    }

    /// The described [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The key [`Type`].
    #[inline]
    pub fn key_ty(&self) -> &Type {
        &self.key_ty
    }

    /// The key [`TypeInfo`].
    #[inline]
    pub fn key_info(&self) -> &'static TypeInfo {
        (self.key_info)()
    }

    /// The value [`Type`].
    #[inline]
    pub fn value_ty(&self) -> &Type {
        &self.value_ty
    }

    /// The value [`TypeInfo`].
    #[inline]
    pub fn value_info(&self) -> &'static TypeInfo {
        (self.value_info)()
    }
}
