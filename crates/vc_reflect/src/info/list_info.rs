use crate::info::{Type, TypeInfo, TypePath, Typed};

// -----------------------------------------------------------------------------
// ListInfo

/// Static description of a growable sequence such as `Vec<T>`.
#[derive(Debug)]
pub struct ListInfo {
    ty: Type,
    item_ty: Type,
    item_info: fn() -> &'static TypeInfo,
}

impl ListInfo {
    /// Creates the info of list type `TList` holding `TItem`.
    pub fn new<TList: TypePath, TItem: Typed>() -> Self {
        Self {
            ty: Type::of::<TList>(),
            item_ty: Type::of::<TItem>(),
            item_info: TItem::type_info,
        }
    }

    /// The described [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The item [`Type`].
    #[inline]
    pub fn item_ty(&self) -> &Type {
        &self.item_ty
    }

    /// The item [`TypeInfo`].
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }
}

// -----------------------------------------------------------------------------
// ArrayInfo

/// Static description of a fixed-length sequence such as `[T; N]`.
#[derive(Debug)]
pub struct ArrayInfo {
    ty: Type,
    item_ty: Type,
    item_info: fn() -> &'static TypeInfo,
    capacity: usize,
}

impl ArrayInfo {
    /// Creates the info of array type `TArray` holding `capacity` `TItem`s.
    pub fn new<TArray: TypePath, TItem: Typed>(capacity: usize) -> Self {
        Self {
            ty: Type::of::<TArray>(),
            item_ty: Type::of::<TItem>(),
            item_info: TItem::type_info,
            capacity,
        }
    }

    /// The described [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The item [`Type`].
    #[inline]
    pub fn item_ty(&self) -> &Type {
        &self.item_ty
    }

    /// The item [`TypeInfo`].
    #[inline]
    pub fn item_info(&self) -> &'static TypeInfo {
        (self.item_info)()
    }

    /// The fixed length.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
