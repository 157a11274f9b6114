use crate::info::{Type, TypeInfo, TypePath, Typed};

/// Static description of an indirection: `Option<T>` or `Box<T>`.
#[derive(Debug)]
pub struct PointerInfo {
    ty: Type,
    target_ty: Type,
    target_info: fn() -> &'static TypeInfo,
    nullable: bool,
}

impl PointerInfo {
    /// Creates the info of pointer type `TPointer` to `TTarget`.
    ///
    /// `nullable` is `true` when a value may hold no target.
    pub fn new<TPointer: TypePath, TTarget: Typed>(nullable: bool) -> Self {
        Self {
            ty: Type::of::<TPointer>(),
            target_ty: Type::of::<TTarget>(),
            target_info: TTarget::type_info,
            nullable,
        }
    }

    /// The described [`Type`].
    #[inline]
    pub const fn ty(&self) -> &Type {
        &self.ty
    }

    /// The target [`Type`].
    #[inline]
    pub fn target_ty(&self) -> &Type {
        &self.target_ty
    }

    /// The target [`TypeInfo`].
    #[inline]
    pub fn target_info(&self) -> &'static TypeInfo {
        (self.target_info)()
    }

    /// Whether a value of this type may be empty.
    #[inline]
    pub fn is_nullable(&self) -> bool {
        self.nullable
    }
}
