use core::any::TypeId;

use crate::info::{Type, TypeInfo, Typed};

/// A named field of a [`StructInfo`](crate::info::StructInfo).
///
/// Besides its type, a field carries the metadata the field resolver needs:
///
/// - `tag`: the raw `name[,option...]` directive, or `-` to exclude the field;
/// - `public`: whether the field is declared `pub`;
/// - `embedded`: whether the field's own fields are promoted into the parent.
///
/// # Examples
///
/// ```
/// use vc_reflect::info::NamedField;
///
/// let field = NamedField::new::<u32>("id")
///     .with_tag(Some("user_id,omitempty"))
///     .with_public(false);
///
/// assert_eq!(field.name(), "id");
/// assert_eq!(field.tag(), Some("user_id,omitempty"));
/// assert!(!field.is_public());
/// assert!(!field.is_embedded());
/// ```
#[derive(Clone, Debug)]
pub struct NamedField {
    name: &'static str,
    ty: Type,
    type_info: fn() -> &'static TypeInfo,
    tag: Option<&'static str>,
    public: bool,
    embedded: bool,
}

impl NamedField {
    /// Creates a public, untagged, non-embedded field of type `T`.
    #[inline]
    pub fn new<T: Typed>(name: &'static str) -> Self {
        Self {
            name,
            ty: Type::of::<T>(),
            type_info: T::type_info,
            tag: None,
            public: true,
            embedded: false,
        }
    }

    /// Sets the raw tag.
    #[inline]
    pub fn with_tag(mut self, tag: Option<&'static str>) -> Self {
        self.tag = tag;
        self
    }

    /// Sets the visibility.
    #[inline]
    pub fn with_public(mut self, public: bool) -> Self {
        self.public = public;
        self
    }

    /// Marks the field as embedded.
    #[inline]
    pub fn with_embedded(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    /// The declared identifier.
    #[inline]
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// The field's [`Type`].
    #[inline]
    pub fn ty(&self) -> &Type {
        &self.ty
    }

    /// The field's [`TypeId`].
    #[inline]
    pub fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    /// The field's [`TypeInfo`], resolved on call.
    #[inline]
    pub fn type_info(&self) -> &'static TypeInfo {
        (self.type_info)()
    }

    /// The raw tag, if any.
    #[inline]
    pub fn tag(&self) -> Option<&'static str> {
        self.tag
    }

    /// Whether the field is declared `pub`.
    #[inline]
    pub fn is_public(&self) -> bool {
        self.public
    }

    /// Whether the field is embedded.
    #[inline]
    pub fn is_embedded(&self) -> bool {
        self.embedded
    }
}
