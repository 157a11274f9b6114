use core::any::TypeId;
use core::fmt;

// -----------------------------------------------------------------------------
// TypePath

/// Stable, human readable names for a type.
///
/// Only used for diagnostics and logging; identity always goes through
/// [`TypeId`].
///
/// # Examples
///
/// ```
/// use vc_reflect::info::TypePath;
///
/// assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
/// assert_eq!(<Vec<u8>>::type_name(), "Vec<u8>");
/// ```
pub trait TypePath: 'static {
    /// Full path, e.g. `alloc::string::String`.
    fn type_path() -> &'static str;

    /// Short name, e.g. `String`.
    fn type_name() -> &'static str;
}

// -----------------------------------------------------------------------------
// DynamicTypePath

/// Object-safe mirror of [`TypePath`], implemented for every `TypePath` type.
pub trait DynamicTypePath {
    /// See [`TypePath::type_path`].
    fn reflect_type_path(&self) -> &'static str;

    /// See [`TypePath::type_name`].
    fn reflect_type_name(&self) -> &'static str;
}

impl<T: TypePath> DynamicTypePath for T {
    #[inline]
    fn reflect_type_path(&self) -> &'static str {
        Self::type_path()
    }

    #[inline]
    fn reflect_type_name(&self) -> &'static str {
        Self::type_name()
    }
}

// -----------------------------------------------------------------------------
// Type

/// A [`TypeId`] together with the type's names.
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: fn() -> &'static str,
    name: fn() -> &'static str,
}

impl Type {
    /// Describes `T`.
    #[inline]
    pub fn of<T: TypePath + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: T::type_path,
            name: T::type_name,
        }
    }

    /// Returns the [`TypeId`] of the described type.
    #[inline(always)]
    pub fn id(&self) -> TypeId {
        self.id
    }

    /// See [`TypePath::type_path`].
    #[inline]
    pub fn path(&self) -> &'static str {
        (self.path)()
    }

    /// See [`TypePath::type_name`].
    #[inline]
    pub fn name(&self) -> &'static str {
        (self.name)()
    }

    /// Returns `true` if this describes `T`.
    #[inline]
    pub fn is<T: ?Sized + 'static>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}
