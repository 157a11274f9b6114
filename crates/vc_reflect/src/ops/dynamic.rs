use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;
use core::any::Any;
use core::fmt;

use vc_utils::hash::HashMap;

use crate::Reflect;
use crate::impls::NonGenericTypeInfoCell;
use crate::info::{DynamicInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{ApplyError, ReflectMut, ReflectRef};

/// A slot holding a value of any reflected type, or nothing.
///
/// When a conversion writes into a `Dynamic`, scalars are stored as clones of
/// the source value, sequences as `Vec<Dynamic>` and records or maps as
/// [`HashMap<String, Dynamic>`](vc_utils::hash::HashMap).
///
/// # Examples
///
/// ```
/// use vc_reflect::ops::Dynamic;
///
/// let mut slot = Dynamic::null();
/// assert!(slot.is_null());
///
/// slot.set(42_i64);
/// assert_eq!(slot.downcast_ref::<i64>(), Some(&42));
///
/// let list = Dynamic::new(vec![Dynamic::new(1_u8), Dynamic::null()]);
/// assert_eq!(list.as_list().map(<[Dynamic]>::len), Some(2));
/// ```
#[derive(Default)]
pub struct Dynamic(Option<Box<dyn Reflect>>);

impl Dynamic {
    /// An empty slot.
    #[inline]
    pub const fn null() -> Self {
        Self(None)
    }

    /// A slot holding `value`.
    #[inline]
    pub fn new<T: Reflect>(value: T) -> Self {
        Self(Some(Box::new(value)))
    }

    /// A slot holding an already boxed value.
    #[inline]
    pub fn from_boxed(value: Box<dyn Reflect>) -> Self {
        Self(Some(value))
    }

    /// Returns `true` if the slot is empty.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.0.is_none()
    }

    /// The held value.
    #[inline]
    pub fn get(&self) -> Option<&dyn Reflect> {
        self.0.as_deref()
    }

    /// The held value.
    #[inline]
    pub fn get_mut(&mut self) -> Option<&mut dyn Reflect> {
        self.0.as_deref_mut()
    }

    /// Replaces the held value.
    #[inline]
    pub fn set<T: Reflect>(&mut self, value: T) {
        self.0 = Some(Box::new(value));
    }

    /// Replaces the held value with an already boxed one.
    #[inline]
    pub fn set_boxed(&mut self, value: Box<dyn Reflect>) {
        self.0 = Some(value);
    }

    /// Empties the slot, returning the held value.
    #[inline]
    pub fn take(&mut self) -> Option<Box<dyn Reflect>> {
        self.0.take()
    }

    /// The held value as `T`.
    #[inline]
    pub fn downcast_ref<T: Any>(&self) -> Option<&T> {
        self.get()?.downcast_ref::<T>()
    }

    /// The held sequence, if the slot holds a `Vec<Dynamic>`.
    pub fn as_list(&self) -> Option<&[Dynamic]> {
        self.downcast_ref::<Vec<Dynamic>>().map(Vec::as_slice)
    }

    /// The held mapping, if the slot holds a `HashMap<String, Dynamic>`.
    pub fn as_map(&self) -> Option<&HashMap<String, Dynamic>> {
        self.downcast_ref::<HashMap<String, Dynamic>>()
    }
}

impl fmt::Debug for Dynamic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.get() {
            Some(value) => value.reflect_debug(f),
            None => f.write_str("null"),
        }
    }
}

impl TypePath for Dynamic {
    #[inline]
    fn type_path() -> &'static str {
        "vc_reflect::ops::Dynamic"
    }

    #[inline]
    fn type_name() -> &'static str {
        "Dynamic"
    }
}

impl Typed for Dynamic {
    fn type_info() -> &'static TypeInfo {
        static CELL: NonGenericTypeInfoCell = NonGenericTypeInfoCell::new();
        CELL.get_or_init(|| TypeInfo::Dynamic(DynamicInfo::new::<Self>()))
    }

    #[inline]
    fn default_value() -> Option<Self> {
        Some(Self::null())
    }
}

impl Reflect for Dynamic {
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Dynamic
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Dynamic(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Dynamic(self)
    }

    fn try_apply(&mut self, value: &dyn Reflect) -> Result<(), ApplyError> {
        let cloned = value.reflect_clone().ok_or(ApplyError::NotCloneable {
            type_path: value.reflect_type_path(),
        })?;
        self.0 = Some(cloned);
        Ok(())
    }

    fn reflect_debug(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}
