use crate::Reflect;

/// An indirection to a single value of a known type: `Option<T>` or `Box<T>`.
pub trait Pointer: Reflect {
    /// The target, or `None` if empty.
    fn target(&self) -> Option<&dyn Reflect>;

    /// The target, or `None` if empty.
    fn target_mut(&mut self) -> Option<&mut dyn Reflect>;

    /// The target, storing [`Typed::default_value`](crate::info::Typed::default_value)
    /// first if empty.
    ///
    /// `None` if the layer is empty and the target type has no default value.
    fn target_or_default(&mut self) -> Option<&mut dyn Reflect>;

    /// Returns `true` if there is no target.
    #[inline]
    fn is_empty(&self) -> bool {
        self.target().is_none()
    }
}
