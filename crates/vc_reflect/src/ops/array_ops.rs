use crate::Reflect;

/// A fixed-length sequence, e.g. `[T; N]`.
pub trait Array: Reflect {
    /// Item at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Item at `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// The fixed length.
    fn len(&self) -> usize;

    /// Resets every item from `start` on to its default value.
    ///
    /// Items are kept if the item type has no default value.
    fn reset_from(&mut self, start: usize);
}
