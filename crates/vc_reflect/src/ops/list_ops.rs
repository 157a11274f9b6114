use crate::Reflect;

/// A growable sequence, e.g. `Vec<T>`.
pub trait List: Reflect {
    /// Item at `index`.
    fn get(&self, index: usize) -> Option<&dyn Reflect>;

    /// Item at `index`.
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect>;

    /// Number of items.
    fn len(&self) -> usize;

    /// Returns `true` if there are no items.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Replaces the content with `len` default items.
    ///
    /// Returns `false` and leaves the list untouched if the item type has no
    /// default value.
    fn reset(&mut self, len: usize) -> bool;
}
