use alloc::boxed::Box;
use alloc::string::String;

use crate::Reflect;

/// A key-value mapping.
///
/// Writes only go through string keys: [`insert_default`](Map::insert_default)
/// succeeds when the key type is `String`.
pub trait Map: Reflect {
    /// Number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if there are no entries.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Iterates over the entries in the map's own order.
    fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_>;

    /// Stores a default value under `key`, replacing any previous one, and
    /// returns it for writing.
    ///
    /// Returns `None` if the key type cannot be built from a string or the
    /// value type has no default value. The map is untouched in that case.
    fn insert_default(&mut self, key: &str) -> Option<&mut dyn Reflect>;

    /// Value stored under the string key `key`.
    fn get(&self, key: &str) -> Option<&dyn Reflect> {
        self.iter()
            .find(|(k, _)| map_key(*k) == Some(key))
            .map(|(_, v)| v)
    }
}

/// Reads a map key as a string: `String` and `&'static str` keys qualify.
///
/// ```
/// use vc_reflect::Reflect;
/// use vc_reflect::ops::map_key;
///
/// let owned = String::from("a");
/// assert_eq!(map_key(&owned), Some("a"));
/// assert_eq!(map_key(&"b"), Some("b"));
/// assert_eq!(map_key(&3_u8), None);
/// ```
pub fn map_key(key: &dyn Reflect) -> Option<&str> {
    if let Some(key) = key.downcast_ref::<String>() {
        return Some(key.as_str());
    }
    key.downcast_ref::<&'static str>().copied()
}
