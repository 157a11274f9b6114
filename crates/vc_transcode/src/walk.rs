//! Walking through `Pointer` layers.

use vc_reflect::Reflect;
use vc_reflect::ops::{ReflectMut, ReflectRef};

/// Follows pointer targets down to a non-pointer value.
///
/// Returns `None` if an empty layer is crossed.
pub(crate) fn deref(value: &dyn Reflect) -> Option<&dyn Reflect> {
    let mut current = value.reflect_ref();
    loop {
        match current {
            ReflectRef::Pointer(pointer) => current = pointer.target()?.reflect_ref(),
            other => return Some(other.into_reflect()),
        }
    }
}

/// Follows pointer targets down to a non-pointer value, filling every empty
/// layer with a default value on the way.
///
/// Returns `None` if an empty layer has no default value to fill it with.
/// Layers filled before that point stay filled.
///
/// A [`Dynamic`](vc_reflect::ops::Dynamic) is not a pointer: it is returned
/// as is and written by replacement, which keeps the walk finite. A `Dynamic`
/// holding an `Option` or a `Box` is therefore overwritten as a whole, never
/// written through.
pub(crate) fn deref_or_fill(value: &mut dyn Reflect) -> Option<&mut dyn Reflect> {
    let mut current = value.reflect_mut();
    loop {
        match current {
            ReflectMut::Pointer(pointer) => current = pointer.target_or_default()?.reflect_mut(),
            other => return Some(other.into_reflect()),
        }
    }
}

#[cfg(test)]
mod tests {
    use vc_reflect::Reflect;
    use vc_reflect::ops::Dynamic;

    use super::{deref, deref_or_fill};

    #[test]
    fn deref_stops_at_empty_layer() {
        let value: Option<Box<Option<u8>>> = Some(Box::new(None));
        assert!(deref(&value).is_none());

        let value: Option<Box<u8>> = Some(Box::new(4));
        assert_eq!(deref(&value).and_then(|v| v.downcast_ref::<u8>()), Some(&4));
    }

    #[test]
    fn deref_or_fill_allocates() {
        let mut value: Option<Box<Option<i32>>> = None;
        deref_or_fill(&mut value).unwrap().try_apply(&5_i32).unwrap();
        assert_eq!(value, Some(Box::new(Some(5))));
    }

    #[test]
    fn dynamic_is_terminal() {
        let mut slot = Dynamic::new(Some(1_u8));
        let target = deref_or_fill(&mut slot).unwrap();
        assert!(target.is::<Dynamic>());

        target.try_apply(&2_u8).unwrap();
        assert_eq!(slot.downcast_ref::<u8>(), Some(&2));
        assert!(slot.downcast_ref::<Option<u8>>().is_none());
    }
}
