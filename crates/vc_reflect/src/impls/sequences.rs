use alloc::format;
use alloc::vec::Vec;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{ArrayInfo, ListInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{Array, List, ReflectMut, ReflectRef};

// -----------------------------------------------------------------------------
// Vec

impl<T: TypePath> TypePath for Vec<T> {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["alloc::vec::Vec<", T::type_path(), ">"]))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| concat(&["Vec<", T::type_name(), ">"]))
    }
}

impl<T: Typed> Typed for Vec<T> {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::List(ListInfo::new::<Self, T>()))
    }

    #[inline]
    fn default_value() -> Option<Self> {
        Some(Vec::new())
    }
}

impl<T: Reflect + Typed> Reflect for Vec<T> {
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::List
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::List(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::List(self)
    }
}

impl<T: Reflect + Typed> List for Vec<T> {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn reset(&mut self, len: usize) -> bool {
        let Some(items) = (0..len).map(|_| T::default_value()).collect::<Option<Vec<T>>>() else {
            return false;
        };
        *self = items;
        true
    }
}

// -----------------------------------------------------------------------------
// Array

impl<T: TypePath, const N: usize> TypePath for [T; N] {
    fn type_path() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {N}]", T::type_path()))
    }

    fn type_name() -> &'static str {
        static CELL: GenericTypePathCell = GenericTypePathCell::new();
        CELL.get_or_insert::<Self>(|| format!("[{}; {N}]", T::type_name()))
    }
}

impl<T: Typed, const N: usize> Typed for [T; N] {
    fn type_info() -> &'static TypeInfo {
        static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
        CELL.get_or_insert::<Self>(|| TypeInfo::Array(ArrayInfo::new::<Self, T>(N)))
    }

    fn default_value() -> Option<Self> {
        let items = (0..N).map(|_| T::default_value()).collect::<Option<Vec<T>>>()?;
        items.try_into().ok()
    }
}

impl<T: Reflect + Typed, const N: usize> Reflect for [T; N] {
    #[inline]
    fn reflect_kind(&self) -> ReflectKind {
        ReflectKind::Array
    }

    #[inline]
    fn reflect_ref(&self) -> ReflectRef<'_> {
        ReflectRef::Array(self)
    }

    #[inline]
    fn reflect_mut(&mut self) -> ReflectMut<'_> {
        ReflectMut::Array(self)
    }
}

impl<T: Reflect + Typed, const N: usize> Array for [T; N] {
    #[inline]
    fn get(&self, index: usize) -> Option<&dyn Reflect> {
        <[T]>::get(self, index).map(|item| item as &dyn Reflect)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut dyn Reflect> {
        <[T]>::get_mut(self, index).map(|item| item as &mut dyn Reflect)
    }

    #[inline]
    fn len(&self) -> usize {
        N
    }

    fn reset_from(&mut self, start: usize) {
        for item in self.iter_mut().skip(start) {
            let Some(value) = T::default_value() else {
                return;
            };
            *item = value;
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::format;
    use alloc::string::String;
    use alloc::vec;
    use alloc::vec::Vec;

    use crate::Reflect;
    use crate::impls::native::impl_reflect_opaque;
    use crate::info::{TypePath, Typed};
    use crate::ops::{Array, List};

    #[derive(Clone, Debug, PartialEq)]
    struct Text(String);

    impl_reflect_opaque! {
        Text => "sequences::Text" as "Text" (None),
    }

    #[test]
    fn list_reset_and_write() {
        let mut list = vec![String::from("old")];
        assert!(List::reset(&mut list, 2));
        assert_eq!(list, ["", ""]);
        List::get_mut(&mut list, 1)
            .unwrap()
            .try_apply(&String::from("b"))
            .unwrap();
        assert_eq!(list[1], "b");
        assert!(List::get(&list, 2).is_none());
    }

    #[test]
    fn items_without_default() {
        let mut list = vec![Text(String::from("kept"))];
        assert_eq!(List::len(&list), 1);
        assert!(List::get(&list, 0).unwrap().is::<Text>());
        assert!(!List::reset(&mut list, 3));
        assert!(List::reset(&mut list, 0));
        assert!(list.is_empty());

        let mut array = [Text(String::from("a")), Text(String::from("b"))];
        Array::reset_from(&mut array, 1);
        assert_eq!(array[1], Text(String::from("b")));
        assert_eq!(<[Text; 2]>::default_value(), None);
        assert_eq!(<[u8; 3]>::default_value(), Some([0; 3]));
    }

    #[test]
    fn array_reset_tail() {
        let mut array = [1_u8, 2, 3, 4];
        Array::reset_from(&mut array, 2);
        assert_eq!(array, [1, 2, 0, 0]);
        assert_eq!(Array::len(&array), 4);
    }

    #[test]
    fn paths_and_info() {
        assert_eq!(<Vec<u8>>::type_path(), "alloc::vec::Vec<u8>");
        assert_eq!(<[Vec<bool>; 3]>::type_name(), "[Vec<bool>; 3]");
        let info = <[u16; 5]>::type_info().as_array().unwrap();
        assert_eq!(info.capacity(), 5);
        assert!(info.item_ty().is::<u16>());
        assert!(<Vec<u16>>::type_info().as_list().unwrap().item_ty().is::<u16>());
        assert_eq!(format!("{:?}", &vec![1_u8, 2] as &dyn Reflect), "[1, 2]");
        assert_eq!(format!("{:?}", &Vec::<u8>::new() as &dyn Reflect), "[]");
    }
}
