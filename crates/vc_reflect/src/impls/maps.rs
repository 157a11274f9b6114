use alloc::boxed::Box;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::any::Any;
use core::hash::{BuildHasher, Hash};

use vc_utils::hash::hashbrown;

use crate::Reflect;
use crate::impls::{GenericTypeInfoCell, GenericTypePathCell, concat};
use crate::info::{MapInfo, ReflectKind, TypeInfo, TypePath, Typed};
use crate::ops::{Map, ReflectMut, ReflectRef};

/// Builds a key of type `K` from a string, if `K` is `String`.
#[inline]
fn string_key<K: Any>(key: &str) -> Option<K> {
    let mut key = Some(String::from(key));
    <dyn Any>::downcast_mut::<Option<K>>(&mut key)?.take()
}

macro_rules! impl_reflect_map {
    (
        $path:literal as $name:literal => $($map:ident)::+
        <K: { $($key_bound:tt)* } $(, $s:ident: { $($s_bound:tt)* })?>
    ) => {
        impl<K: TypePath, V: TypePath $(, $s: 'static)?> TypePath for $($map)::+<K, V $(, $s)?> {
            fn type_path() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$path, "<", K::type_path(), ", ", V::type_path(), ">"])
                })
            }

            fn type_name() -> &'static str {
                static CELL: GenericTypePathCell = GenericTypePathCell::new();
                CELL.get_or_insert::<Self>(|| {
                    concat(&[$name, "<", K::type_name(), ", ", V::type_name(), ">"])
                })
            }
        }

        impl<K: Typed, V: Typed $(, $s: 'static)?> Typed for $($map)::+<K, V $(, $s)?>
        where
            Self: Default,
        {
            fn type_info() -> &'static TypeInfo {
                static CELL: GenericTypeInfoCell = GenericTypeInfoCell::new();
                CELL.get_or_insert::<Self>(|| TypeInfo::Map(MapInfo::new::<Self, K, V>()))
            }

            #[inline]
            fn default_value() -> Option<Self> {
                Some(Self::default())
            }
        }

        impl<K, V $(, $s)?> Reflect for $($map)::+<K, V $(, $s)?>
        where
            K: Reflect + Typed + $($key_bound)*,
            V: Reflect + Typed,
            $($s: $($s_bound)*,)?
        {
            #[inline]
            fn reflect_kind(&self) -> ReflectKind {
                ReflectKind::Map
            }

            #[inline]
            fn reflect_ref(&self) -> ReflectRef<'_> {
                ReflectRef::Map(self)
            }

            #[inline]
            fn reflect_mut(&mut self) -> ReflectMut<'_> {
                ReflectMut::Map(self)
            }
        }

        impl<K, V $(, $s)?> Map for $($map)::+<K, V $(, $s)?>
        where
            K: Reflect + Typed + $($key_bound)*,
            V: Reflect + Typed,
            $($s: $($s_bound)*,)?
        {
            #[inline]
            fn len(&self) -> usize {
                $($map)::+::len(self)
            }

            fn iter(&self) -> Box<dyn Iterator<Item = (&dyn Reflect, &dyn Reflect)> + '_> {
                Box::new(
                    $($map)::+::iter(self)
                        .map(|(key, value)| (key as &dyn Reflect, value as &dyn Reflect)),
                )
            }

            fn insert_default(&mut self, key: &str) -> Option<&mut dyn Reflect> {
                let key = string_key::<K>(key)?;
                let value = V::default_value()?;
                self.remove(&key);
                Some(self.entry(key).or_insert(value))
            }
        }
    };
}

impl_reflect_map! {
    "std::collections::HashMap" as "HashMap" => std::collections::HashMap
    <K: { Eq + Hash }, S: { BuildHasher + Default + Send + Sync + 'static }>
}

impl_reflect_map! {
    "hashbrown::HashMap" as "HashMap" => hashbrown::HashMap
    <K: { Eq + Hash }, S: { BuildHasher + Default + Send + Sync + 'static }>
}

impl_reflect_map! {
    "alloc::collections::BTreeMap" as "BTreeMap" => BTreeMap
    <K: { Ord }>
}
