//! Direct value-to-value conversion through reflection.
//!
//! A conversion flattens the source into a pooled arena of nodes, then writes
//! the nodes into the destination. Records are matched by field name, using
//! the names resolved from their `#[reflect(...)]` attributes:
//!
//! ```
//! use vc_reflect::Reflect;
//!
//! #[derive(Reflect, Default)]
//! struct Person {
//!     pub name: String,
//!     pub age: u32,
//! }
//!
//! #[derive(Reflect, Default, Debug, PartialEq)]
//! struct Resident {
//!     pub name: String,
//!     pub city: String,
//! }
//!
//! let person = Person { name: "Ada".into(), age: 36 };
//! let mut resident = Resident::default();
//! vc_transcode::convert(&person, &mut resident).unwrap();
//!
//! assert_eq!(resident, Resident { name: "Ada".into(), city: String::new() });
//! ```
//!
//! Mismatches are never errors: fields without a counterpart, values of a
//! different type and non-string map keys are skipped. Scalars are moved
//! without coercion.

// -----------------------------------------------------------------------------
// Modules

mod arena;
mod decode;
mod encode;
mod error;
mod fields;
mod walk;

#[cfg(feature = "json")]
pub mod json;

// -----------------------------------------------------------------------------
// Exports

pub use error::TranscodeError;

use vc_reflect::Reflect;
use vc_reflect::ops::ReflectRef;

use crate::arena::{Arena, PooledArena};

// -----------------------------------------------------------------------------
// Config

/// Initial node capacity of a freshly allocated arena.
pub const ARENA_CAPACITY: usize = 256;

/// Maximum number of idle arenas kept for reuse.
pub const MAX_POOLED_ARENAS: usize = 64;

/// Arenas that grew beyond this many nodes are freed instead of pooled.
pub const MAX_RETAINED_NODES: usize = 1 << 16;

// -----------------------------------------------------------------------------
// Entry points

/// Converts `src` into `dest`.
///
/// See [`transcode`].
#[inline]
pub fn convert<D: Reflect>(src: &dyn Reflect, dest: &mut D) -> Result<(), TranscodeError> {
    transcode(src, Some(dest as &mut dyn Reflect))
}

/// Converts `src` into `dest`, field by field.
///
/// An empty `Option` or a null `Dynamic` source leaves `dest` untouched.
///
/// # Errors
///
/// [`TranscodeError::InvalidDestination`] if `dest` is `None`.
///
/// # Partial writes
///
/// `dest` is updated in place while the source is walked. Convert into a
/// fresh value when the previous content must not be mixed in.
pub fn transcode(src: &dyn Reflect, dest: Option<&mut dyn Reflect>) -> Result<(), TranscodeError> {
    if is_empty(src) {
        return Ok(());
    }
    let dest = dest.ok_or(TranscodeError::InvalidDestination)?;

    let encode = encode::obtain(src.reflect_type_info());
    let mut arena = PooledArena::checkout();
    encode(&mut *arena, Arena::ROOT, src);
    decode::materialize(&*arena, Arena::ROOT, dest);
    Ok(())
}

fn is_empty(src: &dyn Reflect) -> bool {
    match src.reflect_ref() {
        ReflectRef::Pointer(pointer) => pointer.is_empty(),
        ReflectRef::Dynamic(slot) => slot.is_null(),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, HashMap};
    use std::sync::Barrier;
    use std::time::{Duration, SystemTime};

    use vc_reflect::Reflect;
    use vc_reflect::info::Typed;
    use vc_reflect::ops::Dynamic;

    use crate::{TranscodeError, convert, transcode};

    #[derive(Reflect, Default, Debug, PartialEq, Clone)]
    struct Inner {
        pub level: u8,
        pub label: String,
    }

    #[derive(Reflect, Default, Debug, PartialEq, Clone)]
    struct Profile {
        pub name: String,
        pub age: u32,
        pub score: f64,
        pub tags: Vec<String>,
        pub attrs: BTreeMap<String, i64>,
        pub nick: Option<String>,
        pub boxed: Box<Inner>,
        pub grid: [u8; 3],
        pub ttl: Duration,
        #[reflect(rename = "x")]
        pub flag: bool,
        pub nested: Vec<Option<Inner>>,
    }

    fn sample() -> Profile {
        Profile {
            name: "ada".into(),
            age: 36,
            score: 9.5,
            tags: vec!["a".into(), "b".into()],
            attrs: BTreeMap::from([("k".into(), -1), ("z".into(), 7)]),
            nick: Some("lady".into()),
            boxed: Box::new(Inner {
                level: 3,
                label: "box".into(),
            }),
            grid: [1, 2, 3],
            ttl: Duration::from_millis(1500),
            flag: true,
            nested: vec![
                None,
                Some(Inner {
                    level: 1,
                    label: "n".into(),
                }),
            ],
        }
    }

    #[test]
    fn round_trip_and_idempotence() {
        let source = sample();
        let mut once = Profile::default();
        convert(&source, &mut once).unwrap();
        assert_eq!(once, source);

        let mut twice = Profile::default();
        convert(&once, &mut twice).unwrap();
        assert_eq!(twice, source);
    }

    #[derive(Reflect, Default)]
    struct RenamedSource {
        #[reflect(rename = "x")]
        pub a: i32,
    }

    #[derive(Reflect, Default)]
    struct ByTag {
        pub x: i32,
    }

    #[derive(Reflect, Default)]
    struct ByIdent {
        pub a: i32,
    }

    #[test]
    fn renamed_fields_use_the_tag() {
        let source = RenamedSource { a: 5 };

        let mut by_tag = ByTag::default();
        convert(&source, &mut by_tag).unwrap();
        assert_eq!(by_tag.x, 5);

        let mut by_ident = ByIdent::default();
        convert(&source, &mut by_ident).unwrap();
        assert_eq!(by_ident.a, 0);

        let mut back = RenamedSource::default();
        convert(&by_tag, &mut back).unwrap();
        assert_eq!(back.a, 5);
    }

    #[derive(Reflect, Default)]
    struct Left {
        pub name: String,
        pub left: u8,
    }

    #[derive(Reflect, Default)]
    struct Right {
        pub name: String,
        pub right: u8,
    }

    #[derive(Reflect, Default)]
    struct Both {
        #[reflect(embed)]
        pub l: Left,
        #[reflect(embed)]
        pub r: Right,
    }

    #[test]
    fn ambiguous_names_are_dropped() {
        let source = Both {
            l: Left {
                name: "l".into(),
                left: 1,
            },
            r: Right {
                name: "r".into(),
                right: 2,
            },
        };

        let mut map = HashMap::<String, Dynamic>::new();
        convert(&source, &mut map).unwrap();
        assert!(!map.contains_key("name"));
        assert_eq!(map["left"].downcast_ref::<u8>(), Some(&1));
        assert_eq!(map["right"].downcast_ref::<u8>(), Some(&2));

        let mut incoming = HashMap::<String, String>::new();
        incoming.insert("name".into(), "new".into());
        let mut dest = Both::default();
        convert(&incoming, &mut dest).unwrap();
        assert!(dest.l.name.is_empty());
        assert!(dest.r.name.is_empty());
    }

    #[derive(Reflect, Default)]
    struct WithPointer {
        pub inner: Option<Box<Inner>>,
        pub count: u8,
    }

    #[derive(Reflect, Default)]
    struct WithValue {
        pub inner: Inner,
        pub count: u8,
    }

    #[derive(Reflect, Default)]
    struct EmbeddedPointer {
        #[reflect(embed)]
        pub base: Option<Box<Inner>>,
    }

    #[test]
    fn empty_pointers_leave_destination_alone() {
        let source = WithPointer {
            inner: None,
            count: 2,
        };
        let mut dest = WithValue {
            inner: Inner {
                level: 9,
                label: "kept".into(),
            },
            count: 0,
        };
        convert(&source, &mut dest).unwrap();
        assert_eq!(dest.inner.level, 9);
        assert_eq!(dest.count, 2);

        let mut dest = WithPointer::default();
        convert(&source, &mut dest).unwrap();
        assert!(dest.inner.is_none());

        let mut flat = Inner {
            level: 4,
            label: "flat".into(),
        };
        convert(&EmbeddedPointer::default(), &mut flat).unwrap();
        assert_eq!(flat.level, 4);
        assert_eq!(flat.label, "flat");
    }

    #[test]
    fn destination_pointers_are_filled() {
        let source = WithValue {
            inner: Inner {
                level: 1,
                label: "in".into(),
            },
            count: 3,
        };
        let mut dest = WithPointer::default();
        convert(&source, &mut dest).unwrap();
        assert_eq!(dest.inner.as_deref().map(|inner| inner.level), Some(1));

        let mut embedded = EmbeddedPointer::default();
        convert(&source.inner, &mut embedded).unwrap();
        assert_eq!(embedded.base.map(|inner| inner.label), Some("in".into()));
    }

    #[derive(Reflect, Default)]
    struct Person {
        pub name: String,
        pub age: u32,
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Resident {
        pub name: String,
        pub city: String,
    }

    #[test]
    fn partial_overlap_copies_the_intersection() {
        let source = Person {
            name: "bo".into(),
            age: 40,
        };
        let mut dest = Resident::default();
        convert(&source, &mut dest).unwrap();
        assert_eq!(
            dest,
            Resident {
                name: "bo".into(),
                city: String::new(),
            }
        );
    }

    #[derive(Reflect, Default, Debug, PartialEq)]
    struct Chain {
        pub value: i32,
        pub next: Option<Box<Chain>>,
    }

    #[derive(Reflect, Default, Debug)]
    struct Link {
        pub value: i32,
        pub next: Option<Box<Link>>,
    }

    #[test]
    fn self_referential_types() {
        let source = Chain {
            value: 1,
            next: Some(Box::new(Chain {
                value: 2,
                next: Some(Box::new(Chain {
                    value: 3,
                    next: None,
                })),
            })),
        };

        let mut same = Chain::default();
        convert(&source, &mut same).unwrap();
        assert_eq!(same, source);

        let mut other = Link::default();
        convert(&source, &mut other).unwrap();
        let mut values = Vec::new();
        let mut cursor = Some(&other);
        while let Some(link) = cursor {
            values.push(link.value);
            cursor = link.next.as_deref();
        }
        assert_eq!(values, [1, 2, 3]);
    }

    #[test]
    fn sequences_resize() {
        let mut array = [9_u8; 4];
        convert(&vec![1_u8, 2], &mut array).unwrap();
        assert_eq!(array, [1, 2, 0, 0]);

        convert(&vec![5_u8, 6, 7, 8, 9, 10], &mut array).unwrap();
        assert_eq!(array, [5, 6, 7, 8]);

        let mut list = vec![1_u8, 2, 3];
        convert(&[4_u8], &mut list).unwrap();
        assert_eq!(list, [4]);

        convert(&Vec::<u8>::new(), &mut list).unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn non_string_keys_are_skipped() {
        let mut source = HashMap::<u32, String>::new();
        source.insert(1, "one".into());
        let mut dest = HashMap::<String, String>::new();
        convert(&source, &mut dest).unwrap();
        assert!(dest.is_empty());

        let mut incoming = BTreeMap::<String, u8>::new();
        incoming.insert("1".into(), 1);
        let mut numeric = HashMap::<u32, u8>::new();
        convert(&incoming, &mut numeric).unwrap();
        assert!(numeric.is_empty());
    }

    #[test]
    fn dynamic_destinations() {
        let mut slot = Dynamic::null();
        convert(&sample(), &mut slot).unwrap();
        let map = slot.as_map().unwrap();
        assert_eq!(map["age"].downcast_ref::<u32>(), Some(&36));
        assert_eq!(map["x"].downcast_ref::<bool>(), Some(&true));
        assert!(!map.contains_key("flag"));
        assert_eq!(map["tags"].as_list().map(<[Dynamic]>::len), Some(2));
        let nested = map["nested"].as_list().unwrap();
        assert!(nested[0].is_null());
        assert_eq!(
            nested[1].as_map().unwrap()["label"].downcast_ref::<String>(),
            Some(&"n".to_string())
        );

        let mut scalar = Dynamic::null();
        convert(&7_i16, &mut scalar).unwrap();
        assert_eq!(scalar.downcast_ref::<i16>(), Some(&7));

        let mut field = WithPointer::default();
        let mut holder = HashMap::<String, Dynamic>::new();
        holder.insert("count".into(), Dynamic::new(4_u8));
        convert(&holder, &mut field).unwrap();
        assert_eq!(field.count, 4);
    }

    #[test]
    fn dynamic_sources() {
        let mut slot = Dynamic::null();
        convert(&sample(), &mut slot).unwrap();

        let mut resident = Resident::default();
        convert(&slot, &mut resident).unwrap();
        assert_eq!(resident.name, "ada");

        let mut dest = Profile::default();
        convert(&slot, &mut dest).unwrap();
        assert_eq!(dest, sample());
    }

    #[test]
    fn mismatched_scalars_are_dropped() {
        let source = Person {
            name: "cy".into(),
            age: 7,
        };
        let mut map = BTreeMap::<String, String>::new();
        convert(&source, &mut map).unwrap();
        assert_eq!(map["name"], "cy");
        assert_eq!(map["age"], "");

        let mut number = 3_u64;
        convert(&"text", &mut number).unwrap();
        assert_eq!(number, 3);
    }

    #[derive(Reflect, Default, Debug)]
    struct OptionalAge {
        pub age: Option<String>,
        pub name: Option<Box<Vec<u8>>>,
        pub other: Option<u8>,
    }

    #[test]
    fn mismatches_leave_empty_pointers_alone() {
        let source = Person {
            name: "cy".into(),
            age: 7,
        };
        let mut dest = OptionalAge::default();
        convert(&source, &mut dest).unwrap();
        assert!(dest.age.is_none());
        assert!(dest.name.is_none());
        assert!(dest.other.is_none());

        let mut incoming = BTreeMap::<String, Vec<u8>>::new();
        incoming.insert("other".into(), vec![1]);
        incoming.insert("name".into(), vec![2, 3]);
        convert(&incoming, &mut dest).unwrap();
        assert!(dest.other.is_none());
        assert_eq!(dest.name, Some(Box::new(vec![2, 3])));
    }

    #[derive(Reflect, Debug, PartialEq, Clone)]
    struct Visit {
        pub at: SystemTime,
        pub note: Option<SystemTime>,
    }

    #[derive(Reflect, Debug, PartialEq)]
    struct VisitLog {
        pub visits: Vec<Visit>,
        pub last: Option<SystemTime>,
    }

    #[test]
    fn elements_without_default_impls() {
        let at = SystemTime::UNIX_EPOCH + Duration::from_secs(86_400);
        let source = VisitLog {
            visits: vec![
                Visit { at, note: None },
                Visit {
                    at,
                    note: Some(at),
                },
            ],
            last: Some(at),
        };

        let mut dest = VisitLog {
            visits: Vec::new(),
            last: None,
        };
        convert(&source, &mut dest).unwrap();
        assert_eq!(dest, source);

        let mut map = HashMap::<String, Dynamic>::new();
        convert(&source.visits[1], &mut map).unwrap();
        assert_eq!(map["at"].downcast_ref::<SystemTime>(), Some(&at));
        assert_eq!(map["note"].downcast_ref::<SystemTime>(), Some(&at));
    }

    #[test]
    fn destination_and_source_edge_cases() {
        let err = transcode(&5_u8, None).unwrap_err();
        assert!(matches!(err, TranscodeError::InvalidDestination));

        let mut dest = Inner {
            level: 2,
            label: "same".into(),
        };
        convert(&None::<Inner>, &mut dest).unwrap();
        assert_eq!(dest.level, 2);
        convert(&Dynamic::null(), &mut dest).unwrap();
        assert_eq!(dest.label, "same");
        assert!(transcode(&None::<u8>, None).is_ok());

        let mut empty = Profile::default();
        convert(&Profile::default(), &mut empty).unwrap();
        assert_eq!(empty, Profile::default());
    }

    macro_rules! cold_types {
        ($($name:ident),*) => {$(
            #[derive(Reflect, Default, Debug, PartialEq)]
            struct $name {
                pub id: u64,
                pub next: Option<Box<$name>>,
            }
        )*};
    }

    cold_types!(Cold0, Cold1, Cold2, Cold3, Cold4, Cold5);

    fn hammer<T: Reflect + Default>(make: fn(u64) -> T, check: fn(&T) -> u64) {
        for round in 0..50 {
            let mut dest = T::default();
            convert(&make(round), &mut dest).unwrap();
            assert_eq!(check(&dest), round);
        }
    }

    #[test]
    fn concurrent_cold_types_plan_once() {
        const THREADS_PER_TYPE: usize = 4;
        let barrier = Barrier::new(THREADS_PER_TYPE * 6);

        macro_rules! spawn_for {
            ($scope:ident, $($name:ident),*) => {$(
                for _ in 0..THREADS_PER_TYPE {
                    $scope.spawn(|| {
                        barrier.wait();
                        hammer::<$name>(
                            |id| $name { id, next: Some(Box::new($name { id, next: None })) },
                            |value| value.next.as_ref().map_or(u64::MAX, |next| next.id),
                        );
                    });
                }
            )*};
        }

        std::thread::scope(|scope| {
            spawn_for!(scope, Cold0, Cold1, Cold2, Cold3, Cold4, Cold5);
        });

        let built = crate::encode::BUILT.lock().unwrap();
        for type_id in [
            Cold0::type_info().type_id(),
            Cold1::type_info().type_id(),
            Cold2::type_info().type_id(),
            Cold3::type_info().type_id(),
            Cold4::type_info().type_id(),
            Cold5::type_info().type_id(),
            <Option<Box<Cold3>>>::type_info().type_id(),
        ] {
            assert_eq!(built.iter().filter(|&&id| id == type_id).count(), 1);
        }
    }

    #[test]
    fn concurrent_conversions_do_not_share_arenas() {
        std::thread::scope(|scope| {
            for worker in 0..8_u32 {
                scope.spawn(move || {
                    for round in 0..200_u32 {
                        let source = Person {
                            name: format!("{worker}-{round}"),
                            age: worker * 1000 + round,
                        };
                        let mut dest = Resident::default();
                        convert(&source, &mut dest).unwrap();
                        assert_eq!(dest.name, source.name);

                        let mut map = BTreeMap::<String, Dynamic>::new();
                        convert(&source, &mut map).unwrap();
                        assert_eq!(map["age"].downcast_ref::<u32>(), Some(&source.age));
                        assert_eq!(map.len(), 2);
                    }
                });
            }
        });
    }
}
