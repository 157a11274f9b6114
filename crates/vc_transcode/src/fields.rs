//! Visible-field resolution for record types.
//!
//! Fields are discovered breadth-first through embedded records. A field
//! shadows deeper fields of the same name; among fields of equal depth a
//! tagged one wins, and any other tie removes the name altogether.

use core::any::TypeId;
use std::sync::{OnceLock, PoisonError, RwLock};

use vc_reflect::Reflect;
use vc_reflect::info::{StructInfo, TypeInfo};
use vc_reflect::ops::{ReflectMut, ReflectRef, Struct};
use vc_utils::TypeIdMap;
use vc_utils::hash::HashMap;

use crate::walk;

// -----------------------------------------------------------------------------
// Field

/// A visible field of a record type.
#[derive(Debug)]
pub(crate) struct Field {
    name: &'static str,
    tagged: bool,
    path: Box<[usize]>,
    info: &'static TypeInfo,
}

impl Field {
    /// The effective name.
    #[inline]
    pub(crate) fn name(&self) -> &'static str {
        self.name
    }

    /// The declared type of the field.
    #[inline]
    pub(crate) fn info(&self) -> &'static TypeInfo {
        self.info
    }

    /// Reads the field out of `root`.
    ///
    /// Returns `None` if an embedded record on the way sits behind an empty
    /// pointer.
    pub(crate) fn follow<'a>(&self, root: &'a dyn Struct) -> Option<&'a dyn Reflect> {
        let (&last, embedded) = self.path.split_last()?;
        let mut record = root;
        for &index in embedded {
            let ReflectRef::Struct(inner) = walk::deref(record.field_at(index)?)?.reflect_ref()
            else {
                return None;
            };
            record = inner;
        }
        record.field_at(last)
    }

    /// Reaches the field inside `root` for writing, filling empty pointers to
    /// embedded records on the way.
    pub(crate) fn follow_mut<'a>(&self, root: &'a mut dyn Struct) -> Option<&'a mut dyn Reflect> {
        let (&last, embedded) = self.path.split_last()?;
        let mut record = root;
        for &index in embedded {
            let inner = walk::deref_or_fill(record.field_at_mut(index)?)?;
            let ReflectMut::Struct(inner) = inner.reflect_mut() else {
                return None;
            };
            record = inner;
        }
        record.field_at_mut(last)
    }
}

// -----------------------------------------------------------------------------
// FieldPlan

/// The visible fields of a record type, sorted by name.
#[derive(Debug)]
pub(crate) struct FieldPlan {
    fields: Box<[Field]>,
    by_name: HashMap<&'static str, usize>,
}

impl FieldPlan {
    #[inline]
    pub(crate) fn fields(&self) -> &[Field] {
        &self.fields
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.fields.len()
    }

    /// The field with the exact effective name `name`.
    #[inline]
    pub(crate) fn get(&self, name: &str) -> Option<&Field> {
        self.by_name.get(name).map(|&index| &self.fields[index])
    }
}

static PLANS: RwLock<TypeIdMap<&'static OnceLock<FieldPlan>>> = RwLock::new(TypeIdMap::new());

/// Returns the cached plan of `info`, resolving it on first use.
///
/// Concurrent first callers for one type wait for a single resolution.
pub(crate) fn plan(info: &'static StructInfo) -> &'static FieldPlan {
    let type_id = info.ty().id();
    let cached = PLANS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
        .copied();

    let cell = match cached {
        Some(cell) => cell,
        None => *PLANS
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .get_or_insert(type_id, || &*Box::leak(Box::new(OnceLock::new()))),
    };

    cell.get_or_init(|| resolve(info))
}

// -----------------------------------------------------------------------------
// Resolution

/// A field found during the scan, before shadowing is applied.
#[derive(Clone)]
struct Candidate {
    name: &'static str,
    tagged: bool,
    path: Vec<usize>,
    info: &'static TypeInfo,
}

/// An embedded record queued for the next depth.
struct Embedded {
    info: &'static StructInfo,
    path: Vec<usize>,
}

fn resolve(info: &'static StructInfo) -> FieldPlan {
    let mut candidates = scan(info);

    candidates.sort_by(|a, b| {
        a.name
            .cmp(b.name)
            .then(a.path.len().cmp(&b.path.len()))
            .then(b.tagged.cmp(&a.tagged))
            .then_with(|| a.path.cmp(&b.path))
    });

    let mut fields = Vec::with_capacity(candidates.len());
    for group in candidates.chunk_by(|a, b| a.name == b.name) {
        // Sorted by depth then tag, so the first entry dominates unless the
        // second one is just as shallow and just as tagged.
        let first = &group[0];
        if let Some(second) = group.get(1)
            && second.path.len() == first.path.len()
            && second.tagged == first.tagged
        {
            log::debug!(
                "dropping ambiguous field name `{}` of `{}`",
                first.name,
                info.ty().path(),
            );
            continue;
        }
        fields.push(Field {
            name: first.name,
            tagged: first.tagged,
            path: first.path.as_slice().into(),
            info: first.info,
        });
    }

    let by_name = fields
        .iter()
        .enumerate()
        .map(|(index, field)| (field.name, index))
        .collect();

    log::trace!(
        "resolved {} visible fields ({} tagged) for `{}`",
        fields.len(),
        fields.iter().filter(|field| field.tagged).count(),
        info.ty().path(),
    );

    FieldPlan {
        fields: fields.into_boxed_slice(),
        by_name,
    }
}

/// Collects every candidate field, breadth-first by embedding depth.
fn scan(root: &'static StructInfo) -> Vec<Candidate> {
    let mut candidates = Vec::new();
    let mut visited = Vec::<TypeId>::new();

    let mut next = vec![Embedded {
        info: root,
        path: Vec::new(),
    }];
    let mut next_count = TypeIdMap::<usize>::new();

    while !next.is_empty() {
        let current = core::mem::take(&mut next);
        let count = core::mem::take(&mut next_count);

        for embedded in current {
            let type_id = embedded.info.ty().id();
            if visited.contains(&type_id) {
                continue;
            }
            visited.push(type_id);

            for (index, field) in embedded.info.fields().iter().enumerate() {
                let target = field.type_info().deref_pointers();

                if field.is_embedded() {
                    if !field.is_public() && !target.is_struct() {
                        continue;
                    }
                } else if !field.is_public() {
                    continue;
                }

                let tag = field.tag().unwrap_or("");
                if tag == "-" {
                    continue;
                }
                let name = Some(parse_tag(tag)).filter(|name| is_valid_tag(name));

                let mut path = Vec::with_capacity(embedded.path.len() + 1);
                path.extend_from_slice(&embedded.path);
                path.push(index);

                match target {
                    TypeInfo::Struct(inner) if field.is_embedded() && name.is_none() => {
                        let seen = next_count.get_or_insert(inner.ty().id(), || 0);
                        *seen += 1;
                        if *seen == 1 {
                            next.push(Embedded { info: inner, path });
                        }
                    }
                    _ => {
                        candidates.push(Candidate {
                            name: name.unwrap_or(field.name()),
                            tagged: name.is_some(),
                            path,
                            info: field.type_info(),
                        });
                        // A record reached twice at this depth yields every
                        // field twice, so the tie-break removes them.
                        if count.get(&type_id).is_some_and(|&n| n > 1)
                            && let Some(last) = candidates.last().cloned()
                        {
                            candidates.push(last);
                        }
                    }
                }
            }
        }
    }

    candidates
}

/// The name part of a `name[,option...]` tag.
fn parse_tag(tag: &str) -> &str {
    tag.split_once(',').map_or(tag, |(name, _)| name)
}

/// Whether `name` can be used as a field name.
///
/// Letters, digits and most punctuation are allowed; backslash and quotes are
/// reserved.
fn is_valid_tag(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_alphanumeric() || "!#$%&()*+-./:;<=>?@[]^_{|}~ ".contains(c))
}

#[cfg(test)]
mod tests {
    use vc_reflect::Reflect;
    use vc_reflect::info::Typed;
    use vc_reflect::ops::{ReflectMut, ReflectRef};

    use super::{FieldPlan, is_valid_tag, parse_tag, plan};

    fn plan_of<T: Typed>() -> &'static FieldPlan {
        plan(T::type_info().as_struct().unwrap())
    }

    fn names(plan: &FieldPlan) -> Vec<&'static str> {
        plan.fields().iter().map(|field| field.name()).collect()
    }

    #[derive(Reflect, Default)]
    struct Base {
        pub id: u32,
        pub name: String,
    }

    #[derive(Reflect, Default)]
    struct Audit {
        pub name: String,
        pub at: u64,
    }

    #[derive(Reflect, Default)]
    struct Shadowed {
        #[reflect(embed)]
        pub base: Base,
        #[reflect(embed)]
        pub audit: Audit,
        pub id: u64,
    }

    #[test]
    fn shallow_wins_and_ties_drop() {
        let plan = plan_of::<Shadowed>();
        assert_eq!(names(plan), ["at", "id"]);
        assert_eq!(&*plan.get("id").unwrap().path, [2]);
        assert_eq!(&*plan.get("at").unwrap().path, [1, 1]);
        assert!(plan.get("name").is_none());
    }

    #[derive(Reflect, Default)]
    struct Renamed {
        #[reflect(rename = "key")]
        pub x: u8,
    }

    #[derive(Reflect, Default)]
    struct Plain {
        pub key: u8,
    }

    #[derive(Reflect, Default)]
    struct TagBreaksTie {
        #[reflect(embed)]
        pub plain: Plain,
        #[reflect(embed)]
        pub renamed: Renamed,
    }

    #[test]
    fn tagged_beats_untagged() {
        let plan = plan_of::<TagBreaksTie>();
        let key = plan.get("key").unwrap();
        assert!(key.tagged);
        assert_eq!(&*key.path, [1, 0]);
        assert_eq!(plan.len(), 1);
    }

    #[derive(Reflect, Default)]
    struct AlsoRenamed {
        #[reflect(tag = "key,omitempty")]
        pub y: u16,
    }

    #[derive(Reflect, Default)]
    struct TwoTags {
        #[reflect(embed)]
        pub renamed: Renamed,
        #[reflect(embed)]
        pub also: AlsoRenamed,
        pub z: u8,
    }

    #[test]
    fn two_tagged_at_one_depth_drop() {
        let plan = plan_of::<TwoTags>();
        assert!(plan.get("key").is_none());
        assert_eq!(names(plan), ["z"]);
    }

    #[derive(Reflect, Default)]
    struct ShallowPlain {
        #[reflect(embed)]
        pub renamed: Renamed,
        pub key: u8,
    }

    #[test]
    fn shallow_untagged_beats_deep_tagged() {
        let plan = plan_of::<ShallowPlain>();
        let key = plan.get("key").unwrap();
        assert!(!key.tagged);
        assert_eq!(&*key.path, [1]);
        assert_eq!(plan.len(), 1);
    }

    #[derive(Reflect, Default)]
    struct Hidden {
        pub inner_value: i8,
    }

    #[derive(Reflect, Default)]
    struct Tags {
        #[reflect(tag = "-")]
        pub excluded: u8,
        #[reflect(tag = ",omitempty")]
        pub plain: u8,
        #[reflect(tag = "bad\\name")]
        pub invalid: u8,
        #[reflect(tag = "with space,string")]
        pub spaced: u8,
        secret: u8,
        #[reflect(embed)]
        hidden: Hidden,
        #[reflect(embed, tag = "meta")]
        pub meta: Base,
        #[reflect(embed)]
        pub optional: Option<Box<Audit>>,
    }

    #[test]
    fn tag_rules() {
        let plan = plan_of::<Tags>();
        assert_eq!(
            names(plan),
            ["at", "inner_value", "invalid", "meta", "name", "plain", "with space"]
        );
        assert!(!plan.get("plain").unwrap().tagged);
        assert!(!plan.get("invalid").unwrap().tagged);
        assert!(plan.get("meta").unwrap().info().ty().is::<Base>());
        assert_eq!(&*plan.get("inner_value").unwrap().path, [5, 0]);
        assert_eq!(&*plan.get("at").unwrap().path, [7, 1]);
    }

    #[derive(Reflect, Default)]
    struct Leaf {
        pub v: u8,
    }

    #[derive(Reflect, Default)]
    struct Left {
        #[reflect(embed)]
        pub leaf: Leaf,
    }

    #[derive(Reflect, Default)]
    struct Right {
        #[reflect(embed)]
        pub leaf: Leaf,
    }

    #[derive(Reflect, Default)]
    struct Twice {
        #[reflect(embed)]
        pub left: Left,
        #[reflect(embed)]
        pub right: Right,
        pub w: u8,
    }

    #[test]
    fn same_record_twice_at_one_depth_is_dropped() {
        assert_eq!(names(plan_of::<Twice>()), ["w"]);
    }

    #[test]
    fn follow_through_embedded_pointer() {
        let plan = plan_of::<Tags>();
        let at = plan.get("at").unwrap();

        let mut value = Tags::default();
        let ReflectRef::Struct(data) = value.reflect_ref() else {
            panic!("expected a struct");
        };
        assert!(at.follow(data).is_none());

        let ReflectMut::Struct(data) = value.reflect_mut() else {
            panic!("expected a struct");
        };
        at.follow_mut(data).unwrap().try_apply(&7_u64).unwrap();
        assert_eq!(value.optional.as_ref().map(|audit| audit.at), Some(7));

        let ReflectRef::Struct(data) = value.reflect_ref() else {
            panic!("expected a struct");
        };
        let read = at.follow(data).and_then(|v| v.downcast_ref::<u64>());
        assert_eq!(read, Some(&7));
    }

    #[test]
    fn plans_are_cached() {
        assert!(core::ptr::eq(plan_of::<Base>(), plan_of::<Base>()));
    }

    #[test]
    fn tag_parsing() {
        assert_eq!(parse_tag("name,omitempty"), "name");
        assert_eq!(parse_tag("name"), "name");
        assert_eq!(parse_tag(",string"), "");
        assert!(is_valid_tag("a-b.c_d"));
        assert!(is_valid_tag("名前"));
        assert!(!is_valid_tag(""));
        assert!(!is_valid_tag("a\"b"));
        assert!(!is_valid_tag("a\\b"));
    }
}
