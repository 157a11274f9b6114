//! Writing an [`Arena`] into a destination value.

use vc_reflect::Reflect;
use vc_reflect::info::{ReflectKind, TypeInfo};
use vc_reflect::ops::{Dynamic, ReflectMut};
use vc_utils::hash::{FixedHashState, HashMap};

use crate::arena::{Arena, Node, NodeKind};
use crate::{fields, walk};

/// Writes the node at `index` into `dest`.
///
/// Null nodes leave `dest` untouched. Anything `dest` cannot hold is dropped,
/// and empty pointers in `dest` are only filled once the node is known to fit
/// behind them.
pub(crate) fn materialize(arena: &Arena<'_>, index: usize, dest: &mut dyn Reflect) {
    let node = arena.node(index);
    if node.kind == NodeKind::Null {
        return;
    }
    let leaf = dest.reflect_type_info().deref_pointers();
    if !fits(node, leaf) {
        log::debug!(
            "dropping {:?} node: `{}` cannot hold it",
            node.kind,
            leaf.type_path(),
        );
        return;
    }
    let Some(dest) = walk::deref_or_fill(dest) else {
        log::debug!(
            "dropping {:?} node: `{}` has no default value",
            node.kind,
            leaf.type_path(),
        );
        return;
    };
    match node.kind {
        NodeKind::Null => {}
        NodeKind::Scalar => {
            let Some(value) = node.scalar else {
                return;
            };
            if let Err(err) = dest.try_apply(value) {
                log::debug!("dropping `{}` value: {err}", value.reflect_type_path());
            }
        }
        NodeKind::List => materialize_list(arena, index, dest),
        NodeKind::Keyed => materialize_keyed(arena, index, dest),
    }
}

/// Whether a destination whose innermost type is `leaf` can take `node`.
fn fits(node: &Node<'_>, leaf: &TypeInfo) -> bool {
    match (node.kind, leaf.kind()) {
        (_, ReflectKind::Dynamic) => true,
        (NodeKind::Scalar, _) => node
            .scalar
            .is_some_and(|value| value.ty_id() == leaf.type_id()),
        (NodeKind::List, kind) => matches!(kind, ReflectKind::List | ReflectKind::Array),
        (NodeKind::Keyed, kind) => matches!(kind, ReflectKind::Map | ReflectKind::Struct),
        (NodeKind::Null, _) => false,
    }
}

fn materialize_list(arena: &Arena<'_>, index: usize, dest: &mut dyn Reflect) {
    let children = arena.children(index);
    let len = children.len();
    match dest.reflect_mut() {
        ReflectMut::List(list) => {
            if !list.reset(len) {
                log::debug!(
                    "dropping sequence: `{}` items have no default value",
                    list.reflect_type_path(),
                );
                return;
            }
            for (offset, child) in children.enumerate() {
                if let Some(slot) = list.get_mut(offset) {
                    materialize(arena, child, slot);
                }
            }
        }
        ReflectMut::Array(array) => {
            for (offset, child) in children.enumerate() {
                if let Some(slot) = array.get_mut(offset) {
                    materialize(arena, child, slot);
                }
            }
            array.reset_from(len);
        }
        ReflectMut::Dynamic(slot) => slot.set(dynamic_list(arena, index)),
        other => {
            log::debug!(
                "dropping sequence: `{}` is not a sequence",
                other.into_reflect().reflect_type_path(),
            );
        }
    }
}

fn materialize_keyed(arena: &Arena<'_>, index: usize, dest: &mut dyn Reflect) {
    match dest.reflect_mut() {
        ReflectMut::Map(map) => {
            for child in arena.children(index) {
                let Some(slot) = map.insert_default(arena.node(child).key) else {
                    log::debug!(
                        "dropping entries: `{}` has no string keys",
                        map.reflect_type_path(),
                    );
                    return;
                };
                materialize(arena, child, slot);
            }
        }
        ReflectMut::Struct(record) => {
            let Ok(info) = record.reflect_type_info().as_struct() else {
                return;
            };
            let plan = fields::plan(info);
            for child in arena.children(index) {
                let Some(field) = plan.get(arena.node(child).key) else {
                    continue;
                };
                if let Some(slot) = field.follow_mut(&mut *record) {
                    materialize(arena, child, slot);
                }
            }
        }
        ReflectMut::Dynamic(slot) => slot.set(dynamic_map(arena, index)),
        other => {
            log::debug!(
                "dropping record: `{}` has no named entries",
                other.into_reflect().reflect_type_path(),
            );
        }
    }
}

/// Builds an owned value out of the node at `index`.
///
/// Scalars are cloned, sequences become `Vec<Dynamic>` and keyed nodes
/// `HashMap<String, Dynamic>`.
fn dynamic(arena: &Arena<'_>, index: usize) -> Dynamic {
    let node = arena.node(index);
    match node.kind {
        NodeKind::Null => Dynamic::null(),
        NodeKind::Scalar => node
            .scalar
            .and_then(|value| value.reflect_clone())
            .map_or_else(Dynamic::null, Dynamic::from_boxed),
        NodeKind::List => Dynamic::new(dynamic_list(arena, index)),
        NodeKind::Keyed => Dynamic::new(dynamic_map(arena, index)),
    }
}

fn dynamic_list(arena: &Arena<'_>, index: usize) -> Vec<Dynamic> {
    arena
        .children(index)
        .map(|child| dynamic(arena, child))
        .collect()
}

fn dynamic_map(arena: &Arena<'_>, index: usize) -> HashMap<String, Dynamic> {
    let children = arena.children(index);
    let mut map = HashMap::with_capacity_and_hasher(children.len(), FixedHashState);
    for child in children {
        map.insert(String::from(arena.node(child).key), dynamic(arena, child));
    }
    map
}
