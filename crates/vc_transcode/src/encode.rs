//! Per-type encoders that flatten a value into an [`Arena`].
//!
//! Encoders are planned from static type information, once per type, and
//! cached for the life of the process. A type under construction is
//! represented by a placeholder that waits for the real encoder, which lets
//! recursive types refer to themselves.

use std::sync::{OnceLock, PoisonError, RwLock};

use vc_reflect::Reflect;
use vc_reflect::info::TypeInfo;
use vc_reflect::ops::{ReflectRef, map_key};
use vc_utils::TypeIdMap;

use crate::arena::{Arena, NodeKind};
use crate::fields;

/// Writes a value into the node at the given index.
pub(crate) type Encoder =
    &'static (dyn for<'a> Fn(&mut Arena<'a>, usize, &'a dyn Reflect) + Send + Sync);

static ENCODERS: RwLock<TypeIdMap<Encoder>> = RwLock::new(TypeIdMap::new());

#[cfg(test)]
pub(crate) static BUILT: std::sync::Mutex<Vec<core::any::TypeId>> =
    std::sync::Mutex::new(Vec::new());

#[inline]
fn leak<F>(encoder: F) -> Encoder
where
    F: for<'a> Fn(&mut Arena<'a>, usize, &'a dyn Reflect) + Send + Sync + 'static,
{
    Box::leak(Box::new(encoder))
}

/// Returns the encoder of the type described by `info`, planning it on first
/// use.
pub(crate) fn obtain(info: &'static TypeInfo) -> Encoder {
    let type_id = info.type_id();

    let cached = ENCODERS
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(&type_id)
        .copied();
    if let Some(encoder) = cached {
        return encoder;
    }

    let ready: &'static OnceLock<Encoder> = {
        let mut encoders = ENCODERS.write().unwrap_or_else(PoisonError::into_inner);
        if let Some(&encoder) = encoders.get(&type_id) {
            return encoder;
        }
        let ready: &'static OnceLock<Encoder> = Box::leak(Box::new(OnceLock::new()));
        encoders.insert(
            type_id,
            leak(move |arena, index, value| (ready.wait())(arena, index, value)),
        );
        ready
    };

    // Planning may come back here for the same type; it then receives the
    // placeholder published above.
    let encoder = build(info);
    let _ = ready.set(encoder);
    ENCODERS
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(type_id, encoder);
    encoder
}

fn build(info: &'static TypeInfo) -> Encoder {
    log::trace!("planning encoder for `{}`", info.type_path());

    #[cfg(test)]
    BUILT
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .push(info.type_id());

    match info {
        TypeInfo::Opaque(_) => leak(encode_scalar),
        TypeInfo::Dynamic(_) => leak(encode_dynamic),
        TypeInfo::Pointer(pointer) => {
            let target = obtain(pointer.target_info());
            leak(move |arena, index, value| {
                if let ReflectRef::Pointer(pointer) = value.reflect_ref()
                    && let Some(value) = pointer.target()
                {
                    target(arena, index, value);
                }
            })
        }
        TypeInfo::List(list) => {
            let item = obtain(list.item_info());
            leak(move |arena, index, value| {
                if let ReflectRef::List(list) = value.reflect_ref() {
                    let len = list.len();
                    let first = arena.reserve(index, NodeKind::List, len);
                    for offset in 0..len {
                        if let Some(value) = list.get(offset) {
                            item(arena, first + offset, value);
                        }
                    }
                }
            })
        }
        TypeInfo::Array(array) => {
            let item = obtain(array.item_info());
            leak(move |arena, index, value| {
                if let ReflectRef::Array(array) = value.reflect_ref() {
                    let len = array.len();
                    let first = arena.reserve(index, NodeKind::List, len);
                    for offset in 0..len {
                        if let Some(value) = array.get(offset) {
                            item(arena, first + offset, value);
                        }
                    }
                }
            })
        }
        TypeInfo::Map(map) => {
            let key_ty = map.key_ty();
            if !key_ty.is::<String>() && !key_ty.is::<&'static str>() {
                log::debug!(
                    "entries of `{}` are skipped: `{}` is not a string key",
                    info.type_path(),
                    key_ty.path(),
                );
                return leak(|arena, index, _| {
                    arena.reserve(index, NodeKind::Keyed, 0);
                });
            }
            let entry = obtain(map.value_info());
            leak(move |arena, index, value| {
                if let ReflectRef::Map(map) = value.reflect_ref() {
                    let first = arena.reserve(index, NodeKind::Keyed, map.len());
                    let mut slot = first;
                    for (key, value) in map.iter() {
                        let Some(key) = map_key(key) else {
                            continue;
                        };
                        arena.set_key(slot, key);
                        entry(arena, slot, value);
                        slot += 1;
                    }
                }
            })
        }
        TypeInfo::Struct(record) => {
            let plan = fields::plan(record);
            let encoders: Box<[Encoder]> = plan
                .fields()
                .iter()
                .map(|field| obtain(field.info()))
                .collect();
            leak(move |arena, index, value| {
                if let ReflectRef::Struct(record) = value.reflect_ref() {
                    let first = arena.reserve(index, NodeKind::Keyed, plan.len());
                    for (offset, (field, encode)) in plan.fields().iter().zip(&encoders).enumerate() {
                        arena.set_key(first + offset, field.name());
                        if let Some(value) = field.follow(record) {
                            encode(arena, first + offset, value);
                        }
                    }
                }
            })
        }
    }
}

fn encode_scalar<'a>(arena: &mut Arena<'a>, index: usize, value: &'a dyn Reflect) {
    arena.set_scalar(index, value);
}

/// The held type is only known per value.
fn encode_dynamic<'a>(arena: &mut Arena<'a>, index: usize, value: &'a dyn Reflect) {
    if let ReflectRef::Dynamic(slot) = value.reflect_ref()
        && let Some(value) = slot.get()
    {
        obtain(value.reflect_type_info())(arena, index, value);
    }
}
