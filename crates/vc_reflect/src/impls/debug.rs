use core::fmt;

use crate::ops::{Array, List, Map, Pointer, Struct};

/// Debug-formats a struct with its declared field names.
pub fn struct_debug(dyn_struct: &dyn Struct, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let info = dyn_struct.reflect_type_info().as_struct().ok();
    let mut debug = f.debug_struct(dyn_struct.reflect_type_name());
    for index in 0..dyn_struct.field_len() {
        let name = info
            .and_then(|info| info.field_at(index))
            .map_or("_", |field| field.name());
        if let Some(field) = dyn_struct.field_at(index) {
            debug.field(name, &field as &dyn fmt::Debug);
        }
    }
    debug.finish()
}

/// Debug-formats a list as `[a, b, ...]`.
pub fn list_debug(dyn_list: &dyn List, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_list();
    for item in (0..dyn_list.len()).filter_map(|index| dyn_list.get(index)) {
        debug.entry(&item as &dyn fmt::Debug);
    }
    debug.finish()
}

/// Debug-formats an array as `[a, b, ...]`.
pub fn array_debug(dyn_array: &dyn Array, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_list();
    for item in (0..dyn_array.len()).filter_map(|index| dyn_array.get(index)) {
        debug.entry(&item as &dyn fmt::Debug);
    }
    debug.finish()
}

/// Debug-formats a map as `{k: v, ...}`.
pub fn map_debug(dyn_map: &dyn Map, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let mut debug = f.debug_map();
    for (key, value) in dyn_map.iter() {
        debug.entry(&key as &dyn fmt::Debug, &value as &dyn fmt::Debug);
    }
    debug.finish()
}

/// Debug-formats a pointer as `Some(target)` or `None`.
pub fn pointer_debug(dyn_pointer: &dyn Pointer, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match dyn_pointer.target() {
        Some(target) => f.debug_tuple("Some").field(&target as &dyn fmt::Debug).finish(),
        None => f.write_str("None"),
    }
}
