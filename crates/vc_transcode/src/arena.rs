use core::mem;
use core::ops::{Deref, DerefMut, Range};
use std::sync::{Mutex, PoisonError};

use vc_reflect::Reflect;

use crate::{ARENA_CAPACITY, MAX_POOLED_ARENAS, MAX_RETAINED_NODES};

// -----------------------------------------------------------------------------
// Node

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum NodeKind {
    Null,
    Scalar,
    List,
    Keyed,
}

/// One entry of the flattened value tree.
///
/// `key` is set on the children of a `Keyed` node. `first..first + len` is the
/// child range of a `List` or `Keyed` node.
#[derive(Clone, Copy)]
pub(crate) struct Node<'a> {
    pub kind: NodeKind,
    pub key: &'a str,
    pub scalar: Option<&'a dyn Reflect>,
    pub first: usize,
    pub len: usize,
}

impl Node<'_> {
    const NULL: Self = Node {
        kind: NodeKind::Null,
        key: "",
        scalar: None,
        first: 0,
        len: 0,
    };
}

// -----------------------------------------------------------------------------
// Arena

/// A flattened value tree. Node `0` is the root.
///
/// A composite node reserves the block of its direct children before any of
/// them is filled, so child ranges never overlap even though deeper
/// descendants are appended in arrival order.
pub(crate) struct Arena<'a> {
    nodes: Vec<Node<'a>>,
}

impl<'a> Arena<'a> {
    pub(crate) const ROOT: usize = 0;

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        let mut nodes = Vec::with_capacity(capacity.max(1));
        nodes.push(Node::NULL);
        Self { nodes }
    }

    #[inline]
    pub(crate) fn node(&self, index: usize) -> &Node<'a> {
        &self.nodes[index]
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Indices of the children of `index`.
    #[inline]
    pub(crate) fn children(&self, index: usize) -> Range<usize> {
        let node = &self.nodes[index];
        node.first..node.first + node.len
    }

    /// Turns `index` into a composite node with `count` null children and
    /// returns the index of the first child.
    pub(crate) fn reserve(&mut self, index: usize, kind: NodeKind, count: usize) -> usize {
        let first = self.nodes.len();
        let node = &mut self.nodes[index];
        node.kind = kind;
        node.first = first;
        node.len = count;
        self.nodes.resize(first + count, Node::NULL);
        first
    }

    #[inline]
    pub(crate) fn set_scalar(&mut self, index: usize, value: &'a dyn Reflect) {
        let node = &mut self.nodes[index];
        node.kind = NodeKind::Scalar;
        node.scalar = Some(value);
    }

    #[inline]
    pub(crate) fn set_key(&mut self, index: usize, key: &'a str) {
        self.nodes[index].key = key;
    }

    /// Drops every node, and with them every borrowed value, keeping the
    /// allocation. The result is a single null root.
    fn recycle(self) -> Arena<'static> {
        let mut nodes = self.nodes;
        nodes.clear();
        // Empty, so nothing is converted; the buffer is reused in place.
        let mut nodes: Vec<Node<'static>> = nodes.into_iter().filter_map(|_| None).collect();
        nodes.push(Node::NULL);
        Arena { nodes }
    }
}

impl Default for Arena<'_> {
    fn default() -> Self {
        Self { nodes: Vec::new() }
    }
}

// -----------------------------------------------------------------------------
// Pool

static POOL: Mutex<Vec<Arena<'static>>> = Mutex::new(Vec::new());

/// An arena checked out of the process-wide pool.
///
/// Going out of scope resets the arena and returns it, on every exit path.
pub(crate) struct PooledArena<'a> {
    arena: Arena<'a>,
}

impl PooledArena<'_> {
    pub(crate) fn checkout() -> Self {
        let pooled = POOL.lock().unwrap_or_else(PoisonError::into_inner).pop();
        Self {
            arena: pooled.unwrap_or_else(|| Arena::with_capacity(ARENA_CAPACITY)),
        }
    }
}

impl<'a> Deref for PooledArena<'a> {
    type Target = Arena<'a>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.arena
    }
}

impl DerefMut for PooledArena<'_> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.arena
    }
}

impl Drop for PooledArena<'_> {
    fn drop(&mut self) {
        let arena = mem::take(&mut self.arena);
        if arena.nodes.capacity() > MAX_RETAINED_NODES {
            return;
        }
        let arena = arena.recycle();
        let mut pool = POOL.lock().unwrap_or_else(PoisonError::into_inner);
        if pool.len() < MAX_POOLED_ARENAS {
            pool.push(arena);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Arena, NodeKind, PooledArena};

    #[test]
    fn reserve_keeps_ranges_disjoint() {
        let values = [1_u8, 2, 3];
        let mut arena = Arena::with_capacity(4);

        let first = arena.reserve(Arena::ROOT, NodeKind::List, 2);
        assert_eq!(first, 1);
        let nested = arena.reserve(first, NodeKind::List, 2);
        arena.set_scalar(nested, &values[0]);
        arena.set_scalar(nested + 1, &values[1]);
        arena.set_scalar(first + 1, &values[2]);

        assert_eq!(arena.children(Arena::ROOT), 1..3);
        assert_eq!(arena.children(first), 3..5);
        assert_eq!(arena.node(2).kind, NodeKind::Scalar);
        assert_eq!(arena.len(), 5);
    }

    #[test]
    fn recycle_drops_values() {
        let text = String::from("borrowed");
        let mut arena = Arena::with_capacity(8);
        let first = arena.reserve(Arena::ROOT, NodeKind::Keyed, 1);
        arena.set_key(first, &text);
        arena.set_scalar(first, &text);

        let arena = arena.recycle();
        assert_eq!(arena.len(), 1);
        assert!(arena.nodes.capacity() >= 8);
        let root = arena.node(Arena::ROOT);
        assert_eq!(root.kind, NodeKind::Null);
        assert!(root.scalar.is_none());
        assert_eq!(root.len, 0);
    }

    #[test]
    fn checkout_starts_from_a_null_root() {
        let value = 9_i32;
        {
            let mut arena = PooledArena::checkout();
            arena.reserve(Arena::ROOT, NodeKind::List, 1);
            arena.set_scalar(1, &value);
        }
        let arena = PooledArena::checkout();
        assert_eq!(arena.len(), 1);
        assert_eq!(arena.node(Arena::ROOT).kind, NodeKind::Null);
    }
}
