//! Nodes of the skiplist and the arena that owns them.
//!
//! Rather than having each node own its successor, every node lives in a
//! single [`Arena`] owned by the list, and the per-level links are plain
//! [`NodeId`] handles into that arena. Unlinking a node therefore never
//! drops anything by itself; the list releases the slot explicitly once the
//! node is unreachable at every level.

// ////////////////////////////////////////////////////////////////////////////
// Handles
// ////////////////////////////////////////////////////////////////////////////

/// Stable handle to a node stored in an [`Arena`].
///
/// Handles are only ever produced by the arena and never escape the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) struct NodeId(usize);

/// A point from which a level can be walked: either the header sentinel or
/// a data node.
///
/// The header compares below every key and participates in every level, so
/// it is never matched by a lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Position {
    Head,
    Node(NodeId),
}

// ////////////////////////////////////////////////////////////////////////////
// SkipNode
// ////////////////////////////////////////////////////////////////////////////

/// One key-value pair together with its forward links.
///
/// A node of level `$n$` has `$n + 1$` links; `links[i]` is the next node
/// whose level is at least `$i$`. The level is fixed when the node is
/// created.
#[derive(Debug, Clone)]
pub(crate) struct SkipNode<K, V> {
    pub key: K,
    pub value: V,
    pub links: Vec<Option<NodeId>>,
}

impl<K, V> SkipNode<K, V> {
    /// Create an unlinked node reaching up to `level`.
    pub fn new(key: K, value: V, level: usize) -> Self {
        SkipNode {
            key,
            value,
            links: vec![None; level + 1],
        }
    }

    /// How high the node reaches.
    pub fn level(&self) -> usize {
        self.links.len() - 1
    }

    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}

// ////////////////////////////////////////////////////////////////////////////
// Arena
// ////////////////////////////////////////////////////////////////////////////

/// Slot storage for nodes with a free stack of vacated slots.
///
/// Freed slots are reused before the backing vector grows, so a list with a
/// stable number of entries does not keep allocating.
#[derive(Debug, Clone)]
pub(crate) struct Arena<K, V> {
    slots: Vec<Option<SkipNode<K, V>>>,
    free: Vec<NodeId>,
}

impl<K, V> Arena<K, V> {
    pub const fn new() -> Self {
        Arena {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    /// Store `node`, returning its handle.
    pub fn alloc(&mut self, node: SkipNode<K, V>) -> NodeId {
        if let Some(id) = self.free.pop() {
            if let Some(slot) = self.slots.get_mut(id.0) {
                *slot = Some(node);
                return id;
            }
        }
        self.slots.push(Some(node));
        NodeId(self.slots.len() - 1)
    }

    /// Release the node behind `id`.
    ///
    /// The caller must have unlinked the node from every level beforehand.
    pub fn free(&mut self, id: NodeId) -> Option<SkipNode<K, V>> {
        let node = self.slots.get_mut(id.0)?.take()?;
        self.free.push(id);
        Some(node)
    }

    pub fn get(&self, id: NodeId) -> Option<&SkipNode<K, V>> {
        self.slots.get(id.0)?.as_ref()
    }

    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut SkipNode<K, V>> {
        self.slots.get_mut(id.0)?.as_mut()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }

    /// Number of slots, live or vacant.
    #[cfg(test)]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }
}
