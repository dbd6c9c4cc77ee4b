//! Working triangle storage for one triangulation call.
//!
//! The arena hands out stable [`TriangleKey`]s, reuses freed slots and removes
//! in O(1). Slot order says nothing about age, so every triangle carries a
//! creation stamp; [`TriangleArena::into_creation_order`] and
//! [`TriangleArena::sort_by_creation`] recover the order in which triangles were
//! made, which the triangulator needs for deterministic output.

#![forbid(unsafe_code)]

use crate::core::collections::StorageMap;
use crate::core::triangle::{DirectedEdge, Triangle};
use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a triangle stored in a [`TriangleArena`].
    ///
    /// A key stays valid until its triangle is removed; a removed key never
    /// aliases a later triangle.
    pub struct TriangleKey;
}

/// A triangle as stored while the triangulation is being built: vertex indices
/// in winding order (not canonicalized) plus a creation stamp.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ArenaTriangle {
    vertices: [usize; 3],
    stamp: u64,
}

impl ArenaTriangle {
    /// Vertex indices in the order they were given at insertion.
    #[inline]
    #[must_use]
    pub const fn vertices(&self) -> [usize; 3] {
        self.vertices
    }

    /// Monotonic creation stamp; lower means created earlier.
    #[inline]
    #[must_use]
    pub const fn stamp(&self) -> u64 {
        self.stamp
    }

    /// Edges `(a, b)`, `(b, c)`, `(c, a)` following the stored winding.
    #[inline]
    #[must_use]
    pub const fn edges(&self) -> [DirectedEdge; 3] {
        let [a, b, c] = self.vertices;
        [[a, b], [b, c], [c, a]]
    }

    /// Returns `true` if every vertex index is below `limit`.
    #[inline]
    #[must_use]
    pub fn all_below(&self, limit: usize) -> bool {
        self.vertices.iter().all(|&v| v < limit)
    }

    /// The canonical form of this triangle.
    #[inline]
    #[must_use]
    pub fn canonical(&self) -> Triangle {
        Triangle::from(self.vertices)
    }
}

/// Arena of live triangles addressed by stable keys.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::arena::TriangleArena;
///
/// let mut arena = TriangleArena::new();
/// let first = arena.insert([0, 1, 2]);
/// let second = arena.insert([1, 2, 3]);
/// arena.remove(first);
/// let third = arena.insert([2, 3, 4]); // may reuse the freed slot
///
/// assert_eq!(arena.len(), 2);
/// assert!(arena.get(first).is_none());
/// let order: Vec<[usize; 3]> = arena
///     .into_creation_order()
///     .iter()
///     .map(|t| t.vertices())
///     .collect();
/// assert_eq!(order, vec![[1, 2, 3], [2, 3, 4]]);
/// # let _ = (second, third);
/// ```
#[derive(Clone, Debug, Default)]
pub struct TriangleArena {
    storage: StorageMap<TriangleKey, ArenaTriangle>,
    next_stamp: u64,
    removed: u64,
}

impl TriangleArena {
    /// Creates an empty arena.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty arena with room for `capacity` live triangles.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            storage: StorageMap::with_capacity_and_key(capacity),
            next_stamp: 0,
            removed: 0,
        }
    }

    /// Stores a triangle and returns its key.
    pub fn insert(&mut self, vertices: [usize; 3]) -> TriangleKey {
        let stamp = self.next_stamp;
        self.next_stamp += 1;
        self.storage.insert(ArenaTriangle { vertices, stamp })
    }

    /// Removes a triangle, returning it if the key was live.
    pub fn remove(&mut self, key: TriangleKey) -> Option<ArenaTriangle> {
        let removed = self.storage.remove(key);
        if removed.is_some() {
            self.removed += 1;
        }
        removed
    }

    /// Looks up a live triangle.
    #[must_use]
    pub fn get(&self, key: TriangleKey) -> Option<&ArenaTriangle> {
        self.storage.get(key)
    }

    /// Number of live triangles.
    #[must_use]
    pub fn len(&self) -> usize {
        self.storage.len()
    }

    /// Returns `true` if no triangle is live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.storage.is_empty()
    }

    /// Number of triangles ever inserted.
    #[must_use]
    pub const fn total_created(&self) -> u64 {
        self.next_stamp
    }

    /// Number of triangles removed so far.
    #[must_use]
    pub const fn total_removed(&self) -> u64 {
        self.removed
    }

    /// Iterates live triangles in storage (slot) order.
    pub fn iter(&self) -> impl Iterator<Item = (TriangleKey, &ArenaTriangle)> {
        self.storage.iter()
    }

    /// Sorts `keys` by the creation stamp of their triangles. Keys that are no
    /// longer live sort last.
    pub fn sort_by_creation(&self, keys: &mut [TriangleKey]) {
        keys.sort_unstable_by_key(|&key| self.get(key).map_or(u64::MAX, ArenaTriangle::stamp));
    }

    /// Consumes the arena, returning live triangles oldest first.
    #[must_use]
    pub fn into_creation_order(self) -> Vec<ArenaTriangle> {
        let mut live: Vec<ArenaTriangle> = self.storage.into_iter().map(|(_, t)| t).collect();
        live.sort_unstable_by_key(ArenaTriangle::stamp);
        live
    }
}

// =============================================================================
// TESTS
// =============================================================================
