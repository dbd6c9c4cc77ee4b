//! Collection aliases used throughout the triangulation code.
//!
//! Centralizing these keeps the hashing strategy, the small-buffer sizes and
//! the arena storage backend in one place.

use rustc_hash::{FxBuildHasher, FxHashMap, FxHashSet};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::core::arena::TriangleKey;
use crate::core::triangle::DirectedEdge;

// =============================================================================
// HASHING
// =============================================================================

/// Optimized `HashMap` type for performance-critical operations.
/// Uses `rustc_hash::FxHasher` for faster hashing in non-cryptographic contexts.
///
/// ⚠️ **Not DoS-resistant**: keys here are vertex indices and coordinate bit
/// patterns produced by this crate, never attacker-chosen hash inputs.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::collections::FastHashMap;
///
/// let mut map: FastHashMap<u64, usize> = FastHashMap::default();
/// map.insert(123, 456);
/// ```
pub type FastHashMap<K, V> = FxHashMap<K, V>;

/// Optimized `HashSet` type, see [`FastHashMap`].
pub type FastHashSet<T> = FxHashSet<T>;

/// Build hasher used by [`FastHashMap`] and [`FastHashSet`].
pub type FastBuildHasher = FxBuildHasher;

/// Creates a [`FastHashMap`] with pre-allocated capacity.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::collections::fast_hash_map_with_capacity;
///
/// let map = fast_hash_map_with_capacity::<u64, usize>(1000);
/// assert!(map.capacity() >= 1000);
/// ```
#[inline]
#[must_use]
pub fn fast_hash_map_with_capacity<K, V>(capacity: usize) -> FastHashMap<K, V> {
    FastHashMap::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

/// Creates a [`FastHashSet`] with pre-allocated capacity.
#[inline]
#[must_use]
pub fn fast_hash_set_with_capacity<T>(capacity: usize) -> FastHashSet<T> {
    FastHashSet::with_capacity_and_hasher(capacity, FastBuildHasher::default())
}

// =============================================================================
// SMALL BUFFERS
// =============================================================================

/// Small-optimized Vec that stays on the stack for up to `N` elements.
///
/// # Examples
///
/// ```rust
/// use delaunay_mesh::core::collections::SmallBuffer;
///
/// let mut buffer: SmallBuffer<i32, 8> = SmallBuffer::new();
/// buffer.push(42);
/// assert_eq!(buffer.len(), 1);
/// assert!(!buffer.spilled());
/// ```
pub type SmallBuffer<T, const N: usize> = SmallVec<[T; N]>;

/// Inline capacity for per-insertion buffers. A Delaunay cavity in the plane
/// typically holds 2-8 triangles and its boundary 4-10 edges.
pub const CAVITY_BUFFER_SIZE: usize = 16;

/// Triangles whose circumcircle contains the point being inserted.
pub type BadTriangleBuffer = SmallBuffer<TriangleKey, CAVITY_BUFFER_SIZE>;

/// Boundary edges of the cavity, in fan order.
pub type CavityBoundaryBuffer = SmallBuffer<DirectedEdge, CAVITY_BUFFER_SIZE>;

// =============================================================================
// STORAGE BACKEND
// =============================================================================

/// Storage backend of the triangle arena.
///
/// Keys stay valid across unrelated insertions and removals, and freed slots are
/// reused, so removing a triangle is O(1).
pub type StorageMap<K, V> = SlotMap<K, V>;

// =============================================================================
// TESTS
// =============================================================================
