//! Append-only arena for immutable variable-length id sequences.
//!
//! Precondition lists and precondition-of lists are stored as contiguous
//! runs inside one shared backing vector and addressed by an opaque
//! `(offset, length)` handle. The arena supports no removal or mutation;
//! a caller that needs an updated sequence appends a new one.
//!
//! Guarantees:
//! - A handle is never invalidated by later appends
//! - `get` returns the appended elements in their original order
//! - Handles are plain `Copy` data and stay valid for the arena's lifetime

/// Opaque handle to one sequence stored in an [`IndexArena`].
///
/// Only meaningful together with the arena it came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ArenaHandle {
    offset: u32,
    length: u32,
}

impl ArenaHandle {
    /// Handle to the canonical empty sequence. Valid in any arena.
    pub fn empty() -> Self {
        Self {
            offset: 0,
            length: 0,
        }
    }

    /// Number of elements in the referenced sequence.
    pub fn len(self) -> usize {
        self.length as usize
    }

    /// True if the referenced sequence has no elements.
    pub fn is_empty(self) -> bool {
        self.length == 0
    }
}

/// Append-only storage for sequences of `Copy` ids.
#[derive(Debug, Clone, Default)]
pub struct IndexArena<T: Copy> {
    data: Vec<T>,
}

impl<T: Copy> IndexArena<T> {
    /// Create an empty arena.
    pub fn new() -> Self {
        Self { data: Vec::new() }
    }

    /// Copy `seq` into the arena and return its handle. O(len).
    ///
    /// Panics if the arena would exceed `u32::MAX` total elements; handles
    /// are 32-bit and construction inputs of that size are out of scope.
    pub fn append(&mut self, seq: &[T]) -> ArenaHandle {
        let offset = self.offset_for(seq.len());
        self.data.extend_from_slice(seq);
        ArenaHandle {
            offset,
            length: seq.len() as u32,
        }
    }

    /// Append the items of an exact-size iterator without an intermediate
    /// allocation.
    pub fn append_from_iter<I>(&mut self, iter: I) -> ArenaHandle
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let iter = iter.into_iter();
        let offset = self.offset_for(iter.len());
        let length = iter.len() as u32;
        self.data.extend(iter);
        ArenaHandle { offset, length }
    }

    /// Resolve a handle to a slice view of its sequence. O(1).
    pub fn get(&self, handle: ArenaHandle) -> &[T] {
        let start = handle.offset as usize;
        &self.data[start..start + handle.length as usize]
    }

    /// Total number of elements stored across all sequences.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True if nothing has been appended yet.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    fn offset_for(&self, additional: usize) -> u32 {
        let offset = self.data.len();
        assert!(
            offset + additional <= u32::MAX as usize,
            "IndexArena capacity exceeded: {} + {} elements",
            offset,
            additional
        );
        offset as u32
    }
}
