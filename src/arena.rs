//! Bump-pointer arena with temp-region checkpoints
//!
//! World data is rebuilt from scratch on every load/reset, so it lives in an
//! arena that is rewound in O(1) instead of being freed piecemeal.
//! Allocations are addressed by [`Region`] handles resolved through the
//! arena, not by raw pointers; restoring a checkpoint logically invalidates
//! every region handed out after it (the bytes are not scrubbed, and stale
//! handles must not be read).

use crate::error::CoreError;

/// A contiguous byte region handed out by [`Arena::alloc`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Region {
    offset: usize,
    len: usize,
}

impl Region {
    #[inline]
    pub fn offset(&self) -> usize {
        self.offset
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Checkpoint for a temporary allocation region
///
/// Restores must follow LIFO order: restoring an earlier mark invalidates
/// all later marks along with their allocations.
#[derive(Debug, Clone, Copy)]
pub struct TempMark {
    offset: usize,
}

/// Fixed-capacity bump allocator
///
/// Invariant: `offset <= capacity` at all times. There is no per-object
/// deallocation; memory is reclaimed only via [`Arena::restore`] or
/// [`Arena::reset`].
#[derive(Debug)]
pub struct Arena {
    memory: Vec<u8>,
    offset: usize,
}

impl Arena {
    /// Create an arena with a fixed capacity in bytes
    pub fn new(capacity: usize) -> Self {
        Self {
            memory: vec![0_u8; capacity],
            offset: 0,
        }
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.memory.len()
    }

    #[inline]
    pub fn used(&self) -> usize {
        self.offset
    }

    /// Allocate `len` bytes at an `align`-byte boundary
    ///
    /// `align` must be a nonzero power of two. The returned region's bytes
    /// are whatever the arena last held there; use [`Arena::alloc_zeroed`]
    /// when a cleared region is required.
    pub fn alloc(&mut self, len: usize, align: usize) -> Result<Region, CoreError> {
        debug_assert!(align.is_power_of_two());

        let start = (self.offset + (align - 1)) & !(align - 1);
        let end = start.checked_add(len).ok_or(CoreError::ArenaExhausted {
            requested: len,
            available: self.capacity() - self.offset,
        })?;
        if end > self.memory.len() {
            return Err(CoreError::ArenaExhausted {
                requested: len,
                available: self.capacity() - self.offset,
            });
        }

        self.offset = end;
        Ok(Region { offset: start, len })
    }

    /// Allocate and clear a region
    pub fn alloc_zeroed(&mut self, len: usize, align: usize) -> Result<Region, CoreError> {
        let region = self.alloc(len, align)?;
        self.memory[region.offset..region.offset + region.len].fill(0);
        Ok(region)
    }

    /// Resolve a region to its bytes
    #[inline]
    pub fn bytes(&self, region: Region) -> &[u8] {
        &self.memory[region.offset..region.offset + region.len]
    }

    /// Resolve a region to its bytes, mutably
    #[inline]
    pub fn bytes_mut(&mut self, region: Region) -> &mut [u8] {
        &mut self.memory[region.offset..region.offset + region.len]
    }

    /// Capture the current offset as a temp-region checkpoint
    pub fn mark(&self) -> TempMark {
        TempMark {
            offset: self.offset,
        }
    }

    /// Rewind to a checkpoint, freeing everything allocated since
    pub fn restore(&mut self, mark: TempMark) {
        debug_assert!(mark.offset <= self.offset);
        self.offset = mark.offset;
    }

    /// Rewind the whole arena (world rebuild)
    pub fn reset(&mut self) {
        self.offset = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_alloc_is_aligned_and_monotonic() {
        let mut arena = Arena::new(256);
        let a = arena.alloc(3, 1).unwrap();
        let b = arena.alloc(8, 8).unwrap();
        let c = arena.alloc(1, 4).unwrap();

        assert_eq!(a.offset(), 0);
        assert_eq!(b.offset() % 8, 0);
        assert!(b.offset() >= a.offset() + a.len());
        assert_eq!(c.offset() % 4, 0);
        assert!(c.offset() >= b.offset() + b.len());
    }

    #[test]
    fn test_alloc_beyond_capacity_fails_cleanly() {
        let mut arena = Arena::new(16);
        let first = arena.alloc(12, 1).unwrap();
        let used = arena.used();

        let err = arena.alloc(8, 1).unwrap_err();
        assert!(matches!(err, CoreError::ArenaExhausted { .. }));

        // Failed allocation must not disturb prior state
        assert_eq!(arena.used(), used);
        assert_eq!(arena.bytes(first).len(), 12);
    }

    #[test]
    fn test_temp_region_restores_exact_offset() {
        let mut arena = Arena::new(128);
        arena.alloc(10, 1).unwrap();
        let before = arena.used();

        let mark = arena.mark();
        arena.alloc(32, 8).unwrap();
        arena.alloc(5, 1).unwrap();
        assert!(arena.used() > before);

        arena.restore(mark);
        assert_eq!(arena.used(), before);
    }

    #[test]
    fn test_nested_temp_regions_lifo() {
        let mut arena = Arena::new(128);
        let outer = arena.mark();
        arena.alloc(16, 1).unwrap();
        let inner = arena.mark();
        arena.alloc(16, 1).unwrap();

        arena.restore(inner);
        assert_eq!(arena.used(), 16);
        arena.restore(outer);
        assert_eq!(arena.used(), 0);
    }

    #[test]
    fn test_alloc_zeroed_clears_stale_bytes() {
        let mut arena = Arena::new(64);
        let r = arena.alloc(16, 1).unwrap();
        arena.bytes_mut(r).fill(0xAB);

        arena.reset();
        let r2 = arena.alloc_zeroed(16, 1).unwrap();
        assert!(arena.bytes(r2).iter().all(|&b| b == 0));
    }

    proptest! {
        /// Any allocation sequence that fits yields disjoint regions with
        /// strictly increasing offsets.
        #[test]
        fn prop_regions_disjoint(sizes in prop::collection::vec(1usize..64, 1..16)) {
            let mut arena = Arena::new(2048);
            let mut regions: Vec<Region> = Vec::new();
            for len in sizes {
                regions.push(arena.alloc(len, 8).unwrap());
            }
            for pair in regions.windows(2) {
                prop_assert!(pair[0].offset() + pair[0].len() <= pair[1].offset());
            }
        }

        /// mark/restore is exact regardless of what happened in between.
        #[test]
        fn prop_restore_exact(
            prefix in 0usize..64,
            sizes in prop::collection::vec(1usize..32, 0..8),
        ) {
            let mut arena = Arena::new(1024);
            arena.alloc(prefix.max(1), 1).unwrap();
            let before = arena.used();
            let mark = arena.mark();
            for len in sizes {
                arena.alloc(len, 4).unwrap();
            }
            arena.restore(mark);
            prop_assert_eq!(arena.used(), before);
        }
    }
}
