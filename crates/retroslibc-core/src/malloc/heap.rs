//! First-fit boot heap.
//!
//! A single arena carved into an address-ordered list of blocks. Each block
//! carries a 12-byte header (size, next link, free flag) ahead of its payload,
//! exactly as laid out on the 32-bit BIOS target; the header bytes are
//! accounted for but the metadata itself lives in `blocks`.
//!
//! Pointers are arena offsets of the payload. Offset `0` is never handed out
//! because every payload sits behind a header, so `None` plays the role of
//! the C null pointer.

/// Size in bytes of a block header on the BIOS target.
pub const HEADER_SIZE: usize = 12;

/// Payload alignment.
pub const ALIGN: usize = 8;

/// Arena size used by [`Heap::default`] (32 MiB).
pub const DEFAULT_HEAP_SIZE: usize = 32 * 1024 * 1024;

/// Heap usage statistics, mirroring `memory_info_t`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryInfo {
    /// Arena size in bytes.
    pub total: usize,
    /// Bytes accounted as in use (headers included).
    pub used: usize,
    /// Bytes accounted as available.
    pub free: usize,
    /// First arena offset.
    pub heap_start: usize,
    /// One past the last arena offset.
    pub heap_end: usize,
}

#[derive(Debug, Clone, Copy)]
struct Block {
    /// Arena offset of the header.
    offset: usize,
    /// Block size including the header.
    size: usize,
    is_free: bool,
}

impl Block {
    fn payload_offset(&self) -> usize {
        self.offset + HEADER_SIZE
    }

    fn payload_len(&self) -> usize {
        self.size - HEADER_SIZE
    }
}

/// First-fit allocator over an owned arena.
#[derive(Debug)]
pub struct Heap {
    arena: Vec<u8>,
    /// Address-ordered block list; `blocks[i + 1]` is the `next` of `blocks[i]`.
    blocks: Vec<Block>,
    info: MemoryInfo,
}

impl Heap {
    /// Creates a heap whose arena spans `capacity` bytes as one free block.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` cannot hold a header plus one aligned payload.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(
            capacity >= HEADER_SIZE + ALIGN,
            "heap capacity {capacity} too small for a single block"
        );
        Self {
            arena: vec![0; capacity],
            blocks: vec![Block {
                offset: 0,
                size: capacity,
                is_free: true,
            }],
            info: MemoryInfo {
                total: capacity,
                used: HEADER_SIZE,
                free: capacity - HEADER_SIZE,
                heap_start: 0,
                heap_end: capacity,
            },
        }
    }

    /// Allocates `size` bytes, returning the payload offset.
    ///
    /// Returns `None` for `size == 0` or when no free block fits.
    pub fn malloc(&mut self, size: usize) -> Option<usize> {
        if size == 0 {
            return None;
        }
        let aligned = size.checked_add(ALIGN - 1)? & !(ALIGN - 1);
        let total = aligned.checked_add(HEADER_SIZE)?;

        let idx = self
            .blocks
            .iter()
            .position(|b| b.is_free && b.size >= total)?;

        if self.blocks[idx].size >= total + HEADER_SIZE + ALIGN {
            let current = self.blocks[idx];
            self.blocks.insert(
                idx + 1,
                Block {
                    offset: current.offset + total,
                    size: current.size - total,
                    is_free: true,
                },
            );
            self.blocks[idx].size = total;
        }

        let block = &mut self.blocks[idx];
        block.is_free = false;
        self.info.used = self.info.used.saturating_add(block.size);
        self.info.free = self.info.free.saturating_sub(block.size);
        Some(block.payload_offset())
    }

    /// Releases the allocation at `ptr` and coalesces neighbouring free blocks.
    ///
    /// `None`, unknown offsets and already-free blocks are ignored.
    pub fn free(&mut self, ptr: Option<usize>) {
        let Some(idx) = ptr.and_then(|p| self.allocated_index(p)) else {
            return;
        };
        let block = &mut self.blocks[idx];
        block.is_free = true;
        self.info.used = self.info.used.saturating_sub(block.size);
        self.info.free = self.info.free.saturating_add(block.size);

        let mut i = 0;
        while i + 1 < self.blocks.len() {
            if self.blocks[i].is_free && self.blocks[i + 1].is_free {
                self.blocks[i].size += self.blocks[i + 1].size;
                self.blocks.remove(i + 1);
            } else {
                i += 1;
            }
        }
    }

    /// Allocates a zero-filled array of `nmemb` elements of `size` bytes.
    ///
    /// Returns `None` when the byte count overflows or the heap is exhausted.
    pub fn calloc(&mut self, nmemb: usize, size: usize) -> Option<usize> {
        let total = nmemb.checked_mul(size)?;
        let ptr = self.malloc(total)?;
        self.arena[ptr..ptr + total].fill(0);
        Some(ptr)
    }

    /// Resizes the allocation at `ptr` to `size` bytes.
    ///
    /// A `None` pointer behaves like [`Heap::malloc`]; `size == 0` frees the
    /// block and returns `None`. Requests that fit the current payload keep
    /// the pointer. Otherwise the payload moves to a new block and the old
    /// block is released; on exhaustion the old block is left intact.
    pub fn realloc(&mut self, ptr: Option<usize>, size: usize) -> Option<usize> {
        let Some(old) = ptr else {
            return self.malloc(size);
        };
        if size == 0 {
            self.free(Some(old));
            return None;
        }
        let idx = self.allocated_index(old)?;
        let old_len = self.blocks[idx].payload_len();
        if old_len >= size {
            return Some(old);
        }

        let new = self.malloc(size)?;
        self.arena.copy_within(old..old + old_len, new);
        self.free(Some(old));
        Some(new)
    }

    /// Returns the payload of a live allocation.
    #[must_use]
    pub fn payload(&self, ptr: usize) -> Option<&[u8]> {
        let block = self.blocks[self.allocated_index(ptr)?];
        Some(&self.arena[block.payload_offset()..block.offset + block.size])
    }

    /// Returns the mutable payload of a live allocation.
    pub fn payload_mut(&mut self, ptr: usize) -> Option<&mut [u8]> {
        let block = self.blocks[self.allocated_index(ptr)?];
        Some(&mut self.arena[block.payload_offset()..block.offset + block.size])
    }

    /// Usable payload length of a live allocation.
    #[must_use]
    pub fn usable_size(&self, ptr: usize) -> Option<usize> {
        self.allocated_index(ptr)
            .map(|idx| self.blocks[idx].payload_len())
    }

    /// Current heap statistics.
    #[must_use]
    pub fn info(&self) -> MemoryInfo {
        self.info
    }

    /// Number of blocks (free and allocated) in the list.
    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }

    fn allocated_index(&self, ptr: usize) -> Option<usize> {
        self.blocks
            .iter()
            .position(|b| !b.is_free && b.payload_offset() == ptr)
    }
}

impl Default for Heap {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_HEAP_SIZE)
    }
}
