//! Memory allocation.
//!
//! The BIOS heap is a single first-fit free list over a fixed arena; see
//! [`heap::Heap`].

pub mod heap;

pub use heap::{DEFAULT_HEAP_SIZE, HEADER_SIZE, Heap, MemoryInfo};
