//! # retroslibc-core
//!
//! Safe Rust implementations of the freestanding memory primitives used by
//! the RETROS BIOS: byte/string operations and the first-fit boot heap.
//!
//! No `unsafe` code is permitted at the crate level. Buffers are always
//! caller-owned slices and nothing in [`string`] allocates.

#![deny(unsafe_code)]

pub mod malloc;
pub mod string;
