//! String and memory operations.
//!
//! Implements the RETROS BIOS `<memory.h>` byte and string primitives as safe
//! Rust operating on caller-owned slices.

pub mod mem;
pub mod str;

// Re-export commonly used functions.
pub use mem::{memcmp, memcpy, memmove, memset};
pub use str::{strcat, strcmp, strcpy, strlen, strncmp, strncpy};
