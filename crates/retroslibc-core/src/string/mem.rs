//! Memory operations: memset, memcpy, memmove, memcmp.
//!
//! Safe Rust renditions of the RETROS BIOS `<memory.h>` byte primitives.
//! Every function that returns a buffer hands back a reborrow of its
//! destination argument; nothing here allocates.

/// Fills the first `n` bytes of `dest` with the low 8 bits of `value`.
///
/// Equivalent to C `memset(dest, c, n)`. `n == 0` leaves `dest` untouched.
///
/// # Panics
///
/// Panics if `n > dest.len()`.
pub fn memset(dest: &mut [u8], value: i32, n: usize) -> &mut [u8] {
    let byte = value as u8;
    for slot in &mut dest[..n] {
        *slot = byte;
    }
    dest
}

/// Copies `n` bytes from `src` into `dest`, lowest index first.
///
/// Equivalent to C `memcpy`. The borrow checker guarantees the two regions
/// are disjoint; use [`memmove`] to shift bytes inside a single buffer.
///
/// # Panics
///
/// Panics if `n` exceeds either slice length.
pub fn memcpy<'a>(dest: &'a mut [u8], src: &[u8], n: usize) -> &'a mut [u8] {
    dest[..n].copy_from_slice(&src[..n]);
    dest
}

/// Copies `n` bytes inside `buf` from offset `src` to offset `dest`.
///
/// Equivalent to C `memmove` where both pointers address the same buffer.
/// Overlapping ranges are handled: the copy runs forward when `dest < src`
/// and backward otherwise, so every byte is read before it is overwritten.
///
/// # Panics
///
/// Panics if either `src + n` or `dest + n` exceeds `buf.len()`.
pub fn memmove(buf: &mut [u8], dest: usize, src: usize, n: usize) -> &mut [u8] {
    assert!(
        src + n <= buf.len() && dest + n <= buf.len(),
        "memmove: range out of bounds (len={}, src={src}, dest={dest}, n={n})",
        buf.len()
    );
    if dest < src {
        for i in 0..n {
            buf[dest + i] = buf[src + i];
        }
    } else {
        for i in (0..n).rev() {
            buf[dest + i] = buf[src + i];
        }
    }
    buf
}

/// Compares the first `n` bytes of `a` and `b` as unsigned values.
///
/// Equivalent to C `memcmp`. Returns the raw difference `a[i] - b[i]` of the
/// first mismatching pair, or `0` when all `n` bytes match. The magnitude is
/// preserved, not clamped to `-1/0/1`.
///
/// # Panics
///
/// Panics if `n` exceeds either slice length.
pub fn memcmp(a: &[u8], b: &[u8], n: usize) -> i32 {
    a[..n]
        .iter()
        .zip(&b[..n])
        .find(|(x, y)| x != y)
        .map_or(0, |(&x, &y)| i32::from(x) - i32::from(y))
}
