//! NUL-terminated string operations: strlen, strcmp, strncmp, strcpy,
//! strncpy, strcat.
//!
//! Strings are byte slices whose logical end is the first `0` byte. A slice
//! that carries no `0` byte is treated as terminated at its end.

/// Byte at index `i`, reading past the slice end as the terminator.
#[inline]
fn byte_at(s: &[u8], i: usize) -> u8 {
    s.get(i).copied().unwrap_or(0)
}

/// Returns the number of bytes before the first `0` in `s`.
///
/// Equivalent to C `strlen`. If `s` holds no terminator the full slice
/// length is returned instead of reading out of bounds.
pub fn strlen(s: &[u8]) -> usize {
    s.iter().position(|&c| c == 0).unwrap_or(s.len())
}

/// Compares two NUL-terminated strings as unsigned bytes.
///
/// Equivalent to C `strcmp`. Walks while both strings hold the same
/// non-zero byte, then returns `a[i] - b[i]` for the stopping index. The
/// terminator takes part in the comparison, so `0` is returned only when
/// both strings are equal through their terminators.
pub fn strcmp(a: &[u8], b: &[u8]) -> i32 {
    let mut i = 0;
    loop {
        let ca = byte_at(a, i);
        let cb = byte_at(b, i);
        if ca == 0 || ca != cb {
            return i32::from(ca) - i32::from(cb);
        }
        i += 1;
    }
}

/// Compares at most `n` bytes of two NUL-terminated strings.
///
/// Equivalent to C `strncmp`. Returns `0` when `n == 0` or when the first
/// `n` bytes agree.
pub fn strncmp(a: &[u8], b: &[u8], n: usize) -> i32 {
    for i in 0..n {
        let ca = byte_at(a, i);
        let cb = byte_at(b, i);
        if ca == 0 || ca != cb {
            return i32::from(ca) - i32::from(cb);
        }
    }
    0
}

/// Copies `src` up to and including its terminator into `dest`.
///
/// Equivalent to C `strcpy`.
///
/// # Panics
///
/// Panics if `dest.len() < strlen(src) + 1`.
pub fn strcpy<'a>(dest: &'a mut [u8], src: &[u8]) -> &'a mut [u8] {
    let len = strlen(src);
    dest[..len].copy_from_slice(&src[..len]);
    dest[len] = 0;
    dest
}

/// Copies at most `n` bytes of `src` into `dest`, zero-padding to `n`.
///
/// Equivalent to C `strncpy`. When `strlen(src) >= n` the result is not
/// terminated.
///
/// # Panics
///
/// Panics if `dest.len() < n`.
pub fn strncpy<'a>(dest: &'a mut [u8], src: &[u8], n: usize) -> &'a mut [u8] {
    let copy = strlen(src).min(n);
    dest[..copy].copy_from_slice(&src[..copy]);
    for slot in &mut dest[copy..n] {
        *slot = 0;
    }
    dest
}

/// Appends `src` (with its terminator) after the string already in `dest`.
///
/// Equivalent to C `strcat`.
///
/// # Panics
///
/// Panics if `dest` cannot hold `strlen(dest) + strlen(src) + 1` bytes.
pub fn strcat<'a>(dest: &'a mut [u8], src: &[u8]) -> &'a mut [u8] {
    let start = strlen(dest);
    let len = strlen(src);
    dest[start..start + len].copy_from_slice(&src[..len]);
    dest[start + len] = 0;
    dest
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strlen() {
        assert_eq!(strlen(b"\0"), 0);
        assert_eq!(strlen(b""), 0);
        assert_eq!(strlen(b"hello\0"), 5);
        assert_eq!(strlen(b"test string\0"), 11);
        assert_eq!(strlen(b"ab\0cd\0"), 2);
    }

    #[test]
    fn test_strlen_unterminated_stops_at_slice_end() {
        assert_eq!(strlen(b"abc"), 3);
    }

    #[test]
    fn test_strcmp_equal() {
        assert_eq!(strcmp(b"hello\0", b"hello\0"), 0);
        assert_eq!(strcmp(b"\0", b"\0"), 0);
    }

    #[test]
    fn test_strcmp_ordering() {
        assert_ne!(strcmp(b"hello\0", b"world\0"), 0);
        assert!(strcmp(b"abc\0", b"abd\0") < 0);
        assert!(strcmp(b"abd\0", b"abc\0") > 0);
    }

    #[test]
    fn test_strcmp_prefix_compares_terminator() {
        assert_eq!(strcmp(b"ab\0", b"abc\0"), -i32::from(b'c'));
        assert_eq!(strcmp(b"abc\0", b"ab\0"), i32::from(b'c'));
    }

    #[test]
    fn test_strcmp_unsigned_bytes() {
        assert_eq!(strcmp(&[0x80, 0], &[0x01, 0]), 0x7F);
    }

    #[test]
    fn test_strcmp_ignores_bytes_after_terminator() {
        assert_eq!(strcmp(b"ab\0x", b"ab\0y"), 0);
    }

    #[test]
    fn test_strncmp() {
        assert_eq!(strncmp(b"abcdef\0", b"abcxyz\0", 3), 0);
        assert!(strncmp(b"abcdef\0", b"abcxyz\0", 4) < 0);
        assert_eq!(strncmp(b"a\0", b"b\0", 0), 0);
        assert_eq!(strncmp(b"ab\0", b"ab\0", 10), 0);
    }

    #[test]
    fn test_strcpy_roundtrip() {
        let src = b"Hello, World!\0";
        let mut dst = [0xEEu8; 20];
        strcpy(&mut dst, src);
        assert_eq!(strcmp(&dst, src), 0);
        assert_eq!(dst[13], 0);
        assert_eq!(dst[14], 0xEE);
    }

    #[test]
    #[should_panic]
    fn test_strcpy_without_room_for_terminator_panics() {
        let mut dst = [0u8; 3];
        strcpy(&mut dst, b"abc\0");
    }

    #[test]
    fn test_strncpy_pads_with_zero() {
        let mut dst = [0xEEu8; 8];
        strncpy(&mut dst, b"hi\0", 6);
        assert_eq!(dst, [b'h', b'i', 0, 0, 0, 0, 0xEE, 0xEE]);
    }

    #[test]
    fn test_strncpy_truncates_without_terminator() {
        let mut dst = [0xEEu8; 4];
        strncpy(&mut dst, b"hello\0", 3);
        assert_eq!(dst, [b'h', b'e', b'l', 0xEE]);
    }

    #[test]
    fn test_strcat_appends() {
        let mut dst = [0u8; 16];
        strcpy(&mut dst, b"boot\0");
        strcat(&mut dst, b"loader\0");
        assert_eq!(strcmp(&dst, b"bootloader\0"), 0);
        assert_eq!(strlen(&dst), 10);
    }
}
