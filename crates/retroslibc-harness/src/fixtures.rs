//! Conformance case registry.
//!
//! Each case carries the literal C assertions spliced into the generated
//! program and a native check asserting the same facts against
//! `retroslibc-core`. The suite order is fixed.

use retroslibc_core::string::{
    memcmp, memcpy, memmove, memset, strcat, strcmp, strcpy, strlen, strncmp, strncpy,
};

/// Native check: `Err` carries the failed assertion text.
pub type NativeCheck = fn() -> Result<(), String>;

/// A single named conformance case. Every case is expected to pass.
#[derive(Debug, Clone, Copy)]
pub struct ConformanceCase {
    /// Display name, e.g. `memcmp (equal)`.
    pub name: &'static str,
    /// Primitives exercised by the case.
    pub symbols: &'static [&'static str],
    /// C statements placed inside the generated `main`.
    pub c_body: &'static str,
    /// In-process rendition of `c_body`.
    pub native: NativeCheck,
}

/// Ordered collection of cases.
#[derive(Debug, Clone)]
pub struct Suite {
    /// Suite name used in reports and trace ids.
    pub name: String,
    /// Cases in execution order.
    pub cases: Vec<ConformanceCase>,
}

impl Suite {
    /// Keep only cases whose name contains `needle`.
    #[must_use]
    pub fn filtered(mut self, needle: Option<&str>) -> Self {
        if let Some(needle) = needle {
            self.cases.retain(|case| case.name.contains(needle));
        }
        self
    }

    /// Number of registered cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cases.len()
    }

    /// True when no case is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }
}

/// Mirrors C `assert`: bail out of a native check with the expression text.
macro_rules! check {
    ($cond:expr) => {
        if !($cond) {
            return Err(format!("assertion failed: {}", stringify!($cond)));
        }
    };
}

/// The memory-function suite run by the `harness` binary.
#[must_use]
pub fn default_suite() -> Suite {
    Suite {
        name: String::from("memory"),
        cases: vec![
            ConformanceCase {
                name: "memset",
                symbols: &["memset"],
                c_body: r"
    uint8_t buffer[10];
    memset(buffer, 0xAA, 10);
    for (int i = 0; i < 10; i++) {
        assert(buffer[i] == 0xAA);
    }
",
                native: native_memset,
            },
            ConformanceCase {
                name: "memcpy",
                symbols: &["memcpy"],
                c_body: r"
    uint8_t src[10] = {1, 2, 3, 4, 5, 6, 7, 8, 9, 10};
    uint8_t dst[10];
    memcpy(dst, src, 10);
    for (int i = 0; i < 10; i++) {
        assert(dst[i] == src[i]);
    }
",
                native: native_memcpy,
            },
            ConformanceCase {
                name: "memcmp (equal)",
                symbols: &["memcmp"],
                c_body: r"
    uint8_t buf1[5] = {1, 2, 3, 4, 5};
    uint8_t buf2[5] = {1, 2, 3, 4, 5};
    assert(memcmp(buf1, buf2, 5) == 0);
",
                native: native_memcmp_equal,
            },
            ConformanceCase {
                name: "memcmp (different)",
                symbols: &["memcmp"],
                c_body: r"
    uint8_t buf1[5] = {1, 2, 3, 4, 5};
    uint8_t buf2[5] = {1, 2, 4, 4, 5};
    assert(memcmp(buf1, buf2, 5) != 0);
",
                native: native_memcmp_different,
            },
            ConformanceCase {
                name: "strlen",
                symbols: &["strlen"],
                c_body: r#"
    assert(strlen("") == 0);
    assert(strlen("hello") == 5);
    assert(strlen("test string") == 11);
"#,
                native: native_strlen,
            },
            ConformanceCase {
                name: "strcmp (equal)",
                symbols: &["strcmp"],
                c_body: r#"
    assert(strcmp("hello", "hello") == 0);
    assert(strcmp("", "") == 0);
"#,
                native: native_strcmp_equal,
            },
            ConformanceCase {
                name: "strcmp (different)",
                symbols: &["strcmp"],
                c_body: r#"
    assert(strcmp("hello", "world") != 0);
    assert(strcmp("abc", "abd") < 0);
    assert(strcmp("abd", "abc") > 0);
"#,
                native: native_strcmp_different,
            },
            ConformanceCase {
                name: "strcpy",
                symbols: &["strcpy", "strcmp"],
                c_body: r#"
    char src[] = "Hello, World!";
    char dst[20];
    strcpy(dst, src);
    assert(strcmp(dst, src) == 0);
"#,
                native: native_strcpy,
            },
            ConformanceCase {
                name: "memmove (overlap)",
                symbols: &["memmove", "memcmp"],
                c_body: r#"
    uint8_t fwd[8] = {'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'};
    memmove(fwd, fwd + 2, 6);
    assert(memcmp(fwd, "cdefghgh", 8) == 0);
    uint8_t back[8] = {'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h'};
    memmove(back + 2, back, 6);
    assert(memcmp(back, "ababcdef", 8) == 0);
"#,
                native: native_memmove_overlap,
            },
            ConformanceCase {
                name: "strncpy (padding)",
                symbols: &["strncpy"],
                c_body: r#"
    char dst[8];
    memset(dst, 0x7F, 8);
    strncpy(dst, "hi", 6);
    assert(dst[0] == 'h' && dst[1] == 'i');
    for (int i = 2; i < 6; i++) {
        assert(dst[i] == 0);
    }
    assert(dst[6] == 0x7F && dst[7] == 0x7F);
"#,
                native: native_strncpy_padding,
            },
            ConformanceCase {
                name: "strncmp",
                symbols: &["strncmp"],
                c_body: r#"
    assert(strncmp("abcdef", "abcxyz", 3) == 0);
    assert(strncmp("abcdef", "abcxyz", 4) < 0);
    assert(strncmp("a", "b", 0) == 0);
"#,
                native: native_strncmp,
            },
            ConformanceCase {
                name: "strcat",
                symbols: &["strcat", "strcpy", "strcmp", "strlen"],
                c_body: r#"
    char dst[16];
    strcpy(dst, "boot");
    strcat(dst, "loader");
    assert(strcmp(dst, "bootloader") == 0);
    assert(strlen(dst) == 10);
"#,
                native: native_strcat,
            },
        ],
    }
}

fn native_memset() -> Result<(), String> {
    let mut buffer = [0u8; 10];
    memset(&mut buffer, 0xAA, 10);
    for b in buffer {
        check!(b == 0xAA);
    }
    Ok(())
}

fn native_memcpy() -> Result<(), String> {
    let src: [u8; 10] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10];
    let mut dst = [0u8; 10];
    memcpy(&mut dst, &src, 10);
    for (d, s) in dst.iter().zip(&src) {
        check!(d == s);
    }
    Ok(())
}

fn native_memcmp_equal() -> Result<(), String> {
    check!(memcmp(&[1, 2, 3, 4, 5], &[1, 2, 3, 4, 5], 5) == 0);
    Ok(())
}

fn native_memcmp_different() -> Result<(), String> {
    check!(memcmp(&[1, 2, 3, 4, 5], &[1, 2, 4, 4, 5], 5) != 0);
    Ok(())
}

fn native_strlen() -> Result<(), String> {
    check!(strlen(b"\0") == 0);
    check!(strlen(b"hello\0") == 5);
    check!(strlen(b"test string\0") == 11);
    Ok(())
}

fn native_strcmp_equal() -> Result<(), String> {
    check!(strcmp(b"hello\0", b"hello\0") == 0);
    check!(strcmp(b"\0", b"\0") == 0);
    Ok(())
}

fn native_strcmp_different() -> Result<(), String> {
    check!(strcmp(b"hello\0", b"world\0") != 0);
    check!(strcmp(b"abc\0", b"abd\0") < 0);
    check!(strcmp(b"abd\0", b"abc\0") > 0);
    Ok(())
}

fn native_strcpy() -> Result<(), String> {
    let src = b"Hello, World!\0";
    let mut dst = [0u8; 20];
    strcpy(&mut dst, src);
    check!(strcmp(&dst, src) == 0);
    Ok(())
}

fn native_memmove_overlap() -> Result<(), String> {
    let mut fwd = *b"abcdefgh";
    memmove(&mut fwd, 0, 2, 6);
    check!(memcmp(&fwd, b"cdefghgh", 8) == 0);
    let mut back = *b"abcdefgh";
    memmove(&mut back, 2, 0, 6);
    check!(memcmp(&back, b"ababcdef", 8) == 0);
    Ok(())
}

fn native_strncpy_padding() -> Result<(), String> {
    let mut dst = [0u8; 8];
    memset(&mut dst, 0x7F, 8);
    strncpy(&mut dst, b"hi\0", 6);
    check!(dst[0] == b'h' && dst[1] == b'i');
    for &b in &dst[2..6] {
        check!(b == 0);
    }
    check!(dst[6] == 0x7F && dst[7] == 0x7F);
    Ok(())
}

fn native_strncmp() -> Result<(), String> {
    check!(strncmp(b"abcdef\0", b"abcxyz\0", 3) == 0);
    check!(strncmp(b"abcdef\0", b"abcxyz\0", 4) < 0);
    check!(strncmp(b"a\0", b"b\0", 0) == 0);
    Ok(())
}

fn native_strcat() -> Result<(), String> {
    let mut dst = [0u8; 16];
    strcpy(&mut dst, b"boot\0");
    strcat(&mut dst, b"loader\0");
    check!(strcmp(&dst, b"bootloader\0") == 0);
    check!(strlen(&dst) == 10);
    Ok(())
}
