//! C program generation.
//!
//! Every conformance case is compiled as its own translation unit: a fixed
//! prelude carrying the reference primitives, then a `main` that runs the
//! case's assertions and prints [`SUCCESS_MARKER`]. The prelude
//! avoids `<string.h>` so the BIOS definitions are the ones linked.

/// Line printed by the generated `main` once every assertion held.
pub const SUCCESS_MARKER: &str = "All tests passed!";

/// Reference primitives, matching the BIOS `memory.c` semantics.
pub const PRELUDE: &str = r#"#include <stdio.h>
#include <stdint.h>
#include <assert.h>

void *memset(void *s, int c, uint32_t n) {
    uint8_t *p = (uint8_t *)s;
    while (n--) {
        *p++ = (uint8_t)c;
    }
    return s;
}

void *memcpy(void *dest, const void *src, uint32_t n) {
    uint8_t *d = (uint8_t *)dest;
    const uint8_t *s = (const uint8_t *)src;
    while (n--) {
        *d++ = *s++;
    }
    return dest;
}

void *memmove(void *dest, const void *src, uint32_t n) {
    uint8_t *d = (uint8_t *)dest;
    const uint8_t *s = (const uint8_t *)src;
    if (d < s) {
        while (n--) {
            *d++ = *s++;
        }
    } else {
        d += n;
        s += n;
        while (n--) {
            *--d = *--s;
        }
    }
    return dest;
}

int memcmp(const void *s1, const void *s2, uint32_t n) {
    const uint8_t *p1 = (const uint8_t *)s1;
    const uint8_t *p2 = (const uint8_t *)s2;
    while (n--) {
        if (*p1 != *p2) {
            return *p1 - *p2;
        }
        p1++;
        p2++;
    }
    return 0;
}

uint32_t strlen(const char *s) {
    uint32_t len = 0;
    while (s[len]) {
        len++;
    }
    return len;
}

int strcmp(const char *s1, const char *s2) {
    while (*s1 && (*s1 == *s2)) {
        s1++;
        s2++;
    }
    return *(const uint8_t *)s1 - *(const uint8_t *)s2;
}

int strncmp(const char *s1, const char *s2, uint32_t n) {
    while (n && *s1 && (*s1 == *s2)) {
        s1++;
        s2++;
        n--;
    }
    if (n == 0) return 0;
    return *(const uint8_t *)s1 - *(const uint8_t *)s2;
}

char *strcpy(char *dest, const char *src) {
    char *d = dest;
    while ((*d++ = *src++)) {
    }
    return dest;
}

char *strncpy(char *dest, const char *src, uint32_t n) {
    uint32_t i;
    for (i = 0; i < n && src[i]; i++) {
        dest[i] = src[i];
    }
    for (; i < n; i++) {
        dest[i] = '\0';
    }
    return dest;
}

char *strcat(char *dest, const char *src) {
    char *d = dest;
    while (*d) d++;
    while ((*d++ = *src++)) {
    }
    return dest;
}
"#;

/// Render the full translation unit for one case body.
#[must_use]
pub fn render_program(body: &str) -> String {
    let mut program = String::with_capacity(PRELUDE.len() + body.len() + 128);
    program.push_str(PRELUDE);
    program.push_str("\nint main(void) {\n");
    program.push_str(body);
    if !body.ends_with('\n') {
        program.push('\n');
    }
    program.push_str("    printf(\"");
    program.push_str(SUCCESS_MARKER);
    program.push_str("\\n\");\n    return 0;\n}\n");
    program
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prelude_defines_every_primitive() {
        for symbol in [
            "memset", "memcpy", "memmove", "memcmp", "strlen", "strcmp", "strncmp", "strcpy",
            "strncpy", "strcat",
        ] {
            assert!(
                PRELUDE.contains(&format!(" {symbol}("))
                    || PRELUDE.contains(&format!("*{symbol}(")),
                "prelude is missing {symbol}"
            );
        }
        assert!(!PRELUDE.contains("<string.h>"));
    }

    #[test]
    fn body_is_spliced_before_success_marker() {
        let program = render_program("    assert(1 == 1);");
        let body_at = program.find("assert(1 == 1);").unwrap();
        let main_at = program.find("int main(void) {").unwrap();
        let marker_at = program.find(SUCCESS_MARKER).unwrap();
        assert!(main_at < body_at && body_at < marker_at);
        assert!(program.ends_with("    return 0;\n}\n"));
    }

    #[test]
    fn marker_is_printed_with_newline_escape() {
        let program = render_program("");
        assert!(program.contains("printf(\"All tests passed!\\n\");"));
    }
}
