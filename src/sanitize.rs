//! Key and value sanitization.
//!
//! Two independent transforms, both pure functions of a string:
//!
//! - **Key sanitization** constrains a raw parameter key to a safe
//!   identifier charset: lowercased ASCII alphanumerics, dash and
//!   underscore. Whitespace runs collapse to a single underscore; every
//!   other character is dropped, not escaped.
//! - **Value sanitization** strips markup tags and control characters
//!   from a scalar and trims surrounding whitespace. Lists are sanitized
//!   element-wise, preserving order and arity.
//!
//! Hosts with their own sanitization rules implement [`Sanitize`] and hand
//! it to [`VarStore::with_sanitizer`](crate::VarStore::with_sanitizer).

use crate::value::Value;

/// Sanitization strategy injected into the variable store.
///
/// Implementations must be pure: the same input always yields the same
/// output, with no side effects.
pub trait Sanitize {
    /// Sanitizes a parameter key into a safe identifier.
    fn key(&self, raw: &str) -> String;

    /// Sanitizes a scalar value.
    fn value(&self, raw: &str) -> String;

    /// Sanitizes a parameter value, element-wise for lists.
    fn apply(&self, raw: &Value) -> Value {
        match raw {
            Value::Scalar(s) => Value::Scalar(self.value(s)),
            Value::List(items) => {
                Value::List(items.iter().map(|item| self.value(item)).collect())
            }
        }
    }
}

/// Default sanitizer implementing the transforms documented at module
/// level.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultSanitizer;

impl Sanitize for DefaultSanitizer {
    fn key(&self, raw: &str) -> String {
        sanitize_key(raw)
    }

    fn value(&self, raw: &str) -> String {
        sanitize_text(raw)
    }
}

/// Constrains a raw key to lowercased `[a-z0-9_-]`.
///
/// Whitespace runs become a single underscore so multi-word keys stay
/// addressable; all other characters are dropped.
pub fn sanitize_key(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut pending_separator = false;

    for c in raw.trim().chars() {
        if c.is_whitespace() {
            pending_separator = !out.is_empty();
            continue;
        }
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            if pending_separator {
                out.push('_');
                pending_separator = false;
            }
            out.push(c.to_ascii_lowercase());
        }
    }

    out
}

/// Strips markup tags and control characters, then trims whitespace.
///
/// Tag stripping removes everything between `<` and the next `>`; an
/// unterminated tag swallows the rest of the string, matching the
/// conservative behavior expected of a strip-don't-escape sanitizer.
pub fn sanitize_text(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut in_tag = false;

    for c in raw.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if in_tag => {}
            _ if c.is_control() => {}
            _ => out.push(c),
        }
    }

    out.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    // ===========================================
    // sanitize_key tests
    // ===========================================

    #[test]
    fn test_key_lowercases() {
        assert_eq!(sanitize_key("Paged"), "paged");
        assert_eq!(sanitize_key("X-CUSTOM"), "x-custom");
    }

    #[test]
    fn test_key_whitespace_becomes_underscore() {
        assert_eq!(sanitize_key("Search Term"), "search_term");
        assert_eq!(sanitize_key("a   b"), "a_b");
        assert_eq!(sanitize_key("  padded  "), "padded");
    }

    #[test]
    fn test_key_drops_unsafe_characters() {
        assert_eq!(sanitize_key("user[id]"), "userid");
        assert_eq!(sanitize_key("q!@#$%^&*()"), "q");
        assert_eq!(sanitize_key("snake_case-kebab"), "snake_case-kebab");
    }

    #[test]
    fn test_key_empty_input() {
        assert_eq!(sanitize_key(""), "");
        assert_eq!(sanitize_key("!!!"), "");
    }

    // ===========================================
    // sanitize_text tests
    // ===========================================

    #[test]
    fn test_text_strips_tags_keeps_content() {
        assert_eq!(sanitize_text("<b>hi</b>"), "hi");
        assert_eq!(sanitize_text("<script>x</script>rest"), "xrest");
    }

    #[test]
    fn test_text_trims_whitespace() {
        assert_eq!(sanitize_text("  hello  "), "hello");
        assert_eq!(sanitize_text("<b>hi</b>  "), "hi");
    }

    #[test]
    fn test_text_strips_control_characters() {
        assert_eq!(sanitize_text("a\x00b\x07c"), "abc");
        assert_eq!(sanitize_text("line1\nline2"), "line1line2");
    }

    #[test]
    fn test_text_unterminated_tag() {
        assert_eq!(sanitize_text("safe<img src=x"), "safe");
    }

    // ===========================================
    // apply tests
    // ===========================================

    #[test]
    fn test_apply_scalar() {
        let s = DefaultSanitizer;
        assert_eq!(s.apply(&Value::from(" <i>x</i> ")), Value::from("x"));
    }

    #[test]
    fn test_apply_list_preserves_order_and_arity() {
        let s = DefaultSanitizer;
        let raw = Value::from(vec!["<b>a</b>", " b ", ""]);
        assert_eq!(s.apply(&raw), Value::from(vec!["a", "b", ""]));
    }
}
