//! Literal escaping for the matcher's pattern language
//!
//! Pure functions: same input → same output, no side effects.

/// Escapes a literal string for verbatim embedding in the matcher's
/// regex source.
///
/// Every character outside ASCII letters, digits, underscore and space is
/// replaced by a hex code-point escape (`\x{2e}`), so the result matches
/// exactly the original characters no matter which regex metacharacters
/// they happen to be. Characters above the basic multilingual plane are
/// escaped by their full scalar code point, never by surrogate halves.
///
/// Total over any input, including the empty string. Safe characters pass
/// through unchanged, so escaping already-safe text is a no-op.
///
/// # Examples
///
/// ```
/// use virgule::escape_literal;
///
/// assert_eq!(escape_literal("abc_1 x"), "abc_1 x");
/// assert_eq!(escape_literal("a.b"), "a\\x{2e}b");
/// assert_eq!(escape_literal(""), "");
/// ```
pub fn escape_literal(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == ' ' {
            out.push(ch);
        } else {
            out.push_str(&format!("\\x{{{:x}}}", ch as u32));
        }
    }
    out
}
