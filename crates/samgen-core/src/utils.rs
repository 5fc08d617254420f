//! Text utilities shared by the synthesizers and the injector

/// Number of spaces one indentation level expands to.
pub const INDENT_WIDTH: usize = 2;

/// Prefix `text` with `level * 2` spaces.
///
/// Level 1 is a top-level resource key, level 2 its `Type`/`Properties`
/// keys, and so on. The generated documents are indentation-significant.
pub fn indent(level: usize, text: &str) -> String {
    let mut result = String::with_capacity(level * INDENT_WIDTH + text.len());
    result.extend(std::iter::repeat(' ').take(level * INDENT_WIDTH));
    result.push_str(text);
    result
}

/// Count non-overlapping occurrences of `needle` in `haystack`
pub fn count_occurrences(haystack: &str, needle: &str) -> usize {
    if needle.is_empty() {
        return 0;
    }
    haystack.matches(needle).count()
}
