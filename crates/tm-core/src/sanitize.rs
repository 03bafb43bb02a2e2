//! Label sanitization for Mermaid node declarations.

/// Characters that open or close a Mermaid node shape.
const RESERVED_CHARS: &[char] = &['(', ')', '[', ']', '{', '}'];

/// Collapse every whitespace run to a single space and trim both ends.
#[must_use]
pub fn collapse_whitespace(input: &str) -> String {
    input.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove shape delimiters and normalize whitespace.
///
/// Total and idempotent: `sanitize_label(&sanitize_label(x)) == sanitize_label(x)`.
#[must_use]
pub fn sanitize_label(raw: &str) -> String {
    let stripped: String = raw.chars().filter(|ch| !RESERVED_CHARS.contains(ch)).collect();
    collapse_whitespace(&stripped)
}

#[cfg(test)]
mod tests {
    use super::{RESERVED_CHARS, collapse_whitespace, sanitize_label};
    use proptest::prelude::*;

    #[test]
    fn strips_shape_delimiters() {
        assert_eq!(sanitize_label("fix the (bug) [now] {ok}"), "fix the bug now ok");
    }

    #[test]
    fn collapses_whitespace_left_by_removed_characters() {
        assert_eq!(sanitize_label("  a ( )  b\t\n c  "), "a b c");
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(sanitize_label(""), "");
        assert_eq!(sanitize_label("()[]{}"), "");
    }

    #[test]
    fn collapse_keeps_parentheses() {
        assert_eq!(collapse_whitespace("  fix   the (bug) "), "fix the (bug)");
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(128))]

        #[test]
        fn prop_sanitize_is_idempotent(input in ".{0,128}") {
            let once = sanitize_label(&input);
            prop_assert_eq!(sanitize_label(&once), once);
        }

        #[test]
        fn prop_sanitized_label_has_no_reserved_chars(input in ".{0,128}") {
            let label = sanitize_label(&input);
            let has_reserved = label.contains(RESERVED_CHARS);
            prop_assert!(!has_reserved, "reserved char in {:?}", label);
            prop_assert_eq!(label.trim(), label.as_str());
            prop_assert!(!label.contains("  "));
        }
    }
}
