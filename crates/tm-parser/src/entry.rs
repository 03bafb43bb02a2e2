//! Formatting of new log entries.

use tm_core::{Role, ThoughtmapError, collapse_whitespace};

/// Layout of generated timestamps, minute precision.
pub const TIMESTAMP_FORMAT: &str = "YYYY-MM-DD HH:MM";

/// Build the log line for free text typed or dictated by a user.
///
/// A leading `assistant:` or `user:` prefix (any case) selects the role and is
/// removed. The message keeps its punctuation; only whitespace is normalized.
pub fn format_entry(text: &str, timestamp: &str) -> Result<String, ThoughtmapError> {
    let (role, message) = split_role_prefix(text.trim());
    let message = collapse_whitespace(message);
    if message.is_empty() {
        return Err(ThoughtmapError::EmptyEntry);
    }
    Ok(format!("[{timestamp}] {role}: {message}"))
}

fn split_role_prefix(text: &str) -> (Role, &str) {
    for (prefix, role) in [("assistant:", Role::Assistant), ("user:", Role::User)] {
        let matches = text
            .get(..prefix.len())
            .is_some_and(|head| head.eq_ignore_ascii_case(prefix));
        if matches {
            return (role, &text[prefix.len()..]);
        }
    }
    (Role::User, text)
}

#[cfg(test)]
mod tests {
    use super::format_entry;
    use crate::parse_line;
    use tm_core::{Role, ThoughtmapError};

    const TS: &str = "2024-05-01 09:30";

    #[test]
    fn assistant_prefix_is_detected_and_parentheses_survive() {
        assert_eq!(
            format_entry("assistant: fix the (bug)", TS).expect("entry"),
            "[2024-05-01 09:30] Assistant: fix the (bug)"
        );
    }

    #[test]
    fn prefix_match_is_case_insensitive() {
        assert_eq!(
            format_entry("USER:   what   now?", TS).expect("entry"),
            "[2024-05-01 09:30] User: what now?"
        );
    }

    #[test]
    fn text_without_prefix_defaults_to_user() {
        assert_eq!(
            format_entry("  just a thought ", TS).expect("entry"),
            "[2024-05-01 09:30] User: just a thought"
        );
    }

    #[test]
    fn empty_text_is_rejected() {
        assert!(matches!(format_entry("   ", TS), Err(ThoughtmapError::EmptyEntry)));
        assert!(matches!(
            format_entry("assistant:   ", TS),
            Err(ThoughtmapError::EmptyEntry)
        ));
    }

    #[test]
    fn multibyte_text_shorter_than_prefix_is_safe() {
        assert_eq!(
            format_entry("héllo", TS).expect("entry"),
            "[2024-05-01 09:30] User: héllo"
        );
    }

    #[test]
    fn formatted_entry_parses_back() {
        let line = format_entry("assistant: fix the (bug)", TS).expect("entry");
        let parsed = parse_line(&line).expect("formatted entry should parse");
        assert_eq!(parsed.timestamp, TS);
        assert_eq!(parsed.role, Role::Assistant);
        assert_eq!(parsed.text, "fix the (bug)");
    }
}
