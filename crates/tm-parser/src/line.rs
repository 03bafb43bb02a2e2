use tm_core::{Role, collapse_whitespace};

/// A log line that was split into its parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedLine {
    pub timestamp: String,
    pub role: Role,
    pub text: String,
}

/// Parse one trimmed, non-empty log line of the form `[timestamp] role: message`.
///
/// The timestamp prefix is optional. Returns `None` when there is no `:`
/// separator or the message is empty after whitespace normalization.
#[must_use]
pub fn parse_line(line: &str) -> Option<ParsedLine> {
    let (timestamp, working) = split_timestamp(line);
    let (role_token, message) = working.split_once(':')?;

    let text = collapse_whitespace(message);
    if text.is_empty() {
        return None;
    }

    Some(ParsedLine {
        timestamp: timestamp.to_string(),
        role: Role::from_token(role_token),
        text,
    })
}

fn split_timestamp(line: &str) -> (&str, &str) {
    let Some(rest) = line.strip_prefix('[') else {
        return ("", line);
    };
    match rest.find(']') {
        Some(close) => (&rest[..close], &rest[close + 1..]),
        None => ("", line),
    }
}
