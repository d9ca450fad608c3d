//! Field extraction helpers for action patterns.

use regex::Captures;

/// Errors raised while constructing an action from a matched line.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ActionParseError {
    /// No registered action pattern matched the line.
    #[error("no registered action matches the line")]
    NoMatch,

    /// A required numeric field did not parse as an integer.
    #[error("invalid integer for {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

/// Returns a named capture group's text, or `""` when the group did not
/// participate in the match.
pub fn group<'t>(caps: &Captures<'t>, name: &str) -> &'t str {
    caps.name(name).map(|m| m.as_str()).unwrap_or("")
}

/// Integer-only field parsing.
///
/// An empty value (optional group that did not match) parses to 0; anything
/// else must be a plain integer, and a malformed value is a script
/// authoring error surfaced at quest compile time.
pub fn parse_int(field: &'static str, value: &str) -> Result<i32, ActionParseError> {
    if value.is_empty() {
        return Ok(0);
    }
    value
        .parse::<i32>()
        .map_err(|_| ActionParseError::InvalidNumber {
            field,
            value: value.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_parses_to_zero() {
        assert_eq!(parse_int("id", "").unwrap(), 0);
    }

    #[test]
    fn plain_integers_parse() {
        assert_eq!(parse_int("goldAmount", "50").unwrap(), 50);
    }

    #[test]
    fn malformed_numbers_are_authoring_errors() {
        let err = parse_int("id", "12x").unwrap_err();
        assert_eq!(
            err,
            ActionParseError::InvalidNumber {
                field: "id",
                value: "12x".to_string()
            }
        );
    }
}
