//! Cache-Control parsing.

use thiserror::Error;

use crate::directives::{CacheControl, DirectiveValue};
use crate::merge::combine;

/// Errors from parsing a Cache-Control header value.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A directive had an argument but no name (e.g. `=5`).
    #[error("empty directive name in {0:?}")]
    EmptyDirectiveName(String),

    /// A directive name contained characters outside the HTTP token set.
    #[error("invalid directive name {0:?}")]
    InvalidDirectiveName(String),
}

impl CacheControl {
    /// Parse a raw `Cache-Control` header value.
    ///
    /// Lenient at the directive level: empty segments are skipped, unknown
    /// directives are kept, and string arguments are preserved verbatim.
    /// Errors are reserved for input that is not Cache-Control shaped at
    /// all (a directive with an empty or non-token name) and propagate to
    /// the caller.
    pub fn parse(value: &str) -> Result<Self, ParseError> {
        let mut control = CacheControl::new();

        for segment in split_directives(value) {
            let segment = segment.trim();
            if segment.is_empty() {
                continue;
            }

            let (name, arg) = match segment.split_once('=') {
                Some((name, arg)) => (name.trim(), Some(arg.trim())),
                None => (segment, None),
            };

            if name.is_empty() {
                return Err(ParseError::EmptyDirectiveName(segment.to_string()));
            }
            if !is_token_name(name) {
                return Err(ParseError::InvalidDirectiveName(name.to_string()));
            }

            let name = name.to_ascii_lowercase();
            let parsed = parse_value(arg);

            // Duplicate directives within one value collapse conservatively;
            // the first occurrence wins when no strict combination exists.
            let value = match control.directive(&name) {
                Some(existing) => combine(existing, &parsed),
                None => Some(parsed),
            };
            if let Some(value) = value {
                control.insert(name, value);
            }
        }

        Ok(control)
    }
}

impl std::str::FromStr for CacheControl {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CacheControl::parse(s)
    }
}

fn parse_value(arg: Option<&str>) -> DirectiveValue {
    let arg = match arg {
        Some(arg) if !arg.is_empty() => arg,
        // `name` and the degenerate `name=` are both presence-only.
        _ => return DirectiveValue::Flag,
    };

    let arg = unquote(arg);

    if !arg.is_empty() && arg.bytes().all(|b| b.is_ascii_digit()) {
        // Out-of-range values clamp to the maximum representable lifetime.
        return DirectiveValue::Secs(arg.parse().unwrap_or(u64::MAX));
    }

    DirectiveValue::Token(arg.to_string())
}

/// Strip one pair of surrounding double quotes, if present.
fn unquote(arg: &str) -> &str {
    arg.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(arg)
}

fn is_token_name(name: &str) -> bool {
    name.bytes()
        .all(|b| b.is_ascii_alphanumeric() || matches!(b, b'-' | b'_' | b'.' | b'*'))
}

/// Split on commas, ignoring commas inside quoted arguments.
fn split_directives(value: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut in_quotes = false;
    let mut start = 0;

    for (index, byte) in value.bytes().enumerate() {
        match byte {
            b'"' => in_quotes = !in_quotes,
            b',' if !in_quotes => {
                segments.push(&value[start..index]);
                start = index + 1;
            }
            _ => {}
        }
    }
    segments.push(&value[start..]);

    segments
}
