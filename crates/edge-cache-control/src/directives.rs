//! Cache-Control directive sets.

use std::collections::BTreeMap;
use std::fmt;
use std::time::Duration;

/// Value carried by a single Cache-Control directive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DirectiveValue {
    /// Presence-only directive (e.g. `private`, `no-store`).
    Flag,
    /// Non-negative integer seconds (e.g. `max-age=300`).
    Secs(u64),
    /// String argument (e.g. `no-cache="set-cookie"`).
    ///
    /// Preserved for parse/format round-trips; the conservative merge
    /// drops these, since there is no strictest combination of strings.
    Token(String),
}

/// A parsed `Cache-Control` header value.
///
/// Directive names are lowercased and stored sorted, so formatting is
/// deterministic regardless of the order directives appeared in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheControl {
    directives: BTreeMap<String, DirectiveValue>,
}

impl CacheControl {
    /// Create an empty directive set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of directives.
    pub fn len(&self) -> usize {
        self.directives.len()
    }

    /// Check if no directives are set.
    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    /// Look up a directive by name (case-insensitive).
    pub fn directive(&self, name: &str) -> Option<&DirectiveValue> {
        self.directives.get(&name.to_ascii_lowercase())
    }

    /// Insert a directive, replacing any existing value for that name.
    pub fn insert(&mut self, name: impl Into<String>, value: DirectiveValue) {
        let mut name = name.into();
        name.make_ascii_lowercase();
        self.directives.insert(name, value);
    }

    /// Remove a directive by name (case-insensitive).
    pub fn remove(&mut self, name: &str) -> Option<DirectiveValue> {
        self.directives.remove(&name.to_ascii_lowercase())
    }

    /// Iterate directives in canonical (sorted) order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &DirectiveValue)> {
        self.directives.iter().map(|(name, value)| (name.as_str(), value))
    }

    pub(crate) fn directives(&self) -> &BTreeMap<String, DirectiveValue> {
        &self.directives
    }

    fn secs(&self, name: &str) -> Option<Duration> {
        match self.directives.get(name) {
            Some(DirectiveValue::Secs(secs)) => Some(Duration::from_secs(*secs)),
            _ => None,
        }
    }

    fn flag(&self, name: &str) -> bool {
        matches!(self.directives.get(name), Some(DirectiveValue::Flag))
    }

    // === Typed accessors ===

    /// Get the `max-age` directive.
    pub fn max_age(&self) -> Option<Duration> {
        self.secs("max-age")
    }

    /// Get the `s-maxage` directive.
    pub fn s_maxage(&self) -> Option<Duration> {
        self.secs("s-maxage")
    }

    /// Get the `stale-while-revalidate` directive.
    pub fn stale_while_revalidate(&self) -> Option<Duration> {
        self.secs("stale-while-revalidate")
    }

    /// Get the `stale-if-error` directive.
    pub fn stale_if_error(&self) -> Option<Duration> {
        self.secs("stale-if-error")
    }

    /// Check for the `private` directive.
    pub fn is_private(&self) -> bool {
        self.flag("private")
    }

    /// Check for the `public` directive.
    pub fn is_public(&self) -> bool {
        self.flag("public")
    }

    /// Check for the `no-cache` directive.
    pub fn no_cache(&self) -> bool {
        self.flag("no-cache")
    }

    /// Check for the `no-store` directive.
    pub fn no_store(&self) -> bool {
        self.flag("no-store")
    }

    /// Check for the `must-revalidate` directive.
    pub fn must_revalidate(&self) -> bool {
        self.flag("must-revalidate")
    }

    /// Check for the `immutable` directive.
    pub fn immutable(&self) -> bool {
        self.flag("immutable")
    }

    // === Builders ===

    /// Set `max-age` (truncated to whole seconds).
    pub fn with_max_age(mut self, max_age: Duration) -> Self {
        self.insert("max-age", DirectiveValue::Secs(max_age.as_secs()));
        self
    }

    /// Set `s-maxage` (truncated to whole seconds).
    pub fn with_s_maxage(mut self, s_maxage: Duration) -> Self {
        self.insert("s-maxage", DirectiveValue::Secs(s_maxage.as_secs()));
        self
    }

    /// Set `stale-while-revalidate`.
    pub fn with_stale_while_revalidate(mut self, window: Duration) -> Self {
        self.insert(
            "stale-while-revalidate",
            DirectiveValue::Secs(window.as_secs()),
        );
        self
    }

    /// Set `stale-if-error`.
    pub fn with_stale_if_error(mut self, window: Duration) -> Self {
        self.insert("stale-if-error", DirectiveValue::Secs(window.as_secs()));
        self
    }

    /// Set the `private` directive.
    pub fn with_private(mut self) -> Self {
        self.insert("private", DirectiveValue::Flag);
        self
    }

    /// Set the `public` directive.
    pub fn with_public(mut self) -> Self {
        self.insert("public", DirectiveValue::Flag);
        self
    }

    /// Set the `no-cache` directive.
    pub fn with_no_cache(mut self) -> Self {
        self.insert("no-cache", DirectiveValue::Flag);
        self
    }

    /// Set the `no-store` directive.
    pub fn with_no_store(mut self) -> Self {
        self.insert("no-store", DirectiveValue::Flag);
        self
    }

    /// Set the `must-revalidate` directive.
    pub fn with_must_revalidate(mut self) -> Self {
        self.insert("must-revalidate", DirectiveValue::Flag);
        self
    }

    /// Set the `immutable` directive.
    pub fn with_immutable(mut self) -> Self {
        self.insert("immutable", DirectiveValue::Flag);
        self
    }
}

/// Check if a string is a valid HTTP token (no quoting needed).
fn is_token(value: &str) -> bool {
    !value.is_empty()
        && value.bytes().all(|b| {
            b.is_ascii_alphanumeric()
                || matches!(
                    b,
                    b'!' | b'#'
                        | b'$'
                        | b'%'
                        | b'&'
                        | b'\''
                        | b'*'
                        | b'+'
                        | b'-'
                        | b'.'
                        | b'^'
                        | b'_'
                        | b'`'
                        | b'|'
                        | b'~'
                )
        })
}

impl fmt::Display for CacheControl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for (name, value) in &self.directives {
            if !first {
                write!(f, ", ")?;
            }
            first = false;
            match value {
                DirectiveValue::Flag => write!(f, "{name}")?,
                DirectiveValue::Secs(secs) => write!(f, "{name}={secs}")?,
                DirectiveValue::Token(arg) if is_token(arg) => write!(f, "{name}={arg}")?,
                DirectiveValue::Token(arg) => write!(f, "{name}=\"{arg}\"")?,
            }
        }
        Ok(())
    }
}
