//! Conservative Cache-Control merging.

use std::collections::BTreeSet;

use crate::directives::{CacheControl, DirectiveValue};
use crate::parse::ParseError;

/// Strictest combination of two values for the same directive.
///
/// Numeric directives take the minimum (shortest cache lifetime wins),
/// flags stay set, and a flag beats a numeric for the same name. String
/// arguments have no strictest combination and collapse to `None`.
pub(crate) fn combine(a: &DirectiveValue, b: &DirectiveValue) -> Option<DirectiveValue> {
    use DirectiveValue::{Flag, Secs, Token};

    match (a, b) {
        (Secs(a), Secs(b)) => Some(Secs(*a.min(b))),
        (Flag, _) | (_, Flag) => Some(Flag),
        (Token(_), _) | (_, Token(_)) => None,
    }
}

impl CacheControl {
    /// Merge two directive sets, keeping the most conservative value per
    /// directive.
    ///
    /// Commutative and associative: flags are unioned, numerics take the
    /// minimum, and directives carrying string arguments are dropped.
    pub fn merge_conservative(&self, other: &CacheControl) -> CacheControl {
        let mut merged = CacheControl::new();

        for name in directive_names(self, other) {
            let value = match (self.directive(name), other.directive(name)) {
                (Some(a), Some(b)) => combine(a, b),
                (Some(DirectiveValue::Token(_)), None)
                | (None, Some(DirectiveValue::Token(_))) => None,
                (Some(value), None) | (None, Some(value)) => Some(value.clone()),
                (None, None) => None,
            };
            if let Some(value) = value {
                merged.insert(name, value);
            }
        }

        merged
    }
}

fn directive_names<'a>(a: &'a CacheControl, b: &'a CacheControl) -> BTreeSet<&'a str> {
    let mut names: BTreeSet<&str> = BTreeSet::new();
    names.extend(a.directives().keys().map(String::as_str));
    names.extend(b.directives().keys().map(String::as_str));
    names
}

/// Combine raw `Cache-Control` header values into the strictest single set.
///
/// `None` entries contribute nothing. Per directive, flags are true if true
/// in any input, numerics take the arithmetic minimum, and string-valued
/// directives are dropped (no strictest combination exists for them). Parse
/// errors from malformed inputs propagate to the caller.
pub fn conservative<'a, I>(values: I) -> Result<CacheControl, ParseError>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut merged = CacheControl::new();
    for value in values.into_iter().flatten() {
        merged = merged.merge_conservative(&CacheControl::parse(value)?);
    }
    Ok(merged)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn merge(values: &[&str]) -> CacheControl {
        conservative(values.iter().map(|value| Some(*value))).unwrap()
    }

    // === Directive Merge Tests ===

    #[test]
    fn test_numeric_takes_minimum_across_inputs() {
        let merged = merge(&[
            "max-age=3600",
            "max-age=1800, s-maxage=600",
            "private, max-age=86400",
        ]);
        assert_eq!(merged.max_age(), Some(Duration::from_secs(1800)));
        assert_eq!(merged.s_maxage(), Some(Duration::from_secs(600)));
        assert!(merged.is_private());
    }

    #[test]
    fn test_flags_union_across_inputs() {
        let merged = merge(&["private", "no-cache,no-store"]);
        assert!(merged.is_private());
        assert!(merged.no_cache());
        assert!(merged.no_store());
        assert_eq!(merged.len(), 3);
    }

    #[test]
    fn test_smallest_of_multiple_numerics() {
        let merged = merge(&["max-age=10, s-maxage=300", "max-age=300, s-maxage=600"]);
        assert_eq!(merged.max_age(), Some(Duration::from_secs(10)));
        assert_eq!(merged.s_maxage(), Some(Duration::from_secs(300)));
    }

    #[test]
    fn test_max_age_zero_wins_over_larger_values() {
        let merged = merge(&["max-age=0", "max-age=300"]);
        assert_eq!(merged.max_age(), Some(Duration::from_secs(0)));
        assert_eq!(merged.to_string(), "max-age=0");
    }

    #[test]
    fn test_single_sided_numeric_is_kept() {
        let merged = merge(&["max-age=60", "private"]);
        assert_eq!(merged.to_string(), "max-age=60, private");
    }

    #[test]
    fn test_string_arguments_are_dropped() {
        let merged = merge(&["no-cache=\"set-cookie\", max-age=30", "max-age=60"]);
        assert!(!merged.no_cache());
        assert!(merged.directive("no-cache").is_none());
        assert_eq!(merged.max_age(), Some(Duration::from_secs(30)));
    }

    #[test]
    fn test_flag_beats_numeric_for_same_name() {
        let merged = merge(&["no-cache", "no-cache=5"]);
        assert!(merged.no_cache());
    }

    // === Algebraic Property Tests ===

    #[test]
    fn test_merge_is_commutative() {
        let inputs = [
            "max-age=60, private",
            "no-store, s-maxage=30",
            "max-age=10",
        ];
        let forward = merge(&inputs);
        let mut reversed = inputs;
        reversed.reverse();
        assert_eq!(forward, merge(&reversed));
        assert_eq!(forward.to_string(), merge(&reversed).to_string());
    }

    #[test]
    fn test_single_input_is_canonical_form() {
        let merged = merge(&["private, max-age=60"]);
        assert_eq!(merged.to_string(), "max-age=60, private");
    }

    #[test]
    fn test_empty_inputs_yield_empty_set() {
        assert_eq!(merge(&[]).to_string(), "");
        let merged = conservative([None, None]).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn test_none_entries_contribute_nothing() {
        let merged = conservative([Some("max-age=60"), None, Some("private")]).unwrap();
        assert_eq!(merged.to_string(), "max-age=60, private");
    }

    // === Error Propagation Tests ===

    #[test]
    fn test_parse_errors_propagate() {
        assert!(conservative([Some("max-age=60"), Some("=5")]).is_err());
    }
}
