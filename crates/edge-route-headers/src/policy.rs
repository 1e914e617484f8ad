//! Route-level cache policies.
//!
//! Policies are the producer side of the pipeline: a loader or action
//! declares one, the emitted `Cache-Control`/`Vary` headers then flow
//! through [`pipe_headers`](crate::pipe_headers) where they are merged
//! conservatively with the parent route's.

use std::time::Duration;

use edge_cache_control::CacheControl;
use serde::{Deserialize, Serialize};

use crate::header_set::HeaderSet;

/// Cache scope determining who can cache the response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CacheScope {
    /// Cacheable by CDN and browser (shared cache).
    Public,
    /// Cacheable by browser only (private cache).
    Private,
    /// No caching.
    #[default]
    NoStore,
}

impl CacheScope {
    /// Check if this scope allows any caching.
    pub fn allows_caching(&self) -> bool {
        !matches!(self, Self::NoStore)
    }

    /// Check if this scope allows CDN caching.
    pub fn allows_cdn_caching(&self) -> bool {
        matches!(self, Self::Public)
    }
}

/// Route-level cache policy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouteCachePolicy {
    /// Cache scope.
    pub scope: CacheScope,
    /// Time-to-live for cached responses.
    #[serde(with = "duration_secs")]
    pub ttl: Duration,
    /// Shared-cache TTL (`s-maxage`), when it differs from `ttl`.
    #[serde(default, with = "opt_duration_secs", skip_serializing_if = "Option::is_none")]
    pub shared_ttl: Option<Duration>,
    /// Stale-while-revalidate window.
    #[serde(default, with = "opt_duration_secs", skip_serializing_if = "Option::is_none")]
    pub stale_while_revalidate: Option<Duration>,
    /// Stale-if-error window.
    #[serde(default, with = "opt_duration_secs", skip_serializing_if = "Option::is_none")]
    pub stale_if_error: Option<Duration>,
    /// Require revalidation once stale.
    #[serde(default)]
    pub must_revalidate: bool,
    /// Header names the cached response varies on.
    #[serde(default)]
    pub vary: Vec<String>,
}

impl Default for RouteCachePolicy {
    fn default() -> Self {
        Self {
            scope: CacheScope::NoStore,
            ttl: Duration::from_secs(0),
            shared_ttl: None,
            stale_while_revalidate: None,
            stale_if_error: None,
            must_revalidate: false,
            vary: Vec::new(),
        }
    }
}

impl RouteCachePolicy {
    /// Create a policy with no caching.
    pub fn no_store() -> Self {
        Self::default()
    }

    /// Create a public cache policy.
    pub fn public(ttl: Duration) -> Self {
        Self {
            scope: CacheScope::Public,
            ttl,
            ..Default::default()
        }
    }

    /// Create a private cache policy.
    pub fn private(ttl: Duration) -> Self {
        Self {
            scope: CacheScope::Private,
            ttl,
            ..Default::default()
        }
    }

    /// Set the shared-cache TTL (`s-maxage`).
    pub fn with_shared_ttl(mut self, ttl: Duration) -> Self {
        self.shared_ttl = Some(ttl);
        self
    }

    /// Set the stale-while-revalidate window.
    pub fn with_swr(mut self, window: Duration) -> Self {
        self.stale_while_revalidate = Some(window);
        self
    }

    /// Set the stale-if-error window.
    pub fn with_stale_if_error(mut self, window: Duration) -> Self {
        self.stale_if_error = Some(window);
        self
    }

    /// Require revalidation once the response is stale.
    pub fn with_must_revalidate(mut self) -> Self {
        self.must_revalidate = true;
        self
    }

    /// Add a header name to vary on.
    pub fn vary_on(mut self, header: impl Into<String>) -> Self {
        self.vary.push(header.into());
        self
    }

    /// Build the Cache-Control directive set for this policy.
    pub fn cache_control(&self) -> CacheControl {
        let mut control = match self.scope {
            CacheScope::NoStore => return CacheControl::new().with_no_store(),
            CacheScope::Public => CacheControl::new().with_public(),
            CacheScope::Private => CacheControl::new().with_private(),
        };

        control = control.with_max_age(self.ttl);

        if let Some(shared) = self.shared_ttl {
            control = control.with_s_maxage(shared);
        }
        if let Some(swr) = self.stale_while_revalidate {
            control = control.with_stale_while_revalidate(swr);
        }
        if let Some(sie) = self.stale_if_error {
            control = control.with_stale_if_error(sie);
        }
        if self.must_revalidate {
            control = control.with_must_revalidate();
        }

        control
    }

    /// Build the Vary header value, if any headers are varied on.
    pub fn vary_header(&self) -> Option<String> {
        if self.vary.is_empty() {
            None
        } else {
            Some(self.vary.join(", "))
        }
    }

    /// Write this policy's headers onto a header set.
    pub fn apply(&self, headers: &mut HeaderSet) {
        headers.set("Cache-Control", self.cache_control().to_string());
        if let Some(vary) = self.vary_header() {
            headers.set("Vary", vary);
        }
    }

    /// Serialize for debugging endpoints.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(value.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_secs)
    }
}

mod opt_duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(
        value: &Option<Duration>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match value {
            Some(value) => serializer.serialize_some(&value.as_secs()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(deserializer)?.map(Duration::from_secs))
    }
}
