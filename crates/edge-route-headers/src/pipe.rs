//! Response header selection and propagation across nested routes.

use edge_cache_control::{conservative, ParseError};

use crate::header_set::HeaderSet;

/// Headers forwarded from the current route's result.
const FORWARD_HEADERS: [&str; 3] = ["Cache-Control", "Vary", "Server-Timing"];

/// Headers appended from the parent route.
const INHERIT_HEADERS: [&str; 2] = ["Vary", "Server-Timing"];

/// Headers copied from the parent when the route contributed none.
const FALLBACK_HEADERS: [&str; 2] = ["Cache-Control", "Vary"];

/// Header sets produced while handling one route.
///
/// `loader`, `action` and `error` are the mutually exclusive execution
/// outcomes of the route; `parent` carries whatever the enclosing route
/// already resolved.
#[derive(Debug, Clone, Copy)]
pub struct RouteHeaders<'a> {
    /// Headers resolved by the parent route.
    pub parent: &'a HeaderSet,
    /// Headers from the route's loader.
    pub loader: &'a HeaderSet,
    /// Headers from the route's action.
    pub action: &'a HeaderSet,
    /// Headers from the route's error handler, if it ran.
    pub error: Option<&'a HeaderSet>,
}

impl<'a> RouteHeaders<'a> {
    /// The set describing the route's actual result.
    ///
    /// An error handler's headers win outright. An empty loader set means
    /// the route only ran an action (e.g. a POST with no data read).
    fn current(&self) -> &'a HeaderSet {
        match self.error {
            Some(error) => error,
            None if self.loader.is_empty() => self.action,
            None => self.loader,
        }
    }
}

/// Compute the response headers for a route from its own result and its
/// parent's headers.
///
/// Only `Cache-Control`, `Vary` and `Server-Timing` are handled; the output
/// is built from an allow-list, never a blind copy, so a loader cannot leak
/// internal headers downstream. `Cache-Control` is always recomputed as the
/// conservative merge of the parent's value and the route's own, so a parent
/// restriction is never dropped. `Vary` and `Server-Timing` accumulate:
/// parent values are appended after the route's own.
///
/// Pure function of its inputs; Cache-Control parse errors propagate.
pub fn pipe_headers(route: RouteHeaders<'_>) -> Result<HeaderSet, ParseError> {
    let current = route.current();
    let mut headers = HeaderSet::new();

    // Take in useful headers from the route's own result.
    for name in FORWARD_HEADERS {
        for value in current.get_all(name) {
            headers.append(name, value);
        }
    }

    // The parent's caching restrictions always apply, even when the route
    // set no Cache-Control of its own.
    let merged = conservative([
        route.parent.get_joined("Cache-Control").as_deref(),
        headers.get_joined("Cache-Control").as_deref(),
    ])?;
    if merged.is_empty() {
        headers.remove("Cache-Control");
    } else {
        headers.set("Cache-Control", merged.to_string());
    }

    // Append useful parent headers, keeping both contributions visible.
    for name in INHERIT_HEADERS {
        for value in route.parent.get_all(name) {
            headers.append(name, value);
        }
    }

    // Fall back to the parent verbatim when the route contributed nothing.
    for name in FALLBACK_HEADERS {
        if headers.contains(name) {
            continue;
        }
        for value in route.parent.get_all(name) {
            headers.append(name, value);
        }
    }

    Ok(headers)
}
