//! Route response header selection and propagation for the edge streaming
//! SSR platform.
//!
//! This crate provides:
//! - `HeaderSet` - Ordered header collection with case-insensitive lookup
//! - `pipe_headers` - Pick the route's result headers (loader, action, or
//!   error) and merge the parent's caching signals in conservatively
//! - `RouteCachePolicy` - Route-level cache configuration emitting
//!   `Cache-Control` and `Vary`
//! - `ServerTimings` - Per-request timing metrics formatted as a
//!   `Server-Timing` header
//!
//! # Example
//!
//! ```
//! use std::time::Duration;
//! use edge_route_headers::{pipe_headers, HeaderSet, RouteCachePolicy, RouteHeaders};
//!
//! // The loader declares its cache policy...
//! let mut loader = HeaderSet::new();
//! RouteCachePolicy::public(Duration::from_secs(600)).apply(&mut loader);
//!
//! // ...and the parent's stricter policy still wins after piping.
//! let parent: HeaderSet = [("Cache-Control", "private, max-age=60")]
//!     .into_iter()
//!     .collect();
//! let headers = pipe_headers(RouteHeaders {
//!     parent: &parent,
//!     loader: &loader,
//!     action: &HeaderSet::new(),
//!     error: None,
//! })
//! .unwrap();
//!
//! assert_eq!(
//!     headers.get("Cache-Control"),
//!     Some("max-age=60, private, public"),
//! );
//! ```

mod header_set;
mod pipe;
mod policy;
mod timing;

pub use header_set::*;
pub use pipe::*;
pub use policy::*;
pub use timing::*;
