//! Cache-Control parsing and conservative merging for the edge streaming
//! SSR platform.
//!
//! This crate provides:
//! - `CacheControl` - A parsed Cache-Control directive set with typed
//!   accessors and builders
//! - `CacheControl::parse` - Lenient directive-level parsing
//! - `conservative` - Merge N raw header values into the strictest
//!   combination (flags union, numerics take the minimum)
//!
//! # Example
//!
//! ```
//! use edge_cache_control::conservative;
//!
//! // A child route asks for an hour, the parent only allows 30 minutes
//! // and restricts to private caches: the strictest combination wins.
//! let merged = conservative([
//!     Some("max-age=3600"),
//!     Some("private, max-age=1800"),
//! ])
//! .unwrap();
//!
//! assert_eq!(merged.to_string(), "max-age=1800, private");
//! ```

mod directives;
mod merge;
mod parse;

pub use directives::*;
pub use merge::conservative;
pub use parse::ParseError;
