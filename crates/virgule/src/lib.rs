//! # Virgule
//!
//! Route path-pattern compilation for web routers.
//!
//! A pattern string like `/users/:id{/:tab}/*rest` is compiled once, at
//! route-registration time, into a matcher plus an ordered list of
//! parameter descriptors. The matcher tests request paths with no further
//! parsing cost; the descriptors say how each captured value decodes
//! (plain text for `:name`, a list of path segments for `*name`).
//!
//! ## Grammar
//!
//! - Literal text matches itself; `\x` protects any single character.
//! - Runs of `/` merge by default (`//a` matches `/a`), the way reverse
//!   proxies collapse doubled slashes; the `!` flag keeps runs exact.
//! - `:name` captures one path segment; `*name` captures any number of
//!   segments, slashes included (at most one per pattern).
//! - `{...}` is an optional section, nestable to any depth.
//! - Flags before the leading `/`: `i` (case-insensitive), `!` (exact
//!   slashes).
//!
//! ## Example
//!
//! ```
//! use virgule::{compile, ParamValue};
//!
//! let route = compile("/docs/*path", false)?;
//! let found = route.match_path("/docs/guide/intro").unwrap();
//! assert_eq!(
//!     found.params()["path"],
//!     ParamValue::Segments(vec!["guide".to_string(), "intro".to_string()]),
//! );
//! # Ok::<(), virgule::PatternError>(())
//! ```
//!
//! Compiling with `allow_sub_routes = true` additionally captures the
//! unmatched tail of the path under the name [`REST_PARAM`], so a router
//! can hand it to a mounted sub-router:
//!
//! ```
//! use virgule::compile;
//!
//! let mount = compile("/admin", true)?;
//! let found = mount.match_path("/admin/users/42").unwrap();
//! assert_eq!(found.rest(), Some("users/42"));
//! # Ok::<(), virgule::PatternError>(())
//! ```

mod error;
mod escape;
mod param;
mod pattern;

pub use error::PatternError;
pub use escape::escape_literal;
pub use param::{ParamDescriptor, ParamKind, ParamValue};
pub use pattern::{compile, CompiledPattern, PathMatch, REST_PARAM};
