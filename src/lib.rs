//! # hash-router
//!
//! Hierarchical, path-segment-based routing that drives UI region lifecycle
//! (enter/exit) from changes to a `#!/`-prefixed location fragment.
//!
//! The heart of the crate is the diff-and-trigger engine: given the last
//! fully-applied path and a newly observed one, it determines which
//! registered actions must exit (deepest first), which must enter
//! (shallowest first), how persistent sub-trees survive sibling navigation
//! beneath a boundary, how redirect overrides interrupt a transition, and how
//! an unmatched leaf falls back to a `::not-found` handler.
//!
//! Platform I/O (the address bar, history, durable storage, analytics) sits
//! behind the [`Environment`] trait; the core never touches it directly.
//!
//! # Example
//!
//! ```
//! use hash_router::{MemoryEnvironment, Navigation, RouteConfig, Router};
//!
//! let mut router = Router::new(MemoryEnvironment::with_location("#!/home/pages/p1"));
//!
//! router
//!     .add(
//!         RouteConfig::new("/home/pages/{page}")
//!             .on_enter(|path, params| {
//!                 println!("showing {path}, page = {:?}", params.get("page"));
//!             })
//!             .on_leave(|path, _| println!("hiding {path}")),
//!     )
//!     .unwrap();
//!
//! assert_eq!(router.route_changed().unwrap(), Navigation::Completed);
//! ```
//!
//! # Persistence boundaries
//!
//! A single `//` marker inside a registered path starts the persisted region:
//! the action stays active while only the segments behind the marker change,
//! and navigating back to the boundary prefix redirects into the last active
//! sub-route.
//!
//! ```
//! use hash_router::RouteConfig;
//!
//! // Stays active while the edit sub-tree changes; leaving past the
//! // boundary records a redirect back to the full edit path.
//! let config = RouteConfig::new("/home/pages/p1/info//edit/{id}/view")
//!     .on_enter(|_, _| {})
//!     .on_leave(|_, _| {});
//! ```
//!
//! The model is strictly synchronous and single-threaded: one navigation is
//! fully processed before the next can begin.

mod action;
mod change;
mod diff;
mod environment;
mod error;
mod pattern;
mod registry;
mod router;

pub use action::{Routable, RouteConfig, RoutingAction};
pub use change::{ChangeKind, NOT_FOUND_ROUTE, RouteChange};
pub use diff::{PathDiff, diff_paths};
pub use environment::{Environment, MemoryEnvironment};
pub use error::RouterError;
pub use pattern::{PathPattern, RouteParams};
pub use registry::Registry;
pub use router::{HASH_SENTINEL, Navigation, Router};
