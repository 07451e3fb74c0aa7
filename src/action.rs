//! Routing actions and their registration configuration.
//!
//! A [`RoutingAction`] is one registered route: a compiled path pattern plus
//! the lifecycle callbacks of the UI region it drives. Actions are built from
//! a [`RouteConfig`] by [`Router::add`](crate::Router::add), or from a
//! [`Routable`] capability object by
//! [`Router::add_routable`](crate::Router::add_routable).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::pattern::{PathPattern, RouteParams};

/// A shared lifecycle callback.
///
/// Callbacks are `FnMut` behind `Rc<RefCell<..>>`: the routing model is
/// strictly single-threaded, region callbacks usually mutate captured UI
/// state, and one configuration registered under several paths shares its
/// callbacks across all resulting actions.
pub(crate) type Callback = Rc<RefCell<dyn FnMut(&str, &RouteParams)>>;

fn callback(f: impl FnMut(&str, &RouteParams) + 'static) -> Callback {
	Rc::new(RefCell::new(f))
}

/// One registered route action.
///
/// Created by registration, mutated in place by the trigger engine (the
/// `active` flag of persistent actions), removed positionally through
/// [`Router::remove`](crate::Router::remove).
pub struct RoutingAction {
	pub(crate) pattern: PathPattern,
	pub(crate) enter: Option<Callback>,
	pub(crate) exit: Option<Callback>,
	pub(crate) enter_parent: Option<Callback>,
	pub(crate) exit_parent: Option<Callback>,
	pub(crate) persistence_boundary: usize,
	pub(crate) active: bool,
}

impl RoutingAction {
	/// Returns the stored route path (boundary marker collapsed).
	pub fn path(&self) -> &str {
		self.pattern.raw()
	}

	/// Returns the persistence boundary depth; 0 means non-persistent.
	pub fn persistence_boundary(&self) -> usize {
		self.persistence_boundary
	}

	/// Returns whether this persistent action is currently entered.
	///
	/// Never meaningful for non-persistent actions.
	pub fn is_active(&self) -> bool {
		self.active
	}

	pub(crate) fn is_persistent(&self) -> bool {
		self.persistence_boundary > 0
	}
}

impl fmt::Debug for RoutingAction {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RoutingAction")
			.field("path", &self.pattern.raw())
			.field("persistence_boundary", &self.persistence_boundary)
			.field("active", &self.active)
			.field("has_enter", &self.enter.is_some())
			.field("has_exit", &self.exit.is_some())
			.finish()
	}
}

/// Configuration consumed by [`Router::add`](crate::Router::add).
///
/// # Example
///
/// ```
/// use hash_router::RouteConfig;
///
/// let config = RouteConfig::new("/home/pages/{page}")
///     .on_enter(|path, params| println!("entered {path} ({params:?})"))
///     .on_leave(|path, _| println!("left {path}"));
/// ```
#[derive(Default)]
pub struct RouteConfig {
	pub(crate) paths: Vec<String>,
	pub(crate) enter: Option<Callback>,
	pub(crate) exit: Option<Callback>,
	pub(crate) enter_parent: Option<Callback>,
	pub(crate) exit_parent: Option<Callback>,
	pub(crate) persistent: Option<bool>,
}

impl RouteConfig {
	/// Creates a configuration for a single route path.
	pub fn new(path: impl Into<String>) -> Self {
		Self {
			paths: vec![path.into()],
			..Self::default()
		}
	}

	/// Creates a configuration shared by several route paths.
	///
	/// Every path produces its own action; the callbacks are shared.
	pub fn paths<I, S>(paths: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self {
			paths: paths.into_iter().map(Into::into).collect(),
			..Self::default()
		}
	}

	/// Sets the enter callback, invoked when the route becomes active.
	pub fn on_enter(mut self, f: impl FnMut(&str, &RouteParams) + 'static) -> Self {
		self.enter = Some(callback(f));
		self
	}

	/// Sets the exit callback, invoked when the route is lost.
	pub fn on_leave(mut self, f: impl FnMut(&str, &RouteParams) + 'static) -> Self {
		self.exit = Some(callback(f));
		self
	}

	/// Sets the enter-parent callback, invoked when a persistent action's
	/// parent boundary is re-entered while the action is still active.
	pub fn on_enter_parent(mut self, f: impl FnMut(&str, &RouteParams) + 'static) -> Self {
		self.enter_parent = Some(callback(f));
		self
	}

	/// Sets the exit-parent callback, invoked when navigation diverges below
	/// a persistent action's boundary without deactivating it. The callback
	/// receives the recorded redirect target.
	pub fn on_exit_parent(mut self, f: impl FnMut(&str, &RouteParams) + 'static) -> Self {
		self.exit_parent = Some(callback(f));
		self
	}

	/// Legacy persistence flag.
	///
	/// Prefer an explicit `//` boundary marker in the route path; this form
	/// emits a deprecation diagnostic at registration and defaults the
	/// boundary to 1.
	pub fn persistent(mut self, persistent: bool) -> Self {
		self.persistent = Some(persistent);
		self
	}
}

impl fmt::Debug for RouteConfig {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("RouteConfig")
			.field("paths", &self.paths)
			.field("persistent", &self.persistent)
			.field("has_enter", &self.enter.is_some())
			.field("has_exit", &self.exit.is_some())
			.finish()
	}
}

/// Capability object registered through
/// [`Router::add_routable`](crate::Router::add_routable).
///
/// Sugar over [`RouteConfig`] for types that own their routed region.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
///
/// use hash_router::{MemoryEnvironment, Routable, RouteParams, Router};
///
/// #[derive(Default)]
/// struct Page {
///     visible: bool,
/// }
///
/// impl Routable for Page {
///     fn on_route_enter(&mut self, _path: &str, _params: &RouteParams) {
///         self.visible = true;
///     }
///
///     fn on_route_leave(&mut self, _path: &str, _params: &RouteParams) {
///         self.visible = false;
///     }
/// }
///
/// let page = Rc::new(RefCell::new(Page::default()));
/// let mut router = Router::new(MemoryEnvironment::new());
/// router.add_routable("/home/routable/page/1", page.clone()).unwrap();
/// ```
pub trait Routable {
	/// Invoked when the routed region is entered.
	fn on_route_enter(&mut self, path: &str, params: &RouteParams);

	/// Invoked when the routed region is left.
	fn on_route_leave(&mut self, path: &str, params: &RouteParams);

	/// Whether the region persists below a boundary of depth 1.
	fn is_routed_persistently(&self) -> bool {
		false
	}
}

impl RouteConfig {
	/// Builds the configuration equivalent of a [`Routable`] registration.
	pub(crate) fn from_routable<R>(path: String, routable: Rc<RefCell<R>>) -> Self
	where
		R: Routable + 'static,
	{
		let persistent = routable.borrow().is_routed_persistently();
		let enter_target = Rc::clone(&routable);
		let leave_target = Rc::clone(&routable);

		let mut config = Self::new(path)
			.on_enter(move |path, params| enter_target.borrow_mut().on_route_enter(path, params))
			.on_leave(move |path, params| leave_target.borrow_mut().on_route_leave(path, params));
		if persistent {
			config = config.persistent(true);
		}
		config
	}
}
