//! The router: registration API and navigation orchestration.
//!
//! [`Router`] owns the [`Registry`] and an [`Environment`]. Application code
//! registers actions through [`Router::add`] / [`Router::add_routable`]; the
//! host event loop calls [`Router::route_changed`] whenever the location
//! fragment changes. One navigation (all losses, the override check, all
//! additions, bookkeeping) is fully processed before the router can accept
//! another; `route_changed` takes `&mut self`, so re-entrancy is impossible
//! by construction.

use std::cell::RefCell;
use std::rc::Rc;

use crate::action::{Routable, RouteConfig, RoutingAction};
use crate::diff::diff_paths;
use crate::environment::Environment;
use crate::error::RouterError;
use crate::pattern::PathPattern;
use crate::registry::Registry;

/// The sentinel marker every recognized location fragment starts with.
pub const HASH_SENTINEL: &str = "#!";

/// The internal segment standing in for the repository root path `/`.
const ROOT_SEGMENT: &str = "root";

/// The outcome of one [`Router::route_changed`] cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Navigation {
	/// All losses and additions were triggered and the new path was stored.
	Completed,
	/// A redirect override interrupted the transition: the location was
	/// rewritten to the carried target and neither additions nor the stored
	/// path were touched. The host re-invokes [`Router::route_changed`] after
	/// the rewrite settles.
	Redirected(String),
}

/// Hierarchical path-segment router driving UI region lifecycle.
///
/// # Example
///
/// ```
/// use hash_router::{MemoryEnvironment, Navigation, RouteConfig, Router};
///
/// let mut router = Router::new(MemoryEnvironment::with_location("#!/home"));
/// router
///     .add(RouteConfig::new("/home").on_enter(|path, _| println!("entered {path}")))
///     .unwrap();
///
/// assert_eq!(router.route_changed().unwrap(), Navigation::Completed);
/// ```
#[derive(Debug)]
pub struct Router<E: Environment> {
	registry: Registry,
	env: E,
}

impl<E: Environment> Router<E> {
	/// Creates a router with an empty registry on top of `env`.
	pub fn new(env: E) -> Self {
		Self {
			registry: Registry::new(),
			env,
		}
	}

	/// Returns the registry.
	pub fn registry(&self) -> &Registry {
		&self.registry
	}

	/// Returns the environment.
	pub fn environment(&self) -> &E {
		&self.env
	}

	#[cfg(test)]
	pub(crate) fn into_registry(self) -> Registry {
		self.registry
	}

	/// Registers one action per configured path.
	///
	/// A single `//` marker inside a path starts the persisted boundary
	/// region: the marker is collapsed out of the stored pattern and the
	/// number of segments behind it becomes the action's persistence
	/// boundary. The legacy [`RouteConfig::persistent`] flag defaults the
	/// boundary to 1 and emits a deprecation diagnostic.
	///
	/// # Errors
	///
	/// Returns [`RouterError::TooManyBoundaries`] if a path contains more
	/// than one `//` marker, and [`RouterError::InvalidPattern`] if a path
	/// fails to compile; the registry is left untouched.
	pub fn add(&mut self, config: RouteConfig) -> Result<(), RouterError> {
		let mut actions = Vec::with_capacity(config.paths.len());
		for path in &config.paths {
			actions.push(build_action(path, &config)?);
		}
		self.registry.actions.extend(actions);
		Ok(())
	}

	/// Registers a [`Routable`] capability object under `path`.
	///
	/// Sugar over [`Router::add`]; the object's enter/leave methods become
	/// the action's callbacks and `is_routed_persistently` selects the legacy
	/// persistence flag.
	///
	/// # Errors
	///
	/// Propagates the same errors as [`Router::add`].
	pub fn add_routable<R>(
		&mut self,
		path: impl Into<String>,
		routable: Rc<RefCell<R>>,
	) -> Result<(), RouterError>
	where
		R: Routable + 'static,
	{
		self.add(RouteConfig::from_routable(path.into(), routable))
	}

	/// Removes the action at `index`.
	///
	/// # Panics
	///
	/// Panics if `index` is out of bounds; bounds are the caller's
	/// responsibility.
	pub fn remove(&mut self, index: usize) {
		self.registry.actions.remove(index);
	}

	/// Appends one segment to the current location.
	pub fn down(&mut self, segment: &str) {
		let hash = format!("{}/{}", self.env.location(), segment);
		self.env.set_location(&hash);
	}

	/// Drops the deepest segment of the current location.
	pub fn up(&mut self) {
		let location = self.env.location();
		let mut segments: Vec<&str> = location.split('/').collect();
		if !segments.is_empty() {
			segments.remove(0);
		}
		segments.pop();
		self.env
			.set_location(&format!("{HASH_SENTINEL}/{}", segments.join("/")));
	}

	/// Jumps to an absolute path.
	pub fn switch_to(&mut self, path: &str) {
		self.env.set_location(&format!("{HASH_SENTINEL}{path}"));
	}

	/// Re-applies the persisted backup path when the location is empty;
	/// otherwise dispatches a synthetic navigation event so the host
	/// processes the location it already has.
	pub fn restore(&mut self) {
		match self.env.restore() {
			Some(backup) if self.env.location().is_empty() => {
				self.env.set_location(&format!("{HASH_SENTINEL}{backup}"));
			}
			_ => self.env.dispatch_navigation(),
		}
	}

	/// Processes one navigation: reads the location, diffs it against the
	/// last fully-applied path, triggers all losses (deepest first), checks
	/// redirect overrides, triggers all additions (shallowest first), then
	/// stores and persists the new path.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidHashPath`] when the location does not
	/// start with the `#!` sentinel, before any registry mutation.
	pub fn route_changed(&mut self) -> Result<Navigation, RouterError> {
		let segments = self.current_path()?;

		let diff = diff_paths(&self.registry.path, &segments);

		let lost_count = diff.lost.len();
		for change in diff.lost {
			change.trigger(&mut self.registry, lost_count);
		}

		let current = format!("/{}", segments.join("/"));
		if let Some(target) = self.registry.overrides.get(&current) {
			let target_path = format!("/{}", target.join("/"));
			self.env
				.set_location(&format!("{HASH_SENTINEL}{target_path}"));
			return Ok(Navigation::Redirected(target_path));
		}

		let added_count = diff.added.len();
		for change in diff.added {
			change.trigger(&mut self.registry, added_count);
		}

		self.registry.path = segments;
		let backup = self.backup_path();
		self.env.persist(&backup);
		self.env.report_navigation(&backup);

		Ok(Navigation::Completed)
	}

	/// Reads and validates the current location, returning its segments with
	/// the sentinel dropped and the bare root normalized to [`ROOT_SEGMENT`].
	fn current_path(&self) -> Result<Vec<String>, RouterError> {
		let location = self.env.location();
		let location = if location.is_empty() {
			format!("{HASH_SENTINEL}/")
		} else {
			location
		};

		let mut segments: Vec<String> = location.split('/').map(str::to_string).collect();
		if segments.first().map(String::as_str) != Some(HASH_SENTINEL) {
			return Err(RouterError::InvalidHashPath(location));
		}
		segments.remove(0);

		if segments.len() == 1 && segments[0].is_empty() {
			segments[0] = ROOT_SEGMENT.to_string();
		}

		Ok(segments)
	}

	/// The path string persisted as backup; the internal root segment is
	/// stored as `/`.
	fn backup_path(&self) -> String {
		if self.registry.path.len() == 1 && self.registry.path[0] == ROOT_SEGMENT {
			"/".to_string()
		} else {
			format!("/{}", self.registry.path.join("/"))
		}
	}
}

/// Builds one action from a configured path, resolving the persistence
/// boundary marker and the legacy persistence flag.
fn build_action(path: &str, config: &RouteConfig) -> Result<RoutingAction, RouterError> {
	let parts: Vec<&str> = path.split("//").collect();
	if parts.len() > 2 {
		return Err(RouterError::TooManyBoundaries {
			path: path.to_string(),
		});
	}

	let has_marker = parts.len() == 2;
	let (stored, mut boundary) = if has_marker {
		let boundary = parts[1].split('/').filter(|s| !s.is_empty()).count();
		(format!("{}/{}", parts[0], parts[1]), boundary)
	} else {
		(path.to_string(), 0)
	};

	if let Some(persistent) = config.persistent {
		if has_marker {
			tracing::warn!(
				path,
				"route combines a persistence boundary marker with the legacy persistent flag; the marker wins"
			);
		}
		tracing::warn!(
			path,
			"the persistent flag is deprecated; mark the boundary with // in the route path"
		);
		if persistent && !has_marker {
			boundary = 1;
		}
	}

	Ok(RoutingAction {
		pattern: PathPattern::compile(&stored)?,
		enter: config.enter.clone(),
		exit: config.exit.clone(),
		enter_parent: config.enter_parent.clone(),
		exit_parent: config.exit_parent.clone(),
		persistence_boundary: boundary,
		active: false,
	})
}

#[cfg(test)]
mod tests {
	use tracing_test::traced_test;

	use super::*;
	use crate::environment::MemoryEnvironment;

	fn router() -> Router<MemoryEnvironment> {
		Router::new(MemoryEnvironment::with_location("#!/start"))
	}

	#[test]
	fn add_creates_one_action_per_path() {
		let mut router = router();
		router
			.add(RouteConfig::paths(["/", "/home"]).on_enter(|_, _| {}))
			.unwrap();

		assert_eq!(router.registry().actions().len(), 2);
		assert_eq!(router.registry().actions()[0].path(), "/");
		assert_eq!(router.registry().actions()[1].path(), "/home");
	}

	#[test]
	fn add_collapses_the_boundary_marker() {
		let mut router = router();
		router
			.add(RouteConfig::new("/test/124//hot/stuff").on_enter(|_, _| {}))
			.unwrap();

		let action = &router.registry().actions()[0];
		assert_eq!(action.path(), "/test/124/hot/stuff");
		assert_eq!(action.persistence_boundary(), 2);
	}

	#[test]
	fn add_rejects_multiple_boundary_markers() {
		let mut router = router();
		let result = router.add(RouteConfig::new("/test//124/ab//next").on_enter(|_, _| {}));

		assert!(matches!(
			result,
			Err(RouterError::TooManyBoundaries { .. })
		));
		assert!(router.registry().actions().is_empty());
	}

	#[test]
	fn legacy_persistent_flag_defaults_the_boundary_to_one() {
		let mut router = router();
		router
			.add(
				RouteConfig::new("/home/pages/p1/info")
					.persistent(true)
					.on_enter(|_, _| {}),
			)
			.unwrap();

		assert_eq!(router.registry().actions()[0].persistence_boundary(), 1);
	}

	#[traced_test]
	#[test]
	fn legacy_persistent_flag_warns_once() {
		let mut router = router();
		router
			.add(
				RouteConfig::new("/home/pages/p1/info")
					.persistent(true)
					.on_enter(|_, _| {}),
			)
			.unwrap();

		assert!(logs_contain("the persistent flag is deprecated"));
		assert!(!logs_contain("the marker wins"));
	}

	#[traced_test]
	#[test]
	fn combining_the_flag_with_a_marker_warns_twice() {
		let mut router = router();
		router
			.add(
				RouteConfig::new("/test/warn//persistent/sub")
					.persistent(true)
					.on_enter(|_, _| {}),
			)
			.unwrap();

		logs_assert(|lines: &[&str]| {
			let warnings = lines
				.iter()
				.filter(|line| line.contains("persistent flag"))
				.count();
			match warnings {
				2 => Ok(()),
				n => Err(format!("expected 2 deprecation warnings, got {n}")),
			}
		});
	}

	#[test]
	fn marker_wins_over_the_legacy_flag() {
		let mut router = router();
		router
			.add(
				RouteConfig::new("/test/warn//persistent/sub")
					.persistent(true)
					.on_enter(|_, _| {}),
			)
			.unwrap();

		let action = &router.registry().actions()[0];
		assert_eq!(action.path(), "/test/warn/persistent/sub");
		assert_eq!(action.persistence_boundary(), 2);
	}

	#[test]
	fn remove_drops_the_action_at_the_index() {
		let mut router = router();
		router
			.add(RouteConfig::paths(["/a", "/b", "/c"]).on_enter(|_, _| {}))
			.unwrap();

		router.remove(1);

		let paths: Vec<_> = router
			.registry()
			.actions()
			.iter()
			.map(RoutingAction::path)
			.collect();
		assert_eq!(paths, ["/a", "/c"]);
	}

	#[test]
	fn down_appends_a_segment() {
		let mut router = router();
		router.down("second");

		assert_eq!(router.environment().location(), "#!/start/second");
	}

	#[test]
	fn up_drops_the_deepest_segment() {
		let mut router = Router::new(MemoryEnvironment::with_location("#!/home/pages/p2"));
		router.up();

		assert_eq!(router.environment().location(), "#!/home/pages");
	}

	#[test]
	fn switch_to_jumps_to_an_absolute_path() {
		let mut router = router();
		router.switch_to("/test/path");

		assert_eq!(router.environment().location(), "#!/test/path");
	}

	#[test]
	fn restore_reapplies_the_backup_when_the_location_is_empty() {
		let mut env = MemoryEnvironment::new();
		env.persist("/backed/path/in/storage");
		let mut router = Router::new(env);

		router.restore();

		assert_eq!(
			router.environment().location(),
			"#!/backed/path/in/storage"
		);
		assert_eq!(router.environment().dispatch_count(), 0);
	}

	#[test]
	fn restore_dispatches_when_a_location_is_already_set() {
		let mut env = MemoryEnvironment::with_location("#!/test/path/a1");
		env.persist("/backed/path");
		let mut router = Router::new(env);

		router.restore();

		assert_eq!(router.environment().location(), "#!/test/path/a1");
		assert_eq!(router.environment().dispatch_count(), 1);
	}

	#[test]
	fn restore_dispatches_when_there_is_no_backup() {
		let mut router = Router::new(MemoryEnvironment::new());

		router.restore();

		assert_eq!(router.environment().location(), "");
		assert_eq!(router.environment().dispatch_count(), 1);
	}

	#[test]
	fn route_changed_rejects_a_location_without_the_sentinel() {
		let mut router = Router::new(MemoryEnvironment::with_location("/home/pages"));
		router
			.add(RouteConfig::new("/home").on_enter(|_, _| {}))
			.unwrap();

		let result = router.route_changed();

		assert!(matches!(result, Err(RouterError::InvalidHashPath(_))));
		assert!(router.registry().current_path().is_empty());
	}

	#[test]
	fn an_empty_location_is_the_root_path() {
		let mut router = Router::new(MemoryEnvironment::new());
		assert_eq!(router.route_changed().unwrap(), Navigation::Completed);

		assert_eq!(router.registry().current_path(), ["root"]);
		assert_eq!(router.environment().backup(), Some("/"));
	}
}
