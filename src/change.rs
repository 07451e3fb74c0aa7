//! Route changes and the enter/exit trigger engine.
//!
//! A [`RouteChange`] is one pending transition event produced by the path
//! differ: an absolute path prefix that was either added to or lost from the
//! location. Triggering a change walks every registered action in
//! registration order and invokes the matching lifecycle callbacks, honoring
//! persistence boundaries and the `::not-found` fallback.

use crate::action::{Callback, RoutingAction};
use crate::pattern::RouteParams;
use crate::registry::Registry;

/// The literal route path applications register to receive unmatched
/// navigation callbacks.
pub const NOT_FOUND_ROUTE: &str = "::not-found";

/// Whether a route change adds a path prefix or loses one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
	/// The prefix is entered by the current navigation.
	Added,
	/// The prefix was left by the current navigation.
	Lost,
}

/// One pending transition event.
///
/// Immutable once constructed; consumed exactly once via
/// [`RouteChange::trigger`].
#[derive(Debug, Clone)]
pub struct RouteChange {
	kind: ChangeKind,
	path: String,
	is_leaf: bool,
}

impl RouteChange {
	pub(crate) fn new(kind: ChangeKind, path: String, is_leaf: bool) -> Self {
		Self {
			kind,
			path,
			is_leaf,
		}
	}

	pub(crate) fn mark_leaf(&mut self) {
		self.is_leaf = true;
	}

	/// Returns the change kind.
	pub fn kind(&self) -> ChangeKind {
		self.kind
	}

	/// Returns the absolute path prefix this change represents.
	pub fn path(&self) -> &str {
		&self.path
	}

	/// Whether this is the deepest change of its batch.
	///
	/// Only leaf changes trigger the `::not-found` fallback.
	pub fn is_leaf(&self) -> bool {
		self.is_leaf
	}

	/// Triggers the change against the registry.
	///
	/// `sibling_count` is the number of changes in the same lost/added batch;
	/// for lost changes it decides whether a divergence happened strictly
	/// below a persistence boundary.
	pub fn trigger(self, registry: &mut Registry, sibling_count: usize) {
		match self.kind {
			ChangeKind::Added => process_added(registry, &self.path, self.is_leaf),
			ChangeKind::Lost => process_lost(registry, &self.path, self.is_leaf, sibling_count),
		}
	}
}

fn process_added(registry: &mut Registry, path: &str, is_leaf: bool) {
	let mut matched = false;

	for action in registry.actions.iter_mut() {
		if action.enter.is_none() || !action.pattern.is_match(path) {
			continue;
		}

		if action.is_persistent() && action.active {
			// Boundary re-entry without re-activation. The pattern still
			// matched, so the fallback stays suppressed.
			if let Some(enter_parent) = action.enter_parent.clone() {
				let params = action.pattern.bind(path).unwrap_or_default();
				(enter_parent.borrow_mut())(path, &params);
			}
			matched = true;
			continue;
		}

		let Some(params) = action.pattern.bind(path) else {
			continue;
		};
		let Some(enter) = action.enter.clone() else {
			continue;
		};
		(enter.borrow_mut())(path, &params);
		matched = true;

		if action.is_persistent() {
			action.active = true;
		}
	}

	if !matched && is_leaf {
		process_not_found(&mut registry.actions, path, |action| action.enter.clone());
	}
}

fn process_lost(registry: &mut Registry, path: &str, is_leaf: bool, sibling_count: usize) {
	let mut matched = false;
	let Registry {
		actions,
		path: last_path,
		overrides,
	} = registry;

	for action in actions.iter_mut() {
		if action.exit.is_none() || !action.pattern.is_match(path) {
			continue;
		}
		let Some(params) = action.pattern.bind(path) else {
			continue;
		};

		if action.is_persistent() && sibling_count > action.persistence_boundary {
			// The divergence happened strictly below the boundary: the child
			// navigated away while the parent boundary stayed untouched.
			// Record a redirect from the boundary prefix back to the full
			// prior path and keep the action active.
			let origin = boundary_origin(last_path, action.persistence_boundary);
			let target = last_path.clone();
			let target_path = format!("/{}", target.join("/"));
			overrides.insert(origin, target);

			if let Some(exit_parent) = action.exit_parent.clone() {
				(exit_parent.borrow_mut())(&target_path, &params);
			}
			matched = true;
			continue;
		}

		if action.is_persistent() {
			// Clean boundary exit: the override and the active flag are
			// cleared together.
			let origin = boundary_origin(last_path, action.persistence_boundary);
			overrides.remove(&origin);
			action.active = false;
		}

		let Some(exit) = action.exit.clone() else {
			continue;
		};
		(exit.borrow_mut())(path, &params);
		matched = true;
	}

	if !matched && is_leaf {
		process_not_found(actions, path, |action| action.exit.clone());
	}
}

/// The boundary prefix of the last fully-applied path: the full path with
/// its trailing `boundary` segments sliced off.
fn boundary_origin(last_path: &[String], boundary: usize) -> String {
	let keep = last_path.len().saturating_sub(boundary);
	format!("/{}", last_path[..keep].join("/"))
}

/// Invokes the selected callback of every action registered for the
/// `::not-found` sentinel, passing the unmatched path and empty params.
fn process_not_found<F>(actions: &mut [RoutingAction], path: &str, select: F)
where
	F: Fn(&RoutingAction) -> Option<Callback>,
{
	let params = RouteParams::default();

	for action in actions.iter() {
		let Some(callback) = select(action) else {
			continue;
		};
		if !action.pattern.is_match(NOT_FOUND_ROUTE) {
			continue;
		}
		(callback.borrow_mut())(path, &params);
	}
}
