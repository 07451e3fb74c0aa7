//! Route registry: the single mutable context shared by the differ and the
//! trigger engine.
//!
//! The original design kept this as a hidden module-level singleton; here it
//! is an explicit context object owned by the [`Router`](crate::Router) and
//! passed to the parts that need it. An application entry point may still
//! construct exactly one, but nothing in the core assumes a global.

use std::collections::HashMap;

use crate::action::RoutingAction;

/// Registered actions, the last fully-applied path, and the active redirect
/// overrides.
#[derive(Debug, Default)]
pub struct Registry {
	/// Registered actions; insertion order is trigger priority.
	pub(crate) actions: Vec<RoutingAction>,
	/// The last fully-applied path, split into segments, sentinel dropped.
	pub(crate) path: Vec<String>,
	/// Active redirects: origin path prefix to full target segments.
	///
	/// An entry is recorded when navigation diverges strictly below a
	/// persistence boundary and removed together with the action's `active`
	/// flag when the boundary is exited cleanly, never independently.
	pub(crate) overrides: HashMap<String, Vec<String>>,
}

impl Registry {
	/// Creates an empty registry.
	pub fn new() -> Self {
		Self::default()
	}

	/// Returns the registered actions in trigger order.
	pub fn actions(&self) -> &[RoutingAction] {
		&self.actions
	}

	/// Returns the last fully-applied path segments.
	pub fn current_path(&self) -> &[String] {
		&self.path
	}

	/// Returns the redirect target recorded for `origin`, if any.
	pub fn override_for(&self, origin: &str) -> Option<&[String]> {
		self.overrides.get(origin).map(Vec::as_slice)
	}

	/// Returns the number of active redirect overrides.
	pub fn override_count(&self) -> usize {
		self.overrides.len()
	}
}
