//! The environment boundary: platform collaborators the router core invokes.
//!
//! Reading and writing the location fragment, persisting the last known path,
//! dispatching a synthetic navigation event, and analytics reporting are all
//! environment concerns. The core only ever talks to them through
//! [`Environment`]; a platform backend (browser history, desktop shell)
//! implements the trait, and [`MemoryEnvironment`] serves tests and headless
//! embedders.

/// Platform collaborators of the router, specified at their interface.
pub trait Environment {
	/// Returns the current location fragment (for example `#!/home/pages`),
	/// or an empty string when none is set.
	fn location(&self) -> String;

	/// Rewrites the location fragment.
	///
	/// Platform backends are expected to re-fire navigation afterwards, the
	/// way a `hashchange` listener would.
	fn set_location(&mut self, hash: &str);

	/// Persists the last fully-applied path to durable storage.
	fn persist(&mut self, path: &str);

	/// Returns the persisted path, if any.
	fn restore(&self) -> Option<String>;

	/// Dispatches a synthetic navigation event, forcing the host to process
	/// the current location again.
	fn dispatch_navigation(&mut self) {}

	/// Reports a completed navigation to an analytics collaborator.
	fn report_navigation(&mut self, _path: &str) {}
}

/// In-memory [`Environment`] for tests and headless embedders.
///
/// Holds the location fragment, the persisted backup, and a counter of
/// dispatched synthetic navigation events.
#[derive(Debug, Clone, Default)]
pub struct MemoryEnvironment {
	hash: String,
	backup: Option<String>,
	dispatched: usize,
	reported: Vec<String>,
}

impl MemoryEnvironment {
	/// Creates an environment with an empty location.
	pub fn new() -> Self {
		Self::default()
	}

	/// Creates an environment with a preset location fragment.
	pub fn with_location(hash: impl Into<String>) -> Self {
		Self {
			hash: hash.into(),
			..Self::default()
		}
	}

	/// Returns the persisted backup path, if any.
	pub fn backup(&self) -> Option<&str> {
		self.backup.as_deref()
	}

	/// Returns how many synthetic navigation events were dispatched.
	pub fn dispatch_count(&self) -> usize {
		self.dispatched
	}

	/// Returns the paths reported to the analytics hook, in order.
	pub fn reported(&self) -> &[String] {
		&self.reported
	}
}

impl Environment for MemoryEnvironment {
	fn location(&self) -> String {
		self.hash.clone()
	}

	fn set_location(&mut self, hash: &str) {
		self.hash = hash.to_string();
	}

	fn persist(&mut self, path: &str) {
		self.backup = Some(path.to_string());
	}

	fn restore(&self) -> Option<String> {
		self.backup.clone()
	}

	fn dispatch_navigation(&mut self) {
		self.dispatched += 1;
	}

	fn report_navigation(&mut self, path: &str) {
		self.reported.push(path.to_string());
	}
}
