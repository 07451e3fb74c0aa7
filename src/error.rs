//! Error types for route registration and navigation.

use thiserror::Error;

/// Errors raised by route registration and navigation processing.
#[derive(Debug, Error)]
pub enum RouterError {
	/// A route path contained more than one `//` persistence boundary marker.
	///
	/// An action can persist below at most one boundary; registration fails
	/// without touching the registry.
	#[error("route path {path:?} contains more than one persistence boundary marker")]
	TooManyBoundaries {
		/// The offending route path as submitted.
		path: String,
	},

	/// The incoming location did not start with the `#!` sentinel.
	///
	/// Raised before any diff or trigger work begins; the registry is left
	/// untouched.
	#[error("invalid hash path {0:?}: expected a leading #! marker")]
	InvalidHashPath(String),

	/// A route pattern failed to compile into a matcher.
	#[error("invalid route pattern {pattern:?}")]
	InvalidPattern {
		/// The pattern as submitted.
		pattern: String,
		/// The underlying matcher error.
		source: regex::Error,
	},
}
