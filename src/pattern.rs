//! Path pattern compilation and parameter binding.
//!
//! A route pattern is a slash-delimited path where `{name}` placeholders
//! capture one segment each and a leading `*` matches any prefix:
//!
//! ```
//! use hash_router::PathPattern;
//!
//! let pattern = PathPattern::compile("/castle/{id}/room/{room_id}").unwrap();
//! let params = pattern.bind("/castle/7/room/kitchen").unwrap();
//!
//! assert_eq!(params.get("id"), Some("7"));
//! assert_eq!(params.get("room_id"), Some("kitchen"));
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::RouterError;

/// Matches one `{name}` placeholder inside a route pattern.
static PLACEHOLDER: Lazy<Regex> =
	Lazy::new(|| Regex::new(r"\{[\w-]+\}").expect("placeholder regex is valid"));

/// One placeholder captures a single path segment: everything up to the next
/// separator, excluding the query and fragment markers that may trail a hash
/// path.
const SEGMENT_CAPTURE: &str = "([^/#?]+)";

/// Parameters bound from a matched path, in pattern order.
///
/// Keeps the left-to-right placeholder order alongside name lookup, so both
/// positional and named access stay consistent with the pattern.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RouteParams {
	entries: Vec<(String, String)>,
}

impl RouteParams {
	/// Returns the value bound to `name`.
	pub fn get(&self, name: &str) -> Option<&str> {
		self.entries
			.iter()
			.find(|(key, _)| key == name)
			.map(|(_, value)| value.as_str())
	}

	/// Returns the number of bound parameters.
	pub fn len(&self) -> usize {
		self.entries.len()
	}

	/// Returns whether no parameters were bound.
	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	/// Iterates over `(name, value)` pairs in pattern order.
	pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
		self.entries
			.iter()
			.map(|(key, value)| (key.as_str(), value.as_str()))
	}
}

/// A compiled route pattern: an anchored matcher plus the ordered list of
/// placeholder names.
#[derive(Debug, Clone)]
pub struct PathPattern {
	raw: String,
	regex: Regex,
	param_names: Vec<String>,
}

impl PathPattern {
	/// Compiles a route pattern.
	///
	/// A bare `/` is treated as the literal segment `/root` so the repository
	/// root never produces an ambiguous anchor. A leading `*` expands to
	/// "match any prefix"; every `{name}` placeholder becomes a single-segment
	/// capture group; everything else matches literally. The whole pattern is
	/// anchored at both ends.
	///
	/// # Errors
	///
	/// Returns [`RouterError::InvalidPattern`] if the assembled matcher fails
	/// to compile.
	pub fn compile(raw: &str) -> Result<Self, RouterError> {
		let pattern = if raw == "/" { "/root" } else { raw };
		let (wildcard, rest) = match pattern.strip_prefix('*') {
			Some(rest) => (true, rest),
			None => (false, pattern),
		};

		let mut source = String::from("^");
		if wildcard {
			source.push_str(".*");
		}

		let mut param_names = Vec::new();
		let mut literal_start = 0;
		for found in PLACEHOLDER.find_iter(rest) {
			source.push_str(&regex::escape(&rest[literal_start..found.start()]));
			source.push_str(SEGMENT_CAPTURE);
			param_names.push(rest[found.start() + 1..found.end() - 1].to_string());
			literal_start = found.end();
		}
		source.push_str(&regex::escape(&rest[literal_start..]));
		source.push('$');

		let regex = Regex::new(&source).map_err(|source| RouterError::InvalidPattern {
			pattern: raw.to_string(),
			source,
		})?;

		Ok(Self {
			raw: raw.to_string(),
			regex,
			param_names,
		})
	}

	/// Returns the raw pattern this matcher was compiled from.
	pub fn raw(&self) -> &str {
		&self.raw
	}

	/// Returns the placeholder names in left-to-right order.
	pub fn param_names(&self) -> &[String] {
		&self.param_names
	}

	/// Checks whether `path` matches this pattern.
	pub fn is_match(&self, path: &str) -> bool {
		self.regex.is_match(path)
	}

	/// Binds the capture groups of a matching `path` to the placeholder
	/// names, by position. Group 0 (the whole match) is discarded.
	///
	/// Returns `None` when the path does not match, or when the capture count
	/// disagrees with the compiled names: a compiler/matcher mismatch that
	/// must never occur for patterns that passed [`PathPattern::compile`].
	pub fn bind(&self, path: &str) -> Option<RouteParams> {
		let captures = self.regex.captures(path)?;

		if captures.len() - 1 != self.param_names.len() {
			tracing::error!(
				pattern = %self.raw,
				path,
				captures = captures.len() - 1,
				names = self.param_names.len(),
				"capture count does not match compiled parameter names"
			);
			return None;
		}

		let entries = self
			.param_names
			.iter()
			.enumerate()
			.map(|(index, name)| {
				let value = captures
					.get(index + 1)
					.map(|group| group.as_str().to_string())
					.unwrap_or_default();
				(name.clone(), value)
			})
			.collect();

		Some(RouteParams { entries })
	}
}
