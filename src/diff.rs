//! Path diffing: turning a previous/current path pair into ordered route
//! changes.
//!
//! Losses unwind depth-first (the innermost region exits before its parents)
//! while additions build breadth-first (the outer shell enters before inner
//! content), mirroring nested-region semantics.

use crate::change::{ChangeKind, RouteChange};

/// The ordered route changes produced by [`diff_paths`].
#[derive(Debug, Default)]
pub struct PathDiff {
	/// Lost prefixes, deepest first.
	pub lost: Vec<RouteChange>,
	/// Added prefixes, shallowest first.
	pub added: Vec<RouteChange>,
}

/// Compares two segment paths and produces the lost and added route changes.
///
/// The first index where the paths disagree (or where one of them ends) is
/// the point of divergence; every previous-path index from there on yields a
/// lost change at its cumulative prefix, and every current-path index from
/// there on yields an added change at its cumulative prefix. The deepest
/// change of each batch is the leaf.
///
/// Both lists are empty exactly when the two paths are identical.
pub fn diff_paths(previous: &[String], current: &[String]) -> PathDiff {
	PathDiff {
		lost: walk(ChangeKind::Lost, previous, current),
		added: walk(ChangeKind::Added, current, previous),
	}
}

/// Walks `side`, emitting one change per index from the point of divergence
/// with `other`. Lost changes are emitted shallowest-first and reversed so
/// the deepest loss triggers first; the leaf flag is placed on the deepest
/// change before the reversal.
fn walk(kind: ChangeKind, side: &[String], other: &[String]) -> Vec<RouteChange> {
	let mut changes = Vec::new();
	let mut prefix = String::new();
	let mut diverged = false;

	for (index, segment) in side.iter().enumerate() {
		prefix.push('/');
		prefix.push_str(segment);

		if !diverged && other.get(index) == Some(segment) {
			continue;
		}
		diverged = true;

		changes.push(RouteChange::new(kind, prefix.clone(), false));
	}

	if let Some(deepest) = changes.last_mut() {
		deepest.mark_leaf();
	}
	if kind == ChangeKind::Lost {
		changes.reverse();
	}

	changes
}
