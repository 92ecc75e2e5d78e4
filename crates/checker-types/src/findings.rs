//! Validation findings.
//!
//! A [`Violation`] is what a primitive predicate returns: the kind of
//! failure and the offending entries in first-seen order. Section validators
//! turn violations into [`Finding`]s by attaching the section, the rule name
//! and a message.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Finding severity. Every rule currently reports at error level.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
	Error,
}

impl fmt::Display for Severity {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Severity::Error => f.write_str("ERROR"),
		}
	}
}

/// What kind of rule produced a violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ViolationKind {
	/// Entries missing from a reference set.
	InvalidEntry,
	/// Repeat occurrences; `count` is the number of excess occurrences.
	DuplicateEntry { count: usize },
	/// Entries present in a list they must not appear in.
	Overlap,
	/// Entries not matching a required format.
	PatternMismatch,
	/// A window whose end lies before its start.
	InvalidTimeWindow,
	/// A window whose end already lies in the past.
	ExpiredTimeWindow,
	/// A timestamp that could not be parsed.
	UnparseableTimestamp,
	/// A field that must be present is absent.
	MissingField,
	/// A field value that contradicts another part of the run.
	Mismatch,
}

impl ViolationKind {
	pub fn label(&self) -> &'static str {
		match self {
			ViolationKind::InvalidEntry => "invalid entry",
			ViolationKind::DuplicateEntry { .. } => "duplicate entry",
			ViolationKind::Overlap => "overlapping entry",
			ViolationKind::PatternMismatch => "pattern mismatch",
			ViolationKind::InvalidTimeWindow => "invalid time window",
			ViolationKind::ExpiredTimeWindow => "expired time window",
			ViolationKind::UnparseableTimestamp => "unparseable timestamp",
			ViolationKind::MissingField => "missing field",
			ViolationKind::Mismatch => "mismatch",
		}
	}
}

/// Raw output of a primitive predicate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
	pub kind: ViolationKind,
	pub entries: Vec<String>,
}

impl Violation {
	pub fn new(kind: ViolationKind, entries: Vec<String>) -> Self {
		Self { kind, entries }
	}

	/// Builds a violation from collected entries, or `None` when nothing was collected.
	pub fn from_entries(kind: ViolationKind, entries: Vec<String>) -> Option<Self> {
		if entries.is_empty() {
			None
		} else {
			Some(Self { kind, entries })
		}
	}
}

/// A single reported validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
	pub section: String,
	pub rule: String,
	pub kind: ViolationKind,
	pub severity: Severity,
	pub entries: Vec<String>,
	pub message: String,
}

impl Finding {
	pub fn new(
		section: impl Into<String>,
		rule: impl Into<String>,
		kind: ViolationKind,
		entries: Vec<String>,
		message: impl Into<String>,
	) -> Self {
		Self {
			section: section.into(),
			rule: rule.into(),
			kind,
			severity: Severity::Error,
			entries,
			message: message.into(),
		}
	}

	/// Wraps a predicate violation, keeping its kind and entries.
	pub fn from_violation(
		section: impl Into<String>,
		rule: impl Into<String>,
		violation: Violation,
		message: impl Into<String>,
	) -> Self {
		Self::new(section, rule, violation.kind, violation.entries, message)
	}

	/// Number of excess occurrences for duplicate findings.
	pub fn duplicate_count(&self) -> Option<usize> {
		match self.kind {
			ViolationKind::DuplicateEntry { count } => Some(count),
			_ => None,
		}
	}
}
