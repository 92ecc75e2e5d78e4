//! Folds validator output into a per-network verdict.

use checker_types::{Finding, Network};
use serde::Serialize;
use std::fmt::Display;

/// Outcome of checking one network.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NetworkReport {
	pub network: Network,
	pub passed: bool,
	pub findings: Vec<Finding>,
	/// Set when the network could not be validated at all.
	#[serde(skip_serializing_if = "Option::is_none")]
	pub execution_error: Option<String>,
}

/// Accumulates findings for one network.
///
/// The verdict starts as passed and, once failed, stays failed.
#[derive(Debug)]
pub struct FindingAggregator {
	network: Network,
	passed: bool,
	findings: Vec<Finding>,
	execution_error: Option<String>,
}

impl FindingAggregator {
	pub fn new(network: Network) -> Self {
		Self {
			network,
			passed: true,
			findings: Vec::new(),
			execution_error: None,
		}
	}

	pub fn record<I>(&mut self, findings: I)
	where
		I: IntoIterator<Item = Finding>,
	{
		let before = self.findings.len();
		self.findings.extend(findings);
		if self.findings.len() > before {
			self.passed = false;
		}
	}

	/// Marks the network as not validated.
	pub fn fail_execution(&mut self, error: impl Display) {
		self.passed = false;
		self.execution_error = Some(error.to_string());
	}

	pub fn passed(&self) -> bool {
		self.passed
	}

	pub fn finish(self) -> NetworkReport {
		NetworkReport {
			network: self.network,
			passed: self.passed,
			findings: self.findings,
			execution_error: self.execution_error,
		}
	}
}
