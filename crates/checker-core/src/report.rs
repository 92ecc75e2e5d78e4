//! Human-readable rendering of run results.

use crate::aggregator::NetworkReport;
use checker_types::Finding;
use serde::ser::{Serialize, SerializeStruct, Serializer};

pub const SUCCESS_LINE: &str = "Success! Configs have passed all checks.";
pub const FAILURE_LINE: &str = "Error! Please check the error message(s) above to correct the errors.";

/// Reports of every network in a run, in the order they were checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
	pub reports: Vec<NetworkReport>,
}

/// Serialized with the overall verdict ahead of the reports.
impl Serialize for RunOutcome {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("RunOutcome", 2)?;
		state.serialize_field("passed", &self.passed())?;
		state.serialize_field("reports", &self.reports)?;
		state.end()
	}
}

impl RunOutcome {
	/// True when every checked network passed.
	pub fn passed(&self) -> bool {
		self.reports.iter().all(|report| report.passed)
	}

	pub fn summary_line(&self) -> &'static str {
		if self.passed() {
			SUCCESS_LINE
		} else {
			FAILURE_LINE
		}
	}

	/// Every finding line followed by the summary line.
	pub fn render(&self) -> Vec<String> {
		let mut lines: Vec<String> = self.reports.iter().flat_map(render_report).collect();
		lines.push(self.summary_line().to_string());
		lines
	}
}

/// Joins entries as prose: `A`, `A and B`, `A, B and C`.
pub fn join_entries<S: AsRef<str>>(entries: &[S]) -> String {
	match entries {
		[] => String::new(),
		[only] => only.as_ref().to_string(),
		[init @ .., last] => {
			let head: Vec<&str> = init.iter().map(|e| e.as_ref()).collect();
			format!("{} and {}", head.join(", "), last.as_ref())
		}
	}
}

pub fn render_finding(file_name: &str, finding: &Finding) -> String {
	let mut line = format!(
		"[{}] {} {} ({}): {}",
		finding.severity, file_name, finding.section, finding.rule, finding.message
	);
	if !finding.entries.is_empty() {
		line.push_str(": ");
		line.push_str(&join_entries(&finding.entries));
	}
	line
}

pub fn render_report(report: &NetworkReport) -> Vec<String> {
	let file_name = report.network.document_file_name();
	let mut lines = Vec::new();
	if let Some(error) = &report.execution_error {
		lines.push(format!("[ERROR] {}: {}", file_name, error));
	}
	lines.extend(report.findings.iter().map(|finding| render_finding(&file_name, finding)));
	lines
}

#[cfg(test)]
mod tests {
	use super::*;
	use checker_types::{Network, ViolationKind};

	fn report(network: Network, findings: Vec<Finding>) -> NetworkReport {
		NetworkReport {
			network,
			passed: findings.is_empty(),
			findings,
			execution_error: None,
		}
	}

	#[test]
	fn test_join_entries() {
		assert_eq!(join_entries::<&str>(&[]), "");
		assert_eq!(join_entries(&["A"]), "A");
		assert_eq!(join_entries(&["A", "B"]), "A and B");
		assert_eq!(join_entries(&["A", "B", "C"]), "A, B and C");
	}

	#[test]
	fn test_render_finding() {
		let finding = Finding::new(
			"markets",
			"blacklisted_markets.not_prelaunch",
			ViolationKind::Overlap,
			vec!["BTC_USDT".to_string(), "ETH_USDT".to_string()],
			"blacklisted markets are also listed in prelaunch_markets",
		);
		assert_eq!(
			render_finding("mainnet.json", &finding),
			"[ERROR] mainnet.json markets (blacklisted_markets.not_prelaunch): \
			 blacklisted markets are also listed in prelaunch_markets: BTC_USDT and ETH_USDT"
		);
	}

	#[test]
	fn test_outcome_summary() {
		let passing = RunOutcome {
			reports: vec![report(Network::Testnet, vec![])],
		};
		assert!(passing.passed());
		assert_eq!(passing.render(), vec![SUCCESS_LINE.to_string()]);

		let failing = RunOutcome {
			reports: vec![
				report(Network::Testnet, vec![]),
				NetworkReport {
					network: Network::Devnet,
					passed: false,
					findings: vec![],
					execution_error: Some("File not found: configs/devnet.json".to_string()),
				},
			],
		};
		assert!(!failing.passed());
		let lines = failing.render();
		assert_eq!(lines[0], "[ERROR] devnet.json: File not found: configs/devnet.json");
		assert_eq!(lines.last().map(String::as_str), Some(FAILURE_LINE));
	}

	#[test]
	fn test_outcome_json_carries_verdict() {
		let failing = RunOutcome {
			reports: vec![
				report(Network::Testnet, vec![]),
				NetworkReport {
					network: Network::Mainnet,
					passed: false,
					findings: vec![],
					execution_error: Some("Reference source unhealthy: syncing".to_string()),
				},
			],
		};
		let json = serde_json::to_value(&failing).unwrap();
		assert_eq!(json["passed"], serde_json::json!(false));
		assert_eq!(json["reports"].as_array().unwrap().len(), 2);
		assert_eq!(json["reports"][0]["network"], serde_json::json!("testnet"));

		let passing = RunOutcome {
			reports: vec![report(Network::Testnet, vec![])],
		};
		assert_eq!(serde_json::to_value(&passing).unwrap()["passed"], serde_json::json!(true));
	}
}
