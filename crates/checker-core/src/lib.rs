//! Run orchestration for the config checker.
//!
//! For every requested network the [`Orchestrator`] loads the config
//! document, builds a reference snapshot from that network's source, runs the
//! section validators and folds their findings into a [`NetworkReport`].
//! Networks are processed one at a time and never affect each other.

pub mod aggregator;
pub mod error;
pub mod report;

pub use aggregator::{FindingAggregator, NetworkReport};
pub use error::CoreError;
pub use report::{join_entries, render_finding, render_report, RunOutcome};

use checker_config::DocumentLoader;
use checker_reference::{SnapshotBuilder, SourceRegistry};
use checker_rules::{SectionValidator, ValidationContext, ValidatorRegistry};
use checker_types::{Network, ReferenceSource};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info, info_span, Instrument};

pub struct Orchestrator {
	documents: DocumentLoader,
	sources: SourceRegistry,
	validators: ValidatorRegistry,
	now: Option<DateTime<Utc>>,
}

impl Orchestrator {
	pub fn builder() -> OrchestratorBuilder {
		OrchestratorBuilder::new()
	}

	/// Checks `networks` in the given order.
	///
	/// # Errors
	///
	/// Fails before touching any network if one of them has no registered
	/// reference source.
	pub async fn run(&self, networks: &[Network]) -> Result<RunOutcome, CoreError> {
		let mut sources = Vec::with_capacity(networks.len());
		for &network in networks {
			let source = self
				.sources
				.get(network)
				.ok_or(CoreError::MissingSource(network))?;
			sources.push((network, source));
		}

		let mut reports = Vec::with_capacity(sources.len());
		for (network, source) in sources {
			let span = info_span!("network", network = %network);
			let report = self.check_network(network, source).instrument(span).await;
			reports.push(report);
		}

		Ok(RunOutcome { reports })
	}

	async fn check_network(&self, network: Network, source: Arc<dyn ReferenceSource>) -> NetworkReport {
		let file_name = network.document_file_name();
		info!("Checking {}", file_name);
		let mut aggregator = FindingAggregator::new(network);

		let document = match self.documents.load(network).await {
			Ok(document) => document,
			Err(e) => {
				error!("{} is not a valid document: {}", file_name, e);
				aggregator.fail_execution(e);
				return aggregator.finish();
			}
		};

		let snapshot = match SnapshotBuilder::build(source.as_ref()).await {
			Ok(snapshot) => snapshot,
			Err(e) => {
				error!("Skipping {}: {}", file_name, e);
				aggregator.fail_execution(e);
				return aggregator.finish();
			}
		};

		let ctx = ValidationContext::new(&snapshot, self.now.unwrap_or_else(Utc::now));
		let findings = self.validators.run(&document, &ctx);
		for finding in &findings {
			error!(
				section = %finding.section,
				rule = %finding.rule,
				kind = finding.kind.label(),
				"{}",
				render_finding(&file_name, finding)
			);
		}
		aggregator.record(findings);

		let report = aggregator.finish();
		info!(
			passed = report.passed,
			findings = report.findings.len(),
			"Finished {}",
			file_name
		);
		report
	}
}

/// Builder for creating an Orchestrator instance
pub struct OrchestratorBuilder {
	config_dir: Option<PathBuf>,
	sources: Vec<Arc<dyn ReferenceSource>>,
	validators: Vec<Box<dyn SectionValidator>>,
	now: Option<DateTime<Utc>>,
}

impl OrchestratorBuilder {
	pub fn new() -> Self {
		Self {
			config_dir: None,
			sources: Vec::new(),
			validators: Vec::new(),
			now: None,
		}
	}

	pub fn with_config_dir(mut self, config_dir: impl Into<PathBuf>) -> Self {
		self.config_dir = Some(config_dir.into());
		self
	}

	pub fn with_source(mut self, source: Arc<dyn ReferenceSource>) -> Self {
		self.sources.push(source);
		self
	}

	/// Adds a validator after the built-in ones.
	pub fn with_validator(mut self, validator: Box<dyn SectionValidator>) -> Self {
		self.validators.push(validator);
		self
	}

	/// Pins the time used by checks against "now".
	pub fn with_now(mut self, now: DateTime<Utc>) -> Self {
		self.now = Some(now);
		self
	}

	pub fn build(self) -> Result<Orchestrator, CoreError> {
		let config_dir = self.config_dir.ok_or_else(|| {
			CoreError::Configuration("No config directory provided".to_string())
		})?;

		let mut sources = SourceRegistry::new();
		for source in self.sources {
			sources
				.register(source)
				.map_err(|e| CoreError::Configuration(e.to_string()))?;
		}

		let mut validators = ValidatorRegistry::with_defaults();
		for validator in self.validators {
			validators.register(validator)?;
		}

		Ok(Orchestrator {
			documents: DocumentLoader::new(config_dir),
			sources,
			validators,
			now: self.now,
		})
	}
}

impl Default for OrchestratorBuilder {
	fn default() -> Self {
		Self::new()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use checker_config::ConfigDocument;
	use checker_reference::{ReferenceDump, StaticSource};
	use checker_types::{BridgeKind, BridgeRecord, Finding, MarketRecord, TokenRecord, ViolationKind};
	use chrono::TimeZone;
	use std::path::Path;

	fn dump() -> ReferenceDump {
		ReferenceDump {
			markets: ["BTC_USDT", "ETH_USDT", "ETH_PERP"]
				.iter()
				.map(|id| MarketRecord {
					id: id.to_string(),
					name: id.replace('_', " / "),
				})
				.collect(),
			pools: vec!["1".to_string(), "2".to_string()],
			tokens: [("swth", "SWTH"), ("swth/abc", "ABC"), ("usdc", "USDC")]
				.iter()
				.map(|(denom, symbol)| TokenRecord {
					denom: denom.to_string(),
					symbol: symbol.to_string(),
				})
				.collect(),
			bridges: vec![
				BridgeRecord {
					kind: BridgeKind::Ibc,
					chain_name: "Osmosis".to_string(),
					bridge_name: "IBC".to_string(),
					identifiers: vec!["channel-0".to_string()],
					enabled: true,
				},
				BridgeRecord {
					kind: BridgeKind::Polynetwork,
					chain_name: "Ethereum".to_string(),
					bridge_name: "PolyNetwork".to_string(),
					identifiers: vec!["0x5FbDB2315678afecb367f032d93F642f64180aa3".to_string()],
					enabled: true,
				},
			],
			min_gas_price_denoms: vec!["swth".to_string()],
			perp_pool_ids: vec!["1".to_string(), "2".to_string()],
			healthy: None,
		}
	}

	fn source(network: Network) -> Arc<dyn ReferenceSource> {
		Arc::new(StaticSource::new(network, dump()))
	}

	fn write_document(dir: &Path, network: Network, json: &str) {
		std::fs::write(dir.join(network.document_file_name()), json).unwrap();
	}

	fn orchestrator(dir: &Path, networks: &[Network]) -> Orchestrator {
		let mut builder = Orchestrator::builder()
			.with_config_dir(dir)
			.with_now(Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap());
		for &network in networks {
			builder = builder.with_source(source(network));
		}
		builder.build().unwrap()
	}

	async fn run_single(json: &str) -> NetworkReport {
		let dir = tempfile::tempdir().unwrap();
		write_document(dir.path(), Network::Testnet, json);
		let outcome = orchestrator(dir.path(), &[Network::Testnet])
			.run(&[Network::Testnet])
			.await
			.unwrap();
		outcome.reports.into_iter().next().unwrap()
	}

	#[tokio::test]
	async fn test_blacklisted_market_also_prelaunch() {
		let report =
			run_single(r#"{"blacklisted_markets": ["BTC_USDT"], "prelaunch_markets": ["BTC_USDT"]}"#).await;

		assert!(!report.passed);
		assert_eq!(report.findings.len(), 1);
		assert_eq!(report.findings[0].kind, ViolationKind::Overlap);
		assert_eq!(report.findings[0].entries, vec!["BTC_USDT"]);
	}

	#[tokio::test]
	async fn test_duplicate_blacklisted_token() {
		let report = run_single(r#"{"blacklisted_tokens": ["swth/abc", "swth/abc"]}"#).await;

		assert!(!report.passed);
		assert_eq!(report.findings.len(), 1);
		assert_eq!(report.findings[0].duplicate_count(), Some(1));
		assert_eq!(report.findings[0].entries, vec!["swth/abc"]);
	}

	#[tokio::test]
	async fn test_unknown_external_chain() {
		let report = run_single(r#"{"external_chain_channels": {"Ethereum": {"Arbitrum": "channel-12"}}}"#).await;

		assert!(!report.passed);
		let rules: Vec<&str> = report.findings.iter().map(|f| f.rule.as_str()).collect();
		assert_eq!(rules, vec!["chains.valid"]);
		assert!(report.findings[0].entries.contains(&"Arbitrum".to_string()));
	}

	#[tokio::test]
	async fn test_inverted_perp_pool_promo_window() {
		let report = run_single(
			r#"{"perp_pool_promo": {"7": {"start": "2024-01-10", "end": "2024-01-01", "perpPoolDepositBoost": "1.5"}}}"#,
		)
		.await;

		assert!(!report.passed);
		let window: Vec<&Finding> = report
			.findings
			.iter()
			.filter(|f| f.kind == ViolationKind::InvalidTimeWindow)
			.collect();
		assert_eq!(window.len(), 1);
		assert_eq!(window[0].entries, vec!["7"]);
	}

	#[tokio::test]
	async fn test_empty_document_passes() {
		let report = run_single("{}").await;

		assert!(report.passed);
		assert!(report.findings.is_empty());
		assert!(report.execution_error.is_none());
	}

	#[tokio::test]
	async fn test_failed_network_does_not_affect_others() {
		let dir = tempfile::tempdir().unwrap();
		write_document(dir.path(), Network::Testnet, r#"{"blacklisted_tokens": ["nope"]}"#);
		write_document(dir.path(), Network::Localhost, "{ definitely not json");
		write_document(dir.path(), Network::Devnet, "{}");
		write_document(dir.path(), Network::Mainnet, r#"{"demex_points_config": {"depositsPerSpin": 1, "tradingVolumePerSpin": 1}}"#);

		let unhealthy = ReferenceDump {
			healthy: Some(false),
			..dump()
		};
		let orchestrator = Orchestrator::builder()
			.with_config_dir(dir.path())
			.with_source(source(Network::Testnet))
			.with_source(source(Network::Localhost))
			.with_source(source(Network::Mainnet))
			.with_source(Arc::new(StaticSource::new(Network::Devnet, unhealthy)))
			.build()
			.unwrap();

		let networks = [Network::Testnet, Network::Localhost, Network::Devnet, Network::Mainnet];
		let outcome = orchestrator.run(&networks).await.unwrap();

		let verdicts: Vec<(Network, bool)> =
			outcome.reports.iter().map(|r| (r.network, r.passed)).collect();
		assert_eq!(
			verdicts,
			vec![
				(Network::Testnet, false),
				(Network::Localhost, false),
				(Network::Devnet, false),
				(Network::Mainnet, true),
			]
		);
		assert!(outcome.reports[0].execution_error.is_none());
		assert!(outcome.reports[1]
			.execution_error
			.as_deref()
			.unwrap()
			.contains("Parse error"));
		assert!(outcome.reports[2]
			.execution_error
			.as_deref()
			.unwrap()
			.contains("unhealthy"));
		assert!(!outcome.passed());
	}

	#[tokio::test]
	async fn test_missing_document_is_execution_error() {
		let dir = tempfile::tempdir().unwrap();
		let outcome = orchestrator(dir.path(), &[Network::Devnet])
			.run(&[Network::Devnet])
			.await
			.unwrap();

		let report = &outcome.reports[0];
		assert!(!report.passed);
		assert!(report.execution_error.as_deref().unwrap().contains("devnet.json"));
	}

	#[tokio::test]
	async fn test_runs_are_repeatable() {
		let dir = tempfile::tempdir().unwrap();
		write_document(
			dir.path(),
			Network::Testnet,
			r#"{"blacklisted_markets": ["BTC_USDT", "XRP_USDT"], "featured_markets": ["BTC_USDT"],
			    "typeform_widget_config": [{"surveyLink": "https://s", "endTime": "2024-01-01"}]}"#,
		);
		let orchestrator = orchestrator(dir.path(), &[Network::Testnet]);

		let first = orchestrator.run(&[Network::Testnet]).await.unwrap();
		let second = orchestrator.run(&[Network::Testnet]).await.unwrap();
		assert_eq!(first, second);
		assert_eq!(
			serde_json::to_string(&first).unwrap(),
			serde_json::to_string(&second).unwrap()
		);
	}

	#[tokio::test]
	async fn test_missing_source_aborts_run() {
		let dir = tempfile::tempdir().unwrap();
		write_document(dir.path(), Network::Testnet, "{}");
		let orchestrator = orchestrator(dir.path(), &[Network::Testnet]);

		let result = orchestrator.run(&[Network::Testnet, Network::Mainnet]).await;
		assert!(matches!(result, Err(CoreError::MissingSource(Network::Mainnet))));
	}

	struct ExtraMarketsCheck;

	impl SectionValidator for ExtraMarketsCheck {
		fn name(&self) -> &'static str {
			"markets"
		}

		fn applies(&self, _: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
			false
		}

		fn validate(&self, _: &ConfigDocument, _: &ValidationContext<'_>) -> Vec<Finding> {
			Vec::new()
		}
	}

	#[test]
	fn test_builder_rejects_duplicate_validator() {
		let result = Orchestrator::builder()
			.with_config_dir("configs")
			.with_validator(Box::new(ExtraMarketsCheck))
			.build();
		assert!(matches!(result, Err(CoreError::DuplicateValidator(name)) if name == "markets"));
	}

	#[test]
	fn test_builder_rejects_duplicate_source() {
		let result = Orchestrator::builder()
			.with_config_dir("configs")
			.with_source(source(Network::Testnet))
			.with_source(source(Network::Testnet))
			.build();
		assert!(matches!(result, Err(CoreError::Configuration(_))));
	}

	#[test]
	fn test_builder_requires_config_dir() {
		assert!(Orchestrator::builder().build().is_err());
	}
}
