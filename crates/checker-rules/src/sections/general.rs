//! Document-wide settings.

use super::SectionFindings;
use crate::context::ValidationContext;
use crate::predicates::{check_pattern, evm_address_regex};
use crate::registry::SectionValidator;
use checker_config::ConfigDocument;
use checker_types::{Finding, Network, Violation, ViolationKind};

/// The document's own `network` field must name the network it is checked for.
pub struct NetworkFieldValidator;

impl SectionValidator for NetworkFieldValidator {
	fn name(&self) -> &'static str {
		"network"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.network.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(declared) = &document.network {
			if declared.parse::<Network>().ok() != Some(ctx.network) {
				out.check(
					"matches_file",
					Some(Violation::new(ViolationKind::Mismatch, vec![declared.clone()])),
					format!("network field does not match {}", ctx.network),
				);
			}
		}
		out.finish()
	}
}

/// `demex_points_config` is mandatory on mainnet.
pub struct DemexPointsValidator;

impl SectionValidator for DemexPointsValidator {
	fn name(&self) -> &'static str {
		"demex_points_config"
	}

	fn applies(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> bool {
		document.demex_points_config.is_some() || ctx.network == Network::Mainnet
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if ctx.network == Network::Mainnet && document.demex_points_config.is_none() {
			out.check(
				"present",
				Some(Violation::new(
					ViolationKind::MissingField,
					vec!["demex_points_config".to_string()],
				)),
				"mainnet config is missing",
			);
		}
		out.finish()
	}
}

pub struct SpotPoolConfigValidator;

impl SectionValidator for SpotPoolConfigValidator {
	fn name(&self) -> &'static str {
		"spot_pool_config"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.spot_pool_config.is_some()
	}

	fn validate(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(config) = &document.spot_pool_config {
			if config.show_apr_tooltip.is_none() {
				out.check(
					"show_apr_tooltip.present",
					Some(Violation::new(
						ViolationKind::MissingField,
						vec!["show_apr_tooltip".to_string()],
					)),
					"spot_pool_config is missing",
				);
			}
		}
		out.finish()
	}
}

pub struct WswthContractValidator;

impl SectionValidator for WswthContractValidator {
	fn name(&self) -> &'static str {
		"wswth_contract"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.wswth_contract.is_some()
	}

	fn validate(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(contract) = &document.wswth_contract {
			out.check(
				"format",
				check_pattern([contract], evm_address_regex()),
				"wSWTH contract is not a valid EVM address",
			);
		}
		out.finish()
	}
}
