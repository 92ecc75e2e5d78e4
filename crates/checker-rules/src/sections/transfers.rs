//! Bridge and transfer sections.

use super::SectionFindings;
use crate::context::ValidationContext;
use crate::predicates::{
	channel_regex, check_duplicates, check_membership, check_pattern, check_time_windows,
};
use crate::registry::SectionValidator;
use checker_config::ConfigDocument;
use checker_types::{Finding, Violation, ViolationKind};

/// `transfer_options`: keys are chain names reachable through any bridge.
pub struct TransferOptionsValidator;

impl SectionValidator for TransferOptionsValidator {
	fn name(&self) -> &'static str {
		"transfer_options"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.transfer_options.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(options) = &document.transfer_options {
			let chains = options.keys();
			out.check(
				"chain.valid",
				check_membership(&chains, &ctx.snapshot.transfer_chain_names()),
				"transfer options reference unknown chain names",
			);
			out.check(
				"chain.unique",
				check_duplicates(&chains),
				"transfer options repeat chain names",
			);
		}
		out.finish()
	}
}

/// `network_fees`: keys are denoms accepted for gas.
pub struct NetworkFeesValidator;

impl SectionValidator for NetworkFeesValidator {
	fn name(&self) -> &'static str {
		"network_fees"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.network_fees.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(fees) = &document.network_fees {
			let denoms = fees.keys();
			out.check(
				"denom.valid",
				check_membership(&denoms, &ctx.snapshot.gas_price_denoms),
				"network fees reference denoms without a minimum gas price",
			);
			out.check(
				"denom.unique",
				check_duplicates(&denoms),
				"network fees repeat denoms",
			);
		}
		out.finish()
	}
}

pub struct ExternalChainChannelsValidator;

impl SectionValidator for ExternalChainChannelsValidator {
	fn name(&self) -> &'static str {
		"external_chain_channels"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.external_chain_channels.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(channels) = &document.external_chain_channels else {
			return out.finish();
		};
		let known_chains = ctx.snapshot.ibc_chain_names();

		for (chain, destinations) in channels.iter() {
			let mut names = vec![chain];
			names.extend(destinations.keys());

			out.check(
				"chains.unique",
				check_duplicates(&names),
				format!("duplicate chain names under {}", chain),
			);
			out.check(
				"chains.valid",
				check_membership(&names, &known_chains),
				format!("unknown chain names under {}", chain),
			);
			out.check(
				"channels.format",
				check_pattern(destinations.values(), channel_regex()),
				format!("channel ids under {} do not match channel-<number>", chain),
			);
		}

		out.finish()
	}
}

/// `additional_ibc_token_config`: findings list the offending entry indexes.
pub struct AdditionalIbcTokenValidator;

impl SectionValidator for AdditionalIbcTokenValidator {
	fn name(&self) -> &'static str {
		"additional_ibc_token_config"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.additional_ibc_token_config.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(tokens) = &document.additional_ibc_token_config else {
			return out.finish();
		};
		let known_chains = ctx.snapshot.ibc_chain_names();

		let mut without_routes = Vec::new();
		let mut bad_routes = Vec::new();
		let mut bad_denoms = Vec::new();

		for (index, token) in tokens.iter().enumerate() {
			if token.chain_routes.is_empty() {
				without_routes.push(index.to_string());
			} else if check_membership(&token.chain_routes, &known_chains).is_some() {
				bad_routes.push(index.to_string());
			}

			if let Some(denom) = &token.denom_on_carbon {
				if !ctx.snapshot.token_denoms.contains(denom) {
					bad_denoms.push(index.to_string());
				}
			}
		}

		out.check(
			"chain_routes.present",
			Violation::from_entries(ViolationKind::MissingField, without_routes),
			"additional IBC tokens have no chain routes at index",
		);
		out.check(
			"chain_routes.valid",
			Violation::from_entries(ViolationKind::InvalidEntry, bad_routes),
			"additional IBC tokens route through unknown chains at index",
		);
		out.check(
			"denom_on_carbon.valid",
			Violation::from_entries(ViolationKind::InvalidEntry, bad_denoms),
			"additional IBC tokens have unknown denomOnCarbon at index",
		);

		out.finish()
	}
}

pub struct TransferBannerValidator;

impl SectionValidator for TransferBannerValidator {
	fn name(&self) -> &'static str {
		"transfer_banner"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.transfer_banner.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(banner) = &document.transfer_banner else {
			return out.finish();
		};
		let snapshot = ctx.snapshot;

		let unsupported = &banner.no_longer_supported_tokens;
		out.check(
			"no_longer_supported_tokens.valid",
			check_membership(unsupported, &snapshot.token_denoms),
			"no longer supported tokens contain unknown denoms",
		);
		out.check(
			"no_longer_supported_tokens.unique",
			check_duplicates(unsupported),
			"no longer supported tokens contain duplicates",
		);

		let tokens = &banner.temporary_disabled_transfer_tokens;
		out.check(
			"temporary_disabled_transfer_tokens.valid",
			check_membership(tokens.keys(), &snapshot.token_denoms),
			"temporarily disabled tokens contain unknown denoms",
		);
		let windows = tokens
			.iter()
			.map(|(denom, window)| (denom, window.start.as_str(), window.end.as_str()));
		out.windows(
			"temporary_disabled_transfer_tokens.window",
			check_time_windows(windows),
			"temporarily disabled tokens",
		);

		let bridges = &banner.temporary_disabled_bridges;
		out.check(
			"temporary_disabled_bridges.valid",
			check_membership(bridges.keys(), &snapshot.bridge_identifiers()),
			"temporarily disabled bridges reference unknown bridge identifiers",
		);
		let windows = bridges
			.iter()
			.map(|(bridge, window)| (bridge, window.start.as_str(), window.end.as_str()));
		out.windows(
			"temporary_disabled_bridges.window",
			check_time_windows(windows),
			"temporarily disabled bridges",
		);

		out.finish()
	}
}
