//! Denom-keyed sections.

use super::SectionFindings;
use crate::context::ValidationContext;
use crate::predicates::{check_duplicates, check_membership};
use crate::registry::SectionValidator;
use checker_config::ConfigDocument;
use checker_types::Finding;

/// Membership against known denoms plus uniqueness for a plain denom list.
fn check_denom_list(out: &mut SectionFindings, field: &str, denoms: &[String], ctx: &ValidationContext<'_>) {
	out.check(
		&format!("{}.valid", field),
		check_membership(denoms, &ctx.snapshot.token_denoms),
		format!("{} contains unknown token denoms", field),
	);
	out.check(
		&format!("{}.unique", field),
		check_duplicates(denoms),
		format!("{} contains duplicate token denoms", field),
	);
}

pub struct BlacklistedTokensValidator;

impl SectionValidator for BlacklistedTokensValidator {
	fn name(&self) -> &'static str {
		"blacklisted_tokens"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.blacklisted_tokens.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(tokens) = &document.blacklisted_tokens {
			check_denom_list(&mut out, "blacklisted_tokens", tokens, ctx);
		}
		out.finish()
	}
}

/// Deposit and withdraw lists are checked independently of each other.
pub struct TransferDisabledTokensValidator;

impl SectionValidator for TransferDisabledTokensValidator {
	fn name(&self) -> &'static str {
		"transfer_disabled_tokens"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.transfer_disabled_tokens.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(disabled) = &document.transfer_disabled_tokens {
			check_denom_list(&mut out, "deposit", &disabled.deposit, ctx);
			check_denom_list(&mut out, "withdraw", &disabled.withdraw, ctx);
		}
		out.finish()
	}
}

pub struct TokenNameOverrideValidator;

impl SectionValidator for TokenNameOverrideValidator {
	fn name(&self) -> &'static str {
		"token_name_override_map"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.token_name_override_map.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(overrides) = &document.token_name_override_map {
			let denoms = overrides.keys();
			out.check(
				"denom.valid",
				check_membership(&denoms, &ctx.snapshot.token_denoms),
				"token name overrides reference unknown token denoms",
			);
			out.check(
				"denom.unique",
				check_duplicates(&denoms),
				"token name overrides repeat token denoms",
			);
		}
		out.finish()
	}
}

pub struct CrossSellingTokensValidator;

impl SectionValidator for CrossSellingTokensValidator {
	fn name(&self) -> &'static str {
		"cross_selling_source_tokens"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.cross_selling_source_tokens.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(tokens) = &document.cross_selling_source_tokens {
			check_denom_list(&mut out, "cross_selling_source_tokens", tokens, ctx);
		}
		out.finish()
	}
}

/// `quick_select_deposit_options`: label and target columns are validated
/// separately.
pub struct QuickSelectDepositValidator;

impl SectionValidator for QuickSelectDepositValidator {
	fn name(&self) -> &'static str {
		"quick_select_deposit_options"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.quick_select_deposit_options.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(options) = &document.quick_select_deposit_options else {
			return out.finish();
		};
		let labels: Vec<&str> = options.iter().map(|o| o.label_denom.as_str()).collect();
		let targets: Vec<&str> = options.iter().map(|o| o.target_denom.as_str()).collect();

		out.check(
			"label_denom.unique",
			check_duplicates(&labels),
			"quick select options repeat label denoms",
		);
		out.check(
			"label_denom.valid",
			check_membership(&labels, &ctx.snapshot.token_denoms),
			"quick select label denoms are unknown",
		);
		out.check(
			"target_denom.valid",
			check_membership(&targets, &ctx.snapshot.token_denoms),
			"quick select target denoms are unknown",
		);

		out.finish()
	}
}

pub struct LstNativeAprsValidator;

impl SectionValidator for LstNativeAprsValidator {
	fn name(&self) -> &'static str {
		"lst_native_aprs"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.lst_native_aprs.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(aprs) = &document.lst_native_aprs {
			let denoms: Vec<String> = aprs.iter().map(|apr| apr.lst_denom.clone()).collect();
			check_denom_list(&mut out, "lst_denom", &denoms, ctx);
		}
		out.finish()
	}
}
