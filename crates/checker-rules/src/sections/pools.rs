//! Liquidity pool and perp pool sections.

use super::SectionFindings;
use crate::context::ValidationContext;
use crate::predicates::{
	check_duplicates, check_membership, check_pattern, check_time_windows, evm_address_regex,
};
use crate::registry::SectionValidator;
use checker_config::ConfigDocument;
use checker_types::Finding;

pub struct BlacklistedPoolsValidator;

impl SectionValidator for BlacklistedPoolsValidator {
	fn name(&self) -> &'static str {
		"blacklisted_pools"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.blacklisted_pools.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		if let Some(pools) = &document.blacklisted_pools {
			out.check(
				"valid",
				check_membership(pools, &ctx.snapshot.pool_ids),
				"blacklisted_pools contains unknown pool ids",
			);
			out.check(
				"unique",
				check_duplicates(pools),
				"blacklisted_pools contains duplicate pool ids",
			);
		}
		out.finish()
	}
}

pub struct PerpPoolPromoValidator;

impl SectionValidator for PerpPoolPromoValidator {
	fn name(&self) -> &'static str {
		"perp_pool_promo"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.perp_pool_promo.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(promos) = &document.perp_pool_promo else {
			return out.finish();
		};
		let ids = promos.keys();

		out.check(
			"perp_pool_id.valid",
			check_membership(&ids, &ctx.snapshot.perp_pool_ids),
			"perp pool promos reference unknown perp pool ids",
		);
		out.check(
			"perp_pool_id.unique",
			check_duplicates(&ids),
			"perp pool promos repeat perp pool ids",
		);

		let windows = promos
			.iter()
			.map(|(id, promo)| (id, promo.start.as_str(), promo.end.as_str()));
		out.windows("promo_window", check_time_windows(windows), "perp pool promos");

		out.finish()
	}
}

/// `perp_pools`: incentive contracts and perp pool banners.
pub struct PerpPoolsValidator;

impl SectionValidator for PerpPoolsValidator {
	fn name(&self) -> &'static str {
		"perp_pools"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.perp_pools.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(perp_pools) = &document.perp_pools else {
			return out.finish();
		};

		if let Some(incentives) = &perp_pools.incentives {
			if let Some(distributors) = &incentives.distributors {
				out.check(
					"incentives.distributors.unique",
					check_duplicates(distributors),
					"incentive distributors contain duplicate addresses",
				);
				out.check(
					"incentives.distributors.format",
					check_pattern(distributors, evm_address_regex()),
					"incentive distributors are not valid EVM addresses",
				);
			}
			if let Some(proxy) = &incentives.proxy {
				out.check(
					"incentives.proxy.format",
					check_pattern([proxy], evm_address_regex()),
					"incentive proxy is not a valid EVM address",
				);
			}
			if let Some(contract) = &incentives.wswth_contract {
				out.check(
					"incentives.wswth_contract.format",
					check_pattern([contract], evm_address_regex()),
					"incentive wSWTH contract is not a valid EVM address",
				);
			}
		}

		if let Some(banners) = &perp_pools.banners {
			let ids: Vec<&str> = banners.iter().map(|b| b.perp_pool_id.as_str()).collect();
			out.check(
				"banners.perp_pool_id.valid",
				check_membership(&ids, &ctx.snapshot.perp_pool_ids),
				"perp pool banners reference unknown perp pool ids",
			);
			out.check(
				"banners.perp_pool_id.unique",
				check_duplicates(&ids),
				"perp pool banners repeat perp pool ids",
			);

			let windows = banners.iter().filter_map(|banner| {
				match (&banner.show_from, &banner.show_until) {
					(Some(from), Some(until)) => {
						Some((banner.perp_pool_id.as_str(), from.as_str(), until.as_str()))
					}
					_ => None,
				}
			});
			out.windows("banners.show_window", check_time_windows(windows), "perp pool banners");
		}

		out.finish()
	}
}
