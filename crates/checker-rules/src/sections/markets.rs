//! Market-keyed sections: market lists, market banners, market promos and
//! the trading league.

use super::SectionFindings;
use crate::context::ValidationContext;
use crate::predicates::{
	check_disjoint, check_duplicates, check_membership, check_time_windows,
};
use crate::registry::SectionValidator;
use checker_config::ConfigDocument;
use checker_types::{Finding, Violation, ViolationKind};

/// `prelaunch_markets`, `featured_markets`, `blacklisted_markets` and
/// `omitted_markets`.
pub struct MarketListsValidator;

impl SectionValidator for MarketListsValidator {
	fn name(&self) -> &'static str {
		"markets"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.prelaunch_markets.is_some()
			|| document.featured_markets.is_some()
			|| document.blacklisted_markets.is_some()
			|| document.omitted_markets.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let markets = &ctx.snapshot.market_ids;

		let lists = [
			("prelaunch_markets", &document.prelaunch_markets),
			("featured_markets", &document.featured_markets),
			("blacklisted_markets", &document.blacklisted_markets),
			("omitted_markets", &document.omitted_markets),
		];
		for (field, list) in lists {
			let Some(list) = list else { continue };
			out.check(
				&format!("{}.valid", field),
				check_membership(list, markets),
				format!("{} contains unknown market ids", field),
			);
			out.check(
				&format!("{}.unique", field),
				check_duplicates(list),
				format!("{} contains duplicate market ids", field),
			);
		}

		if let Some(blacklisted) = &document.blacklisted_markets {
			if let Some(prelaunch) = &document.prelaunch_markets {
				out.check(
					"blacklisted_markets.not_prelaunch",
					check_disjoint(blacklisted, prelaunch),
					"blacklisted markets are also listed in prelaunch_markets",
				);
			}
			if let Some(featured) = &document.featured_markets {
				out.check(
					"blacklisted_markets.not_featured",
					check_disjoint(blacklisted, featured),
					"blacklisted markets are also listed in featured_markets",
				);
			}
		}

		if let (Some(omitted), Some(featured)) = (&document.omitted_markets, &document.featured_markets) {
			out.check(
				"omitted_markets.not_featured",
				check_disjoint(omitted, featured),
				"omitted markets are also listed in featured_markets",
			);
		}

		out.finish()
	}
}

pub struct MarketBannersValidator;

impl SectionValidator for MarketBannersValidator {
	fn name(&self) -> &'static str {
		"market_banners"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.market_banners.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(banners) = &document.market_banners else {
			return out.finish();
		};
		let ids: Vec<&str> = banners.iter().map(|b| b.market_id.as_str()).collect();

		out.check(
			"market_id.valid",
			check_membership(&ids, &ctx.snapshot.market_ids),
			"market banners reference unknown market ids",
		);
		out.check(
			"market_id.unique",
			check_duplicates(&ids),
			"market banners repeat market ids",
		);

		// only windows with both ends set are bounded
		let windows = banners.iter().filter_map(|banner| {
			match (&banner.show_from, &banner.show_until) {
				(Some(from), Some(until)) => {
					Some((banner.market_id.as_str(), from.as_str(), until.as_str()))
				}
				_ => None,
			}
		});
		out.windows("show_window", check_time_windows(windows), "market banners");

		out.finish()
	}
}

pub struct MarketPromoValidator;

impl SectionValidator for MarketPromoValidator {
	fn name(&self) -> &'static str {
		"market_promo"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.market_promo.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(promos) = &document.market_promo else {
			return out.finish();
		};
		let ids = promos.keys();

		out.check(
			"market_id.valid",
			check_membership(&ids, &ctx.snapshot.market_ids),
			"market promos reference unknown market ids",
		);
		out.check(
			"market_id.unique",
			check_duplicates(&ids),
			"market promos repeat market ids",
		);

		let windows = promos
			.iter()
			.map(|(id, promo)| (id, promo.start.as_str(), promo.end.as_str()));
		out.windows("promo_window", check_time_windows(windows), "market promos");

		out.finish()
	}
}

/// `demex_trading_league_config`.
pub struct TradingLeagueValidator;

impl SectionValidator for TradingLeagueValidator {
	fn name(&self) -> &'static str {
		"demex_trading_league_config"
	}

	fn applies(&self, document: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
		document.demex_trading_league_config.is_some()
	}

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut out = SectionFindings::new(self.name());
		let Some(league) = &document.demex_trading_league_config else {
			return out.finish();
		};
		let snapshot = ctx.snapshot;

		out.check(
			"promo_markets.valid",
			check_membership(&league.promo_markets, &snapshot.market_ids),
			"trading league promo markets contain unknown market ids",
		);
		out.check(
			"promo_markets.unique",
			check_duplicates(&league.promo_markets),
			"trading league promo markets contain duplicates",
		);
		if let Some(blacklisted) = &document.blacklisted_markets {
			out.check(
				"promo_markets.not_blacklisted",
				check_disjoint(&league.promo_markets, blacklisted),
				"trading league promo markets are blacklisted",
			);
		}

		let pool_id = &league.current_comp_perp_pool_id;
		if !snapshot.perp_pool_ids.contains(pool_id) {
			out.check(
				"current_comp_perp_pool_id.valid",
				Some(Violation::new(ViolationKind::InvalidEntry, vec![pool_id.clone()])),
				"trading league competition perp pool does not exist",
			);
		}

		let symbol = &league.current_prize_symbol;
		if !snapshot.token_symbols.contains(symbol) {
			out.check(
				"current_prize_symbol.valid",
				Some(Violation::new(ViolationKind::InvalidEntry, vec![symbol.clone()])),
				"trading league prize token symbol is unknown",
			);
		}

		out.finish()
	}
}
