//! Typed model of a per-network front-end config document.
//!
//! Every section is optional; `null` and an absent key both read as `None`.
//! Nested lists and maps read `null` as empty.
//! Unknown keys are ignored.

use crate::serde_helpers::{deserialize_id_string, null_as_default, KeyedEntries};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ConfigDocument {
	pub network: Option<String>,
	pub prelaunch_markets: Option<Vec<String>>,
	pub featured_markets: Option<Vec<String>>,
	pub blacklisted_markets: Option<Vec<String>>,
	pub omitted_markets: Option<Vec<String>>,
	pub blacklisted_pools: Option<Vec<String>>,
	pub blacklisted_tokens: Option<Vec<String>>,
	pub transfer_disabled_tokens: Option<TransferDisabledTokens>,
	pub token_name_override_map: Option<KeyedEntries<String>>,
	pub transfer_options: Option<KeyedEntries<f64>>,
	pub network_fees: Option<KeyedEntries<f64>>,
	pub demex_points_config: Option<DemexPointsConfig>,
	pub perp_pool_promo: Option<KeyedEntries<PerpPoolPromo>>,
	pub cross_selling_source_tokens: Option<Vec<String>>,
	pub typeform_widget_config: Option<Vec<TypeformWidget>>,
	pub external_chain_channels: Option<KeyedEntries<KeyedEntries<String>>>,
	pub additional_ibc_token_config: Option<Vec<AdditionalIbcToken>>,
	pub demex_trading_league_config: Option<TradingLeagueConfig>,
	pub perp_pools: Option<PerpPoolConfig>,
	pub wswth_contract: Option<String>,
	pub market_banners: Option<Vec<MarketBanner>>,
	pub market_promo: Option<KeyedEntries<MarketPromo>>,
	pub spot_pool_config: Option<SpotPoolConfig>,
	pub transfer_banner: Option<TransferBanner>,
	pub quick_select_deposit_options: Option<Vec<QuickSelectToken>>,
	pub announcement_banner: Option<AnnouncementBanner>,
	pub nps_config: Option<TimeWindow>,
	pub lst_native_aprs: Option<Vec<LstNativeApr>>,
}

impl ConfigDocument {
	/// Parses a document from JSON text.
	pub fn from_json(contents: &str) -> serde_json::Result<Self> {
		serde_json::from_str(contents)
	}
}

/// A `start`/`end` pair of timestamp strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TimeWindow {
	pub start: String,
	pub end: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransferDisabledTokens {
	#[serde(default, deserialize_with = "null_as_default")]
	pub deposit: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub withdraw: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DemexPointsConfig {
	pub deposits_per_spin: f64,
	pub trading_volume_per_spin: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerpPoolPromo {
	pub start: String,
	pub end: String,
	#[serde(default)]
	pub perp_pool_deposit_boost: Option<String>,
	#[serde(default)]
	pub perp_trading_boost: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeformWidget {
	pub survey_link: String,
	pub end_time: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub pages: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdditionalIbcToken {
	pub base_denom: String,
	#[serde(default, deserialize_with = "null_as_default")]
	pub chain_routes: Vec<String>,
	#[serde(default)]
	pub denom_on_carbon: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TradingLeagueConfig {
	#[serde(default, deserialize_with = "null_as_default")]
	pub promo_markets: Vec<String>,
	pub current_prize_symbol: String,
	#[serde(deserialize_with = "deserialize_id_string")]
	pub current_comp_perp_pool_id: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PerpPoolConfig {
	pub incentives: Option<PerpPoolIncentives>,
	pub banners: Option<Vec<PerpPoolBanner>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct PerpPoolIncentives {
	pub proxy: Option<String>,
	pub distributors: Option<Vec<String>>,
	pub wswth_contract: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PerpPoolBanner {
	#[serde(deserialize_with = "deserialize_id_string")]
	pub perp_pool_id: String,
	#[serde(default)]
	pub show_from: Option<String>,
	#[serde(default)]
	pub show_until: Option<String>,
	#[serde(default)]
	pub title: Option<String>,
	#[serde(default)]
	pub removed_markets: Option<String>,
	#[serde(default)]
	pub added_markets: Option<String>,
	#[serde(default)]
	pub action_trigger_date: Option<String>,
	#[serde(default)]
	pub past_tense_text: Option<String>,
	#[serde(default)]
	pub subtext: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketBanner {
	pub market_id: String,
	#[serde(default)]
	pub show_from: Option<String>,
	#[serde(default)]
	pub show_until: Option<String>,
	#[serde(default)]
	pub content: Option<String>,
	#[serde(default)]
	pub hideable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketPromo {
	pub start: String,
	pub end: String,
	#[serde(default)]
	pub tooltip: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SpotPoolConfig {
	pub show_apr_tooltip: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TransferBanner {
	#[serde(default, deserialize_with = "null_as_default")]
	pub no_longer_supported_tokens: Vec<String>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub temporary_disabled_transfer_tokens: KeyedEntries<TimeWindow>,
	#[serde(default, deserialize_with = "null_as_default")]
	pub temporary_disabled_bridges: KeyedEntries<TimeWindow>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QuickSelectToken {
	pub label_denom: String,
	pub target_denom: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AnnouncementBanner {
	pub show_from: Option<String>,
	pub show_until: Option<String>,
	pub content: Option<String>,
	pub hideable: Option<bool>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LstNativeApr {
	pub protocol: String,
	pub lst_denom: String,
}
