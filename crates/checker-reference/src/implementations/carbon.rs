//! Reference source backed by the Carbon chain REST API.
//!
//! List endpoints follow Cosmos pagination (`pagination.limit`,
//! `pagination.key`, `next_key`) and are drained before a call returns.
//! Numeric ids are uint64 on chain and may arrive as JSON strings or numbers.

use async_trait::async_trait;
use checker_types::{
	BridgeKind, BridgeRecord, CheckerError, MarketRecord, Network, ReferenceSource, Result,
	SourceHealth, TokenRecord,
};
use reqwest::StatusCode;
use serde::{de::DeserializeOwned, Deserialize};
use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

use crate::utils::RetryPolicy;

const SYNCING_PATH: &str = "/cosmos/base/tendermint/v1beta1/syncing";
const MARKETS_PATH: &str = "/carbon/market/v1/markets";
const POOLS_PATH: &str = "/carbon/liquiditypool/v1/pools";
const TOKENS_PATH: &str = "/carbon/coin/v1/tokens";
const BRIDGES_PATH: &str = "/carbon/coin/v1/bridges";
const CONNECTIONS_PATH: &str = "/carbon/bridge/v1/connections";
const GAS_PRICES_PATH: &str = "/carbon/fee/v1/min_gas_prices";
const PERP_POOLS_PATH: &str = "/carbon/perpspool/v1/pools/pool_info";

/// Legacy bridge id assigned to IBC connections.
const IBC_BRIDGE_ID: u64 = 2;

pub struct CarbonRestSource {
	network: Network,
	base_url: String,
	client: reqwest::Client,
	retry: RetryPolicy,
	page_limit: u32,
}

/// Builder for [`CarbonRestSource`].
pub struct CarbonRestSourceBuilder {
	network: Network,
	base_url: String,
	request_timeout: Duration,
	retry: RetryPolicy,
	page_limit: u32,
}

impl CarbonRestSource {
	pub fn builder(network: Network, base_url: &str) -> CarbonRestSourceBuilder {
		CarbonRestSourceBuilder {
			network,
			base_url: base_url.trim_end_matches('/').to_string(),
			request_timeout: Duration::from_secs(30),
			retry: RetryPolicy::default(),
			page_limit: 1000,
		}
	}

	pub fn base_url(&self) -> &str {
		&self.base_url
	}

	async fn get_json<T: DeserializeOwned>(&self, path: &str, query: &[(&str, String)]) -> Result<T> {
		let url = format!("{}{}", self.base_url, path);
		let url = &url;
		let client = &self.client;

		self.retry
			.run(path, || async move {
				let response = client
					.get(url)
					.query(query)
					.send()
					.await
					.map_err(|e| CheckerError::Network(format!("GET {} failed: {}", url, e)))?;

				let status = response.status();
				if status.is_server_error() || status == StatusCode::TOO_MANY_REQUESTS {
					return Err(CheckerError::Network(format!(
						"GET {} returned {}",
						url, status
					)));
				}
				if !status.is_success() {
					return Err(CheckerError::Reference(format!(
						"GET {} returned {}",
						url, status
					)));
				}

				response.json::<T>().await.map_err(|e| {
					CheckerError::Reference(format!("Invalid response from {}: {}", url, e))
				})
			})
			.await
	}

	/// Follows `next_key` until the listing is exhausted.
	async fn get_paginated<R, T, F>(&self, path: &str, mut extract: F) -> Result<Vec<T>>
	where
		R: DeserializeOwned,
		F: FnMut(R) -> (Vec<T>, Option<String>),
	{
		let mut items = Vec::new();
		let mut key: Option<String> = None;
		let mut seen = HashSet::new();

		loop {
			let mut query = vec![("pagination.limit", self.page_limit.to_string())];
			if let Some(key) = &key {
				query.push(("pagination.key", key.clone()));
			}

			let page: R = self.get_json(path, &query).await?;
			let (mut batch, next_key) = extract(page);
			debug!("Fetched {} entries from {}", batch.len(), path);
			items.append(&mut batch);

			match next_key.filter(|k| !k.is_empty()) {
				Some(next) => {
					if !seen.insert(next.clone()) {
						return Err(CheckerError::Reference(format!(
							"Pagination key {} repeated for {}",
							next, path
						)));
					}
					key = Some(next);
				}
				None => return Ok(items),
			}
		}
	}

	async fn legacy_bridges(&self) -> Result<Vec<BridgeRecord>> {
		self.get_paginated(BRIDGES_PATH, |page: BridgesResponse| {
			let records: Vec<BridgeRecord> = page.bridges.into_iter().map(LegacyBridge::into_record).collect();
			(records, next_key(page.pagination))
		})
		.await
	}

	async fn axelar_connections(&self) -> Result<Vec<BridgeRecord>> {
		self.get_paginated(CONNECTIONS_PATH, |page: ConnectionsResponse| {
			let records: Vec<BridgeRecord> = page
				.connections
				.into_iter()
				.map(|connection| BridgeRecord {
					kind: BridgeKind::Axelar,
					chain_name: connection.chain_display_name,
					bridge_name: "Axelar".to_string(),
					identifiers: vec![connection.connection_id],
					enabled: connection.is_enabled,
				})
				.collect();
			(records, next_key(page.pagination))
		})
		.await
	}
}

impl CarbonRestSourceBuilder {
	pub fn request_timeout(mut self, timeout: Duration) -> Self {
		self.request_timeout = timeout;
		self
	}

	pub fn retry_policy(mut self, retry: RetryPolicy) -> Self {
		self.retry = retry;
		self
	}

	pub fn page_limit(mut self, page_limit: u32) -> Self {
		self.page_limit = page_limit;
		self
	}

	pub fn build(self) -> Result<CarbonRestSource> {
		let client = reqwest::Client::builder()
			.timeout(self.request_timeout)
			.build()
			.map_err(|e| CheckerError::Network(format!("Failed to create HTTP client: {}", e)))?;

		Ok(CarbonRestSource {
			network: self.network,
			base_url: self.base_url,
			client,
			retry: self.retry,
			page_limit: self.page_limit.max(1),
		})
	}
}

#[async_trait]
impl ReferenceSource for CarbonRestSource {
	fn network(&self) -> Network {
		self.network
	}

	fn name(&self) -> &str {
		"carbon-rest"
	}

	async fn health_check(&self) -> Result<SourceHealth> {
		match self.get_json::<SyncingResponse>(SYNCING_PATH, &[]).await {
			Ok(status) if status.syncing => Ok(SourceHealth::Unhealthy(format!(
				"{} is still syncing",
				self.base_url
			))),
			Ok(_) => Ok(SourceHealth::Healthy),
			Err(e) => Ok(SourceHealth::Unhealthy(e.to_string())),
		}
	}

	async fn markets(&self) -> Result<Vec<MarketRecord>> {
		self.get_paginated(MARKETS_PATH, |page: MarketsResponse| {
			let records: Vec<MarketRecord> = page
				.markets
				.into_iter()
				.map(|market| MarketRecord {
					id: market.id,
					name: market.display_name,
				})
				.collect();
			(records, next_key(page.pagination))
		})
		.await
	}

	async fn pool_ids(&self) -> Result<Vec<String>> {
		self.get_paginated(POOLS_PATH, |page: PoolsResponse| {
			let ids: Vec<String> = page
				.pools
				.into_iter()
				.map(|entry| entry.pool.id.into_string())
				.collect();
			(ids, next_key(page.pagination))
		})
		.await
	}

	async fn tokens(&self) -> Result<Vec<TokenRecord>> {
		self.get_paginated(TOKENS_PATH, |page: TokensResponse| {
			let records: Vec<TokenRecord> = page
				.tokens
				.into_iter()
				.map(|token| TokenRecord {
					denom: token.denom,
					symbol: token.symbol,
				})
				.collect();
			(records, next_key(page.pagination))
		})
		.await
	}

	async fn bridges(&self) -> Result<Vec<BridgeRecord>> {
		let (mut legacy, axelar) = tokio::try_join!(self.legacy_bridges(), self.axelar_connections())?;
		legacy.extend(axelar);
		Ok(legacy)
	}

	async fn min_gas_price_denoms(&self) -> Result<Vec<String>> {
		self.get_paginated(GAS_PRICES_PATH, |page: GasPricesResponse| {
			let denoms: Vec<String> = page.min_gas_prices.into_iter().map(|price| price.denom).collect();
			(denoms, next_key(page.pagination))
		})
		.await
	}

	async fn perp_pool_ids(&self) -> Result<Vec<String>> {
		self.get_paginated(PERP_POOLS_PATH, |page: PerpPoolsResponse| {
			let ids: Vec<String> = page
				.pools
				.into_iter()
				.map(|pool| pool.pool_id.into_string())
				.collect();
			(ids, next_key(page.pagination))
		})
		.await
	}
}

/// uint64 as sent by the REST gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
enum Uint64 {
	Number(u64),
	Text(String),
}

impl Uint64 {
	fn as_u64(&self) -> Option<u64> {
		match self {
			Uint64::Number(n) => Some(*n),
			Uint64::Text(text) => text.parse().ok(),
		}
	}

	fn into_string(self) -> String {
		match self {
			Uint64::Number(n) => n.to_string(),
			Uint64::Text(text) => text,
		}
	}
}

#[derive(Debug, Default, Deserialize)]
struct PageInfo {
	#[serde(default)]
	next_key: Option<String>,
}

fn next_key(pagination: Option<PageInfo>) -> Option<String> {
	pagination.and_then(|page| page.next_key)
}

#[derive(Debug, Deserialize)]
struct SyncingResponse {
	#[serde(default)]
	syncing: bool,
}

#[derive(Debug, Deserialize)]
struct MarketsResponse {
	#[serde(default)]
	markets: Vec<MarketEntry>,
	#[serde(default)]
	pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct MarketEntry {
	id: String,
	#[serde(default)]
	display_name: String,
}

#[derive(Debug, Deserialize)]
struct PoolsResponse {
	#[serde(default)]
	pools: Vec<PoolEntry>,
	#[serde(default)]
	pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PoolEntry {
	pool: PoolDetails,
}

#[derive(Debug, Deserialize)]
struct PoolDetails {
	id: Uint64,
}

#[derive(Debug, Deserialize)]
struct TokensResponse {
	#[serde(default)]
	tokens: Vec<TokenEntry>,
	#[serde(default)]
	pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct TokenEntry {
	denom: String,
	#[serde(default)]
	symbol: String,
}

#[derive(Debug, Deserialize)]
struct BridgesResponse {
	#[serde(default)]
	bridges: Vec<LegacyBridge>,
	#[serde(default)]
	pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct LegacyBridge {
	bridge_id: Uint64,
	chain_id: Uint64,
	#[serde(default)]
	bridge_name: String,
	#[serde(default)]
	chain_name: String,
	#[serde(default)]
	enabled: bool,
	#[serde(default)]
	bridge_addresses: Vec<String>,
}

impl LegacyBridge {
	fn into_record(self) -> BridgeRecord {
		let is_ibc = self.bridge_id.as_u64() == Some(IBC_BRIDGE_ID);
		let (kind, identifiers) = if is_ibc {
			// IBC channel ids are offset by one from the chain id
			let channel = self
				.chain_id
				.as_u64()
				.and_then(|id| id.checked_sub(1))
				.map(|id| format!("channel-{}", id));
			(BridgeKind::Ibc, channel.into_iter().collect())
		} else {
			(BridgeKind::Polynetwork, self.bridge_addresses)
		};

		BridgeRecord {
			kind,
			chain_name: self.chain_name,
			bridge_name: self.bridge_name,
			identifiers,
			enabled: self.enabled,
		}
	}
}

#[derive(Debug, Deserialize)]
struct ConnectionsResponse {
	#[serde(default)]
	connections: Vec<AxelarConnection>,
	#[serde(default)]
	pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct AxelarConnection {
	connection_id: String,
	#[serde(default)]
	chain_display_name: String,
	#[serde(default)]
	is_enabled: bool,
}

#[derive(Debug, Deserialize)]
struct GasPricesResponse {
	#[serde(default)]
	min_gas_prices: Vec<GasPriceEntry>,
	#[serde(default)]
	pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct GasPriceEntry {
	denom: String,
}

#[derive(Debug, Deserialize)]
struct PerpPoolsResponse {
	#[serde(default)]
	pools: Vec<PerpPoolEntry>,
	#[serde(default)]
	pagination: Option<PageInfo>,
}

#[derive(Debug, Deserialize)]
struct PerpPoolEntry {
	pool_id: Uint64,
}
