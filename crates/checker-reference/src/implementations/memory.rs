//! In-memory reference source.
//!
//! Serves a fixed [`ReferenceDump`], either built in code or read from a JSON
//! file. Used for offline runs and for tests.

use async_trait::async_trait;
use checker_types::{
	BridgeRecord, MarketRecord, Network, ReferenceSource, Result, SourceHealth, TokenRecord,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Serialized reference collections for one network.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceDump {
	pub markets: Vec<MarketRecord>,
	pub pools: Vec<String>,
	pub tokens: Vec<TokenRecord>,
	pub bridges: Vec<BridgeRecord>,
	pub min_gas_price_denoms: Vec<String>,
	pub perp_pool_ids: Vec<String>,
	/// `Some(false)` makes the health check fail.
	pub healthy: Option<bool>,
}

impl ReferenceDump {
	pub fn from_json(contents: &str) -> Result<Self> {
		Ok(serde_json::from_str(contents)?)
	}

	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
		let contents = std::fs::read_to_string(path)?;
		Self::from_json(&contents)
	}
}

#[derive(Debug, Clone)]
pub struct StaticSource {
	network: Network,
	dump: ReferenceDump,
}

impl StaticSource {
	pub fn new(network: Network, dump: ReferenceDump) -> Self {
		Self { network, dump }
	}
}

#[async_trait]
impl ReferenceSource for StaticSource {
	fn network(&self) -> Network {
		self.network
	}

	fn name(&self) -> &str {
		"static"
	}

	async fn health_check(&self) -> Result<SourceHealth> {
		Ok(match self.dump.healthy {
			Some(false) => SourceHealth::Unhealthy("reference dump marked unhealthy".to_string()),
			_ => SourceHealth::Healthy,
		})
	}

	async fn markets(&self) -> Result<Vec<MarketRecord>> {
		Ok(self.dump.markets.clone())
	}

	async fn pool_ids(&self) -> Result<Vec<String>> {
		Ok(self.dump.pools.clone())
	}

	async fn tokens(&self) -> Result<Vec<TokenRecord>> {
		Ok(self.dump.tokens.clone())
	}

	async fn bridges(&self) -> Result<Vec<BridgeRecord>> {
		Ok(self.dump.bridges.clone())
	}

	async fn min_gas_price_denoms(&self) -> Result<Vec<String>> {
		Ok(self.dump.min_gas_price_denoms.clone())
	}

	async fn perp_pool_ids(&self) -> Result<Vec<String>> {
		Ok(self.dump.perp_pool_ids.clone())
	}
}
