//! Builds reference snapshots from a source.

use checker_types::{
	BridgeDirectory, CheckerError, ReferenceSnapshot, ReferenceSource, Result, SourceHealth,
};
use std::collections::BTreeSet;
use tracing::{debug, info};

/// Drains a [`ReferenceSource`] into an immutable [`ReferenceSnapshot`].
pub struct SnapshotBuilder;

impl SnapshotBuilder {
	/// Checks the source's health, then fetches every collection.
	///
	/// # Errors
	///
	/// Returns [`CheckerError::Unhealthy`] without fetching anything when the
	/// health check fails, or the first fetch error otherwise.
	pub async fn build(source: &dyn ReferenceSource) -> Result<ReferenceSnapshot> {
		let network = source.network();

		if let SourceHealth::Unhealthy(reason) = source.health_check().await? {
			return Err(CheckerError::Unhealthy(format!(
				"{} source for {}: {}",
				source.name(),
				network,
				reason
			)));
		}

		let (markets, pool_ids, tokens, bridges, gas_price_denoms, perp_pool_ids) = tokio::try_join!(
			source.markets(),
			source.pool_ids(),
			source.tokens(),
			source.bridges(),
			source.min_gas_price_denoms(),
			source.perp_pool_ids(),
		)?;

		let mut directory = BridgeDirectory::new();
		let mut dropped = 0usize;
		for bridge in bridges {
			if !bridge.enabled {
				dropped += 1;
				continue;
			}
			directory.insert(bridge.kind, bridge.chain_name, bridge.identifiers);
		}
		if dropped > 0 {
			debug!("Ignoring {} disabled bridges on {}", dropped, network);
		}

		let snapshot = ReferenceSnapshot {
			network,
			market_ids: markets.iter().map(|m| m.id.clone()).collect(),
			pool_ids: pool_ids.into_iter().collect(),
			token_denoms: tokens.iter().map(|t| t.denom.clone()).collect(),
			token_symbols: tokens
				.iter()
				.map(|t| t.symbol.clone())
				.filter(|symbol| !symbol.is_empty())
				.collect::<BTreeSet<_>>(),
			bridges: directory,
			gas_price_denoms: gas_price_denoms.into_iter().collect(),
			perp_pool_ids: perp_pool_ids.into_iter().collect(),
		};

		info!(
			markets = snapshot.market_ids.len(),
			pools = snapshot.pool_ids.len(),
			tokens = snapshot.token_denoms.len(),
			perp_pools = snapshot.perp_pool_ids.len(),
			"Reference snapshot ready for {}",
			network
		);

		Ok(snapshot)
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::implementations::memory::{ReferenceDump, StaticSource};
	use async_trait::async_trait;
	use checker_types::{BridgeKind, BridgeRecord, MarketRecord, Network, TokenRecord};
	use std::sync::atomic::{AtomicBool, Ordering};

	fn dump() -> ReferenceDump {
		ReferenceDump {
			markets: vec![MarketRecord {
				id: "BTC_USDT".to_string(),
				name: "BTC / USDT".to_string(),
			}],
			pools: vec!["1".to_string(), "1".to_string()],
			tokens: vec![
				TokenRecord {
					denom: "swth".to_string(),
					symbol: "SWTH".to_string(),
				},
				TokenRecord {
					denom: "ibc/ABC".to_string(),
					symbol: String::new(),
				},
			],
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
					chain_name: "Zilliqa".to_string(),
					bridge_name: "PolyNetwork".to_string(),
					identifiers: vec!["0xdead".to_string()],
					enabled: false,
				},
			],
			min_gas_price_denoms: vec!["swth".to_string()],
			perp_pool_ids: vec!["1".to_string()],
			healthy: None,
		}
	}

	#[tokio::test]
	async fn test_build_snapshot() {
		let source = StaticSource::new(Network::Testnet, dump());
		let snapshot = SnapshotBuilder::build(&source).await.unwrap();

		assert_eq!(snapshot.network, Network::Testnet);
		assert!(snapshot.market_ids.contains("BTC_USDT"));
		assert_eq!(snapshot.pool_ids.len(), 1);
		assert_eq!(snapshot.token_denoms.len(), 2);
		assert_eq!(snapshot.token_symbols.len(), 1);
		assert!(snapshot.gas_price_denoms.contains("swth"));
		assert!(snapshot.perp_pool_ids.contains("1"));
	}

	#[tokio::test]
	async fn test_disabled_bridges_are_dropped() {
		let source = StaticSource::new(Network::Testnet, dump());
		let snapshot = SnapshotBuilder::build(&source).await.unwrap();

		let chains = snapshot.transfer_chain_names();
		assert!(chains.contains("Osmosis"));
		assert!(!chains.contains("Zilliqa"));
		assert!(!snapshot.bridge_identifiers().contains("0xdead"));
	}

	struct UnhealthySource {
		fetched: AtomicBool,
	}

	#[async_trait]
	impl ReferenceSource for UnhealthySource {
		fn network(&self) -> Network {
			Network::Devnet
		}

		fn name(&self) -> &str {
			"mock"
		}

		async fn health_check(&self) -> Result<SourceHealth> {
			Ok(SourceHealth::Unhealthy("node is syncing".to_string()))
		}

		async fn markets(&self) -> Result<Vec<MarketRecord>> {
			self.fetched.store(true, Ordering::SeqCst);
			Ok(vec![])
		}

		async fn pool_ids(&self) -> Result<Vec<String>> {
			self.fetched.store(true, Ordering::SeqCst);
			Ok(vec![])
		}

		async fn tokens(&self) -> Result<Vec<TokenRecord>> {
			self.fetched.store(true, Ordering::SeqCst);
			Ok(vec![])
		}

		async fn bridges(&self) -> Result<Vec<BridgeRecord>> {
			self.fetched.store(true, Ordering::SeqCst);
			Ok(vec![])
		}

		async fn min_gas_price_denoms(&self) -> Result<Vec<String>> {
			self.fetched.store(true, Ordering::SeqCst);
			Ok(vec![])
		}

		async fn perp_pool_ids(&self) -> Result<Vec<String>> {
			Err(CheckerError::Network("unreachable".to_string()))
		}
	}

	#[tokio::test]
	async fn test_unhealthy_source_is_not_fetched() {
		let source = UnhealthySource {
			fetched: AtomicBool::new(false),
		};

		let result = SnapshotBuilder::build(&source).await;
		assert!(matches!(result, Err(CheckerError::Unhealthy(msg)) if msg.contains("syncing")));
		assert!(!source.fetched.load(Ordering::SeqCst));
	}

	#[tokio::test]
	async fn test_unhealthy_dump_fails_build() {
		let dump = ReferenceDump {
			healthy: Some(false),
			..dump()
		};
		let source = StaticSource::new(Network::Mainnet, dump);
		assert!(SnapshotBuilder::build(&source).await.is_err());
	}
}
