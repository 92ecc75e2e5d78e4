//! Reference data listings for config authors.
//!
//! `bridges` prints the enabled bridges whose chain names and identifiers are
//! valid `transfer_options` and `temporary_disabled_bridges` keys;
//! `perp-pools` prints the perp pool ids.

use anyhow::{bail, Context, Result};
use checker_types::{BridgeKind, BridgeRecord, ReferenceSource, SourceHealth};
use tracing::info;

pub const BRIDGE_TABLE_HEADER: &str = "Chain Name | Bridge Name | Bridge Address(es)";

async fn ensure_healthy(source: &dyn ReferenceSource) -> Result<()> {
	if let SourceHealth::Unhealthy(reason) = source.health_check().await? {
		bail!("{} reference source for {} is unhealthy: {}", source.name(), source.network(), reason);
	}
	Ok(())
}

/// Header plus one row per enabled bridge, legacy bridges before Axelar.
pub async fn bridge_table(source: &dyn ReferenceSource) -> Result<Vec<String>> {
	ensure_healthy(source).await?;
	let bridges = source
		.bridges()
		.await
		.with_context(|| format!("Failed to list bridges for {}", source.network()))?;

	let mut enabled: Vec<&BridgeRecord> = bridges.iter().filter(|bridge| bridge.enabled).collect();
	enabled.sort_by_key(|bridge| bridge.kind == BridgeKind::Axelar);
	info!("Found {} enabled bridges on {}", enabled.len(), source.network());

	let mut lines = vec![BRIDGE_TABLE_HEADER.to_string()];
	for bridge in enabled {
		lines.push(format!(
			"{} | {} | {}",
			bridge.chain_name,
			bridge.bridge_name,
			bridge_addresses(bridge)?
		));
	}
	Ok(lines)
}

/// Polynetwork bridges list every address as a JSON array; IBC channels and
/// Axelar connections are printed bare.
fn bridge_addresses(bridge: &BridgeRecord) -> Result<String> {
	match bridge.kind {
		BridgeKind::Polynetwork => Ok(serde_json::to_string(&bridge.identifiers)?),
		BridgeKind::Ibc | BridgeKind::Axelar => Ok(bridge.identifiers.join(", ")),
	}
}

/// Perp pool ids as a JSON array.
pub async fn perp_pool_list(source: &dyn ReferenceSource) -> Result<String> {
	ensure_healthy(source).await?;
	let ids = source
		.perp_pool_ids()
		.await
		.with_context(|| format!("Failed to list perp pools for {}", source.network()))?;
	info!("Found {} perp pools on {}", ids.len(), source.network());
	Ok(serde_json::to_string(&ids)?)
}

#[cfg(test)]
mod tests {
	use super::*;
	use checker_reference::{ReferenceDump, StaticSource};
	use checker_types::Network;

	fn bridge(kind: BridgeKind, chain: &str, name: &str, ids: &[&str], enabled: bool) -> BridgeRecord {
		BridgeRecord {
			kind,
			chain_name: chain.to_string(),
			bridge_name: name.to_string(),
			identifiers: ids.iter().map(|id| id.to_string()).collect(),
			enabled,
		}
	}

	fn source(dump: ReferenceDump) -> StaticSource {
		StaticSource::new(Network::Testnet, dump)
	}

	#[tokio::test]
	async fn test_bridge_table_lists_enabled_bridges() {
		let source = source(ReferenceDump {
			bridges: vec![
				bridge(BridgeKind::Axelar, "Arbitrum", "Axelar", &["axelar/arbitrum"], true),
				bridge(BridgeKind::Ibc, "Osmosis", "IBC", &["channel-0"], true),
				bridge(BridgeKind::Polynetwork, "Ethereum", "PolyNetwork", &["0xabc", "0xdef"], true),
				bridge(BridgeKind::Ibc, "Juno", "IBC", &["channel-9"], false),
			],
			..ReferenceDump::default()
		});

		let lines = bridge_table(&source).await.unwrap();
		assert_eq!(
			lines,
			vec![
				BRIDGE_TABLE_HEADER,
				"Osmosis | IBC | channel-0",
				"Ethereum | PolyNetwork | [\"0xabc\",\"0xdef\"]",
				"Arbitrum | Axelar | axelar/arbitrum",
			]
		);
	}

	#[tokio::test]
	async fn test_bridge_table_without_bridges() {
		let lines = bridge_table(&source(ReferenceDump::default())).await.unwrap();
		assert_eq!(lines, vec![BRIDGE_TABLE_HEADER]);
	}

	#[tokio::test]
	async fn test_perp_pool_list() {
		let source = source(ReferenceDump {
			perp_pool_ids: vec!["1".to_string(), "3".to_string()],
			..ReferenceDump::default()
		});
		assert_eq!(perp_pool_list(&source).await.unwrap(), r#"["1","3"]"#);
	}

	#[tokio::test]
	async fn test_listing_refuses_unhealthy_source() {
		let source = source(ReferenceDump {
			healthy: Some(false),
			perp_pool_ids: vec!["1".to_string()],
			..ReferenceDump::default()
		});
		let err = perp_pool_list(&source).await.unwrap_err();
		assert!(err.to_string().contains("unhealthy"));
		assert!(bridge_table(&source).await.is_err());
	}
}
