//! Settings of the checker itself (not the documents it validates).

use checker_types::Network;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerSettings {
	/// Directory holding `<network>.json` documents.
	#[serde(default = "default_config_dir")]
	pub config_dir: PathBuf,

	/// REST base URL of the chain query service, keyed by network name.
	#[serde(default = "default_endpoints")]
	pub endpoints: BTreeMap<String, String>,

	#[serde(default)]
	pub reference: ReferenceSettings,
}

impl Default for CheckerSettings {
	fn default() -> Self {
		Self {
			config_dir: default_config_dir(),
			endpoints: default_endpoints(),
			reference: ReferenceSettings::default(),
		}
	}
}

impl CheckerSettings {
	pub fn endpoint(&self, network: Network) -> Option<&str> {
		self.endpoints.get(network.as_str()).map(String::as_str)
	}
}

/// Reference-data client tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReferenceSettings {
	#[serde(default = "default_request_timeout_secs")]
	pub request_timeout_secs: u64,
	#[serde(default = "default_max_retries")]
	pub max_retries: u32,
	#[serde(default = "default_max_elapsed_secs")]
	pub max_elapsed_secs: u64,
	#[serde(default = "default_page_limit")]
	pub page_limit: u32,
}

impl Default for ReferenceSettings {
	fn default() -> Self {
		Self {
			request_timeout_secs: default_request_timeout_secs(),
			max_retries: default_max_retries(),
			max_elapsed_secs: default_max_elapsed_secs(),
			page_limit: default_page_limit(),
		}
	}
}

fn default_config_dir() -> PathBuf {
	PathBuf::from("configs")
}

pub fn default_endpoints() -> BTreeMap<String, String> {
	[
		(Network::Mainnet, "https://api.carbon.network"),
		(Network::Testnet, "https://test-api.carbon.network"),
		(Network::Devnet, "https://dev-api.carbon.network"),
		(Network::Localhost, "http://localhost:1317"),
	]
	.into_iter()
	.map(|(network, url)| (network.as_str().to_string(), url.to_string()))
	.collect()
}

fn default_request_timeout_secs() -> u64 {
	30
}

fn default_max_retries() -> u32 {
	3
}

fn default_max_elapsed_secs() -> u64 {
	30
}

fn default_page_limit() -> u32 {
	1000
}
