//! Network identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A deployment network with its own config document and reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Network {
	Mainnet,
	Testnet,
	Devnet,
	Localhost,
}

impl Network {
	pub const ALL: [Network; 4] = [
		Network::Mainnet,
		Network::Testnet,
		Network::Devnet,
		Network::Localhost,
	];

	pub fn as_str(&self) -> &'static str {
		match self {
			Network::Mainnet => "mainnet",
			Network::Testnet => "testnet",
			Network::Devnet => "devnet",
			Network::Localhost => "localhost",
		}
	}

	/// File name of the network's config document, e.g. `mainnet.json`.
	pub fn document_file_name(&self) -> String {
		format!("{}.json", self.as_str())
	}
}

impl fmt::Display for Network {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid network '{0}', expected one of: mainnet, testnet, devnet, localhost")]
pub struct UnknownNetwork(pub String);

impl FromStr for Network {
	type Err = UnknownNetwork;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s.to_ascii_lowercase().as_str() {
			"mainnet" => Ok(Network::Mainnet),
			"testnet" => Ok(Network::Testnet),
			"devnet" => Ok(Network::Devnet),
			"localhost" => Ok(Network::Localhost),
			_ => Err(UnknownNetwork(s.to_string())),
		}
	}
}
