// checker-config/src/lib.rs

pub mod document;
pub mod loader;
pub mod serde_helpers;
pub mod types;

pub use document::*;
pub use loader::{load_settings, SettingsLoader};
pub use serde_helpers::KeyedEntries;
pub use types::*;

use checker_types::Network;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum ConfigError {
	#[error("File not found: {0}")]
	FileNotFound(String),

	#[error("Parse error: {0}")]
	ParseError(String),

	#[error("IO error: {0}")]
	IoError(#[from] std::io::Error),
}

/// Reads per-network documents out of a config directory.
#[derive(Debug, Clone)]
pub struct DocumentLoader {
	config_dir: PathBuf,
}

impl DocumentLoader {
	pub fn new<P: AsRef<Path>>(config_dir: P) -> Self {
		Self {
			config_dir: config_dir.as_ref().to_path_buf(),
		}
	}

	/// Path of the document for `network`, e.g. `configs/mainnet.json`.
	pub fn path_for(&self, network: Network) -> PathBuf {
		self.config_dir.join(network.document_file_name())
	}

	pub async fn load(&self, network: Network) -> Result<ConfigDocument, ConfigError> {
		let path = self.path_for(network);
		debug!("Loading {} document from {:?}", network, path);

		let content = match tokio::fs::read_to_string(&path).await {
			Ok(content) => content,
			Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
				return Err(ConfigError::FileNotFound(path.display().to_string()));
			}
			Err(e) => return Err(ConfigError::IoError(e)),
		};

		ConfigDocument::from_json(&content).map_err(|e| {
			ConfigError::ParseError(format!("{}: {}", network.document_file_name(), e))
		})
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[tokio::test]
	async fn test_load_document() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(
			dir.path().join("testnet.json"),
			r#"{"network": "testnet", "blacklisted_tokens": ["swth"]}"#,
		)
		.unwrap();

		let loader = DocumentLoader::new(dir.path());
		let document = loader.load(Network::Testnet).await.unwrap();
		assert_eq!(document.network.as_deref(), Some("testnet"));
		assert_eq!(document.blacklisted_tokens.unwrap(), vec!["swth".to_string()]);
	}

	#[tokio::test]
	async fn test_missing_document() {
		let dir = tempfile::tempdir().unwrap();
		let loader = DocumentLoader::new(dir.path());

		let result = loader.load(Network::Devnet).await;
		match result {
			Err(ConfigError::FileNotFound(path)) => assert!(path.ends_with("devnet.json")),
			other => panic!("expected FileNotFound, got {:?}", other),
		}
	}

	#[tokio::test]
	async fn test_malformed_document() {
		let dir = tempfile::tempdir().unwrap();
		std::fs::write(dir.path().join("mainnet.json"), "{ not json").unwrap();

		let loader = DocumentLoader::new(dir.path());
		let result = loader.load(Network::Mainnet).await;
		match result {
			Err(ConfigError::ParseError(message)) => assert!(message.starts_with("mainnet.json")),
			other => panic!("expected ParseError, got {:?}", other),
		}
	}

	#[test]
	fn test_path_for() {
		let loader = DocumentLoader::new("configs");
		assert_eq!(
			loader.path_for(Network::Localhost),
			PathBuf::from("configs/localhost.json")
		);
	}
}
