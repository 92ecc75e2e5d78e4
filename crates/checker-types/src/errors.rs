//! Error types shared by the checker crates.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CheckerError>;

#[derive(Error, Debug)]
pub enum CheckerError {
	#[error("Network error: {0}")]
	Network(String),

	#[error("Reference source unhealthy: {0}")]
	Unhealthy(String),

	#[error("Reference data error: {0}")]
	Reference(String),

	#[error("Configuration error: {0}")]
	Config(String),

	#[error("Serialization error: {0}")]
	Serialization(#[from] serde_json::Error),

	#[error("IO error: {0}")]
	Io(#[from] std::io::Error),

	#[error(transparent)]
	Other(#[from] anyhow::Error),
}
