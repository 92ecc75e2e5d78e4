// checker-core/src/error.rs

use checker_rules::RulesError;
use checker_types::Network;
use thiserror::Error;

/// Errors that abort a whole run.
///
/// Problems confined to one network (unreadable document, unreachable
/// reference source) never surface here; they end up in that network's
/// report instead.
#[derive(Error, Debug)]
pub enum CoreError {
	#[error("No reference source registered for {0}")]
	MissingSource(Network),

	#[error("Validator {0} already registered")]
	DuplicateValidator(String),

	#[error("Configuration error: {0}")]
	Configuration(String),
}

impl From<RulesError> for CoreError {
	fn from(err: RulesError) -> Self {
		match err {
			RulesError::DuplicateValidator(name) => CoreError::DuplicateValidator(name),
		}
	}
}
