//! Validator registration and execution.

use crate::context::ValidationContext;
use crate::sections;
use checker_config::ConfigDocument;
use checker_types::Finding;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum RulesError {
	#[error("Validator {0} already registered")]
	DuplicateValidator(String),
}

/// Validates one section of a config document.
///
/// Implementations are pure: the same document and context always yield the
/// same findings, and one validator's result never affects another's.
pub trait SectionValidator: Send + Sync {
	/// Section name, also used as the registration key.
	fn name(&self) -> &'static str;

	/// Whether the validator has anything to check in `document`.
	fn applies(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> bool;

	fn validate(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding>;
}

/// Ordered set of section validators.
pub struct ValidatorRegistry {
	validators: Vec<Box<dyn SectionValidator>>,
}

impl ValidatorRegistry {
	pub fn new() -> Self {
		Self {
			validators: Vec::new(),
		}
	}

	/// Registry holding every built-in validator in reporting order.
	pub fn with_defaults() -> Self {
		Self {
			validators: sections::default_validators(),
		}
	}

	pub fn register(&mut self, validator: Box<dyn SectionValidator>) -> Result<(), RulesError> {
		let name = validator.name();
		if self.get(name).is_some() {
			return Err(RulesError::DuplicateValidator(name.to_string()));
		}
		self.validators.push(validator);
		Ok(())
	}

	pub fn get(&self, name: &str) -> Option<&dyn SectionValidator> {
		self.validators
			.iter()
			.find(|validator| validator.name() == name)
			.map(|validator| validator.as_ref())
	}

	pub fn names(&self) -> Vec<&'static str> {
		self.validators.iter().map(|validator| validator.name()).collect()
	}

	pub fn len(&self) -> usize {
		self.validators.len()
	}

	pub fn is_empty(&self) -> bool {
		self.validators.is_empty()
	}

	/// Runs every applicable validator in registration order.
	pub fn run(&self, document: &ConfigDocument, ctx: &ValidationContext<'_>) -> Vec<Finding> {
		let mut findings = Vec::new();
		for validator in &self.validators {
			if !validator.applies(document, ctx) {
				continue;
			}
			let produced = validator.validate(document, ctx);
			debug!(
				section = validator.name(),
				findings = produced.len(),
				"Validated section"
			);
			findings.extend(produced);
		}
		findings
	}
}

impl Default for ValidatorRegistry {
	fn default() -> Self {
		Self::with_defaults()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use checker_types::{Network, ReferenceSnapshot, ViolationKind};
	use chrono::Utc;

	struct AlwaysFails;

	impl SectionValidator for AlwaysFails {
		fn name(&self) -> &'static str {
			"always_fails"
		}

		fn applies(&self, _: &ConfigDocument, _: &ValidationContext<'_>) -> bool {
			true
		}

		fn validate(&self, _: &ConfigDocument, _: &ValidationContext<'_>) -> Vec<Finding> {
			vec![Finding::new(
				"always_fails",
				"always",
				ViolationKind::Mismatch,
				vec!["x".to_string()],
				"always fails",
			)]
		}
	}

	#[test]
	fn test_default_order() {
		let registry = ValidatorRegistry::with_defaults();
		let names = registry.names();
		assert_eq!(registry.len(), 25);
		assert_eq!(names.first(), Some(&"network"));
		assert_eq!(names[1], "markets");
		assert_eq!(names[9], "demex_points_config");
		assert_eq!(names[17], "external_chain_channels");
		assert_eq!(names.last(), Some(&"lst_native_aprs"));
	}

	#[test]
	fn test_duplicate_registration_rejected() {
		let mut registry = ValidatorRegistry::new();
		assert!(registry.is_empty());
		registry.register(Box::new(AlwaysFails)).unwrap();
		assert_eq!(
			registry.register(Box::new(AlwaysFails)),
			Err(RulesError::DuplicateValidator("always_fails".to_string()))
		);

		let defaults = ValidatorRegistry::with_defaults();
		assert!(defaults.get("market_promo").is_some());
		assert!(defaults.get("not_a_section").is_none());
	}

	#[test]
	fn test_empty_document_yields_no_findings() {
		let snapshot = ReferenceSnapshot::empty(Network::Testnet);
		let ctx = ValidationContext::new(&snapshot, Utc::now());
		let findings = ValidatorRegistry::with_defaults().run(&ConfigDocument::default(), &ctx);
		assert!(findings.is_empty());
	}

	#[test]
	fn test_run_is_repeatable() {
		let mut registry = ValidatorRegistry::new();
		registry.register(Box::new(AlwaysFails)).unwrap();

		let snapshot = ReferenceSnapshot::empty(Network::Devnet);
		let ctx = ValidationContext::new(&snapshot, Utc::now());
		let document = ConfigDocument::default();
		assert_eq!(registry.run(&document, &ctx), registry.run(&document, &ctx));
	}
}
