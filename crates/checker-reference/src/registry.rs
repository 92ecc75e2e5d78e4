//! Registry mapping networks to their reference sources.
//!
//! Each network is answered by exactly one [`ReferenceSource`]. The registry
//! is built once at startup and read by the orchestrator for every run.

use checker_types::{CheckerError, Network, ReferenceSource, Result};
use std::{collections::HashMap, fmt, sync::Arc};
use tracing::info;

pub struct SourceRegistry {
	sources: HashMap<Network, Arc<dyn ReferenceSource>>,
}

impl SourceRegistry {
	pub fn new() -> Self {
		Self {
			sources: HashMap::new(),
		}
	}

	/// Registers a source under the network it reports.
	///
	/// # Errors
	///
	/// Returns an error if a source for the same network is already registered.
	pub fn register(&mut self, source: Arc<dyn ReferenceSource>) -> Result<()> {
		let network = source.network();
		info!("Registering {} reference source for {}", source.name(), network);

		if self.sources.contains_key(&network) {
			return Err(CheckerError::Config(format!(
				"Reference source for {} already registered",
				network
			)));
		}

		self.sources.insert(network, source);
		Ok(())
	}

	pub fn get(&self, network: Network) -> Option<Arc<dyn ReferenceSource>> {
		self.sources.get(&network).cloned()
	}

	/// Registered networks in canonical order.
	pub fn networks(&self) -> Vec<Network> {
		let mut networks: Vec<Network> = self.sources.keys().copied().collect();
		networks.sort();
		networks
	}
}

impl Default for SourceRegistry {
	fn default() -> Self {
		Self::new()
	}
}

impl fmt::Debug for SourceRegistry {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("SourceRegistry")
			.field("sources", &self.networks())
			.finish()
	}
}
