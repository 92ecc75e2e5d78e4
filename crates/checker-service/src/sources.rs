//! Reference source wiring for the requested networks.

use anyhow::{Context, Result};
use checker_config::CheckerSettings;
use checker_reference::{CarbonRestSource, ReferenceDump, RetryPolicy, StaticSource};
use checker_types::{Network, ReferenceSource};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;

/// One source per network. With a reference file every network reads the
/// same dump; otherwise each network gets a REST client for its endpoint.
pub fn build_sources(
	networks: &[Network],
	settings: &CheckerSettings,
	reference_file: Option<&Path>,
) -> Result<Vec<Arc<dyn ReferenceSource>>> {
	let mut networks = networks.to_vec();
	networks.sort();
	networks.dedup();

	if let Some(path) = reference_file {
		info!("Using reference data from {:?}", path);
		let dump = ReferenceDump::from_file(path)
			.with_context(|| format!("Failed to read reference file: {:?}", path))?;
		return Ok(networks
			.into_iter()
			.map(|network| Arc::new(StaticSource::new(network, dump.clone())) as Arc<dyn ReferenceSource>)
			.collect());
	}

	let reference = &settings.reference;
	let mut sources: Vec<Arc<dyn ReferenceSource>> = Vec::with_capacity(networks.len());
	for network in networks {
		let endpoint = settings
			.endpoint(network)
			.with_context(|| format!("No REST endpoint configured for {}", network))?;
		let source = CarbonRestSource::builder(network, endpoint)
			.request_timeout(Duration::from_secs(reference.request_timeout_secs))
			.retry_policy(RetryPolicy::new(
				reference.max_retries,
				Duration::from_secs(reference.max_elapsed_secs),
			))
			.page_limit(reference.page_limit)
			.build()
			.with_context(|| format!("Failed to create REST client for {}", network))?;
		info!("Using {} for {}", source.base_url(), network);
		sources.push(Arc::new(source));
	}
	Ok(sources)
}
