//! Settings loading from files and environment.

use crate::types::*;
use anyhow::{Context, Result};
use checker_types::Network;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings loader
pub struct SettingsLoader;

impl SettingsLoader {
	/// Load settings from file
	pub fn from_file<P: AsRef<Path>>(path: P) -> Result<CheckerSettings> {
		let path = path.as_ref();
		info!("Loading settings from {:?}", path);

		let contents = std::fs::read_to_string(path)
			.with_context(|| format!("Failed to read settings file: {:?}", path))?;

		let mut settings = match path.extension().and_then(|s| s.to_str()) {
			Some("toml") => Self::from_toml(&contents)?,
			Some("json") => Self::from_json(&contents)?,
			Some("yaml") | Some("yml") => Self::from_yaml(&contents)?,
			_ => anyhow::bail!("Unsupported settings format: {:?}", path),
		};

		Self::fill_default_endpoints(&mut settings);
		Self::validate_settings(&settings)?;
		Ok(settings)
	}

	/// Load from TOML string
	pub fn from_toml(contents: &str) -> Result<CheckerSettings> {
		toml::from_str(contents).map_err(|e| anyhow::anyhow!("Failed to parse TOML: {}", e))
	}

	/// Load from JSON string
	pub fn from_json(contents: &str) -> Result<CheckerSettings> {
		serde_json::from_str(contents).context("Failed to parse JSON")
	}

	/// Load from YAML string
	pub fn from_yaml(contents: &str) -> Result<CheckerSettings> {
		serde_yaml::from_str(contents).context("Failed to parse YAML")
	}

	/// Load from environment variables with optional file override
	pub fn from_env_and_file(file_path: Option<&Path>) -> Result<CheckerSettings> {
		let mut settings = if let Some(path) = file_path {
			Self::from_file(path)?
		} else {
			CheckerSettings::default()
		};

		Self::apply_env_overrides(&mut settings, std::env::vars())?;

		Self::validate_settings(&settings)?;
		Ok(settings)
	}

	/// A partial `endpoints` table only replaces the networks it names.
	fn fill_default_endpoints(settings: &mut CheckerSettings) {
		for (network, url) in default_endpoints() {
			settings.endpoints.entry(network).or_insert(url);
		}
	}

	/// Apply environment variable overrides
	fn apply_env_overrides<I>(settings: &mut CheckerSettings, vars: I) -> Result<()>
	where
		I: IntoIterator<Item = (String, String)>,
	{
		for (key, value) in vars {
			if key == "CHECKER_CONFIG_DIR" {
				debug!("Overriding config directory from environment");
				settings.config_dir = PathBuf::from(value);
			} else if key == "CHECKER_MAX_RETRIES" {
				settings.reference.max_retries = value
					.parse()
					.with_context(|| format!("Invalid CHECKER_MAX_RETRIES: {}", value))?;
			} else if let Some(name) = key.strip_prefix("CHECKER_REST_URL_") {
				if let Ok(network) = name.parse::<Network>() {
					debug!("Overriding REST endpoint for {} from environment", network);
					settings
						.endpoints
						.insert(network.as_str().to_string(), value);
				}
			}
		}

		Ok(())
	}

	/// Validate settings
	fn validate_settings(settings: &CheckerSettings) -> Result<()> {
		for (network, url) in &settings.endpoints {
			if network.parse::<Network>().is_err() {
				anyhow::bail!("Endpoint configured for unknown network '{}'", network);
			}
			if !url.starts_with("http://") && !url.starts_with("https://") {
				anyhow::bail!("Endpoint for {} must be an HTTP/HTTPS URL: {}", network, url);
			}
		}

		if settings.reference.page_limit == 0 {
			anyhow::bail!("reference.page_limit must be greater than 0");
		}

		if settings.reference.request_timeout_secs == 0 {
			anyhow::bail!("reference.request_timeout_secs must be greater than 0");
		}

		Ok(())
	}
}

/// Load settings from standard locations
pub fn load_settings(explicit: Option<&Path>) -> Result<CheckerSettings> {
	// Check for a settings file in order:
	// 1. Explicit path (CLI flag or CHECKER_SETTINGS)
	// 2. ./checker.toml
	// 3. ./config/checker.toml
	// 4. Defaults with env overrides

	if let Some(path) = explicit {
		return SettingsLoader::from_env_and_file(Some(path));
	}

	let paths = ["./checker.toml", "./config/checker.toml"];

	for path in &paths {
		if Path::new(path).exists() {
			return SettingsLoader::from_env_and_file(Some(Path::new(path)));
		}
	}

	SettingsLoader::from_env_and_file(None)
}
