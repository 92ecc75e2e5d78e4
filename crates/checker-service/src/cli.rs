//! Command-line interface definitions.

use checker_types::Network;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "check-configs")]
#[command(about = "Validate per-network front-end configs against on-chain reference data", long_about = None)]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Args {
	/// Networks to check (mainnet, testnet, devnet, localhost)
	#[arg(required = true, value_name = "NETWORK")]
	pub networks: Vec<Network>,

	#[command(subcommand)]
	pub command: Option<Command>,

	/// Directory holding the <network>.json documents
	#[arg(long, value_name = "DIR")]
	pub config_dir: Option<PathBuf>,

	/// Path to the checker settings file
	#[arg(long, value_name = "FILE", env = "CHECKER_SETTINGS", global = true)]
	pub settings: Option<PathBuf>,

	/// Read reference data from a JSON dump instead of the REST endpoints
	#[arg(long, value_name = "FILE", global = true)]
	pub reference_file: Option<PathBuf>,

	/// Log level (trace, debug, info, warn, error)
	#[arg(long, env = "CHECKER_LOG_LEVEL", default_value = "info", global = true)]
	pub log_level: String,

	#[arg(long, value_enum, default_value_t = LogFormat::Pretty, global = true)]
	pub log_format: LogFormat,

	/// Print the run outcome as JSON
	#[arg(long)]
	pub json: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
	/// List enabled bridges as `Chain Name | Bridge Name | Bridge Address(es)`
	Bridges {
		#[arg(value_name = "NETWORK")]
		network: Network,
	},

	/// List perp pool ids
	PerpPools {
		#[arg(value_name = "NETWORK")]
		network: Network,
	},
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
	Pretty,
	Json,
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_parses_networks_case_insensitively() {
		let args = Args::try_parse_from(["check-configs", "Mainnet", "testnet"]).unwrap();
		assert_eq!(args.networks, vec![Network::Mainnet, Network::Testnet]);
		assert!(args.command.is_none());
		assert_eq!(args.log_format, LogFormat::Pretty);
		assert!(!args.json);
	}

	#[test]
	fn test_unknown_network_is_usage_error() {
		let err = Args::try_parse_from(["check-configs", "mainnet", "moonnet"]).unwrap_err();
		assert_eq!(err.exit_code(), 2);
		assert!(err.to_string().contains("moonnet"));
	}

	#[test]
	fn test_listing_subcommands() {
		let args = Args::try_parse_from(["check-configs", "bridges", "Mainnet"]).unwrap();
		assert_eq!(args.command, Some(Command::Bridges { network: Network::Mainnet }));
		assert!(args.networks.is_empty());

		let args = Args::try_parse_from([
			"check-configs",
			"perp-pools",
			"devnet",
			"--reference-file",
			"dump.json",
		])
		.unwrap();
		assert_eq!(args.command, Some(Command::PerpPools { network: Network::Devnet }));
		assert_eq!(args.reference_file, Some(PathBuf::from("dump.json")));

		assert!(Args::try_parse_from(["check-configs", "bridges"]).is_err());
		assert!(Args::try_parse_from(["check-configs", "bridges", "moonnet"]).is_err());
	}

	#[test]
	fn test_requires_a_network() {
		assert!(Args::try_parse_from(["check-configs"]).is_err());
	}

	#[test]
	fn test_optional_flags() {
		let args = Args::try_parse_from([
			"check-configs",
			"devnet",
			"--config-dir",
			"deploy/configs",
			"--reference-file",
			"dump.json",
			"--log-format",
			"json",
			"--json",
		])
		.unwrap();
		assert_eq!(args.config_dir, Some(PathBuf::from("deploy/configs")));
		assert_eq!(args.reference_file, Some(PathBuf::from("dump.json")));
		assert_eq!(args.log_format, LogFormat::Json);
		assert!(args.json);
	}
}
