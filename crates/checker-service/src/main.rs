use anyhow::{Context, Result};
use checker_config::{load_settings, CheckerSettings};
use checker_core::Orchestrator;
use checker_types::{Network, ReferenceSource};
use clap::Parser;
use std::process::ExitCode;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod listing;
mod sources;

use cli::{Args, Command, LogFormat};

#[tokio::main]
async fn main() -> Result<ExitCode> {
	let args = Args::parse();

	setup_tracing(&args.log_level, args.log_format)?;

	let mut settings =
		load_settings(args.settings.as_deref()).context("Failed to load checker settings")?;

	match &args.command {
		Some(Command::Bridges { network }) => {
			let source = single_source(*network, &settings, &args)?;
			for line in listing::bridge_table(source.as_ref()).await? {
				println!("{}", line);
			}
			return Ok(ExitCode::SUCCESS);
		}
		Some(Command::PerpPools { network }) => {
			let source = single_source(*network, &settings, &args)?;
			println!("{}", listing::perp_pool_list(source.as_ref()).await?);
			return Ok(ExitCode::SUCCESS);
		}
		None => {}
	}

	if let Some(config_dir) = &args.config_dir {
		settings.config_dir = config_dir.clone();
	}
	info!("Reading config documents from {:?}", settings.config_dir);

	let mut builder = Orchestrator::builder().with_config_dir(&settings.config_dir);
	for source in sources::build_sources(&args.networks, &settings, args.reference_file.as_deref())? {
		builder = builder.with_source(source);
	}
	let orchestrator = builder.build().context("Failed to build orchestrator")?;

	let outcome = orchestrator
		.run(&args.networks)
		.await
		.context("Config check aborted")?;

	if args.json {
		println!("{}", serde_json::to_string_pretty(&outcome)?);
		eprintln!("{}", outcome.summary_line());
	} else {
		for line in outcome.render() {
			println!("{}", line);
		}
	}

	Ok(if outcome.passed() {
		ExitCode::SUCCESS
	} else {
		ExitCode::FAILURE
	})
}

fn single_source(
	network: Network,
	settings: &CheckerSettings,
	args: &Args,
) -> Result<Arc<dyn ReferenceSource>> {
	sources::build_sources(&[network], settings, args.reference_file.as_deref())?
		.pop()
		.context("No reference source available")
}

fn setup_tracing(log_level: &str, format: LogFormat) -> Result<()> {
	let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
		.unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

	let registry = tracing_subscriber::registry().with(env_filter);
	match format {
		LogFormat::Pretty => registry
			.with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
			.try_init(),
		LogFormat::Json => registry
			.with(
				tracing_subscriber::fmt::layer()
					.json()
					.with_writer(std::io::stderr),
			)
			.try_init(),
	}
	.context("Failed to initialize tracing")?;

	Ok(())
}
