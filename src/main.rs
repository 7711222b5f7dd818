mod bench;
mod cli;
mod dns;
mod output;
mod resolver;
mod stats;
mod transport;

use std::time::Duration;

use anyhow::bail;
use clap::Parser;

use crate::cli::Cli;
use crate::transport::{BenchConfig, QueryType};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();

	let targets = resolver::parse_resolver_specs(&cli.resolvers);
	if targets.is_empty() {
		bail!("no valid resolvers in '{}'", cli.resolvers);
	}

	let config = BenchConfig {
		domain: cli.domain,
		count: cli.count,
		timeout: Duration::from_millis(cli.timeout),
		query_type: QueryType::from_network(&cli.network),
		cold: cli.cold,
	};

	output::print_header(&config);

	let results = bench::run_benchmark(&targets, &config).await;

	output::print_report(&results);

	// The console report is already out; a CSV failure only affects
	// the exit code, not the measurements.
	if let Some(path) = &cli.out {
		output::write_csv(path, &results)?;
		println!("\nCSV written to: {}", path);
	}

	Ok(())
}
