use clap::Parser;

use crate::resolver::DEFAULT_RESOLVERS;

/// DNS resolver benchmark tool
#[derive(Parser, Debug)]
#[command(name = "resolver-bench")]
#[command(about = "Measure DNS resolver latency and reliability over UDP")]
pub struct Cli {
	/// Domain to resolve
	#[arg(short = 'd', long = "domain", default_value = "example.com")]
	pub domain: String,

	/// Number of queries per resolver
	#[arg(short = 'n', long = "count", default_value = "10")]
	pub count: usize,

	/// Per-query timeout in milliseconds
	#[arg(short = 't', long = "timeout", default_value = "1500")]
	pub timeout: u64,

	/// Network to query: ip4 (A records) or ip6 (AAAA records)
	#[arg(long = "network", default_value = "ip4")]
	pub network: String,

	/// Cold mode: prepend a fresh random subdomain to every query to
	/// bust resolver caches
	#[arg(long = "cold")]
	pub cold: bool,

	/// Resolvers as a comma-separated Name=Host[:Port] list
	#[arg(short = 'r', long = "resolvers", default_value = DEFAULT_RESOLVERS)]
	pub resolvers: String,

	/// Optional CSV output path
	#[arg(short = 'o', long = "out")]
	pub out: Option<String>,
}
