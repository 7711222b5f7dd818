use rand::rngs::OsRng;
use rand::RngCore;

use crate::resolver::ResolverTarget;
use crate::stats::{self, Statistics};
use crate::transport::{self, BenchConfig, QueryOutcome};

/// All outcomes and derived statistics for one resolver in one run.
#[derive(Debug)]
pub struct ResolverRunResult {
	pub target: ResolverTarget,
	pub outcomes: Vec<QueryOutcome>,
	pub stats: Statistics,
}

/// Run the benchmark across all targets.
///
/// Strictly sequential: one query in flight at a time, targets in
/// input order, so concurrent load never skews the latencies being
/// measured. Per-query failures are folded into the outcomes and
/// never abort the run. Results come back in target order.
pub async fn run_benchmark(
	targets: &[ResolverTarget],
	config: &BenchConfig,
) -> Vec<ResolverRunResult> {
	let mut results = Vec::with_capacity(targets.len());

	for target in targets {
		let mut outcomes = Vec::with_capacity(config.count);
		for _ in 0..config.count {
			let qname = if config.cold {
				format!("{}.{}", random_label(), config.domain)
			} else {
				config.domain.clone()
			};
			let outcome = transport::execute(
				target, &qname, config.query_type, config.timeout,
			).await;
			outcomes.push(outcome);
		}
		let stats = stats::summarize(&outcomes);
		results.push(ResolverRunResult {
			target: target.clone(),
			outcomes,
			stats,
		});
	}

	results
}

/// Generate a random 16-hex-char subdomain label for cold mode.
///
/// Drawn from the OS random source so labels never collide or repeat
/// across runs, which would let resolver caches answer them.
pub fn random_label() -> String {
	let mut bytes = [0u8; 8];
	OsRng.fill_bytes(&mut bytes);
	bytes.iter().map(|b| format!("{:02x}", b)).collect()
}
