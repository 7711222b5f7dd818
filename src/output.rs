use std::time::Duration;

use anyhow::{anyhow, Result};
use comfy_table::{presets::UTF8_FULL, ContentArrangement, Table};

use crate::bench::ResolverRunResult;
use crate::transport::BenchConfig;

/// Print the benchmark configuration header before running.
pub fn print_header(config: &BenchConfig) {
	let mode = if config.cold { "COLD" } else { "WARM" };
	println!("DNS Benchmark");
	println!(
		"Target: {} | Runs: {} | Timeout: {}ms | Network: {} | Mode: {}",
		config.domain,
		config.count,
		config.timeout.as_millis(),
		config.query_type.network(),
		mode,
	);
}

/// Print the per-resolver results table, then the distinct errors
/// observed for each resolver on indented lines.
pub fn print_report(results: &[ResolverRunResult]) {
	let mut table = Table::new();
	table.load_preset(UTF8_FULL);
	table.set_content_arrangement(ContentArrangement::Dynamic);
	table.set_header(vec![
		"Resolver", "Min", "Avg", "Median", "p95", "Max", "Success %",
	]);

	for result in results {
		let s = &result.stats;
		table.add_row(vec![
			result.target.name.clone(),
			fmt_ms(s.min),
			fmt_ms(s.avg),
			fmt_ms(s.median),
			fmt_ms(s.p95),
			fmt_ms(s.max),
			format!("{:.1}%", s.success_pct()),
		]);
	}

	println!("\n{table}");

	for result in results {
		if result.stats.distinct_errors.is_empty() {
			continue;
		}
		println!("{}:", result.target.name);
		for error in &result.stats.distinct_errors {
			println!("  ! {}", error);
		}
	}
}

/// Write benchmark results to a CSV file.
///
/// The file has two sections separated by a blank line: a per-resolver
/// summary, then one row per individual query in issuance order.
pub fn write_csv(path: &str, results: &[ResolverRunResult]) -> Result<()> {
	let bytes = render_csv(results)?;
	std::fs::write(path, bytes)
		.map_err(|e| anyhow!("failed to write CSV '{}': {}", path, e))?;
	Ok(())
}

/// Render both CSV sections to bytes. Split out from file I/O so the
/// output can be round-tripped in tests.
pub fn render_csv(results: &[ResolverRunResult]) -> Result<Vec<u8>> {
	// Section 1: per-resolver summary
	let mut writer = csv::Writer::from_writer(Vec::new());
	writer.write_record([
		"resolver", "count", "successes",
		"min_ms", "avg_ms", "median_ms", "p95_ms", "max_ms",
		"errors",
	])?;
	for result in results {
		let s = &result.stats;
		writer.write_record([
			result.target.name.clone(),
			s.count.to_string(),
			s.successes.to_string(),
			csv_ms(s.min),
			csv_ms(s.avg),
			csv_ms(s.median),
			csv_ms(s.p95),
			csv_ms(s.max),
			s.distinct_errors.join(" | "),
		])?;
	}
	let mut buf = writer.into_inner()
		.map_err(|e| anyhow!("failed to flush CSV summary: {}", e))?;

	// Blank separator line between the sections
	buf.push(b'\n');

	// Section 2: raw per-query rows, 0-based index in issuance order
	let mut writer = csv::Writer::from_writer(buf);
	writer.write_record(["resolver", "run_index", "duration_ms", "error"])?;
	for result in results {
		for (index, outcome) in result.outcomes.iter().enumerate() {
			writer.write_record([
				result.target.name.clone(),
				index.to_string(),
				csv_ms(outcome.elapsed),
				outcome.error.as_ref().map(|e| e.to_string()).unwrap_or_default(),
			])?;
		}
	}
	writer.into_inner()
		.map_err(|e| anyhow!("failed to flush CSV rows: {}", e))
}

/// Format a duration as tenths of a millisecond, or "--" for the
/// zero sentinel (no successful queries).
fn fmt_ms(d: Duration) -> String {
	if d.is_zero() {
		return "--".to_string();
	}
	format!("{:.1}ms", d.as_secs_f64() * 1000.0)
}

fn csv_ms(d: Duration) -> String {
	format!("{:.3}", d.as_secs_f64() * 1000.0)
}
