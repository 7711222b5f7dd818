use std::collections::HashSet;
use std::time::Duration;

use crate::transport::QueryOutcome;

/// Summary statistics over one resolver's query outcomes.
///
/// When `successes` is zero the five duration fields are
/// `Duration::ZERO` sentinels and must be rendered as "not available"
/// rather than as measurements.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
	pub count: usize,
	pub successes: usize,
	pub min: Duration,
	pub max: Duration,
	pub avg: Duration,
	pub median: Duration,
	pub p95: Duration,
	/// Distinct failure messages, in first-occurrence order
	pub distinct_errors: Vec<String>,
}

impl Statistics {
	pub fn success_pct(&self) -> f64 {
		if self.count == 0 {
			return 0.0;
		}
		100.0 * self.successes as f64 / self.count as f64
	}
}

/// Calculate the p-th percentile from a sorted slice by linear
/// interpolation between closest ranks.
///
/// position = (p/100) * (n-1); the result interpolates between the
/// order statistics bracketing that position. p <= 0 returns the first
/// element, p >= 100 the last.
///
/// Returns None if the slice is empty.
pub fn percentile(sorted_values: &[f64], p: f64) -> Option<f64> {
	if sorted_values.is_empty() {
		return None;
	}
	if p <= 0.0 {
		return Some(sorted_values[0]);
	}
	if p >= 100.0 {
		return Some(sorted_values[sorted_values.len() - 1]);
	}
	let pos = (p / 100.0) * (sorted_values.len() - 1) as f64;
	let lo = pos.floor() as usize;
	let hi = pos.ceil() as usize;
	if lo == hi {
		return Some(sorted_values[lo]);
	}
	let frac = pos - lo as f64;
	Some(sorted_values[lo] * (1.0 - frac) + sorted_values[hi] * frac)
}

/// Calculate the arithmetic mean of a slice of values.
pub fn mean(values: &[f64]) -> Option<f64> {
	if values.is_empty() {
		return None;
	}
	let sum: f64 = values.iter().sum();
	Some(sum / values.len() as f64)
}

/// Summarize a sequence of query outcomes.
///
/// min/max/avg/median/p95 are computed over successful outcomes only;
/// avg/median/p95 work in fractional milliseconds and are stored back
/// as durations. Failed outcomes contribute their error messages to
/// `distinct_errors`, deduplicated in first-occurrence order.
pub fn summarize(outcomes: &[QueryOutcome]) -> Statistics {
	let mut stats = Statistics {
		count: outcomes.len(),
		..Default::default()
	};

	let mut success_ms: Vec<f64> = Vec::new();
	let mut min = Duration::MAX;
	let mut max = Duration::ZERO;
	let mut seen = HashSet::new();

	for outcome in outcomes {
		match &outcome.error {
			None => {
				success_ms.push(outcome.elapsed.as_secs_f64() * 1000.0);
				min = min.min(outcome.elapsed);
				max = max.max(outcome.elapsed);
			}
			Some(error) => {
				let msg = error.to_string();
				if seen.insert(msg.clone()) {
					stats.distinct_errors.push(msg);
				}
			}
		}
	}

	stats.successes = success_ms.len();
	if stats.successes == 0 {
		// Leave the duration fields at their ZERO sentinels
		return stats;
	}

	stats.min = min;
	stats.max = max;

	let avg_ms = mean(&success_ms).unwrap_or(0.0);
	stats.avg = Duration::from_secs_f64(avg_ms / 1000.0);

	success_ms.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
	let median_ms = percentile(&success_ms, 50.0).unwrap_or(0.0);
	let p95_ms = percentile(&success_ms, 95.0).unwrap_or(0.0);
	stats.median = Duration::from_secs_f64(median_ms / 1000.0);
	stats.p95 = Duration::from_secs_f64(p95_ms / 1000.0);

	stats
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::transport::QueryError;

	fn success(ms: u64) -> QueryOutcome {
		QueryOutcome {
			elapsed: Duration::from_millis(ms),
			error: None,
		}
	}

	fn failure(ms: u64) -> QueryOutcome {
		QueryOutcome {
			elapsed: Duration::from_millis(ms),
			error: Some(QueryError::Timeout(Duration::from_millis(ms))),
		}
	}

	fn ms(d: Duration) -> f64 {
		d.as_secs_f64() * 1000.0
	}

	fn assert_close(actual: f64, expected: f64) {
		assert!(
			(actual - expected).abs() < 1e-6,
			"expected {}, got {}",
			expected, actual,
		);
	}

	#[test]
	fn test_percentile_endpoints() {
		let values = vec![10.0, 20.0, 30.0, 40.0];
		assert_eq!(percentile(&values, 0.0), Some(10.0));
		assert_eq!(percentile(&values, 100.0), Some(40.0));
		assert_eq!(percentile(&values, -5.0), Some(10.0));
		assert_eq!(percentile(&values, 150.0), Some(40.0));
	}

	#[test]
	fn test_percentile_interpolates() {
		// position = 0.5 * 3 = 1.5, halfway between 20 and 30
		let values = vec![10.0, 20.0, 30.0, 40.0];
		assert_close(percentile(&values, 50.0).unwrap(), 25.0);
	}

	#[test]
	fn test_percentile_exact_rank() {
		let values = vec![10.0, 20.0, 30.0, 40.0, 50.0];
		assert_close(percentile(&values, 50.0).unwrap(), 30.0);
		// position = 0.95 * 4 = 3.8 -> 40*(0.2) + 50*(0.8)
		assert_close(percentile(&values, 95.0).unwrap(), 48.0);
	}

	#[test]
	fn test_percentile_empty_and_single() {
		let empty: Vec<f64> = vec![];
		assert_eq!(percentile(&empty, 50.0), None);
		assert_eq!(percentile(&[42.0], 50.0), Some(42.0));
		assert_eq!(percentile(&[42.0], 95.0), Some(42.0));
	}

	#[test]
	fn test_mean() {
		assert_eq!(mean(&[1.0, 2.0, 3.0, 4.0, 5.0]), Some(3.0));
		let empty: Vec<f64> = vec![];
		assert_eq!(mean(&empty), None);
	}

	#[test]
	fn test_summarize_all_success() {
		let outcomes: Vec<QueryOutcome> =
			[10, 20, 30, 40, 50].iter().map(|&ms| success(ms)).collect();
		let stats = summarize(&outcomes);

		assert_eq!(stats.count, 5);
		assert_eq!(stats.successes, 5);
		assert_eq!(stats.min, Duration::from_millis(10));
		assert_eq!(stats.max, Duration::from_millis(50));
		assert_close(ms(stats.avg), 30.0);
		assert_close(ms(stats.median), 30.0);
		assert_close(ms(stats.p95), 48.0);
		assert_close(stats.success_pct(), 100.0);
		assert!(stats.distinct_errors.is_empty());
	}

	#[test]
	fn test_summarize_mixed() {
		let outcomes = vec![success(10), failure(1500), success(20), failure(1500)];
		let stats = summarize(&outcomes);

		assert_eq!(stats.count, 4);
		assert_eq!(stats.successes, 2);
		assert_eq!(stats.min, Duration::from_millis(10));
		assert_eq!(stats.max, Duration::from_millis(20));
		assert_close(ms(stats.avg), 15.0);
		assert_close(stats.success_pct(), 50.0);
		// Both failures carry the same message, so one distinct error
		assert_eq!(stats.distinct_errors.len(), 1);
		assert!(stats.distinct_errors[0].contains("timed out"));
	}

	#[test]
	fn test_summarize_no_successes_uses_sentinels() {
		let outcomes = vec![failure(1500), failure(1500)];
		let stats = summarize(&outcomes);

		assert_eq!(stats.count, 2);
		assert_eq!(stats.successes, 0);
		assert_eq!(stats.min, Duration::ZERO);
		assert_eq!(stats.max, Duration::ZERO);
		assert_eq!(stats.avg, Duration::ZERO);
		assert_eq!(stats.median, Duration::ZERO);
		assert_eq!(stats.p95, Duration::ZERO);
		assert_close(stats.success_pct(), 0.0);
	}

	#[test]
	fn test_summarize_empty() {
		let stats = summarize(&[]);
		assert_eq!(stats.count, 0);
		assert_eq!(stats.successes, 0);
		assert_close(stats.success_pct(), 0.0);
	}

	#[test]
	fn test_summarize_invariants() {
		let outcomes = vec![success(5), failure(100), success(7)];
		let stats = summarize(&outcomes);
		assert_eq!(stats.count, outcomes.len());
		assert!(stats.successes <= stats.count);
	}

	#[test]
	fn test_median_matches_p50() {
		let outcomes: Vec<QueryOutcome> =
			[12, 7, 31, 24, 18, 3].iter().map(|&ms| success(ms)).collect();
		let stats = summarize(&outcomes);

		let mut sorted: Vec<f64> = outcomes.iter()
			.map(|o| o.elapsed.as_secs_f64() * 1000.0)
			.collect();
		sorted.sort_by(|a, b| a.partial_cmp(b).unwrap());

		assert_close(ms(stats.median), percentile(&sorted, 50.0).unwrap());
		assert_close(ms(stats.p95), percentile(&sorted, 95.0).unwrap());
	}

	#[test]
	fn test_distinct_errors_first_occurrence_order() {
		let outcomes = vec![
			QueryOutcome {
				elapsed: Duration::from_millis(1),
				error: Some(QueryError::ServerFailure("NXDomain".to_string())),
			},
			failure(1500),
			QueryOutcome {
				elapsed: Duration::from_millis(1),
				error: Some(QueryError::ServerFailure("NXDomain".to_string())),
			},
		];
		let stats = summarize(&outcomes);
		assert_eq!(stats.distinct_errors.len(), 2);
		assert_eq!(stats.distinct_errors[0], "server returned NXDomain");
		assert!(stats.distinct_errors[1].contains("timed out"));
	}
}
