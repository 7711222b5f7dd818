use std::net::Ipv6Addr;
use std::time::{Duration, Instant};

use hickory_proto::op::ResponseCode;
use thiserror::Error;
use tokio::net::UdpSocket;

use crate::dns::{build_query, parse_response};
use crate::resolver::ResolverTarget;

/// DNS query type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryType {
	A,
	AAAA,
}

impl QueryType {
	/// Map a network flag value to a query type.
	///
	/// "ip6"/"ipv6" select AAAA; anything else, including unrecognized
	/// tokens, falls back to A.
	pub fn from_network(network: &str) -> Self {
		match network.to_ascii_lowercase().as_str() {
			"ip6" | "ipv6" => QueryType::AAAA,
			_ => QueryType::A,
		}
	}

	pub fn network(&self) -> &'static str {
		match self {
			QueryType::A => "ip4",
			QueryType::AAAA => "ip6",
		}
	}
}

/// Benchmark configuration
#[derive(Debug, Clone)]
pub struct BenchConfig {
	pub domain: String,
	pub count: usize,
	pub timeout: Duration,
	pub query_type: QueryType,
	pub cold: bool,
}

/// Why a single query attempt failed.
///
/// Display strings double as the distinct-error keys in reports, so
/// they stay short and stable.
#[derive(Debug, Error)]
pub enum QueryError {
	#[error("timed out after {}ms", .0.as_millis())]
	Timeout(Duration),
	#[error("network error: {0}")]
	Io(#[from] std::io::Error),
	#[error("invalid query: {0}")]
	InvalidQuery(String),
	#[error("server returned {0}")]
	ServerFailure(String),
	#[error("no valid response after {0} receive attempts")]
	NoValidResponse(usize),
}

/// Outcome of a single query attempt.
///
/// The attempt succeeded iff `error` is `None`; `elapsed` is wall-clock
/// time from attempt start to the definitive outcome, including any
/// time spent waiting out the deadline.
#[derive(Debug)]
pub struct QueryOutcome {
	pub elapsed: Duration,
	pub error: Option<QueryError>,
}

impl QueryOutcome {
	pub fn is_success(&self) -> bool {
		self.error.is_none()
	}
}

const MAX_RECV_ATTEMPTS: usize = 3;

/// Perform one resolution attempt against a specific resolver.
///
/// Binds a dedicated socket per query to avoid response stealing
/// between queries, sends a single UDP query, and waits for a
/// definitive answer. The whole attempt is bounded by `timeout`.
/// No retries of the query itself: one attempt, one outcome.
pub async fn execute(
	target: &ResolverTarget,
	qname: &str,
	query_type: QueryType,
	timeout: Duration,
) -> QueryOutcome {
	let start = Instant::now();
	let error = match tokio::time::timeout(timeout, attempt(target, qname, query_type)).await {
		Ok(Ok(())) => None,
		Ok(Err(e)) => Some(e),
		Err(_) => Some(QueryError::Timeout(timeout)),
	};
	QueryOutcome {
		elapsed: start.elapsed(),
		error,
	}
}

async fn attempt(
	target: &ResolverTarget,
	qname: &str,
	query_type: QueryType,
) -> Result<(), QueryError> {
	let txid: u16 = rand::random();
	let query_bytes = build_query(qname, query_type, txid)
		.map_err(|e| QueryError::InvalidQuery(e.to_string()))?;

	let bind_addr = if target.host.parse::<Ipv6Addr>().is_ok() {
		"[::]:0"
	} else {
		"0.0.0.0:0"
	};
	let socket = UdpSocket::bind(bind_addr).await?;
	socket
		.send_to(&query_bytes, (target.host.as_str(), target.port))
		.await?;

	// Re-receive on txid mismatch or garbage datagrams; the outer
	// deadline still bounds the whole exchange.
	// 4096-byte buffer to handle EDNS-extended responses.
	let mut buf = vec![0u8; 4096];
	for _ in 0..MAX_RECV_ATTEMPTS {
		let (len, _src) = socket.recv_from(&mut buf).await?;
		let response = match parse_response(&buf[..len], txid) {
			Ok(response) => response,
			Err(_) => continue,
		};
		if response.rcode == ResponseCode::NoError {
			return Ok(());
		}
		return Err(QueryError::ServerFailure(response.rcode_str));
	}

	Err(QueryError::NoValidResponse(MAX_RECV_ATTEMPTS))
}
