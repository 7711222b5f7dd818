use anyhow::{anyhow, Result};
use hickory_proto::op::{Message, MessageType, Query, ResponseCode};
use hickory_proto::rr::{Name, RecordType};

use crate::transport::QueryType;

/// Response fields extracted from a parsed DNS message
#[derive(Debug)]
pub struct DnsResponse {
	pub rcode: ResponseCode,
	pub rcode_str: String,
}

/// Build a DNS query message for the given domain and query type.
///
/// Returns the serialized query bytes ready to send over UDP.
pub fn build_query(domain: &str, query_type: QueryType, txid: u16) -> Result<Vec<u8>> {
	let name = Name::from_ascii(domain)
		.map_err(|e| anyhow!("invalid domain name '{}': {}", domain, e))?;

	let record_type = match query_type {
		QueryType::A => RecordType::A,
		QueryType::AAAA => RecordType::AAAA,
	};

	let mut message = Message::new();
	message.set_id(txid);
	message.set_recursion_desired(true);
	message.add_query(Query::query(name, record_type));

	let bytes = message.to_vec()
		.map_err(|e| anyhow!("failed to serialize DNS query: {}", e))?;
	Ok(bytes)
}

/// Parse a DNS response, validating the transaction ID and extracting the rcode.
///
/// Returns an error if the response cannot be parsed or the txid does not match.
pub fn parse_response(bytes: &[u8], expected_txid: u16) -> Result<DnsResponse> {
	let message = Message::from_vec(bytes)
		.map_err(|e| anyhow!("failed to parse DNS response: {}", e))?;

	// Validate transaction ID
	if message.id() != expected_txid {
		return Err(anyhow!(
			"txid mismatch: expected {}, got {}",
			expected_txid, message.id()
		));
	}

	// Verify this is a response, not a query
	if message.message_type() != MessageType::Response {
		return Err(anyhow!("received a query instead of a response"));
	}

	let rcode = message.response_code();
	let rcode_str = format!("{}", rcode);

	Ok(DnsResponse { rcode, rcode_str })
}
