/// Well-known public resolvers used when no -r/--resolvers flag is given.
pub const DEFAULT_RESOLVERS: &str =
	"Cloudflare=1.1.1.1,Google=8.8.8.8,Quad9=9.9.9.9,OpenDNS=208.67.222.222,AdGuard=94.140.14.14";

/// A single named resolver to benchmark.
///
/// The name is a display key only; uniqueness is not enforced and
/// results are kept in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverTarget {
	pub name: String,
	pub host: String,
	pub port: u16,
}

/// Parse a comma-separated list of Name=Host[:Port] resolver specs.
///
/// Supports formats:
///   "Cloudflare=1.1.1.1"        -- default port 53
///   "Local=127.0.0.1:5353"      -- explicit port
///   "CF6=2606:4700::1111"       -- bare IPv6, default port 53
///   "CF6=[2606:4700::1111]:53"  -- bracketed IPv6 with port
///
/// Segments are trimmed; empty segments and segments without '=' are
/// skipped rather than failing the whole parse. An address whose port
/// suffix does not parse is kept whole as the host, so the failure
/// surfaces per-query instead of dropping the target silently.
/// Callers must treat an empty result as a fatal configuration error.
pub fn parse_resolver_specs(input: &str) -> Vec<ResolverTarget> {
	let mut targets = Vec::new();
	for segment in input.split(',') {
		let segment = segment.trim();
		if segment.is_empty() {
			continue;
		}
		let Some((name, addr)) = segment.split_once('=') else {
			continue;
		};
		let name = name.trim();
		let addr = addr.trim();

		let (host, port) = if let Some(rest) = addr.strip_prefix('[') {
			// Bracketed IPv6 with optional port: [::1]:53
			match rest.split_once(']') {
				Some((v6, tail)) => {
					let port = tail
						.strip_prefix(':')
						.and_then(|p| p.parse().ok())
						.unwrap_or(53);
					(v6.to_string(), port)
				}
				None => (rest.to_string(), 53),
			}
		} else if addr.matches(':').count() > 1 {
			// Bare IPv6 address without port
			(addr.to_string(), 53)
		} else if let Some((host, port)) = addr.split_once(':') {
			match port.parse::<u16>() {
				Ok(port) => (host.to_string(), port),
				Err(_) => (addr.to_string(), 53),
			}
		} else {
			(addr.to_string(), 53)
		};

		targets.push(ResolverTarget {
			name: name.to_string(),
			host,
			port,
		});
	}
	targets
}
