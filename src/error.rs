//! Client-level error types shared by the throttle, transports, and the document codec.

// std
use std::path::PathBuf;
// self
use crate::_prelude::*;

/// Crate-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, IO).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// The caller stopped waiting before a permit was granted.
	#[error(transparent)]
	Interrupted(#[from] InterruptedWait),
	/// Document could not be encoded or decoded.
	#[error(transparent)]
	Codec(#[from] CodecError),
}

/// Configuration and validation failures raised while wiring a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// A throttle needs at least one permit.
	#[error("Throttle capacity must be positive.")]
	ZeroCapacity,
	/// Requested capacity exceeds what the permit pool can represent.
	#[error("Throttle capacity {capacity} exceeds the supported maximum of {max}.")]
	CapacityTooLarge {
		/// Capacity that was requested.
		capacity: usize,
		/// Largest supported capacity.
		max: usize,
	},
	/// Submission endpoint cannot be parsed.
	#[error("Submission endpoint is invalid.")]
	InvalidEndpoint {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
impl From<url::ParseError> for ConfigError {
	fn from(e: url::ParseError) -> Self {
		Self::InvalidEndpoint { source: e }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while submitting the document.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while submitting the document.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Reasons a caller gave up waiting for a throttle permit.
///
/// No permit is held when one of these is returned.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum InterruptedWait {
	/// The caller-supplied wait budget ran out.
	#[error("No throttle permit became available within {waited:?}.")]
	Deadline {
		/// Wait budget that elapsed.
		waited: Duration,
	},
	/// The throttle was closed and no longer admits callers.
	#[error("Throttle is closed.")]
	Closed,
}

/// Document serialization failures.
#[derive(Debug, ThisError)]
pub enum CodecError {
	/// Document JSON does not match the expected schema.
	#[error("Document JSON is malformed at `{}`.", .source.path())]
	Decode {
		/// Structured parsing failure carrying the offending path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// JSON encoding failed or the input carried trailing data.
	#[error(transparent)]
	Json(#[from] serde_json::Error),
	/// Document file could not be read.
	#[error("Failed to read document from {}.", .path.display())]
	Read {
		/// Path that failed to load.
		path: PathBuf,
		/// Underlying IO failure.
		#[source]
		source: std::io::Error,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn interrupted_wait_converts_into_error() {
		let err = Error::from(InterruptedWait::Closed);

		assert!(matches!(err, Error::Interrupted(InterruptedWait::Closed)));
		assert_eq!(err.to_string(), "Throttle is closed.");
	}

	#[test]
	fn endpoint_parse_failures_map_to_config_errors() {
		let parse = url::Url::parse("not a url").expect_err("Garbage input should not parse.");
		let err = Error::from(ConfigError::from(parse));

		assert!(matches!(err, Error::Config(ConfigError::InvalidEndpoint { .. })));
	}
}
