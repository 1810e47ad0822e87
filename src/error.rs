//! SDK-wide error taxonomy shared across the client, token handlers, and webhook parsing.

// self
use crate::_prelude::*;

/// SDK-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical SDK error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// No access token could be resolved from arguments or the environment.
	#[error("Access token API not set. Please set a valid value.")]
	AccessTokenNotSet,
	/// The Graph API rejected the credential (HTTP 401).
	#[error("{message}")]
	Unauthorized {
		/// Upstream-supplied message, or the fixed default.
		message: String,
	},
	/// The Graph API throttled the caller (HTTP 429).
	#[error("{message}")]
	RateLimitExceeded {
		/// Upstream-supplied message, or the fixed default.
		message: String,
	},
	/// The Graph API failed internally (HTTP 500).
	#[error("{message}")]
	InternalServerError {
		/// Upstream-supplied message, or the fixed default.
		message: String,
	},
	/// Any other non-2xx or unclassified failure.
	#[error("{message}")]
	Generic {
		/// Upstream-supplied message, or the fixed default.
		message: String,
	},

	/// A required fetch parameter was absent from the parameter bag.
	#[error("Missing required parameter `{name}`.")]
	MissingParameter {
		/// Parameter name as it appears on the wire.
		name: &'static str,
	},
	/// Token endpoint response omitted the `access_token` field.
	#[error("Token endpoint response is missing access_token.")]
	MissingAccessToken,
	/// The debug endpoint rejected the supplied client token.
	#[error("Invalid client token.")]
	InvalidClientToken,
	/// `me/accounts` returned no page records for the supplied user token.
	#[error("No pages found for the provided user access token.")]
	NoPagesFound,
	/// The system-user token listing was empty.
	#[error("No system user tokens found.")]
	NoSystemUserTokens,
	/// The refresh grant failed or returned no replacement token.
	#[error("Failed to refresh access token.")]
	TokenRefreshFailed,
	/// The webhook payload is not a `page` envelope carrying entries.
	#[error("Invalid/Unknown Facebook Message Event.")]
	InvalidWebhookEvent,

	/// A request URL could not be assembled.
	#[error("Request URL is invalid.")]
	InvalidUrl(#[from] url::ParseError),
	/// Transport failure (DNS, TCP, TLS).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// A 2xx response body could not be deserialized into the expected shape.
	#[error("Response body returned malformed JSON.")]
	ResponseParse {
		/// Structured parsing failure with path context.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
		/// HTTP status code, when the failure came from a live response.
		status: Option<u16>,
	},
}
impl Error {
	/// Classifies an HTTP status into the matching taxonomy variant.
	///
	/// The message defaults to a fixed human-readable string per variant and is
	/// overridden verbatim when the upstream body supplied one. 2xx statuses never
	/// reach this factory; callers classify only after observing a failure.
	pub fn from_status(status: u16, message: Option<String>) -> Self {
		match status {
			401 => Self::Unauthorized {
				message: message
					.unwrap_or_else(|| "Unauthorized: Invalid or expired access token.".into()),
			},
			429 => Self::RateLimitExceeded {
				message: message
					.unwrap_or_else(|| "Rate limit exceeded. Please try again later.".into()),
			},
			500 => Self::InternalServerError {
				message: message
					.unwrap_or_else(|| "Internal server error. Please try again later.".into()),
			},
			_ => Self::Generic {
				message: message.unwrap_or_else(|| "An unknown error occurred.".into()),
			},
		}
	}
}

/// Transport-level failures (network, IO).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the Graph API.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the Graph API.")]
	Io(#[from] std::io::Error),
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + StdError) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn status_factory_maps_known_codes() {
		assert!(matches!(Error::from_status(401, None), Error::Unauthorized { .. }));
		assert!(matches!(Error::from_status(429, None), Error::RateLimitExceeded { .. }));
		assert!(matches!(Error::from_status(500, None), Error::InternalServerError { .. }));
		assert!(matches!(Error::from_status(418, None), Error::Generic { .. }));
		assert!(matches!(Error::from_status(503, None), Error::Generic { .. }));
	}

	#[test]
	fn status_factory_prefers_upstream_messages() {
		let err = Error::from_status(401, Some("token was revoked".into()));

		assert_eq!(err.to_string(), "token was revoked");

		let err = Error::from_status(429, None);

		assert_eq!(err.to_string(), "Rate limit exceeded. Please try again later.");

		let err = Error::from_status(500, None);

		assert_eq!(err.to_string(), "Internal server error. Please try again later.");

		let err = Error::from_status(404, None);

		assert_eq!(err.to_string(), "An unknown error occurred.");
	}
}
