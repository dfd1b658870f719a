//! Client-level error types shared across configuration, authentication, transport, and the
//! carrier operations.

// self
use crate::_prelude::*;

/// Client-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;
type JsonPathError = serde_path_to_error::Error<serde_json::Error>;

/// Canonical client error exposed by public APIs.
///
/// Every operation returns either a usable value or exactly one of these; nothing is retried.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Token exchange failed or returned unusable data.
	#[error(transparent)]
	Auth(#[from] AuthError),
	/// Network failure or an unexpected HTTP status from a carrier endpoint.
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Carrier response body does not match the expected shape.
	#[error(transparent)]
	Decode(#[from] DecodeError),
	/// Caller input was rejected before any request was sent.
	#[error(transparent)]
	Validation(#[from] ValidationError),
	/// Well-formed response lacking the requested information.
	#[error(transparent)]
	NotFound(#[from] NotFoundError),
}
impl Error {
	/// Returns the HTTP status code attached to the failure, when one is known.
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Auth(AuthError::Rejected { status, .. }) => *status,
			Self::Auth(AuthError::Parse { status, .. }) => *status,
			Self::Transport(TransportError::Status { status, .. }) => Some(*status),
			Self::Transport(TransportError::Network { source }) =>
				source.downcast_ref::<ReqwestError>().and_then(|e| e.status()).map(|s| s.as_u16()),
			_ => None,
		}
	}
}

/// Configuration failures raised while building a client.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// Carrier account identifier was not supplied.
	#[error("Carrier account identifier is missing.")]
	MissingAccount,
	/// Carrier account secret was not supplied.
	#[error("Carrier account secret is missing.")]
	MissingSecret,
	/// Neither a base URL nor an environment was supplied.
	#[error("Carrier base URL is missing.")]
	MissingBaseUrl,
	/// Base URL (or an endpoint joined onto it) cannot be parsed.
	#[error("Carrier base URL is invalid.")]
	InvalidBaseUrl {
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
	/// Base URL uses a scheme other than HTTP(S) or cannot carry a path.
	#[error("Carrier base URL must be an absolute http(s) URL: {url}.")]
	UnsupportedBaseUrl {
		/// Offending URL.
		url: String,
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
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Failures of the client-credentials token exchange.
#[derive(Debug, ThisError)]
pub enum AuthError {
	/// Token request could not be constructed.
	#[error("Token request could not be constructed.")]
	Request {
		/// Underlying construction failure.
		#[source]
		source: BoxError,
	},
	/// Network failure while calling the token endpoint.
	#[error("Network error occurred while calling the token endpoint.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Token endpoint refused the exchange.
	#[error("Token endpoint rejected the exchange: {message}.")]
	Rejected {
		/// Provider- or client-supplied message summarizing the failure.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint responded with JSON that is not a token object.
	#[error("Token endpoint returned malformed JSON.")]
	Parse {
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
	/// Token endpoint returned an empty access token.
	#[error("Token endpoint returned an empty access token.")]
	EmptyToken,
	/// Token endpoint returned an excessively large `expires_in`.
	#[error("The expires_in value exceeds the supported range.")]
	ExpiresInOutOfRange,
}
impl AuthError {
	/// Wraps a request construction failure.
	pub fn request(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Request { source: Box::new(src) }
	}

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}

/// Transport-level failures of carrier API calls.
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Carrier answered with a status other than 200 or 202.
	#[error("Carrier endpoint `{endpoint}` responded with HTTP status {status}.")]
	Status {
		/// Endpoint path relative to the base URL.
		endpoint: String,
		/// HTTP status code.
		status: u16,
	},
	/// Underlying HTTP client reported a network failure (DNS, TCP, TLS, body read).
	#[error("Network error occurred while calling the carrier.")]
	Network {
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
}
impl TransportError {
	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { source: Box::new(src) }
	}
}
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		Self::network(e)
	}
}

/// Response bodies that failed to decode into the expected shape.
#[derive(Debug, ThisError)]
pub enum DecodeError {
	/// Body is not valid JSON for the expected type.
	#[error("Carrier endpoint `{endpoint}` returned an unexpected body at `{}`.", .source.path())]
	Json {
		/// Endpoint path relative to the base URL.
		endpoint: String,
		/// Structured parsing failure.
		#[source]
		source: JsonPathError,
	},
	/// Request body could not be encoded.
	#[error("Request body for `{endpoint}` could not be encoded.")]
	Encode {
		/// Endpoint path relative to the base URL.
		endpoint: String,
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
}

/// Caller input rejected before dispatch.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum ValidationError {
	/// Address query was empty.
	#[error("Address query cannot be empty.")]
	EmptyAddress,
	/// Order UUID was empty.
	#[error("Order UUID cannot be empty.")]
	EmptyOrderUuid,
	/// Recipient has no phone numbers.
	#[error("Recipient `{name}` must have at least one phone number.")]
	MissingPhone {
		/// Recipient name.
		name: String,
	},
	/// Order carries no packages.
	#[error("Order must contain at least one package.")]
	NoPackages,
	/// Package carries no items.
	#[error("Package `{number}` must contain at least one item.")]
	EmptyPackage {
		/// Package number.
		number: String,
	},
	/// Item weight is negative.
	#[error("Item `{ware_key}` has a negative weight ({weight}).")]
	NegativeItemWeight {
		/// Item key.
		ware_key: String,
		/// Offending weight.
		weight: i32,
	},
	/// Item amount is below one.
	#[error("Item `{ware_key}` must have an amount of at least 1 (got {amount}).")]
	InvalidItemAmount {
		/// Item key.
		ware_key: String,
		/// Offending amount.
		amount: i32,
	},
}

/// Carrier answered correctly but without the requested information.
#[derive(Clone, Debug, PartialEq, Eq, ThisError)]
pub enum NotFoundError {
	/// No delivery point matched the address query.
	#[error("Address is not verified: `{query}`.")]
	Address {
		/// Original query, returned unchanged.
		query: String,
	},
	/// Order entity listed no statuses.
	#[error("No status information found for order `{uuid}`.")]
	Status {
		/// Order UUID.
		uuid: String,
	},
}
