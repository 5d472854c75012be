//! Adapter-level error types shared across settings, transport, and profile parsing.

// self
use crate::{_prelude::*, auth::ProviderId};

/// Adapter-wide result type alias returning [`Error`] by default.
pub type Result<T, E = Error> = std::result::Result<T, E>;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Canonical adapter error exposed by public APIs.
#[derive(Debug, ThisError)]
pub enum Error {
	/// Local configuration problem.
	#[error(transparent)]
	Config(#[from] ConfigError),
	/// Transport failure (DNS, TCP, TLS, unexpected HTTP status).
	#[error(transparent)]
	Transport(#[from] TransportError),
	/// Profile endpoint reported an error or returned an unusable body.
	#[error(transparent)]
	Profile(#[from] ProfileError),
}

/// Configuration failures raised while preparing the profile request.
#[derive(Debug, ThisError)]
pub enum ConfigError {
	/// HTTP client could not be constructed.
	#[error("HTTP client could not be constructed.")]
	HttpClientBuild {
		/// Underlying transport builder failure.
		#[source]
		source: BoxError,
	},
	/// HTTP request construction failed.
	#[error(transparent)]
	HttpRequest(#[from] oauth2::http::Error),
	/// A custom property required to template the profile URL is absent.
	#[error("Settings are missing the `{key}` custom property.")]
	MissingCustomProperty {
		/// Name of the missing property.
		key: &'static str,
	},
	/// The templated profile URL cannot be parsed.
	#[error("Profile URL `{url}` is invalid.")]
	InvalidProfileUrl {
		/// URL produced after templating.
		url: String,
		/// Underlying parsing failure.
		#[source]
		source: url::ParseError,
	},
}
impl ConfigError {
	/// Wraps a transport's builder failure inside [`ConfigError`].
	pub fn http_client_build(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::HttpClientBuild { source: Box::new(src) }
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for ConfigError {
	fn from(e: ReqwestError) -> Self {
		Self::http_client_build(e)
	}
}

/// Transport-level failures (network, IO, HTTP status without a provider error body).
#[derive(Debug, ThisError)]
pub enum TransportError {
	/// Underlying HTTP client reported a network failure.
	#[error("Network error occurred while calling the profile endpoint.")]
	Network {
		/// HTTP status code, when the failure happened after the response head arrived.
		status: Option<u16>,
		/// Transport-specific network error.
		#[source]
		source: BoxError,
	},
	/// Underlying IO failure surfaced during transport.
	#[error("I/O error occurred while calling the profile endpoint.")]
	Io(#[from] std::io::Error),
	/// Profile endpoint answered with a non-success status and no provider error object.
	#[error("Profile endpoint responded with HTTP {status}: {body_preview}")]
	UnexpectedStatus {
		/// HTTP status code.
		status: u16,
		/// Truncated response body.
		body_preview: String,
	},
	/// Transport failure that does not fit the other variants.
	#[error("HTTP client error occurred while calling the profile endpoint: {message}")]
	Other {
		/// Transport-supplied description.
		message: String,
		/// HTTP status code, when available.
		status: Option<u16>,
	},
}
impl TransportError {
	const BODY_PREVIEW_LIMIT: usize = 256;

	/// Wraps a transport-specific network error.
	pub fn network(src: impl 'static + Send + Sync + std::error::Error) -> Self {
		Self::Network { status: None, source: Box::new(src) }
	}

	/// Wraps a transport-specific network error observed after the response status was known.
	pub fn network_with_status(
		src: impl 'static + Send + Sync + std::error::Error,
		status: Option<u16>,
	) -> Self {
		Self::Network { status, source: Box::new(src) }
	}

	/// Builds a [`TransportError::UnexpectedStatus`] from a raw response body.
	pub fn unexpected_status(status: u16, body: &[u8]) -> Self {
		Self::UnexpectedStatus {
			status,
			body_preview: truncate_preview(&String::from_utf8_lossy(body)),
		}
	}
}
#[cfg(feature = "reqwest")]
impl From<ReqwestError> for TransportError {
	fn from(e: ReqwestError) -> Self {
		let status = e.status().map(|status| status.as_u16());

		Self::network_with_status(e, status)
	}
}

/// Failures tied to the profile endpoint's payload.
#[derive(Debug, ThisError)]
pub enum ProfileError {
	/// Provider answered with an `error` object.
	#[error(
		"[{provider}] Error retrieving profile information. Error message: {message}, type: {kind}, code: {code}"
	)]
	Retrieval {
		/// Provider that produced the error.
		provider: ProviderId,
		/// Provider-supplied `message`.
		message: String,
		/// Provider-supplied `type`.
		kind: String,
		/// Provider-supplied `code`.
		code: i64,
	},
	/// Profile endpoint returned a body that is not JSON.
	#[error("Profile endpoint returned malformed JSON.")]
	MalformedBody {
		/// HTTP status code of the response.
		status: u16,
		/// Underlying JSON failure.
		#[source]
		source: serde_json::Error,
	},
	/// JSON body does not match the expected profile or error shape.
	#[error("[{provider}] Profile response could not be parsed at `{}`.", .source.path())]
	Parse {
		/// Provider whose response failed to parse.
		provider: ProviderId,
		/// Structured parsing failure.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
}

fn truncate_preview(body: &str) -> String {
	if body.chars().count() <= TransportError::BODY_PREVIEW_LIMIT {
		return body.to_owned();
	}

	let mut buf = String::new();

	for (idx, ch) in body.chars().enumerate() {
		if idx >= TransportError::BODY_PREVIEW_LIMIT {
			buf.push('…');

			break;
		}
		buf.push(ch);
	}

	buf
}
