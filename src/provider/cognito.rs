//! Amazon Cognito hosted-domain provider.
//!
//! [`CognitoProvider::build_profile`](crate::provider::SocialProvider::build_profile) resolves
//! the `userInfo` URL from [`Settings`], issues a single authenticated `GET`, and branches on
//! the JSON body: a top-level `error` object becomes [`ProfileError::Retrieval`], anything else
//! goes through [`CognitoProfileParser`]. There are no retries and no caching; one call means
//! exactly one outbound request, and none at all when the settings cannot produce a URL.

pub mod parser;

pub use parser::*;

// crates.io
use oauth2::{
	AsyncHttpClient,
	http::{
		Method, Request,
		header::{ACCEPT, AUTHORIZATION},
	},
};
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{OAuth2Info, ProviderId},
	error::{ConfigError, ProfileError, TransportError},
	http::{ProfileHttpClient, ResponseMetadataSlot},
	oauth::TransportErrorMapper,
	obs::{self, ProfileOutcome, ProfileSpan},
	profile::CommonSocialProfile,
	provider::{ProfileFuture, Settings, SocialProfileParser, SocialProvider},
};
#[cfg(feature = "reqwest")]
use crate::{http::ReqwestHttpClient, oauth::ReqwestTransportErrorMapper};

/// Provider identity reported to the host framework.
pub const PROVIDER_ID: &str = "cognito";
/// Profile endpoint template; `%s` is replaced by the `domainName` custom property.
pub const DEFAULT_API_URL: &str = "https://%s.auth.eu-central-1.amazoncognito.com/oauth2/userInfo";

#[cfg(feature = "reqwest")]
/// Provider specialized for the crate's default reqwest transport stack.
pub type ReqwestCognitoProvider = CognitoProvider<ReqwestHttpClient, ReqwestTransportErrorMapper>;

/// Error shape of the `userInfo` endpoint.
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
	error: ErrorBody,
}
#[derive(Debug, Deserialize)]
struct ErrorBody {
	message: String,
	#[serde(rename = "type")]
	kind: String,
	code: i64,
}

/// Retrieves Cognito user profiles for an already-issued access token.
///
/// The provider owns its [`Settings`] by value and shares the transport and mapper through
/// `Arc`, so [`SocialProvider::with_settings`] is cheap and never aliases configuration
/// across instances.
pub struct CognitoProvider<C, M>
where
	C: ?Sized + ProfileHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// HTTP client wrapper used for every outbound profile request.
	pub http_client: Arc<C>,
	/// Mapper applied to transport-layer errors before surfacing them to callers.
	pub transport_mapper: Arc<M>,
	id: ProviderId,
	settings: Settings,
	parser: CognitoProfileParser,
}
impl<C, M> CognitoProvider<C, M>
where
	C: ?Sized + ProfileHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	/// Creates a provider that reuses the caller-provided transport + mapper pair.
	pub fn with_http_client(
		settings: Settings,
		http_client: impl Into<Arc<C>>,
		mapper: impl Into<Arc<M>>,
	) -> Self {
		let id = ProviderId::from_static(PROVIDER_ID);

		Self {
			http_client: http_client.into(),
			transport_mapper: mapper.into(),
			parser: CognitoProfileParser::new(id.clone()),
			id,
			settings,
		}
	}

	async fn fetch_profile(&self, info: &OAuth2Info) -> Result<CommonSocialProfile> {
		let url = self.settings.profile_url(DEFAULT_API_URL)?;
		let request = Request::builder()
			.method(Method::GET)
			.uri(url.as_str())
			.header(AUTHORIZATION, info.access_token.bearer_header())
			.header(ACCEPT, "application/json")
			.body(Vec::new())
			.map_err(ConfigError::from)?;
		let slot = ResponseMetadataSlot::default();
		let handle = self.http_client.with_metadata(slot.clone());
		let response = handle.call(request).await.map_err(|err| {
			let meta = slot.take();

			self.transport_mapper.map_transport_error(meta.as_ref(), err)
		})?;
		let status = response.status();
		let body = response.body();
		let content = match serde_json::from_slice::<Value>(body) {
			Ok(content) => content,
			Err(_) if !status.is_success() =>
				return Err(TransportError::unexpected_status(status.as_u16(), body).into()),
			Err(source) =>
				return Err(ProfileError::MalformedBody { status: status.as_u16(), source }.into()),
		};

		if content.get("error").is_some_and(Value::is_object) {
			return Err(self.retrieval_error(&content));
		}
		if !status.is_success() {
			return Err(TransportError::unexpected_status(status.as_u16(), body).into());
		}

		self.parser.parse(&content, info)
	}

	fn retrieval_error(&self, content: &Value) -> Error {
		let envelope: Result<ErrorEnvelope, _> = serde_path_to_error::deserialize(content);

		match envelope {
			Ok(ErrorEnvelope { error }) => ProfileError::Retrieval {
				provider: self.id.clone(),
				message: error.message,
				kind: error.kind,
				code: error.code,
			}
			.into(),
			Err(source) => ProfileError::Parse { provider: self.id.clone(), source }.into(),
		}
	}
}
#[cfg(feature = "reqwest")]
impl CognitoProvider<ReqwestHttpClient, ReqwestTransportErrorMapper> {
	/// Creates a provider backed by a default reqwest transport.
	pub fn new(settings: Settings) -> Self {
		Self::with_http_client(
			settings,
			ReqwestHttpClient::default(),
			Arc::new(ReqwestTransportErrorMapper),
		)
	}
}
impl<C, M> SocialProvider for CognitoProvider<C, M>
where
	C: ?Sized + ProfileHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	type Content = Value;
	type Parser = CognitoProfileParser;
	type Profile = CommonSocialProfile;

	fn id(&self) -> &ProviderId {
		&self.id
	}

	fn settings(&self) -> &Settings {
		&self.settings
	}

	fn profile_parser(&self) -> &Self::Parser {
		&self.parser
	}

	fn with_settings<F>(&self, f: F) -> Self
	where
		F: FnOnce(&Settings) -> Settings,
	{
		Self { settings: f(&self.settings), ..self.clone() }
	}

	fn build_profile<'a>(&'a self, info: &'a OAuth2Info) -> ProfileFuture<'a, Self::Profile> {
		Box::pin(async move {
			let span = ProfileSpan::new(&self.id, "build_profile");

			obs::record_profile_outcome(&self.id, ProfileOutcome::Attempt);

			let result = span.instrument(self.fetch_profile(info)).await;

			match &result {
				Ok(_) => obs::record_profile_outcome(&self.id, ProfileOutcome::Success),
				Err(_) => obs::record_profile_outcome(&self.id, ProfileOutcome::Failure),
			}

			result
		})
	}
}
impl<C, M> Clone for CognitoProvider<C, M>
where
	C: ?Sized + ProfileHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn clone(&self) -> Self {
		Self {
			http_client: Arc::clone(&self.http_client),
			transport_mapper: Arc::clone(&self.transport_mapper),
			id: self.id.clone(),
			settings: self.settings.clone(),
			parser: self.parser.clone(),
		}
	}
}
impl<C, M> Debug for CognitoProvider<C, M>
where
	C: ?Sized + ProfileHttpClient,
	M: ?Sized + TransportErrorMapper<C::TransportError>,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("CognitoProvider")
			.field("id", &self.id)
			.field("settings", &self.settings)
			.finish()
	}
}
