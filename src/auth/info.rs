//! Token bundle handed to the adapter by the host framework.

// crates.io
use oauth2::{
	TokenResponse,
	basic::{BasicTokenResponse, BasicTokenType},
};
// self
use crate::{_prelude::*, auth::TokenSecret};

/// OAuth 2.0 token bundle obtained by the host framework's authorization flow.
///
/// Profile retrieval only reads [`OAuth2Info::access_token`]; the remaining fields are carried so
/// hosts can persist the bundle next to the linked identity.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuth2Info {
	/// Bearer token presented to the profile endpoint.
	pub access_token: TokenSecret,
	/// Token type reported by the token endpoint (usually `bearer`).
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub token_type: Option<String>,
	/// Lifetime of the access token, carried as whole seconds on the wire.
	#[serde(default, skip_serializing_if = "Option::is_none", with = "expires_in_secs")]
	pub expires_in: Option<Duration>,
	/// Refresh token, when the provider issued one.
	#[serde(default, skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<TokenSecret>,
	/// Additional token endpoint parameters.
	#[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
	pub params: BTreeMap<String, String>,
}
impl OAuth2Info {
	/// Creates a bundle holding only an access token.
	pub fn new(access_token: impl Into<String>) -> Self {
		Self {
			access_token: TokenSecret::new(access_token),
			token_type: None,
			expires_in: None,
			refresh_token: None,
			params: BTreeMap::new(),
		}
	}

	/// Sets the token type.
	pub fn with_token_type(mut self, token_type: impl Into<String>) -> Self {
		self.token_type = Some(token_type.into());

		self
	}

	/// Sets the access token lifetime.
	pub fn with_expires_in(mut self, expires_in: Duration) -> Self {
		self.expires_in = Some(expires_in);

		self
	}

	/// Sets the refresh token.
	pub fn with_refresh_token(mut self, refresh_token: impl Into<String>) -> Self {
		self.refresh_token = Some(TokenSecret::new(refresh_token));

		self
	}

	/// Adds an extra token endpoint parameter.
	pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.params.insert(key.into(), value.into());

		self
	}
}
impl From<&BasicTokenResponse> for OAuth2Info {
	fn from(response: &BasicTokenResponse) -> Self {
		let token_type = match response.token_type() {
			BasicTokenType::Bearer => "bearer".to_owned(),
			BasicTokenType::Mac => "mac".to_owned(),
			BasicTokenType::Extension(value) => value.clone(),
		};
		let mut info =
			Self::new(response.access_token().secret().to_owned()).with_token_type(token_type);

		info.expires_in = response.expires_in().and_then(|value| Duration::try_from(value).ok());
		info.refresh_token =
			response.refresh_token().map(|value| TokenSecret::new(value.secret().to_owned()));

		if let Some(scopes) = response.scopes().filter(|scopes| !scopes.is_empty()) {
			let joined = scopes.iter().map(|scope| scope.as_str()).collect::<Vec<_>>().join(" ");

			info.params.insert("scope".into(), joined);
		}

		info
	}
}

mod expires_in_secs {
	// crates.io
	use serde::{Deserialize, Deserializer, Serializer};
	use time::Duration;

	pub fn serialize<S>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match value {
			Some(duration) => serializer.serialize_some(&duration.whole_seconds()),
			None => serializer.serialize_none(),
		}
	}

	pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
	where
		D: Deserializer<'de>,
	{
		Ok(Option::<i64>::deserialize(deserializer)?.map(Duration::seconds))
	}
}
