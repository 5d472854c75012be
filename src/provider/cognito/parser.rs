//! Maps Cognito `userInfo` payloads into [`CommonSocialProfile`] values.

// crates.io
use serde::Deserializer;
use serde_json::Value;
// self
use crate::{
	_prelude::*,
	auth::{OAuth2Info, ProviderId},
	error::ProfileError,
	profile::{CommonSocialProfile, LoginInfo},
	provider::{SocialProfileParser, cognito},
};

/// Success shape of the Cognito `userInfo` endpoint.
#[derive(Debug, Deserialize)]
struct UserInfo {
	username: String,
	#[serde(default, deserialize_with = "string_or_none")]
	given_name: Option<String>,
	#[serde(default, deserialize_with = "string_or_none")]
	family_name: Option<String>,
	#[serde(default, deserialize_with = "string_or_none")]
	email: Option<String>,
}

// Optional claims never fail the parse; anything but a JSON string reads as absent.
fn string_or_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
	D: Deserializer<'de>,
{
	match Value::deserialize(deserializer)? {
		Value::String(value) => Ok(Some(value)),
		_ => Ok(None),
	}
}

/// Parser for Cognito `userInfo` success bodies.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CognitoProfileParser {
	provider: ProviderId,
}
impl CognitoProfileParser {
	/// Creates a parser that stamps profiles with `provider`.
	pub fn new(provider: ProviderId) -> Self {
		Self { provider }
	}
}
impl Default for CognitoProfileParser {
	fn default() -> Self {
		Self::new(ProviderId::from_static(cognito::PROVIDER_ID))
	}
}
impl SocialProfileParser<Value> for CognitoProfileParser {
	type Profile = CommonSocialProfile;

	fn parse(&self, content: &Value, _info: &OAuth2Info) -> Result<Self::Profile> {
		let user: UserInfo = serde_path_to_error::deserialize(content)
			.map_err(|source| ProfileError::Parse { provider: self.provider.clone(), source })?;

		Ok(CommonSocialProfile {
			login_info: LoginInfo::new(self.provider.clone(), user.username.clone()),
			first_name: user.given_name,
			last_name: user.family_name,
			// Mirrors `username`, not given + family name; downstream linking depends on it.
			full_name: Some(user.username),
			email: user.email,
		})
	}
}
