//! Per-deployment provider settings.

// self
use crate::{_prelude::*, error::ConfigError};

/// Immutable configuration for one provider instance.
///
/// Hosts deserialize this straight from configuration (`apiURL`, `customProperties`). Providers
/// never mutate it; see [`SocialProvider::with_settings`](crate::provider::SocialProvider::with_settings)
/// for rebinding.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
	/// Override for the profile endpoint template. `%s` is replaced by the domain name.
	#[serde(rename = "apiURL", default, skip_serializing_if = "Option::is_none")]
	pub api_url: Option<String>,
	/// Free-form properties; profile retrieval requires [`Settings::DOMAIN_NAME_KEY`].
	#[serde(rename = "customProperties", default)]
	pub custom_properties: BTreeMap<String, String>,
}
impl Settings {
	/// Custom property holding the hosted domain prefix.
	pub const DOMAIN_NAME_KEY: &'static str = "domainName";

	/// Shortcut for settings that only carry the domain name.
	pub fn with_domain_name(domain_name: impl Into<String>) -> Self {
		Self::default().with_custom_property(Self::DOMAIN_NAME_KEY, domain_name)
	}

	/// Sets the profile endpoint template override.
	pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
		self.api_url = Some(api_url.into());

		self
	}

	/// Inserts or replaces a custom property.
	pub fn with_custom_property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.custom_properties.insert(key.into(), value.into());

		self
	}

	/// Returns the configured domain name, if any.
	pub fn domain_name(&self) -> Option<&str> {
		self.custom_properties.get(Self::DOMAIN_NAME_KEY).map(String::as_str)
	}

	/// Resolves the profile endpoint.
	///
	/// The override wins over `default_template`; the first `%s` is replaced by the domain name.
	/// The substituted string then goes through [`Url::parse`], so the request targets its
	/// normalized form: hosts are lowercased (`ACME` resolves to `acme.…`) and dot segments
	/// and default ports are dropped.
	pub fn profile_url(&self, default_template: &str) -> Result<Url, ConfigError> {
		let template = self.api_url.as_deref().unwrap_or(default_template);
		let domain_name = self
			.domain_name()
			.ok_or(ConfigError::MissingCustomProperty { key: Self::DOMAIN_NAME_KEY })?;
		let url = template.replacen("%s", domain_name, 1);

		Url::parse(&url).map_err(|source| ConfigError::InvalidProfileUrl { url, source })
	}
}
