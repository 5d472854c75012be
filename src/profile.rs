//! Normalized profile records shared by every identity-provider adapter.

// self
use crate::{_prelude::*, auth::ProviderId};

/// Pair that uniquely identifies a user within one identity provider.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LoginInfo {
	/// Provider that authenticated the user.
	pub provider_id: ProviderId,
	/// Provider-scoped user key.
	pub provider_key: String,
}
impl LoginInfo {
	/// Creates a new login pair.
	pub fn new(provider_id: ProviderId, provider_key: impl Into<String>) -> Self {
		Self { provider_id, provider_key: provider_key.into() }
	}
}

/// Profile shape handed back to the host framework for identity linking.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommonSocialProfile {
	/// Login pair of the profile owner.
	pub login_info: LoginInfo,
	/// Given name.
	pub first_name: Option<String>,
	/// Family name.
	pub last_name: Option<String>,
	/// Display name.
	pub full_name: Option<String>,
	/// Email address.
	pub email: Option<String>,
}
