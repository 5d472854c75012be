//! Identity-provider extension points (behavior) and their settings (data).
//!
//! [`SocialProvider`] is the capability set a host framework needs from an adapter: a constant
//! identity, profile building, and settings rebinding. [`SocialProfileParser`] is the pure hook
//! that maps a provider's success payload into a normalized profile. `cognito` implements both
//! for Amazon Cognito hosted domains.

pub mod cognito;
pub mod settings;

pub use cognito::*;
pub use settings::*;

// self
use crate::{
	_prelude::*,
	auth::{OAuth2Info, ProviderId},
};

/// Boxed future returned by [`SocialProvider::build_profile`].
pub type ProfileFuture<'a, P> = Pin<Box<dyn Future<Output = Result<P>> + 'a + Send>>;

/// Pure mapping from a provider payload into a profile.
///
/// Implementations never perform I/O; provider-declared errors are detected before the parser
/// runs.
pub trait SocialProfileParser<Content>
where
	Self: Send + Sync,
{
	/// Profile type produced by the parser.
	type Profile;

	/// Maps `content` into a profile, failing when required fields are missing.
	fn parse(&self, content: &Content, info: &OAuth2Info) -> Result<Self::Profile>;
}

/// Capability set a host framework requires from an identity-provider adapter.
///
/// Providers are immutable values: [`SocialProvider::with_settings`] returns a new instance
/// and leaves `self` untouched, so concurrent callers never observe each other's settings.
pub trait SocialProvider
where
	Self: Send + Sync,
{
	/// Raw payload type handed to the parser.
	type Content;
	/// Profile type returned by [`SocialProvider::build_profile`].
	type Profile;
	/// Parser hook used once the payload is known to be a success shape.
	type Parser: SocialProfileParser<Self::Content, Profile = Self::Profile>;

	/// Constant identity used to tell linked identities apart.
	fn id(&self) -> &ProviderId;

	/// Settings bound to this instance.
	fn settings(&self) -> &Settings;

	/// Parser bound to this instance.
	fn profile_parser(&self) -> &Self::Parser;

	/// Returns a new provider holding `f(self.settings())` and sharing every collaborator.
	fn with_settings<F>(&self, f: F) -> Self
	where
		Self: Sized,
		F: FnOnce(&Settings) -> Settings;

	/// Retrieves the profile belonging to the token in `info`.
	fn build_profile<'a>(&'a self, info: &'a OAuth2Info) -> ProfileFuture<'a, Self::Profile>;
}
