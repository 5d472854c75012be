//! Fetches the Cognito profile behind an access token.
//!
//! ```sh
//! cargo run --example fetch_profile -- <domain-name> <access-token> [api-url-template]
//! ```
//!
//! The optional third argument overrides the `userInfo` template, e.g. for a hosted domain
//! outside `eu-central-1`: `https://%s.auth.us-east-1.amazoncognito.com/oauth2/userInfo`.

// std
use std::env;
// crates.io
use color_eyre::{Result, eyre::eyre};
// self
use cognito_profile::{
	auth::OAuth2Info,
	provider::{ReqwestCognitoProvider, Settings, SocialProvider},
};

#[tokio::main]
async fn main() -> Result<()> {
	color_eyre::install()?;

	let mut args = env::args().skip(1);
	let usage = || eyre!("Usage: fetch_profile <domain-name> <access-token> [api-url-template]");
	let domain_name = args.next().ok_or_else(usage)?;
	let access_token = args.next().ok_or_else(usage)?;
	let mut settings = Settings::with_domain_name(domain_name);

	if let Some(api_url) = args.next() {
		settings = settings.with_api_url(api_url);
	}

	let provider = ReqwestCognitoProvider::new(settings);
	let profile = provider.build_profile(&OAuth2Info::new(access_token)).await?;

	println!("Signed in as {} via {}.", profile.login_info.provider_key, provider.id());

	if let Some(email) = profile.email.as_deref() {
		println!("Email: {email}.");
	}

	Ok(())
}
