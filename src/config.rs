//! Explicit SDK configuration.
//!
//! Every component receives its configuration at construction time; only
//! [`GraphConfig::from_env`] touches the process environment, and explicit
//! setters always win over environment-resolved values.

// self
use crate::{_prelude::*, auth::TokenSecret};

/// Default Graph API host.
pub const DEFAULT_HOST: &str = "https://graph.facebook.com";
/// Default Graph API version prefix.
pub const DEFAULT_VERSION: &str = "v12.0";

const ENV_ACCESS_TOKEN: &str = "META_ACCESS_TOKEN";
const ENV_CLIENT_ID: &str = "META_CLIENT_ID";
const ENV_CLIENT_SECRET: &str = "META_CLIENT_SECRET";
const ENV_APP_TOKEN: &str = "META_APP_TOKEN";

/// Authentication options resolved once at client construction.
#[derive(Clone, Debug)]
pub struct AuthOptions {
	/// Forces an `access_token` query parameter onto every outgoing request.
	pub use_access_token: bool,
	/// OAuth client identifier used by the app and user token strategies.
	pub client_id: Option<String>,
	/// OAuth client secret used by the app and user token strategies.
	pub client_secret: Option<String>,
	/// Grant used by the refresh-token source; defaults to `refresh_token`.
	pub grant_type: Option<String>,
}
impl Default for AuthOptions {
	fn default() -> Self {
		Self { use_access_token: true, client_id: None, client_secret: None, grant_type: None }
	}
}

/// Immutable SDK configuration shared by the client, handlers, and token sources.
#[derive(Clone, Debug)]
pub struct GraphConfig {
	/// Graph API host, scheme included.
	pub host: String,
	/// Graph API version path segment.
	pub version: String,
	/// Authentication options.
	pub auth: AuthOptions,
	/// Default bearer injected by the client when `auth.use_access_token` is set.
	pub access_token: Option<TokenSecret>,
	/// Application-level bearer consumed by the client and system-user strategies.
	pub app_token: Option<TokenSecret>,
}
impl GraphConfig {
	/// Creates a config with the production host/version and default auth options.
	pub fn new() -> Self {
		Self {
			host: DEFAULT_HOST.into(),
			version: DEFAULT_VERSION.into(),
			auth: AuthOptions::default(),
			access_token: None,
			app_token: None,
		}
	}

	/// Resolves a config from the process environment.
	///
	/// Reads `META_ACCESS_TOKEN`, `META_CLIENT_ID`, `META_CLIENT_SECRET`, and
	/// `META_APP_TOKEN`. Chain explicit setters afterwards to override any of them.
	pub fn from_env() -> Self {
		Self::resolve_with(|key| std::env::var(key).ok())
	}

	fn resolve_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
		let mut config = Self::new();

		config.access_token = lookup(ENV_ACCESS_TOKEN).map(TokenSecret::new);
		config.app_token = lookup(ENV_APP_TOKEN).map(TokenSecret::new);
		config.auth.client_id = lookup(ENV_CLIENT_ID);
		config.auth.client_secret = lookup(ENV_CLIENT_SECRET);

		config
	}

	/// Overrides the Graph API host.
	pub fn with_host(mut self, host: impl Into<String>) -> Self {
		self.host = host.into();

		self
	}

	/// Overrides the Graph API version segment.
	pub fn with_version(mut self, version: impl Into<String>) -> Self {
		self.version = version.into();

		self
	}

	/// Toggles automatic `access_token` query injection.
	pub fn with_use_access_token(mut self, use_access_token: bool) -> Self {
		self.auth.use_access_token = use_access_token;

		self
	}

	/// Sets the OAuth client identifier.
	pub fn with_client_id(mut self, client_id: impl Into<String>) -> Self {
		self.auth.client_id = Some(client_id.into());

		self
	}

	/// Sets the OAuth client secret.
	pub fn with_client_secret(mut self, client_secret: impl Into<String>) -> Self {
		self.auth.client_secret = Some(client_secret.into());

		self
	}

	/// Sets the grant used by the refresh-token source.
	pub fn with_grant_type(mut self, grant_type: impl Into<String>) -> Self {
		self.auth.grant_type = Some(grant_type.into());

		self
	}

	/// Sets the default bearer token.
	pub fn with_access_token(mut self, token: impl Into<String>) -> Self {
		self.access_token = Some(TokenSecret::new(token));

		self
	}

	/// Sets the application-level bearer token.
	pub fn with_app_token(mut self, token: impl Into<String>) -> Self {
		self.app_token = Some(TokenSecret::new(token));

		self
	}

	/// Returns the `host/version` base for request URLs, without a trailing slash.
	pub fn base_url(&self) -> String {
		format!("{}/{}", self.host.trim_end_matches('/'), self.version.trim_matches('/'))
	}

	/// Returns the default bearer, raising [`Error::AccessTokenNotSet`] when absent.
	pub fn resolved_access_token(&self) -> Result<TokenSecret> {
		self.access_token.clone().ok_or(Error::AccessTokenNotSet)
	}
}
impl Default for GraphConfig {
	fn default() -> Self {
		Self::new()
	}
}
