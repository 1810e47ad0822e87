//! System-user access token strategy (derived-token listing).

// self
use crate::{
	_prelude::*,
	auth::{
		BearerFuture, Clock, Credential, CredentialSlot, TokenHandler, TokenSecret, TokenSource,
		handler::{self, expiry_from_now},
	},
	client::GraphApiClient,
};

/// System-user identity plus the app secret proof; both required per fetch.
#[derive(Clone, Debug, Default)]
pub struct SystemUserTokenParams {
	/// System user whose issued tokens are listed.
	pub system_user_id: Option<String>,
	/// Application secret proof forwarded as `appsecret_proof`.
	pub app_secret: Option<String>,
}

#[derive(Debug, Deserialize)]
struct TokenListEnvelope {
	#[serde(default)]
	data: Vec<IssuedToken>,
}
#[derive(Debug, Deserialize)]
struct IssuedToken {
	access_token: Option<String>,
	expires_in: Option<i64>,
}

/// Lists `{system_user_id}/access_tokens` and caches the first issued record.
pub struct SystemUserTokenHandler {
	api: Arc<GraphApiClient>,
	slot: CredentialSlot,
}
impl SystemUserTokenHandler {
	/// Creates a handler with an empty credential slot.
	pub fn new(api: Arc<GraphApiClient>, clock: Clock) -> Self {
		Self { api, slot: CredentialSlot::new(clock) }
	}
}
impl TokenHandler for SystemUserTokenHandler {
	type Params = SystemUserTokenParams;

	async fn fetch_token(&self, params: SystemUserTokenParams) -> Result<()> {
		// Absent parameters still produce the single lazy-path network call;
		// the platform rejects the malformed listing server-side.
		let system_user_id = params.system_user_id.unwrap_or_default();
		let app_secret = params.app_secret.unwrap_or_default();
		let app_token = self
			.api
			.config()
			.app_token
			.clone()
			.ok_or(Error::MissingParameter { name: "app_token" })?;
		let endpoint = format!("{system_user_id}/access_tokens");
		let response = self
			.api
			.get::<TokenListEnvelope>(&endpoint, &[
				("appsecret_proof", app_secret.as_str()),
				("access_token", app_token.expose()),
			])
			.await?;
		let first = response.data.data.into_iter().next().ok_or(Error::NoSystemUserTokens)?;
		let token = first.access_token.ok_or(Error::MissingAccessToken)?;
		let expires_at = expiry_from_now(self.slot.clock().now(), first.expires_in);

		self.slot.replace(Credential::new(TokenSecret::new(token), Some(expires_at)));

		Ok(())
	}

	fn slot(&self) -> &CredentialSlot {
		&self.slot
	}
}
impl TokenSource for SystemUserTokenHandler {
	fn bearer(&self) -> BearerFuture<'_> {
		handler::lazy_bearer(self)
	}
}
impl Debug for SystemUserTokenHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("SystemUserTokenHandler").field("fresh", &self.slot.is_fresh()).finish()
	}
}
