//! User access token strategy (authorization-code exchange).

// self
use crate::{
	_prelude::*,
	auth::{
		BearerFuture, Clock, Credential, CredentialSlot, TokenHandler, TokenSecret, TokenSource,
		handler::{self, OAuthTokenResponse, expiry_from_now},
	},
	client::GraphApiClient,
};

/// Authorization code plus the redirect URI it was minted for; both required
/// per fetch.
#[derive(Clone, Debug, Default)]
pub struct UserTokenParams {
	/// Authorization code obtained from the OAuth redirect.
	pub code: Option<String>,
	/// Redirect URI associated with the OAuth request.
	pub redirect_uri: Option<String>,
}

/// Exchanges an authorization code for a user token via `oauth/access_token`.
pub struct UserTokenHandler {
	api: Arc<GraphApiClient>,
	slot: CredentialSlot,
}
impl UserTokenHandler {
	/// Creates a handler with an empty credential slot.
	pub fn new(api: Arc<GraphApiClient>, clock: Clock) -> Self {
		Self { api, slot: CredentialSlot::new(clock) }
	}
}
impl TokenHandler for UserTokenHandler {
	type Params = UserTokenParams;

	async fn fetch_token(&self, params: UserTokenParams) -> Result<()> {
		// Absent parameters still produce the single lazy-path network call;
		// the platform rejects the stale exchange server-side.
		let code = params.code.unwrap_or_default();
		let redirect_uri = params.redirect_uri.unwrap_or_default();
		let (client_id, client_secret) = {
			let auth = &self.api.config().auth;

			(
				auth.client_id.clone().ok_or(Error::MissingParameter { name: "client_id" })?,
				auth.client_secret
					.clone()
					.ok_or(Error::MissingParameter { name: "client_secret" })?,
			)
		};
		let response = self
			.api
			.get::<OAuthTokenResponse>("oauth/access_token", &[
				("client_id", client_id.as_str()),
				("client_secret", client_secret.as_str()),
				("redirect_uri", redirect_uri.as_str()),
				("code", code.as_str()),
			])
			.await?;
		let body = response.data;
		let token = body.access_token.ok_or(Error::MissingAccessToken)?;
		let expires_at = expiry_from_now(self.slot.clock().now(), body.expires_in);

		self.slot.replace(Credential::new(TokenSecret::new(token), Some(expires_at)));

		Ok(())
	}

	fn slot(&self) -> &CredentialSlot {
		&self.slot
	}
}
impl TokenSource for UserTokenHandler {
	fn bearer(&self) -> BearerFuture<'_> {
		handler::lazy_bearer(self)
	}
}
impl Debug for UserTokenHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("UserTokenHandler").field("fresh", &self.slot.is_fresh()).finish()
	}
}
