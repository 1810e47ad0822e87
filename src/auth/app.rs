//! Application access token strategy (client-credentials grant).

// self
use crate::{
	_prelude::*,
	auth::{
		BearerFuture, Clock, Credential, CredentialSlot, TokenHandler, TokenSecret, TokenSource,
		handler::{self, OAuthTokenResponse, expiry_from_now},
	},
	client::GraphApiClient,
};

/// The app-token grant is parameterless; the empty bag is the whole protocol.
#[derive(Clone, Copy, Debug, Default)]
pub struct AppTokenParams;

/// Obtains application access tokens via `oauth/access_token` with the
/// `client_credentials` grant. The only strategy that is safely self-refreshing
/// through the lazy path, since it needs no call-specific context.
pub struct AppTokenHandler {
	api: Arc<GraphApiClient>,
	slot: CredentialSlot,
}
impl AppTokenHandler {
	/// Creates a handler with an empty credential slot.
	pub fn new(api: Arc<GraphApiClient>, clock: Clock) -> Self {
		Self { api, slot: CredentialSlot::new(clock) }
	}
}
impl TokenHandler for AppTokenHandler {
	type Params = AppTokenParams;

	async fn fetch_token(&self, _params: AppTokenParams) -> Result<()> {
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
				("grant_type", "client_credentials"),
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
impl TokenSource for AppTokenHandler {
	fn bearer(&self) -> BearerFuture<'_> {
		handler::lazy_bearer(self)
	}
}
impl Debug for AppTokenHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("AppTokenHandler").field("fresh", &self.slot.is_fresh()).finish()
	}
}
