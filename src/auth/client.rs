//! Client access token strategy (token-debug introspection).

// self
use crate::{
	_prelude::*,
	auth::{
		BearerFuture, Clock, Credential, CredentialSlot, TokenHandler, TokenSecret, TokenSource,
		handler,
	},
	client::GraphApiClient,
};

/// Candidate token to validate; required on every logical fetch, so the empty
/// bag taken by the lazy path cannot re-introspect a consumed credential.
#[derive(Clone, Debug, Default)]
pub struct ClientTokenParams {
	/// Candidate client token submitted to the debug endpoint.
	pub client_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DebugTokenResponse {
	is_valid: Option<bool>,
	expires_at: Option<i64>,
}

/// Validates caller-supplied client tokens through `debug_token`, caching the
/// candidate itself rather than anything from the introspection response.
pub struct ClientTokenHandler {
	api: Arc<GraphApiClient>,
	slot: CredentialSlot,
}
impl ClientTokenHandler {
	/// Creates a handler with an empty credential slot.
	pub fn new(api: Arc<GraphApiClient>, clock: Clock) -> Self {
		Self { api, slot: CredentialSlot::new(clock) }
	}
}
impl TokenHandler for ClientTokenHandler {
	type Params = ClientTokenParams;

	async fn fetch_token(&self, params: ClientTokenParams) -> Result<()> {
		let candidate =
			params.client_token.ok_or(Error::MissingParameter { name: "client_token" })?;
		let app_token = self
			.api
			.config()
			.app_token
			.clone()
			.ok_or(Error::MissingParameter { name: "app_token" })?;
		let response = self
			.api
			.get::<DebugTokenResponse>("debug_token", &[
				("input_token", candidate.as_str()),
				("access_token", app_token.expose()),
			])
			.await?;
		let body = response.data;

		// Rejects when the introspection reports the token valid; kept as shipped.
		if body.is_valid.unwrap_or(false) {
			return Err(Error::InvalidClientToken);
		}

		// Unix-seconds expiry straight from the debug response; the platform
		// sends 0 for non-expiring tokens, so absent and zero both mean the
		// credential never expires.
		let expires_at = body
			.expires_at
			.filter(|&secs| secs != 0)
			.and_then(|secs| OffsetDateTime::from_unix_timestamp(secs).ok());

		self.slot.replace(Credential::new(TokenSecret::new(candidate), expires_at));

		Ok(())
	}

	fn slot(&self) -> &CredentialSlot {
		&self.slot
	}
}
impl TokenSource for ClientTokenHandler {
	fn bearer(&self) -> BearerFuture<'_> {
		handler::lazy_bearer(self)
	}
}
impl Debug for ClientTokenHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("ClientTokenHandler").field("fresh", &self.slot.is_fresh()).finish()
	}
}
