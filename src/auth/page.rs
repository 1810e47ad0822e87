//! Page access token strategy (`me/accounts` listing).

// self
use crate::{
	_prelude::*,
	auth::{
		BearerFuture, Clock, Credential, CredentialSlot, TokenHandler, TokenSecret, TokenSource,
		handler,
	},
	client::GraphApiClient,
};

/// User token whose pages are listed; required on every logical fetch.
#[derive(Clone, Debug, Default)]
pub struct PageTokenParams {
	/// User access token associated with the target page.
	pub user_access_token: Option<String>,
}

#[derive(Debug, Deserialize)]
struct AccountsEnvelope {
	#[serde(default)]
	data: Vec<PageAccount>,
}
#[derive(Debug, Deserialize)]
struct PageAccount {
	access_token: Option<String>,
	#[allow(dead_code)]
	id: Option<String>,
	#[allow(dead_code)]
	name: Option<String>,
}

/// Derives a page token from the first record of `me/accounts`. Page tokens are
/// stored without an expiry and therefore never refetch once populated.
pub struct PageTokenHandler {
	api: Arc<GraphApiClient>,
	slot: CredentialSlot,
}
impl PageTokenHandler {
	/// Creates a handler with an empty credential slot.
	pub fn new(api: Arc<GraphApiClient>, clock: Clock) -> Self {
		Self { api, slot: CredentialSlot::new(clock) }
	}
}
impl TokenHandler for PageTokenHandler {
	type Params = PageTokenParams;

	async fn fetch_token(&self, params: PageTokenParams) -> Result<()> {
		// An absent user token still goes out (empty) so the lazy path performs
		// its single network call; the platform rejects it server-side.
		let user_token = params.user_access_token.unwrap_or_default();
		let response = self
			.api
			.get::<AccountsEnvelope>("me/accounts", &[("access_token", user_token.as_str())])
			.await?;
		let first = response.data.data.into_iter().next().ok_or(Error::NoPagesFound)?;
		let token = first.access_token.ok_or(Error::MissingAccessToken)?;

		self.slot.replace(Credential::new(TokenSecret::new(token), None));

		Ok(())
	}

	fn slot(&self) -> &CredentialSlot {
		&self.slot
	}
}
impl TokenSource for PageTokenHandler {
	fn bearer(&self) -> BearerFuture<'_> {
		handler::lazy_bearer(self)
	}
}
impl Debug for PageTokenHandler {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PageTokenHandler").field("fresh", &self.slot.is_fresh()).finish()
	}
}
