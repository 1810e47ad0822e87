//! Token manager façade composing all five acquisition strategies.

// self
use crate::{
	_prelude::*,
	auth::{
		AppTokenHandler, ClientTokenHandler, ClientTokenParams, Clock, PageTokenHandler,
		PageTokenParams, SystemUserTokenHandler, SystemUserTokenParams, TokenHandler,
		UserTokenHandler, UserTokenParams,
	},
	client::GraphApiClient,
	obs::{TokenKind, TokenSpan},
};

/// Single entry point hiding which concrete handler serves which token type.
///
/// Owns one long-lived instance per strategy. `get_app_token` defers to the
/// handler's lazy path because the app grant is parameterless; every other
/// operation forces a fresh fetch with the caller-supplied context, otherwise a
/// cached-but-still-valid token belonging to a different subject (a different
/// page, say) could be returned incorrectly.
pub struct TokenManager {
	app: AppTokenHandler,
	client: ClientTokenHandler,
	page: PageTokenHandler,
	system_user: SystemUserTokenHandler,
	user: UserTokenHandler,
}
impl TokenManager {
	/// Creates a manager over the provided client, using the system clock.
	pub fn new(api: Arc<GraphApiClient>) -> Self {
		Self::with_clock(api, Clock::system())
	}

	/// Creates a manager whose handlers share the provided clock.
	pub fn with_clock(api: Arc<GraphApiClient>, clock: Clock) -> Self {
		Self {
			app: AppTokenHandler::new(api.clone(), clock.clone()),
			client: ClientTokenHandler::new(api.clone(), clock.clone()),
			page: PageTokenHandler::new(api.clone(), clock.clone()),
			system_user: SystemUserTokenHandler::new(api.clone(), clock.clone()),
			user: UserTokenHandler::new(api, clock),
		}
	}

	/// Retrieves an app-level access token, refetching only when the cached
	/// credential is empty or expired.
	pub async fn get_app_token(&self) -> Result<String> {
		let span = TokenSpan::new(TokenKind::App, "get_app_token");

		span.instrument(self.app.access_token()).await
	}

	/// Validates and caches a client token; always re-fetches.
	pub async fn get_client_token(&self, client_token: impl Into<String>) -> Result<String> {
		let span = TokenSpan::new(TokenKind::Client, "get_client_token");
		let params = ClientTokenParams { client_token: Some(client_token.into()) };

		span.instrument(async {
			self.client.fetch_token(params).await?;
			self.client.access_token().await
		})
		.await
	}

	/// Derives a page token from the supplied user token; always re-fetches.
	pub async fn get_page_token(&self, user_access_token: impl Into<String>) -> Result<String> {
		let span = TokenSpan::new(TokenKind::Page, "get_page_token");
		let params = PageTokenParams { user_access_token: Some(user_access_token.into()) };

		span.instrument(async {
			self.page.fetch_token(params).await?;
			self.page.access_token().await
		})
		.await
	}

	/// Retrieves a system-user token for the given identity; always re-fetches.
	pub async fn get_system_user_token(
		&self,
		system_user_id: impl Into<String>,
		app_secret: impl Into<String>,
	) -> Result<String> {
		let span = TokenSpan::new(TokenKind::SystemUser, "get_system_user_token");
		let params = SystemUserTokenParams {
			system_user_id: Some(system_user_id.into()),
			app_secret: Some(app_secret.into()),
		};

		span.instrument(async {
			self.system_user.fetch_token(params).await?;
			self.system_user.access_token().await
		})
		.await
	}

	/// Exchanges an authorization code for a user token; always re-fetches.
	pub async fn get_user_token(
		&self,
		code: impl Into<String>,
		redirect_uri: impl Into<String>,
	) -> Result<String> {
		let span = TokenSpan::new(TokenKind::User, "get_user_token");
		let params =
			UserTokenParams { code: Some(code.into()), redirect_uri: Some(redirect_uri.into()) };

		span.instrument(async {
			self.user.fetch_token(params).await?;
			self.user.access_token().await
		})
		.await
	}

	/// Returns the app-token handler, e.g. to wire it in as a client's
	/// [`TokenSource`](crate::auth::TokenSource).
	pub fn app_handler(&self) -> &AppTokenHandler {
		&self.app
	}

	/// Returns the system-user handler.
	pub fn system_user_handler(&self) -> &SystemUserTokenHandler {
		&self.system_user
	}
}
impl Debug for TokenManager {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("TokenManager")
			.field("app", &self.app)
			.field("client", &self.client)
			.field("page", &self.page)
			.field("system_user", &self.system_user)
			.field("user", &self.user)
			.finish()
	}
}
