//! Unified credential-provider seam.
//!
//! Exactly one abstraction decides when a bearer is stale: a [`TokenSource`].
//! The Graph client asks its source for a bearer per request and never refreshes
//! on its own. Sources come in three shapes: a fixed config value, a
//! refresh-grant holder, and every token handler via its lazy path.

// self
use crate::{
	_prelude::*,
	auth::TokenSecret,
	config::GraphConfig,
	http::{HttpMethod, HttpTransport},
	obs::{TokenKind, TokenSpan},
};

/// Boxed future returned by [`TokenSource::bearer`].
pub type BearerFuture<'a> = Pin<Box<dyn Future<Output = Result<String>> + 'a + Send>>;

/// Contract for anything that can produce a bearer credential on demand.
///
/// Staleness is owned by the source; callers simply await a usable value.
pub trait TokenSource
where
	Self: Send + Sync,
{
	/// Produces the current bearer value, refreshing first when the source deems
	/// its held credential stale.
	fn bearer(&self) -> BearerFuture<'_>;
}

/// Fixed bearer resolved once from configuration or explicit arguments.
pub struct StaticTokenSource(Option<TokenSecret>);
impl StaticTokenSource {
	/// Wraps a resolved token, raising [`Error::AccessTokenNotSet`] when absent.
	pub fn resolve(token: Option<TokenSecret>) -> Result<Self> {
		match token {
			Some(token) => Ok(Self(Some(token))),
			None => Err(Error::AccessTokenNotSet),
		}
	}

	/// Token-less source for clients configured with `use_access_token = false`.
	pub fn anonymous() -> Self {
		Self(None)
	}
}
impl TokenSource for StaticTokenSource {
	fn bearer(&self) -> BearerFuture<'_> {
		let resolved =
			self.0.as_ref().map(|token| token.expose().to_owned()).ok_or(Error::AccessTokenNotSet);

		Box::pin(async move { resolved })
	}
}
impl Debug for StaticTokenSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("StaticTokenSource").field("token_set", &self.0.is_some()).finish()
	}
}

#[derive(Debug, Deserialize)]
struct RefreshGrantResponse {
	access_token: Option<String>,
}

/// Mutable bearer refreshed through the `refresh_token` grant.
///
/// Holds the current token behind a lock and replaces it wholesale on every
/// successful [`refresh`](Self::refresh); a failed refresh leaves the held value
/// untouched.
pub struct RefreshGrantSource {
	transport: Arc<dyn HttpTransport>,
	base_url: String,
	grant_type: String,
	held: RwLock<TokenSecret>,
}
impl RefreshGrantSource {
	/// Creates a source over the config's host/version with the provided seed token.
	pub fn new(transport: Arc<dyn HttpTransport>, config: &GraphConfig, seed: TokenSecret) -> Self {
		Self {
			transport,
			base_url: config.base_url(),
			grant_type: config.auth.grant_type.clone().unwrap_or_else(|| "refresh_token".into()),
			held: RwLock::new(seed),
		}
	}

	/// Exchanges the held token for a new one, replacing it on success.
	///
	/// Raises [`Error::TokenRefreshFailed`] when the endpoint responds non-2xx or
	/// the body carries no replacement token.
	pub async fn refresh(&self) -> Result<String> {
		let span = TokenSpan::new(TokenKind::Refresh, "refresh");
		let current = self.held.read().expose().to_owned();
		let url = {
			let mut url = Url::parse(&format!("{}/oauth/access_token", self.base_url))?;

			url.query_pairs_mut()
				.append_pair("grant_type", &self.grant_type)
				.append_pair("refresh_token", &current);

			url
		};
		let response = span
			.instrument(async { self.transport.execute(HttpMethod::Get, url).await })
			.await
			.map_err(Error::from)?;

		if !response.is_success() {
			return Err(Error::TokenRefreshFailed);
		}

		let replacement = serde_json::from_slice::<RefreshGrantResponse>(&response.body)
			.ok()
			.and_then(|body| body.access_token)
			.ok_or(Error::TokenRefreshFailed)?;

		*self.held.write() = TokenSecret::new(&replacement);

		Ok(replacement)
	}
}
impl TokenSource for RefreshGrantSource {
	fn bearer(&self) -> BearerFuture<'_> {
		let current = self.held.read().expose().to_owned();

		Box::pin(async move { Ok(current) })
	}
}
impl Debug for RefreshGrantSource {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("RefreshGrantSource")
			.field("base_url", &self.base_url)
			.field("grant_type", &self.grant_type)
			.finish()
	}
}
