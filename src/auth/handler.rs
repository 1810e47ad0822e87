//! Strategy contract shared by the five token handlers.

// self
use crate::{
	_prelude::*,
	auth::{BearerFuture, CredentialSlot},
};

/// Capability contract "produce a bearer credential and its expiry".
///
/// Each implementation speaks one wire protocol and owns exactly one
/// [`CredentialSlot`]. [`access_token`](Self::access_token) centralizes the
/// expiry arithmetic: EMPTY or EXPIRED states trigger exactly one network
/// fetch with an empty parameter bag, VALID short-circuits. There is no
/// concurrent-refresh deduplication: two simultaneous callers observing an
/// expired credential both fetch, and the later response wins.
pub trait TokenHandler
where
	Self: Send + Sync,
{
	/// Strategy-specific fetch parameters; the `Default` value is the empty bag
	/// used by the lazy path.
	type Params: Default + Send;

	/// Fetches a fresh credential and replaces the slot contents in full.
	///
	/// A failed fetch must leave the slot in its prior state.
	fn fetch_token(&self, params: Self::Params) -> impl Future<Output = Result<()>> + Send;

	/// Returns the handler's credential slot.
	fn slot(&self) -> &CredentialSlot;

	/// Returns the current bearer, renewing it first when the slot is empty or
	/// expired at the slot clock's now.
	fn access_token(&self) -> impl Future<Output = Result<String>> + Send
	where
		Self: Sized,
	{
		async {
			if !self.slot().is_fresh() {
				self.fetch_token(Self::Params::default()).await?;
			}

			self.slot().bearer().ok_or(Error::MissingAccessToken)
		}
	}
}

/// Adapts a handler's lazy path into a [`TokenSource`](crate::auth::TokenSource)
/// bearer future.
pub(crate) fn lazy_bearer<H>(handler: &H) -> BearerFuture<'_>
where
	H: TokenHandler,
{
	Box::pin(handler.access_token())
}

/// Body shape shared by the `oauth/access_token` grants.
#[derive(Debug, Deserialize)]
pub(crate) struct OAuthTokenResponse {
	pub access_token: Option<String>,
	pub expires_in: Option<i64>,
}

/// Expiry instant for relative lifetimes; an absent or zero `expires_in` pins
/// the expiry to the fetch instant, leaving the credential immediately stale on
/// the next check.
pub(crate) fn expiry_from_now(now: OffsetDateTime, expires_in: Option<i64>) -> OffsetDateTime {
	now + Duration::seconds(expires_in.unwrap_or(0))
}
