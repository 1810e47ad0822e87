//! Optional observability helpers for token operations.
//!
//! Enable the `tracing` feature to emit structured spans named
//! `meta_graph_sdk.token` with the `token` (credential category) and `stage`
//! (call site) fields. Without the feature every helper compiles to a no-op.

mod tracing;

pub use self::tracing::*;

// self
use crate::_prelude::*;

/// Credential categories observed by the SDK.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TokenKind {
	/// Application access token.
	App,
	/// Client access token.
	Client,
	/// Page access token.
	Page,
	/// System-user access token.
	SystemUser,
	/// User access token.
	User,
	/// Refresh-grant exchange.
	Refresh,
}
impl TokenKind {
	/// Returns a stable label suitable for span fields.
	pub const fn as_str(self) -> &'static str {
		match self {
			TokenKind::App => "app",
			TokenKind::Client => "client",
			TokenKind::Page => "page",
			TokenKind::SystemUser => "system_user",
			TokenKind::User => "user",
			TokenKind::Refresh => "refresh",
		}
	}
}
impl Display for TokenKind {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}
