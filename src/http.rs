//! Transport primitives for authenticated Graph API requests.
//!
//! [`HttpTransport`] is the SDK's only dependency on an HTTP stack: the client
//! hands it a fully built URL plus a verb and receives the raw status and body
//! back. Requests never carry bodies, every parameter is query-encoded upstream
//! of this seam, so the contract stays a single `execute` call.

// self
use crate::{_prelude::*, error::TransportError};

/// HTTP verbs dispatched by the Graph API client.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum HttpMethod {
	/// `GET`
	Get,
	/// `POST`
	Post,
	/// `PUT`
	Put,
	/// `DELETE`
	Delete,
}
impl HttpMethod {
	/// Returns the wire representation of the verb.
	pub const fn as_str(self) -> &'static str {
		match self {
			HttpMethod::Get => "GET",
			HttpMethod::Post => "POST",
			HttpMethod::Put => "PUT",
			HttpMethod::Delete => "DELETE",
		}
	}
}
impl Display for HttpMethod {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Raw response surfaced by a transport.
#[derive(Clone, Debug)]
pub struct TransportResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body bytes.
	pub body: Vec<u8>,
}
impl TransportResponse {
	/// Returns `true` for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}
}

/// Boxed future returned by [`HttpTransport::execute`].
pub type TransportFuture<'a> =
	Pin<Box<dyn Future<Output = Result<TransportResponse, TransportError>> + 'a + Send>>;

/// Abstraction over HTTP stacks capable of executing a single query-encoded request.
///
/// Implementations must be `Send + Sync` so one transport can back every handler
/// behind an `Arc<dyn HttpTransport>`. No timeout or cancellation is imposed here;
/// a hung call suspends the caller until the transport resolves.
pub trait HttpTransport
where
	Self: Send + Sync,
{
	/// Executes the request and returns the raw status + body.
	fn execute(&self, method: HttpMethod, url: Url) -> TransportFuture<'_>;
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestTransport(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestTransport {
	/// Wraps an existing [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl HttpTransport for ReqwestTransport {
	fn execute(&self, method: HttpMethod, url: Url) -> TransportFuture<'_> {
		let client = self.0.clone();
		let method = match method {
			HttpMethod::Get => reqwest::Method::GET,
			HttpMethod::Post => reqwest::Method::POST,
			HttpMethod::Put => reqwest::Method::PUT,
			HttpMethod::Delete => reqwest::Method::DELETE,
		};

		Box::pin(async move {
			let response =
				client.request(method, url).send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.bytes().await.map_err(TransportError::from)?.to_vec();

			Ok(TransportResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn method_labels_match_wire_verbs() {
		assert_eq!(HttpMethod::Get.as_str(), "GET");
		assert_eq!(HttpMethod::Delete.to_string(), "DELETE");
	}

	#[test]
	fn success_covers_the_full_2xx_range() {
		assert!(TransportResponse { status: 200, body: Vec::new() }.is_success());
		assert!(TransportResponse { status: 204, body: Vec::new() }.is_success());
		assert!(!TransportResponse { status: 301, body: Vec::new() }.is_success());
		assert!(!TransportResponse { status: 500, body: Vec::new() }.is_success());
	}
}
