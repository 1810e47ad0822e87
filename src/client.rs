//! Authenticated Graph API request pipeline.
//!
//! [`GraphApiClient`] builds `host/version/endpoint` URLs, query-encodes every
//! parameter (no request bodies, even for POST/PUT/DELETE), injects the bearer
//! from its [`TokenSource`] when configured to, and maps non-2xx responses into
//! the error taxonomy. It never refreshes a token on its own; staleness is the
//! source's concern.

// crates.io
use serde::de::DeserializeOwned;
// self
use crate::{
	_prelude::*,
	auth::{StaticTokenSource, TokenSource},
	config::GraphConfig,
	http::{HttpMethod, HttpTransport},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestTransport;

/// Response envelope returned to library callers.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct ApiResponse<T> {
	/// Parsed JSON body.
	pub data: T,
	/// Reserved; status-based failures raise instead of populating this field.
	pub error: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GraphErrorBody {
	error: Option<GraphErrorDetail>,
}
#[derive(Debug, Deserialize)]
struct GraphErrorDetail {
	message: Option<String>,
}

/// Low-level client for authenticated Graph API requests.
pub struct GraphApiClient {
	transport: Arc<dyn HttpTransport>,
	source: Arc<dyn TokenSource>,
	base_url: String,
	config: GraphConfig,
}
impl GraphApiClient {
	/// Creates a client over the default reqwest transport.
	///
	/// When `auth.use_access_token` is set, the config must resolve a default
	/// bearer or construction fails with [`Error::AccessTokenNotSet`].
	#[cfg(feature = "reqwest")]
	pub fn new(config: GraphConfig) -> Result<Self> {
		Self::with_transport(config, Arc::new(ReqwestTransport::default()))
	}

	/// Creates a client over a caller-provided transport, deriving the token
	/// source from the config's default bearer.
	pub fn with_transport(config: GraphConfig, transport: Arc<dyn HttpTransport>) -> Result<Self> {
		let source: Arc<dyn TokenSource> = if config.auth.use_access_token {
			Arc::new(StaticTokenSource::resolve(config.access_token.clone())?)
		} else {
			Arc::new(StaticTokenSource::anonymous())
		};

		Ok(Self::with_token_source(config, transport, source))
	}

	/// Creates a client whose bearer comes from an explicit [`TokenSource`]: a
	/// refresh-grant holder or any token handler's lazy path.
	pub fn with_token_source(
		config: GraphConfig,
		transport: Arc<dyn HttpTransport>,
		source: Arc<dyn TokenSource>,
	) -> Self {
		Self { transport, source, base_url: config.base_url(), config }
	}

	/// Returns the resolved, immutable configuration.
	pub fn config(&self) -> &GraphConfig {
		&self.config
	}

	/// Issues a GET request.
	pub async fn get<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<ApiResponse<T>>
	where
		T: DeserializeOwned,
	{
		self.request(HttpMethod::Get, endpoint, params).await
	}

	/// Issues a POST request; parameters are still query-encoded.
	pub async fn post<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<ApiResponse<T>>
	where
		T: DeserializeOwned,
	{
		self.request(HttpMethod::Post, endpoint, params).await
	}

	/// Issues a PUT request; parameters are still query-encoded.
	pub async fn put<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<ApiResponse<T>>
	where
		T: DeserializeOwned,
	{
		self.request(HttpMethod::Put, endpoint, params).await
	}

	/// Issues a DELETE request; parameters are still query-encoded.
	pub async fn delete<T>(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<ApiResponse<T>>
	where
		T: DeserializeOwned,
	{
		self.request(HttpMethod::Delete, endpoint, params).await
	}

	async fn request<T>(
		&self,
		method: HttpMethod,
		endpoint: &str,
		params: &[(&str, &str)],
	) -> Result<ApiResponse<T>>
	where
		T: DeserializeOwned,
	{
		let url = self.build_url(endpoint, params).await?;
		let response = self.transport.execute(method, url).await.map_err(Error::from)?;

		if !response.is_success() {
			let message = serde_json::from_slice::<GraphErrorBody>(&response.body)
				.ok()
				.and_then(|body| body.error)
				.and_then(|detail| detail.message);

			return Err(Error::from_status(response.status, message));
		}

		let mut deserializer = serde_json::Deserializer::from_slice(&response.body);
		let data = serde_path_to_error::deserialize(&mut deserializer)
			.map_err(|source| Error::ResponseParse { source, status: Some(response.status) })?;

		Ok(ApiResponse { data, error: None })
	}

	/// Merges the held bearer (when configured) with caller parameters; an
	/// explicit `access_token` parameter always wins over the injected one.
	async fn build_url(&self, endpoint: &str, params: &[(&str, &str)]) -> Result<Url> {
		let mut url = Url::parse(&format!("{}/{}", self.base_url, endpoint.trim_start_matches('/')))?;
		let mut query = BTreeMap::new();

		if self.config.auth.use_access_token {
			query.insert("access_token", self.source.bearer().await?);
		}

		for (key, value) in params.iter().copied() {
			query.insert(key, value.to_owned());
		}

		for (key, value) in &query {
			url.query_pairs_mut().append_pair(key, value);
		}

		Ok(url)
	}
}
impl Debug for GraphApiClient {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("GraphApiClient")
			.field("base_url", &self.base_url)
			.field("use_access_token", &self.config.auth.use_access_token)
			.finish()
	}
}
