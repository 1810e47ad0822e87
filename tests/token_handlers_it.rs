#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use meta_graph_sdk::{
	_preludet::*,
	auth::{
		AppTokenHandler, ClientTokenHandler, ClientTokenParams, Clock, PageTokenHandler,
		PageTokenParams, SystemUserTokenHandler, SystemUserTokenParams, TokenHandler,
		UserTokenHandler, UserTokenParams,
	},
};

fn frozen_clock() -> Clock {
	Clock::manual(
		OffsetDateTime::from_unix_timestamp(1_700_000_000)
			.expect("Fixed test epoch should be a valid instant."),
	)
}

#[tokio::test]
async fn app_grant_sends_client_credentials_and_caches_until_expiry() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/oauth/access_token")
				.query_param("client_id", "app-id")
				.query_param("client_secret", "app-secret")
				.query_param("grant_type", "client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"A1\",\"expires_in\":3600}");
		})
		.await;
	let clock = frozen_clock();
	let handler = AppTokenHandler::new(test_client(&server.base_url()), clock.clone());

	assert_eq!(
		handler.access_token().await.expect("First app token fetch should succeed."),
		"A1",
	);
	assert_eq!(
		handler.access_token().await.expect("Cached app token should be served."),
		"A1",
	);

	mock.assert_calls_async(1).await;

	clock.advance(Duration::seconds(3_601));

	assert_eq!(
		handler.access_token().await.expect("Expired app token should be refetched."),
		"A1",
	);

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn app_token_without_a_lifetime_is_immediately_stale() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/oauth/access_token");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"A1\"}");
		})
		.await;
	let handler = AppTokenHandler::new(test_client(&server.base_url()), frozen_clock());

	handler.access_token().await.expect("First fetch should succeed.");
	handler.access_token().await.expect("Second fetch should succeed.");

	// No expires_in pins the expiry to the fetch instant, so every lazy call
	// refetches.
	mock.assert_calls_async(2).await;
}

// The introspection check is inverted: a token the debug endpoint reports
// valid is rejected, and one reported invalid is accepted. The correct
// behavior is suspected to be the opposite; kept as shipped until the
// contract is settled.
#[tokio::test]
async fn client_handler_rejects_tokens_the_debug_endpoint_marks_valid() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/debug_token")
				.query_param("input_token", "CANDIDATE")
				.query_param("access_token", "APP");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"is_valid\":true,\"expires_at\":1893456000}");
		})
		.await;
	let handler = ClientTokenHandler::new(test_client(&server.base_url()), frozen_clock());
	let params = ClientTokenParams { client_token: Some("CANDIDATE".into()) };

	assert!(matches!(handler.fetch_token(params).await, Err(Error::InvalidClientToken)));

	mock.assert_async().await;
}

#[tokio::test]
async fn client_handler_caches_the_candidate_the_debug_endpoint_marks_invalid() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/debug_token").query_param("input_token", "CANDIDATE");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"is_valid\":false,\"expires_at\":1893456000}");
		})
		.await;

	let handler = ClientTokenHandler::new(test_client(&server.base_url()), frozen_clock());
	let params = ClientTokenParams { client_token: Some("CANDIDATE".into()) };

	handler.fetch_token(params).await.expect("Candidate marked invalid should be cached.");

	// The cached value is the submitted candidate, not anything from the
	// introspection response.
	assert_eq!(
		handler.access_token().await.expect("Cached candidate should be served."),
		"CANDIDATE",
	);
}

#[tokio::test]
async fn client_handler_is_not_lazily_refreshable_without_a_candidate() {
	let server = MockServer::start_async().await;
	let handler = ClientTokenHandler::new(test_client(&server.base_url()), frozen_clock());

	assert!(matches!(
		handler.access_token().await,
		Err(Error::MissingParameter { name: "client_token" }),
	));
}

#[tokio::test]
async fn page_tokens_never_expire_once_derived() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/me/accounts").query_param("access_token", "U1");
			then.status(200).header("content-type", "application/json").body(
				"{\"data\":[{\"access_token\":\"P1\",\"id\":\"99\",\"name\":\"First Page\"},{\"access_token\":\"P2\",\"id\":\"100\",\"name\":\"Second Page\"}]}",
			);
		})
		.await;
	let clock = frozen_clock();
	let handler = PageTokenHandler::new(test_client(&server.base_url()), clock.clone());
	let params = PageTokenParams { user_access_token: Some("U1".into()) };

	handler.fetch_token(params).await.expect("Page token derivation should succeed.");

	assert_eq!(
		handler.access_token().await.expect("First listed page token should be cached."),
		"P1",
	);

	clock.advance(Duration::days(365));

	assert_eq!(
		handler.access_token().await.expect("Page tokens carry no expiry."),
		"P1",
	);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn empty_page_listing_raises_no_pages_found() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/me/accounts");
			then.status(200).header("content-type", "application/json").body("{\"data\":[]}");
		})
		.await;

	let handler = PageTokenHandler::new(test_client(&server.base_url()), frozen_clock());
	let params = PageTokenParams { user_access_token: Some("U1".into()) };

	assert!(matches!(handler.fetch_token(params).await, Err(Error::NoPagesFound)));
}

#[tokio::test]
async fn system_user_listing_forwards_the_secret_proof_and_app_token() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/777/access_tokens")
				.query_param("appsecret_proof", "secretproof")
				.query_param("access_token", "APP");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"access_token\":\"SU1\",\"expires_in\":3600}]}");
		})
		.await;
	let handler = SystemUserTokenHandler::new(test_client(&server.base_url()), frozen_clock());
	let params = SystemUserTokenParams {
		system_user_id: Some("777".into()),
		app_secret: Some("secretproof".into()),
	};

	handler.fetch_token(params).await.expect("System user token fetch should succeed.");

	assert_eq!(
		handler.access_token().await.expect("Issued system user token should be cached."),
		"SU1",
	);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn empty_system_user_listing_raises_no_system_user_tokens() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/777/access_tokens");
			then.status(200).header("content-type", "application/json").body("{\"data\":[]}");
		})
		.await;

	let handler = SystemUserTokenHandler::new(test_client(&server.base_url()), frozen_clock());
	let params = SystemUserTokenParams {
		system_user_id: Some("777".into()),
		app_secret: Some("secretproof".into()),
	};

	assert!(matches!(handler.fetch_token(params).await, Err(Error::NoSystemUserTokens)));
}

#[tokio::test]
async fn user_code_exchange_binds_the_redirect_uri() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/oauth/access_token")
				.query_param("client_id", "app-id")
				.query_param("client_secret", "app-secret")
				.query_param("redirect_uri", "https://app.example.com/cb")
				.query_param("code", "CODE1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"U1\",\"expires_in\":5184000}");
		})
		.await;
	let handler = UserTokenHandler::new(test_client(&server.base_url()), frozen_clock());
	let params = UserTokenParams {
		code: Some("CODE1".into()),
		redirect_uri: Some("https://app.example.com/cb".into()),
	};

	handler.fetch_token(params).await.expect("Authorization code exchange should succeed.");

	assert_eq!(
		handler.access_token().await.expect("Exchanged user token should be cached."),
		"U1",
	);

	mock.assert_async().await;
}

#[tokio::test]
async fn failed_fetch_leaves_the_cached_credential_in_place() {
	let server = MockServer::start_async().await;
	let ok = server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/me/accounts").query_param("access_token", "U1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"access_token\":\"P1\",\"id\":\"99\"}]}");
		})
		.await;

	server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/me/accounts").query_param("access_token", "EXPIRED");
			then.status(401)
				.header("content-type", "application/json")
				.body("{\"error\":{\"message\":\"Session expired.\"}}");
		})
		.await;

	let handler = PageTokenHandler::new(test_client(&server.base_url()), frozen_clock());

	handler
		.fetch_token(PageTokenParams { user_access_token: Some("U1".into()) })
		.await
		.expect("Initial page token derivation should succeed.");

	assert!(
		handler
			.fetch_token(PageTokenParams { user_access_token: Some("EXPIRED".into()) })
			.await
			.is_err(),
	);
	assert_eq!(
		handler.access_token().await.expect("Prior credential should survive a failed fetch."),
		"P1",
	);

	ok.assert_calls_async(1).await;
}
