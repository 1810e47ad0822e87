#![cfg(feature = "reqwest")]

// crates.io
use httpmock::prelude::*;
// self
use meta_graph_sdk::{
	_preludet::*,
	auth::{Clock, TokenHandler},
};

fn frozen_clock() -> Clock {
	Clock::manual(
		OffsetDateTime::from_unix_timestamp(1_700_000_000)
			.expect("Fixed test epoch should be a valid instant."),
	)
}

#[tokio::test]
async fn system_user_token_is_cached_until_the_clock_passes_expiry() {
	let server = MockServer::start_async().await;
	let issued = server
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
	// The lazy path carries no parameters, so its re-fetch hits the listing
	// endpoint with an empty identity segment.
	let refetched = server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/access_tokens").query_param("access_token", "APP");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"access_token\":\"SU2\",\"expires_in\":3600}]}");
		})
		.await;
	let clock = frozen_clock();
	let manager = test_manager(&server.base_url(), clock.clone());

	assert_eq!(
		manager
			.get_system_user_token("777", "secretproof")
			.await
			.expect("System user token retrieval should succeed."),
		"SU1",
	);

	// Within the 3600-second window the handler serves the cached value.
	assert_eq!(
		manager
			.system_user_handler()
			.access_token()
			.await
			.expect("Cached system user token should be served."),
		"SU1",
	);

	issued.assert_calls_async(1).await;

	clock.advance(Duration::seconds(3_601));

	// Past the window, exactly one additional fetch goes out.
	assert_eq!(
		manager
			.system_user_handler()
			.access_token()
			.await
			.expect("Expired system user token should be refetched."),
		"SU2",
	);

	issued.assert_calls_async(1).await;
	refetched.assert_calls_async(1).await;
}

#[tokio::test]
async fn app_token_is_fetched_lazily_and_served_from_cache() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/oauth/access_token")
				.query_param("grant_type", "client_credentials");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"A1\",\"expires_in\":3600}");
		})
		.await;
	let manager = test_manager(&server.base_url(), frozen_clock());

	assert_eq!(
		manager.get_app_token().await.expect("App token retrieval should succeed."),
		"A1",
	);
	assert_eq!(
		manager.get_app_token().await.expect("Cached app token should be served."),
		"A1",
	);

	mock.assert_calls_async(1).await;
}

#[tokio::test]
async fn parameterized_operations_always_refetch() {
	let server = MockServer::start_async().await;
	let mock = server
		.mock_async(|when, then| {
			when.method(GET).path("/v12.0/me/accounts").query_param("access_token", "U1");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"data\":[{\"access_token\":\"P1\",\"id\":\"99\"}]}");
		})
		.await;
	let manager = test_manager(&server.base_url(), frozen_clock());

	// A cached-but-valid page token could belong to a different page, so every
	// call with explicit context re-fetches.
	for _ in 0..2 {
		assert_eq!(
			manager
				.get_page_token("U1")
				.await
				.expect("Page token retrieval should succeed."),
			"P1",
		);
	}

	mock.assert_calls_async(2).await;
}

#[tokio::test]
async fn client_token_round_trips_the_accepted_candidate() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/debug_token")
				.query_param("input_token", "CANDIDATE")
				.query_param("access_token", "APP");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"is_valid\":false,\"expires_at\":1893456000}");
		})
		.await;

	let manager = test_manager(&server.base_url(), frozen_clock());

	assert_eq!(
		manager
			.get_client_token("CANDIDATE")
			.await
			.expect("Client token validation should succeed."),
		"CANDIDATE",
	);
}

#[tokio::test]
async fn client_token_with_zero_expiry_is_served_as_never_expiring() {
	let server = MockServer::start_async().await;

	// The platform reports non-expiring tokens with expires_at 0; the cached
	// candidate must stay servable through the lazy read-back.
	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/debug_token")
				.query_param("input_token", "CANDIDATE")
				.query_param("access_token", "APP");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"is_valid\":false,\"expires_at\":0}");
		})
		.await;

	let manager = test_manager(&server.base_url(), frozen_clock());

	assert_eq!(
		manager
			.get_client_token("CANDIDATE")
			.await
			.expect("A zero-expiry candidate should be cached and served."),
		"CANDIDATE",
	);
}

#[tokio::test]
async fn user_token_exchange_flows_through_the_manager() {
	let server = MockServer::start_async().await;

	server
		.mock_async(|when, then| {
			when.method(GET)
				.path("/v12.0/oauth/access_token")
				.query_param("code", "CODE1")
				.query_param("redirect_uri", "https://app.example.com/cb");
			then.status(200)
				.header("content-type", "application/json")
				.body("{\"access_token\":\"U1\",\"expires_in\":5184000}");
		})
		.await;

	let manager = test_manager(&server.base_url(), frozen_clock());

	assert_eq!(
		manager
			.get_user_token("CODE1", "https://app.example.com/cb")
			.await
			.expect("User token exchange should succeed."),
		"U1",
	);
}
