//! Meta Graph API SDK: token acquisition strategies, an authenticated request
//! pipeline with a typed error taxonomy, and typed Messenger webhook payloads.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod manager;
pub mod obs;
pub mod webhook;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and helpers for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::Clock, client::GraphApiClient, config::GraphConfig, http::ReqwestTransport,
		manager::TokenManager,
	};

	/// Baseline config pointed at a mock server; default bearer injection stays off so
	/// handler tests control every query parameter explicitly.
	pub fn test_config(host: &str) -> GraphConfig {
		GraphConfig::new()
			.with_host(host)
			.with_client_id("app-id")
			.with_client_secret("app-secret")
			.with_app_token("APP")
			.with_use_access_token(false)
	}

	/// Builds a [`GraphApiClient`] against the provided mock server base URL.
	pub fn test_client(host: &str) -> Arc<GraphApiClient> {
		test_client_with(test_config(host))
	}

	/// Builds a [`GraphApiClient`] from an explicit config over the default reqwest transport.
	pub fn test_client_with(config: GraphConfig) -> Arc<GraphApiClient> {
		let client = GraphApiClient::with_transport(config, Arc::new(ReqwestTransport::default()))
			.expect("Failed to build Graph API client for tests.");

		Arc::new(client)
	}

	/// Constructs a [`TokenManager`] over a mock server with the provided clock.
	pub fn test_manager(host: &str, clock: Clock) -> TokenManager {
		TokenManager::with_clock(test_client(host), clock)
	}
}

mod _prelude {
	pub use std::{
		collections::BTreeMap,
		error::Error as StdError,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::{Mutex, RwLock};
	#[cfg(feature = "reqwest")]
	pub use reqwest::{Client as ReqwestClient, Error as ReqwestError};
	pub use serde::{Deserialize, Serialize};
	pub use thiserror::Error as ThisError;
	pub use time::{Duration, OffsetDateTime};
	pub use url::Url;

	pub use crate::error::{Error, Result};
}

#[cfg(feature = "reqwest")] pub use reqwest;
pub use url;
#[cfg(all(test, feature = "reqwest"))] use {httpmock as _, tokio as _};
#[cfg(test)] use meta_graph_sdk as _;
