//! People API client with a 2-legged OAuth JWT-bearer authenticator, pluggable
//! property-store token cache, and transport-aware observability.

#![deny(clippy::all, missing_docs, unused_crate_dependencies)]

pub mod api;
pub mod auth;
pub mod codec;
pub mod error;
pub mod http;
pub mod obs;
pub mod store;
#[cfg(all(any(test, feature = "test"), feature = "reqwest"))]
pub mod _preludet {
	//! Convenience re-exports and fixtures for integration tests; enabled via `cfg(test)` or the
	//! `test` crate feature.

	pub use crate::_prelude::*;

	// self
	use crate::{
		auth::{AuthConfig, Authenticator, ReqwestAuthenticator},
		http::ReqwestHttpClient,
		store::{MemoryStore, PropertyStore},
	};

	/// RSA private key fixture (PKCS#8 PEM) used to sign test assertions.
	pub const TEST_SIGNING_KEY_PEM: &str = include_str!("../tests/fixtures/rsa_key.pem");

	/// Builds a config signed with the test key against the provided token endpoint.
	pub fn test_config(token_endpoint: Url) -> AuthConfig {
		AuthConfig::builder()
			.signing_key_pem(TEST_SIGNING_KEY_PEM)
			.issuer("svc@unit-test.iam")
			.add_scope("https://www.googleapis.com/auth/contacts")
			.token_endpoint(token_endpoint)
			.build()
			.expect("Test auth config should build successfully.")
	}

	/// Constructs a reqwest-backed authenticator over a fresh in-memory property store.
	pub fn build_test_authenticator(
		token_endpoint: Url,
	) -> (ReqwestAuthenticator, Arc<MemoryStore>) {
		let store_backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn PropertyStore> = store_backend.clone();
		let auth = Authenticator::with_http_client(
			store,
			test_config(token_endpoint),
			ReqwestHttpClient::default(),
		);

		(auth, store_backend)
	}
}

mod _prelude {
	pub use std::{
		collections::HashMap,
		fmt::{Debug, Display, Formatter, Result as FmtResult},
		future::Future,
		pin::Pin,
		sync::Arc,
	};

	pub use parking_lot::RwLock;
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
#[cfg(all(test, feature = "reqwest"))] use httpmock as _;
// The self dev-dependency exists to turn the `test` feature on for the integration suites.
#[cfg(test)] use people_oauth as _;
