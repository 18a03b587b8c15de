//! Cached-token lifecycle orchestration over the property store and transport.

// self
use crate::{
	_prelude::*,
	auth::{AuthConfig, CachedToken, assertion},
	http::{HttpClient, HttpRequest},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
	store::PropertyStore,
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

#[cfg(feature = "reqwest")]
/// Authenticator specialized for the crate's default reqwest transport.
pub type ReqwestAuthenticator = Authenticator<ReqwestHttpClient>;

/// Token endpoint success payload (RFC 7523 §2.1).
#[derive(Debug, Deserialize)]
struct TokenEndpointResponse {
	access_token: String,
	expires_in: i64,
}

/// Issues and caches bearer tokens for the 2-legged JWT bearer grant.
///
/// The property store holds at most one entry under the configured key, and
/// [`token`](Self::token) performs at most one network round trip per call.
/// There is no cross-caller locking: concurrent callers racing on the same key
/// may both issue, which only wastes a request since the overwrite always lands
/// a newer valid token.
#[derive(Clone)]
pub struct Authenticator<C>
where
	C: ?Sized + HttpClient,
{
	/// HTTP client used for the token endpoint exchange.
	pub http_client: Arc<C>,
	/// Property store the cached token lives in.
	pub store: Arc<dyn PropertyStore>,
	/// Immutable OAuth configuration.
	pub config: AuthConfig,
}
impl<C> Authenticator<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates an authenticator that reuses the caller-provided transport.
	pub fn with_http_client(
		store: Arc<dyn PropertyStore>,
		config: AuthConfig,
		http_client: impl Into<Arc<C>>,
	) -> Self {
		Self { http_client: http_client.into(), store, config }
	}

	/// Returns a bearer token, issuing a fresh one when the cache is empty or expired.
	///
	/// Cache states observed through this call: no entry, an expired entry, or an
	/// undecodable entry triggers a single issuance and overwrite; a valid entry
	/// is returned as-is without touching the network.
	pub async fn token(&self) -> Result<String> {
		const KIND: FlowKind = FlowKind::Token;

		let span = FlowSpan::new(KIND, "token");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				match self.store.get(self.config.store_key()).await? {
					Some(raw) => match CachedToken::decode(&raw) {
						Ok(cached) if !cached.is_expired_at(OffsetDateTime::now_utc()) =>
							Ok(cached.access_token.expose().to_owned()),
						Ok(_) => self.issue().await,
						// A corrupt entry counts as a miss; the issuance overwrite repairs it.
						Err(_e) => {
							#[cfg(feature = "tracing")]
							tracing::warn!(
								error = %_e,
								"Cached token entry failed to decode; reissuing."
							);

							self.issue().await
						},
					},
					None => self.issue().await,
				}
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Exchanges a freshly signed assertion for an access token and caches it.
	///
	/// On a non-200 response the store is left untouched and the caller receives
	/// [`Error::Issuance`]; there is no retry or backoff.
	async fn issue(&self) -> Result<String> {
		let signed = assertion::sign(&self.config, OffsetDateTime::now_utc())?;
		let request = HttpRequest::post(self.config.token_endpoint().clone()).form([
			("grant_type", assertion::JWT_BEARER_GRANT_TYPE),
			("assertion", signed.as_str()),
		]);
		let response = self.http_client.execute(request).await?;

		// Strictly 200; other 2xx statuses carry no token payload for this grant.
		if response.status != 200 {
			return Err(Error::Issuance { status: response.status, body: response.body });
		}

		let status = response.status;
		let payload: TokenEndpointResponse = response
			.json()
			.map_err(|e| Error::ResponseParse { source: e, status: Some(status) })?;
		let expires_at = OffsetDateTime::now_utc() + Duration::seconds(payload.expires_in);
		let cached = CachedToken::new(payload.access_token.as_str(), expires_at);

		self.store.set(self.config.store_key(), cached.encode()).await?;

		Ok(payload.access_token)
	}

	/// Removes the cached token; idempotent and never contacts the authorization
	/// server (most tokens issued by this grant are not server-revocable).
	pub async fn revoke(&self) -> Result<()> {
		self.store.delete(self.config.store_key()).await?;

		Ok(())
	}
}
#[cfg(feature = "reqwest")]
impl ReqwestAuthenticator {
	/// Creates an authenticator provisioned with its own reqwest transport.
	pub fn new(store: Arc<dyn PropertyStore>, config: AuthConfig) -> Self {
		Self::with_http_client(store, config, ReqwestHttpClient::default())
	}
}
impl<C> Debug for Authenticator<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("Authenticator").field("config", &self.config).finish()
	}
}
