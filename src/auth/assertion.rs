//! Per-issuance JWT bearer assertions (RFC 7523).
//!
//! Assertions are ephemeral: built, signed, exchanged, and discarded within a
//! single issuance attempt, with fresh `iat`/`exp` stamps every time.

// crates.io
use jsonwebtoken::{Algorithm, crypto};
// self
use crate::{_prelude::*, auth::AuthConfig, codec, error::ConfigError};

/// Grant type identifier sent alongside the signed assertion.
pub const JWT_BEARER_GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
/// Fixed assertion lifetime. The token endpoint's `expires_in` only governs the
/// returned access token's cache entry, never the assertion itself.
pub const ASSERTION_LIFETIME: Duration = Duration::seconds(3_600);

#[derive(Debug, Serialize)]
struct Header {
	alg: &'static str,
	typ: &'static str,
}

#[derive(Debug, Serialize)]
struct ClaimSet<'a> {
	aud: &'a str,
	exp: i64,
	iat: i64,
	iss: &'a str,
	scope: String,
	#[serde(skip_serializing_if = "Option::is_none")]
	sub: Option<&'a str>,
}

/// Builds and signs the JWT assertion for a single issuance attempt.
///
/// Header and claim set are serialized as UTF-8 JSON, base64url-encoded, and
/// dot-joined; the RS256 (RSASSA-PKCS1-v1_5 over SHA-256) signature over that
/// signing input forms the third segment.
pub fn sign(config: &AuthConfig, issued_at: OffsetDateTime) -> Result<String, ConfigError> {
	let iat = issued_at.unix_timestamp();
	let header = Header { alg: "RS256", typ: "JWT" };
	let claims = ClaimSet {
		aud: config.token_endpoint().as_str(),
		exp: iat + ASSERTION_LIFETIME.whole_seconds(),
		iat,
		iss: config.issuer(),
		scope: config.scope_claim(),
		sub: config.impersonate(),
	};
	let header_json =
		serde_json::to_string(&header).map_err(|e| ConfigError::Serialize { source: e })?;
	let claims_json =
		serde_json::to_string(&claims).map_err(|e| ConfigError::Serialize { source: e })?;
	let signing_input = format!("{}.{}", codec::encode(header_json), codec::encode(claims_json));
	let signature = crypto::sign(signing_input.as_bytes(), &config.signing_key, Algorithm::RS256)
		.map_err(|e| ConfigError::Signing { source: e })?;

	Ok(format!("{signing_input}.{signature}"))
}
