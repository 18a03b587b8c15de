//! Cached access-token record, its store codec, and the redacting secret wrapper.

// std
use std::num::ParseIntError;
// self
use crate::_prelude::*;

/// Redacted token secret wrapper keeping sensitive material out of logs.
#[derive(Clone, PartialEq, Eq)]
pub struct TokenSecret(String);
impl TokenSecret {
	/// Wraps a new secret string.
	pub fn new(value: impl Into<String>) -> Self {
		Self(value.into())
	}

	/// Returns the inner token value. Callers must avoid logging this string.
	pub fn expose(&self) -> &str {
		&self.0
	}
}
impl AsRef<str> for TokenSecret {
	fn as_ref(&self) -> &str {
		self.expose()
	}
}
impl Debug for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_tuple("TokenSecret").field(&"<redacted>").finish()
	}
}
impl Display for TokenSecret {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str("<redacted>")
	}
}

/// Cached token record persisted in the property store.
///
/// Wire form is `<access_token>:<expires_at>` with the expiry in whole unix
/// seconds. Decoding splits on the last `:` so access tokens containing the
/// delimiter stay unambiguous; the expiry digits never do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CachedToken {
	/// Access token secret; callers must avoid logging it.
	pub access_token: TokenSecret,
	/// Expiry instant in unix seconds.
	pub expires_at: i64,
}
impl CachedToken {
	/// Builds a record expiring at the provided instant.
	pub fn new(access_token: impl Into<String>, expires_at: OffsetDateTime) -> Self {
		Self { access_token: TokenSecret::new(access_token), expires_at: expires_at.unix_timestamp() }
	}

	/// Serializes the record into its store wire form.
	pub fn encode(&self) -> String {
		format!("{}:{}", self.access_token.expose(), self.expires_at)
	}

	/// Parses a store wire-form value back into a record.
	pub fn decode(value: &str) -> Result<Self, CacheCodecError> {
		let (token, expiry) = value.rsplit_once(':').ok_or(CacheCodecError::MissingDelimiter)?;
		// Integer parse before comparison; a lexical compare of epoch strings is wrong
		// as soon as the digit counts differ.
		let expires_at = expiry.parse().map_err(|e| CacheCodecError::InvalidExpiry { source: e })?;

		Ok(Self { access_token: TokenSecret::new(token), expires_at })
	}

	/// Returns true once `instant` reaches the expiry (inclusive).
	pub fn is_expired_at(&self, instant: OffsetDateTime) -> bool {
		instant.unix_timestamp() >= self.expires_at
	}

	/// Convenience helper that checks expiry against the current UTC instant.
	pub fn is_expired(&self) -> bool {
		self.is_expired_at(OffsetDateTime::now_utc())
	}
}

/// Errors produced when decoding a stored token entry.
#[derive(Debug, ThisError)]
pub enum CacheCodecError {
	/// Stored value does not contain the `:` delimiter.
	#[error("Cached token entry is missing the `:` delimiter.")]
	MissingDelimiter,
	/// Stored expiry field is not an integer.
	#[error("Cached token expiry is not an integer.")]
	InvalidExpiry {
		/// Underlying parsing failure.
		#[source]
		source: ParseIntError,
	},
}
