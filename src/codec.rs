//! Base64url codec (RFC 4648 §5, unpadded) used for JWT assertion segments.

// crates.io
use base64::{Engine as _, engine::general_purpose::URL_SAFE_NO_PAD};

/// Encodes bytes with the padding-free base64url alphabet.
///
/// Total over any byte sequence; the output never contains `+`, `/`, or `=`.
pub fn encode(input: impl AsRef<[u8]>) -> String {
	URL_SAFE_NO_PAD.encode(input)
}

/// Decodes a padding-free base64url string produced by [`encode`].
///
/// Malformed input (wrong alphabet, stray padding, truncated groups) surfaces the
/// underlying decoder error unmodified.
pub fn decode(input: impl AsRef<[u8]>) -> Result<Vec<u8>, base64::DecodeError> {
	URL_SAFE_NO_PAD.decode(input)
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn round_trips_arbitrary_bytes() {
		let all_bytes = (0..=u8::MAX).collect::<Vec<_>>();

		for input in [&b""[..], b"f", b"fo", b"foo", b"\xff\xfe\xfd", all_bytes.as_slice()] {
			let encoded = encode(input);
			let decoded = decode(&encoded).expect("Encoded output should decode successfully.");

			assert_eq!(decoded, input);
		}
	}

	#[test]
	fn output_is_url_safe_and_unpadded() {
		// 0xfb 0xff maps onto `+` and `/` in the standard alphabet and needs padding.
		let encoded = encode([0xfb, 0xff, 0xbf, 0xef]);

		assert!(!encoded.contains('+'));
		assert!(!encoded.contains('/'));
		assert!(!encoded.contains('='));
		assert!(encoded.contains('-') || encoded.contains('_'));
	}

	#[test]
	fn decode_rejects_malformed_input() {
		assert!(decode("a").is_err(), "Truncated groups must be rejected.");
		assert!(decode("AQ==").is_err(), "Padded input does not match encode's output.");
		assert!(decode("+/").is_err(), "The standard alphabet is not accepted.");
	}
}
