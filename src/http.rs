//! Transport primitives shared by the authenticator and the API client.
//!
//! [`HttpClient`] is the crate's only dependency on an HTTP stack. Implementations
//! return the raw status code and body text for every completed exchange; non-2xx
//! statuses are data for the caller to interpret, never transport errors. The
//! batch entry point dispatches all requests concurrently and keeps the responses
//! positionally aligned with the inputs.

// std
#[cfg(feature = "reqwest")] use std::ops::Deref;
// crates.io
use futures::future;
use serde::de::DeserializeOwned;
// self
use crate::{_prelude::*, error::TransportError};

/// Boxed future returned by [`HttpClient`] operations.
pub type HttpFuture<'a, T = HttpResponse> =
	Pin<Box<dyn Future<Output = Result<T, TransportError>> + 'a + Send>>;

/// HTTP methods used by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Method {
	/// HTTP GET.
	Get,
	/// HTTP POST.
	Post,
}
impl Method {
	/// Returns the canonical method name.
	pub const fn as_str(self) -> &'static str {
		match self {
			Method::Get => "GET",
			Method::Post => "POST",
		}
	}
}
impl Display for Method {
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.write_str(self.as_str())
	}
}

/// Outbound request description consumed by [`HttpClient`] implementations.
#[derive(Clone, Debug)]
pub struct HttpRequest {
	/// Request method.
	pub method: Method,
	/// Fully resolved request URL, query included.
	pub url: Url,
	/// Additional headers, applied in order.
	pub headers: Vec<(String, String)>,
	/// Content type of `body`, when one is set.
	pub content_type: Option<&'static str>,
	/// Request body, when one is set.
	pub body: Option<String>,
}
impl HttpRequest {
	/// Starts a GET request for the provided URL.
	pub fn get(url: Url) -> Self {
		Self::new(Method::Get, url)
	}

	/// Starts a POST request for the provided URL.
	pub fn post(url: Url) -> Self {
		Self::new(Method::Post, url)
	}

	fn new(method: Method, url: Url) -> Self {
		Self { method, url, headers: Vec::new(), content_type: None, body: None }
	}

	/// Appends a header.
	pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
		self.headers.push((name.into(), value.into()));

		self
	}

	/// Attaches an `Authorization: Bearer <token>` header.
	pub fn bearer(self, token: &str) -> Self {
		self.header("Authorization", format!("Bearer {token}"))
	}

	/// Sets a JSON body and the matching content type.
	pub fn json(mut self, value: &impl Serialize) -> Result<Self, serde_json::Error> {
		self.body = Some(serde_json::to_string(value)?);
		self.content_type = Some("application/json");

		Ok(self)
	}

	/// Sets a form-encoded body and the matching content type.
	pub fn form<I, K, V>(mut self, pairs: I) -> Self
	where
		I: IntoIterator,
		I::Item: std::borrow::Borrow<(K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		self.body =
			Some(url::form_urlencoded::Serializer::new(String::new()).extend_pairs(pairs).finish());
		self.content_type = Some("application/x-www-form-urlencoded");

		self
	}
}

/// Completed exchange surfaced to callers: raw status plus body text.
#[derive(Clone, Debug)]
pub struct HttpResponse {
	/// HTTP status code.
	pub status: u16,
	/// Raw response body.
	pub body: String,
}
impl HttpResponse {
	/// Returns true for 2xx statuses.
	pub fn is_success(&self) -> bool {
		(200..300).contains(&self.status)
	}

	/// Parses the body as JSON, reporting the failing path on malformed payloads.
	pub fn json<T>(&self) -> Result<T, serde_path_to_error::Error<serde_json::Error>>
	where
		T: DeserializeOwned,
	{
		let mut deserializer = serde_json::Deserializer::from_str(&self.body);

		serde_path_to_error::deserialize(&mut deserializer)
	}
}

/// Abstraction over HTTP transports capable of single and batched exchanges.
///
/// Implementations must be `Send + Sync + 'static` so they can be shared behind
/// `Arc` across the authenticator and the API client. No timeout, retry, or
/// cancellation behavior is layered on top; whatever the transport provides is
/// what callers get.
pub trait HttpClient
where
	Self: 'static + Send + Sync,
{
	/// Executes a single request to completion.
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_>;

	/// Dispatches every request concurrently and collects the responses in input
	/// order. The batch fails only when the underlying transport fails.
	fn execute_all(&self, requests: Vec<HttpRequest>) -> HttpFuture<'_, Vec<HttpResponse>> {
		Box::pin(async move {
			future::try_join_all(requests.into_iter().map(|request| self.execute(request))).await
		})
	}
}

/// Thin wrapper around [`ReqwestClient`] so shared HTTP behavior lives in one place.
#[cfg(feature = "reqwest")]
#[derive(Clone, Default)]
pub struct ReqwestHttpClient(pub ReqwestClient);
#[cfg(feature = "reqwest")]
impl ReqwestHttpClient {
	/// Wraps an existing reqwest [`ReqwestClient`].
	pub fn with_client(client: ReqwestClient) -> Self {
		Self(client)
	}
}
#[cfg(feature = "reqwest")]
impl AsRef<ReqwestClient> for ReqwestHttpClient {
	fn as_ref(&self) -> &ReqwestClient {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl Deref for ReqwestHttpClient {
	type Target = ReqwestClient;

	fn deref(&self) -> &Self::Target {
		&self.0
	}
}
#[cfg(feature = "reqwest")]
impl HttpClient for ReqwestHttpClient {
	fn execute(&self, request: HttpRequest) -> HttpFuture<'_> {
		let client = self.0.clone();

		Box::pin(async move {
			let method = match request.method {
				Method::Get => reqwest::Method::GET,
				Method::Post => reqwest::Method::POST,
			};
			let mut builder = client.request(method, request.url);

			for (name, value) in &request.headers {
				builder = builder.header(name, value);
			}
			if let Some(content_type) = request.content_type {
				builder = builder.header("Content-Type", content_type);
			}
			if let Some(body) = request.body {
				builder = builder.body(body);
			}

			let response = builder.send().await.map_err(TransportError::from)?;
			let status = response.status().as_u16();
			let body = response.text().await.map_err(TransportError::from)?;

			Ok(HttpResponse { status, body })
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn form_body_percent_encodes_pairs() {
		let request = HttpRequest::post(Url::parse("https://example.com/token").unwrap()).form([
			("grant_type", "urn:ietf:params:oauth:grant-type:jwt-bearer"),
			("assertion", "a.b.c"),
		]);

		assert_eq!(request.content_type, Some("application/x-www-form-urlencoded"));
		assert_eq!(
			request.body.as_deref(),
			Some(
				"grant_type=urn%3Aietf%3Aparams%3Aoauth%3Agrant-type%3Ajwt-bearer&assertion=a.b.c"
			),
		);
	}

	#[test]
	fn bearer_header_is_attached() {
		let request =
			HttpRequest::get(Url::parse("https://example.com/groups").unwrap()).bearer("tok-123");

		assert_eq!(
			request.headers,
			vec![("Authorization".to_string(), "Bearer tok-123".to_string())],
		);
	}

	#[test]
	fn json_helper_reports_failing_path() {
		#[derive(Debug, Deserialize)]
		struct Payload {
			#[allow(dead_code)]
			access_token: String,
		}

		let response =
			HttpResponse { status: 200, body: "{\"access_token\":42}".into() };
		let err = response.json::<Payload>().expect_err("Mistyped field should fail to parse.");

		assert_eq!(err.path().to_string(), "access_token");
	}

	#[test]
	fn non_success_statuses_are_data() {
		let response = HttpResponse { status: 403, body: String::new() };

		assert!(!response.is_success());

		let response = HttpResponse { status: 204, body: String::new() };

		assert!(response.is_success());
	}
}
