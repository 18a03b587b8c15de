//! People API surface: bulk contact creation and contact-group batch lookup.
//!
//! Payloads pass through as opaque JSON ([`serde_json::Value`]); this module never
//! interprets Person or ContactGroup shapes beyond the batch-get envelope.

// self
use crate::{
	_prelude::*,
	auth::Authenticator,
	error::ConfigError,
	http::{HttpClient, HttpRequest, HttpResponse},
	obs::{self, FlowKind, FlowOutcome, FlowSpan},
};
#[cfg(feature = "reqwest")] use crate::http::ReqwestHttpClient;

/// Production People API base URL.
pub const DEFAULT_BASE_URL: &str = "https://people.googleapis.com";
/// API version segment used when building endpoint paths.
pub const API_VERSION: &str = "v1";

#[cfg(feature = "reqwest")]
/// API client specialized for the crate's default reqwest transport.
pub type ReqwestPeopleApi = PeopleApi<ReqwestHttpClient>;

#[derive(Debug, Deserialize)]
struct BatchGetEnvelope {
	#[serde(default)]
	responses: Vec<GroupEnvelope>,
}

#[derive(Debug, Deserialize)]
struct GroupEnvelope {
	#[serde(rename = "contactGroup")]
	contact_group: serde_json::Value,
}

/// People API client built on top of an [`Authenticator`].
///
/// Each top-level call fetches exactly one bearer token, regardless of how many
/// sub-requests it fans out into.
#[derive(Clone)]
pub struct PeopleApi<C>
where
	C: ?Sized + HttpClient,
{
	/// Authenticator supplying bearer tokens and the shared transport.
	pub auth: Authenticator<C>,
	/// API base URL; production default unless overridden.
	pub base: Url,
}
impl<C> PeopleApi<C>
where
	C: ?Sized + HttpClient,
{
	/// Creates a client against the production base URL.
	pub fn new(auth: Authenticator<C>) -> Result<Self, ConfigError> {
		let base =
			Url::parse(DEFAULT_BASE_URL).map_err(|e| ConfigError::InvalidEndpoint { source: e })?;

		Ok(Self { auth, base })
	}

	/// Overrides the base URL (mock servers, regional endpoints).
	pub fn with_base(mut self, base: Url) -> Self {
		self.base = base;

		self
	}

	/// Creates contacts conforming to the Person schema, one POST per payload,
	/// all dispatched concurrently under a single bearer token.
	///
	/// The returned responses are positionally aligned with `contacts`. Per-contact
	/// failures come back as non-2xx responses, never as errors; the call itself
	/// fails only when the transport or the token fetch does.
	pub async fn create_contacts(&self, contacts: &[serde_json::Value]) -> Result<Vec<HttpResponse>> {
		const KIND: FlowKind = FlowKind::CreateContacts;

		let span = FlowSpan::new(KIND, "create_contacts");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.auth.token().await?;
				let endpoint = self.endpoint("people:createContact")?;
				let requests = contacts
					.iter()
					.map(|contact| {
						HttpRequest::post(endpoint.clone())
							.bearer(&token)
							.json(contact)
							.map_err(|e| ConfigError::Serialize { source: e }.into())
					})
					.collect::<Result<Vec<_>>>()?;

				Ok(self.auth.http_client.execute_all(requests).await?)
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	/// Batch-gets contact groups by name.
	///
	/// Returns the unwrapped `contactGroup` objects on a 200 response and `None`
	/// on any other status; callers must null-check instead of catching.
	pub async fn get_groups(&self, names: &[&str]) -> Result<Option<Vec<serde_json::Value>>> {
		const KIND: FlowKind = FlowKind::GetGroups;

		let span = FlowSpan::new(KIND, "get_groups");

		obs::record_flow_outcome(KIND, FlowOutcome::Attempt);

		let result = span
			.instrument(async move {
				let token = self.auth.token().await?;
				let mut endpoint = self.endpoint("contactGroups:batchGet")?;

				for name in names {
					endpoint
						.query_pairs_mut()
						.append_pair("resourceNames", &format!("contactGroups/{name}"));
				}

				let response =
					self.auth.http_client.execute(HttpRequest::get(endpoint).bearer(&token)).await?;

				if response.status != 200 {
					return Ok(None);
				}

				let envelope: BatchGetEnvelope = response
					.json()
					.map_err(|e| Error::ResponseParse { source: e, status: Some(response.status) })?;

				Ok(Some(envelope.responses.into_iter().map(|g| g.contact_group).collect()))
			})
			.await;

		match &result {
			Ok(_) => obs::record_flow_outcome(KIND, FlowOutcome::Success),
			Err(_) => obs::record_flow_outcome(KIND, FlowOutcome::Failure),
		}

		result
	}

	fn endpoint(&self, method_path: &str) -> Result<Url, ConfigError> {
		self.base
			.join(&format!("{API_VERSION}/{method_path}"))
			.map_err(|e| ConfigError::InvalidEndpoint { source: e })
	}
}
impl<C> Debug for PeopleApi<C>
where
	C: ?Sized + HttpClient,
{
	fn fmt(&self, f: &mut Formatter) -> FmtResult {
		f.debug_struct("PeopleApi").field("auth", &self.auth).field("base", &self.base.as_str()).finish()
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[test]
	fn endpoint_paths_keep_the_method_colon() {
		let base = Url::parse(DEFAULT_BASE_URL).unwrap();
		let endpoint = base.join(&format!("{API_VERSION}/people:createContact")).unwrap();

		assert_eq!(endpoint.as_str(), "https://people.googleapis.com/v1/people:createContact");
	}

	#[test]
	fn batch_get_envelope_unwraps_groups() {
		let body = r#"{"responses":[
			{"contactGroup":{"name":"contactGroups/family"}},
			{"contactGroup":{"name":"contactGroups/friends"}}
		]}"#;
		let envelope: BatchGetEnvelope =
			serde_json::from_str(body).expect("Envelope fixture should parse.");
		let groups =
			envelope.responses.into_iter().map(|g| g.contact_group).collect::<Vec<_>>();

		assert_eq!(groups[0]["name"], "contactGroups/family");
		assert_eq!(groups[1]["name"], "contactGroups/friends");
	}

	#[test]
	fn empty_envelope_defaults_to_no_groups() {
		let envelope: BatchGetEnvelope =
			serde_json::from_str("{}").expect("Empty envelope should parse.");

		assert!(envelope.responses.is_empty());
	}
}
