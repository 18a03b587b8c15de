//! Property-store contracts and built-in backends for the cached token.

pub mod file;
pub mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

// self
use crate::_prelude::*;

/// Boxed future returned by [`PropertyStore`] operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, StoreError>> + 'a + Send>>;

/// Key/value capability the authenticator caches its token in.
///
/// Models a host-provided property service: values are plain strings and the store
/// holds at most one entry per key. The authenticator never splits the cached token
/// across entries, so backends need no transactional guarantees beyond single-key
/// replacement.
pub trait PropertyStore
where
	Self: Send + Sync,
{
	/// Returns the value stored under `key`, if any.
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>>;

	/// Inserts or replaces the value stored under `key`.
	fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()>;

	/// Removes the value stored under `key`; deleting a missing key is a no-op.
	fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()>;
}

/// Error type produced by [`PropertyStore`] implementations.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ThisError)]
pub enum StoreError {
	/// Serialization failures surfaced by the backend.
	#[error("Serialization error: {message}.")]
	Serialization {
		/// Human-readable error payload.
		message: String,
	},
	/// Backend-level failure for the storage engine.
	#[error("Backend failure: {message}.")]
	Backend {
		/// Human-readable error payload.
		message: String,
	},
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn trait_object_round_trips_entries() {
		let backend = Arc::new(MemoryStore::default());
		let store: Arc<dyn PropertyStore> = backend;

		assert_eq!(store.get("people_oauth").await.unwrap(), None);

		store.set("people_oauth", "token:1735689600".into()).await.unwrap();

		assert_eq!(store.get("people_oauth").await.unwrap().as_deref(), Some("token:1735689600"));

		store.delete("people_oauth").await.unwrap();
		store.delete("people_oauth").await.expect("Deleting a missing key should be a no-op.");

		assert_eq!(store.get("people_oauth").await.unwrap(), None);
	}

	#[test]
	fn store_error_serializes_for_diagnostics() {
		let payload = serde_json::to_string(&StoreError::Backend { message: "disk full".into() })
			.expect("StoreError should serialize to JSON.");
		let round_trip: StoreError =
			serde_json::from_str(&payload).expect("Serialized error should deserialize.");

		assert_eq!(round_trip, StoreError::Backend { message: "disk full".into() });
	}
}
