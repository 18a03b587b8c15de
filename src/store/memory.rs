//! Thread-safe in-memory [`PropertyStore`] implementation for local development and tests.

// self
use crate::{
	_prelude::*,
	store::{PropertyStore, StoreFuture},
};

type StoreMap = Arc<RwLock<HashMap<String, String>>>;

/// Thread-safe backend that keeps properties in-process for tests and demos.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore(StoreMap);
impl MemoryStore {
	/// Returns the number of stored entries.
	pub fn len(&self) -> usize {
		self.0.read().len()
	}

	/// Returns true if no entries are stored.
	pub fn is_empty(&self) -> bool {
		self.0.read().is_empty()
	}
}
impl PropertyStore for MemoryStore {
	fn get<'a>(&'a self, key: &'a str) -> StoreFuture<'a, Option<String>> {
		Box::pin(async move { Ok(self.0.read().get(key).cloned()) })
	}

	fn set<'a>(&'a self, key: &'a str, value: String) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			self.0.write().insert(key.to_owned(), value);

			Ok(())
		})
	}

	fn delete<'a>(&'a self, key: &'a str) -> StoreFuture<'a, ()> {
		Box::pin(async move {
			self.0.write().remove(key);

			Ok(())
		})
	}
}

#[cfg(test)]
mod tests {
	// self
	use super::*;

	#[tokio::test]
	async fn set_overwrites_existing_value() {
		let store = MemoryStore::default();

		store.set("people_oauth", "old:1".into()).await.unwrap();
		store.set("people_oauth", "new:2".into()).await.unwrap();

		assert_eq!(store.get("people_oauth").await.unwrap().as_deref(), Some("new:2"));
		assert_eq!(store.len(), 1);
	}

	#[tokio::test]
	async fn clones_share_the_same_map() {
		let store = MemoryStore::default();
		let alias = store.clone();

		store.set("k", "v".into()).await.unwrap();

		assert_eq!(alias.get("k").await.unwrap().as_deref(), Some("v"));

		alias.delete("k").await.unwrap();

		assert!(store.is_empty());
	}
}
