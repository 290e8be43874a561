use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{info, instrument};

use super::domain::{NewRestaurant, Restaurant, RestaurantList, RestaurantPatch};
use super::repository::RestaurantStore;
use crate::errors::StoreError;
use crate::storage::json_document_store::JsonDocumentStore;

/// Restaurant store persisted as a `{ "restaurants": [...] }` JSON document.
///
/// Every operation re-reads the whole file. Mutations are read-modify-write
/// of the entire document and are serialized within this process; another
/// process writing the same file can still lose updates. Reads take no lock:
/// the document is replaced by rename, so they never see a half-written file.
pub struct FileRestaurantStore {
    document: JsonDocumentStore<RestaurantList>,
    write_lock: Mutex<()>,
    reject_duplicate_names: bool,
}

impl FileRestaurantStore {
    /// Open the document at `path`, creating an empty one if missing.
    pub async fn open<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let document = JsonDocumentStore::new(path).await?;
        Ok(Self { document, write_lock: Mutex::new(()), reject_duplicate_names: false })
    }

    /// Refuse inserts whose name already exists. Off by default: the file
    /// format has always accepted duplicates.
    pub fn reject_duplicate_names(mut self, reject: bool) -> Self {
        self.reject_duplicate_names = reject;
        self
    }

    pub fn path(&self) -> &Path { self.document.path() }
}

#[async_trait]
impl RestaurantStore for FileRestaurantStore {
    #[instrument(skip(self))]
    async fn list_all(&self) -> Result<Vec<Restaurant>, StoreError> {
        Ok(self.document.load().await?.restaurants)
    }

    #[instrument(skip(self))]
    async fn get_by_name(&self, name: &str) -> Result<Option<Restaurant>, StoreError> {
        let doc = self.document.load().await?;
        Ok(doc.restaurants.into_iter().find(|r| r.name == name))
    }

    #[instrument(skip(self, record), fields(name = %record.name))]
    async fn insert(&self, record: NewRestaurant) -> Result<Restaurant, StoreError> {
        record.validate()?;
        let reject_duplicates = self.reject_duplicate_names;
        let restaurant = record.into_restaurant();

        let _guard = self.write_lock.lock().await;
        let inserted = self
            .document
            .update(move |doc| {
                if reject_duplicates && doc.restaurants.iter().any(|r| r.name == restaurant.name) {
                    return Err(StoreError::Conflict(restaurant.name));
                }
                doc.restaurants.push(restaurant.clone());
                Ok(restaurant)
            })
            .await?;
        info!(name = %inserted.name, "restaurant_inserted");
        Ok(inserted)
    }

    #[instrument(skip(self))]
    async fn delete_by_name(&self, name: &str) -> Result<Restaurant, StoreError> {
        let _guard = self.write_lock.lock().await;
        let removed = self
            .document
            .update(|doc| {
                let idx = doc
                    .restaurants
                    .iter()
                    .position(|r| r.name == name)
                    .ok_or_else(|| StoreError::not_found(name))?;
                Ok(doc.restaurants.remove(idx))
            })
            .await?;
        info!(name = %removed.name, "restaurant_deleted");
        Ok(removed)
    }

    #[instrument(skip(self, patch))]
    async fn patch_by_name(&self, name: &str, patch: RestaurantPatch) -> Result<Restaurant, StoreError> {
        let _guard = self.write_lock.lock().await;
        let updated = self
            .document
            .update(|doc| {
                let found = doc
                    .restaurants
                    .iter_mut()
                    .find(|r| r.name == name)
                    .ok_or_else(|| StoreError::not_found(name))?;
                patch.apply(found);
                Ok(found.clone())
            })
            .await?;
        info!(name = %updated.name, "restaurant_patched");
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::json_document_store::staging_path;
    use serde_json::json;
    use uuid::Uuid;

    fn temp_file() -> PathBuf {
        std::env::temp_dir().join(format!("svc_restaurants_{}.json", Uuid::new_v4()))
    }

    fn new(name: &str, address: &str, phone: &str) -> NewRestaurant {
        NewRestaurant { name: name.into(), address: address.into(), phone: phone.into(), rating: None }
    }

    async fn store_with_a(path: &Path) -> Result<FileRestaurantStore, anyhow::Error> {
        let store = FileRestaurantStore::open(path).await?;
        store.insert(new("A", "Suwon", "0507-1460-0903")).await?;
        Ok(store)
    }

    #[tokio::test]
    async fn insert_appends_and_returns_record_as_persisted() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = store_with_a(&tmp).await?;

        let b = store.insert(new("B", "X", "1")).await?;
        assert_eq!(serde_json::to_value(&b)?, json!({ "name": "B", "address": "X", "phone": "1" }));

        let all = store.list_all().await?;
        let names: Vec<_> = all.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["A", "B"]);

        // listing twice without mutation is stable
        assert_eq!(store.list_all().await?, all);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn get_by_name_round_trips_and_absent_is_none() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = FileRestaurantStore::open(&tmp).await?;
        let mut input = new("생각나는 순대", "Suwon", "1111-1111-1111");
        input.rating = Some(3.5);
        let inserted = store.insert(input).await?;

        let found = store.get_by_name("생각나는 순대").await?;
        assert_eq!(found, Some(inserted));
        assert_eq!(store.get_by_name("nope").await?, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn delete_removes_exactly_one_and_unknown_is_not_found() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = store_with_a(&tmp).await?;
        store.insert(new("B", "X", "1")).await?;

        let removed = store.delete_by_name("A").await?;
        assert_eq!(removed.name, "A");
        assert_eq!(store.get_by_name("A").await?, None);
        assert_eq!(store.list_all().await?.len(), 1);

        let err = store.delete_by_name("Z").await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(ref n) if n == "Z"));
        assert_eq!(store.list_all().await?.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn patch_overwrites_only_supplied_fields() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = store_with_a(&tmp).await?;

        let patch = RestaurantPatch { rating: Some(Some(4.1)), ..RestaurantPatch::default() };
        let updated = store.patch_by_name("A", patch).await?;
        assert_eq!(updated.rating, Some(4.1));
        assert_eq!(updated.name, "A");
        assert_eq!(updated.address, "Suwon");
        assert_eq!(updated.phone, "0507-1460-0903");

        // persisted, visible after reopening
        let reopened = FileRestaurantStore::open(&tmp).await?;
        assert_eq!(reopened.get_by_name("A").await?, Some(updated));

        let err = store.patch_by_name("Z", RestaurantPatch::default()).await.unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn duplicates_accepted_unless_rejection_enabled() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = store_with_a(&tmp).await?;
        store.insert(new("A", "elsewhere", "2")).await?;
        assert_eq!(store.list_all().await?.len(), 2);

        // delete takes the first match only
        let removed = store.delete_by_name("A").await?;
        assert_eq!(removed.address, "Suwon");
        assert_eq!(store.list_all().await?.len(), 1);

        let strict = FileRestaurantStore::open(&tmp).await?.reject_duplicate_names(true);
        let err = strict.insert(new("A", "again", "3")).await.unwrap_err();
        assert!(matches!(err, StoreError::Conflict(ref n) if n == "A"));
        assert_eq!(strict.list_all().await?.len(), 1);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn corrupt_document_surfaces_read_error() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = store_with_a(&tmp).await?;
        tokio::fs::write(&tmp, b"[]oops").await?;

        assert!(matches!(store.list_all().await, Err(StoreError::StorageRead(_))));
        assert!(matches!(store.get_by_name("A").await, Err(StoreError::StorageRead(_))));
        assert!(store.delete_by_name("A").await.is_err());

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn concurrent_inserts_in_one_process_are_not_lost() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = std::sync::Arc::new(FileRestaurantStore::open(&tmp).await?);

        let mut handles = Vec::new();
        for i in 0..16 {
            let store = std::sync::Arc::clone(&store);
            handles.push(tokio::spawn(async move { store.insert(new(&format!("r{i}"), "x", "1")).await }));
        }
        for h in handles {
            h.await??;
        }
        assert_eq!(store.list_all().await?.len(), 16);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn reads_during_concurrent_inserts_never_fail() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = std::sync::Arc::new(store_with_a(&tmp).await?);

        let writer = {
            let store = std::sync::Arc::clone(&store);
            tokio::spawn(async move {
                for i in 0..100 {
                    store.insert(new(&format!("r{i}"), "x", "1")).await?;
                }
                Ok::<_, StoreError>(())
            })
        };

        let mut reads = 0usize;
        while !writer.is_finished() {
            let all = store.list_all().await?;
            assert!(all.first().is_some_and(|r| r.name == "A"));
            assert!(store.get_by_name("A").await?.is_some());
            reads += 1;
            tokio::task::yield_now().await;
        }
        writer.await??;
        assert!(reads > 0);
        assert_eq!(store.list_all().await?.len(), 101);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn failed_write_surfaces_write_error_and_keeps_document() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let store = store_with_a(&tmp).await?;
        let before = tokio::fs::read(&tmp).await?;

        let staging = staging_path(&tmp);
        tokio::fs::create_dir(&staging).await?;

        let err = store.insert(new("B", "X", "1")).await.unwrap_err();
        assert!(matches!(err, StoreError::StorageWrite(_)));
        let patch = RestaurantPatch { rating: Some(Some(1.0)), ..RestaurantPatch::default() };
        assert!(matches!(store.patch_by_name("A", patch).await, Err(StoreError::StorageWrite(_))));
        assert!(matches!(store.delete_by_name("A").await, Err(StoreError::StorageWrite(_))));

        assert_eq!(tokio::fs::read(&tmp).await?, before);
        let all = store.list_all().await?;
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].rating, None);

        let _ = tokio::fs::remove_dir(&staging).await;
        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }

    #[tokio::test]
    async fn reads_documents_written_by_hand() -> Result<(), anyhow::Error> {
        let tmp = temp_file();
        let doc = json!({
            "restaurants": [
                { "name": "봉수육", "address": "경기 수원시 장안구", "phone": "0507-1460-0903" },
                { "name": "성대 밥상", "address": "경기 수원시", "phone": "5555-6666-7777", "rating": null }
            ]
        });
        tokio::fs::write(&tmp, serde_json::to_vec(&doc)?).await?;

        let store = FileRestaurantStore::open(&tmp).await?;
        let all = store.list_all().await?;
        assert_eq!(all.len(), 2);
        assert_eq!(all[1].rating, None);

        let _ = tokio::fs::remove_file(&tmp).await;
        Ok(())
    }
}
