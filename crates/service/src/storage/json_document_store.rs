use std::{
    marker::PhantomData,
    path::{Path, PathBuf},
};

use serde::{de::DeserializeOwned, Serialize};
use tokio::fs;

use crate::errors::StoreError;

/// JSON file holding a single document of type `D`.
///
/// Nothing is cached: `load` reads the whole file each time and `save`
/// replaces it, so another process editing the file is seen on the next call.
/// `save` writes a staging file and renames it over the target, so a reader
/// sees either the old or the new document, never a partial one.
/// There is no locking here; callers serialize writers if they need to.
pub struct JsonDocumentStore<D> {
    file_path: PathBuf,
    _doc: PhantomData<fn() -> D>,
}

impl<D> JsonDocumentStore<D>
where
    D: Serialize + DeserializeOwned + Default + Send,
{
    /// Bind to a path. Creates parent directories, and the file with
    /// `D::default()` if missing. An existing file is left untouched.
    pub async fn new<P: Into<PathBuf>>(path: P) -> Result<Self, StoreError> {
        let file_path = path.into();
        if let Some(parent) = file_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::StorageWrite(format!("cannot create {}: {e}", parent.display())))?;
        }

        let store = Self { file_path, _doc: PhantomData };
        let exists = fs::try_exists(&store.file_path)
            .await
            .map_err(|e| StoreError::StorageRead(format!("{}: {e}", store.file_path.display())))?;
        if !exists {
            store.save(&D::default()).await?;
        }
        Ok(store)
    }

    pub fn path(&self) -> &Path { &self.file_path }

    /// Read and parse the whole document.
    pub async fn load(&self) -> Result<D, StoreError> {
        let bytes = fs::read(&self.file_path)
            .await
            .map_err(|e| StoreError::StorageRead(format!("{}: {e}", self.file_path.display())))?;
        serde_json::from_slice(&bytes)
            .map_err(|e| StoreError::StorageRead(format!("malformed document {}: {e}", self.file_path.display())))
    }

    /// Replace the file with `doc`, pretty-printed.
    pub async fn save(&self, doc: &D) -> Result<(), StoreError> {
        let data = serde_json::to_vec_pretty(doc).map_err(|e| StoreError::StorageWrite(e.to_string()))?;
        let staging = staging_path(&self.file_path);
        if let Err(e) = fs::write(&staging, data).await {
            let _ = fs::remove_file(&staging).await;
            return Err(StoreError::StorageWrite(format!("{}: {e}", staging.display())));
        }
        if let Err(e) = fs::rename(&staging, &self.file_path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(StoreError::StorageWrite(format!("{}: {e}", self.file_path.display())));
        }
        Ok(())
    }

    /// Load, apply `f`, and save. Nothing is written when `f` fails.
    pub async fn update<F, T>(&self, f: F) -> Result<T, StoreError>
    where
        F: FnOnce(&mut D) -> Result<T, StoreError> + Send,
        T: Send,
    {
        let mut doc = self.load().await?;
        let out = f(&mut doc)?;
        self.save(&doc).await?;
        Ok(out)
    }
}

/// Sibling file `save` writes before renaming it over `path`.
/// Unique per process; two stores in one process must not write the same path
/// concurrently.
pub fn staging_path(path: &Path) -> PathBuf {
    let mut name = path.file_name().map(|n| n.to_os_string()).unwrap_or_default();
    name.push(format!(".{}.tmp", std::process::id()));
    path.with_file_name(name)
}
