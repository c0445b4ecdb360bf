//! Append-only JSON file store.
//!
//! Each collection is one pretty-printed JSON array on disk, newest first.
//! Appends are read-modify-write under an async mutex so concurrent
//! submissions never lose updates. Writes go to a temp file that is renamed
//! over the collection, and an append never replaces a file it cannot decode.

use std::fs;
use std::io::ErrorKind;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::Mutex;
use tracing::warn;

use crate::error::CareError;

pub struct JsonStore<T> {
    path: PathBuf,
    write_lock: Mutex<()>,
    _marker: PhantomData<fn() -> T>,
}

impl<T> JsonStore<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Open a store, creating the file with `[]` when it does not exist
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CareError> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !path.exists() {
            fs::write(&path, "[]")?;
        }
        Ok(Self {
            path,
            write_lock: Mutex::new(()),
            _marker: PhantomData,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All records, newest first. A missing or corrupt file reads as empty.
    pub async fn list(&self) -> Vec<T> {
        let _guard = self.write_lock.lock().await;
        match self.read_all().await {
            Ok(items) => items,
            Err(e) => {
                warn!("{}; treating as empty", e);
                Vec::new()
            }
        }
    }

    pub async fn len(&self) -> usize {
        self.list().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Insert a record at the front of the collection.
    /// Fails without touching the file when the existing content does not decode.
    pub async fn prepend(&self, item: T) -> Result<(), CareError> {
        let _guard = self.write_lock.lock().await;
        let mut items = self.read_all().await?;
        items.insert(0, item);
        self.write_all(&items).await
    }

    async fn read_all(&self) -> Result<Vec<T>, CareError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(c) => c,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => {
                return Err(CareError::Storage(format!(
                    "store {} unreadable: {}",
                    self.path.display(),
                    e
                )))
            }
        };
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str::<Option<Vec<T>>>(&content)
            .map(Option::unwrap_or_default)
            .map_err(|e| {
                CareError::Storage(format!("store {} corrupt: {}", self.path.display(), e))
            })
    }

    async fn write_all(&self, items: &[T]) -> Result<(), CareError> {
        let content = serde_json::to_string_pretty(items)?;

        // Atomic write
        let temp_path = self.path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, content).await.map_err(|e| {
            CareError::Storage(format!("failed to write {}: {}", temp_path.display(), e))
        })?;
        tokio::fs::rename(&temp_path, &self.path).await.map_err(|e| {
            CareError::Storage(format!("failed to replace {}: {}", self.path.display(), e))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::sync::Arc;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Item {
        n: u32,
    }

    #[tokio::test]
    async fn test_open_creates_empty_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("items.json");
        let store: JsonStore<Item> = JsonStore::open(&path).unwrap();
        assert!(path.exists());
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_prepend_newest_first() {
        let dir = TempDir::new().unwrap();
        let store: JsonStore<Item> = JsonStore::open(dir.path().join("items.json")).unwrap();
        store.prepend(Item { n: 1 }).await.unwrap();
        store.prepend(Item { n: 2 }).await.unwrap();
        assert_eq!(store.list().await, vec![Item { n: 2 }, Item { n: 1 }]);
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, "{not json").unwrap();
        let store: JsonStore<Item> = JsonStore::open(&path).unwrap();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_append_refuses_to_overwrite_undecodable_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        let store: JsonStore<Item> = JsonStore::open(&path).unwrap();
        store.prepend(Item { n: 1 }).await.unwrap();
        store.prepend(Item { n: 2 }).await.unwrap();

        // One record drifts out of the schema
        let drifted = r#"[{"n": 2}, {"count": 1}]"#;
        fs::write(&path, drifted).unwrap();
        assert!(store.list().await.is_empty());

        let err = store.prepend(Item { n: 3 }).await.unwrap_err();
        assert!(matches!(err, CareError::Storage(ref msg) if msg.contains("corrupt")));
        assert_eq!(fs::read_to_string(&path).unwrap(), drifted);

        // Repairing the file makes appends work again with nothing lost
        fs::write(&path, r#"[{"n": 2}, {"n": 1}]"#).unwrap();
        store.prepend(Item { n: 3 }).await.unwrap();
        assert_eq!(
            store.list().await,
            vec![Item { n: 3 }, Item { n: 2 }, Item { n: 1 }]
        );
    }

    #[tokio::test]
    async fn test_write_leaves_no_temp_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        let store: JsonStore<Item> = JsonStore::open(&path).unwrap();
        store.prepend(Item { n: 1 }).await.unwrap();
        assert!(!path.with_extension("json.tmp").exists());
        let on_disk: Vec<Item> = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(on_disk, vec![Item { n: 1 }]);
    }

    #[tokio::test]
    async fn test_null_file_reads_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("items.json");
        fs::write(&path, "null").unwrap();
        let store: JsonStore<Item> = JsonStore::open(&path).unwrap();
        assert!(store.list().await.is_empty());
    }

    #[tokio::test]
    async fn test_concurrent_appends_not_lost() {
        let dir = TempDir::new().unwrap();
        let store: Arc<JsonStore<Item>> =
            Arc::new(JsonStore::open(dir.path().join("items.json")).unwrap());

        let mut handles = Vec::new();
        for n in 0..32 {
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                store.prepend(Item { n }).await.unwrap();
            }));
        }
        for h in handles {
            h.await.unwrap();
        }

        let mut seen: Vec<u32> = store.list().await.into_iter().map(|i| i.n).collect();
        seen.sort();
        assert_eq!(seen, (0..32).collect::<Vec<_>>());
    }
}
