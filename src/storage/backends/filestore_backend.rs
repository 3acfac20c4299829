// Copyright 2025 Vijaykumar Singh
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.

//! Filestore Document Backend
//!
//! Serves reads from memory and persists a full JSON snapshot after every
//! mutation that changed something.
//!
//! ## File Structure:
//! ```text
//! {data_dir}/
//!   ├── maze_snapshot.json       current snapshot
//!   └── maze_snapshot.json.tmp   in-flight write, renamed over the snapshot
//! ```

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use super::DocumentSet;
use crate::core::{StorageError, StorageResult};
use crate::storage::document::{Document, DocumentId, Filter, Update};
use crate::storage::DocumentStore;

pub const SNAPSHOT_FILE: &str = "maze_snapshot.json";

/// Document store persisted as a JSON snapshot
pub struct FileDocumentStore {
    documents: RwLock<DocumentSet>,
    snapshot_path: PathBuf,
}

impl FileDocumentStore {
    /// Open the store rooted at `data_dir`, loading the last snapshot
    pub async fn open(data_dir: impl AsRef<Path>) -> StorageResult<Self> {
        let data_dir = data_dir.as_ref();
        tokio::fs::create_dir_all(data_dir).await?;

        let snapshot_path = data_dir.join(SNAPSHOT_FILE);
        let documents = match tokio::fs::read(&snapshot_path).await {
            Ok(bytes) => serde_json::from_slice::<DocumentSet>(&bytes).map_err(|e| {
                StorageError::Corruption(format!("{}: {}", snapshot_path.display(), e))
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => DocumentSet::new(),
            Err(e) => return Err(e.into()),
        };

        tracing::info!("📂 Opened filestore snapshot {}", snapshot_path.display());

        Ok(Self {
            documents: RwLock::new(documents),
            snapshot_path,
        })
    }

    pub fn snapshot_path(&self) -> &Path {
        &self.snapshot_path
    }

    async fn persist(&self, documents: &DocumentSet) -> StorageResult<()> {
        let bytes = serde_json::to_vec_pretty(documents)?;
        let tmp_path = self.snapshot_path.with_extension("json.tmp");

        tokio::fs::write(&tmp_path, &bytes).await?;
        tokio::fs::rename(&tmp_path, &self.snapshot_path).await?;

        tracing::debug!("💾 Wrote snapshot ({} bytes) to {}", bytes.len(), self.snapshot_path.display());
        Ok(())
    }

    /// Apply a mutation to a staged copy and publish it only once the
    /// snapshot holding it is on disk. A failed write leaves memory untouched.
    async fn commit<T, F, C>(&self, apply: F, changed: C) -> StorageResult<T>
    where
        F: FnOnce(&mut DocumentSet) -> StorageResult<T>,
        C: FnOnce(&T) -> bool,
    {
        let mut documents = self.documents.write().await;
        let mut staged = documents.clone();
        let result = apply(&mut staged)?;

        if changed(&result) {
            self.persist(&staged).await?;
            *documents = staged;
        }
        Ok(result)
    }
}

#[async_trait]
impl DocumentStore for FileDocumentStore {
    async fn find_one(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<Document> {
        self.documents.read().await.find_one(db, collection, filter)
    }

    async fn find_all(&self, db: &str, collection: &str) -> StorageResult<Vec<Document>> {
        Ok(self.documents.read().await.find_all(db, collection))
    }

    async fn insert_one(&self, db: &str, collection: &str, document: Document) -> StorageResult<DocumentId> {
        self.commit(|documents| documents.insert_one(db, collection, document), |_| true)
            .await
    }

    async fn insert_if_empty(
        &self,
        db: &str,
        collection: &str,
        document: Document,
    ) -> StorageResult<Option<DocumentId>> {
        self.commit(
            |documents| documents.insert_if_empty(db, collection, document),
            Option::is_some,
        )
        .await
    }

    async fn update_one(&self, db: &str, collection: &str, filter: &Filter, update: &Update) -> StorageResult<u64> {
        self.commit(
            |documents| Ok(documents.update_one(db, collection, filter, update)),
            |modified| *modified > 0,
        )
        .await
    }

    async fn delete_one(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<u64> {
        self.commit(
            |documents| Ok(documents.delete_one(db, collection, filter)),
            |deleted| *deleted > 0,
        )
        .await
    }

    async fn delete_many(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<u64> {
        self.commit(
            |documents| Ok(documents.delete_many(db, collection, filter)),
            |deleted| *deleted > 0,
        )
        .await
    }

    async fn estimated_count(&self, db: &str, collection: &str) -> StorageResult<u64> {
        Ok(self.documents.read().await.count(db, collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::TempDir;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_filestore_survives_reopen() {
        let temp_dir = TempDir::new().unwrap();

        let id = {
            let store = FileDocumentStore::open(temp_dir.path()).await.unwrap();
            let id = store
                .insert_one("mazedb", "spots", doc(json!({"name": "well", "x_coordinate": 2.5})))
                .await
                .unwrap();
            store
                .update_one("mazedb", "spots", &Filter::by_id(id), &Update::new().set("number", 9))
                .await
                .unwrap();
            id
        };

        let reopened = FileDocumentStore::open(temp_dir.path()).await.unwrap();
        let found = reopened.find_one("mazedb", "spots", &Filter::by_id(id)).await.unwrap();

        assert_eq!(found["name"], json!("well"));
        assert_eq!(found["x_coordinate"], json!(2.5));
        assert_eq!(found["number"], json!(9));
        assert!(reopened.snapshot_path().exists());
    }

    #[tokio::test]
    async fn test_filestore_rejects_corrupt_snapshot() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(SNAPSHOT_FILE), b"{not json").unwrap();

        let result = FileDocumentStore::open(temp_dir.path()).await;
        assert!(matches!(result, Err(StorageError::Corruption(_))));
    }

    #[tokio::test]
    async fn test_filestore_singleton_insert() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileDocumentStore::open(temp_dir.path()).await.unwrap();

        let first = store
            .insert_if_empty("mazedb", "origin", doc(json!({"x_origin": 0.0, "y_origin": 0.0})))
            .await
            .unwrap();
        let second = store
            .insert_if_empty("mazedb", "origin", doc(json!({"x_origin": 5.0, "y_origin": 5.0})))
            .await
            .unwrap();

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(store.delete_many("mazedb", "origin", &Filter::empty()).await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_failed_snapshot_write_leaves_store_unchanged() {
        let temp_dir = TempDir::new().unwrap();
        let data_dir = temp_dir.path().join("data");
        let store = FileDocumentStore::open(&data_dir).await.unwrap();

        std::fs::remove_dir_all(&data_dir).unwrap();

        let result = store
            .insert_if_empty("mazedb", "origin", doc(json!({"x_origin": 0.0, "y_origin": 0.0})))
            .await;
        assert!(matches!(result, Err(StorageError::DiskIO(_))));
        assert_eq!(store.estimated_count("mazedb", "origin").await.unwrap(), 0);
        assert!(store.find_one("mazedb", "origin", &Filter::empty()).await.is_err());

        // Once the directory is back the slot is still free
        std::fs::create_dir_all(&data_dir).unwrap();
        let inserted = store
            .insert_if_empty("mazedb", "origin", doc(json!({"x_origin": 1.0, "y_origin": 1.0})))
            .await
            .unwrap();
        assert!(inserted.is_some());
        assert_eq!(store.estimated_count("mazedb", "origin").await.unwrap(), 1);
    }
}
