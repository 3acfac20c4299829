// Copyright 2025 Vijaykumar Singh
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.

//! In-Memory Document Backend
//!
//! Fast in-memory document store. Ideal for testing, development, and
//! scenarios where persistence is not required.

use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;

use super::DocumentSet;
use crate::core::StorageResult;
use crate::storage::document::{Document, DocumentId, Filter, Update};
use crate::storage::DocumentStore;

/// In-memory document store
#[derive(Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<RwLock<DocumentSet>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing documents
    pub fn with_documents(documents: DocumentSet) -> Self {
        Self {
            documents: Arc::new(RwLock::new(documents)),
        }
    }

    /// Copy of everything currently stored
    pub async fn snapshot(&self) -> DocumentSet {
        self.documents.read().await.clone()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn find_one(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<Document> {
        self.documents.read().await.find_one(db, collection, filter)
    }

    async fn find_all(&self, db: &str, collection: &str) -> StorageResult<Vec<Document>> {
        Ok(self.documents.read().await.find_all(db, collection))
    }

    async fn insert_one(&self, db: &str, collection: &str, document: Document) -> StorageResult<DocumentId> {
        let id = self.documents.write().await.insert_one(db, collection, document)?;
        tracing::debug!("📝 Inserted {} into {}.{}", id, db, collection);
        Ok(id)
    }

    async fn insert_if_empty(
        &self,
        db: &str,
        collection: &str,
        document: Document,
    ) -> StorageResult<Option<DocumentId>> {
        // check and insert under one write guard
        self.documents.write().await.insert_if_empty(db, collection, document)
    }

    async fn update_one(&self, db: &str, collection: &str, filter: &Filter, update: &Update) -> StorageResult<u64> {
        Ok(self.documents.write().await.update_one(db, collection, filter, update))
    }

    async fn delete_one(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<u64> {
        Ok(self.documents.write().await.delete_one(db, collection, filter))
    }

    async fn delete_many(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<u64> {
        Ok(self.documents.write().await.delete_many(db, collection, filter))
    }

    async fn estimated_count(&self, db: &str, collection: &str) -> StorageResult<u64> {
        Ok(self.documents.read().await.count(db, collection))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::StorageError;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[tokio::test]
    async fn test_memory_store_crud_cycle() {
        let store = MemoryDocumentStore::new();

        let id = store
            .insert_one("mazedb", "spots", doc(json!({"name": "gate", "number": 1})))
            .await
            .unwrap();

        let found = store.find_one("mazedb", "spots", &Filter::by_id(id)).await.unwrap();
        assert_eq!(found["name"], json!("gate"));
        assert_eq!(found["_id"], json!(id.to_hex()));

        let update = Update::new().set("name", "exit");
        assert_eq!(store.update_one("mazedb", "spots", &Filter::by_id(id), &update).await.unwrap(), 1);
        assert_eq!(store.estimated_count("mazedb", "spots").await.unwrap(), 1);

        assert_eq!(store.delete_one("mazedb", "spots", &Filter::by_id(id)).await.unwrap(), 1);
        assert_eq!(store.delete_one("mazedb", "spots", &Filter::by_id(id)).await.unwrap(), 0);

        let missing = store.find_one("mazedb", "spots", &Filter::by_id(id)).await;
        assert!(matches!(missing, Err(StorageError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_find_all_keeps_insertion_order() {
        let store = MemoryDocumentStore::new();
        for n in 0..5 {
            store.insert_one("mazedb", "spots", doc(json!({"number": n}))).await.unwrap();
        }

        let numbers: Vec<_> = store
            .find_all("mazedb", "spots")
            .await
            .unwrap()
            .into_iter()
            .map(|d| d["number"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, vec![0, 1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_insert_if_empty_admits_exactly_one_concurrent_writer() {
        let store = MemoryDocumentStore::new();

        let mut handles = Vec::new();
        for n in 0..32 {
            let store = store.clone();
            handles.push(tokio::spawn(async move {
                store
                    .insert_if_empty("mazedb", "origin", doc(json!({"x_origin": n as f64})))
                    .await
                    .unwrap()
            }));
        }

        let mut inserted = 0;
        for handle in handles {
            if handle.await.unwrap().is_some() {
                inserted += 1;
            }
        }

        assert_eq!(inserted, 1);
        assert_eq!(store.estimated_count("mazedb", "origin").await.unwrap(), 1);
    }
}
