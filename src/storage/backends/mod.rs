// Copyright 2025 Vijaykumar Singh
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.

//! Document store backends
//!
//! - Memory - process-local, for development and tests
//! - Filestore - memory plus a JSON snapshot on disk, survives restarts

pub mod filestore_backend;
pub mod memory_backend;

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;

use super::document::{document_id, Document, DocumentId, Filter, Update, ID_FIELD};
use super::DocumentStore;
use crate::core::{StorageBackendType, StorageConfig, StorageError, StorageResult};

/// Databases by name, each holding collections by name. Documents keep
/// insertion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DocumentSet {
    databases: BTreeMap<String, BTreeMap<String, Vec<Document>>>,
}

impl DocumentSet {
    pub fn new() -> Self {
        Self::default()
    }

    fn collection(&self, db: &str, collection: &str) -> Option<&Vec<Document>> {
        self.databases.get(db).and_then(|c| c.get(collection))
    }

    fn collection_mut(&mut self, db: &str, collection: &str) -> &mut Vec<Document> {
        self.databases
            .entry(db.to_string())
            .or_default()
            .entry(collection.to_string())
            .or_default()
    }

    pub fn find_one(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<Document> {
        self.collection(db, collection)
            .and_then(|docs| docs.iter().find(|doc| filter.matches(doc)))
            .cloned()
            .ok_or_else(|| StorageError::NotFound {
                database: db.to_string(),
                collection: collection.to_string(),
            })
    }

    pub fn find_all(&self, db: &str, collection: &str) -> Vec<Document> {
        self.collection(db, collection).cloned().unwrap_or_default()
    }

    pub fn insert_one(&mut self, db: &str, collection: &str, mut document: Document) -> StorageResult<DocumentId> {
        let id = match document.get(ID_FIELD) {
            None => DocumentId::new(),
            Some(_) => document_id(&document).ok_or_else(|| {
                StorageError::Corruption(format!("document carries an invalid {}", ID_FIELD))
            })?,
        };

        let docs = self.collection_mut(db, collection);
        if docs.iter().any(|doc| document_id(doc) == Some(id)) {
            return Err(StorageError::DuplicateKey {
                database: db.to_string(),
                collection: collection.to_string(),
                id: id.to_hex(),
            });
        }

        document.insert(ID_FIELD.to_string(), id.into());
        docs.push(document);
        Ok(id)
    }

    pub fn insert_if_empty(
        &mut self,
        db: &str,
        collection: &str,
        document: Document,
    ) -> StorageResult<Option<DocumentId>> {
        if self.count(db, collection) > 0 {
            return Ok(None);
        }
        self.insert_one(db, collection, document).map(Some)
    }

    pub fn update_one(&mut self, db: &str, collection: &str, filter: &Filter, update: &Update) -> u64 {
        let docs = self.collection_mut(db, collection);
        match docs.iter_mut().find(|doc| filter.matches(doc)) {
            Some(doc) => u64::from(update.apply(doc)),
            None => 0,
        }
    }

    pub fn delete_one(&mut self, db: &str, collection: &str, filter: &Filter) -> u64 {
        let docs = self.collection_mut(db, collection);
        match docs.iter().position(|doc| filter.matches(doc)) {
            Some(index) => {
                docs.remove(index);
                1
            }
            None => 0,
        }
    }

    pub fn delete_many(&mut self, db: &str, collection: &str, filter: &Filter) -> u64 {
        let docs = self.collection_mut(db, collection);
        let before = docs.len();
        docs.retain(|doc| !filter.matches(doc));
        (before - docs.len()) as u64
    }

    pub fn count(&self, db: &str, collection: &str) -> u64 {
        self.collection(db, collection).map_or(0, |docs| docs.len() as u64)
    }
}

/// Create the backend selected by configuration
pub async fn create_document_store(config: &StorageConfig) -> StorageResult<Arc<dyn DocumentStore>> {
    match config.backend {
        StorageBackendType::Memory => {
            tracing::info!("🧠 Using in-memory document store");
            Ok(Arc::new(memory_backend::MemoryDocumentStore::new()))
        }
        StorageBackendType::Filestore => {
            tracing::info!("💾 Using filestore document store at {:?}", config.data_dir);
            let store = filestore_backend::FileDocumentStore::open(&config.data_dir).await?;
            Ok(Arc::new(store))
        }
    }
}
