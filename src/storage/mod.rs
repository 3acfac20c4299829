/*
 * Copyright 2025 Vijaykumar Singh
 *
 * Licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License.
 * You may obtain a copy of the License at
 *
 *     http://www.apache.org/licenses/LICENSE-2.0
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the License for the specific language governing permissions and
 * limitations under the License.
 */

//! Storage access port
//!
//! Every domain service talks to persistence through [`DocumentStore`].
//! All operations are addressed by a logical database name and collection
//! name. Failures propagate unchanged: no retries, no translation.

pub mod backends;
pub mod document;

use async_trait::async_trait;
use serde::de::DeserializeOwned;

use crate::core::{Origin, Path, Spot, StorageError, StorageResult};

pub use backends::{create_document_store, DocumentSet};
pub use backends::filestore_backend::FileDocumentStore;
pub use backends::memory_backend::MemoryDocumentStore;
pub use document::{Document, DocumentId, Filter, InvalidDocumentId, Update, ID_FIELD};

/// Collection holding spot documents
pub const SPOTS_COLLECTION: &str = "spots";
/// Collection holding path documents
pub const PATHS_COLLECTION: &str = "paths";
/// Collection holding the origin singleton
pub const ORIGIN_COLLECTION: &str = "origin";

/// Narrow document CRUD interface
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// First document matching `filter`, or `StorageError::NotFound`
    async fn find_one(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<Document>;

    /// Every document of the collection in insertion order
    async fn find_all(&self, db: &str, collection: &str) -> StorageResult<Vec<Document>>;

    /// Insert and return the identity, generating one when `_id` is absent
    async fn insert_one(&self, db: &str, collection: &str, document: Document) -> StorageResult<DocumentId>;

    /// Insert only when the collection holds no document, atomically.
    /// Returns `None` when the collection was not empty.
    async fn insert_if_empty(
        &self,
        db: &str,
        collection: &str,
        document: Document,
    ) -> StorageResult<Option<DocumentId>>;

    /// Apply `update` to the first match, returning the modified count
    async fn update_one(&self, db: &str, collection: &str, filter: &Filter, update: &Update) -> StorageResult<u64>;

    async fn delete_one(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<u64>;

    async fn delete_many(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<u64>;

    /// Approximate number of documents in the collection
    async fn estimated_count(&self, db: &str, collection: &str) -> StorageResult<u64>;
}

/// Typed reads layered over the raw document port
#[async_trait]
pub trait DocumentStoreExt: DocumentStore {
    async fn find_one_as<T>(&self, db: &str, collection: &str, filter: &Filter) -> StorageResult<T>
    where
        T: DeserializeOwned + Send,
    {
        let document = self.find_one(db, collection, filter).await?;
        decode(document)
    }

    async fn find_all_as<T>(&self, db: &str, collection: &str) -> StorageResult<Vec<T>>
    where
        T: DeserializeOwned + Send,
    {
        self.find_all(db, collection)
            .await?
            .into_iter()
            .map(decode)
            .collect()
    }

    async fn find_all_spots(&self, db: &str, collection: &str) -> StorageResult<Vec<Spot>> {
        self.find_all_as(db, collection).await
    }

    async fn find_all_paths(&self, db: &str, collection: &str) -> StorageResult<Vec<Path>> {
        self.find_all_as(db, collection).await
    }

    async fn find_all_origins(&self, db: &str, collection: &str) -> StorageResult<Vec<Origin>> {
        self.find_all_as(db, collection).await
    }
}

impl<S: DocumentStore + ?Sized> DocumentStoreExt for S {}

/// Decode a stored document into an entity
pub fn decode<T: DeserializeOwned>(document: Document) -> StorageResult<T> {
    Ok(serde_json::from_value(serde_json::Value::Object(document))?)
}

/// Encode an entity as a document; entities must serialize to JSON objects
pub fn encode<T: serde::Serialize>(entity: &T) -> StorageResult<Document> {
    match serde_json::to_value(entity)? {
        serde_json::Value::Object(document) => Ok(document),
        other => Err(StorageError::Corruption(format!(
            "entity did not encode to a document: {}",
            other
        ))),
    }
}
