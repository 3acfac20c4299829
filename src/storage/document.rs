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

//! Document model shared by every store backend
//!
//! Documents are JSON objects. Identity lives under the `_id` key as a
//! 24 character hex string produced by [`DocumentId`].

use once_cell::sync::Lazy;
use rand::Rng;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use std::sync::atomic::{AtomicU32, Ordering};

/// Key holding the document identity
pub const ID_FIELD: &str = "_id";

pub type Document = Map<String, Value>;

/// Random bytes fixed for the lifetime of the process
static PROCESS_UNIQUE: Lazy<[u8; 5]> = Lazy::new(|| rand::thread_rng().gen());

static COUNTER: Lazy<AtomicU32> = Lazy::new(|| AtomicU32::new(rand::thread_rng().gen()));

/// 12-byte store-native identifier: seconds timestamp, process-unique
/// bytes, then a 24-bit counter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DocumentId([u8; 12]);

impl DocumentId {
    pub fn new() -> Self {
        let timestamp = chrono::Utc::now().timestamp() as u32;
        let counter = COUNTER.fetch_add(1, Ordering::SeqCst) & 0x00ff_ffff;

        let mut bytes = [0u8; 12];
        bytes[0..4].copy_from_slice(&timestamp.to_be_bytes());
        bytes[4..9].copy_from_slice(&*PROCESS_UNIQUE);
        bytes[9..12].copy_from_slice(&counter.to_be_bytes()[1..4]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; 12]) -> Self {
        Self(bytes)
    }

    pub fn bytes(&self) -> [u8; 12] {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.iter().map(|b| format!("{:02x}", b)).collect()
    }

    /// Parse 24 hex characters
    pub fn parse_hex(s: &str) -> Result<Self, InvalidDocumentId> {
        if s.len() != 24 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(InvalidDocumentId(s.to_string()));
        }

        let mut bytes = [0u8; 12];
        for (i, byte) in bytes.iter_mut().enumerate() {
            *byte = u8::from_str_radix(&s[i * 2..i * 2 + 2], 16)
                .map_err(|_| InvalidDocumentId(s.to_string()))?;
        }
        Ok(Self(bytes))
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for DocumentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for DocumentId {
    type Err = InvalidDocumentId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_hex(s)
    }
}

impl From<DocumentId> for Value {
    fn from(id: DocumentId) -> Self {
        Value::String(id.to_hex())
    }
}

impl Serialize for DocumentId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for DocumentId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DocumentId::parse_hex(&raw).map_err(serde::de::Error::custom)
    }
}

/// Rejected identity string
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("'{0}' is not a 24 character hex object id")]
pub struct InvalidDocumentId(pub String);

/// Conjunction of field equality conditions. The empty filter matches
/// every document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    conditions: Vec<(String, Value)>,
}

impl Filter {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn by_id(id: DocumentId) -> Self {
        Self::empty().eq(ID_FIELD, id)
    }

    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.conditions.push((field.into(), value.into()));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.conditions.is_empty()
    }

    pub fn matches(&self, document: &Document) -> bool {
        self.conditions
            .iter()
            .all(|(field, value)| document.get(field) == Some(value))
    }
}

/// Field overwrite applied to a matched document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    set: Document,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    /// Apply to `document`, returning whether any field changed.
    /// The identity field is never overwritten.
    pub fn apply(&self, document: &mut Document) -> bool {
        let mut modified = false;
        for (field, value) in &self.set {
            if field == ID_FIELD {
                continue;
            }
            if document.get(field) != Some(value) {
                document.insert(field.clone(), value.clone());
                modified = true;
            }
        }
        modified
    }
}

/// Read the identity of a stored document
pub fn document_id(document: &Document) -> Option<DocumentId> {
    document
        .get(ID_FIELD)
        .and_then(Value::as_str)
        .and_then(|raw| DocumentId::parse_hex(raw).ok())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("not an object"),
        }
    }

    #[test]
    fn test_document_id_hex_format() {
        let id = DocumentId::new();
        let hex = id.to_hex();

        assert_eq!(hex.len(), 24);
        assert!(hex.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(DocumentId::parse_hex(&hex).unwrap(), id);
    }

    #[test]
    fn test_document_ids_are_unique() {
        let a = DocumentId::new();
        let b = DocumentId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_parse_known_object_id() {
        let id: DocumentId = "5fbecff95f80a305742abb10".parse().unwrap();
        assert_eq!(id.bytes()[0], 0x5f);
        assert_eq!(id.bytes()[11], 0x10);
        assert_eq!(id.to_string(), "5fbecff95f80a305742abb10");
    }

    #[test]
    fn test_parse_rejects_malformed_ids() {
        for raw in [
            "",
            "123",
            "5fbecff95f80a305742abb1g",
            "5fbecff95f80a305742abb1000",
            "ééééééééééää",
            "+0+0+0+0+0+0+0+0+0+0+0+1",
        ] {
            assert!(DocumentId::parse_hex(raw).is_err(), "accepted {:?}", raw);
        }
    }

    #[test]
    fn test_filter_matching() {
        let id: DocumentId = "5fbecff95f80a305742abb10".parse().unwrap();
        let document = doc(json!({"_id": id.to_hex(), "name": "north", "number": 3}));

        assert!(Filter::empty().matches(&document));
        assert!(Filter::by_id(id).matches(&document));
        assert!(Filter::empty().eq("name", "north").eq("number", 3).matches(&document));
        assert!(!Filter::empty().eq("name", "south").matches(&document));
        assert!(!Filter::by_id(DocumentId::new()).matches(&document));
    }

    #[test]
    fn test_update_reports_modification() {
        let mut document = doc(json!({"_id": "5fbecff95f80a305742abb10", "x_origin": 1.0}));

        assert!(!Update::new().set("x_origin", 1.0).apply(&mut document));
        assert!(Update::new().set("x_origin", 2.0).set("y_origin", 0.5).apply(&mut document));
        assert_eq!(document["x_origin"], json!(2.0));
        assert_eq!(document["y_origin"], json!(0.5));

        assert!(!Update::new().set(ID_FIELD, "000000000000000000000000").apply(&mut document));
        assert_eq!(document_id(&document).unwrap().to_hex(), "5fbecff95f80a305742abb10");
    }
}
