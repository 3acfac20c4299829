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

//! Domain services shared by every transport
//!
//! Services hold no state between calls beyond the injected storage port.
//! Storage errors are returned as-is, after one log line naming the
//! operation.

pub mod path_service;
pub mod quadrant_service;
pub mod spot_service;

pub use path_service::PathService;
pub use quadrant_service::QuadrantService;
pub use spot_service::SpotService;

use std::sync::Arc;

use crate::core::{MazeError, Result};
use crate::storage::{DocumentId, DocumentStore};

/// All three services wired to the same store
#[derive(Clone)]
pub struct MazeServices {
    pub spots: Arc<SpotService>,
    pub paths: Arc<PathService>,
    pub quadrants: Arc<QuadrantService>,
}

impl MazeServices {
    pub fn new(store: Arc<dyn DocumentStore>, database: &str) -> Self {
        Self {
            spots: Arc::new(SpotService::new(store.clone(), database)),
            paths: Arc::new(PathService::new(store.clone(), database)),
            quadrants: Arc::new(QuadrantService::new(store, database)),
        }
    }
}

pub(crate) fn parse_id(operation: &str, raw: &str) -> Result<DocumentId> {
    DocumentId::parse_hex(raw).map_err(|_| log_failure(operation, MazeError::InvalidId(raw.to_string())))
}

pub(crate) fn log_failure(operation: &str, e: MazeError) -> MazeError {
    tracing::error!("❌ {} failed: {}", operation, e);
    e
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_invalid_id_is_logged_with_operation() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();

        let result = tracing::subscriber::with_default(subscriber, || parse_id("get_spot", "not-hex"));

        assert!(matches!(result, Err(MazeError::InvalidId(ref raw)) if raw == "not-hex"));
        let output = String::from_utf8(logs.0.lock().unwrap().clone()).unwrap();
        assert!(output.contains("get_spot failed"), "{}", output);
        assert!(output.contains("not-hex"), "{}", output);
    }

    #[test]
    fn test_valid_id_parses() {
        let id = DocumentId::new();
        assert_eq!(parse_id("get_spot", &id.to_hex()).unwrap(), id);
    }
}
