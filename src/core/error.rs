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

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, MazeError>;

/// Errors surfaced by the domain services.
///
/// Storage failures are wrapped unchanged so callers see exactly what the
/// document store reported.
#[derive(Error, Debug)]
pub enum MazeError {
    #[error("invalid object id '{0}'")]
    InvalidId(String),

    #[error("missing content")]
    MissingContent,

    #[error("malformed content: {0}")]
    MalformedContent(String),

    #[error("content too large: {0}")]
    ContentTooLarge(String),

    #[error("There can be only one Origin")]
    OriginExists,

    #[error("no origin has been defined")]
    NoOrigin,

    #[error("unknown quadrant '{0}'")]
    UnknownQuadrant(String),

    #[error("operation '{operation}' timed out after {timeout:?}")]
    Timeout {
        operation: &'static str,
        timeout: Duration,
    },

    #[error("configuration error: {0}")]
    Config(#[from] ::config::ConfigError),

    #[error(transparent)]
    Storage(#[from] StorageError),
}

impl MazeError {
    /// HTTP status the REST layer answers with for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            MazeError::InvalidId(_)
            | MazeError::MissingContent
            | MazeError::MalformedContent(_)
            | MazeError::UnknownQuadrant(_) => StatusCode::BAD_REQUEST,
            MazeError::ContentTooLarge(_) => StatusCode::PAYLOAD_TOO_LARGE,
            MazeError::OriginExists => StatusCode::CONFLICT,
            MazeError::NoOrigin => StatusCode::NOT_FOUND,
            MazeError::Timeout { .. } => StatusCode::GATEWAY_TIMEOUT,
            MazeError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
            MazeError::Storage(StorageError::NotFound { .. }) => StatusCode::NOT_FOUND,
            MazeError::Storage(StorageError::DuplicateKey { .. }) => StatusCode::CONFLICT,
            MazeError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Failures reported by a document store backend.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("no document in {database}.{collection} matches the filter")]
    NotFound {
        database: String,
        collection: String,
    },

    #[error("duplicate key {id} in {database}.{collection}")]
    DuplicateKey {
        database: String,
        collection: String,
        id: String,
    },

    #[error("decode error: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("disk I/O error: {0}")]
    DiskIO(#[from] std::io::Error),

    #[error("corruption detected: {0}")]
    Corruption(String),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(MazeError::MissingContent.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(MazeError::OriginExists.status_code(), StatusCode::CONFLICT);
        assert_eq!(MazeError::NoOrigin.status_code(), StatusCode::NOT_FOUND);
        assert_eq!(
            MazeError::ContentTooLarge("length limit exceeded".to_string()).status_code(),
            StatusCode::PAYLOAD_TOO_LARGE
        );

        let not_found = MazeError::from(StorageError::NotFound {
            database: "mazedb".to_string(),
            collection: "spots".to_string(),
        });
        assert_eq!(not_found.status_code(), StatusCode::NOT_FOUND);

        let io = MazeError::from(StorageError::DiskIO(std::io::Error::new(
            std::io::ErrorKind::Other,
            "disk gone",
        )));
        assert_eq!(io.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_storage_error_passes_through_unchanged() {
        let err = MazeError::from(StorageError::Corruption("bad snapshot".to_string()));
        assert_eq!(err.to_string(), "corruption detected: bad snapshot");
    }
}
