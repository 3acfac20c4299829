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

//! Per-request operation context carrying the caller's deadline

use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;

use super::error::{MazeError, Result, StorageError};

/// Deadline handed down from the request layer to every service call.
#[derive(Debug, Clone, Copy)]
pub struct OpContext {
    deadline: Option<Instant>,
    timeout: Duration,
}

impl OpContext {
    /// Context without a deadline
    pub fn background() -> Self {
        Self {
            deadline: None,
            timeout: Duration::ZERO,
        }
    }

    /// Context expiring `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            deadline: Some(Instant::now() + timeout),
            timeout,
        }
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_expired(&self) -> bool {
        self.deadline.map_or(false, |deadline| Instant::now() >= deadline)
    }

    /// Run one storage call, aborting it once the deadline passes.
    pub async fn run<T, F>(&self, operation: &'static str, call: F) -> Result<T>
    where
        F: Future<Output = std::result::Result<T, StorageError>>,
    {
        match self.deadline {
            None => Ok(call.await?),
            Some(deadline) => match tokio::time::timeout_at(deadline, call).await {
                Ok(result) => Ok(result?),
                Err(_) => {
                    tracing::warn!("⏱️ {} exceeded its deadline of {:?}", operation, self.timeout);
                    Err(MazeError::Timeout {
                        operation,
                        timeout: self.timeout,
                    })
                }
            },
        }
    }
}

impl Default for OpContext {
    fn default() -> Self {
        Self::background()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_background_context_never_expires() {
        let ctx = OpContext::background();
        assert!(ctx.deadline().is_none());
        assert!(!ctx.is_expired());

        let value = ctx.run("noop", async { Ok::<_, StorageError>(7) }).await.unwrap();
        assert_eq!(value, 7);
    }

    #[tokio::test(start_paused = true)]
    async fn test_expired_deadline_surfaces_timeout() {
        let ctx = OpContext::with_timeout(Duration::from_millis(50));

        let result = ctx
            .run("slow", async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok::<_, StorageError>(())
            })
            .await;

        match result {
            Err(MazeError::Timeout { operation, timeout }) => {
                assert_eq!(operation, "slow");
                assert_eq!(timeout, Duration::from_millis(50));
            }
            other => panic!("expected timeout, got {:?}", other),
        }
        assert!(ctx.is_expired());
    }

    #[tokio::test]
    async fn test_storage_error_is_propagated() {
        let ctx = OpContext::with_timeout(Duration::from_secs(5));

        let result: Result<()> = ctx
            .run("lookup", async {
                Err(StorageError::Corruption("torn write".to_string()))
            })
            .await;

        assert!(matches!(result, Err(MazeError::Storage(StorageError::Corruption(_)))));
    }
}
