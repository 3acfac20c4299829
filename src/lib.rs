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

//! # Maze
//!
//! REST service managing spots (named points), paths (weighted edges between
//! two spots) and a single origin used to classify spots into quadrants.
//!
//! ## Layers
//!
//! - **storage**: the document store port and its backends (memory, filestore)
//! - **services**: spot, path and quadrant business logic over the port
//! - **network**: axum REST surface translating HTTP to service calls

pub mod core;
pub mod network;
pub mod services;
pub mod storage;

pub use crate::core::{Config, MazeError, OpContext};

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use crate::network::RestServer;
use crate::services::MazeServices;
use crate::storage::DocumentStore;

/// Main Maze service instance
pub struct Maze {
    store: Arc<dyn DocumentStore>,
    services: MazeServices,
    config: Config,
}

impl Maze {
    /// Open the configured store and wire the services to it
    pub async fn new(config: Config) -> anyhow::Result<Self> {
        tracing::info!("🚀 Maze::new - opening {:?} document store", config.storage.backend);
        let store = storage::create_document_store(&config.storage).await?;
        Ok(Self::with_store(config, store))
    }

    /// Wire the services to an already opened store
    pub fn with_store(config: Config, store: Arc<dyn DocumentStore>) -> Self {
        let services = MazeServices::new(store.clone(), &config.storage.database_name);
        Self {
            store,
            services,
            config,
        }
    }

    pub fn services(&self) -> &MazeServices {
        &self.services
    }

    pub fn store(&self) -> Arc<dyn DocumentStore> {
        self.store.clone()
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn rest_server(&self) -> anyhow::Result<RestServer> {
        let bind_addr: SocketAddr = format!(
            "{}:{}",
            self.config.server.bind_address, self.config.server.port
        )
        .parse()
        .map_err(|e| anyhow::anyhow!("Invalid REST address: {}", e))?;

        Ok(RestServer::new(
            bind_addr,
            self.services.clone(),
            self.config.request_timeout(),
            self.config.max_request_size_bytes(),
        ))
    }

    /// Serve the REST API until `shutdown` resolves
    pub async fn run<F>(&self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        self.rest_server()?.start(shutdown).await
    }
}
