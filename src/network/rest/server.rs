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

//! REST server implementation using axum

use axum::Router;
use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{create_router, AppState};
use crate::services::MazeServices;

/// REST server for Maze
pub struct RestServer {
    router: Router,
    bind_addr: SocketAddr,
}

impl RestServer {
    /// Create new REST server
    pub fn new(
        bind_addr: SocketAddr,
        services: MazeServices,
        request_timeout: Duration,
        max_request_size: usize,
    ) -> Self {
        let state = AppState {
            services,
            request_timeout,
        };

        let router = create_router(state, max_request_size).layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        );

        Self { router, bind_addr }
    }

    /// Router with every layer applied, for in-process use
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Serve until `shutdown` resolves
    pub async fn start<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        tracing::info!("🌐 Starting REST server on {}", self.bind_addr);

        let server = axum::Server::try_bind(&self.bind_addr)?.serve(self.router.into_make_service());

        tracing::info!("✅ REST server listening on {}", server.local_addr());
        tracing::info!("📋 Available endpoints:");
        tracing::info!("   GET    /health            - Health check");
        tracing::info!("   POST   /spot              - Create spot");
        tracing::info!("   GET    /spots             - List spots");
        tracing::info!("   GET    /spot/:id          - Get spot");
        tracing::info!("   PUT    /spot/:id          - Modify spot");
        tracing::info!("   DELETE /spot/:id          - Delete spot");
        tracing::info!("   POST   /path              - Create path");
        tracing::info!("   GET    /paths             - List paths");
        tracing::info!("   GET    /path/:id          - Get path (refreshed distance)");
        tracing::info!("   PUT    /path/:id          - Modify path");
        tracing::info!("   DELETE /path/:id          - Delete path");
        tracing::info!("   POST   /origin            - Create origin");
        tracing::info!("   GET    /origin            - Get origin");
        tracing::info!("   PUT    /origin            - Modify origin");
        tracing::info!("   DELETE /origin            - Delete origin");
        tracing::info!("   POST   /quadrantSpots     - Spots in quadrant");

        server.with_graceful_shutdown(shutdown).await?;

        tracing::info!("🛑 REST server stopped");
        Ok(())
    }
}
