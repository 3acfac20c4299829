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

//! Maze Server - serves the spot/path/origin REST API

use clap::Parser;
use maze::core::StorageBackendType;
use maze::{Config, Maze};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maze-server")]
#[command(about = "Maze spot, path and quadrant REST server")]
struct Args {
    #[arg(short, long, default_value = "config.toml")]
    config: PathBuf,

    #[arg(short, long)]
    port: Option<u16>,

    #[arg(long)]
    bind_address: Option<String>,

    #[arg(long)]
    database: Option<String>,

    #[arg(short, long)]
    data_dir: Option<PathBuf>,

    #[arg(long, value_enum)]
    backend: Option<StorageBackendType>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load(Some(&args.config))?;

    // Override with CLI arguments
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(bind_address) = args.bind_address {
        config.server.bind_address = bind_address;
    }
    if let Some(database) = args.database {
        config.storage.database_name = database;
    }
    if let Some(data_dir) = args.data_dir {
        config.storage.data_dir = data_dir;
    }
    if let Some(backend) = args.backend {
        config.storage.backend = backend;
    }

    // RUST_LOG wins over the configured level
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.monitoring.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_line_number(true)
        .init();

    info!("Starting Maze server with config: {:?}", config);

    let maze = match Maze::new(config).await {
        Ok(maze) => maze,
        Err(e) => {
            error!("Failed to open document store: {}", e);
            return Err(e);
        }
    };

    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for shutdown signal: {}", e);
            return;
        }
        info!("Received shutdown signal, stopping server...");
    };

    maze.run(shutdown).await?;

    info!("Maze server stopped");
    Ok(())
}
