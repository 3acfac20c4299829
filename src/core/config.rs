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

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::Result;

/// Environment variable prefix, e.g. `MAZE_SERVER__PORT=9000`.
pub const ENV_PREFIX: &str = "MAZE";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub api: ApiConfig,
    pub monitoring: MonitoringConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_address: String,
    pub port: u16,
}

/// Supported document store backends
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackendType {
    /// Process-local store, lost on restart
    #[default]
    Memory,
    /// In-memory store with a JSON snapshot on disk
    Filestore,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StorageConfig {
    pub backend: StorageBackendType,
    pub database_name: String,
    pub data_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub timeout_seconds: u64,
    pub max_request_size_kb: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackendType::Memory,
            database_name: "mazedb".to_string(),
            data_dir: PathBuf::from("./data"),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            timeout_seconds: 30,
            max_request_size_kb: 1024,
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from an optional TOML file layered under
    /// `MAZE_*` environment variables. Missing keys keep their defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = ::config::Config::builder();

        if let Some(path) = path {
            builder = builder.add_source(
                ::config::File::from(path)
                    .format(::config::FileFormat::Toml)
                    .required(false),
            );
        }

        let config = builder
            .add_source(
                ::config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize::<Config>()?;

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.api.timeout_seconds)
    }

    pub fn max_request_size_bytes(&self) -> usize {
        self.api.max_request_size_kb * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_default() {
        let config = Config::default();

        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.storage.backend, StorageBackendType::Memory);
        assert_eq!(config.storage.database_name, "mazedb");
        assert_eq!(config.request_timeout(), Duration::from_secs(30));
        assert_eq!(config.max_request_size_bytes(), 1024 * 1024);
        assert_eq!(config.monitoring.log_level, "info");
    }

    #[test]
    fn test_config_load_partial_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            "[server]\nport = 9090\n\n[storage]\nbackend = \"filestore\"\ndatabase_name = \"labyrinth\""
        )
        .unwrap();

        let config = Config::load(Some(file.path())).unwrap();

        assert_eq!(config.server.port, 9090);
        assert_eq!(config.server.bind_address, "0.0.0.0");
        assert_eq!(config.storage.backend, StorageBackendType::Filestore);
        assert_eq!(config.storage.database_name, "labyrinth");
        assert_eq!(config.api.timeout_seconds, 30);
    }

    #[test]
    fn test_config_load_missing_file_uses_defaults() {
        let config = Config::load(Some(Path::new("/nonexistent/maze.toml"))).unwrap();
        assert_eq!(config.server.port, 8080);
    }
}
