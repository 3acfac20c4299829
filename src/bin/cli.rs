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

//! Maze CLI - command line client for the Maze REST API

use clap::{Parser, Subcommand};
use maze::core::{Origin, PathRequest, QuadrantRequest, Spot};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde_json::Value;

#[derive(Parser)]
#[command(name = "maze-cli")]
#[command(about = "Maze command line interface")]
struct Cli {
    #[arg(short, long, default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage spots
    Spot {
        #[command(subcommand)]
        action: SpotCommand,
    },
    /// Manage paths between spots
    Path {
        #[command(subcommand)]
        action: PathCommand,
    },
    /// Manage the origin
    Origin {
        #[command(subcommand)]
        action: OriginCommand,
    },
    /// List spots in a quadrant (upper_left, upper_right, bottom_left, bottom_right)
    Quadrant { name: String },
    /// Check server status
    Health,
}

#[derive(Subcommand)]
enum SpotCommand {
    Create {
        #[arg(short, long)]
        name: String,
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, default_value_t = 0)]
        number: i64,
    },
    Get {
        id: String,
    },
    List,
    Modify {
        id: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,
        #[arg(long, default_value_t = 0)]
        number: i64,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum PathCommand {
    Create {
        #[arg(short = 'a', long)]
        point_a: String,
        #[arg(short = 'b', long)]
        point_b: String,
    },
    Get {
        id: String,
    },
    List,
    Modify {
        id: String,
        #[arg(short = 'a', long)]
        point_a: String,
        #[arg(short = 'b', long)]
        point_b: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Subcommand)]
enum OriginCommand {
    Create {
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,
    },
    Get,
    Modify {
        #[arg(short, long, allow_negative_numbers = true)]
        x: f64,
        #[arg(short, long, allow_negative_numbers = true)]
        y: f64,
    },
    Delete,
}

struct MazeClient {
    http: Client,
    base_url: String,
}

impl MazeClient {
    fn new(base_url: &str) -> Self {
        Self {
            http: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, format!("{}{}", self.base_url, path))
    }

    async fn call(&self, method: Method, path: &str) -> anyhow::Result<Value> {
        send(self.request(method, path)).await
    }

    async fn call_with<B: Serialize>(&self, method: Method, path: &str, body: &B) -> anyhow::Result<Value> {
        send(self.request(method, path).json(body)).await
    }
}

async fn send(request: RequestBuilder) -> anyhow::Result<Value> {
    let response = request.send().await?;
    let status = response.status();
    let body: Value = response.json().await.unwrap_or(Value::Null);

    if !status.is_success() {
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .unwrap_or("no error message");
        anyhow::bail!("{}: {}", status, message);
    }
    Ok(body)
}

async fn dispatch(client: &MazeClient, command: Commands) -> anyhow::Result<Value> {
    match command {
        Commands::Spot { action } => match action {
            SpotCommand::Create { name, x, y, number } => {
                client
                    .call_with(Method::POST, "/spot", &Spot::new(name, x, y, number))
                    .await
            }
            SpotCommand::Get { id } => client.call(Method::GET, &format!("/spot/{}", id)).await,
            SpotCommand::List => client.call(Method::GET, "/spots").await,
            SpotCommand::Modify { id, name, x, y, number } => {
                client
                    .call_with(Method::PUT, &format!("/spot/{}", id), &Spot::new(name, x, y, number))
                    .await
            }
            SpotCommand::Delete { id } => client.call(Method::DELETE, &format!("/spot/{}", id)).await,
        },
        Commands::Path { action } => match action {
            PathCommand::Create { point_a, point_b } => {
                client
                    .call_with(Method::POST, "/path", &PathRequest { point_a, point_b })
                    .await
            }
            PathCommand::Get { id } => client.call(Method::GET, &format!("/path/{}", id)).await,
            PathCommand::List => client.call(Method::GET, "/paths").await,
            PathCommand::Modify { id, point_a, point_b } => {
                client
                    .call_with(Method::PUT, &format!("/path/{}", id), &PathRequest { point_a, point_b })
                    .await
            }
            PathCommand::Delete { id } => client.call(Method::DELETE, &format!("/path/{}", id)).await,
        },
        Commands::Origin { action } => match action {
            OriginCommand::Create { x, y } => {
                client.call_with(Method::POST, "/origin", &Origin::new(x, y)).await
            }
            OriginCommand::Get => client.call(Method::GET, "/origin").await,
            OriginCommand::Modify { x, y } => {
                client.call_with(Method::PUT, "/origin", &Origin::new(x, y)).await
            }
            OriginCommand::Delete => client.call(Method::DELETE, "/origin").await,
        },
        Commands::Quadrant { name } => {
            client
                .call_with(Method::POST, "/quadrantSpots", &QuadrantRequest { name })
                .await
        }
        Commands::Health => client.call(Method::GET, "/health").await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let client = MazeClient::new(&cli.server);

    match dispatch(&client, cli.command).await {
        Ok(body) => match serde_json::to_string_pretty(&body) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("error: {}", e);
                std::process::exit(1);
            }
        },
        Err(e) => {
            eprintln!("error: {}", e);
            std::process::exit(1);
        }
    }
}
