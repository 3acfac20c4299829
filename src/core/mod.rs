pub mod config;
pub mod context;
pub mod error;
pub mod types;

pub use config::*;
pub use context::OpContext;
pub use error::*;
pub use types::*;
