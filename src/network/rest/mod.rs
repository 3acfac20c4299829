//! REST transport: decode request, call one service operation, encode result

pub mod extract;
pub mod handlers;
pub mod server;

pub use handlers::{create_router, AppState};
pub use server::RestServer;
