//! Safe Circle HTTP API
//! Bootstrap surface: liveness greeting, health probe, API docs, CORS

pub mod cors;
pub mod docs;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod types;

pub use cors::CorsPolicy;
pub use handlers::AppState;
pub use routes::create_router;
pub use types::*;
