//! API Module
//!
//! HTTP handlers and routing that expose the data-access operations to UI
//! collaborators. All endpoints are read-only `GET`s.

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
