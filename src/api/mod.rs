//! # HTTP API
//!
//! The `/v1/data` surface: path validation, request handlers, router
//! assembly, and error rendering.

pub mod error;
pub mod handlers;
pub mod path;
pub mod routes;
pub mod server;

pub use routes::{build_router, ApiState};
pub use server::start_api_server;
