//! Building blocks shared by HTTP services in this workspace.
//!
//! - [`config`]: base settings from `configuration.*` files and `APP__*` variables
//! - [`error`]: service-level [`error::AppError`]
//! - [`middleware`]: per-route CORS and request id propagation
//! - [`observability`]: JSON logging with optional OTLP export
pub mod config;
pub mod error;
pub mod middleware;
pub mod observability;
