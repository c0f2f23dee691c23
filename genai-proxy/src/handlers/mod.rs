//! HTTP handlers for the proxy.

pub mod health;
pub mod proxy;

pub use health::health_check;
pub use proxy::{proxy_handler, ProxyState};
