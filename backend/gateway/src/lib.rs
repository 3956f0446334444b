//! HTTP gateway: the public API surface of BeanScan.

pub mod health_api;
pub mod reviews_api;
pub mod scan_api;
pub mod server;

pub use server::{build_router, start_server, AppState};
