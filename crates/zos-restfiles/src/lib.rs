//! # z/OS REST files and jobs service
//!
//! z/OSMF-style REST front end for data sets, USS files and JES jobs.
//! Every request goes through the same pipeline:
//!
//! 1. [`normalize`] validates the path, query and body into an
//!    [`OperationRequest`](types::request::OperationRequest)
//! 2. [`dispatch`] maps it to exactly one native call and runs it on the
//!    blocking pool
//! 3. [`envelope`] renders the native result as the JSON response
//!
//! Native functionality sits behind [`zos_native::NativeBackend`].
//!
//! ## Example
//!
//! ```rust,no_run
//! use zos_restfiles::{build_router, config::ServiceConfig};
//!
//! # async fn example() {
//! let config = ServiceConfig::default();
//! let router = build_router(config);
//! // router can be served via axum::serve()
//! # }
//! ```

#![forbid(unsafe_code)]

pub mod address;
pub mod config;
pub mod dispatch;
pub mod envelope;
pub mod extract;
pub mod handlers;
pub mod mode;
pub mod normalize;
pub mod state;
pub mod types;

pub use config::ServiceConfig;
pub use state::AppState;

use std::sync::Arc;

/// Build the Axum router backed by the in-memory native layer.
pub fn build_router(config: ServiceConfig) -> axum::Router {
    let state = Arc::new(AppState::new(config));
    handlers::build_router(state)
}

/// Convenience result type for handlers.
pub type Result<T> = std::result::Result<T, types::error::ErrorResponse>;
