//! REST route handlers. Assembles every endpoint into a single Axum router.

pub mod datasets;
pub mod files;
pub mod info;
pub mod jobs;

use std::sync::Arc;

use axum::extract::DefaultBodyLimit;
use axum::http::Uri;
use axum::Router;

use crate::dispatch;
use crate::envelope::{self, Reply};
use crate::state::AppState;
use crate::types::error::{ErrorResponse, RequestError};
use crate::types::request::OperationRequest;

/// Normalize, dispatch, render: the path every handler shares.
pub(crate) async fn run(
    state: &AppState,
    request: Result<OperationRequest, RequestError>,
) -> Result<Reply, ErrorResponse> {
    let request = request?;
    let output = dispatch::execute(Arc::clone(&state.backend), &request).await?;
    Ok(envelope::build(&request, output)?)
}

async fn not_found(uri: Uri) -> ErrorResponse {
    RequestError::NotFound(format!("no route for {}", uri.path())).into()
}

/// Build the complete REST router with all routes.
pub fn build_router(state: Arc<AppState>) -> Router {
    let body_limit = state.config.limits.max_body_bytes;
    Router::new()
        .merge(info::routes())
        .merge(datasets::routes())
        .merge(files::routes())
        .merge(jobs::routes())
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
