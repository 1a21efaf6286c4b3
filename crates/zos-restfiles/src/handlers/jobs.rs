//! /zosmf/restjobs/jobs/* — job REST endpoints.
//!
//! Jobs are addressed as `{jobname}/{jobid}` or by a single `{correlator}`
//! segment; both forms accept `/files` and `/files/{id}/records` suffixes.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::Router;

use super::run;
use crate::envelope::Reply;
use crate::extract::{Body, Capture, Params};
use crate::normalize;
use crate::state::AppState;
use crate::types::error::ErrorResponse;

/// Register job routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/zosmf/restjobs/jobs", get(list_jobs).put(submit_job))
        .route(
            "/zosmf/restjobs/jobs/{*path}",
            get(get_job_resource).delete(delete_job),
        )
}

/// GET /zosmf/restjobs/jobs — list jobs by owner (default `*`).
async fn list_jobs(
    State(state): State<Arc<AppState>>,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::list_jobs(&query)).await
}

/// PUT /zosmf/restjobs/jobs — submit inline JCL, or `{"dsn"}` / `{"file"}`.
async fn submit_job(
    State(state): State<Arc<AppState>>,
    Body(body): Body,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::submit_job(&body)).await
}

async fn get_job_resource(
    State(state): State<Arc<AppState>>,
    Capture(path): Capture,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::get_job_resource(&path, &query)).await
}

async fn delete_job(
    State(state): State<Arc<AppState>>,
    Capture(path): Capture,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::delete_job(&path)).await
}
