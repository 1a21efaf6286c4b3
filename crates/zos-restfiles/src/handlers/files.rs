//! /zosmf/restfiles/fs/* — USS file REST endpoints.
//!
//! The capture-less `/zosmf/restfiles/fs` route takes the path from `?path=`;
//! a GET there lists a directory. Under `/zosmf/restfiles/fs/{path}`:
//! GET reads, PUT writes (or runs chmod/chown/chtag when the JSON body has a
//! `request` field), POST creates, DELETE removes.

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

/// Register USS file routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/zosmf/restfiles/fs",
            get(list_files)
                .put(put_query_path)
                .post(create_query_path)
                .delete(delete_query_path),
        )
        .route(
            "/zosmf/restfiles/fs/{*path}",
            get(read_file).put(put_file).post(create_file).delete(delete_file),
        )
}

async fn list_files(
    State(state): State<Arc<AppState>>,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::list_uss(&query)).await
}

async fn put_query_path(
    State(state): State<Arc<AppState>>,
    Params(query): Params,
    Body(body): Body,
) -> Result<Reply, ErrorResponse> {
    let request =
        normalize::query_path(&query).and_then(|path| normalize::put_uss(&path, &query, &body));
    run(&state, request).await
}

async fn create_query_path(
    State(state): State<Arc<AppState>>,
    Params(query): Params,
    Body(body): Body,
) -> Result<Reply, ErrorResponse> {
    let request =
        normalize::query_path(&query).and_then(|path| normalize::create_uss(&path, &query, &body));
    run(&state, request).await
}

async fn delete_query_path(
    State(state): State<Arc<AppState>>,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    let request =
        normalize::query_path(&query).and_then(|path| normalize::delete_uss(&path, &query));
    run(&state, request).await
}

async fn read_file(
    State(state): State<Arc<AppState>>,
    Capture(path): Capture,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::read_uss(&path, &query)).await
}

async fn put_file(
    State(state): State<Arc<AppState>>,
    Capture(path): Capture,
    Params(query): Params,
    Body(body): Body,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::put_uss(&path, &query, &body)).await
}

async fn create_file(
    State(state): State<Arc<AppState>>,
    Capture(path): Capture,
    Params(query): Params,
    Body(body): Body,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::create_uss(&path, &query, &body)).await
}

async fn delete_file(
    State(state): State<Arc<AppState>>,
    Capture(path): Capture,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::delete_uss(&path, &query)).await
}
