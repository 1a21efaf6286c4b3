//! /zosmf/restfiles/ds/* — data set REST endpoints.
//!
//! - `GET    /zosmf/restfiles/ds?dslevel=PATTERN` — list data sets
//! - `GET    /zosmf/restfiles/ds/{dsn}/member` — list PDS members
//! - `GET    /zosmf/restfiles/ds/{dsn}` — read data set or member content
//! - `PUT    /zosmf/restfiles/ds/{dsn}` — write data set or member content
//! - `POST   /zosmf/restfiles/ds/{dsn}` — allocate a data set, or create a member
//! - `DELETE /zosmf/restfiles/ds/{dsn}` — delete data set or member
//!
//! `{dsn}` may be `NAME`, `NAME(MEMBER)`, `NAME/MEMBER` or `-(VOLUME)/NAME`.

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

/// Register data set routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/zosmf/restfiles/ds", get(list_datasets))
        .route(
            "/zosmf/restfiles/ds/{*dsn}",
            get(read_dataset)
                .put(write_dataset)
                .post(create_dataset)
                .delete(delete_dataset),
        )
}

async fn list_datasets(
    State(state): State<Arc<AppState>>,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::list_data_sets(&query)).await
}

/// GET on a data set address. A trailing `/member` segment lists members.
async fn read_dataset(
    State(state): State<Arc<AppState>>,
    Capture(dsn): Capture,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    match dsn.strip_suffix("/member") {
        Some(dsn) => run(&state, normalize::list_members(dsn, &query)).await,
        None => run(&state, normalize::read_data_set(&dsn, &query)).await,
    }
}

async fn write_dataset(
    State(state): State<Arc<AppState>>,
    Capture(dsn): Capture,
    Params(query): Params,
    Body(body): Body,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::write_data_set(&dsn, &query, &body)).await
}

async fn create_dataset(
    State(state): State<Arc<AppState>>,
    Capture(dsn): Capture,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::create_data_set(&dsn, &query)).await
}

async fn delete_dataset(
    State(state): State<Arc<AppState>>,
    Capture(dsn): Capture,
    Params(query): Params,
) -> Result<Reply, ErrorResponse> {
    run(&state, normalize::delete_data_set(&dsn, &query)).await
}
