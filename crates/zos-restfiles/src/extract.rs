//! Request extractors whose rejections render as the JSON error body.
//!
//! Axum's stock `Path`, `Query` and `Bytes` reject with plain text; these
//! wrappers keep the status and reuse the rejection text as `details`.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request};
use axum::http::request::Parts;

use crate::normalize::QueryParams;
use crate::state::AppState;
use crate::types::error::ErrorResponse;

/// Query string as a flat parameter map.
pub struct Params(pub QueryParams);

impl FromRequestParts<Arc<AppState>> for Params {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        Query::<QueryParams>::from_request_parts(parts, state)
            .await
            .map(|Query(query)| Self(query))
            .map_err(|rej| ErrorResponse::rejection(rej.status(), rej.body_text()))
    }
}

/// The route's single wildcard capture.
pub struct Capture(pub String);

impl FromRequestParts<Arc<AppState>> for Capture {
    type Rejection = ErrorResponse;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        Path::<String>::from_request_parts(parts, state)
            .await
            .map(|Path(capture)| Self(capture))
            .map_err(|rej| ErrorResponse::rejection(rej.status(), rej.body_text()))
    }
}

/// Raw request body, bounded by the configured body limit.
pub struct Body(pub Bytes);

impl FromRequest<Arc<AppState>> for Body {
    type Rejection = ErrorResponse;

    async fn from_request(
        req: Request,
        state: &Arc<AppState>,
    ) -> std::result::Result<Self, Self::Rejection> {
        Bytes::from_request(req, state)
            .await
            .map(Self)
            .map_err(|rej| ErrorResponse::rejection(rej.status(), rej.body_text()))
    }
}
