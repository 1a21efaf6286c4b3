//! /zosservice/application/* — service build information and health.

use std::sync::Arc;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;

use crate::state::AppState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub name: String,
    pub operating_system: String,
    pub time: String,
    pub machine: String,
    pub number: String,
    pub version: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ApplicationInfo {
    pub build: BuildInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct Health {
    pub status: &'static str,
}

/// Register info routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/zosservice/application/info", get(get_info))
        .route("/zosservice/application/health", get(get_health))
}

async fn get_info(State(state): State<Arc<AppState>>) -> Json<ApplicationInfo> {
    let info = &state.config.service_info;
    Json(ApplicationInfo {
        build: BuildInfo {
            name: info.name.clone(),
            operating_system: "z/OS".to_string(),
            time: chrono::Utc::now().to_rfc3339(),
            machine: info.machine.clone(),
            number: "n/a".to_string(),
            version: info.version.clone(),
        },
    })
}

async fn get_health() -> Json<Health> {
    Json(Health { status: "UP" })
}
