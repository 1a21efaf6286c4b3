//! Shared HTTP test harness: a recording native backend and request helpers.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::Value;
use tower::ServiceExt;

use zos_native::{
    DataSetAttributes, DataSetEntry, JobEntry, MemberEntry, MemoryBackend, NativeBackend,
    NativeError, NativeResult, SpoolFileEntry,
};
use zos_restfiles::config::ServiceConfig;
use zos_restfiles::state::AppState;

/// Wraps [`MemoryBackend`], recording every native call with its arguments.
///
/// Optionally fails every call, or answers listings with canned results.
#[derive(Default)]
pub struct RecordingBackend {
    inner: MemoryBackend,
    calls: Mutex<Vec<String>>,
    fail_with: Option<String>,
    data_sets: Option<Vec<DataSetEntry>>,
    uss_listing: Option<String>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call fails with `NativeError::Failed(message)`.
    pub fn failing(message: &str) -> Self {
        Self {
            fail_with: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn with_data_sets(mut self, entries: Vec<DataSetEntry>) -> Self {
        self.data_sets = Some(entries);
        self
    }

    pub fn with_uss_listing(mut self, listing: &str) -> Self {
        self.uss_listing = Some(listing.to_string());
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    fn record(&self, call: String) -> NativeResult<()> {
        self.calls.lock().unwrap().push(call);
        match &self.fail_with {
            Some(message) => Err(NativeError::Failed(message.clone())),
            None => Ok(()),
        }
    }
}

impl NativeBackend for RecordingBackend {
    fn list_data_sets(&self, pattern: &str) -> NativeResult<Vec<DataSetEntry>> {
        self.record(format!("list_data_sets({pattern:?})"))?;
        match &self.data_sets {
            Some(entries) => Ok(entries.clone()),
            None => self.inner.list_data_sets(pattern),
        }
    }

    fn list_members(&self, dsn: &str) -> NativeResult<Vec<MemberEntry>> {
        self.record(format!("list_members({dsn:?})"))?;
        self.inner.list_members(dsn)
    }

    fn read_data_set(&self, dsn: &str, encoding: &str) -> NativeResult<String> {
        self.record(format!("read_data_set({dsn:?}, {encoding:?})"))?;
        self.inner.read_data_set(dsn, encoding)
    }

    fn write_data_set(
        &self,
        dsn: &str,
        data: &str,
        encoding: &str,
        etag: &str,
    ) -> NativeResult<String> {
        self.record(format!("write_data_set({dsn:?}, {data:?}, {encoding:?}, {etag:?})"))?;
        self.inner.write_data_set(dsn, data, encoding, etag)
    }

    fn create_member(&self, dsn: &str) -> NativeResult<()> {
        self.record(format!("create_member({dsn:?})"))?;
        self.inner.create_member(dsn)
    }

    fn create_data_set(&self, dsn: &str, attributes: &DataSetAttributes) -> NativeResult<()> {
        self.record(format!("create_data_set({dsn:?})"))?;
        self.inner.create_data_set(dsn, attributes)
    }

    fn delete_data_set(&self, dsn: &str) -> NativeResult<()> {
        self.record(format!("delete_data_set({dsn:?})"))?;
        self.inner.delete_data_set(dsn)
    }

    fn list_uss_dir(&self, path: &str) -> NativeResult<String> {
        self.record(format!("list_uss_dir({path:?})"))?;
        match &self.uss_listing {
            Some(listing) => Ok(listing.clone()),
            None => self.inner.list_uss_dir(path),
        }
    }

    fn read_uss_file(&self, path: &str, encoding: &str) -> NativeResult<String> {
        self.record(format!("read_uss_file({path:?}, {encoding:?})"))?;
        self.inner.read_uss_file(path, encoding)
    }

    fn write_uss_file(
        &self,
        path: &str,
        data: &str,
        encoding: &str,
        etag: &str,
    ) -> NativeResult<String> {
        self.record(format!("write_uss_file({path:?}, {data:?}, {encoding:?}, {etag:?})"))?;
        self.inner.write_uss_file(path, data, encoding, etag)
    }

    fn create_uss_file(&self, path: &str, mode: &str) -> NativeResult<()> {
        self.record(format!("create_uss_file({path:?}, {mode:?})"))?;
        self.inner.create_uss_file(path, mode)
    }

    fn create_uss_dir(&self, path: &str, mode: &str) -> NativeResult<()> {
        self.record(format!("create_uss_dir({path:?}, {mode:?})"))?;
        self.inner.create_uss_dir(path, mode)
    }

    fn delete_uss_item(&self, path: &str, recursive: bool) -> NativeResult<()> {
        self.record(format!("delete_uss_item({path:?}, {recursive})"))?;
        self.inner.delete_uss_item(path, recursive)
    }

    fn chmod_uss_item(&self, path: &str, mode: &str, recursive: bool) -> NativeResult<()> {
        self.record(format!("chmod_uss_item({path:?}, {mode:?}, {recursive})"))?;
        self.inner.chmod_uss_item(path, mode, recursive)
    }

    fn chown_uss_item(&self, path: &str, owner: &str, recursive: bool) -> NativeResult<()> {
        self.record(format!("chown_uss_item({path:?}, {owner:?}, {recursive})"))?;
        self.inner.chown_uss_item(path, owner, recursive)
    }

    fn chtag_uss_item(&self, path: &str, tag: &str, recursive: bool) -> NativeResult<()> {
        self.record(format!("chtag_uss_item({path:?}, {tag:?}, {recursive})"))?;
        self.inner.chtag_uss_item(path, tag, recursive)
    }

    fn get_job_status(&self, id: &str) -> NativeResult<JobEntry> {
        self.record(format!("get_job_status({id:?})"))?;
        self.inner.get_job_status(id)
    }

    fn list_jobs_by_owner(&self, owner: &str) -> NativeResult<Vec<JobEntry>> {
        self.record(format!("list_jobs_by_owner({owner:?})"))?;
        self.inner.list_jobs_by_owner(owner)
    }

    fn list_spool_files(&self, id: &str) -> NativeResult<Vec<SpoolFileEntry>> {
        self.record(format!("list_spool_files({id:?})"))?;
        self.inner.list_spool_files(id)
    }

    fn read_spool_file(&self, id: &str, key: u32) -> NativeResult<String> {
        self.record(format!("read_spool_file({id:?}, {key})"))?;
        self.inner.read_spool_file(id, key)
    }

    fn get_job_jcl(&self, id: &str) -> NativeResult<String> {
        self.record(format!("get_job_jcl({id:?})"))?;
        self.inner.get_job_jcl(id)
    }

    fn submit_job(&self, jcl: &str) -> NativeResult<String> {
        self.record("submit_job(..)".to_string())?;
        self.inner.submit_job(jcl)
    }

    fn submit_job_from_data_set(&self, dsn: &str) -> NativeResult<String> {
        self.record(format!("submit_job_from_data_set({dsn:?})"))?;
        self.inner.submit_job_from_data_set(dsn)
    }

    fn submit_job_from_uss_file(&self, path: &str) -> NativeResult<String> {
        self.record(format!("submit_job_from_uss_file({path:?})"))?;
        self.inner.submit_job_from_uss_file(path)
    }

    fn delete_job(&self, id: &str) -> NativeResult<()> {
        self.record(format!("delete_job({id:?})"))?;
        self.inner.delete_job(id)
    }
}

/// Router over `backend` with default configuration.
pub fn router(backend: Arc<RecordingBackend>) -> axum::Router {
    router_with_config(ServiceConfig::default(), backend)
}

pub fn router_with_config(config: ServiceConfig, backend: Arc<RecordingBackend>) -> axum::Router {
    let state = AppState::with_backend(config, backend);
    zos_restfiles::handlers::build_router(Arc::new(state))
}

/// Send one request and decode the JSON response body.
pub async fn send(app: &axum::Router, method: &str, uri: &str, body: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    send(app, "GET", uri, "").await
}
