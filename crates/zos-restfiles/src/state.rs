//! Shared application state for all handlers.

use std::sync::Arc;

use zos_native::{MemoryBackend, NativeBackend};

use crate::config::ServiceConfig;

/// Shared state available to all Axum handlers via `State<Arc<AppState>>`.
pub struct AppState {
    /// Native collaborator every request dispatches to.
    pub backend: Arc<dyn NativeBackend>,
    /// Service configuration.
    pub config: Arc<ServiceConfig>,
}

impl AppState {
    /// State backed by an in-memory native layer acting as `config.backend.user`.
    pub fn new(config: ServiceConfig) -> Self {
        let backend = Arc::new(MemoryBackend::new(config.backend.user.clone()));
        Self::with_backend(config, backend)
    }

    /// State with a caller-supplied native backend.
    pub fn with_backend(config: ServiceConfig, backend: Arc<dyn NativeBackend>) -> Self {
        Self {
            backend,
            config: Arc::new(config),
        }
    }
}
