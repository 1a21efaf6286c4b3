//! Native collaborator error types.

use thiserror::Error;

/// Errors surfaced by a native backend call.
///
/// The REST layer never inspects the variant; it forwards the rendered
/// message as the `details` of a 500 response.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum NativeError {
    /// Data set, member, file, or job does not exist.
    #[error("{kind} '{name}' not found")]
    #[diagnostic(code(zos_native::not_found))]
    NotFound { kind: &'static str, name: String },

    /// Target of a create already exists.
    #[error("{kind} '{name}' already exists")]
    #[diagnostic(code(zos_native::already_exists))]
    AlreadyExists { kind: &'static str, name: String },

    /// Caller-supplied ETag does not match the current content.
    #[error("etag mismatch for '{name}': expected {expected}, found {actual}")]
    #[diagnostic(code(zos_native::etag_mismatch))]
    EtagMismatch {
        name: String,
        expected: String,
        actual: String,
    },

    /// Operation is not valid for the target in its current state.
    #[error("{0}")]
    #[diagnostic(code(zos_native::invalid))]
    Invalid(String),

    /// Any other failure reported by the native layer.
    #[error("{0}")]
    #[diagnostic(code(zos_native::failed))]
    Failed(String),
}

impl NativeError {
    pub(crate) fn not_found(kind: &'static str, name: impl Into<String>) -> Self {
        Self::NotFound {
            kind,
            name: name.into(),
        }
    }

    pub(crate) fn already_exists(kind: &'static str, name: impl Into<String>) -> Self {
        Self::AlreadyExists {
            kind,
            name: name.into(),
        }
    }
}

/// Result alias for native calls.
pub type NativeResult<T> = std::result::Result<T, NativeError>;
