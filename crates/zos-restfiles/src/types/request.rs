//! Canonical, validated form of an incoming request.

use std::fmt;

use zos_native::DataSetAttributes;

use crate::address::ResourceAddress;
use crate::mode::PermissionMode;

/// What a request does to its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    List,
    Read,
    Write,
    Create,
    Delete,
    Chmod,
    Chown,
    Chtag,
    Submit,
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Verb::List => "list",
            Verb::Read => "read",
            Verb::Write => "write",
            Verb::Create => "create",
            Verb::Delete => "delete",
            Verb::Chmod => "chmod",
            Verb::Chown => "chown",
            Verb::Chtag => "chtag",
            Verb::Submit => "submit",
        })
    }
}

/// Query options shared by every endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Keep only the first N collection items.
    pub max_entries: Option<usize>,
    /// Emit `warnings` in the response.
    pub warn: bool,
    pub csv_format: bool,
    pub bytes_format: bool,
    pub include_attributes: bool,
    pub encoding: Option<String>,
    /// ETag the caller expects the current content to have.
    pub etag: Option<String>,
    /// Omit `message` from write responses.
    pub etag_only: bool,
    pub return_etag: bool,
    pub recursive: bool,
    /// USS `all`.
    pub show_hidden: bool,
    /// USS `long`.
    pub long_format: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            max_entries: None,
            warn: true,
            csv_format: false,
            bytes_format: false,
            include_attributes: false,
            encoding: None,
            etag: None,
            etag_only: false,
            return_etag: false,
            recursive: false,
            show_hidden: false,
            long_format: false,
        }
    }
}

/// An accepted option the native layer cannot honor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Gap(pub &'static str);

impl Gap {
    /// Warning text reported for this gap.
    pub fn warning(&self) -> String {
        format!(
            "{} parameter provided but not supported by current native function",
            self.0
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UssEntryKind {
    File,
    Directory,
}

impl UssEntryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            UssEntryKind::File => "file",
            UssEntryKind::Directory => "directory",
        }
    }

    /// Mode applied when the request does not name one.
    pub fn default_mode(&self) -> &'static str {
        match self {
            UssEntryKind::File => "644",
            UssEntryKind::Directory => "755",
        }
    }
}

/// Where submitted JCL comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JclSource {
    Inline(String),
    DataSet(String),
    UssFile(String),
}

/// Verb-specific request body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    None,
    Content(String),
    Allocation(DataSetAttributes),
    UssEntry {
        kind: UssEntryKind,
        mode: PermissionMode,
    },
    Mode(PermissionMode),
    Owner(String),
    Tag(String),
    Jcl(JclSource),
}

/// A validated request, ready for planning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OperationRequest {
    pub verb: Verb,
    pub target: ResourceAddress,
    pub options: Options,
    pub payload: Payload,
    pub gaps: Vec<Gap>,
}

impl OperationRequest {
    pub fn new(verb: Verb, target: ResourceAddress) -> Self {
        Self {
            verb,
            target,
            options: Options::default(),
            payload: Payload::None,
            gaps: Vec::new(),
        }
    }

    pub fn with_options(mut self, options: Options) -> Self {
        self.options = options;
        self
    }

    pub fn with_payload(mut self, payload: Payload) -> Self {
        self.payload = payload;
        self
    }

    /// Record `param` as a capability gap when `present`.
    pub fn gap_if(mut self, present: bool, param: &'static str) -> Self {
        if present {
            self.gaps.push(Gap(param));
        }
        self
    }
}
