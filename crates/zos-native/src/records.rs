//! Loosely-typed records returned by native calls.
//!
//! Every attribute is optional: a native layer may omit any field and the
//! REST layer applies its own defaults when rendering.

use serde::{Deserialize, Serialize};

/// A cataloged data set, as returned by a data set listing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSetEntry {
    /// Fully qualified data set name.
    pub name: Option<String>,
    /// Data set organization (PS, PO, VS, ...).
    pub dsorg: Option<String>,
    /// Volume serial.
    pub volser: Option<String>,
    /// Migrated by HSM.
    pub migr: Option<bool>,
    /// Record format (F, FB, V, VB, U).
    pub recfm: Option<String>,
}

impl DataSetEntry {
    /// Entry carrying only a name.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }
}

/// A PDS directory entry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MemberEntry {
    /// Member name.
    pub name: Option<String>,
}

impl MemberEntry {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
        }
    }
}

/// A job known to the job entry subsystem.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JobEntry {
    pub jobname: Option<String>,
    pub jobid: Option<String>,
    pub owner: Option<String>,
    /// Short status: INPUT, ACTIVE, OUTPUT.
    pub status: Option<String>,
    /// Long-form status text.
    pub full_status: Option<String>,
    /// Completion code, e.g. `CC 0000`.
    pub retcode: Option<String>,
    pub job_correlator: Option<String>,
}

/// A spool data set belonging to a job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpoolFileEntry {
    pub jobid: Option<String>,
    /// DD name, e.g. `JESMSGLG`.
    pub ddname: Option<String>,
    /// Spool data set name.
    pub dsname: Option<String>,
    pub stepname: Option<String>,
    pub procstep: Option<String>,
    /// Spool file key used to read the records.
    pub key: Option<u32>,
}

/// Allocation attributes for a new data set.
///
/// Unset attributes are chosen by the native layer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DataSetAttributes {
    pub dsorg: Option<String>,
    pub recfm: Option<String>,
    pub lrecl: Option<u32>,
    pub blksize: Option<u32>,
    pub primary: Option<u32>,
    pub secondary: Option<u32>,
    /// Directory blocks (PDS only).
    pub dirblk: Option<u32>,
    /// Allocation unit: TRK, CYL, BLK.
    pub alcunit: Option<String>,
}

impl DataSetAttributes {
    /// Whether the attributes describe a partitioned data set.
    pub fn is_partitioned(&self) -> bool {
        matches!(
            self.dsorg.as_deref().map(str::to_ascii_uppercase).as_deref(),
            Some("PO") | Some("PO-E")
        )
    }
}
