//! The synchronous native collaborator interface.

use crate::error::NativeResult;
use crate::records::{DataSetAttributes, DataSetEntry, JobEntry, MemberEntry, SpoolFileEntry};

/// Native access to data sets, USS files, and the job entry subsystem.
///
/// Every method is a single, blocking call into the native layer. Callers on
/// an async runtime must move invocations onto a blocking thread.
///
/// Data set names passed to content operations are fully qualified and may
/// carry a member suffix, e.g. `USER.PDS(MEMBER)`. Empty `encoding` and
/// `etag` arguments mean "not specified". Job operations accept either a
/// job ID or a job correlator.
pub trait NativeBackend: Send + Sync {
    // ─── Data sets ───

    /// List cataloged data sets matching `pattern` (e.g. `USER.**`).
    fn list_data_sets(&self, pattern: &str) -> NativeResult<Vec<DataSetEntry>>;

    /// List the members of a partitioned data set.
    fn list_members(&self, dsn: &str) -> NativeResult<Vec<MemberEntry>>;

    /// Read a sequential data set or member as text.
    fn read_data_set(&self, dsn: &str, encoding: &str) -> NativeResult<String>;

    /// Replace the content of a data set or member; returns the new ETag.
    ///
    /// A non-empty `etag` must match the current content's ETag.
    fn write_data_set(&self, dsn: &str, data: &str, encoding: &str, etag: &str)
        -> NativeResult<String>;

    /// Create an empty member, e.g. `USER.PDS(NEWMEM)`.
    fn create_member(&self, dsn: &str) -> NativeResult<()>;

    /// Allocate and catalog a new data set.
    fn create_data_set(&self, dsn: &str, attributes: &DataSetAttributes) -> NativeResult<()>;

    /// Delete a data set, or a member when `dsn` carries a member suffix.
    fn delete_data_set(&self, dsn: &str) -> NativeResult<()>;

    // ─── USS ───

    /// List a directory. The payload is either JSON or newline-delimited names.
    fn list_uss_dir(&self, path: &str) -> NativeResult<String>;

    fn read_uss_file(&self, path: &str, encoding: &str) -> NativeResult<String>;

    /// Write a file, creating it when absent; returns the new ETag.
    fn write_uss_file(&self, path: &str, data: &str, encoding: &str, etag: &str)
        -> NativeResult<String>;

    /// Create an empty file with an octal mode such as `644`.
    fn create_uss_file(&self, path: &str, mode: &str) -> NativeResult<()>;

    /// Create a directory with an octal mode such as `755`.
    fn create_uss_dir(&self, path: &str, mode: &str) -> NativeResult<()>;

    fn delete_uss_item(&self, path: &str, recursive: bool) -> NativeResult<()>;

    fn chmod_uss_item(&self, path: &str, mode: &str, recursive: bool) -> NativeResult<()>;

    fn chown_uss_item(&self, path: &str, owner: &str, recursive: bool) -> NativeResult<()>;

    fn chtag_uss_item(&self, path: &str, tag: &str, recursive: bool) -> NativeResult<()>;

    // ─── Jobs ───

    fn get_job_status(&self, id: &str) -> NativeResult<JobEntry>;

    /// List jobs for an owner; `*` matches every owner.
    fn list_jobs_by_owner(&self, owner: &str) -> NativeResult<Vec<JobEntry>>;

    fn list_spool_files(&self, id: &str) -> NativeResult<Vec<SpoolFileEntry>>;

    fn read_spool_file(&self, id: &str, key: u32) -> NativeResult<String>;

    fn get_job_jcl(&self, id: &str) -> NativeResult<String>;

    /// Submit inline JCL; returns the assigned job ID.
    fn submit_job(&self, jcl: &str) -> NativeResult<String>;

    /// Submit the JCL held in a data set or member.
    fn submit_job_from_data_set(&self, dsn: &str) -> NativeResult<String>;

    /// Submit the JCL held in a USS file.
    fn submit_job_from_uss_file(&self, path: &str) -> NativeResult<String>;

    /// Cancel and purge a job.
    fn delete_job(&self, id: &str) -> NativeResult<()>;
}
