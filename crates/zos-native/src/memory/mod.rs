//! In-memory emulation of the native layer.
//!
//! `MemoryBackend` keeps a data set catalog, a USS file tree and a JES job
//! queue, each behind its own `RwLock`. It backs the standalone server and
//! the HTTP tests.

mod catalog;
mod jes;
mod uss;

use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::backend::NativeBackend;
use crate::error::{NativeError, NativeResult};
use crate::records::{DataSetAttributes, DataSetEntry, JobEntry, MemberEntry, SpoolFileEntry};

use catalog::Catalog;
use jes::JobQueue;
use uss::UssTree;

/// Hex MD5 of content, the ETag format used for data sets and files.
pub fn content_etag(data: &str) -> String {
    hex::encode(md5::compute(data.as_bytes()).0)
}

fn read<'a, T>(lock: &'a RwLock<T>, what: &str) -> NativeResult<RwLockReadGuard<'a, T>> {
    lock.read()
        .map_err(|_| NativeError::Failed(format!("{what} lock poisoned")))
}

fn write<'a, T>(lock: &'a RwLock<T>, what: &str) -> NativeResult<RwLockWriteGuard<'a, T>> {
    lock.write()
        .map_err(|_| NativeError::Failed(format!("{what} lock poisoned")))
}

/// A self-contained native backend holding everything in memory.
#[derive(Debug)]
pub struct MemoryBackend {
    user: String,
    catalog: RwLock<Catalog>,
    fs: RwLock<UssTree>,
    jes: RwLock<JobQueue>,
}

impl MemoryBackend {
    /// Create an empty system acting on behalf of `user`.
    pub fn new(user: impl Into<String>) -> Self {
        let user = user.into().to_ascii_uppercase();
        Self {
            fs: RwLock::new(UssTree::new(&user)),
            catalog: RwLock::new(Catalog::default()),
            jes: RwLock::new(JobQueue::default()),
            user,
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new("IBMUSER")
    }
}

impl NativeBackend for MemoryBackend {
    fn list_data_sets(&self, pattern: &str) -> NativeResult<Vec<DataSetEntry>> {
        Ok(read(&self.catalog, "catalog")?.list(pattern))
    }

    fn list_members(&self, dsn: &str) -> NativeResult<Vec<MemberEntry>> {
        read(&self.catalog, "catalog")?.members(dsn)
    }

    fn read_data_set(&self, dsn: &str, _encoding: &str) -> NativeResult<String> {
        read(&self.catalog, "catalog")?.read(dsn)
    }

    fn write_data_set(
        &self,
        dsn: &str,
        data: &str,
        _encoding: &str,
        etag: &str,
    ) -> NativeResult<String> {
        write(&self.catalog, "catalog")?.write(dsn, data, etag)
    }

    fn create_member(&self, dsn: &str) -> NativeResult<()> {
        write(&self.catalog, "catalog")?.create_member(dsn)
    }

    fn create_data_set(&self, dsn: &str, attributes: &DataSetAttributes) -> NativeResult<()> {
        write(&self.catalog, "catalog")?.create(dsn, attributes)
    }

    fn delete_data_set(&self, dsn: &str) -> NativeResult<()> {
        write(&self.catalog, "catalog")?.delete(dsn)
    }

    fn list_uss_dir(&self, path: &str) -> NativeResult<String> {
        read(&self.fs, "file system")?.list(path)
    }

    fn read_uss_file(&self, path: &str, _encoding: &str) -> NativeResult<String> {
        read(&self.fs, "file system")?.read(path)
    }

    fn write_uss_file(
        &self,
        path: &str,
        data: &str,
        _encoding: &str,
        etag: &str,
    ) -> NativeResult<String> {
        write(&self.fs, "file system")?.write(path, data, etag, &self.user)
    }

    fn create_uss_file(&self, path: &str, mode: &str) -> NativeResult<()> {
        write(&self.fs, "file system")?.create_file(path, mode, &self.user)
    }

    fn create_uss_dir(&self, path: &str, mode: &str) -> NativeResult<()> {
        write(&self.fs, "file system")?.create_dir(path, mode, &self.user)
    }

    fn delete_uss_item(&self, path: &str, recursive: bool) -> NativeResult<()> {
        write(&self.fs, "file system")?.delete(path, recursive)
    }

    fn chmod_uss_item(&self, path: &str, mode: &str, recursive: bool) -> NativeResult<()> {
        write(&self.fs, "file system")?.chmod(path, mode, recursive)
    }

    fn chown_uss_item(&self, path: &str, owner: &str, recursive: bool) -> NativeResult<()> {
        write(&self.fs, "file system")?.chown(path, owner, recursive)
    }

    fn chtag_uss_item(&self, path: &str, tag: &str, recursive: bool) -> NativeResult<()> {
        write(&self.fs, "file system")?.chtag(path, tag, recursive)
    }

    fn get_job_status(&self, id: &str) -> NativeResult<JobEntry> {
        read(&self.jes, "job queue")?.status(id)
    }

    fn list_jobs_by_owner(&self, owner: &str) -> NativeResult<Vec<JobEntry>> {
        Ok(read(&self.jes, "job queue")?.list_by_owner(owner))
    }

    fn list_spool_files(&self, id: &str) -> NativeResult<Vec<SpoolFileEntry>> {
        read(&self.jes, "job queue")?.spool_files(id)
    }

    fn read_spool_file(&self, id: &str, key: u32) -> NativeResult<String> {
        read(&self.jes, "job queue")?.read_spool(id, key)
    }

    fn get_job_jcl(&self, id: &str) -> NativeResult<String> {
        read(&self.jes, "job queue")?.jcl(id)
    }

    fn submit_job(&self, jcl: &str) -> NativeResult<String> {
        write(&self.jes, "job queue")?.submit(jcl, &self.user)
    }

    fn submit_job_from_data_set(&self, dsn: &str) -> NativeResult<String> {
        let jcl = self.read_data_set(dsn, "")?;
        self.submit_job(&jcl)
    }

    fn submit_job_from_uss_file(&self, path: &str) -> NativeResult<String> {
        let jcl = self.read_uss_file(path, "")?;
        self.submit_job(&jcl)
    }

    fn delete_job(&self, id: &str) -> NativeResult<()> {
        write(&self.jes, "job queue")?.purge(id)
    }
}
