//! Operation dispatch: one normalized request, one native call.
//!
//! [`plan`] is pure and maps an [`OperationRequest`] to a [`NativeCall`].
//! [`execute`] runs that call on tokio's blocking pool and turns a native
//! failure into a collaborator error carrying a verb-specific message.

use std::sync::Arc;

use zos_native::{
    DataSetAttributes, DataSetEntry, JobEntry, MemberEntry, NativeBackend, NativeResult,
    SpoolFileEntry,
};

use crate::address::{FileKey, ResourceAddress};
use crate::normalize::dslevel_pattern;
use crate::types::error::RequestError;
use crate::types::request::{JclSource, OperationRequest, Payload, UssEntryKind, Verb};

/// A single planned native invocation with its exact arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeCall {
    ListDataSets { pattern: String },
    ListMembers { dsn: String },
    ReadDataSet { dsn: String, encoding: String },
    WriteDataSet { dsn: String, data: String, encoding: String, etag: String },
    CreateMember { dsn: String },
    CreateDataSet { dsn: String, attributes: DataSetAttributes },
    DeleteDataSet { dsn: String },
    ListUssDir { path: String },
    ReadUssFile { path: String, encoding: String },
    WriteUssFile { path: String, data: String, encoding: String, etag: String },
    CreateUssFile { path: String, mode: String },
    CreateUssDir { path: String, mode: String },
    DeleteUssItem { path: String, recursive: bool },
    ChmodUssItem { path: String, mode: String, recursive: bool },
    ChownUssItem { path: String, owner: String, recursive: bool },
    ChtagUssItem { path: String, tag: String, recursive: bool },
    GetJobStatus { id: String },
    ListJobsByOwner { owner: String },
    ListSpoolFiles { id: String },
    ReadSpoolFile { id: String, key: u32 },
    GetJobJcl { id: String },
    SubmitJob { jcl: String },
    SubmitJobFromDataSet { dsn: String },
    SubmitJobFromUssFile { path: String },
    DeleteJob { id: String },
}

/// Result of a native call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeOutput {
    DataSets(Vec<DataSetEntry>),
    Members(Vec<MemberEntry>),
    /// Content, or a raw USS directory listing.
    Text(String),
    Etag(String),
    Done,
    Job(JobEntry),
    Jobs(Vec<JobEntry>),
    SpoolFiles(Vec<SpoolFileEntry>),
    JobId(String),
}

impl NativeCall {
    /// Native function name, for logs.
    pub fn name(&self) -> &'static str {
        match self {
            NativeCall::ListDataSets { .. } => "list-datasets",
            NativeCall::ListMembers { .. } => "list-members",
            NativeCall::ReadDataSet { .. } => "read-dataset",
            NativeCall::WriteDataSet { .. } => "write-dataset",
            NativeCall::CreateMember { .. } => "create-member",
            NativeCall::CreateDataSet { .. } => "create-dataset",
            NativeCall::DeleteDataSet { .. } => "delete-dataset",
            NativeCall::ListUssDir { .. } => "list-uss-dir",
            NativeCall::ReadUssFile { .. } => "read-uss-file",
            NativeCall::WriteUssFile { .. } => "write-uss-file",
            NativeCall::CreateUssFile { .. } => "create-uss-file",
            NativeCall::CreateUssDir { .. } => "create-uss-dir",
            NativeCall::DeleteUssItem { .. } => "delete-uss-item",
            NativeCall::ChmodUssItem { .. } => "chmod-uss-item",
            NativeCall::ChownUssItem { .. } => "chown-uss-item",
            NativeCall::ChtagUssItem { .. } => "chtag-uss-item",
            NativeCall::GetJobStatus { .. } => "get-job-status",
            NativeCall::ListJobsByOwner { .. } => "list-jobs-by-owner",
            NativeCall::ListSpoolFiles { .. } => "list-spool-files",
            NativeCall::ReadSpoolFile { .. } => "read-spool-file",
            NativeCall::GetJobJcl { .. } => "get-job-jcl",
            NativeCall::SubmitJob { .. } => "submit-job",
            NativeCall::SubmitJobFromDataSet { .. } => "submit-job-from-dataset",
            NativeCall::SubmitJobFromUssFile { .. } => "submit-job-from-uss-file",
            NativeCall::DeleteJob { .. } => "delete-job",
        }
    }

    /// Perform the call. Blocking.
    pub fn invoke(&self, backend: &dyn NativeBackend) -> NativeResult<NativeOutput> {
        use NativeCall::*;
        use NativeOutput as Out;

        Ok(match self {
            ListDataSets { pattern } => Out::DataSets(backend.list_data_sets(pattern)?),
            ListMembers { dsn } => Out::Members(backend.list_members(dsn)?),
            ReadDataSet { dsn, encoding } => Out::Text(backend.read_data_set(dsn, encoding)?),
            WriteDataSet { dsn, data, encoding, etag } => {
                Out::Etag(backend.write_data_set(dsn, data, encoding, etag)?)
            }
            CreateMember { dsn } => backend.create_member(dsn).map(|_| Out::Done)?,
            CreateDataSet { dsn, attributes } => {
                backend.create_data_set(dsn, attributes).map(|_| Out::Done)?
            }
            DeleteDataSet { dsn } => backend.delete_data_set(dsn).map(|_| Out::Done)?,
            ListUssDir { path } => Out::Text(backend.list_uss_dir(path)?),
            ReadUssFile { path, encoding } => Out::Text(backend.read_uss_file(path, encoding)?),
            WriteUssFile { path, data, encoding, etag } => {
                Out::Etag(backend.write_uss_file(path, data, encoding, etag)?)
            }
            CreateUssFile { path, mode } => backend.create_uss_file(path, mode).map(|_| Out::Done)?,
            CreateUssDir { path, mode } => backend.create_uss_dir(path, mode).map(|_| Out::Done)?,
            DeleteUssItem { path, recursive } => {
                backend.delete_uss_item(path, *recursive).map(|_| Out::Done)?
            }
            ChmodUssItem { path, mode, recursive } => {
                backend.chmod_uss_item(path, mode, *recursive).map(|_| Out::Done)?
            }
            ChownUssItem { path, owner, recursive } => {
                backend.chown_uss_item(path, owner, *recursive).map(|_| Out::Done)?
            }
            ChtagUssItem { path, tag, recursive } => {
                backend.chtag_uss_item(path, tag, *recursive).map(|_| Out::Done)?
            }
            GetJobStatus { id } => Out::Job(backend.get_job_status(id)?),
            ListJobsByOwner { owner } => Out::Jobs(backend.list_jobs_by_owner(owner)?),
            ListSpoolFiles { id } => Out::SpoolFiles(backend.list_spool_files(id)?),
            ReadSpoolFile { id, key } => Out::Text(backend.read_spool_file(id, *key)?),
            GetJobJcl { id } => Out::Text(backend.get_job_jcl(id)?),
            SubmitJob { jcl } => Out::JobId(backend.submit_job(jcl)?),
            SubmitJobFromDataSet { dsn } => Out::JobId(backend.submit_job_from_data_set(dsn)?),
            SubmitJobFromUssFile { path } => Out::JobId(backend.submit_job_from_uss_file(path)?),
            DeleteJob { id } => backend.delete_job(id).map(|_| Out::Done)?,
        })
    }
}

fn unsupported(request: &OperationRequest) -> RequestError {
    RequestError::validation(format!(
        "{} is not supported for '{}'",
        request.verb, request.target
    ))
}

fn qualified_dsn(request: &OperationRequest) -> Result<String, RequestError> {
    request
        .target
        .qualified_dsn()
        .ok_or_else(|| unsupported(request))
}

fn content(request: &OperationRequest) -> Result<String, RequestError> {
    match &request.payload {
        Payload::Content(data) => Ok(data.clone()),
        _ => Err(RequestError::validation("body cannot be empty")),
    }
}

/// Map a request to the one native call that serves it.
pub fn plan(request: &OperationRequest) -> Result<NativeCall, RequestError> {
    let options = &request.options;
    let encoding = options.encoding.clone().unwrap_or_default();
    let etag = options.etag.clone().unwrap_or_default();
    let recursive = options.recursive;

    let call = match (request.verb, &request.target) {
        (Verb::List, ResourceAddress::DataSetLevel { dslevel }) => NativeCall::ListDataSets {
            pattern: dslevel_pattern(dslevel),
        },
        (
            Verb::List,
            target @ (ResourceAddress::DataSet { .. } | ResourceAddress::DataSetOnVolume { .. }),
        ) if target.member_name().is_none() =>
        {
            NativeCall::ListMembers {
                dsn: qualified_dsn(request)?,
            }
        }
        (Verb::List, ResourceAddress::UssDirectory { path }) => {
            NativeCall::ListUssDir { path: path.clone() }
        }
        (Verb::List, ResourceAddress::JobOwner { owner }) => NativeCall::ListJobsByOwner {
            owner: owner.clone(),
        },
        (Verb::List, ResourceAddress::SpoolFiles(job)) => NativeCall::ListSpoolFiles {
            id: job.native_id().to_string(),
        },

        (Verb::Read, ResourceAddress::UssPath { absolute_path }) => NativeCall::ReadUssFile {
            path: absolute_path.clone(),
            encoding,
        },
        (Verb::Read, ResourceAddress::Job(job)) => NativeCall::GetJobStatus {
            id: job.native_id().to_string(),
        },
        (Verb::Read, ResourceAddress::SpoolFile { job, key }) => match key {
            FileKey::Jcl => NativeCall::GetJobJcl {
                id: job.native_id().to_string(),
            },
            FileKey::Number(key) => NativeCall::ReadSpoolFile {
                id: job.native_id().to_string(),
                key: *key,
            },
        },
        (Verb::Read, _) => NativeCall::ReadDataSet {
            dsn: qualified_dsn(request)?,
            encoding,
        },

        (Verb::Write, ResourceAddress::UssPath { absolute_path }) => NativeCall::WriteUssFile {
            path: absolute_path.clone(),
            data: content(request)?,
            encoding,
            etag,
        },
        (Verb::Write, _) => NativeCall::WriteDataSet {
            dsn: qualified_dsn(request)?,
            data: content(request)?,
            encoding,
            etag,
        },

        (Verb::Create, ResourceAddress::UssPath { absolute_path }) => match &request.payload {
            Payload::UssEntry { kind, mode } => {
                let path = absolute_path.clone();
                let mode = mode.as_str().to_string();
                match kind {
                    UssEntryKind::File => NativeCall::CreateUssFile { path, mode },
                    UssEntryKind::Directory => NativeCall::CreateUssDir { path, mode },
                }
            }
            _ => return Err(unsupported(request)),
        },
        (Verb::Create, target) if target.member_name().is_some() => NativeCall::CreateMember {
            dsn: qualified_dsn(request)?,
        },
        (Verb::Create, _) => match &request.payload {
            Payload::Allocation(attributes) => NativeCall::CreateDataSet {
                dsn: qualified_dsn(request)?,
                attributes: attributes.clone(),
            },
            _ => return Err(unsupported(request)),
        },

        (Verb::Delete, ResourceAddress::UssPath { absolute_path }) => NativeCall::DeleteUssItem {
            path: absolute_path.clone(),
            recursive,
        },
        (Verb::Delete, ResourceAddress::Job(job)) => NativeCall::DeleteJob {
            id: job.native_id().to_string(),
        },
        (Verb::Delete, _) => NativeCall::DeleteDataSet {
            dsn: qualified_dsn(request)?,
        },

        (Verb::Chmod, ResourceAddress::UssPath { absolute_path }) => match &request.payload {
            Payload::Mode(mode) => NativeCall::ChmodUssItem {
                path: absolute_path.clone(),
                mode: mode.as_str().to_string(),
                recursive,
            },
            _ => return Err(unsupported(request)),
        },
        (Verb::Chown, ResourceAddress::UssPath { absolute_path }) => match &request.payload {
            Payload::Owner(owner) => NativeCall::ChownUssItem {
                path: absolute_path.clone(),
                owner: owner.clone(),
                recursive,
            },
            _ => return Err(unsupported(request)),
        },
        (Verb::Chtag, ResourceAddress::UssPath { absolute_path }) => match &request.payload {
            Payload::Tag(tag) => NativeCall::ChtagUssItem {
                path: absolute_path.clone(),
                tag: tag.clone(),
                recursive,
            },
            _ => return Err(unsupported(request)),
        },

        (Verb::Submit, ResourceAddress::JobQueue) => match &request.payload {
            Payload::Jcl(JclSource::Inline(jcl)) => NativeCall::SubmitJob { jcl: jcl.clone() },
            Payload::Jcl(JclSource::DataSet(dsn)) => {
                NativeCall::SubmitJobFromDataSet { dsn: dsn.clone() }
            }
            Payload::Jcl(JclSource::UssFile(path)) => {
                NativeCall::SubmitJobFromUssFile { path: path.clone() }
            }
            _ => return Err(RequestError::validation("JCL content is required")),
        },

        _ => return Err(unsupported(request)),
    };
    Ok(call)
}

/// Message prefix for a failed native call.
fn failure_prefix(request: &OperationRequest, call: &NativeCall) -> &'static str {
    match call {
        NativeCall::ListDataSets { .. } => "could not list data set",
        NativeCall::ListMembers { .. } | NativeCall::ReadDataSet { .. } => {
            "could not read data set"
        }
        NativeCall::WriteDataSet { .. } => "could not write data set",
        NativeCall::CreateMember { .. } => "could not create member",
        NativeCall::CreateDataSet { .. } => "could not create data set",
        NativeCall::DeleteDataSet { .. } if request.target.member_name().is_some() => {
            "could not delete member"
        }
        NativeCall::DeleteDataSet { .. } => "could not delete data set",
        NativeCall::ListUssDir { .. } => "could not list USS files",
        NativeCall::ReadUssFile { .. } => "could not view USS file",
        NativeCall::WriteUssFile { .. } => "could not write USS file",
        NativeCall::CreateUssFile { .. } => "could not create USS file",
        NativeCall::CreateUssDir { .. } => "could not create USS directory",
        NativeCall::DeleteUssItem { .. } => "could not delete USS item",
        NativeCall::ChmodUssItem { .. } => "could not change mode of USS item",
        NativeCall::ChownUssItem { .. } => "could not change owner of USS item",
        NativeCall::ChtagUssItem { .. } => "could not change tag of USS item",
        NativeCall::GetJobStatus { .. } => "could not get job status",
        NativeCall::ListJobsByOwner { .. } => "could not list jobs",
        NativeCall::ListSpoolFiles { .. } => "could not list spool files",
        NativeCall::ReadSpoolFile { .. } => "could not read spool file",
        NativeCall::GetJobJcl { .. } => "could not read job JCL",
        NativeCall::SubmitJob { .. }
        | NativeCall::SubmitJobFromDataSet { .. }
        | NativeCall::SubmitJobFromUssFile { .. } => "could not submit job",
        NativeCall::DeleteJob { .. } => "could not delete job",
    }
}

/// What the failure message names as the target.
fn failure_target(request: &OperationRequest) -> String {
    match (&request.target, &request.payload) {
        (ResourceAddress::JobQueue, Payload::Jcl(JclSource::DataSet(dsn))) => dsn.clone(),
        (ResourceAddress::JobQueue, Payload::Jcl(JclSource::UssFile(path))) => path.clone(),
        (target, _) => target.to_string(),
    }
}

fn collaborator_error(
    request: &OperationRequest,
    call: &NativeCall,
    details: String,
) -> RequestError {
    RequestError::Collaborator {
        message: format!(
            "{}: '{}' - {}",
            failure_prefix(request, call),
            failure_target(request),
            details
        ),
        details,
    }
}

/// Plan and run the native call for `request` on the blocking pool.
pub async fn execute(
    backend: Arc<dyn NativeBackend>,
    request: &OperationRequest,
) -> Result<NativeOutput, RequestError> {
    let call = plan(request)?;
    for gap in &request.gaps {
        tracing::debug!(param = gap.0, call = call.name(), "option not supported natively");
    }
    tracing::info!(
        verb = %request.verb,
        target = %request.target,
        call = call.name(),
        "dispatching"
    );

    let task = call.clone();
    let result = tokio::task::spawn_blocking(move || task.invoke(backend.as_ref())).await;

    match result {
        Ok(Ok(output)) => Ok(output),
        Ok(Err(err)) => Err(collaborator_error(request, &call, err.to_string())),
        Err(join) => Err(collaborator_error(
            request,
            &call,
            format!("native call did not complete: {join}"),
        )),
    }
}
