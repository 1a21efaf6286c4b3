//! Resource addressing: decode path captures into the resource they name.
//!
//! ```text
//! ds/USER.DATA              DataSet
//! ds/USER.PDS(MEM)          DataSetMember
//! ds/USER.PDS/MEM           DataSetMember (slash form)
//! ds/-(VOL001)/USER.DATA    DataSetOnVolume
//! fs/tmp/a.txt              UssPath("/tmp/a.txt")
//! jobs/NAME/JOB00001        Job
//! jobs/J0000001...          Job (correlator)
//! jobs/.../files/2/records  SpoolFile
//! ```

use std::fmt;

use thiserror::Error;

/// A path that does not decode to any resource.
#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
#[error("{0}")]
#[diagnostic(code(zos_restfiles::malformed_address))]
pub struct MalformedAddress(pub String);

/// How a job is identified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobRef {
    /// `jobs/{jobname}/{jobid}`.
    Id {
        jobname: Option<String>,
        jobid: String,
    },
    /// `jobs/{correlator}`.
    Correlator(String),
}

impl JobRef {
    /// Identifier handed to the native layer.
    pub fn native_id(&self) -> &str {
        match self {
            JobRef::Id { jobid, .. } => jobid,
            JobRef::Correlator(correlator) => correlator,
        }
    }
}

impl fmt::Display for JobRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            JobRef::Id {
                jobname: Some(jobname),
                jobid,
            } => write!(f, "{jobname}/{jobid}"),
            JobRef::Id { jobname: None, jobid } => f.write_str(jobid),
            JobRef::Correlator(correlator) => f.write_str(correlator),
        }
    }
}

/// Spool file selector: a numeric key or the job's JCL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileKey {
    Jcl,
    Number(u32),
}

impl FileKey {
    pub fn parse(raw: &str) -> Result<Self, MalformedAddress> {
        if raw.eq_ignore_ascii_case("JCL") {
            return Ok(FileKey::Jcl);
        }
        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MalformedAddress("file_id must be a number".to_string()));
        }
        raw.parse()
            .map(FileKey::Number)
            .map_err(|_| MalformedAddress("file_id must be a number".to_string()))
    }
}

/// The resource a request operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceAddress {
    /// Data set listing filter.
    DataSetLevel { dslevel: String },
    DataSet { name: String },
    DataSetMember { dataset: String, member: String },
    /// A data set or member address qualified by a volume serial.
    DataSetOnVolume {
        volume: String,
        dataset: Box<ResourceAddress>,
    },
    /// USS listing target.
    UssDirectory { path: String },
    UssPath { absolute_path: String },
    /// Job listing filter.
    JobOwner { owner: String },
    /// Job submission target.
    JobQueue,
    Job(JobRef),
    SpoolFiles(JobRef),
    SpoolFile { job: JobRef, key: FileKey },
}

impl ResourceAddress {
    /// Data set name without member or volume.
    pub fn dataset_name(&self) -> Option<&str> {
        match self {
            ResourceAddress::DataSet { name } => Some(name),
            ResourceAddress::DataSetMember { dataset, .. } => Some(dataset),
            ResourceAddress::DataSetOnVolume { dataset, .. } => dataset.dataset_name(),
            _ => None,
        }
    }

    pub fn member_name(&self) -> Option<&str> {
        match self {
            ResourceAddress::DataSetMember { member, .. } => Some(member),
            ResourceAddress::DataSetOnVolume { dataset, .. } => dataset.member_name(),
            _ => None,
        }
    }

    pub fn volume(&self) -> Option<&str> {
        match self {
            ResourceAddress::DataSetOnVolume { volume, .. } => Some(volume),
            _ => None,
        }
    }

    /// Fully qualified `NAME` or `NAME(MEMBER)` as passed to the native layer.
    pub fn qualified_dsn(&self) -> Option<String> {
        let name = self.dataset_name()?;
        Some(match self.member_name() {
            Some(member) => format!("{name}({member})"),
            None => name.to_string(),
        })
    }

    pub fn uss_path(&self) -> Option<&str> {
        match self {
            ResourceAddress::UssPath { absolute_path } => Some(absolute_path),
            ResourceAddress::UssDirectory { path } => Some(path),
            _ => None,
        }
    }

    pub fn job(&self) -> Option<&JobRef> {
        match self {
            ResourceAddress::Job(job)
            | ResourceAddress::SpoolFiles(job)
            | ResourceAddress::SpoolFile { job, .. } => Some(job),
            _ => None,
        }
    }
}

impl fmt::Display for ResourceAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceAddress::DataSetLevel { dslevel } => f.write_str(dslevel),
            ResourceAddress::DataSet { .. }
            | ResourceAddress::DataSetMember { .. }
            | ResourceAddress::DataSetOnVolume { .. } => {
                f.write_str(&self.qualified_dsn().unwrap_or_default())
            }
            ResourceAddress::UssDirectory { path } => f.write_str(path),
            ResourceAddress::UssPath { absolute_path } => f.write_str(absolute_path),
            ResourceAddress::JobOwner { owner } => f.write_str(owner),
            ResourceAddress::JobQueue => f.write_str("JES"),
            ResourceAddress::Job(job) | ResourceAddress::SpoolFiles(job) => write!(f, "{job}"),
            ResourceAddress::SpoolFile { job, key } => match key {
                FileKey::Jcl => write!(f, "{job}/JCL"),
                FileKey::Number(n) => write!(f, "{job}/{n}"),
            },
        }
    }
}

/// Decode a data set path capture, with optional `-(VOLSER)/` prefix and
/// `(MEMBER)` or `/MEMBER` suffix.
pub fn parse_data_set(raw: &str) -> Result<ResourceAddress, MalformedAddress> {
    let raw = raw.trim();
    if let Some(rest) = raw.strip_prefix("-(") {
        let close = rest.find(")/").ok_or_else(|| {
            MalformedAddress(format!(
                "volume prefix in '{raw}' must have the form -(VOLSER)/NAME"
            ))
        })?;
        let volume = &rest[..close];
        if volume.is_empty() {
            return Err(MalformedAddress(format!("empty volume serial in '{raw}'")));
        }
        let dataset = parse_dataset_portion(&rest[close + 2..])?;
        return Ok(ResourceAddress::DataSetOnVolume {
            volume: volume.to_string(),
            dataset: Box::new(dataset),
        });
    }
    parse_dataset_portion(raw)
}

fn parse_dataset_portion(raw: &str) -> Result<ResourceAddress, MalformedAddress> {
    if raw.is_empty() {
        return Err(MalformedAddress("data set name is required".to_string()));
    }

    if let Some((dataset, member)) = raw.split_once('/') {
        if member.is_empty() || member.contains(['/', '(', ')']) {
            return Err(MalformedAddress(format!("invalid member path '{raw}'")));
        }
        return member_address(dataset, member, raw);
    }

    match raw.find('(') {
        None => {
            check_dataset_name(raw, raw)?;
            Ok(ResourceAddress::DataSet {
                name: raw.to_string(),
            })
        }
        Some(open) => {
            let member = raw[open + 1..].strip_suffix(')').ok_or_else(|| {
                MalformedAddress(format!("member name in '{raw}' must end with ')'"))
            })?;
            if member.contains(['(', ')']) {
                return Err(MalformedAddress(format!(
                    "unbalanced parentheses in '{raw}'"
                )));
            }
            member_address(&raw[..open], member, raw)
        }
    }
}

/// The data set half of any address form: non-empty, with no member
/// parentheses, path separators or volume prefix of its own.
fn check_dataset_name(dataset: &str, raw: &str) -> Result<(), MalformedAddress> {
    if dataset.is_empty() {
        return Err(MalformedAddress(format!(
            "data set name is missing in '{raw}'"
        )));
    }
    if dataset.starts_with("-(") {
        return Err(MalformedAddress(format!(
            "volume prefix must lead the address in '{raw}'"
        )));
    }
    if dataset.contains(['(', ')', '/']) {
        return Err(MalformedAddress(format!(
            "unbalanced parentheses in '{raw}'"
        )));
    }
    Ok(())
}

fn member_address(
    dataset: &str,
    member: &str,
    raw: &str,
) -> Result<ResourceAddress, MalformedAddress> {
    check_dataset_name(dataset, raw)?;
    if member.is_empty() {
        return Err(MalformedAddress(format!("member name is empty in '{raw}'")));
    }
    Ok(ResourceAddress::DataSetMember {
        dataset: dataset.to_string(),
        member: member.to_string(),
    })
}

/// Make a USS path absolute. Already-absolute paths are returned unchanged.
pub fn absolute_uss_path(raw: &str) -> String {
    if raw.starts_with('/') {
        raw.to_string()
    } else {
        format!("/{raw}")
    }
}

pub fn parse_uss_path(raw: &str) -> ResourceAddress {
    ResourceAddress::UssPath {
        absolute_path: absolute_uss_path(raw),
    }
}

/// Decode a job path capture (everything after `/zosmf/restjobs/jobs/`).
pub fn parse_job_path(raw: &str) -> Result<ResourceAddress, MalformedAddress> {
    let segments: Vec<&str> = raw.trim_matches('/').split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(MalformedAddress(format!("invalid job path '{raw}'")));
    }

    let named = |jobname: &str, jobid: &str| JobRef::Id {
        jobname: Some(jobname.to_string()),
        jobid: jobid.to_string(),
    };
    let correlator = |c: &str| JobRef::Correlator(c.to_string());

    match segments.as_slice() {
        &[c] => Ok(ResourceAddress::Job(correlator(c))),
        &[c, "files"] => Ok(ResourceAddress::SpoolFiles(correlator(c))),
        &[name, id] => Ok(ResourceAddress::Job(named(name, id))),
        &[name, id, "files"] => Ok(ResourceAddress::SpoolFiles(named(name, id))),
        &[c, "files", key, "records"] => Ok(ResourceAddress::SpoolFile {
            job: correlator(c),
            key: FileKey::parse(key)?,
        }),
        &[name, id, "files", key, "records"] => Ok(ResourceAddress::SpoolFile {
            job: named(name, id),
            key: FileKey::parse(key)?,
        }),
        _ => Err(MalformedAddress(format!("unrecognized job resource '{raw}'"))),
    }
}
