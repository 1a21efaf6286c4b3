//! In-memory job entry subsystem.
//!
//! Submitted jobs run to completion immediately: every job lands on the
//! output queue with `CC 0000` and three JES spool data sets.

use chrono::Local;

use crate::error::{NativeError, NativeResult};
use crate::records::{JobEntry, SpoolFileEntry};

/// System name used in job correlators and `$HASP` messages.
const SYSTEM_NAME: &str = "ZOS1";

#[derive(Debug, Clone)]
struct SpoolDataSet {
    key: u32,
    ddname: &'static str,
    stepname: &'static str,
    records: String,
}

#[derive(Debug, Clone)]
struct JobRecord {
    jobid: String,
    jobname: String,
    owner: String,
    correlator: String,
    jcl: String,
    retcode: String,
    spool: Vec<SpoolDataSet>,
}

impl JobRecord {
    fn entry(&self) -> JobEntry {
        JobEntry {
            jobname: Some(self.jobname.clone()),
            jobid: Some(self.jobid.clone()),
            owner: Some(self.owner.clone()),
            status: Some("OUTPUT".to_string()),
            full_status: Some("OUTPUT".to_string()),
            retcode: Some(self.retcode.clone()),
            job_correlator: Some(self.correlator.clone()),
        }
    }
}

/// Jobs in submission order.
#[derive(Debug, Default)]
pub(crate) struct JobQueue {
    jobs: Vec<JobRecord>,
    last_number: u32,
}

/// Job name from the first `JOB` statement.
fn extract_job_name(jcl: &str) -> Option<String> {
    jcl.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("//") && !line.starts_with("//*"))
        .find_map(|line| {
            let mut fields = line[2..].split_whitespace();
            let name = fields.next()?;
            (fields.next()? == "JOB").then(|| name.to_ascii_uppercase())
        })
}

/// Job class from the `CLASS=` keyword, defaulting to `A`.
fn extract_class(jcl: &str) -> char {
    jcl.lines()
        .find_map(|line| {
            let upper = line.to_ascii_uppercase();
            let pos = upper.find("CLASS=")?;
            upper[pos + 6..].chars().next().filter(char::is_ascii_alphanumeric)
        })
        .unwrap_or('A')
}

/// Names of the `EXEC` steps, in order.
fn extract_steps(jcl: &str) -> Vec<String> {
    jcl.lines()
        .map(str::trim)
        .filter(|line| line.starts_with("//") && !line.starts_with("//*"))
        .filter_map(|line| {
            let rest = &line[2..];
            if rest.starts_with(char::is_whitespace) {
                return rest
                    .split_whitespace()
                    .next()
                    .filter(|op| *op == "EXEC")
                    .map(|_| String::new());
            }
            let mut fields = rest.split_whitespace();
            let name = fields.next()?;
            (fields.next()? == "EXEC").then(|| name.to_ascii_uppercase())
        })
        .collect()
}

impl JobQueue {
    pub(crate) fn submit(&mut self, jcl: &str, owner: &str) -> NativeResult<String> {
        let jobname = extract_job_name(jcl)
            .ok_or_else(|| {
                NativeError::Invalid("no valid JOB statement found in JCL".to_string())
            })?;
        let class = extract_class(jcl);

        self.last_number += 1;
        let number = self.last_number;
        let jobid = format!("JOB{number:05}");
        let correlator = format!("J{number:07}{SYSTEM_NAME}.{jobname:.<8}");

        let time = Local::now().format("%H.%M.%S").to_string();
        let jesmsglg = format!(
            "{time} {jobid}  $HASP373 {jobname} STARTED - INIT 1 - CLASS {class} \
             - SYS {SYSTEM_NAME}\n\
             {time} {jobid}  $HASP395 {jobname} ENDED - RC=0000\n"
        );
        let jesjcl: String = jcl
            .lines()
            .enumerate()
            .map(|(idx, line)| format!("{:>10} {line}\n", idx + 1))
            .collect();
        let jesysmsg: String = extract_steps(jcl)
            .iter()
            .enumerate()
            .map(|(idx, step)| {
                let step = if step.is_empty() {
                    format!("STEP{}", idx + 1)
                } else {
                    step.clone()
                };
                format!("IEF142I {jobname} {step} - STEP WAS EXECUTED - COND CODE 0000\n")
            })
            .collect();

        tracing::debug!(%jobid, %jobname, %class, "job submitted");
        self.jobs.push(JobRecord {
            jobid: jobid.clone(),
            jobname,
            owner: owner.to_ascii_uppercase(),
            correlator,
            jcl: jcl.to_string(),
            retcode: "CC 0000".to_string(),
            spool: vec![
                SpoolDataSet { key: 2, ddname: "JESMSGLG", stepname: "JES2", records: jesmsglg },
                SpoolDataSet { key: 3, ddname: "JESJCL", stepname: "JES2", records: jesjcl },
                SpoolDataSet { key: 4, ddname: "JESYSMSG", stepname: "JES2", records: jesysmsg },
            ],
        });
        Ok(jobid)
    }

    fn find(&self, id: &str) -> NativeResult<&JobRecord> {
        let id = id.trim();
        self.jobs
            .iter()
            .find(|job| job.jobid.eq_ignore_ascii_case(id) || job.correlator == id)
            .ok_or_else(|| NativeError::not_found("job", id))
    }

    pub(crate) fn status(&self, id: &str) -> NativeResult<JobEntry> {
        self.find(id).map(JobRecord::entry)
    }

    /// Jobs owned by `owner`; `*` matches all and a trailing `*` matches a prefix.
    pub(crate) fn list_by_owner(&self, owner: &str) -> Vec<JobEntry> {
        let owner = owner.trim().to_ascii_uppercase();
        self.jobs
            .iter()
            .filter(|job| match owner.strip_suffix('*') {
                Some(prefix) => job.owner.starts_with(prefix),
                None => job.owner == owner,
            })
            .map(JobRecord::entry)
            .collect()
    }

    pub(crate) fn spool_files(&self, id: &str) -> NativeResult<Vec<SpoolFileEntry>> {
        let job = self.find(id)?;
        Ok(job
            .spool
            .iter()
            .map(|ds| SpoolFileEntry {
                jobid: Some(job.jobid.clone()),
                ddname: Some(ds.ddname.to_string()),
                dsname: Some(format!(
                    "{}.{}.{}.D{:07}.{}",
                    job.owner, job.jobname, job.jobid, ds.key, ds.ddname
                )),
                stepname: Some(ds.stepname.to_string()),
                procstep: None,
                key: Some(ds.key),
            })
            .collect())
    }

    pub(crate) fn read_spool(&self, id: &str, key: u32) -> NativeResult<String> {
        let job = self.find(id)?;
        job.spool
            .iter()
            .find(|ds| ds.key == key)
            .map(|ds| ds.records.clone())
            .ok_or_else(|| NativeError::not_found("spool file", format!("{}:{key}", job.jobid)))
    }

    pub(crate) fn jcl(&self, id: &str) -> NativeResult<String> {
        self.find(id).map(|job| job.jcl.clone())
    }

    pub(crate) fn purge(&mut self, id: &str) -> NativeResult<()> {
        let job = self.find(id)?;
        let jobid = job.jobid.clone();
        self.jobs.retain(|job| job.jobid != jobid);
        tracing::debug!(%jobid, "job purged");
        Ok(())
    }
}
