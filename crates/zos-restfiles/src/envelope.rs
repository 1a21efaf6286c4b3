//! Response envelopes.
//!
//! Collections render as `{items, returnedRows, ...}` and content as
//! `{records, format, etag?, ...}`. `warnings` is omitted when there is
//! nothing to report.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Map, Value};
use zos_native::{content_etag, DataSetEntry, JobEntry, SpoolFileEntry};

use crate::address::{FileKey, JobRef, ResourceAddress};
use crate::dispatch::NativeOutput;
use crate::types::error::RequestError;
use crate::types::request::{OperationRequest, Options, Payload, Verb};

/// A successful response: status plus JSON object body.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Map<String, Value>,
}

impl Reply {
    fn ok(body: Map<String, Value>) -> Self {
        Self {
            status: StatusCode::OK,
            body,
        }
    }

    fn created(body: Map<String, Value>) -> Self {
        Self {
            status: StatusCode::CREATED,
            body,
        }
    }
}

impl IntoResponse for Reply {
    fn into_response(self) -> Response {
        (self.status, Json(Value::Object(self.body))).into_response()
    }
}

/// Keep the first `max` items. Returns whether anything was dropped.
pub fn truncate<T>(items: &mut Vec<T>, max: Option<usize>) -> bool {
    match max {
        Some(max) if items.len() > max => {
            items.truncate(max);
            true
        }
        _ => false,
    }
}

/// Each character as its code point.
pub fn to_bytes_records(content: &str) -> Value {
    Value::Array(content.chars().map(|c| json!(u32::from(c))).collect())
}

/// Weak USS read ETag: hex MD5 of `"{path}:{chars}:{unix seconds}"`.
///
/// Depends on the clock rather than the content, so two reads in different
/// seconds differ even when the file did not change.
pub fn uss_read_etag(path: &str, content: &str, unix_seconds: i64) -> String {
    content_etag(&format!("{path}:{}:{unix_seconds}", content.chars().count()))
}

/// Warnings in order: capability gaps, truncation, emptiness.
///
/// Gaps are always reported; `warn=false` silences only the truncation and
/// emptiness notices.
fn warnings(request: &OperationRequest, truncated: bool, empty: Option<&str>) -> Vec<String> {
    let mut out: Vec<String> = request.gaps.iter().map(|gap| gap.warning()).collect();
    if !request.options.warn {
        return out;
    }
    if truncated {
        out.push("results truncated".to_string());
    }
    if let Some(empty) = empty {
        out.push(empty.to_string());
    }
    out
}

fn attach_warnings(body: &mut Map<String, Value>, warnings: Vec<String>) {
    if !warnings.is_empty() {
        body.insert("warnings".to_string(), json!(warnings));
    }
}

/// `{items, returnedRows}` after truncation, plus warnings.
fn collection(
    request: &OperationRequest,
    mut items: Vec<Value>,
    empty_warning: Option<&str>,
) -> Map<String, Value> {
    let truncated = truncate(&mut items, request.options.max_entries);
    let empty = items.is_empty().then_some(empty_warning).flatten();
    let mut body = Map::new();
    body.insert("returnedRows".to_string(), json!(items.len()));
    body.insert("items".to_string(), Value::Array(items));
    attach_warnings(&mut body, warnings(request, truncated, empty));
    body
}

fn records(content: String, options: &Options, body: &mut Map<String, Value>) {
    if options.bytes_format {
        body.insert("records".to_string(), to_bytes_records(&content));
        body.insert("format".to_string(), json!("bytes"));
    } else {
        body.insert("records".to_string(), Value::String(content));
        body.insert("format".to_string(), json!("text"));
    }
}

fn text(value: &Option<String>) -> Value {
    json!(value.as_deref().unwrap_or_default())
}

fn data_set_item(entry: &DataSetEntry, options: &Options) -> Value {
    let name = text(&entry.name);
    if options.csv_format || options.include_attributes {
        json!({
            "name": name,
            "dsorg": text(&entry.dsorg),
            "volser": text(&entry.volser),
            "recfm": text(&entry.recfm),
            "migr": entry.migr.unwrap_or(false),
        })
    } else {
        json!({ "name": name })
    }
}

/// `type` reported for a job, derived from its ID prefix.
pub fn job_type(jobid: &str) -> &'static str {
    if jobid.starts_with("STC") {
        "STC"
    } else if jobid.starts_with("TSU") {
        "TSU"
    } else {
        "JOB"
    }
}

fn job_item(job: &JobEntry) -> Map<String, Value> {
    let jobid = job.jobid.as_deref().unwrap_or_default();
    let mut map = Map::new();
    map.insert("jobname".to_string(), text(&job.jobname));
    map.insert("jobid".to_string(), json!(jobid));
    map.insert("owner".to_string(), text(&job.owner));
    map.insert("status".to_string(), text(&job.status));
    map.insert("type".to_string(), json!(job_type(jobid)));
    map.insert("retcode".to_string(), text(&job.retcode));
    map.insert("job-correlator".to_string(), text(&job.job_correlator));
    map.insert("phase-name".to_string(), text(&job.full_status));
    map
}

fn spool_item(file: &SpoolFileEntry) -> Value {
    json!({
        "jobid": text(&file.jobid),
        "ddname": text(&file.ddname),
        "dsname": text(&file.dsname),
        "stepname": text(&file.stepname),
        "procstep": text(&file.procstep),
        "id": file.key.unwrap_or(0),
    })
}

/// `jobname`/`jobid` or `job-correlator`, as addressed.
fn job_context(job: &JobRef, body: &mut Map<String, Value>) {
    match job {
        JobRef::Id { jobname, jobid } => {
            if let Some(jobname) = jobname {
                body.insert("jobname".to_string(), json!(jobname));
            }
            body.insert("jobid".to_string(), json!(jobid));
        }
        JobRef::Correlator(correlator) => {
            body.insert("job-correlator".to_string(), json!(correlator));
        }
    }
}

fn data_set_context(target: &ResourceAddress, body: &mut Map<String, Value>) {
    body.insert(
        "datasetName".to_string(),
        json!(target.dataset_name().unwrap_or_default()),
    );
    if let Some(member) = target.member_name() {
        body.insert("memberName".to_string(), json!(member));
    }
}

/// USS listing payload: JSON array or object, or newline-delimited names.
pub fn uss_items(listing: &str) -> Vec<Value> {
    match serde_json::from_str::<Value>(listing) {
        Ok(Value::Array(items)) => items,
        Ok(object @ Value::Object(_)) => vec![object],
        _ => listing
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(|name| json!({ "name": name, "type": "unknown" }))
            .collect(),
    }
}

fn unexpected(request: &OperationRequest) -> RequestError {
    RequestError::Collaborator {
        message: format!(
            "unexpected native result for {} '{}'",
            request.verb, request.target
        ),
        details: "native call returned a result of the wrong shape".to_string(),
    }
}

/// Assemble the response for `request` from the native result.
pub fn build(request: &OperationRequest, output: NativeOutput) -> Result<Reply, RequestError> {
    build_at(request, output, chrono::Utc::now().timestamp())
}

/// [`build`] with an explicit clock, in Unix seconds.
pub fn build_at(
    request: &OperationRequest,
    output: NativeOutput,
    unix_seconds: i64,
) -> Result<Reply, RequestError> {
    let options = &request.options;
    let target = &request.target;

    let reply = match (request.verb, target, output) {
        // ─── Collections ───
        (Verb::List, ResourceAddress::DataSetLevel { .. }, NativeOutput::DataSets(entries)) => {
            let items = entries.iter().map(|e| data_set_item(e, options)).collect();
            Reply::ok(collection(request, items, Some("no matching results found")))
        }
        (Verb::List, _, NativeOutput::Members(members)) => {
            let items = members
                .iter()
                .map(|m| json!({ "name": text(&m.name) }))
                .collect();
            let mut body = collection(request, items, Some("no members found"));
            body.insert(
                "datasetName".to_string(),
                json!(target.dataset_name().unwrap_or_default()),
            );
            Reply::ok(body)
        }
        (Verb::List, ResourceAddress::UssDirectory { path }, NativeOutput::Text(listing)) => {
            let mut body = collection(request, uss_items(&listing), None);
            body.insert("path".to_string(), json!(path));
            body.insert(
                "format".to_string(),
                json!(if options.long_format { "long" } else { "short" }),
            );
            body.insert("showHidden".to_string(), json!(options.show_hidden));
            Reply::ok(body)
        }
        (Verb::List, ResourceAddress::JobOwner { owner }, NativeOutput::Jobs(jobs)) => {
            let items = jobs.iter().map(|j| Value::Object(job_item(j))).collect();
            let mut body = collection(request, items, Some("no jobs found"));
            body.insert("owner".to_string(), json!(owner));
            Reply::ok(body)
        }
        (Verb::List, ResourceAddress::SpoolFiles(job), NativeOutput::SpoolFiles(files)) => {
            let items = files.iter().map(spool_item).collect();
            let mut body = collection(request, items, Some("no spool files found"));
            job_context(job, &mut body);
            Reply::ok(body)
        }

        // ─── Content ───
        (Verb::Read, ResourceAddress::UssPath { absolute_path }, NativeOutput::Text(content)) => {
            let mut body = Map::new();
            body.insert("filePath".to_string(), json!(absolute_path));
            if options.return_etag {
                body.insert(
                    "etag".to_string(),
                    json!(uss_read_etag(absolute_path, &content, unix_seconds)),
                );
            }
            records(content, options, &mut body);
            attach_warnings(&mut body, warnings(request, false, None));
            Reply::ok(body)
        }
        (Verb::Read, ResourceAddress::SpoolFile { job, key }, NativeOutput::Text(content)) => {
            let mut body = Map::new();
            job_context(job, &mut body);
            match key {
                FileKey::Jcl => {
                    body.insert("ddname".to_string(), json!("JCL"));
                    body.insert("type".to_string(), json!("JCL"));
                }
                FileKey::Number(key) => {
                    body.insert("id".to_string(), json!(key));
                }
            }
            records(content, options, &mut body);
            Reply::ok(body)
        }
        (Verb::Read, ResourceAddress::Job(_), NativeOutput::Job(job)) => {
            let mut body = job_item(&job);
            attach_warnings(&mut body, warnings(request, false, None));
            Reply::ok(body)
        }
        (Verb::Read, _, NativeOutput::Text(content)) => {
            let mut body = Map::new();
            data_set_context(target, &mut body);
            if options.return_etag {
                body.insert("etag".to_string(), json!(content_etag(&content)));
            }
            records(content, options, &mut body);
            attach_warnings(&mut body, warnings(request, false, None));
            Reply::ok(body)
        }

        // ─── Mutations ───
        (Verb::Write, ResourceAddress::UssPath { absolute_path }, NativeOutput::Etag(etag)) => {
            let mut body = Map::new();
            body.insert("success".to_string(), json!(true));
            body.insert("filePath".to_string(), json!(absolute_path));
            body.insert("etag".to_string(), json!(written_etag(request, etag)));
            if !options.etag_only {
                body.insert("message".to_string(), json!("File written successfully"));
            }
            attach_warnings(&mut body, warnings(request, false, None));
            Reply::ok(body)
        }
        (Verb::Write, _, NativeOutput::Etag(etag)) => {
            let mut body = Map::new();
            data_set_context(target, &mut body);
            body.insert("etag".to_string(), json!(written_etag(request, etag)));
            if !options.etag_only {
                body.insert("message".to_string(), json!("Data set written successfully"));
            }
            attach_warnings(&mut body, warnings(request, false, None));
            Reply::ok(body)
        }
        (Verb::Create, ResourceAddress::UssPath { absolute_path }, NativeOutput::Done) => {
            let mut body = Map::new();
            body.insert("success".to_string(), json!(true));
            body.insert("path".to_string(), json!(absolute_path));
            if let Payload::UssEntry { kind, mode } = &request.payload {
                body.insert("type".to_string(), json!(kind.as_str()));
                body.insert("mode".to_string(), json!(mode.as_str()));
                if let Some(symbolic) = mode.to_symbolic() {
                    body.insert("permissions".to_string(), json!(symbolic));
                }
            }
            Reply::created(body)
        }
        (Verb::Create, _, NativeOutput::Done) => {
            let mut body = Map::new();
            data_set_context(target, &mut body);
            let message = if target.member_name().is_some() {
                "Member created successfully"
            } else {
                "Data set created successfully"
            };
            body.insert("message".to_string(), json!(message));
            attach_warnings(&mut body, warnings(request, false, None));
            Reply::created(body)
        }
        (Verb::Delete, ResourceAddress::UssPath { absolute_path }, NativeOutput::Done) => {
            let mut body = Map::new();
            body.insert("success".to_string(), json!(true));
            body.insert("path".to_string(), json!(absolute_path));
            body.insert("recursive".to_string(), json!(options.recursive));
            Reply::ok(body)
        }
        (Verb::Delete, ResourceAddress::Job(job), NativeOutput::Done) => {
            let mut body = Map::new();
            job_context(job, &mut body);
            body.insert("success".to_string(), json!(true));
            body.insert(
                "message".to_string(),
                json!(format!("Job {} deleted successfully", job.native_id())),
            );
            Reply::ok(body)
        }
        (Verb::Delete, _, NativeOutput::Done) => {
            let mut body = Map::new();
            data_set_context(target, &mut body);
            let message = if target.member_name().is_some() {
                "Member deleted successfully"
            } else {
                "Data set deleted successfully"
            };
            body.insert("message".to_string(), json!(message));
            attach_warnings(&mut body, warnings(request, false, None));
            Reply::ok(body)
        }
        (
            Verb::Chmod | Verb::Chown | Verb::Chtag,
            ResourceAddress::UssPath { absolute_path },
            NativeOutput::Done,
        ) => {
            let mut body = Map::new();
            body.insert("success".to_string(), json!(true));
            body.insert("path".to_string(), json!(absolute_path));
            body.insert("operation".to_string(), json!(request.verb.to_string()));
            body.insert("recursive".to_string(), json!(options.recursive));
            match &request.payload {
                Payload::Mode(mode) => {
                    body.insert("mode".to_string(), json!(mode.as_str()));
                }
                Payload::Owner(owner) => {
                    body.insert("owner".to_string(), json!(owner));
                }
                Payload::Tag(tag) => {
                    body.insert("tag".to_string(), json!(tag));
                }
                _ => {}
            }
            Reply::ok(body)
        }
        (Verb::Submit, _, NativeOutput::JobId(jobid)) => {
            let mut body = Map::new();
            body.insert("jobid".to_string(), json!(jobid));
            body.insert("success".to_string(), json!(true));
            body.insert("message".to_string(), json!("Job submitted successfully"));
            Reply::created(body)
        }
        _ => return Err(unexpected(request)),
    };
    Ok(reply)
}

/// ETag reported for a write: the native one, or the content hash when the
/// native layer returned none.
fn written_etag(request: &OperationRequest, native: String) -> String {
    match (&request.payload, native.is_empty()) {
        (Payload::Content(data), true) => content_etag(data),
        _ => native,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::{self, QueryParams};

    fn query(pairs: &[(&str, &str)]) -> QueryParams {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn entries(names: &[&str]) -> Vec<DataSetEntry> {
        names.iter().map(|n| DataSetEntry::named(*n)).collect()
    }

    #[test]
    fn test_truncate_is_idempotent() {
        for len in 0..6 {
            for max in 1..6 {
                let mut items: Vec<usize> = (0..len).collect();
                let first = truncate(&mut items, Some(max));
                assert_eq!(first, len > max);
                let snapshot = items.clone();
                assert!(!truncate(&mut items, Some(max)));
                assert_eq!(items, snapshot);
                assert!(items.len() <= max);
            }
        }
        let mut items = vec![1, 2, 3];
        assert!(!truncate(&mut items, None));
        assert_eq!(items.len(), 3);
    }

    #[test]
    fn test_data_set_listing_names_only() {
        let req = normalize::list_data_sets(&query(&[("dslevel", "USER.TEST")])).unwrap();
        let output = NativeOutput::DataSets(vec![DataSetEntry {
            name: Some("USER.TEST.DATASET".to_string()),
            dsorg: Some("PS".to_string()),
            ..DataSetEntry::default()
        }]);
        let reply = build(&req, output).unwrap();
        assert_eq!(
            Value::Object(reply.body),
            json!({"items": [{"name": "USER.TEST.DATASET"}], "returnedRows": 1})
        );
    }

    #[test]
    fn test_data_set_listing_attribute_defaults() {
        let req = normalize::list_data_sets(&query(&[("dslevel", "USER"), ("attributes", "true")]))
            .unwrap();
        let reply = build(&req, NativeOutput::DataSets(entries(&["USER.A"]))).unwrap();
        assert_eq!(
            reply.body["items"][0],
            json!({"name": "USER.A", "dsorg": "", "volser": "", "recfm": "", "migr": false})
        );
    }

    #[test]
    fn test_truncation_then_emptiness_warning_order() {
        let req = normalize::list_data_sets(&query(&[
            ("dslevel", "USER"),
            ("max-entries", "2"),
            ("volser", "VOL001"),
        ]))
        .unwrap();
        let reply = build(&req, NativeOutput::DataSets(entries(&["A", "B", "C"]))).unwrap();
        assert_eq!(reply.body["returnedRows"], json!(2));
        assert_eq!(
            reply.body["warnings"],
            json!([
                "volser parameter provided but not supported by current native function",
                "results truncated"
            ])
        );

        let req = normalize::list_data_sets(&query(&[("dslevel", "USER")])).unwrap();
        let reply = build(&req, NativeOutput::DataSets(Vec::new())).unwrap();
        assert_eq!(reply.body["warnings"], json!(["no matching results found"]));
    }

    #[test]
    fn test_warn_false_keeps_only_gaps() {
        let gap = "start parameter provided but not supported by current native function";
        let req = normalize::list_data_sets(&query(&[
            ("dslevel", "USER"),
            ("max-entries", "1"),
            ("start", "X"),
            ("warn", "false"),
        ]))
        .unwrap();
        let reply = build(&req, NativeOutput::DataSets(entries(&["A", "B"]))).unwrap();
        assert_eq!(reply.body["warnings"], json!([gap]));
        let reply = build(&req, NativeOutput::DataSets(Vec::new())).unwrap();
        assert_eq!(reply.body["warnings"], json!([gap]));

        let req = normalize::list_data_sets(&query(&[
            ("dslevel", "USER"),
            ("max-entries", "1"),
            ("warn", "false"),
        ]))
        .unwrap();
        let reply = build(&req, NativeOutput::DataSets(entries(&["A", "B"]))).unwrap();
        assert!(!reply.body.contains_key("warnings"));
        let reply = build(&req, NativeOutput::DataSets(Vec::new())).unwrap();
        assert!(!reply.body.contains_key("warnings"));
    }

    #[test]
    fn test_gap_warnings_ignore_warn_on_read_and_uss_listing() {
        let req = normalize::read_data_set("-(VOL001)/USER.DATA", &query(&[("warn", "false")]))
            .unwrap();
        let reply = build(&req, NativeOutput::Text("x".to_string())).unwrap();
        assert_eq!(
            reply.body["warnings"],
            json!(["volser parameter provided but not supported by current native function"])
        );

        let req = normalize::list_uss(&query(&[
            ("path", "/tmp"),
            ("all", "true"),
            ("long", "true"),
            ("warn", "false"),
        ]))
        .unwrap();
        let reply = build(&req, NativeOutput::Text("a\n".to_string())).unwrap();
        assert_eq!(
            reply.body["warnings"],
            json!([
                "all parameter provided but not supported by current native function",
                "long parameter provided but not supported by current native function"
            ])
        );
    }

    #[test]
    fn test_read_formats_and_etag() {
        let req = normalize::read_data_set("USER.PDS(MEM)", &query(&[("return-etag", "true")]))
            .unwrap();
        let reply = build(&req, NativeOutput::Text("hello".to_string())).unwrap();
        assert_eq!(reply.body["records"], json!("hello"));
        assert_eq!(reply.body["format"], json!("text"));
        assert_eq!(reply.body["datasetName"], json!("USER.PDS"));
        assert_eq!(reply.body["memberName"], json!("MEM"));
        assert_eq!(reply.body["etag"], json!("5d41402abc4b2a76b9719d911017c592"));

        let req = normalize::read_data_set("USER.SEQ", &query(&[("response-format-bytes", "true")]))
            .unwrap();
        let reply = build(&req, NativeOutput::Text("hello".to_string())).unwrap();
        assert_eq!(reply.body["records"], json!([104, 101, 108, 108, 111]));
        assert_eq!(reply.body["format"], json!("bytes"));
        assert!(!reply.body.contains_key("etag"));
    }

    #[test]
    fn test_uss_read_etag_is_time_dependent() {
        // Same path and content, different second: different tag.
        let a = uss_read_etag("/tmp/a", "hello", 1_700_000_000);
        let b = uss_read_etag("/tmp/a", "hello", 1_700_000_001);
        assert_ne!(a, b);
        assert_eq!(a, content_etag("/tmp/a:5:1700000000"));
        // Content changes of equal length within one second keep the tag.
        assert_eq!(a, uss_read_etag("/tmp/a", "world", 1_700_000_000));
    }

    #[test]
    fn test_uss_listing_payload_forms() {
        assert_eq!(
            uss_items("a.txt\n\n  b  \n"),
            vec![
                json!({"name": "a.txt", "type": "unknown"}),
                json!({"name": "b", "type": "unknown"})
            ]
        );
        assert_eq!(
            uss_items(r#"[{"name":"x","type":"file"}]"#),
            vec![json!({"name": "x", "type": "file"})]
        );
        assert_eq!(uss_items(r#"{"name":"x"}"#), vec![json!({"name": "x"})]);
        assert!(uss_items("").is_empty());
    }

    #[test]
    fn test_uss_listing_envelope() {
        let req = normalize::list_uss(&query(&[("path", "/tmp"), ("long", "true")])).unwrap();
        let reply = build(&req, NativeOutput::Text("a\nb\n".to_string())).unwrap();
        assert_eq!(reply.body["returnedRows"], json!(2));
        assert_eq!(reply.body["format"], json!("long"));
        assert_eq!(reply.body["showHidden"], json!(false));
        assert_eq!(reply.body["path"], json!("/tmp"));
        assert_eq!(
            reply.body["warnings"],
            json!(["long parameter provided but not supported by current native function"])
        );
    }

    #[test]
    fn test_write_etag_only_omits_message() {
        let req = normalize::write_data_set("USER.SEQ", &query(&[("etag-only", "true")]), b"x")
            .unwrap();
        let reply = build(&req, NativeOutput::Etag("abc".to_string())).unwrap();
        assert_eq!(reply.body["etag"], json!("abc"));
        assert!(!reply.body.contains_key("message"));

        let req = normalize::write_data_set("USER.SEQ", &query(&[]), b"x").unwrap();
        let reply = build(&req, NativeOutput::Etag(String::new())).unwrap();
        assert_eq!(reply.body["etag"], json!(content_etag("x")));
        assert!(reply.body.contains_key("message"));
    }

    #[test]
    fn test_job_status_fields() {
        let req = normalize::get_job_resource("J0000001ZOS1", &query(&[])).unwrap();
        let job = JobEntry {
            jobname: Some("TESTJOB".to_string()),
            jobid: Some("JOB00001".to_string()),
            ..JobEntry::default()
        };
        let reply = build(&req, NativeOutput::Job(job)).unwrap();
        assert_eq!(reply.body["type"], json!("JOB"));
        assert_eq!(reply.body["job-correlator"], json!(""));
        assert_eq!(reply.body["retcode"], json!(""));
        assert_eq!(job_type("STC00042"), "STC");
        assert_eq!(job_type("TSU00001"), "TSU");
    }

    #[test]
    fn test_spool_read_context() {
        let req = normalize::get_job_resource("TESTJOB/JOB00001/files/JCL/records", &query(&[]))
            .unwrap();
        let reply = build(&req, NativeOutput::Text("//TESTJOB JOB".to_string())).unwrap();
        assert_eq!(reply.body["ddname"], json!("JCL"));
        assert_eq!(reply.body["type"], json!("JCL"));
        assert_eq!(reply.body["jobname"], json!("TESTJOB"));
        assert_eq!(reply.body["jobid"], json!("JOB00001"));

        let req = normalize::get_job_resource("J1/files/2/records", &query(&[])).unwrap();
        let reply = build(&req, NativeOutput::Text("x".to_string())).unwrap();
        assert_eq!(reply.body["id"], json!(2));
        assert_eq!(reply.body["job-correlator"], json!("J1"));
    }

    #[test]
    fn test_mismatched_output_is_an_error() {
        let req = normalize::list_jobs(&query(&[])).unwrap();
        assert!(build(&req, NativeOutput::Done).is_err());
    }
}
