//! Request normalization.
//!
//! Each function takes the raw pieces of one endpoint (path capture, query
//! string, body) and produces a validated [`OperationRequest`]. Nothing here
//! touches the native layer; a request that fails validation never reaches
//! the dispatcher.

use std::collections::HashMap;

use serde_json::{Map, Value};
use zos_native::DataSetAttributes;

use crate::address::{self, ResourceAddress};
use crate::mode;
use crate::types::error::RequestError;
use crate::types::request::{
    JclSource, OperationRequest, Options, Payload, UssEntryKind, Verb,
};

/// Decoded query string.
pub type QueryParams = HashMap<String, String>;

/// Longest accepted `dslevel`.
const MAX_DSLEVEL_LEN: usize = 44;

// ─── Query helpers ───

fn flag(query: &QueryParams, name: &str) -> bool {
    query
        .get(name)
        .is_some_and(|v| v.eq_ignore_ascii_case("true"))
}

fn present(query: &QueryParams, name: &str) -> bool {
    query.get(name).is_some_and(|v| !v.is_empty())
}

fn non_empty(query: &QueryParams, name: &str) -> Option<String> {
    query.get(name).filter(|v| !v.is_empty()).cloned()
}

/// `max-entries` applies only when it is all digits and positive.
pub fn parse_max_entries(raw: &str) -> Option<usize> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    match raw.parse::<usize>() {
        Ok(0) => None,
        Ok(n) => Some(n),
        Err(_) => Some(usize::MAX),
    }
}

/// Options common to every endpoint.
pub fn parse_options(query: &QueryParams) -> Options {
    Options {
        max_entries: query.get("max-entries").and_then(|v| parse_max_entries(v)),
        warn: query
            .get("warn")
            .map_or(true, |v| v.eq_ignore_ascii_case("true")),
        csv_format: flag(query, "response-format-csv"),
        bytes_format: flag(query, "response-format-bytes"),
        include_attributes: flag(query, "attributes"),
        encoding: non_empty(query, "encoding"),
        etag: non_empty(query, "etag"),
        etag_only: flag(query, "etag-only"),
        return_etag: flag(query, "return-etag"),
        recursive: flag(query, "recursive"),
        show_hidden: flag(query, "all"),
        long_format: flag(query, "long"),
    }
}

// ─── Body helpers ───

fn json_object(body: &[u8]) -> Option<Map<String, Value>> {
    match serde_json::from_slice(body) {
        Ok(Value::Object(map)) => Some(map),
        _ => None,
    }
}

fn string_field(map: &Map<String, Value>, name: &str) -> Option<String> {
    match map.get(name)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn records_text(records: &Value) -> Result<String, RequestError> {
    match records {
        Value::String(s) => Ok(s.clone()),
        Value::Array(values) => values
            .iter()
            .map(|v| {
                v.as_u64()
                    .and_then(|n| u8::try_from(n).ok())
                    .map(char::from)
                    .ok_or_else(|| {
                        RequestError::validation("records array must contain integers 0-255")
                    })
            })
            .collect(),
        _ => Err(RequestError::validation(
            "records must be a string or an array of integers",
        )),
    }
}

/// Write content: JSON `records` when the body is a JSON object, otherwise
/// the raw body text.
pub fn extract_content(body: &[u8]) -> Result<String, RequestError> {
    let text = match json_object(body) {
        Some(map) => match map.get("records") {
            Some(records) => records_text(records)?,
            None => String::new(),
        },
        None => String::from_utf8_lossy(body).into_owned(),
    };
    if text.is_empty() {
        return Err(RequestError::validation("body cannot be empty"));
    }
    Ok(text)
}

// ─── Data sets ───

/// `GET /zosmf/restfiles/ds?dslevel=...`
pub fn list_data_sets(query: &QueryParams) -> Result<OperationRequest, RequestError> {
    let dslevel = non_empty(query, "dslevel")
        .ok_or_else(|| RequestError::validation("dslevel parameter is required"))?;
    if dslevel.chars().count() > MAX_DSLEVEL_LEN {
        return Err(RequestError::validation(
            "data set pattern exceeds 44 character length limit",
        ));
    }
    Ok(
        OperationRequest::new(Verb::List, ResourceAddress::DataSetLevel { dslevel })
            .with_options(parse_options(query))
            .gap_if(present(query, "volser"), "volser")
            .gap_if(present(query, "start"), "start"),
    )
}

/// Pattern sent to the native listing for a `dslevel`.
pub fn dslevel_pattern(dslevel: &str) -> String {
    format!("{dslevel}.**")
}

/// `GET /zosmf/restfiles/ds/{name}/member`
pub fn list_members(raw: &str, query: &QueryParams) -> Result<OperationRequest, RequestError> {
    let target = address::parse_data_set(raw)?;
    if target.member_name().is_some() {
        return Err(RequestError::validation(
            "member listing requires a data set name without a member",
        ));
    }
    let on_volume = target.volume().is_some();
    Ok(OperationRequest::new(Verb::List, target)
        .with_options(parse_options(query))
        .gap_if(present(query, "volser") || on_volume, "volser")
        .gap_if(present(query, "start"), "start")
        .gap_if(present(query, "pattern"), "pattern"))
}

fn data_set_request(
    verb: Verb,
    raw: &str,
    query: &QueryParams,
) -> Result<OperationRequest, RequestError> {
    let target = address::parse_data_set(raw)?;
    let on_volume = target.volume().is_some();
    Ok(OperationRequest::new(verb, target)
        .with_options(parse_options(query))
        .gap_if(present(query, "volser") || on_volume, "volser"))
}

/// `GET /zosmf/restfiles/ds/{name}`
pub fn read_data_set(raw: &str, query: &QueryParams) -> Result<OperationRequest, RequestError> {
    data_set_request(Verb::Read, raw, query)
}

/// `PUT /zosmf/restfiles/ds/{name}`
pub fn write_data_set(
    raw: &str,
    query: &QueryParams,
    body: &[u8],
) -> Result<OperationRequest, RequestError> {
    let request = data_set_request(Verb::Write, raw, query)?;
    let content = extract_content(body)?;
    Ok(request.with_payload(Payload::Content(content)))
}

fn numeric_attribute(query: &QueryParams, name: &str) -> Result<Option<u32>, RequestError> {
    let Some(raw) = non_empty(query, name) else {
        return Ok(None);
    };
    if !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(RequestError::validation(format!("{name} must be a number")));
    }
    raw.parse()
        .map(Some)
        .map_err(|_| RequestError::validation(format!("{name} is out of range")))
}

/// Allocation attributes from `dsorg`, `recfm`, `lrecl`, ... query options.
pub fn parse_attributes(query: &QueryParams) -> Result<DataSetAttributes, RequestError> {
    Ok(DataSetAttributes {
        dsorg: non_empty(query, "dsorg").map(|v| v.to_ascii_uppercase()),
        recfm: non_empty(query, "recfm").map(|v| v.to_ascii_uppercase()),
        lrecl: numeric_attribute(query, "lrecl")?,
        blksize: numeric_attribute(query, "blksize")?,
        primary: numeric_attribute(query, "primary")?,
        secondary: numeric_attribute(query, "secondary")?,
        dirblk: numeric_attribute(query, "dirblk")?,
        alcunit: non_empty(query, "alcunit").map(|v| v.to_ascii_uppercase()),
    })
}

/// `POST /zosmf/restfiles/ds/{name}` allocates a data set; a member address
/// creates an empty member instead.
pub fn create_data_set(raw: &str, query: &QueryParams) -> Result<OperationRequest, RequestError> {
    let request = data_set_request(Verb::Create, raw, query)?;
    if request.target.member_name().is_some() {
        return Ok(request);
    }
    let attributes = parse_attributes(query)?;
    Ok(request.with_payload(Payload::Allocation(attributes)))
}

/// `DELETE /zosmf/restfiles/ds/{name}`
pub fn delete_data_set(raw: &str, query: &QueryParams) -> Result<OperationRequest, RequestError> {
    data_set_request(Verb::Delete, raw, query)
}

// ─── USS files ───

/// Path from the `path` query option, for the capture-less `/fs` routes.
pub fn query_path(query: &QueryParams) -> Result<String, RequestError> {
    non_empty(query, "path").ok_or_else(|| RequestError::validation("path parameter is required"))
}

/// `GET /zosmf/restfiles/fs?path=...`
pub fn list_uss(query: &QueryParams) -> Result<OperationRequest, RequestError> {
    let path = query_path(query)?;
    let options = parse_options(query);
    let (all, long) = (options.show_hidden, options.long_format);
    Ok(OperationRequest::new(Verb::List, ResourceAddress::UssDirectory { path })
        .with_options(options)
        .gap_if(all, "all")
        .gap_if(long, "long"))
}

fn uss_request(verb: Verb, raw: &str, query: &QueryParams) -> OperationRequest {
    OperationRequest::new(verb, address::parse_uss_path(raw)).with_options(parse_options(query))
}

/// `GET /zosmf/restfiles/fs/{path}`
pub fn read_uss(raw: &str, query: &QueryParams) -> Result<OperationRequest, RequestError> {
    Ok(uss_request(Verb::Read, raw, query).gap_if(present(query, "pipe-path"), "pipe-path"))
}

/// `PUT /zosmf/restfiles/fs/{path}`: a JSON `request` field selects chmod,
/// chown or chtag; anything else is file content.
pub fn put_uss(
    raw: &str,
    query: &QueryParams,
    body: &[u8],
) -> Result<OperationRequest, RequestError> {
    let Some(map) = json_object(body).filter(|m| m.contains_key("request")) else {
        let content = extract_content(body)?;
        return Ok(uss_request(Verb::Write, raw, query)
            .gap_if(present(query, "pipe-path"), "pipe-path")
            .with_payload(Payload::Content(content)));
    };

    let mut request = uss_request(Verb::Chmod, raw, query);
    if let Some(recursive) = map.get("recursive").and_then(Value::as_bool) {
        request.options.recursive = recursive;
    }

    match map.get("request").and_then(Value::as_str).unwrap_or_default() {
        "chmod" => {
            let raw_mode = string_field(&map, "mode")
                .ok_or_else(|| RequestError::validation("mode is required for chmod operation"))?;
            let mode = mode::to_octal(&raw_mode)?;
            request.verb = Verb::Chmod;
            Ok(request.with_payload(Payload::Mode(mode)))
        }
        "chown" => {
            let owner = string_field(&map, "owner")
                .ok_or_else(|| RequestError::validation("owner is required for chown operation"))?;
            request.verb = Verb::Chown;
            Ok(request.with_payload(Payload::Owner(owner)))
        }
        "chtag" => {
            let tag = string_field(&map, "tag")
                .or_else(|| string_field(&map, "codeset"))
                .ok_or_else(|| RequestError::validation("tag is required for chtag operation"))?;
            request.verb = Verb::Chtag;
            Ok(request.with_payload(Payload::Tag(tag)))
        }
        other => Err(RequestError::validation(format!(
            "unsupported request type '{other}'"
        ))),
    }
}

/// `POST /zosmf/restfiles/fs/{path}` with `{"type": "file"|"directory", "mode": ...}`.
pub fn create_uss(
    raw: &str,
    query: &QueryParams,
    body: &[u8],
) -> Result<OperationRequest, RequestError> {
    let map = json_object(body)
        .ok_or_else(|| RequestError::validation("request body must be a JSON object"))?;
    let kind = match map.get("type").and_then(Value::as_str) {
        Some("file") => UssEntryKind::File,
        Some("directory") | Some("dir") => UssEntryKind::Directory,
        _ => {
            return Err(RequestError::validation(
                "type must be 'file' or 'directory'",
            ))
        }
    };
    let raw_mode = string_field(&map, "mode").unwrap_or_else(|| kind.default_mode().to_string());
    let mode = mode::to_octal(&raw_mode)?;
    Ok(uss_request(Verb::Create, raw, query).with_payload(Payload::UssEntry { kind, mode }))
}

/// `DELETE /zosmf/restfiles/fs/{path}`
pub fn delete_uss(raw: &str, query: &QueryParams) -> Result<OperationRequest, RequestError> {
    Ok(uss_request(Verb::Delete, raw, query))
}

// ─── Jobs ───

/// `GET /zosmf/restjobs/jobs?owner=...`
pub fn list_jobs(query: &QueryParams) -> Result<OperationRequest, RequestError> {
    let owner = non_empty(query, "owner").unwrap_or_else(|| "*".to_string());
    Ok(OperationRequest::new(Verb::List, ResourceAddress::JobOwner { owner })
        .with_options(parse_options(query))
        .gap_if(present(query, "prefix"), "prefix"))
}

/// `GET /zosmf/restjobs/jobs/{...}`: job status, spool listing or spool content.
pub fn get_job_resource(raw: &str, query: &QueryParams) -> Result<OperationRequest, RequestError> {
    let target = address::parse_job_path(raw)?;
    let options = parse_options(query);
    let request = match target {
        ResourceAddress::Job(_) => {
            let step_data = query
                .get("step-data")
                .is_some_and(|v| v.eq_ignore_ascii_case("y"));
            OperationRequest::new(Verb::Read, target).gap_if(step_data, "step-data")
        }
        ResourceAddress::SpoolFiles(_) => OperationRequest::new(Verb::List, target),
        _ => OperationRequest::new(Verb::Read, target),
    };
    Ok(request.with_options(options))
}

/// `PUT /zosmf/restjobs/jobs`: inline JCL text, or JSON `{"dsn": ...}` / `{"file": ...}`.
pub fn submit_job(body: &[u8]) -> Result<OperationRequest, RequestError> {
    let required = || RequestError::validation("JCL content is required");
    let source = match json_object(body) {
        Some(map) => {
            if let Some(dsn) = string_field(&map, "dsn") {
                JclSource::DataSet(dsn)
            } else if let Some(file) = string_field(&map, "file") {
                JclSource::UssFile(address::absolute_uss_path(&file))
            } else {
                return Err(required());
            }
        }
        None => {
            let jcl = String::from_utf8_lossy(body);
            if jcl.trim().is_empty() {
                return Err(required());
            }
            JclSource::Inline(jcl.into_owned())
        }
    };
    Ok(OperationRequest::new(Verb::Submit, ResourceAddress::JobQueue)
        .with_payload(Payload::Jcl(source)))
}

/// `DELETE /zosmf/restjobs/jobs/{jobname}/{jobid}` or `/{correlator}`.
pub fn delete_job(raw: &str) -> Result<OperationRequest, RequestError> {
    match address::parse_job_path(raw)? {
        target @ ResourceAddress::Job(_) => Ok(OperationRequest::new(Verb::Delete, target)),
        _ => Err(RequestError::validation(
            "only jobs can be deleted; spool files are removed with their job",
        )),
    }
}
