//! Data set REST API integration tests.
//!
//! Drive the `/zosmf/restfiles/ds` endpoints through the Axum router the way
//! `zowe zos-files` commands would, and check both the response envelope and
//! the exact native calls made.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use serde_json::json;
use zos_native::{content_etag, DataSetEntry};

use common::{get, router, send, RecordingBackend};

// ─── Listing ───

#[tokio::test]
async fn test_list_datasets_names_only() {
    let backend = Arc::new(RecordingBackend::new().with_data_sets(vec![DataSetEntry {
        name: Some("USER.TEST.DATASET".to_string()),
        dsorg: Some("PS".to_string()),
        volser: Some("VOL001".to_string()),
        ..DataSetEntry::default()
    }]));
    let app = router(backend.clone());

    let (status, body) = get(&app, "/zosmf/restfiles/ds?dslevel=USER.TEST").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"items": [{"name": "USER.TEST.DATASET"}], "returnedRows": 1})
    );
    assert_eq!(backend.calls(), vec![r#"list_data_sets("USER.TEST.**")"#]);
}

#[tokio::test]
async fn test_list_datasets_validation_makes_no_call() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());

    let (status, body) = get(&app, "/zosmf/restfiles/ds").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "dslevel parameter is required");
    assert_eq!(body["details"], "dslevel parameter is required");

    let uri = format!("/zosmf/restfiles/ds?dslevel={}", "A".repeat(45));
    let (status, body) = get(&app, &uri).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "data set pattern exceeds 44 character length limit");

    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_list_datasets_truncation_and_gaps() {
    let entries = ["USER.A", "USER.B", "USER.C"]
        .into_iter()
        .map(DataSetEntry::named)
        .collect();
    let backend = Arc::new(RecordingBackend::new().with_data_sets(entries));
    let app = router(backend);

    let (status, body) = get(
        &app,
        "/zosmf/restfiles/ds?dslevel=USER&max-entries=2&start=USER.B&attributes=true",
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returnedRows"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["items"][0]["dsorg"], "");
    assert_eq!(body["items"][0]["migr"], false);
    assert_eq!(
        body["warnings"],
        json!([
            "start parameter provided but not supported by current native function",
            "results truncated"
        ])
    );
}

#[tokio::test]
async fn test_list_datasets_empty_result_warns() {
    let app = router(Arc::new(RecordingBackend::new()));

    let (status, body) = get(&app, "/zosmf/restfiles/ds?dslevel=NOBODY").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returnedRows"], 0);
    assert_eq!(body["warnings"], json!(["no matching results found"]));

    let (_, body) = get(&app, "/zosmf/restfiles/ds?dslevel=NOBODY&warn=false").await;
    assert!(body.get("warnings").is_none());
}

// ─── Content ───

#[tokio::test]
async fn test_member_write_call_arguments() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());

    let (status, _) = send(&app, "POST", "/zosmf/restfiles/ds/USER.TEST.PDS?dsorg=PO", "").await;
    assert_eq!(status, StatusCode::CREATED);
    backend.clear();

    let (status, body) = send(
        &app,
        "PUT",
        "/zosmf/restfiles/ds/USER.TEST.PDS(MEMBER01)",
        r#"{"records":"X"}"#,
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        backend.calls(),
        vec![r#"write_data_set("USER.TEST.PDS(MEMBER01)", "X", "", "")"#]
    );
    assert_eq!(body["datasetName"], "USER.TEST.PDS");
    assert_eq!(body["memberName"], "MEMBER01");
    assert_eq!(body["etag"], content_etag("X"));
    assert_eq!(body["message"], "Data set written successfully");
}

#[tokio::test]
async fn test_write_read_round_trip_text_and_bytes() {
    let app = router(Arc::new(RecordingBackend::new()));

    let (status, body) = send(&app, "POST", "/zosmf/restfiles/ds/USER.SEQ", "").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Data set created successfully");
    assert_eq!(body["datasetName"], "USER.SEQ");

    let (status, _) = send(&app, "PUT", "/zosmf/restfiles/ds/USER.SEQ", "Hi!").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = get(&app, "/zosmf/restfiles/ds/USER.SEQ?return-etag=true").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], "Hi!");
    assert_eq!(body["format"], "text");
    assert_eq!(body["etag"], content_etag("Hi!"));

    let (_, body) = get(&app, "/zosmf/restfiles/ds/USER.SEQ?response-format-bytes=true").await;
    assert_eq!(body["records"], json!([72, 105, 33]));
    assert_eq!(body["format"], "bytes");

    // Writing the byte form back yields the same text.
    let bytes = r#"{"records":[72,105,33]}"#;
    let (status, _) = send(&app, "PUT", "/zosmf/restfiles/ds/USER.SEQ", bytes).await;
    assert_eq!(status, StatusCode::OK);
    let (_, body) = get(&app, "/zosmf/restfiles/ds/USER.SEQ").await;
    assert_eq!(body["records"], "Hi!");
}

#[tokio::test]
async fn test_write_rejects_empty_body() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());

    let (status, body) = send(&app, "PUT", "/zosmf/restfiles/ds/USER.SEQ", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "body cannot be empty");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_volume_prefix_warns_and_is_dropped() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());
    send(&app, "POST", "/zosmf/restfiles/ds/USER.DATA", "").await;
    send(&app, "PUT", "/zosmf/restfiles/ds/USER.DATA", "abc").await;
    backend.clear();

    let (status, body) = get(&app, "/zosmf/restfiles/ds/-(VOL001)/USER.DATA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["records"], "abc");
    assert_eq!(
        body["warnings"],
        json!(["volser parameter provided but not supported by current native function"])
    );
    assert_eq!(backend.calls(), vec![r#"read_data_set("USER.DATA", "")"#]);

    let (_, body) = get(&app, "/zosmf/restfiles/ds/-(VOL001)/USER.DATA?warn=false").await;
    assert_eq!(
        body["warnings"],
        json!(["volser parameter provided but not supported by current native function"])
    );
}

// ─── Members and deletion ───

#[tokio::test]
async fn test_member_listing_on_volume_warns() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());
    send(&app, "POST", "/zosmf/restfiles/ds/USER.PDS?dsorg=PO", "").await;
    backend.clear();

    let (status, body) = get(&app, "/zosmf/restfiles/ds/-(VOL001)/USER.PDS/member").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body["warnings"],
        json!([
            "volser parameter provided but not supported by current native function",
            "no members found"
        ])
    );
    assert_eq!(backend.calls(), vec![r#"list_members("USER.PDS")"#]);

    let (_, body) = get(&app, "/zosmf/restfiles/ds/-(VOL001)/USER.PDS/member?warn=false").await;
    assert_eq!(
        body["warnings"],
        json!(["volser parameter provided but not supported by current native function"])
    );
}

#[tokio::test]
async fn test_member_lifecycle() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());
    send(&app, "POST", "/zosmf/restfiles/ds/USER.PDS?dsorg=PO&dirblk=5", "").await;

    let (status, body) = get(&app, "/zosmf/restfiles/ds/USER.PDS/member").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["returnedRows"], 0);
    assert_eq!(body["warnings"], json!(["no members found"]));

    let (status, body) = send(&app, "POST", "/zosmf/restfiles/ds/USER.PDS/NEWMEM", "").await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["message"], "Member created successfully");
    assert_eq!(body["memberName"], "NEWMEM");

    let (_, body) = get(&app, "/zosmf/restfiles/ds/USER.PDS/member").await;
    assert_eq!(body["items"], json!([{"name": "NEWMEM"}]));
    assert_eq!(body["datasetName"], "USER.PDS");

    let (status, body) = send(&app, "DELETE", "/zosmf/restfiles/ds/USER.PDS(NEWMEM)", "").await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["message"].as_str().unwrap().contains("deleted"));
    assert_eq!(body["memberName"], "NEWMEM");

    let (status, body) = send(&app, "DELETE", "/zosmf/restfiles/ds/USER.PDS", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Data set deleted successfully");
    assert!(body.get("memberName").is_none());

    assert!(backend
        .calls()
        .contains(&r#"create_member("USER.PDS(NEWMEM)")"#.to_string()));
}

#[tokio::test]
async fn test_native_failure_is_500() {
    let backend = Arc::new(RecordingBackend::failing("catalog unavailable"));
    let app = router(backend.clone());

    let (status, body) = get(&app, "/zosmf/restfiles/ds?dslevel=USER").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        body["error"],
        "could not list data set: 'USER' - catalog unavailable"
    );
    assert_eq!(body["details"], "catalog unavailable");
    assert_eq!(backend.calls().len(), 1);
}

#[tokio::test]
async fn test_malformed_member_is_400() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());

    let (status, _) = get(&app, "/zosmf/restfiles/ds/USER.PDS(BAD").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn test_slash_member_with_bad_data_set_is_400() {
    let backend = Arc::new(RecordingBackend::new());
    let app = router(backend.clone());

    for uri in [
        "/zosmf/restfiles/ds/USER.PDS(MEM)/X",
        "/zosmf/restfiles/ds/-(V1)/-(V2)/X",
    ] {
        let (status, body) = send(&app, "PUT", uri, r#"{"records":"x"}"#).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["error"], body["details"]);
        let (status, _) = send(&app, "POST", uri, "").await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
    }
    assert!(backend.calls().is_empty());
}
