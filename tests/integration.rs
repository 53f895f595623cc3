//! Integration tests for the Member Import Engine.
//!
//! This suite drives the full router the way a client would:
//! - validate reports (counts, error context, duplicate skips)
//! - execute streams (all-or-nothing, batch boundaries, terminal events)
//! - structural rejections shared by both endpoints
//! - CSV export filtering and quoting

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use member_import::api::{AppState, create_router};
use member_import::config::ImportConfig;
use member_import::store::InMemoryStore;

// =============================================================================
// Test Helpers
// =============================================================================

const BOUNDARY: &str = "integration-test-boundary";

const HEADER: &str = "DONMAN #,First Name,Mailchimp name,Surname,Pay type,Status,Type,Rights,Connected Name,Type2,Renewal Status,Date Last Paid,Month Last Paid,Notes,Update EPAS,Org/Foundation,TITLE,MAIL,ADDRESS,MOBILE";

fn create_test_router() -> (Router, Arc<InMemoryStore>) {
    let store = Arc::new(InMemoryStore::new());
    let state = AppState::new(store.clone(), ImportConfig::default());
    (create_router(state), store)
}

/// Builds a 20-column data row with sensible defaults.
fn data_row(id: u32, first: &str, surname: &str) -> String {
    format!(
        "{id},{first},,{surname},Annual,Active,Single,Paid,,Community,Renewed,15/03/2024,,,,,Ms,{first}@example.org,5 Smith St Mornington VIC 3931,0400111222"
    )
}

fn file_of(rows: &[String]) -> String {
    let mut file = String::from(HEADER);
    for row in rows {
        file.push('\n');
        file.push_str(row);
    }
    file
}

fn upload_request(uri: &str, content: &str) -> Request<Body> {
    let body = format!(
        "--{BOUNDARY}\r\n\
         Content-Disposition: form-data; name=\"file\"; filename=\"members.csv\"\r\n\
         Content-Type: text/csv\r\n\r\n\
         {content}\r\n\
         --{BOUNDARY}--\r\n"
    );
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "Content-Type",
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

async fn post_validate(router: Router, content: &str) -> (StatusCode, Value) {
    let response = router
        .oneshot(upload_request("/import/validate", content))
        .await
        .unwrap();
    let status = response.status();
    let json: Value = serde_json::from_str(&body_string(response).await).unwrap();
    (status, json)
}

/// Drains an execute response into (event name, payload) pairs.
async fn post_execute(router: Router, content: &str) -> Vec<(String, Value)> {
    let response = router
        .oneshot(upload_request("/import/execute", content))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_string(response).await;
    let mut events = Vec::new();
    let mut current = String::new();
    for line in body.lines() {
        if let Some(name) = line.strip_prefix("event: ") {
            current = name.trim().to_string();
        } else if let Some(data) = line.strip_prefix("data: ") {
            events.push((current.clone(), serde_json::from_str(data).unwrap()));
        }
    }
    events
}

// =============================================================================
// Validate mode
// =============================================================================

#[tokio::test]
async fn test_validate_reports_full_counts() {
    let (router, _) = create_test_router();
    let file = file_of(&[
        data_row(1, "Amy", "Archer"),
        "2,Bob,,Baker,Bimonthly,Active,Single,Paid,,Community,Renewed,,,,,,,,,".to_string(),
        data_row(3, "Cat", "Cooper"),
        data_row(3, "Cat", "Cooper"),
    ]);

    let (status, report) = post_validate(router, &file).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["totalRows"], 4);
    assert_eq!(report["validCount"], 2);
    assert_eq!(report["errorCount"], 1);
    assert_eq!(report["skippedCount"], 1);
    assert_eq!(report["skipped"][0]["donmanId"], 3);
    assert_eq!(report["skipped"][0]["reason"], "Duplicate within file");
}

#[tokio::test]
async fn test_validate_errors_carry_row_context() {
    let (router, _) = create_test_router();
    let file = file_of(&[
        "42,Jane,,Citizen,Bimonthly,Active,Single,Paid,,Community,Renewed,,,,,,,,,".to_string(),
    ]);

    let (_, report) = post_validate(router, &file).await;

    let error = &report["errors"][0];
    assert_eq!(error["row"], 2);
    assert_eq!(error["donmanId"], "42");
    assert_eq!(error["name"], "Jane Citizen");
    assert_eq!(error["field"], "PayType");
    assert_eq!(error["value"], "Bimonthly");
    assert_eq!(
        error["message"],
        "Invalid Pay type: 'Bimonthly'. Expected one of: Auto, Annual, NotApplicable."
    );
}

#[tokio::test]
async fn test_validate_collects_every_error_on_a_row() {
    let (router, _) = create_test_router();
    let file = file_of(&[
        "7,Amy,,Archer,???,???,???,???,,???,???,31/02/2024,,,,,,,,".to_string(),
    ]);

    let (_, report) = post_validate(router, &file).await;

    // Six enum fields plus the impossible date all fail on the one row.
    assert_eq!(report["errors"].as_array().unwrap().len(), 7);
    assert_eq!(report["errorCount"], 1);
}

#[tokio::test]
async fn test_validate_is_idempotent() {
    let (router, _) = create_test_router();
    let file = file_of(&[
        data_row(1, "Amy", "Archer"),
        "broken".to_string(),
        data_row(1, "Amy", "Archer"),
    ]);

    let (_, first) = post_validate(router.clone(), &file).await;
    let (_, second) = post_validate(router, &file).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn test_validate_does_not_persist() {
    let (router, store) = create_test_router();
    let file = file_of(&[data_row(1, "Amy", "Archer")]);

    post_validate(router, &file).await;

    assert!(store.members().is_empty());
}

#[tokio::test]
async fn test_validate_after_import_reports_database_duplicates() {
    let (router, _) = create_test_router();
    let file = file_of(&[data_row(7, "Amy", "Archer")]);

    let events = post_execute(router.clone(), &file).await;
    assert_eq!(events.last().unwrap().0, "complete");

    let (_, report) = post_validate(router, &file).await;
    assert_eq!(report["validCount"], 0);
    assert_eq!(report["skippedCount"], 1);
    assert_eq!(report["skipped"][0]["reason"], "Already exists in database");
}

// =============================================================================
// Execute mode
// =============================================================================

#[tokio::test]
async fn test_execute_imports_and_reports_completion() {
    let (router, store) = create_test_router();
    let file = file_of(&[
        data_row(1, "Amy", "Archer"),
        data_row(2, "Bob", "Baker"),
        data_row(3, "Cat", "Cooper"),
    ]);

    let events = post_execute(router, &file).await;

    assert_eq!(events.len(), 2);
    assert_eq!(events[0].0, "progress");
    assert_eq!(events[0].1["processed"], 3);
    assert_eq!(events[0].1["total"], 3);
    assert_eq!(events[1].0, "complete");
    assert_eq!(events[1].1["imported"], 3);
    assert_eq!(events[1].1["skipped"].as_array().unwrap().len(), 0);

    assert_eq!(store.members().len(), 3);
    assert_eq!(store.memberships().len(), 3);
    assert_eq!(store.links().len(), 3);
}

#[tokio::test]
async fn test_execute_batch_boundaries_at_fifty() {
    let (router, store) = create_test_router();
    let rows: Vec<String> = (1..=101).map(|i| data_row(i, "Amy", "Archer")).collect();

    let events = post_execute(router, &file_of(&rows)).await;

    let processed: Vec<u64> = events
        .iter()
        .filter(|(name, _)| name == "progress")
        .map(|(_, data)| data["processed"].as_u64().unwrap())
        .collect();
    assert_eq!(processed, vec![50, 100, 101]);
    assert_eq!(events.last().unwrap().1["imported"], 101);
    assert_eq!(store.members().len(), 101);
}

#[tokio::test]
async fn test_execute_is_all_or_nothing() {
    let (router, store) = create_test_router();
    let mut rows: Vec<String> = (1..=10).map(|i| data_row(i, "Amy", "Archer")).collect();
    rows.push("11,Bad,,Row,Bimonthly,Active,Single,Paid,,Community,Renewed,,,,,,,,,".to_string());

    let events = post_execute(router, &file_of(&rows)).await;

    assert_eq!(events.len(), 1);
    assert_eq!(events[0].0, "error");
    assert!(store.members().is_empty());
}

#[tokio::test]
async fn test_execute_never_trusts_a_prior_validate() {
    let (router, store) = create_test_router();
    let clean = file_of(&[data_row(1, "Amy", "Archer")]);
    let dirty = file_of(&[
        data_row(2, "Bob", "Baker"),
        "x,broken".to_string(),
    ]);

    // A clean validate does not grease the path for a dirty execute.
    let (status, _) = post_validate(router.clone(), &clean).await;
    assert_eq!(status, StatusCode::OK);

    let events = post_execute(router, &dirty).await;
    assert_eq!(events[0].0, "error");
    assert!(store.members().is_empty());
}

#[tokio::test]
async fn test_execute_skips_database_duplicates_on_reimport() {
    let (router, store) = create_test_router();
    let file = file_of(&[data_row(1, "Amy", "Archer"), data_row(2, "Bob", "Baker")]);

    let first = post_execute(router.clone(), &file).await;
    assert_eq!(first.last().unwrap().1["imported"], 2);

    let second = post_execute(router, &file).await;
    assert_eq!(second.len(), 1);
    assert_eq!(second[0].0, "complete");
    assert_eq!(second[0].1["imported"], 0);
    let skipped = second[0].1["skipped"].as_array().unwrap();
    assert_eq!(skipped.len(), 2);
    assert_eq!(skipped[0]["reason"], "Already exists in database");

    assert_eq!(store.members().len(), 2);
}

// =============================================================================
// Structural rejections
// =============================================================================

#[tokio::test]
async fn test_both_endpoints_reject_empty_files() {
    for uri in ["/import/validate", "/import/execute"] {
        let (router, _) = create_test_router();
        let response = router.oneshot(upload_request(uri, "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
    }
}

#[tokio::test]
async fn test_both_endpoints_reject_header_only_files() {
    for uri in ["/import/validate", "/import/execute"] {
        let (router, _) = create_test_router();
        let response = router.oneshot(upload_request(uri, HEADER)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "uri {uri}");
        let error: Value = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(error["code"], "FILE_TOO_SHORT");
    }
}

// =============================================================================
// Tab-delimited and quoted input
// =============================================================================

#[tokio::test]
async fn test_tab_delimited_file_imports() {
    let (router, store) = create_test_router();
    let file = format!(
        "{}\n{}",
        HEADER.replace(',', "\t"),
        data_row(1, "Amy", "Archer").replace(',', "\t")
    );

    let events = post_execute(router, &file).await;

    assert_eq!(events.last().unwrap().0, "complete");
    assert_eq!(store.members().len(), 1);
}

#[tokio::test]
async fn test_quoted_fields_survive_import_and_export() {
    let (router, store) = create_test_router();
    let row =
        "1,Amy,,Archer,Annual,Active,Single,Paid,,Community,Renewed,,,\"notes, with \"\"quotes\"\"\",,,Ms,amy@example.org,5 Smith St Mornington VIC 3931,0400111222"
            .to_string();
    let file = file_of(&[row]);

    let events = post_execute(router.clone(), &file).await;
    assert_eq!(events.last().unwrap().0, "complete");

    let member = &store.members()[0];
    assert_eq!(member.notes.as_deref(), Some("notes, with \"quotes\""));

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/export/csv")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let csv = body_string(response).await;
    assert!(csv.contains("\"notes, with \"\"quotes\"\"\""));
}

// =============================================================================
// Address decomposition through the full pipeline
// =============================================================================

#[tokio::test]
async fn test_address_is_decomposed_into_member_fields() {
    let (router, store) = create_test_router();
    let file = file_of(&[data_row(1, "Amy", "Archer")]);

    post_execute(router, &file).await;

    let member = &store.members()[0];
    assert_eq!(member.address_street.as_deref(), Some("5 Smith St"));
    assert_eq!(member.address_suburb.as_deref(), Some("Mornington"));
    assert_eq!(member.address_state.as_deref(), Some("VIC"));
    assert_eq!(member.address_postcode.as_deref(), Some("3931"));
}

// =============================================================================
// Export
// =============================================================================

#[tokio::test]
async fn test_export_filters_by_renewal_status() {
    let (router, _) = create_test_router();
    let to_renew =
        "1,Amy,,Archer,Annual,Active,Single,Paid,,Community,To Renew,,,,,,Ms,amy@example.org,,0400111222"
            .to_string();
    let renewed = data_row(2, "Bob", "Baker");
    let file = file_of(&[to_renew, renewed]);

    let events = post_execute(router.clone(), &file).await;
    assert_eq!(events.last().unwrap().1["imported"], 2);

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/export/csv?renewalStatus=ToRenew")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let csv = body_string(response).await;
    let data_lines: Vec<&str> = csv.lines().skip(1).collect();
    assert_eq!(data_lines.len(), 1);
    assert!(data_lines[0].contains("Amy"));
    assert!(data_lines[0].contains("ToRenew"));
}

#[tokio::test]
async fn test_export_search_is_case_insensitive() {
    let (router, _) = create_test_router();
    let file = file_of(&[data_row(1, "Amy", "Archer"), data_row(2, "Bob", "Baker")]);
    post_execute(router.clone(), &file).await;

    let response = router
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/export/csv?search=ARCHER")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let csv = body_string(response).await;
    assert_eq!(csv.lines().count(), 2);
    assert!(csv.contains("Archer"));
    assert!(!csv.contains("Baker"));
}
