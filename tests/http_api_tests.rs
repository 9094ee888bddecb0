#![cfg(feature = "http_api")]

use axum::{
    body::{self, Body},
    http::{Request, StatusCode},
};
use capacity_tool::{CapacityDataset, CapacityReport, TableSnapshot, http_api};
use serde_json::json;
use tower::util::ServiceExt;

fn new_router() -> axum::Router {
    let dataset = CapacityDataset::new();
    let state = http_api::AppState::new(dataset);
    http_api::router(state)
}

fn roster_snapshot() -> TableSnapshot {
    TableSnapshot {
        columns: vec!["Department".to_string(), "Name".to_string()],
        rows: vec![
            vec!["Engineering".to_string(), "Smith, John".to_string()],
            vec!["Product".to_string(), "Wilson, Lisa".to_string()],
        ],
    }
}

fn projects_snapshot() -> TableSnapshot {
    TableSnapshot {
        columns: vec![
            "Initiative".to_string(),
            "Planned Start Date".to_string(),
            "Planned End Quarter".to_string(),
            "Duration (Mth)".to_string(),
            "Project Manager".to_string(),
            "Project Manager Hours".to_string(),
            "Resource 1".to_string(),
            "Resource 1 Hours".to_string(),
        ],
        rows: vec![vec![
            "CRM Rollout".to_string(),
            "1/1/2026".to_string(),
            "2026, Q4".to_string(),
            "12".to_string(),
            "Smith, John".to_string(),
            "600".to_string(),
            "Wilson, Lisa".to_string(),
            "240".to_string(),
        ]],
    }
}

async fn put_json(app: &axum::Router, uri: &str, payload: &impl serde::Serialize) -> StatusCode {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(payload).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    response.status()
}

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = new_router();
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["status"], json!("ok"));
}

#[tokio::test]
async fn uploaded_tables_drive_the_report() {
    let app = new_router();

    assert_eq!(
        put_json(&app, "/roster", &roster_snapshot()).await,
        StatusCode::NO_CONTENT
    );
    assert_eq!(
        put_json(&app, "/projects", &projects_snapshot()).await,
        StatusCode::NO_CONTENT
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/report?as_of=2026-03-10")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let report: CapacityReport = serde_json::from_slice(&bytes).unwrap();

    assert_eq!(report.executive_summary.total_resources, 2);
    assert_eq!(report.executive_summary.total_allocated_hours, 840.0);
    assert_eq!(report.departments.len(), 2);
    assert_eq!(report.departments[0].name, "Engineering");
    assert_eq!(report.departments[0].allocated_hours, 600.0);
    assert_eq!(report.departments[0].monthly_projections[0].period, "Mar 2026");
    assert_eq!(
        report.departments[0].monthly_projections[0].allocated_hours,
        50.0
    );
}

#[tokio::test]
async fn uploaded_roster_reads_back_verbatim() {
    let app = new_router();
    let snapshot = roster_snapshot();
    assert_eq!(
        put_json(&app, "/roster", &snapshot).await,
        StatusCode::NO_CONTENT
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/roster")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let fetched: TableSnapshot = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(fetched, snapshot);
}

#[tokio::test]
async fn oversized_rows_are_rejected() {
    let app = new_router();
    let bad = TableSnapshot {
        columns: vec!["Department".to_string()],
        rows: vec![vec!["Engineering".to_string(), "extra cell".to_string()]],
    };

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri("/roster")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_vec(&bad).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let payload: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(payload["error"], json!("invalid_request"));
}
