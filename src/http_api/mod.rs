use std::{net::SocketAddr, sync::Arc};

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::persistence::TableSnapshot;
use crate::timeline::Department;
use crate::{CapacityDataset, CapacityReport};

#[derive(Clone)]
pub struct AppState {
    dataset: Arc<RwLock<CapacityDataset>>,
}

impl AppState {
    pub fn new(dataset: CapacityDataset) -> Self {
        Self {
            dataset: Arc::new(RwLock::new(dataset)),
        }
    }

    pub fn with_shared(dataset: Arc<RwLock<CapacityDataset>>) -> Self {
        Self { dataset }
    }

    fn dataset(&self) -> Arc<RwLock<CapacityDataset>> {
        self.dataset.clone()
    }
}

#[derive(Debug, Serialize)]
struct ErrorBody<'a> {
    error: &'a str,
    message: String,
}

#[derive(Debug)]
enum ApiError {
    Invalid(String),
    Internal(String),
}

impl ApiError {
    fn invalid(message: impl Into<String>) -> Self {
        ApiError::Invalid(message.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::Invalid(message) => {
                let body = Json(ErrorBody {
                    error: "invalid_request",
                    message,
                });
                (StatusCode::BAD_REQUEST, body).into_response()
            }
            ApiError::Internal(message) => {
                let body = Json(ErrorBody {
                    error: "internal_error",
                    message,
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct ReportQuery {
    /// Anchor date for the rolling projection windows; defaults to the
    /// server's local date when omitted.
    as_of: Option<NaiveDate>,
}

impl ReportQuery {
    fn as_of(&self) -> NaiveDate {
        self.as_of
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/roster", get(get_roster).put(update_roster))
        .route("/projects", get(get_projects).put(update_projects))
        .route("/report", get(get_report))
        .route("/departments", get(get_departments))
        .with_state(state)
}

pub async fn serve(addr: SocketAddr, dataset: CapacityDataset) -> std::io::Result<()> {
    let state = AppState::new(dataset);
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await
}

async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

async fn get_roster(State(state): State<AppState>) -> Result<Json<TableSnapshot>, ApiError> {
    let dataset = state.dataset();
    let snapshot = {
        let guard = dataset.read();
        TableSnapshot::from_dataframe(guard.roster())
            .map_err(|err| ApiError::Internal(err.to_string()))?
    };
    Ok(Json(snapshot))
}

async fn update_roster(
    State(state): State<AppState>,
    Json(snapshot): Json<TableSnapshot>,
) -> Result<StatusCode, ApiError> {
    let table = snapshot
        .into_dataframe()
        .map_err(|err| ApiError::invalid(err.to_string()))?;
    let dataset = state.dataset();
    dataset.write().set_roster(table);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_projects(State(state): State<AppState>) -> Result<Json<TableSnapshot>, ApiError> {
    let dataset = state.dataset();
    let snapshot = {
        let guard = dataset.read();
        TableSnapshot::from_dataframe(guard.projects())
            .map_err(|err| ApiError::Internal(err.to_string()))?
    };
    Ok(Json(snapshot))
}

async fn update_projects(
    State(state): State<AppState>,
    Json(snapshot): Json<TableSnapshot>,
) -> Result<StatusCode, ApiError> {
    let table = snapshot
        .into_dataframe()
        .map_err(|err| ApiError::invalid(err.to_string()))?;
    let dataset = state.dataset();
    dataset.write().set_projects(table);
    Ok(StatusCode::NO_CONTENT)
}

async fn get_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Json<CapacityReport> {
    let dataset = state.dataset();
    let report = {
        let guard = dataset.read();
        guard.report(query.as_of())
    };
    Json(report)
}

async fn get_departments(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Json<Vec<Department>> {
    let dataset = state.dataset();
    let departments = {
        let guard = dataset.read();
        guard.report(query.as_of()).departments
    };
    Json(departments)
}
