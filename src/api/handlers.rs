//! API request handlers
//!
//! Handlers for the dataset endpoints and the static pages.

use std::path::Path as FsPath;
use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{multipart::MultipartError, rejection::JsonRejection, Multipart, Path, Request, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use tower::ServiceExt;
use tower_http::services::ServeDir;
use tracing::{error, warn};
use uuid::Uuid;

use super::server::AppState;
use crate::error::TabulaError;
use crate::types::{DatasetState, Record};

/// Multipart field carrying the spreadsheet
pub const FILE_FIELD: &str = "excelFile";

/// Multipart field carrying the target category
pub const CATEGORY_FIELD: &str = "category";

/// Standard API response wrapper
#[derive(Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub request_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            request_id: Uuid::new_v4().to_string(),
            data: Some(data),
            error: None,
        }
    }

    pub fn err(message: impl Into<String>) -> Self {
        Self {
            success: false,
            request_id: Uuid::new_v4().to_string(),
            data: None,
            error: Some(message.into()),
        }
    }
}

impl IntoResponse for TabulaError {
    fn into_response(self) -> Response {
        let status = if self.is_client_error() {
            warn!(error = %self, "request rejected");
            StatusCode::BAD_REQUEST
        } else {
            error!(error = %self, "request failed");
            StatusCode::INTERNAL_SERVER_ERROR
        };
        (status, Json(ApiResponse::<()>::err(self.to_string()))).into_response()
    }
}

fn upload_error(e: MultipartError) -> TabulaError {
    TabulaError::Upload(e.body_text())
}

/// Unwrap a JSON body, turning axum's plain-text rejection into an enveloped 400
fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, TabulaError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| TabulaError::InvalidBody(rejection.body_text()))
}

/// Health check response
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_message: String,
}

/// GET /health - Health check
pub async fn health() -> impl IntoResponse {
    Json(ApiResponse::ok(HealthResponse {
        status: "healthy".to_string(),
        uptime_message: "Server is running".to_string(),
    }))
}

/// Version response
#[derive(Serialize)]
pub struct VersionResponse {
    pub version: String,
    pub features: Vec<String>,
}

/// GET /version - Server version
pub async fn version(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ApiResponse::ok(VersionResponse {
        version: state.version.clone(),
        features: vec![
            "upload".to_string(),
            "add-data".to_string(),
            "get-headers".to_string(),
            "get-data".to_string(),
            "update-categories".to_string(),
        ],
    }))
}

/// Response for any operation that rewrites a dataset
#[derive(Serialize, Default)]
pub struct DatasetResponse {
    pub category: String,
    pub message: String,
    pub count: usize,
    pub data: Vec<Record>,
}

impl DatasetResponse {
    fn saved(category: String, data: Vec<Record>) -> Self {
        Self {
            message: format!("Records saved to {}.json", category),
            count: data.len(),
            category,
            data,
        }
    }
}

/// POST /upload - Import a spreadsheet into a category (multipart)
pub async fn upload(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ApiResponse<DatasetResponse>>, TabulaError> {
    let mut file: Option<Bytes> = None;
    let mut category: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(upload_error)? {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some(FILE_FIELD) => file = Some(field.bytes().await.map_err(upload_error)?),
            Some(CATEGORY_FIELD) => category = Some(field.text().await.map_err(upload_error)?),
            _ => {}
        }
    }

    let file = file.ok_or(TabulaError::MissingInput(FILE_FIELD))?;
    let category = category.ok_or(TabulaError::MissingInput(CATEGORY_FIELD))?;

    // Parsing is CPU-bound, keep it off the async workers
    let worker_state = Arc::clone(&state);
    let worker_category = category.clone();
    let data = tokio::task::spawn_blocking(move || {
        worker_state
            .service
            .import_workbook(&worker_category, &file)
    })
    .await
    .map_err(|e| TabulaError::Server(format!("import task failed: {}", e)))??;

    Ok(Json(ApiResponse::ok(DatasetResponse::saved(category, data))))
}

/// Manual entry request
#[derive(Deserialize)]
pub struct AddDataRequest {
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default, rename = "formData")]
    pub form_data: Option<Record>,
}

/// POST /api/add-data - Put one record at the front of a category
pub async fn add_data(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<AddDataRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<DatasetResponse>>, TabulaError> {
    let req = json_body(payload)?;
    let category = req
        .category
        .filter(|c| !c.is_empty())
        .ok_or(TabulaError::MissingInput("category"))?;
    let record = req.form_data.ok_or(TabulaError::MissingInput("formData"))?;

    // Shares the category lock with uploads, so wait for it off the async workers
    let worker_state = Arc::clone(&state);
    let worker_category = category.clone();
    let data = tokio::task::spawn_blocking(move || {
        worker_state.service.add_single(&worker_category, record)
    })
    .await
    .map_err(|e| TabulaError::Server(format!("add task failed: {}", e)))??;

    Ok(Json(ApiResponse::ok(DatasetResponse::saved(category, data))))
}

/// Field listing response
#[derive(Serialize)]
pub struct HeadersResponse {
    pub headers: Vec<String>,
    pub message: String,
    pub state: DatasetState,
}

/// GET /api/get-headers/:category - Fields of the first stored record
pub async fn get_headers(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<HeadersResponse>>, TabulaError> {
    let listing = state.service.list_fields(&category)?;
    Ok(Json(ApiResponse::ok(HeadersResponse {
        message: listing.message(),
        headers: listing.fields,
        state: listing.state,
    })))
}

/// GET /api/get-data/:category - Every stored record
pub async fn get_data(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
) -> Result<Json<ApiResponse<Vec<Record>>>, TabulaError> {
    let records = state.service.fetch_all(&category)?;
    Ok(Json(ApiResponse::ok(records)))
}

/// Category list update request
#[derive(Deserialize)]
pub struct CategoriesRequest {
    pub categories: Vec<String>,
}

#[derive(Serialize)]
pub struct CategoriesResponse {
    pub message: String,
    pub categories: Vec<String>,
}

/// POST /api/update-categories - Replace the registered categories
pub async fn update_categories(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CategoriesRequest>, JsonRejection>,
) -> Result<Json<ApiResponse<CategoriesResponse>>, TabulaError> {
    let req = json_body(payload)?;
    state.registry.replace(req.categories);
    Ok(Json(ApiResponse::ok(CategoriesResponse {
        message: "Categories updated".to_string(),
        categories: state.registry.list(),
    })))
}

async fn serve_page(public_dir: &FsPath, page: &str, status: StatusCode) -> Response {
    match tokio::fs::read_to_string(public_dir.join(page)).await {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            warn!(page, error = %e, "page unavailable");
            (StatusCode::NOT_FOUND, "Not Found").into_response()
        }
    }
}

/// GET / - Upload page
pub async fn index_page(State(state): State<Arc<AppState>>) -> Response {
    serve_page(&state.public_dir, "index.html", StatusCode::OK).await
}

/// GET /:category - Data page for registered categories, static files otherwise
pub async fn category_page(
    State(state): State<Arc<AppState>>,
    Path(category): Path<String>,
    request: Request,
) -> Response {
    if state.registry.contains(&category) {
        serve_page(&state.public_dir, "data.html", StatusCode::OK).await
    } else {
        static_or_not_found(State(state), request).await
    }
}

/// Fallback - static file from the public directory, or the 404 page
pub async fn static_or_not_found(State(state): State<Arc<AppState>>, request: Request) -> Response {
    match ServeDir::new(&state.public_dir).oneshot(request).await {
        Ok(response) if response.status() != StatusCode::NOT_FOUND => response.into_response(),
        _ => serve_page(&state.public_dir, "404.html", StatusCode::NOT_FOUND).await,
    }
}
