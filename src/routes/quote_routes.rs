use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use std::collections::HashMap;
use uuid::Uuid;

use crate::controllers::quote_controller::QuoteController;
use crate::controllers::tracking_controller::TrackingController;
use crate::dto::quote_dto::{ApiResponse, QuoteResponse, UpdateQuoteStatusRequest};
use crate::dto::tracking_dto::TrackingResponse;
use crate::services::file_ingestion_service::FilePart;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_quote_router() -> Router<AppState> {
    Router::new()
        .route("/", post(submit_quote))
        .route("/", get(list_quotes))
        .route("/accepted-with-tracking", get(accepted_with_tracking))
        .route("/:id", get(get_quote))
        .route("/:id/status", put(update_quote_status))
}

/// POST /api/quotes - formulario multipart con escalares + archivos.
/// Los parts con filename son archivos para el clasificador; el resto son
/// campos de texto.
async fn submit_quote(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<QuoteResponse>>), AppError> {
    let mut fields: HashMap<String, String> = HashMap::new();
    let mut file_parts: Vec<FilePart> = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("Malformed multipart body: {}", e)))?
    {
        let field_name = field.name().unwrap_or_default().to_string();

        if field.file_name().is_some() {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(format!("Could not read file part: {}", e)))?;
            file_parts.push(FilePart {
                field_name,
                bytes: bytes.to_vec(),
            });
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| AppError::BadRequest(format!("Could not read form field: {}", e)))?;
            fields.insert(field_name, value);
        }
    }

    let controller = QuoteController::new(state.pool.clone(), state.config.max_upload_bytes);
    let response = controller
        .submit(state.content_store.as_ref(), fields, file_parts)
        .await?;

    Ok((StatusCode::CREATED, Json(response)))
}

async fn list_quotes(
    State(state): State<AppState>,
) -> Result<Json<Vec<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(state.pool.clone(), state.config.max_upload_bytes);
    let response = controller.list_all().await?;
    Ok(Json(response))
}

/// GET /api/quotes/accepted-with-tracking - vista compuesta del dashboard
async fn accepted_with_tracking(
    State(state): State<AppState>,
) -> Result<Json<TrackingResponse>, AppError> {
    let controller = TrackingController::new(state.pool.clone());
    let response = controller.list_tracked_quotes().await?;
    Ok(Json(response))
}

async fn get_quote(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<QuoteResponse>, AppError> {
    let controller = QuoteController::new(state.pool.clone(), state.config.max_upload_bytes);
    let response = controller.get_by_id(id).await?;
    Ok(Json(response))
}

async fn update_quote_status(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<UpdateQuoteStatusRequest>,
) -> Result<Json<ApiResponse<QuoteResponse>>, AppError> {
    let controller = QuoteController::new(state.pool.clone(), state.config.max_upload_bytes);
    let response = controller.update_status(id, request).await?;
    Ok(Json(response))
}
