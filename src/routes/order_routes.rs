use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use uuid::Uuid;

use crate::controllers::order_controller::OrderController;
use crate::dto::order_dto::{CreateOrderRequest, OrderResponse, UpdateStepRequest};
use crate::dto::quote_dto::ApiResponse;
use crate::state::AppState;
use crate::utils::errors::AppError;

pub fn create_order_router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_order))
        .route("/by-quote/:quote_id", get(get_order_by_quote))
        .route("/:id/steps/:step_name", put(update_production_step))
}

async fn create_order(
    State(state): State<AppState>,
    Json(request): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<ApiResponse<OrderResponse>>), AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.create(request).await?;
    Ok((StatusCode::CREATED, Json(response)))
}

/// GET /api/orders/by-quote/:quote_id - 404 si la quote aún no tiene order
async fn get_order_by_quote(
    State(state): State<AppState>,
    Path(quote_id): Path<Uuid>,
) -> Result<Json<OrderResponse>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.get_by_quote(quote_id).await?;
    Ok(Json(response))
}

async fn update_production_step(
    State(state): State<AppState>,
    Path((id, step_name)): Path<(Uuid, String)>,
    Json(request): Json<UpdateStepRequest>,
) -> Result<Json<ApiResponse<OrderResponse>>, AppError> {
    let controller = OrderController::new(state.pool.clone());
    let response = controller.update_step(id, &step_name, request).await?;
    Ok(Json(response))
}
