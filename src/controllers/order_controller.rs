use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

use crate::dto::order_dto::{CreateOrderRequest, OrderResponse, UpdateStepRequest};
use crate::dto::quote_dto::ApiResponse;
use crate::models::order::initial_production_steps;
use crate::models::quote::QuoteStatus;
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::utils::errors::{not_found_error, AppError};

pub struct OrderController {
    orders: OrderRepository,
    quotes: QuoteRepository,
}

impl OrderController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            orders: OrderRepository::new(pool.clone()),
            quotes: QuoteRepository::new(pool),
        }
    }

    /// Crear el registro de producción para una quote aceptada. A lo sumo
    /// una order por quote.
    pub async fn create(
        &self,
        request: CreateOrderRequest,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        let quote = self
            .quotes
            .find_by_id(request.quote_id)
            .await?
            .ok_or_else(|| not_found_error("Quote", &request.quote_id.to_string()))?;

        if quote.status != QuoteStatus::Accepted.as_str() {
            return Err(AppError::BadRequest(
                "An order can only be created for an accepted quote".to_string(),
            ));
        }

        if self.orders.find_by_quote_id(request.quote_id).await?.is_some() {
            return Err(AppError::BadRequest(
                "An order already exists for this quote".to_string(),
            ));
        }

        let order = self
            .orders
            .create(request.quote_id, initial_production_steps())
            .await?;

        Ok(ApiResponse::success_with_message(
            order.into(),
            "Order created".to_string(),
        ))
    }

    /// Lookup por quote id; la ausencia es un 404, no un fallo del sistema
    pub async fn get_by_quote(&self, quote_id: Uuid) -> Result<OrderResponse, AppError> {
        let order = self
            .orders
            .find_by_quote_id(quote_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Order not found for this quote".to_string()))?;

        Ok(order.into())
    }

    pub async fn update_step(
        &self,
        order_id: Uuid,
        step_name: &str,
        request: UpdateStepRequest,
    ) -> Result<ApiResponse<OrderResponse>, AppError> {
        request
            .validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        let order = self
            .orders
            .update_step(order_id, step_name, request.completed, request.started_on)
            .await?;

        Ok(ApiResponse::success_with_message(
            order.into(),
            format!("Production step '{}' updated", step_name),
        ))
    }
}
