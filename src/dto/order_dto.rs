//! DTOs del flujo de orders (registro de producción)

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::models::order::{Order, ProductionSteps};

/// Request para crear una order asociada a una quote aceptada
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub quote_id: Uuid,
}

/// Request para actualizar un paso de producción
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateStepRequest {
    pub completed: bool,

    #[validate(length(max = 100))]
    pub started_on: Option<String>,
}

/// Response de order para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderResponse {
    pub id: String,
    pub quote_id: String,
    pub production_steps: ProductionSteps,
    pub created_at: String,
}

impl From<Order> for OrderResponse {
    fn from(order: Order) -> Self {
        Self {
            id: order.id.to_string(),
            quote_id: order.quote_id.to_string(),
            production_steps: order.production_steps.0,
            created_at: order.created_at.to_rfc3339(),
        }
    }
}
