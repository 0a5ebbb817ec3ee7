//! Modelo de Order (registro de producción)
//!
//! Una Order referencia exactamente una Quote aceptada y mantiene el
//! mapa de pasos de producción en una columna JSONB.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::collections::HashMap;
use uuid::Uuid;

/// Orden canónico de los pasos de producción. El JSONB no conserva orden,
/// así que la derivación de estado siempre recorre esta lista primero.
pub const PRODUCTION_STEP_ORDER: [&str; 5] = [
    "Fabric Inhoused",
    "Cutting",
    "Stitching",
    "Washing",
    "Finishing",
];

/// Registro de un paso de producción
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProductionStep {
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub started_on: Option<String>,
}

impl ProductionStep {
    pub fn pending() -> Self {
        Self {
            completed: false,
            started_on: None,
        }
    }
}

/// Mapa nombre de paso -> registro de paso
pub type ProductionSteps = HashMap<String, ProductionStep>;

/// Crear el mapa inicial de pasos, todos sin completar
pub fn initial_production_steps() -> ProductionSteps {
    PRODUCTION_STEP_ORDER
        .iter()
        .map(|name| (name.to_string(), ProductionStep::pending()))
        .collect()
}

/// Order principal - mapea exactamente a la tabla orders
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Order {
    pub id: Uuid,
    pub quote_id: Uuid,
    pub production_steps: Json<ProductionSteps>,
    pub created_at: DateTime<Utc>,
}
