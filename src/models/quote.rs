//! Modelo de Quote (solicitud de fabricación)
//!
//! Este módulo contiene el struct Quote y sus variantes para el flujo RFQ.
//! Mapea exactamente al schema PostgreSQL con primary key 'id'.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Código humano por defecto asignado a cada quote
pub const DEFAULT_QUOTE_CODE: &str = "234NT123";

/// Comentario por defecto. Se fija en la creación aunque la quote todavía
/// esté Pending; comportamiento heredado del flujo de revisión RFQ.
pub const DEFAULT_QUOTE_COMMENTS: &str = "Sorry, We can not process your order.";

/// Estado de la quote - almacenado como TEXT en la tabla quotes
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum QuoteStatus {
    Pending,
    Accepted,
    Rejected,
}

impl QuoteStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            QuoteStatus::Pending => "Pending",
            QuoteStatus::Accepted => "Accepted",
            QuoteStatus::Rejected => "Rejected",
        }
    }

    pub fn parse(value: &str) -> Option<QuoteStatus> {
        match value {
            "Pending" => Some(QuoteStatus::Pending),
            "Accepted" => Some(QuoteStatus::Accepted),
            "Rejected" => Some(QuoteStatus::Rejected),
            _ => None,
        }
    }
}

/// Quote principal - mapea exactamente a la tabla quotes
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Quote {
    pub id: Uuid,
    pub shipping_address: String,
    pub quantity: i32,
    pub lead_time: String,
    pub target_price: Decimal,
    pub fabric_composition: String,
    pub gsm: String,
    pub order_notes: Option<String>,
    pub order_sample: bool,
    pub sample_count: i32,
    pub code: String,
    pub status: String,
    pub comments: String,
    pub techpack_file: Option<String>,
    pub product_images_files: Vec<String>,
    pub color_swatch_files: Vec<String>,
    pub fabric_files: Vec<String>,
    pub miscellaneous_files: Vec<String>,
    pub created_at: DateTime<Utc>,
}

/// Campos validados para crear una nueva quote. Las referencias de archivos
/// ya vienen clasificadas por el servicio de ingesta; aquí solo viajan URLs
/// del content store, nunca binarios.
#[derive(Debug, Clone)]
pub struct NewQuote {
    pub shipping_address: String,
    pub quantity: i32,
    pub lead_time: String,
    pub target_price: Decimal,
    pub fabric_composition: String,
    pub gsm: String,
    pub order_notes: Option<String>,
    pub order_sample: bool,
    pub sample_count: i32,
    pub techpack_file: Option<String>,
    pub product_images_files: Vec<String>,
    pub color_swatch_files: Vec<String>,
    pub fabric_files: Vec<String>,
    pub miscellaneous_files: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote_status_roundtrip() {
        for status in [QuoteStatus::Pending, QuoteStatus::Accepted, QuoteStatus::Rejected] {
            assert_eq!(QuoteStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(QuoteStatus::parse("Approved"), None);
    }
}
