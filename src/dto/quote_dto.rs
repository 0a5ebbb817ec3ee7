//! DTOs del flujo de quotes
//!
//! Los nombres de campo camelCase son el contrato estable que consume el
//! dashboard; los ids y timestamps viajan como strings opacos / ISO-8601.

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::quote::Quote;

/// Response genérica
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: Option<String>,
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    pub fn success_with_message(data: T, message: String) -> Self {
        Self {
            success: true,
            message: Some(message),
            data: Some(data),
        }
    }
}

/// Response de quote para la API
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteResponse {
    pub id: String,
    pub shipping_address: String,
    pub quantity: i32,
    pub lead_time: String,
    pub target_price: String,
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
    pub created_at: String,
}

impl From<Quote> for QuoteResponse {
    fn from(quote: Quote) -> Self {
        Self {
            id: quote.id.to_string(),
            shipping_address: quote.shipping_address,
            quantity: quote.quantity,
            lead_time: quote.lead_time,
            target_price: quote.target_price.to_string(),
            fabric_composition: quote.fabric_composition,
            gsm: quote.gsm,
            order_notes: quote.order_notes,
            order_sample: quote.order_sample,
            sample_count: quote.sample_count,
            code: quote.code,
            status: quote.status,
            comments: quote.comments,
            techpack_file: quote.techpack_file,
            product_images_files: quote.product_images_files,
            color_swatch_files: quote.color_swatch_files,
            fabric_files: quote.fabric_files,
            miscellaneous_files: quote.miscellaneous_files,
            created_at: quote.created_at.to_rfc3339(),
        }
    }
}

/// Request para decidir una quote (aceptar / rechazar)
#[derive(Debug, Deserialize, Validate)]
pub struct UpdateQuoteStatusRequest {
    #[validate(length(min = 1))]
    pub status: String,

    #[validate(length(max = 2000))]
    pub comments: Option<String>,
}
