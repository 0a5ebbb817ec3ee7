//! DTOs de la vista agregada de tracking
//!
//! El registro compuesto reúne todos los campos de la quote más los pasos
//! de producción de su order (mapa vacío si aún no existe) y dos
//! conveniencias de presentación: la imagen de preview y la descripción.
//! Las claves `prod_image` y `desc` se mantienen literales porque el
//! dashboard ya depende de ellas.

use serde::Serialize;

use crate::models::order::ProductionSteps;
use crate::services::status_service::{derive_from_steps, CoarseStatus};
use crate::services::tracking_service::TrackedQuote;

/// Registro compuesto de tracking por quote aceptada
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackedQuoteResponse {
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

    #[serde(rename = "prod_image")]
    pub prod_image: Option<String>,
    #[serde(rename = "desc")]
    pub desc: String,
    pub production_steps: ProductionSteps,

    /// Estado grueso derivado del conteo de pasos completados
    pub production_status: CoarseStatus,
    /// Índice 1-based del paso actual para la barra de progreso
    pub current_step: usize,
}

impl From<TrackedQuote> for TrackedQuoteResponse {
    fn from(tracked: TrackedQuote) -> Self {
        let quote = tracked.quote;
        let derived = derive_from_steps(&tracked.production_steps);

        Self {
            id: quote.id.to_string(),
            shipping_address: quote.shipping_address,
            quantity: quote.quantity,
            lead_time: quote.lead_time,
            target_price: quote.target_price.to_string(),
            fabric_composition: quote.fabric_composition,
            gsm: quote.gsm,
            prod_image: quote.product_images_files.first().cloned(),
            desc: quote.order_notes.clone().unwrap_or_default(),
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
            production_steps: tracked.production_steps,
            production_status: derived.status,
            current_step: derived.current_step,
        }
    }
}

/// Envoltura de la respuesta del endpoint de tracking
#[derive(Debug, Serialize)]
pub struct TrackingResponse {
    pub quotes: Vec<TrackedQuoteResponse>,
}
