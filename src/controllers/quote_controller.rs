use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::dto::quote_dto::{ApiResponse, QuoteResponse, UpdateQuoteStatusRequest};
use crate::models::quote::{NewQuote, Quote, QuoteStatus};
use crate::repositories::quote_repository::QuoteRepository;
use crate::services::content_store::ContentStore;
use crate::services::file_ingestion_service::{
    FileIngestionService, FileOutcome, FilePart, IngestedFiles,
};
use crate::utils::errors::{not_found_error, AppError};
use crate::utils::validation::{
    bool_flag, non_negative_int_or, optional_text, require_non_negative_decimal,
    require_positive_int, require_text,
};

pub struct QuoteController {
    repository: QuoteRepository,
    ingestion: FileIngestionService,
}

/// Construir la NewQuote a partir de los campos escalares ya parseados y
/// las referencias de archivos clasificadas. El primer campo ausente o
/// inválido corta con un error de validación que lo nombra.
pub fn build_new_quote(
    fields: &HashMap<String, String>,
    files: IngestedFiles,
) -> Result<NewQuote, AppError> {
    let shipping_address = require_text(fields, "shippingAddress")?;
    let quantity = require_positive_int(fields, "quantity")?;
    let lead_time = require_text(fields, "leadTime")?;
    let target_price = require_non_negative_decimal(fields, "targetPrice")?;
    let fabric_composition = require_text(fields, "fabricComposition")?;
    let gsm = require_text(fields, "gsm")?;
    let order_notes = optional_text(fields, "orderNotes");
    let order_sample = bool_flag(fields, "requestSample");
    let sample_count = non_negative_int_or(fields, "sampleCount", 0)?;

    Ok(NewQuote {
        shipping_address,
        quantity,
        lead_time,
        target_price,
        fabric_composition,
        gsm,
        order_notes,
        order_sample,
        sample_count,
        techpack_file: files.techpack_file,
        product_images_files: files.product_images_files,
        color_swatch_files: files.color_swatch_files,
        fabric_files: files.fabric_files,
        miscellaneous_files: files.miscellaneous_files,
    })
}

/// Validar la decisión solicitada: solo Accepted o Rejected son destinos
/// válidos; una etiqueta fuera del enum es un error de validación y volver
/// a Pending no está permitido.
pub fn parse_decision(request: &UpdateQuoteStatusRequest) -> Result<QuoteStatus, AppError> {
    let status = QuoteStatus::parse(&request.status).ok_or_else(|| {
        AppError::Validation("status must be one of Pending, Accepted, Rejected".to_string())
    })?;

    if status == QuoteStatus::Pending {
        return Err(AppError::BadRequest(
            "A quote cannot be moved back to Pending".to_string(),
        ));
    }

    Ok(status)
}

/// Traducir el rechazo del guard atómico de decisión: quote inexistente
/// es 404, quote ya decidida es 400.
pub fn decision_rejection(current: Option<&Quote>) -> AppError {
    match current {
        None => AppError::NotFound("Quote not found".to_string()),
        Some(quote) => AppError::BadRequest(format!(
            "Quote has already been decided ({})",
            quote.status
        )),
    }
}

impl QuoteController {
    pub fn new(pool: PgPool, max_file_bytes: usize) -> Self {
        Self {
            repository: QuoteRepository::new(pool),
            ingestion: FileIngestionService::new(max_file_bytes),
        }
    }

    /// Alta de una quote desde el formulario multipart. La ingesta de
    /// archivos es best-effort: un archivo saltado nunca impide crear la
    /// quote.
    pub async fn submit(
        &self,
        store: &dyn ContentStore,
        fields: HashMap<String, String>,
        file_parts: Vec<FilePart>,
    ) -> Result<ApiResponse<QuoteResponse>, AppError> {
        let ingested = self.ingestion.ingest(file_parts, store).await;

        let stored = ingested
            .outcomes
            .iter()
            .filter(|o| matches!(o, FileOutcome::Stored { .. }))
            .count();
        log::info!(
            "📎 Ingesta de archivos: {} almacenados de {} recibidos",
            stored,
            ingested.outcomes.len()
        );

        let new_quote = build_new_quote(&fields, ingested)?;
        let quote = self.repository.create(new_quote).await?;

        Ok(ApiResponse::success_with_message(
            quote.into(),
            "Quote submitted successfully".to_string(),
        ))
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<QuoteResponse, AppError> {
        let quote = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| not_found_error("Quote", &id.to_string()))?;

        Ok(quote.into())
    }

    pub async fn list_all(&self) -> Result<Vec<QuoteResponse>, AppError> {
        let quotes = self.repository.list_all().await?;
        Ok(quotes.into_iter().map(QuoteResponse::from).collect())
    }

    /// Decisión RFQ: Pending -> Accepted | Rejected, exactamente una vez.
    /// El guard exactamente-una-vez vive en el UPDATE atómico del
    /// repositorio; aquí solo se interpreta el resultado.
    pub async fn update_status(
        &self,
        id: Uuid,
        request: UpdateQuoteStatusRequest,
    ) -> Result<ApiResponse<QuoteResponse>, AppError> {
        let status = parse_decision(&request)?;

        match self.repository.decide(id, status, request.comments).await? {
            Some(updated) => Ok(ApiResponse::success_with_message(
                updated.into(),
                "Quote status updated".to_string(),
            )),
            // El guard atómico no matcheó: o la quote no existe o ya fue
            // decidida. Un segundo lookup solo elige el mensaje.
            None => {
                let current = self.repository.find_by_id(id).await?;
                Err(decision_rejection(current.as_ref()))
            }
        }
    }
}
