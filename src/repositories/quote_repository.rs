use crate::models::quote::{NewQuote, Quote, QuoteStatus, DEFAULT_QUOTE_CODE, DEFAULT_QUOTE_COMMENTS};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

pub struct QuoteRepository {
    pool: PgPool,
}

impl QuoteRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(&self, new_quote: NewQuote) -> Result<Quote, AppError> {
        let result = sqlx::query_as::<_, Quote>(
            r#"
            INSERT INTO quotes (
                id, shipping_address, quantity, lead_time, target_price,
                fabric_composition, gsm, order_notes, order_sample, sample_count,
                code, status, comments, techpack_file, product_images_files,
                color_swatch_files, fabric_files, miscellaneous_files, created_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17, $18, $19)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_quote.shipping_address)
        .bind(new_quote.quantity)
        .bind(&new_quote.lead_time)
        .bind(new_quote.target_price)
        .bind(&new_quote.fabric_composition)
        .bind(&new_quote.gsm)
        .bind(&new_quote.order_notes)
        .bind(new_quote.order_sample)
        .bind(new_quote.sample_count)
        .bind(DEFAULT_QUOTE_CODE)
        .bind(QuoteStatus::Pending.as_str())
        .bind(DEFAULT_QUOTE_COMMENTS)
        .bind(&new_quote.techpack_file)
        .bind(&new_quote.product_images_files)
        .bind(&new_quote.color_swatch_files)
        .bind(&new_quote.fabric_files)
        .bind(&new_quote.miscellaneous_files)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Quote>, AppError> {
        let result = sqlx::query_as::<_, Quote>("SELECT * FROM quotes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_status(&self, status: QuoteStatus) -> Result<Vec<Quote>, AppError> {
        let result = sqlx::query_as::<_, Quote>(
            "SELECT * FROM quotes WHERE status = $1 ORDER BY created_at DESC",
        )
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn list_all(&self) -> Result<Vec<Quote>, AppError> {
        let result = sqlx::query_as::<_, Quote>("SELECT * FROM quotes ORDER BY created_at DESC")
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Transición de estado de la decisión RFQ. El filtro sobre status
    /// hace el guard Pending -> decidida en el mismo statement atómico:
    /// dos decisiones concurrentes no pueden ganar las dos. Devuelve None
    /// si la quote no existe o ya fue decidida; el caller distingue los
    /// dos casos. Si no llegan comments se conserva el texto existente.
    pub async fn decide(
        &self,
        id: Uuid,
        status: QuoteStatus,
        comments: Option<String>,
    ) -> Result<Option<Quote>, AppError> {
        let result = sqlx::query_as::<_, Quote>(
            r#"
            UPDATE quotes
            SET status = $2, comments = COALESCE($3, comments)
            WHERE id = $1 AND status = $4
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(status.as_str())
        .bind(comments)
        .bind(QuoteStatus::Pending.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }
}
