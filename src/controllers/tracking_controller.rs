use sqlx::PgPool;

use crate::dto::tracking_dto::{TrackedQuoteResponse, TrackingResponse};
use crate::services::tracking_service::TrackingService;
use crate::utils::errors::AppError;

pub struct TrackingController {
    service: TrackingService,
}

impl TrackingController {
    pub fn new(pool: PgPool) -> Self {
        Self {
            service: TrackingService::new(pool),
        }
    }

    /// Vista compuesta del dashboard: un registro por quote aceptada,
    /// más recientes primero.
    pub async fn list_tracked_quotes(&self) -> Result<TrackingResponse, AppError> {
        let tracked = self.service.list_tracked_quotes().await?;

        Ok(TrackingResponse {
            quotes: tracked
                .into_iter()
                .map(TrackedQuoteResponse::from)
                .collect(),
        })
    }
}
