//! Agregador de tracking
//!
//! Une las quotes aceptadas (más recientes primero) con su order de
//! producción, si existe. Las búsquedas de order son independientes y se
//! despachan concurrentemente; el join es posicional, así que el orden de
//! salida siempre coincide con el orden del fetch de quotes sin importar
//! cuándo termina cada lookup. La ausencia de order no es un error y un
//! fallo en un lookup individual nunca tira el listado completo.

use futures::future::join_all;
use sqlx::PgPool;

use crate::models::order::{Order, ProductionSteps};
use crate::models::quote::{Quote, QuoteStatus};
use crate::repositories::order_repository::OrderRepository;
use crate::repositories::quote_repository::QuoteRepository;
use crate::utils::errors::AppResult;

/// Quote aceptada con sus pasos de producción ya fusionados
#[derive(Debug, Clone)]
pub struct TrackedQuote {
    pub quote: Quote,
    pub production_steps: ProductionSteps,
}

/// Fusionar quotes con los resultados posicionales de sus lookups de
/// order. Un lookup fallido se loguea y deja el mapa de pasos vacío; la
/// quote nunca se descarta del resultado.
pub fn merge_tracking(
    quotes: Vec<Quote>,
    lookups: Vec<AppResult<Option<Order>>>,
) -> Vec<TrackedQuote> {
    quotes
        .into_iter()
        .zip(lookups)
        .map(|(quote, lookup)| {
            let production_steps = match lookup {
                Ok(Some(order)) => order.production_steps.0,
                Ok(None) => ProductionSteps::new(),
                Err(e) => {
                    log::error!(
                        "❌ Error buscando order para quote {}: {}",
                        quote.id,
                        e
                    );
                    ProductionSteps::new()
                }
            };

            TrackedQuote {
                quote,
                production_steps,
            }
        })
        .collect()
}

/// Servicio agregador para el dashboard de tracking
pub struct TrackingService {
    quotes: QuoteRepository,
    orders: OrderRepository,
}

impl TrackingService {
    pub fn new(pool: PgPool) -> Self {
        Self {
            quotes: QuoteRepository::new(pool.clone()),
            orders: OrderRepository::new(pool),
        }
    }

    /// Un registro por quote aceptada. Un fallo en el fetch de quotes es
    /// fatal para la operación completa; los fallos por lookup no.
    pub async fn list_tracked_quotes(&self) -> AppResult<Vec<TrackedQuote>> {
        let accepted = self.quotes.find_by_status(QuoteStatus::Accepted).await?;

        let lookups = join_all(
            accepted
                .iter()
                .map(|quote| self.orders.find_by_quote_id(quote.id)),
        )
        .await;

        Ok(merge_tracking(accepted, lookups))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::{initial_production_steps, ProductionStep};
    use crate::models::quote::{DEFAULT_QUOTE_CODE, DEFAULT_QUOTE_COMMENTS};
    use crate::services::status_service::{derive_from_steps, CoarseStatus};
    use crate::utils::errors::AppError;
    use chrono::Utc;
    use rust_decimal::Decimal;
    use sqlx::types::Json;
    use uuid::Uuid;

    fn quote(notes: Option<&str>, images: Vec<&str>) -> Quote {
        Quote {
            id: Uuid::new_v4(),
            shipping_address: "12 Mill Road, Dhaka".to_string(),
            quantity: 100,
            lead_time: "30-45 days".to_string(),
            target_price: Decimal::new(125, 1),
            fabric_composition: "100% cotton".to_string(),
            gsm: "180".to_string(),
            order_notes: notes.map(|n| n.to_string()),
            order_sample: false,
            sample_count: 0,
            code: DEFAULT_QUOTE_CODE.to_string(),
            status: QuoteStatus::Accepted.as_str().to_string(),
            comments: DEFAULT_QUOTE_COMMENTS.to_string(),
            techpack_file: None,
            product_images_files: images.into_iter().map(|s| s.to_string()).collect(),
            color_swatch_files: vec![],
            fabric_files: vec![],
            miscellaneous_files: vec![],
            created_at: Utc::now(),
        }
    }

    fn order_for(quote_id: Uuid, steps: ProductionSteps) -> Order {
        Order {
            id: Uuid::new_v4(),
            quote_id,
            production_steps: Json(steps),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_every_quote_yields_a_record_in_order() {
        let quotes = vec![quote(None, vec![]), quote(None, vec![]), quote(None, vec![])];
        let ids: Vec<Uuid> = quotes.iter().map(|q| q.id).collect();

        let lookups = vec![
            Ok(Some(order_for(ids[0], initial_production_steps()))),
            Ok(None),
            Ok(None),
        ];

        let merged = merge_tracking(quotes, lookups);
        assert_eq!(merged.len(), 3);
        let merged_ids: Vec<Uuid> = merged.iter().map(|t| t.quote.id).collect();
        assert_eq!(merged_ids, ids);

        assert!(!merged[0].production_steps.is_empty());
        assert!(merged[1].production_steps.is_empty());
        assert!(merged[2].production_steps.is_empty());
    }

    #[test]
    fn test_lookup_failure_keeps_quote_with_empty_steps() {
        let quotes = vec![quote(None, vec![]), quote(None, vec![])];
        let second_id = quotes[1].id;

        let lookups: Vec<Result<Option<Order>, AppError>> = vec![
            Err(AppError::Internal("connection reset".to_string())),
            Ok(Some(order_for(second_id, initial_production_steps()))),
        ];

        let merged = merge_tracking(quotes, lookups);
        assert_eq!(merged.len(), 2);
        assert!(merged[0].production_steps.is_empty());
        assert_eq!(merged[1].production_steps.len(), 5);
    }

    #[test]
    fn test_two_accepted_quotes_one_with_partial_order() {
        // Escenario: dos quotes aceptadas, solo una con order
        // {Cutting: true, Stitching: false}
        let quotes = vec![quote(Some("rush order"), vec![]), quote(None, vec![])];
        let first_id = quotes[0].id;

        let mut steps = ProductionSteps::new();
        steps.insert(
            "Cutting".to_string(),
            ProductionStep {
                completed: true,
                started_on: Some("2026-08-01".to_string()),
            },
        );
        steps.insert("Stitching".to_string(), ProductionStep::pending());

        let lookups = vec![Ok(Some(order_for(first_id, steps))), Ok(None)];
        let merged = merge_tracking(quotes, lookups);

        assert_eq!(merged.len(), 2);

        let derived = derive_from_steps(&merged[0].production_steps);
        assert_eq!(derived.status, CoarseStatus::InProgress);
        assert_eq!(derived.current_step, 2);

        assert!(merged[1].production_steps.is_empty());
        let derived = derive_from_steps(&merged[1].production_steps);
        assert_eq!(derived.status, CoarseStatus::NotStarted);
        assert_eq!(derived.current_step, 1);
    }

    #[test]
    fn test_tracked_response_presentation_fields() {
        use crate::dto::tracking_dto::TrackedQuoteResponse;

        let with_image = quote(Some("navy wash"), vec!["https://cdn.example/p1.jpg"]);
        let without_image = quote(None, vec![]);

        let merged = merge_tracking(vec![with_image, without_image], vec![Ok(None), Ok(None)]);

        let first = TrackedQuoteResponse::from(merged[0].clone());
        assert_eq!(first.prod_image.as_deref(), Some("https://cdn.example/p1.jpg"));
        assert_eq!(first.desc, "navy wash");

        let second = TrackedQuoteResponse::from(merged[1].clone());
        assert_eq!(second.prod_image, None);
        assert_eq!(second.desc, "");
        assert!(second.production_steps.is_empty());
    }
}
