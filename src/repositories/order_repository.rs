use crate::models::order::{Order, ProductionSteps};
use crate::utils::errors::AppError;
use chrono::Utc;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

/// Construir el patch jsonb para un paso: siempre lleva `completed` y solo
/// lleva `started_on` cuando el request lo trae. Las claves ausentes
/// sobreviven al merge `||` en el UPDATE.
fn step_patch(completed: bool, started_on: Option<&str>) -> serde_json::Value {
    let mut patch = serde_json::json!({ "completed": completed });
    if let Some(date) = started_on {
        patch["started_on"] = serde_json::Value::String(date.to_string());
    }
    patch
}

pub struct OrderRepository {
    pool: PgPool,
}

impl OrderRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn create(
        &self,
        quote_id: Uuid,
        initial_steps: ProductionSteps,
    ) -> Result<Order, AppError> {
        let result = sqlx::query_as::<_, Order>(
            r#"
            INSERT INTO orders (id, quote_id, production_steps, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(quote_id)
        .bind(Json(initial_steps))
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(AppError::Database)?;

        Ok(result)
    }

    /// A lo sumo existe una order por quote; la ausencia no es un error
    /// (una quote puede estar aceptada sin order creada todavía).
    pub async fn find_by_quote_id(&self, quote_id: Uuid) -> Result<Option<Order>, AppError> {
        let result = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE quote_id = $1")
            .bind(quote_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Order>, AppError> {
        let result = sqlx::query_as::<_, Order>("SELECT * FROM orders WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(AppError::Database)?;

        Ok(result)
    }

    /// Mutar un paso de producción en un único statement atómico. El filtro
    /// `production_steps ? $2` hace que tanto order desconocida como paso
    /// desconocido terminen en NotFound. El patch se fusiona con `||`
    /// sobre el registro existente, así que un request sin started_on no
    /// borra una fecha de inicio ya fijada.
    pub async fn update_step(
        &self,
        order_id: Uuid,
        step_name: &str,
        completed: bool,
        started_on: Option<String>,
    ) -> Result<Order, AppError> {
        let patch = step_patch(completed, started_on.as_deref());

        let result = sqlx::query_as::<_, Order>(
            r#"
            UPDATE orders
            SET production_steps = jsonb_set(
                    production_steps,
                    ARRAY[$2],
                    (production_steps -> $2) || $3
                )
            WHERE id = $1 AND production_steps ? $2
            RETURNING *
            "#,
        )
        .bind(order_id)
        .bind(step_name)
        .bind(Json(patch))
        .fetch_optional(&self.pool)
        .await
        .map_err(AppError::Database)?;

        result.ok_or_else(|| {
            AppError::NotFound(format!(
                "Order '{}' or production step '{}' not found",
                order_id, step_name
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::order::ProductionStep;

    /// Réplica del merge `||` de jsonb sobre objetos: unión de claves, el
    /// lado derecho gana.
    fn jsonb_concat(left: serde_json::Value, right: &serde_json::Value) -> serde_json::Value {
        let mut merged = left;
        if let (Some(target), Some(patch)) = (merged.as_object_mut(), right.as_object()) {
            for (key, value) in patch {
                target.insert(key.clone(), value.clone());
            }
        }
        merged
    }

    #[test]
    fn test_step_patch_without_started_on_carries_only_completed() {
        let patch = step_patch(true, None);
        assert_eq!(patch["completed"], serde_json::json!(true));
        assert!(patch.get("started_on").is_none());
    }

    #[test]
    fn test_step_patch_merge_preserves_existing_started_on() {
        let existing = serde_json::json!({
            "completed": false,
            "started_on": "2026-08-01"
        });

        // Request sin started_on: la fecha ya fijada sobrevive al merge
        let merged = jsonb_concat(existing, &step_patch(true, None));
        let step: ProductionStep = serde_json::from_value(merged).unwrap();
        assert!(step.completed);
        assert_eq!(step.started_on.as_deref(), Some("2026-08-01"));
    }

    #[test]
    fn test_step_patch_merge_overwrites_started_on_when_present() {
        let existing = serde_json::json!({
            "completed": false,
            "started_on": "2026-08-01"
        });

        let merged = jsonb_concat(existing, &step_patch(true, Some("2026-08-15")));
        let step: ProductionStep = serde_json::from_value(merged).unwrap();
        assert!(step.completed);
        assert_eq!(step.started_on.as_deref(), Some("2026-08-15"));
    }
}
