//! Shared application state
//!
//! Este módulo define el estado compartido de la aplicación que se pasa
//! a través del router de Axum. El pool de PostgreSQL y el cliente del
//! content store se construyen una sola vez en el arranque y llegan aquí
//! inyectados; no hay estado global perezoso.

use std::sync::Arc;

use sqlx::PgPool;

use crate::config::environment::EnvironmentConfig;
use crate::services::content_store::ContentStore;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: EnvironmentConfig,
    pub content_store: Arc<dyn ContentStore>,
}

impl AppState {
    pub fn new(
        pool: PgPool,
        config: EnvironmentConfig,
        content_store: Arc<dyn ContentStore>,
    ) -> Self {
        Self {
            pool,
            config,
            content_store,
        }
    }
}
