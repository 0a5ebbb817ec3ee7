mod config;
mod state;
mod database;
mod services;
mod utils;
mod models;
mod middleware;
mod controllers;
mod repositories;
mod routes;
mod dto;

use anyhow::Result;
use axum::{
    extract::DefaultBodyLimit,
    response::Json,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info};
use dotenvy::dotenv;
use serde_json::json;

use config::environment::EnvironmentConfig;
use database::DatabaseConnection;
use middleware::cors::{cors_middleware, cors_middleware_with_origins};
use services::content_store::HttpContentStore;
use state::AppState;

/// Límite del body multipart completo. Tiene que superar con margen el
/// tope por archivo: un archivo de más de 10 MiB debe llegar al
/// clasificador para que este lo salte, no rebotar en el framework.
const MULTIPART_BODY_LIMIT: usize = 100 * 1024 * 1024;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::default();

    // Configurar logging
    let log_level = if config.is_production() {
        tracing::Level::INFO
    } else {
        tracing::Level::DEBUG
    };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    info!("🧵 RFQ Tracking - Quotes y seguimiento de producción");
    info!("====================================================");

    // Inicializar base de datos
    let db_connection = match DatabaseConnection::new_default().await {
        Ok(conn) => conn,
        Err(e) => {
            error!("❌ Error conectando a la base de datos: {}", e);
            return Err(anyhow::anyhow!("Error de base de datos: {}", e));
        }
    };

    let pool = db_connection.pool().clone();

    // Cliente del content store externo
    let content_store = Arc::new(HttpContentStore::new(config.content_store_url.clone()));
    info!("✅ Content store configurado: {}", config.content_store_url);

    // Crear router de la API. En desarrollo (o sin orígenes configurados)
    // el CORS es permisivo; en producción se restringe a la lista.
    let cors = if config.is_development() || config.cors_origins.is_empty() {
        cors_middleware()
    } else {
        cors_middleware_with_origins(config.cors_origins.clone())
    };

    let app_state = AppState::new(pool, config.clone(), content_store);

    let app = Router::new()
        .route("/test", get(test_endpoint))
        .nest("/api/quotes", routes::quote_routes::create_quote_router())
        .nest("/api/orders", routes::order_routes::create_order_router())
        .layer(DefaultBodyLimit::max(MULTIPART_BODY_LIMIT))
        .layer(cors)
        .with_state(app_state);

    let addr: SocketAddr = config.server_url().parse()?;

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET  /test - Endpoint de prueba");
    info!("📋 Endpoints - Quotes:");
    info!("   POST /api/quotes - Enviar quote (multipart)");
    info!("   GET  /api/quotes - Historial RFQ");
    info!("   GET  /api/quotes/accepted-with-tracking - Vista de tracking");
    info!("   GET  /api/quotes/:id - Obtener quote");
    info!("   PUT  /api/quotes/:id/status - Decidir quote");
    info!("🏭 Endpoints - Orders:");
    info!("   POST /api/orders - Crear order de producción");
    info!("   GET  /api/orders/by-quote/:quote_id - Order por quote");
    info!("   PUT  /api/orders/:id/steps/:step_name - Actualizar paso");

    // Iniciar servidor en background
    let server_handle = tokio::spawn(async move {
        let listener = tokio::net::TcpListener::bind(addr).await?;
        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                error!("❌ Error del servidor: {}", e);
                e
            })
    });

    // Esperar a que el servidor termine
    if let Err(e) = server_handle.await? {
        error!("❌ Servidor terminó con error: {}", e);
    }

    // Cierre idempotente del pool
    db_connection.close().await;

    info!("👋 Servidor terminado");
    Ok(())
}

/// Endpoint de prueba simple
async fn test_endpoint() -> Json<serde_json::Value> {
    Json(json!({
        "message": "RFQ Tracking API funcionando correctamente",
        "status": "ok",
        "timestamp": chrono::Utc::now().to_rfc3339(),
    }))
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
