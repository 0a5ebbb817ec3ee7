//! Cliente del content store
//!
//! Colaborador externo que persiste los bytes subidos y devuelve una URL
//! de referencia. El resto del sistema solo maneja esas URLs, nunca
//! binarios.

use async_trait::async_trait;
use serde::Deserialize;

use crate::utils::errors::AppError;

/// Referencia devuelta por el content store
#[derive(Debug, Clone, Deserialize)]
pub struct StoredFile {
    pub url: String,
}

/// Colaborador de almacenamiento de contenido. Cada llamada puede fallar de
/// forma independiente; el servicio de ingesta contiene esos fallos.
#[async_trait]
pub trait ContentStore: Send + Sync {
    async fn store(&self, bytes: &[u8], category_hint: &str) -> Result<StoredFile, AppError>;
}

/// Implementación HTTP del content store
pub struct HttpContentStore {
    client: reqwest::Client,
    base_url: String,
}

impl HttpContentStore {
    pub fn new(base_url: String) -> Self {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .expect("Failed to create HTTP client");

        Self { client, base_url }
    }
}

#[async_trait]
impl ContentStore for HttpContentStore {
    async fn store(&self, bytes: &[u8], category_hint: &str) -> Result<StoredFile, AppError> {
        let url = format!(
            "{}/upload?category={}",
            self.base_url.trim_end_matches('/'),
            category_hint
        );

        log::info!("📤 Subiendo {} bytes al content store ({})", bytes.len(), category_hint);

        let response = self
            .client
            .post(&url)
            .header("Content-Type", "application/octet-stream")
            .body(bytes.to_vec())
            .send()
            .await
            .map_err(|e| AppError::ContentStore(format!("upload request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            log::error!("❌ Content store respondió {}: {}", status, error_text);
            return Err(AppError::ContentStore(format!(
                "upload rejected with status {}",
                status
            )));
        }

        let stored: StoredFile = response
            .json()
            .await
            .map_err(|e| AppError::ContentStore(format!("invalid upload response: {}", e)))?;

        Ok(stored)
    }
}
