//! Servicios del sistema
//!
//! Lógica de negocio: clasificación e ingesta de archivos, cliente del
//! content store, derivación de estado de producción y agregación de
//! tracking.

pub mod content_store;
pub mod file_ingestion_service;
pub mod status_service;
pub mod tracking_service;
