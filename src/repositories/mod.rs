//! Repositorios de acceso a datos
//!
//! Cada operación es un único statement atómico contra PostgreSQL; el
//! pool compartido llega inyectado desde el estado de la aplicación.

pub mod order_repository;
pub mod quote_repository;
