//! DTOs de la API
//!
//! Requests y responses serializados hacia/desde el dashboard.

pub mod order_dto;
pub mod quote_dto;
pub mod tracking_dto;
