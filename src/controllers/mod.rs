//! Controladores MVC
//!
//! Orquestan validación, servicios y repositorios por encima de los
//! handlers HTTP.

pub mod order_controller;
pub mod quote_controller;
pub mod tracking_controller;
