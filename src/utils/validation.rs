//! Utilidades de validación
//!
//! Este módulo contiene funciones helper para validar y convertir los
//! campos escalares que llegan en el formulario multipart de quotes.
//! El primer campo ausente o inválido corta la validación con su nombre.

use rust_decimal::Decimal;
use std::collections::HashMap;
use std::str::FromStr;

use crate::utils::errors::{invalid_field_error, missing_field_error, AppError};

/// Obtener un campo de texto requerido, no vacío
pub fn require_text(fields: &HashMap<String, String>, name: &str) -> Result<String, AppError> {
    match fields.get(name) {
        Some(value) if !value.trim().is_empty() => Ok(value.trim().to_string()),
        _ => Err(missing_field_error(name)),
    }
}

/// Obtener un campo de texto opcional; vacío se trata como ausente
pub fn optional_text(fields: &HashMap<String, String>, name: &str) -> Option<String> {
    fields
        .get(name)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Validar y convertir un entero positivo (> 0)
pub fn require_positive_int(
    fields: &HashMap<String, String>,
    name: &str,
) -> Result<i32, AppError> {
    let raw = fields.get(name).ok_or_else(|| missing_field_error(name))?;
    match raw.trim().parse::<i32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(invalid_field_error(name, "a positive integer")),
    }
}

/// Validar y convertir un entero no negativo (>= 0), con valor por defecto
pub fn non_negative_int_or(
    fields: &HashMap<String, String>,
    name: &str,
    default: i32,
) -> Result<i32, AppError> {
    match fields.get(name) {
        None => Ok(default),
        Some(raw) if raw.trim().is_empty() => Ok(default),
        Some(raw) => match raw.trim().parse::<i32>() {
            Ok(value) if value >= 0 => Ok(value),
            _ => Err(invalid_field_error(name, "a non-negative integer")),
        },
    }
}

/// Validar y convertir un decimal no negativo (>= 0)
pub fn require_non_negative_decimal(
    fields: &HashMap<String, String>,
    name: &str,
) -> Result<Decimal, AppError> {
    let raw = fields.get(name).ok_or_else(|| missing_field_error(name))?;
    match Decimal::from_str(raw.trim()) {
        Ok(value) if value >= Decimal::ZERO => Ok(value),
        _ => Err(invalid_field_error(name, "a non-negative number")),
    }
}

/// Interpretar un flag booleano del formulario ("true" literal, como en el
/// cliente original; cualquier otro valor o ausencia cuenta como false)
pub fn bool_flag(fields: &HashMap<String, String>, name: &str) -> bool {
    fields.get(name).map(|v| v.trim() == "true").unwrap_or(false)
}
