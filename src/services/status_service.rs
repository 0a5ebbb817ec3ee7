//! Derivación de estado de producción
//!
//! Función pura que resume una lista ordenada de pasos de producción en un
//! estado grueso (Not Started / In Progress / Completed) más el índice
//! 1-based del paso actual para la barra de progreso.
//!
//! Existe un único motor de derivación: el camino basado en conteo de pasos
//! es el autoritativo, y las etiquetas tri-estado almacenadas (los badges
//! Pending / In Progress / Completed) se normalizan a una lista sintética
//! de tres pasos y pasan por el mismo motor.

use serde::Serialize;

use crate::models::order::{ProductionSteps, PRODUCTION_STEP_ORDER};

/// Estado grueso de producción
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CoarseStatus {
    #[serde(rename = "Not Started")]
    NotStarted,
    #[serde(rename = "In Progress")]
    InProgress,
    #[serde(rename = "Completed")]
    Completed,
}

impl CoarseStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CoarseStatus::NotStarted => "Not Started",
            CoarseStatus::InProgress => "In Progress",
            CoarseStatus::Completed => "Completed",
        }
    }
}

/// Un paso con su flag de completado, ya en orden de derivación
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepRecord {
    pub name: String,
    pub completed: bool,
}

/// Resultado de la derivación: estado grueso + índice 1-based del paso actual
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DerivedProgress {
    pub status: CoarseStatus,
    pub current_step: usize,
}

/// Derivar el progreso a partir de la lista ordenada de pasos.
///
/// - 0 completados -> (Not Started, 1)
/// - todos completados -> (Completed, total)
/// - parcial -> (In Progress, completados + 1), apunta al primer incompleto
/// - lista vacía -> (Not Started, 1), sin errores de índice
pub fn derive_progress(steps: &[StepRecord]) -> DerivedProgress {
    let total = steps.len();
    let completed_count = steps.iter().filter(|s| s.completed).count();

    if total == 0 || completed_count == 0 {
        return DerivedProgress {
            status: CoarseStatus::NotStarted,
            current_step: 1,
        };
    }

    if completed_count == total {
        return DerivedProgress {
            status: CoarseStatus::Completed,
            current_step: total,
        };
    }

    DerivedProgress {
        status: CoarseStatus::InProgress,
        current_step: completed_count + 1,
    }
}

/// Aplanar el mapa JSONB de pasos a la lista ordenada que consume el motor.
/// Primero los pasos canónicos presentes, después cualquier paso extra en
/// orden alfabético para que el resultado sea determinista.
pub fn ordered_steps(steps: &ProductionSteps) -> Vec<StepRecord> {
    let mut records: Vec<StepRecord> = PRODUCTION_STEP_ORDER
        .iter()
        .filter_map(|name| {
            steps.get(*name).map(|step| StepRecord {
                name: name.to_string(),
                completed: step.completed,
            })
        })
        .collect();

    let mut extras: Vec<&String> = steps
        .keys()
        .filter(|name| !PRODUCTION_STEP_ORDER.contains(&name.as_str()))
        .collect();
    extras.sort();

    for name in extras {
        records.push(StepRecord {
            name: name.clone(),
            completed: steps[name].completed,
        });
    }

    records
}

/// Derivar el progreso directamente del mapa de pasos de una order
pub fn derive_from_steps(steps: &ProductionSteps) -> DerivedProgress {
    derive_progress(&ordered_steps(steps))
}

/// Normalizar una etiqueta tri-estado almacenada a través del mismo motor.
/// "Pending" y "Not Started" cuentan 0 de 3, "In Progress" 1 de 3,
/// "Completed" 3 de 3; etiquetas desconocidas caen en Not Started.
pub fn derive_from_label(label: &str) -> DerivedProgress {
    let completed_flags: [bool; 3] = match label {
        "Completed" => [true, true, true],
        "In Progress" => [true, false, false],
        _ => [false, false, false],
    };

    let synthetic: Vec<StepRecord> = ["Pending", "In Progress", "Completed"]
        .iter()
        .zip(completed_flags)
        .map(|(name, completed)| StepRecord {
            name: name.to_string(),
            completed,
        })
        .collect();

    derive_progress(&synthetic)
}
