//! Definición de los pasos que componen un flujo.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::operation::{ActOperation, Normalizer};

/// Clase de paso. Queda registrada en cada resultado del reporte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepKind {
    Act,
    Check,
}

impl fmt::Display for StepKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepKind::Act => write!(f, "act"),
            StepKind::Check => write!(f, "check"),
        }
    }
}

/// Un paso dentro de un flujo.
///
/// `Act` ejecuta una operación con efectos y reemplaza el contexto con su
/// salida. `Check` congela el contexto vigente (normalizado si corresponde)
/// y lo compara contra el snapshot almacenado.
pub enum Step {
    Act { label: String, operation: Box<dyn ActOperation> },
    Check { label: String, normalizer: Option<Normalizer> },
}

impl Step {
    pub fn label(&self) -> &str {
        match self {
            Step::Act { label, .. } | Step::Check { label, .. } => label,
        }
    }

    pub fn kind(&self) -> StepKind {
        match self {
            Step::Act { .. } => StepKind::Act,
            Step::Check { .. } => StepKind::Check,
        }
    }
}

impl fmt::Debug for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Act { label, .. } => f.debug_struct("Act").field("label", label).finish_non_exhaustive(),
            Step::Check { label, normalizer } => f.debug_struct("Check")
                                                  .field("label", label)
                                                  .field("normalized", &normalizer.is_some())
                                                  .finish(),
        }
    }
}
