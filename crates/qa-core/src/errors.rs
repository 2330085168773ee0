//! Errores del motor de verificación.
//!
//! `StepError` describe el fallo de un paso individual y viaja dentro del
//! reporte (por eso es serializable). `EngineError` cubre problemas de
//! configuración o de entorno que impiden ejecutar: nunca se usa para un
//! assert fallido.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Fallo de un paso. Se captura en el `StepResult`, no corta el proceso.
#[derive(Debug, Error, PartialEq, Eq, Clone, Serialize, Deserialize)]
pub enum StepError {
    #[error("operation failed: {reason}")] OperationFailure { reason: String },
    #[error("snapshot mismatch for key '{key}'")] AssertionMismatch { key: String, expected: Value, actual: Value },
}

/// Problema del almacén de snapshots (IO, archivo corrupto, versión).
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum SnapshotError {
    #[error("io: {0}")] Io(String),
    #[error("malformed snapshot file: {0}")] Malformed(String),
    #[error("unsupported snapshot format version {0}")] UnsupportedFormat(u32),
}

/// Error fatal del runner: configuración inválida o almacén inutilizable.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum EngineError {
    #[error("duplicate flow name: {0}")] DuplicateFlow(String),
    #[error("flow name must not be empty")] InvalidFlowName,
    #[error("snapshot store: {0}")] Store(#[from] SnapshotError),
}
