//! Errores de persistencia.
//! Mapea errores de IO / JSON a variantes semánticas y al error que habla el
//! trait `SnapshotStore` del core.

use qa_core::errors::SnapshotError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed snapshot file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported snapshot format version {0}")]
    UnsupportedFormat(u32),
}

impl From<PersistenceError> for SnapshotError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::Io(e) => SnapshotError::Io(e.to_string()),
            PersistenceError::Json(e) => SnapshotError::Malformed(e.to_string()),
            PersistenceError::UnsupportedFormat(v) => SnapshotError::UnsupportedFormat(v),
        }
    }
}
