//! Modelo de datos neutral del motor.
//!
//! El contexto y los snapshots son `serde_json::Value`: el motor no interpreta
//! su estructura, sólo la transporta y la compara.

pub mod context;
pub mod redact;

pub use context::ExecutionContext;
