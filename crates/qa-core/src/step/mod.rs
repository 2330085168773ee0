//! Pasos: definición y operaciones.

pub mod definition;
pub mod operation;

pub use definition::{Step, StepKind};
pub use operation::{ActOperation, FnOperation, Normalizer, OpError, OpResult};
