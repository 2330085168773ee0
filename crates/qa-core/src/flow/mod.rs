//! Flujos: definición, builder y registro.

pub mod definition;
pub mod registry;

pub use definition::{flow, Flow, FlowBuilder};
pub use registry::{DuplicatePolicy, FlowRegistry};
