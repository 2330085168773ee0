//! qa-adapters
//!
//! Piezas concretas sobre el motor: el servicio de tareas en memoria, los
//! normalizadores de sus respuestas y la checklist de API básica que los usa.

pub mod checklist;
pub mod normalize;
pub mod service;

pub use checklist::basic_api_checklist;
pub use service::TodoApi;
