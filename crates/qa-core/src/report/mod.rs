//! Reporte de corrida: tipos y render textual.

pub mod render;
pub mod types;

pub use render::{render_report, report_to_string, write_report};
pub use types::{FlowReport, Outcome, RunReport, SnapshotOutcome, StepResult};
