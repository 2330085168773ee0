//! QAFlow Rust Library
//!
//! Este crate reúne el stack completo de QAFlow:
//! - `qa_core`: motor secuencial de flujos ACT/CHECK con snapshots.
//! - `qa_persistence`: store de snapshots sobre archivo JSON.
//! - `qa_adapters`: TodoApi de práctica y el checklist básico de API.
//!
//! Puede usarse desde `main.rs` o por otros crates/clientes.

pub use qa_adapters::{basic_api_checklist, TodoApi};
pub use qa_core::{derive_flow_keys, flow, render_report, report_to_string, ActOperation,
                  DuplicatePolicy, EngineError, ExecutionContext, Flow, FlowBuilder, FlowRegistry,
                  FlowReport, InMemorySnapshotStore, Outcome, RunMode, RunReport, Runner,
                  SnapshotError, SnapshotKey, SnapshotOutcome, SnapshotStore, Step, StepError,
                  StepKind, StepResult};
pub use qa_persistence::{init_dotenv, FileSnapshotStore, PersistenceError, StoreConfig};

#[cfg(test)]
mod tests {
	use super::{SnapshotError, StepError};

	#[test]
	fn step_error_display() {
		let e = StepError::OperationFailure { reason: "fallo".into() }.to_string();
		assert_eq!(e, "operation failed: fallo");
	}

	#[test]
	fn snapshot_error_display() {
		let e = SnapshotError::UnsupportedFormat(9).to_string();
		assert_eq!(e, "unsupported snapshot format version 9");
	}
}
