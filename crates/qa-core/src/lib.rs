//! qa-core: Motor secuencial de verificación por snapshots
pub mod constants;
pub mod engine;
pub mod errors;
pub mod flow;
pub mod hashing;
pub mod model;
pub mod report;
pub mod snapshot;
pub mod step;

pub use engine::Runner;
pub use errors::{EngineError, SnapshotError, StepError};
pub use flow::{flow, DuplicatePolicy, Flow, FlowBuilder, FlowRegistry};
pub use model::ExecutionContext;
pub use report::{render_report, report_to_string, FlowReport, Outcome, RunReport, SnapshotOutcome, StepResult};
pub use snapshot::{derive_flow_keys, InMemorySnapshotStore, RunMode, SnapshotKey, SnapshotStore};
pub use step::{ActOperation, FnOperation, Normalizer, OpError, OpResult, Step, StepKind};
