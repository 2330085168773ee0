//! Ejecución secuencial de la cadena de pasos de un flujo.
//!
//! Invariante central: ante el primer paso fallado se detiene la cadena.
//! Los pasos posteriores dependen del contexto que ese paso debía producir,
//! así que ejecutarlos sólo generaría ruido en el reporte.

use std::collections::HashMap;

use chrono::Utc;
use log::debug;
use serde_json::Value;

use crate::errors::StepError;
use crate::flow::Flow;
use crate::hashing::hash_value;
use crate::model::ExecutionContext;
use crate::report::{FlowReport, SnapshotOutcome, StepResult};
use crate::snapshot::{RunMode, SnapshotKey, SnapshotStore};
use crate::step::{Step, StepKind};

/// Ejecuta un flujo contra el store. Nunca devuelve error: cualquier fallo
/// de paso queda capturado en el reporte.
pub(crate) async fn execute_flow<S>(flow: &Flow, store: &mut S, mode: RunMode) -> FlowReport
    where S: SnapshotStore
{
    let started_at = Utc::now();
    let mut ctx = ExecutionContext::new();
    let mut occurrences: HashMap<&str, usize> = HashMap::new();
    let mut results: Vec<StepResult> = Vec::with_capacity(flow.len());

    for step in flow.steps() {
        let step_started = Utc::now();
        match step {
            Step::Act { label, operation } => {
                debug!("act:start flow={} label={}", flow.name(), label);
                match operation.call(ctx.cloned()).await {
                    Ok(next) => {
                        ctx.replace(next);
                        results.push(StepResult::passed(label, StepKind::Act, None, step_started));
                    }
                    Err(e) => {
                        debug!("act:failed flow={} label={} reason={}", flow.name(), label, e);
                        results.push(StepResult::failed(label,
                                                        StepKind::Act,
                                                        StepError::OperationFailure { reason: e.to_string() },
                                                        step_started));
                        break;
                    }
                }
            }
            Step::Check { label, normalizer } => {
                let n = occurrences.entry(label.as_str()).or_insert(0);
                *n += 1;
                let key = SnapshotKey::derive(flow.name(), label, *n);
                // El normalizador trabaja sobre una copia: el contexto vivo
                // sigue intacto para los pasos siguientes.
                let candidate = match normalizer {
                    Some(f) => f(ctx.cloned()),
                    None => ctx.cloned(),
                };
                match resolve_check(store, &key, candidate, mode) {
                    Ok(outcome) => {
                        debug!("check:{} flow={} key={}", outcome_tag(outcome), flow.name(), key);
                        results.push(StepResult::passed(label, StepKind::Check, Some(outcome), step_started));
                    }
                    Err(err) => {
                        debug!("check:mismatch flow={} key={}", flow.name(), key);
                        results.push(StepResult::failed(label, StepKind::Check, err, step_started));
                        break;
                    }
                }
            }
        }
    }

    FlowReport::from_results(flow.name(), results, started_at)
}

/// Resuelve un CHECK contra el store según el modo de corrida.
fn resolve_check<S>(store: &mut S,
                    key: &SnapshotKey,
                    candidate: Value,
                    mode: RunMode)
                    -> Result<SnapshotOutcome, StepError>
    where S: SnapshotStore
{
    match mode {
        RunMode::Update => {
            store.put(key.as_str(), candidate);
            Ok(SnapshotOutcome::Updated)
        }
        RunMode::Verify => match store.get(key.as_str()) {
            None => {
                debug!("snapshot:record key={} hash={}", key, &hash_value(&candidate)[..12]);
                store.put(key.as_str(), candidate);
                Ok(SnapshotOutcome::Recorded)
            }
            Some(stored) if stored == candidate => Ok(SnapshotOutcome::Matched),
            Some(stored) => Err(StepError::AssertionMismatch { key: key.to_string(),
                                                               expected: stored,
                                                               actual: candidate }),
        },
    }
}

fn outcome_tag(outcome: SnapshotOutcome) -> &'static str {
    match outcome {
        SnapshotOutcome::Recorded => "recorded",
        SnapshotOutcome::Matched => "matched",
        SnapshotOutcome::Updated => "updated",
    }
}
