//! Runner: ejecuta los flujos registrados contra un almacén de snapshots.

use chrono::Utc;
use log::{debug, error};
use uuid::Uuid;

use super::executor::execute_flow;
use crate::constants::ENGINE_VERSION;
use crate::errors::EngineError;
use crate::flow::{Flow, FlowRegistry};
use crate::report::{FlowReport, RunReport};
use crate::snapshot::{RunMode, SnapshotStore};

/// Orquestador de la corrida.
///
/// Toma los flujos en orden de registro, los ejecuta en secuencia y persiste
/// el store al cierre de cada flujo. Es genérico en el almacén para poder
/// correr la misma suite contra el backend de archivo o el de memoria.
pub struct Runner<S>
    where S: SnapshotStore
{
    store: S,
    mode: RunMode,
}

impl<S> Runner<S>
    where S: SnapshotStore
{
    pub fn new(store: S, mode: RunMode) -> Self {
        Self { store, mode }
    }

    pub fn mode(&self) -> RunMode {
        self.mode
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Devuelve el store, por ejemplo para inspeccionarlo al final de un test.
    pub fn into_store(self) -> S {
        self.store
    }

    /// Ejecuta un flujo y persiste el store.
    ///
    /// Un paso fallado NO es un error de esta función: queda en el reporte.
    /// Sólo un almacén inutilizable produce `Err`.
    pub async fn run_flow(&mut self, flow: &Flow) -> Result<FlowReport, EngineError> {
        debug!("run_flow:start flow={} steps={} mode={:?}", flow.name(), flow.len(), self.mode);
        let report = execute_flow(flow, &mut self.store, self.mode).await;
        self.store.persist().map_err(|e| {
                                 error!("run_flow:persist_failed flow={} err={}", flow.name(), e);
                                 EngineError::Store(e)
                             })?;
        debug!("run_flow:done flow={} outcome={:?}", flow.name(), report.outcome);
        Ok(report)
    }

    /// Ejecuta todos los flujos del registro, en orden de registro.
    ///
    /// Cada flujo arranca con contexto limpio; que un flujo falle no frena a
    /// los demás. Si el almacén deja de poder persistir se aborta la corrida,
    /// porque lo grabado a partir de ahí no sería durable.
    pub async fn run_all(&mut self, registry: &FlowRegistry) -> Result<RunReport, EngineError> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        debug!("run_all:start run_id={run_id} engine=v{ENGINE_VERSION} flows={}", registry.len());

        let mut flows = Vec::with_capacity(registry.len());
        for flow in registry.flows() {
            flows.push(self.run_flow(flow).await?);
        }

        let report = RunReport { run_id,
                                 flows,
                                 started_at,
                                 finished_at: Utc::now() };
        debug!("run_all:done run_id={run_id} outcome={:?}", report.outcome());
        Ok(report)
    }
}
