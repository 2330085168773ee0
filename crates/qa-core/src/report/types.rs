//! Tipos del reporte de una corrida.
//!
//! El reporte se construye siempre completo: un flujo que falla queda
//! registrado con los pasos que alcanzó a ejecutar y los demás flujos
//! siguen corriendo. Todo es serializable para poder archivar corridas.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::StepError;
use crate::step::StepKind;

/// Veredicto de un paso, un flujo o la corrida completa.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Passed,
    Failed,
}

/// Qué pasó con el snapshot de un CHECK que terminó bien.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SnapshotOutcome {
    /// No había valor bajo la clave y se grabó el actual.
    Recorded,
    /// El valor comparado coincidió con el almacenado.
    Matched,
    /// Modo update: se sobrescribió lo almacenado sin comparar.
    Updated,
}

/// Resultado de un paso ejecutado. Los pasos posteriores a un fallo no se
/// ejecutan y por lo tanto no aparecen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepResult {
    pub label: String,
    pub kind: StepKind,
    pub status: Outcome,
    /// Fallo del paso, si lo hubo.
    pub error: Option<StepError>,
    /// Sólo presente en CHECK exitosos.
    pub snapshot: Option<SnapshotOutcome>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl StepResult {
    pub fn passed(label: impl Into<String>,
                  kind: StepKind,
                  snapshot: Option<SnapshotOutcome>,
                  started_at: DateTime<Utc>)
                  -> Self {
        Self { label: label.into(),
               kind,
               status: Outcome::Passed,
               error: None,
               snapshot,
               started_at,
               finished_at: Utc::now() }
    }

    pub fn failed(label: impl Into<String>, kind: StepKind, error: StepError, started_at: DateTime<Utc>) -> Self {
        Self { label: label.into(),
               kind,
               status: Outcome::Failed,
               error: Some(error),
               snapshot: None,
               started_at,
               finished_at: Utc::now() }
    }

    pub fn is_failed(&self) -> bool {
        self.status == Outcome::Failed
    }
}

/// Reporte de un flujo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlowReport {
    pub flow_name: String,
    pub outcome: Outcome,
    pub results: Vec<StepResult>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl FlowReport {
    /// Agrega los resultados y calcula el veredicto: falla si algún paso
    /// falló (y por la parada temprana, ese será el último de la lista).
    pub fn from_results(flow_name: impl Into<String>, results: Vec<StepResult>, started_at: DateTime<Utc>) -> Self {
        let outcome = if results.iter().any(StepResult::is_failed) {
            Outcome::Failed
        } else {
            Outcome::Passed
        };
        Self { flow_name: flow_name.into(),
               outcome,
               results,
               started_at,
               finished_at: Utc::now() }
    }

    /// Índice y resultado del paso que falló, si lo hay.
    pub fn failed_step(&self) -> Option<(usize, &StepResult)> {
        self.results.iter().enumerate().find(|(_, r)| r.is_failed())
    }

    /// Cantidad de pasos que llegaron a ejecutarse.
    pub fn executed(&self) -> usize {
        self.results.len()
    }
}

/// Reporte agregado de la corrida completa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunReport {
    pub run_id: Uuid,
    pub flows: Vec<FlowReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl RunReport {
    pub fn outcome(&self) -> Outcome {
        if self.flows.iter().any(|f| f.outcome == Outcome::Failed) {
            Outcome::Failed
        } else {
            Outcome::Passed
        }
    }

    /// Código de salida del proceso: 0 si todo pasó, 1 si algo falló.
    pub fn exit_code(&self) -> i32 {
        match self.outcome() {
            Outcome::Passed => 0,
            Outcome::Failed => 1,
        }
    }

    pub fn passed_flows(&self) -> usize {
        self.flows.iter().filter(|f| f.outcome == Outcome::Passed).count()
    }

    pub fn failed_flows(&self) -> usize {
        self.flows.iter().filter(|f| f.outcome == Outcome::Failed).count()
    }
}
