//! Registro de flujos: valida nombres y controla duplicados.

use log::warn;

use super::definition::Flow;
use crate::errors::EngineError;

/// Política ante dos flujos registrados con el mismo nombre.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicatePolicy {
    /// Rechaza el segundo registro. Es el valor por defecto: dos flujos
    /// homónimos compartirían claves de snapshot.
    #[default]
    Forbid,
    /// El último registro reemplaza al anterior conservando su posición.
    Replace,
}

/// Colección ordenada de flujos a ejecutar. El orden de registro es el orden
/// de ejecución.
#[derive(Debug, Default)]
pub struct FlowRegistry {
    flows: Vec<Flow>,
    policy: DuplicatePolicy,
}

impl FlowRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: DuplicatePolicy) -> Self {
        Self { flows: Vec::new(),
               policy }
    }

    /// Registra un flujo. El nombre no puede ser vacío (participa en las
    /// claves de snapshot) y los duplicados se resuelven según la política.
    pub fn register(&mut self, flow: Flow) -> Result<(), EngineError> {
        if flow.name().trim().is_empty() {
            return Err(EngineError::InvalidFlowName);
        }
        if let Some(pos) = self.flows.iter().position(|f| f.name() == flow.name()) {
            return match self.policy {
                DuplicatePolicy::Forbid => Err(EngineError::DuplicateFlow(flow.name().to_string())),
                DuplicatePolicy::Replace => {
                    warn!("registry:replace flow={}", flow.name());
                    self.flows[pos] = flow;
                    Ok(())
                }
            };
        }
        self.flows.push(flow);
        Ok(())
    }

    pub fn flows(&self) -> &[Flow] {
        &self.flows
    }

    pub fn len(&self) -> usize {
        self.flows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.flows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::flow;

    #[test]
    fn forbid_rejects_duplicate_name() {
        let mut reg = FlowRegistry::new();
        reg.register(flow("a").build()).unwrap();
        let err = reg.register(flow("a").build()).unwrap_err();
        assert_eq!(err, EngineError::DuplicateFlow("a".to_string()));
        assert_eq!(reg.len(), 1);
    }

    #[test]
    fn replace_keeps_original_position() {
        let mut reg = FlowRegistry::with_policy(DuplicatePolicy::Replace);
        reg.register(flow("a").build()).unwrap();
        reg.register(flow("b").build()).unwrap();
        reg.register(flow("a").check("nuevo paso").build()).unwrap();

        assert_eq!(reg.len(), 2);
        assert_eq!(reg.flows()[0].name(), "a");
        assert_eq!(reg.flows()[0].len(), 1);
        assert_eq!(reg.flows()[1].name(), "b");
    }

    #[test]
    fn empty_name_is_invalid() {
        let mut reg = FlowRegistry::new();
        assert_eq!(reg.register(flow("  ").build()).unwrap_err(), EngineError::InvalidFlowName);
    }
}
