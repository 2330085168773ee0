//! Contexto propagado a lo largo de una cadena de pasos.

use serde_json::Value;

/// Valor que fluye de un ACT al siguiente paso.
///
/// Arranca en `Null` (los flujos no reciben entrada externa) y cada ACT que
/// termina bien lo reemplaza por completo. Los CHECK sólo lo leen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutionContext {
    current: Value,
}

impl ExecutionContext {
    pub fn new() -> Self {
        Self { current: Value::Null }
    }

    /// Reemplaza el contexto con la salida de un ACT.
    pub fn replace(&mut self, next: Value) {
        self.current = next;
    }

    /// Copia del valor actual (los pasos reciben el valor por propiedad).
    pub fn cloned(&self) -> Value {
        self.current.clone()
    }

    pub fn value(&self) -> &Value {
        &self.current
    }
}

impl Default for ExecutionContext {
    fn default() -> Self {
        Self::new()
    }
}
