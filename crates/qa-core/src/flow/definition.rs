//! Flujos y su builder encadenable.
//!
//! Un flujo se declara una vez y se ejecuta tal cual: el builder acumula los
//! pasos en orden de declaración y `build` lo congela. El orden importa
//! porque las claves de snapshot derivan de él.

use std::future::Future;

use serde_json::Value;

use crate::step::{ActOperation, FnOperation, OpResult, Step};

/// Secuencia nombrada de pasos. Inmutable una vez construida.
#[derive(Debug)]
pub struct Flow {
    name: String,
    steps: Vec<Step>,
}

impl Flow {
    /// Crea un builder para un flujo con este nombre.
    #[inline]
    pub fn builder(name: impl Into<String>) -> FlowBuilder {
        FlowBuilder::new(name)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

/// Alias libre del builder: `flow("nombre").act(...).check(...).build()`.
#[inline]
pub fn flow(name: impl Into<String>) -> FlowBuilder {
    FlowBuilder::new(name)
}

/// Builder que acumula pasos ACT y CHECK en orden de declaración.
#[derive(Debug)]
pub struct FlowBuilder {
    name: String,
    steps: Vec<Step>,
}

impl FlowBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(),
               steps: Vec::new() }
    }

    /// Añade un ACT a partir de una closure async.
    #[inline]
    pub fn act<F, Fut>(mut self, label: impl Into<String>, operation: F) -> Self
        where F: Fn(Value) -> Fut + Send + Sync + 'static,
              Fut: Future<Output = OpResult> + Send + 'static
    {
        self.steps.push(Step::Act { label: label.into(),
                                    operation: Box::new(FnOperation::new(operation)) });
        self
    }

    /// Añade un ACT con una operación ya construida (útil para structs con
    /// estado reutilizados en varios pasos).
    #[inline]
    pub fn act_op(mut self, label: impl Into<String>, operation: impl ActOperation + 'static) -> Self {
        self.steps.push(Step::Act { label: label.into(),
                                    operation: Box::new(operation) });
        self
    }

    /// Añade un CHECK que compara el contexto tal cual.
    #[inline]
    pub fn check(mut self, label: impl Into<String>) -> Self {
        self.steps.push(Step::Check { label: label.into(), normalizer: None });
        self
    }

    /// Añade un CHECK con normalizador. Se aplica la misma función al grabar
    /// y al verificar, así la comparación es estable entre corridas.
    #[inline]
    pub fn check_with<N>(mut self, label: impl Into<String>, normalizer: N) -> Self
        where N: Fn(Value) -> Value + Send + Sync + 'static
    {
        self.steps.push(Step::Check { label: label.into(),
                                      normalizer: Some(Box::new(normalizer)) });
        self
    }

    /// Congela la definición.
    pub fn build(self) -> Flow {
        Flow { name: self.name,
               steps: self.steps }
    }
}
