//! Operaciones asíncronas de los pasos ACT y normalizadores de CHECK.

use std::future::Future;

use async_trait::async_trait;
use serde_json::Value;

/// Error libre de una operación. El ejecutor lo aplana a texto en el reporte,
/// así que cualquier `Error` sirve (incluido un `String` vía `.into()`).
pub type OpError = Box<dyn std::error::Error + Send + Sync>;

/// Resultado de una operación ACT: el nuevo valor de contexto o un fallo.
pub type OpResult = Result<Value, OpError>;

/// Transformación pura aplicada al contexto antes de comparar un CHECK.
/// Se aplica tanto al grabar como al verificar, nunca muta el contexto vivo.
pub type Normalizer = Box<dyn Fn(Value) -> Value + Send + Sync>;

/// Operación de un paso ACT.
///
/// Recibe el contexto vigente por valor y produce el siguiente. Implementarla
/// directamente conviene para operaciones con estado reutilizadas en varios
/// pasos; para el resto alcanza con una closure vía `FnOperation`.
#[async_trait]
pub trait ActOperation: Send + Sync {
    async fn call(&self, input: Value) -> OpResult;
}

/// Adaptador que convierte una closure async en `ActOperation`.
pub struct FnOperation<F> {
    f: F,
}

impl<F> FnOperation<F> {
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

#[async_trait]
impl<F, Fut> ActOperation for FnOperation<F>
    where F: Fn(Value) -> Fut + Send + Sync,
          Fut: Future<Output = OpResult> + Send + 'static
{
    async fn call(&self, input: Value) -> OpResult {
        (self.f)(input).await
    }
}
