//! Snapshots: claves, modo de corrida y almacenes.

pub mod key;
pub mod store;

pub use key::{derive_flow_keys, SnapshotKey};
pub use store::{InMemorySnapshotStore, SnapshotStore};

/// Modo de la corrida completa. Se fija al construir el runner y aplica a
/// todos los flujos por igual.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    /// Compara contra lo almacenado; un snapshot inexistente se graba.
    #[default]
    Verify,
    /// Sobrescribe incondicionalmente lo almacenado. Ningún CHECK falla por
    /// contenido en este modo.
    Update,
}
