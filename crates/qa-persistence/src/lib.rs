//! qa-persistence
//!
//! Backend durable del `SnapshotStore` del core sobre un archivo JSON único,
//! pensado para versionarse junto a la suite de flujos.
//!
//! Módulos:
//! - `fs`: implementación sobre archivo con escritura atómica.
//! - `config`: carga de configuración desde variables de entorno / `.env`.

pub mod config;
pub mod error;
pub mod fs;

pub use config::{init_dotenv, StoreConfig, DEFAULT_SNAPSHOT_PATH};
pub use error::PersistenceError;
pub use fs::FileSnapshotStore;
