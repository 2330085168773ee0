//! Carga de configuración del almacén desde variables de entorno.
//! Usa convención `QA_SNAPSHOT_PATH` y `QA_SNAPSHOT_UPDATE`.

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;
use once_cell::sync::Lazy;
use qa_core::RunMode;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

/// Ruta por defecto del archivo de snapshots, relativa al directorio de trabajo.
pub const DEFAULT_SNAPSHOT_PATH: &str = "qa_snapshots.json";

#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub path: PathBuf,
    pub mode: RunMode,
}

impl StoreConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let path = env::var("QA_SNAPSHOT_PATH").map(PathBuf::from)
                                               .unwrap_or_else(|_| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        let mode = match env::var("QA_SNAPSHOT_UPDATE").ok().as_deref() {
            Some("1") | Some("true") | Some("yes") => RunMode::Update,
            _ => RunMode::Verify,
        };
        Self { path, mode }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
