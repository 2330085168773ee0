//! Implementación de `SnapshotStore` sobre un único archivo JSON.
//!
//! Formato del archivo:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "snapshots": { "flujo::etiqueta": { "...": "..." } }
//! }
//! ```
//!
//! Las claves conservan el orden de grabación (IndexMap), así los diffs del
//! archivo bajo control de versiones siguen el orden de los flujos. El
//! archivo no guarda timestamps ni metadatos de corrida: regrabar los mismos
//! valores produce bytes idénticos.

use std::fs;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use qa_core::constants::SNAPSHOT_FORMAT_VERSION;
use qa_core::errors::SnapshotError;
use qa_core::snapshot::SnapshotStore;

use crate::config::StoreConfig;
use crate::error::PersistenceError;

#[derive(Debug, Serialize, Deserialize)]
struct SnapshotFile {
    format_version: u32,
    snapshots: IndexMap<String, Value>,
}

/// Almacén durable de snapshots sobre un archivo JSON.
#[derive(Debug)]
pub struct FileSnapshotStore {
    path: PathBuf,
    entries: IndexMap<String, Value>,
    dirty: bool,
}

impl FileSnapshotStore {
    /// Abre el archivo, o lo crea vacío si no existe (incluyendo directorios
    /// intermedios). Crearlo acá hace que los problemas de ruta o permisos
    /// aparezcan antes de ejecutar ningún flujo.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, PersistenceError> {
        let path = path.into();
        let mut store = Self { path,
                               entries: IndexMap::new(),
                               dirty: false };
        if store.path.exists() {
            store.entries = Self::load(&store.path)?;
            debug!("file_store:open path={} snapshots={}", store.path.display(), store.entries.len());
        } else {
            if let Some(parent) = store.path.parent() {
                if !parent.as_os_str().is_empty() {
                    fs::create_dir_all(parent)?;
                }
            }
            store.write_atomic()?;
            debug!("file_store:create path={}", store.path.display());
        }
        Ok(store)
    }

    pub fn from_config(cfg: &StoreConfig) -> Result<Self, PersistenceError> {
        Self::open(&cfg.path)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn load(path: &Path) -> Result<IndexMap<String, Value>, PersistenceError> {
        let raw = fs::read_to_string(path)?;
        let file: SnapshotFile = serde_json::from_str(&raw)?;
        if file.format_version != SNAPSHOT_FORMAT_VERSION {
            return Err(PersistenceError::UnsupportedFormat(file.format_version));
        }
        Ok(file.snapshots)
    }

    // Escritura atómica: temporal vecino + rename. Un corte a mitad de la
    // escritura nunca deja el archivo final truncado.
    fn write_atomic(&self) -> Result<(), PersistenceError> {
        let file = SnapshotFile { format_version: SNAPSHOT_FORMAT_VERSION,
                                  snapshots: self.entries.clone() };
        let body = serde_json::to_string_pretty(&file)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, body)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.entries.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) {
        self.entries.insert(key.to_string(), value);
        self.dirty = true;
    }

    fn exists(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Orden de grabación, igual al del archivo.
    fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    fn remove(&mut self, key: &str) -> bool {
        let removed = self.entries.shift_remove(key).is_some();
        if removed {
            self.dirty = true;
        }
        removed
    }

    fn persist(&mut self) -> Result<(), SnapshotError> {
        if !self.dirty {
            return Ok(());
        }
        self.write_atomic().map_err(SnapshotError::from)?;
        self.dirty = false;
        debug!("file_store:persist path={} snapshots={}", self.path.display(), self.entries.len());
        Ok(())
    }
}
