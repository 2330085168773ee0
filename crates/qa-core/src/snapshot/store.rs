//! Almacenamiento de snapshots clave → valor.

use std::collections::HashMap;

use serde_json::Value;

use crate::errors::SnapshotError;

/// Almacén de snapshots.
///
/// Las mutaciones (`put`, `remove`) operan sobre el estado en memoria; la
/// durabilidad llega con `persist`, que el runner invoca al cerrar cada
/// flujo. La variante en memoria simplemente la ignora.
pub trait SnapshotStore {
    /// Valor almacenado bajo `key`, si existe.
    fn get(&self, key: &str) -> Option<Value>;
    /// Inserta o reemplaza el valor bajo `key`.
    fn put(&mut self, key: &str, value: Value);
    /// `true` si la clave existe.
    fn exists(&self, key: &str) -> bool {
        self.get(key).is_some()
    }
    /// Todas las claves conocidas, en el orden propio del backend.
    fn keys(&self) -> Vec<String>;
    /// Elimina una clave. Devuelve `true` si existía.
    fn remove(&mut self, key: &str) -> bool;
    /// Vuelca el estado al medio durable del backend.
    fn persist(&mut self) -> Result<(), SnapshotError>;
}

/// Almacén efímero para tests y corridas exploratorias.
pub struct InMemorySnapshotStore { pub inner: HashMap<String, Value> }

impl Default for InMemorySnapshotStore {
    fn default() -> Self {
        Self { inner: HashMap::new() }
    }
}

impl InMemorySnapshotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn get(&self, key: &str) -> Option<Value> {
        self.inner.get(key).cloned()
    }

    fn put(&mut self, key: &str, value: Value) {
        self.inner.insert(key.to_string(), value);
    }

    fn exists(&self, key: &str) -> bool {
        self.inner.contains_key(key)
    }

    // HashMap no tiene orden propio: devolvemos alfabético para que los
    // listados sean estables.
    fn keys(&self) -> Vec<String> {
        let mut ks: Vec<String> = self.inner.keys().cloned().collect();
        ks.sort();
        ks
    }

    fn remove(&mut self, key: &str) -> bool {
        self.inner.remove(key).is_some()
    }

    fn persist(&mut self) -> Result<(), SnapshotError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn put_get_remove_roundtrip() {
        let mut store = InMemorySnapshotStore::new();
        assert!(!store.exists("f::a"));

        store.put("f::a", json!({"ok": true}));
        assert_eq!(store.get("f::a"), Some(json!({"ok": true})));
        assert!(store.exists("f::a"));

        assert!(store.remove("f::a"));
        assert!(!store.remove("f::a"));
        assert_eq!(store.get("f::a"), None);
    }

    #[test]
    fn keys_are_sorted() {
        let mut store = InMemorySnapshotStore::new();
        store.put("b", json!(2));
        store.put("a", json!(1));
        store.put("c", json!(3));
        assert_eq!(store.keys(), vec!["a", "b", "c"]);
    }
}
