//! Claves de snapshot derivadas de la definición del flujo.
//!
//! La clave identifica un CHECK de forma estable entre corridas: nombre del
//! flujo, separador y etiqueta del paso. Dos CHECK con la misma etiqueta en
//! el mismo flujo se distinguen por orden de aparición con un sufijo `#n`;
//! insertar pasos con otras etiquetas no altera las claves existentes.

use std::collections::HashMap;
use std::fmt;

use crate::constants::{KEY_SEPARATOR, OCCURRENCE_MARKER};
use crate::step::Step;

/// Clave estable de un snapshot (`flujo::etiqueta`, `flujo::etiqueta#2`...).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SnapshotKey {
    key: String,
}

impl SnapshotKey {
    /// Deriva la clave para la ocurrencia `occurrence` (base 1) de `label`.
    pub fn derive(flow_name: &str, label: &str, occurrence: usize) -> Self {
        let key = if occurrence <= 1 {
            format!("{flow_name}{KEY_SEPARATOR}{label}")
        } else {
            format!("{flow_name}{KEY_SEPARATOR}{label}{OCCURRENCE_MARKER}{occurrence}")
        };
        Self { key }
    }

    pub fn as_str(&self) -> &str {
        &self.key
    }

    /// Prefijo que comparten todas las claves de un flujo. Sirve para podar
    /// por flujo completo desde las herramientas.
    pub fn flow_prefix(flow_name: &str) -> String {
        format!("{flow_name}{KEY_SEPARATOR}")
    }
}

impl fmt::Display for SnapshotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.key)
    }
}

/// Claves de todos los CHECK de un flujo, en orden de definición.
pub fn derive_flow_keys(flow_name: &str, steps: &[Step]) -> Vec<SnapshotKey> {
    let mut seen: HashMap<&str, usize> = HashMap::new();
    steps.iter()
         .filter_map(|step| match step {
             Step::Check { label, .. } => {
                 let n = seen.entry(label.as_str()).or_insert(0);
                 *n += 1;
                 Some(SnapshotKey::derive(flow_name, label, *n))
             }
             Step::Act { .. } => None,
         })
         .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flow::flow;
    use serde_json::json;

    #[test]
    fn first_occurrence_has_no_suffix() {
        let k = SnapshotKey::derive("Mi flujo", "lista vacía", 1);
        assert_eq!(k.as_str(), "Mi flujo::lista vacía");
    }

    #[test]
    fn repeated_labels_get_ordinal_suffix() {
        let f = flow("f").check("x")
                         .act("a", |_ctx| async { Ok(json!(null)) })
                         .check("x")
                         .check("y")
                         .check("x")
                         .build();
        let keys: Vec<String> = derive_flow_keys(f.name(), f.steps()).iter()
                                                                     .map(|k| k.to_string())
                                                                     .collect();
        assert_eq!(keys, vec!["f::x", "f::x#2", "f::y", "f::x#3"]);
    }

    #[test]
    fn inserting_unrelated_checks_preserves_existing_keys() {
        let before = flow("f").check("a").check("b").build();
        let after = flow("f").check("a").check("nuevo").check("b").build();

        let keys_before = derive_flow_keys(before.name(), before.steps());
        let keys_after = derive_flow_keys(after.name(), after.steps());

        assert!(keys_after.contains(&keys_before[0]));
        assert!(keys_after.contains(&keys_before[1]));
    }
}
