//! Utilidades para borrar campos volátiles de un `Value` antes de comparar.
//!
//! Los normalizadores típicos eliminan ids generados por el servicio o
//! timestamps. Usamos la sintaxis de punteros JSON de serde_json
//! ("/data/todo/id") para nombrar el campo a eliminar.

use serde_json::Value;

/// Elimina el campo señalado por `pointer` (RFC 6901). Devuelve `true` si
/// algo se eliminó; un puntero que no resuelve deja el valor intacto.
pub fn remove_pointer(value: &mut Value, pointer: &str) -> bool {
    let idx = match pointer.rfind('/') {
        Some(idx) => idx,
        None => return false,
    };
    let (parent, leaf) = (&pointer[..idx], &pointer[idx + 1..]);
    let leaf = leaf.replace("~1", "/").replace("~0", "~");

    match value.pointer_mut(parent) {
        Some(Value::Object(map)) => map.remove(&leaf).is_some(),
        Some(Value::Array(items)) => match leaf.parse::<usize>() {
            Ok(i) if i < items.len() => {
                items.remove(i);
                true
            }
            _ => false,
        },
        _ => false,
    }
}

/// Variante por valor, cómoda para componer normalizadores.
pub fn without_pointer(mut value: Value, pointer: &str) -> Value {
    remove_pointer(&mut value, pointer);
    value
}
