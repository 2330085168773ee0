//! Normalizadores de la checklist.
//!
//! Borran los campos no deterministas (ids generados por el servicio) antes
//! de comparar contra el snapshot. Sin esto, cada corrida fallaría contra la
//! anterior.

use qa_core::model::redact::remove_pointer;
use serde_json::Value;

/// Quita el id volátil de una respuesta con un único todo (`data.todo.id`).
pub fn strip_todo_id(mut res: Value) -> Value {
    remove_pointer(&mut res, "/data/todo/id");
    res
}

/// Quita el id de cada elemento de una lista (`data.todos[*].id`).
pub fn strip_todo_list_ids(mut res: Value) -> Value {
    if let Some(items) = res.pointer_mut("/data/todos").and_then(Value::as_array_mut) {
        for item in items.iter_mut() {
            if let Some(obj) = item.as_object_mut() {
                obj.remove("id");
            }
        }
    }
    res
}
