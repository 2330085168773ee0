//! Servicio de tareas en memoria contra el que corre la checklist.
//!
//! Reproduce un API HTTP chico (claves tipo basic auth, una lista de todos
//! por clave) sin levantar red: cada método devuelve el cuerpo JSON que
//! devolvería el servicio real, con el status embebido en el cuerpo. Los ids
//! y las claves son aleatorios a propósito: obligan a los normalizadores a
//! hacer su trabajo.

use std::sync::Arc;

use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TodoItem {
    id: String,
    text: String,
    done: bool,
}

/// API de tareas falsa. Clonar es barato y todas las copias comparten estado.
#[derive(Debug, Clone, Default)]
pub struct TodoApi {
    lists: Arc<DashMap<String, Vec<TodoItem>>>,
}

impl TodoApi {
    pub fn new() -> Self {
        Self::default()
    }

    /// GET `path`, con clave opcional (equivale al user de basic auth).
    pub async fn get(&self, path: &str, key: Option<&str>) -> Value {
        self.route("GET", path, key, Value::Null)
    }

    pub async fn post(&self, path: &str, key: Option<&str>, body: Value) -> Value {
        self.route("POST", path, key, body)
    }

    pub async fn put(&self, path: &str, key: Option<&str>, body: Value) -> Value {
        self.route("PUT", path, key, body)
    }

    pub async fn delete(&self, path: &str, key: Option<&str>) -> Value {
        self.route("DELETE", path, key, Value::Null)
    }

    fn route(&self, method: &str, path: &str, key: Option<&str>, body: Value) -> Value {
        let segments: Vec<&str> = path.trim_start_matches('/').split('/').collect();
        match (method, segments.as_slice()) {
            ("POST", ["api-keys"]) => self.create_key(),
            ("DELETE", ["api-keys"]) => self.with_key(key, |api, k| api.delete_key(k)),
            ("GET", ["todos"]) => self.with_key(key, |api, k| api.list_todos(k)),
            ("POST", ["todos"]) => self.with_key(key, |api, k| api.create_todo(k, &body)),
            ("PUT", ["todos", id]) => self.with_key(key, |api, k| api.update_todo(k, id, &body)),
            ("DELETE", ["todos", id]) => self.with_key(key, |api, k| api.delete_todo(k, id)),
            _ => error_body(404, "not found"),
        }
    }

    // Toda ruta autenticada pasa por acá: clave ausente o desconocida es 401.
    fn with_key<F>(&self, key: Option<&str>, f: F) -> Value
        where F: FnOnce(&Self, &str) -> Value
    {
        match key {
            Some(k) if self.lists.contains_key(k) => f(self, k),
            _ => error_body(401, "unauthorized"),
        }
    }

    fn create_key(&self) -> Value {
        let mut hasher = Sha256::new();
        hasher.update(Uuid::new_v4().as_bytes());
        let key = format!("{:x}", hasher.finalize());
        self.lists.insert(key.clone(), Vec::new());
        json!({"status": 201, "data": {"api_key": key}})
    }

    fn delete_key(&self, key: &str) -> Value {
        self.lists.remove(key);
        json!({"status": 200, "data": {"deleted": 1}})
    }

    fn list_todos(&self, key: &str) -> Value {
        let todos = self.lists.get(key).map(|l| l.clone()).unwrap_or_default();
        json!({"status": 200, "data": {"todos": todos}})
    }

    fn create_todo(&self, key: &str, body: &Value) -> Value {
        let text = match body.get("text").and_then(Value::as_str) {
            Some(t) if !t.is_empty() => t.to_string(),
            _ => return error_body(422, "invalid todo payload"),
        };
        let todo = TodoItem { id: Uuid::new_v4().simple().to_string(),
                              text,
                              done: false };
        if let Some(mut list) = self.lists.get_mut(key) {
            list.push(todo.clone());
        }
        json!({"status": 201, "data": {"todo": todo}})
    }

    fn update_todo(&self, key: &str, id: &str, body: &Value) -> Value {
        let mut list = match self.lists.get_mut(key) {
            Some(l) => l,
            None => return error_body(401, "unauthorized"),
        };
        match list.iter_mut().find(|t| t.id == id) {
            Some(todo) => {
                if let Some(done) = body.get("done").and_then(Value::as_bool) {
                    todo.done = done;
                }
                if let Some(text) = body.get("text").and_then(Value::as_str) {
                    todo.text = text.to_string();
                }
                json!({"status": 200, "data": {"todo": todo.clone()}})
            }
            None => error_body(404, "not found"),
        }
    }

    fn delete_todo(&self, key: &str, id: &str) -> Value {
        if let Some(mut list) = self.lists.get_mut(key) {
            let before = list.len();
            list.retain(|t| t.id != id);
            if list.len() < before {
                return json!({"status": 200, "data": {"deleted": 1}});
            }
        }
        error_body(404, "not found")
    }
}

fn error_body(status: u16, message: &str) -> Value {
    json!({"status": status, "error": message})
}
