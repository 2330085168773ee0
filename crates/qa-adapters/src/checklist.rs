//! Checklist de funcionalidad básica del API de tareas.
//!
//! Es la suite de humo del servicio: claves, altas, updates, aislamiento
//! entre claves y limpieza final. Las operaciones comparten estado (claves e
//! ids copiados del contexto) igual que lo haría un script corriendo contra
//! el servicio real.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use qa_core::step::{ActOperation, OpError, OpResult};
use qa_core::{flow, Flow};
use serde_json::{json, Value};

use crate::normalize::{strip_todo_id, strip_todo_list_ids};
use crate::service::TodoApi;

/// Estado que las operaciones van llenando a medida que avanza el flujo.
#[derive(Debug, Default)]
struct ChecklistState {
    api_key: String,
    api_key2: String,
    id1: String,
    id2: String,
}

type SharedState = Arc<Mutex<ChecklistState>>;

fn lock_state(state: &SharedState) -> Result<MutexGuard<'_, ChecklistState>, OpError> {
    state.lock().map_err(|_| "checklist state poisoned".into())
}

/// GET /todos con la clave principal vigente. Se reutiliza en varios pasos.
#[derive(Clone)]
struct FetchTodos {
    api: TodoApi,
    state: SharedState,
}

#[async_trait]
impl ActOperation for FetchTodos {
    async fn call(&self, _input: Value) -> OpResult {
        let key = lock_state(&self.state)?.api_key.clone();
        Ok(self.api.get("/todos", Some(&key)).await)
    }
}

/// Construye el flujo "Basic API functionality" contra `api`.
///
/// Las etiquetas de los CHECK son las claves de snapshot (prefijadas por el
/// nombre del flujo); cambiarlas huerfana los snapshots ya grabados.
pub fn basic_api_checklist(api: &TodoApi) -> Flow {
    let state: SharedState = Arc::new(Mutex::new(ChecklistState::default()));
    let fetch = FetchTodos { api: api.clone(),
                             state: state.clone() };

    let mut f = flow("Basic API functionality");

    // Rutas inexistentes responden 404.
    let a = api.clone();
    f = f.act("ping API endpoints that don't exist", move |_ctx| {
        let a = a.clone();
        async move { Ok(a.get("/intentional-4o4", None).await) }
    });
    f = f.check("returns 404 not found");

    // Sin clave no hay lista.
    let a = api.clone();
    f = f.act("ping URL requiring authentication", move |_ctx| {
        let a = a.clone();
        async move { Ok(a.get("/todos", None).await) }
    });
    f = f.check("returns 401 not authorized");

    // Con una clave recién emitida, la lista arranca vacía.
    let a = api.clone();
    let st = state.clone();
    f = f.act("get an API key", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let res = a.post("/api-keys", None, Value::Null).await;
            let key = res.pointer("/data/api_key")
                         .and_then(Value::as_str)
                         .ok_or("api-keys response without data.api_key")?
                         .to_string();
            lock_state(&st)?.api_key = key;
            Ok(res)
        }
    });
    f = f.act_op("fetch todos", fetch.clone());
    f = f.check("list should be empty");

    // Un payload inválido no crea nada.
    let a = api.clone();
    let st = state.clone();
    f = f.act("submit some invalid todos", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let key = lock_state(&st)?.api_key.clone();
            Ok(a.post("/todos", Some(&key), json!({"this_payload_format_is": "wrong"})).await)
        }
    });
    f = f.check("invalid todos should return 4xx");

    // Uno válido sí. El id no es determinista, por eso el normalizador.
    let a = api.clone();
    let st = state.clone();
    f = f.act("submit a valid todo", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let key = lock_state(&st)?.api_key.clone();
            Ok(a.post("/todos", Some(&key), json!({"text": "brush teeth"})).await)
        }
    });
    f = f.check_with("returns a 201", strip_todo_id);

    f = f.act_op("fetch todos", fetch.clone());
    f = f.check_with("list should have one todo", strip_todo_list_ids);

    let a = api.clone();
    let st = state.clone();
    f = f.act("submit a second todo", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let key = lock_state(&st)?.api_key.clone();
            Ok(a.post("/todos", Some(&key), json!({"text": "wash face"})).await)
        }
    });
    f = f.act_op("fetch todos", fetch.clone());

    // Este paso lee el contexto (la lista recién pedida) y lo devuelve tal
    // cual: sólo copia los ids para los pasos que vienen.
    let st = state.clone();
    f = f.act("copy down the ids of the todos", move |ctx| {
        let st = st.clone();
        async move {
            let todos = ctx.pointer("/data/todos").and_then(Value::as_array).cloned().unwrap_or_default();
            if todos.len() < 2 {
                return Err(format!("expected two todos in context, got {}", todos.len()).into());
            }
            let mut s = lock_state(&st)?;
            s.id1 = todos[0].get("id").and_then(Value::as_str).unwrap_or_default().to_string();
            s.id2 = todos[1].get("id").and_then(Value::as_str).unwrap_or_default().to_string();
            drop(s);
            Ok(ctx)
        }
    });
    f = f.check_with("list should have two items", strip_todo_list_ids);

    let a = api.clone();
    let st = state.clone();
    f = f.act("mark first todo as 'done'", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let (key, id1) = {
                let s = lock_state(&st)?;
                (s.api_key.clone(), s.id1.clone())
            };
            Ok(a.put(&format!("/todos/{id1}"), Some(&key), json!({"done": true})).await)
        }
    });
    f = f.act_op("fetch todos", fetch.clone());
    f = f.check_with("first todo should be done", strip_todo_list_ids);

    let a = api.clone();
    let st = state.clone();
    f = f.act("change text of second todo", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let (key, id2) = {
                let s = lock_state(&st)?;
                (s.api_key.clone(), s.id2.clone())
            };
            Ok(a.put(&format!("/todos/{id2}"), Some(&key), json!({"text": "wash face gently"})).await)
        }
    });
    f = f.act_op("fetch todos", fetch.clone());
    f = f.check_with("second todo has new text", strip_todo_list_ids);

    // Una segunda clave no ve los todos de la primera.
    let a = api.clone();
    let st = state.clone();
    f = f.act("get a second API key", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let res = a.post("/api-keys", None, Value::Null).await;
            let key = res.pointer("/data/api_key")
                         .and_then(Value::as_str)
                         .ok_or("api-keys response without data.api_key")?
                         .to_string();
            lock_state(&st)?.api_key2 = key;
            Ok(res)
        }
    });
    let a = api.clone();
    let st = state.clone();
    f = f.act("get todos for second API key", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let key2 = lock_state(&st)?.api_key2.clone();
            Ok(a.get("/todos", Some(&key2)).await)
        }
    });
    f = f.check("second list should be empty");

    let a = api.clone();
    let st = state.clone();
    f = f.act("delete a todo", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let (key, id1) = {
                let s = lock_state(&st)?;
                (s.api_key.clone(), s.id1.clone())
            };
            Ok(a.delete(&format!("/todos/{id1}"), Some(&key)).await)
        }
    });
    f = f.act_op("fetch todos", fetch.clone());
    f = f.check_with("first todo is deleted", strip_todo_list_ids);

    let a = api.clone();
    let st = state.clone();
    f = f.act("delete second todo", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let (key, id2) = {
                let s = lock_state(&st)?;
                (s.api_key.clone(), s.id2.clone())
            };
            Ok(a.delete(&format!("/todos/{id2}"), Some(&key)).await)
        }
    });
    f = f.act_op("fetch todos", fetch.clone());
    f = f.check_with("second todo is deleted", strip_todo_list_ids);

    // Limpieza: las claves borradas dejan de autenticar.
    let a = api.clone();
    let st = state.clone();
    f = f.act("delete second API key", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let key2 = lock_state(&st)?.api_key2.clone();
            Ok(a.delete("/api-keys", Some(&key2)).await)
        }
    });
    let a = api.clone();
    let st = state.clone();
    f = f.act("test second API key", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let key2 = lock_state(&st)?.api_key2.clone();
            Ok(a.get("/todos", Some(&key2)).await)
        }
    });
    f = f.check("second key should be invalid");

    let a = api.clone();
    let st = state.clone();
    f = f.act("delete first API key", move |_ctx| {
        let a = a.clone();
        let st = st.clone();
        async move {
            let key = lock_state(&st)?.api_key.clone();
            Ok(a.delete("/api-keys", Some(&key)).await)
        }
    });
    f = f.act_op("test first API key", fetch);
    f = f.check("first key should be invalid");

    f.build()
}
