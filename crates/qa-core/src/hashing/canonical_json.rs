//! Forma canónica de un `Value` para identidad estable.
//!
//! Ordena las claves de los objetos sin depender de cómo almacene serde_json
//! sus mapas internamente, de modo que dos valores estructuralmente iguales
//! producen siempre el mismo texto (y por tanto el mismo hash).

use serde_json::Value;
use std::collections::BTreeMap;

pub fn to_canonical_json(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => serde_json::to_string(s).unwrap_or_default(),
        Value::Array(items) => {
            let inner: Vec<String> = items.iter().map(to_canonical_json).collect();
            format!("[{}]", inner.join(","))
        }
        Value::Object(map) => {
            let sorted: BTreeMap<&String, String> =
                map.iter().map(|(k, v)| (k, to_canonical_json(v))).collect();
            let inner: Vec<String> = sorted.into_iter()
                                           .map(|(k, v)| {
                                               format!("{}:{}",
                                                       serde_json::to_string(k).unwrap_or_default(),
                                                       v)
                                           })
                                           .collect();
            format!("{{{}}}", inner.join(","))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn object_keys_are_sorted() {
        let v = json!({"zeta": 1, "alfa": {"y": true, "x": null}});
        assert_eq!(to_canonical_json(&v), r#"{"alfa":{"x":null,"y":true},"zeta":1}"#);
    }

    #[test]
    fn arrays_keep_positional_order() {
        let v = json!([3, 1, 2]);
        assert_eq!(to_canonical_json(&v), "[3,1,2]");
    }
}
