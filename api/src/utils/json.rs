// FICHIER : api/src/utils/json.rs

use crate::raise_error;
use crate::utils::Result;
use serde::de::DeserializeOwned;
use serde::Serialize;

// --- RE-EXPORTS (Single Source of Truth pour le JSON) ---
pub use serde_json::{json, Map, Value};

/// Parse une chaîne JSON en un type T.
/// Capture l'erreur de parsing avec un extrait du contenu en cas d'échec.
pub fn parse<T: DeserializeOwned>(s: &str) -> Result<T> {
    match serde_json::from_str(s) {
        Ok(val) => Ok(val),
        Err(e) => {
            // On capture un extrait du JSON pour aider au débogage
            let snippet: String = s.chars().take(100).collect();
            raise_error!(
                "ERR_JSON_PARSE",
                error = e,
                context = json!({ "snippet": snippet })
            );
        }
    }
}

/// Convertit un `serde_json::Value` en type T.
pub fn from_value<T: DeserializeOwned>(v: Value) -> Result<T> {
    match serde_json::from_value(v) {
        Ok(val) => Ok(val),
        Err(e) => raise_error!("ERR_JSON_FROM_VALUE", error = e),
    }
}

/// Convertit un type T en `serde_json::Value`.
pub fn to_value<T: Serialize>(v: T) -> Result<Value> {
    match serde_json::to_value(v) {
        Ok(val) => Ok(val),
        Err(e) => raise_error!("ERR_JSON_TO_VALUE", error = e),
    }
}

/// Fusionne récursivement deux objets JSON (Deep Merge).
/// L'objet `b` écrase les valeurs de `a` en cas de conflit.
pub fn merge(a: &mut Value, b: Value) {
    match (a, b) {
        (Value::Object(a), Value::Object(b)) => {
            for (k, v) in b {
                merge(a.entry(k).or_insert(Value::Null), v);
            }
        }
        (a, b) => *a = b,
    }
}
