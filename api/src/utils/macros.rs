// FICHIER : api/src/utils/macros.rs

/// Logue une erreur structurée puis retourne `Err(AppError::Structured)`.
///
/// Formes acceptées :
/// - `raise_error!("ERR_KEY", error = e)`
/// - `raise_error!("ERR_KEY", error = e, context = json!({ ... }))`
///
/// La macro fait un `return` : elle s'utilise dans une fonction qui renvoie
/// `crate::utils::Result<T>` (ou un type construit depuis `AppError`).
#[macro_export]
macro_rules! raise_error {
    ($key:expr, error = $err:expr, context = $ctx:expr) => {{
        let message = $err.to_string();
        let context: serde_json::Value = $ctx;
        tracing::error!(
            event = "raise_error",
            key = $key,
            error = %message,
            context = %context
        );
        return Err($crate::utils::error::AppError::Structured {
            key: $key.to_string(),
            message,
            context,
        }
        .into());
    }};
    ($key:expr, error = $err:expr) => {{
        $crate::raise_error!($key, error = $err, context = serde_json::Value::Null)
    }};
}
