// FICHIER : api/src/utils/env.rs

use crate::utils::{AppError, Result};
use std::env;
use std::str::FromStr;

/// Préfixe commun de toutes les variables du service.
pub const ENV_PREFIX: &str = "SKILLSMS_";

/// Nom complet d'une variable (ex: `PORT` -> `SKILLSMS_PORT`).
pub fn prefixed(key: &str) -> String {
    format!("{}{}", ENV_PREFIX, key)
}

/// Récupère une variable d'environnement (Optionnel).
/// Une valeur vide est considérée comme absente.
pub fn get_optional(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Récupère et parse une variable optionnelle (ex: PORT=6011).
/// `Ok(None)` si absente, erreur de configuration si elle ne se parse pas.
pub fn get_parsed<T: FromStr>(key: &str) -> Result<Option<T>> {
    match get_optional(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse::<T>().map(Some).map_err(|_| {
            AppError::Config(format!(
                "Impossible de parser la variable {} (valeur: '{}')",
                key, raw
            ))
        }),
    }
}
