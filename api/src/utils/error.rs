// FICHIER : api/src/utils/error.rs

use serde::Serialize;
use serde_json::Value;
use std::io;

// --- GESTION D'ERREUR STRICTE ---

/// Type de résultat standard du service SkillsMS.
pub type Result<T> = std::result::Result<T, AppError>;

/// Enumération centrale des erreurs de l'application.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Erreur de configuration : {0}")]
    Config(String),

    #[error("Erreur d'entrée/sortie : {0}")]
    Io(#[from] io::Error),

    #[error("Erreur Base de Données : {0}")]
    Database(String),

    #[error("Erreur Système : {0}")]
    System(#[from] anyhow::Error),

    #[error("Introuvable : {0}")]
    NotFound(String),

    #[error("Erreur de sérialisation : {0}")]
    Serialization(#[from] serde_json::Error),

    /// Erreur enrichie produite par `raise_error!` (clé stable + contexte JSON)
    #[error("[{key}] {message}")]
    Structured {
        key: String,
        message: String,
        context: Value,
    },
}

impl AppError {
    /// Clé stable de l'erreur, utile pour les logs et les tests.
    pub fn key(&self) -> &str {
        match self {
            AppError::Config(_) => "ERR_CONFIG",
            AppError::Io(_) => "ERR_IO",
            AppError::Database(_) => "ERR_DATABASE",
            AppError::System(_) => "ERR_SYSTEM",
            AppError::NotFound(_) => "ERR_NOT_FOUND",
            AppError::Serialization(_) => "ERR_SERIALIZATION",
            AppError::Structured { key, .. } => key,
        }
    }
}

// Sérialisation en simple chaîne pour les réponses et les logs JSON
impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(self.to_string().as_ref())
    }
}

// Permet de faire : return Err("Mon erreur".into());
impl From<String> for AppError {
    fn from(s: String) -> Self {
        AppError::System(anyhow::anyhow!(s))
    }
}

impl From<&str> for AppError {
    fn from(s: &str) -> Self {
        AppError::System(anyhow::anyhow!(s.to_string()))
    }
}
