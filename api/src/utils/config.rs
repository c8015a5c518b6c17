// FICHIER : api/src/utils/config.rs

use crate::raise_error;
use crate::utils::env::{self, prefixed};
use crate::utils::json::{self, Value};
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Constantes Système (valeurs historiques du déploiement SkillsMS)
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 6011;
pub const DEFAULT_SPACE: &str = "skillsms";
pub const DEFAULT_DB: &str = "SkillsMS";
pub const DEFAULT_COLLECTION: &str = "collaborators";
pub const DEFAULT_CACHE_CAPACITY: usize = 1000;

/// Configuration globale structurée par niveaux de responsabilité
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub log: LogConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Préfixe de montage du routeur (ex: "/api"). Vide = racine.
    #[serde(default)]
    pub base_path: String,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreProvider {
    #[default]
    File,
    Memory,
}

impl std::str::FromStr for StoreProvider {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "file" => Ok(StoreProvider::File),
            "memory" => Ok(StoreProvider::Memory),
            other => Err(format!("Fournisseur de stockage inconnu : {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    #[serde(default)]
    pub provider: StoreProvider,
    pub data_root: PathBuf,
    pub space: String,
    pub db: String,
    pub collection: String,
    #[serde(default = "default_cache_capacity")]
    pub cache_capacity: usize,
    /// Fichier JSON de collaborateurs chargé au démarrage si la collection est vide
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LogConfig {
    pub level: String,
    /// Dossier des logs JSON (rotation quotidienne). Absent = console seule.
    #[serde(default)]
    pub dir: Option<PathBuf>,
}

// --- HELPERS SERDE ---

fn default_cache_capacity() -> usize {
    DEFAULT_CACHE_CAPACITY
}

fn default_data_root() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(std::env::temp_dir)
        .join("skillsms_domain")
}

// --- IMPLÉMENTATIONS PAR DÉFAUT ---

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            base_path: String::new(),
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::File,
            data_root: default_data_root(),
            space: DEFAULT_SPACE.to_string(),
            db: DEFAULT_DB.to_string(),
            collection: DEFAULT_COLLECTION.to_string(),
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            seed_file: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            dir: None,
        }
    }
}

// --- IMPLÉMENTATION PRINCIPALE ---

impl AppConfig {
    /// Charge la configuration : défauts <- fichier JSON (optionnel) <- variables d'environnement.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(p) => Self::from_file(p)?,
            None => Self::default(),
        };
        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Lit un fichier JSON partiel et le fusionne par-dessus les défauts.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = match fs::read_to_string(path) {
            Ok(c) => c,
            Err(e) => raise_error!(
                "ERR_CONFIG_FS_READ",
                error = e,
                context = serde_json::json!({ "path": path.to_string_lossy() })
            ),
        };

        let overlay: Value = json::parse(&content)?;
        if !overlay.is_object() {
            raise_error!(
                "ERR_CONFIG_PARSE",
                error = "La configuration doit être un objet JSON",
                context = serde_json::json!({ "path": path.to_string_lossy() })
            );
        }

        let mut base = json::to_value(Self::default())?;
        json::merge(&mut base, overlay);

        match serde_json::from_value(base) {
            Ok(cfg) => Ok(cfg),
            Err(e) => raise_error!(
                "ERR_CONFIG_DESERIALIZE",
                error = e,
                context = serde_json::json!({ "path": path.to_string_lossy() })
            ),
        }
    }

    /// Surcharges `SKILLSMS_*` (priorité la plus haute après la ligne de commande).
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Some(host) = env::get_optional(&prefixed("HOST")) {
            self.server.host = host;
        }
        if let Some(port) = env::get_parsed::<u16>(&prefixed("PORT"))? {
            self.server.port = port;
        }
        if let Some(base) = env::get_optional(&prefixed("BASE_PATH")) {
            self.server.base_path = base;
        }
        if let Some(provider) = env::get_parsed::<StoreProvider>(&prefixed("STORE"))? {
            self.store.provider = provider;
        }
        if let Some(root) = env::get_optional(&prefixed("DATA_ROOT")) {
            self.store.data_root = PathBuf::from(root);
        }
        if let Some(seed) = env::get_optional(&prefixed("SEED_FILE")) {
            self.store.seed_file = Some(PathBuf::from(seed));
        }
        if let Some(level) = env::get_optional(&prefixed("LOG_LEVEL")) {
            self.log.level = level;
        }
        if let Some(dir) = env::get_optional(&prefixed("LOG_DIR")) {
            self.log.dir = Some(PathBuf::from(dir));
        }
        Ok(())
    }

    /// Adresse d'écoute "host:port".
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// --- TESTS UNITAIRES ---
