// FICHIER : api/src/utils/mod.rs

// =========================================================================
//  SKILLSMS UTILS - Foundation Layer
// =========================================================================

pub mod config;
pub mod env;
pub mod error;
pub mod json;
pub mod logger;
pub mod macros;

/// **Le Prélude** : À utiliser via `use crate::utils::prelude::*;`
pub mod prelude {
    pub use super::error::{AppError, Result};
    pub use super::json::{json, Value};
    pub use serde::{Deserialize, Serialize};
    pub use tracing::{debug, error, info, instrument, warn};
}

// --> Config & Erreurs
pub use config::AppConfig;
pub use error::{AppError, Result};
pub use logger::init_logging;
