// FICHIER : api/src/lib.rs

//! SkillsMS : API HTTP des collaborateurs et de leurs compétences,
//! adossée au moteur documentaire `json_db`.

pub mod api;
pub mod json_db;
pub mod model;
pub mod store;
pub mod utils;

pub use api::{build_router, AppState};
pub use store::{open_store, DocumentStore};
pub use utils::{AppConfig, AppError, Result};
