//! Isolation des opérations lecture-modification-écriture

pub mod lock_manager;

pub use lock_manager::LockManager;
