// FICHIER : api/src/api/handlers/mod.rs

//! Logique des opérations : validation → une opération du magasin → résultat typé.
//! Les fonctions axum de `routes` restent minces et délèguent ici.

pub mod collaborator;
pub mod skill;

pub use collaborator::CollaboratorHandler;
pub use skill::SkillHandler;
