//! Moteur de requêtes JSON (filtre, projection, opérateurs de mise à jour)
//!
//! Sémantique calquée sur les bases documentaires classiques :
//! - un `Filter` est une conjonction d'égalités sur des chemins pointés
//!   (`"id"`, `"skills.name"`) ; un chemin qui traverse un tableau est vrai
//!   si au moins un élément correspond ;
//! - le segment positionnel `$` (`"skills.$"`, `"skills.$.level"`) désigne le
//!   premier élément du tableau ayant satisfait le filtre.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::json_db::collections::ID_FIELD;

pub mod executor;

/// Segment positionnel dans un chemin de projection ou de mise à jour.
pub const POSITIONAL: &str = "$";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    pub field: String,
    pub value: Value,
}

impl Condition {
    pub fn eq(field: &str, value: Value) -> Self {
        Self {
            field: field.to_string(),
            value,
        }
    }
}

/// Conjonction (AND) de conditions d'égalité.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Filter {
    pub conditions: Vec<Condition>,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Recherche ponctuelle par clé primaire.
    pub fn by_id(id: &str) -> Self {
        Self::new().eq(ID_FIELD, id)
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.conditions.push(Condition::eq(field, value.into()));
        self
    }

    /// Valeur de la condition sur la clé primaire, si le filtre en porte une.
    pub fn id_value(&self) -> Option<&str> {
        self.conditions
            .iter()
            .find(|c| c.field == ID_FIELD)
            .and_then(|c| c.value.as_str())
    }
}

/// Projection par inclusion. Vide = document complet.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    pub include: Vec<String>,
    pub exclude_id: bool,
}

impl Projection {
    pub fn fields(fields: &[&str]) -> Self {
        Self {
            include: fields.iter().map(|f| f.to_string()).collect(),
            exclude_id: false,
        }
    }

    /// Seul le premier élément de `array_field` qui a satisfait le filtre.
    pub fn positional(array_field: &str) -> Self {
        Self::fields(&[&format!("{}.{}", array_field, POSITIONAL)])
    }

    pub fn without_id(mut self) -> Self {
        self.exclude_id = true;
        self
    }
}

/// Opérateur de mise à jour appliqué à un seul document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpdateOp {
    /// `$set` : chemins éventuellement positionnels (`skills.$.level`).
    Set(Vec<(String, Value)>),
    /// `$push` : ajoute une valeur en fin de tableau (crée le tableau si absent).
    Push { field: String, value: Value },
    /// `$pull` : retire tous les éléments du tableau qui satisfont `criteria`.
    Pull { field: String, criteria: Filter },
}

impl UpdateOp {
    pub fn set<I, K>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        UpdateOp::Set(fields.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Accusé d'insertion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InsertOneResult {
    pub inserted_id: String,
}

/// Accusé de mise à jour (`matched` = filtre satisfait, `modified` = contenu changé).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct UpdateResult {
    pub matched_count: u64,
    pub modified_count: u64,
}

/// Accusé de suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DeleteResult {
    pub deleted_count: u64,
}
