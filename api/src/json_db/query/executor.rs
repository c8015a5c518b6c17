// FICHIER : api/src/json_db/query/executor.rs

use anyhow::{anyhow, bail, Result};
use serde_json::{Map, Value};

use crate::json_db::collections::ID_FIELD;
use crate::json_db::query::{Filter, Projection, UpdateOp, POSITIONAL};

// --- FILTRAGE ---

/// Vrai si le document satisfait toutes les conditions du filtre.
pub fn matches(doc: &Value, filter: &Filter) -> bool {
    filter.conditions.iter().all(|cond| {
        let segments: Vec<&str> = cond.field.split('.').collect();
        path_matches(doc, &segments, &cond.value)
    })
}

fn path_matches(current: &Value, segments: &[&str], expected: &Value) -> bool {
    match segments.split_first() {
        None => match current {
            Value::Array(items) if !expected.is_array() => items.iter().any(|i| i == expected),
            _ => current == expected,
        },
        Some((head, rest)) => match current {
            Value::Object(map) => map
                .get(*head)
                .is_some_and(|next| path_matches(next, rest, expected)),
            // Traversée implicite : au moins un élément doit correspondre
            Value::Array(items) => items.iter().any(|item| path_matches(item, segments, expected)),
            _ => false,
        },
    }
}

/// Lecture d'un chemin pointé à travers des objets uniquement.
fn get_path<'a>(doc: &'a Value, path: &str) -> Option<&'a Value> {
    path.split('.').try_fold(doc, |current, key| current.get(key))
}

fn get_path_mut<'a>(doc: &'a mut Value, path: &str) -> Option<&'a mut Value> {
    path.split('.')
        .try_fold(doc, |current, key| current.get_mut(key))
}

/// Index du premier élément de `array_field` qui satisfait les conditions
/// du filtre portant sur ce tableau.
pub fn positional_index(doc: &Value, filter: &Filter, array_field: &str) -> Option<usize> {
    let Some(Value::Array(items)) = get_path(doc, array_field) else {
        return None;
    };

    let prefix = format!("{}.", array_field);
    let element_conditions: Vec<(Vec<&str>, &Value)> = filter
        .conditions
        .iter()
        .filter_map(|c| {
            if c.field == array_field {
                Some((Vec::new(), &c.value))
            } else {
                c.field
                    .strip_prefix(&prefix)
                    .map(|rest| (rest.split('.').collect(), &c.value))
            }
        })
        .collect();

    if element_conditions.is_empty() {
        return None;
    }

    items.iter().position(|item| {
        element_conditions
            .iter()
            .all(|(segments, expected)| path_matches(item, segments, expected))
    })
}

// --- PROJECTION ---

/// Applique une projection. Le filtre sert à résoudre les champs positionnels.
pub fn project(doc: &Value, projection: &Projection, filter: &Filter) -> Value {
    let Some(source) = doc.as_object() else {
        return doc.clone();
    };

    let mut out = if projection.include.is_empty() {
        Value::Object(source.clone())
    } else {
        let mut partial = Value::Object(Map::new());
        if let Some(id) = source.get(ID_FIELD) {
            partial[ID_FIELD] = id.clone();
        }
        for field in &projection.include {
            let positional_suffix = format!(".{}", POSITIONAL);
            if let Some(array_field) = field.strip_suffix(&positional_suffix) {
                let element = positional_index(doc, filter, array_field).and_then(|idx| {
                    get_path(doc, array_field)
                        .and_then(|arr| arr.get(idx))
                        .cloned()
                });
                if let Some(element) = element {
                    let segments: Vec<&str> = array_field.split('.').collect();
                    let _ = set_value_by_path(&mut partial, &segments, Value::Array(vec![element]));
                }
            } else if let Some(value) = get_path(doc, field) {
                let segments: Vec<&str> = field.split('.').collect();
                let _ = set_value_by_path(&mut partial, &segments, value.clone());
            }
        }
        partial
    };

    if projection.exclude_id {
        if let Some(obj) = out.as_object_mut() {
            obj.remove(ID_FIELD);
        }
    }
    out
}

// --- MISE À JOUR ---

/// Applique un opérateur de mise à jour sur un document qui a satisfait `filter`.
/// Renvoie `true` si le contenu a effectivement changé.
pub fn apply_update(doc: &mut Value, update: &UpdateOp, filter: &Filter) -> Result<bool> {
    match update {
        UpdateOp::Set(fields) => {
            let mut changed = false;
            for (path, value) in fields {
                if path == ID_FIELD {
                    bail!("Le champ '{}' est immuable", ID_FIELD);
                }
                let resolved = resolve_positional(doc, filter, path)?;
                let segments: Vec<&str> = resolved.split('.').collect();
                changed |= set_value_by_path(doc, &segments, value.clone())?;
            }
            Ok(changed)
        }
        UpdateOp::Push { field, value } => match get_path_mut(doc, field) {
            Some(Value::Array(items)) => {
                items.push(value.clone());
                Ok(true)
            }
            Some(_) => bail!("Le champ '{}' n'est pas un tableau", field),
            None => {
                let segments: Vec<&str> = field.split('.').collect();
                set_value_by_path(doc, &segments, Value::Array(vec![value.clone()]))
            }
        },
        UpdateOp::Pull { field, criteria } => match get_path_mut(doc, field) {
            Some(Value::Array(items)) => {
                let before = items.len();
                items.retain(|item| !matches(item, criteria));
                Ok(items.len() != before)
            }
            Some(_) => bail!("Le champ '{}' n'est pas un tableau", field),
            None => Ok(false),
        },
    }
}

/// Remplace le segment `$` par l'index de l'élément qui a satisfait le filtre.
fn resolve_positional(doc: &Value, filter: &Filter, path: &str) -> Result<String> {
    let segments: Vec<&str> = path.split('.').collect();
    let Some(pos) = segments.iter().position(|s| *s == POSITIONAL) else {
        return Ok(path.to_string());
    };

    let array_field = segments[..pos].join(".");
    let idx = positional_index(doc, filter, &array_field).ok_or_else(|| {
        anyhow!(
            "L'opérateur positionnel n'a trouvé aucun élément correspondant dans '{}'",
            array_field
        )
    })?;

    let idx_str = idx.to_string();
    let mut resolved: Vec<&str> = segments.clone();
    resolved[pos] = &idx_str;
    Ok(resolved.join("."))
}

/// Écrit `value` au chemin donné en créant les objets intermédiaires.
/// Les segments numériques indexent les tableaux existants.
fn set_value_by_path(doc: &mut Value, segments: &[&str], value: Value) -> Result<bool> {
    let Some((last, parents)) = segments.split_last() else {
        bail!("Chemin de mise à jour vide");
    };

    let mut current = doc;
    for part in parents {
        if current.is_null() {
            *current = Value::Object(Map::new());
        }
        current = match current {
            Value::Object(map) => map
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new())),
            Value::Array(items) => {
                let idx: usize = part
                    .parse()
                    .map_err(|_| anyhow!("Segment '{}' invalide pour un tableau", part))?;
                items
                    .get_mut(idx)
                    .ok_or_else(|| anyhow!("Index {} hors limites", idx))?
            }
            _ => bail!("Impossible de traverser une valeur scalaire en '{}'", part),
        };
    }

    if current.is_null() {
        *current = Value::Object(Map::new());
    }
    match current {
        Value::Object(map) => {
            if map.get(*last) == Some(&value) {
                return Ok(false);
            }
            map.insert(last.to_string(), value);
            Ok(true)
        }
        Value::Array(items) => {
            let idx: usize = last
                .parse()
                .map_err(|_| anyhow!("Segment '{}' invalide pour un tableau", last))?;
            let slot = items
                .get_mut(idx)
                .ok_or_else(|| anyhow!("Index {} hors limites", idx))?;
            if *slot == value {
                return Ok(false);
            }
            *slot = value;
            Ok(true)
        }
        _ => bail!("Impossible d'écrire '{}' dans une valeur scalaire", last),
    }
}
