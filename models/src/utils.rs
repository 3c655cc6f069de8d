// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Validation helpers shared by the models

use crate::{ModelError, ModelResult};
use serde::{Deserialize, Deserializer};
use std::collections::BTreeSet;

/// Models whose constraints cannot all be expressed in their types.
pub trait Validate {
    /// Check the constraints of the model, returning the first one that is violated.
    fn validate(&self) -> ModelResult;
}

pub(crate) const MAX_NAME_LEN: usize = 63;
pub(crate) const MAX_CONTAINER_LEN: usize = 64;
pub(crate) const MAX_DESCRIPTION_LEN: usize = 1024;
pub(crate) const MAX_TAG_LEN: usize = 127;

/// Characters allowed in rule and container names: `[A-Za-z0-9_ .-]`
fn is_name_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | ' ' | '.' | '-')
}

pub(crate) fn is_valid_name(value: &str, max_len: usize) -> bool {
    !value.is_empty() && value.chars().count() <= max_len && value.chars().all(is_name_char)
}

pub(crate) fn validate_rule_name(name: &str) -> ModelResult {
    if is_valid_name(name, MAX_NAME_LEN) {
        Ok(())
    } else {
        Err(ModelError::InvalidName(name.to_owned(), MAX_NAME_LEN))
    }
}

pub(crate) fn validate_container_name(kind: &'static str, value: &str) -> ModelResult {
    if is_valid_name(value, MAX_CONTAINER_LEN) {
        Ok(())
    } else {
        Err(ModelError::InvalidContainerName(
            kind,
            value.to_owned(),
            MAX_CONTAINER_LEN,
        ))
    }
}

pub(crate) fn validate_max_len(field: &'static str, value: &str, max_len: usize) -> ModelResult {
    if value.chars().count() > max_len {
        return Err(ModelError::TooLong(field, max_len));
    }
    Ok(())
}

pub(crate) fn validate_not_empty(field: &'static str, value: &str) -> ModelResult {
    if value.is_empty() {
        return Err(ModelError::EmptyField(field));
    }
    Ok(())
}

/// Reject lists carrying the same item twice
pub(crate) fn validate_unique(field: &'static str, items: &[String]) -> ModelResult {
    let mut seen = BTreeSet::new();
    for item in items {
        if !seen.insert(item.as_str()) {
            return Err(ModelError::DuplicateItem(field, item.clone()));
        }
    }
    Ok(())
}

/// Reject empty lists and lists carrying the same item twice
pub(crate) fn validate_address_list(field: &'static str, items: &[String]) -> ModelResult {
    if items.is_empty() {
        return Err(ModelError::EmptyField(field));
    }
    if items.iter().any(String::is_empty) {
        return Err(ModelError::EmptyField(field));
    }
    validate_unique(field, items)
}

pub(crate) fn any() -> Vec<String> {
    vec!["any".to_owned()]
}

pub(crate) fn any_service() -> String {
    "any".to_owned()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

/// Deserialize a list of strings, accepting a bare string as a list of one.
pub(crate) fn string_or_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match OneOrMany::deserialize(deserializer)? {
        OneOrMany::One(item) => vec![item],
        OneOrMany::Many(items) => items,
    })
}
