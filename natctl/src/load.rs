// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Loading of NAT rule documents from JSON or YAML files

use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::debug;

use models::ModelError;

/// Errors reading NAT rule documents
#[derive(Debug, thiserror::Error)]
pub enum NatctlError {
    #[error("Failed to read {0:?}: {1}")]
    Io(PathBuf, #[source] std::io::Error),
    #[error("Unsupported document format {0:?}: expected .json, .yaml or .yml")]
    UnsupportedFormat(PathBuf),
    #[error("Invalid JSON in {0:?}: {1}")]
    Json(PathBuf, #[source] serde_json::Error),
    #[error("Invalid YAML in {0:?}: {1}")]
    Yaml(PathBuf, #[source] serde_yaml_ng::Error),
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("{0} of {1} rules failed validation")]
    ValidationFailed(usize, usize),
}

/// Document formats natctl reads
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Format {
    Json,
    Yaml,
}

impl Format {
    /// Tell the format of a document from its file extension
    pub fn from_path(path: &Path) -> Result<Self, NatctlError> {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => Ok(Format::Json),
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Ok(Format::Yaml)
            }
            _ => Err(NatctlError::UnsupportedFormat(path.to_owned())),
        }
    }
}

// A document holds either a list of rules or a single one. The shape is told apart before the
// rules are deserialized, so that their own errors are reported.
fn json_document<T>(text: &str, origin: &Path) -> Result<Vec<T>, NatctlError>
where
    T: DeserializeOwned,
{
    let error = |e| NatctlError::Json(origin.to_owned(), e);
    let value: serde_json::Value = serde_json::from_str(text).map_err(error)?;
    if value.is_array() {
        serde_json::from_value(value).map_err(error)
    } else {
        serde_json::from_value(value).map(|item| vec![item]).map_err(error)
    }
}

fn yaml_document<T>(text: &str, origin: &Path) -> Result<Vec<T>, NatctlError>
where
    T: DeserializeOwned,
{
    let error = |e| NatctlError::Yaml(origin.to_owned(), e);
    let value: serde_yaml_ng::Value = serde_yaml_ng::from_str(text).map_err(error)?;
    if value.is_sequence() {
        serde_yaml_ng::from_value(value).map_err(error)
    } else {
        serde_yaml_ng::from_value(value).map(|item| vec![item]).map_err(error)
    }
}

/// Parse the text of a document. `origin` only names the source in errors.
pub fn parse_str<T>(text: &str, format: Format, origin: &Path) -> Result<Vec<T>, NatctlError>
where
    T: DeserializeOwned,
{
    match format {
        Format::Json => json_document(text, origin),
        Format::Yaml => yaml_document(text, origin),
    }
}

/// Read and parse a document file
pub fn load_file<T>(path: &Path) -> Result<Vec<T>, NatctlError>
where
    T: DeserializeOwned,
{
    let format = Format::from_path(path)?;
    let text =
        std::fs::read_to_string(path).map_err(|e| NatctlError::Io(path.to_owned(), e))?;
    let items = parse_str(&text, format, path)?;
    debug!("Loaded {} rules from {}", items.len(), path.display());
    Ok(items)
}
