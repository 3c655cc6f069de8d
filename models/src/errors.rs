// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Type for model validation failures
//! Any result returned by the validation, builder or table methods of this crate is a
//! `ModelError`.

use crate::network::nat_rules::{NatMoveDestination, NatRuleId};
use thiserror::Error;

/// The reasons why we may reject a NAT rule model
#[derive(Debug, Error, PartialEq)]
pub enum ModelError {
    // Field-level validation
    #[error("Missing mandatory parameter: {0}")]
    MissingParameter(&'static str),
    #[error("Invalid name '{0}': expected 1 to {1} characters out of [A-Za-z0-9_ .-]")]
    InvalidName(String, usize),
    #[error("Invalid {0} '{1}': expected 1 to {2} characters out of [A-Za-z0-9_ .-]")]
    InvalidContainerName(&'static str, String, usize),
    #[error("Field '{0}' exceeds maximum length of {1}")]
    TooLong(&'static str, usize),
    #[error("Field '{0}' must not be empty")]
    EmptyField(&'static str),
    #[error("List items must be unique: '{1}' appears more than once in '{0}'")]
    DuplicateItem(&'static str, String),
    #[error("Translated port out of range [1, 65535]: {0}")]
    BadPort(u32),

    // Mutually exclusive / dependent fields
    #[error("Fields '{0}' and '{1}' are mutually exclusive")]
    MutuallyExclusive(&'static str, &'static str),
    #[error("Field '{0}' requires '{1}' to be set")]
    RequiresField(&'static str, &'static str),
    #[error("Invalid fallback type '{0}': expected 'translated_address' or 'interface_address'")]
    InvalidFallbackType(String),

    // Rule-level constraints
    #[error("Exactly one of 'folder', 'snippet', or 'device' must be provided")]
    InvalidContainer,
    #[error("DNS rewrite is not available with NAT64 rules")]
    DnsRewriteWithNat64,
    #[error("Bi-directional static NAT cannot be used with destination translation")]
    BiDirectionalWithDestinationTranslation,

    // Moves
    #[error("destination_rule is required when destination is '{0}'")]
    MissingDestinationRule(NatMoveDestination),
    #[error("destination_rule is not allowed when destination is '{0}'")]
    UnexpectedDestinationRule(NatMoveDestination),
    #[error("Cannot move rule {0} relative to itself")]
    MoveRelativeToSelf(NatRuleId),

    // Rule tables
    #[error("NAT rule with id {0} not found")]
    NoSuchRule(NatRuleId),
    #[error("A NAT rule with id {0} already exists")]
    DuplicateRuleId(NatRuleId),
    #[error("A NAT rule with name '{0}' already exists in this container")]
    DuplicateRuleName(String),
}

impl From<derive_builder::UninitializedFieldError> for ModelError {
    fn from(value: derive_builder::UninitializedFieldError) -> Self {
        ModelError::MissingParameter(value.field_name())
    }
}

/// Result-like type for validations
pub type ModelResult = Result<(), ModelError>;

#[must_use]
pub fn stringify(result: &ModelResult) -> String {
    match result {
        Ok(()) => "Ok".to_string(),
        Err(e) => format!("FAILED: {e}"),
    }
}
