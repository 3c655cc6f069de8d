// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! NAT rule models: moving a rule within the rulebases

use serde::{Deserialize, Serialize};

use super::NatRuleId;
use crate::utils::Validate;
use crate::{ModelError, ModelResult};

/// Where to move a rule
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NatMoveDestination {
    Top,
    Bottom,
    Before,
    After,
}

impl NatMoveDestination {
    /// Tell if this destination is relative to another rule
    #[must_use]
    pub fn is_relative(&self) -> bool {
        matches!(self, NatMoveDestination::Before | NatMoveDestination::After)
    }
}

/// The rulebase evaluated before or after the device-local rules
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum NatRulebase {
    #[default]
    Pre,
    Post,
}

/// Request to move a NAT rule
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatRuleMoveModel {
    pub destination: NatMoveDestination,
    #[serde(default)]
    pub rulebase: NatRulebase,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_rule: Option<NatRuleId>,
}

impl NatRuleMoveModel {
    #[must_use]
    pub fn top(rulebase: NatRulebase) -> Self {
        Self {
            destination: NatMoveDestination::Top,
            rulebase,
            destination_rule: None,
        }
    }
    #[must_use]
    pub fn bottom(rulebase: NatRulebase) -> Self {
        Self {
            destination: NatMoveDestination::Bottom,
            rulebase,
            destination_rule: None,
        }
    }
    #[must_use]
    pub fn before(rulebase: NatRulebase, rule: NatRuleId) -> Self {
        Self {
            destination: NatMoveDestination::Before,
            rulebase,
            destination_rule: Some(rule),
        }
    }
    #[must_use]
    pub fn after(rulebase: NatRulebase, rule: NatRuleId) -> Self {
        Self {
            destination: NatMoveDestination::After,
            rulebase,
            destination_rule: Some(rule),
        }
    }
}

impl Validate for NatRuleMoveModel {
    fn validate(&self) -> ModelResult {
        match (self.destination.is_relative(), self.destination_rule) {
            (true, None) => Err(ModelError::MissingDestinationRule(self.destination)),
            (false, Some(_)) => Err(ModelError::UnexpectedDestinationRule(self.destination)),
            _ => Ok(()),
        }
    }
}
