// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! NAT rule models: the rule itself, as created, updated and returned by the API

use derive_builder::Builder;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::NatRuleId;
use super::translation::{DestinationTranslation, SourceTranslation};
use crate::utils::{
    MAX_DESCRIPTION_LEN, MAX_TAG_LEN, Validate, any, any_service, string_or_list,
    validate_container_name, validate_max_len, validate_not_empty, validate_rule_name,
    validate_unique,
};
use crate::{ModelError, ModelResult};

/// Address families a NAT rule translates between
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
pub enum NatType {
    #[default]
    Ipv4,
    Nat64,
    Nptv6,
}

/// Where a rule lives: a folder, a snippet or a device.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Container {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device: Option<String>,
}

impl Container {
    #[must_use]
    pub fn folder(name: &str) -> Self {
        Self {
            folder: Some(name.to_owned()),
            ..Self::default()
        }
    }
    #[must_use]
    pub fn snippet(name: &str) -> Self {
        Self {
            snippet: Some(name.to_owned()),
            ..Self::default()
        }
    }
    #[must_use]
    pub fn device(name: &str) -> Self {
        Self {
            device: Some(name.to_owned()),
            ..Self::default()
        }
    }

    fn entries(&self) -> [(&'static str, Option<&str>); 3] {
        [
            ("folder", self.folder.as_deref()),
            ("snippet", self.snippet.as_deref()),
            ("device", self.device.as_deref()),
        ]
    }

    /// Number of container fields set
    #[must_use]
    pub fn count(&self) -> usize {
        self.entries().iter().filter(|(_, v)| v.is_some()).count()
    }

    /// The kind and name of the container, if exactly one is set
    #[must_use]
    pub fn single(&self) -> Option<(&'static str, &str)> {
        let mut set = self
            .entries()
            .into_iter()
            .filter_map(|(kind, v)| v.map(|v| (kind, v)));
        match (set.next(), set.next()) {
            (Some(only), None) => Some(only),
            _ => None,
        }
    }

    /// Check that exactly one of folder, snippet or device is set
    pub fn validate_exactly_one(&self) -> ModelResult {
        if self.count() != 1 {
            return Err(ModelError::InvalidContainer);
        }
        Ok(())
    }
}

impl Validate for Container {
    fn validate(&self) -> ModelResult {
        for (kind, value) in self.entries() {
            if let Some(value) = value {
                validate_container_name(kind, value)?;
            }
        }
        Ok(())
    }
}

/// Fields shared by all NAT rule models.
///
/// Build one with [`NatRuleBaseBuilder`]; unset fields take the same defaults the API applies.
#[derive(Builder, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[builder(pattern = "owned", setter(into), build_fn(error = "ModelError"))]
pub struct NatRuleBase {
    pub name: String,

    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[builder(default)]
    #[serde(default, deserialize_with = "string_or_list")]
    pub tag: Vec<String>,

    #[builder(default)]
    #[serde(default)]
    pub disabled: bool,

    #[builder(default)]
    #[serde(default)]
    pub nat_type: NatType,

    #[builder(default = "any()")]
    #[serde(rename = "from", default = "any", deserialize_with = "string_or_list")]
    pub from_zones: Vec<String>,

    #[builder(default = "any()")]
    #[serde(rename = "to", default = "any", deserialize_with = "string_or_list")]
    pub to_zones: Vec<String>,

    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to_interface: Option<String>,

    #[builder(default = "any()")]
    #[serde(default = "any", deserialize_with = "string_or_list")]
    pub source: Vec<String>,

    #[builder(default = "any()")]
    #[serde(default = "any", deserialize_with = "string_or_list")]
    pub destination: Vec<String>,

    #[builder(default = "any_service()")]
    #[serde(default = "any_service")]
    pub service: String,

    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_translation: Option<SourceTranslation>,

    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_translation: Option<DestinationTranslation>,

    #[builder(default, setter(strip_option))]
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub active_active_device_binding: Option<String>,

    #[builder(default)]
    #[serde(flatten)]
    pub container: Container,
}

impl NatRuleBase {
    /// Tell if the destination translation of this rule rewrites DNS responses
    #[must_use]
    pub fn has_dns_rewrite(&self) -> bool {
        self.destination_translation
            .as_ref()
            .is_some_and(|dt| dt.dns_rewrite.is_some())
    }

    /// Tell if this rule uses a bi-directional static source translation
    #[must_use]
    pub fn is_bi_directional_static(&self) -> bool {
        self.source_translation
            .as_ref()
            .is_some_and(SourceTranslation::is_bi_directional_static)
    }
}

impl Validate for NatRuleBase {
    /// Validate the [`NatRuleBase`]:
    ///
    /// 1. Name, description, tags and container names are well formed.
    /// 2. The from/to/source/destination/tag lists carry no duplicates.
    /// 3. Source and destination translations are valid on their own.
    /// 4. NAT64 rules carry no DNS rewrite.
    /// 5. A bi-directional static source translation comes without destination translation.
    fn validate(&self) -> ModelResult {
        debug!("Validating NAT rule '{}'", self.name);

        // 1. fields
        validate_rule_name(&self.name)?;
        if let Some(description) = &self.description {
            validate_max_len("description", description, MAX_DESCRIPTION_LEN)?;
        }
        for tag in &self.tag {
            validate_not_empty("tag", tag)?;
            validate_max_len("tag", tag, MAX_TAG_LEN)?;
        }
        validate_not_empty("service", &self.service)?;
        self.container.validate()?;

        // 2. lists
        validate_unique("tag", &self.tag)?;
        validate_unique("from", &self.from_zones)?;
        validate_unique("to", &self.to_zones)?;
        validate_unique("source", &self.source)?;
        validate_unique("destination", &self.destination)?;

        // 3. translations
        if let Some(st) = &self.source_translation {
            st.validate()?;
        }
        if let Some(dt) = &self.destination_translation {
            dt.validate()?;
        }

        // 4. NAT64 vs DNS rewrite
        if self.nat_type == NatType::Nat64 && self.has_dns_rewrite() {
            return Err(ModelError::DnsRewriteWithNat64);
        }

        // 5. bi-directional static NAT vs destination translation
        if self.is_bi_directional_static() && self.destination_translation.is_some() {
            return Err(ModelError::BiDirectionalWithDestinationTranslation);
        }
        Ok(())
    }
}

/// A NAT rule as sent to create it. Exactly one container must be set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatRuleCreateModel {
    #[serde(flatten)]
    pub base: NatRuleBase,
}

impl NatRuleCreateModel {
    #[must_use]
    pub fn new(base: NatRuleBase) -> Self {
        Self { base }
    }
}

impl Validate for NatRuleCreateModel {
    fn validate(&self) -> ModelResult {
        self.base.validate()?;
        self.base.container.validate_exactly_one()
    }
}

/// A NAT rule as sent to update it
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatRuleUpdateModel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<NatRuleId>,
    #[serde(flatten)]
    pub base: NatRuleBase,
}

impl NatRuleUpdateModel {
    #[must_use]
    pub fn new(id: NatRuleId, base: NatRuleBase) -> Self {
        Self { id: Some(id), base }
    }
}

impl Validate for NatRuleUpdateModel {
    fn validate(&self) -> ModelResult {
        self.base.validate()
    }
}

/// A NAT rule as returned by the API
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NatRuleResponseModel {
    pub id: NatRuleId,
    #[serde(flatten)]
    pub base: NatRuleBase,
}

impl NatRuleResponseModel {
    /// Build the response for a created rule, given the id it was assigned
    #[must_use]
    pub fn from_create(id: NatRuleId, create: NatRuleCreateModel) -> Self {
        Self {
            id,
            base: create.base,
        }
    }
}

impl Validate for NatRuleResponseModel {
    fn validate(&self) -> ModelResult {
        self.base.validate()
    }
}

impl From<NatRuleResponseModel> for NatRuleUpdateModel {
    fn from(value: NatRuleResponseModel) -> Self {
        Self {
            id: Some(value.id),
            base: value.base,
        }
    }
}
