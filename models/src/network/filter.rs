// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Client-side filtering of NAT rule lists

use crate::network::nat_rules::{Container, NatRuleResponseModel, NatType};
use crate::ModelError;
use tracing::debug;

/// Attribute filters for NAT rules.
///
/// Unset criteria match everything. List criteria match if the rule has any of the listed
/// values; all set criteria must match.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NatRuleFilter {
    pub nat_type: Option<Vec<NatType>>,
    pub service: Option<Vec<String>>,
    pub destination: Option<Vec<String>>,
    pub source: Option<Vec<String>>,
    pub tag: Option<Vec<String>>,
    pub disabled: Option<bool>,
}

fn any_listed(wanted: Option<&Vec<String>>, have: &[String]) -> bool {
    wanted.is_none_or(|wanted| have.iter().any(|h| wanted.contains(h)))
}

impl NatRuleFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
    #[must_use]
    pub fn nat_type(mut self, nat_type: NatType) -> Self {
        self.nat_type.get_or_insert_with(Vec::new).push(nat_type);
        self
    }
    #[must_use]
    pub fn service(mut self, service: &str) -> Self {
        self.service
            .get_or_insert_with(Vec::new)
            .push(service.to_owned());
        self
    }
    #[must_use]
    pub fn destination(mut self, destination: &str) -> Self {
        self.destination
            .get_or_insert_with(Vec::new)
            .push(destination.to_owned());
        self
    }
    #[must_use]
    pub fn source(mut self, source: &str) -> Self {
        self.source
            .get_or_insert_with(Vec::new)
            .push(source.to_owned());
        self
    }
    #[must_use]
    pub fn tag(mut self, tag: &str) -> Self {
        self.tag.get_or_insert_with(Vec::new).push(tag.to_owned());
        self
    }
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = Some(disabled);
        self
    }

    /// Tell if a rule passes this filter
    #[must_use]
    pub fn matches(&self, rule: &NatRuleResponseModel) -> bool {
        let base = &rule.base;
        self.nat_type
            .as_ref()
            .is_none_or(|types| types.contains(&base.nat_type))
            && self
                .service
                .as_ref()
                .is_none_or(|services| services.contains(&base.service))
            && any_listed(self.destination.as_ref(), &base.destination)
            && any_listed(self.source.as_ref(), &base.source)
            && any_listed(self.tag.as_ref(), &base.tag)
            && self.disabled.is_none_or(|d| d == base.disabled)
    }

    /// Keep the rules that pass this filter, in their original order
    #[must_use]
    pub fn apply<'a, I>(&self, rules: I) -> Vec<&'a NatRuleResponseModel>
    where
        I: IntoIterator<Item = &'a NatRuleResponseModel>,
    {
        let kept: Vec<_> = rules.into_iter().filter(|r| self.matches(r)).collect();
        debug!("NAT rule filter kept {} rules", kept.len());
        kept
    }
}

/// Container scoping of a list: which folder, snippet or device was asked for, and what to
/// leave out.
///
/// Without `exact_match` the container only names where the listing was requested from: rules
/// inherited from any other container stay in, minus the exclusions.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContainerScope {
    pub container: Container,
    pub exact_match: bool,
    pub exclude_folders: Vec<String>,
    pub exclude_snippets: Vec<String>,
    pub exclude_devices: Vec<String>,
}

fn excluded(value: Option<&String>, exclusions: &[String]) -> bool {
    value.is_some_and(|v| exclusions.contains(v))
}

impl ContainerScope {
    /// Scope to the given container.
    ///
    /// # Errors
    ///
    /// Returns an error unless exactly one of folder, snippet or device is set.
    pub fn new(container: Container) -> Result<Self, ModelError> {
        container.validate_exactly_one()?;
        Ok(Self {
            container,
            ..Self::default()
        })
    }
    #[must_use]
    pub fn exact_match(mut self) -> Self {
        self.exact_match = true;
        self
    }
    #[must_use]
    pub fn exclude_folder(mut self, folder: &str) -> Self {
        self.exclude_folders.push(folder.to_owned());
        self
    }
    #[must_use]
    pub fn exclude_snippet(mut self, snippet: &str) -> Self {
        self.exclude_snippets.push(snippet.to_owned());
        self
    }
    #[must_use]
    pub fn exclude_device(mut self, device: &str) -> Self {
        self.exclude_devices.push(device.to_owned());
        self
    }

    /// Tell if a rule is within this scope
    #[must_use]
    pub fn matches(&self, rule: &NatRuleResponseModel) -> bool {
        let container = &rule.base.container;
        if self.exact_match {
            let same = match self.container.single() {
                Some(("folder", name)) => container.folder.as_deref() == Some(name),
                Some(("snippet", name)) => container.snippet.as_deref() == Some(name),
                Some(("device", name)) => container.device.as_deref() == Some(name),
                _ => false,
            };
            if !same {
                return false;
            }
        }
        !(excluded(container.folder.as_ref(), &self.exclude_folders)
            || excluded(container.snippet.as_ref(), &self.exclude_snippets)
            || excluded(container.device.as_ref(), &self.exclude_devices))
    }

    /// Keep the rules within this scope, in their original order
    #[must_use]
    pub fn apply<'a, I>(&self, rules: I) -> Vec<&'a NatRuleResponseModel>
    where
        I: IntoIterator<Item = &'a NatRuleResponseModel>,
    {
        rules.into_iter().filter(|r| self.matches(r)).collect()
    }
}
