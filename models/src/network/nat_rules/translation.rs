// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! NAT rule models: source and destination translation

use serde::{Deserialize, Serialize};
use std::num::NonZero;

use crate::utils::{Validate, validate_address_list, validate_not_empty};
use crate::{ModelError, ModelResult};

/// How traffic is spread over the translated addresses of a destination translation
#[derive(
    Clone,
    Copy,
    Debug,
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
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum DistributionMethod {
    RoundRobin,
    SourceIpHash,
    IpModulo,
    IpHash,
    LeastSessions,
}

/// Direction in which DNS responses are rewritten
#[derive(
    Clone,
    Copy,
    Debug,
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
pub enum DnsRewriteDirection {
    Reverse,
    Forward,
}

/// Yes/no flag for static translations, spelled the way the API spells it
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
pub enum BiDirectional {
    Yes,
    No,
}

/// Source address taken from an interface
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterfaceAddress {
    pub interface: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub floating_ip: Option<String>,
}

impl InterfaceAddress {
    #[must_use]
    pub fn new(interface: &str) -> Self {
        Self {
            interface: interface.to_owned(),
            ip: None,
            floating_ip: None,
        }
    }
    #[must_use]
    pub fn ip(mut self, ip: &str) -> Self {
        self.ip = Some(ip.to_owned());
        self
    }
    #[must_use]
    pub fn floating_ip(mut self, floating_ip: &str) -> Self {
        self.floating_ip = Some(floating_ip.to_owned());
        self
    }
}

impl Validate for InterfaceAddress {
    fn validate(&self) -> ModelResult {
        validate_not_empty("interface", &self.interface)?;
        if self.ip.is_some() && self.floating_ip.is_some() {
            return Err(ModelError::MutuallyExclusive("ip", "floating_ip"));
        }
        Ok(())
    }
}

/// Dynamic IP and port (PAT) source translation.
///
/// The address pool is either a list of translated addresses or an interface address, never
/// both: on the wire this is `{"translated_address": [...]}` or `{"interface_address": {...}}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DynamicIpAndPort {
    TranslatedAddress(Vec<String>),
    InterfaceAddress(InterfaceAddress),
}

impl Validate for DynamicIpAndPort {
    fn validate(&self) -> ModelResult {
        match self {
            DynamicIpAndPort::TranslatedAddress(addresses) => {
                validate_address_list("translated_address", addresses)
            }
            DynamicIpAndPort::InterfaceAddress(ifaddr) => ifaddr.validate(),
        }
    }
}

pub(crate) const FALLBACK_TRANSLATED_ADDRESS: &str = "translated_address";
pub(crate) const FALLBACK_INTERFACE_ADDRESS: &str = "interface_address";

/// Dynamic IP (NAT pool) source translation, with an optional fallback pool
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DynamicIp {
    pub translated_address: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_address: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_interface: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fallback_ip: Option<String>,
}

impl DynamicIp {
    #[must_use]
    pub fn new(translated_address: &[&str]) -> Self {
        Self {
            translated_address: translated_address.iter().map(|&a| a.to_owned()).collect(),
            ..Self::default()
        }
    }
    #[must_use]
    pub fn fallback_addresses(mut self, addresses: &[&str]) -> Self {
        self.fallback_type = Some(FALLBACK_TRANSLATED_ADDRESS.to_owned());
        self.fallback_address = Some(addresses.iter().map(|&a| a.to_owned()).collect());
        self
    }
    #[must_use]
    pub fn fallback_interface(mut self, interface: &str, ip: Option<&str>) -> Self {
        self.fallback_type = Some(FALLBACK_INTERFACE_ADDRESS.to_owned());
        self.fallback_interface = Some(interface.to_owned());
        self.fallback_ip = ip.map(str::to_owned);
        self
    }
}

impl Validate for DynamicIp {
    fn validate(&self) -> ModelResult {
        validate_address_list("translated_address", &self.translated_address)?;
        match self.fallback_type.as_deref() {
            None => {
                if self.fallback_address.is_some() {
                    return Err(ModelError::RequiresField("fallback_address", "fallback_type"));
                }
                if self.fallback_interface.is_some() {
                    return Err(ModelError::RequiresField(
                        "fallback_interface",
                        "fallback_type",
                    ));
                }
                if self.fallback_ip.is_some() {
                    return Err(ModelError::RequiresField("fallback_ip", "fallback_type"));
                }
            }
            Some(FALLBACK_TRANSLATED_ADDRESS) => {
                let Some(addresses) = self.fallback_address.as_ref() else {
                    return Err(ModelError::RequiresField("fallback_type", "fallback_address"));
                };
                validate_address_list("fallback_address", addresses)?;
                if self.fallback_interface.is_some() {
                    return Err(ModelError::MutuallyExclusive(
                        "fallback_address",
                        "fallback_interface",
                    ));
                }
                if self.fallback_ip.is_some() {
                    return Err(ModelError::MutuallyExclusive("fallback_address", "fallback_ip"));
                }
            }
            Some(FALLBACK_INTERFACE_ADDRESS) => {
                let Some(interface) = self.fallback_interface.as_ref() else {
                    return Err(ModelError::RequiresField(
                        "fallback_type",
                        "fallback_interface",
                    ));
                };
                validate_not_empty("fallback_interface", interface)?;
                if self.fallback_address.is_some() {
                    return Err(ModelError::MutuallyExclusive(
                        "fallback_interface",
                        "fallback_address",
                    ));
                }
            }
            Some(other) => return Err(ModelError::InvalidFallbackType(other.to_owned())),
        }
        Ok(())
    }
}

/// Static (1:1) source translation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticIp {
    pub translated_address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bi_directional: Option<BiDirectional>,
}

impl StaticIp {
    #[must_use]
    pub fn new(translated_address: &str) -> Self {
        Self {
            translated_address: translated_address.to_owned(),
            bi_directional: None,
        }
    }
    #[must_use]
    pub fn bi_directional(mut self, value: BiDirectional) -> Self {
        self.bi_directional = Some(value);
        self
    }
    #[must_use]
    pub fn is_bi_directional(&self) -> bool {
        self.bi_directional == Some(BiDirectional::Yes)
    }
}

impl Validate for StaticIp {
    fn validate(&self) -> ModelResult {
        validate_not_empty("translated_address", &self.translated_address)
    }
}

/// Source translation of a NAT rule: exactly one of the three translation types.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceTranslation {
    DynamicIpAndPort(DynamicIpAndPort),
    DynamicIp(DynamicIp),
    StaticIp(StaticIp),
}

impl SourceTranslation {
    /// Tell if this is a static translation configured as bi-directional
    #[must_use]
    pub fn is_bi_directional_static(&self) -> bool {
        matches!(self, SourceTranslation::StaticIp(s) if s.is_bi_directional())
    }
}

impl Validate for SourceTranslation {
    fn validate(&self) -> ModelResult {
        match self {
            SourceTranslation::DynamicIpAndPort(t) => t.validate(),
            SourceTranslation::DynamicIp(t) => t.validate(),
            SourceTranslation::StaticIp(t) => t.validate(),
        }
    }
}

impl From<DynamicIpAndPort> for SourceTranslation {
    fn from(value: DynamicIpAndPort) -> Self {
        SourceTranslation::DynamicIpAndPort(value)
    }
}

impl From<DynamicIp> for SourceTranslation {
    fn from(value: DynamicIp) -> Self {
        SourceTranslation::DynamicIp(value)
    }
}

impl From<StaticIp> for SourceTranslation {
    fn from(value: StaticIp) -> Self {
        SourceTranslation::StaticIp(value)
    }
}

/// DNS rewrite settings of a destination translation
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DnsRewrite {
    pub direction: DnsRewriteDirection,
}

/// A translated destination port, in `1..=65535`.
#[derive(Copy, Clone, Debug, Hash, Ord, PartialOrd, Eq, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
#[repr(transparent)]
pub struct TranslatedPort(NonZero<u16>);

impl TranslatedPort {
    #[must_use]
    pub fn as_u16(&self) -> u16 {
        self.0.get()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TranslatedPortError {
    #[error("port {0} is not within the valid range of 1 to 65535")]
    OutOfRange(u32),
}

impl From<TranslatedPortError> for ModelError {
    fn from(value: TranslatedPortError) -> Self {
        match value {
            TranslatedPortError::OutOfRange(port) => ModelError::BadPort(port),
        }
    }
}

impl TryFrom<u32> for TranslatedPort {
    type Error = TranslatedPortError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        u16::try_from(value)
            .ok()
            .and_then(NonZero::new)
            .map(TranslatedPort)
            .ok_or(TranslatedPortError::OutOfRange(value))
    }
}

impl TryFrom<u16> for TranslatedPort {
    type Error = TranslatedPortError;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        TryFrom::try_from(u32::from(value))
    }
}

impl From<TranslatedPort> for u32 {
    fn from(value: TranslatedPort) -> Self {
        u32::from(value.0.get())
    }
}

/// Destination translation of a NAT rule
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DestinationTranslation {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translated_port: Option<TranslatedPort>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dns_rewrite: Option<DnsRewrite>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distribution: Option<DistributionMethod>,
}

impl DestinationTranslation {
    #[must_use]
    pub fn new(translated_address: &str) -> Self {
        Self {
            translated_address: Some(translated_address.to_owned()),
            ..Self::default()
        }
    }
    #[must_use]
    pub fn port(mut self, port: TranslatedPort) -> Self {
        self.translated_port = Some(port);
        self
    }
    /// Set the translated port from a plain port number.
    ///
    /// # Errors
    ///
    /// Returns [`ModelError::BadPort`] if the port is not within 1 to 65535.
    pub fn port_number(self, port: u32) -> Result<Self, ModelError> {
        Ok(self.port(TranslatedPort::try_from(port)?))
    }
    #[must_use]
    pub fn dns_rewrite(mut self, direction: DnsRewriteDirection) -> Self {
        self.dns_rewrite = Some(DnsRewrite { direction });
        self
    }
    #[must_use]
    pub fn distribution(mut self, method: DistributionMethod) -> Self {
        self.distribution = Some(method);
        self
    }
}

impl Validate for DestinationTranslation {
    fn validate(&self) -> ModelResult {
        match self.translated_address.as_deref() {
            Some(address) => validate_not_empty("translated_address", address),
            None if self.translated_port.is_some() => Err(ModelError::RequiresField(
                "translated_port",
                "translated_address",
            )),
            None if self.dns_rewrite.is_some() => {
                Err(ModelError::RequiresField("dns_rewrite", "translated_address"))
            }
            None if self.distribution.is_some() => {
                Err(ModelError::RequiresField("distribution", "translated_address"))
            }
            None => Ok(()),
        }
    }
}
