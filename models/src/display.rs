// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Display of model objects

use std::fmt::{Display, Formatter};

use crate::network::nat_rules::{
    DestinationTranslation, DynamicIp, DynamicIpAndPort, InterfaceAddress, NatRuleBase,
    NatRuleResponseModel, SourceTranslation, StaticIp,
};
use crate::network::{NatRuleTable, NatRulebase};

const SEP: &str = "       ";

fn join(items: &[String]) -> String {
    items.join(", ")
}

impl Display for InterfaceAddress {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "interface {}", self.interface)?;
        if let Some(ip) = &self.ip {
            write!(f, " ip {ip}")?;
        }
        if let Some(floating_ip) = &self.floating_ip {
            write!(f, " floating-ip {floating_ip}")?;
        }
        Ok(())
    }
}

impl Display for DynamicIpAndPort {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            DynamicIpAndPort::TranslatedAddress(addresses) => {
                write!(f, "dynamic-ip-and-port {}", join(addresses))
            }
            DynamicIpAndPort::InterfaceAddress(ifaddr) => {
                write!(f, "dynamic-ip-and-port {ifaddr}")
            }
        }
    }
}

impl Display for DynamicIp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "dynamic-ip {}", join(&self.translated_address))?;
        if let Some(addresses) = &self.fallback_address {
            write!(f, ", fallback {}", join(addresses))?;
        }
        if let Some(interface) = &self.fallback_interface {
            write!(f, ", fallback interface {interface}")?;
            if let Some(ip) = &self.fallback_ip {
                write!(f, " ip {ip}")?;
            }
        }
        Ok(())
    }
}

impl Display for StaticIp {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "static-ip {}", self.translated_address)?;
        if self.is_bi_directional() {
            write!(f, " (bi-directional)")?;
        }
        Ok(())
    }
}

impl Display for SourceTranslation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            SourceTranslation::DynamicIpAndPort(t) => t.fmt(f),
            SourceTranslation::DynamicIp(t) => t.fmt(f),
            SourceTranslation::StaticIp(t) => t.fmt(f),
        }
    }
}

impl Display for DestinationTranslation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.translated_address {
            Some(address) => write!(f, "{address}")?,
            None => write!(f, "(none)")?,
        }
        if let Some(port) = self.translated_port {
            write!(f, " port {}", port.as_u16())?;
        }
        if let Some(dns) = &self.dns_rewrite {
            write!(f, " dns-rewrite {}", dns.direction)?;
        }
        if let Some(distribution) = self.distribution {
            write!(f, " distribution {distribution}")?;
        }
        Ok(())
    }
}

impl Display for NatRuleBase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} [{}]", self.name, self.nat_type)?;
        if self.disabled {
            write!(f, " (disabled)")?;
        }
        if let Some((kind, name)) = self.container.single() {
            write!(f, " {kind} {name}")?;
        }
        writeln!(f)?;
        if let Some(description) = &self.description {
            writeln!(f, "{SEP} description: {description}")?;
        }
        writeln!(
            f,
            "{SEP}        from: {} to: {}",
            join(&self.from_zones),
            join(&self.to_zones)
        )?;
        writeln!(f, "{SEP}      source: {}", join(&self.source))?;
        writeln!(f, "{SEP} destination: {}", join(&self.destination))?;
        writeln!(f, "{SEP}     service: {}", self.service)?;
        if let Some(interface) = &self.to_interface {
            writeln!(f, "{SEP}to-interface: {interface}")?;
        }
        if !self.tag.is_empty() {
            writeln!(f, "{SEP}        tags: {}", join(&self.tag))?;
        }
        if let Some(st) = &self.source_translation {
            writeln!(f, "{SEP}  source-nat: {st}")?;
        }
        if let Some(dt) = &self.destination_translation {
            writeln!(f, "{SEP}    dest-nat: {dt}")?;
        }
        Ok(())
    }
}

impl Display for NatRuleResponseModel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.id, self.base)
    }
}

impl Display for NatRuleTable {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for rulebase in [NatRulebase::Pre, NatRulebase::Post] {
            writeln!(f, " ━━━━ {rulebase} rulebase ━━━━")?;
            for (index, rule) in self.iter(rulebase).enumerate() {
                write!(f, "{index:>4} {rule}")?;
            }
        }
        Ok(())
    }
}
