// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Network policy models

pub mod filter;
pub mod nat_rules;
pub mod rulebase;

pub use nat_rules::{
    DestinationTranslation, DistributionMethod, DnsRewrite, DnsRewriteDirection, DynamicIp,
    DynamicIpAndPort, InterfaceAddress, NatRuleCreateModel, NatRuleResponseModel,
    NatRuleUpdateModel, SourceTranslation, StaticIp,
}; // re-export

pub use filter::{ContainerScope, NatRuleFilter}; // re-export
pub use nat_rules::{
    BiDirectional, Container, NatMoveDestination, NatRuleBase, NatRuleBaseBuilder, NatRuleId,
    NatRuleMoveModel, NatRulebase, NatType, TranslatedPort,
}; // re-export
pub use rulebase::NatRuleTable; // re-export
