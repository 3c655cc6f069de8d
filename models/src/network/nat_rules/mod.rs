// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! NAT rule models.
//!
//! A NAT rule matches traffic by zones, addresses and service, and rewrites its source
//! ([`SourceTranslation`]), its destination ([`DestinationTranslation`]) or both. Rules are
//! created with a [`NatRuleCreateModel`], modified with a [`NatRuleUpdateModel`] and returned by
//! the API as a [`NatRuleResponseModel`]; all three share a [`NatRuleBase`].

mod moves;
mod rule;
mod translation;

use id::Id;

pub use moves::{NatMoveDestination, NatRuleMoveModel, NatRulebase};
pub use rule::{
    Container, NatRuleBase, NatRuleBaseBuilder, NatRuleCreateModel, NatRuleResponseModel,
    NatRuleUpdateModel, NatType,
};
pub use translation::{
    BiDirectional, DestinationTranslation, DistributionMethod, DnsRewrite, DnsRewriteDirection,
    DynamicIp, DynamicIpAndPort, InterfaceAddress, SourceTranslation, StaticIp, TranslatedPort,
    TranslatedPortError,
};

/// Identifier of a NAT rule, as assigned by the API
pub type NatRuleId = Id<NatRuleResponseModel>;
