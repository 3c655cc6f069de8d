// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Typed configuration models for the cloud network-configuration management API.
//!
//! The `network` module groups the models of network policy objects. NAT rules are defined in
//! [`network::nat_rules`] and re-exported from [`network`]; the in-memory [`network::NatRuleTable`]
//! orders them the way the management service does, and [`network::NatRuleFilter`] applies the
//! client-side list filters.

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod display;
pub mod errors;
pub mod network;
pub mod utils;

pub use errors::{ModelError, ModelResult, stringify}; // re-export
pub use utils::Validate; // re-export
