// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! Command line arguments of natctl

use clap::{Args, Parser, Subcommand};
use models::network::{Container, ContainerScope, NatRuleFilter, NatRulebase, NatType};
use models::ModelError;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "natctl")]
#[command(version)]
#[command(about = "Validate and inspect NAT rule documents", long_about = None)]
pub struct CmdArgs {
    #[arg(
        long,
        global = true,
        value_name = "LEVEL",
        help = "log level (error, warn, info, debug, trace); overrides RUST_LOG"
    )]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate NAT rule create documents
    Validate {
        #[arg(required = true, value_name = "FILE", help = "JSON or YAML file(s) with rules")]
        files: Vec<PathBuf>,
    },
    /// List NAT rules from a document of API responses
    List(ListArgs),
}

#[derive(Args, Debug, Default)]
pub struct ListArgs {
    #[arg(value_name = "FILE", help = "JSON or YAML file with rules")]
    pub file: PathBuf,

    #[arg(long, default_value_t = NatRulebase::Pre, help = "rulebase to list (pre|post)")]
    pub rulebase: NatRulebase,

    #[arg(long = "nat-type", value_name = "TYPE", help = "keep rules of this NAT type")]
    pub nat_type: Vec<NatType>,
    #[arg(long, value_name = "SERVICE", help = "keep rules with this service")]
    pub service: Vec<String>,
    #[arg(long, value_name = "ADDRESS", help = "keep rules with this source")]
    pub source: Vec<String>,
    #[arg(long, value_name = "ADDRESS", help = "keep rules with this destination")]
    pub destination: Vec<String>,
    #[arg(long, value_name = "TAG", help = "keep rules with this tag")]
    pub tag: Vec<String>,
    #[arg(long, value_name = "BOOL", help = "keep rules with this disabled flag")]
    pub disabled: Option<bool>,

    #[arg(long, group = "container", help = "scope to folder")]
    pub folder: Option<String>,
    #[arg(long, group = "container", help = "scope to snippet")]
    pub snippet: Option<String>,
    #[arg(long, group = "container", help = "scope to device")]
    pub device: Option<String>,
    #[arg(long, requires = "container", help = "only rules of exactly that container")]
    pub exact_match: bool,
    #[arg(long = "exclude-folder", value_name = "FOLDER")]
    pub exclude_folders: Vec<String>,
    #[arg(long = "exclude-snippet", value_name = "SNIPPET")]
    pub exclude_snippets: Vec<String>,
    #[arg(long = "exclude-device", value_name = "DEVICE")]
    pub exclude_devices: Vec<String>,
}

fn non_empty<T>(items: &[T]) -> Option<Vec<T>>
where
    T: Clone,
{
    (!items.is_empty()).then(|| items.to_vec())
}

impl ListArgs {
    #[must_use]
    pub fn filter(&self) -> NatRuleFilter {
        NatRuleFilter {
            nat_type: non_empty(&self.nat_type),
            service: non_empty(&self.service),
            destination: non_empty(&self.destination),
            source: non_empty(&self.source),
            tag: non_empty(&self.tag),
            disabled: self.disabled,
        }
    }

    /// The container scope, if a container or any exclusion was given
    pub fn scope(&self) -> Result<Option<ContainerScope>, ModelError> {
        let container = Container {
            folder: self.folder.clone(),
            snippet: self.snippet.clone(),
            device: self.device.clone(),
        };
        let has_exclusions = !(self.exclude_folders.is_empty()
            && self.exclude_snippets.is_empty()
            && self.exclude_devices.is_empty());

        let mut scope = match container.count() {
            0 if !has_exclusions => return Ok(None),
            0 => ContainerScope::default(),
            _ => ContainerScope::new(container)?,
        };
        scope.exact_match = self.exact_match;
        scope.exclude_folders.clone_from(&self.exclude_folders);
        scope.exclude_snippets.clone_from(&self.exclude_snippets);
        scope.exclude_devices.clone_from(&self.exclude_devices);
        Ok(Some(scope))
    }
}
