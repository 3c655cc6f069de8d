// SPDX-License-Identifier: Apache-2.0
// Copyright Open Network Fabric Authors

//! natctl: validate and inspect NAT rule documents offline.

#![deny(
    unsafe_code,
    clippy::all,
    clippy::pedantic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::panic
)]
#![allow(clippy::missing_errors_doc)]

mod args;
mod commands;
mod load;

use args::{CmdArgs, Command};
use clap::Parser;
use std::process::ExitCode;
use tracing::error;
use tracing_subscriber::EnvFilter;

fn init_logging(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> ExitCode {
    let args = CmdArgs::parse();
    init_logging(args.log_level.as_deref());

    let mut stdout = std::io::stdout().lock();
    let result = match &args.command {
        Command::Validate { files } => commands::validate(files, &mut stdout),
        Command::List(list) => commands::list(list, &mut stdout),
    };
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            eprintln!("natctl: {e}");
            ExitCode::FAILURE
        }
    }
}
