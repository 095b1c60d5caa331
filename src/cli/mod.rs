//! Command-line interface
//!
//! This module contains the command trees of both clients, the
//! per-invocation context and the handlers behind every subcommand.

pub mod account;
pub mod chain;
pub mod commands;
pub mod context;
pub mod contract;
pub mod enterprise;
pub mod event;
pub mod keygen;
pub mod mempool;
pub mod name;
pub mod output;
pub mod peers;
pub mod polaris;
pub mod tx;
pub mod vote;

pub use commands::{Command, GlobalArgs, Opt, PeerSort};
pub use context::{CommandContext, NodeContext, PolarisContext};
pub use output::{failure_line, init_logging, print_json};
pub use polaris::{PolarisCommand, PolarisOpt};
