//! # aergo-cli - command line clients of an aergo node
//!
//! The crate backs three binaries: `aergocli` talks to a node over gRPC,
//! `colaris` talks to a polaris peer-discovery server and `mpdumpdiag`
//! decodes mempool dumps offline.
//!
//! ## How the code is organized
//! - `core/`: addresses, amounts, transaction hashing, merkle roots and the
//!   validation rules shared with the node
//! - `proto/`: protobuf messages of the node, polaris and admin services
//! - `json/`: the json views printed by every command
//! - `storage/`: the encrypted local keystore
//! - `wallet/`: signing and the p2p key files written by `keygen`
//! - `network/`: gRPC clients and event stream handling
//! - `config/`: home directory and TOML configuration
//! - `cli/`: command trees, the per-command context and the handlers
//! - `diag/`: the mempool dump decoder
//!
//! Everything that reaches the node goes through `core` first, so the
//! encodings here must match the node byte for byte.

pub mod cli;
pub mod config;
pub mod core;
pub mod diag;
pub mod error;
pub mod json;
pub mod network;
pub mod proto;
pub mod storage;
pub mod utils;
pub mod wallet;

// Re-export commonly used types for convenience
pub use crate::cli::{Command, NodeContext, Opt, PolarisContext};
pub use crate::config::{CliConfig, ConfigOverrides, PolarisCliConfig};
pub use crate::core::CallInfo;
pub use crate::error::{CliError, Result};
pub use crate::network::{AdminClient, AergoClient, PolarisClient};
pub use crate::storage::KeyStore;
pub use crate::utils::{base58_decode, base58_encode};
