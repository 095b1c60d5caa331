//! Remote calls to the node, its admin socket and polaris
//!
//! Every call returns crate errors; transport and status failures are
//! mapped onto [`crate::error::RpcErrorKind`].

pub mod admin;
pub mod client;
pub mod events;
pub mod polaris;

pub use admin::{AdminClient, ADMIN_MAX_RECV_SIZE};
pub use client::{AergoClient, RpcChannel, TxLookup};
pub use events::{consume_events, StreamEnd, StreamSummary};
pub use polaris::PolarisClient;
