//! Protobuf messages exchanged with the node, the admin socket and polaris
//!
//! The messages are declared with `prost` derives so the crate builds
//! without a protoc toolchain. Field tags follow the node's published
//! `.proto` definitions and must not be renumbered.

pub mod blockchain;
pub mod node;
pub mod polaris;
pub mod rpc;

pub use blockchain::*;
pub use node::*;
pub use polaris::*;
pub use rpc::*;
