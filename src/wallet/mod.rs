//! Key pairs, signing and node identity files
//!
//! This module handles secp256k1 key handling, transaction signing and
//! verification, and the key files `keygen` writes for a node.

pub mod keygen;
pub mod signer;

pub use keygen::{generate_key_files, key_json, peer_id, KeyJson};
pub use signer::{address_of, key_from_bytes, sign_tx, verify_tx};
