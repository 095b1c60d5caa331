//! Utility functions and helpers
//!
//! Hashing and the base58 family of encodings shared by addresses,
//! private keys and peer ids.

pub mod crypto;

pub use crypto::{
    base58_decode, base58_encode, base58check_decode, base58check_encode, checksum,
    sha256_concat, sha256_digest, CHECK_SUM_LEN,
};
