//! Local key custody
//!
//! This module keeps private keys on disk: the keystore directory and the
//! password envelope each key file holds.

pub mod encrypted;
pub mod keystore;

pub use encrypted::{KdfSettings, KeyEnvelope, SecureKey};
pub use keystore::{default_keystore_dir, export_key, import_key, KeyStore, KEYSTORE_SUFFIX};
