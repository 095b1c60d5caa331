//! Password protection for private keys
//!
//! Keys are sealed with AES-256-GCM under a key derived from the password
//! with Argon2id. Only private keys are protected here; everything the node
//! stores is public.

pub mod cipher;
pub mod key_encryption;

pub use cipher::{Aes256GcmCipher, EncryptionResult, SecureKey};
pub use key_encryption::{KdfSettings, KeyEnvelope};

use rand::RngCore;

use crate::error::Result;

/// Fresh random bytes for salts and nonces
pub fn generate_random_bytes(length: usize) -> Result<Vec<u8>> {
    let mut bytes = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut bytes);
    Ok(bytes)
}
