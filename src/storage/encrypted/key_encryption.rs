//! Password envelope around a private key
//!
//! ```json
//! {
//!   "version": "1",
//!   "address": "Am...",
//!   "cipher": {"algorithm": "aes-256-gcm", "nonce": "..", "ciphertext": ".."},
//!   "kdf": {"algorithm": "argon2id", "memory": 65536, "iterations": 3,
//!           "parallelism": 1, "salt": ".."}
//! }
//! ```
//!
//! Binary fields are lowercase hex. The KDF parameters travel with the
//! envelope so files written with other settings still open.

use argon2::{Algorithm, Argon2, Params, Version};
use data_encoding::{HEXLOWER, HEXLOWER_PERMISSIVE};
use serde::{Deserialize, Serialize};

use crate::error::{CliError, Result};
use crate::storage::encrypted::cipher::{Aes256GcmCipher, SecureKey, KEY_LENGTH};
use crate::storage::encrypted::generate_random_bytes;

pub const ENVELOPE_VERSION: &str = "1";
pub const CIPHER_ALGORITHM: &str = "aes-256-gcm";
pub const KDF_ALGORITHM: &str = "argon2id";
const SALT_LENGTH: usize = 32;

/// Argon2id cost settings
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KdfSettings {
    /// Memory in KiB
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for KdfSettings {
    fn default() -> Self {
        Self {
            memory: 65536,
            iterations: 3,
            parallelism: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CipherSection {
    pub algorithm: String,
    pub nonce: String,
    pub ciphertext: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KdfSection {
    pub algorithm: String,
    pub memory: u32,
    pub iterations: u32,
    pub parallelism: u32,
    pub salt: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyEnvelope {
    pub version: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub address: String,
    pub cipher: CipherSection,
    pub kdf: KdfSection,
}

fn derive_key(password: &str, salt: &[u8], settings: KdfSettings) -> Result<SecureKey> {
    let params = Params::new(
        settings.memory,
        settings.iterations,
        settings.parallelism,
        Some(KEY_LENGTH),
    )
    .map_err(|e| CliError::Crypto(format!("invalid key derivation parameters: {e}")))?;
    let argon2 = Argon2::new(Algorithm::Argon2id, Version::V0x13, params);

    let mut key = vec![0u8; KEY_LENGTH];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| CliError::Crypto(format!("key derivation failed: {e}")))?;
    Ok(SecureKey::new(key))
}

fn decode_hex(field: &str, value: &str) -> Result<Vec<u8>> {
    HEXLOWER_PERMISSIVE
        .decode(value.as_bytes())
        .map_err(|e| CliError::Crypto(format!("corrupt key file: bad {field}: {e}")))
}

impl KeyEnvelope {
    pub fn seal(private_key: &[u8], password: &str, address: &str) -> Result<Self> {
        Self::seal_with(private_key, password, address, KdfSettings::default())
    }

    pub fn seal_with(
        private_key: &[u8],
        password: &str,
        address: &str,
        settings: KdfSettings,
    ) -> Result<Self> {
        let salt = generate_random_bytes(SALT_LENGTH)?;
        let key = derive_key(password, &salt, settings)?;
        let sealed = Aes256GcmCipher::new(&key)?.encrypt(private_key)?;
        Ok(KeyEnvelope {
            version: ENVELOPE_VERSION.to_string(),
            address: address.to_string(),
            cipher: CipherSection {
                algorithm: CIPHER_ALGORITHM.to_string(),
                nonce: HEXLOWER.encode(&sealed.nonce),
                ciphertext: HEXLOWER.encode(&sealed.ciphertext),
            },
            kdf: KdfSection {
                algorithm: KDF_ALGORITHM.to_string(),
                memory: settings.memory,
                iterations: settings.iterations,
                parallelism: settings.parallelism,
                salt: HEXLOWER.encode(&salt),
            },
        })
    }

    /// Recover the private key. Fails with a crypto error on a wrong password.
    pub fn open(&self, password: &str) -> Result<SecureKey> {
        if self.version != ENVELOPE_VERSION {
            return Err(CliError::Crypto(format!(
                "unsupported key file version {}",
                self.version
            )));
        }
        if self.cipher.algorithm != CIPHER_ALGORITHM || self.kdf.algorithm != KDF_ALGORITHM {
            return Err(CliError::Crypto(format!(
                "unsupported key file algorithms {}/{}",
                self.cipher.algorithm, self.kdf.algorithm
            )));
        }
        let salt = decode_hex("salt", &self.kdf.salt)?;
        let nonce = decode_hex("nonce", &self.cipher.nonce)?;
        let ciphertext = decode_hex("ciphertext", &self.cipher.ciphertext)?;
        let settings = KdfSettings {
            memory: self.kdf.memory,
            iterations: self.kdf.iterations,
            parallelism: self.kdf.parallelism,
        };
        let key = derive_key(password, &salt, settings)?;
        let plain = Aes256GcmCipher::new(&key)?.decrypt(&ciphertext, &nonce)?;
        Ok(SecureKey::new(plain))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes)
            .map_err(|e| CliError::Crypto(format!("corrupt key file: {e}")))
    }
}

#[cfg(test)]
pub(crate) const TEST_KDF: KdfSettings = KdfSettings {
    memory: 64,
    iterations: 1,
    parallelism: 1,
};
