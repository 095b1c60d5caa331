use crate::error::{CliError, Result};
use aes_gcm::{
    aead::{Aead, KeyInit},
    Aes256Gcm, Key, Nonce,
};
use serde::{Deserialize, Serialize};
use zeroize::ZeroizeOnDrop;

pub const KEY_LENGTH: usize = 32;
pub const NONCE_LENGTH: usize = 12;

/// Result of encryption operation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncryptionResult {
    /// Encrypted data with the authentication tag appended
    pub ciphertext: Vec<u8>,
    /// Nonce used for encryption
    pub nonce: Vec<u8>,
}

/// Key material that is zeroed when dropped
#[derive(Clone, ZeroizeOnDrop)]
pub struct SecureKey {
    key: Vec<u8>,
}

impl SecureKey {
    pub fn new(key: Vec<u8>) -> Self {
        Self { key }
    }

    /// Get key bytes (use carefully)
    pub fn as_bytes(&self) -> &[u8] {
        &self.key
    }

    pub fn len(&self) -> usize {
        self.key.len()
    }

    pub fn is_empty(&self) -> bool {
        self.key.is_empty()
    }
}

impl std::fmt::Debug for SecureKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SecureKey")
            .field("length", &self.key.len())
            .finish()
    }
}

/// AES-256-GCM cipher used for keystore payloads
pub struct Aes256GcmCipher {
    cipher: Aes256Gcm,
}

impl Aes256GcmCipher {
    pub fn new(key: &SecureKey) -> Result<Self> {
        if key.len() != KEY_LENGTH {
            return Err(CliError::Crypto(
                "AES-256-GCM requires a 32-byte key".to_string(),
            ));
        }
        let aes_key = Key::<Aes256Gcm>::from_slice(key.as_bytes());
        Ok(Self {
            cipher: Aes256Gcm::new(aes_key),
        })
    }

    /// Encrypt data with a random nonce
    pub fn encrypt(&self, plaintext: &[u8]) -> Result<EncryptionResult> {
        let nonce_bytes = generate_nonce();
        let nonce = Nonce::from_slice(&nonce_bytes);
        let ciphertext = self
            .cipher
            .encrypt(nonce, plaintext)
            .map_err(|e| CliError::Crypto(format!("encryption failed: {e}")))?;
        Ok(EncryptionResult {
            ciphertext,
            nonce: nonce_bytes,
        })
    }

    /// Decrypt data with the given nonce. A wrong key fails authentication.
    pub fn decrypt(&self, ciphertext: &[u8], nonce_bytes: &[u8]) -> Result<Vec<u8>> {
        if nonce_bytes.len() != NONCE_LENGTH {
            return Err(CliError::Crypto(
                "AES-256-GCM requires a 12-byte nonce".to_string(),
            ));
        }
        let nonce = Nonce::from_slice(nonce_bytes);
        self.cipher
            .decrypt(nonce, ciphertext)
            .map_err(|_| CliError::Crypto("invalid password".to_string()))
    }
}

fn generate_nonce() -> Vec<u8> {
    use rand::RngCore;
    let mut nonce = vec![0u8; NONCE_LENGTH];
    rand::thread_rng().fill_bytes(&mut nonce);
    nonce
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cipher_creation() {
        assert!(Aes256GcmCipher::new(&SecureKey::new(vec![0u8; 32])).is_ok());
        assert!(Aes256GcmCipher::new(&SecureKey::new(vec![0u8; 16])).is_err());
    }

    #[test]
    fn test_encryption_decryption() {
        let cipher = Aes256GcmCipher::new(&SecureKey::new(vec![1u8; 32])).unwrap();
        let plaintext = b"private key bytes";

        let result = cipher.encrypt(plaintext).unwrap();
        assert_eq!(result.nonce.len(), NONCE_LENGTH);
        assert_ne!(result.ciphertext.as_slice(), plaintext.as_slice());

        let decrypted = cipher.decrypt(&result.ciphertext, &result.nonce).unwrap();
        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_wrong_key_is_rejected() {
        let cipher = Aes256GcmCipher::new(&SecureKey::new(vec![1u8; 32])).unwrap();
        let other = Aes256GcmCipher::new(&SecureKey::new(vec![2u8; 32])).unwrap();
        let result = cipher.encrypt(b"secret").unwrap();
        let err = other.decrypt(&result.ciphertext, &result.nonce).unwrap_err();
        assert_eq!(err.to_string(), "invalid password");
    }

    #[test]
    fn test_secure_key_debug_hides_bytes() {
        let key = SecureKey::new(vec![7u8; 32]);
        assert_eq!(format!("{key:?}"), "SecureKey { length: 32 }");
    }
}
