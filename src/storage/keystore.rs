//! Directory of password protected private keys
//!
//! One file per account, named `<address>__keystore.txt`, holding a
//! [`KeyEnvelope`]. Files are never edited in place: every write goes to a
//! temporary file in the same directory and is renamed over the target, so
//! concurrent readers see either the old or the new file.

use std::fs;
use std::path::{Path, PathBuf};

use k256::ecdsa::SigningKey;
use log::{debug, info};

use crate::core::address::{
    decode_address, decode_priv_key, encode_address, encode_priv_key, ADDRESS_LENGTH,
};
use crate::error::{CliError, Result};
use crate::storage::encrypted::{KdfSettings, KeyEnvelope, SecureKey};
use crate::wallet::signer;

pub const KEYSTORE_SUFFIX: &str = "__keystore.txt";

/// `<home>/data/keystore`
pub fn default_keystore_dir(home: &Path) -> PathBuf {
    home.join("data").join("keystore")
}

/// Exported form of a private key: the sealed envelope as base58check `0xAA`
pub fn export_key(private_key: &[u8], password: &str, kdf: KdfSettings) -> Result<String> {
    let key = signer::key_from_bytes(private_key)?;
    let address = encode_address(&signer::address_of(&key));
    let envelope = KeyEnvelope::seal_with(private_key, password, &address, kdf)?;
    Ok(encode_priv_key(&envelope.to_bytes()?))
}

/// Inverse of [`export_key`]
pub fn import_key(encoded: &str, password: &str) -> Result<SecureKey> {
    let sealed = decode_priv_key(encoded)?;
    KeyEnvelope::from_bytes(&sealed)?.open(password)
}

pub struct KeyStore {
    dir: PathBuf,
    kdf: KdfSettings,
}

impl KeyStore {
    /// Open a keystore directory, creating it when missing
    pub fn open(dir: impl Into<PathBuf>) -> Result<KeyStore> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|e| {
            CliError::Io(format!("cannot create keystore {}: {e}", dir.display()))
        })?;
        Ok(KeyStore {
            dir,
            kdf: KdfSettings::default(),
        })
    }

    pub fn with_kdf(mut self, kdf: KdfSettings) -> Self {
        self.kdf = kdf;
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn key_path(&self, address: &[u8]) -> PathBuf {
        self.dir
            .join(format!("{}{KEYSTORE_SUFFIX}", encode_address(address)))
    }

    /// Generate a new key and store it; returns the account address
    pub fn create(&self, password: &str) -> Result<Vec<u8>> {
        let key = signer::generate_key();
        let address = self.store_key(&key, password)?;
        info!("Created key {}", encode_address(&address));
        Ok(address)
    }

    /// Seal `key` under `password` and write it, replacing any older file
    pub fn store_key(&self, key: &SigningKey, password: &str) -> Result<Vec<u8>> {
        let address = signer::address_of(key);
        let encoded = encode_address(&address);
        let private = SecureKey::new(signer::private_key_bytes(key));
        let envelope = KeyEnvelope::seal_with(private.as_bytes(), password, &encoded, self.kdf)?;
        self.write_atomic(&self.key_path(&address), &envelope.to_bytes()?)?;
        Ok(address)
    }

    fn write_atomic(&self, target: &Path, contents: &[u8]) -> Result<()> {
        let file_name = target
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CliError::Io(format!("invalid key path {}", target.display())))?;
        let temp = self
            .dir
            .join(format!(".{file_name}.{}.tmp", std::process::id()));
        fs::write(&temp, contents)?;
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&temp, fs::Permissions::from_mode(0o600))?;
        }
        if let Err(e) = fs::rename(&temp, target) {
            let _ = fs::remove_file(&temp);
            return Err(e.into());
        }
        Ok(())
    }

    /// Addresses with a key file, sorted. Foreign files are skipped.
    pub fn list(&self) -> Result<Vec<Vec<u8>>> {
        let mut addresses = Vec::new();
        for entry in fs::read_dir(&self.dir)? {
            let entry = entry?;
            let name = entry.file_name();
            let Some(name) = name.to_str() else {
                continue;
            };
            let Some(encoded) = name.strip_suffix(KEYSTORE_SUFFIX) else {
                continue;
            };
            match decode_address(encoded) {
                Ok(address) if address.len() == ADDRESS_LENGTH => addresses.push(address),
                _ => debug!("Skipping foreign file {name} in keystore"),
            }
        }
        addresses.sort();
        Ok(addresses)
    }

    pub fn contains(&self, address: &[u8]) -> bool {
        self.key_path(address).is_file()
    }

    fn read_envelope(&self, address: &[u8]) -> Result<KeyEnvelope> {
        let path = self.key_path(address);
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CliError::Input(format!(
                    "account {} not found in keystore",
                    encode_address(address)
                )));
            }
            Err(e) => return Err(e.into()),
        };
        KeyEnvelope::from_bytes(&bytes)
    }

    /// Decrypt the key of `address`
    pub fn get_key(&self, address: &[u8], password: &str) -> Result<SigningKey> {
        let private = self.read_envelope(address)?.open(password)?;
        let key = signer::key_from_bytes(private.as_bytes())?;
        if signer::address_of(&key) != address {
            return Err(CliError::Crypto(format!(
                "key file of {} holds another account",
                encode_address(address)
            )));
        }
        Ok(key)
    }

    /// Sign a digest with the key of `address`; the key is dropped on return
    pub fn sign(&self, address: &[u8], password: &str, digest: &[u8]) -> Result<Vec<u8>> {
        let key = self.get_key(address, password)?;
        signer::sign_digest(&key, digest)
    }

    /// Exported form of the key, sealed under the same password
    pub fn export(&self, address: &[u8], password: &str) -> Result<String> {
        let key = self.get_key(address, password)?;
        let private = SecureKey::new(signer::private_key_bytes(&key));
        export_key(private.as_bytes(), password, self.kdf)
    }

    /// Store an exported key under `new_password`; returns its address
    pub fn import(&self, encoded: &str, old_password: &str, new_password: &str) -> Result<Vec<u8>> {
        let private = import_key(encoded, old_password)?;
        let key = signer::key_from_bytes(private.as_bytes())?;
        let address = signer::address_of(&key);
        if self.contains(&address) {
            return Err(CliError::Input(format!(
                "account {} already exists",
                encode_address(&address)
            )));
        }
        self.store_key(&key, new_password)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::encrypted::key_encryption::TEST_KDF;

    fn store(dir: &Path) -> KeyStore {
        KeyStore::open(dir).unwrap().with_kdf(TEST_KDF)
    }

    #[test]
    fn test_create_list_and_sign() {
        let dir = tempfile::tempdir().unwrap();
        let ks = store(dir.path());
        let first = ks.create("pw").unwrap();
        let second = ks.create("pw").unwrap();
        assert_eq!(first.len(), 33);

        let mut expected = vec![first.clone(), second];
        expected.sort();
        assert_eq!(ks.list().unwrap(), expected);

        let digest = [7u8; 32];
        let sig = ks.sign(&first, "pw", &digest).unwrap();
        signer::verify_digest(&first, &digest, &sig).unwrap();
        assert!(ks.sign(&first, "bad", &digest).is_err());
    }

    #[test]
    fn test_foreign_files_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let ks = store(dir.path());
        fs::write(dir.path().join("notes.txt"), b"x").unwrap();
        fs::write(dir.path().join(format!("garbage{KEYSTORE_SUFFIX}")), b"x").unwrap();
        assert!(ks.list().unwrap().is_empty());
    }

    #[test]
    fn test_missing_key_reported() {
        let dir = tempfile::tempdir().unwrap();
        let ks = store(dir.path());
        let err = ks.get_key(&[2u8; 33], "pw").unwrap_err();
        assert!(matches!(err, CliError::Input(_)));
    }

    #[test]
    fn test_export_import_between_stores() {
        let a = tempfile::tempdir().unwrap();
        let b = tempfile::tempdir().unwrap();
        let source = store(a.path());
        let target = store(b.path());

        let address = source.create("old").unwrap();
        let exported = source.export(&address, "old").unwrap();
        assert!(import_key(&exported, "wrong").is_err());

        assert_eq!(target.import(&exported, "old", "new").unwrap(), address);
        assert!(target.get_key(&address, "new").is_ok());
        assert!(target.get_key(&address, "old").is_err());
        assert!(target.import(&exported, "old", "new").is_err());
    }

    #[test]
    fn test_no_temp_files_left() {
        let dir = tempfile::tempdir().unwrap();
        let ks = store(dir.path());
        ks.create("").unwrap();
        let names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names.len(), 1);
        assert!(names[0].ends_with(KEYSTORE_SUFFIX));
    }
}
