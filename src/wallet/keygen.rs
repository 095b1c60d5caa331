//! Node identity key files
//!
//! `keygen` writes the secp256k1 key of a node in the framing the p2p layer
//! reads: a protobuf `{Type, Data}` record for the private and the public
//! key, the base58 peer id derived from the public record, and optionally
//! the account address of the same key.

use std::fs;
use std::path::Path;

use data_encoding::BASE64;
use k256::ecdsa::SigningKey;
use prost::Message;
use serde::Serialize;

use crate::core::address::encode_address;
use crate::error::{CliError, Result};
use crate::storage::encrypted::KdfSettings;
use crate::storage::keystore::export_key;
use crate::utils::base58_encode;
use crate::wallet::signer;

const KEY_TYPE_SECP256K1: i32 = 2;
/// Multihash code of the identity hash
const IDENTITY_MULTIHASH: u8 = 0x00;

pub const EMPTY_PASSWORD_WARNING: &str =
    "Warning: private key in json file encrypted with empty password. Use command line parameter --password.";

#[derive(Clone, PartialEq, ::prost::Message)]
struct FramedKey {
    #[prost(int32, tag = "1")]
    key_type: i32,
    #[prost(bytes = "vec", tag = "2")]
    data: Vec<u8>,
}

fn frame(data: Vec<u8>) -> Vec<u8> {
    FramedKey {
        key_type: KEY_TYPE_SECP256K1,
        data,
    }
    .encode_to_vec()
}

/// Protobuf framed private key, the content of `<prefix>.key`
pub fn marshal_private_key(key: &SigningKey) -> Vec<u8> {
    frame(signer::private_key_bytes(key))
}

/// Protobuf framed compressed public key, the content of `<prefix>.pub`
pub fn marshal_public_key(key: &SigningKey) -> Vec<u8> {
    frame(signer::public_key_bytes(key))
}

pub fn unmarshal_private_key(bytes: &[u8]) -> Result<SigningKey> {
    let framed = FramedKey::decode(bytes)?;
    if framed.key_type != KEY_TYPE_SECP256K1 {
        return Err(CliError::Crypto(format!(
            "unsupported key type {}",
            framed.key_type
        )));
    }
    signer::key_from_bytes(&framed.data)
}

/// Peer id: identity multihash of the framed public key, in base58
pub fn peer_id(key: &SigningKey) -> String {
    let public = marshal_public_key(key);
    let mut id = Vec::with_capacity(public.len() + 2);
    id.push(IDENTITY_MULTIHASH);
    id.push(public.len() as u8);
    id.extend_from_slice(&public);
    base58_encode(&id)
}

pub fn load_key_file(path: &Path) -> Result<SigningKey> {
    let bytes = fs::read(path)
        .map_err(|e| CliError::Io(format!("cannot read key file {}: {e}", path.display())))?;
    unmarshal_private_key(&bytes)
}

/// Write `<prefix>.pub`, `<prefix>.id` and with `with_address` `<prefix>.addr`
pub fn save_files_from_key(key: &SigningKey, prefix: &str, with_address: bool) -> Result<()> {
    fs::write(format!("{prefix}.pub"), marshal_public_key(key))?;
    fs::write(format!("{prefix}.id"), peer_id(key))?;
    if with_address {
        fs::write(
            format!("{prefix}.addr"),
            encode_address(&signer::address_of(key)),
        )?;
    }
    Ok(())
}

/// Generate a fresh key and write all of its files under `prefix`
pub fn generate_key_files(prefix: &str, with_address: bool) -> Result<SigningKey> {
    let key = signer::generate_key();
    fs::write(format!("{prefix}.key"), marshal_private_key(&key))?;
    save_files_from_key(&key, prefix, with_address)?;
    Ok(key)
}

/// Rewrite the companion files of an existing `.key` file.
///
/// Returns the prefix the files were written under.
pub fn regenerate_from_key_file(key_file: &str, with_address: bool) -> Result<String> {
    let path = Path::new(key_file);
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    if matches!(extension, "pub" | "id" | "addr") {
        return Err(CliError::Input(format!(
            "invalid pk extension .{extension}"
        )));
    }
    let key = load_key_file(path)?;
    let prefix = if extension.is_empty() {
        key_file.to_string()
    } else {
        key_file
            .strip_suffix(&format!(".{extension}"))
            .unwrap_or(key_file)
            .to_string()
    };
    save_files_from_key(&key, &prefix, with_address)?;
    Ok(prefix)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyJson {
    pub address: String,
    pub pubkey: String,
    pub privkey: String,
    pub id: String,
}

pub fn key_json(key: &SigningKey, password: &str, kdf: KdfSettings) -> Result<KeyJson> {
    let private = crate::storage::SecureKey::new(signer::private_key_bytes(key));
    Ok(KeyJson {
        address: encode_address(&signer::address_of(key)),
        pubkey: BASE64.encode(&marshal_public_key(key)),
        privkey: export_key(private.as_bytes(), password, kdf)?,
        id: peer_id(key),
    })
}

/// Four-space indented rendering of [`KeyJson`]
pub fn key_json_string(json: &KeyJson) -> Result<String> {
    let mut out = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut out, formatter);
    json.serialize(&mut serializer)?;
    String::from_utf8(out).map_err(|e| CliError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::encrypted::key_encryption::TEST_KDF;
    use crate::storage::keystore::import_key;

    #[test]
    fn test_framing() {
        let key = signer::generate_key();
        let private = marshal_private_key(&key);
        assert_eq!(&private[..4], &[0x08, 0x02, 0x12, 0x20]);
        assert_eq!(private.len(), 36);
        let public = marshal_public_key(&key);
        assert_eq!(&public[..4], &[0x08, 0x02, 0x12, 0x21]);
        assert_eq!(public.len(), 37);

        let back = unmarshal_private_key(&private).unwrap();
        assert_eq!(signer::address_of(&back), signer::address_of(&key));
    }

    #[test]
    fn test_peer_id_prefix() {
        let key = signer::generate_key();
        let id = crate::utils::base58_decode(&peer_id(&key)).unwrap();
        assert_eq!(&id[..2], &[0x00, 0x25]);
        assert!(peer_id(&key).starts_with("16Uiu2"));
    }

    #[test]
    fn test_key_files() {
        let dir = tempfile::tempdir().unwrap();
        let prefix = dir.path().join("node").to_string_lossy().into_owned();
        let key = generate_key_files(&prefix, true).unwrap();
        for ext in ["key", "pub", "id", "addr"] {
            assert!(Path::new(&format!("{prefix}.{ext}")).is_file());
        }
        let addr = fs::read_to_string(format!("{prefix}.addr")).unwrap();
        assert_eq!(addr, encode_address(&signer::address_of(&key)));

        fs::remove_file(format!("{prefix}.pub")).unwrap();
        let again = regenerate_from_key_file(&format!("{prefix}.key"), false).unwrap();
        assert_eq!(again, prefix);
        assert!(Path::new(&format!("{prefix}.pub")).is_file());
        assert!(regenerate_from_key_file(&format!("{prefix}.pub"), false).is_err());
    }

    #[test]
    fn test_key_json() {
        let key = signer::generate_key();
        let json = key_json(&key, "pw", TEST_KDF).unwrap();
        let private = import_key(&json.privkey, "pw").unwrap();
        assert_eq!(private.as_bytes(), signer::private_key_bytes(&key).as_slice());

        let text = key_json_string(&json).unwrap();
        assert!(text.starts_with("{\n    \"address\": "));
    }
}
