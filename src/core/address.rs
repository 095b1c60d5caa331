//! Account addresses and exported private keys
//!
//! Account addresses are 33-byte compressed secp256k1 public keys rendered as
//! base58check with version byte `0x42`. Short names and the reserved
//! governance accounts travel as their plain bytes.

use crate::error::{CliError, Result};
use crate::utils::{base58check_decode, base58check_encode};

pub const ADDRESS_VERSION: u8 = 0x42;
pub const PRIVKEY_VERSION: u8 = 0xAA;
pub const ADDRESS_LENGTH: usize = 33;
pub const NAME_LENGTH: usize = 12;

pub const AERGO_SYSTEM: &str = "aergo.system";
pub const AERGO_NAME: &str = "aergo.name";
pub const AERGO_ENTERPRISE: &str = "aergo.enterprise";

const SPECIAL_ACCOUNTS: [&str; 3] = [AERGO_SYSTEM, AERGO_NAME, AERGO_ENTERPRISE];

/// True for the reserved governance recipients
pub fn is_special_account(account: &[u8]) -> bool {
    SPECIAL_ACCOUNTS.iter().any(|s| s.as_bytes() == account)
}

fn is_name_char(c: u8) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == b'.'
}

/// True when `name` uses only `[a-z0-9.]` and is at most `NAME_LENGTH` long
pub fn is_name_format(name: &str) -> bool {
    name.len() <= NAME_LENGTH && name.bytes().all(is_name_char)
}

/// True when `name` is exactly `NAME_LENGTH` characters of `[a-z0-9.]`
pub fn is_valid_name(name: &str) -> bool {
    name.len() == NAME_LENGTH && name.bytes().all(is_name_char)
}

pub fn encode_address(address: &[u8]) -> String {
    if address.len() != ADDRESS_LENGTH {
        return String::from_utf8_lossy(address).into_owned();
    }
    base58check_encode(ADDRESS_VERSION, address)
}

pub fn decode_address(encoded: &str) -> Result<Vec<u8>> {
    if is_special_account(encoded.as_bytes()) || is_name_format(encoded) {
        return Ok(encoded.as_bytes().to_vec());
    }
    let (version, payload) = base58check_decode(encoded)
        .map_err(|e| CliError::Input(format!("invalid address {encoded}: {e}")))?;
    if version != ADDRESS_VERSION {
        return Err(CliError::Input(format!(
            "invalid address version {version:#04x}"
        )));
    }
    if payload.len() != ADDRESS_LENGTH {
        return Err(CliError::Input(format!(
            "invalid address length {}",
            payload.len()
        )));
    }
    Ok(payload)
}

pub fn encode_priv_key(key: &[u8]) -> String {
    base58check_encode(PRIVKEY_VERSION, key)
}

pub fn decode_priv_key(encoded: &str) -> Result<Vec<u8>> {
    let (version, payload) = base58check_decode(encoded)
        .map_err(|e| CliError::Crypto(format!("invalid private key: {e}")))?;
    if version != PRIVKEY_VERSION {
        return Err(CliError::Crypto(format!(
            "invalid private key version {version:#04x}"
        )));
    }
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: [u8; 33] = [
        0x03, 0x31, 0x85, 0x2E, 0xC4, 0x33, 0x25, 0x1B, 0x42, 0x01, 0xBF, 0x5C, 0xE0, 0x0C, 0xF8,
        0xF6, 0x15, 0xF7, 0x4F, 0x0A, 0xA4, 0x3F, 0x22, 0x61, 0xEE, 0x00, 0x91, 0x81, 0xCE, 0x36,
        0xDA, 0xF1, 0x54,
    ];
    const SAMPLE_ENCODED: &str = "AmNpn7K9wg6wsn6oMkTirQSUNdqtDm94iCrrpP5ZpwCAAxxPrsU2";

    #[test]
    fn test_encode_known_address() {
        assert_eq!(encode_address(&SAMPLE), SAMPLE_ENCODED);
        assert_eq!(decode_address(SAMPLE_ENCODED).unwrap(), SAMPLE.to_vec());
    }

    #[test]
    fn test_special_and_short_names_pass_through() {
        for name in [AERGO_SYSTEM, AERGO_NAME, AERGO_ENTERPRISE, "abcdefghijkl", "a.b"] {
            let decoded = decode_address(name).unwrap();
            assert_eq!(decoded, name.as_bytes());
            assert_eq!(encode_address(&decoded), name);
        }
    }

    #[test]
    fn test_wrong_version_rejected() {
        let other = base58check_encode(0x43, &SAMPLE);
        assert!(decode_address(&other).is_err());
    }

    #[test]
    fn test_wrong_length_rejected() {
        let short = base58check_encode(ADDRESS_VERSION, &SAMPLE[..32]);
        assert!(decode_address(&short).is_err());
    }

    #[test]
    fn test_name_rules() {
        assert!(is_valid_name("abcdefghijkl"));
        assert!(is_valid_name("aergo.name12"));
        assert!(!is_valid_name("abc"));
        assert!(!is_valid_name("ABCDEFGHIJKL"));
        assert!(!is_valid_name("abcdefghijk_"));
    }

    #[test]
    fn test_priv_key_round_trip() {
        let key = [9u8; 32];
        let encoded = encode_priv_key(&key);
        assert_eq!(decode_priv_key(&encoded).unwrap(), key.to_vec());
        assert!(decode_priv_key(&encode_address(&SAMPLE)).is_err());
    }
}
