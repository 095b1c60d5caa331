use ring::digest::{Context, SHA256};

use crate::error::{CliError, Result};

pub const CHECK_SUM_LEN: usize = 4;

pub fn sha256_digest(data: &[u8]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    context.update(data);
    let digest = context.finish();
    digest.as_ref().to_vec()
}

/// SHA-256 over the concatenation of several byte slices
pub fn sha256_concat(parts: &[&[u8]]) -> Vec<u8> {
    let mut context = Context::new(&SHA256);
    for part in parts {
        context.update(part);
    }
    context.finish().as_ref().to_vec()
}

pub fn base58_encode(data: &[u8]) -> String {
    bs58::encode(data).into_string()
}

pub fn base58_decode(data: &str) -> Result<Vec<u8>> {
    bs58::decode(data)
        .into_vec()
        .map_err(|e| CliError::Input(format!("invalid base58 encoding: {e}")))
}

/// First four bytes of double SHA-256
pub fn checksum(payload: &[u8]) -> Vec<u8> {
    let first_sha = sha256_digest(payload);
    let second_sha = sha256_digest(first_sha.as_slice());
    second_sha[0..CHECK_SUM_LEN].to_vec()
}

/// base58 over `version || payload || checksum`
pub fn base58check_encode(version: u8, payload: &[u8]) -> String {
    let mut data: Vec<u8> = Vec::with_capacity(payload.len() + 1 + CHECK_SUM_LEN);
    data.push(version);
    data.extend_from_slice(payload);
    let checksum = checksum(data.as_slice());
    data.extend(checksum);
    base58_encode(data.as_slice())
}

/// Decode a base58check string, returning the version byte and payload
pub fn base58check_decode(encoded: &str) -> Result<(u8, Vec<u8>)> {
    let data = base58_decode(encoded)?;
    if data.len() < CHECK_SUM_LEN + 1 {
        return Err(CliError::Input("invalid format: too short".to_string()));
    }
    let (body, actual) = data.split_at(data.len() - CHECK_SUM_LEN);
    if checksum(body) != actual {
        return Err(CliError::Input("checksum error".to_string()));
    }
    Ok((body[0], body[1..].to_vec()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sha256_known_vector() {
        let digest = sha256_digest(b"abc");
        assert_eq!(
            data_encoding::HEXLOWER.encode(&digest),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_sha256_concat_matches_single_buffer() {
        assert_eq!(sha256_concat(&[b"ab".as_slice(), b"c".as_slice()]), sha256_digest(b"abc"));
    }

    #[test]
    fn test_base58check_rejects_corruption() {
        let encoded = base58check_encode(0x42, &[7u8; 33]);
        let (version, payload) = base58check_decode(&encoded).unwrap();
        assert_eq!(version, 0x42);
        assert_eq!(payload, vec![7u8; 33]);

        let mut raw = base58_decode(&encoded).unwrap();
        let last = raw.len() - 1;
        raw[last] ^= 0xff;
        assert!(base58check_decode(&base58_encode(&raw)).is_err());
    }

    #[test]
    fn test_base58_decode_invalid_alphabet() {
        assert!(base58_decode("0OIl").is_err());
    }
}
