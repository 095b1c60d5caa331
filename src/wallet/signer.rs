//! secp256k1 signing of transactions
//!
//! Signatures are DER encoded ECDSA over the transaction signing digest.
//! The account of a transaction is the signer's compressed public key, so
//! verification needs nothing but the transaction itself.

use k256::ecdsa::signature::hazmat::{PrehashSigner, PrehashVerifier};
use k256::ecdsa::{Signature, SigningKey, VerifyingKey};

use crate::core::address::ADDRESS_LENGTH;
use crate::error::{CliError, Result};
use crate::proto::{Tx, TxBody};

pub const PRIVATE_KEY_LENGTH: usize = 32;

/// Build a signing key from raw big-endian bytes.
///
/// Shorter inputs are left padded with zeroes to the scalar width.
pub fn key_from_bytes(raw: &[u8]) -> Result<SigningKey> {
    if raw.len() > PRIVATE_KEY_LENGTH {
        return Err(CliError::Crypto(format!(
            "invalid private key length {}",
            raw.len()
        )));
    }
    let mut padded = [0u8; PRIVATE_KEY_LENGTH];
    padded[PRIVATE_KEY_LENGTH - raw.len()..].copy_from_slice(raw);
    let key = SigningKey::from_slice(&padded)
        .map_err(|e| CliError::Crypto(format!("invalid private key: {e}")));
    zeroize::Zeroize::zeroize(&mut padded);
    key
}

pub fn generate_key() -> SigningKey {
    SigningKey::random(&mut rand::thread_rng())
}

/// Raw 32-byte scalar of the key
pub fn private_key_bytes(key: &SigningKey) -> Vec<u8> {
    key.to_bytes().to_vec()
}

/// 33-byte compressed public key
pub fn public_key_bytes(key: &SigningKey) -> Vec<u8> {
    key.verifying_key().to_encoded_point(true).as_bytes().to_vec()
}

/// Account address of a key: its compressed public key
pub fn address_of(key: &SigningKey) -> Vec<u8> {
    public_key_bytes(key)
}

pub fn sign_digest(key: &SigningKey, digest: &[u8]) -> Result<Vec<u8>> {
    let signature: Signature = key
        .sign_prehash(digest)
        .map_err(|e| CliError::Crypto(format!("sign failed: {e}")))?;
    Ok(signature.to_der().as_bytes().to_vec())
}

pub fn verify_digest(public_key: &[u8], digest: &[u8], signature: &[u8]) -> Result<()> {
    let verifying_key = VerifyingKey::from_sec1_bytes(public_key)
        .map_err(|e| CliError::Crypto(format!("invalid public key: {e}")))?;
    let signature = Signature::from_der(signature)
        .map_err(|e| CliError::Crypto(format!("invalid signature format: {e}")))?;
    let signature = signature.normalize_s().unwrap_or(signature);
    verifying_key
        .verify_prehash(digest, &signature)
        .map_err(|_| CliError::Crypto("signature verification failed".to_string()))
}

/// Sign a body in place: clear `sign`, sign the digest, store the signature
pub fn sign_body(key: &SigningKey, body: &mut TxBody) -> Result<()> {
    body.sign.clear();
    let digest = body.signing_digest();
    body.sign = sign_digest(key, &digest)?;
    Ok(())
}

/// Sign a transaction and refresh its hash
pub fn sign_tx(key: &SigningKey, tx: &mut Tx) -> Result<()> {
    let body = tx.body.get_or_insert_with(TxBody::default);
    sign_body(key, body)?;
    tx.hash = body.calculate_hash();
    Ok(())
}

/// Check the signature against the account and the hash against the body
pub fn verify_tx(tx: &Tx) -> Result<()> {
    let body = tx
        .body
        .as_ref()
        .ok_or_else(|| CliError::Crypto("tx body is empty".to_string()))?;
    if body.account.len() != ADDRESS_LENGTH {
        return Err(CliError::Crypto(
            "account is not a public key address".to_string(),
        ));
    }
    verify_digest(&body.account, &body.signing_digest(), &body.sign)?;
    if tx.hash != body.calculate_hash() {
        return Err(crate::error::ValidationError::InvalidHash.into());
    }
    Ok(())
}
