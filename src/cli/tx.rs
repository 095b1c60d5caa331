//! Composing, signing and submitting transactions
//!
//! A transaction is signed by the node's unlocked account unless a local key
//! is available: a keystore named on the command line, or the key file set
//! with `--key`/`keyfile`. Locally signed transactions get their nonce and
//! chain id from the node and go out through `CommitTX`.

use std::fs;
use std::path::Path;

use k256::ecdsa::SigningKey;
use log::{debug, info};

use crate::cli::context::NodeContext;
use crate::cli::output::{password_or_prompt, print_json};
use crate::core::address::{decode_address, encode_address};
use crate::core::monetary::{amount_to_bytes, parse_amount};
use crate::error::{CliError, Result};
use crate::json::{
    conv_commit_result, conv_commit_result_list, conv_tx, parse_base58_tx, parse_base58_tx_body,
    PayloadEncoding,
};
use crate::network::AergoClient;
use crate::proto::{CommitResult, Tx, TxBody, TxType, VerifyStatus};
use crate::utils::base58_decode;
use crate::wallet::keygen::load_key_file;
use crate::wallet::signer;

/// Who signs an outgoing transaction
pub enum TxSigner {
    /// The node, with its unlocked account
    Node,
    Local(SigningKey),
}

/// Pick the signer for `account`: keystore, then key file, then the node
pub fn resolve_signer(
    ctx: &NodeContext,
    account: &[u8],
    keystore: Option<&str>,
    password: Option<&str>,
) -> Result<TxSigner> {
    if keystore.is_some() {
        let store = ctx.keystore(keystore)?;
        let password = password_or_prompt(password, false)?;
        return Ok(TxSigner::Local(store.get_key(account, &password)?));
    }
    if let Some(keyfile) = ctx.keyfile() {
        let key = load_key_file(Path::new(keyfile))?;
        if signer::address_of(&key) != account {
            return Err(CliError::Input(format!(
                "key file {keyfile} does not hold account {}",
                encode_address(account)
            )));
        }
        return Ok(TxSigner::Local(key));
    }
    Ok(TxSigner::Node)
}

/// Fill the nonce and chain id a locally signed transaction needs
async fn prepare_local(client: &AergoClient, body: &mut TxBody) -> Result<()> {
    let state = client.get_state(body.account.clone()).await?;
    body.nonce = state.nonce + 1;
    if body.chain_id_hash.is_empty() {
        body.chain_id_hash = client.blockchain().await?.best_chain_id_hash;
    }
    Ok(())
}

fn first_result(results: Vec<CommitResult>) -> Result<CommitResult> {
    results
        .into_iter()
        .next()
        .ok_or_else(|| CliError::Serialization("empty commit result".to_string()))
}

/// Sign as `signer` says and hand the transaction to the node
pub async fn submit(client: &AergoClient, mut tx: Tx, signer: &TxSigner) -> Result<CommitResult> {
    match signer {
        TxSigner::Node => client.send_tx(tx).await,
        TxSigner::Local(key) => {
            let body = tx.body.get_or_insert_with(TxBody::default);
            prepare_local(client, body).await?;
            signer::sign_tx(key, &mut tx)?;
            tx.validate()?;
            debug!("Committing locally signed tx nonce {}", tx.body.as_ref().map_or(0, |b| b.nonce));
            first_result(client.commit_tx(vec![tx]).await?.results)
        }
    }
}

/// Nonce from the node, then node signing and commit, as contract calls do
pub async fn sign_remote_and_commit(
    client: &AergoClient,
    mut tx: Tx,
    signer: &TxSigner,
) -> Result<Vec<CommitResult>> {
    let body = tx.body.get_or_insert_with(TxBody::default);
    match signer {
        TxSigner::Local(key) => {
            prepare_local(client, body).await?;
            signer::sign_tx(key, &mut tx)?;
        }
        TxSigner::Node => {
            let state = client.get_state(body.account.clone()).await?;
            body.nonce = state.nonce + 1;
            tx = client.sign_tx(tx).await?;
        }
    }
    Ok(client.commit_tx(vec![tx]).await?.results)
}

/// Plain value transfer body
pub fn transfer_tx(from: &str, to: &str, amount: &str) -> Result<Tx> {
    let account = decode_address(from)
        .map_err(|e| CliError::Input(format!("wrong address in --from flag: {e}")))?;
    let recipient = decode_address(to)
        .map_err(|e| CliError::Input(format!("wrong address in --to flag: {e}")))?;
    let amount = parse_amount(amount)
        .map_err(|e| CliError::Input(format!("wrong value in --amount flag: {e}")))?;
    Ok(Tx {
        hash: Vec::new(),
        body: Some(TxBody {
            account,
            recipient,
            amount: amount_to_bytes(&amount),
            r#type: TxType::Transfer as i32,
            ..Default::default()
        }),
    })
}

/// Sign `body` with a base58 raw key; returns the signer address and the tx
pub fn sign_with_raw_key(body: TxBody, encoded_key: &str) -> Result<(String, Tx)> {
    let raw = base58_decode(encoded_key)?;
    let key = signer::key_from_bytes(&raw)?;
    let mut tx = Tx {
        hash: Vec::new(),
        body: Some(body),
    };
    signer::sign_tx(&key, &mut tx)?;
    Ok((encode_address(&signer::address_of(&key)), tx))
}

/// Text of `--jsontx`, or the content of `--jsontxpath`
pub fn json_input(inline: Option<&str>, path: Option<&str>) -> Result<Vec<u8>> {
    match (inline, path) {
        (Some(json), _) => Ok(json.as_bytes().to_vec()),
        (None, Some(path)) => fs::read(path)
            .map_err(|e| CliError::Io(format!("cannot read {path}: {e}"))),
        (None, None) => Err(CliError::Input(
            "need to transaction json input".to_string(),
        )),
    }
}

pub async fn sendtx(
    ctx: &NodeContext,
    from: &str,
    to: &str,
    amount: &str,
    keystore: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    let tx = transfer_tx(from, to, amount)?;
    let account = tx.body.as_ref().map(|b| b.account.clone()).unwrap_or_default();
    let signer = resolve_signer(ctx, &account, keystore, password)?;
    let result = submit(ctx.client()?, tx, &signer).await?;
    print_json(&conv_commit_result(&result))
}

pub async fn committx(ctx: &NodeContext, jsontx: Option<&str>, path: Option<&str>) -> Result<()> {
    let txs = parse_base58_tx(&json_input(jsontx, path)?)?;
    info!("Committing {} transaction(s)", txs.len());
    let results = ctx.client()?.commit_tx(txs).await?;
    print_json(&conv_commit_result_list(&results))
}

pub struct SignRequest<'a> {
    pub jsontx: &'a str,
    pub keystore: Option<&'a str>,
    pub address: Option<&'a str>,
    pub remote: bool,
    pub password: Option<&'a str>,
    pub key: Option<&'a str>,
}

pub async fn signtx(ctx: &NodeContext, req: SignRequest<'_>) -> Result<()> {
    let body = parse_base58_tx_body(req.jsontx.as_bytes())?;
    let tx = if let Some(encoded) = req.key {
        let (address, tx) = sign_with_raw_key(body, encoded)?;
        println!("{address}");
        tx
    } else if req.remote && req.keystore.is_none() {
        ctx.client()?
            .sign_tx(Tx {
                hash: Vec::new(),
                body: Some(body),
            })
            .await?
    } else {
        let address = req
            .address
            .ok_or_else(|| CliError::Input("--address is required for local signing".to_string()))
            .and_then(decode_address)?;
        let store = ctx.keystore(req.keystore)?;
        let password = password_or_prompt(req.password, false)?;
        let mut body = body;
        body.sign.clear();
        body.sign = store.sign(&address, &password, &body.signing_digest())?;
        let hash = body.calculate_hash();
        Tx {
            hash,
            body: Some(body),
        }
    };
    print_json(&conv_tx(&tx, PayloadEncoding::Base58))
}

pub async fn verifytx(ctx: &NodeContext, jsontx: &str, remote: bool) -> Result<()> {
    let txs = parse_base58_tx(jsontx.as_bytes())?;
    let tx = txs
        .into_iter()
        .next()
        .ok_or_else(|| CliError::Input("need to transaction json input".to_string()))?;
    if remote {
        let result = ctx.client()?.verify_tx(tx).await?;
        match result.tx.as_ref() {
            Some(tx) => print_json(&conv_tx(tx, PayloadEncoding::Base58))?,
            None => println!(
                "{}",
                VerifyStatus::try_from(result.error)
                    .map(|s| s.as_str_name())
                    .unwrap_or("VERIFY_STATUS_UNKNOWN")
            ),
        }
        Ok(())
    } else {
        signer::verify_tx(&tx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::monetary::amount_from_bytes;

    const FROM: &str = "AmNpn7K9wg6wsn6oMkTirQSUNdqtDm94iCrrpP5ZpwCAAxxPrsU2";

    #[test]
    fn test_transfer_tx() {
        let tx = transfer_tx(FROM, "aergo.name", "1.5 aergo").unwrap();
        let body = tx.body.unwrap();
        assert_eq!(body.account.len(), 33);
        assert_eq!(body.recipient, b"aergo.name".to_vec());
        assert_eq!(
            amount_from_bytes(&body.amount).to_string(),
            "1500000000000000000"
        );
        assert_eq!(body.r#type, TxType::Transfer as i32);
    }

    #[test]
    fn test_transfer_tx_rejects_bad_input() {
        let err = transfer_tx("nope!", FROM, "1").unwrap_err();
        assert!(err.to_string().starts_with("wrong address in --from flag"));
        let err = transfer_tx(FROM, FROM, "1 coin").unwrap_err();
        assert!(err.to_string().starts_with("wrong value in --amount flag"));
    }

    #[test]
    fn test_sign_with_short_raw_key() {
        let (address, tx) = sign_with_raw_key(TxBody::default(), "12345678").unwrap();
        assert_eq!(decode_address(&address).unwrap().len(), 33);
        let body = tx.body.as_ref().unwrap();
        assert!(body.sign.len() >= 64 && body.sign.len() <= 72);
        assert_eq!(tx.hash, body.calculate_hash());
    }

    #[test]
    fn test_json_input() {
        assert_eq!(json_input(Some("{}"), None).unwrap(), b"{}".to_vec());
        assert!(json_input(None, None).is_err());
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tx.json");
        fs::write(&path, "[]").unwrap();
        assert_eq!(
            json_input(None, Some(&path.to_string_lossy())).unwrap(),
            b"[]".to_vec()
        );
    }
}
