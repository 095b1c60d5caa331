//! Voting: candidate lists, vote payloads and the vote statistics

use std::fs;
use std::path::Path;

use serde_json::Value;

use crate::cli::context::NodeContext;
use crate::cli::output::print_json;
use crate::cli::tx::{sign_remote_and_commit, TxSigner};
use crate::core::address::{decode_address, AERGO_SYSTEM};
use crate::core::governance::{CallInfo, PEER_ID_LENGTH, VOTE_BP, VOTE_BP_ID, VOTE_DAO};
use crate::error::{CliError, Result};
use crate::json::{commit_status_name, conv_votes};
use crate::proto::{Tx, TxBody, TxType, VoteParams};
use crate::utils::{base58_decode, base58_encode};

/// Candidates from `--to`: a JSON string array, or a file holding one
pub fn read_candidates(to: &str) -> Result<Vec<String>> {
    let text = if Path::new(to).is_file() {
        fs::read_to_string(to)?
    } else {
        to.to_string()
    };
    serde_json::from_str(&text).map_err(|e| CliError::Input(format!("invalid candidate list: {e}")))
}

/// Call info for `account vote`: block producers by peer id, or a DAO vote
pub fn vote_call_info(id: &str, candidates: &[String]) -> Result<CallInfo> {
    if id == VOTE_BP_ID {
        let mut args = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            base58_decode(candidate)
                .map_err(|e| CliError::Input(format!("wrong peer id {candidate}: {e}")))?;
            args.push(Value::String(candidate.clone()));
        }
        Ok(CallInfo::new(VOTE_BP, args))
    } else {
        let mut args = vec![Value::String(id.to_string())];
        args.extend(candidates.iter().cloned().map(Value::String));
        Ok(CallInfo::new(VOTE_DAO, args))
    }
}

/// `v` followed by each candidate's packed peer id
pub fn legacy_vote_payload(candidates: &[String]) -> Result<Vec<u8>> {
    let mut payload = Vec::with_capacity(1 + candidates.len() * PEER_ID_LENGTH);
    payload.push(b'v');
    for candidate in candidates {
        let id = base58_decode(candidate)?;
        if id.len() != PEER_ID_LENGTH {
            return Err(CliError::Input(format!(
                "wrong peer id {candidate}: expected {PEER_ID_LENGTH} bytes, got {}",
                id.len()
            )));
        }
        payload.extend_from_slice(&id);
    }
    Ok(payload)
}

/// Governance transaction addressed to the system contract
pub fn system_tx(account: Vec<u8>, payload: Vec<u8>, amount: Vec<u8>) -> Tx {
    Tx {
        hash: Vec::new(),
        body: Some(TxBody {
            account,
            recipient: AERGO_SYSTEM.as_bytes().to_vec(),
            amount,
            payload,
            r#type: TxType::Governance as i32,
            ..Default::default()
        }),
    }
}

/// Top-level `vote`, always signed by the node
pub async fn vote(ctx: &NodeContext, from: &str, to: &str) -> Result<()> {
    let account = decode_address(from)?;
    let candidates = read_candidates(to)?;
    let payload = legacy_vote_payload(&candidates)?;
    let tx = system_tx(account, payload, Vec::new());
    let results = sign_remote_and_commit(ctx.client()?, tx, &TxSigner::Node).await?;
    if let Some(r) = results.first() {
        println!(
            "voting hash : {} {}",
            base58_encode(&r.hash),
            commit_status_name(r.error)
        );
    }
    Ok(())
}

pub async fn votestat(ctx: &NodeContext, count: u32, id: &str) -> Result<()> {
    let votes = ctx
        .client()?
        .get_votes(VoteParams {
            id: id.to_string(),
            count,
        })
        .await?;
    print_json(&conv_votes(&votes))
}
