//! `contract` subcommands: deploy, call and query

use std::fs;

use log::debug;
use serde_json::Value;

use crate::cli::commands::ContractCommand;
use crate::cli::context::NodeContext;
use crate::cli::output::print_json;
use crate::cli::tx::{resolve_signer, sign_remote_and_commit};
use crate::core::address::decode_address;
use crate::core::governance::CallInfo;
use crate::core::monetary::{amount_to_bytes, parse_amount};
use crate::error::{CliError, Result};
use crate::json::conv_commit_result_list;
use crate::proto::{CommitResultList, Query, Tx, TxBody, TxType};
use crate::utils::base58_decode;

pub async fn run(ctx: &NodeContext, cmd: ContractCommand) -> Result<()> {
    match cmd {
        ContractCommand::Deploy {
            creator,
            bcfile,
            amount,
        } => {
            let code = read_contract_code(&bcfile)?;
            debug!("Deploying {} bytes of contract code", code.len());
            let tx = contract_tx(&creator, None, code, &amount)?;
            commit(ctx, tx).await
        }
        ContractCommand::Call {
            sender,
            contract,
            name,
            args,
            amount,
        } => {
            let payload = call_payload(&name, args.as_deref())?;
            let tx = contract_tx(&sender, Some(&contract), payload, &amount)?;
            commit(ctx, tx).await
        }
        ContractCommand::Query {
            contract,
            name,
            args,
        } => {
            let query = Query {
                contract_address: decode_address(&contract)?,
                queryinfo: call_payload(&name, args.as_deref())?,
            };
            let reply = ctx.client()?.query_contract(query).await?;
            println!("{}", String::from_utf8_lossy(&reply.value));
            Ok(())
        }
    }
}

/// Compiled code from `bcfile`: base58 text, or the raw bytes when it is not
pub fn read_contract_code(path: &str) -> Result<Vec<u8>> {
    let raw = fs::read(path).map_err(|e| CliError::Io(format!("cannot read {path}: {e}")))?;
    let decoded = std::str::from_utf8(&raw)
        .ok()
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .and_then(|text| base58_decode(text).ok());
    Ok(decoded.unwrap_or(raw))
}

/// `{"Name": name, "Args": [...]}` for a call or query
pub fn call_payload(name: &str, args: Option<&str>) -> Result<Vec<u8>> {
    let args: Vec<Value> = match args {
        Some(json) => serde_json::from_str(json)
            .map_err(|e| CliError::Input(format!("invalid contract arguments: {e}")))?,
        None => Vec::new(),
    };
    Ok(CallInfo::new(name, args).to_payload())
}

/// Deployment when `contract` is absent, a call otherwise
pub fn contract_tx(sender: &str, contract: Option<&str>, payload: Vec<u8>, amount: &str) -> Result<Tx> {
    let account = decode_address(sender)?;
    let recipient = match contract {
        Some(contract) => decode_address(contract)?,
        None => Vec::new(),
    };
    let amount = parse_amount(amount)
        .map_err(|e| CliError::Input(format!("wrong value in --amount flag: {e}")))?;
    Ok(Tx {
        hash: Vec::new(),
        body: Some(TxBody {
            account,
            recipient,
            amount: amount_to_bytes(&amount),
            payload,
            r#type: TxType::Normal as i32,
            ..Default::default()
        }),
    })
}

async fn commit(ctx: &NodeContext, tx: Tx) -> Result<()> {
    let account = tx.body.as_ref().map(|b| b.account.clone()).unwrap_or_default();
    let signer = resolve_signer(ctx, &account, None, None)?;
    let results = sign_remote_and_commit(ctx.client()?, tx, &signer).await?;
    print_json(&conv_commit_result_list(&CommitResultList { results }))
}
