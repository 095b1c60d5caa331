//! Read-only inspection of the chain, its blocks, transactions and accounts

use log::debug;

use crate::cli::context::NodeContext;
use crate::cli::output::print_json;
use crate::core::address::decode_address;
use crate::error::{CliError, Result};
use crate::json::{
    conv_account_vote_info, conv_block, conv_block_header, conv_blockchain_status,
    conv_chain_info, conv_chain_stats, conv_consensus_info, conv_hex_blockchain_status,
    conv_metrics, conv_receipt, conv_server_info, conv_staking, conv_state,
    conv_state_and_proof, conv_tx, conv_tx_in_block, PayloadEncoding,
};
use crate::network::TxLookup;
use crate::proto::{AccountAndRoot, ListParams, MetricType, MetricsRequest, NodeReq};
use crate::utils::base58_decode;

/// Key for `GetBlock`: the decoded hash, or the height as 8 little-endian bytes
pub fn block_key(hash: Option<&str>, number: Option<u64>) -> Result<Vec<u8>> {
    match (hash, number) {
        (Some(hash), _) => base58_decode(hash),
        (None, Some(number)) => Ok(number.to_le_bytes().to_vec()),
        (None, None) => Err(CliError::Input(
            "either --hash or --number is required".to_string(),
        )),
    }
}

/// Hash of a transaction given on the command line
pub fn tx_hash_arg(hash: &str) -> Result<Vec<u8>> {
    base58_decode(hash).map_err(|_| CliError::Input("invalid tx hash".to_string()))
}

/// `NodeReq` for a component (all components when empty)
pub fn node_request(component: &str, timeout_secs: u64) -> NodeReq {
    NodeReq {
        timeout: timeout_secs.to_le_bytes().to_vec(),
        component: component.as_bytes().to_vec(),
    }
}

pub async fn blockchain(ctx: &NodeContext, hex: bool) -> Result<()> {
    let status = ctx.client()?.blockchain().await?;
    if hex {
        print_json(&conv_hex_blockchain_status(&status))
    } else {
        print_json(&conv_blockchain_status(&status))
    }
}

pub async fn chaininfo(ctx: &NodeContext) -> Result<()> {
    let info = ctx.client()?.chain_info().await?;
    print_json(&conv_chain_info(&info))
}

pub async fn chainstat(ctx: &NodeContext) -> Result<()> {
    let stats = ctx.client()?.chain_stat().await?;
    print_json(&conv_chain_stats(&stats))
}

pub async fn consensusinfo(ctx: &NodeContext) -> Result<()> {
    let info = ctx.client()?.consensus_info().await?;
    print_json(&conv_consensus_info(&info))
}

pub async fn getblock(ctx: &NodeContext, hash: Option<&str>, number: Option<u64>) -> Result<()> {
    let key = block_key(hash, number)?;
    let block = ctx.client()?.get_block(key).await?;
    print_json(&conv_block(&block, PayloadEncoding::Base58))
}

pub struct ListBlocksRequest<'a> {
    pub hash: Option<&'a str>,
    pub height: u64,
    pub size: u32,
    pub offset: u32,
    pub asc: bool,
}

pub async fn listblocks(ctx: &NodeContext, req: ListBlocksRequest<'_>) -> Result<()> {
    let hash = match req.hash {
        Some(hash) => base58_decode(hash)?,
        None => Vec::new(),
    };
    let params = ListParams {
        hash,
        height: req.height,
        size: req.size,
        offset: req.offset,
        asc: req.asc,
    };
    let list = ctx.client()?.list_block_headers(params).await?;
    debug!("Received {} block headers", list.blocks.len());
    for block in &list.blocks {
        print_json(&conv_block_header(block.header.as_ref()))?;
    }
    Ok(())
}

pub async fn gettx(ctx: &NodeContext, hash: &str) -> Result<()> {
    let hash = tx_hash_arg(hash)?;
    match ctx.client()?.lookup_tx(hash).await? {
        TxLookup::Pending(tx) => print_json(&conv_tx(&tx, PayloadEncoding::Base58)),
        TxLookup::InBlock(tx) => print_json(&conv_tx_in_block(&tx, PayloadEncoding::Base58)),
    }
}

pub async fn getreceipt(ctx: &NodeContext, hash: &str) -> Result<()> {
    let hash = tx_hash_arg(hash)?;
    let receipt = ctx.client()?.get_receipt(hash).await?;
    print_json(&conv_receipt(&receipt))
}

pub struct StateRequest<'a> {
    pub address: &'a str,
    pub proof: bool,
    pub root: Option<&'a str>,
    pub compressed: bool,
}

pub async fn getstate(ctx: &NodeContext, req: StateRequest<'_>) -> Result<()> {
    let account = decode_address(req.address)?;
    let client = ctx.client()?;
    if req.proof {
        let root = match req.root {
            Some(root) => base58_decode(root)?,
            None => Vec::new(),
        };
        let proof = client
            .get_state_and_proof(AccountAndRoot {
                account: account.clone(),
                root,
                compressed: req.compressed,
            })
            .await?;
        print_json(&conv_state_and_proof(&account, &proof))
    } else {
        let state = client.get_state(account.clone()).await?;
        print_json(&conv_state(&account, &state))
    }
}

pub async fn getstaking(ctx: &NodeContext, address: &str) -> Result<()> {
    let account = decode_address(address)?;
    let staking = ctx.client()?.get_staking(account).await?;
    print_json(&conv_staking(&staking))
}

pub async fn getaccountvote(ctx: &NodeContext, address: &str) -> Result<()> {
    let account = decode_address(address)?;
    let votes = ctx.client()?.get_account_votes(account).await?;
    print_json(&conv_account_vote_info(&votes))
}

pub async fn nodestate(ctx: &NodeContext, component: &str, timeout_secs: u64) -> Result<()> {
    let reply = ctx
        .client()?
        .node_state(node_request(component, timeout_secs))
        .await?;
    println!("{}", String::from_utf8_lossy(&reply.value));
    Ok(())
}

pub async fn metric(ctx: &NodeContext) -> Result<()> {
    let metrics = ctx
        .client()?
        .metric(MetricsRequest {
            types: vec![MetricType::P2pNetwork as i32],
        })
        .await?;
    print_json(&conv_metrics(&metrics))
}

pub async fn serverinfo(ctx: &NodeContext, keys: Vec<String>) -> Result<()> {
    let info = ctx.client()?.server_info(keys).await?;
    print_json(&conv_server_info(&info))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_block_key_by_number() {
        assert_eq!(
            block_key(None, Some(0x0102)).unwrap(),
            vec![0x02, 0x01, 0, 0, 0, 0, 0, 0]
        );
    }

    #[test]
    fn test_block_key_by_hash() {
        let key = block_key(Some("2g"), Some(7)).unwrap();
        assert_eq!(key, base58_decode("2g").unwrap());
        assert!(block_key(Some("0OIl"), None).is_err());
        assert!(block_key(None, None).is_err());
    }

    #[test]
    fn test_tx_hash_arg() {
        assert_eq!(
            tx_hash_arg("not base58 0").unwrap_err().to_string(),
            "invalid tx hash"
        );
    }

    #[test]
    fn test_node_request() {
        let req = node_request("p2p", 3);
        assert_eq!(req.timeout, vec![3, 0, 0, 0, 0, 0, 0, 0]);
        assert_eq!(req.component, b"p2p".to_vec());
        assert!(node_request("", 1).component.is_empty());
    }
}
