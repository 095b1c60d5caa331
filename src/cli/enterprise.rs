//! `enterprise` and `cluster` subcommands
//!
//! `enterprise tx` follows an enterprise transaction until it lands in a
//! block, then reports its receipt. For `changeCluster` calls it also
//! waits for the raft configuration change to be applied. Both waits poll
//! every three seconds and share one deadline.

use std::time::Duration;

use log::{debug, warn};
use serde::Serialize;
use tokio::time::{sleep, Instant};

use crate::cli::chain::tx_hash_arg;
use crate::cli::commands::{ClusterCommand, EnterpriseCommand};
use crate::cli::context::NodeContext;
use crate::cli::output::print_json;
use crate::core::governance::CallInfo;
use crate::error::{CliError, Result};
use crate::json::{conf_change_state_name, conv_member, InOutMember};
use crate::network::AergoClient;
use crate::proto::{
    ConfChangeProgress, ConfChangeState, EnterpriseConfig, MemberAttr, MembershipChange,
    MembershipChangeType, Tx, TxInBlock,
};
use crate::utils::base58_decode;

/// Enterprise call that changes the raft membership
pub const CHANGE_CLUSTER: &str = "changeCluster";

const POLL_INTERVAL: Duration = Duration::from_secs(3);

const NOT_PROPOSED: &str = "change cluster request may be not proposed";

/// `enterprise query` output; `On` is null for the permissions listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EnterpriseConfigView {
    #[serde(rename = "Key")]
    pub key: String,
    #[serde(rename = "On")]
    pub on: Option<bool>,
    #[serde(rename = "Values")]
    pub values: Vec<String>,
}

impl EnterpriseConfigView {
    pub fn new(requested: &str, config: &EnterpriseConfig) -> Self {
        EnterpriseConfigView {
            key: config.key.clone(),
            on: if requested.eq_ignore_ascii_case("permissions") {
                None
            } else {
                Some(config.on)
            },
            values: config.values.clone(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChangeClusterStatus {
    pub status: String,
    pub error: String,
    pub members: Vec<InOutMember>,
}

impl ChangeClusterStatus {
    pub fn from_progress(progress: &ConfChangeProgress) -> Self {
        ChangeClusterStatus {
            status: conf_change_state_name(progress.state),
            error: progress.err.clone(),
            members: progress.members.iter().map(conv_member).collect(),
        }
    }

    fn failed(error: &str) -> Self {
        ChangeClusterStatus {
            error: error.to_string(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnterpriseTxStatus {
    pub status: String,
    pub ret: String,
    #[serde(rename = "change_cluster", skip_serializing_if = "Option::is_none")]
    pub change_cluster: Option<ChangeClusterStatus>,
}

/// `enterprise tx` output
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EnterpriseTxOutput {
    #[serde(rename = "Payload")]
    pub payload: String,
    #[serde(rename = "TxStatus")]
    pub tx_status: Option<EnterpriseTxStatus>,
}

/// Where the followed transaction was last seen
enum Located {
    /// Still pending when the deadline passed
    Pending(Tx),
    InBlock(TxInBlock),
}

struct Deadline(Option<Instant>);

impl Deadline {
    fn after_secs(secs: u64) -> Self {
        // no timeout means a single look without waiting
        Deadline((secs > 0).then(|| Instant::now() + Duration::from_secs(secs)))
    }

    fn passed(&self) -> bool {
        self.0.map_or(true, |at| Instant::now() >= at)
    }
}

pub async fn run_enterprise(ctx: &NodeContext, cmd: EnterpriseCommand) -> Result<()> {
    match cmd {
        EnterpriseCommand::Query { key } => {
            let config = ctx.client()?.get_enterprise_config(key.clone()).await?;
            print_json(&EnterpriseConfigView::new(&key, &config))
        }
        EnterpriseCommand::Tx { hash, timeout } => {
            let hash = tx_hash_arg(&hash)?;
            let output = follow_tx(ctx.client()?, hash, Deadline::after_secs(timeout)).await?;
            println!("{}", serde_json::to_string(&output)?);
            Ok(())
        }
    }
}

/// `GetTX` answers for pending transactions only. Not found means the tx
/// may be in a block already; any other error ends the wait.
fn pending_tx(result: Result<Tx>) -> Result<Option<Tx>> {
    match result {
        Ok(tx) => Ok(Some(tx)),
        Err(e) if e.is_not_found() => Ok(None),
        Err(e) => Err(e),
    }
}

async fn locate_tx(client: &AergoClient, hash: &[u8], deadline: &Deadline) -> Result<Located> {
    loop {
        match pending_tx(client.get_tx(hash.to_vec()).await)? {
            Some(tx) => {
                if deadline.passed() {
                    return Ok(Located::Pending(tx));
                }
                debug!("Transaction still pending");
                sleep(POLL_INTERVAL).await;
            }
            None => {
                let found = client.get_block_tx(hash.to_vec()).await.map_err(|e| match e {
                    CliError::Rpc { kind, message } => CliError::rpc(
                        kind,
                        format!("failed to get tx from block (err={message})"),
                    ),
                    other => other,
                })?;
                return Ok(Located::InBlock(found));
            }
        }
    }
}

async fn follow_tx(client: &AergoClient, hash: Vec<u8>, deadline: Deadline) -> Result<EnterpriseTxOutput> {
    let (tx, in_block) = match locate_tx(client, &hash, &deadline).await? {
        Located::Pending(tx) => (Some(tx), None),
        Located::InBlock(found) => (found.tx.clone(), Some(found)),
    };

    let payload = tx
        .as_ref()
        .and_then(|t| t.body.as_ref())
        .map(|b| b.payload.clone())
        .unwrap_or_default();
    let ci = CallInfo::parse(&payload).ok_or_else(|| {
        CliError::Serialization("tx payload is not json".to_string())
    })?;
    let mut output = EnterpriseTxOutput {
        payload: String::from_utf8_lossy(&payload).into_owned(),
        tx_status: None,
    };

    let Some(in_block) = in_block else {
        return Ok(output);
    };
    let receipt = match client.get_receipt(hash).await {
        Ok(receipt) => receipt,
        Err(e) => {
            warn!("Failed to get receipt: {e}");
            return Ok(output);
        }
    };
    let mut status = EnterpriseTxStatus {
        status: receipt.status,
        ret: receipt.ret,
        change_cluster: None,
    };
    if ci.name == CHANGE_CLUSTER {
        let block_hash = in_block.tx_idx.map(|idx| idx.block_hash).unwrap_or_default();
        status.change_cluster = Some(
            match change_cluster_status(client, &block_hash, &deadline).await {
                Ok(progress) => ChangeClusterStatus::from_progress(&progress),
                Err(e) => ChangeClusterStatus::failed(&e.to_string()),
            },
        );
    }
    output.tx_status = Some(status);
    Ok(output)
}

async fn change_cluster_status(
    client: &AergoClient,
    block_hash: &[u8],
    deadline: &Deadline,
) -> Result<ConfChangeProgress> {
    if block_hash.is_empty() {
        return Err(CliError::Input(
            "failed to get block since blockhash is empty".to_string(),
        ));
    }
    let block_no = client.get_block(block_hash.to_vec()).await?.block_no();
    let key = block_no.to_le_bytes().to_vec();

    let mut last = None;
    while !deadline.passed() {
        match client.get_conf_change_progress(key.clone()).await {
            Ok(progress) if progress.state == ConfChangeState::ConfChangeStateApplied as i32 => {
                return Ok(progress);
            }
            Ok(progress) => last = Some(progress),
            Err(e) => debug!("Conf change progress not available: {e}"),
        }
        sleep(POLL_INTERVAL).await;
    }
    last.ok_or_else(|| CliError::Input(NOT_PROPOSED.to_string()))
}

/// Membership change request for `cluster add`
pub fn add_member_request(name: &str, url: &str, peer_id: &str) -> Result<MembershipChange> {
    let peer_id = base58_decode(peer_id)
        .map_err(|e| CliError::Input(format!("invalid peer id {peer_id}: {e}")))?;
    Ok(MembershipChange {
        r#type: MembershipChangeType::AddMember as i32,
        request_id: 0,
        attr: Some(MemberAttr {
            id: 0,
            name: name.to_string(),
            address: url.to_string(),
            peer_id,
        }),
    })
}

/// Membership change request for `cluster remove`; the id is hex
pub fn remove_member_request(node_id: &str) -> Result<MembershipChange> {
    let id = u64::from_str_radix(node_id.trim_start_matches("0x"), 16)
        .map_err(|e| CliError::Input(format!("invalid node id {node_id}: {e}")))?;
    Ok(MembershipChange {
        r#type: MembershipChangeType::RemoveMember as i32,
        request_id: 0,
        attr: Some(MemberAttr {
            id,
            ..Default::default()
        }),
    })
}

pub async fn run_cluster(ctx: &NodeContext, cmd: ClusterCommand) -> Result<()> {
    let request = match cmd {
        ClusterCommand::Add { name, url, peerid } => add_member_request(&name, &url, &peerid)?,
        ClusterCommand::Remove { nodeid } => remove_member_request(&nodeid)?,
    };
    let reply = ctx.client()?.change_membership(request).await?;
    print_json(&conv_member(&reply.attr.unwrap_or_default()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RpcErrorKind;
    use crate::utils::base58_encode;

    #[test]
    fn test_only_not_found_falls_back_to_block() {
        let tx = Tx {
            hash: vec![1; 32],
            body: None,
        };
        assert_eq!(pending_tx(Ok(tx.clone())).unwrap(), Some(tx));

        let missing = CliError::rpc(RpcErrorKind::NotFound, "tx not found");
        assert_eq!(pending_tx(Err(missing)).unwrap(), None);

        let down = CliError::rpc(RpcErrorKind::Unavailable, "connection refused");
        let err = pending_tx(Err(down)).unwrap_err();
        assert!(matches!(
            err,
            CliError::Rpc {
                kind: RpcErrorKind::Unavailable,
                ..
            }
        ));
        assert!(pending_tx(Err(CliError::Io("reset".to_string()))).is_err());
    }

    #[test]
    fn test_config_view() {
        let config = EnterpriseConfig {
            key: "ADMINS".to_string(),
            on: false,
            values: vec!["a".to_string()],
        };
        let view = EnterpriseConfigView::new("admins", &config);
        assert_eq!(
            serde_json::to_string(&view).unwrap(),
            r#"{"Key":"ADMINS","On":false,"Values":["a"]}"#
        );
        let view = EnterpriseConfigView::new("permissions", &config);
        assert_eq!(view.on, None);
    }

    #[test]
    fn test_pending_output_has_null_status() {
        let output = EnterpriseTxOutput {
            payload: r#"{"Name":"appendAdmin"}"#.to_string(),
            tx_status: None,
        };
        assert_eq!(
            serde_json::to_string(&output).unwrap(),
            r#"{"Payload":"{\"Name\":\"appendAdmin\"}","TxStatus":null}"#
        );
    }

    #[test]
    fn test_change_cluster_status() {
        let progress = ConfChangeProgress {
            state: ConfChangeState::ConfChangeStateApplied as i32,
            err: String::new(),
            members: vec![MemberAttr {
                id: 255,
                name: "bp1".to_string(),
                ..Default::default()
            }],
        };
        let status = ChangeClusterStatus::from_progress(&progress);
        assert_eq!(status.status, "CONF_CHANGE_STATE_APPLIED");
        assert_eq!(status.members[0].id, "ff");

        let tx_status = EnterpriseTxStatus {
            status: "SUCCESS".to_string(),
            ret: String::new(),
            change_cluster: None,
        };
        assert_eq!(
            serde_json::to_string(&tx_status).unwrap(),
            r#"{"status":"SUCCESS","ret":""}"#
        );
    }

    #[test]
    fn test_member_requests() {
        let peer = base58_encode(&[1u8; 39]);
        let add = add_member_request("bp4", "http://127.0.0.1:13004", &peer).unwrap();
        assert_eq!(add.r#type, MembershipChangeType::AddMember as i32);
        assert_eq!(add.attr.as_ref().unwrap().peer_id, vec![1u8; 39]);
        assert!(add_member_request("bp4", "url", "0OIl").is_err());

        let remove = remove_member_request("8fe3b5c1a3f2d1e0").unwrap();
        assert_eq!(remove.r#type, MembershipChangeType::RemoveMember as i32);
        assert_eq!(remove.attr.unwrap().id, 0x8fe3b5c1a3f2d1e0);
        assert!(remove_member_request("xyz").is_err());
    }

    #[test]
    fn test_zero_timeout_has_already_passed() {
        assert!(Deadline::after_secs(0).passed());
        assert!(!Deadline::after_secs(60).passed());
    }
}
