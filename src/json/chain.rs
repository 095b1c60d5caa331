use std::collections::BTreeMap;

use data_encoding::HEXLOWER;
use serde::Serialize;
use serde_json::Value;

use crate::proto::{
    BlockchainStatus, ChainId, ChainInfo, ChainStats, CommitResult, CommitResultList,
    CommitStatus, ConfChangeProgress, ConfChangeState, ConsensusInfo, EnterpriseConfig,
    MemberAttr, ServerInfo,
};
use crate::utils::base58_encode;

use super::{big_string, is_false, is_zero_i32, is_zero_u32, is_zero_u64};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutChainId {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub magic: String,
    #[serde(skip_serializing_if = "is_false")]
    pub public: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub mainnet: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub consensus: String,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub version: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutChainInfo {
    pub id: InOutChainId,
    #[serde(rename = "bpNumber", skip_serializing_if = "is_zero_u32")]
    pub bp_number: u32,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub maxblocksize: u64,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub maxtokens: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub stakingminimum: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub totalstaking: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub gasprice: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub nameprice: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub totalvotingpower: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub votingreward: String,
}

/// Best block summary. Keys are capitalised, unlike the other views.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "PascalCase")]
pub struct InOutBlockchainStatus {
    pub hash: String,
    pub height: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus_info: Option<Value>,
    pub chain_id_hash: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_info: Option<InOutChainInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutChainStats {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub report: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutConsensusInfo {
    #[serde(rename = "type", skip_serializing_if = "String::is_empty")]
    pub kind: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub info: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub bps: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutCommitResult {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hash: String,
    pub result: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub detail: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutCommitResultList {
    pub results: Vec<InOutCommitResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutEnterpriseConfig {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub key: String,
    pub on: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub values: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutMember {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(rename = "peerID", skip_serializing_if = "String::is_empty")]
    pub peer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutConfChangeProgress {
    pub state: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub err: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub members: Vec<InOutMember>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutServerInfo {
    pub status: BTreeMap<String, String>,
    pub config: BTreeMap<String, BTreeMap<String, String>>,
}

pub fn conv_chain_id<'a>(msg: impl Into<Option<&'a ChainId>>) -> InOutChainId {
    let msg: Option<&ChainId> = msg.into();
    match msg {
        Some(id) => InOutChainId {
            magic: id.magic.clone(),
            public: id.public,
            mainnet: id.mainnet,
            consensus: id.consensus.clone(),
            version: id.version,
        },
        None => InOutChainId::default(),
    }
}

pub fn conv_chain_info<'a>(msg: impl Into<Option<&'a ChainInfo>>) -> InOutChainInfo {
    let msg: Option<&ChainInfo> = msg.into();
    let Some(msg) = msg else {
        return InOutChainInfo::default();
    };
    let id = conv_chain_id(msg.id.as_ref());
    // staking figures only mean something under dpos
    let dpos = id.consensus == "dpos";
    InOutChainInfo {
        bp_number: msg.bp_number,
        maxblocksize: msg.maxblocksize,
        maxtokens: big_string(&msg.maxtokens),
        stakingminimum: if dpos {
            big_string(&msg.stakingminimum)
        } else {
            String::new()
        },
        totalstaking: if dpos {
            big_string(&msg.totalstaking)
        } else {
            String::new()
        },
        gasprice: big_string(&msg.gasprice),
        nameprice: big_string(&msg.nameprice),
        totalvotingpower: big_string(&msg.totalvotingpower),
        votingreward: big_string(&msg.votingreward),
        id,
    }
}

pub fn conv_blockchain_status<'a>(
    msg: impl Into<Option<&'a BlockchainStatus>>,
) -> InOutBlockchainStatus {
    let msg: Option<&BlockchainStatus> = msg.into();
    let Some(msg) = msg else {
        return InOutBlockchainStatus::default();
    };
    let consensus_info = if msg.consensus_info.is_empty() {
        None
    } else {
        // the node sends a JSON document; keep it verbatim when it is not one
        Some(
            serde_json::from_str(&msg.consensus_info)
                .unwrap_or_else(|_| Value::String(msg.consensus_info.clone())),
        )
    };
    InOutBlockchainStatus {
        hash: base58_encode(&msg.best_block_hash),
        height: msg.best_height,
        consensus_info,
        chain_id_hash: base58_encode(&msg.best_chain_id_hash),
        chain_info: msg.chain_info.as_ref().map(conv_chain_info),
    }
}

/// Hex rendering of the best block; consensus and chain info are left out
pub fn conv_hex_blockchain_status<'a>(
    msg: impl Into<Option<&'a BlockchainStatus>>,
) -> InOutBlockchainStatus {
    let msg: Option<&BlockchainStatus> = msg.into();
    let Some(msg) = msg else {
        return InOutBlockchainStatus::default();
    };
    InOutBlockchainStatus {
        hash: HEXLOWER.encode(&msg.best_block_hash),
        height: msg.best_height,
        chain_id_hash: HEXLOWER.encode(&msg.best_chain_id_hash),
        ..Default::default()
    }
}

pub fn conv_chain_stats<'a>(msg: impl Into<Option<&'a ChainStats>>) -> InOutChainStats {
    let msg: Option<&ChainStats> = msg.into();
    InOutChainStats {
        report: msg.map(|m| m.report.clone()).unwrap_or_default(),
    }
}

pub fn conv_consensus_info<'a>(msg: impl Into<Option<&'a ConsensusInfo>>) -> InOutConsensusInfo {
    let msg: Option<&ConsensusInfo> = msg.into();
    match msg {
        Some(ci) => InOutConsensusInfo {
            kind: ci.r#type.clone(),
            info: ci.info.clone(),
            bps: ci.bps.clone(),
        },
        None => InOutConsensusInfo::default(),
    }
}

pub fn commit_status_name(code: i32) -> String {
    match CommitStatus::try_from(code) {
        Ok(status) => status.as_str_name().to_string(),
        Err(_) => format!("UNKNOWN({code})"),
    }
}

pub fn conv_commit_result<'a>(msg: impl Into<Option<&'a CommitResult>>) -> InOutCommitResult {
    let msg: Option<&CommitResult> = msg.into();
    let Some(r) = msg else {
        return InOutCommitResult::default();
    };
    InOutCommitResult {
        hash: base58_encode(&r.hash),
        result: commit_status_name(r.error),
        detail: r.detail.clone(),
    }
}

pub fn conv_commit_result_list<'a>(
    msg: impl Into<Option<&'a CommitResultList>>,
) -> InOutCommitResultList {
    let msg: Option<&CommitResultList> = msg.into();
    InOutCommitResultList {
        results: msg
            .map(|l| l.results.iter().map(conv_commit_result).collect())
            .unwrap_or_default(),
    }
}

pub fn conv_enterprise_config<'a>(
    msg: impl Into<Option<&'a EnterpriseConfig>>,
) -> InOutEnterpriseConfig {
    let msg: Option<&EnterpriseConfig> = msg.into();
    match msg {
        Some(c) => InOutEnterpriseConfig {
            key: c.key.clone(),
            on: c.on,
            values: c.values.clone(),
        },
        None => InOutEnterpriseConfig::default(),
    }
}

pub fn conv_member(msg: &MemberAttr) -> InOutMember {
    InOutMember {
        id: if msg.id == 0 {
            String::new()
        } else {
            format!("{:x}", msg.id)
        },
        name: msg.name.clone(),
        address: msg.address.clone(),
        peer_id: base58_encode(&msg.peer_id),
    }
}

pub fn conf_change_state_name(state: i32) -> String {
    match ConfChangeState::try_from(state) {
        Ok(s) => s.as_str_name().to_string(),
        Err(_) => format!("UNKNOWN({state})"),
    }
}

pub fn conv_conf_change_progress<'a>(
    msg: impl Into<Option<&'a ConfChangeProgress>>,
) -> InOutConfChangeProgress {
    let msg: Option<&ConfChangeProgress> = msg.into();
    let Some(p) = msg else {
        return InOutConfChangeProgress::default();
    };
    InOutConfChangeProgress {
        state: conf_change_state_name(p.state),
        err: p.err.clone(),
        members: p.members.iter().map(conv_member).collect(),
    }
}

pub fn conv_server_info<'a>(msg: impl Into<Option<&'a ServerInfo>>) -> InOutServerInfo {
    let msg: Option<&ServerInfo> = msg.into();
    let Some(info) = msg else {
        return InOutServerInfo::default();
    };
    InOutServerInfo {
        status: info.status.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
        config: info
            .config
            .iter()
            .map(|(k, item)| {
                let props = item
                    .props
                    .iter()
                    .map(|(pk, pv)| (pk.clone(), pv.clone()))
                    .collect();
                (k.clone(), props)
            })
            .collect(),
    }
}
