use serde::Serialize;

use crate::proto::{
    peer_state_name, BlConfEntries, Metrics, Peer, PeerAddress, PeerList, PeerMetric, PeerRole,
    PolarisPeer, PolarisPeerList,
};
use crate::utils::base58_encode;

use super::{
    conv_block_idx, format_unix_nanos, is_false, is_zero_i64, is_zero_u32, InOutBlockIdx,
};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutPeerAddress {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub port: String,
    #[serde(rename = "peerID", skip_serializing_if = "String::is_empty")]
    pub peer_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutPeer {
    #[serde(rename = "peerrole", skip_serializing_if = "String::is_empty")]
    pub role: String,
    pub address: InOutPeerAddress,
    pub bestblock: InOutBlockIdx,
    #[serde(rename = "lastCheck", skip_serializing_if = "String::is_empty")]
    pub last_check: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub state: String,
    #[serde(skip_serializing_if = "is_false")]
    pub hidden: bool,
    #[serde(skip_serializing_if = "is_false")]
    pub selfpeer: bool,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutPeerList {
    pub peers: Vec<InOutPeer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutShortPeerList {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub peers: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutLongPeer {
    #[serde(flatten)]
    pub peer: InOutPeer,
    #[serde(rename = "producerIDs", skip_serializing_if = "Vec::is_empty")]
    pub producer_ids: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutLongPeerList {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub peers: Vec<InOutLongPeer>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutPeerMetric {
    #[serde(rename = "peerID", skip_serializing_if = "String::is_empty")]
    pub peer_id: String,
    #[serde(rename = "sumIn", skip_serializing_if = "is_zero_i64")]
    pub sum_in: i64,
    #[serde(rename = "avrIn", skip_serializing_if = "is_zero_i64")]
    pub avr_in: i64,
    #[serde(rename = "sumOut", skip_serializing_if = "is_zero_i64")]
    pub sum_out: i64,
    #[serde(rename = "avrOut", skip_serializing_if = "is_zero_i64")]
    pub avr_out: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutMetrics {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub peers: Vec<InOutPeerMetric>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutBLConfEntries {
    #[serde(skip_serializing_if = "is_false")]
    pub enabled: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub entries: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutPolarisPeer {
    pub address: InOutPeerAddress,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub connected: String,
    #[serde(rename = "lastCheck", skip_serializing_if = "String::is_empty")]
    pub last_check: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub version: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutPolarisPeerList {
    #[serde(skip_serializing_if = "is_zero_u32")]
    pub total: u32,
    #[serde(rename = "hasNext", skip_serializing_if = "is_false")]
    pub has_next: bool,
    pub peers: Vec<InOutPolarisPeer>,
}

/// Abbreviated peer id: two leading and six trailing characters
pub fn short_form(peer_id: &[u8]) -> String {
    let pretty = base58_encode(peer_id);
    if pretty.len() <= 10 {
        return pretty;
    }
    format!("{}*{}", &pretty[..2], &pretty[pretty.len() - 6..])
}

pub fn peer_role_name(role: i32) -> &'static str {
    PeerRole::try_from(role)
        .map(|r| r.as_str_name())
        .unwrap_or("Unknown")
}

pub fn conv_peer_address<'a>(msg: impl Into<Option<&'a PeerAddress>>) -> InOutPeerAddress {
    let msg: Option<&PeerAddress> = msg.into();
    match msg {
        Some(a) => InOutPeerAddress {
            address: a.address.clone(),
            port: a.port.to_string(),
            peer_id: base58_encode(&a.peer_id),
        },
        None => InOutPeerAddress::default(),
    }
}

pub fn conv_peer<'a>(msg: impl Into<Option<&'a Peer>>) -> InOutPeer {
    let msg: Option<&Peer> = msg.into();
    let Some(p) = msg else {
        return InOutPeer::default();
    };
    InOutPeer {
        role: peer_role_name(p.accepted_role).to_string(),
        address: conv_peer_address(p.address.as_ref()),
        bestblock: conv_block_idx(p.bestblock.as_ref()),
        last_check: format_unix_nanos(p.lash_check),
        state: peer_state_name(p.state).to_string(),
        hidden: p.hidden,
        selfpeer: p.selfpeer,
        version: if p.version.is_empty() {
            "(old)".to_string()
        } else {
            p.version.clone()
        },
    }
}

pub fn conv_peer_list<'a>(msg: impl Into<Option<&'a PeerList>>) -> InOutPeerList {
    let msg: Option<&PeerList> = msg.into();
    InOutPeerList {
        peers: msg
            .map(|l| l.peers.iter().map(conv_peer).collect())
            .unwrap_or_default(),
    }
}

/// One line per peer: `shortId;address/port;role;height`
pub fn conv_short_peer_list<'a>(msg: impl Into<Option<&'a PeerList>>) -> InOutShortPeerList {
    let msg: Option<&PeerList> = msg.into();
    let peers = msg
        .map(|l| {
            l.peers
                .iter()
                .map(|p| {
                    let address = p.address.clone().unwrap_or_default();
                    format!(
                        "{};{}/{};{};{}",
                        short_form(&address.peer_id),
                        address.address,
                        address.port,
                        peer_role_name(p.accepted_role),
                        p.bestblock.as_ref().map_or(0, |b| b.block_no)
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    InOutShortPeerList { peers }
}

pub fn conv_long_peer<'a>(msg: impl Into<Option<&'a Peer>>) -> InOutLongPeer {
    let msg: Option<&Peer> = msg.into();
    let Some(p) = msg else {
        return InOutLongPeer::default();
    };
    InOutLongPeer {
        peer: conv_peer(p),
        producer_ids: p
            .address
            .as_ref()
            .map(|a| a.producer_ids.iter().map(|id| base58_encode(id)).collect())
            .unwrap_or_default(),
    }
}

pub fn conv_long_peer_list<'a>(msg: impl Into<Option<&'a PeerList>>) -> InOutLongPeerList {
    let msg: Option<&PeerList> = msg.into();
    InOutLongPeerList {
        peers: msg
            .map(|l| l.peers.iter().map(conv_long_peer).collect())
            .unwrap_or_default(),
    }
}

pub fn conv_peer_metric(msg: &PeerMetric) -> InOutPeerMetric {
    InOutPeerMetric {
        peer_id: base58_encode(&msg.peer_id),
        sum_in: msg.sum_in,
        avr_in: msg.avr_in,
        sum_out: msg.sum_out,
        avr_out: msg.avr_out,
    }
}

pub fn conv_metrics<'a>(msg: impl Into<Option<&'a Metrics>>) -> InOutMetrics {
    let msg: Option<&Metrics> = msg.into();
    InOutMetrics {
        peers: msg
            .map(|m| m.peers.iter().map(conv_peer_metric).collect())
            .unwrap_or_default(),
    }
}

pub fn conv_bl_conf_entries<'a>(msg: impl Into<Option<&'a BlConfEntries>>) -> InOutBLConfEntries {
    let msg: Option<&BlConfEntries> = msg.into();
    match msg {
        Some(e) => InOutBLConfEntries {
            enabled: e.enabled,
            entries: e.entries.clone(),
        },
        None => InOutBLConfEntries::default(),
    }
}

pub fn conv_polaris_peer(msg: &PolarisPeer) -> InOutPolarisPeer {
    InOutPolarisPeer {
        address: conv_peer_address(msg.address.as_ref()),
        connected: format_unix_nanos(msg.connected),
        last_check: format_unix_nanos(msg.last_check),
        version: msg.verion.clone(),
    }
}

pub fn conv_polaris_peer_list<'a>(
    msg: impl Into<Option<&'a PolarisPeerList>>,
) -> InOutPolarisPeerList {
    let msg: Option<&PolarisPeerList> = msg.into();
    let Some(list) = msg else {
        return InOutPolarisPeerList::default();
    };
    InOutPolarisPeerList {
        total: list.total,
        has_next: list.has_next,
        peers: list.peers.iter().map(conv_polaris_peer).collect(),
    }
}
