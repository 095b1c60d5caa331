//! `getpeers`: the node's peer table, sorted and rendered at several detail levels

use std::cmp::Ordering;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use log::debug;

use crate::cli::commands::PeerSort;
use crate::cli::context::NodeContext;
use crate::cli::output::print_json;
use crate::error::{CliError, Result};
use crate::json::{
    conv_long_peer_list, conv_peer_list, conv_short_peer_list, peer_role_name, short_form,
    InOutShortPeerList,
};
use crate::proto::{Peer, PeerList, PeersParams};
use crate::utils::base58_encode;

/// Alias table kept next to the cli config, base58 peer id to name
pub const NODE_ALIAS_FILE: &str = "nodeAliases.json";

/// `--detail` value selecting the aligned short listing
pub const DETAIL_PRETTY: i32 = -2;

pub async fn getpeers(
    ctx: &NodeContext,
    nohidden: bool,
    show_self: bool,
    sort: &str,
    detail: i32,
) -> Result<()> {
    // the sort type is checked before asking the node anything
    let sort: PeerSort = sort.parse().map_err(CliError::Input)?;
    let mut list = ctx
        .client()?
        .get_peers(PeersParams {
            no_hidden: nohidden,
            show_self,
        })
        .await?;
    debug!("Node reported {} peers", list.peers.len());
    sort_peers(&mut list.peers, sort);

    match detail {
        0 => print_json(&conv_peer_list(&list)),
        d if d > 0 => print_json(&conv_long_peer_list(&list)),
        DETAIL_PRETTY => {
            let aliases = load_aliases(&ctx.home().join(NODE_ALIAS_FILE));
            print_json(&pretty_short_list(&list, &aliases, sort))
        }
        _ => print_json(&conv_short_peer_list(&list)),
    }
}

fn by_addr(a: &Peer, b: &Peer) -> Ordering {
    let (a, b) = (a.address.clone().unwrap_or_default(), b.address.clone().unwrap_or_default());
    a.address.cmp(&b.address).then(a.port.cmp(&b.port))
}

fn by_id(a: &Peer, b: &Peer) -> Ordering {
    let id = |p: &Peer| p.address.as_ref().map(|a| a.peer_id.clone()).unwrap_or_default();
    id(a).cmp(&id(b))
}

fn by_height(a: &Peer, b: &Peer) -> Ordering {
    let best = |p: &Peer| {
        p.bestblock
            .as_ref()
            .map(|b| (b.block_no, b.block_hash.clone()))
            .unwrap_or_default()
    };
    best(a).cmp(&best(b))
}

/// Order the peers in place. Alias ordering is applied on the pretty listing,
/// so here it leaves the node's order alone, as `no` does.
pub fn sort_peers(peers: &mut [Peer], sort: PeerSort) {
    match sort {
        PeerSort::Addr => peers.sort_by(by_addr),
        PeerSort::Id => peers.sort_by(by_id),
        PeerSort::Height => peers.sort_by(by_height),
        PeerSort::No | PeerSort::Alias => {}
    }
}

/// Read the alias table. A missing or malformed file means no aliases.
pub fn load_aliases(path: &Path) -> HashMap<String, String> {
    let Ok(raw) = fs::read(path) else {
        return HashMap::new();
    };
    serde_json::from_slice(&raw).unwrap_or_else(|e| {
        debug!("Ignoring alias file {}: {e}", path.display());
        HashMap::new()
    })
}

struct ShortPeer<'a> {
    alias: &'a str,
    peer: &'a Peer,
}

/// Right-aligned `alias;id;address/port;role;height` lines. The alias column
/// only appears when at least one peer has an alias.
pub fn pretty_short_list(
    list: &PeerList,
    aliases: &HashMap<String, String>,
    sort: PeerSort,
) -> InOutShortPeerList {
    let mut rows: Vec<ShortPeer> = list
        .peers
        .iter()
        .map(|peer| {
            let id = peer.address.as_ref().map(|a| base58_encode(&a.peer_id)).unwrap_or_default();
            ShortPeer {
                alias: aliases.get(&id).map(String::as_str).unwrap_or(""),
                peer,
            }
        })
        .collect();
    let name_size = rows.iter().map(|r| r.alias.len()).max().unwrap_or(0);
    if sort == PeerSort::Alias {
        rows.sort_by(|a, b| a.alias.cmp(b.alias));
    }

    let peers = rows
        .iter()
        .map(|row| {
            let address = row.peer.address.clone().unwrap_or_default();
            let id = short_form(&address.peer_id);
            let role = peer_role_name(row.peer.accepted_role);
            let height = row.peer.bestblock.as_ref().map_or(0, |b| b.block_no);
            if name_size > 0 {
                format!(
                    "{:>name_size$};{:>5};{:>15}/{:>5};{:>9};{:>10}",
                    row.alias, id, address.address, address.port, role, height
                )
            } else {
                format!(
                    "{:>5};{:>15}/{:>5};{:>9};{:>10}",
                    id, address.address, address.port, role, height
                )
            }
        })
        .collect();
    InOutShortPeerList { peers }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::{NewBlockNotice, PeerAddress, PeerRole};

    fn peer(address: &str, port: u32, id: u8, height: u64) -> Peer {
        Peer {
            address: Some(PeerAddress {
                address: address.to_string(),
                port,
                peer_id: vec![id; 39],
                role: PeerRole::Producer as i32,
                ..Default::default()
            }),
            bestblock: Some(NewBlockNotice {
                block_hash: vec![id; 32],
                block_no: height,
            }),
            accepted_role: PeerRole::Producer as i32,
            ..Default::default()
        }
    }

    fn ports(peers: &[Peer]) -> Vec<u32> {
        peers.iter().map(|p| p.address.as_ref().unwrap().port).collect()
    }

    #[test]
    fn test_sort_peers() {
        let mut peers = vec![
            peer("10.0.0.2", 7846, 3, 100),
            peer("10.0.0.1", 7847, 1, 300),
            peer("10.0.0.1", 7846, 2, 100),
        ];
        sort_peers(&mut peers, PeerSort::No);
        assert_eq!(ports(&peers), vec![7846, 7847, 7846]);

        sort_peers(&mut peers, PeerSort::Addr);
        assert_eq!(ports(&peers), vec![7846, 7847, 7846]);
        assert_eq!(peers[0].address.as_ref().unwrap().address, "10.0.0.1");
        assert_eq!(peers[2].address.as_ref().unwrap().address, "10.0.0.2");

        sort_peers(&mut peers, PeerSort::Id);
        let ids: Vec<u8> = peers.iter().map(|p| p.address.as_ref().unwrap().peer_id[0]).collect();
        assert_eq!(ids, vec![1, 2, 3]);

        // equal heights fall back to the block hash
        sort_peers(&mut peers, PeerSort::Height);
        let ids: Vec<u8> = peers.iter().map(|p| p.address.as_ref().unwrap().peer_id[0]).collect();
        assert_eq!(ids, vec![2, 3, 1]);
    }

    #[test]
    fn test_load_aliases() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(NODE_ALIAS_FILE);
        assert!(load_aliases(&path).is_empty());
        fs::write(&path, "not json").unwrap();
        assert!(load_aliases(&path).is_empty());
        fs::write(&path, r#"{"16Uiu2":"bp01"}"#).unwrap();
        assert_eq!(load_aliases(&path).get("16Uiu2").map(String::as_str), Some("bp01"));
    }

    #[test]
    fn test_pretty_short_list_without_aliases() {
        let list = PeerList {
            peers: vec![peer("10.0.0.1", 7846, 1, 42)],
        };
        let out = pretty_short_list(&list, &HashMap::new(), PeerSort::No);
        let id = short_form(&[1u8; 39]);
        assert_eq!(
            out.peers,
            vec![format!("{id};       10.0.0.1/ 7846; Producer;        42")]
        );
    }

    #[test]
    fn test_pretty_short_list_aliases() {
        let list = PeerList {
            peers: vec![peer("10.0.0.1", 7846, 1, 42), peer("10.0.0.2", 7846, 2, 7)],
        };
        let mut aliases = HashMap::new();
        aliases.insert(base58_encode(&[1u8; 39]), "zeta".to_string());
        aliases.insert(base58_encode(&[2u8; 39]), "al".to_string());

        let out = pretty_short_list(&list, &aliases, PeerSort::No);
        assert!(out.peers[0].starts_with("zeta;"));
        assert!(out.peers[1].starts_with("  al;"));

        let out = pretty_short_list(&list, &aliases, PeerSort::Alias);
        assert!(out.peers[0].starts_with("  al;"));
        assert!(out.peers[0].ends_with(";         7"));
    }
}
