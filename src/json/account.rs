use serde::Serialize;

use crate::core::address::encode_address;
use crate::core::governance::VOTE_BP_ID;
use crate::proto::{AccountProof, AccountVoteInfo, NameInfo, Staking, State, VoteList};
use crate::utils::base58_encode;

use super::{big_string, is_zero_u64};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InOutState {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub account: String,
    pub nonce: u64,
    pub balance: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub code_hash: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub storage_root: String,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub sql_recovery_point: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InOutStateAndProof {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub account: String,
    pub nonce: u64,
    pub balance: String,
    pub included: bool,
    pub merkle_proof_length: usize,
    pub height: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutStaking {
    pub amount: String,
    pub when: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InOutNameInfo {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub owner: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutVote {
    pub candidate: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutVotes {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub votes: Vec<InOutVote>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutVoteInfo {
    pub id: String,
    pub candidates: Vec<String>,
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutAccountVoteInfo {
    pub voting: Vec<InOutVoteInfo>,
}

pub fn conv_state<'a>(account: &[u8], msg: impl Into<Option<&'a State>>) -> InOutState {
    let msg: Option<&State> = msg.into();
    let state = msg.cloned().unwrap_or_default();
    InOutState {
        account: encode_address(account),
        nonce: state.nonce,
        balance: big_string(&state.balance),
        code_hash: base58_encode(&state.code_hash),
        storage_root: base58_encode(&state.storage_root),
        sql_recovery_point: state.sql_recovery_point,
    }
}

pub fn conv_state_and_proof<'a>(
    account: &[u8],
    msg: impl Into<Option<&'a AccountProof>>,
) -> InOutStateAndProof {
    let msg: Option<&AccountProof> = msg.into();
    let proof = msg.cloned().unwrap_or_default();
    let state = proof.state.unwrap_or_default();
    InOutStateAndProof {
        account: encode_address(account),
        nonce: state.nonce,
        balance: big_string(&state.balance),
        included: proof.inclusion,
        merkle_proof_length: proof.audit_path.len(),
        height: proof.height,
    }
}

pub fn conv_staking<'a>(msg: impl Into<Option<&'a Staking>>) -> InOutStaking {
    let msg: Option<&Staking> = msg.into();
    match msg {
        Some(s) => InOutStaking {
            amount: big_string(&s.amount),
            when: s.when,
        },
        None => InOutStaking::default(),
    }
}

pub fn conv_name_info<'a>(msg: impl Into<Option<&'a NameInfo>>) -> InOutNameInfo {
    let msg: Option<&NameInfo> = msg.into();
    let Some(info) = msg else {
        return InOutNameInfo::default();
    };
    InOutNameInfo {
        name: info.name.as_ref().map(|n| n.name.clone()).unwrap_or_default(),
        owner: encode_address(&info.owner),
        destination: encode_address(&info.destination),
    }
}

/// Block producer candidates are peer ids; other vote ids carry text
pub fn conv_votes<'a>(msg: impl Into<Option<&'a VoteList>>) -> InOutVotes {
    let msg: Option<&VoteList> = msg.into();
    let Some(list) = msg else {
        return InOutVotes::default();
    };
    let peer_candidates = list.id.is_empty() || list.id == VOTE_BP_ID;
    InOutVotes {
        id: list.id.clone(),
        votes: list
            .votes
            .iter()
            .map(|v| InOutVote {
                candidate: if peer_candidates {
                    base58_encode(&v.candidate)
                } else {
                    String::from_utf8_lossy(&v.candidate).into_owned()
                },
                amount: big_string(&v.amount),
            })
            .collect(),
    }
}

pub fn conv_account_vote_info<'a>(
    msg: impl Into<Option<&'a AccountVoteInfo>>,
) -> InOutAccountVoteInfo {
    let msg: Option<&AccountVoteInfo> = msg.into();
    InOutAccountVoteInfo {
        voting: msg
            .map(|info| {
                info.voting
                    .iter()
                    .map(|v| InOutVoteInfo {
                        id: v.id.clone(),
                        candidates: v.candidates.clone(),
                        amount: v.amount.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::proto::Vote;

    #[test]
    fn test_state_view() {
        let state = State {
            nonce: 3,
            balance: vec![0x01, 0x00],
            ..Default::default()
        };
        let view = conv_state(&[], &state);
        assert_eq!(view.nonce, 3);
        assert_eq!(view.balance, "256");
        assert!(view.code_hash.is_empty());

        let empty = conv_state(&[], None);
        assert_eq!(empty.balance, "0");
    }

    #[test]
    fn test_vote_candidates() {
        let bp = VoteList {
            id: VOTE_BP_ID.to_string(),
            votes: vec![Vote {
                candidate: vec![1, 2, 3],
                amount: vec![10],
            }],
        };
        assert_eq!(conv_votes(&bp).votes[0].candidate, base58_encode(&[1, 2, 3]));

        let dao = VoteList {
            id: "GASPRICE".to_string(),
            votes: vec![Vote {
                candidate: b"50000000000".to_vec(),
                amount: vec![10],
            }],
        };
        let view = conv_votes(&dao);
        assert_eq!(view.votes[0].candidate, "50000000000");
        assert_eq!(view.votes[0].amount, "10");
    }
}
