//! Governance payloads carried to `aergo.system` and `aergo.name`
//!
//! A payload is a JSON call description `{"Name": ..., "Args": [...]}`.
//! Older system transactions used a one-byte prefix instead (`s` stake,
//! `u` unstake, `v` vote followed by packed peer ids); both are accepted.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::address::{decode_address, is_valid_name};
use crate::core::monetary::{NAME_MINIMUM, STAKING_MINIMUM};
use crate::error::ValidationError;
use crate::proto::TxBody;
use crate::utils::base58_decode;

pub const STAKE: &str = "v1stake";
pub const UNSTAKE: &str = "v1unstake";
pub const VOTE_BP: &str = "v1voteBP";
pub const VOTE_DAO: &str = "v1voteDAO";

pub const NAME_CREATE: &str = "v1createName";
pub const NAME_UPDATE: &str = "v1updateName";
pub const SET_OWNER: &str = "v1setOwner";

/// Vote id used when voting for block producers
pub const VOTE_BP_ID: &str = "BPCOUNT";

/// Length of a packed peer id inside a legacy vote payload
pub const PEER_ID_LENGTH: usize = 39;

/// Contract call description used in governance and contract payloads
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallInfo {
    #[serde(rename = "Name", alias = "name")]
    pub name: String,
    #[serde(
        rename = "Args",
        alias = "args",
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "null_as_empty"
    )]
    pub args: Vec<Value>,
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let args: Option<Vec<Value>> = Option::deserialize(deserializer)?;
    Ok(args.unwrap_or_default())
}

impl CallInfo {
    pub fn new(name: &str, args: Vec<Value>) -> Self {
        CallInfo {
            name: name.to_string(),
            args,
        }
    }

    pub fn parse(payload: &[u8]) -> Option<CallInfo> {
        serde_json::from_slice(payload).ok()
    }

    pub fn to_payload(&self) -> Vec<u8> {
        // a struct of a string and JSON values always serializes
        serde_json::to_vec(self).unwrap_or_default()
    }

    fn arg_str(&self, index: usize) -> Option<&str> {
        self.args.get(index).and_then(Value::as_str)
    }
}

/// Operations understood by the system contract
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemOp {
    Stake,
    Unstake,
    VoteBp,
    VoteDao,
}

/// Classify a system payload, JSON or legacy prefix form
pub fn system_op(payload: &[u8]) -> Option<SystemOp> {
    match payload.first() {
        Some(b'{') => {
            let ci = CallInfo::parse(payload)?;
            match ci.name.as_str() {
                STAKE => Some(SystemOp::Stake),
                UNSTAKE => Some(SystemOp::Unstake),
                VOTE_BP => Some(SystemOp::VoteBp),
                VOTE_DAO => Some(SystemOp::VoteDao),
                _ => None,
            }
        }
        Some(b's') => Some(SystemOp::Stake),
        Some(b'u') => Some(SystemOp::Unstake),
        Some(b'v') => Some(SystemOp::VoteBp),
        _ => None,
    }
}

pub fn validate_system_tx(body: &TxBody) -> std::result::Result<(), ValidationError> {
    let op = system_op(&body.payload).ok_or(ValidationError::InvalidPayload)?;
    match op {
        SystemOp::Stake | SystemOp::Unstake => {
            if body.amount_value() < *STAKING_MINIMUM {
                return Err(ValidationError::TooSmallAmount);
            }
        }
        SystemOp::VoteBp => validate_bp_vote(&body.payload)?,
        SystemOp::VoteDao => {
            let ci = CallInfo::parse(&body.payload).ok_or(ValidationError::InvalidPayload)?;
            if ci.arg_str(0).map_or(true, str::is_empty) {
                return Err(ValidationError::InvalidPayload);
            }
        }
    }
    Ok(())
}

fn validate_bp_vote(payload: &[u8]) -> std::result::Result<(), ValidationError> {
    if payload.first() == Some(&b'v') {
        if (payload.len() - 1) % PEER_ID_LENGTH != 0 {
            return Err(ValidationError::InvalidPayload);
        }
        return Ok(());
    }
    let ci = CallInfo::parse(payload).ok_or(ValidationError::InvalidPayload)?;
    let mut seen = HashSet::new();
    for arg in &ci.args {
        let candidate = arg.as_str().ok_or(ValidationError::InvalidPayload)?;
        base58_decode(candidate).map_err(|_| ValidationError::InvalidPayload)?;
        if !seen.insert(candidate) {
            return Err(ValidationError::InvalidPayload);
        }
    }
    Ok(())
}

pub fn validate_name_tx(body: &TxBody) -> std::result::Result<(), ValidationError> {
    let ci = CallInfo::parse(&body.payload).ok_or(ValidationError::InvalidPayload)?;
    let valid_name_arg = |ci: &CallInfo| ci.arg_str(0).map_or(false, is_valid_name);
    let valid_address_arg =
        |ci: &CallInfo, i: usize| ci.arg_str(i).map_or(false, |a| decode_address(a).is_ok());

    let ok = match ci.name.as_str() {
        NAME_CREATE | "createNameV1" => ci.args.len() == 1 && valid_name_arg(&ci),
        NAME_UPDATE | "updateNameV1" => {
            ci.args.len() == 2 && valid_name_arg(&ci) && valid_address_arg(&ci, 1)
        }
        SET_OWNER => ci.args.len() == 1 && valid_address_arg(&ci, 0),
        _ => false,
    };
    if !ok {
        return Err(ValidationError::InvalidPayload);
    }
    if body.amount_value() < *NAME_MINIMUM {
        return Err(ValidationError::TooSmallAmount);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::monetary::{amount_to_bytes, parse_amount};
    use serde_json::json;

    fn body(payload: &[u8], amount: &str) -> TxBody {
        TxBody {
            payload: payload.to_vec(),
            amount: amount_to_bytes(&parse_amount(amount).unwrap()),
            ..Default::default()
        }
    }

    #[test]
    fn test_call_info_serialization() {
        let ci = CallInfo::new(NAME_CREATE, vec![json!("honggildong3")]);
        assert_eq!(
            String::from_utf8(ci.to_payload()).unwrap(),
            r#"{"Name":"v1createName","Args":["honggildong3"]}"#
        );
        let stake = CallInfo::new(STAKE, vec![]);
        assert_eq!(
            String::from_utf8(stake.to_payload()).unwrap(),
            r#"{"Name":"v1stake"}"#
        );
        let parsed = CallInfo::parse(br#"{"Name":"v1stake","Args":null}"#).unwrap();
        assert!(parsed.args.is_empty());
    }

    #[test]
    fn test_system_op_forms() {
        assert_eq!(system_op(b"s"), Some(SystemOp::Stake));
        assert_eq!(system_op(b"u"), Some(SystemOp::Unstake));
        assert_eq!(system_op(b"v"), Some(SystemOp::VoteBp));
        assert_eq!(system_op(br#"{"Name":"v1unstake"}"#), Some(SystemOp::Unstake));
        assert_eq!(system_op(br#"{"Name":"v1nothing"}"#), None);
        assert_eq!(system_op(b"x"), None);
    }

    #[test]
    fn test_stake_minimum() {
        assert_eq!(validate_system_tx(&body(b"s", "10000 aergo")), Ok(()));
        assert_eq!(
            validate_system_tx(&body(br#"{"Name":"v1stake"}"#, "9999 aergo")),
            Err(ValidationError::TooSmallAmount)
        );
        assert_eq!(
            validate_system_tx(&body(b"x", "10000 aergo")),
            Err(ValidationError::InvalidPayload)
        );
    }

    #[test]
    fn test_vote_payloads() {
        let mut legacy = vec![b'v'];
        legacy.extend_from_slice(&[1u8; PEER_ID_LENGTH]);
        assert_eq!(validate_system_tx(&body(&legacy, "0")), Ok(()));
        legacy.push(0);
        assert_eq!(
            validate_system_tx(&body(&legacy, "0")),
            Err(ValidationError::InvalidPayload)
        );

        let dup = br#"{"Name":"v1voteBP","Args":["16Uiu2","16Uiu2"]}"#;
        assert_eq!(
            validate_system_tx(&body(dup, "0")),
            Err(ValidationError::InvalidPayload)
        );
    }

    #[test]
    fn test_name_tx_rules() {
        let create = br#"{"Name":"v1createName","Args":["abcdefghijkl"]}"#;
        assert_eq!(validate_name_tx(&body(create, "1 aergo")), Ok(()));
        assert_eq!(
            validate_name_tx(&body(create, "0.9 aergo")),
            Err(ValidationError::TooSmallAmount)
        );

        let short = br#"{"Name":"v1createName","Args":["abc"]}"#;
        assert_eq!(
            validate_name_tx(&body(short, "1 aergo")),
            Err(ValidationError::InvalidPayload)
        );

        let update = br#"{"Name":"v1updateName","Args":["abcdefghijkl","AmNpn7K9wg6wsn6oMkTirQSUNdqtDm94iCrrpP5ZpwCAAxxPrsU2"]}"#;
        assert_eq!(validate_name_tx(&body(update, "1 aergo")), Ok(()));

        let bad_update = br#"{"Name":"v1updateName","Args":["abcdefghijkl","AmNpn7K9wg6wsn6oMkTirQSUNdqtDm94iCrrpP5ZpwCAAxxPrsU3"]}"#;
        assert_eq!(
            validate_name_tx(&body(bad_update, "1 aergo")),
            Err(ValidationError::InvalidPayload)
        );

        let unknown = br#"{"Name":"v1deleteName","Args":["abcdefghijkl"]}"#;
        assert_eq!(
            validate_name_tx(&body(unknown, "1 aergo")),
            Err(ValidationError::InvalidPayload)
        );
    }
}
