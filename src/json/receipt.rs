use data_encoding::BASE64;
use serde::Serialize;

use crate::core::address::encode_address;
use crate::proto::{Event, EventList, Receipt};
use crate::utils::base58_encode;

use super::{big_string, is_false, is_zero_i32, is_zero_u64, opt_big_string};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InOutEvent {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contract_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub event_name: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub json_args: String,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub event_idx: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tx_hash: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub block_hash: String,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub block_no: u64,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub tx_index: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutEventList {
    pub events: Vec<InOutEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InOutReceipt {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contract_address: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub ret: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub tx_hash: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub fee_used: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cumulative_fee_used: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub bloom: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub events: Vec<InOutEvent>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub block_hash: String,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub block_no: u64,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub tx_index: i32,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub from: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub to: String,
    #[serde(skip_serializing_if = "is_false")]
    pub fee_delegation: bool,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub gas_used: u64,
}

pub fn conv_event<'a>(msg: impl Into<Option<&'a Event>>) -> InOutEvent {
    let msg: Option<&Event> = msg.into();
    let Some(e) = msg else {
        return InOutEvent::default();
    };
    InOutEvent {
        contract_address: encode_address(&e.contract_address),
        event_name: e.event_name.clone(),
        json_args: e.json_args.clone(),
        event_idx: e.event_idx,
        tx_hash: base58_encode(&e.tx_hash),
        block_hash: base58_encode(&e.block_hash),
        block_no: e.block_no,
        tx_index: e.tx_index,
    }
}

pub fn conv_events<'a>(msg: impl Into<Option<&'a EventList>>) -> InOutEventList {
    let msg: Option<&EventList> = msg.into();
    InOutEventList {
        events: msg
            .map(|l| l.events.iter().map(conv_event).collect())
            .unwrap_or_default(),
    }
}

pub fn conv_receipt<'a>(msg: impl Into<Option<&'a Receipt>>) -> InOutReceipt {
    let msg: Option<&Receipt> = msg.into();
    let Some(r) = msg else {
        return InOutReceipt::default();
    };
    InOutReceipt {
        contract_address: encode_address(&r.contract_address),
        status: r.status.clone(),
        ret: r.ret.clone(),
        tx_hash: base58_encode(&r.tx_hash),
        fee_used: big_string(&r.fee_used),
        cumulative_fee_used: opt_big_string(&r.cumulative_fee_used),
        bloom: if r.bloom.is_empty() {
            String::new()
        } else {
            BASE64.encode(&r.bloom)
        },
        events: r.events.iter().map(conv_event).collect(),
        block_hash: base58_encode(&r.block_hash),
        block_no: r.block_no,
        tx_index: r.tx_index,
        from: encode_address(&r.from),
        to: encode_address(&r.to),
        fee_delegation: r.fee_delegation,
        gas_used: r.gas_used,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::to_json_string;

    #[test]
    fn test_receipt_view() {
        let receipt = Receipt {
            contract_address: b"aergo.name".to_vec(),
            status: "SUCCESS".to_string(),
            fee_used: vec![0x03, 0xe8],
            tx_hash: vec![1, 2],
            events: vec![Event {
                event_name: "transfer".to_string(),
                json_args: "[1]".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };
        let view = conv_receipt(&receipt);
        assert_eq!(view.contract_address, "aergo.name");
        assert_eq!(view.fee_used, "1000");
        assert!(view.cumulative_fee_used.is_empty());
        assert_eq!(view.events[0].event_name, "transfer");

        let out = to_json_string(&view).unwrap();
        assert!(out.contains("\"feeUsed\": \"1000\""));
        assert!(out.contains("\"txHash\""));
    }

    #[test]
    fn test_absent_event() {
        assert_eq!(to_json_string(&conv_event(None)).unwrap(), "{}");
        assert!(conv_events(None).events.is_empty());
    }
}
