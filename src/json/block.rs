use serde::Serialize;

use crate::core::address::encode_address;
use crate::proto::{Block, BlockBody, BlockHeader, BlockMetadata, NewBlockNotice};
use crate::utils::base58_encode;

use super::{conv_tx, is_zero_i32, is_zero_i64, is_zero_u64, InOutTx, PayloadEncoding};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutBlockHeader {
    #[serde(rename = "chainID", skip_serializing_if = "String::is_empty")]
    pub chain_id: String,
    #[serde(rename = "prevBlockHash", skip_serializing_if = "String::is_empty")]
    pub prev_block_hash: String,
    #[serde(rename = "blockNo", skip_serializing_if = "is_zero_u64")]
    pub block_no: u64,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub timestamp: i64,
    #[serde(rename = "blocksRootHash", skip_serializing_if = "String::is_empty")]
    pub blocks_root_hash: String,
    #[serde(rename = "txsRootHash", skip_serializing_if = "String::is_empty")]
    pub txs_root_hash: String,
    #[serde(rename = "receiptsRootHash", skip_serializing_if = "String::is_empty")]
    pub receipts_root_hash: String,
    #[serde(skip_serializing_if = "is_zero_u64")]
    pub confirms: u64,
    #[serde(rename = "pubKey", skip_serializing_if = "String::is_empty")]
    pub pub_key: String,
    #[serde(rename = "coinbaseAccount", skip_serializing_if = "String::is_empty")]
    pub coinbase_account: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub sign: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutBlockBody {
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub txs: Vec<InOutTx>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutBlock {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hash: String,
    pub header: InOutBlockHeader,
    pub body: InOutBlockBody,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutBlockMetadata {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub hash: String,
    pub header: InOutBlockHeader,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub txcount: i32,
    #[serde(skip_serializing_if = "is_zero_i64")]
    pub size: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutBlockIdx {
    #[serde(rename = "blockHash", skip_serializing_if = "String::is_empty")]
    pub block_hash: String,
    #[serde(rename = "blockNo", skip_serializing_if = "is_zero_u64")]
    pub block_no: u64,
}

pub fn conv_block_header<'a>(msg: impl Into<Option<&'a BlockHeader>>) -> InOutBlockHeader {
    let msg: Option<&BlockHeader> = msg.into();
    let Some(h) = msg else {
        return InOutBlockHeader::default();
    };
    InOutBlockHeader {
        chain_id: base58_encode(&h.chain_id),
        prev_block_hash: base58_encode(&h.prev_block_hash),
        block_no: h.block_no,
        timestamp: h.timestamp,
        blocks_root_hash: base58_encode(&h.blocks_root_hash),
        txs_root_hash: base58_encode(&h.txs_root_hash),
        receipts_root_hash: base58_encode(&h.receipts_root_hash),
        confirms: h.confirms,
        pub_key: base58_encode(&h.pub_key),
        coinbase_account: encode_address(&h.coinbase_account),
        sign: base58_encode(&h.sign),
    }
}

pub fn conv_block_body<'a>(
    msg: impl Into<Option<&'a BlockBody>>,
    encoding: PayloadEncoding,
) -> InOutBlockBody {
    let msg: Option<&BlockBody> = msg.into();
    InOutBlockBody {
        txs: msg
            .map(|b| b.txs.iter().map(|tx| conv_tx(tx, encoding)).collect())
            .unwrap_or_default(),
    }
}

pub fn conv_block<'a>(msg: impl Into<Option<&'a Block>>, encoding: PayloadEncoding) -> InOutBlock {
    let msg: Option<&Block> = msg.into();
    let Some(b) = msg else {
        return InOutBlock::default();
    };
    InOutBlock {
        hash: base58_encode(&b.hash),
        header: conv_block_header(b.header.as_ref()),
        body: conv_block_body(b.body.as_ref(), encoding),
    }
}

pub fn conv_block_metadata<'a>(msg: impl Into<Option<&'a BlockMetadata>>) -> InOutBlockMetadata {
    let msg: Option<&BlockMetadata> = msg.into();
    let Some(m) = msg else {
        return InOutBlockMetadata::default();
    };
    InOutBlockMetadata {
        hash: base58_encode(&m.hash),
        header: conv_block_header(m.header.as_ref()),
        txcount: m.txcount,
        size: m.size,
    }
}

pub fn conv_block_idx<'a>(msg: impl Into<Option<&'a NewBlockNotice>>) -> InOutBlockIdx {
    let msg: Option<&NewBlockNotice> = msg.into();
    match msg {
        Some(n) => InOutBlockIdx {
            block_hash: base58_encode(&n.block_hash),
            block_no: n.block_no,
        },
        None => InOutBlockIdx::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::to_json_string;
    use crate::proto::{Tx, TxBody};

    #[test]
    fn test_absent_block_is_empty() {
        let out = to_json_string(&conv_block(None, PayloadEncoding::Base58)).unwrap();
        assert_eq!(out, "{\n \"header\": {},\n \"body\": {}\n}");
    }

    #[test]
    fn test_block_fields_are_encoded() {
        let block = Block {
            hash: vec![1, 2, 3],
            header: Some(BlockHeader {
                block_no: 7,
                prev_block_hash: vec![9; 32],
                ..Default::default()
            }),
            body: Some(BlockBody {
                txs: vec![Tx {
                    hash: vec![4],
                    body: Some(TxBody {
                        nonce: 1,
                        ..Default::default()
                    }),
                }],
            }),
        };
        let view = conv_block(&block, PayloadEncoding::Base58);
        assert_eq!(view.hash, base58_encode(&[1, 2, 3]));
        assert_eq!(view.header.block_no, 7);
        assert_eq!(view.header.prev_block_hash, base58_encode(&[9; 32]));
        assert!(view.header.sign.is_empty());
        assert_eq!(view.body.txs.len(), 1);
        assert_eq!(view.body.txs[0].hash, base58_encode(&[4]));
    }
}
