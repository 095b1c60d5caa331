use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::core::address::{decode_address, encode_address};
use crate::core::governance::CallInfo;
use crate::core::monetary::{amount_to_bytes, parse_amount};
use crate::error::{CliError, Result};
use crate::proto::{Tx, TxBody, TxIdx, TxInBlock, TxType};
use crate::utils::{base58_decode, base58_encode};

use super::{is_zero_i32, is_zero_u64, opt_big_string, PayloadEncoding};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InOutTx {
    #[serde(
        default,
        alias = "Hash",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub hash: String,
    #[serde(default, alias = "Body", skip_serializing_if = "Option::is_none")]
    pub body: Option<InOutTxBody>,
}

/// Transaction body as written and read by operators.
///
/// On input `amount` and `gasPrice` accept unit strings (`"1.5 aergo"`),
/// `type` accepts the enum name or number and `payloadJson`, when it names a
/// function, replaces `payload`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InOutTxBody {
    #[serde(
        default,
        alias = "Nonce",
        skip_serializing_if = "is_zero_u64",
        deserialize_with = "de_u64"
    )]
    pub nonce: u64,
    #[serde(
        default,
        alias = "Account",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub account: String,
    #[serde(
        default,
        alias = "Recipient",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub recipient: String,
    #[serde(
        default,
        alias = "Amount",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub amount: String,
    #[serde(
        default,
        alias = "Payload",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub payload: String,
    #[serde(
        rename = "payloadJson",
        alias = "PayloadJson",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub payload_json: Option<CallInfo>,
    #[serde(
        rename = "gasLimit",
        alias = "GasLimit",
        alias = "limit",
        alias = "Limit",
        default,
        skip_serializing_if = "is_zero_u64",
        deserialize_with = "de_u64"
    )]
    pub gas_limit: u64,
    #[serde(
        rename = "gasPrice",
        alias = "GasPrice",
        alias = "price",
        alias = "Price",
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub gas_price: String,
    #[serde(
        rename = "type",
        alias = "Type",
        default,
        skip_serializing_if = "is_zero_i32",
        deserialize_with = "de_tx_type"
    )]
    pub tx_type: i32,
    #[serde(
        rename = "chainIdHash",
        alias = "ChainIdHash",
        default,
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub chain_id_hash: String,
    #[serde(
        default,
        alias = "Sign",
        skip_serializing_if = "String::is_empty",
        deserialize_with = "de_string"
    )]
    pub sign: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutTxIdx {
    #[serde(rename = "blockHash", skip_serializing_if = "String::is_empty")]
    pub block_hash: String,
    #[serde(skip_serializing_if = "is_zero_i32")]
    pub idx: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InOutTxInBlock {
    #[serde(rename = "txIdx")]
    pub tx_idx: InOutTxIdx,
    pub tx: InOutTx,
}

fn de_string<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<String, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(String::new()),
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(D::Error::custom(format!("expected a string, got {other}"))),
    }
}

fn de_u64<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<u64, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_u64()
            .ok_or_else(|| D::Error::custom(format!("invalid unsigned integer {n}"))),
        Value::String(s) => s.parse().map_err(D::Error::custom),
        other => Err(D::Error::custom(format!("expected an integer, got {other}"))),
    }
}

fn de_tx_type<'de, D: Deserializer<'de>>(d: D) -> std::result::Result<i32, D::Error> {
    match Value::deserialize(d)? {
        Value::Null => Ok(0),
        Value::Number(n) => n
            .as_i64()
            .and_then(|v| i32::try_from(v).ok())
            .ok_or_else(|| D::Error::custom(format!("invalid tx type {n}"))),
        Value::String(s) => match TxType::from_str_name(&s) {
            Some(t) => Ok(t as i32),
            None => s
                .parse()
                .map_err(|_| D::Error::custom(format!("unknown tx type {s}"))),
        },
        other => Err(D::Error::custom(format!("invalid tx type {other}"))),
    }
}

pub fn conv_tx<'a>(msg: impl Into<Option<&'a Tx>>, encoding: PayloadEncoding) -> InOutTx {
    let mut out = InOutTx {
        hash: String::new(),
        body: Some(InOutTxBody::default()),
    };
    let msg: Option<&Tx> = msg.into();
    let Some(msg) = msg else {
        return out;
    };
    out.hash = base58_encode(&msg.hash);
    if let Some(body) = &msg.body {
        out.body = Some(conv_tx_body(body, encoding));
    }
    out
}

pub fn conv_tx_body(msg: &TxBody, encoding: PayloadEncoding) -> InOutTxBody {
    let payload = match encoding {
        PayloadEncoding::Raw => String::from_utf8_lossy(&msg.payload).into_owned(),
        PayloadEncoding::Base58 => base58_encode(&msg.payload),
    };
    InOutTxBody {
        nonce: msg.nonce,
        account: encode_address(&msg.account),
        recipient: encode_address(&msg.recipient),
        amount: opt_big_string(&msg.amount),
        payload,
        payload_json: None,
        gas_limit: msg.gas_limit,
        gas_price: opt_big_string(&msg.gas_price),
        tx_type: msg.r#type,
        chain_id_hash: base58_encode(&msg.chain_id_hash),
        sign: base58_encode(&msg.sign),
    }
}

pub fn conv_tx_idx<'a>(msg: impl Into<Option<&'a TxIdx>>) -> InOutTxIdx {
    let msg: Option<&TxIdx> = msg.into();
    match msg {
        Some(idx) => InOutTxIdx {
            block_hash: base58_encode(&idx.block_hash),
            idx: idx.idx,
        },
        None => InOutTxIdx::default(),
    }
}

pub fn conv_tx_in_block<'a>(
    msg: impl Into<Option<&'a TxInBlock>>,
    encoding: PayloadEncoding,
) -> InOutTxInBlock {
    let msg: Option<&TxInBlock> = msg.into();
    let Some(msg) = msg else {
        return InOutTxInBlock {
            tx_idx: InOutTxIdx::default(),
            tx: conv_tx(None, encoding),
        };
    };
    InOutTxInBlock {
        tx_idx: conv_tx_idx(msg.tx_idx.as_ref()),
        tx: conv_tx(msg.tx.as_ref(), encoding),
    }
}

/// Build a protobuf body from its JSON view, decoding every encoded field
pub fn parse_tx_body(input: &InOutTxBody) -> Result<TxBody> {
    let mut body = TxBody {
        nonce: input.nonce,
        gas_limit: input.gas_limit,
        r#type: input.tx_type,
        ..Default::default()
    };
    if !input.account.is_empty() {
        body.account = decode_address(&input.account)?;
    }
    if !input.recipient.is_empty() {
        body.recipient = decode_address(&input.recipient)?;
    }
    if !input.amount.is_empty() {
        body.amount = amount_to_bytes(&parse_amount(&input.amount)?);
    }
    if !input.payload.is_empty() {
        body.payload = base58_decode(&input.payload)?;
    }
    if let Some(call) = input.payload_json.as_ref().filter(|c| !c.name.is_empty()) {
        body.payload = call.to_payload();
    }
    if !input.gas_price.is_empty() {
        body.gas_price = amount_to_bytes(&parse_amount(&input.gas_price)?);
    }
    if !input.chain_id_hash.is_empty() {
        body.chain_id_hash = base58_decode(&input.chain_id_hash)?;
    }
    if !input.sign.is_empty() {
        body.sign = base58_decode(&input.sign)?;
    }
    Ok(body)
}

/// Parse one transaction or an array of them
pub fn parse_base58_tx(json: &[u8]) -> Result<Vec<Tx>> {
    let inputs: Vec<InOutTx> = match serde_json::from_slice(json) {
        Ok(list) => list,
        Err(_) => vec![serde_json::from_slice::<InOutTx>(json)?],
    };
    inputs
        .iter()
        .map(|input| {
            let hash = if input.hash.is_empty() {
                Vec::new()
            } else {
                base58_decode(&input.hash)?
            };
            let body = input
                .body
                .as_ref()
                .ok_or_else(|| CliError::Input("tx body is empty".to_string()))?;
            Ok(Tx {
                hash,
                body: Some(parse_tx_body(body)?),
            })
        })
        .collect()
}

pub fn parse_base58_tx_body(json: &[u8]) -> Result<TxBody> {
    let input: InOutTxBody = serde_json::from_slice(json)?;
    parse_tx_body(&input)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::json::to_json_string;

    const ACCOUNT: &str = "AsiFCzSukVNUGufJSzSNLA1nKx39NxKcVBEWvW3riyfixcBjN1Qd";
    const RECIPIENT: &str = "AsjHhFbCuULoUVZPiNNV6WEemtEi7Eiy6G4TDaUsMDiedCARbhQR";
    const HASH: &str = "525mQMtsWaDLVJbzQZgTFkSG33gtZsho7m4io1HUCeJi";
    const SIGN: &str = "3tMHYrizQ532D1WJkt5RSs5AcRmq7betw8zvC66Wh3XHUdvNpNzLWh1SkkGYMGJ669nCVuYHrhwfg1HrUUp6KDwzK";

    #[test]
    fn test_parse_tx_list_both_key_styles() {
        let capital = format!(
            r#"[{{"Hash":"{HASH}","Body":{{"Nonce":9,"Account":"{ACCOUNT}","Recipient":"{RECIPIENT}","Amount":"100000000","Payload":null,"Limit":100,"Price":"1","Type":0,"Sign":"{SIGN}"}}}}]"#
        );
        let lower = format!(
            r#"[{{"hash":"{HASH}","body":{{"nonce":9,"account":"{ACCOUNT}","recipient":"{RECIPIENT}","amount":"100000000","payload":null,"limit":100,"price":"1","type":0,"sign":"{SIGN}"}}}}]"#
        );
        for input in [capital, lower] {
            let txs = parse_base58_tx(input.as_bytes()).unwrap();
            assert_eq!(txs.len(), 1);
            assert_eq!(base58_encode(&txs[0].hash), HASH);
            let body = txs[0].body.as_ref().unwrap();
            assert_eq!(base58_encode(&body.sign), SIGN);
            assert_eq!(body.account, decode_address(ACCOUNT).unwrap());
            assert_eq!(body.recipient, decode_address(RECIPIENT).unwrap());
            assert_eq!(body.nonce, 9);
            assert_eq!(body.gas_limit, 100);
            assert_eq!(body.gas_price, vec![1]);
        }
    }

    #[test]
    fn test_parse_single_object() {
        let input = format!(r#"{{"body":{{"nonce":1,"account":"{ACCOUNT}","amount":"1 aergo"}}}}"#);
        let txs = parse_base58_tx(input.as_bytes()).unwrap();
        assert_eq!(txs.len(), 1);
        assert!(txs[0].hash.is_empty());
        let body = txs[0].body.as_ref().unwrap();
        assert_eq!(body.amount_value().to_string(), "1000000000000000000");
    }

    #[test]
    fn test_parse_body_fields() {
        let input = format!(
            r#"{{"Nonce":1,"Account":"{ACCOUNT}","Recipient":"{RECIPIENT}","Amount":"25000","Payload":"aergo","Limit":100,"Price":"1","Type":"governance"}}"#
        );
        let body = parse_base58_tx_body(input.as_bytes()).unwrap();
        assert_eq!(base58_encode(&body.payload), "aergo");
        assert_eq!(body.r#type, TxType::Governance as i32);
        assert_eq!(body.amount_value().to_string(), "25000");
    }

    #[test]
    fn test_payload_json_replaces_payload() {
        let input = r#"{"payload":"aergo","payloadJson":{"Name":"v1stake"}}"#;
        let body = parse_base58_tx_body(input.as_bytes()).unwrap();
        assert_eq!(body.payload, br#"{"Name":"v1stake"}"#.to_vec());
    }

    #[test]
    fn test_parse_rejects_bad_fields() {
        assert!(parse_base58_tx_body(br#"{"account":"not-an-address!"}"#).is_err());
        assert!(parse_base58_tx_body(br#"{"amount":"1 aerg"}"#).is_err());
        assert!(parse_base58_tx_body(br#"{"type":"UNKNOWN"}"#).is_err());
        assert!(parse_base58_tx(br#"{"hash":"abc"}"#).is_err());
        assert!(parse_base58_tx(b"not json").is_err());
    }

    #[test]
    fn test_conv_tx_payload_encodings() {
        let tx = Tx {
            hash: Vec::new(),
            body: Some(TxBody {
                payload: br#"{"Name":"v1createName","Args":["honggildong3"]}"#.to_vec(),
                ..Default::default()
            }),
        };
        assert_eq!(
            to_json_string(&conv_tx(&tx, PayloadEncoding::Base58)).unwrap(),
            "{\n \"body\": {\n  \"payload\": \"22MZAFWvxtVWehpgwEVxrvoqGL5xmcPmyLBiwraDfxRwKUNrV9tmhuB7Uu6ZeJWvp\"\n }\n}"
        );
        assert_eq!(
            to_json_string(&conv_tx(&tx, PayloadEncoding::Raw)).unwrap(),
            "{\n \"body\": {\n  \"payload\": \"{\\\"Name\\\":\\\"v1createName\\\",\\\"Args\\\":[\\\"honggildong3\\\"]}\"\n }\n}"
        );
    }

    #[test]
    fn test_conv_absent_tx() {
        assert_eq!(
            to_json_string(&conv_tx(None, PayloadEncoding::Base58)).unwrap(),
            "{\n \"body\": {}\n}"
        );
        let in_block = conv_tx_in_block(None, PayloadEncoding::Base58);
        assert_eq!(in_block.tx_idx, InOutTxIdx::default());
    }

    #[test]
    fn test_conv_then_parse_keeps_body() {
        let body = parse_base58_tx_body(
            format!(
                r#"{{"nonce":3,"account":"{ACCOUNT}","recipient":"{RECIPIENT}","amount":"7","payload":"aergo","gasLimit":5,"gasPrice":"2","type":4,"sign":"{SIGN}"}}"#
            )
            .as_bytes(),
        )
        .unwrap();
        let view = conv_tx_body(&body, PayloadEncoding::Base58);
        assert_eq!(view.account, ACCOUNT);
        assert_eq!(view.amount, "7");
        assert_eq!(view.tx_type, TxType::Transfer as i32);
        assert_eq!(parse_tx_body(&view).unwrap(), body);
    }
}
