//! `name` subcommands: registering, moving and looking up account names

use serde_json::Value;

use crate::cli::commands::NameCommand;
use crate::cli::context::NodeContext;
use crate::cli::output::print_json;
use crate::cli::tx::{resolve_signer, submit};
use crate::core::address::{decode_address, encode_address, AERGO_NAME, NAME_LENGTH};
use crate::core::governance::{CallInfo, NAME_CREATE, NAME_UPDATE, SET_OWNER};
use crate::core::monetary::{amount_to_bytes, parse_amount};
use crate::error::{CliError, Result};
use crate::json::conv_commit_result;
use crate::proto::{NameInfo, Tx, TxBody, TxType};

fn check_name_length(name: &str) -> Result<()> {
    if name.len() != NAME_LENGTH {
        return Err(CliError::Input(
            "the name must be 12 alphabetic characters".to_string(),
        ));
    }
    Ok(())
}

fn parse_spending(amount: &str) -> Result<Vec<u8>> {
    let value = parse_amount(amount)
        .map_err(|e| CliError::Input(format!("wrong value in --amount flag: {e}")))?;
    Ok(amount_to_bytes(&value))
}

fn name_tx(account: Vec<u8>, ci: CallInfo, amount: Vec<u8>) -> Tx {
    Tx {
        hash: Vec::new(),
        body: Some(TxBody {
            account,
            recipient: AERGO_NAME.as_bytes().to_vec(),
            amount,
            payload: ci.to_payload(),
            r#type: TxType::Governance as i32,
            ..Default::default()
        }),
    }
}

/// Transaction registering `name` for `from`
pub fn create_name_tx(from: &str, name: &str, amount: &str) -> Result<Tx> {
    let account = decode_address(from)
        .map_err(|e| CliError::Input(format!("wrong address in --from flag: {e}")))?;
    check_name_length(name)?;
    let amount = parse_spending(amount)?;
    let ci = CallInfo::new(NAME_CREATE, vec![Value::from(name)]);
    Ok(name_tx(account, ci, amount))
}

/// Transaction pointing `name` at `to`. For `aergo.name` itself this hands
/// over the name contract and carries no amount.
pub fn update_name_tx(from: &str, to: &str, name: &str, amount: &str) -> Result<Tx> {
    let account = decode_address(from)
        .map_err(|e| CliError::Input(format!("wrong address in --from flag: {e}")))?;
    decode_address(to).map_err(|e| CliError::Input(format!("wrong address in --to flag: {e}")))?;
    let spending = parse_spending(amount)?;
    let (ci, amount) = if name == AERGO_NAME {
        (CallInfo::new(SET_OWNER, vec![Value::from(to)]), Vec::new())
    } else {
        check_name_length(name)?;
        (
            CallInfo::new(NAME_UPDATE, vec![Value::from(name), Value::from(to)]),
            spending,
        )
    };
    Ok(name_tx(account, ci, amount))
}

/// `{ "<name>": { "Owner": ..., "Destination": ... } }`
pub fn owner_text(info: &NameInfo) -> String {
    let name = info.name.as_ref().map(|n| n.name.as_str()).unwrap_or_default();
    format!(
        "{{\n \"{}\": {{\n  \"Owner\": \"{}\",\n  \"Destination\": \"{}\"\n  }}\n}}",
        name,
        encode_address(&info.owner),
        encode_address(&info.destination)
    )
}

async fn send(ctx: &NodeContext, tx: Tx, keystore: Option<&str>, password: Option<&str>) -> Result<()> {
    let account = tx.body.as_ref().map(|b| b.account.clone()).unwrap_or_default();
    let signer = resolve_signer(ctx, &account, keystore, password)?;
    let result = submit(ctx.client()?, tx, &signer).await?;
    print_json(&conv_commit_result(&result))
}

pub async fn run(ctx: &NodeContext, cmd: NameCommand) -> Result<()> {
    match cmd {
        NameCommand::New {
            from,
            name,
            amount,
            keystore,
            password,
        } => {
            let tx = create_name_tx(&from, &name, &amount)?;
            send(ctx, tx, keystore.as_deref(), password.as_deref()).await
        }
        NameCommand::Update {
            from,
            to,
            name,
            amount,
            keystore,
            password,
        } => {
            let tx = update_name_tx(&from, &to, &name, &amount)?;
            send(ctx, tx, keystore.as_deref(), password.as_deref()).await
        }
        NameCommand::Owner { name, blockno } => {
            let info = ctx.client()?.get_name_info(name, blockno).await?;
            println!("{}", owner_text(&info));
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::governance::validate_name_tx;
    use crate::proto::Name;

    const FROM: &str = "AmNpn7K9wg6wsn6oMkTirQSUNdqtDm94iCrrpP5ZpwCAAxxPrsU2";

    #[test]
    fn test_create_name_tx() {
        let tx = create_name_tx(FROM, "honggildong3", "1aergo").unwrap();
        let body = tx.body.unwrap();
        assert_eq!(body.recipient, b"aergo.name".to_vec());
        assert_eq!(
            String::from_utf8(body.payload.clone()).unwrap(),
            r#"{"Name":"v1createName","Args":["honggildong3"]}"#
        );
        assert!(validate_name_tx(&body).is_ok());
    }

    #[test]
    fn test_name_length_is_exact() {
        let err = create_name_tx(FROM, "short", "1aergo").unwrap_err();
        assert_eq!(err.to_string(), "the name must be 12 alphabetic characters");
        assert!(create_name_tx("bad-address", "honggildong3", "1aergo").is_err());
    }

    #[test]
    fn test_update_name_tx() {
        let tx = update_name_tx(FROM, FROM, "honggildong3", "1aergo").unwrap();
        let ci = CallInfo::parse(&tx.body.unwrap().payload).unwrap();
        assert_eq!(ci.name, NAME_UPDATE);
        assert_eq!(ci.args.len(), 2);
    }

    #[test]
    fn test_update_aergo_name_sets_owner() {
        let tx = update_name_tx(FROM, FROM, "aergo.name", "1aergo").unwrap();
        let body = tx.body.unwrap();
        let ci = CallInfo::parse(&body.payload).unwrap();
        assert_eq!(ci.name, SET_OWNER);
        assert_eq!(ci.args, vec![Value::from(FROM)]);
        assert!(body.amount.is_empty());
    }

    #[test]
    fn test_owner_text() {
        let info = NameInfo {
            name: Some(Name {
                name: "honggildong3".to_string(),
                block_no: 0,
            }),
            owner: b"aergo.system".to_vec(),
            destination: b"aergo.system".to_vec(),
        };
        assert_eq!(
            owner_text(&info),
            "{\n \"honggildong3\": {\n  \"Owner\": \"aergo.system\",\n  \"Destination\": \"aergo.system\"\n  }\n}"
        );
    }
}
