//! `account` subcommands
//!
//! Key management runs against the node unless `--keystore` names a local
//! keystore directory. Voting and staking build governance transactions
//! for the system contract and go through the usual signer selection.

use log::{info, warn};

use crate::cli::commands::AccountCommand;
use crate::cli::context::NodeContext;
use crate::cli::output::{bracket_list, password_or_prompt, print_json};
use crate::cli::tx::{resolve_signer, submit};
use crate::cli::vote::{read_candidates, system_tx, vote_call_info};
use crate::core::address::{decode_address, decode_priv_key, encode_address, encode_priv_key};
use crate::core::governance::{CallInfo, STAKE, UNSTAKE};
use crate::core::monetary::{amount_to_bytes, parse_amount};
use crate::error::{CliError, Result};
use crate::json::conv_commit_result;
use crate::proto::{Account, ImportFormat, Personal, SingleBytes};

pub async fn run(ctx: &NodeContext, cmd: AccountCommand) -> Result<()> {
    match cmd {
        AccountCommand::New { password, keystore } => {
            new_account(ctx, password.as_deref(), keystore.as_deref()).await
        }
        AccountCommand::List { keystore } => list(ctx, keystore.as_deref()).await,
        AccountCommand::Unlock { address, password } => {
            let personal = personal(&address, password.as_deref())?;
            let account = ctx.client()?.unlock_account(personal).await?;
            println!("{}", encode_address(&account.address));
            Ok(())
        }
        AccountCommand::Lock { address, password } => {
            let personal = personal(&address, password.as_deref())?;
            let account = ctx.client()?.lock_account(personal).await?;
            println!("{}", encode_address(&account.address));
            Ok(())
        }
        AccountCommand::Import {
            import_format,
            password,
            newpassword,
            keystore,
        } => {
            import(
                ctx,
                &import_format,
                password.as_deref(),
                newpassword.as_deref(),
                keystore.as_deref(),
            )
            .await
        }
        AccountCommand::Export {
            address,
            password,
            keystore,
        } => export(ctx, &address, password.as_deref(), keystore.as_deref()).await,
        AccountCommand::Vote {
            address,
            to,
            id,
            keystore,
            password,
        } => {
            let candidates = read_candidates(&to)?;
            let ci = vote_call_info(&id, &candidates)?;
            governance(ctx, &address, ci, None, keystore.as_deref(), password.as_deref()).await
        }
        AccountCommand::Stake {
            address,
            amount,
            keystore,
            password,
        } => {
            let ci = CallInfo::new(STAKE, Vec::new());
            let amount = Some(amount.as_str());
            governance(ctx, &address, ci, amount, keystore.as_deref(), password.as_deref()).await
        }
        AccountCommand::Unstake {
            address,
            amount,
            keystore,
            password,
        } => {
            let ci = CallInfo::new(UNSTAKE, Vec::new());
            let amount = Some(amount.as_str());
            governance(ctx, &address, ci, amount, keystore.as_deref(), password.as_deref()).await
        }
    }
}

/// Account and passphrase for the node's lock, unlock and export calls
fn personal(address: &str, password: Option<&str>) -> Result<Personal> {
    let address = decode_address(address)?;
    let passphrase = password_or_prompt(password, false)?;
    Ok(Personal {
        passphrase,
        account: Some(Account { address }),
    })
}

async fn new_account(ctx: &NodeContext, password: Option<&str>, keystore: Option<&str>) -> Result<()> {
    let password = password_or_prompt(password, true)?;
    let address = match keystore {
        Some(_) => {
            let store = ctx.keystore(keystore)?;
            let address = store.create(&password)?;
            info!("Stored new key in {}", store.dir().display());
            address
        }
        None => ctx.client()?.create_account(password).await?.address,
    };
    println!("{}", encode_address(&address));
    Ok(())
}

async fn list(ctx: &NodeContext, keystore: Option<&str>) -> Result<()> {
    let addresses = match keystore {
        Some(_) => ctx.keystore(keystore)?.list()?,
        None => ctx
            .client()?
            .get_accounts()
            .await?
            .accounts
            .into_iter()
            .map(|a| a.address)
            .collect(),
    };
    println!("{}", bracket_list(addresses.iter().map(|a| encode_address(a))));
    Ok(())
}

async fn import(
    ctx: &NodeContext,
    encoded: &str,
    password: Option<&str>,
    newpassword: Option<&str>,
    keystore: Option<&str>,
) -> Result<()> {
    let raw = decode_priv_key(encoded)
        .map_err(|e| CliError::Input(format!("failed to decode input: {e}")))?;
    let oldpass = password_or_prompt(password, false)?;
    let newpass = newpassword.unwrap_or(&oldpass).to_string();
    let address = match keystore {
        Some(_) => ctx.keystore(keystore)?.import(encoded, &oldpass, &newpass)?,
        None => {
            ctx.client()?
                .import_account(ImportFormat {
                    wif: Some(SingleBytes { value: raw }),
                    oldpass,
                    newpass,
                    keystore: None,
                })
                .await?
                .address
        }
    };
    println!("{}", encode_address(&address));
    Ok(())
}

async fn export(
    ctx: &NodeContext,
    address: &str,
    password: Option<&str>,
    keystore: Option<&str>,
) -> Result<()> {
    let personal = personal(address, password)?;
    warn_empty_export_password(&personal.passphrase);
    let exported = match keystore {
        Some(_) => {
            let account = personal.account.unwrap_or_default().address;
            ctx.keystore(keystore)?.export(&account, &personal.passphrase)?
        }
        None => encode_priv_key(&ctx.client()?.export_account(personal).await?.value),
    };
    println!("{exported}");
    Ok(())
}

/// An exported key sealed with an empty password is readable by anyone
/// holding the string. Returns whether the warning was logged.
fn warn_empty_export_password(passphrase: &str) -> bool {
    if passphrase.is_empty() {
        warn!("exporting a private key encrypted with an empty password; use --password");
        return true;
    }
    false
}

/// Amount for staking calls; votes carry none
fn governance_amount(amount: Option<&str>) -> Result<Vec<u8>> {
    match amount {
        Some(amount) => {
            let value = parse_amount(amount)
                .map_err(|e| CliError::Input(format!("wrong value in --amount flag: {e}")))?;
            Ok(amount_to_bytes(&value))
        }
        None => Ok(Vec::new()),
    }
}

async fn governance(
    ctx: &NodeContext,
    address: &str,
    ci: CallInfo,
    amount: Option<&str>,
    keystore: Option<&str>,
    password: Option<&str>,
) -> Result<()> {
    let account = decode_address(address)?;
    let tx = system_tx(account.clone(), ci.to_payload(), governance_amount(amount)?);
    let signer = resolve_signer(ctx, &account, keystore, password)?;
    let result = submit(ctx.client()?, tx, &signer).await?;
    print_json(&conv_commit_result(&result))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::monetary::amount_from_bytes;

    #[test]
    fn test_governance_amount() {
        assert!(governance_amount(None).unwrap().is_empty());
        let bytes = governance_amount(Some("10000aergo")).unwrap();
        assert_eq!(
            amount_from_bytes(&bytes).to_string(),
            "10000000000000000000000"
        );
        let err = governance_amount(Some("ten")).unwrap_err();
        assert!(err.to_string().starts_with("wrong value in --amount flag"));
    }

    #[test]
    fn test_empty_export_password_warns() {
        assert!(warn_empty_export_password(""));
        assert!(!warn_empty_export_password("pw"));
        let personal = personal(&encode_address(&[3u8; 33]), Some("")).unwrap();
        assert!(warn_empty_export_password(&personal.passphrase));
    }

    #[test]
    fn test_personal_rejects_bad_address() {
        assert!(personal("bad address", Some("pw")).is_err());
    }
}
