//! `mempool` diagnostics, served by the node's admin socket

use log::debug;

use crate::cli::commands::MempoolCommand;
use crate::core::address::decode_address;
use crate::error::Result;
use crate::network::AdminClient;

/// Decode the account arguments of `mempool tx`
pub fn parse_accounts(accounts: &[String]) -> Result<Vec<Vec<u8>>> {
    accounts.iter().map(|a| decode_address(a)).collect()
}

pub async fn run(cmd: MempoolCommand) -> Result<()> {
    let reply = match cmd {
        MempoolCommand::Stat { sock } => AdminClient::connect(&sock).await?.mempool_tx_stat().await?,
        MempoolCommand::Tx { sock, accounts } => {
            let accounts = parse_accounts(&accounts)?;
            debug!("Listing pending transactions of {} accounts", accounts.len());
            AdminClient::connect(&sock)
                .await?
                .mempool_tx(accounts)
                .await?
        }
    };
    println!("{}", String::from_utf8_lossy(&reply.value));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accounts() {
        let accounts = vec![
            "AmNpn7K9wg6wsn6oMkTirQSUNdqtDm94iCrrpP5ZpwCAAxxPrsU2".to_string(),
            "aergo.system".to_string(),
        ];
        let decoded = parse_accounts(&accounts).unwrap();
        assert_eq!(decoded[0].len(), 33);
        assert_eq!(decoded[1], b"aergo.system".to_vec());
        assert!(parse_accounts(&["###".to_string()]).is_err());
    }
}
