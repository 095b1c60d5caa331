use clap::{ArgAction, Args, Parser, Subcommand};

use crate::config::ConfigOverrides;
use crate::core::governance::VOTE_BP_ID;

/// How `getpeers` orders its output
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PeerSort {
    No,
    Addr,
    Id,
    Height,
    Alias,
}

impl std::str::FromStr for PeerSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no" => Ok(PeerSort::No),
            "addr" => Ok(PeerSort::Addr),
            "id" => Ok(PeerSort::Id),
            "height" => Ok(PeerSort::Height),
            "alias" => Ok(PeerSort::Alias),
            _ => Err(format!("Invalid sort type {s}")),
        }
    }
}

impl std::fmt::Display for PeerSort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PeerSort::No => "no",
            PeerSort::Addr => "addr",
            PeerSort::Id => "id",
            PeerSort::Height => "height",
            PeerSort::Alias => "alias",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Parser)]
#[command(name = "aergocli", version, about = "Aergo command line interface")]
pub struct Opt {
    #[command(flatten)]
    pub global: GlobalArgs,
    #[command(subcommand)]
    pub command: Command,
}

/// Flags accepted in front of every command
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalArgs {
    #[arg(long, global = true, help = "aergo cli home path")]
    pub home: Option<String>,
    #[arg(long, global = true, help = "config file (default is cliconfig.toml)")]
    pub config: Option<String>,
    #[arg(
        long = "key",
        help = "key file (from keygen) used to sign transactions locally"
    )]
    pub keyfile: Option<String>,
    #[arg(short = 'H', long, global = true, help = "Host address to aergo server")]
    pub host: Option<String>,
    #[arg(short = 'p', long, global = true, help = "Port number to aergo server")]
    pub port: Option<u16>,
}

impl GlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            home: self.home.clone(),
            config: self.config.clone(),
            host: self.host.clone(),
            port: self.port,
            keyfile: self.keyfile.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Account command
    #[command(subcommand)]
    Account(AccountCommand),
    #[command(name = "blockchain", about = "Print current blockchain status")]
    Blockchain {
        #[arg(long, help = "Print hashes in hex instead of base58")]
        hex: bool,
    },
    #[command(name = "chaininfo", about = "Print current blockchain information")]
    Chaininfo,
    #[command(name = "chainstat", about = "Print blockchain statistics")]
    Chainstat,
    #[command(name = "consensusinfo", about = "Print consensus information")]
    Consensusinfo,
    #[command(name = "getblock", about = "Get block information")]
    Getblock {
        #[arg(long, conflicts_with = "number", required_unless_present = "number", help = "Block hash")]
        hash: Option<String>,
        #[arg(short = 'n', long, help = "Block height")]
        number: Option<u64>,
    },
    #[command(name = "listblocks", about = "List block headers")]
    Listblocks {
        #[arg(long, help = "Block hash to start from")]
        hash: Option<String>,
        #[arg(long, default_value_t = 0, help = "Block height to start from")]
        height: u64,
        #[arg(long, default_value_t = 20, help = "Maximum number of headers")]
        size: u32,
        #[arg(long, default_value_t = 0, help = "Number of headers to skip")]
        offset: u32,
        #[arg(long, help = "Ascending order")]
        asc: bool,
    },
    #[command(name = "gettx", about = "Get transaction information")]
    Gettx {
        #[arg(help = "Transaction hash (base58)")]
        hash: String,
    },
    #[command(name = "getreceipt", about = "Get receipt of a transaction")]
    Getreceipt {
        #[arg(help = "Transaction hash (base58)")]
        hash: String,
    },
    #[command(name = "getstate", about = "Get account state")]
    Getstate {
        #[arg(long, help = "Account address or name")]
        address: String,
        #[arg(long, help = "Also fetch the merkle proof of the state")]
        proof: bool,
        #[arg(long, help = "State root (base58) to query the proof against")]
        root: Option<String>,
        #[arg(long, help = "Request a compressed proof")]
        compressed: bool,
    },
    #[command(name = "getstaking", about = "Get staking information of an account")]
    Getstaking {
        #[arg(long, help = "Account address")]
        address: String,
    },
    #[command(name = "getaccountvote", about = "Get votes cast by an account")]
    Getaccountvote {
        #[arg(long, help = "Account address")]
        address: String,
    },
    #[command(name = "sendtx", about = "Send a value transfer transaction")]
    Sendtx {
        #[arg(long, help = "Sender account address")]
        from: String,
        #[arg(long, help = "Recipient account address or name")]
        to: String,
        #[arg(long, help = "Amount with optional unit (aergo, gaer, aer)")]
        amount: String,
        #[arg(long, alias = "path", help = "Sign locally with a key from this keystore")]
        keystore: Option<String>,
        #[arg(long, help = "Password of the keystore account")]
        password: Option<String>,
    },
    #[command(name = "committx", about = "Commit transactions given as json")]
    Committx {
        #[arg(long, conflicts_with = "jsontxpath", required_unless_present = "jsontxpath", help = "Transaction list json")]
        jsontx: Option<String>,
        #[arg(long, help = "File holding the transaction list json")]
        jsontxpath: Option<String>,
    },
    #[command(name = "signtx", about = "Sign transaction")]
    Signtx {
        #[arg(long, help = "Transaction json to sign")]
        jsontx: String,
        #[arg(long, alias = "path", help = "Keystore directory for local signing")]
        keystore: Option<String>,
        #[arg(long, help = "Address of account to use for signing")]
        address: Option<String>,
        #[arg(
            long,
            default_value_t = true,
            action = ArgAction::Set,
            help = "Sign with the account in the remote node"
        )]
        remote: bool,
        #[arg(long, help = "Local account password")]
        password: Option<String>,
        #[arg(long, help = "Base58 encoded raw key to sign with")]
        key: Option<String>,
    },
    #[command(name = "verifytx", about = "Verify transaction")]
    Verifytx {
        #[arg(long, help = "Transaction json to verify")]
        jsontx: String,
        #[arg(
            long,
            default_value_t = true,
            action = ArgAction::Set,
            help = "Verify in the remote node"
        )]
        remote: bool,
    },
    /// Contract command
    #[command(subcommand)]
    Contract(ContractCommand),
    /// Raft cluster membership command
    #[command(subcommand)]
    Cluster(ClusterCommand),
    /// Enterprise command
    #[command(subcommand)]
    Enterprise(EnterpriseCommand),
    /// Event command
    #[command(subcommand)]
    Event(EventCommand),
    /// Mempool diagnostics over the admin socket
    #[command(subcommand)]
    Mempool(MempoolCommand),
    /// Name command
    #[command(subcommand)]
    Name(NameCommand),
    #[command(name = "vote", about = "Vote to block producers")]
    Vote {
        #[arg(long, help = "Base58 address of voter")]
        from: String,
        #[arg(long, help = "Json array of candidate peer ids, or a file holding it")]
        to: String,
    },
    #[command(name = "votestat", about = "Show voting stat")]
    Votestat {
        #[arg(long, default_value_t = 1, help = "The number of elected")]
        count: u32,
        #[arg(long, default_value = VOTE_BP_ID, help = "Vote id")]
        id: String,
    },
    #[command(name = "getpeers", about = "Get peer list")]
    Getpeers {
        #[arg(long, help = "Exclude hidden peers")]
        nohidden: bool,
        #[arg(long = "self", help = "Show self peer info")]
        show_self: bool,
        #[arg(long, default_value = "no", help = "Sort peers by no, addr, id, height or alias")]
        sort: String,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true, help = "Detail level")]
        detail: i32,
    },
    #[command(name = "metric", about = "Show p2p metrics of the node")]
    Metric,
    #[command(name = "nodestate", about = "Get node state")]
    Nodestate {
        #[arg(long, default_value = "", help = "Component name (all when empty)")]
        name: String,
        #[arg(long, default_value_t = 3, help = "Timeout in seconds")]
        timeout: u64,
    },
    #[command(name = "serverinfo", about = "Show configuration and status of the server")]
    Serverinfo {
        #[arg(help = "Config keys to show (all when none)")]
        keys: Vec<String>,
    },
    #[command(name = "keygen", about = "Generate private key")]
    Keygen {
        #[arg(help = "Prefix of the key files, or the key file with --fromKey")]
        prefix: Option<String>,
        #[arg(long = "fromKey", help = "Generate files from existing private key file")]
        from_key: bool,
        #[arg(long, help = "Output combined json object instead of generating files")]
        json: bool,
        #[arg(long, default_value = "", help = "Password for encrypted private key in json")]
        password: String,
        #[arg(long, help = "Generate prefix.addr for wallet address")]
        addr: bool,
    },
    #[command(name = "version", about = "Print the version number of aergocli")]
    Version,
}

#[derive(Subcommand, Debug)]
pub enum AccountCommand {
    #[command(name = "new", about = "Create new account in the node or cli")]
    New {
        #[arg(long, help = "Password")]
        password: Option<String>,
        #[arg(long, alias = "path", help = "Create the key in this local keystore")]
        keystore: Option<String>,
    },
    #[command(name = "list", about = "Get account list in the node or cli")]
    List {
        #[arg(long, alias = "path", help = "List a local keystore")]
        keystore: Option<String>,
    },
    #[command(name = "unlock", about = "Unlock account in the node")]
    Unlock {
        #[arg(long, help = "Address of account")]
        address: String,
        #[arg(long, help = "Password")]
        password: Option<String>,
    },
    #[command(name = "lock", about = "Lock account in the node")]
    Lock {
        #[arg(long, help = "Address of account")]
        address: String,
        #[arg(long, help = "Password")]
        password: Option<String>,
    },
    #[command(name = "import", about = "Import account")]
    Import {
        #[arg(long = "if", help = "Base58 import format string")]
        import_format: String,
        #[arg(long, help = "Password when exporting")]
        password: Option<String>,
        #[arg(long, help = "Password to be reset")]
        newpassword: Option<String>,
        #[arg(long, alias = "path", help = "Import into this local keystore")]
        keystore: Option<String>,
    },
    #[command(name = "export", about = "Export account")]
    Export {
        #[arg(long, help = "Address of account")]
        address: String,
        #[arg(long, help = "Password")]
        password: Option<String>,
        #[arg(long, alias = "path", help = "Export from this local keystore")]
        keystore: Option<String>,
    },
    #[command(name = "vote", about = "Vote with staked aergo")]
    Vote {
        #[arg(long, help = "Account address of voter")]
        address: String,
        #[arg(long, help = "Json string array of candidates or input file path")]
        to: String,
        #[arg(long, default_value = VOTE_BP_ID, help = "Id to vote")]
        id: String,
        #[arg(long, alias = "path", help = "Sign locally with a key from this keystore")]
        keystore: Option<String>,
        #[arg(long, help = "Password of the keystore account")]
        password: Option<String>,
    },
    #[command(name = "stake", about = "Stake aergo for voting")]
    Stake {
        #[arg(long, help = "Account address")]
        address: String,
        #[arg(long, help = "Amount of staking")]
        amount: String,
        #[arg(long, alias = "path", help = "Sign locally with a key from this keystore")]
        keystore: Option<String>,
        #[arg(long, help = "Password of the keystore account")]
        password: Option<String>,
    },
    #[command(name = "unstake", about = "Unstake aergo")]
    Unstake {
        #[arg(long, help = "Account address")]
        address: String,
        #[arg(long, help = "Amount of staking")]
        amount: String,
        #[arg(long, alias = "path", help = "Sign locally with a key from this keystore")]
        keystore: Option<String>,
        #[arg(long, help = "Password of the keystore account")]
        password: Option<String>,
    },
}

impl AccountCommand {
    /// Keystore commands work offline when a keystore is named
    fn needs_connection(&self) -> bool {
        match self {
            AccountCommand::New { keystore, .. }
            | AccountCommand::List { keystore }
            | AccountCommand::Import { keystore, .. }
            | AccountCommand::Export { keystore, .. } => keystore.is_none(),
            _ => true,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ContractCommand {
    #[command(name = "deploy", about = "Deploy a contract")]
    Deploy {
        #[arg(help = "Creator account address")]
        creator: String,
        #[arg(help = "File holding the compiled contract (base58 or raw)")]
        bcfile: String,
        #[arg(long, default_value = "0", help = "Amount sent with the deployment")]
        amount: String,
    },
    #[command(name = "call", about = "Call a contract function")]
    Call {
        #[arg(help = "Sender account address")]
        sender: String,
        #[arg(help = "Contract address")]
        contract: String,
        #[arg(help = "Function name")]
        name: String,
        #[arg(help = "Json array of arguments")]
        args: Option<String>,
        #[arg(long, default_value = "0", help = "Amount sent with the call")]
        amount: String,
    },
    #[command(name = "query", about = "Query a contract function without a transaction")]
    Query {
        #[arg(help = "Contract address")]
        contract: String,
        #[arg(help = "Function name")]
        name: String,
        #[arg(help = "Json array of arguments")]
        args: Option<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ClusterCommand {
    #[command(name = "add", about = "Add a member to the raft cluster")]
    Add {
        #[arg(long, help = "Name of the new member")]
        name: String,
        #[arg(long, help = "Raft url of the new member")]
        url: String,
        #[arg(long, help = "Peer id of the new member")]
        peerid: String,
    },
    #[command(name = "remove", about = "Remove a member from the raft cluster")]
    Remove {
        #[arg(long, help = "Member id in hex")]
        nodeid: String,
    },
}

#[derive(Subcommand, Debug)]
pub enum EnterpriseCommand {
    #[command(name = "query", about = "Print config values of enterprise")]
    Query {
        #[arg(help = "admins, permissions or another config key")]
        key: String,
    },
    #[command(name = "tx", about = "Print transaction for enterprise")]
    Tx {
        #[arg(help = "Transaction hash (base58)")]
        hash: String,
        #[arg(short = 't', long, default_value_t = 30, help = "Seconds to wait for the transaction status")]
        timeout: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum EventCommand {
    #[command(name = "list", about = "List events of a contract")]
    List {
        #[arg(long, default_value_t = 0, help = "Start block number")]
        start: u64,
        #[arg(long, default_value_t = 0, help = "End block number")]
        end: u64,
        #[arg(long, default_value = "", help = "Event name")]
        event: String,
        #[arg(long, help = "Contract address")]
        address: String,
        #[arg(long, help = "Descending order")]
        desc: bool,
        #[arg(long, default_value = "", help = "Argument filter")]
        argfilter: String,
        #[arg(long, default_value_t = 0, help = "Recent block count")]
        recent: i32,
    },
    #[command(name = "stream", about = "Stream events of a contract")]
    Stream {
        #[arg(long, help = "Contract address")]
        address: String,
        #[arg(long, default_value = "", help = "Event name")]
        event: String,
        #[arg(long, default_value = "", help = "Argument filter")]
        argfilter: String,
        #[arg(long, default_value_t = 0, help = "Maximum number of events to receive (0 for unlimited)")]
        limit: usize,
        #[arg(long, default_value_t = 0, help = "Maximum time to wait in seconds (0 for unlimited)")]
        timeout: u64,
    },
}

#[derive(Subcommand, Debug)]
pub enum MempoolCommand {
    #[command(name = "stat", about = "Show mempool statistics")]
    Stat {
        #[arg(short = 's', long = "sock", help = "Admin socket path")]
        sock: String,
    },
    #[command(name = "tx", about = "Show pending transactions of accounts")]
    Tx {
        #[arg(short = 's', long = "sock", help = "Admin socket path")]
        sock: String,
        #[arg(help = "Account addresses")]
        accounts: Vec<String>,
    },
}

#[derive(Subcommand, Debug)]
pub enum NameCommand {
    #[command(name = "new", about = "Create account name")]
    New {
        #[arg(long, help = "Sender account address")]
        from: String,
        #[arg(long, help = "Name of account to create")]
        name: String,
        #[arg(
            long,
            default_value = "20aergo",
            help = "Spending for create name. Must be set to the current nameprice"
        )]
        amount: String,
        #[arg(long, alias = "path", help = "Sign locally with a key from this keystore")]
        keystore: Option<String>,
        #[arg(long, help = "Password")]
        password: Option<String>,
    },
    #[command(name = "update", about = "Update account name")]
    Update {
        #[arg(long, help = "Sender account address")]
        from: String,
        #[arg(long, help = "Recipient account address")]
        to: String,
        #[arg(long, help = "Name of account to update")]
        name: String,
        #[arg(
            long,
            default_value = "20aergo",
            help = "Spending for update name. Must be set to the current nameprice"
        )]
        amount: String,
        #[arg(long, alias = "path", help = "Sign locally with a key from this keystore")]
        keystore: Option<String>,
        #[arg(long, help = "Password")]
        password: Option<String>,
    },
    #[command(name = "owner", about = "Owner of account name")]
    Owner {
        #[arg(long, help = "Name of account")]
        name: String,
        #[arg(short = 'n', long, default_value_t = 0, help = "Block height")]
        blockno: u64,
    },
}

impl Command {
    /// Whether the node connection is dialed before the command runs
    pub fn needs_connection(&self) -> bool {
        match self {
            Command::Account(sub) => sub.needs_connection(),
            Command::Signtx {
                key,
                keystore,
                remote,
                ..
            } => key.is_none() && keystore.is_none() && *remote,
            Command::Verifytx { remote, .. } => *remote,
            Command::Mempool(_) | Command::Keygen { .. } | Command::Version => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_command_tree_is_consistent() {
        Opt::command().debug_assert();
    }

    #[test]
    fn test_global_flags_anywhere() {
        let opt = Opt::try_parse_from(["aergocli", "blockchain", "-H", "node1", "-p", "1000"]).unwrap();
        assert_eq!(opt.global.host.as_deref(), Some("node1"));
        assert_eq!(opt.global.port, Some(1000));
        assert!(matches!(opt.command, Command::Blockchain { hex: false }));
    }

    #[test]
    fn test_getblock_needs_hash_or_number() {
        assert!(Opt::try_parse_from(["aergocli", "getblock"]).is_err());
        assert!(Opt::try_parse_from(["aergocli", "getblock", "--number", "3"]).is_ok());
        assert!(Opt::try_parse_from(["aergocli", "getblock", "--hash", "x", "--number", "3"]).is_err());
    }

    #[test]
    fn test_signtx_flags() {
        let opt = Opt::try_parse_from([
            "aergocli", "signtx", "--jsontx", "{}", "--key", "12345678",
        ])
        .unwrap();
        assert!(!opt.command.needs_connection());
        let opt = Opt::try_parse_from([
            "aergocli", "signtx", "--jsontx", "{}", "--remote", "false", "--path", "/ks",
        ])
        .unwrap();
        match &opt.command {
            Command::Signtx { remote, keystore, .. } => {
                assert!(!remote);
                assert_eq!(keystore.as_deref(), Some("/ks"));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(!opt.command.needs_connection());
    }

    #[test]
    fn test_offline_account_commands() {
        let opt = Opt::try_parse_from(["aergocli", "account", "list", "--keystore", "/tmp/ks"]).unwrap();
        assert!(!opt.command.needs_connection());
        let opt = Opt::try_parse_from(["aergocli", "account", "list"]).unwrap();
        assert!(opt.command.needs_connection());
    }

    #[test]
    fn test_negative_detail() {
        let opt = Opt::try_parse_from(["aergocli", "getpeers", "--detail", "-2"]).unwrap();
        assert!(matches!(opt.command, Command::Getpeers { detail: -2, .. }));
    }

    #[test]
    fn test_mempool_requires_socket() {
        assert!(Opt::try_parse_from(["aergocli", "mempool", "stat"]).is_err());
        let opt = Opt::try_parse_from(["aergocli", "mempool", "stat", "-s", "/tmp/a.sock"]).unwrap();
        assert!(!opt.command.needs_connection());
    }

    #[test]
    fn test_peer_sort_parse() {
        assert_eq!("height".parse::<PeerSort>().unwrap(), PeerSort::Height);
        assert_eq!(
            "weird".parse::<PeerSort>().unwrap_err(),
            "Invalid sort type weird"
        );
    }
}
