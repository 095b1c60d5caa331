//! `colaris`: command tree and handlers of the polaris cli

use clap::{ArgGroup, Args, Parser, Subcommand};
use log::debug;

use crate::cli::context::PolarisContext;
use crate::cli::keygen::version_line;
use crate::cli::output::print_json;
use crate::config::ConfigOverrides;
use crate::error::Result;
use crate::json::{conv_bl_conf_entries, conv_metrics, conv_polaris_peer_list};
use crate::proto::{AddEntryParams, MetricType, MetricsRequest, Paginations};
use crate::utils::base58_decode;

pub const DEFAULT_PAGE_SIZE: u32 = 20;

#[derive(Debug, Parser)]
#[command(name = "colaris", version, about = "Polaris command line interface")]
pub struct PolarisOpt {
    #[command(flatten)]
    pub global: PolarisGlobalArgs,
    #[command(subcommand)]
    pub command: PolarisCommand,
}

#[derive(Debug, Clone, Default, Args)]
pub struct PolarisGlobalArgs {
    #[arg(long, global = true, help = "polaris cli home path")]
    pub home: Option<String>,
    #[arg(long, global = true, help = "config file (default is polariscliconfig.toml)")]
    pub config: Option<String>,
    #[arg(short = 'H', long, global = true, help = "Host address to polaris server")]
    pub host: Option<String>,
    #[arg(short = 'p', long, global = true, help = "Port number to polaris server")]
    pub port: Option<u16>,
}

impl PolarisGlobalArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            home: self.home.clone(),
            config: self.config.clone(),
            host: self.host.clone(),
            port: self.port,
            keyfile: None,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum PolarisCommand {
    #[command(name = "current", about = "Get current peers registered in polaris")]
    Current {
        #[arg(long = "ref", default_value = "", help = "Peer id to start listing from")]
        reference: String,
        #[arg(long, default_value_t = DEFAULT_PAGE_SIZE, help = "Maximum number of peers")]
        size: u32,
    },
    /// Polaris configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    #[command(name = "metric", about = "Show metrics of polaris")]
    Metric,
    #[command(name = "version", about = "Print the version number of colaris")]
    Version,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Blacklist of peers and addresses
    #[command(subcommand)]
    Blacklist(BlacklistCommand),
}

#[derive(Subcommand, Debug)]
pub enum BlacklistCommand {
    #[command(name = "show", about = "Show blacklist entries")]
    Show,
    #[command(
        name = "add",
        about = "Add a blacklist entry",
        group(ArgGroup::new("target").required(true).args(["address", "cidr"]))
    )]
    Add {
        #[arg(long, default_value = "", help = "Peer id to ban")]
        peerid: String,
        #[arg(long, help = "IP address to ban")]
        address: Option<String>,
        #[arg(long, help = "Address range to ban, in CIDR notation")]
        cidr: Option<String>,
    },
    #[command(name = "rm", about = "Remove the blacklist entry at an index")]
    Rm {
        #[arg(help = "Index of the entry, as listed by show")]
        index: u32,
    },
}

impl PolarisCommand {
    pub fn needs_connection(&self) -> bool {
        !matches!(self, PolarisCommand::Version)
    }
}

/// Page request for `current`; the reference is a base58 peer id
pub fn current_page(reference: &str, size: u32) -> Result<Paginations> {
    let r#ref = if reference.is_empty() {
        Vec::new()
    } else {
        base58_decode(reference)?
    };
    Ok(Paginations { r#ref, size })
}

pub fn add_entry_params(peerid: String, address: Option<String>, cidr: Option<String>) -> AddEntryParams {
    AddEntryParams {
        peer_id: peerid,
        address: address.unwrap_or_default(),
        cidr: cidr.unwrap_or_default(),
    }
}

pub async fn run(ctx: &PolarisContext, cmd: PolarisCommand) -> Result<()> {
    match cmd {
        PolarisCommand::Current { reference, size } => {
            let page = current_page(&reference, size)?;
            let list = ctx.client()?.current_list(page).await?;
            debug!("Polaris knows {} peers", list.total);
            print_json(&conv_polaris_peer_list(&list))
        }
        PolarisCommand::Config(ConfigCommand::Blacklist(cmd)) => blacklist(ctx, cmd).await,
        PolarisCommand::Metric => {
            let metrics = ctx
                .client()?
                .metric(MetricsRequest {
                    types: vec![MetricType::P2pNetwork as i32],
                })
                .await?;
            print_json(&conv_metrics(&metrics))
        }
        PolarisCommand::Version => {
            println!("{}", version_line("colaris"));
            Ok(())
        }
    }
}

async fn blacklist(ctx: &PolarisContext, cmd: BlacklistCommand) -> Result<()> {
    let client = ctx.client()?;
    match cmd {
        BlacklistCommand::Show => {
            let entries = client.list_bl_entries().await?;
            print_json(&conv_bl_conf_entries(&entries))
        }
        BlacklistCommand::Add {
            peerid,
            address,
            cidr,
        } => {
            let reply = client
                .add_bl_entry(add_entry_params(peerid, address, cidr))
                .await?;
            println!("{}", reply.value);
            Ok(())
        }
        BlacklistCommand::Rm { index } => {
            let reply = client.remove_bl_entry(index).await?;
            println!("{}", reply.value);
            Ok(())
        }
    }
}
