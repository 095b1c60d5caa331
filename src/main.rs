// This is my entry point for aergocli, the command line client of an aergo node
use aergo_cli::cli::chain::{self, ListBlocksRequest, StateRequest};
use aergo_cli::cli::keygen::{keygen, version_line, KeygenRequest};
use aergo_cli::cli::tx::{self, SignRequest};
use aergo_cli::cli::{
    account, contract, enterprise, event, failure_line, init_logging, mempool, name, peers, vote,
    Command, NodeContext, Opt,
};
use aergo_cli::Result;
use clap::Parser;
use log::error;
use std::process;

#[tokio::main]
async fn main() {
    // I parse the flags first; clap reports bad flags itself and exits with 2
    let opt = Opt::parse();

    let mut ctx = match NodeContext::load(&opt.global.overrides()) {
        Ok(ctx) => ctx,
        Err(e) => {
            println!("{}", failure_line(&e));
            process::exit(1);
        }
    };
    init_logging(&ctx.config().loglevel);

    // I dial the node only for commands that talk to it; the context closes it again
    if opt.command.needs_connection() {
        let connected = ctx.connect().await.map(|_| ());
        if let Err(e) = connected {
            error!("Could not connect to {}:{}", ctx.config().host, ctx.config().port);
            println!("{}", failure_line(&e));
            process::exit(1);
        }
    }

    if let Err(e) = run_command(&ctx, opt.command).await {
        println!("{}", failure_line(&e));
        // I drop the context by hand because process::exit skips destructors
        drop(ctx);
        process::exit(1);
    }
}

async fn run_command(ctx: &NodeContext, command: Command) -> Result<()> {
    match command {
        Command::Account(cmd) => account::run(ctx, cmd).await,
        Command::Blockchain { hex } => chain::blockchain(ctx, hex).await,
        Command::Chaininfo => chain::chaininfo(ctx).await,
        Command::Chainstat => chain::chainstat(ctx).await,
        Command::Consensusinfo => chain::consensusinfo(ctx).await,
        Command::Getblock { hash, number } => chain::getblock(ctx, hash.as_deref(), number).await,
        Command::Listblocks {
            hash,
            height,
            size,
            offset,
            asc,
        } => {
            let req = ListBlocksRequest {
                hash: hash.as_deref(),
                height,
                size,
                offset,
                asc,
            };
            chain::listblocks(ctx, req).await
        }
        Command::Gettx { hash } => chain::gettx(ctx, &hash).await,
        Command::Getreceipt { hash } => chain::getreceipt(ctx, &hash).await,
        Command::Getstate {
            address,
            proof,
            root,
            compressed,
        } => {
            let req = StateRequest {
                address: &address,
                proof,
                root: root.as_deref(),
                compressed,
            };
            chain::getstate(ctx, req).await
        }
        Command::Getstaking { address } => chain::getstaking(ctx, &address).await,
        Command::Getaccountvote { address } => chain::getaccountvote(ctx, &address).await,
        Command::Sendtx {
            from,
            to,
            amount,
            keystore,
            password,
        } => {
            tx::sendtx(
                ctx,
                &from,
                &to,
                &amount,
                keystore.as_deref(),
                password.as_deref(),
            )
            .await
        }
        Command::Committx { jsontx, jsontxpath } => {
            tx::committx(ctx, jsontx.as_deref(), jsontxpath.as_deref()).await
        }
        Command::Signtx {
            jsontx,
            keystore,
            address,
            remote,
            password,
            key,
        } => {
            let req = SignRequest {
                jsontx: &jsontx,
                keystore: keystore.as_deref(),
                address: address.as_deref(),
                remote,
                password: password.as_deref(),
                key: key.as_deref(),
            };
            tx::signtx(ctx, req).await
        }
        Command::Verifytx { jsontx, remote } => tx::verifytx(ctx, &jsontx, remote).await,
        Command::Contract(cmd) => contract::run(ctx, cmd).await,
        Command::Cluster(cmd) => enterprise::run_cluster(ctx, cmd).await,
        Command::Enterprise(cmd) => enterprise::run_enterprise(ctx, cmd).await,
        Command::Event(cmd) => event::run(ctx, cmd).await,
        // The mempool commands dial the admin socket on their own
        Command::Mempool(cmd) => mempool::run(cmd).await,
        Command::Name(cmd) => name::run(ctx, cmd).await,
        Command::Vote { from, to } => vote::vote(ctx, &from, &to).await,
        Command::Votestat { count, id } => vote::votestat(ctx, count, &id).await,
        Command::Getpeers {
            nohidden,
            show_self,
            sort,
            detail,
        } => peers::getpeers(ctx, nohidden, show_self, &sort, detail).await,
        Command::Metric => chain::metric(ctx).await,
        Command::Nodestate { name, timeout } => chain::nodestate(ctx, &name, timeout).await,
        Command::Serverinfo { keys } => chain::serverinfo(ctx, keys).await,
        Command::Keygen {
            prefix,
            from_key,
            json,
            password,
            addr,
        } => keygen(KeygenRequest {
            prefix: prefix.as_deref(),
            from_key,
            json,
            password: &password,
            with_address: addr,
        }),
        Command::Version => {
            println!("{}", version_line("aergocli"));
            Ok(())
        }
    }
}
