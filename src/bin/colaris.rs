// This is my entry point for colaris, the command line client of a polaris server
use aergo_cli::cli::polaris::{self, PolarisOpt};
use aergo_cli::cli::{failure_line, init_logging, PolarisContext};
use clap::Parser;
use log::error;
use std::process;

#[tokio::main]
async fn main() {
    let opt = PolarisOpt::parse();

    let mut ctx = match PolarisContext::load(&opt.global.overrides()) {
        Ok(ctx) => ctx,
        Err(e) => {
            println!("{}", failure_line(&e));
            process::exit(1);
        }
    };
    // polaris has no loglevel option, so I log at info unless RUST_LOG says otherwise
    init_logging("info");

    if opt.command.needs_connection() {
        let connected = ctx.connect().await.map(|_| ());
        if let Err(e) = connected {
            error!("Could not connect to {}:{}", ctx.config().host, ctx.config().port);
            println!("{}", failure_line(&e));
            process::exit(1);
        }
    }

    if let Err(e) = polaris::run(&ctx, opt.command).await {
        println!("{}", failure_line(&e));
        drop(ctx);
        process::exit(1);
    }
}
