// This is my mempool dump decoder; it works offline and never dials a node
use aergo_cli::cli::{failure_line, init_logging};
use aergo_cli::diag::decode_dump_file;
use clap::Parser;
use std::io;
use std::path::PathBuf;
use std::process;

#[derive(Debug, Parser)]
#[command(name = "mpdumpdiag", version, about = "Print the transactions of a mempool dump as json")]
struct DiagOpt {
    #[arg(help = "CSV dump whose first column holds base64 encoded transactions")]
    dump: PathBuf,
}

fn main() {
    init_logging("info");
    let opt = DiagOpt::parse();

    // I stream the rows straight to stdout; broken rows only show up in the log
    let stdout = io::stdout();
    if let Err(e) = decode_dump_file(&opt.dump, &mut stdout.lock()) {
        println!("{}", failure_line(&e));
        process::exit(1);
    }
}
