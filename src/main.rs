use clap::Parser;

use krent::adapter::inbound::cli::command::Cli;
use krent::adapter::inbound::cli::{output, run};

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    if let Err(report) = run::execute(cli).await {
        if output::is_json() {
            output::error(&report.to_string());
        } else {
            eprintln!("{report:?}");
        }
        std::process::exit(1);
    }
}
