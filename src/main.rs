use clap::Parser;

use llmq::cli::{self, Cli};
use llmq::logging;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.debug);

    if let Err(e) = cli::execute(cli).await {
        eprintln!("{e}");
        if let Some(hint) = e.hint() {
            eprintln!("hint: {hint}");
        }
        std::process::exit(1);
    }
}
