use clap::Parser;
use man_processor::cli::{run, Cli};
use man_processor::error::Result;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    run(cli).await
}
