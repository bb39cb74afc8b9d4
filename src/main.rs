use anyhow::Result;
use clap::Parser;

use pagetitle::logging::init_logging;
use pagetitle::mcp::run_mcp_server;
use pagetitle::processor::{build_extractor, process_urls};
use pagetitle::types::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if cli.mcp {
        return run_mcp_server(cli).await;
    }

    let extractor = build_extractor(&cli)?;
    process_urls(&cli, &extractor).await
}
