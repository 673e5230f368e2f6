use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use pdfmerge::cli::{Cli, Command};
use pdfmerge::{client, server};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    match cli.command {
        Command::Serve(args) => {
            let config = args.to_config()?;
            server::serve(config).await?;
        }
        Command::Merge(args) => {
            let config = args.to_config()?;
            client::run(&config).await?;
        }
    }

    Ok(())
}
