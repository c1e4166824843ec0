use anyhow::Result;
use clap::Parser;
use image_relay::cli::{run, Cli};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment
    dotenvy::dotenv().ok();

    // The host's log sink stamps each line; stdout stays free for command output.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_ansi(false)
        .without_time()
        .with_writer(std::io::stderr)
        .init();

    // An error is reported once, by the `Error: ...` line main prints on return.
    let cli = Cli::parse();
    run(cli).await
}
