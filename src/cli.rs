use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use lambda_runtime::{service_fn, LambdaEvent};
use serde_json::Value;
use std::path::{Path, PathBuf};
use tokio::io::AsyncReadExt;

use crate::aws::AwsClients;
use crate::config::RelayConfig;
use crate::event::{Classified, IncomingEvent};
use crate::handler::handle;
use crate::response::Response;

/// CLI for image-relay: host the function or exercise it by hand.
#[derive(Parser)]
#[clap(
    name = "image-relay",
    version,
    about = "Relay uploaded images into the processed bucket and announce them"
)]
pub struct Cli {
    /// Without a subcommand the binary serves the Lambda runtime API.
    #[clap(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the handler once against a JSON event file and print the response
    Invoke {
        /// Path to the event JSON, or `-` for stdin
        #[clap(long)]
        event: PathBuf,
    },
    /// Show how an event would be routed, without calling any service
    Classify {
        /// Path to the event JSON, or `-` for stdin
        #[clap(long)]
        event: PathBuf,
    },
}

/// Extracted async CLI logic entrypoint for integration tests and main()
pub async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        None => serve().await,
        Some(Commands::Invoke { event }) => {
            let payload = read_event(&event).await?;
            let clients = AwsClients::from_env().await;
            let config = RelayConfig::from_env();
            config.trace_loaded();

            let response = handle(&payload, &config, &clients.store, &clients.notifier).await;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Some(Commands::Classify { event }) => {
            let payload = read_event(&event).await?;
            match IncomingEvent::classify(&payload)? {
                Classified::Event(event) => {
                    println!("{} -> {}", event.kind(), event.destination_key());
                }
                Classified::Unrecognized => println!("unrecognized"),
            }
            Ok(())
        }
    }
}

/// Serve invocations until the runtime shuts the process down.
async fn serve() -> Result<()> {
    let clients = AwsClients::from_env().await;
    let clients = &clients;
    tracing::info!("Lambda runtime starting");

    lambda_runtime::run(service_fn(move |event: LambdaEvent<Value>| async move {
        tracing::info!(request_id = %event.context.request_id, "Invocation received");
        let config = RelayConfig::from_env();
        config.trace_loaded();
        let response = handle(&event.payload, &config, &clients.store, &clients.notifier).await;
        Ok::<Response, lambda_runtime::Error>(response)
    }))
    .await
    .map_err(anyhow::Error::msg)
}

async fn read_event(path: &Path) -> Result<Value> {
    let raw = if path == Path::new("-") {
        let mut buf = String::new();
        tokio::io::stdin()
            .read_to_string(&mut buf)
            .await
            .context("Failed to read event from stdin")?;
        buf
    } else {
        tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read event file {path:?}"))?
    };

    serde_json::from_str(&raw).context("Failed to parse event JSON")
}
