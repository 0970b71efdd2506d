use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use symptom_analyzer::connector::http;
use symptom_analyzer::{Commands, Container, ContainerConfig, Router};

#[derive(Parser)]
#[command(name = "symptom-analyzer")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Never call the remote completion API; answer with canned guidance
    #[arg(long, global = true)]
    offline: bool,

    /// Upper bound on a single completion request, in seconds
    #[arg(long, global = true, default_value = "45")]
    timeout_secs: u64,

    /// Largest accepted report upload, in megabytes
    #[arg(long, global = true, default_value = "10")]
    max_upload_mb: usize,

    #[command(subcommand)]
    command: Commands,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = ContainerConfig {
        offline: cli.offline,
        request_timeout: Duration::from_secs(cli.timeout_secs.max(1)),
        max_upload_bytes: upload_limit_bytes(cli.max_upload_mb),
    };
    let container = Container::new(config)?;

    match cli.command {
        Commands::Serve { port, public } => {
            let ip = if public {
                IpAddr::V4(Ipv4Addr::UNSPECIFIED)
            } else {
                IpAddr::V4(Ipv4Addr::LOCALHOST)
            };
            info!("Starting API server (model {})", container.model_name());
            http::serve(Arc::new(container), SocketAddr::new(ip, port)).await?;
        }
        command => {
            let router = Router::new(&container);
            let output = router.route(command).await?;
            println!("{}", output);
        }
    }

    Ok(())
}

/// Megabytes to bytes, at least 1 MiB and clamped instead of overflowing.
fn upload_limit_bytes(megabytes: usize) -> usize {
    megabytes.max(1).saturating_mul(1024 * 1024)
}
