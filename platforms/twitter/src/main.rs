use anyhow::{Context, Result};
use clap::Parser;
use core_logic::{setup_logger, ApiClient, CredentialStore, MetricsCollector, RunController};
use dotenv::dotenv;
use std::sync::Arc;
use tokio::time::{interval, Duration};
use tracing::{error, info};
use twitter_dm_sweeper::{TwitterClient, TwitterConfig};

#[derive(Parser, Debug)]
#[command(author, version, about = "Deletes every direct message of an account", long_about = None)]
struct Args {
    /// Keys file: blocks of 4 lines (consumer key/secret, access token/secret)
    #[arg(short, long, default_value = CredentialStore::DEFAULT_KEYS_FILE)]
    keys: String,
    /// Optional TOML file overriding API base, page size, backoff, proxy
    #[arg(short, long)]
    config: Option<String>,
    #[arg(short, long)]
    export_metrics: Option<String>,
    #[arg(long, default_value = "30", value_parser = clap::value_parser!(u64).range(1..))]
    metrics_interval: u64,
}

#[tokio::main]
async fn main() -> Result<()> {
    let _log_guard = setup_logger();
    dotenv().ok();

    let args = Args::parse();

    let config = TwitterConfig::load(args.config.as_deref())?;
    let credentials = CredentialStore::load(&args.keys)
        .with_context(|| format!("Failed to load keys from {}", args.keys))?;

    let mut clients: Vec<Arc<dyn ApiClient>> = Vec::with_capacity(credentials.count());
    for (i, credential) in credentials.into_credentials().into_iter().enumerate() {
        let label = format!("{:03}", i + 1);
        let client = TwitterClient::new(label, credential, &config)?;
        clients.push(Arc::new(client));
    }

    let controller = RunController::new(clients, config.sweep_config())?;

    let metrics_task = args.export_metrics.as_ref().map(|metrics_path| {
        let path = metrics_path.clone();
        let interval_secs = args.metrics_interval;
        tokio::spawn(async move {
            let mut interval = interval(Duration::from_secs(interval_secs));
            loop {
                interval.tick().await;
                if let Err(e) = MetricsCollector::global().export_to_file(&path).await {
                    error!("Metrics export failed: {}", e);
                }
            }
        })
    });

    let result = controller.run().await;

    if let Some(task) = metrics_task {
        task.abort();
    }
    if let Some(path) = &args.export_metrics {
        MetricsCollector::global().export_to_file(path).await.ok();
    }

    let summary = match result {
        Ok(summary) => summary,
        Err(e) => {
            error!("Sweep aborted: {}", e);
            return Err(e).context("Sweep aborted");
        }
    };
    info!(
        target: "sweep",
        "Done | Passes: {} | Backoffs: {} | DELETED: {} | Failed: {} | Pages: {}",
        summary.passes,
        summary.backoffs,
        summary.deleted,
        summary.failed,
        summary.pages
    );

    Ok(())
}
