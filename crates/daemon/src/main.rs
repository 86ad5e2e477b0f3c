//! ipstack resolver - Main Entry Point
//! Reads IPs, resolves them through the worker pool, prints JSON lines.

mod feedback;
mod input;
mod settings;

use anyhow::{anyhow, Result};
use clap::Parser;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use feedback::JsonLinesFeedback;
use ipstack_core::{TracingLogger, WorkerPool, WorkerPoolConfig};
use ipstack_infra_http::IpstackClient;
use settings::Settings;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "ipstack-resolve")]
#[command(about = "Resolve IP addresses to geolocation records via ipstack", long_about = None)]
#[command(version)]
struct Cli {
    /// IP addresses to resolve (one per line on stdin when omitted)
    ips: Vec<String>,

    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of concurrent workers
    #[arg(short, long)]
    workers: Option<usize>,

    /// Capacity of the job queue
    #[arg(short, long)]
    queue_size: Option<usize>,

    /// Log format: pretty or json
    #[arg(long, env = "IPSTACK_LOG_FORMAT", default_value = "pretty")]
    log_format: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 1. Initialize logging (stdout carries results, logs go to stderr)
    init_logging(&cli.log_format)?;
    info!("ipstack resolver v{} starting...", VERSION);

    // 2. Load configuration
    let settings = Settings::load(cli.config.as_deref())?.with_overrides(cli.workers, cli.queue_size)?;
    info!(
        workers = settings.workers,
        queue_size = settings.queue_size,
        https = settings.https,
        "Settings loaded"
    );

    // 3. Setup dependencies (DI wiring)
    let client = IpstackClient::new(&settings.access_key, settings.https, settings.timeout_secs)
        .map_err(|e| anyhow!("HTTP client creation failed: {}", e))?;
    let feedback = Arc::new(JsonLinesFeedback::new(std::io::stdout()));

    let config = WorkerPoolConfig::new(settings.queue_size, settings.workers)
        .with_logger(Arc::new(TracingLogger));
    let pool = WorkerPool::new(config, Arc::new(client), feedback.clone())?;

    // 4. Feed the pool until input ends or Ctrl+C
    let submitted = AtomicUsize::new(0);
    tokio::select! {
        result = feed(&pool, cli.ips, &submitted) => result?,
        _ = tokio::signal::ctrl_c() => {
            info!("Interrupt received. Stopping intake...");
        }
    }

    // 5. Graceful shutdown: resolves everything already queued
    info!(
        submitted = submitted.load(Ordering::SeqCst),
        "Input finished. Shutting down pool..."
    );
    pool.shutdown().await;

    info!(
        resolved = feedback.resolved_count(),
        "Shutdown complete."
    );
    Ok(())
}

fn init_logging(format: &str) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("ipstack=info"))?;

    match format {
        "json" => {
            // Production: JSON structured logging
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        _ => {
            // Development: Pretty formatting with colors
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().pretty().with_writer(std::io::stderr))
                .init();
        }
    }
    Ok(())
}

/// Submit IPs from the arguments, or from stdin when none were given
async fn feed(pool: &WorkerPool, ips: Vec<String>, submitted: &AtomicUsize) -> Result<()> {
    if !ips.is_empty() {
        for ip in ips {
            submit_line(pool, &ip, submitted).await;
        }
        return Ok(());
    }

    let mut lines = input::spawn_line_reader(std::io::BufReader::new(std::io::stdin()))?;
    while let Some(line) = lines.recv().await {
        submit_line(pool, &line, submitted).await;
    }
    Ok(())
}

async fn submit_line(pool: &WorkerPool, line: &str, submitted: &AtomicUsize) {
    let ip = line.trim();
    if ip.is_empty() || ip.starts_with('#') {
        return;
    }
    pool.submit(ip).await;
    submitted.fetch_add(1, Ordering::SeqCst);
}
