use anyhow::{Context, Result};
use clap::Parser;
use contactbox_core::{
    config::Config,
    http::{AppState, ContactServer},
    logging::{init_logging_with_config, LogConfig},
    metrics::{init_metrics, install_prometheus_exporter},
    shutdown::{install_signal_handlers, ShutdownCoordinator},
    store::ContactStore,
};
use std::net::IpAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "contactbox")]
#[command(about = "Contact form API for a portfolio site", long_about = None)]
struct Args {
    /// TOML configuration file
    #[arg(short, long, env = "CONTACTBOX_CONFIG")]
    config: Option<PathBuf>,

    /// Host to bind to (overrides config and environment)
    #[arg(long)]
    host: Option<IpAddr>,

    /// Port to listen on (overrides config and environment)
    #[arg(short, long)]
    port: Option<u16>,

    /// SQLite database file (overrides config and environment)
    #[arg(long)]
    db_path: Option<PathBuf>,
}

fn load_config(args: &Args) -> Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::from_file(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => Config::from_env()?,
    };

    if let Some(host) = args.host {
        config.server.host = host;
    }
    if let Some(port) = args.port {
        config.server.port = port;
    }
    if let Some(db_path) = &args.db_path {
        config.store.db_path = db_path.clone();
    }

    config.validate()?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config = load_config(&args)?;

    init_logging_with_config(LogConfig::try_from(&config.logging)?)?;

    if config.metrics.enabled {
        install_prometheus_exporter(config.metrics.bind_address)?;
        info!("Metrics exporter listening on {}", config.metrics.bind_address);
    } else {
        init_metrics();
    }

    if config.admin.uses_default_password() {
        warn!(
            "ADMIN_PASSWORD is not set; using the development default. \
             Do not expose this instance publicly."
        );
    }

    let store = ContactStore::open(&config.store.db_path)?;
    store.initialize()?;
    info!("Database ready at {}", config.store.db_path.display());

    let addr = config.server.bind_address();
    info!("Contact form API starting");
    info!("Submit form:  http://localhost:{}/api/contact", addr.port());
    info!("Health check: http://localhost:{}/api/health", addr.port());
    info!(
        "View messages: http://localhost:{}/api/contacts?password=<ADMIN_PASSWORD>",
        addr.port()
    );

    let shutdown = Arc::new(ShutdownCoordinator::new());
    install_signal_handlers(shutdown.clone())?;

    let server = ContactServer::new(AppState::new(store.clone(), &config), addr);
    server.run(shutdown).await?;

    store.close();
    info!("Shutdown complete");
    Ok(())
}
