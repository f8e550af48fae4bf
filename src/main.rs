//! # Main Entry Point
//!
//! Initializes the webhook bot using a layered architecture:
//! - Domain: Configuration, Types, Errors, Traits
//! - Infrastructure: Telegram, Airtable
//! - Application: Router, Rate Limiter, Admin List
//! - Interface: Webhook boundary, HTTP server, Command Handlers
//!

mod application;
mod domain;
mod infrastructure;
mod interface;
mod strings;

#[cfg(test)]
mod testing;

use anyhow::{Context, Result};
use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use crate::application::auth::AdminList;
use crate::application::rate_limiter::RateLimiter;
use crate::application::router::CommandRouter;
use crate::domain::config::AppConfig;
use crate::domain::traits::RecordStore;
use crate::domain::types::AdminPolicy;
use crate::infrastructure::airtable::AirtableStore;
use crate::infrastructure::telegram::TelegramClient;
use crate::interface::webhook::AppState;
use crate::strings::logs;

#[derive(Debug, Parser)]
#[command(name = "paybot", about = "Telegram webhook bot for payment method records")]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long, default_value = "data/config.yaml")]
    config: PathBuf,

    /// Listen address, overrides `server.bind`
    #[arg(long, env = "PAYBOT_BIND")]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // 1. Load Configuration
    let mut config = AppConfig::load(&args.config)?;
    if let Some(bind) = args.bind {
        config.server.bind = bind;
    }

    // 2. Logging Setup
    let _guard = init_logging(&config)?;

    // 3. Initialize Infrastructure
    let store: Arc<dyn RecordStore> = Arc::new(AirtableStore::new(&config.store));
    let telegram = Arc::new(TelegramClient::new(&config.telegram));

    // 4. Initialize Application Components
    let limiter = Arc::new(RateLimiter::from_config(&config.rate_limit));
    let admins = Arc::new(AdminList::from_config(&config.admin));
    let router = CommandRouter::new(store.clone(), limiter.clone(), admins.clone())
        .with_bot_username(config.telegram.bot_username.clone());

    tracing::info!(
        "{}",
        logs::config_loaded(
            &args.config.display().to_string(),
            store.is_configured(),
            config.admin.ids.len()
        )
    );
    if admins.is_empty() && admins.policy() == AdminPolicy::OpenIfEmpty {
        tracing::warn!("{}", logs::OPEN_ADMIN_POLICY);
    }
    if !telegram.has_token() {
        tracing::warn!("{}", logs::TOKEN_MISSING);
    }

    // 5. Serve
    let addr: SocketAddr = config
        .server
        .bind
        .parse()
        .with_context(|| format!("Invalid bind address '{}'", config.server.bind))?;

    let state = AppState {
        router,
        telegram,
        store,
        limiter,
        started_at: chrono::Utc::now(),
    };

    crate::interface::server::start_server(state, addr, &config.server.webhook_path).await?;
    Ok(())
}

/// Console logging always; a non-ANSI file layer when `logging.file` is set.
fn init_logging(config: &AppConfig) -> Result<Option<tracing_appender::non_blocking::WorkerGuard>> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let default_filter = config
        .logging
        .filter
        .clone()
        .unwrap_or_else(|| "info,hyper=warn,reqwest=warn".to_string());
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_filter));

    let console_layer = tracing_subscriber::fmt::layer().with_writer(std::io::stdout);

    let (file_layer, guard) = match &config.logging.file {
        Some(file) => {
            let path = std::path::Path::new(file);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or_else(|| std::path::Path::new("."));
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;
            let name = path
                .file_name()
                .context("logging.file has no file name")?;

            let file_appender = tracing_appender::rolling::never(dir, name);
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(non_blocking)
                .with_ansi(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}
