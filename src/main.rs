//! Crypto Trading Bot - Main Entry Point
//!
//! Loads configuration, connects to the selected exchange and runs the
//! trading agent until Ctrl-C.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use crypto_trading_bot::agent::{Agent, AgentSettings};
use crypto_trading_bot::common::traits::IdGenerator;
use crypto_trading_bot::config::{load_config, ExchangeKind};
use crypto_trading_bot::exchange::build_exchange;
use crypto_trading_bot::generator::{CompactIdGenerator, UuidGenerator};

/// Log output format
#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormat {
    Text,
    Json,
}

/// CLI arguments for the application
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Log level (trace, debug, info, warn, error); defaults to the configured level
    #[arg(long)]
    log_level: Option<String>,

    /// Log output format
    #[arg(long, value_enum, default_value = "text")]
    log_format: LogFormat,

    /// Exchange backend, overriding the configuration file
    #[arg(long, value_enum, env = "TRADING_BOT_EXCHANGE")]
    exchange: Option<ExchangeKind>,
}

fn init_logging(level: &str, format: LogFormat) -> Result<()> {
    let level = match level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let builder = FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true);

    match format {
        LogFormat::Text => tracing::subscriber::set_global_default(builder.finish())?,
        LogFormat::Json => tracing::subscriber::set_global_default(builder.json().finish())?,
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Load environment variables from .env file if present
    dotenvy::dotenv().ok();

    let mut config = load_config(Some(&args.config)).context("failed to load configuration")?;
    if let Some(kind) = args.exchange {
        config.exchange.kind = kind;
    }

    let log_level = args
        .log_level
        .clone()
        .unwrap_or_else(|| config.settings.log_level.clone());
    init_logging(&log_level, args.log_format)?;

    info!("Starting crypto trading bot");
    info!("Configuration file: {}", args.config);

    let exchange = build_exchange(&config.exchange, config.settings.request_timeout())
        .context("failed to build exchange client")?;
    let settings =
        AgentSettings::try_from(&config.agent).context("invalid agent configuration")?;

    // Binance restricts the characters and length of client order ids
    let id_generator: Arc<dyn IdGenerator> = match config.exchange.kind {
        ExchangeKind::Binance => Arc::new(CompactIdGenerator),
        ExchangeKind::Simulated | ExchangeKind::Coinbase => Arc::new(UuidGenerator),
    };

    let agent = Agent::new(exchange)
        .with_settings(settings)
        .with_id_generator(id_generator);

    let shutdown = CancellationToken::new();
    let signal = shutdown.clone();
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("Received shutdown signal, cleaning up..."),
            Err(e) => error!(error = %e, "failed to listen for shutdown signal"),
        }
        signal.cancel();
    });

    agent.start(shutdown).await;

    info!("Agent stopped");
    Ok(())
}
