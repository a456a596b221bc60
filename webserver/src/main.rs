//! WebServer entry point
//!
//! Loads provider configuration from the environment and serves the chat API.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use relay::{ChatRelay, RealProviderClient};
use shared::{ProcessId, RelayConfig, logging, process_info, process_warn};
use tokio::signal;

use webserver::{WebServer, WebServerError, WebServerResult};

#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "SaintVision chat API server")]
struct Args {
    /// Port for HTTP server
    #[arg(long, default_value = "3000")]
    port: u16,

    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,

    /// Env file to load instead of ./.env
    #[arg(long)]
    env_file: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    let args = Args::parse();

    let env_loaded = match &args.env_file {
        Some(path) => dotenvy::from_path(path).map(|_| ()),
        None => dotenvy::dotenv().map(|_| ()),
    };

    ProcessId::init_webserver();
    logging::init_tracing_with_level(Some(&args.log_level));

    if let (Some(path), Err(e)) = (&args.env_file, &env_loaded) {
        return Err(WebServerError::config(format!(
            "Failed to load env file {}: {e}",
            path.display()
        )));
    }

    let http_addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|e| WebServerError::config(format!("Invalid bind address: {e}")))?;

    let config = RelayConfig::from_env()?;
    let configured = config.configured_providers();
    if configured.is_empty() {
        process_warn!(
            ProcessId::current(),
            "No provider API keys set; chat requests will fail with 503"
        );
    } else {
        process_info!(ProcessId::current(), providers = ?configured, "Providers configured");
    }

    let agent_provider = config.agent_provider;
    let client = Arc::new(RealProviderClient::new(config)?);
    let chat_relay = ChatRelay::new(client, agent_provider);
    let webserver = WebServer::new(http_addr, chat_relay);

    logging::log_startup(
        ProcessId::current(),
        &format!("listening on {http_addr}, agent provider {agent_provider}"),
    );

    webserver.run(shutdown_signal()).await?;

    logging::log_success(ProcessId::current(), "WebServer stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => logging::log_shutdown(ProcessId::current(), "Received Ctrl+C signal"),
        Err(err) => logging::log_error(ProcessId::current(), "Signal handling", &err),
    }
}
