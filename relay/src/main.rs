//! Relay CLI entry point
//!
//! Prints the routing decision and the augmented prompt for a message, and
//! optionally sends it to the chosen vendor.

use std::sync::Arc;

use clap::Parser;
use shared::{
    ChatMeta, ChatRequest, Emotion, Mode, Priority, ProcessId, RelayConfig, logging, process_info,
};

use relay::{ChatRelay, ProviderClient, RealProviderClient, RelayError, RelayResult};

#[derive(Parser, Debug)]
#[command(name = "relay")]
#[command(about = "Preview or send a SaintVision chat request")]
struct Args {
    /// User message
    message: String,

    /// Persona mode (ryan, execution)
    #[arg(long, default_value = "ryan")]
    mode: Mode,

    /// Routing priority hint (speed, balanced, reasoning)
    #[arg(long)]
    priority: Option<Priority>,

    /// Emotion hint (calm, curious, excited, frustrated)
    #[arg(long)]
    emotion: Option<Emotion>,

    /// Earlier conversation turns, oldest first (repeatable)
    #[arg(long = "history")]
    history: Vec<String>,

    /// Send through the dual-run path instead of the agent-prompt path
    #[arg(long)]
    dual: bool,

    /// Actually call the vendor instead of only printing the preview
    #[arg(long)]
    send: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

#[tokio::main]
async fn main() -> RelayResult<()> {
    let args = Args::parse();

    let _ = dotenvy::dotenv();
    ProcessId::init_relay();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = RelayConfig::from_env()?;
    let agent_provider = config.agent_provider;
    let client = Arc::new(RealProviderClient::new(config)?);
    let chat_relay = ChatRelay::new(client.clone(), agent_provider);

    let meta = if args.priority.is_some() || args.emotion.is_some() {
        Some(ChatMeta {
            emotion: args.emotion,
            priority: args.priority,
        })
    } else {
        None
    };
    let request = ChatRequest {
        message: args.message,
        mode: args.mode,
        history: args.history,
        meta,
    };

    let preview = chat_relay.preview(&request);
    println!("Routed provider: {} ({})", preview.provider, preview.reason);
    println!("Agent provider:  {}", preview.agent_provider);
    let modules = if preview.modules.is_empty() {
        "none".to_string()
    } else {
        preview.modules.join(", ")
    };
    println!("Active modules:  {modules}");

    if !args.send {
        println!("\n{}", preview.prompt);
        return Ok(());
    }

    let target = if args.dual { preview.provider } else { preview.agent_provider };
    if !client.is_configured(target) {
        return Err(RelayError::ConfigError {
            message: format!("{} must be set to send to {}", target.api_key_var(), target),
        });
    }

    process_info!(ProcessId::current(), provider = %target, "Sending request");
    let reply = if args.dual {
        chat_relay.dual_chat(&request.message, request.meta.as_ref()).await?.reply
    } else {
        chat_relay.agent_chat(&request).await?.reply
    };

    println!("\n{reply}");
    Ok(())
}
