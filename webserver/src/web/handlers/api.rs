//! REST API handlers
//!
//! JSON endpoints for the two chat paths, the routing preview and status.

use std::sync::Arc;

use axum::{
    extract::{State, rejection::JsonRejection},
    response::Json,
};
use chrono::Utc;
use relay::{AgentReply, DualReply, ProviderClient, RoutePreview};
use serde_json::{Value, json};
use shared::ChatRequest;

use crate::error::WebServerResult;
use crate::state::WebServerState;
use crate::types::DualRequest;

type AppState<P> = State<Arc<WebServerState<P>>>;

/// Agent-prompt chat - /api/chat
pub async fn chat_handler<P>(
    State(state): AppState<P>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> WebServerResult<Json<AgentReply>>
where
    P: ProviderClient + 'static,
{
    let Json(request) = payload?;
    state.record_request();
    let reply = state.relay.agent_chat(&request).await?;
    Ok(Json(reply))
}

/// Dual-run chat - /api/dual
pub async fn dual_handler<P>(
    State(state): AppState<P>,
    payload: Result<Json<DualRequest>, JsonRejection>,
) -> WebServerResult<Json<DualReply>>
where
    P: ProviderClient + 'static,
{
    let Json(request) = payload?;
    state.record_request();
    let reply = state
        .relay
        .dual_chat(&request.message, request.meta.as_ref())
        .await?;
    Ok(Json(reply))
}

/// Routing preview without a vendor call - /api/route
pub async fn route_handler<P>(
    State(state): AppState<P>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> WebServerResult<Json<RoutePreview>>
where
    P: ProviderClient + 'static,
{
    let Json(request) = payload?;
    Ok(Json(state.relay.preview(&request)))
}

/// Get system status
pub async fn status_handler<P>(State(state): AppState<P>) -> Json<Value>
where
    P: ProviderClient + 'static,
{
    Json(json!({
        "status": "ok",
        "data": {
            "server_status": "running",
            "server_time": Utc::now().timestamp(),
            "uptime_seconds": state.uptime_seconds(),
            "requests_served": state.requests_served(),
            "agent_provider": state.relay.agent_provider(),
            "providers": state.provider_status(),
            "version": env!("CARGO_PKG_VERSION")
        }
    }))
}

/// Health check endpoint
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "timestamp": Utc::now().timestamp()
    }))
}
