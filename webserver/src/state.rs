//! Webserver state management
//!
//! Shared by every handler through axum's `State` extractor.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Instant;

use relay::{ChatRelay, ProviderClient};
use shared::ProviderId;

use crate::types::ProviderStatus;

/// Core webserver state
pub struct WebServerState<P: ProviderClient> {
    pub bind_address: SocketAddr,
    pub relay: ChatRelay<P>,
    pub server_start_time: Instant,
    requests_served: AtomicU64,
}

impl<P: ProviderClient> WebServerState<P> {
    pub fn new(bind_address: SocketAddr, relay: ChatRelay<P>) -> Self {
        Self {
            bind_address,
            relay,
            server_start_time: Instant::now(),
            requests_served: AtomicU64::new(0),
        }
    }

    /// Count one relayed chat request
    pub fn record_request(&self) {
        self.requests_served.fetch_add(1, Ordering::Relaxed);
    }

    pub fn requests_served(&self) -> u64 {
        self.requests_served.load(Ordering::Relaxed)
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.server_start_time.elapsed().as_secs()
    }

    /// Whether each vendor has an API key
    pub fn provider_status(&self) -> Vec<ProviderStatus> {
        ProviderId::ALL
            .iter()
            .map(|&provider| ProviderStatus {
                provider,
                configured: self.relay.client().is_configured(provider),
            })
            .collect()
    }
}
