// Adapters layer: concrete implementations of the domain ports for external systems.

pub mod chat;
pub mod itinerary;
pub mod mail;
pub mod payment;
pub mod webhook;

use crate::utils::error::Result;
use std::time::Duration;

/// Shared outbound client; every adapter clones it so they share one connection pool.
pub fn http_client(timeout: Duration) -> Result<reqwest::Client> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .user_agent(concat!("consult-site/", env!("CARGO_PKG_VERSION")))
        .build()?;
    Ok(client)
}
