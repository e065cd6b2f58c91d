// src/state.rs
use std::sync::Arc;

use crate::config::Config;
use crate::services::relay_client::RelayClient;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub relay: RelayClient,
}

impl AppState {
    pub fn new(config: &Config) -> reqwest::Result<Self> {
        Ok(Self {
            relay: RelayClient::new(config)?,
        })
    }
}
