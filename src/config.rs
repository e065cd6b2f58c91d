// src/config.rs
use std::{
    env,
    net::{Ipv4Addr, SocketAddr, SocketAddrV4},
    time::Duration,
};

use anyhow::Context;

/// Gemini API base URL.
pub const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Model every request is sent to.
pub const GEMINI_MODEL: &str = "gemini-1.5-flash-latest";

const DEFAULT_BIND_ADDR: SocketAddr =
    SocketAddr::V4(SocketAddrV4::new(Ipv4Addr::UNSPECIFIED, 8000));
const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:3000";
const DEFAULT_UPSTREAM_TIMEOUT_SECS: u64 = 30;

#[derive(Clone)]
pub struct Config {
    /// `None` when `GOOGLE_API_KEY` is unset or empty.
    pub api_key: Option<String>,
    pub api_base: String,
    pub model: String,
    pub bind_addr: SocketAddr,
    pub allowed_origin: String,
    pub upstream_timeout: Duration,
}

// Hand-written so the key never reaches a log line.
impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("bind_addr", &self.bind_addr)
            .field("allowed_origin", &self.allowed_origin)
            .field("upstream_timeout", &self.upstream_timeout)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            api_base: GEMINI_API_BASE.to_string(),
            model: GEMINI_MODEL.to_string(),
            bind_addr: DEFAULT_BIND_ADDR,
            allowed_origin: DEFAULT_ALLOWED_ORIGIN.to_string(),
            upstream_timeout: Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Load from the process environment. A missing API key is not an error here;
    /// the relay reports it on every call instead.
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GOOGLE_API_KEY").filter(|k| !k.trim().is_empty());

        let bind_addr = match lookup("RELAY_BIND_ADDR") {
            Some(raw) => raw
                .parse()
                .with_context(|| format!("RELAY_BIND_ADDR is not a socket address: {raw}"))?,
            None => DEFAULT_BIND_ADDR,
        };

        let allowed_origin = lookup("RELAY_ALLOWED_ORIGIN")
            .unwrap_or_else(|| DEFAULT_ALLOWED_ORIGIN.to_string());

        let upstream_timeout = match lookup("RELAY_UPSTREAM_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.parse().with_context(|| {
                    format!("RELAY_UPSTREAM_TIMEOUT_SECS must be a whole number of seconds: {raw}")
                })?;
                anyhow::ensure!(secs > 0, "RELAY_UPSTREAM_TIMEOUT_SECS must be greater than zero");
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_UPSTREAM_TIMEOUT_SECS),
        };

        Ok(Self {
            api_key,
            bind_addr,
            allowed_origin,
            upstream_timeout,
            ..Self::default()
        })
    }
}
