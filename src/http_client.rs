use std::time::Duration;

use anyhow::{Context, Result};
use once_cell::sync::OnceCell;
use reqwest::blocking::Client;

use crate::config::AppConfig;

const CONNECT_TIMEOUT_SECS: u64 = 10;

static CLIENT: OnceCell<Client> = OnceCell::new();

/// Shared client. The first caller's timeout wins; analysis requests can take minutes
/// (the service runs detection and tracking before it answers).
pub fn http_client(cfg: &AppConfig) -> Result<&'static Client> {
    CLIENT.get_or_try_init(|| {
        Client::builder()
            .connect_timeout(Duration::from_secs(CONNECT_TIMEOUT_SECS))
            .timeout(cfg.request_timeout)
            .build()
            .context("failed to build http client")
    })
}
