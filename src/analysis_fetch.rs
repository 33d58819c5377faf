use std::path::Path;

use anyhow::{Context, Result, anyhow};
use reqwest::blocking::multipart::Form;
use serde::Deserialize;
use serde_json::Value;

use crate::config::AppConfig;
use crate::http_client::http_client;
use crate::normalize::AnalysisPayload;

const ANALYZE_PATH: &str = "analyze";
const HEALTH_PATH: &str = "health";

/// Uploads a match video and waits for the full analysis.
///
/// Any failure (transport, timeout, non-2xx, malformed body) is returned as an error; a
/// payload is only handed out once it parsed completely.
pub fn analyze_video(cfg: &AppConfig, video: &Path, save_annotated: bool) -> Result<AnalysisPayload> {
    if !video.is_file() {
        return Err(anyhow!("video not found: {}", video.display()));
    }
    let client = http_client(cfg)?;
    let form = Form::new()
        .file("file", video)
        .with_context(|| format!("failed to read {}", video.display()))?;

    let resp = client
        .post(cfg.endpoint(ANALYZE_PATH))
        .query(&[
            ("model_path", cfg.model_path.as_str()),
            ("save_annotated", if save_annotated { "true" } else { "false" }),
        ])
        .multipart(form)
        .send()
        .context("analysis request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading analysis body")?;
    if !status.is_success() {
        return Err(anyhow!("http {}: {}", status, error_detail(&body)));
    }
    parse_analysis_json(&body)
}

pub fn check_health(cfg: &AppConfig) -> Result<String> {
    let client = http_client(cfg)?;
    let resp = client
        .get(cfg.endpoint(HEALTH_PATH))
        .send()
        .context("health request failed")?;
    let status = resp.status();
    let body = resp.text().context("failed reading health body")?;
    if !status.is_success() {
        return Err(anyhow!("http {}: {}", status, error_detail(&body)));
    }
    parse_health_json(&body)
}

pub fn parse_analysis_json(raw: &str) -> Result<AnalysisPayload> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || trimmed == "null" {
        return Err(anyhow!("empty analysis response"));
    }
    serde_json::from_str(trimmed).context("invalid analysis json")
}

#[derive(Debug, Deserialize)]
struct HealthResponse {
    #[serde(default)]
    status: Option<String>,
}

pub fn parse_health_json(raw: &str) -> Result<String> {
    let resp: HealthResponse = serde_json::from_str(raw.trim()).context("invalid health json")?;
    Ok(resp.status.unwrap_or_else(|| "unknown".to_string()))
}

/// Pulls the human-readable message out of an error body (`{"detail": ...}`), falling back
/// to the raw text.
pub fn error_detail(body: &str) -> String {
    let trimmed = body.trim();
    let Ok(root) = serde_json::from_str::<Value>(trimmed) else {
        return trimmed.to_string();
    };
    match root.get("detail") {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|item| item.get("msg").and_then(Value::as_str))
            .collect::<Vec<_>>()
            .join("; "),
        Some(other) => other.to_string(),
        None => trimmed.to_string(),
    }
}
