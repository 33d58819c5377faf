use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_API_URL: &str = "http://localhost:8000";
const DEFAULT_MODEL_PATH: &str = "yolov8n.pt";
const DEFAULT_TIMEOUT_SECS: u64 = 600;
const MIN_TIMEOUT_SECS: u64 = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisSource {
    /// Upload to the analysis service.
    Service,
    /// Answer locally with a synthetic payload.
    Demo,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub model_path: String,
    pub request_timeout: Duration,
    pub source: AnalysisSource,
    pub save_annotated: bool,
    pub export_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

impl AppConfig {
    /// Reads `.env.local` / `.env` (if present) and then the process environment.
    pub fn load() -> Self {
        let _ = dotenvy::from_filename(".env.local");
        let _ = dotenvy::from_filename(".env");
        Self::from_env()
    }

    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| {
            lookup(key)
                .map(|val| val.trim().to_string())
                .filter(|val| !val.is_empty())
        };

        let api_base_url = non_empty("ANALYSIS_API_URL")
            .unwrap_or_else(|| DEFAULT_API_URL.to_string())
            .trim_end_matches('/')
            .to_string();
        let model_path =
            non_empty("ANALYSIS_MODEL_PATH").unwrap_or_else(|| DEFAULT_MODEL_PATH.to_string());
        let timeout_secs = non_empty("ANALYSIS_TIMEOUT_SECS")
            .and_then(|val| val.parse::<u64>().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS)
            .max(MIN_TIMEOUT_SECS);
        let source = match non_empty("ANALYSIS_SOURCE")
            .map(|val| val.to_lowercase())
            .as_deref()
        {
            Some("demo") | Some("fake") => AnalysisSource::Demo,
            _ => AnalysisSource::Service,
        };
        let save_annotated = non_empty("SAVE_ANNOTATED")
            .and_then(|val| parse_bool(&val))
            .unwrap_or(true);
        let export_dir = non_empty("HEATMAP_EXPORT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from("."));

        Self {
            api_base_url,
            model_path,
            request_timeout: Duration::from_secs(timeout_secs),
            source,
            save_annotated,
            export_dir,
        }
    }

    pub fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.api_base_url, path.trim_start_matches('/'))
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
