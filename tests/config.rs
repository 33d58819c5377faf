use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use pitch_pulse::config::{AnalysisSource, AppConfig};

fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    AppConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_without_environment() {
    let cfg = config_from(&[]);
    assert_eq!(cfg.api_base_url, "http://localhost:8000");
    assert_eq!(cfg.model_path, "yolov8n.pt");
    assert_eq!(cfg.request_timeout, Duration::from_secs(600));
    assert_eq!(cfg.source, AnalysisSource::Service);
    assert!(cfg.save_annotated);
    assert_eq!(cfg.export_dir, PathBuf::from("."));
}

#[test]
fn overrides_are_parsed_and_bounded() {
    let cfg = config_from(&[
        ("ANALYSIS_API_URL", "http://analysis:9000/"),
        ("ANALYSIS_TIMEOUT_SECS", "2"),
        ("ANALYSIS_SOURCE", "Demo"),
        ("SAVE_ANNOTATED", "no"),
        ("HEATMAP_EXPORT_DIR", "exports"),
    ]);
    assert_eq!(cfg.api_base_url, "http://analysis:9000");
    assert_eq!(cfg.endpoint("analyze"), "http://analysis:9000/analyze");
    assert_eq!(cfg.request_timeout, Duration::from_secs(10));
    assert_eq!(cfg.source, AnalysisSource::Demo);
    assert!(!cfg.save_annotated);
    assert_eq!(cfg.export_dir, PathBuf::from("exports"));
}

#[test]
fn blank_or_garbage_values_fall_back_to_defaults() {
    let cfg = config_from(&[
        ("ANALYSIS_API_URL", "   "),
        ("ANALYSIS_TIMEOUT_SECS", "soon"),
        ("SAVE_ANNOTATED", "maybe"),
    ]);
    assert_eq!(cfg.api_base_url, "http://localhost:8000");
    assert_eq!(cfg.request_timeout, Duration::from_secs(600));
    assert!(cfg.save_annotated);
}
