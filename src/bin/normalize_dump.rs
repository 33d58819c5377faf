use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use pitch_pulse::analysis_fetch::parse_analysis_json;
use pitch_pulse::normalize::normalize_payload;

// Reads a saved /analyze response and prints the canonical player records as JSON.
fn main() -> anyhow::Result<()> {
    let path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("tests/fixtures/analysis_response.json"));

    let raw = fs::read_to_string(&path).with_context(|| format!("read {}", path.display()))?;
    let payload = parse_analysis_json(&raw)?;
    let snapshot = normalize_payload(&payload);

    let dropped = payload
        .metrics
        .keys()
        .chain(payload.fallback.keys())
        .filter(|id| payload.ratings.get(id).is_none())
        .count();
    if dropped > 0 {
        eprintln!("[WARN] {dropped} metric entries have no rating and were skipped");
    }

    println!("{}", serde_json::to_string_pretty(&snapshot.players)?);
    if !snapshot.artifacts.is_empty() {
        eprintln!("[INFO] Artifacts: {}", serde_json::to_string(&snapshot.artifacts)?);
    }
    Ok(())
}
