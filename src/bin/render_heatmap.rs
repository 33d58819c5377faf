use std::fs;
use std::path::PathBuf;

use anyhow::Context;

use pitch_pulse::heatmap::{self, Palette, Point, Surface};
use pitch_pulse::mock_data::demo_players;

/// Usage: render_heatmap [points.json] [out.png]
///
/// `points.json` is an array of `{"x": .., "y": ..}` in 640x360 surface units. Without it the
/// first showcase player's trail is painted.
fn main() -> anyhow::Result<()> {
    let mut args = std::env::args().skip(1);
    let input = args.next().filter(|arg| arg != "-");
    let output = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("heatmap.png"));

    let points: Vec<Point> = match input {
        Some(path) => {
            let raw = fs::read_to_string(&path).with_context(|| format!("read {path}"))?;
            serde_json::from_str(&raw).with_context(|| format!("parse points in {path}"))?
        }
        None => demo_players()
            .into_iter()
            .next()
            .map(|p| p.heatmap)
            .unwrap_or_default(),
    };

    let img = heatmap::render_heatmap(&points, Surface::default(), &Palette::default());
    heatmap::save_png(&img, &output)?;
    eprintln!(
        "[INFO] Painted {} samples into {}",
        points.len(),
        output.display()
    );
    Ok(())
}
