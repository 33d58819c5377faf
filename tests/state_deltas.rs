use std::path::PathBuf;

use pitch_pulse::analysis_fetch::parse_analysis_json;
use pitch_pulse::normalize::AnalysisPayload;
use pitch_pulse::state::{AppState, Delta, ProviderCommand, Screen, apply_delta};

fn payload(raw: &str) -> Box<AnalysisPayload> {
    Box::new(parse_analysis_json(raw).expect("payload should parse"))
}

fn two_players() -> Box<AnalysisPayload> {
    payload(
        r#"{"ratings": {"a": {"overall": 80}, "b": {"overall": 70}},
            "ratings_path": "uploads/x/ratings.json"}"#,
    )
}

#[test]
fn successful_analysis_replaces_snapshot() {
    let mut state = AppState::new();
    apply_delta(
        &mut state,
        Delta::AnalysisStarted {
            video: "clip.mp4".to_string(),
        },
    );
    assert!(state.analysis_loading);

    apply_delta(&mut state, Delta::AnalysisReady(two_players()));
    assert!(!state.analysis_loading);
    assert_eq!(state.players().len(), 2);
    assert_eq!(state.screen, Screen::Ratings);
    assert!(state.analyzed_at.is_some());
    assert_eq!(
        state.snapshot.artifacts.ratings_path.as_deref(),
        Some("uploads/x/ratings.json")
    );
}

#[test]
fn new_analysis_is_not_merged_with_previous() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::AnalysisReady(two_players()));
    apply_delta(
        &mut state,
        Delta::AnalysisReady(payload(r#"{"ratings": {"c": {"overall": 60}}}"#)),
    );
    let ids: Vec<&str> = state.players().iter().map(|p| p.id.as_str()).collect();
    assert_eq!(ids, vec!["c"]);
    assert!(state.snapshot.artifacts.ratings_path.is_none());
}

#[test]
fn failure_keeps_last_good_snapshot() {
    let mut state = AppState::new();
    apply_delta(&mut state, Delta::AnalysisReady(two_players()));
    let before = state.snapshot.clone();

    apply_delta(
        &mut state,
        Delta::AnalysisStarted {
            video: "broken.mp4".to_string(),
        },
    );
    apply_delta(
        &mut state,
        Delta::AnalysisFailed("http 500: decoder crashed".to_string()),
    );
    assert_eq!(state.snapshot, before);
    assert!(!state.analysis_loading);
    assert_eq!(
        state.analysis_error.as_deref(),
        Some("http 500: decoder crashed")
    );
    assert!(state.logs.back().is_some_and(|l| l.starts_with("[WARN]")));

    apply_delta(&mut state, Delta::AnalysisReady(two_players()));
    assert!(state.analysis_error.is_none());
}

#[test]
fn upload_submit_requires_path_and_idle_provider() {
    let mut state = AppState::new();
    state.open_upload();
    assert!(state.submit_upload().is_none());

    state.upload.input = "  matches/final.mp4 ".to_string();
    let cmd = state.submit_upload();
    assert_eq!(
        cmd,
        Some(ProviderCommand::Analyze {
            video: PathBuf::from("matches/final.mp4"),
            save_annotated: true,
        })
    );
    assert!(!state.upload.active);
    assert!(state.upload.input.is_empty());

    state.analysis_loading = true;
    state.upload.input = "other.mp4".to_string();
    assert!(state.submit_upload().is_none());
}

#[test]
fn save_annotated_toggle_flows_into_command() {
    let mut state = AppState::new();
    state.toggle_save_annotated();
    state.upload.input = "clip.mov".to_string();
    assert!(matches!(
        state.submit_upload(),
        Some(ProviderCommand::Analyze {
            save_annotated: false,
            ..
        })
    ));
}

#[test]
fn selection_wraps_per_screen() {
    let mut state = AppState::new();
    let squad = state.demo_players.len();
    for _ in 0..squad {
        state.select_next();
    }
    assert_eq!(state.selected, 0);
    state.select_prev();
    assert_eq!(state.selected, squad - 1);

    state.toggle_screen();
    state.select_next();
    assert_eq!(state.ratings_selected, 0);
    assert!(state.selected_rated_player().is_none());
}

#[test]
fn heatmap_follows_selected_demo_player() {
    let mut state = AppState::new();
    let first = state.heatmap_points().to_vec();
    state.select_next();
    assert_ne!(state.heatmap_points(), first.as_slice());
    assert!(!state.heatmap_points().is_empty());
}

#[test]
fn console_log_is_bounded() {
    let mut state = AppState::new();
    for i in 0..250 {
        apply_delta(&mut state, Delta::Log(format!("[INFO] line {i}")));
    }
    assert_eq!(state.logs.len(), 200);
    assert_eq!(state.logs.front().map(String::as_str), Some("[INFO] line 50"));
}
