use std::collections::VecDeque;
use std::path::PathBuf;

use chrono::{DateTime, Local};

use crate::heatmap::Point;
use crate::mock_data::{self, DemoPlayer, MatchEvent};
use crate::normalize::{AnalysisPayload, AnalysisSnapshot, NormalizedPlayer, normalize_payload};

const MAX_LOGS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Dashboard,
    Ratings,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCommand {
    Analyze { video: PathBuf, save_annotated: bool },
    CheckHealth,
}

#[derive(Debug, Clone)]
pub enum Delta {
    AnalysisStarted { video: String },
    AnalysisReady(Box<AnalysisPayload>),
    AnalysisFailed(String),
    Health(String),
    Log(String),
}

#[derive(Debug, Clone, Default)]
pub struct UploadForm {
    pub active: bool,
    pub input: String,
    pub save_annotated: bool,
    pub last_video: Option<String>,
}

#[derive(Debug, Clone)]
pub struct AppState {
    pub screen: Screen,
    /// Latest successful analysis. Only ever swapped whole.
    pub snapshot: AnalysisSnapshot,
    pub analysis_loading: bool,
    pub analysis_error: Option<String>,
    pub analyzed_at: Option<DateTime<Local>>,
    pub demo_players: Vec<DemoPlayer>,
    pub events: Vec<MatchEvent>,
    pub selected: usize,
    pub ratings_selected: usize,
    pub upload: UploadForm,
    pub help_overlay: bool,
    pub logs: VecDeque<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl AppState {
    pub fn new() -> Self {
        Self {
            screen: Screen::Dashboard,
            snapshot: AnalysisSnapshot::default(),
            analysis_loading: false,
            analysis_error: None,
            analyzed_at: None,
            demo_players: mock_data::demo_players(),
            events: mock_data::demo_events(),
            selected: 0,
            ratings_selected: 0,
            upload: UploadForm {
                save_annotated: true,
                ..UploadForm::default()
            },
            help_overlay: false,
            logs: VecDeque::new(),
        }
    }

    pub fn push_log(&mut self, msg: impl Into<String>) {
        self.logs.push_back(msg.into());
        while self.logs.len() > MAX_LOGS {
            self.logs.pop_front();
        }
    }

    pub fn players(&self) -> &[NormalizedPlayer] {
        &self.snapshot.players
    }

    pub fn selected_demo_player(&self) -> Option<&DemoPlayer> {
        self.demo_players.get(self.selected)
    }

    pub fn selected_rated_player(&self) -> Option<&NormalizedPlayer> {
        self.snapshot.players.get(self.ratings_selected)
    }

    /// Samples for the heatmap panel: the selected showcase player's trail.
    pub fn heatmap_points(&self) -> &[Point] {
        self.selected_demo_player()
            .map(|p| p.heatmap.as_slice())
            .unwrap_or(&[])
    }

    pub fn toggle_screen(&mut self) {
        self.screen = match self.screen {
            Screen::Dashboard => Screen::Ratings,
            Screen::Ratings => Screen::Dashboard,
        };
    }

    pub fn select_next(&mut self) {
        let (cursor, total) = self.cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = (*cursor + 1) % total;
    }

    pub fn select_prev(&mut self) {
        let (cursor, total) = self.cursor_mut();
        if total == 0 {
            *cursor = 0;
            return;
        }
        *cursor = if *cursor == 0 { total - 1 } else { *cursor - 1 };
    }

    fn cursor_mut(&mut self) -> (&mut usize, usize) {
        match self.screen {
            Screen::Dashboard => (&mut self.selected, self.demo_players.len()),
            Screen::Ratings => (&mut self.ratings_selected, self.snapshot.players.len()),
        }
    }

    pub fn open_upload(&mut self) {
        self.upload.active = true;
    }

    pub fn cancel_upload(&mut self) {
        self.upload.active = false;
        self.upload.input.clear();
    }

    pub fn toggle_save_annotated(&mut self) {
        self.upload.save_annotated = !self.upload.save_annotated;
        let label = if self.upload.save_annotated { "on" } else { "off" };
        self.push_log(format!("[INFO] Save annotated video: {label}"));
    }

    /// Turns the typed path into an analyze command. Returns `None` (and logs why) when the
    /// path is empty or an analysis is already running.
    pub fn submit_upload(&mut self) -> Option<ProviderCommand> {
        if self.analysis_loading {
            self.push_log("[INFO] Analysis already running");
            return None;
        }
        let raw = self.upload.input.trim().to_string();
        if raw.is_empty() {
            self.push_log("[INFO] No video selected");
            return None;
        }
        self.upload.active = false;
        self.upload.input.clear();
        self.upload.last_video = Some(raw.clone());
        Some(ProviderCommand::Analyze {
            video: PathBuf::from(raw),
            save_annotated: self.upload.save_annotated,
        })
    }
}

pub fn apply_delta(state: &mut AppState, delta: Delta) {
    match delta {
        Delta::AnalysisStarted { video } => {
            state.analysis_loading = true;
            state.analysis_error = None;
            state.push_log(format!("[INFO] Analyzing {video}"));
        }
        Delta::AnalysisReady(payload) => {
            state.snapshot = normalize_payload(&payload);
            state.analysis_loading = false;
            state.analysis_error = None;
            state.analyzed_at = Some(Local::now());
            state.ratings_selected = 0;
            state.screen = Screen::Ratings;
            let count = state.snapshot.players.len();
            state.push_log(format!("[INFO] Analysis ready: {count} players rated"));
        }
        Delta::AnalysisFailed(msg) => {
            // The previous snapshot stays on screen.
            state.analysis_loading = false;
            state.push_log(format!("[WARN] Analysis failed: {msg}"));
            state.analysis_error = Some(msg);
        }
        Delta::Health(status) => state.push_log(format!("[INFO] Analysis service: {status}")),
        Delta::Log(msg) => state.push_log(msg),
    }
}
