use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen};
use image::RgbaImage;
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, Gauge, Paragraph};

use pitch_pulse::attributes::{attribute_bars, bar_glyphs};
use pitch_pulse::config::{AnalysisSource, AppConfig};
use pitch_pulse::display::{format_km, format_meters, format_speed, initials};
use pitch_pulse::gauge::SpeedGauge;
use pitch_pulse::heatmap::{self, Palette, Surface};
use pitch_pulse::normalize::NormalizedPlayer;
use pitch_pulse::pitch_widget::{fit_area, BitmapView};
use pitch_pulse::provider::spawn_analysis_provider;
use pitch_pulse::state::{apply_delta, AppState, Delta, ProviderCommand, Screen};

const ACCENT: Color = Color::Rgb(49, 232, 174);

struct App {
    state: AppState,
    cfg: AppConfig,
    should_quit: bool,
    cmd_tx: Option<mpsc::Sender<ProviderCommand>>,
    heatmap: Option<(String, RgbaImage)>,
}

impl App {
    fn new(cfg: AppConfig, cmd_tx: Option<mpsc::Sender<ProviderCommand>>) -> Self {
        let mut state = AppState::new();
        state.upload.save_annotated = cfg.save_annotated;
        if cfg.source == AnalysisSource::Demo {
            state.push_log("[INFO] Demo analysis source active");
        }
        Self {
            state,
            cfg,
            should_quit: false,
            cmd_tx,
            heatmap: None,
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.state.upload.active {
            self.on_upload_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Char('r') => self.state.toggle_screen(),
            KeyCode::Char('j') | KeyCode::Down => self.state.select_next(),
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('o') | KeyCode::Char('O') => self.state.open_upload(),
            KeyCode::Char('v') | KeyCode::Char('V') => self.state.toggle_save_annotated(),
            KeyCode::Char('h') | KeyCode::Char('H') => self.send(ProviderCommand::CheckHealth),
            KeyCode::Char('e') | KeyCode::Char('E') => self.export_heatmap(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            _ => {}
        }
    }

    fn on_upload_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.state.cancel_upload(),
            KeyCode::Enter => {
                if let Some(cmd) = self.state.submit_upload() {
                    self.send(cmd);
                }
            }
            KeyCode::Backspace => {
                self.state.upload.input.pop();
            }
            KeyCode::Char(c) => self.state.upload.input.push(c),
            _ => {}
        }
    }

    fn send(&mut self, cmd: ProviderCommand) {
        let Some(tx) = &self.cmd_tx else {
            self.state.push_log("[INFO] Analysis provider unavailable");
            return;
        };
        if tx.send(cmd).is_err() {
            self.state.push_log("[WARN] Analysis provider stopped");
        }
    }

    fn refresh_heatmap(&mut self) {
        let Some(player) = self.state.selected_demo_player() else {
            self.heatmap = None;
            return;
        };
        if self.heatmap.as_ref().is_some_and(|(id, _)| id == player.id) {
            return;
        }
        let img = heatmap::render_heatmap(&player.heatmap, Surface::default(), &Palette::default());
        self.heatmap = Some((player.id.to_string(), img));
    }

    fn export_heatmap(&mut self) {
        self.refresh_heatmap();
        let Some((id, img)) = &self.heatmap else {
            self.state.push_log("[INFO] No heatmap to export");
            return;
        };
        let path = self.cfg.export_dir.join(format!("heatmap_{id}.png"));
        match heatmap::save_png(img, &path) {
            Ok(()) => self
                .state
                .push_log(format!("[INFO] Heatmap saved to {}", path.display())),
            Err(err) => self.state.push_log(format!("[WARN] Heatmap export: {err:#}")),
        }
    }
}

fn main() -> io::Result<()> {
    let cfg = AppConfig::load();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let (tx, rx) = mpsc::channel();
    let (cmd_tx, cmd_rx) = mpsc::channel();
    spawn_analysis_provider(cfg.clone(), tx, cmd_rx);

    let mut app = App::new(cfg, Some(cmd_tx));
    let res = run_app(&mut terminal, &mut app, rx);

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }
        app.refresh_heatmap();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)?
            && let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
        {
            app.on_key(key);
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(1),
        ])
        .split(frame.size());

    let header = Paragraph::new(header_text(&app.state))
        .block(Block::default().borders(Borders::BOTTOM));
    frame.render_widget(header, chunks[0]);

    match app.state.screen {
        Screen::Dashboard => render_dashboard(frame, chunks[1], app),
        Screen::Ratings => render_ratings(frame, chunks[1], &app.state),
    }

    let console = Paragraph::new(console_text(&app.state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(&app.state)).style(Style::default().fg(Color::DarkGray));
    frame.render_widget(footer, chunks[3]);

    if app.state.upload.active {
        render_upload_prompt(frame, frame.size(), &app.state);
    }
    if app.state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn header_text(state: &AppState) -> String {
    let screen = match state.screen {
        Screen::Dashboard => "LIVE MATCH INSIGHT",
        Screen::Ratings => "RATINGS FROM YOUR UPLOAD",
    };
    let status = if state.analysis_loading {
        "Processing…".to_string()
    } else if let Some(at) = state.analyzed_at {
        format!("Analyzed {}", at.format("%H:%M:%S"))
    } else {
        "No upload yet".to_string()
    };
    let line1 = format!("  ( )  PITCH PULSE | {screen} | {status}");
    let line2 = " /_|_\\ Player pulse, plays, and pitch control.".to_string();
    format!("{line1}\n{line2}")
}

fn footer_text(state: &AppState) -> String {
    if state.upload.active {
        return "Enter Analyze | Esc Cancel | Backspace Delete".to_string();
    }
    match state.screen {
        Screen::Dashboard => {
            "Tab Ratings | j/k Player | o Upload | v Annotated | e Export heatmap | h Health | ? Help | q Quit".to_string()
        }
        Screen::Ratings => {
            "Tab Dashboard | j/k Player | o Upload | v Annotated | h Health | ? Help | q Quit".to_string()
        }
    }
}

fn render_dashboard(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(8),
            Constraint::Length(5),
            Constraint::Min(3),
        ])
        .split(columns[0]);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(6), Constraint::Length(7), Constraint::Length(5)])
        .split(columns[1]);

    match state.selected_demo_player() {
        Some(player) => {
            let lines = vec![
                Line::from(vec![
                    Span::styled(
                        format!("[{}] ", initials(player.name)),
                        Style::default().fg(Color::Black).bg(ACCENT),
                    ),
                    Span::styled(player.name, Style::default().add_modifier(Modifier::BOLD)),
                    Span::raw(format!("  {} OVR", player.rating)),
                ]),
                Line::from(format!("{} - {}", player.position, player.team)),
                Line::from(""),
                Line::from(format!("Top speed  {}", format_speed(player.top_speed))),
                Line::from(format!("Avg speed  {}", format_speed(player.avg_speed))),
            ];
            let card = Paragraph::new(lines)
                .block(Block::default().title("Player").borders(Borders::ALL));
            frame.render_widget(card, left[0]);
            render_speed_gauge(frame, left[1], SpeedGauge::new(player.top_speed, player.avg_speed));
        }
        None => {
            let empty = Paragraph::new("No players")
                .block(Block::default().title("Player").borders(Borders::ALL));
            frame.render_widget(empty, left[0]);
        }
    }

    let squad: Vec<Line> = state
        .demo_players
        .iter()
        .enumerate()
        .map(|(idx, p)| {
            let prefix = if idx == state.selected { "> " } else { "  " };
            let style = if idx == state.selected {
                Style::default().fg(Color::White).bg(Color::DarkGray)
            } else {
                Style::default()
            };
            Line::styled(
                format!(
                    "{prefix}{:<14} {:<3} {:<5} {:>3}",
                    p.name, p.position, p.team, p.rating
                ),
                style,
            )
        })
        .collect();
    let squad = Paragraph::new(squad)
        .block(Block::default().title("Squad Snapshot").borders(Borders::ALL));
    frame.render_widget(squad, left[2]);

    let heat_block = Block::default().title("Heatmap").borders(Borders::ALL);
    let heat_inner = heat_block.inner(right[0]);
    frame.render_widget(heat_block, right[0]);
    if let Some((_, img)) = &app.heatmap {
        let target = fit_area(heat_inner, img.width(), img.height());
        frame.render_widget(BitmapView::new(img), target);
    }

    let events: Vec<Line> = state
        .events
        .iter()
        .map(|e| {
            let (r, g, b) = e.kind.color();
            let mut meta = format!("{} · {}", e.player, e.time);
            if let Some(speed) = e.speed {
                meta.push_str(&format!(" · {}", format_speed(speed)));
            }
            Line::from(vec![
                Span::styled(
                    format!(" {} ", &e.kind.label()[..1]),
                    Style::default().fg(Color::Black).bg(Color::Rgb(r, g, b)),
                ),
                Span::styled(
                    format!(" {:<7}", e.kind.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(meta),
            ])
        })
        .collect();
    let events = Paragraph::new(events)
        .block(Block::default().title("Events").borders(Borders::ALL));
    frame.render_widget(events, right[1]);

    render_upload_status(frame, right[2], state);
}

fn render_speed_gauge(frame: &mut Frame, area: Rect, gauge: SpeedGauge) {
    let block = Block::default().title("Speed pulse").borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if inner.height == 0 {
        return;
    }
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Min(1)])
        .split(inner);
    let label = format!(
        "{}   Avg {}",
        format_speed(gauge.top_speed),
        format_speed(gauge.avg_speed)
    );
    frame.render_widget(Paragraph::new(label), rows[0]);
    let bar = Gauge::default()
        .gauge_style(Style::default().fg(ACCENT).bg(Color::Rgb(15, 42, 68)))
        .percent(gauge.percent_u16())
        .label(format!("{:.0}%", gauge.percent));
    frame.render_widget(bar, rows[1]);
}

fn render_upload_status(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();
    let annotated = if state.upload.save_annotated { "on" } else { "off" };
    let status = if state.analysis_loading {
        "Processing…".to_string()
    } else {
        match &state.upload.last_video {
            Some(video) => format!("Last: {video}"),
            None => "Press o to upload a match clip".to_string(),
        }
    };
    lines.push(Line::from(format!("{status}  (annotated video: {annotated})")));
    if let Some(err) = &state.analysis_error {
        lines.push(Line::styled(err.clone(), Style::default().fg(Color::Red)));
    }
    lines.extend(artifact_lines(state));
    let panel = Paragraph::new(lines)
        .block(Block::default().title("Upload").borders(Borders::ALL));
    frame.render_widget(panel, area);
}

fn artifact_lines(state: &AppState) -> Vec<Line<'static>> {
    let artifacts = &state.snapshot.artifacts;
    let mut lines = Vec::new();
    let dim = Style::default().fg(Color::DarkGray);
    if let Some(path) = &artifacts.ratings_path {
        lines.push(Line::styled(format!("Ratings: {path}"), dim));
    }
    if let Some(path) = &artifacts.metrics_path {
        lines.push(Line::styled(format!("Metrics: {path}"), dim));
    }
    if let Some(path) = &artifacts.annotated_video_path {
        lines.push(Line::styled(format!("Annotated: {path}"), dim));
    }
    lines
}

fn render_ratings(frame: &mut Frame, area: Rect, state: &AppState) {
    let players = state.players();
    if players.is_empty() {
        let msg = if state.analysis_loading {
            "Processing upload…"
        } else {
            "No ratings yet. Press o to analyze a match video."
        };
        let empty = Paragraph::new(msg)
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().title("Ratings").borders(Borders::ALL));
        frame.render_widget(empty, area);
        return;
    }

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Min(40), Constraint::Length(38)])
        .split(area);

    let block = Block::default()
        .title("Ratings from your upload · FIFA 0-99 scale")
        .borders(Borders::ALL);
    let inner = block.inner(columns[0]);
    frame.render_widget(block, columns[0]);

    let mut lines = vec![Line::styled(
        format!(
            "  {:<10} {:<10} {:>3} {:>9} {:>9} {:>9}  Attributes",
            "Player", "", "OVR", "Top", "Avg", "Distance"
        ),
        Style::default().add_modifier(Modifier::BOLD),
    )];
    let visible = inner.height.saturating_sub(1) as usize;
    let (start, end) = visible_range(state.ratings_selected, players.len(), visible);
    for (idx, player) in players.iter().enumerate().take(end).skip(start) {
        lines.push(rating_row(player, idx == state.ratings_selected));
    }
    frame.render_widget(Paragraph::new(lines), inner);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(8), Constraint::Length(5), Constraint::Length(5)])
        .split(columns[1]);
    if let Some(player) = state.selected_rated_player() {
        render_rated_card(frame, right[0], player);
        render_speed_gauge(frame, right[1], SpeedGauge::new(player.top_speed, player.avg_speed));
    }
    render_upload_status(frame, right[2], state);
}

fn rating_row(player: &NormalizedPlayer, selected: bool) -> Line<'static> {
    let prefix = if selected { "> " } else { "  " };
    let bars = attribute_bars(player.subratings.as_ref())
        .into_iter()
        .map(|bar| format!("{} {} {:>3}", bar.code, bar_glyphs(bar.fill_percent, 5), bar.value))
        .collect::<Vec<_>>()
        .join("  ");
    let text = format!(
        "{prefix}{:<10} {:<10} {:>3} {:>9} {:>9} {:>9}  {bars}",
        player.display_name,
        format!("{} - {}", player.position, player.team),
        player.overall_rating,
        format_speed(player.top_speed),
        format_speed(player.avg_speed),
        format_meters(player.distance),
    );
    let style = if selected {
        Style::default().fg(Color::White).bg(Color::DarkGray)
    } else {
        Style::default()
    };
    Line::styled(text, style)
}

fn render_rated_card(frame: &mut Frame, area: Rect, player: &NormalizedPlayer) {
    let mut lines = vec![
        Line::from(vec![
            Span::styled(
                format!("[{}] ", initials(&player.display_name)),
                Style::default().fg(Color::Black).bg(ACCENT),
            ),
            Span::styled(
                player.display_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
            Span::raw(format!("  {} OVR", player.overall_rating)),
        ]),
        Line::from(format!("{} - {} · id {}", player.position, player.team, player.id)),
        Line::from(format!("Top speed  {}", format_speed(player.top_speed))),
        Line::from(format!("Avg speed  {}", format_speed(player.avg_speed))),
        Line::from(format!("Distance   {}", format_km(player.distance))),
    ];
    if let Some(subs) = &player.subratings {
        let text = subs
            .iter()
            .map(|(code, value)| format!("{code}: {}", (value + 0.5).floor()))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(Line::styled(text, Style::default().fg(ACCENT)));
    }
    let card = Paragraph::new(lines).block(Block::default().title("Player").borders(Borders::ALL));
    frame.render_widget(card, area);
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let start = state.logs.len().saturating_sub(3);
    state
        .logs
        .iter()
        .skip(start)
        .cloned()
        .collect::<Vec<_>>()
        .join("\n")
}

fn render_upload_prompt(frame: &mut Frame, area: Rect, state: &AppState) {
    let popup = centered_rect(60, 30, area);
    frame.render_widget(Clear, popup);
    let annotated = if state.upload.save_annotated { "yes" } else { "no" };
    let text = format!(
        "Bring your own match: path to a video (mp4, mov, mkv)\n\n> {}_\n\nSave annotated video: {annotated} (toggle with v outside this prompt)",
        state.upload.input
    );
    let prompt = Paragraph::new(text)
        .block(Block::default().title("Upload").borders(Borders::ALL));
    frame.render_widget(prompt, popup);
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 60, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Pitch Pulse - Help",
        "",
        "Global:",
        "  Tab / r      Dashboard <-> Ratings",
        "  j/k or ↑/↓   Select player",
        "  o            Upload a video for analysis",
        "  v            Toggle saving the annotated video",
        "  h            Check analysis service health",
        "  e            Export heatmap as PNG",
        "  ?            Toggle help",
        "  q            Quit",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
