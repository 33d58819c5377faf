use crate::heatmap::Point;

/// Showcase player displayed before the first upload.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoPlayer {
    pub id: &'static str,
    pub name: &'static str,
    pub position: &'static str,
    pub rating: u8,
    pub team: &'static str,
    pub top_speed: f64,
    pub avg_speed: f64,
    pub heatmap: Vec<Point>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchEventKind {
    Pass,
    Shot,
    Tackle,
}

impl MatchEventKind {
    pub fn label(self) -> &'static str {
        match self {
            MatchEventKind::Pass => "Pass",
            MatchEventKind::Shot => "Shot",
            MatchEventKind::Tackle => "Tackle",
        }
    }

    /// Badge color as RGB.
    pub fn color(self) -> (u8, u8, u8) {
        match self {
            MatchEventKind::Pass => (0x31, 0xe8, 0xae),
            MatchEventKind::Shot => (0xff, 0x7f, 0x50),
            MatchEventKind::Tackle => (0x5f, 0x8b, 0xff),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MatchEvent {
    pub id: String,
    pub time: &'static str,
    pub kind: MatchEventKind,
    pub player: &'static str,
    pub speed: Option<f64>,
}

fn trail(points: &[(f64, f64)]) -> Vec<Point> {
    points.iter().map(|&(x, y)| Point::new(x, y)).collect()
}

pub fn demo_players() -> Vec<DemoPlayer> {
    vec![
        DemoPlayer {
            id: "p1",
            name: "Amina Duarte",
            position: "CM",
            rating: 86,
            team: "Home",
            top_speed: 8.2,
            avg_speed: 6.1,
            heatmap: trail(&[
                (120.0, 80.0),
                (200.0, 120.0),
                (260.0, 200.0),
                (320.0, 140.0),
                (420.0, 190.0),
                (520.0, 120.0),
            ]),
        },
        DemoPlayer {
            id: "p2",
            name: "Leo Kruger",
            position: "ST",
            rating: 90,
            team: "Home",
            top_speed: 9.4,
            avg_speed: 7.2,
            heatmap: trail(&[
                (320.0, 90.0),
                (360.0, 120.0),
                (400.0, 160.0),
                (460.0, 190.0),
                (520.0, 210.0),
            ]),
        },
        DemoPlayer {
            id: "p3",
            name: "Riku Tan",
            position: "CB",
            rating: 82,
            team: "Away",
            top_speed: 7.2,
            avg_speed: 5.9,
            heatmap: trail(&[(140.0, 240.0), (180.0, 260.0), (220.0, 240.0), (260.0, 220.0)]),
        },
    ]
}

pub fn demo_events() -> Vec<MatchEvent> {
    let rows = [
        ("12:04", MatchEventKind::Pass, "Amina Duarte", Some(6.2)),
        ("23:18", MatchEventKind::Shot, "Leo Kruger", Some(7.8)),
        ("30:45", MatchEventKind::Tackle, "Riku Tan", None),
        ("55:10", MatchEventKind::Pass, "Amina Duarte", Some(6.5)),
        ("71:33", MatchEventKind::Shot, "Leo Kruger", Some(8.1)),
    ];
    rows.into_iter()
        .enumerate()
        .map(|(idx, (time, kind, player, speed))| MatchEvent {
            id: format!("evt-{}", idx + 1),
            time,
            kind,
            player,
            speed,
        })
        .collect()
}
