use std::collections::HashMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::combine::first_defined;

pub const POSITION_CYCLE: [Position; 4] = [Position::GK, Position::DF, Position::MF, Position::FW];
pub const UNASSIGNED_TEAM: &str = "Team";
pub const MAX_OVERALL: u8 = 99;

/// String-keyed mapping that keeps the order keys appeared in the source document.
/// Player order drives numbering and position assignment downstream.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderedMap<T> {
    entries: Vec<(String, T)>,
}

impl<T> OrderedMap<T> {
    pub fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Inserts or overwrites. An overwritten key keeps its original position.
    pub fn insert(&mut self, key: impl Into<String>, value: T) {
        let key = key.into();
        if let Some(slot) = self.entries.iter_mut().find(|(k, _)| *k == key) {
            slot.1 = value;
        } else {
            self.entries.push((key, value));
        }
    }

    pub fn get(&self, key: &str) -> Option<&T> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &T)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(k, _)| k.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<T> Default for OrderedMap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, T> FromIterator<(K, T)> for OrderedMap<T> {
    fn from_iter<I: IntoIterator<Item = (K, T)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<T: Serialize> Serialize for OrderedMap<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for OrderedMap<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct OrderedMapVisitor<T>(PhantomData<T>);

        impl<'de, T: Deserialize<'de>> Visitor<'de> for OrderedMapVisitor<T> {
            type Value = OrderedMap<T>;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map keyed by string")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
                let mut map = OrderedMap::new();
                while let Some((key, value)) = access.next_entry::<String, T>()? {
                    map.insert(key, value);
                }
                Ok(map)
            }
        }

        deserializer.deserialize_map(OrderedMapVisitor(PhantomData))
    }
}

/// Attribute code -> score, in the order the rating engine emitted them.
pub type Subratings = OrderedMap<f64>;

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct RawRatingEntry {
    pub overall: f64,
    #[serde(default)]
    pub subratings: Option<Subratings>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawMetricEntry {
    #[serde(default, rename = "team_id")]
    pub team_index: Option<f64>,
    #[serde(default, rename = "top_speed_mps")]
    pub top_speed: Option<f64>,
    #[serde(default, rename = "avg_speed_mps")]
    pub avg_speed: Option<f64>,
    #[serde(default, rename = "total_distance_m")]
    pub total_distance: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct RawFallbackEntry {
    #[serde(default, rename = "top_speed_mps")]
    pub top_speed: Option<f64>,
    #[serde(default, rename = "avg_speed_mps")]
    pub avg_speed: Option<f64>,
    #[serde(default, rename = "distance_m")]
    pub distance: Option<f64>,
}

/// Output paths the analysis service wrote; shown to the user verbatim.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Artifacts {
    pub ratings_path: Option<String>,
    pub metrics_path: Option<String>,
    pub annotated_video_path: Option<String>,
}

impl Artifacts {
    pub fn is_empty(&self) -> bool {
        self.ratings_path.is_none()
            && self.metrics_path.is_none()
            && self.annotated_video_path.is_none()
    }
}

/// One successful `/analyze` response, fully typed.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct AnalysisPayload {
    pub ratings: OrderedMap<RawRatingEntry>,
    #[serde(default, rename = "metrics_summary", deserialize_with = "map_or_default")]
    pub metrics: HashMap<String, RawMetricEntry>,
    #[serde(default, rename = "rating_inputs", deserialize_with = "map_or_default")]
    pub fallback: HashMap<String, RawFallbackEntry>,
    #[serde(default)]
    pub ratings_path: Option<String>,
    #[serde(default)]
    pub metrics_path: Option<String>,
    #[serde(default)]
    pub annotated_video_path: Option<String>,
}

impl AnalysisPayload {
    pub fn artifacts(&self) -> Artifacts {
        Artifacts {
            ratings_path: self.ratings_path.clone(),
            metrics_path: self.metrics_path.clone(),
            annotated_video_path: self.annotated_video_path.clone(),
        }
    }
}

fn map_or_default<'de, D, T>(deserializer: D) -> Result<HashMap<String, T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    let value = Option::<HashMap<String, T>>::deserialize(deserializer)?;
    Ok(value.unwrap_or_default())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Position {
    GK,
    DF,
    MF,
    FW,
}

impl Position {
    pub fn for_index(index: usize) -> Self {
        POSITION_CYCLE[index % POSITION_CYCLE.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Position::GK => "GK",
            Position::DF => "DF",
            Position::MF => "MF",
            Position::FW => "FW",
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NormalizedPlayer {
    pub id: String,
    pub display_name: String,
    pub position: Position,
    pub team: String,
    pub overall_rating: u8,
    pub top_speed: f64,
    pub avg_speed: f64,
    pub distance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subratings: Option<Subratings>,
}

/// Everything the dashboard shows for one analysis. Replaced as a whole, never patched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AnalysisSnapshot {
    pub players: Vec<NormalizedPlayer>,
    pub artifacts: Artifacts,
}

pub fn normalize_payload(payload: &AnalysisPayload) -> AnalysisSnapshot {
    AnalysisSnapshot {
        players: normalize_players(&payload.ratings, &payload.metrics, &payload.fallback),
        artifacts: payload.artifacts(),
    }
}

/// Merges ratings, tracked metrics and rating inputs into one record per rated player.
///
/// Only keys of `ratings` produce records; metric/fallback entries for unknown players are
/// ignored. Speeds and distance prefer `metrics`, then `fallback`, then 0.
pub fn normalize_players(
    ratings: &OrderedMap<RawRatingEntry>,
    metrics: &HashMap<String, RawMetricEntry>,
    fallback: &HashMap<String, RawFallbackEntry>,
) -> Vec<NormalizedPlayer> {
    ratings
        .iter()
        .enumerate()
        .map(|(idx, (id, rating))| {
            let metric = metrics.get(id);
            let backup = fallback.get(id);
            NormalizedPlayer {
                id: id.to_string(),
                display_name: format!("Player {}", idx + 1),
                position: Position::for_index(idx),
                team: team_label(metric.and_then(|m| m.team_index)),
                overall_rating: round_overall(rating.overall),
                top_speed: first_defined([
                    metric.and_then(|m| m.top_speed),
                    backup.and_then(|b| b.top_speed),
                ]),
                avg_speed: first_defined([
                    metric.and_then(|m| m.avg_speed),
                    backup.and_then(|b| b.avg_speed),
                ]),
                distance: first_defined([
                    metric.and_then(|m| m.total_distance),
                    backup.and_then(|b| b.distance),
                ]),
                subratings: rating.subratings.clone(),
            }
        })
        .collect()
}

pub fn team_label(team_index: Option<f64>) -> String {
    match team_index {
        Some(idx) if idx.is_finite() => format!("Team {}", idx + 1.0),
        _ => UNASSIGNED_TEAM.to_string(),
    }
}

/// Round half up (86.5 -> 87), then clamp onto the 0..=99 rating scale.
pub fn round_overall(overall: f64) -> u8 {
    if !overall.is_finite() {
        return 0;
    }
    (overall + 0.5).floor().clamp(0.0, MAX_OVERALL as f64) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounds_half_up() {
        assert_eq!(round_overall(86.5), 87);
        assert_eq!(round_overall(86.4), 86);
        assert_eq!(round_overall(85.6), 86);
    }

    #[test]
    fn rounding_stays_on_rating_scale() {
        assert_eq!(round_overall(-3.0), 0);
        assert_eq!(round_overall(104.2), 99);
        assert_eq!(round_overall(f64::NAN), 0);
    }

    #[test]
    fn team_label_is_one_based() {
        assert_eq!(team_label(Some(0.0)), "Team 1");
        assert_eq!(team_label(Some(1.0)), "Team 2");
        assert_eq!(team_label(None), "Team");
    }

    #[test]
    fn ordered_map_overwrite_keeps_first_position() {
        let mut map = OrderedMap::new();
        map.insert("b", 1);
        map.insert("a", 2);
        map.insert("b", 3);
        let pairs: Vec<_> = map.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        assert_eq!(pairs, vec![("b".to_string(), 3), ("a".to_string(), 2)]);
    }
}
