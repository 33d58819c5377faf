use rand::Rng;

use crate::attributes::ATTRIBUTE_ORDER;
use crate::normalize::{
    AnalysisPayload, OrderedMap, RawFallbackEntry, RawMetricEntry, RawRatingEntry, Subratings,
};

const DEMO_TRACKS: usize = 10;

/// Synthetic `/analyze` response shaped like the service's output, including its gaps: some
/// tracks miss tracked metrics (only rating inputs), some miss team assignment, one has no
/// subratings at all.
pub fn synthetic_payload<R: Rng>(rng: &mut R, video_name: &str) -> AnalysisPayload {
    let mut ratings = OrderedMap::new();
    let mut payload = AnalysisPayload::default();

    for slot in 0..DEMO_TRACKS {
        // Tracker ids are sparse and unordered.
        let id = format!("{}", 3 + slot * 4 + rng.gen_range(0..3));
        let subratings = if slot == DEMO_TRACKS - 1 {
            None
        } else {
            Some(
                ATTRIBUTE_ORDER
                    .iter()
                    .map(|code| (*code, round2(rng.gen_range(35.0..96.0))))
                    .collect::<Subratings>(),
            )
        };
        let overall = subratings
            .as_ref()
            .map(|subs| subs.iter().map(|(_, v)| *v).sum::<f64>() / subs.len() as f64)
            .unwrap_or_else(|| rng.gen_range(50.0..70.0));
        ratings.insert(
            id.clone(),
            RawRatingEntry {
                overall: round2(overall),
                subratings,
            },
        );

        let top_speed = round2(rng.gen_range(5.5..9.8));
        let avg_speed = round2(rng.gen_range(2.0..4.5));
        let distance = round2(rng.gen_range(300.0..2400.0));
        if slot % 5 == 3 {
            payload.fallback.insert(
                id,
                RawFallbackEntry {
                    top_speed: Some(top_speed),
                    avg_speed: Some(avg_speed),
                    distance: Some(distance),
                },
            );
            continue;
        }
        let team_index = if slot % 7 == 6 {
            None
        } else {
            Some((slot % 2) as f64)
        };
        payload.metrics.insert(
            id,
            RawMetricEntry {
                team_index,
                top_speed: Some(top_speed),
                avg_speed: Some(avg_speed),
                total_distance: Some(distance),
            },
        );
    }

    payload.ratings = ratings;
    payload.ratings_path = Some(format!("uploads/{video_name}/ratings.json"));
    payload.metrics_path = Some(format!("uploads/{video_name}/metrics.json"));
    payload
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
