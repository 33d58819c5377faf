use pitch_pulse::attributes::{attribute_bars, ATTRIBUTE_ORDER};
use pitch_pulse::gauge::{speed_gauge_percent, SpeedGauge};
use pitch_pulse::normalize::Subratings;

#[test]
fn speed_gauge_scales_against_reference_speed() {
    assert_eq!(speed_gauge_percent(10.0), 100.0);
    assert_eq!(speed_gauge_percent(15.0), 100.0);
    assert_eq!(speed_gauge_percent(0.0), 0.0);
    assert!((speed_gauge_percent(7.2) - 72.0).abs() < 1e-9);
}

#[test]
fn gauge_keeps_average_speed_verbatim() {
    let gauge = SpeedGauge::new(9.4, 7.2);
    assert_eq!(gauge.avg_speed, 7.2);
    assert_eq!(gauge.percent_u16(), 94);
}

#[test]
fn attribute_bars_use_fixed_order() {
    let subs: Subratings = [("PHY", 70.0), ("PAC", 88.0)].into_iter().collect();
    let bars = attribute_bars(Some(&subs));
    let codes: Vec<&str> = bars.iter().map(|b| b.code).collect();
    assert_eq!(codes, ATTRIBUTE_ORDER.to_vec());
    assert_eq!(bars[0].fill_percent, 88.0);
    assert_eq!(bars[4].fill_percent, 70.0);
}

#[test]
fn missing_attributes_render_empty_bars() {
    let subs: Subratings = [("PAC", 91.0)].into_iter().collect();
    let bars = attribute_bars(Some(&subs));
    assert_eq!(bars.len(), 5);
    assert!(bars[1..].iter().all(|b| b.fill_percent == 0.0 && b.value == 0));

    let none = attribute_bars(None);
    assert_eq!(none.len(), 5);
    assert!(none.iter().all(|b| b.fill_percent == 0.0));
}

#[test]
fn out_of_range_scores_are_clamped_for_fill_only() {
    let subs: Subratings = [("PAC", 120.0), ("DEF", -5.0), ("SHO", 64.5)].into_iter().collect();
    let bars = attribute_bars(Some(&subs));
    assert_eq!(bars[0].fill_percent, 100.0);
    assert_eq!(bars[0].value, 120);
    assert_eq!(bars[3].fill_percent, 0.0);
    assert_eq!(bars[1].value, 65);
}
