/// Top speed (m/s) that fills the gauge. Chosen for visual calibration; practically unreachable.
pub const REFERENCE_SPEED_MPS: f64 = 10.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpeedGauge {
    pub top_speed: f64,
    /// Shown next to the gauge as-is; never scaled or clamped.
    pub avg_speed: f64,
    pub percent: f64,
}

impl SpeedGauge {
    pub fn new(top_speed: f64, avg_speed: f64) -> Self {
        Self {
            top_speed,
            avg_speed,
            percent: speed_gauge_percent(top_speed),
        }
    }

    /// Integer percentage for widgets that take whole numbers.
    pub fn percent_u16(&self) -> u16 {
        self.percent.round() as u16
    }
}

pub fn speed_gauge_percent(speed: f64) -> f64 {
    if !speed.is_finite() {
        return 0.0;
    }
    (speed / REFERENCE_SPEED_MPS * 100.0).clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_speed_fills_gauge() {
        assert_eq!(speed_gauge_percent(10.0), 100.0);
        assert_eq!(speed_gauge_percent(15.0), 100.0);
        assert_eq!(speed_gauge_percent(0.0), 0.0);
        assert!((speed_gauge_percent(8.2) - 82.0).abs() < 1e-9);
    }

    #[test]
    fn negative_and_non_finite_speeds_read_empty() {
        assert_eq!(speed_gauge_percent(-2.0), 0.0);
        assert_eq!(speed_gauge_percent(f64::NAN), 0.0);
        assert_eq!(speed_gauge_percent(f64::INFINITY), 0.0);
    }

    #[test]
    fn average_speed_is_not_scaled() {
        let gauge = SpeedGauge::new(12.0, 11.3);
        assert_eq!(gauge.percent_u16(), 100);
        assert_eq!(gauge.avg_speed, 11.3);
    }
}
