pub fn format_speed(mps: f64) -> String {
    format!("{mps:.1} m/s")
}

/// Short distance label for the ratings grid: meters below 1 km, kilometers above.
pub fn format_meters(meters: f64) -> String {
    if meters.abs() >= 1000.0 {
        format!("{:.2} km", meters / 1000.0)
    } else {
        format!("{meters:.0} m")
    }
}

pub fn format_km(meters: f64) -> String {
    format!("{:.2} km", meters / 1000.0)
}

/// First letter of each whitespace-separated word, e.g. "Amina Duarte" -> "AD".
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_speeds_and_distances() {
        assert_eq!(format_speed(8.24), "8.2 m/s");
        assert_eq!(format_meters(842.4), "842 m");
        assert_eq!(format_meters(10432.0), "10.43 km");
        assert_eq!(format_km(9500.0), "9.50 km");
    }

    #[test]
    fn initials_skip_extra_spaces() {
        assert_eq!(initials("Amina Duarte"), "AD");
        assert_eq!(initials("  Riku   Tan "), "RT");
        assert_eq!(initials("Player 3"), "P3");
    }
}
