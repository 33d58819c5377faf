use crate::normalize::Subratings;

/// Attribute codes in grid order.
pub const ATTRIBUTE_ORDER: [&str; 5] = ["PAC", "SHO", "PAS", "DEF", "PHY"];

#[derive(Debug, Clone, PartialEq)]
pub struct AttributeBar {
    pub code: &'static str,
    pub fill_percent: f64,
    /// Rounded raw score as printed next to the bar (unclamped).
    pub value: i64,
}

/// One bar per attribute in [`ATTRIBUTE_ORDER`], so every row of the grid lines up.
/// Attributes missing from `subratings` (or no subratings at all) come out empty.
pub fn attribute_bars(subratings: Option<&Subratings>) -> Vec<AttributeBar> {
    ATTRIBUTE_ORDER
        .iter()
        .map(|&code| {
            let score = subratings.and_then(|s| s.get(code)).copied().unwrap_or(0.0);
            AttributeBar {
                code,
                fill_percent: fill_percent(score),
                value: if score.is_finite() {
                    (score + 0.5).floor() as i64
                } else {
                    0
                },
            }
        })
        .collect()
}

pub fn fill_percent(score: f64) -> f64 {
    if !score.is_finite() {
        return 0.0;
    }
    score.clamp(0.0, 100.0)
}

/// Text bar like `█████░░░░░` for terminal cells.
pub fn bar_glyphs(fill_percent: f64, width: usize) -> String {
    let filled = ((fill_percent / 100.0) * width as f64).round() as usize;
    let filled = filled.min(width);
    let mut out = String::with_capacity(width * 3);
    out.extend(std::iter::repeat_n('█', filled));
    out.extend(std::iter::repeat_n('░', width - filled));
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bar_glyphs_respect_width() {
        assert_eq!(bar_glyphs(0.0, 4), "░░░░");
        assert_eq!(bar_glyphs(50.0, 4), "██░░");
        assert_eq!(bar_glyphs(100.0, 4), "████");
    }
}
