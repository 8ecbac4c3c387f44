//! WHO growth reference data (simplified 50th percentile, months 0-12).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Measure {
    Weight,
    Height,
}

pub const WHO_WEIGHT_BOYS: [f64; 13] = [
    3.3, 4.5, 5.6, 6.4, 7.0, 7.5, 7.9, 8.3, 8.6, 8.9, 9.2, 9.4, 9.6,
];
pub const WHO_WEIGHT_GIRLS: [f64; 13] = [
    3.2, 4.2, 5.1, 5.8, 6.4, 6.9, 7.3, 7.6, 7.9, 8.2, 8.5, 8.7, 8.9,
];
pub const WHO_HEIGHT_BOYS: [f64; 13] = [
    49.9, 54.7, 58.4, 61.4, 63.9, 65.9, 67.6, 69.2, 70.6, 72.0, 73.3, 74.5, 75.7,
];
pub const WHO_HEIGHT_GIRLS: [f64; 13] = [
    49.1, 53.7, 57.1, 59.8, 62.1, 64.0, 65.7, 67.3, 68.7, 70.1, 71.5, 72.8, 74.0,
];

/// Approximate percentile against the WHO 50th-percentile reference:
/// `clamp(50 + 2 * percent_diff_from_expected, 1, 99)`.
/// Ages past 12 months use the 12-month reference value; an unknown
/// gender falls back to the boys table.
pub fn percentile(value: f64, age_months: i64, measure: Measure, gender: Option<&str>) -> i32 {
    let table = match (measure, gender) {
        (Measure::Weight, Some("female")) => &WHO_WEIGHT_GIRLS,
        (Measure::Weight, _) => &WHO_WEIGHT_BOYS,
        (Measure::Height, Some("female")) => &WHO_HEIGHT_GIRLS,
        (Measure::Height, _) => &WHO_HEIGHT_BOYS,
    };
    let month = age_months.clamp(0, 12) as usize;
    let expected = table[month];
    let diff = (value - expected) / expected * 100.0;
    (50.0 + diff * 2.0).clamp(1.0, 99.0).round() as i32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expected_value_is_50th() {
        assert_eq!(percentile(7.9, 6, Measure::Weight, Some("male")), 50);
        assert_eq!(percentile(64.0, 5, Measure::Height, Some("female")), 50);
    }

    #[test]
    fn test_clamped_to_1_99() {
        assert_eq!(percentile(20.0, 6, Measure::Weight, Some("male")), 99);
        assert_eq!(percentile(1.0, 6, Measure::Weight, Some("male")), 1);
    }

    #[test]
    fn test_past_twelve_months_uses_last_entry() {
        let at_12 = percentile(9.6, 12, Measure::Weight, Some("male"));
        let at_24 = percentile(9.6, 24, Measure::Weight, Some("male"));
        assert_eq!(at_12, at_24);
        assert_eq!(at_12, 50);
    }

    #[test]
    fn test_unknown_gender_uses_boys_table() {
        assert_eq!(
            percentile(7.9, 6, Measure::Weight, None),
            percentile(7.9, 6, Measure::Weight, Some("male"))
        );
    }

    #[test]
    fn test_above_expected_scores_higher() {
        let p = percentile(8.5, 6, Measure::Weight, Some("male"));
        assert!(p > 50 && p < 99);
    }
}
