use chrono::NaiveDate;

/// Ordered sequence of calendar days from `start` to `end`, both inclusive.
/// Empty when `start > end`. One cell must exist for every day returned here,
/// whether or not any records cover it.
pub fn day_range(start: NaiveDate, end: NaiveDate) -> Vec<NaiveDate> {
    if start > end {
        return Vec::new();
    }

    start.iter_days().take_while(|d| *d <= end).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn three_day_range_is_inclusive_on_both_ends() {
        let days = day_range(d("2025-06-01"), d("2025-06-03"));
        assert_eq!(days, vec![d("2025-06-01"), d("2025-06-02"), d("2025-06-03")]);
    }

    #[test]
    fn single_day_range_has_one_entry() {
        assert_eq!(day_range(d("2025-06-01"), d("2025-06-01")), vec![d("2025-06-01")]);
    }

    #[test]
    fn inverted_range_is_empty() {
        assert!(day_range(d("2025-06-03"), d("2025-06-01")).is_empty());
    }

    #[test]
    fn range_crosses_month_boundary() {
        let days = day_range(d("2025-06-29"), d("2025-07-02"));
        assert_eq!(days.len(), 4);
        assert_eq!(days[1], d("2025-06-30"));
        assert_eq!(days[2], d("2025-07-01"));
    }
}
