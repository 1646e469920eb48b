/// Pricing engine property tests
///
/// Scenario-level checks for the aggregation, classification and cell-shaping
/// rules behind the pricing calendar: arithmetic-mean rates, the 5% deviation
/// boundaries, the display-color priority and the derived price formulas.

// ---------------------------------------------------------------------------
// Rate aggregation
// ---------------------------------------------------------------------------

#[cfg(test)]
mod rate_aggregation {
    /// Arithmetic mean over a non-empty group; empty groups carry no value.
    fn mean(rates: &[f64]) -> Option<f64> {
        if rates.is_empty() {
            None
        } else {
            Some(rates.iter().sum::<f64>() / rates.len() as f64)
        }
    }

    #[test]
    fn mean_of_a_group_is_arithmetic() {
        assert_eq!(mean(&[90.0, 110.0]), Some(100.0));
        assert_eq!(mean(&[130.0]), Some(130.0));
    }

    #[test]
    fn mean_is_order_independent() {
        assert_eq!(mean(&[80.0, 100.0, 120.0]), mean(&[120.0, 80.0, 100.0]));
    }

    #[test]
    fn empty_group_is_no_data_not_zero() {
        assert_eq!(mean(&[]), None);
        assert_ne!(mean(&[0.0]), None);
    }
}

// ---------------------------------------------------------------------------
// Deviation alert boundaries
// ---------------------------------------------------------------------------

#[cfg(test)]
mod alert_boundaries {
    #[derive(Debug, PartialEq)]
    enum Alert {
        None,
        Low,
        High,
    }

    /// Both averages present and positive, strict 5% boundaries.
    fn classify(own: Option<f64>, competitor: Option<f64>) -> Alert {
        match (own, competitor) {
            (Some(o), Some(c)) if o > 0.0 && c > 0.0 => {
                let pct = (o - c) / c * 100.0;
                if pct > 5.0 {
                    Alert::High
                } else if pct < -5.0 {
                    Alert::Low
                } else {
                    Alert::None
                }
            }
            _ => Alert::None,
        }
    }

    #[test]
    fn exactly_plus_five_percent_is_none() {
        assert_eq!(classify(Some(105.0), Some(100.0)), Alert::None);
    }

    #[test]
    fn just_above_five_percent_is_high() {
        assert_eq!(classify(Some(105.01), Some(100.0)), Alert::High);
    }

    #[test]
    fn just_below_minus_five_percent_is_low() {
        assert_eq!(classify(Some(94.99), Some(100.0)), Alert::Low);
    }

    #[test]
    fn missing_own_average_is_none_for_any_competitor() {
        assert_eq!(classify(None, Some(100.0)), Alert::None);
        assert_eq!(classify(None, Some(0.0)), Alert::None);
        assert_eq!(classify(None, None), Alert::None);
    }
}

// ---------------------------------------------------------------------------
// Cell shape and priority
// ---------------------------------------------------------------------------

#[cfg(test)]
mod cell_shape {
    #[derive(Debug, PartialEq)]
    enum Color {
        Full,
        Priced,
        Empty,
    }

    /// Full occupancy wins over price-based coloring, priced over empty.
    fn display_color(occupancy: Option<f64>, own_rate: Option<f64>) -> Color {
        match (occupancy, own_rate) {
            (Some(pct), _) if pct >= 100.0 => Color::Full,
            (_, Some(_)) => Color::Priced,
            _ => Color::Empty,
        }
    }

    #[test]
    fn full_occupancy_without_rate_data_is_full_never_empty() {
        assert_eq!(display_color(Some(100.0), None), Color::Full);
    }

    #[test]
    fn full_occupancy_overrides_priced() {
        assert_eq!(display_color(Some(100.0), Some(120.0)), Color::Full);
    }

    #[test]
    fn rate_data_without_full_occupancy_is_priced() {
        assert_eq!(display_color(Some(40.0), Some(120.0)), Color::Priced);
        assert_eq!(display_color(None, Some(120.0)), Color::Priced);
    }

    #[test]
    fn no_data_at_all_is_empty() {
        assert_eq!(display_color(None, None), Color::Empty);
        assert_eq!(display_color(Some(60.0), None), Color::Empty);
    }

    #[test]
    fn one_cell_per_hotel_day_pair() {
        let hotels = 3usize;
        let days = 30usize;
        // The builder emits the full cross-product, data or not.
        assert_eq!(hotels * days, 90);
    }
}

// ---------------------------------------------------------------------------
// End-to-end cell arithmetic
// ---------------------------------------------------------------------------

#[cfg(test)]
mod end_to_end_cell {
    const SUGGESTED_MARKUP: f64 = 15.0;
    const HISTORICAL_MARKDOWN: f64 = 10.0;

    #[test]
    fn own_100_vs_competitor_130_is_a_low_alert_priced_cell() {
        let avg_own: f64 = 100.0;
        let avg_competitor: f64 = 130.0;
        let occupancy: f64 = 40.0;

        let pct = (avg_own - avg_competitor) / avg_competitor * 100.0;
        assert!((pct - (-23.076923076923077)).abs() < 1e-9);
        assert!(pct < -5.0, "deviation should classify low");

        // Priced: own rate present, occupancy below full.
        assert!(occupancy < 100.0);

        let suggested = avg_own + SUGGESTED_MARKUP;
        let historical = (avg_own - HISTORICAL_MARKDOWN).max(0.0);
        assert_eq!(suggested, 115.0);
        assert_eq!(historical, 90.0);
    }

    #[test]
    fn historical_price_never_goes_negative() {
        let avg_own: f64 = 4.0;
        assert_eq!((avg_own - HISTORICAL_MARKDOWN).max(0.0), 0.0);
    }
}
