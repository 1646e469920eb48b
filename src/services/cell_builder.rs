use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{AggregatedCell, AlertLevel, CalendarEvent, DisplayColor};
use crate::services::alert_classifier;
use crate::services::rate_aggregator::RateAverages;

/// Added to the own average to form the suggested price.
pub const SUGGESTED_MARKUP: f64 = 15.0;
/// Subtracted from the own average (floored at 0) to form the historical price.
pub const HISTORICAL_MARKDOWN: f64 = 10.0;

/// Build one AggregatedCell for every (hotel, day) in the cross-product of the
/// target hotels and the day range, zero-filled where no records matched.
/// Pure transformation; hotels keep their input order, days ascending.
pub fn build_cells(
    hotel_ids: &[Uuid],
    days: &[NaiveDate],
    rates: &HashMap<(Uuid, NaiveDate), RateAverages>,
    occupancy: &HashMap<(Uuid, NaiveDate), f64>,
) -> Vec<AggregatedCell> {
    let mut cells = Vec::with_capacity(hotel_ids.len() * days.len());

    for &hotel_id in hotel_ids {
        for &day in days {
            let averages = rates.get(&(hotel_id, day)).copied().unwrap_or_default();
            let occupancy_percent = occupancy.get(&(hotel_id, day)).copied();

            cells.push(AggregatedCell {
                hotel_id,
                day,
                avg_own_rate: averages.own,
                avg_competitor_rate: averages.competitor,
                occupancy_percent,
                alert_level: alert_classifier::classify(averages.own, averages.competitor),
                suggested_price: averages.own.map(|rate| rate + SUGGESTED_MARKUP),
                historical_price: averages.own.map(|rate| (rate - HISTORICAL_MARKDOWN).max(0.0)),
                display_color: display_color(occupancy_percent, averages.own),
            });
        }
    }

    cells
}

// Strict priority: full occupancy wins even when no rate data exists,
// then priced, then empty.
fn display_color(occupancy_percent: Option<f64>, avg_own_rate: Option<f64>) -> DisplayColor {
    match (occupancy_percent, avg_own_rate) {
        (Some(pct), _) if pct >= 100.0 => DisplayColor::Full,
        (_, Some(_)) => DisplayColor::Priced,
        _ => DisplayColor::Empty,
    }
}

/// Shape cells into events for the calendar widget. The title is the hotel's
/// display name, falling back to the raw id when the directory has no entry.
pub fn to_calendar_events(
    cells: Vec<AggregatedCell>,
    hotel_names: &HashMap<Uuid, String>,
) -> Vec<CalendarEvent> {
    cells
        .into_iter()
        .map(|cell| CalendarEvent {
            title: hotel_names
                .get(&cell.hotel_id)
                .cloned()
                .unwrap_or_else(|| cell.hotel_id.to_string()),
            date: cell.day,
            color: cell.display_color,
            payload: cell,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::date_range::day_range;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn cross_product_is_fully_populated_even_without_records() {
        let hotels = vec![Uuid::new_v4(), Uuid::new_v4()];
        let days = day_range(d("2025-06-01"), d("2025-06-03"));
        let cells = build_cells(&hotels, &days, &HashMap::new(), &HashMap::new());

        assert_eq!(cells.len(), 6);
        assert!(cells.iter().all(|c| c.display_color == DisplayColor::Empty));
        assert!(cells.iter().all(|c| c.alert_level == AlertLevel::None));
        assert!(cells.iter().all(|c| c.avg_own_rate.is_none()));
        assert!(cells.iter().all(|c| c.suggested_price.is_none()));
    }

    #[test]
    fn full_occupancy_beats_missing_price_data() {
        let h = Uuid::new_v4();
        let days = vec![d("2025-06-05")];
        let occupancy = HashMap::from([((h, d("2025-06-05")), 100.0)]);
        let cells = build_cells(&[h], &days, &HashMap::new(), &occupancy);

        assert_eq!(cells[0].display_color, DisplayColor::Full);
    }

    #[test]
    fn full_occupancy_beats_priced() {
        let h = Uuid::new_v4();
        let day = d("2025-06-05");
        let rates = HashMap::from([(
            (h, day),
            RateAverages { own: Some(120.0), competitor: None },
        )]);
        let occupancy = HashMap::from([((h, day), 100.0)]);
        let cells = build_cells(&[h], &[day], &rates, &occupancy);

        assert_eq!(cells[0].display_color, DisplayColor::Full);
    }

    #[test]
    fn own_rate_present_colors_priced() {
        let h = Uuid::new_v4();
        let day = d("2025-06-05");
        let rates = HashMap::from([(
            (h, day),
            RateAverages { own: Some(120.0), competitor: None },
        )]);
        let cells = build_cells(&[h], &[day], &rates, &HashMap::new());

        assert_eq!(cells[0].display_color, DisplayColor::Priced);
    }

    #[test]
    fn derived_prices_follow_the_markup_constants() {
        let h = Uuid::new_v4();
        let day = d("2025-06-05");
        let rates = HashMap::from([(
            (h, day),
            RateAverages { own: Some(100.0), competitor: Some(130.0) },
        )]);
        let cells = build_cells(&[h], &[day], &rates, &HashMap::new());

        assert_eq!(cells[0].suggested_price, Some(100.0 + SUGGESTED_MARKUP));
        assert_eq!(cells[0].historical_price, Some(100.0 - HISTORICAL_MARKDOWN));
    }

    #[test]
    fn historical_price_is_floored_at_zero() {
        let h = Uuid::new_v4();
        let day = d("2025-06-05");
        let rates = HashMap::from([(
            (h, day),
            RateAverages { own: Some(HISTORICAL_MARKDOWN / 2.0), competitor: None },
        )]);
        let cells = build_cells(&[h], &[day], &rates, &HashMap::new());

        assert_eq!(cells[0].historical_price, Some(0.0));
    }

    #[test]
    fn events_use_hotel_names_and_cell_colors() {
        let h = Uuid::new_v4();
        let day = d("2025-06-05");
        let cells = build_cells(&[h], &[day], &HashMap::new(), &HashMap::new());
        let names = HashMap::from([(h, "Grand Plaza".to_string())]);
        let events = to_calendar_events(cells, &names);

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].title, "Grand Plaza");
        assert_eq!(events[0].date, day);
        assert_eq!(events[0].color, DisplayColor::Empty);
    }
}
