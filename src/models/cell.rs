use chrono::NaiveDate;
use serde::{Serialize, Serializer};
use uuid::Uuid;

/// Deviation of the own average rate against the competitor average.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertLevel {
    None,
    Low,
    High,
}

/// Calendar cell coloring, decided by strict priority in the cell builder:
/// full occupancy beats priced, priced beats empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DisplayColor {
    Full,
    Priced,
    Empty,
}

// The fully-derived per-(hotel, day) record backing one calendar entry.
// Missing data is `None` internally so a true zero rate stays distinguishable
// for alerting; the wire shape renders it as 0 for display.
#[derive(Debug, Clone, Serialize)]
pub struct AggregatedCell {
    pub hotel_id: Uuid,
    pub day: NaiveDate,
    #[serde(serialize_with = "zero_when_missing")]
    pub avg_own_rate: Option<f64>,
    #[serde(serialize_with = "zero_when_missing")]
    pub avg_competitor_rate: Option<f64>,
    #[serde(serialize_with = "zero_when_missing")]
    pub occupancy_percent: Option<f64>,
    pub alert_level: AlertLevel,
    #[serde(serialize_with = "zero_when_missing")]
    pub suggested_price: Option<f64>,
    #[serde(serialize_with = "zero_when_missing")]
    pub historical_price: Option<f64>,
    pub display_color: DisplayColor,
}

fn zero_when_missing<S: Serializer>(value: &Option<f64>, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_f64(value.unwrap_or(0.0))
}

/// The only contract with the external calendar widget.
#[derive(Debug, Clone, Serialize)]
pub struct CalendarEvent {
    pub title: String,
    pub date: NaiveDate,
    pub color: DisplayColor,
    pub payload: AggregatedCell,
}
