use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Which side of the market a rate entry describes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RateOrigin {
    #[serde(rename = "myproperty")]
    Own,
    #[serde(rename = "competitor")]
    Competitor,
}

// One extracted rate entry, already normalized by the ingestion service.
// The day is the check-in timestamp truncated to a calendar date.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateRecord {
    pub hotel_id: Uuid,
    pub day: NaiveDate,
    pub origin: RateOrigin,
    pub rate: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyRecord {
    pub hotel_id: Uuid,
    pub day: NaiveDate,
    /// 0..=100, percentage of rooms booked.
    pub occupancy_percent: f64,
}
