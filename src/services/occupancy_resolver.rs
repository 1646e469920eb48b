use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::OccupancyRecord;

/// Resolve one occupancy percentage per (hotel, day).
///
/// Duplicate records for the same key resolve last-write-wins in ingestion
/// order. That overwrite policy is the documented contract, not an accident of
/// iteration. Out-of-set and out-of-range records are ignored.
pub fn resolve_occupancy(
    records: &[OccupancyRecord],
    hotels: &HashSet<Uuid>,
    start: NaiveDate,
    end: NaiveDate,
) -> HashMap<(Uuid, NaiveDate), f64> {
    let mut out = HashMap::new();

    for record in records {
        if !hotels.contains(&record.hotel_id) || record.day < start || record.day > end {
            continue;
        }
        out.insert((record.hotel_id, record.day), record.occupancy_percent);
    }

    out
}
