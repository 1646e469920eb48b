use std::collections::{HashMap, HashSet};

use chrono::NaiveDate;
use uuid::Uuid;

use crate::models::{RateOrigin, RateRecord};

/// Mean rates for one (hotel, day) cell. `None` means the partition was empty,
/// which is not the same thing as a mean of zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RateAverages {
    pub own: Option<f64>,
    pub competitor: Option<f64>,
}

#[derive(Debug, Default, Clone, Copy)]
struct MeanAcc {
    sum: f64,
    count: u32,
}

impl MeanAcc {
    fn push(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    fn mean(&self) -> Option<f64> {
        (self.count > 0).then(|| self.sum / self.count as f64)
    }
}

/// Partition rate records by (hotel, day, origin) and compute the arithmetic
/// mean per partition. Records outside the target hotel set or day range are
/// ignored, not an error. Pure function of its inputs.
pub fn aggregate_rates(
    records: &[RateRecord],
    hotels: &HashSet<Uuid>,
    start: NaiveDate,
    end: NaiveDate,
) -> HashMap<(Uuid, NaiveDate), RateAverages> {
    let mut acc: HashMap<(Uuid, NaiveDate), (MeanAcc, MeanAcc)> = HashMap::new();

    for record in records {
        if !hotels.contains(&record.hotel_id) || record.day < start || record.day > end {
            continue;
        }

        let entry = acc.entry((record.hotel_id, record.day)).or_default();
        match record.origin {
            RateOrigin::Own => entry.0.push(record.rate),
            RateOrigin::Competitor => entry.1.push(record.rate),
        }
    }

    acc.into_iter()
        .map(|(key, (own, competitor))| {
            (
                key,
                RateAverages {
                    own: own.mean(),
                    competitor: competitor.mean(),
                },
            )
        })
        .collect()
}
