use async_trait::async_trait;
use chrono::{Datelike, NaiveDate, TimeZone, Utc};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use uuid::Uuid;

use crate::external::pricing_provider::{
    BatchFilter, OccupancyEntry, OccupancyUploadBatch, PricingDataProvider, PricingProviderError,
    RateEntry, RateUploadBatch,
};
use crate::models::{OverrideWriteBatch, RateOrigin};

/// Development stand-in for the ingestion service. Emits plausible rate and
/// occupancy batches, deterministic per (hotel, day) so the calendar is stable
/// across reloads. Gaps are seeded in on purpose so "no data" paths render.
pub struct MockPricingProvider;

impl MockPricingProvider {
    pub fn new() -> Self {
        Self
    }

    fn cell_rng(hotel_id: Uuid, day: NaiveDate) -> StdRng {
        let seed = (hotel_id.as_u128() as u64) ^ (day.num_days_from_ce() as u64);
        StdRng::seed_from_u64(seed)
    }

    fn check_in(day: NaiveDate) -> chrono::DateTime<Utc> {
        Utc.from_utc_datetime(&day.and_hms_opt(14, 0, 0).unwrap())
    }
}

impl Default for MockPricingProvider {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingDataProvider for MockPricingProvider {
    async fn fetch_rate_batches(
        &self,
        filter: &BatchFilter,
    ) -> Result<Vec<RateUploadBatch>, PricingProviderError> {
        let mut batches = Vec::with_capacity(filter.hotel_ids.len());

        for &hotel_id in &filter.hotel_ids {
            let mut entries = Vec::new();
            let mut day = filter.start;
            while day <= filter.end {
                let mut rng = Self::cell_rng(hotel_id, day);

                // Roughly one day in six has no own upload at all.
                if rng.random_range(0..6) != 0 {
                    entries.push(RateEntry {
                        check_in: Self::check_in(day),
                        rate: rng.random_range(60.0..240.0),
                        property: RateOrigin::Own,
                    });
                }
                if rng.random_range(0..4) != 0 {
                    entries.push(RateEntry {
                        check_in: Self::check_in(day),
                        rate: rng.random_range(60.0..240.0),
                        property: RateOrigin::Competitor,
                    });
                }

                day = day.succ_opt().ok_or_else(|| {
                    PricingProviderError::BadResponse("day range overflow".into())
                })?;
            }
            batches.push(RateUploadBatch { hotel_id, entries });
        }

        Ok(batches)
    }

    async fn fetch_occupancy_batches(
        &self,
        filter: &BatchFilter,
    ) -> Result<Vec<OccupancyUploadBatch>, PricingProviderError> {
        let mut batches = Vec::with_capacity(filter.hotel_ids.len());

        for &hotel_id in &filter.hotel_ids {
            let mut entries = Vec::new();
            let mut day = filter.start;
            while day <= filter.end {
                let mut rng = Self::cell_rng(hotel_id, day);

                if rng.random_range(0..5) != 0 {
                    // Occasional sold-out day exercises the full-occupancy color.
                    let occupancy = if rng.random_range(0..10) == 0 {
                        100.0
                    } else {
                        rng.random_range(10.0..95.0)
                    };
                    entries.push(OccupancyEntry { check_in: Self::check_in(day), occupancy });
                }

                day = day.succ_opt().ok_or_else(|| {
                    PricingProviderError::BadResponse("day range overflow".into())
                })?;
            }
            batches.push(OccupancyUploadBatch { hotel_id, entries });
        }

        Ok(batches)
    }

    async fn submit_overrides(
        &self,
        batch: &OverrideWriteBatch,
    ) -> Result<(), PricingProviderError> {
        tracing::info!(
            "Mock provider accepted {} price overrides for user {}",
            batch.data.len(),
            batch.user_id
        );
        Ok(())
    }
}
