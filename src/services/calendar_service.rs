use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::NaiveDate;
use parking_lot::RwLock;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::external::pricing_provider::{
    BatchFilter, OccupancyUploadBatch, PricingDataProvider, RateUploadBatch,
};
use crate::models::{AggregatedCell, CalendarEvent, OccupancyRecord, RateRecord};
use crate::services::override_reconciler::OverrideReconciler;
use crate::services::{cell_builder, date_range, occupancy_resolver, rate_aggregator};

/// One calendar request: which hotels, which day window, for whom.
#[derive(Debug, Clone)]
pub struct CalendarQuery {
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub hotel_ids: Vec<Uuid>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Immutable result of one completed fetch cycle. Replaced wholesale on every
/// recompute; readers never observe a half-updated cell set.
#[derive(Debug)]
pub struct CalendarSnapshot {
    pub generation: u64,
    pub cells: Vec<AggregatedCell>,
    pub events: Vec<CalendarEvent>,
}

/// Per-(company, user) calendar state: the latest published snapshot, the
/// fetch-cycle generation counter, and the session's pending price edits.
pub struct CalendarSession {
    generation: AtomicU64,
    snapshot: RwLock<Option<Arc<CalendarSnapshot>>>,
    pub overrides: OverrideReconciler,
}

impl CalendarSession {
    pub fn new() -> Self {
        Self {
            generation: AtomicU64::new(0),
            snapshot: RwLock::new(None),
            overrides: OverrideReconciler::new(),
        }
    }

    /// Start a fetch cycle and return its generation. Any cycle started later
    /// invalidates this one.
    fn begin_cycle(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Publish a completed cycle's snapshot unless a newer cycle has started
    /// meanwhile. Stale results are discarded and the prior snapshot stands.
    ///
    /// The generation check runs under the snapshot write lock so a cycle that
    /// went stale between finishing its fetch and publishing can never replace
    /// a newer cycle's cells.
    fn publish(&self, snapshot: CalendarSnapshot) -> Result<Arc<CalendarSnapshot>, AppError> {
        let mut slot = self.snapshot.write();

        let latest = self.generation.load(Ordering::SeqCst);
        if latest != snapshot.generation {
            warn!(
                "Discarding stale calendar fetch (cycle {}, latest {})",
                snapshot.generation, latest
            );
            return Err(AppError::StaleResponse);
        }

        let snapshot = Arc::new(snapshot);
        *slot = Some(Arc::clone(&snapshot));
        Ok(snapshot)
    }

    pub fn latest_snapshot(&self) -> Option<Arc<CalendarSnapshot>> {
        self.snapshot.read().clone()
    }
}

impl Default for CalendarSession {
    fn default() -> Self {
        Self::new()
    }
}

/// Run one full fetch-aggregate-build cycle for a session.
///
/// The two read interfaces are fetched concurrently and both must complete
/// before any cell is built; a failure on either side surfaces as
/// NetworkFailure with the previous snapshot untouched. The result is only
/// published if no newer cycle started while this one was in flight.
pub async fn load_calendar(
    provider: &dyn PricingDataProvider,
    session: &CalendarSession,
    hotel_names: &HashMap<Uuid, String>,
    query: &CalendarQuery,
) -> Result<Arc<CalendarSnapshot>, AppError> {
    if query.hotel_ids.is_empty() {
        return Err(AppError::Validation("at least one hotel must be selected".into()));
    }
    if query.start > query.end {
        return Err(AppError::Validation(format!(
            "start day {} is after end day {}",
            query.start, query.end
        )));
    }

    // A repeated hotel id in the selection must not produce repeated cells.
    let hotel_ids = dedup_preserving_order(&query.hotel_ids);

    let cycle = session.begin_cycle();
    let filter = BatchFilter {
        company_id: query.company_id,
        user_id: query.user_id,
        hotel_ids: hotel_ids.clone(),
        start: query.start,
        end: query.end,
    };

    // Join barrier: no mixed/partial state is ever rendered.
    let (rate_batches, occupancy_batches) = tokio::try_join!(
        provider.fetch_rate_batches(&filter),
        provider.fetch_occupancy_batches(&filter),
    )
    .map_err(|e| AppError::NetworkFailure(e.to_string()))?;

    let rate_records = flatten_rate_batches(rate_batches);
    let occupancy_records = flatten_occupancy_batches(occupancy_batches);
    info!(
        "Calendar cycle {}: {} rate records, {} occupancy records for {} hotels",
        cycle,
        rate_records.len(),
        occupancy_records.len(),
        hotel_ids.len()
    );

    let hotel_set: HashSet<Uuid> = hotel_ids.iter().copied().collect();
    let days = date_range::day_range(query.start, query.end);
    let rates = rate_aggregator::aggregate_rates(&rate_records, &hotel_set, query.start, query.end);
    let occupancy =
        occupancy_resolver::resolve_occupancy(&occupancy_records, &hotel_set, query.start, query.end);

    let cells = cell_builder::build_cells(&hotel_ids, &days, &rates, &occupancy);
    let events = cell_builder::to_calendar_events(cells.clone(), hotel_names);

    session.publish(CalendarSnapshot { generation: cycle, cells, events })
}

fn dedup_preserving_order(hotel_ids: &[Uuid]) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    hotel_ids
        .iter()
        .copied()
        .filter(|id| seen.insert(*id))
        .collect()
}

// Upload batches carry full check-in timestamps; the calendar works in days.
// Time-of-day is discarded, the ingestion service already emits timestamps in
// the hotel's reporting calendar.
fn flatten_rate_batches(batches: Vec<RateUploadBatch>) -> Vec<RateRecord> {
    batches
        .into_iter()
        .flat_map(|batch| {
            let hotel_id = batch.hotel_id;
            batch.entries.into_iter().map(move |entry| RateRecord {
                hotel_id,
                day: entry.check_in.date_naive(),
                origin: entry.property,
                rate: entry.rate,
            })
        })
        .collect()
}

fn flatten_occupancy_batches(batches: Vec<OccupancyUploadBatch>) -> Vec<OccupancyRecord> {
    batches
        .into_iter()
        .flat_map(|batch| {
            let hotel_id = batch.hotel_id;
            batch.entries.into_iter().map(move |entry| OccupancyRecord {
                hotel_id,
                day: entry.check_in.date_naive(),
                occupancy_percent: entry.occupancy,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external::pricing_provider::{OccupancyEntry, PricingProviderError, RateEntry};
    use crate::models::{AlertLevel, DisplayColor, OverrideWriteBatch, RateOrigin};
    use async_trait::async_trait;
    use chrono::TimeZone;

    fn d(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn ts(s: &str) -> chrono::DateTime<chrono::Utc> {
        chrono::Utc
            .from_utc_datetime(&d(s).and_hms_opt(14, 0, 0).unwrap())
    }

    /// Read-side stub serving a fixed pair of batch sets, or failing.
    struct StubReader {
        rates: Option<Vec<RateUploadBatch>>,
        occupancy: Option<Vec<OccupancyUploadBatch>>,
    }

    #[async_trait]
    impl PricingDataProvider for StubReader {
        async fn fetch_rate_batches(
            &self,
            _filter: &BatchFilter,
        ) -> Result<Vec<RateUploadBatch>, PricingProviderError> {
            self.rates
                .clone()
                .ok_or_else(|| PricingProviderError::Network("rates unreachable".into()))
        }

        async fn fetch_occupancy_batches(
            &self,
            _filter: &BatchFilter,
        ) -> Result<Vec<OccupancyUploadBatch>, PricingProviderError> {
            self.occupancy
                .clone()
                .ok_or_else(|| PricingProviderError::Network("occupancy unreachable".into()))
        }

        async fn submit_overrides(
            &self,
            _batch: &OverrideWriteBatch,
        ) -> Result<(), PricingProviderError> {
            Ok(())
        }
    }

    fn query(hotel: Uuid) -> CalendarQuery {
        CalendarQuery {
            company_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            hotel_ids: vec![hotel],
            start: d("2025-06-01"),
            end: d("2025-06-07"),
        }
    }

    #[tokio::test]
    async fn end_to_end_cell_for_one_day_of_data() {
        let h = Uuid::new_v4();
        let provider = StubReader {
            rates: Some(vec![RateUploadBatch {
                hotel_id: h,
                entries: vec![
                    RateEntry { check_in: ts("2025-06-05"), rate: 100.0, property: RateOrigin::Own },
                    RateEntry {
                        check_in: ts("2025-06-05"),
                        rate: 130.0,
                        property: RateOrigin::Competitor,
                    },
                ],
            }]),
            occupancy: Some(vec![OccupancyUploadBatch {
                hotel_id: h,
                entries: vec![OccupancyEntry { check_in: ts("2025-06-05"), occupancy: 40.0 }],
            }]),
        };
        let session = CalendarSession::new();
        let names = HashMap::from([(h, "Seaside Inn".to_string())]);

        let snapshot = load_calendar(&provider, &session, &names, &query(h)).await.unwrap();

        // One cell per day of the 7-day window, data or not.
        assert_eq!(snapshot.cells.len(), 7);
        assert_eq!(snapshot.events.len(), 7);

        let cell = snapshot.cells.iter().find(|c| c.day == d("2025-06-05")).unwrap();
        assert_eq!(cell.avg_own_rate, Some(100.0));
        assert_eq!(cell.avg_competitor_rate, Some(130.0));
        assert_eq!(cell.occupancy_percent, Some(40.0));
        assert_eq!(cell.alert_level, AlertLevel::Low);
        assert_eq!(cell.display_color, DisplayColor::Priced);

        let empty = snapshot.cells.iter().find(|c| c.day == d("2025-06-02")).unwrap();
        assert_eq!(empty.display_color, DisplayColor::Empty);
        assert_eq!(empty.alert_level, AlertLevel::None);
    }

    #[tokio::test]
    async fn either_read_failure_builds_no_cells_and_keeps_prior_snapshot() {
        let h = Uuid::new_v4();
        let good = StubReader { rates: Some(Vec::new()), occupancy: Some(Vec::new()) };
        let session = CalendarSession::new();
        let names = HashMap::new();
        load_calendar(&good, &session, &names, &query(h)).await.unwrap();
        let prior = session.latest_snapshot().unwrap();

        let broken = StubReader { rates: Some(Vec::new()), occupancy: None };
        let err = load_calendar(&broken, &session, &names, &query(h)).await.unwrap_err();

        assert!(matches!(err, AppError::NetworkFailure(_)));
        let kept = session.latest_snapshot().unwrap();
        assert_eq!(kept.generation, prior.generation);
    }

    #[tokio::test]
    async fn duplicated_hotel_selection_yields_one_cell_per_pair() {
        let h = Uuid::new_v4();
        let provider = StubReader { rates: Some(Vec::new()), occupancy: Some(Vec::new()) };
        let session = CalendarSession::new();
        let mut q = query(h);
        q.hotel_ids = vec![h, h];

        let snapshot = load_calendar(&provider, &session, &HashMap::new(), &q).await.unwrap();

        // One cell per (hotel, day) pair of the 7-day window, repeats or not.
        assert_eq!(snapshot.cells.len(), 7);
        assert_eq!(snapshot.events.len(), 7);
    }

    #[tokio::test]
    async fn late_publish_cannot_replace_a_newer_snapshot() {
        let session = CalendarSession::new();
        let old_cycle = session.begin_cycle();
        let new_cycle = session.begin_cycle();

        // The newer cycle lands first; the older one finishes its fetch late.
        session
            .publish(CalendarSnapshot { generation: new_cycle, cells: Vec::new(), events: Vec::new() })
            .unwrap();
        let err = session
            .publish(CalendarSnapshot { generation: old_cycle, cells: Vec::new(), events: Vec::new() })
            .unwrap_err();

        assert!(matches!(err, AppError::StaleResponse));
        assert_eq!(session.latest_snapshot().unwrap().generation, new_cycle);
    }

    #[tokio::test]
    async fn stale_cycle_result_is_discarded() {
        let session = CalendarSession::new();
        let old_cycle = session.begin_cycle();
        // A newer selection starts fetching before the old cycle lands.
        session.begin_cycle();

        let err = session
            .publish(CalendarSnapshot {
                generation: old_cycle,
                cells: Vec::new(),
                events: Vec::new(),
            })
            .unwrap_err();

        assert!(matches!(err, AppError::StaleResponse));
        assert!(session.latest_snapshot().is_none());
    }

    #[tokio::test]
    async fn empty_hotel_selection_is_rejected() {
        let provider = StubReader { rates: Some(Vec::new()), occupancy: Some(Vec::new()) };
        let session = CalendarSession::new();
        let mut q = query(Uuid::new_v4());
        q.hotel_ids.clear();

        let err = load_calendar(&provider, &session, &HashMap::new(), &q).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn inverted_range_is_rejected() {
        let provider = StubReader { rates: Some(Vec::new()), occupancy: Some(Vec::new()) };
        let session = CalendarSession::new();
        let mut q = query(Uuid::new_v4());
        q.start = d("2025-06-07");
        q.end = d("2025-06-01");

        let err = load_calendar(&provider, &session, &HashMap::new(), &q).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }
}
