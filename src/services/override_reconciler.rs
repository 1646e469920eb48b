use std::collections::HashMap;

use chrono::NaiveDate;
use parking_lot::Mutex;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::external::pricing_provider::{PricingDataProvider, PricingProviderError};
use crate::models::{OverrideWriteBatch, OverrideWriteEntry, PriceOverride};

/// Where the day-edit modal currently stands. Transitions are explicit method
/// calls on the reconciler; there is no ambient event signaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Closed,
    Open,
    Editing,
    Submitting,
}

/// Pending price edits for one calendar view session, keyed by (hotel, day).
///
/// Edits live only here until a batch submit succeeds; a successful submit
/// clears them and the caller re-fetches recomputed cells rather than patching
/// locally. A failed submit leaves every pending edit in place for retry.
/// Mutated only by explicit user actions, one writer per session.
pub struct OverrideReconciler {
    pending: Mutex<HashMap<(Uuid, NaiveDate), f64>>,
    phase: Mutex<EditPhase>,
}

impl OverrideReconciler {
    pub fn new() -> Self {
        Self {
            pending: Mutex::new(HashMap::new()),
            phase: Mutex::new(EditPhase::Closed),
        }
    }

    pub fn phase(&self) -> EditPhase {
        *self.phase.lock()
    }

    /// A cell was clicked; the modal shows current cells with no edits yet.
    pub fn open_editor(&self) {
        *self.phase.lock() = EditPhase::Open;
    }

    /// Insert or replace the pending edit for one (hotel, day). Rejects
    /// negative or non-finite prices without touching existing state.
    pub fn set_override(
        &self,
        hotel_id: Uuid,
        day: NaiveDate,
        edited_price: f64,
    ) -> Result<(), AppError> {
        if !edited_price.is_finite() || edited_price < 0.0 {
            return Err(AppError::InvalidInput(format!(
                "edited price must be a non-negative number, got {}",
                edited_price
            )));
        }

        self.pending.lock().insert((hotel_id, day), edited_price);
        *self.phase.lock() = EditPhase::Editing;
        Ok(())
    }

    /// Pending edits in a deterministic order, for modal display.
    pub fn pending(&self) -> Vec<PriceOverride> {
        let mut entries: Vec<PriceOverride> = self
            .pending
            .lock()
            .iter()
            .map(|(&(hotel_id, day), &edited_price)| PriceOverride {
                hotel_id,
                day,
                edited_price,
            })
            .collect();
        entries.sort_by_key(|o| (o.hotel_id, o.day));
        entries
    }

    pub fn pending_count(&self) -> usize {
        self.pending.lock().len()
    }

    /// Serialize every pending edit into one batch write and send it.
    ///
    /// Empty map fails with NothingToSubmit before any network call. Success
    /// clears the map and closes the editor; the caller must then re-fetch the
    /// calendar so the cells reflect server-side validation and rounding.
    /// Failure keeps the map unchanged and drops back to Editing for retry.
    pub async fn submit_overrides(
        &self,
        provider: &dyn PricingDataProvider,
        company_id: Uuid,
        user_id: Uuid,
    ) -> Result<usize, AppError> {
        let data: Vec<OverrideWriteEntry> = self
            .pending
            .lock()
            .iter()
            .map(|(&(hotel_id, day), &edited_price)| OverrideWriteEntry {
                hotel_id,
                date: day,
                edited_price,
            })
            .collect();

        if data.is_empty() {
            return Err(AppError::NothingToSubmit);
        }

        *self.phase.lock() = EditPhase::Submitting;
        let count = data.len();
        let batch = OverrideWriteBatch { company_id, user_id, data };

        match provider.submit_overrides(&batch).await {
            Ok(()) => {
                info!("Submitted {} price overrides for user {}", count, user_id);
                self.pending.lock().clear();
                *self.phase.lock() = EditPhase::Closed;
                Ok(count)
            }
            Err(e) => {
                warn!("Override batch rejected, {} pending edits retained: {}", count, e);
                *self.phase.lock() = EditPhase::Editing;
                Err(match e {
                    PricingProviderError::WriteRejected(msg) => AppError::WriteRejected(msg),
                    other => AppError::NetworkFailure(other.to_string()),
                })
            }
        }
    }

    /// Explicit cancel: drop every pending edit, no network interaction.
    pub fn discard_overrides(&self) {
        self.pending.lock().clear();
        *self.phase.lock() = EditPhase::Closed;
    }
}

impl Default for OverrideReconciler {
    fn default() -> Self {
        Self::new()
    }
}
