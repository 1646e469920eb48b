use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::{OverrideWriteBatch, RateOrigin};

/// Filter shared by both read interfaces of the ingestion service.
#[derive(Debug, Clone)]
pub struct BatchFilter {
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub hotel_ids: Vec<Uuid>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// One extracted rate entry inside an upload batch.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateEntry {
    pub check_in: DateTime<Utc>,
    pub rate: f64,
    pub property: RateOrigin,
}

/// One upload batch, tagged with the hotel-property it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RateUploadBatch {
    pub hotel_id: Uuid,
    pub entries: Vec<RateEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyEntry {
    pub check_in: DateTime<Utc>,
    pub occupancy: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OccupancyUploadBatch {
    pub hotel_id: Uuid,
    pub entries: Vec<OccupancyEntry>,
}

#[derive(Debug, Error)]
pub enum PricingProviderError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("write rejected: {0}")]
    WriteRejected(String),
}

/// Read and write interfaces against the ingestion service / system of record.
#[async_trait]
pub trait PricingDataProvider: Send + Sync {
    /// Property-pricing read interface: upload batches of extracted rate
    /// entries for the filtered hotels and date window.
    async fn fetch_rate_batches(
        &self,
        filter: &BatchFilter,
    ) -> Result<Vec<RateUploadBatch>, PricingProviderError>;

    /// Booking/occupancy read interface, same filter shape.
    async fn fetch_occupancy_batches(
        &self,
        filter: &BatchFilter,
    ) -> Result<Vec<OccupancyUploadBatch>, PricingProviderError>;

    /// Price-override write interface. The whole batch succeeds or the whole
    /// batch is retried by the user; there is no row-level retry.
    async fn submit_overrides(
        &self,
        batch: &OverrideWriteBatch,
    ) -> Result<(), PricingProviderError>;
}
