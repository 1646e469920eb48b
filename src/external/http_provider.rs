use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::external::pricing_provider::{
    BatchFilter, OccupancyEntry, OccupancyUploadBatch, PricingDataProvider, PricingProviderError,
    RateEntry, RateUploadBatch,
};
use crate::models::{OverrideWriteBatch, RateOrigin};

/// Client for the ingestion service's read interfaces and the price-override
/// write interface of the system of record.
pub struct HttpPricingProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
}

impl HttpPricingProvider {
    pub fn from_env() -> Result<Self, PricingProviderError> {
        let base_url = std::env::var("INGESTION_BASE_URL")
            .map_err(|_| PricingProviderError::BadResponse("INGESTION_BASE_URL not set".into()))?;
        let api_key = std::env::var("INGESTION_API_KEY")
            .map_err(|_| PricingProviderError::BadResponse("INGESTION_API_KEY not set".into()))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            api_key,
        })
    }

    fn filter_query(filter: &BatchFilter) -> Vec<(&'static str, String)> {
        let hotels = filter
            .hotel_ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(",");

        vec![
            ("company_id", filter.company_id.to_string()),
            ("user_id", filter.user_id.to_string()),
            ("hotels", hotels),
            ("start_date", filter.start.to_string()),
            ("end_date", filter.end.to_string()),
        ]
    }
}

// Wire DTOs. The ingestion service speaks camelCase for extracted entries.

#[derive(Debug, Deserialize)]
struct RateBatchesResponse {
    status: String,
    message: Option<String>,
    batches: Option<Vec<WireRateBatch>>,
}

#[derive(Debug, Deserialize)]
struct WireRateBatch {
    #[serde(rename = "hotelPropertyId")]
    hotel_property_id: Uuid,
    entries: Vec<WireRateEntry>,
}

#[derive(Debug, Deserialize)]
struct WireRateEntry {
    #[serde(rename = "checkIn")]
    check_in: DateTime<Utc>,
    rate: f64,
    property: RateOrigin,
}

#[derive(Debug, Deserialize)]
struct OccupancyBatchesResponse {
    status: String,
    message: Option<String>,
    batches: Option<Vec<WireOccupancyBatch>>,
}

#[derive(Debug, Deserialize)]
struct WireOccupancyBatch {
    #[serde(rename = "hotelPropertyId")]
    hotel_property_id: Uuid,
    entries: Vec<WireOccupancyEntry>,
}

#[derive(Debug, Deserialize)]
struct WireOccupancyEntry {
    #[serde(rename = "checkIn")]
    check_in: DateTime<Utc>,
    occupancy: f64,
}

#[derive(Debug, Deserialize)]
struct WriteResponse {
    status: String,
    message: Option<String>,
}

#[async_trait]
impl PricingDataProvider for HttpPricingProvider {
    async fn fetch_rate_batches(
        &self,
        filter: &BatchFilter,
    ) -> Result<Vec<RateUploadBatch>, PricingProviderError> {
        let url = format!("{}/api/rate-uploads", self.base_url);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&Self::filter_query(filter))
            .send()
            .await
            .map_err(|e| PricingProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PricingProviderError::BadResponse(format!(
                "rate-uploads returned HTTP {}",
                resp.status()
            )));
        }

        let body: RateBatchesResponse = resp
            .json()
            .await
            .map_err(|e| PricingProviderError::Parse(e.to_string()))?;

        if body.status != "success" {
            return Err(PricingProviderError::BadResponse(
                body.message.unwrap_or(body.status),
            ));
        }

        Ok(body
            .batches
            .unwrap_or_default()
            .into_iter()
            .map(|batch| RateUploadBatch {
                hotel_id: batch.hotel_property_id,
                entries: batch
                    .entries
                    .into_iter()
                    .map(|e| RateEntry {
                        check_in: e.check_in,
                        rate: e.rate,
                        property: e.property,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn fetch_occupancy_batches(
        &self,
        filter: &BatchFilter,
    ) -> Result<Vec<OccupancyUploadBatch>, PricingProviderError> {
        let url = format!("{}/api/booking-uploads", self.base_url);

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .query(&Self::filter_query(filter))
            .send()
            .await
            .map_err(|e| PricingProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PricingProviderError::BadResponse(format!(
                "booking-uploads returned HTTP {}",
                resp.status()
            )));
        }

        let body: OccupancyBatchesResponse = resp
            .json()
            .await
            .map_err(|e| PricingProviderError::Parse(e.to_string()))?;

        if body.status != "success" {
            return Err(PricingProviderError::BadResponse(
                body.message.unwrap_or(body.status),
            ));
        }

        Ok(body
            .batches
            .unwrap_or_default()
            .into_iter()
            .map(|batch| OccupancyUploadBatch {
                hotel_id: batch.hotel_property_id,
                entries: batch
                    .entries
                    .into_iter()
                    .map(|e| OccupancyEntry {
                        check_in: e.check_in,
                        occupancy: e.occupancy,
                    })
                    .collect(),
            })
            .collect())
    }

    async fn submit_overrides(
        &self,
        batch: &OverrideWriteBatch,
    ) -> Result<(), PricingProviderError> {
        let url = format!("{}/api/price-overrides", self.base_url);

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(batch)
            .send()
            .await
            .map_err(|e| PricingProviderError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(PricingProviderError::WriteRejected(format!(
                "price-overrides returned HTTP {}",
                resp.status()
            )));
        }

        let body: WriteResponse = resp
            .json()
            .await
            .map_err(|e| PricingProviderError::Parse(e.to_string()))?;

        // Non-success status must reach the caller so pending edits survive.
        if body.status != "success" {
            return Err(PricingProviderError::WriteRejected(
                body.message.unwrap_or(body.status),
            ));
        }

        Ok(())
    }
}
