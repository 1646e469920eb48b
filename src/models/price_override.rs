use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A pending user-entered price correction for one (hotel, day).
/// Lives only in session memory until batch-submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceOverride {
    pub hotel_id: Uuid,
    pub day: NaiveDate,
    pub edited_price: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetOverrideRequest {
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub hotel_id: Uuid,
    pub day: NaiveDate,
    pub edited_price: f64,
}

// Wire shape of the batched write against the system of record.
// NaiveDate serializes as YYYY-MM-DD, which is what the write interface expects.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideWriteBatch {
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub data: Vec<OverrideWriteEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverrideWriteEntry {
    pub hotel_id: Uuid,
    pub date: NaiveDate,
    pub edited_price: f64,
}
