use sqlx::PgPool;
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CreateHotel, Hotel, UpdateHotel};

pub async fn create(pool: &PgPool, input: CreateHotel) -> Result<Hotel, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Hotel name cannot be empty".into()));
    }
    let new_hotel = Hotel::new(input.name);
    let hotel = db::hotel_queries::insert(pool, new_hotel).await?;
    Ok(hotel)
}

pub async fn update(pool: &PgPool, id: Uuid, input: UpdateHotel) -> Result<Hotel, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Hotel name cannot be empty".into()));
    }
    let hotel = db::hotel_queries::update(pool, id, input)
        .await?
        .ok_or(AppError::NotFound("Hotel not found".to_string()))?;
    Ok(hotel)
}

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Hotel>, AppError> {
    let hotels = db::hotel_queries::fetch_all(pool).await?;
    Ok(hotels)
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Hotel, AppError> {
    let hotel = db::hotel_queries::fetch_one(pool, id)
        .await?
        .ok_or(AppError::NotFound("Hotel not found".to_string()))?;
    Ok(hotel)
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, AppError> {
    match db::hotel_queries::delete(pool, id).await {
        Ok(0) => Err(AppError::NotFound("Hotel not found".to_string())),
        Ok(_) => Ok(1),
        Err(e) => Err(AppError::from(e)),
    }
}
