use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use tracing::{error, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::{CreateHotel, Hotel, UpdateHotel};
use crate::services;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(create_hotel).get(fetch_hotels))
        .route("/:id", get(get_hotel))
        .route("/:id", put(update_hotel))
        .route("/:id", delete(delete_hotel))
}

#[axum::debug_handler]
pub async fn create_hotel(
    State(state): State<AppState>,
    Json(data): Json<CreateHotel>,
) -> Result<Json<Hotel>, AppError> {
    info!("POST /hotels - Creating new hotel");
    let hotel = services::hotel_service::create(&state.pool, data).await.map_err(|e| {
        error!("Failed to create hotel: {}", e);
        e
    })?;
    Ok(Json(hotel))
}

pub async fn fetch_hotels(State(state): State<AppState>) -> Result<Json<Vec<Hotel>>, AppError> {
    info!("GET /hotels - Fetching all hotels");
    let hotels = services::hotel_service::fetch_all(&state.pool).await.map_err(|e| {
        error!("Failed to fetch hotels: {}", e);
        e
    })?;
    Ok(Json(hotels))
}

pub async fn get_hotel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<Hotel>, AppError> {
    info!("GET /hotels/{} - Fetching hotel", id);
    let hotel = services::hotel_service::fetch_one(&state.pool, id).await.map_err(|e| {
        error!("Failed to fetch hotel {}: {}", id, e);
        e
    })?;
    Ok(Json(hotel))
}

pub async fn update_hotel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateHotel>,
) -> Result<Json<Hotel>, AppError> {
    info!("PUT /hotels/{} - Updating hotel", id);
    let hotel = services::hotel_service::update(&state.pool, id, data).await.map_err(|e| {
        error!("Failed to update hotel {}: {}", id, e);
        e
    })?;
    Ok(Json(hotel))
}

pub async fn delete_hotel(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    info!("DELETE /hotels/{} - Deleting hotel", id);
    services::hotel_service::delete(&state.pool, id).await.map_err(|e| {
        error!("Failed to delete hotel {}: {}", id, e);
        e
    })?;
    Ok(StatusCode::NO_CONTENT)
}
