use axum::extract::{Query, State};
use axum::routing::get;
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::CalendarEvent;
use crate::services::calendar_service::{self, CalendarQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(get_calendar))
}

#[derive(Debug, Deserialize)]
pub struct CalendarParams {
    pub company_id: Uuid,
    pub user_id: Uuid,
    /// Comma-separated hotel ids, matching the read-interface filter shape.
    pub hotel_ids: String,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(params): Query<CalendarParams>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    info!(
        "GET /calendar - {} to {} for user {}",
        params.start, params.end, params.user_id
    );

    let hotel_ids = parse_hotel_ids(&params.hotel_ids)?;
    let hotel_names = db::hotel_queries::fetch_names(&state.pool, &hotel_ids)
        .await
        .map_err(|e| {
            error!("Failed to look up hotel names: {}", e);
            AppError::Db(e)
        })?;

    let session = state.sessions.session(params.company_id, params.user_id);
    let query = CalendarQuery {
        company_id: params.company_id,
        user_id: params.user_id,
        hotel_ids,
        start: params.start,
        end: params.end,
    };

    let snapshot =
        calendar_service::load_calendar(state.pricing_provider.as_ref(), &session, &hotel_names, &query)
            .await
            .map_err(|e| {
                match &e {
                    AppError::StaleResponse => info!("Calendar fetch superseded by a newer request"),
                    _ => error!("Failed to load calendar: {}", e),
                }
                e
            })?;

    Ok(Json(snapshot.events.clone()))
}

pub(crate) fn parse_hotel_ids(raw: &str) -> Result<Vec<Uuid>, AppError> {
    let ids: Result<Vec<Uuid>, _> = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(Uuid::parse_str)
        .collect();

    ids.map_err(|e| AppError::Validation(format!("invalid hotel id list: {}", e)))
}
