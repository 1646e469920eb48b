use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::routing::{delete, get, post, put};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::db;
use crate::errors::AppError;
use crate::models::{CalendarEvent, PriceOverride, SetOverrideRequest};
use crate::services::calendar_service::{self, CalendarQuery};
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", put(set_override))
        .route("/", delete(discard_overrides))
        .route("/open", post(open_editor))
        .route("/pending", get(get_pending))
        .route("/submit", post(submit_overrides))
}

#[derive(Debug, Deserialize)]
pub struct SessionParams {
    pub company_id: Uuid,
    pub user_id: Uuid,
}

/// Clicking a calendar event opens the day-edit modal.
pub async fn open_editor(
    State(state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> StatusCode {
    info!("POST /overrides/open - Opening editor for user {}", params.user_id);
    let session = state.sessions.session(params.company_id, params.user_id);
    session.overrides.open_editor();
    StatusCode::NO_CONTENT
}

pub async fn set_override(
    State(state): State<AppState>,
    Json(data): Json<SetOverrideRequest>,
) -> Result<StatusCode, AppError> {
    info!(
        "PUT /overrides - Pending edit for hotel {} on {}",
        data.hotel_id, data.day
    );
    let session = state.sessions.session(data.company_id, data.user_id);
    session
        .overrides
        .set_override(data.hotel_id, data.day, data.edited_price)
        .map_err(|e| {
            warn!("Rejected override edit: {}", e);
            e
        })?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn get_pending(
    State(state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> Json<Vec<PriceOverride>> {
    info!("GET /overrides/pending - Listing pending edits for user {}", params.user_id);
    let session = state.sessions.session(params.company_id, params.user_id);
    Json(session.overrides.pending())
}

#[derive(Debug, Deserialize)]
pub struct SubmitOverridesRequest {
    pub company_id: Uuid,
    pub user_id: Uuid,
    pub hotel_ids: Vec<Uuid>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Batch-write every pending edit, then recompute the calendar from fresh
/// record sets. Cells are never patched locally, so the response reflects any
/// server-side validation or rounding. A failed write keeps the pending edits.
pub async fn submit_overrides(
    State(state): State<AppState>,
    Json(data): Json<SubmitOverridesRequest>,
) -> Result<Json<Vec<CalendarEvent>>, AppError> {
    info!("POST /overrides/submit - Submitting batch for user {}", data.user_id);
    let session = state.sessions.session(data.company_id, data.user_id);

    let count = session
        .overrides
        .submit_overrides(state.pricing_provider.as_ref(), data.company_id, data.user_id)
        .await
        .map_err(|e| {
            match &e {
                AppError::NothingToSubmit => warn!("Submit with no pending overrides"),
                _ => error!("Override batch failed, pending edits retained: {}", e),
            }
            e
        })?;
    info!("Wrote {} overrides, recomputing calendar", count);

    let hotel_names = db::hotel_queries::fetch_names(&state.pool, &data.hotel_ids)
        .await
        .map_err(|e| {
            error!("Failed to look up hotel names: {}", e);
            AppError::Db(e)
        })?;
    let query = CalendarQuery {
        company_id: data.company_id,
        user_id: data.user_id,
        hotel_ids: data.hotel_ids,
        start: data.start,
        end: data.end,
    };
    let snapshot =
        calendar_service::load_calendar(state.pricing_provider.as_ref(), &session, &hotel_names, &query)
            .await
            .map_err(|e| {
                error!("Overrides written but recompute failed: {}", e);
                e
            })?;

    Ok(Json(snapshot.events.clone()))
}

pub async fn discard_overrides(
    State(state): State<AppState>,
    Query(params): Query<SessionParams>,
) -> StatusCode {
    info!("DELETE /overrides - Discarding pending edits for user {}", params.user_id);
    let session = state.sessions.session(params.company_id, params.user_id);
    session.overrides.discard_overrides();
    StatusCode::NO_CONTENT
}
