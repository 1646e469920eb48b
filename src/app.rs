use axum::Router;
use tower_http::cors::CorsLayer;

use crate::routes::{calendar, health, hotels, overrides};
use crate::state::AppState;

pub fn create_app(state: AppState) -> Router {
    Router::<AppState>::new()
        .nest("/health", health::router())
        .nest("/api/hotels", hotels::router())
        .nest("/api/calendar", calendar::router())
        .nest("/api/overrides", overrides::router())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
