use std::sync::Arc;

use dashmap::DashMap;
use sqlx::PgPool;
use uuid::Uuid;

use crate::external::pricing_provider::PricingDataProvider;
use crate::services::calendar_service::CalendarSession;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub pricing_provider: Arc<dyn PricingDataProvider>,
    pub sessions: SessionRegistry,
}

/// Per-(company, user) calendar sessions: snapshot slot, fetch generation and
/// pending overrides. Created lazily on first touch and kept for the process
/// lifetime, so the map is bounded by the number of distinct (company, user)
/// pairs that ever open a calendar.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<DashMap<(Uuid, Uuid), Arc<CalendarSession>>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn session(&self, company_id: Uuid, user_id: Uuid) -> Arc<CalendarSession> {
        self.sessions
            .entry((company_id, user_id))
            .or_insert_with(|| Arc::new(CalendarSession::new()))
            .clone()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
