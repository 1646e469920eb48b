use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// One property in the managed portfolio. Only the directory data the pricing
// calendar needs.
#[derive(Debug, Serialize, Deserialize, FromRow)]
pub struct Hotel {
    pub id: uuid::Uuid,
    pub name: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateHotel {
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateHotel {
    pub name: String,
}

impl Hotel {
    pub(crate) fn new(name: String) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            name,
            created_at: chrono::Utc::now(),
        }
    }
}
