use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{Hotel, UpdateHotel};

pub async fn fetch_all(pool: &PgPool) -> Result<Vec<Hotel>, sqlx::Error> {
    sqlx::query_as::<_, Hotel>(
        "SELECT id, name, created_at
         FROM hotels
         ORDER BY created_at DESC",
    )
    .fetch_all(pool)
    .await
}

pub async fn fetch_one(pool: &PgPool, id: Uuid) -> Result<Option<Hotel>, sqlx::Error> {
    sqlx::query_as::<_, Hotel>(
        "SELECT id, name, created_at
         FROM hotels
         WHERE id = $1",
    )
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// Display-name lookup for the calendar's event titles.
pub async fn fetch_names(
    pool: &PgPool,
    ids: &[Uuid],
) -> Result<HashMap<Uuid, String>, sqlx::Error> {
    let rows: Vec<(Uuid, String)> = sqlx::query_as(
        "SELECT id, name
         FROM hotels
         WHERE id = ANY($1)",
    )
    .bind(ids)
    .fetch_all(pool)
    .await?;

    Ok(rows.into_iter().collect())
}

pub async fn insert(pool: &PgPool, input: Hotel) -> Result<Hotel, sqlx::Error> {
    sqlx::query_as::<_, Hotel>(
        "INSERT INTO hotels (id, name, created_at)
         VALUES ($1, $2, $3)
         RETURNING id, name, created_at",
    )
    .bind(input.id)
    .bind(input.name)
    .bind(input.created_at)
    .fetch_one(pool)
    .await
}

pub async fn update(
    pool: &PgPool,
    id: Uuid,
    input: UpdateHotel,
) -> Result<Option<Hotel>, sqlx::Error> {
    sqlx::query_as::<_, Hotel>(
        "UPDATE hotels
         SET name = $1
         WHERE id = $2
         RETURNING id, name, created_at",
    )
    .bind(input.name)
    .bind(id)
    .fetch_optional(pool)
    .await
}

pub async fn delete(pool: &PgPool, id: Uuid) -> Result<u64, sqlx::Error> {
    let result = sqlx::query("DELETE FROM hotels WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}
