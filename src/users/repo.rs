use serde::{Deserialize, Serialize};
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Sole persistent entity. `id` is the national identity document number
/// (cédula), immutable once assigned. `image` is the S3 object key; NULL
/// means no photo has been generated yet.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub career: String,
    pub image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// Listing row without the image column, for the summary endpoints.
#[derive(Debug, Clone, Serialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    pub id: String,
    pub name: String,
    pub gender: String,
    pub career: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

const USER_COLS: &str = "id, name, gender, career, image, created_at";
const SUMMARY_COLS: &str = "id, name, gender, career, created_at";

pub async fn find_by_id(db: &PgPool, id: &str) -> anyhow::Result<Option<User>> {
    let user = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLS} FROM users WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await?;
    Ok(user)
}

pub async fn create(
    db: &PgPool,
    id: &str,
    name: &str,
    gender: &str,
    career: &str,
) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(&format!(
        "INSERT INTO users (id, name, gender, career)
         VALUES ($1, $2, $3, $4)
         RETURNING {USER_COLS}"
    ))
    .bind(id)
    .bind(name)
    .bind(gender)
    .bind(career)
    .fetch_one(db)
    .await?;
    Ok(user)
}

/// Fails (RowNotFound) when `id` is absent.
pub async fn update_image(db: &PgPool, id: &str, key: &str) -> anyhow::Result<User> {
    let user = sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET image = $2 WHERE id = $1 RETURNING {USER_COLS}"
    ))
    .bind(id)
    .bind(key)
    .fetch_one(db)
    .await?;
    Ok(user)
}

pub async fn list_all(db: &PgPool) -> anyhow::Result<Vec<User>> {
    let rows = sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_summary(db: &PgPool) -> anyhow::Result<Vec<UserSummary>> {
    let rows = sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLS} FROM users ORDER BY created_at DESC"
    ))
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_page(db: &PgPool, limit: i64, offset: i64) -> anyhow::Result<Vec<UserSummary>> {
    let rows = sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLS} FROM users
         ORDER BY created_at DESC
         LIMIT $1 OFFSET $2"
    ))
    .bind(limit)
    .bind(offset)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn count_all(db: &PgPool) -> anyhow::Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(db)
        .await?;
    Ok(count)
}

/// Case-insensitive substring match on career, alphabetical by name.
pub async fn list_by_career(db: &PgPool, career: &str) -> anyhow::Result<Vec<UserSummary>> {
    let rows = sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLS} FROM users
         WHERE career ILIKE '%' || $1 || '%'
         ORDER BY name ASC"
    ))
    .bind(career)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

/// Dynamic filter: any of career / gender / limit may be absent.
pub async fn list_filtered(
    db: &PgPool,
    career: Option<&str>,
    gender: Option<&str>,
    limit: Option<i64>,
) -> anyhow::Result<Vec<UserSummary>> {
    let rows = sqlx::query_as::<_, UserSummary>(&format!(
        "SELECT {SUMMARY_COLS} FROM users
         WHERE ($1::text IS NULL OR career ILIKE '%' || $1 || '%')
           AND ($2::text IS NULL OR gender = $2)
         ORDER BY name ASC
         LIMIT $3"
    ))
    .bind(career)
    .bind(gender.map(|g| g.to_lowercase()))
    .bind(limit)
    .fetch_all(db)
    .await?;
    Ok(rows)
}

pub async fn list_careers(db: &PgPool) -> anyhow::Result<Vec<String>> {
    let careers: Vec<String> = sqlx::query_scalar(
        "SELECT DISTINCT career FROM users WHERE career <> '' ORDER BY career ASC",
    )
    .fetch_all(db)
    .await?;
    Ok(careers)
}
