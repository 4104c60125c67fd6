use axum::async_trait;
use sqlx::PgPool;

use super::repo::{self, User};

/// Lookup/update seam used by the photo orchestrator. Production runs against
/// Postgres; tests substitute an in-memory map.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<User>>;
    async fn update_image(&self, id: &str, key: &str) -> anyhow::Result<User>;
}

pub struct PgUserDirectory {
    pool: PgPool,
}

impl PgUserDirectory {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserDirectory for PgUserDirectory {
    async fn find_by_id(&self, id: &str) -> anyhow::Result<Option<User>> {
        repo::find_by_id(&self.pool, id).await
    }

    async fn update_image(&self, id: &str, key: &str) -> anyhow::Result<User> {
        repo::update_image(&self.pool, id, key).await
    }
}
