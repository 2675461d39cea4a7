//! Bounded Postgres connection pool. Each worker borrows one connection
//! for its per-market transaction and returns it on commit/rollback;
//! `max_connections` keeps the pool under the hosting provider's
//! per-service connection limit (reference deployment: <= 10).

use sqlx::postgres::{PgPool, PgPoolOptions};

pub async fn connect(database_url: &str, pool_size: u32) -> anyhow::Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(pool_size)
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;

    Ok(pool)
}
