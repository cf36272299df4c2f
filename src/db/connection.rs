use crate::config::Config;
use crate::db::container::{Container, StoreError, stamp};
use async_trait::async_trait;
use serde_json::Value;
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::types::Json;
use sqlx::{Pool, Postgres};
use std::str::FromStr;
use std::time::Duration;
use tokio::time::interval;

pub type DbPool = Pool<Postgres>;

pub async fn init_db(config: &Config) -> Result<DbPool, sqlx::Error> {
    let options = PgConnectOptions::from_str(&config.store_endpoint)?
        .password(&config.store_key)
        .database(&config.store_database);

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .max_lifetime(Duration::from_secs(30 * 60))
        .idle_timeout(Duration::from_secs(10 * 60))
        .connect_with(options)
        .await?;

    Ok(pool)
}

/// Logs connectivity failures once a minute for the life of the process.
pub fn spawn_health_check(pool: DbPool) {
    tokio::spawn(async move {
        let mut interval = interval(Duration::from_secs(60));
        loop {
            interval.tick().await;
            match pool.acquire().await {
                Ok(conn) => {
                    drop(conn);
                }
                Err(e) => {
                    error!("Database connection health check failed: {}", e);
                }
            }
        }
    });
}

/// A collection stored as a Postgres table of JSONB documents.
pub struct PgContainer {
    pool: DbPool,
    name: String,
}

impl PgContainer {
    /// Creates the backing table if needed. `name` must already be a plain
    /// identifier.
    pub async fn open(pool: DbPool, name: &str) -> Result<Self, sqlx::Error> {
        sqlx::query(&format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{name}" (
                id TEXT NOT NULL,
                partition_key TEXT NOT NULL,
                body JSONB NOT NULL,
                PRIMARY KEY (partition_key, id)
            )
            "#
        ))
        .execute(&pool)
        .await?;

        info!("Collection {name} ready");

        Ok(Self {
            pool,
            name: name.to_string(),
        })
    }
}

#[async_trait]
impl Container for PgContainer {
    fn name(&self) -> &str {
        &self.name
    }

    async fn read_item(&self, id: &str, partition_key: &str) -> Result<Value, StoreError> {
        let row = sqlx::query_scalar::<_, Json<Value>>(&format!(
            r#"SELECT body FROM "{}" WHERE partition_key = $1 AND id = $2"#,
            self.name
        ))
        .bind(partition_key)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(|body| body.0).ok_or(StoreError::NotFound)
    }

    async fn create_item(
        &self,
        id: &str,
        partition_key: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let row = sqlx::query_scalar::<_, Json<Value>>(&format!(
            r#"
            INSERT INTO "{}" (id, partition_key, body) VALUES ($1, $2, $3)
            ON CONFLICT (partition_key, id) DO NOTHING
            RETURNING body
            "#,
            self.name
        ))
        .bind(id)
        .bind(partition_key)
        .bind(Json(stamp(body)))
        .fetch_optional(&self.pool)
        .await?;

        row.map(|body| body.0).ok_or(StoreError::Conflict)
    }

    async fn upsert_item(
        &self,
        id: &str,
        partition_key: &str,
        body: Value,
    ) -> Result<Value, StoreError> {
        let row = sqlx::query_scalar::<_, Json<Value>>(&format!(
            r#"
            INSERT INTO "{}" (id, partition_key, body) VALUES ($1, $2, $3)
            ON CONFLICT (partition_key, id) DO UPDATE SET body = EXCLUDED.body
            RETURNING body
            "#,
            self.name
        ))
        .bind(id)
        .bind(partition_key)
        .bind(Json(stamp(body)))
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn read_all_items(&self) -> Result<Vec<Value>, StoreError> {
        let rows = sqlx::query_scalar::<_, Json<Value>>(&format!(
            r#"SELECT body FROM "{}" ORDER BY partition_key, id"#,
            self.name
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(|body| body.0).collect())
    }
}
