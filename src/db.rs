use std::str::FromStr;

use anyhow::Context;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::{postgres::PgPoolOptions, types::Json, FromRow, PgPool};
use tracing::debug;
use uuid::Uuid;

use crate::{
    config::AppConfig,
    records::repo::{without_client_id, Collection, Document, DocumentStore, InsertResult},
    users::{
        repo::UserStore,
        repo_types::{InsertOutcome, Role, User},
    },
};

/// Postgres-backed store for users and document collections.
#[derive(Clone)]
pub struct PgStore {
    db: PgPool,
}

impl PgStore {
    pub async fn connect(config: &AppConfig) -> anyhow::Result<Self> {
        let db = PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;
        Ok(Self { db })
    }

    pub async fn migrate(&self) -> anyhow::Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.db)
            .await
            .context("run migrations")?;
        Ok(())
    }

    pub async fn ping(&self) -> anyhow::Result<()> {
        sqlx::query("SELECT 1")
            .execute(&self.db)
            .await
            .context("ping database")?;
        Ok(())
    }
}

#[derive(Debug, FromRow)]
struct UserRow {
    email: String,
    name: Option<String>,
    password_hash: String,
    role: String,
    created_at_ms: i64,
}

impl TryFrom<UserRow> for User {
    type Error = anyhow::Error;

    fn try_from(row: UserRow) -> anyhow::Result<Self> {
        Ok(User {
            role: Role::from_str(&row.role)?,
            email: row.email,
            name: row.name,
            password_hash: row.password_hash,
            created_at_epoch_millis: row.created_at_ms,
        })
    }
}

#[async_trait]
impl UserStore for PgStore {
    async fn find_by_email(&self, email: &str) -> anyhow::Result<Option<User>> {
        let row = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, name, password_hash, role, created_at_ms
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db)
        .await
        .context("find user by email")?;
        row.map(User::try_from).transpose()
    }

    async fn list(&self) -> anyhow::Result<Vec<User>> {
        let rows = sqlx::query_as::<_, UserRow>(
            r#"
            SELECT email, name, password_hash, role, created_at_ms
            FROM users
            "#,
        )
        .fetch_all(&self.db)
        .await
        .context("list users")?;
        rows.into_iter().map(User::try_from).collect()
    }

    async fn insert_if_absent(&self, user: User) -> anyhow::Result<InsertOutcome> {
        let inserted = sqlx::query_as::<_, UserRow>(
            r#"
            INSERT INTO users (email, name, password_hash, role, created_at_ms)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (email) DO NOTHING
            RETURNING email, name, password_hash, role, created_at_ms
            "#,
        )
        .bind(&user.email)
        .bind(&user.name)
        .bind(&user.password_hash)
        .bind(user.role.as_str())
        .bind(user.created_at_epoch_millis)
        .fetch_optional(&self.db)
        .await
        .context("insert user")?;

        match inserted {
            Some(row) => Ok(InsertOutcome::Created(row.try_into()?)),
            None => {
                debug!(email = %user.email, "insert skipped, email already present");
                let existing = self
                    .find_by_email(&user.email)
                    .await?
                    .context("conflicting user disappeared")?;
                Ok(InsertOutcome::Existing(existing))
            }
        }
    }
}

#[derive(Debug, FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Document {
    fn from(row: DocumentRow) -> Self {
        Document {
            id: row.id,
            body: row.body.0,
        }
    }
}

#[async_trait]
impl DocumentStore for PgStore {
    async fn insert(
        &self,
        collection: Collection,
        body: Map<String, Value>,
    ) -> anyhow::Result<InsertResult> {
        let id = Uuid::new_v4();
        let sql = format!("INSERT INTO {} (id, body) VALUES ($1, $2)", collection.table());
        sqlx::query(&sql)
            .bind(id)
            .bind(Json(without_client_id(body)))
            .execute(&self.db)
            .await
            .with_context(|| format!("insert into {}", collection.table()))?;
        Ok(InsertResult {
            acknowledged: true,
            inserted_id: id,
        })
    }

    async fn find_all(&self, collection: Collection) -> anyhow::Result<Vec<Document>> {
        self.find_page(collection, 0, None).await
    }

    async fn find_page(
        &self,
        collection: Collection,
        skip: i64,
        limit: Option<i64>,
    ) -> anyhow::Result<Vec<Document>> {
        let sql = format!(
            "SELECT id, body FROM {} ORDER BY seq LIMIT $1 OFFSET $2",
            collection.table()
        );
        let rows = sqlx::query_as::<_, DocumentRow>(&sql)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.db)
            .await
            .with_context(|| format!("select from {}", collection.table()))?;
        Ok(rows.into_iter().map(Document::from).collect())
    }
}
