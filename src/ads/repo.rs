use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

/// Classified ad record. `created_at` and `owner_id` are set at insert and
/// never change afterwards.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Ad {
    pub id: i64,
    pub title: String,
    pub description: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    pub owner_id: i64,
}

impl Ad {
    pub async fn create(
        db: &PgPool,
        title: &str,
        description: &str,
        owner_id: i64,
    ) -> sqlx::Result<Ad> {
        sqlx::query_as::<_, Ad>(
            r#"
            INSERT INTO ads (title, description, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, title, description, created_at, owner_id
            "#,
        )
        .bind(title)
        .bind(description)
        .bind(owner_id)
        .fetch_one(db)
        .await
    }

    pub async fn get(db: &PgPool, id: i64) -> sqlx::Result<Option<Ad>> {
        sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, title, description, created_at, owner_id
            FROM ads
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(db)
        .await
    }

    /// Partial update in a single statement; `None` keeps the stored value.
    /// Returns `None` when the ad no longer exists.
    pub async fn update(
        db: &PgPool,
        id: i64,
        title: Option<&str>,
        description: Option<&str>,
    ) -> sqlx::Result<Option<Ad>> {
        sqlx::query_as::<_, Ad>(
            r#"
            UPDATE ads
            SET title = COALESCE($2, title),
                description = COALESCE($3, description)
            WHERE id = $1
            RETURNING id, title, description, created_at, owner_id
            "#,
        )
        .bind(id)
        .bind(title)
        .bind(description)
        .fetch_optional(db)
        .await
    }

    pub async fn delete(db: &PgPool, id: i64) -> sqlx::Result<bool> {
        let result = sqlx::query(r#"DELETE FROM ads WHERE id = $1"#)
            .bind(id)
            .execute(db)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn list_by_owner(
        db: &PgPool,
        owner_id: i64,
        limit: i64,
        offset: i64,
    ) -> sqlx::Result<Vec<Ad>> {
        sqlx::query_as::<_, Ad>(
            r#"
            SELECT id, title, description, created_at, owner_id
            FROM ads
            WHERE owner_id = $1
            ORDER BY created_at DESC
            LIMIT $2 OFFSET $3
            "#,
        )
        .bind(owner_id)
        .bind(limit)
        .bind(offset)
        .fetch_all(db)
        .await
    }
}
