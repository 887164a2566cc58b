//! Authors repository

use async_trait::async_trait;
use sqlx::{Pool, Postgres};

use crate::{error::AppResult, models::Author, repository::AuthorStore};

#[derive(Clone)]
pub struct AuthorsRepository {
    pool: Pool<Postgres>,
}

impl AuthorsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Count stored authors
    pub async fn count(&self) -> AppResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*)::bigint FROM authors")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}

#[async_trait]
impl AuthorStore for AuthorsRepository {
    async fn save(&self, author: &Author) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO authors (id, name, personal_name)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE
               SET name = EXCLUDED.name,
                   personal_name = EXCLUDED.personal_name
            "#,
        )
        .bind(&author.id)
        .bind(&author.name)
        .bind(&author.personal_name)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find_by_id(&self, id: &str) -> AppResult<Option<Author>> {
        let author = sqlx::query_as::<_, Author>(
            "SELECT id, name, personal_name FROM authors WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(author)
    }
}
