use async_trait::async_trait;
use sqlx::{SqliteConnection, SqlitePool};

use postfeed_core::{LocalStore, PostRecord, StoreError};

/// SQLite-backed post cache.
pub struct PostRepository {
    pool: SqlitePool,
}

#[derive(sqlx::FromRow)]
struct PostRow {
    row_id: i64,
    id: i64,
    user_id: i64,
    title: String,
    view_count: i64,
    favorite: bool,
}

impl TryFrom<PostRow> for PostRecord {
    type Error = StoreError;

    fn try_from(row: PostRow) -> Result<Self, Self::Error> {
        let view_count = u32::try_from(row.view_count).map_err(|_| {
            StoreError::Corrupt(format!(
                "row {} has view_count {}",
                row.row_id, row.view_count
            ))
        })?;

        Ok(PostRecord {
            row_id: Some(row.row_id),
            id: row.id,
            user_id: row.user_id,
            title: row.title,
            view_count,
            favorite: row.favorite,
        })
    }
}

fn db_error(e: sqlx::Error) -> StoreError {
    StoreError::Database(e.to_string())
}

impl PostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn count(&self) -> Result<i64, StoreError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(count)
    }

    async fn insert_record(
        conn: &mut SqliteConnection,
        record: &PostRecord,
    ) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO posts (id, user_id, title, view_count, favorite) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(record.id)
        .bind(record.user_id)
        .bind(&record.title)
        .bind(i64::from(record.view_count))
        .bind(record.favorite)
        .execute(&mut *conn)
        .await?;
        Ok(())
    }
}

#[async_trait]
impl LocalStore for PostRepository {
    async fn read_all(&self) -> Result<Vec<PostRecord>, StoreError> {
        let rows: Vec<PostRow> = sqlx::query_as(
            "SELECT row_id, id, user_id, title, view_count, favorite FROM posts ORDER BY row_id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(db_error)?;

        rows.into_iter().map(PostRecord::try_from).collect()
    }

    async fn delete_all(&self) -> Result<(), StoreError> {
        sqlx::query("DELETE FROM posts")
            .execute(&self.pool)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn insert_all(&self, records: &[PostRecord]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;
        for record in records {
            Self::insert_record(&mut *tx, record)
                .await
                .map_err(db_error)?;
        }
        tx.commit().await.map_err(db_error)
    }

    async fn replace_all(&self, records: &[PostRecord]) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await.map_err(db_error)?;

        sqlx::query("DELETE FROM posts")
            .execute(&mut *tx)
            .await
            .map_err(db_error)?;

        for record in records {
            Self::insert_record(&mut *tx, record)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        tracing::debug!("Stored {} post(s)", records.len());
        Ok(())
    }
}
