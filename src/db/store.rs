use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{WatchedMovieDoc, WatchedMovieDraft, WatchedMovieRecord};

/// Per-user collection of watched-movie documents.
///
/// The store is deliberately dumb: full-collection read, insert, and
/// field-level update. Uniqueness per (user, movie) is the reconciler's
/// job, not the store's.
#[async_trait::async_trait]
pub trait WatchedMovieStore: Send + Sync {
    /// Full-collection read of one user's records, watched date descending
    /// with undated records last.
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<WatchedMovieRecord>>;

    /// Inserts a new record, returning it with store-assigned id and
    /// timestamps.
    async fn insert(
        &self,
        user_id: &str,
        draft: &WatchedMovieDraft,
    ) -> AppResult<WatchedMovieRecord>;

    /// Field-level update: fields the draft omits are left untouched;
    /// `updated_at` is refreshed, `created_at` is not.
    async fn update(
        &self,
        user_id: &str,
        record_id: Uuid,
        draft: &WatchedMovieDraft,
    ) -> AppResult<()>;
}

/// Postgres-backed store. Documents live in a JSONB column so updates can
/// merge patches with `doc || $patch`, mirroring the hosted document store
/// this schema replaced.
pub struct PgWatchedMovieStore {
    pool: PgPool,
}

impl PgWatchedMovieStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct WatchedMovieRow {
    id: Uuid,
    doc: Json<WatchedMovieDoc>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl WatchedMovieRow {
    fn into_record(self) -> WatchedMovieRecord {
        WatchedMovieRecord {
            id: self.id,
            doc: self.doc.0,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[async_trait::async_trait]
impl WatchedMovieStore for PgWatchedMovieStore {
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<WatchedMovieRecord>> {
        let rows = sqlx::query_as::<_, WatchedMovieRow>(
            r#"
            SELECT id, doc, created_at, updated_at
            FROM watched_movies
            WHERE user_id = $1
            ORDER BY doc->>'watchedDate' DESC NULLS LAST, updated_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(WatchedMovieRow::into_record).collect())
    }

    async fn insert(
        &self,
        user_id: &str,
        draft: &WatchedMovieDraft,
    ) -> AppResult<WatchedMovieRecord> {
        let id = Uuid::new_v4();
        let now = Utc::now();
        let document = draft.to_document();

        sqlx::query(
            r#"
            INSERT INTO watched_movies (id, user_id, movie_id, doc, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            "#,
        )
        .bind(id)
        .bind(user_id)
        .bind(draft.movie_id)
        .bind(Json(&document))
        .bind(now)
        .execute(&self.pool)
        .await?;

        let doc: WatchedMovieDoc = serde_json::from_value(document)
            .map_err(|e| AppError::Internal(format!("Stored document failed to decode: {}", e)))?;

        Ok(WatchedMovieRecord {
            id,
            doc,
            created_at: now,
            updated_at: now,
        })
    }

    async fn update(
        &self,
        user_id: &str,
        record_id: Uuid,
        draft: &WatchedMovieDraft,
    ) -> AppResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE watched_movies
            SET doc = doc || $1, movie_id = $2, updated_at = $3
            WHERE id = $4 AND user_id = $5
            "#,
        )
        .bind(Json(&draft.to_document()))
        .bind(draft.movie_id)
        .bind(Utc::now())
        .bind(record_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!(
                "Watched movie {} not found",
                record_id
            )));
        }

        Ok(())
    }
}
