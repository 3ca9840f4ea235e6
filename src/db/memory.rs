use std::cmp::Reverse;
use std::collections::HashMap;

use chrono::Utc;
use serde_json::Value;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{WatchedMovieDoc, WatchedMovieDraft, WatchedMovieRecord};

use super::store::WatchedMovieStore;

/// In-memory store for tests and for running the service without Postgres.
///
/// Updates merge `WatchedMovieDraft::to_document` into the stored document,
/// so the merge semantics are the same as the JSONB `||` the Postgres store
/// uses.
#[derive(Default)]
pub struct MemoryWatchedMovieStore {
    collections: Mutex<HashMap<String, Vec<WatchedMovieRecord>>>,
}

fn decode_error(e: serde_json::Error) -> AppError {
    AppError::Internal(format!("Stored document failed to decode: {}", e))
}

#[async_trait::async_trait]
impl WatchedMovieStore for MemoryWatchedMovieStore {
    async fn list_for_user(&self, user_id: &str) -> AppResult<Vec<WatchedMovieRecord>> {
        let collections = self.collections.lock().await;
        let mut records = collections.get(user_id).cloned().unwrap_or_default();
        records.sort_by_key(|record| Reverse(record.doc.watched_date));
        Ok(records)
    }

    async fn insert(
        &self,
        user_id: &str,
        draft: &WatchedMovieDraft,
    ) -> AppResult<WatchedMovieRecord> {
        let now = Utc::now();
        let doc: WatchedMovieDoc =
            serde_json::from_value(draft.to_document()).map_err(decode_error)?;
        let record = WatchedMovieRecord {
            id: Uuid::new_v4(),
            doc,
            created_at: now,
            updated_at: now,
        };

        let mut collections = self.collections.lock().await;
        collections
            .entry(user_id.to_string())
            .or_default()
            .push(record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        user_id: &str,
        record_id: Uuid,
        draft: &WatchedMovieDraft,
    ) -> AppResult<()> {
        let mut collections = self.collections.lock().await;
        let record = collections
            .get_mut(user_id)
            .and_then(|records| records.iter_mut().find(|r| r.id == record_id))
            .ok_or_else(|| AppError::NotFound(format!("Watched movie {} not found", record_id)))?;

        let mut merged = serde_json::to_value(&record.doc).map_err(decode_error)?;
        if let (Value::Object(existing), Value::Object(patch)) = (&mut merged, draft.to_document())
        {
            for (key, value) in patch {
                existing.insert(key, value);
            }
        }
        record.doc = serde_json::from_value(merged).map_err(decode_error)?;
        record.updated_at = Utc::now();
        Ok(())
    }
}
