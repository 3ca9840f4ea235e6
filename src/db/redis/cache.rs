use std::fmt::Display;
use std::future::Future;

use redis::{AsyncCommands, Client};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tokio::sync::mpsc;

use crate::error::{AppError, AppResult};

/// Keys for cached catalog responses.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    /// Search results for a cleaned title query, optionally pinned to a year.
    MovieSearch { query: String, year: Option<i32> },
    /// Detail record for one catalog movie.
    MovieDetails(i64),
    /// The catalog's genre id → name table.
    GenreTable,
}

impl Display for CacheKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CacheKey::MovieSearch { query, year } => match year {
                Some(year) => write!(f, "search:{}:{}", year, query.to_lowercase()),
                None => write!(f, "search:any:{}", query.to_lowercase()),
            },
            CacheKey::MovieDetails(movie_id) => write!(f, "movie:{}", movie_id),
            CacheKey::GenreTable => write!(f, "genres"),
        }
    }
}

/// Creates a Redis client for caching
pub fn create_redis_client(redis_url: &str) -> anyhow::Result<Client> {
    let client = Client::open(redis_url)?;
    Ok(client)
}

/// Message for asynchronous cache writes
struct CacheWrite {
    key: String,
    value: String,
    ttl: u64,
}

/// Write-behind cache over Redis.
///
/// Reads are awaited inline; writes go through a background task so a slow
/// Redis never delays a catalog response.
#[derive(Clone)]
pub struct Cache {
    redis_client: Client,
    write_tx: mpsc::UnboundedSender<CacheWrite>,
}

/// Handle for gracefully shutting down the cache writer
pub struct CacheWriterHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl CacheWriterHandle {
    /// Signals the writer task to flush pending writes and stop.
    pub async fn shutdown(self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

impl Cache {
    /// Creates a cache and spawns its background write task.
    pub async fn new(redis_client: Client) -> (Self, CacheWriterHandle) {
        let (write_tx, write_rx) = mpsc::unbounded_channel();
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let client = redis_client.clone();
        tokio::spawn(async move {
            Self::writer_task(client, write_rx, shutdown_rx).await;
        });

        let cache = Self {
            redis_client,
            write_tx,
        };

        (cache, CacheWriterHandle { shutdown_tx })
    }

    /// Drains the write channel until shut down, flushing whatever is still
    /// queued before exiting.
    async fn writer_task(
        client: Client,
        mut write_rx: mpsc::UnboundedReceiver<CacheWrite>,
        mut shutdown_rx: mpsc::Receiver<()>,
    ) {
        loop {
            tokio::select! {
                Some(write) = write_rx.recv() => {
                    if let Err(e) = Self::write_to_redis(&client, write).await {
                        tracing::error!(error = %e, "Cache write failed");
                    }
                }
                _ = shutdown_rx.recv() => {
                    while let Ok(write) = write_rx.try_recv() {
                        if let Err(e) = Self::write_to_redis(&client, write).await {
                            tracing::error!(error = %e, "Cache write failed during shutdown flush");
                        }
                    }
                    tracing::info!("Cache writer stopped");
                    break;
                }
            }
        }
    }

    async fn write_to_redis(client: &Client, write: CacheWrite) -> AppResult<()> {
        let mut conn = client.get_multiplexed_async_connection().await?;
        let _: () = conn.set_ex(write.key, write.value, write.ttl).await?;
        Ok(())
    }

    /// Retrieves a cached value by key, `None` on a miss.
    pub async fn get_from_cache<T: DeserializeOwned>(
        &self,
        key: &CacheKey,
    ) -> AppResult<Option<T>> {
        let mut conn = self.redis_client.get_multiplexed_async_connection().await?;
        let cached: Option<String> = conn.get(key.to_string()).await?;

        match cached {
            Some(json) => {
                let value = serde_json::from_str(&json).map_err(|e| {
                    AppError::Internal(format!("Cache deserialization error: {}", e))
                })?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Queues a cache write without waiting for it to land.
    pub fn set_in_background<T: Serialize>(&self, key: &CacheKey, value: &T, ttl: u64) {
        let json = match serde_json::to_string(value) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(error = %e, "Cache serialization error");
                return;
            }
        };

        let write = CacheWrite {
            key: key.to_string(),
            value: json,
            ttl,
        };

        if self.write_tx.send(write).is_err() {
            tracing::error!(key = %key, "Cache writer channel closed");
        }
    }

    /// Read-through helper: returns the cached value when present, otherwise
    /// awaits `fetch`, schedules a background write, and returns the fresh
    /// value. A failed cache read falls through to the fetch instead of
    /// failing the caller.
    pub async fn get_or_fetch<T, F>(&self, key: &CacheKey, ttl: u64, fetch: F) -> AppResult<T>
    where
        T: Serialize + DeserializeOwned,
        F: Future<Output = AppResult<T>>,
    {
        match self.get_from_cache(key).await {
            Ok(Some(hit)) => return Ok(hit),
            Ok(None) => {}
            Err(e) => tracing::warn!(key = %key, error = %e, "Cache read failed"),
        }

        let value = fetch.await?;
        self.set_in_background(key, &value, ttl);
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cache_key_display_search_with_year() {
        let key = CacheKey::MovieSearch {
            query: "Inception".to_string(),
            year: Some(2010),
        };
        assert_eq!(key.to_string(), "search:2010:inception");
    }

    #[test]
    fn cache_key_display_search_without_year() {
        let key = CacheKey::MovieSearch {
            query: "The Matrix".to_string(),
            year: None,
        };
        assert_eq!(key.to_string(), "search:any:the matrix");
    }

    #[test]
    fn cache_key_display_details_and_genres() {
        assert_eq!(CacheKey::MovieDetails(27205).to_string(), "movie:27205");
        assert_eq!(CacheKey::GenreTable.to_string(), "genres");
    }
}
