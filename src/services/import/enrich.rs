use crate::services::providers::CatalogProvider;

/// Fetches the runtime for a matched movie. Failures are soft: a row without
/// a runtime is still importable.
pub async fn movie_runtime(catalog: &dyn CatalogProvider, movie_id: i64) -> Option<u32> {
    match catalog.movie_details(movie_id).await {
        Ok(details) => details.runtime,
        Err(e) => {
            tracing::debug!(movie_id, error = %e, "Runtime lookup failed");
            None
        }
    }
}

/// Maps genre ids through the catalog's genre table, dropping ids the table
/// does not know. A failed table fetch degrades to no genres.
pub async fn genre_names(catalog: &dyn CatalogProvider, genre_ids: &[i64]) -> Vec<String> {
    if genre_ids.is_empty() {
        return Vec::new();
    }

    let table = match catalog.genre_table().await {
        Ok(table) => table,
        Err(e) => {
            tracing::debug!(error = %e, "Genre table fetch failed");
            return Vec::new();
        }
    };

    genre_ids
        .iter()
        .filter_map(|id| table.get(id).cloned())
        .collect()
}
