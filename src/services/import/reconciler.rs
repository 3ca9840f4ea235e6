use std::collections::HashMap;

use chrono::NaiveDate;
use uuid::Uuid;

use crate::db::WatchedMovieStore;
use crate::models::{
    FieldPatch, ImportRow, ImportType, RowError, RowOutcome, WatchMethod, WatchedMovieDraft,
    WatchedMovieRecord,
};
use crate::services::providers::CatalogProvider;

use super::{enrich, matcher, rating};

/// One user's records keyed by catalog movie id, loaded once per run.
///
/// The index is the uniqueness authority: a movie id present here gets an
/// update, anything else gets an insert. Inserts register themselves so a
/// duplicate title later in the same file coalesces into the record the
/// earlier row just created.
pub struct RecordIndex {
    by_movie_id: HashMap<i64, Uuid>,
}

impl RecordIndex {
    pub fn from_records(records: &[WatchedMovieRecord]) -> Self {
        Self {
            by_movie_id: records
                .iter()
                .map(|record| (record.doc.movie_id, record.id))
                .collect(),
        }
    }

    fn get(&self, movie_id: i64) -> Option<Uuid> {
        self.by_movie_id.get(&movie_id).copied()
    }

    fn register(&mut self, movie_id: i64, record_id: Uuid) {
        self.by_movie_id.insert(movie_id, record_id);
    }
}

/// Matches, enriches and writes one import row.
///
/// Merge policy on update: every catalog-derived and user-entered field from
/// the new row overwrites the stored record, except that a missing
/// watched-date is omitted from the patch (a plain watched-list import must
/// not erase a previously recorded diary date) and empty tags leave stored
/// notes alone.
pub async fn reconcile_row(
    catalog: &dyn CatalogProvider,
    store: &dyn WatchedMovieStore,
    index: &mut RecordIndex,
    user_id: &str,
    row: &ImportRow,
    import_type: ImportType,
) -> Result<RowOutcome, RowError> {
    let Some(movie) = matcher::find_movie(catalog, &row.title, &row.year).await else {
        return Err(RowError::NoMatch {
            title: row.title.clone(),
            year: row.year.clone(),
        });
    };

    let runtime = enrich::movie_runtime(catalog, movie.id).await;
    let genres = enrich::genre_names(catalog, &movie.genre_ids).await;

    let watched_date = match (&row.watched_date, import_type) {
        (Some(raw), ImportType::Diary) => {
            let parsed = NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|_| {
                RowError::BadWatchedDate {
                    title: row.title.clone(),
                    value: raw.clone(),
                }
            })?;
            FieldPatch::Value(parsed)
        }
        _ => FieldPatch::Omit,
    };

    let draft = WatchedMovieDraft {
        movie_id: movie.id,
        movie_title: movie.title.clone(),
        movie_poster: movie.poster_path.clone(),
        movie_release_date: movie.release_date.clone(),
        movie_genres: genres,
        runtime,
        watched_date,
        rating: FieldPatch::from_option(rating::normalize_rating(
            row.rating.as_deref().unwrap_or_default(),
        )),
        notes: match row.tags.as_deref().map(str::trim) {
            Some(tags) if !tags.is_empty() => FieldPatch::Value(tags.to_string()),
            _ => FieldPatch::Omit,
        },
        method: WatchMethod::Other,
        platform: FieldPatch::Null,
    };

    match index.get(movie.id) {
        Some(record_id) => {
            store
                .update(user_id, record_id, &draft)
                .await
                .map_err(|source| RowError::Reconcile {
                    title: row.title.clone(),
                    source,
                })?;
            Ok(RowOutcome::Updated)
        }
        None => {
            let record =
                store
                    .insert(user_id, &draft)
                    .await
                    .map_err(|source| RowError::Reconcile {
                        title: row.title.clone(),
                        source,
                    })?;
            index.register(movie.id, record.id);
            Ok(RowOutcome::Imported)
        }
    }
}
