//! Letterboxd CSV import pipeline.
//!
//! Raw CSV text → parser → rows → per-row reconciliation (catalog match →
//! enrichment → rating normalization → store write) → summary counters.
//!
//! Rows are processed strictly one at a time: the rate limiter spaces the
//! catalog traffic, and sequential writes mean the per-run record index
//! never races with itself.

pub mod csv;
pub mod enrich;
pub mod matcher;
pub mod rating;
pub mod reconciler;

use crate::db::WatchedMovieStore;
use crate::error::{AppError, AppResult};
use crate::models::{ImportRow, ImportSummary, ImportType};
use crate::services::providers::CatalogProvider;
use crate::services::rate_limit::RateLimiter;

use reconciler::RecordIndex;

/// Runs one Letterboxd import for an authenticated user.
///
/// Structural failures (nothing parsed, collection read failure) abort with
/// an error. Anything that goes wrong inside a single row is recorded in the
/// summary and the loop moves on, so the caller always gets full accounting.
pub async fn run_import(
    catalog: &dyn CatalogProvider,
    store: &dyn WatchedMovieStore,
    limiter: &dyn RateLimiter,
    user_id: &str,
    csv_content: &str,
    import_type: ImportType,
) -> AppResult<ImportSummary> {
    let rows: Vec<ImportRow> = csv::parse_rows(csv_content)
        .iter()
        .map(ImportRow::from_fields)
        .collect();

    if rows.is_empty() {
        return Err(AppError::InvalidInput("No movies found in CSV".to_string()));
    }

    let existing = store.list_for_user(user_id).await?;
    let mut index = RecordIndex::from_records(&existing);

    tracing::info!(
        user_id,
        rows = rows.len(),
        existing = existing.len(),
        import_type = ?import_type,
        "Starting Letterboxd import"
    );

    let mut summary = ImportSummary::default();
    for row in &rows {
        limiter.acquire().await;

        let outcome =
            reconciler::reconcile_row(catalog, store, &mut index, user_id, row, import_type).await;
        if let Err(error) = &outcome {
            tracing::warn!(title = %row.title, %error, "Import row failed");
        }
        summary.absorb(outcome);
    }

    tracing::info!(
        imported = summary.imported,
        updated = summary.updated,
        failed = summary.failed,
        "Letterboxd import finished"
    );

    Ok(summary)
}
