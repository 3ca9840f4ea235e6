use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Which Letterboxd export file is being imported.
///
/// Diary exports carry a specific watched date per row; the plain watched
/// list does not.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ImportType {
    Diary,
    Watched,
}

/// One CSV line, extracted from the Letterboxd export headers.
#[derive(Debug, Clone, PartialEq)]
pub struct ImportRow {
    pub title: String,
    pub year: String,
    pub watched_date: Option<String>,
    pub rating: Option<String>,
    pub tags: Option<String>,
}

impl ImportRow {
    /// Pulls the columns this pipeline consumes out of a parsed row.
    /// Unknown columns (`Letterboxd URI`, `Rewatch`, ...) are ignored.
    pub fn from_fields(fields: &HashMap<String, String>) -> Self {
        let required = |key: &str| fields.get(key).cloned().unwrap_or_default();
        let optional = |key: &str| {
            fields
                .get(key)
                .map(|value| value.trim())
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };

        Self {
            title: required("Name"),
            year: required("Year"),
            watched_date: optional("Watched Date"),
            rating: optional("Rating"),
            tags: optional("Tags"),
        }
    }
}

/// What reconciling one row did to the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowOutcome {
    Imported,
    Updated,
}

/// A single row's failure. Rows fail independently; the orchestrator folds
/// these into the summary and keeps going.
#[derive(Debug, thiserror::Error)]
pub enum RowError {
    #[error("Movie not found on TMDB: {title} ({year})")]
    NoMatch { title: String, year: String },

    #[error("Error processing {title}: invalid watched date {value:?}")]
    BadWatchedDate { title: String, value: String },

    #[error("Error processing {title}: {source}")]
    Reconcile {
        title: String,
        #[source]
        source: AppError,
    },
}

/// Counters and per-row error messages returned to the caller.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ImportSummary {
    pub processed: u32,
    pub imported: u32,
    pub updated: u32,
    pub failed: u32,
    pub errors: Vec<String>,
}

impl ImportSummary {
    /// Folds one row result into the counters.
    pub fn absorb(&mut self, result: Result<RowOutcome, RowError>) {
        self.processed += 1;
        match result {
            Ok(RowOutcome::Imported) => self.imported += 1,
            Ok(RowOutcome::Updated) => self.updated += 1,
            Err(error) => {
                self.failed += 1;
                self.errors.push(error.to_string());
            }
        }
    }
}
