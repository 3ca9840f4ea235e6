use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// How a movie was watched. Serialized capitalized to match the documents
/// the original web client wrote.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum WatchMethod {
    Cinema,
    Platform,
    Other,
}

/// The body of a user's watched-movie document.
///
/// Catalog-derived fields are snapshots taken at write time; user-entered
/// fields carry the diary metadata. Wire format is camelCase.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedMovieDoc {
    pub movie_id: i64,
    pub movie_title: String,
    #[serde(default)]
    pub movie_poster: Option<String>,
    #[serde(default)]
    pub movie_release_date: Option<String>,
    #[serde(default)]
    pub movie_genres: Vec<String>,
    #[serde(default)]
    pub runtime: Option<u32>,
    #[serde(default)]
    pub watched_date: Option<NaiveDate>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    pub method: WatchMethod,
    #[serde(default)]
    pub platform: Option<String>,
}

/// A stored document plus its store-managed metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WatchedMovieRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub doc: WatchedMovieDoc,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Three-state write-payload field: absent, explicit null, or a value.
///
/// The store treats `Omit` as "leave the stored field alone" and `Null` as
/// "overwrite with null". Inserts simply have nothing to write for `Omit`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FieldPatch<T> {
    #[default]
    Omit,
    Null,
    Value(T),
}

impl<T> FieldPatch<T> {
    /// `None` becomes an explicit null, not an omission.
    pub fn from_option(value: Option<T>) -> Self {
        match value {
            Some(v) => FieldPatch::Value(v),
            None => FieldPatch::Null,
        }
    }

    pub fn is_omitted(&self) -> bool {
        matches!(self, FieldPatch::Omit)
    }
}

/// Write payload for one watched-movie record.
///
/// Used both for inserts (the document is created from it) and for updates
/// (the document is merged with it, omitted fields untouched).
#[derive(Debug, Clone, PartialEq)]
pub struct WatchedMovieDraft {
    pub movie_id: i64,
    pub movie_title: String,
    pub movie_poster: Option<String>,
    pub movie_release_date: Option<String>,
    pub movie_genres: Vec<String>,
    pub runtime: Option<u32>,
    pub watched_date: FieldPatch<NaiveDate>,
    pub rating: FieldPatch<u8>,
    pub notes: FieldPatch<String>,
    pub method: WatchMethod,
    pub platform: FieldPatch<String>,
}

impl WatchedMovieDraft {
    /// Flattens the draft into a JSON document, stripping omitted fields.
    ///
    /// This is the only place the draft is turned into a write payload, so
    /// Postgres JSONB merges and the in-memory store merge identically.
    pub fn to_document(&self) -> Value {
        let mut doc = Map::new();
        doc.insert("movieId".to_string(), self.movie_id.into());
        doc.insert("movieTitle".to_string(), self.movie_title.clone().into());
        doc.insert("moviePoster".to_string(), self.movie_poster.clone().into());
        doc.insert(
            "movieReleaseDate".to_string(),
            self.movie_release_date.clone().into(),
        );
        doc.insert("movieGenres".to_string(), self.movie_genres.clone().into());
        doc.insert("runtime".to_string(), self.runtime.into());
        put_patch(&mut doc, "watchedDate", &self.watched_date);
        put_patch(&mut doc, "rating", &self.rating);
        put_patch(&mut doc, "notes", &self.notes);
        doc.insert(
            "method".to_string(),
            serde_json::to_value(self.method).unwrap_or(Value::Null),
        );
        put_patch(&mut doc, "platform", &self.platform);
        Value::Object(doc)
    }
}

fn put_patch<T: Serialize>(doc: &mut Map<String, Value>, key: &str, patch: &FieldPatch<T>) {
    match patch {
        FieldPatch::Omit => {}
        FieldPatch::Null => {
            doc.insert(key.to_string(), Value::Null);
        }
        FieldPatch::Value(v) => {
            doc.insert(
                key.to_string(),
                serde_json::to_value(v).unwrap_or(Value::Null),
            );
        }
    }
}
