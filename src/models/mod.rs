mod diary;
mod import;
mod movie;
mod stats;
mod watched;

pub use diary::DiaryMonth;
pub use import::{ImportRow, ImportSummary, ImportType, RowError, RowOutcome};
pub use movie::{CatalogMovie, MovieDetails};
pub use stats::{GenreCount, MovieStats};
pub use watched::{FieldPatch, WatchMethod, WatchedMovieDoc, WatchedMovieDraft, WatchedMovieRecord};
