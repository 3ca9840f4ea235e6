use crate::models::CatalogMovie;
use crate::services::providers::CatalogProvider;

/// Strips characters the catalog's search tokenizer handles badly and
/// collapses whitespace runs. Keeps letters, digits, whitespace and `-':._`.
pub fn clean_title(title: &str) -> String {
    let kept: String = title
        .chars()
        .filter(|c| {
            c.is_alphanumeric() || c.is_whitespace() || matches!(c, '_' | '-' | '\'' | ':' | '.')
        })
        .collect();
    kept.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Applies the year tie-break policy over search candidates:
///
/// 1. first candidate whose release year equals the target exactly,
/// 2. else the first within one year of the target,
/// 3. else the first candidate (the catalog's own relevance order).
///
/// Candidates without a release date never participate in the year
/// comparisons.
pub fn pick_best(candidates: &[CatalogMovie], target_year: Option<i32>) -> Option<&CatalogMovie> {
    if let Some(target) = target_year {
        if let Some(exact) = candidates
            .iter()
            .find(|movie| movie.release_year() == Some(target))
        {
            return Some(exact);
        }

        if let Some(close) = candidates.iter().find(|movie| {
            movie
                .release_year()
                .is_some_and(|year| (year - target).abs() <= 1)
        }) {
            return Some(close);
        }
    }

    candidates.first()
}

/// Searches the catalog for the row's movie and picks the best candidate.
///
/// Search failures are logged and reported as "no match" so one bad lookup
/// cannot abort the whole run.
pub async fn find_movie(
    catalog: &dyn CatalogProvider,
    title: &str,
    year: &str,
) -> Option<CatalogMovie> {
    let query = clean_title(title);
    let target_year = year.trim().parse::<i32>().ok();

    let candidates = match catalog.search_movies(&query, target_year).await {
        Ok(candidates) => candidates,
        Err(e) => {
            tracing::warn!(title = %title, year = %year, error = %e, "Catalog search failed");
            return None;
        }
    };

    pick_best(&candidates, target_year).cloned()
}
