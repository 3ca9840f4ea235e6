use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{GenreCount, MovieStats, WatchedMovieRecord};

const TOP_GENRE_COUNT: usize = 5;

/// Aggregates a user's collection into dashboard statistics.
///
/// `today` anchors the this-month / this-year counters; the route passes the
/// current date, tests pass a fixed one.
pub fn compute_stats(records: &[WatchedMovieRecord], today: NaiveDate) -> MovieStats {
    let mut total_runtime_minutes: u64 = 0;
    let mut rating_sum: u64 = 0;
    let mut movies_with_rating: u32 = 0;
    let mut movies_this_month: u32 = 0;
    let mut movies_this_year: u32 = 0;
    let mut genre_counts: HashMap<&str, u32> = HashMap::new();

    for record in records {
        let doc = &record.doc;

        if let Some(runtime) = doc.runtime {
            total_runtime_minutes += u64::from(runtime);
        }

        if let Some(rating) = doc.rating {
            rating_sum += u64::from(rating);
            movies_with_rating += 1;
        }

        if let Some(watched) = doc.watched_date {
            if watched.year() == today.year() {
                movies_this_year += 1;
                if watched.month() == today.month() {
                    movies_this_month += 1;
                }
            }
        }

        for genre in &doc.movie_genres {
            *genre_counts.entry(genre.as_str()).or_default() += 1;
        }
    }

    let average_rating = (movies_with_rating > 0).then(|| {
        let mean = rating_sum as f64 / f64::from(movies_with_rating);
        (mean * 10.0).round() / 10.0
    });

    let mut top_genres: Vec<GenreCount> = genre_counts
        .into_iter()
        .map(|(genre, count)| GenreCount {
            genre: genre.to_string(),
            count,
        })
        .collect();
    top_genres.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.genre.cmp(&b.genre)));
    top_genres.truncate(TOP_GENRE_COUNT);

    MovieStats {
        total_movies_watched: records.len() as u32,
        total_runtime_minutes,
        total_runtime_formatted: format_runtime(total_runtime_minutes),
        average_rating,
        movies_with_rating,
        movies_this_month,
        movies_this_year,
        top_genres,
    }
}

/// Humanizes a minute total: "2 days, 3 hours, 5 minutes".
pub fn format_runtime(total_minutes: u64) -> String {
    if total_minutes == 0 {
        return "0 minutes".to_string();
    }

    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let mut parts = Vec::new();
    if days > 0 {
        parts.push(format!("{} day{}", days, plural(days)));
    }
    if hours > 0 {
        parts.push(format!("{} hour{}", hours, plural(hours)));
    }
    if minutes > 0 {
        parts.push(format!("{} minute{}", minutes, plural(minutes)));
    }

    parts.join(", ")
}

fn plural(n: u64) -> &'static str {
    if n == 1 {
        ""
    } else {
        "s"
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{WatchMethod, WatchedMovieDoc};

    fn record(
        movie_id: i64,
        runtime: Option<u32>,
        rating: Option<u8>,
        watched_date: Option<NaiveDate>,
        genres: &[&str],
    ) -> WatchedMovieRecord {
        WatchedMovieRecord {
            id: Uuid::new_v4(),
            doc: WatchedMovieDoc {
                movie_id,
                movie_title: format!("Movie {}", movie_id),
                movie_poster: None,
                movie_release_date: None,
                movie_genres: genres.iter().map(|g| g.to_string()).collect(),
                runtime,
                watched_date,
                rating,
                notes: None,
                method: WatchMethod::Other,
                platform: None,
            },
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn empty_collection_yields_empty_stats() {
        let stats = compute_stats(&[], date(2021, 5, 15));
        assert_eq!(stats.total_movies_watched, 0);
        assert_eq!(stats.total_runtime_formatted, "0 minutes");
        assert_eq!(stats.average_rating, None);
        assert!(stats.top_genres.is_empty());
    }

    #[test]
    fn sums_runtime_and_averages_ratings() {
        let records = vec![
            record(1, Some(90), Some(9), None, &[]),
            record(2, Some(120), Some(6), None, &[]),
            record(3, None, None, None, &[]),
        ];
        let stats = compute_stats(&records, date(2021, 5, 15));

        assert_eq!(stats.total_movies_watched, 3);
        assert_eq!(stats.total_runtime_minutes, 210);
        assert_eq!(stats.total_runtime_formatted, "3 hours, 30 minutes");
        assert_eq!(stats.average_rating, Some(7.5));
        assert_eq!(stats.movies_with_rating, 2);
    }

    #[test]
    fn average_rating_rounds_to_one_decimal() {
        let records = vec![
            record(1, None, Some(9), None, &[]),
            record(2, None, Some(8), None, &[]),
            record(3, None, Some(8), None, &[]),
        ];
        let stats = compute_stats(&records, date(2021, 5, 15));
        assert_eq!(stats.average_rating, Some(8.3));
    }

    #[test]
    fn counts_this_month_and_this_year() {
        let records = vec![
            record(1, None, None, Some(date(2021, 5, 2)), &[]),
            record(2, None, None, Some(date(2021, 1, 10)), &[]),
            record(3, None, None, Some(date(2019, 5, 2)), &[]),
            record(4, None, None, None, &[]),
        ];
        let stats = compute_stats(&records, date(2021, 5, 15));

        assert_eq!(stats.movies_this_month, 1);
        assert_eq!(stats.movies_this_year, 2);
    }

    #[test]
    fn ranks_top_genres_by_count() {
        let records = vec![
            record(1, None, None, None, &["Drama", "Action"]),
            record(2, None, None, None, &["Drama"]),
            record(3, None, None, None, &["Horror"]),
        ];
        let stats = compute_stats(&records, date(2021, 5, 15));

        assert_eq!(stats.top_genres[0].genre, "Drama");
        assert_eq!(stats.top_genres[0].count, 2);
        assert_eq!(stats.top_genres.len(), 3);
    }

    #[test]
    fn keeps_at_most_five_genres() {
        let records = vec![record(
            1,
            None,
            None,
            None,
            &["A", "B", "C", "D", "E", "F", "G"],
        )];
        let stats = compute_stats(&records, date(2021, 5, 15));
        assert_eq!(stats.top_genres.len(), 5);
    }

    #[test]
    fn formats_runtime_with_days() {
        assert_eq!(format_runtime(0), "0 minutes");
        assert_eq!(format_runtime(1), "1 minute");
        assert_eq!(format_runtime(60), "1 hour");
        assert_eq!(format_runtime(1565), "1 day, 2 hours, 5 minutes");
        assert_eq!(format_runtime(2880), "2 days");
    }
}
