use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};

use crate::models::{DiaryMonth, WatchedMovieRecord};

/// Groups diary-dated records by calendar month, newest month first and the
/// newest watch first within a month. Records without a watched date are not
/// diary entries and are dropped.
pub fn build_diary(records: Vec<WatchedMovieRecord>) -> Vec<DiaryMonth> {
    let mut months: BTreeMap<(i32, u32), Vec<WatchedMovieRecord>> = BTreeMap::new();

    for record in records {
        let Some(date) = record.doc.watched_date else {
            continue;
        };
        months
            .entry((date.year(), date.month()))
            .or_default()
            .push(record);
    }

    months
        .into_iter()
        .rev()
        .map(|((year, month), mut movies)| {
            movies.sort_by(|a, b| b.doc.watched_date.cmp(&a.doc.watched_date));

            let month_year = format!("{:04}-{:02}", year, month);
            let display_name = NaiveDate::from_ymd_opt(year, month, 1)
                .map(|d| d.format("%B %Y").to_string())
                .unwrap_or_else(|| month_year.clone());

            DiaryMonth {
                month_year,
                display_name,
                movies,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::models::{WatchMethod, WatchedMovieDoc};

    fn record(movie_id: i64, watched_date: Option<NaiveDate>) -> WatchedMovieRecord {
        WatchedMovieRecord {
            id: Uuid::new_v4(),
            doc: WatchedMovieDoc {
                movie_id,
                movie_title: format!("Movie {}", movie_id),
                movie_poster: None,
                movie_release_date: None,
                movie_genres: vec![],
                runtime: None,
                watched_date,
                rating: None,
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
    fn groups_by_month_newest_first() {
        let diary = build_diary(vec![
            record(1, Some(date(2021, 3, 10))),
            record(2, Some(date(2021, 5, 2))),
            record(3, Some(date(2020, 12, 25))),
        ]);

        let months: Vec<&str> = diary.iter().map(|m| m.month_year.as_str()).collect();
        assert_eq!(months, vec!["2021-05", "2021-03", "2020-12"]);
        assert_eq!(diary[0].display_name, "May 2021");
        assert_eq!(diary[2].display_name, "December 2020");
    }

    #[test]
    fn orders_within_a_month_by_date_descending() {
        let diary = build_diary(vec![
            record(1, Some(date(2021, 5, 2))),
            record(2, Some(date(2021, 5, 30))),
            record(3, Some(date(2021, 5, 15))),
        ]);

        let order: Vec<i64> = diary[0].movies.iter().map(|r| r.doc.movie_id).collect();
        assert_eq!(order, vec![2, 3, 1]);
    }

    #[test]
    fn drops_records_without_a_watched_date() {
        let diary = build_diary(vec![record(1, None), record(2, Some(date(2021, 5, 2)))]);
        assert_eq!(diary.len(), 1);
        assert_eq!(diary[0].movies.len(), 1);
    }

    #[test]
    fn empty_collection_yields_empty_diary() {
        assert!(build_diary(vec![]).is_empty());
    }
}
