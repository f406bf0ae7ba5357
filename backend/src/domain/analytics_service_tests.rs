//! Tests for the analytics service.

use std::sync::Arc;

use chrono::{TimeZone, Utc};
use rstest::rstest;

use super::*;
use crate::domain::ports::{MockFavoriteRepository, MockRankingApi};
use crate::domain::{RankingCategory, Slot};

fn favorite(slot: i64, category: &str, day: u32) -> Favorite {
    let created_at = Utc
        .with_ymd_and_hms(2024, 3, day, 12, 0, 0)
        .single()
        .expect("valid timestamp");
    Favorite {
        user_id: UserId::random(),
        slot: Slot::new(slot).expect("slot"),
        category: category.to_owned(),
        title: format!("title {slot}"),
        note: String::new(),
        created_at,
        updated_at: created_at,
    }
}

fn category(id: &str, name: &str, icon: &str) -> RankingCategory {
    RankingCategory {
        id: id.to_owned(),
        name: name.to_owned(),
        icon: icon.to_owned(),
    }
}

fn items(titles: &[&str]) -> Vec<RankedItem> {
    titles
        .iter()
        .enumerate()
        .map(|(index, title)| RankedItem {
            title: (*title).to_owned(),
            rank: u32::try_from(index + 1).expect("rank fits"),
        })
        .collect()
}

fn favourites_repo(rows: Vec<Favorite>) -> MockFavoriteRepository {
    let mut repo = MockFavoriteRepository::new();
    repo.expect_list_by_creation()
        .times(1)
        .return_once(move |_| Ok(rows));
    repo
}

#[test]
fn category_counts_keep_first_seen_order_and_bucket_empty() {
    let rows = vec![
        favorite(1, "本", 1),
        favorite(2, "", 1),
        favorite(3, "映画", 2),
        favorite(4, "本", 3),
        favorite(5, "  ", 3),
        favorite(1, " 本 ", 4),
    ];

    let counts = category_counts(&rows);

    let pairs: Vec<_> = counts
        .iter()
        .map(|entry| (entry.category.as_str(), entry.count))
        .collect();
    assert_eq!(
        pairs,
        [
            ("本", 2),
            (UNCATEGORISED_LABEL, 1),
            ("映画", 1),
            ("  ", 1),
            (" 本 ", 1)
        ]
    );
}

#[test]
fn timeline_is_cumulative_and_sorted_by_day() {
    let rows = vec![favorite(1, "", 9), favorite(2, "", 2), favorite(3, "", 9)];

    let timeline = cumulative_timeline(&rows);

    assert_eq!(timeline.len(), 2);
    assert_eq!(timeline[0].date, "2024-03-02");
    assert_eq!(timeline[0].label, "03-02");
    assert_eq!(timeline[0].cumulative, 1);
    assert_eq!(timeline[1].date, "2024-03-09");
    assert_eq!(timeline[1].cumulative, 3);
}

#[test]
fn empty_favourites_give_empty_timeline() {
    assert!(cumulative_timeline(&[]).is_empty());
}

#[rstest]
#[case(vec![1994, 1999, 2001, 1987], vec![("1980s", 1), ("1990s", 2), ("2000s", 1)])]
#[case(vec![], vec![])]
fn decade_buckets_sort_ascending(#[case] years: Vec<i32>, #[case] expected: Vec<(&str, u32)>) {
    let buckets = decade_buckets(years);
    let pairs: Vec<_> = buckets
        .iter()
        .map(|bucket| (bucket.decade.as_str(), bucket.count))
        .collect();
    assert_eq!(pairs, expected);
}

#[tokio::test]
async fn remote_failure_degrades_and_falls_back_to_favourite_categories() {
    let repo = favourites_repo(vec![favorite(1, "本", 1), favorite(2, "本", 2)]);
    let mut api = MockRankingApi::new();
    api.expect_categories()
        .times(1)
        .return_once(|| Err(RankingApiError::timeout("10s elapsed")));
    api.expect_movie_release_year().times(0);

    let service = AnalyticsService::new(Arc::new(repo), Arc::new(api), 4);
    let report = service
        .overview(&UserId::random())
        .await
        .expect("report");

    assert!(report.degraded);
    assert!(report.rankings.is_empty());
    assert!(report.radar.is_empty());
    assert_eq!(report.pie, report.categories);
    assert_eq!(report.stats.total_items, 2);
    assert_eq!(report.stats.category_count, 1);
    assert_eq!(report.stats.favorite_count, 2);
    assert_eq!(report.decades, DecadeDistribution::default());
}

#[tokio::test]
async fn rankings_feed_radar_pie_and_film_decades() {
    let repo = favourites_repo(vec![favorite(1, "映画", 1)]);
    let mut api = MockRankingApi::new();
    api.expect_categories().times(1).return_once(|| {
        Ok(vec![
            category("books", "本", "📚"),
            category("films", "映画", "🎬"),
        ])
    });
    api.expect_category_items()
        .withf(|id| id == "books")
        .times(1)
        .return_once(|_| Ok(items(&["B1", "B2"])));
    api.expect_category_items()
        .withf(|id| id == "films")
        .times(1)
        .return_once(|_| Ok(items(&["Heat", "Alien", "Broken", "Unknown", "Dune", "Up"])));
    api.expect_movie_release_year()
        .times(6)
        .returning(|title| match title {
            "Heat" => Ok(Some(1995)),
            "Alien" => Ok(Some(1979)),
            "Dune" => Ok(Some(2021)),
            "Up" => Ok(Some(2009)),
            "Broken" => Err(RankingApiError::transport("connection reset")),
            _ => Ok(None),
        });

    let service = AnalyticsService::new(Arc::new(repo), Arc::new(api), 2);
    let report = service
        .overview(&UserId::random())
        .await
        .expect("report");

    assert!(!report.degraded);
    assert_eq!(report.rankings.len(), 2);
    let films = &report.rankings[1];
    assert_eq!(films.item_count, 6);
    assert_eq!(films.top_items.len(), 5);

    assert_eq!(report.radar[0].label, "📚 本");
    assert_eq!(report.radar[1].count, 6);
    assert!(report.radar.iter().all(|point| point.full_mark == 6));

    assert_eq!(report.stats.total_items, 8);
    assert_eq!(report.stats.category_count, 2);
    assert_eq!(report.stats.favorite_count, 1);

    assert_eq!(report.decades.category.as_deref(), Some("映画"));
    assert_eq!(report.decades.failed_lookups, 1);
    let decades: Vec<_> = report
        .decades
        .buckets
        .iter()
        .map(|bucket| (bucket.decade.as_str(), bucket.count))
        .collect();
    assert_eq!(decades, [("1970s", 1), ("1990s", 1), ("2000s", 1), ("2020s", 1)]);
}

#[tokio::test]
async fn radar_full_mark_has_a_floor_of_five() {
    let repo = favourites_repo(Vec::new());
    let mut api = MockRankingApi::new();
    api.expect_categories()
        .times(1)
        .return_once(|| Ok(vec![category("games", "ゲーム", "🎮")]));
    api.expect_category_items()
        .times(1)
        .return_once(|_| Ok(items(&["Tetris"])));

    let service = AnalyticsService::new(Arc::new(repo), Arc::new(api), 4);
    let report = service
        .overview(&UserId::random())
        .await
        .expect("report");

    assert_eq!(report.radar[0].full_mark, 5);
    assert_eq!(report.decades.category, None);
}

#[rstest]
#[case(Ok("よく映画を観ています".to_owned()), "よく映画を観ています", true)]
#[case(Ok("   ".to_owned()), NO_ANALYSIS_MESSAGE, true)]
#[case(Err(RankingApiError::rate_limited("slow down")), ANALYSIS_FAILED_MESSAGE, false)]
#[tokio::test]
async fn ai_analysis_falls_back_to_fixed_texts(
    #[case] outcome: Result<String, RankingApiError>,
    #[case] text: &str,
    #[case] available: bool,
) {
    let mut api = MockRankingApi::new();
    api.expect_analysis().times(1).return_once(move || outcome);

    let service = AnalyticsService::new(
        Arc::new(MockFavoriteRepository::new()),
        Arc::new(api),
        4,
    );
    let analysis = service.ai_analysis().await;

    assert_eq!(analysis.text, text);
    assert_eq!(analysis.available, available);
}
