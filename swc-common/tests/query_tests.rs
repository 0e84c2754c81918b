//! Integration tests for the shared read queries
//!
//! Tests cover:
//! - Deterministic skip/limit pagination over every entity
//! - Inclusive last-changed watermark and exact-match filters
//! - Lookups by identifier (hit and miss)
//! - Nested performances, rosters and league teams
//! - Full-table counts

use chrono::NaiveDate;
use sqlx::SqlitePool;
use swc_common::db::{
    get_counts, get_league, get_player, init_database, list_leagues, list_performances,
    list_players, list_teams, list_weeks, LeagueFilter, Page, PerformanceFilter, PlayerFilter,
    TeamFilter, WeekFilter,
};
use tempfile::TempDir;

/// Test helper: fresh database in a temp dir, seeded with a small league
async fn setup_test_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("swc.db"))
        .await
        .expect("Should initialize database");

    for sql in [
        "INSERT INTO player VALUES (1001, '00-0001', 'Josh', 'Allen', 'QB', '2024-03-01')",
        "INSERT INTO player VALUES (1002, '00-0002', 'Bijan', 'Robinson', 'RB', '2024-04-01')",
        "INSERT INTO player VALUES (1003, NULL, 'Josh', 'Downs', 'WR', '2024-04-02')",
        "INSERT INTO player VALUES (1004, '00-0004', 'Sam', 'LaPorta', 'TE', '2024-04-15')",
        "INSERT INTO player VALUES (1005, '00-0005', 'Justin', 'Tucker', 'K', '2024-05-01')",
        "INSERT INTO week VALUES ('202301', '2023-09-05', '2023-09-11', '2024-01-01')",
        "INSERT INTO week VALUES ('202302', '2023-09-12', '2023-09-18', '2024-02-01')",
        "INSERT INTO performance VALUES (17, '202301', 20.5, 1001, '2024-03-01')",
        "INSERT INTO performance VALUES (9, '202302', 18.0, 1001, '2024-04-20')",
        "INSERT INTO performance VALUES (12, '202301', 11.2, 1002, '2024-04-01')",
        "INSERT INTO league VALUES (5001, 'Pigskin Prodigal Fantasy League', 'PPR', '2024-01-10')",
        "INSERT INTO league VALUES (5002, 'Recurring Champions League', 'Half-PPR', '2024-04-10')",
        "INSERT INTO league VALUES (5003, 'Recurring Champions League', 'Standard', '2024-04-11')",
        "INSERT INTO team VALUES (6002, 5001, 'Gridiron Gurus', '2024-01-10')",
        "INSERT INTO team VALUES (6001, 5001, 'Touchdown Titans', '2024-01-10')",
        "INSERT INTO team VALUES (6003, 5002, 'Touchdown Titans', '2024-04-10')",
        "INSERT INTO team_player VALUES (6001, 1003, '2024-01-10')",
        "INSERT INTO team_player VALUES (6001, 1001, '2024-01-10')",
        "INSERT INTO team_player VALUES (6002, 1002, '2024-01-10')",
    ] {
        sqlx::query(sql).execute(&pool).await.expect("Should seed row");
    }

    (dir, pool)
}

fn date(y: i32, m: u32, d: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(y, m, d)
}

// =============================================================================
// Pagination
// =============================================================================

#[tokio::test]
async fn test_players_first_page() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let players = list_players(&mut conn, &PlayerFilter::default(), Page::new(0, 2).unwrap())
        .await
        .unwrap();

    let ids: Vec<i64> = players.iter().map(|p| p.player.player_id).collect();
    assert_eq!(ids, vec![1001, 1002]);
}

#[tokio::test]
async fn test_players_second_page() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let players = list_players(&mut conn, &PlayerFilter::default(), Page::new(2, 2).unwrap())
        .await
        .unwrap();

    let ids: Vec<i64> = players.iter().map(|p| p.player.player_id).collect();
    assert_eq!(ids, vec![1003, 1004]);
}

#[tokio::test]
async fn test_pages_are_slices_of_full_ordering() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let all: Vec<i64> = list_players(&mut conn, &PlayerFilter::default(), Page::default())
        .await
        .unwrap()
        .iter()
        .map(|p| p.player.player_id)
        .collect();
    assert_eq!(all, vec![1001, 1002, 1003, 1004, 1005]);

    for skip in 0..7 {
        for limit in 1..7 {
            let page: Vec<i64> =
                list_players(&mut conn, &PlayerFilter::default(), Page::new(skip, limit).unwrap())
                    .await
                    .unwrap()
                    .iter()
                    .map(|p| p.player.player_id)
                    .collect();

            let expected: Vec<i64> = all
                .iter()
                .skip(skip as usize)
                .take(limit as usize)
                .copied()
                .collect();
            assert!(page.len() <= limit as usize);
            assert_eq!(page, expected, "skip={} limit={}", skip, limit);
        }
    }
}

#[tokio::test]
async fn test_skip_past_end_is_empty() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let players = list_players(&mut conn, &PlayerFilter::default(), Page::new(50, 10).unwrap())
        .await
        .unwrap();
    assert!(players.is_empty());
}

#[tokio::test]
async fn test_performances_ordered_by_id() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let performances = list_performances(&mut conn, &PerformanceFilter::default(), Page::default())
        .await
        .unwrap();

    let ids: Vec<i64> = performances.iter().map(|p| p.performance_id).collect();
    assert_eq!(ids, vec![9, 12, 17]);
}

#[tokio::test]
async fn test_weeks_ordered_by_week_number() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let weeks = list_weeks(&mut conn, &WeekFilter::default(), Page::default())
        .await
        .unwrap();

    assert_eq!(weeks.len(), 2);
    assert_eq!(weeks[0].week_number, "202301");
    assert_eq!(weeks[0].start_date, date(2023, 9, 5).unwrap());
    assert_eq!(weeks[1].week_number, "202302");
}

// =============================================================================
// Filters
// =============================================================================

#[tokio::test]
async fn test_watermark_is_inclusive() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let filter = PlayerFilter {
        min_last_changed_date: date(2024, 4, 1),
        ..Default::default()
    };
    let ids: Vec<i64> = list_players(&mut conn, &filter, Page::default())
        .await
        .unwrap()
        .iter()
        .map(|p| p.player.player_id)
        .collect();

    assert_eq!(ids, vec![1002, 1003, 1004, 1005]);
}

#[tokio::test]
async fn test_player_name_filters_are_exact() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let filter = PlayerFilter {
        first_name: Some("Josh".to_string()),
        ..Default::default()
    };
    let players = list_players(&mut conn, &filter, Page::default()).await.unwrap();
    assert_eq!(players.len(), 2);

    let filter = PlayerFilter {
        first_name: Some("Josh".to_string()),
        last_name: Some("Downs".to_string()),
        ..Default::default()
    };
    let players = list_players(&mut conn, &filter, Page::default()).await.unwrap();
    assert_eq!(players.len(), 1);
    assert_eq!(players[0].player.player_id, 1003);
    assert_eq!(players[0].player.gsis_id, None);

    let filter = PlayerFilter {
        first_name: Some("Jos".to_string()),
        ..Default::default()
    };
    assert!(list_players(&mut conn, &filter, Page::default())
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn test_performance_watermark() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let filter = PerformanceFilter {
        min_last_changed_date: date(2024, 4, 1),
    };
    let ids: Vec<i64> = list_performances(&mut conn, &filter, Page::default())
        .await
        .unwrap()
        .iter()
        .map(|p| p.performance_id)
        .collect();
    assert_eq!(ids, vec![9, 12]);
}

#[tokio::test]
async fn test_league_name_matches_several() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let filter = LeagueFilter {
        league_name: Some("Recurring Champions League".to_string()),
        ..Default::default()
    };
    let ids: Vec<i64> = list_leagues(&mut conn, &filter, Page::default())
        .await
        .unwrap()
        .iter()
        .map(|l| l.league.league_id)
        .collect();
    assert_eq!(ids, vec![5002, 5003]);
}

#[tokio::test]
async fn test_team_filters_combine() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let filter = TeamFilter {
        team_name: Some("Touchdown Titans".to_string()),
        ..Default::default()
    };
    assert_eq!(
        list_teams(&mut conn, &filter, Page::default()).await.unwrap().len(),
        2
    );

    let filter = TeamFilter {
        team_name: Some("Touchdown Titans".to_string()),
        league_id: Some(5002),
        ..Default::default()
    };
    let teams = list_teams(&mut conn, &filter, Page::default()).await.unwrap();
    assert_eq!(teams.len(), 1);
    assert_eq!(teams[0].team.team_id, 6003);
    assert!(teams[0].players.is_empty());
}

#[tokio::test]
async fn test_week_watermark_excludes_older() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let filter = WeekFilter {
        min_last_changed_date: date(2024, 1, 2),
    };
    let weeks = list_weeks(&mut conn, &filter, Page::default()).await.unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].week_number, "202302");
}

// =============================================================================
// Nested relations
// =============================================================================

#[tokio::test]
async fn test_player_carries_performances() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let players = list_players(&mut conn, &PlayerFilter::default(), Page::new(0, 3).unwrap())
        .await
        .unwrap();

    let allen: Vec<i64> = players[0].performances.iter().map(|p| p.performance_id).collect();
    assert_eq!(allen, vec![9, 17]);
    assert_eq!(players[1].performances.len(), 1);
    assert!(players[2].performances.is_empty());
}

#[tokio::test]
async fn test_team_roster_ordered_by_player() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let teams = list_teams(&mut conn, &TeamFilter::default(), Page::default())
        .await
        .unwrap();

    let team_ids: Vec<i64> = teams.iter().map(|t| t.team.team_id).collect();
    assert_eq!(team_ids, vec![6001, 6002, 6003]);

    let roster: Vec<i64> = teams[0].players.iter().map(|p| p.player_id).collect();
    assert_eq!(roster, vec![1001, 1003]);
    assert_eq!(teams[1].players[0].last_name, "Robinson");
}

#[tokio::test]
async fn test_league_carries_teams() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let league = get_league(&mut conn, 5001).await.unwrap().expect("League exists");
    assert_eq!(league.league.scoring_type, "PPR");
    let team_ids: Vec<i64> = league.teams.iter().map(|t| t.team_id).collect();
    assert_eq!(team_ids, vec![6001, 6002]);

    let league = get_league(&mut conn, 5003).await.unwrap().expect("League exists");
    assert!(league.teams.is_empty());
}

// =============================================================================
// Lookups and counts
// =============================================================================

#[tokio::test]
async fn test_get_player_hit_and_miss() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let player = get_player(&mut conn, 1002).await.unwrap().expect("Player exists");
    assert_eq!(player.player.first_name, "Bijan");
    assert_eq!(player.player.last_changed_date, date(2024, 4, 1).unwrap());
    assert_eq!(player.performances.len(), 1);

    assert!(get_player(&mut conn, 9999).await.unwrap().is_none());
    assert!(get_league(&mut conn, 9999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_counts_cover_full_tables() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();

    // A narrow page in flight must not change the totals
    let _ = list_players(&mut conn, &PlayerFilter::default(), Page::new(1, 1).unwrap())
        .await
        .unwrap();

    let counts = get_counts(&mut conn).await.unwrap();
    assert_eq!(counts.league_count, 3);
    assert_eq!(counts.team_count, 3);
    assert_eq!(counts.player_count, 5);
    assert_eq!(counts.week_count, 2);
}

#[tokio::test]
async fn test_empty_store() {
    let dir = TempDir::new().unwrap();
    let pool = init_database(&dir.path().join("empty.db")).await.unwrap();
    let mut conn = pool.acquire().await.unwrap();

    assert!(list_teams(&mut conn, &TeamFilter::default(), Page::default())
        .await
        .unwrap()
        .is_empty());
    assert!(list_leagues(&mut conn, &LeagueFilter::default(), Page::default())
        .await
        .unwrap()
        .is_empty());

    let counts = get_counts(&mut conn).await.unwrap();
    assert_eq!(counts.player_count, 0);
    assert_eq!(counts.week_count, 0);
}

// =============================================================================
// Large pages
// =============================================================================

/// More rows than SQLite allows bound variables in one statement
const LARGE_ROW_COUNT: i64 = 33_000;

/// Test helper: LARGE_ROW_COUNT players, leagues and teams, each player
/// with one performance and each team in its own league rostering one player
async fn setup_large_db() -> (TempDir, SqlitePool) {
    let dir = TempDir::new().expect("Should create temp dir");
    let pool = init_database(&dir.path().join("swc.db"))
        .await
        .expect("Should initialize database");

    for insert in [
        "INSERT INTO player SELECT n, NULL, 'First', 'Last', 'WR', '2024-04-01' FROM seq",
        "INSERT INTO performance SELECT n, '202301', 1.5, n, '2024-04-01' FROM seq",
        "INSERT INTO league SELECT n, 'League', 'PPR', '2024-04-01' FROM seq",
        "INSERT INTO team SELECT n, n, 'Team', '2024-04-01' FROM seq",
        "INSERT INTO team_player SELECT n, n, '2024-04-01' FROM seq",
    ] {
        sqlx::query(&format!(
            "WITH RECURSIVE seq(n) AS (SELECT 1 UNION ALL SELECT n + 1 FROM seq WHERE n < {}) {}",
            LARGE_ROW_COUNT, insert
        ))
        .execute(&pool)
        .await
        .expect("Should seed rows");
    }

    (dir, pool)
}

#[tokio::test]
async fn test_large_player_page_carries_performances() {
    let (_dir, pool) = setup_large_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let players = list_players(
        &mut conn,
        &PlayerFilter::default(),
        Page::new(0, 100_000).unwrap(),
    )
    .await
    .unwrap();

    assert_eq!(players.len() as i64, LARGE_ROW_COUNT);
    assert!(players.iter().all(|p| p.performances.len() == 1));
    assert_eq!(players[32_999].performances[0].performance_id, 33_000);
}

#[tokio::test]
async fn test_large_team_and_league_pages() {
    let (_dir, pool) = setup_large_db().await;
    let mut conn = pool.acquire().await.unwrap();

    let teams = list_teams(&mut conn, &TeamFilter::default(), Page::new(0, 100_000).unwrap())
        .await
        .unwrap();
    assert_eq!(teams.len() as i64, LARGE_ROW_COUNT);
    assert!(teams
        .iter()
        .all(|t| t.players.len() == 1 && t.players[0].player_id == t.team.team_id));

    let leagues = list_leagues(
        &mut conn,
        &LeagueFilter::default(),
        Page::new(10, 100_000).unwrap(),
    )
    .await
    .unwrap();
    assert_eq!(leagues.len() as i64, LARGE_ROW_COUNT - 10);
    assert_eq!(leagues[0].league.league_id, 11);
    assert_eq!(leagues[0].teams[0].team_id, 11);
}

#[tokio::test]
async fn test_nested_rows_follow_filtered_window() {
    let (_dir, pool) = setup_test_db().await;
    let mut conn = pool.acquire().await.unwrap();
    let joshes = PlayerFilter {
        first_name: Some("Josh".to_string()),
        ..Default::default()
    };

    let first = list_players(&mut conn, &joshes, Page::new(0, 1).unwrap())
        .await
        .unwrap();
    assert_eq!(first[0].player.player_id, 1001);
    let perf_ids: Vec<i64> = first[0]
        .performances
        .iter()
        .map(|p| p.performance_id)
        .collect();
    assert_eq!(perf_ids, vec![9, 17]);

    let second = list_players(&mut conn, &joshes, Page::new(1, 1).unwrap())
        .await
        .unwrap();
    assert_eq!(second[0].player.player_id, 1003);
    assert!(second[0].performances.is_empty());
}
