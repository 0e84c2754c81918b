//! Read queries for the query service
//!
//! Every list query orders by primary key before applying the page window,
//! so a given data snapshot always pages the same way. Callers pass a
//! connection they acquired for the duration of one request. Lists with
//! nested relations read parents and children in one transaction, so both
//! statements see the same page.

use super::filters::{
    LeagueFilter, Page, PerformanceFilter, PlayerFilter, QueryFilter, TeamFilter, WeekFilter,
};
use super::models::*;
use crate::Result;
use sqlx::{Connection, FromRow, QueryBuilder, Sqlite, SqliteConnection};
use std::collections::HashMap;

/// One roster membership joined with the player it points at
#[derive(FromRow)]
struct RosterRow {
    roster_team_id: i64,
    #[sqlx(flatten)]
    player: PlayerSummary,
}

const PLAYER_COLUMNS: &str =
    "player_id, gsis_id, first_name, last_name, position, last_changed_date";
const ROSTER_COLUMNS: &str = "team_player.team_id AS roster_team_id, \
     player.player_id AS player_id, player.gsis_id AS gsis_id, \
     player.first_name AS first_name, player.last_name AS last_name, \
     player.position AS position, player.last_changed_date AS last_changed_date";
const PERFORMANCE_COLUMNS: &str =
    "performance_id, player_id, week_number, fantasy_points, last_changed_date";
const TEAM_COLUMNS: &str = "team_id, league_id, team_name, last_changed_date";
const LEAGUE_COLUMNS: &str = "league_id, league_name, scoring_type, last_changed_date";
const WEEK_COLUMNS: &str = "week_number, start_date, end_date, last_changed_date";

/// Build `SELECT <columns> FROM <table> [WHERE ...] ORDER BY <key> LIMIT ? OFFSET ?`
fn list_query<'args>(
    columns: &str,
    table: &str,
    order_by: &str,
    filter: &dyn QueryFilter,
    page: Page,
) -> QueryBuilder<'args, Sqlite> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM {}", columns, table));
    filter.push_where(&mut qb);
    qb.push(" ORDER BY ").push(order_by);
    page.push_window(&mut qb);
    qb
}

/// Parent rows a nested load covers: one page of a list query, or one row
enum Scope<'a> {
    Page {
        filter: &'a dyn QueryFilter,
        page: Page,
    },
    One(i64),
}

impl Scope<'_> {
    /// Push the parent keys for `IN (...)`. A page repeats its own window as a
    /// subquery, so the bind count stays fixed however large `limit` is.
    fn push_keys(&self, qb: &mut QueryBuilder<'_, Sqlite>, key: &str, table: &str) {
        match self {
            Scope::Page { filter, page } => {
                qb.push(format!("SELECT {} FROM {}", key, table));
                filter.push_where(qb);
                qb.push(" ORDER BY ").push(key);
                page.push_window(qb);
            }
            Scope::One(id) => {
                qb.push_bind(*id);
            }
        }
    }
}

/// List players with their performances
pub async fn list_players(
    conn: &mut SqliteConnection,
    filter: &PlayerFilter,
    page: Page,
) -> Result<Vec<Player>> {
    let mut tx = conn.begin().await?;
    let players: Vec<PlayerSummary> =
        list_query(PLAYER_COLUMNS, "player", "player_id", filter, page)
            .build_query_as()
            .fetch_all(&mut *tx)
            .await?;

    let players = attach_performances(&mut tx, players, Scope::Page { filter, page }).await?;
    tx.commit().await?;
    Ok(players)
}

/// Look up one player by identifier
pub async fn get_player(conn: &mut SqliteConnection, player_id: i64) -> Result<Option<Player>> {
    let player: Option<PlayerSummary> = sqlx::query_as(&format!(
        "SELECT {} FROM player WHERE player_id = ?",
        PLAYER_COLUMNS
    ))
    .bind(player_id)
    .fetch_optional(&mut *conn)
    .await?;

    match player {
        Some(player) => Ok(
            attach_performances(conn, vec![player], Scope::One(player_id))
                .await?
                .pop(),
        ),
        None => Ok(None),
    }
}

/// List weekly performances
pub async fn list_performances(
    conn: &mut SqliteConnection,
    filter: &PerformanceFilter,
    page: Page,
) -> Result<Vec<Performance>> {
    let performances: Vec<Performance> = list_query(
        PERFORMANCE_COLUMNS,
        "performance",
        "performance_id",
        filter,
        page,
    )
    .build_query_as()
    .fetch_all(&mut *conn)
    .await?;

    Ok(performances)
}

/// List leagues with their teams
pub async fn list_leagues(
    conn: &mut SqliteConnection,
    filter: &LeagueFilter,
    page: Page,
) -> Result<Vec<League>> {
    let mut tx = conn.begin().await?;
    let leagues: Vec<LeagueSummary> =
        list_query(LEAGUE_COLUMNS, "league", "league_id", filter, page)
            .build_query_as()
            .fetch_all(&mut *tx)
            .await?;

    let leagues = attach_teams(&mut tx, leagues, Scope::Page { filter, page }).await?;
    tx.commit().await?;
    Ok(leagues)
}

/// Look up one league by identifier
pub async fn get_league(conn: &mut SqliteConnection, league_id: i64) -> Result<Option<League>> {
    let league: Option<LeagueSummary> = sqlx::query_as(&format!(
        "SELECT {} FROM league WHERE league_id = ?",
        LEAGUE_COLUMNS
    ))
    .bind(league_id)
    .fetch_optional(&mut *conn)
    .await?;

    match league {
        Some(league) => Ok(attach_teams(conn, vec![league], Scope::One(league_id))
            .await?
            .pop()),
        None => Ok(None),
    }
}

/// List teams with their rostered players
pub async fn list_teams(
    conn: &mut SqliteConnection,
    filter: &TeamFilter,
    page: Page,
) -> Result<Vec<Team>> {
    let mut tx = conn.begin().await?;
    let teams: Vec<TeamSummary> = list_query(TEAM_COLUMNS, "team", "team_id", filter, page)
        .build_query_as()
        .fetch_all(&mut *tx)
        .await?;

    if teams.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM team_player \
         JOIN player ON player.player_id = team_player.player_id \
         WHERE team_player.team_id IN (",
        ROSTER_COLUMNS
    ));
    Scope::Page { filter, page }.push_keys(&mut qb, "team_id", "team");
    qb.push(") ORDER BY player.player_id");

    let rows: Vec<RosterRow> = qb.build_query_as().fetch_all(&mut *tx).await?;
    tx.commit().await?;

    let mut rosters: HashMap<i64, Vec<PlayerSummary>> = HashMap::new();
    for row in rows {
        rosters.entry(row.roster_team_id).or_default().push(row.player);
    }

    Ok(teams
        .into_iter()
        .map(|team| Team {
            players: rosters.remove(&team.team_id).unwrap_or_default(),
            team,
        })
        .collect())
}

/// List scoring weeks
pub async fn list_weeks(
    conn: &mut SqliteConnection,
    filter: &WeekFilter,
    page: Page,
) -> Result<Vec<Week>> {
    let weeks: Vec<Week> = list_query(WEEK_COLUMNS, "week", "week_number", filter, page)
        .build_query_as()
        .fetch_all(&mut *conn)
        .await?;

    Ok(weeks)
}

/// Full-table counts, each computed by its own `COUNT(*)`
pub async fn get_counts(conn: &mut SqliteConnection) -> Result<Counts> {
    Ok(Counts {
        league_count: count_rows(conn, "league").await?,
        team_count: count_rows(conn, "team").await?,
        player_count: count_rows(conn, "player").await?,
        week_count: count_rows(conn, "week").await?,
    })
}

async fn count_rows(conn: &mut SqliteConnection, table: &str) -> Result<i64> {
    let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {}", table))
        .fetch_one(&mut *conn)
        .await?;
    Ok(count)
}

async fn attach_performances(
    conn: &mut SqliteConnection,
    players: Vec<PlayerSummary>,
    scope: Scope<'_>,
) -> Result<Vec<Player>> {
    if players.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM performance WHERE player_id IN (",
        PERFORMANCE_COLUMNS
    ));
    scope.push_keys(&mut qb, "player_id", "player");
    qb.push(") ORDER BY performance_id");

    let performances: Vec<Performance> = qb.build_query_as().fetch_all(&mut *conn).await?;

    let mut by_player: HashMap<i64, Vec<Performance>> = HashMap::new();
    for performance in performances {
        by_player
            .entry(performance.player_id)
            .or_default()
            .push(performance);
    }

    Ok(players
        .into_iter()
        .map(|player| Player {
            performances: by_player.remove(&player.player_id).unwrap_or_default(),
            player,
        })
        .collect())
}

async fn attach_teams(
    conn: &mut SqliteConnection,
    leagues: Vec<LeagueSummary>,
    scope: Scope<'_>,
) -> Result<Vec<League>> {
    if leagues.is_empty() {
        return Ok(Vec::new());
    }

    let mut qb = QueryBuilder::<Sqlite>::new(format!(
        "SELECT {} FROM team WHERE league_id IN (",
        TEAM_COLUMNS
    ));
    scope.push_keys(&mut qb, "league_id", "league");
    qb.push(") ORDER BY team_id");

    let teams: Vec<TeamSummary> = qb.build_query_as().fetch_all(&mut *conn).await?;

    let mut by_league: HashMap<i64, Vec<TeamSummary>> = HashMap::new();
    for team in teams {
        by_league.entry(team.league_id).or_default().push(team);
    }

    Ok(leagues
        .into_iter()
        .map(|league| League {
            teams: by_league.remove(&league.league_id).unwrap_or_default(),
            league,
        })
        .collect())
}
