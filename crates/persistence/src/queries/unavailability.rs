// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Unavailability window queries.
//!
//! These checks are advisory: they only ever prevent an operation, never
//! corrupt state, so they run lock-free against normal row consistency.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::diesel_schema::{team_members, teams, unavailability};
use crate::error::PersistenceError;

/// Retrieves the players of a season with an active unavailability window.
///
/// A window is active when `starts_at <= now <= ends_at`. RFC 3339 strings
/// compare lexicographically in timestamp order.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to inspect
/// * `now` - The reference instant (RFC 3339)
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn unavailable_player_ids(
    conn: &mut SqliteConnection,
    season_id: i64,
    now: &str,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(unavailability::table
        .filter(unavailability::season_id.eq(season_id))
        .filter(unavailability::starts_at.le(now))
        .filter(unavailability::ends_at.ge(now))
        .select(unavailability::player_id)
        .distinct()
        .load::<i64>(conn)?)
}

/// Retrieves the teams of a season with at least one unavailable member.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to inspect
/// * `now` - The reference instant (RFC 3339)
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn unavailable_team_ids(
    conn: &mut SqliteConnection,
    season_id: i64,
    now: &str,
) -> Result<Vec<i64>, PersistenceError> {
    let players: Vec<i64> = unavailable_player_ids(conn, season_id, now)?;
    if players.is_empty() {
        return Ok(Vec::new());
    }

    Ok(team_members::table
        .inner_join(teams::table)
        .filter(teams::season_id.eq(season_id))
        .filter(team_members::player_id.eq_any(players))
        .select(teams::team_id)
        .distinct()
        .load::<i64>(conn)?)
}

/// Returns whether any member of a team has an active unavailability window.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season the team plays in
/// * `team_id` - The team to check
/// * `now` - The reference instant (RFC 3339)
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn team_has_unavailable_member(
    conn: &mut SqliteConnection,
    season_id: i64,
    team_id: i64,
    now: &str,
) -> Result<bool, PersistenceError> {
    Ok(unavailable_team_ids(conn, season_id, now)?.contains(&team_id))
}
