// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Team and membership queries.

use diesel::prelude::*;
use diesel::SqliteConnection;

use club_ladder_domain::Team;

use crate::diesel_schema::{team_members, teams};
use crate::error::PersistenceError;

/// Retrieves a team by id, including its ordered member list.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team to retrieve
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_team(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Option<Team>, PersistenceError> {
    let row: Option<(i64, i64, i32)> = teams::table
        .filter(teams::team_id.eq(team_id))
        .select((teams::team_id, teams::season_id, teams::opted_out))
        .first::<(i64, i64, i32)>(conn)
        .optional()?;

    let Some((team_id, season_id, opted_out)) = row else {
        return Ok(None);
    };

    let members: Vec<i64> = member_ids(conn, team_id)?;
    Ok(Some(Team::with_id(
        team_id,
        season_id,
        members,
        opted_out != 0,
    )))
}

/// Retrieves a team's ordered member player ids.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_id` - The team whose members to list
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn member_ids(
    conn: &mut SqliteConnection,
    team_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    Ok(team_members::table
        .filter(team_members::team_id.eq(team_id))
        .order(team_members::position.asc())
        .select(team_members::player_id)
        .load::<i64>(conn)?)
}

/// Finds the team a player belongs to within a season, ignoring teams that
/// have opted out.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to search in
/// * `player_id` - The player to look up
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn find_team_of_player(
    conn: &mut SqliteConnection,
    season_id: i64,
    player_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    Ok(team_members::table
        .inner_join(teams::table)
        .filter(teams::season_id.eq(season_id))
        .filter(teams::opted_out.eq(0))
        .filter(team_members::player_id.eq(player_id))
        .select(teams::team_id)
        .first::<i64>(conn)
        .optional()?)
}
