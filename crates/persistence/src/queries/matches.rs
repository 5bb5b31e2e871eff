// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Match queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use std::str::FromStr;

use club_ladder_domain::{MatchStatus, SetScore};

use crate::data_models::{HeadToHead, MatchRecord};
use crate::diesel_schema::matches;
use crate::error::PersistenceError;

/// Diesel Queryable struct for match rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = matches)]
struct MatchRow {
    match_id: i64,
    season_id: i64,
    team1_id: i64,
    team2_id: i64,
    status: String,
    scores_json: Option<String>,
    winner_team_id: Option<i64>,
    game_at: Option<String>,
    challenge_text: Option<String>,
    result_entered_by: Option<i64>,
    confirmed_by: Option<i64>,
    created_at: String,
}

impl MatchRow {
    /// Reconstructs the `MatchRecord` from a stored row.
    fn into_record(self) -> Result<MatchRecord, PersistenceError> {
        let status: MatchStatus = MatchStatus::from_str(&self.status)
            .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))?;
        let sets: Option<Vec<SetScore>> = self
            .scores_json
            .as_deref()
            .map(serde_json::from_str)
            .transpose()?;

        Ok(MatchRecord {
            match_id: self.match_id,
            season_id: self.season_id,
            team1_id: self.team1_id,
            team2_id: self.team2_id,
            status,
            sets,
            winner_team_id: self.winner_team_id,
            game_at: self.game_at,
            challenge_text: self.challenge_text,
            result_entered_by: self.result_entered_by,
            confirmed_by: self.confirmed_by,
            created_at: self.created_at,
        })
    }
}

/// Retrieves a match by id.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `match_id` - The match to retrieve
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be reconstructed.
pub fn get_match(
    conn: &mut SqliteConnection,
    match_id: i64,
) -> Result<Option<MatchRecord>, PersistenceError> {
    let row: Option<MatchRow> = matches::table
        .filter(matches::match_id.eq(match_id))
        .select(MatchRow::as_select())
        .first::<MatchRow>(conn)
        .optional()?;

    row.map(MatchRow::into_record).transpose()
}

/// Returns the storage strings for a status set.
pub(crate) fn status_strings(statuses: &[MatchStatus]) -> Vec<&'static str> {
    statuses.iter().map(MatchStatus::as_str).collect()
}

/// Retrieves the set of teams with an open challenge in a season.
///
/// A team appears in this set when it is on either side of a match in
/// status `challenged` or `date_set`. The challenge invariant (at most one
/// open challenge per team) makes this a set without deduplication, but
/// the result is deduplicated anyway so a violated invariant cannot hide.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `season_id` - The season to inspect
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn teams_with_open_challenge(
    conn: &mut SqliteConnection,
    season_id: i64,
) -> Result<Vec<i64>, PersistenceError> {
    let pairs: Vec<(i64, i64)> = matches::table
        .filter(matches::season_id.eq(season_id))
        .filter(matches::status.eq_any(status_strings(MatchStatus::OPEN)))
        .select((matches::team1_id, matches::team2_id))
        .load::<(i64, i64)>(conn)?;

    let mut team_ids: Vec<i64> = Vec::with_capacity(pairs.len() * 2);
    for (team1_id, team2_id) in pairs {
        if !team_ids.contains(&team1_id) {
            team_ids.push(team1_id);
        }
        if !team_ids.contains(&team2_id) {
            team_ids.push(team2_id);
        }
    }
    Ok(team_ids)
}

/// Computes the head-to-head record between two teams.
///
/// Counts wins across all matches with a decided winner (`completed` and
/// `forfeited`) played between the pair, in either challenge direction.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `team_a_id` - The first team
/// * `team_b_id` - The second team
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn head_to_head(
    conn: &mut SqliteConnection,
    team_a_id: i64,
    team_b_id: i64,
) -> Result<HeadToHead, PersistenceError> {
    let decided: Vec<&'static str> = status_strings(&[MatchStatus::Completed, MatchStatus::Forfeited]);
    let winners: Vec<Option<i64>> = matches::table
        .filter(matches::status.eq_any(decided))
        .filter(
            matches::team1_id
                .eq(team_a_id)
                .and(matches::team2_id.eq(team_b_id))
                .or(matches::team1_id
                    .eq(team_b_id)
                    .and(matches::team2_id.eq(team_a_id))),
        )
        .select(matches::winner_team_id)
        .load::<Option<i64>>(conn)?;

    let mut record: HeadToHead = HeadToHead {
        team_a_id,
        team_b_id,
        team_a_wins: 0,
        team_b_wins: 0,
    };
    for winner in winners.into_iter().flatten() {
        if winner == team_a_id {
            record.team_a_wins += 1;
        } else if winner == team_b_id {
            record.team_b_wins += 1;
        }
    }
    Ok(record)
}
