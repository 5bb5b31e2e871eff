// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Standings snapshot appends.
//!
//! Snapshots are append-only: this module inserts brand-new rows and never
//! edits existing ones. Callers hold the season lock, because deciding the
//! new sequence requires reading the latest one first.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use club_ladder::{append_team, ensure_permutation};

use crate::diesel_schema::standings_snapshots;
use crate::mutations::TxError;
use crate::queries;
use crate::sqlite::get_last_insert_rowid;

/// Appends one snapshot row.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `season_id` - The season the snapshot belongs to
/// * `results` - The new ordered team sequence
/// * `match_id` - The triggering match, if any
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Errors
///
/// Returns a consistency error if `results` contains a duplicate team id.
pub fn insert_snapshot(
    conn: &mut SqliteConnection,
    season_id: i64,
    results: &[i64],
    match_id: Option<i64>,
    created_at: &str,
) -> Result<i64, TxError> {
    ensure_permutation(season_id, results)?;
    let results_json: String = serde_json::to_string(results)?;

    diesel::insert_into(standings_snapshots::table)
        .values((
            standings_snapshots::season_id.eq(season_id),
            standings_snapshots::match_id.eq(match_id),
            standings_snapshots::results_json.eq(&results_json),
            standings_snapshots::created_at.eq(created_at),
        ))
        .execute(conn)?;

    let snapshot_id: i64 = get_last_insert_rowid(conn)?;
    debug!(season_id, snapshot_id, teams = results.len(), "Appended standings snapshot");
    Ok(snapshot_id)
}

/// Appends a team at the bottom of the season's standings.
///
/// Reads the latest snapshot (or starts from an empty sequence), appends
/// the team, and inserts the new snapshot. Must run under the season lock.
///
/// # Arguments
///
/// * `conn` - The active transaction's connection
/// * `season_id` - The season to extend
/// * `team_id` - The enrolling team
/// * `created_at` - The operation's timestamp (RFC 3339)
///
/// # Returns
///
/// The team's 1-based starting rank.
///
/// # Errors
///
/// Returns a consistency error if the team is already ranked.
pub fn append_team_to_standings(
    conn: &mut SqliteConnection,
    season_id: i64,
    team_id: i64,
    created_at: &str,
) -> Result<u32, TxError> {
    let latest: Vec<i64> = queries::standings::latest_snapshot(conn, season_id)?
        .map(|snapshot| snapshot.results)
        .unwrap_or_default();

    let (new_results, rank) = append_team(season_id, &latest, team_id)?;
    insert_snapshot(conn, season_id, &new_results, None, created_at)?;
    Ok(rank)
}
